//! Physical and magical damage calculators.
//!
//! Both calculators are pure: they read attacker/defender stats through
//! [`ActorView`] and return per-hit amounts plus the TP the attacker would
//! gain. Nothing is applied here; the evaluator turns the outcome into events.

use crate::config::CombatConfig;
use crate::skill::ResourceCost;
use crate::state::ActorView;
use crate::stats::{ResourceKind, StatKind, StatPair};

// ============================================================================
// TP Scaling
// ============================================================================

/// Maps excess TP units to a potency multiplier.
#[derive(Clone, Copy, Debug)]
pub enum TpScaling {
    /// Potency ignores TP.
    Flat(f32),
    /// `base + per_unit * excess_units`.
    Linear { base: f32, per_unit: f32 },
    /// Arbitrary curve (e.g. piecewise breakpoints).
    Custom(fn(f32) -> f32),
}

impl TpScaling {
    pub const fn linear(base: f32, per_unit: f32) -> Self {
        Self::Linear { base, per_unit }
    }

    pub fn potency(&self, excess_units: f32) -> f32 {
        match self {
            Self::Flat(potency) => *potency,
            Self::Linear { base, per_unit } => base + per_unit * excess_units,
            Self::Custom(curve) => curve(excess_units),
        }
    }
}

/// TP banked beyond the skill's cost, in multiples of the cost.
///
/// The unit is the skill's own TP amount. Skills that declare no TP amount
/// (consumes-all, or costed in another pool) normalize against
/// [`CombatConfig::TP_SCALING_UNIT`].
pub fn excess_tp_units(tp: u32, cost: &ResourceCost) -> f32 {
    let (spent, unit) = match cost.resource {
        ResourceKind::Tp if cost.amount > 0 => (cost.amount, cost.amount),
        _ => (0, CombatConfig::TP_SCALING_UNIT),
    };
    tp.saturating_sub(spent) as f32 / unit as f32
}

// ============================================================================
// Damage Spec
// ============================================================================

/// Declarative parameters of a damage formula.
#[derive(Clone, Copy, Debug)]
pub struct DamageSpec {
    pub hits: u8,
    /// Divide potency across hits instead of concentrating it on hit one.
    pub spread: bool,
    pub stats: StatPair,
    /// Hard cap applied to every hit.
    pub cap: Option<u32>,
    pub scaling: TpScaling,
}

impl DamageSpec {
    pub const fn new(stats: StatPair, scaling: TpScaling) -> Self {
        Self {
            hits: 1,
            spread: false,
            stats,
            cap: None,
            scaling,
        }
    }

    /// Builder: set hit count.
    pub const fn hits(mut self, hits: u8) -> Self {
        self.hits = hits;
        self
    }

    /// Builder: divide potency across hits.
    pub const fn spread(mut self) -> Self {
        self.spread = true;
        self
    }

    /// Builder: cap every hit.
    pub const fn capped(mut self, cap: u32) -> Self {
        self.cap = Some(cap);
        self
    }

    fn hit_count(&self) -> usize {
        usize::from(self.hits.max(1))
    }
}

/// Result of a damage calculation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DamageOutcome {
    pub hits: Vec<u32>,
    /// TP the attacker gains (reported, not applied).
    pub tp_gained: u32,
}

impl DamageOutcome {
    fn from_hits(hits: Vec<u32>) -> Self {
        let landed = hits.iter().filter(|hit| **hit > 0).count() as u32;
        Self {
            hits,
            tp_gained: landed * CombatConfig::TP_PER_HIT,
        }
    }

    pub fn total(&self) -> u32 {
        self.hits.iter().fold(0u32, |acc, hit| acc.saturating_add(*hit))
    }
}

/// Per-hit potency multipliers for `spec` at the given TP.
pub fn hit_potencies(spec: &DamageSpec, tp: u32, cost: &ResourceCost) -> Vec<f32> {
    let potency = spec.scaling.potency(excess_tp_units(tp, cost));
    let hits = spec.hit_count();

    if spec.spread {
        vec![potency / hits as f32; hits]
    } else {
        let mut potencies = vec![CombatConfig::FLAT_HIT_POTENCY; hits];
        potencies[0] = potency;
        potencies
    }
}

// ============================================================================
// Calculators
// ============================================================================

/// Physical damage.
///
/// ```text
/// fstr = clamp((atk - def) / 4, -8, 16)
/// pdif = clamp(Attack / max(Defense, 1), 0, 2)
/// hit  = floor((WeaponDamage + fstr) * potency_i * pdif)
/// ```
pub fn physical_damage(
    attacker: &dyn ActorView,
    defender: &dyn ActorView,
    cost: &ResourceCost,
    spec: &DamageSpec,
) -> DamageOutcome {
    let stat_diff = attacker.stat(spec.stats.attack) - defender.stat(spec.stats.defend);
    let fstr = (stat_diff / 4).clamp(-8, 16);
    let pdif = (attacker.stat(StatKind::Attack) as f32
        / defender.stat(StatKind::Defense).max(1) as f32)
        .clamp(0.0, 2.0);
    let base = (attacker.stat(StatKind::WeaponDamage) + fstr) as f32;

    let hits = hit_potencies(spec, attacker.resource(ResourceKind::Tp), cost)
        .into_iter()
        .map(|potency| finalize_hit(base * potency * pdif, spec.cap))
        .collect();
    DamageOutcome::from_hits(hits)
}

/// Magical damage.
///
/// ```text
/// dstat = clamp(atk - def, -20, 40)
/// mab   = (100 + MagicAttack) / (100 + MagicDefense)
/// hit   = floor((Level + 2 + dstat) * potency_i * mab)
/// ```
pub fn magical_damage(
    attacker: &dyn ActorView,
    defender: &dyn ActorView,
    cost: &ResourceCost,
    spec: &DamageSpec,
) -> DamageOutcome {
    let dstat =
        (attacker.stat(spec.stats.attack) - defender.stat(spec.stats.defend)).clamp(-20, 40);
    let mab = (100 + attacker.stat(StatKind::MagicAttack)).max(0) as f32
        / (100 + defender.stat(StatKind::MagicDefense)).max(1) as f32;
    let base = (attacker.stat(StatKind::Level) + 2 + dstat) as f32;

    let hits = hit_potencies(spec, attacker.resource(ResourceKind::Tp), cost)
        .into_iter()
        .map(|potency| finalize_hit(base * potency * mab, spec.cap))
        .collect();
    DamageOutcome::from_hits(hits)
}

fn finalize_hit(raw: f32, cap: Option<u32>) -> u32 {
    let hit = raw.max(0.0).floor() as u32;
    match cap {
        Some(cap) => hit.min(cap),
        None => hit,
    }
}
