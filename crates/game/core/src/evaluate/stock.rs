//! Stock evaluators shared by the whole catalog.
//!
//! Every damage/status evaluator here returns an empty sequence against an
//! already defeated target. None of them hides a random draw: the only rolls
//! are the explicit trigger-chance checks in [`grant_status`].

use crate::combat::{self, DamageOutcome, DamageSpec};
use crate::effect::{EffectBundle, EffectDescriptor, EffectFlags};
use crate::evaluate::{PostEvaluation, ResolutionContext, RollTag, TargetEvaluator};
use crate::event::{CombatEvent, DamageKind};
use crate::state::{StatusEffectKind, is_facing};
use crate::stats::{ResourceKind, StatKind};

/// Half-angle within which a gaze target must face its source.
pub const GAZE_HALF_ANGLE: f32 = 90.0;

/// Physical damage evaluator.
pub fn physical_damage(spec: DamageSpec) -> TargetEvaluator {
    TargetEvaluator::new(move |ctx| {
        if ctx.target.is_defeated() {
            return Vec::new();
        }
        let outcome = combat::physical_damage(ctx.source, ctx.target, &ctx.metadata.cost, &spec);
        damage_events(ctx, DamageKind::Physical, outcome)
    })
}

/// Magical damage evaluator.
pub fn magical_damage(spec: DamageSpec) -> TargetEvaluator {
    TargetEvaluator::new(move |ctx| {
        if ctx.target.is_defeated() {
            return Vec::new();
        }
        let outcome = combat::magical_damage(ctx.source, ctx.target, &ctx.metadata.cost, &spec);
        damage_events(ctx, DamageKind::Magical, outcome)
    })
}

fn damage_events(
    ctx: &ResolutionContext<'_>,
    kind: DamageKind,
    outcome: DamageOutcome,
) -> Vec<CombatEvent> {
    let total = outcome.total();
    let lethal = total >= ctx.target.resource(ResourceKind::Hp);
    let mut events = vec![CombatEvent::Damage {
        source: ctx.source.id(),
        target: ctx.target.id(),
        kind,
        hits: outcome.hits,
    }];

    if outcome.tp_gained > 0 && !ctx.is_self_target() {
        events.push(CombatEvent::TpGained {
            actor: ctx.source.id(),
            amount: outcome.tp_gained,
        });
    }
    if lethal {
        events.push(CombatEvent::Defeated {
            target: ctx.target.id(),
        });
    }
    events
}

/// Heals `base + stat * ratio`, limited to the target's missing HP.
pub fn heal(base: u32, stat: StatKind, ratio: f32) -> TargetEvaluator {
    TargetEvaluator::new(move |ctx| {
        if ctx.target.is_defeated() {
            return Vec::new();
        }
        let bonus = (ctx.source.stat(stat).max(0) as f32 * ratio).max(0.0).floor() as u32;
        let missing = ctx
            .target
            .resource_max(ResourceKind::Hp)
            .saturating_sub(ctx.target.resource(ResourceKind::Hp));
        let amount = base.saturating_add(bonus).min(missing);
        if amount == 0 {
            return Vec::new();
        }
        vec![CombatEvent::Heal {
            source: ctx.source.id(),
            target: ctx.target.id(),
            amount,
        }]
    })
}

/// Wraps a damage evaluator, restoring `percent` of the damage dealt to the
/// source as HP.
pub fn absorb_damage(inner: TargetEvaluator, percent: u32) -> TargetEvaluator {
    TargetEvaluator::new(move |ctx| {
        let mut events = inner.evaluate(ctx);
        let dealt: u64 = events
            .iter()
            .filter(|event| event.target() == ctx.target.id())
            .map(|event| u64::from(event.damage_total()))
            .sum();
        let restored = (dealt * u64::from(percent) / 100).min(u64::from(u32::MAX)) as u32;
        if restored > 0 {
            events.push(CombatEvent::ResourceRestored {
                target: ctx.source.id(),
                resource: ResourceKind::Hp,
                amount: restored,
            });
        }
        events
    })
}

/// Grants (or refreshes) the status declared by `descriptor`.
///
/// Rolls the trigger chance first. If the target already carries the kind,
/// the existing instance is refreshed and the decorator is not invoked.
pub fn grant_status(
    descriptor: &EffectDescriptor,
    ctx: &ResolutionContext<'_>,
) -> Option<CombatEvent> {
    if !ctx.roll(RollTag::status(descriptor.kind), descriptor.chance) {
        return None;
    }
    if ctx.target.status_effects().has(descriptor.kind) {
        return Some(CombatEvent::StatusRefreshed {
            target: ctx.target.id(),
            kind: descriptor.kind,
            duration: descriptor.duration,
        });
    }
    Some(CombatEvent::StatusGranted {
        target: ctx.target.id(),
        instance: descriptor.instantiate(ctx),
    })
}

/// Expands an effect bundle into events.
pub fn apply_bundle(bundle: EffectBundle) -> TargetEvaluator {
    TargetEvaluator::new(move |ctx| bundle_events(&bundle, ctx))
}

fn bundle_events(bundle: &EffectBundle, ctx: &ResolutionContext<'_>) -> Vec<CombatEvent> {
    let (source, target) = (ctx.source, ctx.target);
    if target.is_defeated() || bundle.is_empty() {
        return Vec::new();
    }
    if bundle.is_gaze() && !is_facing(target, source, GAZE_HALF_ANGLE) {
        return Vec::new();
    }
    if !bundle.flags.contains(EffectFlags::BYPASS_SHADOWS)
        && !ctx.is_self_target()
        && let Some(event) = consume_shadow(ctx)
    {
        return vec![event];
    }

    let mut events: Vec<_> = bundle
        .statuses
        .iter()
        .filter_map(|descriptor| grant_status(descriptor, ctx))
        .collect();

    if let Some(distance) = bundle.knockback {
        events.push(CombatEvent::Knockback {
            target: target.id(),
            origin: source.position(),
            distance,
        });
    }

    if let Some(absorption) = bundle.absorption {
        let drained = absorption.drained_from(target.resource(absorption.resource));
        if drained > 0 {
            events.push(CombatEvent::ResourceDrained {
                source: source.id(),
                target: target.id(),
                resource: absorption.resource,
                amount: drained,
            });
            events.push(CombatEvent::ResourceRestored {
                target: source.id(),
                resource: absorption.resource,
                amount: drained,
            });
        }
    }

    events.extend(
        target
            .status_effects()
            .dispellable_newest_first()
            .into_iter()
            .take(usize::from(bundle.dispel))
            .map(|instance| CombatEvent::StatusExpired {
                target: target.id(),
                kind: instance.kind,
            }),
    );
    events
}

/// A shadow image absorbs the whole bundle, losing one shadow.
fn consume_shadow(ctx: &ResolutionContext<'_>) -> Option<CombatEvent> {
    let blink = ctx.target.status_effects().get(StatusEffectKind::Blink)?;
    if blink.counter == 0 {
        return None;
    }
    if blink.counter == 1 {
        return Some(CombatEvent::StatusExpired {
            target: ctx.target.id(),
            kind: StatusEffectKind::Blink,
        });
    }
    Some(CombatEvent::ShadowConsumed {
        target: ctx.target.id(),
    })
}

/// Defeats the context's target (its own user, when used as a self evaluator).
pub fn defeat_self() -> TargetEvaluator {
    TargetEvaluator::new(|ctx| {
        let hp = ctx.target.resource(ResourceKind::Hp);
        if hp == 0 {
            return Vec::new();
        }
        vec![
            CombatEvent::Damage {
                source: ctx.source.id(),
                target: ctx.target.id(),
                kind: DamageKind::True,
                hits: vec![hp],
            },
            CombatEvent::Defeated {
                target: ctx.target.id(),
            },
        ]
    })
}

/// Copies the source's debuffs onto the target, then clears them from the
/// source.
pub fn transfer_debuffs() -> PostEvaluation {
    PostEvaluation::new(|ctx, _prior| {
        if ctx.target.is_defeated() || ctx.is_self_target() {
            return Vec::new();
        }
        let debuffs = ctx.source.status_effects().debuffs_newest_first();
        let mut events = Vec::with_capacity(debuffs.len() * 2);
        for debuff in debuffs {
            events.push(CombatEvent::StatusGranted {
                target: ctx.target.id(),
                instance: debuff.with_source(ctx.source.id()),
            });
            events.push(CombatEvent::StatusExpired {
                target: ctx.source.id(),
                kind: debuff.kind,
            });
        }
        events
    })
}
