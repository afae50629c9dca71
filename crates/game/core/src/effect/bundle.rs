use bitflags::bitflags;

use crate::effect::EffectDescriptor;
use crate::stats::ResourceKind;

bitflags! {
    /// Behavior flags of an [`EffectBundle`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct EffectFlags: u8 {
        /// Lands only if the target is looking at the source.
        const GAZE            = 1 << 0;
        /// Ignores shadow images (Blink) and blocks.
        const BYPASS_SHADOWS  = 1 << 1;
    }
}

/// How much an absorption drains.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AbsorbAmount {
    Fixed(u32),
    /// Percentage of the target's current pool.
    TargetPercent(u8),
}

/// Drains a pool from the target and restores it to the source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Absorption {
    pub resource: ResourceKind,
    pub amount: AbsorbAmount,
}

impl Absorption {
    pub const fn fixed(resource: ResourceKind, amount: u32) -> Self {
        Self {
            resource,
            amount: AbsorbAmount::Fixed(amount),
        }
    }

    pub const fn percent(resource: ResourceKind, percent: u8) -> Self {
        Self {
            resource,
            amount: AbsorbAmount::TargetPercent(percent),
        }
    }

    /// Amount drained from a pool currently holding `available`.
    pub fn drained_from(&self, available: u32) -> u32 {
        match self.amount {
            AbsorbAmount::Fixed(amount) => amount.min(available),
            AbsorbAmount::TargetPercent(percent) => {
                (available as u64 * u64::from(percent.min(100)) / 100) as u32
            }
        }
    }
}

/// Aggregate of status attachments plus non-status side effects.
#[derive(Clone, Debug, Default)]
pub struct EffectBundle {
    pub statuses: Vec<EffectDescriptor>,
    /// Knockback magnitude in world units.
    pub knockback: Option<f32>,
    pub absorption: Option<Absorption>,
    /// Number of the target's newest dispellable effects to remove.
    pub dispel: u8,
    pub flags: EffectFlags,
}

impl EffectBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add a status attachment.
    pub fn status(mut self, descriptor: EffectDescriptor) -> Self {
        self.statuses.push(descriptor);
        self
    }

    /// Builder: set knockback.
    pub fn knockback(mut self, distance: f32) -> Self {
        self.knockback = Some(distance);
        self
    }

    /// Builder: set absorption.
    pub fn absorb(mut self, absorption: Absorption) -> Self {
        self.absorption = Some(absorption);
        self
    }

    /// Builder: set dispel count.
    pub fn dispel(mut self, count: u8) -> Self {
        self.dispel = count;
        self
    }

    /// Builder: add flags.
    pub fn flags(mut self, flags: EffectFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn is_gaze(&self) -> bool {
        self.flags.contains(EffectFlags::GAZE)
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
            && self.knockback.is_none()
            && self.absorption.is_none()
            && self.dispel == 0
    }
}

/// Bundle with one status and optional knockback.
pub fn single_status(descriptor: EffectDescriptor, knockback: Option<f32>) -> EffectBundle {
    EffectBundle {
        statuses: vec![descriptor],
        knockback,
        ..EffectBundle::default()
    }
}

/// Bundle granting several statuses in declaration order.
pub fn stacked_statuses(descriptors: impl IntoIterator<Item = EffectDescriptor>) -> EffectBundle {
    EffectBundle {
        statuses: descriptors.into_iter().collect(),
        ..EffectBundle::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::StatusEffectKind;

    #[test]
    fn percent_absorption_floors() {
        let drain = Absorption::percent(ResourceKind::Mp, 10);
        assert_eq!(drain.drained_from(95), 9);
        assert_eq!(Absorption::fixed(ResourceKind::Hp, 50).drained_from(20), 20);
    }

    #[test]
    fn stacked_keeps_declaration_order() {
        let bundle = stacked_statuses([
            EffectDescriptor::new(StatusEffectKind::Slow, 60),
            EffectDescriptor::new(StatusEffectKind::Blind, 60),
        ]);
        let kinds: Vec<_> = bundle.statuses.iter().map(|d| d.kind).collect();
        assert_eq!(kinds, vec![StatusEffectKind::Slow, StatusEffectKind::Blind]);
        assert!(!bundle.is_empty());
    }
}
