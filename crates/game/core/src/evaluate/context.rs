//! Resolution context passed to every evaluator and heuristic.

use crate::env::{RngOracle, compute_seed};
use crate::skill::{SkillId, SkillMetadata};
use crate::state::{ActorView, EntityId, StatusEffectKind};

/// Identifies an independent probability check within one action.
///
/// Two checks in the same action with different tags roll independently;
/// the same tag always rolls the same value for the same action and target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RollTag(pub u32);

impl RollTag {
    /// Switch-skill backfire check.
    pub const SWITCH: Self = Self(0x0100);

    /// Trigger chance of a status attachment.
    pub const fn status(kind: StatusEffectKind) -> Self {
        Self(0x1000 + kind as u32)
    }

    /// Content-defined checks.
    pub const fn custom(index: u16) -> Self {
        Self(0x8000 + index as u32)
    }
}

/// Outer action metadata supplied by the combat loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionContext {
    /// Target the actor selected; other targets come from an area fan-out.
    pub primary_target: EntityId,
    /// Position of the current target within the fan-out (0 = primary).
    pub target_index: u16,
    pub target_count: u16,
    /// Monotonic action counter, mixed into every roll.
    pub nonce: u64,
}

impl ActionContext {
    pub fn single(primary_target: EntityId, nonce: u64) -> Self {
        Self {
            primary_target,
            target_index: 0,
            target_count: 1,
            nonce,
        }
    }

    /// Returns true for the primary target of the action.
    pub fn is_primary(&self) -> bool {
        self.target_index == 0
    }
}

/// Transient per-invocation value. Lives for one action.
#[derive(Clone, Copy)]
pub struct ResolutionContext<'a> {
    pub source: &'a dyn ActorView,
    pub target: &'a dyn ActorView,
    pub skill: SkillId,
    pub metadata: &'a SkillMetadata,
    pub action: ActionContext,
    rng: &'a dyn RngOracle,
    seed: u64,
}

impl<'a> ResolutionContext<'a> {
    pub fn new(
        source: &'a dyn ActorView,
        target: &'a dyn ActorView,
        skill: SkillId,
        metadata: &'a SkillMetadata,
        rng: &'a dyn RngOracle,
        seed: u64,
    ) -> Self {
        Self {
            source,
            target,
            skill,
            metadata,
            action: ActionContext::single(target.id(), 0),
            rng,
            seed,
        }
    }

    /// Builder: set outer action metadata.
    pub fn with_action(mut self, action: ActionContext) -> Self {
        self.action = action;
        self
    }

    /// Same context aimed at another actor.
    pub fn with_target(&self, target: &'a dyn ActorView) -> Self {
        Self { target, ..*self }
    }

    /// Same context resolving another skill.
    pub fn with_skill(&self, skill: SkillId, metadata: &'a SkillMetadata) -> Self {
        Self {
            skill,
            metadata,
            ..*self
        }
    }

    /// Returns true if the skill targets its own user.
    pub fn is_self_target(&self) -> bool {
        self.source.id() == self.target.id()
    }

    /// Explicit probability check against the injected oracle.
    pub fn roll(&self, tag: RollTag, chance_percent: u32) -> bool {
        let context = tag.0 ^ self.target.id().0.rotate_left(16);
        let seed = compute_seed(self.seed, self.action.nonce, self.source.id().0, context);
        self.rng.check(seed, chance_percent)
    }
}
