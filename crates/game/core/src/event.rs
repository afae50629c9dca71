//! Combat events - the engine's only output.
//!
//! Evaluators never mutate actors. They return an ordered list of
//! [`CombatEvent`]s which the caller applies (see [`apply_event`]) and
//! broadcasts.

use crate::state::{ActorMut, EntityId, Position, StatusEffectKind, StatusInstance};
use crate::stats::ResourceKind;

/// Damage classification, for mitigation and presentation layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageKind {
    Physical,
    Magical,
    /// Ignores every mitigation.
    True,
}

/// A single outbound effect of a skill resolution.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatEvent {
    /// Damage dealt to `target`, one entry per hit.
    Damage {
        source: EntityId,
        target: EntityId,
        kind: DamageKind,
        hits: Vec<u32>,
    },

    Heal {
        source: EntityId,
        target: EntityId,
        amount: u32,
    },

    /// Skill cost paid by the acting actor.
    ResourceSpent {
        actor: EntityId,
        resource: ResourceKind,
        amount: u32,
    },

    /// Absorption: a pool drained from `target` by `source`.
    ResourceDrained {
        source: EntityId,
        target: EntityId,
        resource: ResourceKind,
        amount: u32,
    },

    /// Absorption: the drained amount restored to `target`.
    ResourceRestored {
        target: EntityId,
        resource: ResourceKind,
        amount: u32,
    },

    TpGained { actor: EntityId, amount: u32 },

    /// A freshly decorated status instance.
    StatusGranted {
        target: EntityId,
        instance: StatusInstance,
    },

    /// An existing status extended without re-decoration.
    StatusRefreshed {
        target: EntityId,
        kind: StatusEffectKind,
        duration: u32,
    },

    StatusExpired {
        target: EntityId,
        kind: StatusEffectKind,
    },

    /// A shadow image absorbed an effect; the last one expires Blink instead.
    ShadowConsumed { target: EntityId },

    /// Pushes `target` away from `origin`.
    Knockback {
        target: EntityId,
        origin: Position,
        distance: f32,
    },

    Defeated { target: EntityId },
}

impl CombatEvent {
    /// The actor whose state this event changes.
    pub fn target(&self) -> EntityId {
        match self {
            Self::Damage { target, .. }
            | Self::Heal { target, .. }
            | Self::ResourceDrained { target, .. }
            | Self::ResourceRestored { target, .. }
            | Self::StatusGranted { target, .. }
            | Self::StatusRefreshed { target, .. }
            | Self::StatusExpired { target, .. }
            | Self::ShadowConsumed { target }
            | Self::Knockback { target, .. }
            | Self::Defeated { target } => *target,
            Self::ResourceSpent { actor, .. } | Self::TpGained { actor, .. } => *actor,
        }
    }

    /// True for a `Defeated` event aimed at `target`.
    pub fn defeats(&self, target: EntityId) -> bool {
        matches!(self, Self::Defeated { target: defeated } if *defeated == target)
    }

    /// Total damage of a `Damage` event, zero for every other variant.
    pub fn damage_total(&self) -> u32 {
        match self {
            Self::Damage { hits, .. } => hits
                .iter()
                .fold(0u32, |acc, hit| acc.saturating_add(*hit)),
            _ => 0,
        }
    }
}

/// Applies `event` to `actor`.
///
/// Returns false (and changes nothing) if the event targets another actor,
/// or if it would grant, refresh or move a defeated one.
pub fn apply_event(event: &CombatEvent, actor: &mut dyn ActorMut) -> bool {
    if event.target() != actor.id() {
        return false;
    }
    if actor.is_defeated()
        && matches!(
            event,
            CombatEvent::StatusGranted { .. }
                | CombatEvent::StatusRefreshed { .. }
                | CombatEvent::ShadowConsumed { .. }
                | CombatEvent::Knockback { .. }
        )
    {
        return false;
    }

    match event {
        CombatEvent::Damage { .. } => {
            let hp = actor.resource(ResourceKind::Hp);
            actor.set_resource(ResourceKind::Hp, hp.saturating_sub(event.damage_total()));
        }
        CombatEvent::Heal { amount, .. } => {
            if !actor.is_defeated() {
                let hp = actor.resource(ResourceKind::Hp);
                actor.set_resource(ResourceKind::Hp, hp.saturating_add(*amount));
            }
        }
        CombatEvent::ResourceSpent {
            resource, amount, ..
        }
        | CombatEvent::ResourceDrained {
            resource, amount, ..
        } => {
            let current = actor.resource(*resource);
            actor.set_resource(*resource, current.saturating_sub(*amount));
        }
        CombatEvent::ResourceRestored {
            resource, amount, ..
        } => {
            let current = actor.resource(*resource);
            actor.set_resource(*resource, current.saturating_add(*amount));
        }
        CombatEvent::TpGained { amount, .. } => {
            let tp = actor.resource(ResourceKind::Tp);
            actor.set_resource(ResourceKind::Tp, tp.saturating_add(*amount));
        }
        CombatEvent::StatusGranted { instance, .. } => {
            actor.status_effects_mut().insert(*instance);
        }
        CombatEvent::StatusRefreshed { kind, duration, .. } => {
            actor.status_effects_mut().refresh(*kind, *duration);
        }
        CombatEvent::StatusExpired { kind, .. } => {
            actor.status_effects_mut().remove(*kind);
        }
        CombatEvent::ShadowConsumed { .. } => {
            if let Some(blink) = actor.status_effects_mut().get_mut(StatusEffectKind::Blink) {
                blink.counter = blink.counter.saturating_sub(1);
            }
        }
        CombatEvent::Knockback {
            origin, distance, ..
        } => {
            let position = actor.position();
            let heading = origin.heading_to(position);
            actor.set_position(position.offset(heading, *distance));
        }
        CombatEvent::Defeated { .. } => {
            actor.set_resource(ResourceKind::Hp, 0);
            actor.status_effects_mut().clear();
        }
    }
    true
}
