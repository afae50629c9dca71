//! Actor state as seen by the engine.
//!
//! This module owns the accessor traits the engine reads through, the
//! reference [`ActorState`], and the per-actor status effect store. Runtime
//! layers mutate state exclusively by applying [`crate::CombatEvent`]s.
mod actor;
mod common;
mod status;

pub use actor::{ActorMut, ActorState, ActorView, is_facing, targeting_distance};
pub use common::{EntityId, Position, angle_between};
pub use status::{StatusEffectKind, StatusEffects, StatusInstance};
