//! Decision providers for non-player actors.

pub mod ai;

pub use ai::{Selection, SkillSelector};
