//! Heuristic-driven AI for monsters.
//!
//! - [`SkillSelector`]: scores the actor's kit with the heuristic registry
//!   and picks the best skill above the eligibility floor

pub mod selector;

pub use selector::{Selection, SkillSelector};
