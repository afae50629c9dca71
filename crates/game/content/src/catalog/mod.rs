//! Demonstration skill catalog.
//!
//! A small set of abilities, spells and monster skills exercising every
//! composition helper the engine offers: multi-hit TP scaling, spread
//! potency, snapshot damage-over-time, dispel, gaze, knockback, absorption,
//! self-defeat, debuff transfer, backfire and validity gates.

mod abilities;
pub mod ids;
mod heuristics;
mod mob_skills;
mod spells;

use combat_core::heuristic::HeuristicRegistryBuilder;
use combat_core::{ConfigError, HeuristicRegistry, SkillRegistry, SkillRegistryBuilder};

/// Registers every catalog skill.
pub fn register_skills(builder: &mut SkillRegistryBuilder) {
    abilities::register(builder);
    spells::register(builder);
    mob_skills::register(builder);
}

/// Registers every catalog heuristic.
pub fn register_heuristics(builder: &mut HeuristicRegistryBuilder) {
    heuristics::register(builder);
}

/// Builds and validates the catalog skill registry.
pub fn skill_registry() -> Result<SkillRegistry, ConfigError> {
    let mut builder = SkillRegistry::builder();
    register_skills(&mut builder);
    builder.build()
}

/// Builds the catalog heuristic registry.
pub fn heuristic_registry() -> HeuristicRegistry {
    let mut builder = HeuristicRegistry::builder();
    register_heuristics(&mut builder);
    builder.build()
}
