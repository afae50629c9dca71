//! Combat runtime: the consuming loop around the skill resolution engine.
//!
//! - [`CombatRuntime`]: owns the registries and a [`Roster`], resolves and
//!   applies actions, runs AI decision ticks
//! - [`logging::init`]: tracing subscriber setup from [`RuntimeConfig`]
//! - [`providers::ai`]: heuristic skill selection
//!
//! [`RuntimeConfig`]: combat_content::RuntimeConfig

pub mod combat;
pub mod error;
pub mod logging;
pub mod providers;
pub mod roster;

pub use combat::{ActionReport, CombatRuntime};
pub use error::{Result, RuntimeError};
pub use logging::LogGuard;
pub use providers::{Selection, SkillSelector};
pub use roster::{Combatant, Roster};
