//! Data-driven combat content and loaders.
//!
//! This crate houses the demonstration skill catalog and provides loaders
//! for RON/TOML data files:
//! - Abilities, spells and monster skills (registered in code, see [`catalog`])
//! - AI heuristics for those skills
//! - Monster family templates, HP curve and look table (data-driven via RON)
//! - Runtime configuration (data-driven via TOML)
//!
//! Content is built once at startup and shared read-only afterwards.

pub mod catalog;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::{heuristic_registry, register_heuristics, register_skills, skill_registry};

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, Content, ContentFactory, LoadResult, MonsterCatalog, MonsterLoader,
    RuntimeConfig,
};
