//! Content loaders for reading combat data from files.
//!
//! Monster templates are RON, runtime configuration is TOML. The monster
//! data shipped with this crate is also embedded at compile time so tests
//! and tools can run without a data directory.

pub mod config;
pub mod factory;
pub mod monsters;

pub use config::{ConfigLoader, RuntimeConfig};
pub use factory::{Content, ContentFactory};
pub use monsters::{MonsterCatalog, MonsterLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
