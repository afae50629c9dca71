//! Runtime configuration loader.

use std::path::{Path, PathBuf};

use combat_core::CombatConfig;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Engine tunables plus the logging setup of the hosting process.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    #[serde(flatten)]
    pub combat: CombatConfig,

    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: String,

    /// Optional log file. Logs go to stderr only when `None`.
    pub log_file: Option<PathBuf>,
}

impl RuntimeConfig {
    pub const DEFAULT_LOG_FILTER: &'static str = "info";
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            combat: CombatConfig::default(),
            log_filter: Self::DEFAULT_LOG_FILTER.to_string(),
            log_file: None,
        }
    }
}

/// Loader for runtime configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    pub fn load(path: &Path) -> LoadResult<RuntimeConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse config data from TOML text. Missing keys take their defaults.
    pub fn parse(content: &str) -> LoadResult<RuntimeConfig> {
        let config: RuntimeConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }
}
