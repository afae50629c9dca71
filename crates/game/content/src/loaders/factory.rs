//! Content factory assembling registries and monster data.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use combat_core::{HeuristicRegistry, SkillRegistry};

use crate::catalog;
use crate::loaders::{ConfigLoader, LoadResult, MonsterCatalog, MonsterLoader, RuntimeConfig};

/// Everything a combat runtime needs, validated as a whole.
#[derive(Clone)]
pub struct Content {
    pub skills: Arc<SkillRegistry>,
    pub heuristics: Arc<HeuristicRegistry>,
    pub monsters: Arc<MonsterCatalog>,
}

/// Where monster data comes from.
#[derive(Clone, Debug)]
enum Source {
    Embedded,
    Directory(PathBuf),
}

/// Content factory that loads combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── monsters/
///     ├── families.ron
///     ├── hp_curve.ron
///     └── looks.ron
/// ```
///
/// Skills and heuristics always come from [`crate::catalog`].
#[derive(Clone, Debug)]
pub struct ContentFactory {
    source: Source,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            source: Source::Directory(data_dir.into()),
        }
    }

    /// Factory over the data compiled into this crate.
    pub fn embedded() -> Self {
        Self {
            source: Source::Embedded,
        }
    }

    /// Load runtime configuration from `config.toml`.
    ///
    /// The embedded factory has no config file and returns the defaults.
    pub fn load_config(&self) -> LoadResult<RuntimeConfig> {
        match &self.source {
            Source::Embedded => Ok(RuntimeConfig::default()),
            Source::Directory(dir) => ConfigLoader::load(&dir.join("config.toml")),
        }
    }

    /// Load monster families from `monsters/`.
    pub fn load_monsters(&self) -> LoadResult<MonsterCatalog> {
        match &self.source {
            Source::Embedded => MonsterLoader::embedded(),
            Source::Directory(dir) => MonsterLoader::load(&dir.join("monsters")),
        }
    }

    /// Builds the registries and checks monster kits against them.
    pub fn build(&self) -> LoadResult<Content> {
        let skills = catalog::skill_registry().context("skill registry failed validation")?;
        let heuristics = catalog::heuristic_registry();
        let monsters = self.load_monsters()?;
        monsters.validate_kits(&skills)?;

        Ok(Content {
            skills: Arc::new(skills),
            heuristics: Arc::new(heuristics),
            monsters: Arc::new(monsters),
        })
    }

    /// Returns the data directory path, if any.
    pub fn data_dir(&self) -> Option<&Path> {
        match &self.source {
            Source::Embedded => None,
            Source::Directory(dir) => Some(dir),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Some(Path::new("/tmp/data")));
        assert_eq!(ContentFactory::embedded().data_dir(), None);
    }

    #[test]
    fn embedded_content_builds() {
        let content = ContentFactory::embedded().build().unwrap();
        assert!(!content.skills.is_empty());
        assert!(!content.heuristics.is_empty());
        assert!(content.monsters.family("wyvern").is_some());
    }

    #[test]
    fn shipped_data_directory_loads() {
        let factory = ContentFactory::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"));
        let config = factory.load_config().unwrap();
        assert_eq!(config.combat.eligibility_floor, 1);
        assert!(factory.build().is_ok());
    }

    #[test]
    fn kit_referencing_unknown_skill_fails() {
        let dir = tempfile::tempdir().unwrap();
        let monsters = dir.path().join("monsters");
        std::fs::create_dir(&monsters).unwrap();
        std::fs::write(
            monsters.join("families.ron"),
            r#"[(name: "ghost", skills: [(namespace: MobSkill, index: 999)])]"#,
        )
        .unwrap();
        std::fs::write(monsters.join("hp_curve.ron"), "{1: 10}").unwrap();
        std::fs::write(monsters.join("looks.ron"), "{}").unwrap();

        let err = ContentFactory::new(dir.path()).build().err().unwrap();
        assert!(format!("{err:#}").contains("ghost"));
    }
}
