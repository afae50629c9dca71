//! Monster family loader.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use combat_core::{ActorState, EntityId, HpCurve, LookTable, MonsterFamily, SkillRegistry};

use crate::loaders::{LoadResult, read_file};

const FAMILIES_RON: &str = include_str!("../../data/monsters/families.ron");
const HP_CURVE_RON: &str = include_str!("../../data/monsters/hp_curve.ron");
const LOOKS_RON: &str = include_str!("../../data/monsters/looks.ron");

/// Families, the shared HP curve and the look table.
#[derive(Clone, Debug)]
pub struct MonsterCatalog {
    families: HashMap<String, MonsterFamily>,
    curve: HpCurve,
    looks: LookTable,
}

impl MonsterCatalog {
    /// Builds a catalog, validating every family against the look table.
    pub fn new(
        families: impl IntoIterator<Item = MonsterFamily>,
        curve: HpCurve,
        looks: LookTable,
    ) -> LoadResult<Self> {
        let mut by_name = HashMap::new();
        for family in families {
            family
                .validate(&curve, &looks)
                .with_context(|| format!("invalid monster family '{}'", family.name))?;
            if by_name.contains_key(&family.name) {
                anyhow::bail!("duplicate monster family '{}'", family.name);
            }
            by_name.insert(family.name.clone(), family);
        }

        Ok(Self {
            families: by_name,
            curve,
            looks,
        })
    }

    pub fn family(&self, name: &str) -> Option<&MonsterFamily> {
        self.families.get(name)
    }

    pub fn families(&self) -> impl Iterator<Item = &MonsterFamily> {
        self.families.values()
    }

    pub fn curve(&self) -> &HpCurve {
        &self.curve
    }

    pub fn looks(&self) -> &LookTable {
        &self.looks
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// Checks every family kit against a skill registry.
    pub fn validate_kits(&self, registry: &SkillRegistry) -> LoadResult<()> {
        for family in self.families.values() {
            family
                .validate_kit(registry)
                .with_context(|| format!("invalid skill kit for '{}'", family.name))?;
        }
        Ok(())
    }

    /// Instantiates a monster of `family` at `level` as a fresh actor.
    pub fn spawn(&self, family: &str, level: u8, id: EntityId) -> LoadResult<ActorState> {
        let template = self
            .family(family)
            .ok_or_else(|| anyhow::anyhow!("unknown monster family '{}'", family))?;
        let stats = template
            .instantiate(level, &self.curve)
            .with_context(|| format!("cannot instantiate '{}' at level {}", family, level))?;

        Ok(stats.to_actor(id))
    }
}

/// Loader for monster data from RON files.
pub struct MonsterLoader;

impl MonsterLoader {
    /// Load the monster data compiled into this crate.
    pub fn embedded() -> LoadResult<MonsterCatalog> {
        Self::parse(FAMILIES_RON, HP_CURVE_RON, LOOKS_RON)
    }

    /// Load `families.ron`, `hp_curve.ron` and `looks.ron` from `dir`.
    pub fn load(dir: &Path) -> LoadResult<MonsterCatalog> {
        let families = read_file(&dir.join("families.ron"))?;
        let curve = read_file(&dir.join("hp_curve.ron"))?;
        let looks = read_file(&dir.join("looks.ron"))?;
        Self::parse(&families, &curve, &looks)
    }

    fn parse(families: &str, curve: &str, looks: &str) -> LoadResult<MonsterCatalog> {
        let families: Vec<MonsterFamily> = ron::from_str(families)
            .map_err(|e| anyhow::anyhow!("Failed to parse families.ron: {}", e))?;
        let curve: HpCurve = ron::from_str(curve)
            .map_err(|e| anyhow::anyhow!("Failed to parse hp_curve.ron: {}", e))?;
        let looks: LookTable = ron::from_str(looks)
            .map_err(|e| anyhow::anyhow!("Failed to parse looks.ron: {}", e))?;

        MonsterCatalog::new(families, curve, looks)
    }
}
