//! Combat stats and resource pools.
//!
//! Stats are read by key ([`StatKind`]) so damage formulas and heuristics can
//! be parameterized with an attack/defend stat pair instead of hard-coding
//! fields.

mod resources;

pub use resources::{ResourceKind, ResourcePools};

use strum::EnumCount;

/// Individual combat stats readable by key.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumCount, strum::EnumIter, strum::Display,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatKind {
    Level,
    Str,
    Dex,
    Vit,
    Agi,
    Int,
    Mnd,
    Chr,
    Attack,
    Defense,
    MagicAttack,
    MagicDefense,
    Accuracy,
    Evasion,
    /// Base damage of the equipped weapon (or natural weapon for monsters).
    WeaponDamage,
}

impl StatKind {
    const fn index(self) -> usize {
        self as usize
    }
}

/// Flat table of stat values indexed by [`StatKind`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatStats {
    values: [i32; StatKind::COUNT],
}

impl CombatStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of a stat.
    pub fn get(&self, stat: StatKind) -> i32 {
        self.values[stat.index()]
    }

    /// Sets the value of a stat.
    pub fn set(&mut self, stat: StatKind, value: i32) {
        self.values[stat.index()] = value;
    }

    /// Builder: set a stat.
    pub fn with(mut self, stat: StatKind, value: i32) -> Self {
        self.set(stat, value);
        self
    }

    /// Iterates over every stat with its value.
    pub fn iter(&self) -> impl Iterator<Item = (StatKind, i32)> + '_ {
        use strum::IntoEnumIterator;
        StatKind::iter().map(|stat| (stat, self.get(stat)))
    }
}

/// Attack/defend stat pair used by damage formulas.
///
/// The attacker's `attack` stat is compared against the defender's `defend`
/// stat (e.g. STR vs VIT for most weapon skills, INT vs INT for nukes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatPair {
    pub attack: StatKind,
    pub defend: StatKind,
}

impl StatPair {
    pub const fn new(attack: StatKind, defend: StatKind) -> Self {
        Self { attack, defend }
    }

    pub const STR_VIT: Self = Self::new(StatKind::Str, StatKind::Vit);
    pub const DEX_AGI: Self = Self::new(StatKind::Dex, StatKind::Agi);
    pub const INT_INT: Self = Self::new(StatKind::Int, StatKind::Int);
    pub const MND_MND: Self = Self::new(StatKind::Mnd, StatKind::Mnd);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_read_by_key() {
        let stats = CombatStats::new()
            .with(StatKind::Str, 30)
            .with(StatKind::Vit, 12);

        assert_eq!(stats.get(StatKind::Str), 30);
        assert_eq!(stats.get(StatKind::Vit), 12);
        assert_eq!(stats.get(StatKind::Int), 0);
        assert_eq!(stats.iter().count(), StatKind::COUNT);
    }
}
