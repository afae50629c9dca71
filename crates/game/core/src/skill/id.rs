use std::fmt;

/// The catalog a skill id belongs to.
///
/// Namespaces are disjoint: `ability:5` and `spell:5` are different skills.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillNamespace {
    /// Player job abilities and weapon skills.
    Ability,
    /// Spells.
    Spell,
    /// Monster skills.
    MobSkill,
}

impl SkillNamespace {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ability => "ability",
            Self::Spell => "spell",
            Self::MobSkill => "mob",
        }
    }
}

/// Opaque unique key of a skill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillId {
    pub namespace: SkillNamespace,
    pub index: u16,
}

impl SkillId {
    pub const fn new(namespace: SkillNamespace, index: u16) -> Self {
        Self { namespace, index }
    }

    pub const fn ability(index: u16) -> Self {
        Self::new(SkillNamespace::Ability, index)
    }

    pub const fn spell(index: u16) -> Self {
        Self::new(SkillNamespace::Spell, index)
    }

    pub const fn mob_skill(index: u16) -> Self {
        Self::new(SkillNamespace::MobSkill, index)
    }
}

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace.as_str(), self.index)
    }
}
