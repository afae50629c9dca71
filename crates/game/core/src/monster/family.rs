use bitflags::bitflags;

use crate::error::ConfigError;
use crate::monster::{HpCurve, LookRef, LookTable};
use crate::skill::{SkillId, SkillRegistry};
use crate::state::{ActorState, EntityId};
use crate::stats::{CombatStats, StatKind};

bitflags! {
    /// How a monster notices players. Empty means passive.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct AggroRule: u8 {
        const SIGHT      = 1 << 0;
        const SOUND      = 1 << 1;
        const MAGIC      = 1 << 2;
        const LOW_HP     = 1 << 3;
        const TRUE_SIGHT = 1 << 4;
        /// Joins fights started by nearby members of the same family.
        const LINKS      = 1 << 5;
    }
}

/// Per-family stat scaling, in percent of the level baseline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatScaling {
    pub hp: i32,
    pub mp: i32,
    pub str: i32,
    pub dex: i32,
    pub vit: i32,
    pub agi: i32,
    pub int: i32,
    pub mnd: i32,
    pub chr: i32,
    pub attack: i32,
    pub defense: i32,
    pub magic_attack: i32,
    pub magic_defense: i32,
}

impl StatScaling {
    pub const BASELINE: Self = Self {
        hp: 100,
        mp: 100,
        str: 100,
        dex: 100,
        vit: 100,
        agi: 100,
        int: 100,
        mnd: 100,
        chr: 100,
        attack: 100,
        defense: 100,
        magic_attack: 100,
        magic_defense: 100,
    };

    fn values(&self) -> [i32; 13] {
        [
            self.hp,
            self.mp,
            self.str,
            self.dex,
            self.vit,
            self.agi,
            self.int,
            self.mnd,
            self.chr,
            self.attack,
            self.defense,
            self.magic_attack,
            self.magic_defense,
        ]
    }
}

impl Default for StatScaling {
    fn default() -> Self {
        Self::BASELINE
    }
}

/// Base stats of one concrete monster.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterStats {
    pub level: u8,
    pub hp: u32,
    pub mp: u32,
    pub stats: CombatStats,
}

impl MonsterStats {
    /// Fresh actor with full pools.
    pub fn to_actor(&self, id: EntityId) -> ActorState {
        ActorState::new(id, self.stats.clone(), self.hp, self.mp)
    }
}

/// Template shared by every monster of a family.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterFamily {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub scaling: StatScaling,
    /// Default skill kit.
    #[cfg_attr(feature = "serde", serde(default))]
    pub skills: Vec<SkillId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub aggro: AggroRule,
    /// Behavior script hook.
    #[cfg_attr(feature = "serde", serde(default))]
    pub behavior: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub look: Option<LookRef>,
}

impl MonsterFamily {
    /// Attribute baseline at level 0.
    pub const STAT_BASE: i32 = 6;
    /// Attribute growth per level.
    pub const STAT_PER_LEVEL: i32 = 1;
    /// Combat rating (attack, defense, ...) baseline at level 0.
    pub const RATING_BASE: i32 = 8;
    pub const RATING_PER_LEVEL: i32 = 3;
    pub const MP_PER_LEVEL: i32 = 4;

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scaling: StatScaling::BASELINE,
            skills: Vec::new(),
            aggro: AggroRule::empty(),
            behavior: None,
            look: None,
        }
    }

    /// Checks scaling against the HP curve and look against the look table.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NegativeScaling`], [`ConfigError::FlatScaledHp`] when
    /// the scaled curve stops strictly increasing, or
    /// [`ConfigError::MissingLook`].
    pub fn validate(&self, curve: &HpCurve, looks: &LookTable) -> Result<(), ConfigError> {
        if self.scaling.values().iter().any(|percent| *percent < 0) {
            return Err(ConfigError::NegativeScaling {
                family: self.name.clone(),
            });
        }
        let mut previous = None;
        for level in curve.levels() {
            let hp = self.scaled_hp(curve.hp(level)?);
            if hp == 0 || previous.is_some_and(|previous| hp <= previous) {
                return Err(ConfigError::FlatScaledHp {
                    family: self.name.clone(),
                    level,
                });
            }
            previous = Some(hp);
        }
        if let Some(look) = &self.look
            && !looks.contains(look)
        {
            return Err(ConfigError::MissingLook {
                family: self.name.clone(),
                look: look.model.clone(),
                variant: look.variant,
            });
        }
        Ok(())
    }

    fn scaled_hp(&self, base: u32) -> u32 {
        let scaled = u64::from(base) * u64::from(self.scaling.hp.max(0).unsigned_abs()) / 100;
        scaled.min(u64::from(u32::MAX)) as u32
    }

    /// Checks every kit skill is registered.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnknownKitSkill`] for the first unregistered skill.
    pub fn validate_kit(&self, registry: &SkillRegistry) -> Result<(), ConfigError> {
        match self.skills.iter().find(|skill| !registry.contains(**skill)) {
            Some(skill) => Err(ConfigError::UnknownKitSkill {
                family: self.name.clone(),
                skill: *skill,
            }),
            None => Ok(()),
        }
    }

    /// Concrete base stats at `level`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingHpEntry`] if the curve has no entry for
    /// `level`, [`ConfigError::NegativeScaling`] for negative percentages.
    pub fn instantiate(&self, level: u8, curve: &HpCurve) -> Result<MonsterStats, ConfigError> {
        if self.scaling.values().iter().any(|percent| *percent < 0) {
            return Err(ConfigError::NegativeScaling {
                family: self.name.clone(),
            });
        }

        let level_i = i32::from(level);
        let attribute = Self::STAT_BASE + level_i * Self::STAT_PER_LEVEL;
        let rating = Self::RATING_BASE + level_i * Self::RATING_PER_LEVEL;
        let scale = |base: i32, percent: i32| base * percent / 100;

        let s = &self.scaling;
        let stats = CombatStats::new()
            .with(StatKind::Level, level_i)
            .with(StatKind::Str, scale(attribute, s.str))
            .with(StatKind::Dex, scale(attribute, s.dex))
            .with(StatKind::Vit, scale(attribute, s.vit))
            .with(StatKind::Agi, scale(attribute, s.agi))
            .with(StatKind::Int, scale(attribute, s.int))
            .with(StatKind::Mnd, scale(attribute, s.mnd))
            .with(StatKind::Chr, scale(attribute, s.chr))
            .with(StatKind::Attack, scale(rating, s.attack))
            .with(StatKind::Defense, scale(rating, s.defense))
            .with(StatKind::MagicAttack, scale(level_i, s.magic_attack))
            .with(StatKind::MagicDefense, scale(level_i, s.magic_defense))
            .with(StatKind::Accuracy, rating)
            .with(StatKind::Evasion, rating)
            .with(StatKind::WeaponDamage, level_i + 2);

        let hp = self.scaled_hp(curve.hp(level)?);
        let mp = scale(level_i * Self::MP_PER_LEVEL, s.mp) as u32;

        Ok(MonsterStats {
            level,
            hp,
            mp,
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate::TargetEvaluator;
    use crate::skill::{SkillBehavior, SkillMetadata};

    fn curve() -> HpCurve {
        HpCurve::new((1..=30).map(|level| (level, 40 + u32::from(level) * 25))).unwrap()
    }

    fn bomb() -> MonsterFamily {
        MonsterFamily {
            scaling: StatScaling {
                hp: 90,
                vit: 80,
                int: 130,
                ..StatScaling::BASELINE
            },
            look: Some(LookRef::new("bomb", 0)),
            ..MonsterFamily::new("bomb")
        }
    }

    #[test]
    fn hp_strictly_increases_and_stats_non_negative() {
        let family = bomb();
        let curve = curve();
        let mut previous = 0;
        for level in curve.levels() {
            let stats = family.instantiate(level, &curve).unwrap();
            assert!(stats.hp > previous, "hp must grow at level {level}");
            previous = stats.hp;
            assert!(stats.stats.iter().all(|(_, value)| value >= 0));
        }
    }

    #[test]
    fn scaling_applies_percentages() {
        let stats = bomb().instantiate(10, &curve()).unwrap();

        assert_eq!(stats.hp, 261);
        assert_eq!(stats.stats.get(StatKind::Str), 16);
        assert_eq!(stats.stats.get(StatKind::Int), 20);
        assert_eq!(stats.stats.get(StatKind::Vit), 12);
    }

    #[test]
    fn missing_level_fails() {
        assert_eq!(
            bomb().instantiate(31, &curve()),
            Err(ConfigError::MissingHpEntry(31))
        );
    }

    #[test]
    fn validate_checks_looks_and_scaling() {
        let looks = LookTable::new([("bomb".to_string(), 1)]);
        let curve = curve();
        assert!(bomb().validate(&curve, &looks).is_ok());

        let mut odd = bomb();
        odd.look = Some(LookRef::new("bomb", 3));
        assert!(matches!(
            odd.validate(&curve, &looks),
            Err(ConfigError::MissingLook { variant: 3, .. })
        ));

        let mut negative = bomb();
        negative.scaling.agi = -5;
        assert!(matches!(
            negative.validate(&curve, &looks),
            Err(ConfigError::NegativeScaling { .. })
        ));
    }

    #[test]
    fn scaled_hp_must_keep_increasing() {
        let looks = LookTable::new([("bomb".to_string(), 1)]);
        let shallow = HpCurve::new([(1, 65), (2, 66)]).unwrap();

        let mut hollow = bomb();
        hollow.scaling.hp = 0;
        assert_eq!(
            hollow.validate(&shallow, &looks),
            Err(ConfigError::FlatScaledHp {
                family: "bomb".to_string(),
                level: 1
            })
        );

        let mut halved = bomb();
        halved.scaling.hp = 50;
        assert!(halved.validate(&shallow, &looks).is_ok());

        let mut tiny = bomb();
        tiny.scaling.hp = 2;
        assert_eq!(
            tiny.validate(&shallow, &looks),
            Err(ConfigError::FlatScaledHp {
                family: "bomb".to_string(),
                level: 2
            })
        );
    }

    #[test]
    fn kit_must_be_registered() {
        let mut builder = SkillRegistry::builder();
        builder.register(
            SkillId::mob_skill(1),
            SkillMetadata::NEUTRAL,
            SkillBehavior::new(TargetEvaluator::noop()),
        );
        let registry = builder.build().unwrap();

        let mut family = bomb();
        family.skills = vec![SkillId::mob_skill(1), SkillId::mob_skill(2)];
        assert_eq!(
            family.validate_kit(&registry),
            Err(ConfigError::UnknownKitSkill {
                family: "bomb".to_string(),
                skill: SkillId::mob_skill(2)
            })
        );
    }
}
