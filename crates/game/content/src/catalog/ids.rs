//! Skill ids of the demonstration catalog.

use combat_core::SkillId;

/// Weapon skills and job abilities.
pub mod ability {
    use super::SkillId;

    pub const FAST_BLADE: SkillId = SkillId::ability(32);
    pub const VORPAL_BLADE: SkillId = SkillId::ability(40);
    pub const SPINNING_ATTACK: SkillId = SkillId::ability(41);
    pub const SHIELD_BASH: SkillId = SkillId::ability(46);
}

pub mod spell {
    use super::SkillId;

    pub const CURE: SkillId = SkillId::spell(1);
    pub const PROTECT: SkillId = SkillId::spell(43);
    pub const BLINK: SkillId = SkillId::spell(53);
    pub const SLOW: SkillId = SkillId::spell(56);
    pub const FIRE: SkillId = SkillId::spell(144);
    pub const BIO: SkillId = SkillId::spell(230);
    pub const DRAIN: SkillId = SkillId::spell(245);
    pub const ASPIR: SkillId = SkillId::spell(247);
    pub const DISPEL: SkillId = SkillId::spell(260);
}

pub mod mob {
    use super::SkillId;

    pub const SELF_DESTRUCT: SkillId = SkillId::mob_skill(1);
    pub const PETRIFYING_GAZE: SkillId = SkillId::mob_skill(2);
    pub const BODY_SLAM: SkillId = SkillId::mob_skill(3);
    pub const VAMPIRIC_LASH: SkillId = SkillId::mob_skill(4);
    pub const CURSE_TRANSFER: SkillId = SkillId::mob_skill(5);
    pub const UNSTABLE_BLAST: SkillId = SkillId::mob_skill(6);
    pub const BACKLASH: SkillId = SkillId::mob_skill(7);
    pub const FROST_BREATH: SkillId = SkillId::mob_skill(8);
    pub const TRIPLE_CLAW: SkillId = SkillId::mob_skill(9);
    pub const NOXIOUS_SPORE: SkillId = SkillId::mob_skill(10);
    pub const RAGE_ROAR: SkillId = SkillId::mob_skill(11);
}

/// Appearance/state flags the catalog gates on.
pub mod stance {
    /// Weapon drawn and engaged.
    pub const ENGAGED: u8 = 1;
    /// Monster enraged form.
    pub const ENRAGED: u8 = 2;
}
