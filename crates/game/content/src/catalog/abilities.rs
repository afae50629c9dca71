//! Weapon skills and job abilities.

use std::time::Duration;

use combat_core::effect::single_status;
use combat_core::evaluate::{apply_bundle, physical_damage};
use combat_core::{
    DamageSpec, EffectDescriptor, RangeInfo, ResourceCost, SkillBehavior, SkillChain,
    SkillFailure, SkillMetadata, SkillRegistryBuilder, StatPair, StatusEffectKind, TpScaling,
    ValidEvaluator,
};

use crate::catalog::ids::{ability, stance};

const MELEE: f32 = 4.0;

pub fn register(builder: &mut SkillRegistryBuilder) {
    builder
        .register(
            ability::FAST_BLADE,
            SkillMetadata::new(ResourceCost::tp(1000), RangeInfo::single(MELEE))
                .chain([SkillChain::Scission])
                .describe("Two-hit attack. Damage varies with TP."),
            SkillBehavior::new(physical_damage(
                DamageSpec::new(StatPair::DEX_AGI, TpScaling::linear(1.0, 0.5)).hits(2),
            )),
        )
        .register(
            ability::VORPAL_BLADE,
            SkillMetadata::new(ResourceCost::tp(1000), RangeInfo::single(MELEE))
                .chain([SkillChain::Scission, SkillChain::Impaction])
                .describe("Four-hit attack. Damage varies with TP."),
            SkillBehavior::new(physical_damage(
                DamageSpec::new(StatPair::STR_VIT, TpScaling::linear(2.5, 1.0)).hits(4),
            )),
        )
        .register(
            ability::SPINNING_ATTACK,
            SkillMetadata::new(ResourceCost::tp(1000).all(), RangeInfo::source_centered(MELEE))
                .describe("Delivers an area attack. Consumes all TP."),
            SkillBehavior::new(physical_damage(
                DamageSpec::new(StatPair::STR_VIT, TpScaling::linear(1.0, 0.25))
                    .hits(3)
                    .spread(),
            )),
        )
        .register(
            ability::SHIELD_BASH,
            SkillMetadata::new(ResourceCost::FREE, RangeInfo::single(MELEE))
                .recast(Duration::from_secs(180))
                .describe("Stuns an enemy. Requires an engaged stance."),
            SkillBehavior::new(
                physical_damage(DamageSpec::new(StatPair::STR_VIT, TpScaling::Flat(0.5)))
                    .then(apply_bundle(single_status(
                        EffectDescriptor::new(StatusEffectKind::Stun, 4),
                        None,
                    ))),
            )
            .valid(ValidEvaluator::require(
                |ctx| ctx.source.appearance() == stance::ENGAGED,
                SkillFailure::EquipmentState,
            )),
        );
}
