//! Monster skills.

use std::time::Duration;

use combat_core::effect::{single_status, stacked_statuses};
use combat_core::evaluate::{
    apply_bundle, defeat_self, magical_damage, physical_damage, transfer_debuffs,
};
use combat_core::skill::backfire;
use combat_core::{
    Absorption, DamageSpec, EffectBundle, EffectDescriptor, EffectFlags, RangeInfo, ResourceCost,
    ResourceKind, SkillBehavior, SkillFailure, SkillMetadata, SkillRegistryBuilder, StatKind,
    StatPair, StatusEffectKind, SwitchTarget, TargetEvaluator, TpScaling, ValidEvaluator,
};

use crate::catalog::ids::{mob, stance};

const MELEE: f32 = 5.0;

fn tp_move(range: RangeInfo) -> SkillMetadata {
    SkillMetadata::new(ResourceCost::FREE, range).recast(Duration::ZERO)
}

pub fn register(builder: &mut SkillRegistryBuilder) {
    builder
        .register(
            mob::SELF_DESTRUCT,
            tp_move(RangeInfo::source_centered(10.0))
                .movement_lock(Duration::from_secs(3))
                .describe("Explodes, damaging everything nearby and defeating the user."),
            SkillBehavior::new(magical_damage(
                DamageSpec::new(StatPair::INT_INT, TpScaling::Flat(6.0)),
            ))
            .on_self(defeat_self()),
        )
        .register(
            mob::PETRIFYING_GAZE,
            tp_move(RangeInfo::cone(12.0, 60.0)).describe("Petrifies those who meet its gaze."),
            SkillBehavior::new(apply_bundle(
                single_status(EffectDescriptor::new(StatusEffectKind::Petrification, 15), None)
                    .flags(EffectFlags::GAZE),
            )),
        )
        .register(
            mob::BODY_SLAM,
            tp_move(RangeInfo::single(MELEE)).describe("Knocks back and stuns a target."),
            SkillBehavior::new(
                physical_damage(DamageSpec::new(StatPair::STR_VIT, TpScaling::Flat(1.5))).then(
                    apply_bundle(single_status(
                        EffectDescriptor::new(StatusEffectKind::Stun, 3).with_chance(50),
                        Some(6.0),
                    )),
                ),
            ),
        )
        .register(
            mob::VAMPIRIC_LASH,
            tp_move(RangeInfo::single(MELEE)).describe("Drains a share of the target's HP."),
            SkillBehavior::new(apply_bundle(
                EffectBundle::new()
                    .absorb(Absorption::percent(ResourceKind::Hp, 10))
                    .flags(EffectFlags::BYPASS_SHADOWS),
            )),
        )
        .register(
            mob::CURSE_TRANSFER,
            tp_move(RangeInfo::single(15.0)).describe("Passes the user's ailments to a target."),
            SkillBehavior::new(TargetEvaluator::noop()).post(transfer_debuffs()),
        )
        .register(
            mob::UNSTABLE_BLAST,
            tp_move(RangeInfo::single(15.0)).describe("Unstable magic that may backfire."),
            SkillBehavior::new(magical_damage(DamageSpec::new(
                StatPair::INT_INT,
                TpScaling::Flat(3.0),
            )))
            .switch(backfire(25, mob::BACKLASH, SwitchTarget::Source)),
        )
        .register(
            mob::BACKLASH,
            tp_move(RangeInfo::NONE).describe("A backfired blast."),
            SkillBehavior::new(magical_damage(DamageSpec::new(
                StatPair::INT_INT,
                TpScaling::Flat(1.0),
            ))),
        )
        .register(
            mob::FROST_BREATH,
            tp_move(RangeInfo::cone(10.0, 45.0)).describe("Ice breath in a fan-shaped area."),
            SkillBehavior::new(
                magical_damage(DamageSpec::new(StatPair::INT_INT, TpScaling::Flat(2.5))).then(
                    apply_bundle(single_status(
                        EffectDescriptor::new(StatusEffectKind::Paralysis, 60)
                            .with_chance(30)
                            .decorate(|instance, _| instance.secondary_potency = 20),
                        None,
                    )),
                ),
            ),
        )
        .register(
            mob::TRIPLE_CLAW,
            tp_move(RangeInfo::single(MELEE)).describe("Three claw strikes."),
            SkillBehavior::new(physical_damage(
                DamageSpec::new(StatPair::STR_VIT, TpScaling::Flat(3.0))
                    .hits(3)
                    .spread()
                    .capped(400),
            )),
        )
        .register(
            mob::NOXIOUS_SPORE,
            tp_move(RangeInfo::area(12.0, 6.0)).describe("Releases a cloud of toxic spores."),
            SkillBehavior::new(apply_bundle(stacked_statuses([
                EffectDescriptor::new(StatusEffectKind::Poison, 60).decorate(|instance, ctx| {
                    instance.potency = (ctx.source.stat(StatKind::Level) / 5 + 1).max(1);
                }),
                EffectDescriptor::new(StatusEffectKind::Blind, 90).with_potency(20),
                EffectDescriptor::new(StatusEffectKind::Silence, 60).with_chance(50),
            ]))),
        )
        .register(
            mob::RAGE_ROAR,
            tp_move(RangeInfo::source_centered(15.0)).describe("An enraged roar."),
            SkillBehavior::new(apply_bundle(single_status(
                EffectDescriptor::new(StatusEffectKind::Terror, 10),
                None,
            )))
            .valid(ValidEvaluator::require(
                |ctx| ctx.source.appearance() == stance::ENRAGED,
                SkillFailure::WrongState,
            )),
        );
}
