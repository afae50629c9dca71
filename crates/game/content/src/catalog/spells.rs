//! Spells.

use std::time::Duration;

use combat_core::effect::{damage_over_time, single_status};
use combat_core::evaluate::{absorb_damage, apply_bundle, compose, heal, magical_damage};
use combat_core::{
    Absorption, DamageSpec, EffectBundle, EffectDescriptor, RangeInfo, ResourceCost,
    ResourceKind, SkillBehavior, SkillMetadata, SkillRegistryBuilder, StatKind, StatPair,
    StatusEffectKind, TpScaling,
};

use crate::catalog::ids::spell;

const CASTING: f32 = 20.0;

fn cast(mp: u32, cast_ms: u64) -> SkillMetadata {
    SkillMetadata::new(ResourceCost::mp(mp), RangeInfo::single(CASTING))
        .cast(Duration::from_millis(cast_ms))
}

fn nuke(potency: f32) -> DamageSpec {
    DamageSpec::new(StatPair::INT_INT, TpScaling::Flat(potency))
}

pub fn register(builder: &mut SkillRegistryBuilder) {
    builder
        .register(
            spell::CURE,
            cast(8, 2000).describe("Restores HP."),
            SkillBehavior::new(heal(30, StatKind::Mnd, 1.5)),
        )
        .register(
            spell::PROTECT,
            cast(9, 1500).describe("Increases defense."),
            SkillBehavior::new(apply_bundle(single_status(
                EffectDescriptor::new(StatusEffectKind::Protect, 1800).with_potency(20),
                None,
            ))),
        )
        .register(
            spell::BLINK,
            cast(20, 3000)
                .recast(Duration::from_secs(20))
                .describe("Creates shadow images that absorb attacks."),
            SkillBehavior::new(apply_bundle(single_status(
                EffectDescriptor::new(StatusEffectKind::Blink, 300)
                    .decorate(|instance, _| instance.counter = 3),
                None,
            ))),
        )
        .register(
            spell::SLOW,
            cast(15, 2000).describe("Slows an enemy's attacks."),
            SkillBehavior::new(apply_bundle(single_status(
                EffectDescriptor::new(StatusEffectKind::Slow, 180)
                    .with_chance(80)
                    .decorate(|instance, ctx| {
                        let mnd = ctx.source.stat(StatKind::Mnd) - ctx.target.stat(StatKind::Mnd);
                        instance.potency = (150 + mnd.clamp(-10, 10) * 5).max(0);
                    }),
                None,
            ))),
        )
        .register(
            spell::FIRE,
            cast(7, 1000).describe("Deals fire damage."),
            SkillBehavior::new(magical_damage(nuke(2.0))),
        )
        .register(
            spell::BIO,
            cast(15, 1500).describe("Deals dark damage and gradually reduces HP."),
            SkillBehavior::new(compose([
                magical_damage(nuke(0.5)),
                apply_bundle(single_status(
                    damage_over_time(StatusEffectKind::Bio, 60, nuke(0.1)),
                    None,
                )),
            ])),
        )
        .register(
            spell::DRAIN,
            cast(21, 3000)
                .recast(Duration::from_secs(60))
                .describe("Drains HP from an enemy."),
            SkillBehavior::new(absorb_damage(magical_damage(nuke(1.0)), 100)),
        )
        .register(
            spell::ASPIR,
            cast(10, 3000)
                .recast(Duration::from_secs(60))
                .describe("Drains MP from an enemy."),
            SkillBehavior::new(apply_bundle(
                EffectBundle::new().absorb(Absorption::fixed(ResourceKind::Mp, 40)),
            )),
        )
        .register(
            spell::DISPEL,
            cast(25, 3000)
                .recast(Duration::from_secs(10))
                .describe("Removes one beneficial effect from an enemy."),
            SkillBehavior::new(apply_bundle(EffectBundle::new().dispel(1))),
        );
}
