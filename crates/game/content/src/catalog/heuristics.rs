//! AI heuristics for the demonstration catalog.

use combat_core::heuristic::{
    HeuristicRegistryBuilder, Subject, appearance_is, avoid_overwriting, avoid_overwriting_any,
    behind_target, distance_band, hp_below, hp_ramp, mp_above, target_facing_source,
};
use combat_core::{Heuristic, Score, StatusEffectKind};

use crate::catalog::ids::{ability, mob, spell, stance};

pub fn register(builder: &mut HeuristicRegistryBuilder) {
    builder
        .register(spell::CURE, hp_ramp(Subject::Target, 30, 80))
        .register(spell::PROTECT, avoid_overwriting(StatusEffectKind::Protect))
        .register(spell::BLINK, avoid_overwriting(StatusEffectKind::Blink))
        .register(spell::SLOW, avoid_overwriting(StatusEffectKind::Slow))
        .register(
            spell::BIO,
            Heuristic::min_of([
                avoid_overwriting_any([StatusEffectKind::Bio, StatusEffectKind::Dia]),
                mp_above(Subject::Source, 20),
            ]),
        )
        .register(
            spell::DISPEL,
            Heuristic::new(|ctx| {
                if ctx.target.status_effects().dispellable_newest_first().is_empty() {
                    Score::VETO
                } else {
                    Score::new(70)
                }
            }),
        )
        .register(
            ability::SHIELD_BASH,
            appearance_is(Subject::Source, stance::ENGAGED),
        )
        .register(mob::SELF_DESTRUCT, hp_below(Subject::Source, 25))
        .register(mob::PETRIFYING_GAZE, target_facing_source())
        .register(mob::FROST_BREATH, distance_band(0.0, 10.0, 5.0))
        .register(
            mob::TRIPLE_CLAW,
            Heuristic::sum_of([Heuristic::constant(Score::NEUTRAL), behind_target()]),
        )
        .register(
            mob::NOXIOUS_SPORE,
            avoid_overwriting_any([
                StatusEffectKind::Poison,
                StatusEffectKind::Blind,
                StatusEffectKind::Silence,
            ]),
        )
        .register(mob::RAGE_ROAR, appearance_is(Subject::Source, stance::ENRAGED));
}
