//! Threshold heuristics.
//!
//! Binary thresholds return [`Score::MAX`] or [`Score::VETO`]. Continuous
//! variants ramp linearly across a band so the AI does not oscillate when a
//! value hovers around a boundary.

use crate::evaluate::ResolutionContext;
use crate::heuristic::{Heuristic, Score};
use crate::state::{ActorView, StatusEffectKind, is_facing, targeting_distance};
use crate::stats::ResourceKind;

/// Half-angle used by the facing heuristics.
const FACING_HALF_ANGLE: f32 = 90.0;

/// Which side of the context a heuristic reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Subject {
    Source,
    Target,
}

impl Subject {
    fn of<'a>(self, ctx: &ResolutionContext<'a>) -> &'a dyn ActorView {
        match self {
            Self::Source => ctx.source,
            Self::Target => ctx.target,
        }
    }
}

fn gate(pass: bool) -> Score {
    if pass { Score::MAX } else { Score::VETO }
}

fn percent_threshold(
    subject: Subject,
    resource: ResourceKind,
    pass: impl Fn(u32) -> bool + Send + Sync + 'static,
) -> Heuristic {
    Heuristic::new(move |ctx| gate(pass(subject.of(ctx).resource_percent(resource))))
}

/// Passes while HP is strictly below `percent`.
pub fn hp_below(subject: Subject, percent: u32) -> Heuristic {
    percent_threshold(subject, ResourceKind::Hp, move |hp| hp < percent)
}

/// Passes while HP is at or above `percent`.
pub fn hp_above(subject: Subject, percent: u32) -> Heuristic {
    percent_threshold(subject, ResourceKind::Hp, move |hp| hp >= percent)
}

/// Passes while MP is strictly below `percent`.
pub fn mp_below(subject: Subject, percent: u32) -> Heuristic {
    percent_threshold(subject, ResourceKind::Mp, move |mp| mp < percent)
}

/// Passes while MP is at or above `percent`.
pub fn mp_above(subject: Subject, percent: u32) -> Heuristic {
    percent_threshold(subject, ResourceKind::Mp, move |mp| mp >= percent)
}

/// Continuous preference for low HP.
///
/// `MAX` at or below `low` percent, `VETO` at or above `high` percent, linear
/// in between.
pub fn hp_ramp(subject: Subject, low: u32, high: u32) -> Heuristic {
    Heuristic::new(move |ctx| {
        let hp = subject.of(ctx).resource_percent(ResourceKind::Hp);
        if hp <= low {
            return Score::MAX;
        }
        if hp >= high {
            return Score::VETO;
        }
        Score::ratio((high - hp) as f32 / (high - low) as f32)
    })
}

/// Passes while the subject shows appearance/state flag `appearance`.
pub fn appearance_is(subject: Subject, appearance: u8) -> Heuristic {
    Heuristic::new(move |ctx| gate(subject.of(ctx).appearance() == appearance))
}

/// Passes while the target looks at the source (gaze attacks).
pub fn target_facing_source() -> Heuristic {
    Heuristic::new(|ctx| gate(is_facing(ctx.target, ctx.source, FACING_HALF_ANGLE)))
}

/// Passes while the source stands outside the target's front arc.
pub fn behind_target() -> Heuristic {
    Heuristic::new(|ctx| gate(!is_facing(ctx.target, ctx.source, FACING_HALF_ANGLE)))
}

/// Continuous distance preference.
///
/// `MAX` inside `[min, max]`, falling linearly to `VETO` over `falloff`
/// units outside the band.
pub fn distance_band(min: f32, max: f32, falloff: f32) -> Heuristic {
    Heuristic::new(move |ctx| {
        let distance = targeting_distance(ctx.source, ctx.target);
        let outside = if distance < min {
            min - distance
        } else if distance > max {
            distance - max
        } else {
            return Score::MAX;
        };
        if falloff <= 0.0 {
            return Score::VETO;
        }
        Score::ratio(1.0 - outside / falloff)
    })
}

/// Vetoes reapplying `kind` while the target carries an undiminished
/// instance of it.
pub fn avoid_overwriting(kind: StatusEffectKind) -> Heuristic {
    avoid_overwriting_any([kind])
}

/// Vetoes when the target carries an undiminished instance of any of
/// `kinds`.
pub fn avoid_overwriting_any(kinds: impl IntoIterator<Item = StatusEffectKind>) -> Heuristic {
    let kinds: Vec<_> = kinds.into_iter().collect();
    Heuristic::new(move |ctx| {
        let effects = ctx.target.status_effects();
        let covered = kinds.iter().any(|kind| {
            effects
                .get(*kind)
                .is_some_and(|instance| instance.is_undiminished())
        });
        if covered { Score::VETO } else { Score::NEUTRAL }
    })
}
