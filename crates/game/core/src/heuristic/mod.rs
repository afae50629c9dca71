//! Heuristic scorer for AI skill selection.
//!
//! A [`Heuristic`] maps a resolution context to a bounded [`Score`]. Scores
//! combine with [`Heuristic::min_of`] (veto: the lowest sub-score wins) or
//! [`Heuristic::sum_of`] (additive, saturating). Skills without a registered
//! heuristic score [`Score::NEUTRAL`].
//!
//! Heuristics read live actor state at scoring time and never roll dice.

mod registry;
mod score;
mod threshold;

use std::fmt;
use std::sync::Arc;

use crate::evaluate::ResolutionContext;

pub use registry::{HeuristicRegistry, HeuristicRegistryBuilder};
pub use score::Score;
pub use threshold::{
    Subject, appearance_is, avoid_overwriting, avoid_overwriting_any, behind_target,
    distance_band, hp_above, hp_below, hp_ramp, mp_above, mp_below, target_facing_source,
};

type ScoreFn = dyn Fn(&ResolutionContext<'_>) -> Score + Send + Sync;

/// Context to bounded score.
#[derive(Clone)]
pub struct Heuristic(Arc<ScoreFn>);

impl Heuristic {
    pub fn new(score: impl Fn(&ResolutionContext<'_>) -> Score + Send + Sync + 'static) -> Self {
        Self(Arc::new(score))
    }

    /// Always returns `score`.
    pub fn constant(score: Score) -> Self {
        Self::new(move |_| score)
    }

    pub fn score(&self, ctx: &ResolutionContext<'_>) -> Score {
        (self.0)(ctx)
    }

    /// Lowest sub-score; any veto propagates. Empty input is neutral.
    pub fn min_of(heuristics: impl IntoIterator<Item = Heuristic>) -> Self {
        let heuristics: Vec<_> = heuristics.into_iter().collect();
        Self::new(move |ctx| {
            heuristics
                .iter()
                .map(|heuristic| heuristic.score(ctx))
                .min()
                .unwrap_or(Score::NEUTRAL)
        })
    }

    /// Saturating sum of sub-scores. Empty input is neutral.
    pub fn sum_of(heuristics: impl IntoIterator<Item = Heuristic>) -> Self {
        let heuristics: Vec<_> = heuristics.into_iter().collect();
        Self::new(move |ctx| {
            if heuristics.is_empty() {
                return Score::NEUTRAL;
            }
            heuristics
                .iter()
                .fold(Score::VETO, |acc, heuristic| acc.saturating_add(heuristic.score(ctx)))
        })
    }
}

impl fmt::Debug for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Heuristic")
    }
}
