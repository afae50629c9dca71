use std::collections::HashMap;

use crate::evaluate::ResolutionContext;
use crate::heuristic::{Heuristic, Score};
use crate::skill::SkillId;

/// Skill id to heuristic. Immutable after build.
#[derive(Clone, Debug, Default)]
pub struct HeuristicRegistry {
    heuristics: HashMap<SkillId, Heuristic>,
}

impl HeuristicRegistry {
    pub fn builder() -> HeuristicRegistryBuilder {
        HeuristicRegistryBuilder::default()
    }

    /// Scores `ctx.skill`; [`Score::NEUTRAL`] when no heuristic is registered.
    pub fn score(&self, ctx: &ResolutionContext<'_>) -> Score {
        self.heuristics
            .get(&ctx.skill)
            .map_or(Score::NEUTRAL, |heuristic| heuristic.score(ctx))
    }

    pub fn contains(&self, skill: SkillId) -> bool {
        self.heuristics.contains_key(&skill)
    }

    pub fn len(&self) -> usize {
        self.heuristics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heuristics.is_empty()
    }
}

#[derive(Default)]
pub struct HeuristicRegistryBuilder {
    heuristics: HashMap<SkillId, Heuristic>,
}

impl HeuristicRegistryBuilder {
    /// Registers the heuristic for `skill`. The first registration wins.
    pub fn register(&mut self, skill: SkillId, heuristic: Heuristic) -> &mut Self {
        debug_assert!(
            !self.heuristics.contains_key(&skill),
            "heuristic for {skill} registered twice"
        );
        self.heuristics.entry(skill).or_insert(heuristic);
        self
    }

    pub fn build(self) -> HeuristicRegistry {
        HeuristicRegistry {
            heuristics: self.heuristics,
        }
    }
}
