//! Heuristic skill selection.
//!
//! Every decision tick the selector scores each available skill in the
//! actor's kit and picks the highest scorer at or above the eligibility
//! floor. A skill is available when the actor can pay for it, the target is
//! in range and the skill's validity gate passes.
//!
//! # Determinism
//!
//! Scoring is pure: heuristics read live actor state and never roll. Ties go
//! to the skill declared first in the registry.

use combat_core::{
    ActorView, CombatConfig, HeuristicRegistry, PcgRng, ResolutionContext, Score, SkillId,
    SkillRegistry,
};

/// A chosen skill and the score it won with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
    pub skill: SkillId,
    pub score: Score,
}

/// Picks the best skill for an actor against a target.
#[derive(Clone, Copy, Debug)]
pub struct SkillSelector {
    floor: u32,
}

impl SkillSelector {
    pub fn new(floor: u32) -> Self {
        Self { floor }
    }

    pub fn from_config(config: &CombatConfig) -> Self {
        Self::new(config.eligibility_floor)
    }

    pub fn floor(&self) -> u32 {
        self.floor
    }

    /// Selects the highest-scoring available skill from `kit`.
    ///
    /// Returns `None` when nothing is available or nothing reaches the floor.
    pub fn select(
        &self,
        skills: &SkillRegistry,
        heuristics: &HeuristicRegistry,
        source: &dyn ActorView,
        target: &dyn ActorView,
        kit: &[SkillId],
    ) -> Option<Selection> {
        let mut best: Option<Selection> = None;

        tracing::debug!("SkillSelector: evaluating {} skills for {}", kit.len(), source.id());

        for (skill, score) in self.evaluate_all(skills, heuristics, source, target, kit) {
            if score.value() < self.floor {
                continue;
            }
            // Strictly greater: the earlier declaration keeps a tie
            if best.is_none_or(|current| score > current.score) {
                best = Some(Selection { skill, score });
            }
        }

        match best {
            Some(selection) => tracing::debug!(
                "SkillSelector: {} picks {} (score={})",
                source.id(),
                selection.skill,
                selection.score.value()
            ),
            None => tracing::debug!(
                "SkillSelector: {} has no skill at or above floor {}",
                source.id(),
                self.floor
            ),
        }

        best
    }

    /// Scores every available skill in `kit`, in registry declaration order.
    pub fn evaluate_all(
        &self,
        skills: &SkillRegistry,
        heuristics: &HeuristicRegistry,
        source: &dyn ActorView,
        target: &dyn ActorView,
        kit: &[SkillId],
    ) -> Vec<(SkillId, Score)> {
        let mut scores = Vec::new();

        for &skill in skills.ids().iter().filter(|id| kit.contains(id)) {
            let Some(entry) = skills.get(skill) else {
                continue;
            };
            let ctx = ResolutionContext::new(source, target, skill, &entry.metadata, &PcgRng, 0);

            if !entry.metadata.cost.affordable_by(source) {
                tracing::debug!("  {}: unaffordable", skill);
                continue;
            }
            if !entry.metadata.range.in_range(source, target) {
                tracing::debug!("  {}: out of range", skill);
                continue;
            }
            if let Some(valid) = &entry.behavior.valid
                && let Err(reason) = valid.check(&ctx)
            {
                tracing::debug!("  {}: unavailable ({})", skill, reason);
                continue;
            }

            let score = heuristics.score(&ctx);
            tracing::debug!("  {}: score={}", skill, score.value());
            scores.push((skill, score));
        }

        scores
    }
}

impl Default for SkillSelector {
    fn default() -> Self {
        Self::from_config(&CombatConfig::default())
    }
}
