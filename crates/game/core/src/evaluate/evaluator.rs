use std::fmt;
use std::sync::Arc;

use crate::error::SkillFailure;
use crate::evaluate::ResolutionContext;
use crate::event::CombatEvent;

type EvaluateFn = dyn Fn(&ResolutionContext<'_>) -> Vec<CombatEvent> + Send + Sync;
type ValidFn = dyn Fn(&ResolutionContext<'_>) -> Result<(), SkillFailure> + Send + Sync;
type PostFn = dyn Fn(&ResolutionContext<'_>, &[CombatEvent]) -> Vec<CombatEvent> + Send + Sync;

/// Maps a resolution context to an ordered event sequence.
///
/// Evaluators compose by concatenation; [`TargetEvaluator::noop`] is the
/// identity element. Once a stage defeats the context's target, later
/// stages are skipped.
#[derive(Clone)]
pub struct TargetEvaluator(Arc<EvaluateFn>);

impl TargetEvaluator {
    pub fn new(
        evaluate: impl Fn(&ResolutionContext<'_>) -> Vec<CombatEvent> + Send + Sync + 'static,
    ) -> Self {
        Self(Arc::new(evaluate))
    }

    /// Emits nothing.
    pub fn noop() -> Self {
        Self::new(|_| Vec::new())
    }

    pub fn evaluate(&self, ctx: &ResolutionContext<'_>) -> Vec<CombatEvent> {
        (self.0)(ctx)
    }

    /// Runs `self`, then `next`, concatenating their events.
    pub fn then(self, next: TargetEvaluator) -> Self {
        Self::compose([self, next])
    }

    /// Concatenates the outputs of `evaluators` in declaration order,
    /// stopping after the stage that defeats the target.
    pub fn compose(evaluators: impl IntoIterator<Item = TargetEvaluator>) -> Self {
        let evaluators: Vec<_> = evaluators.into_iter().collect();
        Self::new(move |ctx| {
            let target = ctx.target.id();
            let mut events = Vec::new();
            for evaluator in &evaluators {
                let stage = evaluator.evaluate(ctx);
                let lethal = stage.iter().any(|event| event.defeats(target));
                events.extend(stage);
                if lethal {
                    break;
                }
            }
            events
        })
    }
}

impl fmt::Debug for TargetEvaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TargetEvaluator")
    }
}

/// Transient gate run before anything else.
///
/// `Err` aborts the action with no events and no resource consumption.
#[derive(Clone)]
pub struct ValidEvaluator(Arc<ValidFn>);

impl ValidEvaluator {
    pub fn new(
        valid: impl Fn(&ResolutionContext<'_>) -> Result<(), SkillFailure> + Send + Sync + 'static,
    ) -> Self {
        Self(Arc::new(valid))
    }

    /// Fails with `failure` unless `condition` holds.
    pub fn require(
        condition: impl Fn(&ResolutionContext<'_>) -> bool + Send + Sync + 'static,
        failure: SkillFailure,
    ) -> Self {
        Self::new(move |ctx| {
            if condition(ctx) {
                Ok(())
            } else {
                Err(failure.clone())
            }
        })
    }

    pub fn check(&self, ctx: &ResolutionContext<'_>) -> Result<(), SkillFailure> {
        (self.0)(ctx)
    }
}

impl fmt::Debug for ValidEvaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ValidEvaluator")
    }
}

/// Last stage of a resolution; sees every event emitted so far.
#[derive(Clone)]
pub struct PostEvaluation(Arc<PostFn>);

impl PostEvaluation {
    pub fn new(
        post: impl Fn(&ResolutionContext<'_>, &[CombatEvent]) -> Vec<CombatEvent>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        Self(Arc::new(post))
    }

    pub fn evaluate(&self, ctx: &ResolutionContext<'_>, prior: &[CombatEvent]) -> Vec<CombatEvent> {
        (self.0)(ctx, prior)
    }
}

impl fmt::Debug for PostEvaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PostEvaluation")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;
    use crate::skill::{SkillId, SkillMetadata};
    use crate::state::{ActorState, EntityId};
    use crate::stats::{CombatStats, ResourceKind};

    fn tp(amount: u32) -> TargetEvaluator {
        TargetEvaluator::new(move |ctx| {
            vec![CombatEvent::TpGained {
                actor: ctx.source.id(),
                amount,
            }]
        })
    }

    fn run(evaluator: &TargetEvaluator) -> Vec<CombatEvent> {
        let source = ActorState::new(EntityId(1), CombatStats::new(), 10, 0);
        let target = ActorState::new(EntityId(2), CombatStats::new(), 10, 0);
        let metadata = SkillMetadata::NEUTRAL;
        let ctx =
            ResolutionContext::new(&source, &target, SkillId::ability(1), &metadata, &PcgRng, 0);
        evaluator.evaluate(&ctx)
    }

    #[test]
    fn compose_is_associative() {
        let left = tp(1).then(tp(2)).then(tp(3));
        let right = tp(1).then(tp(2).then(tp(3)));
        let flat = TargetEvaluator::compose([tp(1), tp(2), tp(3)]);

        assert_eq!(run(&left), run(&right));
        assert_eq!(run(&left), run(&flat));
        assert_eq!(run(&flat).len(), 3);
    }

    #[test]
    fn noop_is_identity() {
        let plain = run(&tp(7));
        assert_eq!(run(&TargetEvaluator::noop().then(tp(7))), plain);
        assert_eq!(run(&tp(7).then(TargetEvaluator::noop())), plain);
        assert!(run(&TargetEvaluator::compose([])).is_empty());
    }

    #[test]
    fn stages_after_a_lethal_stage_are_skipped() {
        let lethal = TargetEvaluator::new(|ctx| {
            vec![CombatEvent::Defeated {
                target: ctx.target.id(),
            }]
        });

        let events = run(&tp(1).then(lethal.clone()).then(tp(2)));
        assert_eq!(events.len(), 2);
        assert!(matches!(events[1], CombatEvent::Defeated { .. }));
        assert_eq!(run(&tp(1).then(lethal.clone().then(tp(2)))), events);

        // Only the context's own target counts.
        let bystander = TargetEvaluator::new(|_| {
            vec![CombatEvent::Defeated {
                target: EntityId(9),
            }]
        });
        assert_eq!(run(&bystander.then(tp(3))).len(), 2);
    }

    #[test]
    fn require_reports_failure() {
        let gate = ValidEvaluator::require(
            |ctx| ctx.source.resource(ResourceKind::Mp) > 0,
            SkillFailure::Precondition("needs mana"),
        );
        let source = ActorState::new(EntityId(1), CombatStats::new(), 10, 0);
        let metadata = SkillMetadata::NEUTRAL;
        let ctx =
            ResolutionContext::new(&source, &source, SkillId::spell(1), &metadata, &PcgRng, 0);

        assert_eq!(gate.check(&ctx), Err(SkillFailure::Precondition("needs mana")));
    }
}
