//! Skill resolution pipeline.
//!
//! Stages, in order:
//! 1. Look up the skill (unknown ids are rejected)
//! 2. Check cost and range
//! 3. Run the valid evaluator (transient gate)
//! 4. Consult the switch resolver once (never recursively)
//! 5. Run the main evaluator against the (possibly redirected) target
//! 6. Run the additional self evaluator against the source (primary target
//!    only, so area skills affect their user once)
//! 7. Run the post evaluation with everything emitted so far
//!
//! Resolution is atomic: nothing is applied here. A rejected action yields
//! no events at all; a successful one is prefixed with the cost it spent.
//! An action aimed at a defeated target is an empty success: no cost, no
//! switch, no self evaluator.

use crate::env::RngOracle;
use crate::error::SkillFailure;
use crate::evaluate::{ActionContext, ResolutionContext};
use crate::event::CombatEvent;
use crate::skill::{SkillId, SkillRegistry, SwitchTarget};
use crate::state::{ActorView, EntityId};

/// One "source used skill on target" request.
#[derive(Clone, Copy)]
pub struct ResolutionRequest<'a> {
    pub source: &'a dyn ActorView,
    pub target: &'a dyn ActorView,
    pub skill: SkillId,
    pub action: ActionContext,
    pub rng: &'a dyn RngOracle,
    pub seed: u64,
}

impl<'a> ResolutionRequest<'a> {
    pub fn new(
        source: &'a dyn ActorView,
        target: &'a dyn ActorView,
        skill: SkillId,
        rng: &'a dyn RngOracle,
        seed: u64,
    ) -> Self {
        Self {
            source,
            target,
            skill,
            action: ActionContext::single(target.id(), 0),
            rng,
            seed,
        }
    }

    /// Builder: set outer action metadata.
    pub fn with_action(mut self, action: ActionContext) -> Self {
        self.action = action;
        self
    }
}

/// A successful resolution.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    /// Skill the actor asked for.
    pub requested: SkillId,
    /// Skill that actually resolved (differs after a switch).
    pub skill: SkillId,
    pub redirected: bool,
    /// Target of the main evaluator.
    pub target: EntityId,
    pub events: Vec<CombatEvent>,
}

/// Outcome of [`resolve`].
#[derive(Clone, Debug, PartialEq)]
pub enum ResolutionOutcome {
    Executed(Resolution),
    Rejected { skill: SkillId, reason: SkillFailure },
}

impl ResolutionOutcome {
    /// Events to apply; empty when rejected.
    pub fn events(&self) -> &[CombatEvent] {
        match self {
            Self::Executed(resolution) => &resolution.events,
            Self::Rejected { .. } => &[],
        }
    }

    pub fn is_executed(&self) -> bool {
        matches!(self, Self::Executed(_))
    }
}

/// Resolves one action against the registry.
pub fn resolve(registry: &SkillRegistry, request: ResolutionRequest<'_>) -> ResolutionOutcome {
    let requested = request.skill;
    let reject = |reason| ResolutionOutcome::Rejected {
        skill: requested,
        reason,
    };

    let Some(entry) = registry.get(requested) else {
        return reject(SkillFailure::UnknownSkill);
    };
    if request.target.is_defeated() {
        return ResolutionOutcome::Executed(Resolution {
            requested,
            skill: requested,
            redirected: false,
            target: request.target.id(),
            events: Vec::new(),
        });
    }

    let ctx = ResolutionContext::new(
        request.source,
        request.target,
        requested,
        &entry.metadata,
        request.rng,
        request.seed,
    )
    .with_action(request.action);

    // Stage 2: cost and range
    let cost = entry.metadata.cost;
    if request.action.is_primary() && !cost.affordable_by(request.source) {
        return reject(SkillFailure::InsufficientResource(cost.resource));
    }
    if request.action.is_primary() && !entry.metadata.range.in_range(request.source, request.target)
    {
        return reject(SkillFailure::OutOfRange);
    }

    // Stage 3: transient gate
    if let Some(valid) = &entry.behavior.valid
        && let Err(reason) = valid.check(&ctx)
    {
        return reject(reason);
    }

    // Stage 4: switch (consulted once, on the requested skill only)
    let switched = entry
        .behavior
        .switch
        .as_ref()
        .and_then(|switch| switch.resolve(&ctx))
        .and_then(|switch| {
            let replacement = registry.get(switch.skill)?;
            let target = match switch.target {
                SwitchTarget::Source => request.source,
                SwitchTarget::Target => request.target,
            };
            Some((switch.skill, replacement, target))
        });

    let (skill, resolved, ctx) = match switched {
        Some((skill, replacement, target)) => (
            skill,
            replacement,
            ctx.with_skill(skill, &replacement.metadata)
                .with_target(target),
        ),
        None => (requested, entry, ctx),
    };

    let mut events = Vec::new();
    if request.action.is_primary() {
        let spent = cost.spent_by(request.source);
        if spent > 0 {
            events.push(CombatEvent::ResourceSpent {
                actor: request.source.id(),
                resource: cost.resource,
                amount: spent,
            });
        }
    }

    // Stage 5-7
    events.extend(resolved.behavior.evaluator.evaluate(&ctx));
    if let Some(self_evaluator) = &resolved.behavior.self_evaluator
        && request.action.is_primary()
    {
        events.extend(self_evaluator.evaluate(&ctx.with_target(request.source)));
    }
    if let Some(post) = &resolved.behavior.post {
        let post_events = post.evaluate(&ctx, &events);
        events.extend(post_events);
    }

    ResolutionOutcome::Executed(Resolution {
        requested,
        skill,
        redirected: skill != requested,
        target: ctx.target.id(),
        events,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::FixedRng;
    use crate::evaluate::{TargetEvaluator, ValidEvaluator, defeat_self};
    use crate::skill::{
        RangeInfo, ResourceCost, SkillBehavior, SkillMetadata, SwitchResolver, SwitchSkill,
        backfire,
    };
    use crate::state::ActorState;
    use crate::stats::{CombatStats, ResourceKind};

    const FIRE: SkillId = SkillId::spell(144);
    const BACKLASH: SkillId = SkillId::spell(900);
    const LOOP: SkillId = SkillId::spell(901);

    fn marker(amount: u32) -> TargetEvaluator {
        TargetEvaluator::new(move |ctx| {
            vec![CombatEvent::Heal {
                source: ctx.source.id(),
                target: ctx.target.id(),
                amount,
            }]
        })
    }

    fn registry() -> SkillRegistry {
        let mut builder = SkillRegistry::builder();
        builder
            .register(
                FIRE,
                SkillMetadata::new(ResourceCost::mp(20), RangeInfo::single(20.0)),
                SkillBehavior::new(marker(1)).switch(backfire(30, BACKLASH, SwitchTarget::Source)),
            )
            .register(
                BACKLASH,
                SkillMetadata::new(ResourceCost::mp(99), RangeInfo::NONE),
                SkillBehavior::new(marker(2))
                    .valid(ValidEvaluator::new(|_| Err(SkillFailure::Precondition("never"))))
                    .switch(SwitchResolver::new([LOOP], |_| {
                        Some(SwitchSkill {
                            skill: LOOP,
                            target: SwitchTarget::Target,
                        })
                    })),
            )
            .register(LOOP, SkillMetadata::NEUTRAL, SkillBehavior::new(marker(3)));
        builder.build().unwrap()
    }

    fn mage() -> ActorState {
        ActorState::new(EntityId(1), CombatStats::new(), 100, 50)
    }

    fn enemy() -> ActorState {
        ActorState::new(EntityId(2), CombatStats::new(), 100, 0)
    }

    #[test]
    fn successful_resolution_is_prefixed_with_cost() {
        let (source, target) = (mage(), enemy());
        let outcome = resolve(
            &registry(),
            ResolutionRequest::new(&source, &target, FIRE, &FixedRng(100), 0),
        );

        assert_eq!(
            outcome.events(),
            &[
                CombatEvent::ResourceSpent {
                    actor: EntityId(1),
                    resource: ResourceKind::Mp,
                    amount: 20
                },
                CombatEvent::Heal {
                    source: EntityId(1),
                    target: EntityId(2),
                    amount: 1
                },
            ]
        );
    }

    #[test]
    fn switch_runs_replacement_once_without_recursion() {
        let (source, target) = (mage(), enemy());
        let outcome = resolve(
            &registry(),
            ResolutionRequest::new(&source, &target, FIRE, &FixedRng(1), 0),
        );

        let ResolutionOutcome::Executed(resolution) = outcome else {
            panic!("expected execution");
        };
        assert!(resolution.redirected);
        assert_eq!(resolution.skill, BACKLASH);
        assert_eq!(resolution.target, EntityId(1));
        // Requested cost, replacement evaluator, replacement gate not re-run,
        // replacement's own switch never consulted.
        assert_eq!(
            resolution.events[1],
            CombatEvent::Heal {
                source: EntityId(1),
                target: EntityId(1),
                amount: 2
            }
        );
        assert_eq!(resolution.events.len(), 2);
    }

    #[test]
    fn rejections_emit_nothing() {
        let target = enemy();
        let poor = mage();
        let outcome = resolve(
            &registry(),
            ResolutionRequest::new(&poor, &target, BACKLASH, &FixedRng(1), 0),
        );
        assert_eq!(
            outcome,
            ResolutionOutcome::Rejected {
                skill: BACKLASH,
                reason: SkillFailure::InsufficientResource(ResourceKind::Mp)
            }
        );
        assert!(outcome.events().is_empty());

        let rich = ActorState::new(EntityId(1), CombatStats::new(), 100, 120);
        let gated = resolve(
            &registry(),
            ResolutionRequest::new(&rich, &target, BACKLASH, &FixedRng(1), 0),
        );
        assert_eq!(
            gated,
            ResolutionOutcome::Rejected {
                skill: BACKLASH,
                reason: SkillFailure::Precondition("never")
            }
        );
        assert!(gated.events().is_empty());
    }

    #[test]
    fn unknown_and_out_of_range_are_rejected() {
        let source = mage();
        let far = enemy().at(crate::state::Position::new(50.0, 0.0));
        let registry = registry();

        let unknown = resolve(
            &registry,
            ResolutionRequest::new(&source, &far, SkillId::ability(1), &FixedRng(1), 0),
        );
        assert!(matches!(
            unknown,
            ResolutionOutcome::Rejected {
                reason: SkillFailure::UnknownSkill,
                ..
            }
        ));

        let out_of_range = resolve(
            &registry,
            ResolutionRequest::new(&source, &far, FIRE, &FixedRng(100), 0),
        );
        assert!(matches!(
            out_of_range,
            ResolutionOutcome::Rejected {
                reason: SkillFailure::OutOfRange,
                ..
            }
        ));
    }

    #[test]
    fn self_evaluator_targets_source() {
        let mut builder = SkillRegistry::builder();
        builder.register(
            SkillId::mob_skill(1),
            SkillMetadata::NEUTRAL,
            SkillBehavior::new(marker(5)).on_self(defeat_self()),
        );
        let registry = builder.build().unwrap();
        let (source, target) = (mage(), enemy());

        let outcome = resolve(
            &registry,
            ResolutionRequest::new(&source, &target, SkillId::mob_skill(1), &FixedRng(1), 0),
        );
        let events = outcome.events();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[2], CombatEvent::Defeated { target } if target == EntityId(1)));

        let fan_out = ActionContext {
            primary_target: EntityId(9),
            target_index: 1,
            target_count: 2,
            nonce: 0,
        };
        let outcome = resolve(
            &registry,
            ResolutionRequest::new(&source, &target, SkillId::mob_skill(1), &FixedRng(1), 0)
                .with_action(fan_out),
        );
        assert_eq!(outcome.events().len(), 1);
    }

    #[test]
    fn secondary_targets_pay_nothing() {
        let (source, target) = (mage(), enemy());
        let action = ActionContext {
            primary_target: EntityId(3),
            target_index: 1,
            target_count: 2,
            nonce: 4,
        };
        let request =
            ResolutionRequest::new(&source, &target, FIRE, &FixedRng(100), 0).with_action(action);
        let outcome = resolve(&registry(), request);

        assert_eq!(outcome.events().len(), 1);
    }

    #[test]
    fn defeated_target_is_an_empty_success() {
        let source = mage();
        let corpse = enemy().with_hp(0);

        let outcome = resolve(
            &registry(),
            ResolutionRequest::new(&source, &corpse, FIRE, &FixedRng(1), 0),
        );
        let ResolutionOutcome::Executed(resolution) = outcome else {
            panic!("expected an empty success");
        };
        assert!(resolution.events.is_empty());
        assert!(!resolution.redirected);
        assert_eq!(resolution.skill, FIRE);

        let mut builder = SkillRegistry::builder();
        builder.register(
            SkillId::mob_skill(1),
            SkillMetadata::NEUTRAL,
            SkillBehavior::new(marker(5)).on_self(defeat_self()),
        );
        let outcome = resolve(
            &builder.build().unwrap(),
            ResolutionRequest::new(&source, &corpse, SkillId::mob_skill(1), &FixedRng(1), 0),
        );
        assert!(outcome.is_executed());
        assert!(outcome.events().is_empty());
    }
}
