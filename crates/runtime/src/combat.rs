//! Combat loop surface.
//!
//! [`CombatRuntime`] owns the shared registries and a [`Roster`]. One call to
//! [`CombatRuntime::execute`] resolves a full action (area fan-out included)
//! against a snapshot of the roster and only then applies the events, so an
//! action is all-or-nothing.

use std::sync::Arc;

use combat_content::{Content, MonsterCatalog};
use combat_core::evaluate::{ActionContext, ResolutionRequest, resolve};
use combat_core::{
    ActorState, ActorView, CombatConfig, CombatEvent, EntityId, HeuristicRegistry, PcgRng,
    Position, ResolutionOutcome, RngOracle, SkillId, SkillRegistry,
};

use crate::error::{Result, RuntimeError};
use crate::providers::ai::{Selection, SkillSelector};
use crate::roster::{Combatant, Roster};

/// Result of one executed action.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionReport {
    pub actor: EntityId,
    /// Skill the actor asked for.
    pub requested: SkillId,
    /// Skill that resolved (differs after a switch).
    pub skill: SkillId,
    pub redirected: bool,
    /// Every target the main evaluator ran against, primary first.
    pub targets: Vec<EntityId>,
    /// Events in application order.
    pub events: Vec<CombatEvent>,
}

/// Single-threaded combat runtime.
pub struct CombatRuntime {
    skills: Arc<SkillRegistry>,
    heuristics: Arc<HeuristicRegistry>,
    monsters: Arc<MonsterCatalog>,
    rng: Box<dyn RngOracle>,
    selector: SkillSelector,
    game_seed: u64,
    nonce: u64,
    roster: Roster,
}

impl CombatRuntime {
    /// Creates a runtime over validated content.
    ///
    /// The process-wide seed is `config.seed`, or a fresh random one.
    pub fn new(content: Content, config: &CombatConfig) -> Self {
        let game_seed = config.seed.unwrap_or_else(rand::random::<u64>);

        tracing::info!(
            "Combat runtime ready: {} skills, {} heuristics, {} monster families (seed={}, floor={})",
            content.skills.len(),
            content.heuristics.len(),
            content.monsters.len(),
            game_seed,
            config.eligibility_floor
        );

        Self {
            skills: content.skills,
            heuristics: content.heuristics,
            monsters: content.monsters,
            rng: Box::new(PcgRng),
            selector: SkillSelector::from_config(config),
            game_seed,
            nonce: 0,
            roster: Roster::new(),
        }
    }

    /// Replaces the random source (tests inject a fixed one).
    pub fn with_rng(mut self, rng: impl RngOracle + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn seed(&self) -> u64 {
        self.game_seed
    }

    /// Number of actions executed so far.
    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn skills(&self) -> &Arc<SkillRegistry> {
        &self.skills
    }

    pub fn heuristics(&self) -> &Arc<HeuristicRegistry> {
        &self.heuristics
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }

    /// Adds an actor with an explicit kit.
    pub fn join(
        &mut self,
        state: ActorState,
        kit: impl IntoIterator<Item = SkillId>,
    ) -> Result<EntityId> {
        let id = self.roster.insert(Combatant::new(state, kit))?;
        tracing::debug!("Actor {} joined combat", id);
        Ok(id)
    }

    /// Spawns a monster of `family` at `level`, using the family kit.
    pub fn spawn(
        &mut self,
        family: &str,
        level: u8,
        id: EntityId,
        position: Position,
    ) -> Result<EntityId> {
        let template = self
            .monsters
            .family(family)
            .ok_or_else(|| RuntimeError::UnknownFamily(family.to_string()))?;
        let stats = template.instantiate(level, self.monsters.curve())?;
        let kit = template.skills.clone();

        tracing::info!("Spawning {} level {} as {}", family, level, id);
        self.join(stats.to_actor(id).at(position), kit)
    }

    /// Resolves `skill` used by `actor` on `target` and applies the events.
    ///
    /// # Errors
    ///
    /// [`RuntimeError::UnknownActor`] for ids not on the roster and
    /// [`RuntimeError::Rejected`] when the primary resolution is rejected.
    /// A rejected action changes nothing.
    pub fn execute(
        &mut self,
        actor: EntityId,
        skill: SkillId,
        target: EntityId,
    ) -> Result<ActionReport> {
        let report = self.resolve_action(actor, skill, target)?;
        let applied = self.roster.apply(&report.events);
        tracing::debug!("Applied {} of {} events", applied, report.events.len());
        Ok(report)
    }

    fn resolve_action(
        &mut self,
        actor: EntityId,
        skill: SkillId,
        target: EntityId,
    ) -> Result<ActionReport> {
        let source = self
            .roster
            .state(actor)
            .ok_or(RuntimeError::UnknownActor(actor))?;
        let primary = self
            .roster
            .state(target)
            .ok_or(RuntimeError::UnknownActor(target))?;

        self.nonce += 1;
        let nonce = self.nonce;
        let range = self.skills.metadata(skill).range;

        // Primary first, then everyone else the area covers. A defeated
        // primary anchors no area.
        let mut targets = vec![primary];
        if !primary.is_defeated() {
            targets.extend(self.roster.alive().filter(|candidate| {
                candidate.id != actor
                    && candidate.id != target
                    && range.covers(source, primary, *candidate)
            }));
        }
        let target_count = u16::try_from(targets.len()).unwrap_or(u16::MAX);

        tracing::debug!(
            "{} uses {} on {} (nonce={}, targets={})",
            actor,
            skill,
            target,
            nonce,
            target_count
        );

        let mut report = ActionReport {
            actor,
            requested: skill,
            skill,
            redirected: false,
            targets: Vec::new(),
            events: Vec::new(),
        };

        for (index, candidate) in targets.iter().enumerate() {
            let action = ActionContext {
                primary_target: target,
                target_index: u16::try_from(index).unwrap_or(u16::MAX),
                target_count,
                nonce,
            };
            let request = ResolutionRequest::new(
                source,
                *candidate,
                skill,
                self.rng.as_ref(),
                self.game_seed,
            )
            .with_action(action);

            match resolve(&self.skills, request) {
                ResolutionOutcome::Executed(resolution) if action.is_primary() => {
                    if resolution.redirected {
                        tracing::warn!(
                            "{} switched {} to {} on {}",
                            actor,
                            skill,
                            resolution.skill,
                            resolution.target
                        );
                    }
                    report.skill = resolution.skill;
                    report.redirected = resolution.redirected;
                    report.targets.push(resolution.target);
                    report.events.extend(resolution.events);

                    // A switch replaces the whole action
                    if report.redirected {
                        break;
                    }
                }
                ResolutionOutcome::Executed(resolution) => {
                    if resolution.redirected {
                        tracing::debug!(
                            "Dropping redirected secondary resolution on {}",
                            candidate.id
                        );
                        continue;
                    }
                    report.targets.push(resolution.target);
                    report.events.extend(resolution.events);
                }
                ResolutionOutcome::Rejected { skill, reason } if action.is_primary() => {
                    tracing::warn!("{} could not use {}: {}", actor, skill, reason);
                    return Err(RuntimeError::Rejected { skill, reason });
                }
                ResolutionOutcome::Rejected { reason, .. } => {
                    tracing::debug!("Secondary target {} skipped: {}", candidate.id, reason);
                }
            }
        }

        Ok(report)
    }

    /// Picks a skill for `actor` against `target` from its kit.
    pub fn decide(&self, actor: EntityId, target: EntityId) -> Result<Option<Selection>> {
        let combatant = self
            .roster
            .get(actor)
            .ok_or(RuntimeError::UnknownActor(actor))?;
        let target_state = self
            .roster
            .state(target)
            .ok_or(RuntimeError::UnknownActor(target))?;

        Ok(self.selector.select(
            &self.skills,
            &self.heuristics,
            &combatant.state,
            target_state,
            &combatant.kit,
        ))
    }

    /// One AI decision tick: select and execute. `None` when the actor idles.
    pub fn take_turn(&mut self, actor: EntityId, target: EntityId) -> Result<Option<ActionReport>> {
        if self
            .roster
            .state(actor)
            .is_some_and(|state| state.is_defeated())
        {
            return Ok(None);
        }
        match self.decide(actor, target)? {
            Some(selection) => self.execute(actor, selection.skill, target).map(Some),
            None => Ok(None),
        }
    }

    /// Advances status timers; returns the expirations already applied.
    pub fn tick(&mut self, seconds: u32) -> Vec<CombatEvent> {
        let expired = self.roster.tick(seconds);
        for event in &expired {
            tracing::debug!("Status expired: {:?}", event);
        }
        expired
    }
}
