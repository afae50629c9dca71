//! Actors taking part in combat.

use std::collections::BTreeMap;

use combat_core::{ActorState, ActorView, CombatEvent, EntityId, SkillId, apply_event};

use crate::error::{Result, RuntimeError};

/// One roster entry: live state plus the skills the actor may use.
#[derive(Clone, Debug, PartialEq)]
pub struct Combatant {
    pub state: ActorState,
    pub kit: Vec<SkillId>,
}

impl Combatant {
    pub fn new(state: ActorState, kit: impl IntoIterator<Item = SkillId>) -> Self {
        Self {
            state,
            kit: kit.into_iter().collect(),
        }
    }
}

/// Roster keyed by entity id. Iteration is in id order.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    actors: BTreeMap<EntityId, Combatant>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an actor.
    ///
    /// # Errors
    ///
    /// [`RuntimeError::DuplicateActor`] if the id is taken.
    pub fn insert(&mut self, combatant: Combatant) -> Result<EntityId> {
        let id = combatant.state.id;
        if self.actors.contains_key(&id) {
            return Err(RuntimeError::DuplicateActor(id));
        }
        self.actors.insert(id, combatant);
        Ok(id)
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Combatant> {
        self.actors.remove(&id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Combatant> {
        self.actors.get(&id)
    }

    pub fn state(&self, id: EntityId) -> Option<&ActorState> {
        self.actors.get(&id).map(|combatant| &combatant.state)
    }

    pub fn state_mut(&mut self, id: EntityId) -> Option<&mut ActorState> {
        self.actors.get_mut(&id).map(|combatant| &mut combatant.state)
    }

    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.actors.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Combatant> {
        self.actors.values()
    }

    /// Actors that have not been defeated.
    pub fn alive(&self) -> impl Iterator<Item = &ActorState> {
        self.actors
            .values()
            .map(|combatant| &combatant.state)
            .filter(|state| !state.is_defeated())
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Applies events in order. Events addressed to actors not on the
    /// roster are skipped. Returns how many were applied.
    pub fn apply(&mut self, events: &[CombatEvent]) -> usize {
        let mut applied = 0;
        for event in events {
            let Some(state) = self.state_mut(event.target()) else {
                tracing::debug!("Skipping event for absent actor {}", event.target());
                continue;
            };
            if apply_event(event, state) {
                applied += 1;
            }
        }
        applied
    }

    /// Advances every status timer by `seconds` and returns the expirations.
    pub fn tick(&mut self, seconds: u32) -> Vec<CombatEvent> {
        let mut expired = Vec::new();
        for (id, combatant) in &mut self.actors {
            for kind in combatant.state.status_effects.tick(seconds) {
                expired.push(CombatEvent::StatusExpired { target: *id, kind });
            }
        }
        expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{CombatStats, DamageKind, ResourceKind, StatusEffectKind, StatusInstance};

    fn actor(id: u32) -> Combatant {
        Combatant::new(ActorState::new(EntityId(id), CombatStats::new(), 100, 50), [])
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut roster = Roster::new();
        roster.insert(actor(1)).unwrap();
        assert!(matches!(
            roster.insert(actor(1)),
            Err(RuntimeError::DuplicateActor(EntityId(1)))
        ));
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn apply_routes_events_to_their_targets() {
        let mut roster = Roster::new();
        roster.insert(actor(1)).unwrap();
        roster.insert(actor(2)).unwrap();

        let applied = roster.apply(&[
            CombatEvent::Damage {
                source: EntityId(1),
                target: EntityId(2),
                kind: DamageKind::Physical,
                hits: vec![30, 10],
            },
            CombatEvent::Damage {
                source: EntityId(1),
                target: EntityId(9),
                kind: DamageKind::Physical,
                hits: vec![30],
            },
        ]);

        assert_eq!(applied, 1);
        assert_eq!(roster.state(EntityId(2)).unwrap().resource(ResourceKind::Hp), 60);
        assert_eq!(roster.state(EntityId(1)).unwrap().resource(ResourceKind::Hp), 100);
    }

    #[test]
    fn tick_reports_expirations() {
        let mut roster = Roster::new();
        roster.insert(actor(1)).unwrap();
        let state = roster.state_mut(EntityId(1)).unwrap();
        state
            .status_effects
            .insert(StatusInstance::new(StatusEffectKind::Poison, EntityId(2), 3));
        state
            .status_effects
            .insert(StatusInstance::new(StatusEffectKind::Protect, EntityId(1), 60));

        assert!(roster.tick(2).is_empty());
        assert_eq!(
            roster.tick(1),
            vec![CombatEvent::StatusExpired {
                target: EntityId(1),
                kind: StatusEffectKind::Poison
            }]
        );
        assert_eq!(roster.state(EntityId(1)).unwrap().status_effects.len(), 1);
    }
}
