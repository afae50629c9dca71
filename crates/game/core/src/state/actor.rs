//! Actor state accessor.
//!
//! The engine never owns actors. It reads them through [`ActorView`] while
//! evaluating, and the caller applies the resulting events through
//! [`ActorMut`]. [`ActorState`] is the reference implementation used by the
//! runtime roster and by tests.

use crate::state::{EntityId, Position, StatusEffects, angle_between};
use crate::stats::{CombatStats, ResourceKind, ResourcePools, StatKind};

/// Read access to an actor's combat state.
pub trait ActorView {
    fn id(&self) -> EntityId;

    /// Reads a combat stat by key.
    fn stat(&self, stat: StatKind) -> i32;

    /// Current value of a resource pool.
    fn resource(&self, kind: ResourceKind) -> u32;

    /// Maximum value of a resource pool.
    fn resource_max(&self, kind: ResourceKind) -> u32;

    fn status_effects(&self) -> &StatusEffects;

    fn position(&self) -> Position;

    /// Facing heading in radians.
    fn facing(&self) -> f32;

    /// Model radius added to center distance for targeting purposes.
    fn targeting_size(&self) -> f32 {
        0.0
    }

    /// Appearance/state flag (e.g. a monster's current form).
    fn appearance(&self) -> u8 {
        0
    }

    fn is_defeated(&self) -> bool {
        self.resource(ResourceKind::Hp) == 0
    }

    /// Current value of a pool as a percentage of its maximum.
    fn resource_percent(&self, kind: ResourceKind) -> u32 {
        let max = self.resource_max(kind);
        if max == 0 {
            return 0;
        }
        ((self.resource(kind) as u64 * 100) / max as u64) as u32
    }
}

/// Mutation entry points, used only when applying events.
pub trait ActorMut: ActorView {
    fn set_resource(&mut self, kind: ResourceKind, value: u32);

    fn status_effects_mut(&mut self) -> &mut StatusEffects;

    fn set_position(&mut self, position: Position);
}

/// Distance between two actors' edges (center distance minus both sizes).
pub fn targeting_distance(a: &dyn ActorView, b: &dyn ActorView) -> f32 {
    let center = a.position().distance(b.position());
    (center - a.targeting_size() - b.targeting_size()).max(0.0)
}

/// Returns true if `observer` faces `subject` within `half_angle_degrees`.
pub fn is_facing(
    observer: &dyn ActorView,
    subject: &dyn ActorView,
    half_angle_degrees: f32,
) -> bool {
    if observer.position() == subject.position() {
        return true;
    }
    let heading = observer.position().heading_to(subject.position());
    angle_between(observer.facing(), heading) <= half_angle_degrees
}

// ============================================================================
// Reference Implementation
// ============================================================================

/// Concrete actor state.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorState {
    pub id: EntityId,
    pub stats: CombatStats,
    pub resources: ResourcePools,
    pub status_effects: StatusEffects,
    pub position: Position,
    pub facing: f32,
    pub size: f32,
    pub appearance: u8,
}

impl ActorState {
    /// Creates an actor with full HP/MP pools at the origin.
    pub fn new(id: EntityId, stats: CombatStats, hp_max: u32, mp_max: u32) -> Self {
        Self {
            id,
            stats,
            resources: ResourcePools::full(hp_max, mp_max),
            status_effects: StatusEffects::empty(),
            position: Position::ORIGIN,
            facing: 0.0,
            size: 0.0,
            appearance: 0,
        }
    }

    /// Builder: set position.
    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Builder: set facing (radians).
    pub fn with_facing(mut self, facing: f32) -> Self {
        self.facing = facing;
        self
    }

    /// Builder: face towards a position.
    pub fn facing_towards(mut self, target: Position) -> Self {
        self.facing = self.position.heading_to(target);
        self
    }

    /// Builder: set banked TP.
    pub fn with_tp(mut self, tp: u32) -> Self {
        self.resources.set(ResourceKind::Tp, tp);
        self
    }

    /// Builder: set current HP.
    pub fn with_hp(mut self, hp: u32) -> Self {
        self.resources.set(ResourceKind::Hp, hp);
        self
    }

    /// Builder: set appearance flag.
    pub fn with_appearance(mut self, appearance: u8) -> Self {
        self.appearance = appearance;
        self
    }
}

impl ActorView for ActorState {
    fn id(&self) -> EntityId {
        self.id
    }

    fn stat(&self, stat: StatKind) -> i32 {
        self.stats.get(stat)
    }

    fn resource(&self, kind: ResourceKind) -> u32 {
        self.resources.get(kind)
    }

    fn resource_max(&self, kind: ResourceKind) -> u32 {
        self.resources.max(kind)
    }

    fn status_effects(&self) -> &StatusEffects {
        &self.status_effects
    }

    fn position(&self) -> Position {
        self.position
    }

    fn facing(&self) -> f32 {
        self.facing
    }

    fn targeting_size(&self) -> f32 {
        self.size
    }

    fn appearance(&self) -> u8 {
        self.appearance
    }
}

impl ActorMut for ActorState {
    fn set_resource(&mut self, kind: ResourceKind, value: u32) {
        self.resources.set(kind, value);
    }

    fn status_effects_mut(&mut self) -> &mut StatusEffects {
        &mut self.status_effects
    }

    fn set_position(&mut self, position: Position) {
        self.position = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facing_checks_half_angle() {
        let source = ActorState::new(EntityId(1), CombatStats::new(), 10, 0);
        let target = ActorState::new(EntityId(2), CombatStats::new(), 10, 0)
            .at(Position::new(5.0, 0.0))
            .with_facing(std::f32::consts::PI);

        assert!(is_facing(&target, &source, 90.0));

        let turned = target.clone().with_facing(0.0);
        assert!(!is_facing(&turned, &source, 90.0));
    }

    #[test]
    fn targeting_distance_subtracts_sizes() {
        let mut a = ActorState::new(EntityId(1), CombatStats::new(), 10, 0);
        a.size = 1.0;
        let mut b =
            ActorState::new(EntityId(2), CombatStats::new(), 10, 0).at(Position::new(5.0, 0.0));
        b.size = 1.5;

        assert!((targeting_distance(&a, &b) - 2.5).abs() < 0.001);
    }
}
