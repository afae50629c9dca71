//! Skill metadata - the immutable, declarative half of a skill.
//!
//! Metadata is registered once at startup next to the skill's evaluator and is
//! read-only afterwards. Cast and recast times are scheduling information for
//! the external scheduler; the engine never waits on them.

use core::time::Duration;

use crate::state::{ActorView, angle_between, targeting_distance};
use crate::stats::ResourceKind;

/// Resource cost for a skill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceCost {
    pub resource: ResourceKind,
    pub amount: u32,
    /// Spend the whole pool instead of `amount` (e.g. TP-dumping skills).
    #[cfg_attr(feature = "serde", serde(default))]
    pub consumes_all: bool,
}

impl ResourceCost {
    pub const FREE: Self = Self {
        resource: ResourceKind::Mp,
        amount: 0,
        consumes_all: false,
    };

    pub const fn mp(amount: u32) -> Self {
        Self {
            resource: ResourceKind::Mp,
            amount,
            consumes_all: false,
        }
    }

    pub const fn tp(amount: u32) -> Self {
        Self {
            resource: ResourceKind::Tp,
            amount,
            consumes_all: false,
        }
    }

    pub const fn hp(amount: u32) -> Self {
        Self {
            resource: ResourceKind::Hp,
            amount,
            consumes_all: false,
        }
    }

    /// Builder: spend the whole pool.
    pub const fn all(mut self) -> Self {
        self.consumes_all = true;
        self
    }

    /// Amount actually spent by `source` when the skill resolves.
    pub fn spent_by(&self, source: &dyn ActorView) -> u32 {
        let current = source.resource(self.resource);
        if self.consumes_all {
            current
        } else {
            self.amount.min(current)
        }
    }

    /// Returns true if `source` can pay this cost.
    pub fn affordable_by(&self, source: &dyn ActorView) -> bool {
        source.resource(self.resource) >= self.amount
    }
}

/// Geometric kind of the area a skill affects.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AreaShape {
    /// Only the primary target.
    SingleTarget,
    /// Circle of `effect_radius` around the source.
    SourceCentered,
    /// Cone of `half_angle` degrees and `effect_radius` length from the source.
    Cone { half_angle: f32 },
    /// Circle of `effect_radius` around a fixed point (the primary target).
    FixedArea,
}

/// Range and shape descriptor.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangeInfo {
    /// Maximum targeting distance. Zero or less means unlimited.
    pub max_distance: f32,
    pub effect_radius: f32,
    pub shape: AreaShape,
    /// Area is anchored to the primary target rather than the source.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tracks_target: bool,
    /// Cone direction follows the source's facing instead of the target.
    #[cfg_attr(feature = "serde", serde(default))]
    pub fixed_rotation: bool,
}

impl RangeInfo {
    pub const NONE: Self = Self {
        max_distance: 0.0,
        effect_radius: 0.0,
        shape: AreaShape::SingleTarget,
        tracks_target: false,
        fixed_rotation: false,
    };

    pub const fn single(max_distance: f32) -> Self {
        Self {
            max_distance,
            ..Self::NONE
        }
    }

    pub const fn source_centered(radius: f32) -> Self {
        Self {
            max_distance: radius,
            effect_radius: radius,
            shape: AreaShape::SourceCentered,
            tracks_target: false,
            fixed_rotation: false,
        }
    }

    pub const fn cone(length: f32, half_angle: f32) -> Self {
        Self {
            max_distance: length,
            effect_radius: length,
            shape: AreaShape::Cone { half_angle },
            tracks_target: false,
            fixed_rotation: false,
        }
    }

    pub const fn area(max_distance: f32, radius: f32) -> Self {
        Self {
            max_distance,
            effect_radius: radius,
            shape: AreaShape::FixedArea,
            tracks_target: true,
            fixed_rotation: false,
        }
    }

    /// Returns true if `target` is within targeting distance of `source`.
    pub fn in_range(&self, source: &dyn ActorView, target: &dyn ActorView) -> bool {
        self.max_distance <= 0.0 || targeting_distance(source, target) <= self.max_distance
    }

    /// Returns true if `candidate` falls inside the area of a skill used by
    /// `source` on `primary`.
    pub fn covers(
        &self,
        source: &dyn ActorView,
        primary: &dyn ActorView,
        candidate: &dyn ActorView,
    ) -> bool {
        match self.shape {
            AreaShape::SingleTarget => candidate.id() == primary.id(),
            AreaShape::SourceCentered => {
                targeting_distance(source, candidate) <= self.effect_radius
            }
            AreaShape::Cone { half_angle } => {
                if candidate.id() == primary.id() {
                    return true;
                }
                if targeting_distance(source, candidate) > self.effect_radius {
                    return false;
                }
                let direction = if self.fixed_rotation {
                    source.facing()
                } else {
                    source.position().heading_to(primary.position())
                };
                let heading = source.position().heading_to(candidate.position());
                angle_between(direction, heading) <= half_angle
            }
            AreaShape::FixedArea => {
                let center = if self.tracks_target {
                    primary.position()
                } else {
                    source.position()
                };
                let edge = center.distance(candidate.position()) - candidate.targeting_size();
                edge <= self.effect_radius
            }
        }
    }
}

/// Skill-chain attributes enabling combo bonuses with subsequent skills.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillChain {
    Compression,
    Liquefaction,
    Induration,
    Reverberation,
    Transfixion,
    Scission,
    Detonation,
    Impaction,
    Gravitation,
    Distortion,
    Fusion,
    Fragmentation,
    Light,
    Darkness,
}

/// Complete declarative record for a skill.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillMetadata {
    pub cost: ResourceCost,
    pub cast_time: Duration,
    pub recast: Duration,
    pub range: RangeInfo,
    #[cfg_attr(feature = "serde", serde(default))]
    pub chain: Vec<SkillChain>,
    /// Overrides how long the source is locked in place after use.
    #[cfg_attr(feature = "serde", serde(default))]
    pub movement_lock: Option<Duration>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
}

impl SkillMetadata {
    /// Metadata reported for ids that were never declared.
    ///
    /// Zero cost, instant cast, two-second recast, single target with no
    /// range limit.
    pub const NEUTRAL: Self = Self {
        cost: ResourceCost::FREE,
        cast_time: Duration::ZERO,
        recast: Duration::from_secs(2),
        range: RangeInfo::NONE,
        chain: Vec::new(),
        movement_lock: None,
        description: String::new(),
    };

    /// Starts from the neutral record with a given cost and range.
    pub fn new(cost: ResourceCost, range: RangeInfo) -> Self {
        Self {
            cost,
            range,
            ..Self::NEUTRAL
        }
    }

    /// Builder: set cast time.
    pub fn cast(mut self, cast_time: Duration) -> Self {
        self.cast_time = cast_time;
        self
    }

    /// Builder: set recast time.
    pub fn recast(mut self, recast: Duration) -> Self {
        self.recast = recast;
        self
    }

    /// Builder: add skill-chain attributes.
    pub fn chain(mut self, chain: impl IntoIterator<Item = SkillChain>) -> Self {
        self.chain.extend(chain);
        self
    }

    /// Builder: override movement lock.
    pub fn movement_lock(mut self, lock: Duration) -> Self {
        self.movement_lock = Some(lock);
        self
    }

    /// Builder: set description.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl Default for SkillMetadata {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ActorState, EntityId, Position};
    use crate::stats::CombatStats;

    fn actor(id: u32, x: f32, y: f32) -> ActorState {
        ActorState::new(EntityId(id), CombatStats::new(), 100, 0).at(Position::new(x, y))
    }

    #[test]
    fn consumes_all_spends_whole_pool() {
        let source = actor(1, 0.0, 0.0).with_tp(1700);
        assert_eq!(ResourceCost::tp(1000).spent_by(&source), 1000);
        assert_eq!(ResourceCost::tp(1000).all().spent_by(&source), 1700);
    }

    #[test]
    fn cone_covers_only_front_arc() {
        let source = actor(1, 0.0, 0.0);
        let primary = actor(2, 5.0, 0.0);
        let beside = actor(3, 4.0, 1.0);
        let behind = actor(4, -4.0, 0.0);
        let range = RangeInfo::cone(10.0, 45.0);

        assert!(range.covers(&source, &primary, &primary));
        assert!(range.covers(&source, &primary, &beside));
        assert!(!range.covers(&source, &primary, &behind));
    }

    #[test]
    fn fixed_area_centers_on_primary() {
        let source = actor(1, 0.0, 0.0);
        let primary = actor(2, 10.0, 0.0);
        let near_primary = actor(3, 12.0, 0.0);
        let near_source = actor(4, 1.0, 0.0);
        let range = RangeInfo::area(20.0, 5.0);

        assert!(range.covers(&source, &primary, &near_primary));
        assert!(!range.covers(&source, &primary, &near_source));
    }

    #[test]
    fn neutral_metadata_is_free() {
        let neutral = SkillMetadata::NEUTRAL;
        assert_eq!(neutral.cost.amount, 0);
        assert_eq!(neutral.range.shape, AreaShape::SingleTarget);
        assert!(neutral.recast <= Duration::from_secs(2));
    }
}
