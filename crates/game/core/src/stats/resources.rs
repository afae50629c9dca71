//! Resource pools (HP, MP, TP).
//!
//! HP and MP have per-actor maximums; TP is capped globally at
//! [`CombatConfig::MAX_TP`].

use crate::config::CombatConfig;

/// Enum representing individual resource types.
///
/// Used in costs, absorption specs and events to reference specific pools.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceKind {
    /// Health points.
    Hp,
    /// Magic points.
    Mp,
    /// Technique points, banked by auto-attacks and spent by weapon skills.
    Tp,
}

/// Current and maximum values of every resource pool.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourcePools {
    pub hp: u32,
    pub hp_max: u32,
    pub mp: u32,
    pub mp_max: u32,
    pub tp: u32,
}

impl ResourcePools {
    /// Creates full pools with the given maximums and no TP.
    pub fn full(hp_max: u32, mp_max: u32) -> Self {
        Self {
            hp: hp_max,
            hp_max,
            mp: mp_max,
            mp_max,
            tp: 0,
        }
    }

    /// Get the current value for a specific resource.
    pub fn get(&self, resource: ResourceKind) -> u32 {
        match resource {
            ResourceKind::Hp => self.hp,
            ResourceKind::Mp => self.mp,
            ResourceKind::Tp => self.tp,
        }
    }

    /// Get the max value for a specific resource.
    pub fn max(&self, resource: ResourceKind) -> u32 {
        match resource {
            ResourceKind::Hp => self.hp_max,
            ResourceKind::Mp => self.mp_max,
            ResourceKind::Tp => CombatConfig::MAX_TP,
        }
    }

    /// Sets the current value, clamped to the pool maximum.
    pub fn set(&mut self, resource: ResourceKind, value: u32) {
        let value = value.min(self.max(resource));
        match resource {
            ResourceKind::Hp => self.hp = value,
            ResourceKind::Mp => self.mp = value,
            ResourceKind::Tp => self.tp = value,
        }
    }

    /// Current value as a percentage of the maximum (0-100).
    ///
    /// A pool with zero maximum reports 0.
    pub fn percent(&self, resource: ResourceKind) -> u32 {
        let max = self.max(resource);
        if max == 0 {
            return 0;
        }
        ((self.get(resource) as u64 * 100) / max as u64) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_clamps_to_maximum() {
        let mut pools = ResourcePools::full(100, 50);
        pools.set(ResourceKind::Hp, 500);
        pools.set(ResourceKind::Tp, 9999);

        assert_eq!(pools.hp, 100);
        assert_eq!(pools.tp, CombatConfig::MAX_TP);
    }

    #[test]
    fn percent_of_pool() {
        let mut pools = ResourcePools::full(200, 0);
        pools.set(ResourceKind::Hp, 50);

        assert_eq!(pools.percent(ResourceKind::Hp), 25);
        assert_eq!(pools.percent(ResourceKind::Mp), 0);
    }
}
