//! Status effect store for actors.
//!
//! Each actor owns a [`StatusEffects`] store holding at most one
//! [`StatusInstance`] per [`StatusEffectKind`]. Instances are created by the
//! effect descriptors (which decorate potency/counter exactly once) and are
//! only ever mutated through the store's entry points.

use arrayvec::ArrayVec;

use crate::config::CombatConfig;
use crate::state::EntityId;

/// Types of status effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusEffectKind {
    // ========================================================================
    // Debuffs
    // ========================================================================
    Poison,
    Bio,
    Dia,
    Slow,
    Paralysis,
    Blind,
    Silence,
    Sleep,
    Petrification,
    Stun,
    Bind,
    Weight,
    Plague,
    Amnesia,
    Terror,
    Doom,
    AttackDown,
    DefenseDown,
    MagicDefenseDown,

    // ========================================================================
    // Buffs
    // ========================================================================
    Protect,
    Shell,
    Haste,
    Regen,
    Refresh,
    Blink,
    Stoneskin,
    AttackBoost,
    DefenseBoost,
    MagicAttackBoost,
}

impl StatusEffectKind {
    /// Returns true for harmful effects.
    pub const fn is_debuff(self) -> bool {
        !self.is_buff()
    }

    /// Returns true for beneficial effects.
    pub const fn is_buff(self) -> bool {
        matches!(
            self,
            Self::Protect
                | Self::Shell
                | Self::Haste
                | Self::Regen
                | Self::Refresh
                | Self::Blink
                | Self::Stoneskin
                | Self::AttackBoost
                | Self::DefenseBoost
                | Self::MagicAttackBoost
        )
    }

    /// Returns true if dispel-type skills may remove this effect.
    ///
    /// Dispels strip beneficial effects only. Debuffs are removed by
    /// dedicated cures.
    pub const fn is_dispellable(self) -> bool {
        self.is_buff()
    }
}

/// A live status effect on an actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusInstance {
    pub kind: StatusEffectKind,
    /// Actor that granted the effect.
    pub source: EntityId,
    /// Primary magnitude (tick damage, stat delta, ...).
    pub potency: i32,
    /// Secondary magnitude (e.g. proc chance of a paralysis).
    pub secondary_potency: i32,
    /// Free counter (shadow count for Blink, stacks, ...).
    pub counter: u32,
    /// Remaining duration in seconds.
    pub remaining: u32,
    /// Duration the instance was granted with.
    pub duration: u32,
    /// Potency right after decoration; used to detect decay.
    pub granted_potency: i32,
    /// Grant order within the owning store (higher = more recent).
    pub sequence: u32,
}

impl StatusInstance {
    /// Creates an undecorated instance.
    pub fn new(kind: StatusEffectKind, source: EntityId, duration: u32) -> Self {
        Self {
            kind,
            source,
            potency: 0,
            secondary_potency: 0,
            counter: 0,
            remaining: duration,
            duration,
            granted_potency: 0,
            sequence: 0,
        }
    }

    /// Copy of this instance attributed to another source.
    pub fn with_source(mut self, source: EntityId) -> Self {
        self.source = source;
        self
    }

    /// Returns true while the instance is at full strength.
    ///
    /// An instance is diminished once its potency decays below what it was
    /// granted with, or once less than a quarter of its duration remains.
    pub fn is_undiminished(&self) -> bool {
        let potency_intact = self.potency.abs() >= self.granted_potency.abs();
        let duration_intact = self.remaining.saturating_mul(4) >= self.duration;
        potency_intact && duration_intact
    }
}

/// Active status effects on an actor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusInstance, { CombatConfig::MAX_STATUS_EFFECTS }>,
    next_sequence: u32,
}

impl StatusEffects {
    /// Creates an empty status effect store.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Checks if a specific status effect is active.
    pub fn has(&self, kind: StatusEffectKind) -> bool {
        self.get(kind).is_some()
    }

    /// Returns the instance of a status effect, if active.
    pub fn get(&self, kind: StatusEffectKind) -> Option<&StatusInstance> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    /// Returns the mutable instance of a status effect, if active.
    pub fn get_mut(&mut self, kind: StatusEffectKind) -> Option<&mut StatusInstance> {
        self.effects.iter_mut().find(|e| e.kind == kind)
    }

    /// Inserts a freshly decorated instance, replacing any existing one.
    ///
    /// Returns false if the store is full.
    pub fn insert(&mut self, mut instance: StatusInstance) -> bool {
        self.remove(instance.kind);
        instance.sequence = self.next_sequence;
        if self.effects.try_push(instance).is_err() {
            return false;
        }
        self.next_sequence = self.next_sequence.wrapping_add(1);
        true
    }

    /// Extends an existing instance to at least `duration` seconds remaining.
    ///
    /// Potency, secondary potency and counter are left untouched.
    pub fn refresh(&mut self, kind: StatusEffectKind, duration: u32) -> bool {
        match self.get_mut(kind) {
            Some(existing) => {
                existing.remaining = existing.remaining.max(duration);
                existing.duration = existing.duration.max(duration);
                true
            }
            None => false,
        }
    }

    /// Removes a status effect immediately, returning it.
    pub fn remove(&mut self, kind: StatusEffectKind) -> Option<StatusInstance> {
        let index = self.effects.iter().position(|e| e.kind == kind)?;
        Some(self.effects.remove(index))
    }

    /// Removes every status effect.
    pub fn clear(&mut self) {
        self.effects.clear();
    }

    /// Advances every effect by `seconds`, removing and returning the ones
    /// that ran out.
    pub fn tick(&mut self, seconds: u32) -> Vec<StatusEffectKind> {
        let mut expired = Vec::new();
        for effect in self.effects.iter_mut() {
            effect.remaining = effect.remaining.saturating_sub(seconds);
            if effect.remaining == 0 {
                expired.push(effect.kind);
            }
        }
        self.effects.retain(|e| e.remaining > 0);
        expired
    }

    /// Returns an iterator over all active effects.
    pub fn iter(&self) -> impl Iterator<Item = &StatusInstance> {
        self.effects.iter()
    }

    /// Active debuffs, most recently granted first.
    pub fn debuffs_newest_first(&self) -> Vec<&StatusInstance> {
        let mut debuffs: Vec<_> = self.effects.iter().filter(|e| e.kind.is_debuff()).collect();
        debuffs.sort_by(|a, b| b.sequence.cmp(&a.sequence));
        debuffs
    }

    /// Dispellable effects, most recently granted first.
    pub fn dispellable_newest_first(&self) -> Vec<&StatusInstance> {
        let mut matching: Vec<_> = self
            .effects
            .iter()
            .filter(|e| e.kind.is_dispellable())
            .collect();
        matching.sort_by(|a, b| b.sequence.cmp(&a.sequence));
        matching
    }

    /// Returns true if no status effects are active.
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance(kind: StatusEffectKind, duration: u32, potency: i32) -> StatusInstance {
        let mut instance = StatusInstance::new(kind, EntityId(9), duration);
        instance.potency = potency;
        instance.granted_potency = potency;
        instance
    }

    #[test]
    fn refresh_keeps_potency() {
        let mut store = StatusEffects::empty();
        store.insert(instance(StatusEffectKind::Bio, 30, 12));

        assert!(store.refresh(StatusEffectKind::Bio, 60));
        let bio = store.get(StatusEffectKind::Bio).unwrap();
        assert_eq!(bio.remaining, 60);
        assert_eq!(bio.potency, 12);
    }

    #[test]
    fn tick_expires_finished_effects() {
        let mut store = StatusEffects::empty();
        store.insert(instance(StatusEffectKind::Poison, 5, 3));
        store.insert(instance(StatusEffectKind::Protect, 50, 20));

        let expired = store.tick(5);
        assert_eq!(expired, vec![StatusEffectKind::Poison]);
        assert!(store.has(StatusEffectKind::Protect));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn diminished_after_decay_or_low_duration() {
        let mut regen = instance(StatusEffectKind::Regen, 100, 10);
        assert!(regen.is_undiminished());

        regen.remaining = 20;
        assert!(!regen.is_undiminished());

        let mut stoneskin = instance(StatusEffectKind::Stoneskin, 100, 300);
        stoneskin.potency = 120;
        assert!(!stoneskin.is_undiminished());
    }

    #[test]
    fn debuffs_ordered_by_recency() {
        let mut store = StatusEffects::empty();
        store.insert(instance(StatusEffectKind::Slow, 60, 1));
        store.insert(instance(StatusEffectKind::Haste, 60, 1));
        store.insert(instance(StatusEffectKind::Blind, 60, 1));

        let kinds: Vec<_> = store.debuffs_newest_first().iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![StatusEffectKind::Blind, StatusEffectKind::Slow]);
    }
}
