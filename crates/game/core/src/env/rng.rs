//! RNG oracle for injectable random number generation.
//!
//! Randomness in the engine is confined to explicit probability checks
//! (status trigger chance, switch-skill backfire). Every check goes through
//! [`RngOracle`] with a seed derived from the action, so tests can pin the
//! outcome with a seeded [`PcgRng`] or a [`FixedRng`].

/// RNG oracle for seeded random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll a d100 (1-100 inclusive).
    fn roll_d100(&self, seed: u64) -> u32 {
        (self.next_u32(seed) % 100) + 1
    }

    /// Returns true with `chance_percent` probability.
    ///
    /// 0 never passes, 100 or more always passes.
    fn check(&self, seed: u64, chance_percent: u32) -> bool {
        match chance_percent {
            0 => false,
            100.. => true,
            chance => self.roll_d100(seed) <= chance,
        }
    }
}

/// PCG random number generator (PCG-XSH-RR, 64-bit state, 32-bit output).
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Oracle that always rolls the same d100 value.
///
/// `FixedRng(1)` passes every non-zero check; `FixedRng(100)` fails every
/// check below 100%.
#[derive(Clone, Copy, Debug)]
pub struct FixedRng(pub u32);

impl RngOracle for FixedRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        self.0.saturating_sub(1)
    }
}

/// Compute a seed from the process seed and action components.
///
/// # Context Values
///
/// Use different context values when one action needs several independent
/// rolls (see [`crate::evaluate::RollTag`]).
pub fn compute_seed(game_seed: u64, nonce: u64, actor_id: u32, context: u32) -> u64 {
    let mut hash = game_seed;

    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (actor_id as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}
