/// Engine configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Fixed seed for the process-wide generator.
    ///
    /// `None` draws a fresh seed at startup. Tests and replays pin it.
    pub seed: Option<u64>,

    /// Minimum score a skill needs before the AI will consider executing it.
    pub eligibility_floor: u32,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_STATUS_EFFECTS: usize = 32;

    // ===== balance constants =====
    /// Maximum TP an actor can bank.
    pub const MAX_TP: u32 = 3000;
    /// Excess-TP normalization unit for skills that declare no TP amount.
    pub const TP_SCALING_UNIT: u32 = 1000;
    /// TP reported per hit that deals non-zero damage.
    pub const TP_PER_HIT: u32 = 10;
    /// Potency of every hit after the first on non-spread multi-hit skills.
    pub const FLAT_HIT_POTENCY: f32 = 1.0;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ELIGIBILITY_FLOOR: u32 = 1;

    pub fn new() -> Self {
        Self {
            seed: None,
            eligibility_floor: Self::DEFAULT_ELIGIBILITY_FLOOR,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::new()
        }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
