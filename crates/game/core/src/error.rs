//! Common error infrastructure for combat-core.
//!
//! Two very different failure classes exist in the engine:
//!
//! - **Configuration errors** ([`ConfigError`]) are raised while content is
//!   registered at startup. They are fatal: the system never runs partially
//!   configured.
//! - **Skill failures** ([`SkillFailure`]) are transient, expected outcomes of
//!   a validity check (wrong equipment state, unmet precondition). They abort
//!   one action without events or resource consumption.
//!
//! Degenerate combat states (defeated target, empty effect list) are not
//! errors at all; they resolve to an empty event sequence.

use crate::skill::SkillId;

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - the actor may pick another action.
    ///
    /// Examples: required equipment state missing, target not in view
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: skill not registered
    Validation,

    /// Fatal error - content is misconfigured, the system cannot start.
    ///
    /// Examples: missing evaluator, missing HP-curve entry
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all combat-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Startup-time content validation failures.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A skill id was declared (or referenced) but never given an evaluator.
    #[error("skill {0} has no target evaluator")]
    MissingEvaluator(SkillId),

    /// A switch resolver names a replacement that has no evaluator.
    #[error("skill {skill} may switch to {replacement}, which has no target evaluator")]
    MissingSwitchTarget { skill: SkillId, replacement: SkillId },

    /// A monster family references a skill that is not registered.
    #[error("monster family '{family}' references unregistered skill {skill}")]
    UnknownKitSkill { family: String, skill: SkillId },

    /// A level in use has no entry in the HP curve.
    #[error("HP curve has no entry for level {0}")]
    MissingHpEntry(u8),

    /// HP curve entries must strictly increase with level.
    #[error("HP curve is not strictly increasing at level {level} ({hp} <= {previous})")]
    NonIncreasingHpCurve { level: u8, hp: u32, previous: u32 },

    /// The HP curve contains no entries.
    #[error("HP curve is empty")]
    EmptyHpCurve,

    /// A monster family references a model look that does not exist.
    #[error("monster family '{family}' references missing look '{look}' variant {variant}")]
    MissingLook {
        family: String,
        look: String,
        variant: u8,
    },

    /// A scaling percentage would produce a negative stat.
    #[error("monster family '{family}' has a negative scaling percentage")]
    NegativeScaling { family: String },

    /// Scaled HP does not strictly increase with level.
    #[error("monster family '{family}' has flat scaled HP at level {level}")]
    FlatScaledHp { family: String, level: u8 },
}

impl GameError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingEvaluator(_) => "CONFIG_MISSING_EVALUATOR",
            Self::MissingSwitchTarget { .. } => "CONFIG_MISSING_SWITCH_TARGET",
            Self::UnknownKitSkill { .. } => "CONFIG_UNKNOWN_KIT_SKILL",
            Self::MissingHpEntry(_) => "CONFIG_MISSING_HP_ENTRY",
            Self::NonIncreasingHpCurve { .. } => "CONFIG_NON_INCREASING_HP_CURVE",
            Self::EmptyHpCurve => "CONFIG_EMPTY_HP_CURVE",
            Self::MissingLook { .. } => "CONFIG_MISSING_LOOK",
            Self::NegativeScaling { .. } => "CONFIG_NEGATIVE_SCALING",
            Self::FlatScaledHp { .. } => "CONFIG_FLAT_SCALED_HP",
        }
    }
}

// ============================================================================
// Transient Skill Failures
// ============================================================================

/// Typed reason a skill could not be used right now.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillFailure {
    /// The skill id is not registered.
    #[error("skill is not registered")]
    UnknownSkill,

    /// Actor lacks the resource the skill costs.
    #[error("not enough {0}")]
    InsufficientResource(crate::stats::ResourceKind),

    /// Required equipment state is not met (e.g. weapon sheathed).
    #[error("required equipment state not met")]
    EquipmentState,

    /// The source is not in the appearance/state the skill requires.
    #[error("actor is not in the required state")]
    WrongState,

    /// Target is out of range.
    #[error("target out of range")]
    OutOfRange,

    /// Any other precondition, named by content.
    #[error("precondition not met: {0}")]
    Precondition(&'static str),
}

impl GameError for SkillFailure {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownSkill => ErrorSeverity::Validation,
            _ => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownSkill => "SKILL_UNKNOWN",
            Self::InsufficientResource(_) => "SKILL_INSUFFICIENT_RESOURCE",
            Self::EquipmentState => "SKILL_EQUIPMENT_STATE",
            Self::WrongState => "SKILL_WRONG_STATE",
            Self::OutOfRange => "SKILL_OUT_OF_RANGE",
            Self::Precondition(_) => "SKILL_PRECONDITION",
        }
    }
}
