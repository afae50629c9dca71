//! Unified error types surfaced by the combat runtime.
//!
//! Wraps roster lookups, skill rejections and content configuration
//! failures so callers can bubble them up with consistent context.

use combat_core::{ConfigError, EntityId, ErrorSeverity, GameError, SkillFailure, SkillId};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("actor {0} is not on the roster")]
    UnknownActor(EntityId),

    #[error("actor {0} is already on the roster")]
    DuplicateActor(EntityId),

    #[error("unknown monster family '{0}'")]
    UnknownFamily(String),

    #[error("{skill} was rejected")]
    Rejected {
        skill: SkillId,
        #[source]
        reason: SkillFailure,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to initialize logging: {0}")]
    Logging(String),
}

impl RuntimeError {
    /// The skill failure behind a rejection, if any.
    pub fn skill_failure(&self) -> Option<&SkillFailure> {
        match self {
            Self::Rejected { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Rejected { reason, .. } => reason.severity(),
            Self::UnknownActor(_) | Self::DuplicateActor(_) | Self::UnknownFamily(_) => {
                ErrorSeverity::Validation
            }
            Self::Config(_) | Self::Logging(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownActor(_) => "RUNTIME_UNKNOWN_ACTOR",
            Self::DuplicateActor(_) => "RUNTIME_DUPLICATE_ACTOR",
            Self::UnknownFamily(_) => "RUNTIME_UNKNOWN_FAMILY",
            Self::Rejected { reason, .. } => reason.error_code(),
            Self::Config(err) => err.error_code(),
            Self::Logging(_) => "RUNTIME_LOGGING",
        }
    }
}
