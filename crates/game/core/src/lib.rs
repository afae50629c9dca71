//! Deterministic combat skill resolution engine.
//!
//! `combat-core` interprets declared skills (abilities, spells, monster
//! skills) into concrete combat events and exposes the scoring interface AI
//! actors use to pick a skill. It owns no actors and performs no I/O: callers
//! read state through [`ActorView`], resolve with [`evaluate::resolve`], and
//! apply the returned [`CombatEvent`]s through [`apply_event`].
//!
//! Registries ([`SkillRegistry`], [`HeuristicRegistry`]) are built once at
//! startup, validated, and immutable afterwards.
pub mod combat;
pub mod config;
pub mod effect;
pub mod env;
pub mod error;
pub mod evaluate;
pub mod event;
pub mod heuristic;
pub mod monster;
pub mod skill;
pub mod state;
pub mod stats;

pub use combat::{DamageOutcome, DamageSpec, TpScaling};
pub use config::CombatConfig;
pub use effect::{Absorption, EffectBundle, EffectDescriptor, EffectFlags};
pub use env::{FixedRng, PcgRng, RngOracle, compute_seed};
pub use error::{ConfigError, ErrorSeverity, GameError, SkillFailure};
pub use evaluate::{
    ActionContext, PostEvaluation, Resolution, ResolutionContext, ResolutionOutcome,
    ResolutionRequest, RollTag, TargetEvaluator, ValidEvaluator, resolve,
};
pub use event::{CombatEvent, DamageKind, apply_event};
pub use heuristic::{Heuristic, HeuristicRegistry, Score, Subject};
pub use monster::{AggroRule, HpCurve, LookRef, LookTable, MonsterFamily, MonsterStats, StatScaling};
pub use skill::{
    AreaShape, RangeInfo, ResourceCost, SkillBehavior, SkillChain, SkillId, SkillMetadata,
    SkillNamespace, SkillRegistry, SkillRegistryBuilder, SwitchResolver, SwitchSkill,
    SwitchTarget,
};
pub use state::{
    ActorMut, ActorState, ActorView, EntityId, Position, StatusEffectKind, StatusEffects,
    StatusInstance,
};
pub use stats::{CombatStats, ResourceKind, ResourcePools, StatKind, StatPair};
