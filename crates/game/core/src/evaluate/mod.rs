//! Target evaluator pipeline.
//!
//! The composition unit turning "source used skill on target" into events:
//!
//! - [`ResolutionContext`]: the transient per-invocation value
//! - [`TargetEvaluator`]: context to ordered events, composed by concatenation
//! - [`ValidEvaluator`] / [`PostEvaluation`]: optional gate and epilogue
//! - stock evaluators for damage, healing, bundles and self-defeat
//! - [`resolve`]: the full stage order for one action

mod context;
mod evaluator;
mod pipeline;
mod stock;

pub use context::{ActionContext, ResolutionContext, RollTag};
pub use evaluator::{PostEvaluation, TargetEvaluator, ValidEvaluator};
pub use pipeline::{Resolution, ResolutionOutcome, ResolutionRequest, resolve};
pub use stock::{
    GAZE_HALF_ANGLE, absorb_damage, apply_bundle, defeat_self, grant_status, heal, magical_damage,
    physical_damage, transfer_debuffs,
};

/// Empty evaluator.
pub fn noop() -> TargetEvaluator {
    TargetEvaluator::noop()
}

/// Concatenates evaluators in declaration order.
pub fn compose(evaluators: impl IntoIterator<Item = TargetEvaluator>) -> TargetEvaluator {
    TargetEvaluator::compose(evaluators)
}
