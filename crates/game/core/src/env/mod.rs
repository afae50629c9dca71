//! Injected environment oracles.
//!
//! The engine reads nothing ambient: the only environment it consumes is the
//! random source, passed in explicitly per action.
mod rng;

pub use rng::{FixedRng, PcgRng, RngOracle, compute_seed};
