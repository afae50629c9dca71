//! Effect descriptors and bundles.
//!
//! A descriptor declares one status attachment (kind, duration, trigger
//! chance, decorator). Bundles aggregate descriptors with knockback,
//! absorption, dispel count and flags. Expansion into events happens in
//! [`crate::evaluate::apply_bundle`].

mod bundle;
mod descriptor;

pub use bundle::{
    AbsorbAmount, Absorption, EffectBundle, EffectFlags, single_status, stacked_statuses,
};
pub use descriptor::{Decorator, EffectDescriptor, damage_over_time};
