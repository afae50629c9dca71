//! Damage calculators.
//!
//! Pure functions computing per-hit damage from attacker/defender stats and a
//! potency formula. They never fail; eligibility is filtered upstream by the
//! skill's valid evaluator.

mod damage;

pub use damage::{
    DamageOutcome, DamageSpec, TpScaling, excess_tp_units, hit_potencies, magical_damage,
    physical_damage,
};
