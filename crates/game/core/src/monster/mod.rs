//! Monster family templates.
//!
//! A family declares stat-scaling percentages, a default skill kit, an aggro
//! rule and behavior/model hooks. Combined with a hand-authored [`HpCurve`]
//! it yields the base stats of a concrete monster at any level the curve
//! covers.

mod curve;
mod family;

pub use curve::{HpCurve, LookRef, LookTable};
pub use family::{AggroRule, MonsterFamily, MonsterStats, StatScaling};
