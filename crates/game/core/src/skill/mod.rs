//! Skill identifiers, metadata, registry and switch resolvers.
//!
//! Three disjoint id namespaces (abilities, spells, monster skills) share one
//! registry and one resolution pipeline.

mod id;
mod metadata;
mod registry;
mod switch;

pub use id::{SkillId, SkillNamespace};
pub use metadata::{AreaShape, RangeInfo, ResourceCost, SkillChain, SkillMetadata};
pub use registry::{SkillBehavior, SkillEntry, SkillRegistry, SkillRegistryBuilder};
pub use switch::{SwitchResolver, SwitchSkill, SwitchTarget, backfire};
