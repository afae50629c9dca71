//! Skill registry: skill id to metadata and behavior.
//!
//! Populated once at startup through [`SkillRegistryBuilder`], validated in
//! [`SkillRegistryBuilder::build`], immutable afterwards and shared behind an
//! `Arc`.

use std::collections::HashMap;

use crate::error::ConfigError;
use crate::evaluate::{PostEvaluation, TargetEvaluator, ValidEvaluator};
use crate::skill::{SkillId, SkillMetadata, SwitchResolver};

static NEUTRAL_METADATA: SkillMetadata = SkillMetadata::NEUTRAL;

/// Executable half of a skill.
#[derive(Clone, Debug)]
pub struct SkillBehavior {
    pub evaluator: TargetEvaluator,
    pub valid: Option<ValidEvaluator>,
    pub self_evaluator: Option<TargetEvaluator>,
    pub post: Option<PostEvaluation>,
    pub switch: Option<SwitchResolver>,
}

impl SkillBehavior {
    pub fn new(evaluator: TargetEvaluator) -> Self {
        Self {
            evaluator,
            valid: None,
            self_evaluator: None,
            post: None,
            switch: None,
        }
    }

    /// Builder: set the valid evaluator.
    pub fn valid(mut self, valid: ValidEvaluator) -> Self {
        self.valid = Some(valid);
        self
    }

    /// Builder: set the additional self evaluator.
    pub fn on_self(mut self, evaluator: TargetEvaluator) -> Self {
        self.self_evaluator = Some(evaluator);
        self
    }

    /// Builder: set the post evaluation.
    pub fn post(mut self, post: PostEvaluation) -> Self {
        self.post = Some(post);
        self
    }

    /// Builder: set the switch resolver.
    pub fn switch(mut self, switch: SwitchResolver) -> Self {
        self.switch = Some(switch);
        self
    }
}

/// A registered skill.
#[derive(Clone, Debug)]
pub struct SkillEntry {
    pub metadata: SkillMetadata,
    pub behavior: SkillBehavior,
}

/// Immutable skill registry.
#[derive(Clone, Debug, Default)]
pub struct SkillRegistry {
    entries: HashMap<SkillId, SkillEntry>,
    order: Vec<SkillId>,
}

impl SkillRegistry {
    pub fn builder() -> SkillRegistryBuilder {
        SkillRegistryBuilder::default()
    }

    /// Metadata for `id`, or [`SkillMetadata::NEUTRAL`] for unknown ids.
    pub fn metadata(&self, id: SkillId) -> &SkillMetadata {
        self.entries
            .get(&id)
            .map(|entry| &entry.metadata)
            .unwrap_or(&NEUTRAL_METADATA)
    }

    pub fn get(&self, id: SkillId) -> Option<&SkillEntry> {
        self.entries.get(&id)
    }

    pub fn behavior(&self, id: SkillId) -> Option<&SkillBehavior> {
        self.get(id).map(|entry| &entry.behavior)
    }

    pub fn contains(&self, id: SkillId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Registered ids in declaration order.
    pub fn ids(&self) -> &[SkillId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[derive(Default)]
struct PendingSkill {
    metadata: SkillMetadata,
    behavior: Option<SkillBehavior>,
}

/// Startup-time registry builder.
///
/// Metadata and behavior may be registered separately (`declare` then
/// `attach`) or together (`register`). Each id is registered exactly once;
/// duplicates trip a debug assertion and release builds keep the first.
#[derive(Default)]
pub struct SkillRegistryBuilder {
    pending: HashMap<SkillId, PendingSkill>,
    order: Vec<SkillId>,
}

impl SkillRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares metadata for `id`.
    pub fn declare(&mut self, id: SkillId, metadata: SkillMetadata) -> &mut Self {
        debug_assert!(!self.pending.contains_key(&id), "skill {id} declared twice");
        if !self.pending.contains_key(&id) {
            self.order.push(id);
            self.pending.insert(
                id,
                PendingSkill {
                    metadata,
                    behavior: None,
                },
            );
        }
        self
    }

    /// Attaches behavior to `id`, declaring neutral metadata if needed.
    pub fn attach(&mut self, id: SkillId, behavior: SkillBehavior) -> &mut Self {
        if !self.pending.contains_key(&id) {
            self.order.push(id);
        }
        let pending = self.pending.entry(id).or_default();
        debug_assert!(pending.behavior.is_none(), "skill {id} given two behaviors");
        if pending.behavior.is_none() {
            pending.behavior = Some(behavior);
        }
        self
    }

    /// Declares metadata and attaches behavior in one step.
    pub fn register(
        &mut self,
        id: SkillId,
        metadata: SkillMetadata,
        behavior: SkillBehavior,
    ) -> &mut Self {
        self.declare(id, metadata).attach(id, behavior)
    }

    /// Validates and freezes the registry.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingEvaluator`] if a declared id has no behavior
    /// - [`ConfigError::MissingSwitchTarget`] if a switch resolver names a
    ///   replacement without behavior
    pub fn build(mut self) -> Result<SkillRegistry, ConfigError> {
        for id in &self.order {
            if self.pending.get(id).is_none_or(|pending| pending.behavior.is_none()) {
                return Err(ConfigError::MissingEvaluator(*id));
            }
        }

        for id in &self.order {
            let Some(switch) = self
                .pending
                .get(id)
                .and_then(|p| p.behavior.as_ref()?.switch.as_ref())
            else {
                continue;
            };
            for replacement in switch.candidates() {
                let registered = self
                    .pending
                    .get(replacement)
                    .is_some_and(|pending| pending.behavior.is_some());
                if !registered {
                    return Err(ConfigError::MissingSwitchTarget {
                        skill: *id,
                        replacement: *replacement,
                    });
                }
            }
        }

        let mut entries = HashMap::with_capacity(self.order.len());
        for id in &self.order {
            if let Some(PendingSkill {
                metadata,
                behavior: Some(behavior),
            }) = self.pending.remove(id)
            {
                entries.insert(*id, SkillEntry { metadata, behavior });
            }
        }

        Ok(SkillRegistry {
            entries,
            order: self.order,
        })
    }
}
