//! Switch-skill resolver: optional runtime redirect to another skill.

use std::fmt;
use std::sync::Arc;

use crate::evaluate::{ResolutionContext, RollTag};
use crate::skill::SkillId;

/// Who a redirected skill lands on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwitchTarget {
    /// The actor using the skill (a backfire).
    Source,
    /// The originally selected target.
    Target,
}

/// Replacement computed at resolution time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwitchSkill {
    pub skill: SkillId,
    pub target: SwitchTarget,
}

type ResolveFn = dyn Fn(&ResolutionContext<'_>) -> Option<SwitchSkill> + Send + Sync;

/// Decides, once per action, whether to redirect.
///
/// A resolver declares every skill it may redirect to so the registry can
/// validate them at startup.
#[derive(Clone)]
pub struct SwitchResolver {
    candidates: Vec<SkillId>,
    resolve: Arc<ResolveFn>,
}

impl SwitchResolver {
    pub fn new(
        candidates: impl IntoIterator<Item = SkillId>,
        resolve: impl Fn(&ResolutionContext<'_>) -> Option<SwitchSkill> + Send + Sync + 'static,
    ) -> Self {
        Self {
            candidates: candidates.into_iter().collect(),
            resolve: Arc::new(resolve),
        }
    }

    /// Skills this resolver may redirect to.
    pub fn candidates(&self) -> &[SkillId] {
        &self.candidates
    }

    /// Replacement for this action, if any.
    ///
    /// Replacements outside the declared candidates are ignored.
    pub fn resolve(&self, ctx: &ResolutionContext<'_>) -> Option<SwitchSkill> {
        (self.resolve)(ctx).filter(|switch| self.candidates.contains(&switch.skill))
    }
}

impl fmt::Debug for SwitchResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwitchResolver")
            .field("candidates", &self.candidates)
            .finish_non_exhaustive()
    }
}

/// Redirects to `replacement` with `chance_percent` probability.
///
/// One roll against the injected oracle per action.
pub fn backfire(chance_percent: u32, replacement: SkillId, target: SwitchTarget) -> SwitchResolver {
    SwitchResolver::new([replacement], move |ctx| {
        ctx.roll(RollTag::SWITCH, chance_percent)
            .then_some(SwitchSkill {
                skill: replacement,
                target,
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::FixedRng;
    use crate::skill::SkillMetadata;
    use crate::state::{ActorState, EntityId};
    use crate::stats::CombatStats;

    #[test]
    fn backfire_rolls_against_chance() {
        let source = ActorState::new(EntityId(1), CombatStats::new(), 10, 0);
        let metadata = SkillMetadata::NEUTRAL;
        let resolver = backfire(25, SkillId::spell(9), SwitchTarget::Source);

        let lucky = ResolutionContext::new(
            &source,
            &source,
            SkillId::spell(1),
            &metadata,
            &FixedRng(25),
            0,
        );
        assert_eq!(
            resolver.resolve(&lucky),
            Some(SwitchSkill {
                skill: SkillId::spell(9),
                target: SwitchTarget::Source
            })
        );

        let unlucky = ResolutionContext::new(
            &source,
            &source,
            SkillId::spell(1),
            &metadata,
            &FixedRng(26),
            0,
        );
        assert_eq!(resolver.resolve(&unlucky), None);
    }

    #[test]
    fn undeclared_replacement_is_ignored() {
        let source = ActorState::new(EntityId(1), CombatStats::new(), 10, 0);
        let metadata = SkillMetadata::NEUTRAL;
        let resolver = SwitchResolver::new([SkillId::spell(2)], |_| {
            Some(SwitchSkill {
                skill: SkillId::spell(3),
                target: SwitchTarget::Target,
            })
        });
        let ctx =
            ResolutionContext::new(&source, &source, SkillId::spell(1), &metadata, &FixedRng(1), 0);

        assert!(resolver.resolve(&ctx).is_none());
    }
}
