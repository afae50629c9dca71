use std::fmt;
use std::sync::Arc;

use crate::combat::{DamageSpec, magical_damage};
use crate::evaluate::ResolutionContext;
use crate::state::{StatusEffectKind, StatusInstance};

/// Sets potency/secondary potency/counter on a freshly created instance.
///
/// Invoked exactly once, synchronously, when the instance is created. Never
/// re-invoked on refresh.
pub type Decorator = Arc<dyn Fn(&mut StatusInstance, &ResolutionContext<'_>) + Send + Sync>;

/// Declarative status-effect attachment.
#[derive(Clone)]
pub struct EffectDescriptor {
    pub kind: StatusEffectKind,
    /// Base duration in seconds.
    pub duration: u32,
    /// Base trigger chance in percent.
    pub chance: u32,
    decorator: Option<Decorator>,
}

impl EffectDescriptor {
    /// Always-landing descriptor with no decoration.
    pub fn new(kind: StatusEffectKind, duration: u32) -> Self {
        Self {
            kind,
            duration,
            chance: 100,
            decorator: None,
        }
    }

    /// Builder: set trigger chance.
    pub fn with_chance(mut self, chance: u32) -> Self {
        self.chance = chance;
        self
    }

    /// Builder: set the decorator.
    pub fn decorate(
        mut self,
        decorator: impl Fn(&mut StatusInstance, &ResolutionContext<'_>) + Send + Sync + 'static,
    ) -> Self {
        self.decorator = Some(Arc::new(decorator));
        self
    }

    /// Builder: fixed potency.
    pub fn with_potency(self, potency: i32) -> Self {
        self.decorate(move |instance, _| instance.potency = potency)
    }

    /// Creates a new decorated instance for the context's target.
    pub fn instantiate(&self, ctx: &ResolutionContext<'_>) -> StatusInstance {
        let mut instance = StatusInstance::new(self.kind, ctx.source.id(), self.duration);
        if let Some(decorator) = &self.decorator {
            decorator(&mut instance, ctx);
        }
        instance.granted_potency = instance.potency;
        instance
    }
}

impl fmt::Debug for EffectDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EffectDescriptor")
            .field("kind", &self.kind)
            .field("duration", &self.duration)
            .field("chance", &self.chance)
            .field("decorated", &self.decorator.is_some())
            .finish()
    }
}

/// Damage-over-time descriptor.
///
/// The decorator computes `spec` as magical damage once, when the effect is
/// granted, and stores the total as the tick potency. Ticks never recompute
/// against live stats.
pub fn damage_over_time(
    kind: StatusEffectKind,
    duration: u32,
    spec: DamageSpec,
) -> EffectDescriptor {
    EffectDescriptor::new(kind, duration).decorate(move |instance, ctx| {
        let outcome = magical_damage(ctx.source, ctx.target, &ctx.metadata.cost, &spec);
        instance.potency = outcome.total().min(i32::MAX as u32) as i32;
    })
}
