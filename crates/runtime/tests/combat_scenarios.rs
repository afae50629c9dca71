use std::sync::Arc;

use combat_content::catalog::ids::{mob, spell};
use combat_content::{Content, ContentFactory, MonsterLoader};
use combat_core::effect::single_status;
use combat_core::evaluate::{apply_bundle, grant_status};
use combat_core::heuristic::avoid_overwriting;
use combat_core::{
    ActorState, ActorView, CombatConfig, CombatEvent, CombatStats, EffectDescriptor, EntityId,
    FixedRng, HeuristicRegistry, PcgRng, Position, ResolutionContext, ResourceKind, Score,
    SkillBehavior, SkillFailure, SkillId, SkillMetadata, SkillRegistry, StatKind,
    StatusEffectKind, TargetEvaluator,
};
use combat_runtime::{CombatRuntime, RuntimeError};

const BOMB: EntityId = EntityId(100);
const IMP: EntityId = EntityId(101);

fn adventurer(id: u32, position: Position) -> ActorState {
    let stats = CombatStats::new()
        .with(StatKind::Level, 20)
        .with(StatKind::Str, 25)
        .with(StatKind::Vit, 25)
        .with(StatKind::Int, 25)
        .with(StatKind::Mnd, 25)
        .with(StatKind::Attack, 60)
        .with(StatKind::Defense, 60)
        .with(StatKind::WeaponDamage, 18);
    ActorState::new(EntityId(id), stats, 800, 120).at(position)
}

fn runtime() -> CombatRuntime {
    let content = ContentFactory::embedded()
        .build()
        .expect("embedded content should validate");
    CombatRuntime::new(content, &CombatConfig::with_seed(7))
}

fn hp(runtime: &CombatRuntime, id: EntityId) -> u32 {
    runtime
        .roster()
        .state(id)
        .expect("actor should be on the roster")
        .resource(ResourceKind::Hp)
}

/// Self-destruct hits everyone around the bomb once and defeats the bomb.
#[test]
fn self_destruct_hits_area_and_defeats_user() {
    let mut runtime = runtime();
    runtime
        .spawn("bomb", 10, BOMB, Position::ORIGIN)
        .expect("bomb should spawn");
    runtime.join(adventurer(1, Position::new(3.0, 0.0)), []).unwrap();
    runtime.join(adventurer(2, Position::new(0.0, 4.0)), []).unwrap();
    runtime.join(adventurer(3, Position::new(30.0, 0.0)), []).unwrap();

    let report = runtime
        .execute(BOMB, mob::SELF_DESTRUCT, EntityId(1))
        .expect("self-destruct should resolve");

    assert_eq!(report.targets, vec![EntityId(1), EntityId(2)]);
    assert!(hp(&runtime, EntityId(1)) < 800);
    assert!(hp(&runtime, EntityId(2)) < 800);
    assert_eq!(hp(&runtime, EntityId(3)), 800);
    assert_eq!(hp(&runtime, BOMB), 0);

    let defeats = report
        .events
        .iter()
        .filter(|event| matches!(event, CombatEvent::Defeated { target } if *target == BOMB))
        .count();
    assert_eq!(defeats, 1, "the user is defeated exactly once");
}

/// A backfire redirects the whole action onto the user.
#[test]
fn unstable_blast_backfire_follows_injected_roll() {
    // ================================================================
    // Roll 1: backfire
    // ================================================================
    let mut runtime = runtime().with_rng(FixedRng(1));
    runtime
        .spawn("imp", 12, IMP, Position::ORIGIN)
        .expect("imp should spawn");
    runtime.join(adventurer(1, Position::new(5.0, 0.0)), []).unwrap();
    let imp_hp = hp(&runtime, IMP);

    let report = runtime
        .execute(IMP, mob::UNSTABLE_BLAST, EntityId(1))
        .expect("blast should resolve");

    assert!(report.redirected);
    assert_eq!(report.requested, mob::UNSTABLE_BLAST);
    assert_eq!(report.skill, mob::BACKLASH);
    assert_eq!(report.targets, vec![IMP]);
    assert!(hp(&runtime, IMP) < imp_hp);
    assert_eq!(hp(&runtime, EntityId(1)), 800);

    // ================================================================
    // Roll 100: no backfire
    // ================================================================
    let mut runtime = self::runtime().with_rng(FixedRng(100));
    runtime
        .spawn("imp", 12, IMP, Position::ORIGIN)
        .expect("imp should spawn");
    runtime.join(adventurer(1, Position::new(5.0, 0.0)), []).unwrap();

    let report = runtime
        .execute(IMP, mob::UNSTABLE_BLAST, EntityId(1))
        .expect("blast should resolve");

    assert!(!report.redirected);
    assert_eq!(report.skill, mob::UNSTABLE_BLAST);
    assert!(hp(&runtime, EntityId(1)) < 800);
    assert_eq!(hp(&runtime, IMP), imp_hp);
}

/// A rejected action changes nothing and reports why.
#[test]
fn rejected_action_leaves_roster_untouched() {
    let mut runtime = runtime();
    let caster = ActorState::new(
        EntityId(1),
        CombatStats::new().with(StatKind::Level, 20),
        800,
        0,
    );
    runtime.join(caster, [spell::FIRE]).unwrap();
    runtime
        .spawn("bomb", 10, BOMB, Position::new(5.0, 0.0))
        .unwrap();
    let before = runtime.roster().state(BOMB).cloned();

    let err = runtime
        .execute(EntityId(1), spell::FIRE, BOMB)
        .expect_err("caster has no MP");

    assert_eq!(
        err.skill_failure(),
        Some(&SkillFailure::InsufficientResource(ResourceKind::Mp))
    );
    assert_eq!(runtime.roster().state(BOMB).cloned(), before);
}

#[test]
fn unknown_actors_and_families_are_errors() {
    let mut runtime = runtime();
    runtime.join(adventurer(1, Position::ORIGIN), []).unwrap();

    assert!(matches!(
        runtime.execute(EntityId(1), spell::FIRE, EntityId(9)),
        Err(RuntimeError::UnknownActor(EntityId(9)))
    ));
    assert!(matches!(
        runtime.spawn("dragon", 10, EntityId(2), Position::ORIGIN),
        Err(RuntimeError::UnknownFamily(_))
    ));
    assert!(matches!(
        runtime.spawn("bomb", 1, EntityId(1), Position::ORIGIN),
        Err(RuntimeError::DuplicateActor(EntityId(1)))
    ));
    assert!(matches!(
        runtime.spawn("bomb", 99, EntityId(3), Position::ORIGIN),
        Err(RuntimeError::Config(_))
    ));
}

/// Granting the same debuff twice through two independent evaluators
/// succeeds at execution regardless of what the heuristic would say.
#[test]
fn same_debuff_twice_through_independent_evaluators() {
    const SPORE: SkillId = SkillId::mob_skill(500);
    const STING: SkillId = SkillId::mob_skill(501);

    let poison = EffectDescriptor::new(StatusEffectKind::Poison, 30).with_potency(4);
    let mut builder = SkillRegistry::builder();
    builder
        .register(
            SPORE,
            SkillMetadata::NEUTRAL,
            SkillBehavior::new(apply_bundle(single_status(poison.clone(), None))),
        )
        .register(
            STING,
            SkillMetadata::NEUTRAL,
            SkillBehavior::new(TargetEvaluator::new(move |ctx| {
                grant_status(&poison, ctx).into_iter().collect()
            })),
        );
    let skills = builder.build().expect("registry should validate");

    let mut heuristics = HeuristicRegistry::builder();
    heuristics
        .register(SPORE, avoid_overwriting(StatusEffectKind::Poison))
        .register(STING, avoid_overwriting(StatusEffectKind::Poison));
    let content = Content {
        skills: Arc::new(skills),
        heuristics: Arc::new(heuristics.build()),
        monsters: Arc::new(MonsterLoader::embedded().unwrap()),
    };
    let mut runtime = CombatRuntime::new(content, &CombatConfig::with_seed(1));
    runtime.join(adventurer(1, Position::ORIGIN), [SPORE, STING]).unwrap();
    runtime.join(adventurer(2, Position::new(2.0, 0.0)), []).unwrap();

    let first = runtime.execute(EntityId(1), SPORE, EntityId(2)).unwrap();
    assert!(matches!(first.events[..], [CombatEvent::StatusGranted { .. }]));

    // The heuristic now vetoes both skills...
    let source = runtime.roster().state(EntityId(1)).unwrap();
    let target = runtime.roster().state(EntityId(2)).unwrap();
    let metadata = SkillMetadata::NEUTRAL;
    let ctx = ResolutionContext::new(source, target, STING, &metadata, &PcgRng, 0);
    assert_eq!(runtime.heuristics().score(&ctx), Score::VETO);
    assert_eq!(runtime.decide(EntityId(1), EntityId(2)).unwrap(), None);

    // ...but execution still succeeds
    let second = runtime.execute(EntityId(1), STING, EntityId(2)).unwrap();
    assert!(matches!(
        second.events[..],
        [CombatEvent::StatusRefreshed {
            kind: StatusEffectKind::Poison,
            ..
        }]
    ));
    let target = runtime.roster().state(EntityId(2)).unwrap();
    assert!(target.status_effects().has(StatusEffectKind::Poison));
    assert_eq!(target.status_effects().len(), 1);
}

#[test]
fn status_timers_expire_through_tick() {
    let mut runtime = runtime();
    runtime.join(adventurer(1, Position::ORIGIN), []).unwrap();
    runtime.join(adventurer(2, Position::new(3.0, 0.0)), []).unwrap();

    runtime
        .execute(EntityId(1), spell::PROTECT, EntityId(2))
        .expect("protect should resolve");
    assert!(runtime
        .roster()
        .state(EntityId(2))
        .unwrap()
        .status_effects()
        .has(StatusEffectKind::Protect));

    let expired = runtime.tick(1800);
    assert_eq!(
        expired,
        vec![CombatEvent::StatusExpired {
            target: EntityId(2),
            kind: StatusEffectKind::Protect
        }]
    );
    assert!(runtime
        .roster()
        .state(EntityId(2))
        .unwrap()
        .status_effects()
        .is_empty());
}

/// A lethal first hit ends the action for that target: nothing lands on
/// the corpse.
#[test]
fn lethal_body_slam_leaves_a_clean_corpse() {
    let mut runtime = runtime().with_rng(FixedRng(1));
    runtime.join(adventurer(1, Position::ORIGIN), []).unwrap();
    runtime
        .join(adventurer(2, Position::new(2.0, 0.0)).with_hp(5), [])
        .unwrap();

    let report = runtime
        .execute(EntityId(1), mob::BODY_SLAM, EntityId(2))
        .expect("body slam should resolve");

    assert!(matches!(
        report.events.last(),
        Some(CombatEvent::Defeated { target }) if *target == EntityId(2)
    ));
    let corpse = runtime.roster().state(EntityId(2)).unwrap();
    assert!(corpse.is_defeated());
    assert!(corpse.status_effects().is_empty());
    assert_eq!(corpse.position(), Position::new(2.0, 0.0));
}

/// Acting on a defeated target is an empty success: no cost, no area.
#[test]
fn acting_on_a_corpse_costs_nothing() {
    let mut runtime = runtime();
    runtime.join(adventurer(1, Position::ORIGIN), []).unwrap();
    runtime
        .join(adventurer(2, Position::new(5.0, 0.0)).with_hp(0), [])
        .unwrap();
    runtime.join(adventurer(3, Position::new(7.0, 0.0)), []).unwrap();

    let report = runtime
        .execute(EntityId(1), spell::FIRE, EntityId(2))
        .expect("fire on a corpse should not be rejected");
    assert!(report.events.is_empty());

    let report = runtime
        .execute(EntityId(1), mob::NOXIOUS_SPORE, EntityId(2))
        .expect("spores on a corpse should not be rejected");
    assert!(report.events.is_empty());
    assert_eq!(report.targets, vec![EntityId(2)]);

    let caster = runtime.roster().state(EntityId(1)).unwrap();
    assert_eq!(caster.resource(ResourceKind::Mp), 120);
    assert!(runtime
        .roster()
        .state(EntityId(3))
        .unwrap()
        .status_effects()
        .is_empty());
}

/// A shadow absorbing an effect does not make Blink the newest buff.
#[test]
fn absorbed_shadow_keeps_dispel_order() {
    let mut runtime = runtime();
    runtime.join(adventurer(1, Position::ORIGIN), []).unwrap();
    runtime.join(adventurer(2, Position::new(3.0, 0.0)), []).unwrap();

    runtime
        .execute(EntityId(2), spell::BLINK, EntityId(2))
        .expect("blink should resolve");
    runtime
        .execute(EntityId(2), spell::PROTECT, EntityId(2))
        .expect("protect should resolve");

    let report = runtime
        .execute(EntityId(1), spell::SLOW, EntityId(2))
        .expect("slow should resolve");
    assert!(report
        .events
        .contains(&CombatEvent::ShadowConsumed { target: EntityId(2) }));

    let effects = runtime.roster().state(EntityId(2)).unwrap().status_effects();
    assert_eq!(
        effects.get(StatusEffectKind::Blink).map(|blink| blink.counter),
        Some(2)
    );
    assert!(!effects.has(StatusEffectKind::Slow));
    assert_eq!(
        effects.dispellable_newest_first()[0].kind,
        StatusEffectKind::Protect
    );
}
