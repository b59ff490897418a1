//! Integration тесты PursuitPlugin: события → controller → события/session

use bevy::prelude::*;
use spider_simulation::ai::{PursuitChannel, PursuitController};
use spider_simulation::navigation::WalkableArea;
use spider_simulation::{
    create_headless_app, spawn_pursuer, spawn_target, ConfigError, DeterministicRng, DifficultyProfile, PlayerCaught,
    PursuerSpawn, PursuitConfig, PursuitState, PursuitStateChanged, SceneReloaded, SessionState, SimulationPlugin,
    StunRequest, WorldPosition,
};

const FAR_AWAY: Vec3 = Vec3::new(25.0, 0.0, 25.0);

fn test_difficulty() -> DifficultyProfile {
    DifficultyProfile {
        walk_speed: 5.0,
        chase_speed: 10.0,
        idle_min: 0.1,
        idle_max: 0.2,
        chase_max_duration: 3.0,
        sight_range: 5.0,
        hearing_range: 4.0,
        teleport_cooldown: 60.0,
        pre_teleport_duration: 1.0,
        ambient_density: 0.05,
    }
}

fn no_grace() -> PursuitConfig {
    PursuitConfig {
        grace_period: 0.0,
        ..PursuitConfig::default()
    }
}

fn pursuer_spawn(config: PursuitConfig) -> PursuerSpawn {
    PursuerSpawn::new(
        Vec3::ZERO,
        WalkableArea::square(30.0, 0.0),
        vec![Vec3::new(-20.0, 0.0, 0.0), Vec3::new(20.0, 0.0, 0.0)],
    )
    .with_difficulty(test_difficulty())
    .with_config(config)
}

/// App с целью в `target_position` и одним пауком в origin
fn setup(target_position: Vec3, config: PursuitConfig) -> (App, Entity, Entity) {
    let mut app = create_headless_app(7);
    let world = app.world_mut();
    let target = spawn_target(world, target_position, 1.6);
    let pursuer = spawn_pursuer(world, target, pursuer_spawn(config)).expect("valid pursuer spawn");
    (app, target, pursuer)
}

fn run(app: &mut App, updates: usize) {
    for _ in 0..updates {
        app.update();
    }
}

fn drain<E: Event>(app: &mut App) -> Vec<E> {
    app.world_mut().resource_mut::<Events<E>>().drain().collect()
}

fn position(app: &App, entity: Entity) -> Vec3 {
    app.world().get::<WorldPosition>(entity).expect("entity has WorldPosition").0
}

fn fixed_now(app: &App) -> f64 {
    app.world().resource::<Time<Fixed>>().elapsed_secs_f64()
}

fn controller(app: &App, entity: Entity) -> &PursuitController {
    app.world().get::<PursuitController>(entity).expect("entity is a pursuer")
}

#[test]
fn test_grace_period_keeps_pursuer_inert() {
    // Цель вплотную, но grace (10s) ещё не прошёл
    let (mut app, _target, pursuer) = setup(Vec3::new(1.0, 0.0, 0.0), PursuitConfig::default());

    run(&mut app, 300);

    assert_eq!(position(&app, pursuer), Vec3::ZERO);
    assert!(controller(&app, pursuer).is_grace_active());
    assert!(drain::<PlayerCaught>(&mut app).is_empty());
}

#[test]
fn test_state_changes_are_published_as_events() {
    let (mut app, _target, pursuer) = setup(FAR_AWAY, no_grace());

    // Events живут два update: читаем после каждого
    let mut changes = Vec::new();
    for _ in 0..40 {
        app.update();
        changes.extend(drain::<PursuitStateChanged>(&mut app));
    }

    assert!(
        changes
            .iter()
            .any(|c| c.pursuer == pursuer && c.from == PursuitState::Idle && c.to == PursuitState::Patrol),
        "Ожидали Idle → Patrol, получили {:?}",
        changes
    );
}

#[test]
fn test_stun_request_freezes_pursuer_until_expiry() {
    let (mut app, _target, pursuer) = setup(FAR_AWAY, no_grace());

    run(&mut app, 40);
    assert_eq!(controller(&app, pursuer).state(), PursuitState::Patrol);

    app.world_mut().send_event(StunRequest { pursuer, duration: 1.0 });
    app.update();
    assert!(controller(&app, pursuer).is_stunned());

    // Окно считается от времени tick, в котором пришёл запрос
    let tick_now = fixed_now(&app);
    let expiry = controller(&app, pursuer).stun_handle().stun_expiry();
    assert!(
        (expiry - (tick_now + 1.0)).abs() < 1e-9,
        "stun expiry {} != tick {} + 1.0",
        expiry,
        tick_now
    );
    let frozen_at = position(&app, pursuer);

    // 0.5s stun: ни шага
    run(&mut app, 30);
    assert_eq!(position(&app, pursuer), frozen_at);
    assert_eq!(app.world().resource::<SessionState>().stuns, 1);

    // Stun закончился, патруль продолжается
    run(&mut app, 60);
    assert!(!controller(&app, pursuer).is_stunned());
    assert_eq!(controller(&app, pursuer).state(), PursuitState::Patrol);
    assert_ne!(position(&app, pursuer), frozen_at);
}

#[test]
fn test_target_entering_hearing_range_is_chased_and_caught_once() {
    let (mut app, target, pursuer) = setup(FAR_AWAY, no_grace());

    run(&mut app, 20);
    assert!(drain::<PlayerCaught>(&mut app).is_empty());

    // Игрок подошёл к пауку
    let near = position(&app, pursuer) + Vec3::new(3.0, 0.0, 0.0);
    app.world_mut().entity_mut(target).insert(WorldPosition(near));

    let mut caught = Vec::new();
    for _ in 0..120 {
        app.update();
        caught.extend(drain::<PlayerCaught>(&mut app));
    }

    assert_eq!(caught.len(), 1, "PlayerCaught должен прийти ровно один раз");
    assert_eq!(caught[0].pursuer, pursuer);
    assert_eq!(caught[0].scene, "GameOver");

    let session = app.world().resource::<SessionState>();
    assert!(session.caught);
    assert_eq!(session.pending_scene.as_deref(), Some("GameOver"));
    assert!(controller(&app, pursuer).is_halted());
}

#[test]
fn test_scene_reload_despawns_pursuers_and_resets_session() {
    let (mut app, target, pursuer) = setup(FAR_AWAY, no_grace());

    app.world_mut()
        .entity_mut(target)
        .insert(WorldPosition(Vec3::new(2.0, 0.0, 0.0)));
    run(&mut app, 120);
    assert!(app.world().resource::<SessionState>().caught);

    app.world_mut().send_event(SceneReloaded);
    app.update();

    assert!(app.world().get_entity(pursuer).is_err());
    let session = app.world().resource::<SessionState>();
    assert_eq!(session.level_loads, 1);
    assert!(!session.caught);
    assert_eq!(session.pending_scene, None);
}

#[test]
fn test_spawn_without_target_component_fails() {
    let mut app = create_headless_app(1);
    let world = app.world_mut();
    let not_a_target = world.spawn_empty().id();

    let result = spawn_pursuer(world, not_a_target, pursuer_spawn(no_grace()));

    assert_eq!(result, Err(ConfigError::MissingTarget));
}

#[test]
fn test_failed_spawn_leaves_no_entity_behind() {
    let mut app = create_headless_app(1);
    let world = app.world_mut();
    let target = spawn_target(world, FAR_AWAY, 1.6);
    let entities_before = world.entities().len();

    let mut spawn = pursuer_spawn(no_grace());
    spawn.route.clear();
    let result = spawn_pursuer(world, target, spawn);

    assert_eq!(result, Err(ConfigError::EmptyPatrolRoute));
    assert_eq!(world.entities().len(), entities_before);
    assert_eq!(world.query::<&PursuitController>().iter(world).count(), 0);
}

#[test]
fn test_simulation_plugin_registers_pursuit_stack() {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, SimulationPlugin));

    let world = app.world_mut();
    assert_eq!(world.resource::<DeterministicRng>().seed, 42);
    assert!(world.get_resource::<SessionState>().is_some());
    assert!(world.get_resource::<PursuitChannel>().is_some());
    assert!(world.get_resource::<Events<StunRequest>>().is_some());
    assert!(world.get_resource::<Events<PlayerCaught>>().is_some());
    assert_eq!(
        world.resource::<Time<Fixed>>().timestep(),
        Time::<Fixed>::from_hz(60.0).timestep()
    );

    // Спавн работает и на plugin-сборке (seed из DeterministicRng)
    let target = spawn_target(world, FAR_AWAY, 1.6);
    let pursuer = spawn_pursuer(world, target, pursuer_spawn(no_grace()));
    assert!(pursuer.is_ok());
}
