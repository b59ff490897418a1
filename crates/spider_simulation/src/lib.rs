//! Spider Simulation Core
//!
//! Pursuit AI паука на Bevy 0.16 (headless ECS).
//!
//! - `ai` — PursuitController (FSM, stun, teleport) + PursuitPlugin
//! - `navigation` — абстракция navmesh агента + headless KinematicAgent
//! - `difficulty` / `config` — пресеты сложности и настройки
//! - `feedback` — производные для HUD/звука (countdown, heartbeat)

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod components;
pub mod config;
pub mod difficulty;
pub mod feedback;
pub mod logger;
pub mod navigation;
pub mod session;

// Re-export базовых типов для удобства
pub use ai::{
    spawn_pursuer, spawn_target, ConfigError, ContactWithTarget, PlayerCaught, PursuerSpawn, PursuitController,
    PursuitPlugin, PursuitState, PursuitStateChanged, SceneReloaded, StunRequest,
};
pub use components::*;
pub use config::{GameSettings, PursuitConfig};
pub use difficulty::{DifficultyProfile, DifficultyTier};
pub use logger::*;
pub use session::SessionState;

/// Частота simulation tick
pub const SIMULATION_HZ: f64 = 60.0;

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ))
            // Детерминистичный RNG (seed по умолчанию)
            .insert_resource(DeterministicRng::new(42))
            .add_plugins(PursuitPlugin);
    }
}

/// Детерминистичный RNG resource (seeded)
///
/// Из него берутся seeds для controllers при спавне.
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время двигается ровно на один fixed tick за `app.update()`,
/// поэтому прогон не зависит от wall clock.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();

    let step = Duration::from_secs_f64(1.0 / SIMULATION_HZ);
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(step))
        .insert_resource(Time::<Fixed>::from_duration(step))
        .insert_resource(DeterministicRng::new(seed))
        .add_plugins(PursuitPlugin);

    app
}

/// Состояние одного паука для сравнения прогонов
#[derive(Debug, Clone, PartialEq)]
pub struct PursuerSnapshot {
    pub entity: u32,
    pub state: PursuitState,
    pub position: Vec3,
    pub cooldown: f32,
    pub patrol_index: Option<usize>,
}

/// Snapshot всех pursuers (отсортирован по Entity ID)
pub fn pursuit_snapshot(world: &mut World) -> Vec<PursuerSnapshot> {
    let mut query = world.query::<(Entity, &PursuitController, &WorldPosition)>();
    let mut snapshot: Vec<_> = query
        .iter(world)
        .map(|(entity, controller, position)| PursuerSnapshot {
            entity: entity.index(),
            state: controller.state(),
            position: position.0,
            cooldown: controller.cooldown_accumulator(),
            patrol_index: controller.last_patrol_index(),
        })
        .collect();

    // Сортируем по Entity ID для детерминизма
    snapshot.sort_by_key(|s| s.entity);
    snapshot
}
