//! Spawn helpers: паук + цель как ECS entities.
//!
//! Controller собирается через builder; ECS-сторона (scene, cues, observer)
//! подключается через `PursuitChannel`, навигация — `KinematicAgent`.

use bevy::prelude::*;
use rand::Rng;

use super::controller::PursuitController;
use super::error::ConfigError;
use super::events::PursuitChannel;
use crate::components::{PursuitTarget, WorldPosition};
use crate::config::PursuitConfig;
use crate::difficulty::DifficultyProfile;
use crate::navigation::{KinematicAgent, WalkableArea};
use crate::DeterministicRng;

/// Параметры спавна одного паука
#[derive(Debug, Clone)]
pub struct PursuerSpawn {
    pub position: Vec3,
    pub surface: WalkableArea,
    pub stopping_distance: f32,
    pub route: Vec<Vec3>,
    pub difficulty: DifficultyProfile,
    pub config: PursuitConfig,
}

impl PursuerSpawn {
    pub fn new(position: Vec3, surface: WalkableArea, route: Vec<Vec3>) -> Self {
        Self {
            position,
            surface,
            stopping_distance: 1.0,
            route,
            difficulty: DifficultyProfile::default(),
            config: PursuitConfig::default(),
        }
    }

    pub fn with_difficulty(mut self, difficulty: DifficultyProfile) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_config(mut self, config: PursuitConfig) -> Self {
        self.config = config;
        self
    }
}

/// Спавнит цель преследования (игрока)
pub fn spawn_target(world: &mut World, position: Vec3, eye_height: f32) -> Entity {
    world
        .spawn((WorldPosition(position), PursuitTarget::new(position, eye_height)))
        .id()
}

/// Спавнит паука, который преследует `target`
///
/// Seed берётся из `DeterministicRng` (если есть), `now` = elapsed fixed time.
/// При ошибке конфигурации entity не остаётся в мире.
pub fn spawn_pursuer(world: &mut World, target: Entity, spawn: PursuerSpawn) -> Result<Entity, ConfigError> {
    let Some(handle) = world.get::<PursuitTarget>(target).map(|t| t.handle.clone()) else {
        return Err(ConfigError::MissingTarget);
    };

    let seed = match world.get_resource_mut::<DeterministicRng>() {
        Some(mut rng) => rng.rng.gen::<u64>(),
        None => 0,
    };
    let now = world
        .get_resource::<Time<Fixed>>()
        .map(|time| time.elapsed_secs_f64())
        .unwrap_or(0.0);
    let channel = world.get_resource_or_insert_with(PursuitChannel::default).clone();

    let entity = world.spawn_empty().id();
    let reporter = channel.reporter(entity);

    let nav = KinematicAgent::new(spawn.position, spawn.surface).with_stopping_distance(spawn.stopping_distance);

    let built = PursuitController::builder()
        .navigation(nav)
        .target(handle)
        .scene(reporter.clone())
        .cues(reporter.clone())
        .observer(reporter)
        .patrol_route(spawn.route)
        .difficulty(spawn.difficulty)
        .config(spawn.config)
        .seed(seed)
        .build(now);

    match built {
        Ok(controller) => {
            let position = controller.navigation().position();
            world.entity_mut(entity).insert((controller, WorldPosition(position)));
            crate::log(&format!("Pursuer spawned: {:?} (seed {})", entity, seed));
            Ok(entity)
        }
        Err(err) => {
            world.despawn(entity);
            crate::log_error(&format!("Pursuer spawn failed: {}", err));
            Err(err)
        }
    }
}
