//! World positioning компоненты

use bevy::prelude::*;

/// World позиция актора (ECS authoritative в headless симуляции)
///
/// Для паука пишется из NavigationAgent после движения,
/// для цели — игровой логикой/input.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct WorldPosition(pub Vec3);

impl WorldPosition {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self(Vec3::new(x, y, z))
    }
}
