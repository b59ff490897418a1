//! Actor роли

use bevy::prelude::*;

use crate::ai::SharedTarget;

/// Цель преследования (игрок)
///
/// `SharedTarget` клонируется в каждый PursuitController; позиция
/// синхронизируется из `WorldPosition` каждый FixedUpdate.
#[derive(Component, Debug, Clone, Default)]
pub struct PursuitTarget {
    pub handle: SharedTarget,
}

impl PursuitTarget {
    pub fn new(position: Vec3, eye_height: f32) -> Self {
        Self {
            handle: SharedTarget::new(position, eye_height),
        }
    }
}
