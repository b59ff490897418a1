//! Navigation service для pursuit AI
//!
//! AI не знает как устроен navmesh: он только ставит destination, читает
//! remaining distance и просит найти проходимую точку рядом с кандидатом.
//! В игре trait реализует движок (NavMeshAgent), в headless — `KinematicAgent`.

use bevy::prelude::*;

mod kinematic;

pub use kinematic::{KinematicAgent, WalkableArea, WalkableRegion};

/// Handle агента навигации (position, speed, target, stopped flag)
pub trait NavigationAgent: Send + Sync {
    /// Текущая world позиция агента
    fn position(&self) -> Vec3;

    /// Yaw (радианы) — куда смотрит агент
    fn orientation(&self) -> f32;

    fn set_destination(&mut self, point: Vec3);

    fn destination(&self) -> Option<Vec3>;

    /// Оставшаяся длина пути до destination
    fn remaining_distance(&self) -> f32;

    /// true пока путь ещё считается (remaining_distance невалиден)
    fn path_pending(&self) -> bool;

    /// Дистанция, на которой агент считает что прибыл
    fn stopping_distance(&self) -> f32;

    /// Мгновенное перемещение без пути
    fn warp(&mut self, point: Vec3);

    /// Ближайшая проходимая точка в радиусе `max_radius` от `near`
    fn sample_point_on_surface(&self, near: Vec3, max_radius: f32) -> Option<Vec3>;

    fn speed(&self) -> f32;

    fn set_speed(&mut self, speed: f32);

    fn is_stopped(&self) -> bool;

    fn set_stopped(&mut self, stopped: bool);

    /// Продвинуть агента на `delta` секунд.
    /// Движки, которые двигают агента сами, оставляют no-op.
    fn advance(&mut self, _delta: f32) {}

    /// Прибыл ли агент (путь посчитан и remaining <= stopping distance)
    fn has_arrived(&self) -> bool {
        !self.path_pending() && self.remaining_distance() <= self.stopping_distance()
    }
}
