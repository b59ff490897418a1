//! Headless навигация: прямолинейный steering по набору прямоугольных зон.
//!
//! Это не pathfinding — препятствий нет. Достаточно для тестов и headless прогона,
//! где важна логика AI, а не обход стен.

use bevy::prelude::*;

use super::NavigationAgent;

/// Горизонтальная проходимая зона (XZ прямоугольник на высоте `height`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkableRegion {
    pub min: Vec2,
    pub max: Vec2,
    pub height: f32,
}

impl WalkableRegion {
    pub fn new(min: Vec2, max: Vec2, height: f32) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
            height,
        }
    }

    /// Ближайшая к `point` точка зоны
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        Vec3::new(
            point.x.clamp(self.min.x, self.max.x),
            self.height,
            point.z.clamp(self.min.y, self.max.y),
        )
    }
}

/// Упрощённый navmesh: объединение прямоугольных зон
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WalkableArea {
    pub regions: Vec<WalkableRegion>,
}

impl WalkableArea {
    pub fn new(regions: Vec<WalkableRegion>) -> Self {
        Self { regions }
    }

    /// Квадратная площадка со стороной `2 * half_extent` вокруг origin
    pub fn square(half_extent: f32, height: f32) -> Self {
        Self::new(vec![WalkableRegion::new(
            Vec2::splat(-half_extent),
            Vec2::splat(half_extent),
            height,
        )])
    }

    /// Ближайшая проходимая точка в радиусе `max_radius`, иначе None
    pub fn closest_point(&self, near: Vec3, max_radius: f32) -> Option<Vec3> {
        self.regions
            .iter()
            .map(|region| region.closest_point(near))
            .map(|point| (point, point.distance(near)))
            .filter(|(_, distance)| *distance <= max_radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(point, _)| point)
    }
}

/// Kinematic агент: идёт по прямой к destination со своей скоростью
#[derive(Debug, Clone)]
pub struct KinematicAgent {
    position: Vec3,
    yaw: f32,
    speed: f32,
    destination: Option<Vec3>,
    stopped: bool,
    stopping_distance: f32,
    surface: WalkableArea,
}

impl KinematicAgent {
    pub fn new(position: Vec3, surface: WalkableArea) -> Self {
        Self {
            position,
            yaw: 0.0,
            speed: 0.0,
            destination: None,
            stopped: true,
            stopping_distance: 1.0,
            surface,
        }
    }

    pub fn with_stopping_distance(mut self, stopping_distance: f32) -> Self {
        self.stopping_distance = stopping_distance.max(0.0);
        self
    }

    pub fn surface(&self) -> &WalkableArea {
        &self.surface
    }
}

impl NavigationAgent for KinematicAgent {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn orientation(&self) -> f32 {
        self.yaw
    }

    fn set_destination(&mut self, point: Vec3) {
        self.destination = Some(point);
    }

    fn destination(&self) -> Option<Vec3> {
        self.destination
    }

    fn remaining_distance(&self) -> f32 {
        self.destination
            .map(|target| self.position.distance(target))
            .unwrap_or(0.0)
    }

    fn path_pending(&self) -> bool {
        false
    }

    fn stopping_distance(&self) -> f32 {
        self.stopping_distance
    }

    fn warp(&mut self, point: Vec3) {
        self.position = point;
    }

    fn sample_point_on_surface(&self, near: Vec3, max_radius: f32) -> Option<Vec3> {
        self.surface.closest_point(near, max_radius)
    }

    fn speed(&self) -> f32 {
        self.speed
    }

    fn set_speed(&mut self, speed: f32) {
        self.speed = speed.max(0.0);
    }

    fn is_stopped(&self) -> bool {
        self.stopped
    }

    fn set_stopped(&mut self, stopped: bool) {
        self.stopped = stopped;
    }

    fn advance(&mut self, delta: f32) {
        if self.stopped || delta <= 0.0 {
            return;
        }
        let Some(target) = self.destination else {
            return;
        };

        let to_target = target - self.position;
        let distance = to_target.length();
        if distance <= f32::EPSILON {
            return;
        }

        let direction = to_target / distance;
        let step = self.speed * delta;

        if step >= distance {
            self.position = target;
        } else {
            self.position += direction * step;
        }

        // Yaw по горизонтальной проекции движения
        if direction.x != 0.0 || direction.z != 0.0 {
            self.yaw = direction.x.atan2(direction.z);
        }
    }
}
