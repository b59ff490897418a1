//! Teleport relocation: появляемся рядом с целью после долгой потери контакта.
//!
//! Алгоритм:
//! 1. случайное горизонтальное направление
//! 2. дистанция uniform в [min, max]
//! 3. candidate = target + dir * distance
//! 4. snap на проходимую поверхность в радиусе поиска
//!
//! Если поверхности рядом нет — агент остаётся на месте. Это не ошибка.

use bevy::prelude::*;
use rand::Rng;

use crate::config::PursuitConfig;
use crate::navigation::NavigationAgent;

/// Результат попытки relocation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Relocation {
    /// Агент перемещён в точку на поверхности
    Warped(Vec3),
    /// Рядом с кандидатом нет поверхности, агент не двигался
    NoSurface { candidate: Vec3 },
}

/// Кандидат до snap: горизонтальная дистанция от цели всегда в [min, max]
pub fn relocation_candidate<R: Rng + ?Sized>(
    rng: &mut R,
    target_position: Vec3,
    min_distance: f32,
    max_distance: f32,
) -> Vec3 {
    let angle = rng.gen_range(0.0..std::f32::consts::TAU);
    let distance = if min_distance < max_distance {
        rng.gen_range(min_distance..=max_distance)
    } else {
        min_distance
    };

    let direction = Vec3::new(angle.cos(), 0.0, angle.sin());
    target_position + direction * distance
}

/// Выполнить relocation агента рядом с `target_position`
pub fn relocate<R: Rng + ?Sized>(
    nav: &mut dyn NavigationAgent,
    rng: &mut R,
    target_position: Vec3,
    config: &PursuitConfig,
) -> Relocation {
    let candidate = relocation_candidate(
        rng,
        target_position,
        config.teleport_min_distance,
        config.teleport_max_distance,
    );

    match nav.sample_point_on_surface(candidate, config.relocation_search_radius) {
        Some(point) => {
            nav.warp(point);
            Relocation::Warped(point)
        }
        None => {
            crate::log(&format!(
                "Teleport: no walkable surface within {:.1}m of {:?}, staying at {:?}",
                config.relocation_search_radius,
                candidate,
                nav.position()
            ));
            Relocation::NoSurface { candidate }
        }
    }
}
