//! Внешние сервисы, которые вызывает pursuit AI
//!
//! Явные traits, передаются в `PursuitControllerBuilder`. Все вызовы fire-and-forget:
//! AI никогда не ждёт завершения звука/смены сцены.

use std::sync::{Arc, RwLock};

use bevy::prelude::*;

use super::components::{IndicatorColor, PursuitState};

/// Цель преследования (игрок)
pub trait TargetTracker: Send + Sync {
    fn position(&self) -> Vec3;

    /// Точка "глаз" цели (для sight проверки)
    fn eye_position(&self) -> Vec3 {
        self.position()
    }
}

/// Потокобезопасная ячейка позиции цели
///
/// Хост (ECS система, движок) пишет позицию каждый кадр, AI читает в tick.
#[derive(Debug, Clone, Default)]
pub struct SharedTarget {
    inner: Arc<RwLock<TargetPose>>,
}

#[derive(Debug, Clone, Copy, Default)]
struct TargetPose {
    position: Vec3,
    eye_height: f32,
}

impl SharedTarget {
    pub fn new(position: Vec3, eye_height: f32) -> Self {
        Self {
            inner: Arc::new(RwLock::new(TargetPose { position, eye_height })),
        }
    }

    pub fn set_position(&self, position: Vec3) {
        let mut pose = self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        pose.position = position;
    }

    fn pose(&self) -> TargetPose {
        *self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TargetTracker for SharedTarget {
    fn position(&self) -> Vec3 {
        self.pose().position
    }

    fn eye_position(&self) -> Vec3 {
        let pose = self.pose();
        pose.position + Vec3::Y * pose.eye_height
    }
}

/// Смена сцены при поимке игрока
pub trait SceneService: Send + Sync {
    /// Вызывается не больше одного раза за жизнь контроллера
    fn on_player_caught(&mut self, scene: &str);
}

/// Звуковые/световые cues (fire-and-forget)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cue {
    /// Warning перед телепортом; `variant` — индекс одного из взаимозаменяемых звуков
    PreTeleportWarning { variant: usize },
    /// Телепорт выполнен (агент реально переместился)
    TeleportExecuted,
    StunStarted,
    StunEnded,
    /// Плотность тумана для выбранной сложности (один раз при инициализации)
    AmbientDensity(f32),
}

pub trait CueSink: Send + Sync {
    fn play(&mut self, cue: Cue);

    fn set_indicator(&mut self, color: IndicatorColor);
}

/// Cue sink, который ничего не делает (по умолчанию в builder)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCues;

impl CueSink for NullCues {
    fn play(&mut self, _cue: Cue) {}

    fn set_indicator(&mut self, _color: IndicatorColor) {}
}

/// Typed callbacks на изменения AI (для UI/HUD)
pub trait PursuitObserver: Send + Sync {
    fn on_state_changed(&mut self, _from: PursuitState, _to: PursuitState) {}

    fn on_detection_changed(&mut self, _detected: bool) {}

    fn on_stun_changed(&mut self, _stunned: bool) {}

    fn on_caught(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_target_updates_are_visible_through_clones() {
        let target = SharedTarget::new(Vec3::ZERO, 1.6);
        let writer = target.clone();

        writer.set_position(Vec3::new(3.0, 0.0, 4.0));

        assert_eq!(target.position(), Vec3::new(3.0, 0.0, 4.0));
        assert_eq!(target.eye_position(), Vec3::new(3.0, 1.6, 4.0));
    }
}
