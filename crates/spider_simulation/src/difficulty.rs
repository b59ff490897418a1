//! Difficulty tiers и их параметры
//!
//! Уровень выбирается в меню и сохраняется как целое число (0/1/2).
//! Симуляция получает уже разрешённый `DifficultyProfile` и больше его не меняет.

use serde::{Deserialize, Serialize};

/// Уровень сложности (persisted как i32)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DifficultyTier {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl DifficultyTier {
    /// 0 → Easy, 2 → Hard, всё остальное → Medium (включая битые значения)
    pub fn from_persisted(level: i32) -> Self {
        match level {
            0 => Self::Easy,
            2 => Self::Hard,
            _ => Self::Medium,
        }
    }

    pub fn to_persisted(self) -> i32 {
        match self {
            Self::Easy => 0,
            Self::Medium => 1,
            Self::Hard => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "EASY",
            Self::Medium => "MEDIUM",
            Self::Hard => "HARD",
        }
    }
}

/// Параметры pursuit AI для одного уровня сложности
///
/// Все времена в секундах, скорости в м/с, дистанции в метрах.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub walk_speed: f32,
    pub chase_speed: f32,
    pub idle_min: f32,
    pub idle_max: f32,
    pub chase_max_duration: f32,
    pub sight_range: f32,
    pub hearing_range: f32,
    pub teleport_cooldown: f32,
    pub pre_teleport_duration: f32,
    /// Плотность тумана сцены (передаётся как cue, симуляция её не использует)
    pub ambient_density: f32,
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        Self::for_tier(DifficultyTier::Medium)
    }
}

impl DifficultyProfile {
    pub fn for_tier(tier: DifficultyTier) -> Self {
        match tier {
            DifficultyTier::Easy => Self {
                walk_speed: 7.0,
                chase_speed: 20.0,
                idle_min: 3.0,
                idle_max: 5.0,
                chase_max_duration: 4.0,
                sight_range: 70.0,
                hearing_range: 20.0,
                teleport_cooldown: 20.0,
                pre_teleport_duration: 1.5,
                ambient_density: 0.035,
            },
            // Medium sight_range оставлен огромным: на среднем уровне паук "видит" всю карту
            DifficultyTier::Medium => Self {
                walk_speed: 10.0,
                chase_speed: 30.0,
                idle_min: 2.0,
                idle_max: 4.0,
                chase_max_duration: 6.0,
                sight_range: 785.0,
                hearing_range: 30.0,
                teleport_cooldown: 15.0,
                pre_teleport_duration: 2.0,
                ambient_density: 0.085,
            },
            DifficultyTier::Hard => Self {
                walk_speed: 29.0,
                chase_speed: 40.0,
                idle_min: 0.9,
                idle_max: 2.6,
                chase_max_duration: 8.0,
                sight_range: 110.0,
                hearing_range: 40.0,
                teleport_cooldown: 10.0,
                pre_teleport_duration: 3.0,
                ambient_density: 0.125,
            },
        }
    }

    /// Проверка на NaN/отрицательные значения и перевёрнутый idle диапазон
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("walk_speed", self.walk_speed),
            ("chase_speed", self.chase_speed),
            ("idle_min", self.idle_min),
            ("idle_max", self.idle_max),
            ("chase_max_duration", self.chase_max_duration),
            ("sight_range", self.sight_range),
            ("hearing_range", self.hearing_range),
            ("teleport_cooldown", self.teleport_cooldown),
            ("pre_teleport_duration", self.pre_teleport_duration),
            ("ambient_density", self.ambient_density),
        ];

        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{} must be a finite non-negative number, got {}", name, value));
            }
        }

        if self.idle_min > self.idle_max {
            return Err(format!(
                "idle_min ({}) is greater than idle_max ({})",
                self.idle_min, self.idle_max
            ));
        }

        Ok(())
    }
}
