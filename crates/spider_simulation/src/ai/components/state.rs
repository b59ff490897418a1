//! Pursuit FSM состояния и цвет индикатора.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Состояния pursuit AI
///
/// Idle → Patrol → Idle ... пока не обнаружили цель,
/// дальше Chase ⇄ PreTeleport или Chase → Idle (сдался).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect, Serialize, Deserialize)]
pub enum PursuitState {
    /// Стоим на месте, ждём idle timer
    #[default]
    Idle,

    /// Идём к выбранной patrol точке
    Patrol,

    /// Преследуем цель на chase speed
    Chase,

    /// Предупреждение перед телепортом (агент стоит)
    PreTeleport,
}

impl PursuitState {
    /// Detection проверяется только вне погони
    pub fn accepts_detection(self) -> bool {
        matches!(self, Self::Idle | Self::Patrol)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Patrol => "Patrol",
            Self::Chase => "Chase",
            Self::PreTeleport => "PreTeleport",
        }
    }
}

/// Цвет spotlight индикатора паука
///
/// Приоритет: Stunned > Warning > Normal (stun всегда перекрывает PreTeleport).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect, Serialize, Deserialize)]
pub enum IndicatorColor {
    /// Исходный цвет света
    #[default]
    Normal,
    /// Жёлтый — PreTeleport warning
    Warning,
    /// Зелёный — оглушён
    Stunned,
}

impl IndicatorColor {
    pub fn resolve(state: PursuitState, stunned: bool) -> Self {
        if stunned {
            Self::Stunned
        } else if state == PursuitState::PreTeleport {
            Self::Warning
        } else {
            Self::Normal
        }
    }
}
