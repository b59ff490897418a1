//! Ошибки конфигурации pursuit AI (fail fast при инициализации)

use bevy::prelude::*;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("navigation agent is missing")]
    MissingNavigation,

    #[error("pursuit target is missing")]
    MissingTarget,

    #[error("scene service is missing")]
    MissingSceneService,

    #[error("patrol route is empty")]
    EmptyPatrolRoute,

    #[error("patrol waypoint #{index} is not a finite position: {point:?}")]
    InvalidWaypoint { index: usize, point: Vec3 },

    #[error("invalid difficulty profile: {0}")]
    InvalidDifficulty(String),

    #[error("invalid detection profile: {0:?}")]
    InvalidDetection(crate::ai::DetectionProfile),

    #[error("invalid pursuit config: {0}")]
    InvalidConfig(String),
}
