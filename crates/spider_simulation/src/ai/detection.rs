//! Detection: слух + зрение (range-only).
//!
//! Policy: без occlusion raycast и без проверки достижимости по navmesh.
//! Слух безусловный (через стены), зрение — дистанция от глаз агента до глаз цели.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::collaborators::TargetTracker;
use crate::difficulty::DifficultyProfile;

/// Радиусы detection для одного difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionProfile {
    pub sight_radius: f32,
    pub hearing_radius: f32,
    pub eye_offset: Vec3,
}

impl DetectionProfile {
    pub fn from_difficulty(profile: &DifficultyProfile, eye_offset: Vec3) -> Self {
        Self {
            sight_radius: profile.sight_range,
            hearing_radius: profile.hearing_range,
            eye_offset,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.sight_radius.is_finite()
            && self.sight_radius >= 0.0
            && self.hearing_radius.is_finite()
            && self.hearing_radius >= 0.0
            && self.eye_offset.is_finite()
    }
}

/// Каким чувством обнаружена цель
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detection {
    Heard,
    Seen,
}

/// Обнаружена ли цель из `agent_position`
///
/// Слух проверяется первым: ближний радиус, не зависит от глаз.
pub fn detect(
    agent_position: Vec3,
    target: &dyn TargetTracker,
    profile: &DetectionProfile,
) -> Option<Detection> {
    if agent_position.distance(target.position()) <= profile.hearing_radius {
        return Some(Detection::Heard);
    }

    let eye = agent_position + profile.eye_offset;
    if eye.distance(target.eye_position()) <= profile.sight_radius {
        return Some(Detection::Seen);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::collaborators::SharedTarget;

    fn profile() -> DetectionProfile {
        DetectionProfile {
            sight_radius: 20.0,
            hearing_radius: 5.0,
            eye_offset: Vec3::Y,
        }
    }

    #[test]
    fn test_hearing_range_detects() {
        let target = SharedTarget::new(Vec3::new(4.0, 0.0, 0.0), 1.0);
        assert_eq!(detect(Vec3::ZERO, &target, &profile()), Some(Detection::Heard));
    }

    #[test]
    fn test_sight_range_detects_beyond_hearing() {
        let target = SharedTarget::new(Vec3::new(15.0, 0.0, 0.0), 1.0);
        assert_eq!(detect(Vec3::ZERO, &target, &profile()), Some(Detection::Seen));
    }

    #[test]
    fn test_out_of_range_is_not_detected() {
        let target = SharedTarget::new(Vec3::new(25.0, 0.0, 0.0), 1.0);
        assert_eq!(detect(Vec3::ZERO, &target, &profile()), None);
    }

    #[test]
    fn test_profile_from_difficulty() {
        let difficulty = DifficultyProfile::default();
        let detection = DetectionProfile::from_difficulty(&difficulty, Vec3::Y);
        assert_eq!(detection.sight_radius, difficulty.sight_range);
        assert_eq!(detection.hearing_radius, difficulty.hearing_range);
        assert!(detection.is_valid());
    }
}
