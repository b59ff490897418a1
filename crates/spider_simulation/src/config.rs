//! Конфигурация pursuit AI и persisted настройки игрока
//!
//! - `PursuitConfig` — параметры, не зависящие от сложности (teleport, grace, contact)
//! - `GameSettings` — JSON файл с выбранным уровнем сложности

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::difficulty::DifficultyTier;

/// Параметры pursuit AI (не зависят от difficulty tier)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PursuitConfig {
    /// Минимальная дистанция телепорта от цели (метры)
    pub teleport_min_distance: f32,
    /// Максимальная дистанция телепорта от цели (метры)
    pub teleport_max_distance: f32,
    /// Радиус поиска проходимой точки вокруг кандидата
    pub relocation_search_radius: f32,
    /// Grace period после старта уровня (секунды), AI полностью inert
    pub grace_period: f32,
    /// Смещение "глаз" относительно позиции агента
    pub eye_offset: Vec3,
    /// Сколько взаимозаменяемых warning звуков есть у сцены
    pub warning_variants: usize,
    /// Contact вне Chase ловит только ближе stopping_distance * factor
    pub contact_catch_factor: f32,
    /// Сцена, которую грузим при поимке игрока
    pub caught_scene: String,
}

impl Default for PursuitConfig {
    fn default() -> Self {
        Self {
            teleport_min_distance: 4.0,
            teleport_max_distance: 10.0,
            relocation_search_radius: 10.0,
            grace_period: 10.0,
            eye_offset: Vec3::new(0.0, 1.0, 0.0),
            warning_variants: 1,
            contact_catch_factor: 1.5,
            caught_scene: "GameOver".to_string(),
        }
    }
}

impl PursuitConfig {
    pub fn validate(&self) -> Result<(), String> {
        let distances = [
            ("teleport_min_distance", self.teleport_min_distance),
            ("teleport_max_distance", self.teleport_max_distance),
            ("relocation_search_radius", self.relocation_search_radius),
            ("grace_period", self.grace_period),
            ("contact_catch_factor", self.contact_catch_factor),
        ];

        for (name, value) in distances {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{} must be a finite non-negative number, got {}", name, value));
            }
        }

        if self.teleport_min_distance > self.teleport_max_distance {
            return Err(format!(
                "teleport_min_distance ({}) is greater than teleport_max_distance ({})",
                self.teleport_min_distance, self.teleport_max_distance
            ));
        }

        if !self.eye_offset.is_finite() {
            return Err("eye_offset must be finite".to_string());
        }

        Ok(())
    }
}

/// Ошибки чтения/записи настроек
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings file is malformed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Persisted настройки игрока (аналог PlayerPrefs)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// 0 = Easy, 1 = Medium, 2 = Hard
    pub selected_difficulty: i32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            selected_difficulty: DifficultyTier::Medium.to_persisted(),
        }
    }
}

impl GameSettings {
    /// Загрузить настройки; отсутствующий файл → defaults
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            crate::log(&format!("Settings: {} not found, using defaults", path.display()));
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let settings = serde_json::from_str(&raw)?;
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let raw = serde_json::to_string_pretty(self)?;
        std::fs::write(path, raw)?;
        crate::log_info(&format!(
            "Settings: difficulty set to {} and saved",
            self.difficulty_tier().label()
        ));
        Ok(())
    }

    pub fn select(&mut self, tier: DifficultyTier) {
        self.selected_difficulty = tier.to_persisted();
    }

    pub fn difficulty_tier(&self) -> DifficultyTier {
        DifficultyTier::from_persisted(self.selected_difficulty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pursuit_config_default() {
        let config = PursuitConfig::default();
        assert_eq!(config.teleport_min_distance, 4.0);
        assert_eq!(config.teleport_max_distance, 10.0);
        assert_eq!(config.grace_period, 10.0);
        assert_eq!(config.contact_catch_factor, 1.5);
        assert_eq!(config.caught_scene, "GameOver");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_pursuit_config_rejects_inverted_teleport_range() {
        let config = PursuitConfig {
            teleport_min_distance: 12.0,
            teleport_max_distance: 3.0,
            ..PursuitConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_settings_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let settings = GameSettings::load(&dir.path().join("missing.json")).expect("load");
        assert_eq!(settings.difficulty_tier(), DifficultyTier::Medium);
    }

    #[test]
    fn test_settings_save_then_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.json");

        let mut settings = GameSettings::default();
        settings.select(DifficultyTier::Hard);
        settings.save(&path).expect("save");

        let loaded = GameSettings::load(&path).expect("load");
        assert_eq!(loaded.difficulty_tier(), DifficultyTier::Hard);
    }

    #[test]
    fn test_settings_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").expect("write");

        assert!(matches!(GameSettings::load(&path), Err(SettingsError::Parse(_))));
    }

    #[test]
    fn test_pursuit_config_partial_json_uses_defaults() {
        let config: PursuitConfig =
            serde_json::from_str(r#"{ "grace_period": 3.0 }"#).expect("parse");
        assert_eq!(config.grace_period, 3.0);
        assert_eq!(config.teleport_max_distance, 10.0);
    }
}
