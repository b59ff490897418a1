//! Session state одного прохождения уровня
//!
//! Вместо static счётчиков: resource с явным сбросом при перезагрузке сцены.
//! Сбрасывается всё, кроме счётчика загрузок уровня.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    /// Сколько раз уровень загружался (не сбрасывается)
    pub level_loads: u32,
    pub teleports: u32,
    pub stuns: u32,
    /// Игрок пойман — ждём смену сцены
    pub caught: bool,
    /// Сцена, которую запросил AI при поимке
    pub pending_scene: Option<String>,
}

impl SessionState {
    pub fn reset_for_reload(&mut self) {
        *self = Self {
            level_loads: self.level_loads + 1,
            ..Self::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_keeps_only_load_counter() {
        let mut session = SessionState {
            level_loads: 2,
            teleports: 5,
            stuns: 1,
            caught: true,
            pending_scene: Some("GameOver".to_string()),
        };

        session.reset_for_reload();

        assert_eq!(
            session,
            SessionState {
                level_loads: 3,
                ..SessionState::default()
            }
        );
    }
}
