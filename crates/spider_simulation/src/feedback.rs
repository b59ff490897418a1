//! Player-facing feedback, производная от состояния паука
//!
//! - grace countdown (mm:ss) для HUD
//! - pitch сердцебиения по дистанции до паука
//! - видимость stun индикатора (только переходы)

/// Дистанция, дальше которой сердцебиение на минимальном pitch
pub const HEARTBEAT_RANGE: f32 = 40.0;
pub const HEARTBEAT_MIN_PITCH: f32 = 0.6;
pub const HEARTBEAT_MAX_PITCH: f32 = 2.0;
/// Скорость сглаживания pitch (1/сек)
pub const HEARTBEAT_SMOOTHING: f32 = 5.0;

/// Текст grace countdown: "mm:ss", пустая строка когда время вышло
pub fn format_countdown(remaining_secs: f32) -> String {
    let remaining = remaining_secs.max(0.0);
    if remaining <= 0.01 {
        return String::new();
    }

    let total = remaining.ceil() as u32;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Целевой pitch сердцебиения: ближе паук → быстрее
pub fn heartbeat_pitch(distance: f32) -> f32 {
    let closeness = 1.0 - (distance / HEARTBEAT_RANGE).clamp(0.0, 1.0);
    HEARTBEAT_MIN_PITCH + (HEARTBEAT_MAX_PITCH - HEARTBEAT_MIN_PITCH) * closeness
}

/// Плавное приближение текущего pitch к целевому
pub fn smooth_pitch(current: f32, target: f32, delta: f32) -> f32 {
    let t = (delta * HEARTBEAT_SMOOTHING).clamp(0.0, 1.0);
    current + (target - current) * t
}

/// Показывает/прячет stun индикатор; сообщает только о смене видимости
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StunIndicator {
    visible: bool,
}

impl StunIndicator {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Some(new_visibility) если индикатор нужно переключить
    pub fn update(&mut self, stunned: bool) -> Option<bool> {
        if self.visible == stunned {
            return None;
        }
        self.visible = stunned;
        Some(stunned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_format() {
        assert_eq!(format_countdown(10.0), "00:10");
        assert_eq!(format_countdown(9.2), "00:10"); // ceil
        assert_eq!(format_countdown(75.0), "01:15");
        assert_eq!(format_countdown(0.005), "");
        assert_eq!(format_countdown(-3.0), "");
    }

    #[test]
    fn test_heartbeat_pitch_bounds() {
        assert!((heartbeat_pitch(0.0) - HEARTBEAT_MAX_PITCH).abs() < 1e-5);
        assert_eq!(heartbeat_pitch(40.0), HEARTBEAT_MIN_PITCH);
        assert_eq!(heartbeat_pitch(400.0), HEARTBEAT_MIN_PITCH);
        assert!((heartbeat_pitch(20.0) - 1.3).abs() < 1e-5);
    }

    #[test]
    fn test_smooth_pitch_moves_toward_target() {
        let next = smooth_pitch(1.0, 2.0, 0.1);
        assert!((next - 1.5).abs() < 1e-5);
        // Большой delta не перелетает цель
        assert_eq!(smooth_pitch(1.0, 2.0, 10.0), 2.0);
    }

    #[test]
    fn test_stun_indicator_reports_only_changes() {
        let mut indicator = StunIndicator::default();
        assert_eq!(indicator.update(false), None);
        assert_eq!(indicator.update(true), Some(true));
        assert_eq!(indicator.update(true), None);
        assert!(indicator.is_visible());
        assert_eq!(indicator.update(false), Some(false));
    }
}
