//! Tests for pursuit state components.

#[cfg(test)]
mod tests {
    use super::super::state::{IndicatorColor, PursuitState};

    #[test]
    fn test_pursuit_state_default() {
        assert_eq!(PursuitState::default(), PursuitState::Idle);
    }

    #[test]
    fn test_detection_only_outside_pursuit() {
        assert!(PursuitState::Idle.accepts_detection());
        assert!(PursuitState::Patrol.accepts_detection());
        assert!(!PursuitState::Chase.accepts_detection());
        assert!(!PursuitState::PreTeleport.accepts_detection());
    }

    #[test]
    fn test_stun_color_wins_over_warning() {
        assert_eq!(
            IndicatorColor::resolve(PursuitState::PreTeleport, true),
            IndicatorColor::Stunned
        );
        assert_eq!(
            IndicatorColor::resolve(PursuitState::PreTeleport, false),
            IndicatorColor::Warning
        );
        assert_eq!(IndicatorColor::resolve(PursuitState::Chase, false), IndicatorColor::Normal);
    }
}
