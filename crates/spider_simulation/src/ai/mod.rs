//! Pursuit AI (паук)
//!
//! Core: `PursuitController` — FSM Idle → Patrol → Chase → PreTeleport,
//! tick-driven, без Bevy систем внутри (тестируется как обычный struct).
//! ECS: `PursuitPlugin` гоняет controllers в FixedUpdate.

use bevy::prelude::*;

pub mod collaborators;
pub mod components;
pub mod controller;
pub mod detection;
pub mod error;
pub mod events;
pub mod signals;
pub mod spawn;
pub mod systems;
pub mod teleport;


// Re-export основных типов
pub use collaborators::{Cue, CueSink, NullCues, PursuitObserver, SceneService, SharedTarget, TargetTracker};
pub use components::{IndicatorColor, PursuitState};
pub use controller::{PursuitController, PursuitControllerBuilder};
pub use detection::{detect, Detection, DetectionProfile};
pub use error::ConfigError;
pub use events::{
    ChannelReporter, ContactWithTarget, PlayerCaught, PursuitChannel, PursuitNotice, PursuitStateChanged,
    SceneReloaded, StunRequest,
};
pub use signals::StunHandle;
pub use spawn::{spawn_pursuer, spawn_target, PursuerSpawn};
pub use teleport::{relocate, relocation_candidate, Relocation};

use crate::session::SessionState;

/// Pursuit Plugin
///
/// Регистрирует pursuit системы в FixedUpdate для детерминизма.
/// Порядок выполнения:
/// 1. sync_target_positions — WorldPosition цели → SharedTarget
/// 2. apply_stun_requests / apply_contact_events — interrupts
/// 3. tick_pursuers — FSM tick
/// 4. advance_pursuer_navigation — движение агентов → WorldPosition
/// 5. drain_pursuit_channel — notices → PlayerCaught / PursuitStateChanged
/// 6. reset_session_on_reload — SceneReloaded → сброс
pub struct PursuitPlugin;

impl Plugin for PursuitPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PursuitChannel>()
            .init_resource::<SessionState>()
            .add_event::<StunRequest>()
            .add_event::<ContactWithTarget>()
            .add_event::<PlayerCaught>()
            .add_event::<PursuitStateChanged>()
            .add_event::<SceneReloaded>()
            .add_systems(
                FixedUpdate,
                (
                    systems::sync_target_positions,
                    systems::apply_stun_requests,
                    systems::apply_contact_events,
                    systems::tick_pursuers,
                    systems::advance_pursuer_navigation,
                    systems::drain_pursuit_channel,
                    systems::reset_session_on_reload,
                )
                    .chain(), // Последовательное выполнение для детерминизма
            );
    }
}
