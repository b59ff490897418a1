//! AI reaction systems (stun, contact, caught, scene reload).

use bevy::prelude::*;

use crate::ai::{
    ContactWithTarget, Cue, PlayerCaught, PursuitChannel, PursuitController, PursuitNotice,
    PursuitStateChanged, SceneReloaded, StunRequest,
};
use crate::session::SessionState;

/// Система: StunRequest → PursuitController::stun
///
/// Только пишет stun timestamp; эффект применится в tick этого же кадра.
/// Окно считается от времени текущего fixed tick, а не от прошлого.
pub fn apply_stun_requests(
    mut requests: EventReader<StunRequest>,
    pursuers: Query<&PursuitController>,
    time: Res<Time<Fixed>>,
) {
    let now = time.elapsed_secs_f64();

    for request in requests.read() {
        let Ok(controller) = pursuers.get(request.pursuer) else {
            crate::log_warning(&format!("StunRequest: {:?} is not a pursuer", request.pursuer));
            continue;
        };

        controller.stun_at(request.duration, now);
    }
}

/// Система: ContactWithTarget → PursuitController::report_contact
pub fn apply_contact_events(
    mut contacts: EventReader<ContactWithTarget>,
    pursuers: Query<&PursuitController>,
) {
    for contact in contacts.read() {
        if let Ok(controller) = pursuers.get(contact.pursuer) {
            controller.report_contact();
        }
    }
}

/// Система: notices от controllers → Bevy events + SessionState
pub fn drain_pursuit_channel(
    channel: Res<PursuitChannel>,
    mut session: ResMut<SessionState>,
    mut caught_events: EventWriter<PlayerCaught>,
    mut state_events: EventWriter<PursuitStateChanged>,
) {
    for notice in channel.drain() {
        match notice {
            PursuitNotice::StateChanged { pursuer, from, to } => {
                state_events.write(PursuitStateChanged { pursuer, from, to });
            }
            PursuitNotice::Caught { pursuer, scene } => {
                if session.caught {
                    // Второй паук поймал в том же кадре — сцена уже запрошена
                    continue;
                }
                session.caught = true;
                session.pending_scene = Some(scene.clone());
                crate::log_info(&format!("💀 {:?} caught the player → scene '{}'", pursuer, scene));
                caught_events.write(PlayerCaught { pursuer, scene });
            }
            PursuitNotice::Cue { cue: Cue::TeleportExecuted, .. } => {
                session.teleports += 1;
            }
            PursuitNotice::Cue { cue: Cue::StunStarted, .. } => {
                session.stuns += 1;
            }
            PursuitNotice::Cue { .. } | PursuitNotice::Indicator { .. } => {}
        }
    }
}

/// Система: перезагрузка сцены → удалить pursuers, сбросить session
pub fn reset_session_on_reload(
    mut commands: Commands,
    mut reloads: EventReader<SceneReloaded>,
    pursuers: Query<Entity, With<PursuitController>>,
    channel: Res<PursuitChannel>,
    mut session: ResMut<SessionState>,
) {
    if reloads.read().next().is_none() {
        return;
    }

    for entity in pursuers.iter() {
        commands.entity(entity).despawn();
    }
    channel.drain();
    session.reset_for_reload();

    crate::log_info(&format!("Scene reloaded (load #{})", session.level_loads));
}
