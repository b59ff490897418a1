//! FSM tick system: один tick PursuitController на FixedUpdate.

use bevy::prelude::*;

use crate::ai::PursuitController;

/// Система: tick всех pursuit controllers
///
/// Wall time = elapsed fixed time: deadlines (grace, idle, pre-teleport, stun)
/// считаются в одном времени с delta, поэтому прогон детерминирован.
pub fn tick_pursuers(mut pursuers: Query<&mut PursuitController>, time: Res<Time<Fixed>>) {
    let delta = time.delta_secs();
    let now = time.elapsed_secs_f64();

    for mut controller in pursuers.iter_mut() {
        controller.tick(delta, now);
    }
}
