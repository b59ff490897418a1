//! Movement systems: позиция цели → controller, агент → WorldPosition.

use bevy::prelude::*;

use crate::ai::PursuitController;
use crate::components::{PursuitTarget, WorldPosition};

/// Система: синхронизация позиции цели в SharedTarget
///
/// Запускается ДО tick, чтобы detection видел позицию этого кадра.
pub fn sync_target_positions(targets: Query<(&WorldPosition, &PursuitTarget), Changed<WorldPosition>>) {
    for (position, target) in targets.iter() {
        target.handle.set_position(position.0);
    }
}

/// Система: движение агентов после tick
///
/// Controller сам решает, можно ли двигаться (stun, grace, caught).
pub fn advance_pursuer_navigation(
    mut pursuers: Query<(&mut PursuitController, &mut WorldPosition)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mut controller, mut position) in pursuers.iter_mut() {
        controller.advance_agent(delta);

        let current = controller.navigation().position();
        // Проверяем что позиция изменилась — иначе Changed<WorldPosition> спамит
        if position.0 != current {
            position.0 = current;
        }
    }
}
