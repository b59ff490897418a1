//! AI Events — вход (stun, contact) и выход (caught, смена состояния) pursuit AI
//!
//! Вход пишет игровая логика (попадание луча, trigger коллизия),
//! выход читают UI/сцена. Controller про Bevy events не знает:
//! выходные события собираются через `PursuitChannel`.

use std::sync::{Arc, Mutex};

use bevy::prelude::*;

use super::collaborators::{Cue, CueSink, PursuitObserver, SceneService};
use super::components::{IndicatorColor, PursuitState};

/// Оглушить паука (луч/удар попал)
#[derive(Event, Debug, Clone)]
pub struct StunRequest {
    pub pursuer: Entity,
    pub duration: f32,
}

/// Прямая коллизия паука с целью (trigger enter)
#[derive(Event, Debug, Clone)]
pub struct ContactWithTarget {
    pub pursuer: Entity,
}

/// Игрок пойман: нужно загрузить `scene`
#[derive(Event, Debug, Clone)]
pub struct PlayerCaught {
    pub pursuer: Entity,
    pub scene: String,
}

#[derive(Event, Debug, Clone)]
pub struct PursuitStateChanged {
    pub pursuer: Entity,
    pub from: PursuitState,
    pub to: PursuitState,
}

/// Сцена перезагружена: pursuers удаляются, session сбрасывается
#[derive(Event, Debug, Clone, Default)]
pub struct SceneReloaded;

/// Что произошло внутри controller за tick
#[derive(Debug, Clone, PartialEq)]
pub enum PursuitNotice {
    StateChanged {
        pursuer: Entity,
        from: PursuitState,
        to: PursuitState,
    },
    Caught {
        pursuer: Entity,
        scene: String,
    },
    Cue {
        pursuer: Entity,
        cue: Cue,
    },
    Indicator {
        pursuer: Entity,
        color: IndicatorColor,
    },
}

/// Очередь notices от всех controllers (drain раз в FixedUpdate)
#[derive(Resource, Debug, Clone, Default)]
pub struct PursuitChannel {
    queue: Arc<Mutex<Vec<PursuitNotice>>>,
}

impl PursuitChannel {
    pub fn reporter(&self, pursuer: Entity) -> ChannelReporter {
        ChannelReporter {
            pursuer,
            channel: self.clone(),
        }
    }

    fn push(&self, notice: PursuitNotice) {
        self.queue
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(notice);
    }

    pub fn drain(&self) -> Vec<PursuitNotice> {
        std::mem::take(&mut *self.queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner()))
    }
}

/// Scene/cue/observer реализация для ECS: всё складывает в `PursuitChannel`
#[derive(Debug, Clone)]
pub struct ChannelReporter {
    pursuer: Entity,
    channel: PursuitChannel,
}

impl SceneService for ChannelReporter {
    fn on_player_caught(&mut self, scene: &str) {
        self.channel.push(PursuitNotice::Caught {
            pursuer: self.pursuer,
            scene: scene.to_string(),
        });
    }
}

impl CueSink for ChannelReporter {
    fn play(&mut self, cue: Cue) {
        self.channel.push(PursuitNotice::Cue {
            pursuer: self.pursuer,
            cue,
        });
    }

    fn set_indicator(&mut self, color: IndicatorColor) {
        self.channel.push(PursuitNotice::Indicator {
            pursuer: self.pursuer,
            color,
        });
    }
}

impl PursuitObserver for ChannelReporter {
    fn on_state_changed(&mut self, from: PursuitState, to: PursuitState) {
        self.channel.push(PursuitNotice::StateChanged {
            pursuer: self.pursuer,
            from,
            to,
        });
    }
}
