//! Headless симуляция паука
//!
//! Запускает Bevy App без рендера: игрок стоит на площадке, паук патрулирует,
//! замечает и ловит. Сложность берётся из settings JSON (путь — первый аргумент).

use std::path::PathBuf;

use bevy::prelude::*;
use spider_simulation::{
    create_headless_app, feedback, log_error, pursuit_snapshot, spawn_pursuer, spawn_target, DifficultyProfile,
    GameSettings, PlayerCaught, PursuerSpawn, PursuitConfig, PursuitController, StunRequest, WorldPosition,
};
use spider_simulation::feedback::StunIndicator;
use spider_simulation::navigation::WalkableArea;

const TICKS: usize = 3000;
/// Скриптовое попадание лучом сразу после grace
const STUN_TICK: usize = 190;
const STUN_DURATION: f32 = 2.0;

fn main() {
    let seed = 42;
    let settings_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("settings.json"));

    let settings = match GameSettings::load(&settings_path) {
        Ok(settings) => settings,
        Err(err) => {
            log_error(&format!("Failed to read {}: {}", settings_path.display(), err));
            GameSettings::default()
        }
    };
    let tier = settings.difficulty_tier();
    println!("Starting spider headless simulation (seed: {}, difficulty: {})", seed, tier.label());

    let mut app = create_headless_app(seed);
    let config = PursuitConfig {
        grace_period: 3.0,
        ..PursuitConfig::default()
    };

    let world = app.world_mut();
    let target = spawn_target(world, Vec3::new(12.0, 0.0, 12.0), 1.6);
    let spawn = PursuerSpawn::new(
        Vec3::new(-20.0, 0.0, -20.0),
        WalkableArea::square(30.0, 0.0),
        vec![
            Vec3::new(-20.0, 0.0, -20.0),
            Vec3::new(20.0, 0.0, -20.0),
            Vec3::new(20.0, 0.0, 20.0),
            Vec3::new(-20.0, 0.0, 20.0),
        ],
    )
    .with_difficulty(DifficultyProfile::for_tier(tier))
    .with_config(config);

    let pursuer = match spawn_pursuer(world, target, spawn) {
        Ok(pursuer) => pursuer,
        Err(err) => {
            eprintln!("Pursuer spawn failed: {}", err);
            std::process::exit(1);
        }
    };

    let mut countdown = String::new();
    let mut stun_indicator = StunIndicator::default();

    let mut caught_cursor = app.world().resource::<Events<PlayerCaught>>().get_cursor();

    for tick in 0..TICKS {
        if tick == STUN_TICK {
            app.world_mut().send_event(StunRequest {
                pursuer,
                duration: STUN_DURATION,
            });
        }
        app.update();

        let now = app.world().resource::<Time<Fixed>>().elapsed_secs_f64();
        if let Some(controller) = app.world().get::<PursuitController>(pursuer) {
            // HUD: countdown меняется раз в секунду, индикатор — только на переходах
            let text = feedback::format_countdown(controller.grace_remaining(now));
            if text != countdown {
                if text.is_empty() {
                    println!("Tick {}: grace over", tick);
                } else {
                    println!("Tick {}: grace {}", tick, text);
                }
                countdown = text;
            }

            if let Some(visible) = stun_indicator.update(controller.is_stunned()) {
                println!("Tick {}: stun indicator {}", tick, if visible { "on" } else { "off" });
            }
        }

        let caught: Vec<PlayerCaught> = caught_cursor
            .read(app.world().resource::<Events<PlayerCaught>>())
            .cloned()
            .collect();
        if let Some(event) = caught.first() {
            println!("Tick {}: player caught → loading '{}'", tick, event.scene);
            break;
        }

        if tick % 100 == 0 {
            let target_position = app.world().get::<WorldPosition>(target).map(|p| p.0);
            for pursuer in pursuit_snapshot(app.world_mut()) {
                let pitch = target_position
                    .map(|t| feedback::heartbeat_pitch(t.distance(pursuer.position)))
                    .unwrap_or(feedback::HEARTBEAT_MIN_PITCH);
                println!(
                    "Tick {}: {:?} at {:?} (heartbeat {:.2})",
                    tick,
                    pursuer.state,
                    pursuer.position,
                    pitch
                );
            }
        }
    }

    println!("Simulation complete!");
}
