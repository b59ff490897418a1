//! PursuitController — ядро spider AI
//!
//! FSM: Idle → Patrol → Idle ..., {Idle, Patrol} → Chase,
//! Chase → PreTeleport → Chase, Chase → Idle (сдался), Chase → caught (terminal).
//!
//! Порядок внутри tick (важен!):
//! 1. halted (игрок пойман) — ничего не делаем
//! 2. grace window — inert до истечения, потом один раз заново входим в Idle
//! 3. stun — агент стоит, таймеры не накапливаются, detection не работает
//! 4. contact с целью (collision callback)
//! 5. накопление teleport cooldown
//! 6. detection (только Idle/Patrol)
//! 7. update текущего состояния
//!
//! Все "подождать N секунд" — абсолютные deadlines, сравниваются раз в tick.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::collaborators::{Cue, CueSink, NullCues, PursuitObserver, SceneService, TargetTracker};
use super::components::{IndicatorColor, PursuitState};
use super::detection::{detect, DetectionProfile};
use super::error::ConfigError;
use super::signals::StunHandle;
use super::teleport::{relocate, Relocation};
use crate::config::PursuitConfig;
use crate::difficulty::DifficultyProfile;
use crate::navigation::NavigationAgent;

/// Builder для `PursuitController`
///
/// Обязательные: navigation, target, scene, непустой patrol route.
/// Без них `build` возвращает `ConfigError` (fail fast вместо "стоять в Idle вечно").
#[derive(Default)]
pub struct PursuitControllerBuilder {
    navigation: Option<Box<dyn NavigationAgent>>,
    target: Option<Box<dyn TargetTracker>>,
    scene: Option<Box<dyn SceneService>>,
    cues: Option<Box<dyn CueSink>>,
    observer: Option<Box<dyn PursuitObserver>>,
    route: Vec<Vec3>,
    difficulty: DifficultyProfile,
    detection: Option<DetectionProfile>,
    config: PursuitConfig,
    seed: u64,
}

impl PursuitControllerBuilder {
    pub fn navigation(mut self, nav: impl NavigationAgent + 'static) -> Self {
        self.navigation = Some(Box::new(nav));
        self
    }

    pub fn target(mut self, target: impl TargetTracker + 'static) -> Self {
        self.target = Some(Box::new(target));
        self
    }

    pub fn scene(mut self, scene: impl SceneService + 'static) -> Self {
        self.scene = Some(Box::new(scene));
        self
    }

    pub fn cues(mut self, cues: impl CueSink + 'static) -> Self {
        self.cues = Some(Box::new(cues));
        self
    }

    pub fn observer(mut self, observer: impl PursuitObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn patrol_route(mut self, waypoints: impl IntoIterator<Item = Vec3>) -> Self {
        self.route = waypoints.into_iter().collect();
        self
    }

    pub fn difficulty(mut self, profile: DifficultyProfile) -> Self {
        self.difficulty = profile;
        self
    }

    /// По умолчанию detection берётся из difficulty + `config.eye_offset`
    pub fn detection(mut self, profile: DetectionProfile) -> Self {
        self.detection = Some(profile);
        self
    }

    pub fn config(mut self, config: PursuitConfig) -> Self {
        self.config = config;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Инициализация: агент стоит в Idle, grace window до `now + grace_period`
    pub fn build(self, now: f64) -> Result<PursuitController, ConfigError> {
        let nav = self.navigation.ok_or(ConfigError::MissingNavigation)?;
        let target = self.target.ok_or(ConfigError::MissingTarget)?;
        let scene = self.scene.ok_or(ConfigError::MissingSceneService)?;

        if self.route.is_empty() {
            return Err(ConfigError::EmptyPatrolRoute);
        }
        if let Some((index, point)) = self.route.iter().enumerate().find(|(_, p)| !p.is_finite()) {
            return Err(ConfigError::InvalidWaypoint { index, point: *point });
        }

        self.difficulty.validate().map_err(ConfigError::InvalidDifficulty)?;
        self.config.validate().map_err(ConfigError::InvalidConfig)?;

        let detection = self
            .detection
            .unwrap_or_else(|| DetectionProfile::from_difficulty(&self.difficulty, self.config.eye_offset));
        if !detection.is_valid() {
            return Err(ConfigError::InvalidDetection(detection));
        }

        let mut controller = PursuitController {
            state: PursuitState::Idle,
            route: self.route,
            detection,
            difficulty: self.difficulty,
            grace_end: now + f64::from(self.config.grace_period),
            config: self.config,
            nav,
            target,
            scene,
            cues: self.cues.unwrap_or_else(|| Box::new(NullCues)),
            observer: self.observer,
            rng: ChaCha8Rng::seed_from_u64(self.seed),
            signals: StunHandle::new(now),
            last_patrol_index: None,
            state_deadline: now,
            chase_elapsed: 0.0,
            cooldown_accumulator: 0.0,
            grace_done: false,
            stun_active: false,
            halted: false,
            detected: false,
            indicator: IndicatorColor::Normal,
        };

        crate::log_info(&format!(
            "Pursuit: initialized ({} waypoints, walk {:.1}, chase {:.1}, grace {:.1}s, seed {})",
            controller.route.len(),
            controller.difficulty.walk_speed,
            controller.difficulty.chase_speed,
            controller.config.grace_period,
            self.seed
        ));

        controller
            .cues
            .play(Cue::AmbientDensity(controller.difficulty.ambient_density));
        controller.enter_idle(now);

        Ok(controller)
    }
}

/// Pursuit AI одного актора (паука)
#[derive(Component)]
pub struct PursuitController {
    state: PursuitState,
    route: Vec<Vec3>,
    detection: DetectionProfile,
    difficulty: DifficultyProfile,
    config: PursuitConfig,

    nav: Box<dyn NavigationAgent>,
    target: Box<dyn TargetTracker>,
    scene: Box<dyn SceneService>,
    cues: Box<dyn CueSink>,
    observer: Option<Box<dyn PursuitObserver>>,

    rng: ChaCha8Rng,
    signals: StunHandle,

    last_patrol_index: Option<usize>,
    /// Idle: конец ожидания; PreTeleport: момент телепорта
    state_deadline: f64,
    chase_elapsed: f32,
    /// Время с последнего телепорта (или сброса при отказе от погони)
    cooldown_accumulator: f32,
    grace_end: f64,
    grace_done: bool,
    stun_active: bool,
    halted: bool,
    detected: bool,
    indicator: IndicatorColor,
}

impl PursuitController {
    pub fn builder() -> PursuitControllerBuilder {
        PursuitControllerBuilder::default()
    }

    /// Один кадр симуляции
    pub fn tick(&mut self, delta: f32, now: f64) {
        if self.halted {
            return;
        }

        self.signals.observe_time(now);
        let delta = if delta.is_finite() { delta.max(0.0) } else { 0.0 };

        if !self.grace_done {
            if now < self.grace_end {
                self.nav.set_stopped(true);
                self.signals.take_contact();
                return;
            }

            self.grace_done = true;
            self.nav.set_stopped(false);
            crate::log_info("Pursuit: grace period over, AI active");
            self.enter_idle(now);
        }

        if self.update_stun() {
            return;
        }

        if self.signals.take_contact() && self.contact_catches() {
            self.handle_caught();
            return;
        }

        self.cooldown_accumulator += delta;

        if self.state.accepts_detection() && self.observe_detection() {
            self.enter_chase();
        }

        match self.state {
            PursuitState::Idle => self.update_idle(now),
            PursuitState::Patrol => self.update_patrol(now),
            PursuitState::Chase => self.update_chase(delta, now),
            PursuitState::PreTeleport => self.update_pre_teleport(now),
        }
    }

    /// Оглушить (только продлевает текущий stun)
    pub fn stun(&self, duration: f32) -> bool {
        let extended = self.signals.stun(duration);
        if !extended {
            crate::log(&format!("Pursuit: stun({:.2}) ignored, current stun lasts longer", duration));
        }
        extended
    }

    /// Оглушить от явного wall time `now` (время текущего tick)
    pub fn stun_at(&self, duration: f32, now: f64) -> bool {
        let extended = self.signals.stun_at(duration, now);
        if !extended {
            crate::log(&format!("Pursuit: stun({:.2}) at {:.2} ignored", duration, now));
        }
        extended
    }

    pub fn is_stunned(&self) -> bool {
        self.signals.is_stunned()
    }

    /// Handle для callbacks вне tick (beam hit, trigger enter)
    pub fn stun_handle(&self) -> StunHandle {
        self.signals.clone()
    }

    pub fn report_contact(&self) {
        self.signals.report_contact();
    }

    /// Продвинуть агента (headless навигация). Пойманный/оглушённый агент не двигается.
    pub fn advance_agent(&mut self, delta: f32) {
        if self.halted || !self.grace_done || self.stun_active || self.signals.is_stunned() {
            return;
        }
        self.nav.advance(delta);
    }

    pub fn state(&self) -> PursuitState {
        self.state
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn is_grace_active(&self) -> bool {
        !self.grace_done
    }

    /// Сколько секунд осталось до конца grace window
    pub fn grace_remaining(&self, now: f64) -> f32 {
        if self.grace_done {
            return 0.0;
        }
        (self.grace_end - now).max(0.0) as f32
    }

    pub fn cooldown_accumulator(&self) -> f32 {
        self.cooldown_accumulator
    }

    pub fn chase_elapsed(&self) -> f32 {
        self.chase_elapsed
    }

    pub fn state_deadline(&self) -> f64 {
        self.state_deadline
    }

    pub fn indicator(&self) -> IndicatorColor {
        self.indicator
    }

    pub fn last_patrol_index(&self) -> Option<usize> {
        self.last_patrol_index
    }

    pub fn patrol_route(&self) -> &[Vec3] {
        &self.route
    }

    pub fn difficulty(&self) -> &DifficultyProfile {
        &self.difficulty
    }

    pub fn detection_profile(&self) -> &DetectionProfile {
        &self.detection
    }

    pub fn config(&self) -> &PursuitConfig {
        &self.config
    }

    pub fn navigation(&self) -> &dyn NavigationAgent {
        self.nav.as_ref()
    }

    // --- stun / contact ---

    /// true если агент оглушён в этом tick (дальше ничего не делаем)
    fn update_stun(&mut self) -> bool {
        if self.signals.is_stunned() {
            // Contact во время stun не ловит
            self.signals.take_contact();

            if !self.stun_active {
                self.stun_active = true;
                crate::log_info(&format!(
                    "Pursuit: stunned in {} until {:.2}",
                    self.state.as_str(),
                    self.signals.stun_expiry()
                ));
                self.cues.play(Cue::StunStarted);
                if let Some(observer) = self.observer.as_mut() {
                    observer.on_stun_changed(true);
                }
            }

            self.nav.set_stopped(true);
            self.refresh_indicator();
            return true;
        }

        if self.stun_active {
            self.stun_active = false;
            crate::log_info(&format!("Pursuit: stun over, resuming {}", self.state.as_str()));
            self.restore_motion();
            self.cues.play(Cue::StunEnded);
            if let Some(observer) = self.observer.as_mut() {
                observer.on_stun_changed(false);
            }
            self.refresh_indicator();
        }

        false
    }

    /// После stun: скорость и stopped по текущему состоянию
    fn restore_motion(&mut self) {
        match self.state {
            PursuitState::Idle => {
                self.nav.set_speed(self.difficulty.walk_speed);
                self.nav.set_stopped(true);
            }
            PursuitState::Patrol => {
                self.nav.set_speed(self.difficulty.walk_speed);
                self.nav.set_stopped(false);
            }
            PursuitState::Chase => {
                self.nav.set_speed(self.difficulty.chase_speed);
                self.nav.set_stopped(false);
            }
            // PreTeleport стоит до своего deadline
            PursuitState::PreTeleport => self.nav.set_stopped(true),
        }
    }

    fn contact_catches(&self) -> bool {
        if self.state == PursuitState::Chase {
            return true;
        }
        let distance = self.nav.position().distance(self.target.position());
        distance < self.nav.stopping_distance() * self.config.contact_catch_factor
    }

    // --- detection ---

    fn observe_detection(&mut self) -> bool {
        let detected = detect(self.nav.position(), self.target.as_ref(), &self.detection).is_some();

        if detected != self.detected {
            self.detected = detected;
            if let Some(observer) = self.observer.as_mut() {
                observer.on_detection_changed(detected);
            }
        }

        detected
    }

    // --- states ---

    fn transition(&mut self, to: PursuitState) {
        let from = self.state;
        self.state = to;

        if from != to {
            crate::log_info(&format!("Pursuit: {} → {}", from.as_str(), to.as_str()));
            if let Some(observer) = self.observer.as_mut() {
                observer.on_state_changed(from, to);
            }
        }
    }

    fn enter_idle(&mut self, now: f64) {
        self.transition(PursuitState::Idle);
        self.nav.set_speed(self.difficulty.walk_speed);
        self.nav.set_stopped(true);
        self.chase_elapsed = 0.0;

        let (min, max) = (self.difficulty.idle_min, self.difficulty.idle_max);
        let wait = if min < max { self.rng.gen_range(min..=max) } else { min };
        self.state_deadline = now + f64::from(wait);

        self.refresh_indicator();
    }

    fn update_idle(&mut self, now: f64) {
        if now < self.state_deadline {
            return;
        }

        let index = self.next_patrol_index();
        self.last_patrol_index = Some(index);

        let waypoint = self.route[index];
        self.nav.set_stopped(false);
        self.nav.set_destination(waypoint);
        self.transition(PursuitState::Patrol);
    }

    /// Следующая patrol точка: никогда не повторяет предыдущую, если точек > 1
    fn next_patrol_index(&mut self) -> usize {
        pick_waypoint(&mut self.rng, self.route.len(), self.last_patrol_index)
    }

    fn update_patrol(&mut self, now: f64) {
        if self.nav.has_arrived() {
            self.enter_idle(now);
        }
    }

    fn enter_chase(&mut self) {
        self.transition(PursuitState::Chase);
        self.chase_elapsed = 0.0;
        self.nav.set_speed(self.difficulty.chase_speed);
        self.nav.set_stopped(false);
        self.refresh_indicator();
    }

    fn update_chase(&mut self, delta: f32, now: f64) {
        self.chase_elapsed += delta;

        self.nav.set_destination(self.target.position());
        if self.nav.has_arrived() {
            self.handle_caught();
            return;
        }

        if self.observe_detection() {
            return;
        }

        if self.cooldown_accumulator >= self.difficulty.teleport_cooldown {
            self.enter_pre_teleport(now);
        } else if self.chase_elapsed >= self.difficulty.chase_max_duration {
            crate::log(&format!(
                "Pursuit: lost target after {:.1}s of chase, giving up",
                self.chase_elapsed
            ));
            self.cooldown_accumulator = 0.0;
            self.enter_idle(now);
        }
    }

    fn enter_pre_teleport(&mut self, now: f64) {
        self.transition(PursuitState::PreTeleport);
        self.nav.set_stopped(true);
        self.state_deadline = now + f64::from(self.difficulty.pre_teleport_duration);

        if self.config.warning_variants > 0 {
            let variant = self.rng.gen_range(0..self.config.warning_variants);
            self.cues.play(Cue::PreTeleportWarning { variant });
        }

        self.refresh_indicator();
    }

    fn update_pre_teleport(&mut self, now: f64) {
        if now >= self.state_deadline {
            self.execute_teleport();
        }
    }

    fn execute_teleport(&mut self) {
        let target_position = self.target.position();

        match relocate(self.nav.as_mut(), &mut self.rng, target_position, &self.config) {
            Relocation::Warped(point) => {
                crate::log_info(&format!(
                    "Pursuit: teleported to {:?} ({:.1}m from target)",
                    point,
                    point.distance(target_position)
                ));
                self.cues.play(Cue::TeleportExecuted);
            }
            Relocation::NoSurface { .. } => {}
        }

        self.cooldown_accumulator = 0.0;
        self.nav.set_stopped(false);
        self.enter_chase();
    }

    /// Terminal: игрок пойман. Повторные вызовы — no-op.
    fn handle_caught(&mut self) {
        if self.halted {
            return;
        }

        self.halted = true;
        self.nav.set_stopped(true);
        crate::log_info(&format!(
            "Pursuit: player caught, loading scene '{}'",
            self.config.caught_scene
        ));

        self.scene.on_player_caught(&self.config.caught_scene);
        if let Some(observer) = self.observer.as_mut() {
            observer.on_caught();
        }
    }

    fn refresh_indicator(&mut self) {
        let color = IndicatorColor::resolve(self.state, self.stun_active);
        if color != self.indicator {
            self.indicator = color;
            self.cues.set_indicator(color);
        }
    }
}

/// Случайный waypoint из `len`, никогда не повторяет `last` (если есть выбор)
pub(crate) fn pick_waypoint<R: Rng + ?Sized>(rng: &mut R, len: usize, last: Option<usize>) -> usize {
    match last {
        Some(last) if len > 1 && last < len => {
            // Выбираем из len - 1 вариантов и пропускаем last
            let pick = rng.gen_range(0..len - 1);
            if pick >= last {
                pick + 1
            } else {
                pick
            }
        }
        _ if len > 1 => rng.gen_range(0..len),
        _ => 0,
    }
}
