//! Внешние interrupts: stun и прямой contact с целью.
//!
//! Setters вызываются из callbacks (попадание луча, коллизия) вне tick.
//! Поэтому здесь только atomics: setter пишет timestamp/flag, tick читает
//! в начале следующего кадра. Состояние FSM setters не трогают.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// f64 timestamp в AtomicU64 (через bits)
#[derive(Debug)]
struct AtomicTimestamp(AtomicU64);

impl AtomicTimestamp {
    fn new(value: f64) -> Self {
        Self(AtomicU64::new(value.to_bits()))
    }

    fn load(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Acquire))
    }

    fn store(&self, value: f64) {
        self.0.store(value.to_bits(), Ordering::Release);
    }

    /// Монотонный max: возвращает true если значение выросло
    fn fetch_max(&self, value: f64) -> bool {
        self.0
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
                (value > f64::from_bits(bits)).then(|| value.to_bits())
            })
            .is_ok()
    }
}

#[derive(Debug)]
struct InterruptSignals {
    stun_until: AtomicTimestamp,
    /// Wall time последнего tick (от него считаем конец stun)
    now: AtomicTimestamp,
    contact: AtomicBool,
}

/// Cloneable handle на interrupts одного контроллера
#[derive(Debug, Clone)]
pub struct StunHandle {
    signals: Arc<InterruptSignals>,
}

impl StunHandle {
    pub(crate) fn new(now: f64) -> Self {
        Self {
            signals: Arc::new(InterruptSignals {
                stun_until: AtomicTimestamp::new(f64::NEG_INFINITY),
                now: AtomicTimestamp::new(now),
                contact: AtomicBool::new(false),
            }),
        }
    }

    /// Оглушить на `duration` секунд от текущего wall time.
    ///
    /// Только продлевает: если текущий stun заканчивается позже — no-op.
    /// Возвращает true если окно stun изменилось.
    pub fn stun(&self, duration: f32) -> bool {
        self.stun_at(duration, self.signals.now.load())
    }

    /// То же, но от явного wall time `now` (ECS система знает время текущего tick)
    pub fn stun_at(&self, duration: f32, now: f64) -> bool {
        if !duration.is_finite() || duration <= 0.0 || !now.is_finite() {
            return false;
        }

        let until = now + f64::from(duration);
        self.signals.stun_until.fetch_max(until)
    }

    pub fn is_stunned(&self) -> bool {
        self.signals.now.load() < self.signals.stun_until.load()
    }

    /// Абсолютный timestamp конца stun (NEG_INFINITY если не оглушали)
    pub fn stun_expiry(&self) -> f64 {
        self.signals.stun_until.load()
    }

    /// Прямая коллизия с целью; обрабатывается в следующем tick
    pub fn report_contact(&self) {
        self.signals.contact.store(true, Ordering::Release);
    }

    pub(crate) fn observe_time(&self, now: f64) {
        self.signals.now.store(now);
    }

    pub(crate) fn take_contact(&self) -> bool {
        self.signals.contact.swap(false, Ordering::AcqRel)
    }
}
