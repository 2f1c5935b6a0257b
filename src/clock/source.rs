use std::sync::{Arc, Mutex};
use std::time::Instant;

use chrono::NaiveDateTime;

/// Real-time input of a [`crate::ScaledClock`].
pub trait TimeSource: Send + Sync {
    /// Monotonic real seconds since an arbitrary fixed origin.
    fn monotonic_secs(&self) -> f64;
    /// Current local wall-clock time.
    fn wall_clock(&self) -> NaiveDateTime;
}

/// Process clock: `Instant` for elapsed time and `chrono::Local` for the wall clock.
#[derive(Debug)]
pub struct SystemTimeSource {
    origin: Instant,
}

impl SystemTimeSource {
    /// Start measuring from now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemTimeSource {
    fn monotonic_secs(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }

    fn wall_clock(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

#[derive(Debug)]
struct ManualState {
    elapsed: f64,
    wall_origin: NaiveDateTime,
}

/// Manually advanced time, for tests and deterministic headless rendering.
///
/// Clones share state, so one handle can drive a clock that owns another.
#[derive(Clone, Debug)]
pub struct ManualTimeSource {
    state: Arc<Mutex<ManualState>>,
}

impl ManualTimeSource {
    /// Create a source whose wall clock reads `wall_origin` at elapsed zero.
    pub fn new(wall_origin: NaiveDateTime) -> Self {
        Self {
            state: Arc::new(Mutex::new(ManualState {
                elapsed: 0.0,
                wall_origin,
            })),
        }
    }

    /// Move time forward by `secs` real seconds. Negative values are ignored.
    pub fn advance(&self, secs: f64) {
        if !(secs.is_finite() && secs > 0.0) {
            return;
        }
        let mut st = self.lock();
        st.elapsed += secs;
    }

    /// Real seconds elapsed since creation.
    pub fn elapsed(&self) -> f64 {
        self.lock().elapsed
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ManualState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl TimeSource for ManualTimeSource {
    fn monotonic_secs(&self) -> f64 {
        self.elapsed()
    }

    fn wall_clock(&self) -> NaiveDateTime {
        let st = self.lock();
        st.wall_origin + chrono::Duration::microseconds((st.elapsed * 1e6).round() as i64)
    }
}
