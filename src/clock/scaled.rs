use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDateTime;

use crate::clock::source::TimeSource;
use crate::foundation::error::{SignError, SignResult};
use crate::foundation::log::LogHandle;

#[derive(Debug)]
struct ClockState {
    timescale: f64,
    last_real: f64,
    virtual_secs: f64,
}

/// Wall clock with a runtime-adjustable speed multiplier.
///
/// Every read advances virtual time by the real time elapsed since the previous read, multiplied
/// by the current timescale, then re-anchors. Virtual time starts at `0.0` and never decreases.
///
/// The wall-clock reading is taken once at construction; [`ScaledClock::virtual_instant`]
/// projects from it by the virtual seconds elapsed. Scheduling decisions use
/// [`ScaledClock::virtual_seconds`] only.
///
/// Reads and [`ScaledClock::set_timescale`] share one lock, so another thread (a control panel,
/// a signal handler) may change the scale while the frame loop reads.
pub struct ScaledClock {
    source: Box<dyn TimeSource>,
    wall_anchor: NaiveDateTime,
    state: Mutex<ClockState>,
    log: LogHandle,
}

impl ScaledClock {
    /// Build a clock over `source` running at `timescale`.
    pub fn new(
        source: impl TimeSource + 'static,
        timescale: f64,
        log: LogHandle,
    ) -> SignResult<Self> {
        validate_timescale(timescale)?;
        let last_real = source.monotonic_secs();
        let wall_anchor = source.wall_clock();
        Ok(Self {
            source: Box::new(source),
            wall_anchor,
            state: Mutex::new(ClockState {
                timescale,
                last_real,
                virtual_secs: 0.0,
            }),
            log,
        })
    }

    /// Current virtual seconds since construction.
    pub fn virtual_seconds(&self) -> f64 {
        let mut st = self.lock();
        self.advance(&mut st)
    }

    /// Human-facing projection of virtual time onto the wall clock.
    pub fn virtual_instant(&self) -> NaiveDateTime {
        let secs = self.virtual_seconds();
        self.wall_anchor + chrono::Duration::microseconds((secs * 1e6).round() as i64)
    }

    /// Current multiplier.
    pub fn timescale(&self) -> f64 {
        self.lock().timescale
    }

    /// Install a new multiplier.
    ///
    /// Real time elapsed so far is first credited at the old scale, so the virtual time seen just
    /// before and just after the change is continuous. Non-positive or non-finite factors are
    /// rejected with [`SignError::InvalidArgument`] and the previous scale stays in effect.
    pub fn set_timescale(&self, factor: f64) -> SignResult<()> {
        if let Err(err) = validate_timescale(factor) {
            self.log.in_scope(|| tracing::warn!(factor, "rejected timescale"));
            return Err(err);
        }
        let mut st = self.lock();
        self.advance(&mut st);
        let previous = st.timescale;
        st.timescale = factor;
        drop(st);
        self.log
            .in_scope(|| tracing::info!(previous, factor, "timescale changed"));
        Ok(())
    }

    fn advance(&self, st: &mut ClockState) -> f64 {
        let now = self.source.monotonic_secs();
        let real_delta = (now - st.last_real).max(0.0);
        st.last_real = now;
        st.virtual_secs += real_delta * st.timescale;
        st.virtual_secs
    }

    fn lock(&self) -> MutexGuard<'_, ClockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for ScaledClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let st = self.lock();
        f.debug_struct("ScaledClock")
            .field("timescale", &st.timescale)
            .field("virtual_secs", &st.virtual_secs)
            .field("wall_anchor", &self.wall_anchor)
            .finish()
    }
}

fn validate_timescale(factor: f64) -> SignResult<()> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(SignError::invalid_argument(format!(
            "timescale must be a positive finite number, got {factor}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/clock/scaled.rs"]
mod tests;
