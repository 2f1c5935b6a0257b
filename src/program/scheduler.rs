use std::sync::Arc;

use crate::clock::scaled::ScaledClock;
use crate::foundation::log::LogHandle;
use crate::program::core::{ProgramTag, RunResult};
use crate::program::manager::ProgramManager;

/// Idle seconds before a screensaver is shown.
pub const DEFAULT_IDLE_THRESHOLD_SECS: f64 = 30.0;
/// Seconds after startup at which the override program begins.
pub const DEFAULT_OVERRIDE_DELAY_SECS: f64 = 180.0;

/// Switching policy inputs.
#[derive(Clone, Debug, PartialEq)]
pub struct SchedulerConfig {
    /// Program shown by default and after anything finishes.
    pub base: ProgramTag,
    /// Program that preempts everything inside its window.
    pub override_program: Option<ProgramTag>,
    /// Window start, relative to scheduler construction.
    pub override_delay_secs: f64,
    /// Time since the last switch before a screensaver takes over.
    pub idle_threshold_secs: f64,
}

impl SchedulerConfig {
    /// Defaults around `base` with no override.
    pub fn new(base: ProgramTag) -> Self {
        Self {
            base,
            override_program: None,
            override_delay_secs: DEFAULT_OVERRIDE_DELAY_SECS,
            idle_threshold_secs: DEFAULT_IDLE_THRESHOLD_SECS,
        }
    }

    /// Schedule `tag` as the override program.
    pub fn with_override(mut self, tag: ProgramTag, delay_secs: f64) -> Self {
        self.override_program = Some(tag);
        self.override_delay_secs = delay_secs;
        self
    }

    /// Replace the idle threshold.
    pub fn with_idle_threshold(mut self, secs: f64) -> Self {
        self.idle_threshold_secs = secs;
        self
    }
}

/// Why the scheduler switched programs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwitchReason {
    /// Nothing was active.
    Initial,
    /// The active program ended.
    ProgramEnded,
    /// The override window opened.
    OverrideStarted,
    /// The override window closed.
    OverrideEnded,
    /// The idle threshold passed.
    Idle,
}

/// A switch performed by [`ProgramScheduler::maybe_switch`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Switch {
    /// Newly active program.
    pub to: ProgramTag,
    /// Rule that fired.
    pub reason: SwitchReason,
}

/// Decides once per frame which program should be active.
///
/// Rules are checked in priority order and the first that applies wins:
///
/// 1. nothing active: activate the base program
/// 2. the active program ended: return to base
/// 3. inside the override window: run the override program
/// 4. override active outside its window: return to base
/// 5. a non-screensaver has run for the idle threshold: next screensaver, round-robin
#[derive(Debug)]
pub struct ProgramScheduler {
    config: SchedulerConfig,
    override_window: Option<(f64, f64)>,
    last_switch: f64,
    screensaver_cursor: usize,
    clock: Arc<ScaledClock>,
    log: LogHandle,
}

impl ProgramScheduler {
    /// Build the scheduler and activate the base program.
    ///
    /// The override window is fixed here: it opens `override_delay_secs` after now and lasts for
    /// the override program's play duration (open-ended when it has none).
    pub fn new(
        config: SchedulerConfig,
        manager: &mut ProgramManager,
        clock: Arc<ScaledClock>,
        log: LogHandle,
    ) -> Self {
        let now = clock.virtual_seconds();
        let override_window = config.override_program.and_then(|tag| {
            let Some(program) = manager.program(tag) else {
                log.in_scope(|| {
                    tracing::warn!(program = %tag, "override program is not registered")
                });
                return None;
            };
            let start = now + config.override_delay_secs;
            let end = program
                .play_duration()
                .map_or(f64::INFINITY, |d| start + d);
            Some((start, end))
        });
        log.in_scope(|| {
            tracing::info!(
                base = %config.base,
                window = ?override_window,
                idle = config.idle_threshold_secs,
                "scheduler ready"
            )
        });

        manager.set_active(config.base);
        Self {
            config,
            override_window,
            last_switch: now,
            screensaver_cursor: 0,
            clock,
            log,
        }
    }

    /// `[start, end)` of the override window in virtual seconds.
    pub fn override_window(&self) -> Option<(f64, f64)> {
        self.override_window
    }

    /// Index of the screensaver the next idle timeout will pick.
    pub fn screensaver_cursor(&self) -> usize {
        self.screensaver_cursor
    }

    /// Virtual time of the last switch that restarts the idle timer.
    pub fn last_switch_time(&self) -> f64 {
        self.last_switch
    }

    /// Apply the switching rules for this frame's `result`.
    pub fn maybe_switch(
        &mut self,
        manager: &mut ProgramManager,
        result: &RunResult,
    ) -> Option<Switch> {
        let now = self.clock.virtual_seconds();
        let base = self.config.base;

        let Some(active) = manager.active_tag() else {
            return self.activate(manager, base, SwitchReason::Initial, None);
        };

        if result.is_finished() {
            return self.activate(manager, base, SwitchReason::ProgramEnded, Some(now));
        }

        if let Some(over) = self.config.override_program {
            if self.in_override_window(now) {
                if active == over {
                    return None;
                }
                return self.activate(manager, over, SwitchReason::OverrideStarted, Some(now));
            }
            if active == over {
                return self.activate(manager, base, SwitchReason::OverrideEnded, Some(now));
            }
        }

        if !manager.active_is_screensaver()
            && now - self.last_switch >= self.config.idle_threshold_secs
        {
            let tag = self.next_screensaver(manager)?;
            return self.activate(manager, tag, SwitchReason::Idle, Some(now));
        }

        None
    }

    fn in_override_window(&self, now: f64) -> bool {
        self.override_window
            .is_some_and(|(start, end)| start <= now && now < end)
    }

    fn next_screensaver(&mut self, manager: &ProgramManager) -> Option<ProgramTag> {
        let savers = manager.screensaver_programs();
        if savers.is_empty() {
            return None;
        }
        let idx = self.screensaver_cursor % savers.len();
        self.screensaver_cursor = (idx + 1) % savers.len();
        Some(savers[idx])
    }

    fn activate(
        &mut self,
        manager: &mut ProgramManager,
        tag: ProgramTag,
        reason: SwitchReason,
        switch_time: Option<f64>,
    ) -> Option<Switch> {
        if !manager.set_active(tag) {
            return None;
        }
        if let Some(t) = switch_time {
            self.last_switch = t;
        }
        self.log
            .in_scope(|| tracing::debug!(program = %tag, ?reason, "switched program"));
        Some(Switch { to: tag, reason })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/program/scheduler.rs"]
mod tests;
