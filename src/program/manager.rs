use std::sync::Arc;

use crate::clock::scaled::ScaledClock;
use crate::foundation::error::{SignError, SignResult};
use crate::foundation::log::LogHandle;
use crate::program::core::{EndReason, Program, ProgramTag, RunResult};
use crate::raster::surface::Surface;

/// Registry of programs plus the one that is currently playing.
///
/// Programs are registered once and reused for every activation. The manager records the virtual
/// time of each activation and classifies why the active program ended.
pub struct ProgramManager {
    programs: Vec<Box<dyn Program>>,
    active: Option<usize>,
    active_start: f64,
    clock: Arc<ScaledClock>,
    log: LogHandle,
}

impl ProgramManager {
    /// Empty registry reading time from `clock`.
    pub fn new(clock: Arc<ScaledClock>, log: LogHandle) -> Self {
        Self {
            programs: Vec::new(),
            active: None,
            active_start: 0.0,
            clock,
            log,
        }
    }

    /// Add a program. Tags must be unique.
    pub fn register(&mut self, program: Box<dyn Program>) -> SignResult<()> {
        let tag = program.tag();
        if self.index_of(tag).is_some() {
            return Err(SignError::invalid_argument(format!(
                "program '{tag}' is already registered"
            )));
        }
        self.log.in_scope(|| {
            tracing::debug!(
                program = %tag,
                screensaver = program.is_screensaver(),
                duration = ?program.play_duration(),
                "registered program"
            )
        });
        self.programs.push(program);
        Ok(())
    }

    /// Make `tag` the active program and restart its play timer.
    ///
    /// Unknown tags are logged and ignored; the previous program stays active.
    pub fn set_active(&mut self, tag: ProgramTag) -> bool {
        let Some(idx) = self.index_of(tag) else {
            let err = SignError::not_found(format!("program '{tag}'"));
            self.log
                .in_scope(|| tracing::error!(error = %err, "cannot activate program"));
            return false;
        };
        self.active = Some(idx);
        self.active_start = self.clock.virtual_seconds();
        self.programs[idx].on_activate(self.active_start);
        self.log.in_scope(|| {
            tracing::info!(program = %tag, at = self.active_start, "activated program")
        });
        true
    }

    /// Tag of the active program.
    pub fn active_tag(&self) -> Option<ProgramTag> {
        self.active.map(|idx| self.programs[idx].tag())
    }

    /// True when the active program is a screensaver.
    pub fn active_is_screensaver(&self) -> bool {
        self.active
            .is_some_and(|idx| self.programs[idx].is_screensaver())
    }

    /// Virtual time of the last activation.
    pub fn active_start_time(&self) -> f64 {
        self.active_start
    }

    /// Look up a registered program.
    pub fn program(&self, tag: ProgramTag) -> Option<&dyn Program> {
        self.index_of(tag).map(|idx| self.programs[idx].as_ref())
    }

    /// Registered tags in registration order.
    pub fn tags(&self) -> Vec<ProgramTag> {
        self.programs.iter().map(|p| p.tag()).collect()
    }

    /// Screensaver tags in registration order.
    pub fn screensaver_programs(&self) -> Vec<ProgramTag> {
        self.programs
            .iter()
            .filter(|p| p.is_screensaver())
            .map(|p| p.tag())
            .collect()
    }

    /// Draw one frame of the active program into `surface`.
    ///
    /// Self-termination wins over duration expiry when both happen on the same frame. With no
    /// active program the surface is cleared and nothing ends.
    pub fn run_frame(&mut self, surface: &mut Surface) -> RunResult {
        let Some(idx) = self.active else {
            surface.clear();
            return RunResult::continuing();
        };
        let program = &mut self.programs[idx];
        let tag = program.tag();
        let frame = program.render(surface);

        if frame.finished {
            self.log
                .in_scope(|| tracing::info!(program = %tag, "program finished on its own"));
            return RunResult::ended(tag, EndReason::SelfTerminated);
        }

        if let Some(duration) = program.play_duration() {
            let now = self.clock.virtual_seconds();
            if now - self.active_start >= duration {
                self.log.in_scope(|| {
                    tracing::info!(program = %tag, duration, "program play duration expired")
                });
                return RunResult::ended(tag, EndReason::DurationExpired);
            }
        }

        RunResult::continuing()
    }

    fn index_of(&self, tag: ProgramTag) -> Option<usize> {
        self.programs.iter().position(|p| p.tag() == tag)
    }
}

impl std::fmt::Debug for ProgramManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgramManager")
            .field("programs", &self.tags())
            .field("active", &self.active_tag())
            .field("active_start", &self.active_start)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/program/manager.rs"]
mod tests;
