//! Shared fixtures for unit tests.

use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, NaiveDateTime};

use crate::clock::scaled::ScaledClock;
use crate::clock::source::ManualTimeSource;
use crate::foundation::log::LogHandle;
use crate::program::core::{FrameResult, Program, ProgramTag};
use crate::raster::surface::Surface;

pub(crate) fn wall_origin() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 6, 1)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap()
}

/// Manual time source plus a clock at timescale 1 over it.
pub(crate) fn manual_clock() -> (ManualTimeSource, Arc<ScaledClock>) {
    let source = ManualTimeSource::new(wall_origin());
    let clock = ScaledClock::new(source.clone(), 1.0, LogHandle::disabled()).unwrap();
    (source, Arc::new(clock))
}

/// Program whose behaviour is fixed up front; counts its frames.
pub(crate) struct ScriptedProgram {
    pub(crate) tag: ProgramTag,
    pub(crate) screensaver: bool,
    pub(crate) duration: Option<f64>,
    pub(crate) finish: Arc<Mutex<bool>>,
    pub(crate) frames: Arc<Mutex<u64>>,
    pub(crate) activations: Arc<Mutex<Vec<f64>>>,
}

impl ScriptedProgram {
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            tag: ProgramTag::new(name),
            screensaver: false,
            duration: None,
            finish: Arc::new(Mutex::new(false)),
            frames: Arc::new(Mutex::new(0)),
            activations: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn screensaver(mut self) -> Self {
        self.screensaver = true;
        self
    }

    pub(crate) fn lasting(mut self, secs: f64) -> Self {
        self.duration = Some(secs);
        self
    }
}

impl Program for ScriptedProgram {
    fn tag(&self) -> ProgramTag {
        self.tag
    }

    fn render(&mut self, surface: &mut Surface) -> FrameResult {
        surface.clear();
        *self.frames.lock().unwrap() += 1;
        FrameResult {
            finished: *self.finish.lock().unwrap(),
        }
    }

    fn on_activate(&mut self, now: f64) {
        self.activations.lock().unwrap().push(now);
    }

    fn is_screensaver(&self) -> bool {
        self.screensaver
    }

    fn play_duration(&self) -> Option<f64> {
        self.duration
    }
}
