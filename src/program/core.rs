use crate::raster::surface::Surface;

/// Play duration used by programs that don't pick their own.
pub const DEFAULT_PLAY_DURATION_SECS: f64 = 10.0;

/// Stable identity of a registered program.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProgramTag(&'static str);

impl ProgramTag {
    /// Wrap a static name.
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Tag name.
    pub fn as_str(self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for ProgramTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// Outcome of drawing one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameResult {
    /// The program reached its natural end on this frame.
    pub finished: bool,
}

impl FrameResult {
    /// Frame drawn, program continues.
    pub const fn running() -> Self {
        Self { finished: false }
    }

    /// Frame drawn, program is done.
    pub const fn finished() -> Self {
        Self { finished: true }
    }
}

/// Why the active program stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EndReason {
    /// The program reported `finished` itself.
    SelfTerminated,
    /// The program ran for its play duration.
    DurationExpired,
}

/// Per-frame report from [`crate::ProgramManager::run_frame`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunResult {
    /// Program that ended on this frame.
    pub ended: Option<ProgramTag>,
    /// Why it ended.
    pub end_reason: Option<EndReason>,
}

impl RunResult {
    /// Nothing ended this frame.
    pub const fn continuing() -> Self {
        Self {
            ended: None,
            end_reason: None,
        }
    }

    /// `tag` ended for `reason`.
    pub const fn ended(tag: ProgramTag, reason: EndReason) -> Self {
        Self {
            ended: Some(tag),
            end_reason: Some(reason),
        }
    }

    /// True when a program ended on this frame.
    pub fn is_finished(&self) -> bool {
        self.end_reason.is_some()
    }
}

/// One full-screen display routine.
///
/// [`Program::render`] is called once per frame while the program is active and must not block.
/// Programs read time from the shared clock they were built with. Switching away simply stops
/// the calls; there is no teardown, only [`Program::on_activate`] before the first frame.
pub trait Program: Send {
    /// Stable tag the program is registered under.
    fn tag(&self) -> ProgramTag;

    /// Draw exactly one frame into `surface`.
    fn render(&mut self, surface: &mut Surface) -> FrameResult;

    /// Called by the manager each time the program becomes active, with the virtual time.
    fn on_activate(&mut self, _now: f64) {}

    /// Eligible for idle rotation.
    fn is_screensaver(&self) -> bool {
        false
    }

    /// Virtual seconds the program plays before it is ended, `None` to run until it finishes
    /// itself or is interrupted.
    fn play_duration(&self) -> Option<f64> {
        Some(DEFAULT_PLAY_DURATION_SECS)
    }
}
