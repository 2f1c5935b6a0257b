use std::sync::Arc;

use crate::assets::images::ImageStore;
use crate::clock::scaled::ScaledClock;
use crate::foundation::log::LogHandle;
use crate::program::core::{FrameResult, Program, ProgramTag};
use crate::raster::color::Color;
use crate::raster::draw::{draw_circle, draw_line};
use crate::raster::image::{Anchor, BlendMode, Image, composite_image};
use crate::raster::surface::Surface;
use crate::screensavers::load_artwork;

/// Image names in display order; the last one is the closed eye.
pub const EYE_SEQUENCE: [&str; 4] = ["eye", "eyeL", "eyeR", "eyeClose"];

const FRAME_SECS: f64 = 1.0;

/// Looks around, blinks, and ends itself on the frame after the closed eye.
pub struct EyeProgram {
    frames: Vec<Option<Arc<Image>>>,
    started: f64,
    clock: Arc<ScaledClock>,
    log: LogHandle,
}

impl EyeProgram {
    /// Registry tag.
    pub const TAG: ProgramTag = ProgramTag::new("eye");

    /// Load the sequence scaled to the panel height.
    pub fn new(
        images: &ImageStore,
        height: u32,
        clock: Arc<ScaledClock>,
        log: LogHandle,
    ) -> Self {
        let frames = EYE_SEQUENCE
            .iter()
            .map(|name| load_artwork(images, name, None, Some(height), &log))
            .collect();
        let started = clock.virtual_seconds();
        Self {
            frames,
            started,
            clock,
            log,
        }
    }

    /// Sequence position at virtual time `now`; `EYE_SEQUENCE.len()` once the blink is over.
    pub fn frame_index(&self, now: f64) -> usize {
        let elapsed = (now - self.started).max(0.0);
        ((elapsed / FRAME_SECS).floor() as usize).min(EYE_SEQUENCE.len())
    }
}

impl Program for EyeProgram {
    fn tag(&self) -> ProgramTag {
        Self::TAG
    }

    fn on_activate(&mut self, now: f64) {
        self.started = now;
    }

    fn render(&mut self, surface: &mut Surface) -> FrameResult {
        surface.clear();
        let now = self.clock.virtual_seconds();
        let idx = self.frame_index(now);
        let finished = idx >= EYE_SEQUENCE.len();
        let idx = if finished { 0 } else { idx };

        let cx = surface.width() as i32 / 2;
        let cy = surface.height() as i32 / 2;
        match &self.frames[idx] {
            Some(img) => composite_image(
                surface,
                img,
                cx,
                cy,
                Anchor::CenterCenter,
                Some(Color::RED),
                BlendMode::Normal,
            ),
            None => draw_outline_eye(surface, cx, cy, idx),
        }
        if finished {
            self.log.in_scope(|| tracing::debug!("blink complete"));
            self.started = now;
            return FrameResult::finished();
        }
        FrameResult::running()
    }

    fn is_screensaver(&self) -> bool {
        true
    }

    fn play_duration(&self) -> Option<f64> {
        None
    }
}

/// Pixel eye used without artwork: an outline with a pupil looking ahead, left or right, then a
/// closed lid.
fn draw_outline_eye(surface: &mut Surface, cx: i32, cy: i32, idx: usize) {
    let r = (surface.width().min(surface.height()) as i32 / 2 - 2).max(2);
    if idx == EYE_SEQUENCE.len() - 1 {
        draw_line(surface, cx - r, cy, cx + r, cy, Color::RED);
        return;
    }
    draw_circle(surface, cx, cy, r, Color::RED);
    let pupil = (r / 3).max(1);
    let dx = match idx {
        1 => -r / 2,
        2 => r / 2,
        _ => 0,
    };
    surface.fill_rect(cx + dx - pupil / 2, cy - pupil / 2, pupil, pupil, Color::RED);
}

#[cfg(test)]
#[path = "../../tests/unit/screensavers/eye.rs"]
mod tests;
