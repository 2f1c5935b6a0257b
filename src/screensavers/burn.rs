use std::sync::Arc;

use crate::assets::images::ImageStore;
use crate::clock::scaled::ScaledClock;
use crate::foundation::log::LogHandle;
use crate::program::core::{FrameResult, Program, ProgramTag};
use crate::raster::color::Color;
use crate::raster::font::Font;
use crate::raster::image::{Anchor, BlendMode, Image, composite_image};
use crate::raster::surface::Surface;
use crate::screensavers::{draw_centered, load_artwork};

/// Caption under the artwork.
pub const CAPTION: &str = "NOT A CULT";

const IMAGE_SWITCH_SECS: f64 = 1.0;
const INVERT_EVERY_SECS: f64 = 5.0;
const INVERT_FOR_SECS: f64 = 1.0;

/// Scheduled overlay: two alternating images with a caption, inverted for a second every five.
pub struct BurnProgram {
    images: Option<[Arc<Image>; 2]>,
    font: Arc<dyn Font>,
    inverted_font: Arc<dyn Font>,
    started: f64,
    clock: Arc<ScaledClock>,
}

impl BurnProgram {
    /// Registry tag.
    pub const TAG: ProgramTag = ProgramTag::new("burn");
    /// Play duration in virtual seconds.
    pub const DURATION_SECS: f64 = 60.0;

    /// Load both images with a width of 90% of the panel height. Either one missing means
    /// caption only.
    pub fn new(
        images: &ImageStore,
        font: Arc<dyn Font>,
        inverted_font: Arc<dyn Font>,
        height: u32,
        clock: Arc<ScaledClock>,
        log: &LogHandle,
    ) -> Self {
        let target = ((f64::from(height) * 0.9) as u32).max(1);
        let first = load_artwork(images, "burn", Some(target), None, log);
        let second = load_artwork(images, "burn2", Some(target), None, log);
        let started = clock.virtual_seconds();
        Self {
            images: first.zip(second).map(|(a, b)| [a, b]),
            font,
            inverted_font,
            started,
            clock,
        }
    }

    /// Which of the two images shows at `now`.
    pub fn image_index(&self, now: f64) -> usize {
        ((self.elapsed(now) / IMAGE_SWITCH_SECS).floor() as usize) % 2
    }

    /// True during the inverted second.
    pub fn is_inverted(&self, now: f64) -> bool {
        let e = self.elapsed(now);
        e >= INVERT_EVERY_SECS && e % INVERT_EVERY_SECS < INVERT_FOR_SECS
    }

    fn elapsed(&self, now: f64) -> f64 {
        (now - self.started).max(0.0)
    }
}

impl Program for BurnProgram {
    fn tag(&self) -> ProgramTag {
        Self::TAG
    }

    fn on_activate(&mut self, now: f64) {
        self.started = now;
    }

    fn render(&mut self, surface: &mut Surface) -> FrameResult {
        surface.clear();
        let now = self.clock.virtual_seconds();
        let inverted = self.is_inverted(now);
        let (fg, font) = if inverted {
            let (w, h) = (surface.width() as i32, surface.height() as i32);
            surface.fill_rect(0, 0, w, h, Color::RED);
            (Color::BLACK, self.inverted_font.as_ref())
        } else {
            (Color::RED, self.font.as_ref())
        };

        let cx = surface.width() as i32 / 2;
        match &self.images {
            Some(pair) => {
                let img = &pair[self.image_index(now)];
                let cy = surface.height() as i32 / 2 - 6;
                composite_image(
                    surface,
                    img,
                    cx,
                    cy,
                    Anchor::CenterCenter,
                    Some(fg),
                    BlendMode::Normal,
                );
                // Baseline follows the regular font in both states.
                let y = surface.height() as i32 - self.font.height() + 1;
                draw_centered(surface, font, cx, y, fg, CAPTION);
            }
            None => {
                let y = surface.height() as i32 / 2;
                draw_centered(surface, font, cx, y, fg, CAPTION);
            }
        }
        FrameResult::running()
    }

    fn play_duration(&self) -> Option<f64> {
        Some(Self::DURATION_SECS)
    }
}
