use std::sync::Arc;

use crate::assets::images::ImageStore;
use crate::clock::scaled::ScaledClock;
use crate::foundation::log::LogHandle;
use crate::program::core::{FrameResult, Program, ProgramTag};
use crate::raster::color::Color;
use crate::raster::draw::draw_text;
use crate::raster::font::{Font, text_width};
use crate::raster::image::{Anchor, BlendMode, Image, composite_image};
use crate::raster::surface::Surface;
use crate::screensavers::load_artwork;

/// One repetition of the marquee, trailing space included.
pub const MARQUEE_TEXT: &str = "CARE BEARS ";
/// Marquee speed in pixels per virtual second.
pub const MARQUEE_SPEED: f64 = 10.0;
/// Word colors, cycled along each marquee.
pub const WORD_COLORS: [Color; 5] = [
    Color::GREEN,
    Color::YELLOW,
    Color::RED,
    Color::PINK,
    Color::BLUE,
];

/// Care bears picture between two marquees running in opposite directions.
pub struct CareBearsProgram {
    image: Option<Arc<Image>>,
    font: Arc<dyn Font>,
    started: f64,
    clock: Arc<ScaledClock>,
}

impl CareBearsProgram {
    /// Registry tag.
    pub const TAG: ProgramTag = ProgramTag::new("care-bears");

    /// Load the artwork at 90% of the panel width.
    pub fn new(
        images: &ImageStore,
        font: Arc<dyn Font>,
        width: u32,
        clock: Arc<ScaledClock>,
        log: &LogHandle,
    ) -> Self {
        let target = ((f64::from(width) * 0.9) as u32).max(1);
        let started = clock.virtual_seconds();
        Self {
            image: load_artwork(images, "care-bears", Some(target), None, log),
            font,
            started,
            clock,
        }
    }

    /// Leftward shift of the top marquee at virtual time `now`, within one repetition.
    pub fn marquee_offset(&self, now: f64) -> i32 {
        let period = text_width(self.font.as_ref(), MARQUEE_TEXT).max(1);
        let moved = ((now - self.started).max(0.0) * MARQUEE_SPEED).floor() as i64;
        moved.rem_euclid(i64::from(period)) as i32
    }

    fn draw_marquee(&self, surface: &mut Surface, y: i32, offset: i32) {
        let font = self.font.as_ref();
        let period = text_width(font, MARQUEE_TEXT).max(1);
        let space = font.character_width(' ');
        let repetitions = surface.width() as i32 / period + 2;
        let mut word_no = 0;
        for rep in 0..repetitions {
            let mut x = rep * period - offset;
            for word in MARQUEE_TEXT.split_whitespace() {
                let color = WORD_COLORS[word_no % WORD_COLORS.len()];
                x += draw_text(surface, font, x, y, color, word) + space;
                word_no += 1;
            }
        }
    }
}

impl Program for CareBearsProgram {
    fn tag(&self) -> ProgramTag {
        Self::TAG
    }

    fn on_activate(&mut self, now: f64) {
        self.started = now;
    }

    fn render(&mut self, surface: &mut Surface) -> FrameResult {
        surface.clear();
        if let Some(img) = &self.image {
            let cx = surface.width() as i32 / 2;
            let cy = surface.height() as i32 / 2;
            composite_image(surface, img, cx, cy, Anchor::CenterCenter, None, BlendMode::Normal);
        }

        let font = self.font.as_ref();
        let period = text_width(font, MARQUEE_TEXT).max(1);
        let offset = self.marquee_offset(self.clock.virtual_seconds());
        let top_y = font.baseline() + 2;
        let bottom_y = surface.height() as i32 - font.height() + font.baseline() - 2;
        self.draw_marquee(surface, top_y, offset);
        self.draw_marquee(surface, bottom_y, (-offset).rem_euclid(period));
        FrameResult::running()
    }

    fn is_screensaver(&self) -> bool {
        true
    }
}
