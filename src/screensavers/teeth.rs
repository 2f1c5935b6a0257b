use std::sync::Arc;

use crate::assets::images::ImageStore;
use crate::foundation::log::LogHandle;
use crate::program::core::{FrameResult, Program, ProgramTag};
use crate::raster::color::Color;
use crate::raster::font::Font;
use crate::raster::image::{Anchor, BlendMode, Image, composite_image};
use crate::raster::surface::Surface;
use crate::screensavers::{draw_centered, load_artwork};

const FALLBACK_TEXT: &str = "TEETH";

/// Teeth stretched over the whole panel in blue. Plays for the default duration.
pub struct TeethProgram {
    image: Option<Arc<Image>>,
    font: Arc<dyn Font>,
}

impl TeethProgram {
    /// Registry tag.
    pub const TAG: ProgramTag = ProgramTag::new("teeth");

    /// Load the artwork resized to `width x height`.
    pub fn new(
        images: &ImageStore,
        font: Arc<dyn Font>,
        width: u32,
        height: u32,
        log: &LogHandle,
    ) -> Self {
        Self {
            image: load_artwork(images, "teeth", Some(width), Some(height), log),
            font,
        }
    }
}

impl Program for TeethProgram {
    fn tag(&self) -> ProgramTag {
        Self::TAG
    }

    fn render(&mut self, surface: &mut Surface) -> FrameResult {
        surface.clear();
        let cx = surface.width() as i32 / 2;
        let cy = surface.height() as i32 / 2;
        match &self.image {
            Some(img) => composite_image(
                surface,
                img,
                cx,
                cy,
                Anchor::CenterCenter,
                Some(Color::BLUE),
                BlendMode::Normal,
            ),
            None => {
                let font = self.font.as_ref();
                draw_centered(surface, font, cx, cy + font.baseline() / 2, Color::BLUE, FALLBACK_TEXT);
            }
        }
        FrameResult::running()
    }

    fn is_screensaver(&self) -> bool {
        true
    }
}
