use std::sync::Arc;

use crate::assets::images::ImageStore;
use crate::foundation::log::LogHandle;
use crate::program::core::{FrameResult, Program, ProgramTag};
use crate::raster::color::Color;
use crate::raster::font::Font;
use crate::raster::image::{Anchor, BlendMode, Image, composite_image};
use crate::raster::surface::Surface;
use crate::screensavers::{draw_centered, load_artwork};

/// The two message lines, top first.
pub const GNOME_MESSAGE: [&str; 2] = ["Please stop", "licking gnomes"];

/// Gnome picture above a two-line message.
pub struct GnomeProgram {
    image: Option<Arc<Image>>,
    font: Arc<dyn Font>,
}

impl GnomeProgram {
    /// Registry tag.
    pub const TAG: ProgramTag = ProgramTag::new("gnome");
    /// Play duration in virtual seconds.
    pub const DURATION_SECS: f64 = 30.0;

    /// Load the gnome artwork at its native size.
    pub fn new(images: &ImageStore, font: Arc<dyn Font>, log: &LogHandle) -> Self {
        Self {
            image: load_artwork(images, "gnome", None, None, log),
            font,
        }
    }
}

impl Program for GnomeProgram {
    fn tag(&self) -> ProgramTag {
        Self::TAG
    }

    fn render(&mut self, surface: &mut Surface) -> FrameResult {
        surface.clear();
        let font = self.font.as_ref();
        let cx = surface.width() as i32 / 2;
        let [first, second] = GNOME_MESSAGE;

        match &self.image {
            Some(img) => {
                // Raised so the message fits below.
                let cy = surface.height() as i32 / 2 - 8;
                composite_image(
                    surface,
                    img,
                    cx,
                    cy,
                    Anchor::CenterCenter,
                    Some(Color::RED),
                    BlendMode::Normal,
                );
                let y1 = cy + img.height() as i32 / 2 + 5;
                let y2 = y1 + font.height() - 3;
                draw_centered(surface, font, cx, y1, Color::RED, first);
                draw_centered(surface, font, cx, y2, Color::RED, second);
            }
            None => {
                let cy = surface.height() as i32 / 2;
                draw_centered(surface, font, cx, cy - 2, Color::RED, first);
                draw_centered(surface, font, cx, cy + font.height(), Color::RED, second);
            }
        }
        FrameResult::running()
    }

    fn is_screensaver(&self) -> bool {
        true
    }

    fn play_duration(&self) -> Option<f64> {
        Some(Self::DURATION_SECS)
    }
}
