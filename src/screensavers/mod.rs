//! Idle screensavers and the scheduled override program.
//!
//! Every program here loads its artwork once at construction. Missing artwork is logged and the
//! program draws text only, so the sign never goes blank.

use std::sync::Arc;

use crate::assets::images::ImageStore;
use crate::foundation::log::LogHandle;
use crate::raster::color::Color;
use crate::raster::draw::draw_text;
use crate::raster::font::{Font, text_width};
use crate::raster::image::Image;
use crate::raster::surface::Surface;

/// Overlay shown during the override window.
pub mod burn;
/// Word marquees around the care bears.
pub mod care_bears;
/// Blinking eye that ends itself.
pub mod eye;
/// Gnome with a plea.
pub mod gnome;
/// Full-screen teeth.
pub mod teeth;

fn load_artwork(
    images: &ImageStore,
    name: &str,
    width: Option<u32>,
    height: Option<u32>,
    log: &LogHandle,
) -> Option<Arc<Image>> {
    match images.load(name, width, height) {
        Ok(img) => Some(img),
        Err(err) => {
            log.in_scope(|| tracing::warn!(image = name, error = %err, "artwork unavailable"));
            None
        }
    }
}

/// Draw `text` horizontally centered on `cx` with its baseline at `y`.
fn draw_centered(surface: &mut Surface, font: &dyn Font, cx: i32, y: i32, color: Color, text: &str) {
    let w = text_width(font, text);
    draw_text(surface, font, cx - w / 2, y, color, text);
}

#[cfg(test)]
#[path = "../../tests/unit/screensavers/mod.rs"]
mod tests;
