//! Presentation of finished frames.

use crate::foundation::error::SignResult;
use crate::foundation::math::scale_u8;
use crate::raster::surface::Surface;

/// Software panel emulator that can write PNG previews.
pub mod emulated;
/// Headless backend that keeps the last frame.
pub mod memory;

/// Contract between the frame loop and whatever drives the LEDs.
///
/// The loop draws into a [`Surface`] obtained from [`DisplayBackend::create_surface`], hands it
/// to [`DisplayBackend::present`] and draws the next frame into the surface that comes back,
/// mirroring a swap-on-vsync double buffer.
pub trait DisplayBackend: Send {
    /// Panel width in pixels.
    fn width(&self) -> u32;
    /// Panel height in pixels.
    fn height(&self) -> u32;
    /// Fresh black surface matching the panel.
    fn create_surface(&self) -> Surface {
        Surface::new(self.width(), self.height())
    }
    /// Set the runtime brightness in `[0, 1]` (clamped).
    fn set_brightness(&mut self, brightness: f64);
    /// Runtime brightness multiplied by the configured override.
    fn effective_brightness(&self) -> f64;
    /// Show `frame` and return the surface to draw the next frame into.
    fn present(&mut self, frame: Surface) -> SignResult<Surface>;
}

/// Scale every pixel of `surface` by `factor` in `[0, 1]`.
pub fn apply_brightness(surface: &mut Surface, factor: f64) {
    if factor >= 1.0 {
        return;
    }
    for px in surface.pixels_mut() {
        px.r = scale_u8(px.r, factor);
        px.g = scale_u8(px.g, factor);
        px.b = scale_u8(px.b, factor);
    }
}

pub(crate) fn clamp_unit(v: f64) -> f64 {
    if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 }
}

/// Hand the shown frame to `slot` and return a cleared buffer for the next frame.
pub(crate) fn swap_buffers(slot: &mut Option<Surface>, shown: Surface) -> Surface {
    let (w, h) = (shown.width(), shown.height());
    match slot.replace(shown) {
        Some(mut prev) if prev.width() == w && prev.height() == h => {
            prev.clear();
            prev
        }
        _ => Surface::new(w, h),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/backend/mod.rs"]
mod tests;
