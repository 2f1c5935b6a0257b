use crate::backend::{DisplayBackend, apply_brightness, clamp_unit, swap_buffers};
use crate::foundation::error::SignResult;
use crate::raster::surface::Surface;

/// Headless backend for tests and snapshots.
#[derive(Debug)]
pub struct MemoryBackend {
    width: u32,
    height: u32,
    brightness: f64,
    brightness_override: f64,
    last: Option<Surface>,
    presented: u64,
}

impl MemoryBackend {
    /// Panel of `width x height` at full brightness.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            brightness: 1.0,
            brightness_override: 1.0,
            last: None,
            presented: 0,
        }
    }

    /// Apply a configured brightness ceiling in `[0, 1]`.
    pub fn with_brightness_override(mut self, factor: f64) -> Self {
        self.brightness_override = clamp_unit(factor);
        self
    }

    /// Most recent presented frame, brightness applied.
    pub fn last_frame(&self) -> Option<&Surface> {
        self.last.as_ref()
    }

    /// Number of frames presented so far.
    pub fn presented_count(&self) -> u64 {
        self.presented
    }
}

impl DisplayBackend for MemoryBackend {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_brightness(&mut self, brightness: f64) {
        self.brightness = clamp_unit(brightness);
    }

    fn effective_brightness(&self) -> f64 {
        self.brightness * self.brightness_override
    }

    fn present(&mut self, mut frame: Surface) -> SignResult<Surface> {
        apply_brightness(&mut frame, self.effective_brightness());
        self.presented += 1;
        Ok(swap_buffers(&mut self.last, frame))
    }
}
