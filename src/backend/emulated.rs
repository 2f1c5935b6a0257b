use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::backend::{DisplayBackend, apply_brightness, clamp_unit, swap_buffers};
use crate::foundation::error::{SignError, SignResult};
use crate::foundation::log::LogHandle;
use crate::raster::surface::Surface;

/// Pixels per LED in preview images.
pub const DEFAULT_LED_CELL: u32 = 8;

/// Dark grey board color between LEDs.
const BOARD: [u8; 3] = [16, 16, 16];

/// Software stand-in for the LED matrix driver.
///
/// Frames are kept in memory; when a snapshot directory is configured every `snapshot_every`-th
/// frame is written as `frame-<n>.png`, drawn as round LEDs on a dark board. Write failures are
/// logged and the loop carries on.
#[derive(Debug)]
pub struct EmulatedBackend {
    width: u32,
    height: u32,
    brightness: f64,
    brightness_override: f64,
    last: Option<Surface>,
    frame_no: u64,
    snapshot_dir: Option<PathBuf>,
    snapshot_every: u64,
    led_cell: u32,
    log: LogHandle,
}

impl EmulatedBackend {
    /// Emulated panel of `width x height`.
    pub fn new(width: u32, height: u32, brightness_override: f64, log: LogHandle) -> Self {
        Self {
            width,
            height,
            brightness: 1.0,
            brightness_override: clamp_unit(brightness_override),
            last: None,
            frame_no: 0,
            snapshot_dir: None,
            snapshot_every: 0,
            led_cell: DEFAULT_LED_CELL,
            log,
        }
    }

    /// Write a preview every `every` frames into `dir` (`every == 0` disables).
    pub fn with_snapshots(mut self, dir: impl Into<PathBuf>, every: u64) -> Self {
        self.snapshot_dir = Some(dir.into());
        self.snapshot_every = every;
        self
    }

    /// Most recent presented frame.
    pub fn last_frame(&self) -> Option<&Surface> {
        self.last.as_ref()
    }

    /// Frames presented so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_no
    }

    fn maybe_snapshot(&self, frame: &Surface) {
        let Some(dir) = self.snapshot_dir.as_ref() else {
            return;
        };
        if self.snapshot_every == 0 || self.frame_no % self.snapshot_every != 0 {
            return;
        }
        let path = dir.join(format!("frame-{:06}.png", self.frame_no));
        let res = std::fs::create_dir_all(dir)
            .with_context(|| format!("create snapshot dir {}", dir.display()))
            .map_err(SignError::from)
            .and_then(|()| save_led_preview(frame, self.led_cell, &path));
        self.log.in_scope(|| match res {
            Ok(()) => tracing::debug!(path = %path.display(), "wrote snapshot"),
            Err(err) => tracing::warn!(path = %path.display(), error = %err, "snapshot failed"),
        });
    }
}

impl DisplayBackend for EmulatedBackend {
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
        self.frame_no += 1;
        self.maybe_snapshot(&frame);
        Ok(swap_buffers(&mut self.last, frame))
    }
}

/// Render `surface` as round LEDs, `cell` output pixels per LED.
pub fn led_preview(surface: &Surface, cell: u32) -> image::RgbImage {
    let cell = cell.max(1);
    let mut out = image::RgbImage::from_pixel(
        surface.width() * cell,
        surface.height() * cell,
        image::Rgb(BOARD),
    );
    // One pixel of gutter between neighbouring LEDs.
    let radius = (f64::from(cell) - 1.0).max(1.0) / 2.0;
    let center = f64::from(cell) / 2.0;

    for y in 0..surface.height() {
        for x in 0..surface.width() {
            let Some(c) = surface.get_pixel(x as i32, y as i32) else {
                continue;
            };
            let led = if c.is_black() {
                image::Rgb(BOARD.map(|v| v.saturating_mul(2)))
            } else {
                image::Rgb([c.r, c.g, c.b])
            };
            for py in 0..cell {
                for px in 0..cell {
                    let dx = f64::from(px) + 0.5 - center;
                    let dy = f64::from(py) + 0.5 - center;
                    if dx * dx + dy * dy <= radius * radius {
                        out.put_pixel(x * cell + px, y * cell + py, led);
                    }
                }
            }
        }
    }
    out
}

/// Write [`led_preview`] of `surface` as a PNG.
pub fn save_led_preview(surface: &Surface, cell: u32, path: &Path) -> SignResult<()> {
    led_preview(surface, cell)
        .save(path)
        .with_context(|| format!("write preview {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/backend/emulated.rs"]
mod tests;
