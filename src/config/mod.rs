//! Startup configuration read from a JSON file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;

use crate::foundation::error::{SignError, SignResult};
use crate::foundation::log::LogHandle;

const PANEL_WIDTH: u32 = 64;
const PANEL_HEIGHT: u32 = 32;
const PANEL_COUNT_X: u32 = 2;
const PANEL_COUNT_Y: u32 = 2;

/// Sign configuration. Every field is optional in the file; [`SignConfig::with_defaults`] fills
/// the gaps.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SignConfig {
    /// Pixels across one panel.
    pub panel_width: Option<u32>,
    /// Pixels down one panel.
    pub panel_height: Option<u32>,
    /// Panels chained horizontally.
    pub panel_count_x: Option<u32>,
    /// Panels stacked vertically.
    pub panel_count_y: Option<u32>,
    /// Panel multiplexing; passed to hardware backends.
    pub scan_mode: Option<u32>,
    /// Global brightness multiplier in `[0, 1]`.
    pub brightness_override: Option<f64>,
    /// Target frames per second.
    pub fps: Option<f64>,
    /// Virtual seconds per real second.
    pub timescale: Option<f64>,
    /// Directory with `<name>.png` artwork.
    pub assets_dir: Option<PathBuf>,
    /// Directory with `<name>.bdf` fonts.
    pub fonts_dir: Option<PathBuf>,
    /// JSON workshop list.
    pub workshops_path: Option<PathBuf>,
    /// Virtual seconds after startup before the override plays.
    pub override_delay_secs: Option<f64>,
    /// Virtual seconds without a switch before a screensaver starts.
    pub idle_threshold_secs: Option<f64>,
}

impl SignConfig {
    /// Copy with every unset field filled in.
    pub fn with_defaults(&self) -> Self {
        Self {
            panel_width: self.panel_width.or(Some(PANEL_WIDTH)),
            panel_height: self.panel_height.or(Some(PANEL_HEIGHT)),
            panel_count_x: self.panel_count_x.or(Some(PANEL_COUNT_X)),
            panel_count_y: self.panel_count_y.or(Some(PANEL_COUNT_Y)),
            scan_mode: self.scan_mode.or(Some(8)),
            brightness_override: self.brightness_override.or(Some(1.0)),
            fps: self.fps.or(Some(60.0)),
            timescale: self.timescale.or(Some(1.0)),
            assets_dir: self.assets_dir.clone().or_else(|| Some("assets".into())),
            fonts_dir: self.fonts_dir.clone().or_else(|| Some("fonts".into())),
            workshops_path: self
                .workshops_path
                .clone()
                .or_else(|| Some("data/workshops.json".into())),
            override_delay_secs: self.override_delay_secs.or(Some(180.0)),
            idle_threshold_secs: self.idle_threshold_secs.or(Some(30.0)),
        }
    }

    /// Read `path`. A missing file yields an empty config; malformed JSON is
    /// [`SignError::Serde`].
    #[tracing::instrument(skip(log))]
    pub fn load(path: &Path, log: &LogHandle) -> SignResult<Self> {
        if !path.exists() {
            log.in_scope(|| {
                tracing::info!(path = %path.display(), "no config file, using defaults")
            });
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_json(&text)
    }

    /// Parse a JSON document.
    pub fn from_json(text: &str) -> SignResult<Self> {
        serde_json::from_str(text).map_err(|e| SignError::serde(format!("config: {e}")))
    }

    /// Check ranges. Out-of-range brightness is clamped into `[0, 1]`.
    pub fn validate(mut self) -> SignResult<Self> {
        for (name, value) in [
            ("panel_width", self.panel_width),
            ("panel_height", self.panel_height),
            ("panel_count_x", self.panel_count_x),
            ("panel_count_y", self.panel_count_y),
        ] {
            if value == Some(0) {
                return Err(SignError::invalid_argument(format!("{name} must be > 0")));
            }
        }
        for (name, panel, count) in [
            (
                "width",
                self.panel_width.unwrap_or(PANEL_WIDTH),
                self.panel_count_x.unwrap_or(PANEL_COUNT_X),
            ),
            (
                "height",
                self.panel_height.unwrap_or(PANEL_HEIGHT),
                self.panel_count_y.unwrap_or(PANEL_COUNT_Y),
            ),
        ] {
            if panel.checked_mul(count).is_none() {
                return Err(SignError::invalid_argument(format!(
                    "total {name} {panel} x {count} overflows"
                )));
            }
        }
        for (name, value) in [("fps", self.fps), ("timescale", self.timescale)] {
            if let Some(v) = value
                && !(v.is_finite() && v > 0.0)
            {
                return Err(SignError::invalid_argument(format!(
                    "{name} must be a positive number, got {v}"
                )));
            }
        }
        if let Some(b) = self.brightness_override {
            if b.is_nan() {
                return Err(SignError::invalid_argument("brightness_override is NaN"));
            }
            self.brightness_override = Some(b.clamp(0.0, 1.0));
        }
        self.frame_interval()?;
        Ok(self)
    }

    /// Real time between frames at the configured fps.
    pub fn frame_interval(&self) -> SignResult<Duration> {
        let fps = self.fps.unwrap_or(60.0);
        Duration::try_from_secs_f64(1.0 / fps)
            .map_err(|e| SignError::invalid_argument(format!("fps {fps}: {e}")))
    }

    /// Panel width times horizontal count, saturating; [`SignConfig::validate`] rejects overflow.
    pub fn total_width(&self) -> u32 {
        self.panel_width
            .unwrap_or(PANEL_WIDTH)
            .saturating_mul(self.panel_count_x.unwrap_or(PANEL_COUNT_X))
    }

    /// Panel height times vertical count.
    pub fn total_height(&self) -> u32 {
        self.panel_height
            .unwrap_or(PANEL_HEIGHT)
            .saturating_mul(self.panel_count_y.unwrap_or(PANEL_COUNT_Y))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/mod.rs"]
mod tests;
