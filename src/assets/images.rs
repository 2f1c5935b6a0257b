use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use anyhow::Context;

use crate::foundation::error::{SignError, SignResult};
use crate::foundation::log::LogHandle;
use crate::raster::image::Image;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct ImageKey {
    name: String,
    width: Option<u32>,
    height: Option<u32>,
}

/// PNG loader rooted at an assets directory.
///
/// `load("eye", None, Some(32))` reads `<root>/eye.png` and scales it to a height of 32 keeping
/// the aspect ratio. Results are cached per name and target size for the process lifetime.
pub struct ImageStore {
    root: PathBuf,
    cache: Mutex<HashMap<ImageKey, Arc<Image>>>,
    log: LogHandle,
}

impl ImageStore {
    /// Create a store that resolves names under `root`.
    pub fn new(root: impl Into<PathBuf>, log: LogHandle) -> Self {
        Self {
            root: root.into(),
            cache: Mutex::new(HashMap::new()),
            log,
        }
    }

    /// Directory images are read from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load `<root>/<name>.png`, resized to the requested target.
    ///
    /// With both targets the image is resized exactly; with one the other side follows the
    /// aspect ratio. Missing or undecodable files yield [`SignError::Configuration`].
    pub fn load(
        &self,
        name: &str,
        width: Option<u32>,
        height: Option<u32>,
    ) -> SignResult<Arc<Image>> {
        let key = ImageKey {
            name: name.to_owned(),
            width,
            height,
        };
        if let Some(hit) = self.lock().get(&key) {
            return Ok(Arc::clone(hit));
        }

        let path = self.root.join(format!("{name}.png"));
        let img = decode_png(&path, width, height).map_err(|err| {
            let msg = format!("image '{name}': {err:#}");
            self.log.in_scope(|| {
                tracing::warn!(path = %path.display(), error = %msg, "image unavailable")
            });
            SignError::configuration(msg)
        })?;
        self.log.in_scope(|| {
            tracing::debug!(
                image = name,
                width = img.width(),
                height = img.height(),
                "loaded image"
            )
        });

        let img = Arc::new(img);
        self.lock().insert(key, Arc::clone(&img));
        Ok(img)
    }

    /// Number of cached entries.
    pub fn cached_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<ImageKey, Arc<Image>>> {
        self.cache.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for ImageStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageStore")
            .field("root", &self.root)
            .field("cached", &self.cached_count())
            .finish()
    }
}

fn decode_png(path: &Path, width: Option<u32>, height: Option<u32>) -> anyhow::Result<Image> {
    let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let decoded = image::load_from_memory(&bytes).context("decode image from memory")?;
    let rgba = decoded.to_rgba8();
    let (src_w, src_h) = rgba.dimensions();
    let (w, h) = target_size(src_w, src_h, width, height);

    let rgba = if (w, h) == (src_w, src_h) {
        rgba
    } else {
        image::imageops::resize(&rgba, w, h, image::imageops::FilterType::Nearest)
    };
    let (w, h) = rgba.dimensions();
    Ok(Image::from_rgba8(w, h, rgba.into_raw())?)
}

pub(crate) fn target_size(
    src_w: u32,
    src_h: u32,
    width: Option<u32>,
    height: Option<u32>,
) -> (u32, u32) {
    let scaled = |num: u32, den: u32, other: u32| -> u32 {
        if den == 0 {
            return other.max(1);
        }
        ((u64::from(other) * u64::from(num) + u64::from(den) / 2) / u64::from(den)).max(1) as u32
    };
    match (width, height) {
        (Some(w), Some(h)) => (w.max(1), h.max(1)),
        (Some(w), None) => (w.max(1), scaled(src_h, src_w, w)),
        (None, Some(h)) => (scaled(src_w, src_h, h), h.max(1)),
        (None, None) => (src_w, src_h),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/images.rs"]
mod tests;
