use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use crate::foundation::error::SignResult;
use crate::foundation::log::LogHandle;
use crate::raster::bdf::BdfFont;
use crate::raster::font::{BuiltinFont, Font};

/// BDF font loader rooted at a fonts directory.
pub struct FontLibrary {
    root: PathBuf,
    cache: Mutex<HashMap<String, Arc<dyn Font>>>,
    log: LogHandle,
}

impl FontLibrary {
    /// Create a library that resolves `<root>/<name>.bdf`.
    pub fn new(root: impl Into<PathBuf>, log: LogHandle) -> Self {
        Self {
            root: root.into(),
            cache: Mutex::new(HashMap::new()),
            log,
        }
    }

    /// Load and cache a font by name.
    pub fn load(&self, name: &str) -> SignResult<Arc<dyn Font>> {
        if let Some(hit) = self.lock().get(name) {
            return Ok(Arc::clone(hit));
        }
        let path = self.root.join(format!("{name}.bdf"));
        let font: Arc<dyn Font> = Arc::new(BdfFont::load(&path)?);
        self.log
            .in_scope(|| tracing::debug!(font = name, path = %path.display(), "loaded font"));
        self.lock().insert(name.to_owned(), Arc::clone(&font));
        Ok(font)
    }

    /// Like [`FontLibrary::load`], but logs failures and hands back the built-in 5x7 font.
    pub fn load_or_fallback(&self, name: &str) -> Arc<dyn Font> {
        match self.load(name) {
            Ok(font) => font,
            Err(err) => {
                self.log.in_scope(|| {
                    tracing::warn!(font = name, error = %err, "font unavailable, using built-in font")
                });
                Arc::new(BuiltinFont::default())
            }
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Arc<dyn Font>>> {
        self.cache.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for FontLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontLibrary")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
