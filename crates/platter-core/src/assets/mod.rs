//! Slot-keyed asset storage and public URL resolution.
//!
//! All generated artifacts live in a fixed tree under one asset root:
//!
//! ```text
//! <root>/images/{breakfast,lunch,dinner}.png
//! <root>/audio/{breakfast,lunch,dinner}.mp3
//! <root>/recipes/{breakfast,lunch,dinner}.txt
//! ```
//!
//! Paths are a pure function of the canonical [`MealSlot`], never of
//! the meal title, which makes repeated runs idempotent at the
//! filesystem level: the same three files are overwritten in place,
//! with no versioning and no garbage collection.

pub mod sanitize;

pub use sanitize::sanitize;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use crate::models::MealSlot;

/// Public path prefix the serving layer mounts the asset root under.
pub const PUBLIC_PREFIX: &str = "static";

const IMAGES_DIR: &str = "images";
const AUDIO_DIR: &str = "audio";
const RECIPES_DIR: &str = "recipes";

/// The three artifact paths for one meal slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPaths {
    pub image: PathBuf,
    pub audio: PathBuf,
    pub recipe_text: PathBuf,
}

/// Error raised when a path handed to [`AssetStore::public_url`] does
/// not lie under the asset root. This is a programming error in the
/// caller, not a user-facing condition.
#[derive(Debug, Error)]
#[error("path {path:?} is not under the asset root {root:?}")]
pub struct PathOutsideRoot {
    root: PathBuf,
    path: PathBuf,
}

/// Flat-file store for generated meal artifacts.
#[derive(Debug, Clone)]
pub struct AssetStore {
    root: PathBuf,
}

impl AssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The asset root the serving layer exposes read-only.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the `images/`, `audio/`, and `recipes/` directories.
    /// Idempotent.
    pub fn ensure_layout(&self) -> Result<()> {
        for dir in [IMAGES_DIR, AUDIO_DIR, RECIPES_DIR] {
            let path = self.root.join(dir);
            std::fs::create_dir_all(&path)
                .with_context(|| format!("failed to create asset directory {}", path.display()))?;
        }
        Ok(())
    }

    /// Storage paths for a slot. Pure: no filesystem access.
    pub fn paths_for(&self, slot: MealSlot) -> AssetPaths {
        let name = slot.as_str();
        AssetPaths {
            image: self.root.join(IMAGES_DIR).join(format!("{name}.png")),
            audio: self.root.join(AUDIO_DIR).join(format!("{name}.mp3")),
            recipe_text: self.root.join(RECIPES_DIR).join(format!("{name}.txt")),
        }
    }

    /// Persist image bytes for a slot, overwriting any previous run's
    /// file. Returns the written path.
    pub fn write_image(&self, slot: MealSlot, bytes: &[u8]) -> Result<PathBuf> {
        self.write(self.paths_for(slot).image, bytes)
    }

    /// Persist audio bytes for a slot, overwriting in place.
    pub fn write_audio(&self, slot: MealSlot, bytes: &[u8]) -> Result<PathBuf> {
        self.write(self.paths_for(slot).audio, bytes)
    }

    /// Persist recipe text for a slot, overwriting in place. The HTML
    /// view reads this file back later.
    pub fn write_recipe(&self, slot: MealSlot, text: &str) -> Result<PathBuf> {
        self.write(self.paths_for(slot).recipe_text, text.as_bytes())
    }

    /// Read back the persisted recipe text for a slot.
    ///
    /// Returns `Ok(None)` when no recipe has been generated for the
    /// slot yet, distinguishing that from an actual read failure.
    pub fn read_recipe(&self, slot: MealSlot) -> Result<Option<String>> {
        let path = self.paths_for(slot).recipe_text;
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => {
                Err(e).with_context(|| format!("failed to read recipe at {}", path.display()))
            }
        }
    }

    /// Map a storage path under the root onto a public URL:
    /// `{base_url}/static/{path relative to root}`.
    ///
    /// `base_url` may or may not carry a trailing slash. Paths outside
    /// the root are rejected with [`PathOutsideRoot`].
    pub fn public_url(&self, path: &Path, base_url: &str) -> Result<String, PathOutsideRoot> {
        let rel = path.strip_prefix(&self.root).map_err(|_| PathOutsideRoot {
            root: self.root.clone(),
            path: path.to_path_buf(),
        })?;

        let rel: Vec<_> = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect();

        Ok(format!(
            "{}/{PUBLIC_PREFIX}/{}",
            base_url.trim_end_matches('/'),
            rel.join("/")
        ))
    }

    fn write(&self, path: PathBuf, bytes: &[u8]) -> Result<PathBuf> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create asset directory {}", parent.display())
            })?;
        }
        std::fs::write(&path, bytes)
            .with_context(|| format!("failed to write asset {}", path.display()))?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "wrote asset");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, AssetStore) {
        let dir = tempfile::TempDir::new().unwrap();
        let store = AssetStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn paths_are_keyed_by_slot_name() {
        let (_dir, store) = store();
        let paths = store.paths_for(MealSlot::Lunch);
        assert!(paths.image.ends_with("images/lunch.png"));
        assert!(paths.audio.ends_with("audio/lunch.mp3"));
        assert!(paths.recipe_text.ends_with("recipes/lunch.txt"));
    }

    #[test]
    fn ensure_layout_creates_the_three_directories() {
        let (_dir, store) = store();
        store.ensure_layout().unwrap();
        for sub in ["images", "audio", "recipes"] {
            assert!(store.root().join(sub).is_dir(), "missing {sub}/");
        }
        // Second call is a no-op.
        store.ensure_layout().unwrap();
    }

    #[test]
    fn writes_overwrite_in_place() {
        let (_dir, store) = store();
        let first = store.write_recipe(MealSlot::Breakfast, "v1").unwrap();
        let second = store.write_recipe(MealSlot::Breakfast, "v2").unwrap();
        assert_eq!(first, second, "same slot must map to the same file");
        assert_eq!(std::fs::read_to_string(&second).unwrap(), "v2");

        let entries = std::fs::read_dir(store.root().join("recipes")).unwrap().count();
        assert_eq!(entries, 1, "overwrites must not accumulate files");
    }

    #[test]
    fn read_recipe_distinguishes_missing_from_present() {
        let (_dir, store) = store();
        assert!(store.read_recipe(MealSlot::Dinner).unwrap().is_none());

        store.write_recipe(MealSlot::Dinner, "baked fish").unwrap();
        assert_eq!(
            store.read_recipe(MealSlot::Dinner).unwrap().as_deref(),
            Some("baked fish")
        );
    }

    #[test]
    fn public_url_is_relative_to_the_root() {
        let (_dir, store) = store();
        let paths = store.paths_for(MealSlot::Breakfast);
        let url = store
            .public_url(&paths.image, "http://localhost:8000/")
            .unwrap();
        assert_eq!(url, "http://localhost:8000/static/images/breakfast.png");
    }

    #[test]
    fn public_url_tolerates_missing_trailing_slash() {
        let (_dir, store) = store();
        let paths = store.paths_for(MealSlot::Dinner);
        let url = store
            .public_url(&paths.audio, "http://example.com")
            .unwrap();
        assert_eq!(url, "http://example.com/static/audio/dinner.mp3");
    }

    #[test]
    fn public_url_rejects_paths_outside_the_root() {
        let (_dir, store) = store();
        let err = store
            .public_url(Path::new("/etc/passwd"), "http://localhost/")
            .unwrap_err();
        assert!(err.to_string().contains("not under the asset root"));
    }

    #[test]
    fn write_image_and_audio_round_trip_bytes() {
        let (_dir, store) = store();
        let png = store.write_image(MealSlot::Lunch, &[1, 2, 3]).unwrap();
        let mp3 = store.write_audio(MealSlot::Lunch, &[4, 5]).unwrap();
        assert_eq!(std::fs::read(png).unwrap(), vec![1, 2, 3]);
        assert_eq!(std::fs::read(mp3).unwrap(), vec![4, 5]);
    }
}
