//! Texture cache for deduplicating loaded image files
//!
//! Textures are keyed by resolved file path. The cache only keeps weak
//! references: renderables own the textures, so a texture is freed as soon
//! as the last renderable using it lets go, and a later request for the same
//! file loads it again.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use super::{AssetError, ImageData};

/// A decoded 2D texture shared between renderables
#[derive(Debug)]
pub struct Texture2D {
    path: PathBuf,
    image: ImageData,
}

impl Texture2D {
    /// Create a texture from decoded pixels
    pub fn new(path: impl Into<PathBuf>, image: ImageData) -> Self {
        Self {
            path: path.into(),
            image,
        }
    }

    /// File the texture was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Pixel data
    pub fn image(&self) -> &ImageData {
        &self.image
    }

    /// Width and height in pixels
    pub fn dimensions(&self) -> (u32, u32) {
        (self.image.width, self.image.height)
    }
}

/// Thread-safe, file-keyed texture cache
///
/// Lookup and load happen under one lock so concurrent viewports never
/// decode the same file twice.
#[derive(Debug, Default)]
pub struct TextureCache {
    /// Base directory for relative file references
    root: Option<PathBuf>,
    /// Cache storage: resolved path -> texture
    entries: Mutex<HashMap<PathBuf, Weak<Texture2D>>>,
}

impl TextureCache {
    /// Create an empty cache resolving paths as given
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty cache resolving relative paths against `root`
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            entries: Mutex::default(),
        }
    }

    /// Get the texture for a file, loading it if no live copy exists
    pub fn get_2d_texture(&self, file: impl AsRef<Path>) -> Result<Arc<Texture2D>, AssetError> {
        let path = self.resolve(file.as_ref());
        let mut entries = self.lock();

        if let Some(texture) = entries.get(&path).and_then(Weak::upgrade) {
            return Ok(texture);
        }

        let image = ImageData::from_file(&path)?;
        log::info!(
            "Loaded texture {}x{} from {:?}",
            image.width,
            image.height,
            path
        );
        let texture = Arc::new(Texture2D::new(path.clone(), image));
        entries.insert(path, Arc::downgrade(&texture));
        Ok(texture)
    }

    /// Register already decoded pixels under a file path
    ///
    /// A live texture for the same path is returned instead of replaced.
    pub fn insert(&self, file: impl AsRef<Path>, image: ImageData) -> Arc<Texture2D> {
        let path = self.resolve(file.as_ref());
        let mut entries = self.lock();

        if let Some(texture) = entries.get(&path).and_then(Weak::upgrade) {
            return texture;
        }

        let texture = Arc::new(Texture2D::new(path.clone(), image));
        entries.insert(path, Arc::downgrade(&texture));
        texture
    }

    /// Whether a live texture exists for this file
    pub fn is_cached(&self, file: impl AsRef<Path>) -> bool {
        let path = self.resolve(file.as_ref());
        self.lock()
            .get(&path)
            .is_some_and(|weak| weak.strong_count() > 0)
    }

    /// Number of textures still owned by at least one renderable
    pub fn live_count(&self) -> usize {
        self.lock().values().filter(|weak| weak.strong_count() > 0).count()
    }

    /// Drop entries whose texture has been freed, returning how many were dropped
    pub fn purge(&self) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, weak| weak.strong_count() > 0);
        before - entries.len()
    }

    fn resolve(&self, file: &Path) -> PathBuf {
        match &self.root {
            Some(root) if file.is_relative() => root.join(file),
            _ => file.to_path_buf(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<PathBuf, Weak<Texture2D>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
