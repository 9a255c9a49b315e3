//! Image-surface collaborator.
//!
//! Loaders never decode pixels; they ask an [`ImageProvider`] for an opaque
//! [`ImageHandle`] carrying the surface size, which is all region validation
//! needs. The host's renderer maps the handle's path back to its own texture.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::LoadError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageHandle {
    pub path: Arc<str>,
    pub width: u32,
    pub height: u32,
}

impl ImageHandle {
    pub fn new(path: &str, width: u32, height: u32) -> Self {
        Self {
            path: Arc::from(path),
            width,
            height,
        }
    }
}

pub trait ImageProvider {
    fn load_image(&mut self, path: &str) -> Result<ImageHandle, LoadError>;
}

/// Reads image headers from disk under a content root. Handles are cached
/// per path so every region of an atlas shares one surface.
pub struct FileImageProvider {
    root: PathBuf,
    cache: HashMap<String, ImageHandle>,
}

impl FileImageProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: HashMap::new(),
        }
    }

    pub fn loaded_count(&self) -> usize {
        self.cache.len()
    }
}

impl ImageProvider for FileImageProvider {
    fn load_image(&mut self, path: &str) -> Result<ImageHandle, LoadError> {
        if let Some(handle) = self.cache.get(path) {
            return Ok(handle.clone());
        }
        let full_path = self.root.join(path);
        let (width, height) = image::image_dimensions(&full_path)
            .map_err(|e| LoadError::io(&full_path.display().to_string(), e))?;
        log::info!("Loaded image '{}' ({}x{})", path, width, height);
        let handle = ImageHandle::new(path, width, height);
        self.cache.insert(path.to_string(), handle.clone());
        Ok(handle)
    }
}

/// In-memory provider with pre-registered surface sizes.
#[derive(Debug, Default, Clone)]
pub struct FixedImageProvider {
    sizes: HashMap<String, (u32, u32)>,
    pub load_count: usize,
}

impl FixedImageProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(mut self, path: &str, width: u32, height: u32) -> Self {
        self.sizes.insert(path.to_string(), (width, height));
        self
    }
}

impl ImageProvider for FixedImageProvider {
    fn load_image(&mut self, path: &str) -> Result<ImageHandle, LoadError> {
        let &(width, height) = self
            .sizes
            .get(path)
            .ok_or_else(|| LoadError::io(path, "no such image"))?;
        self.load_count += 1;
        Ok(ImageHandle::new(path, width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_provider_returns_registered_sizes() {
        let mut provider = FixedImageProvider::new().with_image("images/atlas.png", 256, 128);
        let handle = provider.load_image("images/atlas.png").expect("image registered");
        assert_eq!(handle.width, 256);
        assert_eq!(handle.height, 128);
        assert_eq!(&*handle.path, "images/atlas.png");
        assert_eq!(provider.load_count, 1);
    }

    #[test]
    fn fixed_provider_rejects_unknown_paths() {
        let mut provider = FixedImageProvider::new();
        let err = provider.load_image("missing.png").expect_err("unknown image");
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn file_provider_reports_missing_files_as_io_errors() {
        let mut provider = FileImageProvider::new(std::env::temp_dir());
        let err = provider
            .load_image("slime_missing_image_for_test.png")
            .expect_err("file does not exist");
        assert!(matches!(err, LoadError::Io { .. }));
        assert_eq!(provider.loaded_count(), 0);
    }
}
