//! Texture assets
//!
//! Image decoding plus the file-keyed texture cache shared by every
//! viewport of a process.

pub mod image_loader;
pub mod texture_cache;

pub use image_loader::ImageData;
pub use texture_cache::{Texture2D, TextureCache};

use thiserror::Error;

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Asset not found
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// Failed to load asset
    #[error("Failed to load asset: {0}")]
    LoadFailed(String),

    /// Invalid asset data
    #[error("Invalid data: {0}")]
    InvalidData(String),
}
