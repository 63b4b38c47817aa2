//! # Draw Sync
//!
//! Keeps an embedded 3D viewport's engine objects in step with the
//! draw-objects a modeling scene produces every frame.
//!
//! ## Features
//!
//! - **Incremental synchronization**: one renderable per geometry identity,
//!   buffers re-uploaded only when the geometry changed
//! - **Kind table**: every draw kind maps to a primitive category, render
//!   style and buffer-loading strategy
//! - **Shared textures**: file-keyed cache, freed with the last renderable
//!   that uses a file
//! - **Camera navigation**: mouse and keyboard gestures mapped to display
//!   operations
//! - **Headless engine**: in-memory backend for tests and tooling
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use draw_sync::prelude::*;
//!
//! let config = ViewerConfig::default();
//! let cache = Arc::new(TextureCache::new());
//! let mut viewport = Viewport::new(HeadlessEngine::new(), &config, cache);
//!
//! let mut scene = DrawScene::new();
//! scene.push(DrawObject::new("wing", DrawKind::WireMesh));
//!
//! let stats = viewport.update(&mut scene);
//! assert_eq!(stats.bindings_created, 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod assets;
pub mod config;
pub mod draw;
pub mod foundation;
pub mod render;
pub mod sync;
pub mod viewport;

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        assets::{AssetError, ImageData, Texture2D, TextureCache},
        config::{Config, ConfigError, ViewerConfig},
        draw::{
            DrawKind, DrawObject, DrawObjectSource, DrawScene, Geometry, LightDescriptor, Screen,
            TextureDescriptor,
        },
        foundation::math::{Vec3, Vec3d},
        render::{HeadlessEngine, RenderEngine, ViewPreset},
        sync::{DrawSetSynchronizer, GeometryError, SyncStats},
        viewport::{Key, Modifiers, MouseButton, MouseButtons, Viewport},
    };
}
