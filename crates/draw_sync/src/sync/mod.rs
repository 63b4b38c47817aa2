//! Draw-set synchronization
//!
//! Reconciles a frame's draw-objects against a viewport's engine objects.
//!
//! ## Architecture
//!
//! ```text
//! Draw-objects (scene)
//!      ↓
//! DrawSetSynchronizer (bindings: geometry id → renderable + textures)
//!      ↓
//! RenderEngine (renderables, texture managers, light slots)
//! ```

mod buffers;
mod kind_table;
mod lighting;
mod synchronizer;
mod tex_coords;
mod textures;


pub use buffers::{quad_strip_indices, GeometryError, MeshBuffers};
pub use kind_table::{BufferLoad, KindProfile};
pub use lighting::{apply_lighting, MAX_LIGHTS};
pub use synchronizer::{BufferBinding, DrawSetSynchronizer, SyncStats, TextureBinding};
pub use tex_coords::generate_tex_coords;
pub use textures::{reconcile_textures, TextureTransform};
