//! Rendering engine contract
//!
//! The synchronizer never talks to a graphics API directly. It drives an
//! engine through the traits in [`engine`]; [`headless`] provides an
//! in-memory implementation used by tests and the demo.

pub mod engine;
pub mod headless;
mod vertex;

pub use engine::{
    Display, GeomType, LightSlot, ObjectHandle, ObjectKind, RenderEngine, RenderStyle,
    Renderable, TextureHandle, TextureManager, ViewPreset,
};
pub use headless::HeadlessEngine;
pub use vertex::Vertex;
