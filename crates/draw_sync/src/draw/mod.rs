//! Draw-object data model
//!
//! Draw-objects are produced upstream by the scene and describe one
//! renderable geometric entity (or one lighting packet) per frame. This
//! crate only reads them, except for acknowledging the geometry-changed
//! flag once a pass has consumed it.

mod draw_object;
mod source;

pub use draw_object::{
    DrawKind, DrawObject, Geometry, LightDescriptor, Screen, TextureDescriptor, DEFAULT_GEOM_ID,
};
pub use source::{DrawObjectSource, DrawScene};
