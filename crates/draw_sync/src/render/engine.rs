//! Backend abstraction traits for the rendering engine
//!
//! These traits describe exactly what the draw-set synchronizer and the
//! viewport need from an engine: renderable objects with vertex/element
//! buffers and style state, per-object texture managers, light slots and a
//! display that owns the camera.

use std::sync::Arc;

use crate::assets::Texture2D;

/// Handle to a renderable object issued by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectHandle(pub u64);

/// Handle to a texture attached to one renderable, issued by its texture manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// Category of renderable requested from the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// Unlit line primitives
    Marker,
    /// Lit, texture-capable surface
    Entity,
}

/// Primitive assembly of a renderable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeomType {
    /// Independent segments
    Lines,
    /// Closed polyline
    LineLoop,
    /// Open polyline
    LineStrip,
    /// Quads from the element buffer
    Quads,
    /// Triangle list
    Triangles,
}

/// How an entity is shaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderStyle {
    /// Edges only
    WireFrame,
    /// Edges over a solid, hidden-line fill
    WireFrameSolid,
    /// Lit solid
    MeshShaded,
    /// Lit solid with textures
    MeshTextured,
}

/// Camera presets understood by the display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewPreset {
    /// Looking down
    Top,
    /// Looking from the front
    Front,
    /// Looking from the left
    Left,
    /// Isometric from the left
    LeftIso,
    /// Looking up
    Bottom,
    /// Looking from behind
    Rear,
    /// Looking from the right
    Right,
    /// Isometric from the right
    RightIso,
}

/// Per-renderable texture state
pub trait TextureManager {
    /// Attach a texture, returning its handle
    fn add(&mut self, texture: Arc<Texture2D>) -> TextureHandle;

    /// Detach a texture and release the engine's reference to it
    fn remove(&mut self, handle: TextureHandle);

    /// Set the texture coordinate offset
    fn translate(&mut self, handle: TextureHandle, u: f32, v: f32);

    /// Set the texture coordinate scale
    fn scale(&mut self, handle: TextureHandle, u: f32, v: f32);

    /// Set the opacity
    fn transparentize(&mut self, handle: TextureHandle, alpha: f32);

    /// Mirror texture coordinates
    fn flip_coord(&mut self, handle: TextureHandle, flip_u: bool, flip_v: bool);
}

/// A renderable object living inside the engine
pub trait Renderable {
    /// Show or hide
    fn set_visibility(&mut self, visible: bool);

    /// Primitive assembly
    fn set_geom_type(&mut self, geom_type: GeomType);

    /// Shading style
    fn set_render_style(&mut self, style: RenderStyle);

    /// RGB line color
    fn set_line_color(&mut self, r: f32, g: f32, b: f32);

    /// Line width in pixels
    fn set_line_width(&mut self, width: f32);

    /// Clear the vertex buffer
    fn empty_vertex_buffer(&mut self);

    /// Append raw vertex bytes
    fn append_vertex_buffer(&mut self, data: &[u8]);

    /// Clear the element buffer
    fn empty_element_buffer(&mut self);

    /// Append raw `u32` index bytes
    fn append_element_buffer(&mut self, data: &[u8]);

    /// Toggle indexed drawing
    fn enable_element_buffer(&mut self, enable: bool);

    /// Texture state, `None` when this renderable cannot carry textures
    fn texture_manager_mut(&mut self) -> Option<&mut dyn TextureManager>;
}

/// One fixed-function light slot
pub trait LightSlot {
    /// Homogeneous position, `w = 0` for directional lights
    fn set_position(&mut self, position: [f32; 4]);

    /// RGBA ambient term
    fn set_ambient(&mut self, color: [f32; 4]);

    /// RGBA diffuse term
    fn set_diffuse(&mut self, color: [f32; 4]);

    /// RGBA specular term
    fn set_specular(&mut self, color: [f32; 4]);

    /// Switch on
    fn enable(&mut self);

    /// Switch off
    fn disable(&mut self);
}

/// Camera and layout control of the engine's display
pub trait Display {
    /// Arrange the display into a grid of viewports
    fn set_layout(&mut self, rows: u32, columns: u32);

    /// Make one viewport of the layout current
    fn select_viewport(&mut self, index: usize);

    /// Make the viewport under a window position current
    fn select_viewport_at(&mut self, x: i32, y: i32);

    /// Resize the drawable area in pixels
    fn resize(&mut self, width: u32, height: u32);

    /// Pan by a normalized step
    fn pan_by(&mut self, x: f32, y: f32);

    /// Zoom by a normalized step
    fn zoom_by(&mut self, amount: f32);

    /// Rotate following a drag from one pixel to another
    fn rotate_drag(&mut self, from: (i32, i32), to: (i32, i32));

    /// Pan following a drag from one pixel to another
    fn pan_drag(&mut self, from: (i32, i32), to: (i32, i32));

    /// Zoom following a drag from one pixel to another
    fn zoom_drag(&mut self, from: (i32, i32), to: (i32, i32));

    /// Re-center the camera on the scene
    fn center(&mut self);

    /// Store the current camera in a slot
    fn save(&mut self, slot: usize);

    /// Restore a camera from a slot
    fn load(&mut self, slot: usize);

    /// Jump to a preset view
    fn change_view(&mut self, preset: ViewPreset);
}

/// Main rendering engine trait
pub trait RenderEngine {
    /// Create a renderable and return its handle
    fn create_object(&mut self, kind: ObjectKind) -> ObjectHandle;

    /// Look up a live renderable
    fn object_mut(&mut self, handle: ObjectHandle) -> Option<&mut dyn Renderable>;

    /// Destroy a renderable and everything attached to it
    fn remove_object(&mut self, handle: ObjectHandle);

    /// Number of light slots the engine exposes
    fn light_slot_count(&self) -> usize;

    /// Access one light slot
    fn light_slot_mut(&mut self, index: usize) -> Option<&mut dyn LightSlot>;

    /// Camera and layout control
    fn display_mut(&mut self) -> &mut dyn Display;
}
