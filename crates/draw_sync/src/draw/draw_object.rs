//! Draw-object records produced by the scene each frame

use serde::{Deserialize, Serialize};

use crate::foundation::math::{Vec3, Vec3d};

/// Placeholder identity used by upstream for objects without a real geometry
///
/// Bindings for this identity are never retained between passes.
pub const DEFAULT_GEOM_ID: &str = "Default";

/// Which viewport a draw-object is aimed at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Screen {
    /// Main model window
    #[default]
    Main,
    /// Cross-section editor preview
    CrossSection,
    /// Mesh generation preview
    Mesh,
}

/// Kind of a draw-object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawKind {
    /// Independent line segments
    Lines,
    /// Closed polyline
    LineLoop,
    /// Open polyline
    LineStrip,
    /// Cross-section grid drawn as wireframe quads
    WireMesh,
    /// Triangle list drawn as wireframe
    WireTris,
    /// Cross-section grid drawn as wireframe over a solid fill
    HiddenMesh,
    /// Triangle list drawn as wireframe over a solid fill
    HiddenTris,
    /// Shaded cross-section grid
    ShadedMesh,
    /// Shaded triangle list
    ShadedTris,
    /// Shaded cross-section grid with textures
    TexturedMesh,
    /// Lighting configuration packet, carries no geometry
    Lighting,
}

/// Vertex payload of a draw-object
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Geometry {
    /// No vertex data
    #[default]
    Empty,
    /// Flat point list with one normal per point
    Flat {
        /// Vertex positions
        points: Vec<Vec3d>,
        /// Vertex normals (may be empty for line kinds)
        normals: Vec<Vec3d>,
    },
    /// Grid of points indexed by (strip, cross-section)
    Grid {
        /// `points[strip][cross_section]`
        points: Vec<Vec<Vec3d>>,
        /// `normals[strip][cross_section]`
        normals: Vec<Vec<Vec3d>>,
    },
}

/// One texture applied to a textured mesh
#[derive(Debug, Clone, PartialEq)]
pub struct TextureDescriptor {
    /// Identity of the texture within its draw-object
    pub id: String,
    /// Image file the texture is loaded from
    pub file_name: String,
    /// Offset along U
    pub u: f64,
    /// Offset along V
    pub v: f64,
    /// Repeat scale along U
    pub u_scale: f64,
    /// Repeat scale along V
    pub v_scale: f64,
    /// Mirror along U
    pub flip_u: bool,
    /// Mirror along V
    pub flip_v: bool,
    /// Opacity in `[0, 1]`
    pub transparency: f32,
}

impl TextureDescriptor {
    /// Create a descriptor with no offset, unit scale and full opacity
    pub fn new(id: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            file_name: file_name.into(),
            u: 0.0,
            v: 0.0,
            u_scale: 1.0,
            v_scale: 1.0,
            flip_u: false,
            flip_v: false,
            transparency: 1.0,
        }
    }
}

/// One light source of a lighting packet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightDescriptor {
    /// Light position (or direction, the engine receives w = 0)
    pub position: Vec3,
    /// Ambient intensity
    pub ambient: f32,
    /// Diffuse intensity
    pub diffuse: f32,
    /// Specular intensity
    pub specular: f32,
    /// Whether the light is switched on
    pub enabled: bool,
}

/// Upstream description of one renderable entity
#[derive(Debug, Clone, PartialEq)]
pub struct DrawObject {
    /// Geometry identity, stable across frames
    pub geom_id: String,
    /// Viewport this object is aimed at
    pub screen: Screen,
    /// Object kind
    pub kind: DrawKind,
    /// Visibility flag
    pub visible: bool,
    /// RGB line color in `[0, 1]`
    pub line_color: Vec3,
    /// Line width in pixels
    pub line_width: f32,
    /// Vertex data changed since the last pass
    pub geom_changed: bool,
    /// Vertex payload
    pub geometry: Geometry,
    /// Textures, only read for [`DrawKind::TexturedMesh`]
    pub textures: Vec<TextureDescriptor>,
    /// Lights, only read for [`DrawKind::Lighting`]
    pub lights: Vec<LightDescriptor>,
}

impl DrawObject {
    /// Create a visible, dirty draw-object on the main screen
    pub fn new(geom_id: impl Into<String>, kind: DrawKind) -> Self {
        Self {
            geom_id: geom_id.into(),
            screen: Screen::Main,
            kind,
            visible: true,
            line_color: Vec3::new(0.0, 0.0, 0.0),
            line_width: 1.0,
            geom_changed: true,
            geometry: Geometry::Empty,
            textures: Vec::new(),
            lights: Vec::new(),
        }
    }

    /// Create a lighting packet
    pub fn lighting(geom_id: impl Into<String>, lights: Vec<LightDescriptor>) -> Self {
        Self {
            lights,
            ..Self::new(geom_id, DrawKind::Lighting)
        }
    }

    /// Set the target screen
    pub fn with_screen(mut self, screen: Screen) -> Self {
        self.screen = screen;
        self
    }

    /// Set the vertex payload
    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Set line color and width
    pub fn with_line_style(mut self, color: Vec3, width: f32) -> Self {
        self.line_color = color;
        self.line_width = width;
        self
    }

    /// Set the texture list
    pub fn with_textures(mut self, textures: Vec<TextureDescriptor>) -> Self {
        self.textures = textures;
        self
    }

    /// Whether this object is the placeholder identity
    pub fn is_default(&self) -> bool {
        self.geom_id == DEFAULT_GEOM_ID
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_draw_object_is_dirty_and_visible() {
        let obj = DrawObject::new("wing", DrawKind::ShadedMesh);
        assert!(obj.geom_changed);
        assert!(obj.visible);
        assert_eq!(obj.screen, Screen::Main);
        assert!(!obj.is_default());
    }

    #[test]
    fn test_lighting_packet() {
        let light = LightDescriptor {
            position: Vec3::new(1.0, 2.0, 3.0),
            ambient: 0.2,
            diffuse: 0.5,
            specular: 0.7,
            enabled: true,
        };
        let obj = DrawObject::lighting("lights", vec![light; 3]);
        assert_eq!(obj.kind, DrawKind::Lighting);
        assert_eq!(obj.lights.len(), 3);
    }

    #[test]
    fn test_default_identity() {
        let obj = DrawObject::new(DEFAULT_GEOM_ID, DrawKind::Lines);
        assert!(obj.is_default());
    }
}
