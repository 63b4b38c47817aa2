//! Draw kind dispatch table
//!
//! Every geometric draw kind maps to one engine object category, one
//! primitive assembly, an optional render style and one buffer-loading
//! strategy. Lighting packets have no entry.

use crate::draw::DrawKind;
use crate::render::{GeomType, ObjectKind, RenderStyle};

/// How vertex data of a kind is laid out for the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferLoad {
    /// Flat point/normal list, zero texture coordinates, no indices
    FlatTriangles,
    /// Flat point list, zero normals and texture coordinates, no indices
    FlatMarkers,
    /// Point grid with generated texture coordinates and a quad index buffer
    CrossSectionGrid,
}

/// Per-kind rendering profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindProfile {
    /// Engine object category to create
    pub object_kind: ObjectKind,
    /// Primitive assembly
    pub geom_type: GeomType,
    /// Shading style, `None` for line kinds
    pub render_style: Option<RenderStyle>,
    /// Buffer-loading strategy
    pub load: BufferLoad,
    /// Whether texture reconciliation runs every pass
    pub textured: bool,
}

impl KindProfile {
    const fn marker(geom_type: GeomType) -> Self {
        Self {
            object_kind: ObjectKind::Marker,
            geom_type,
            render_style: None,
            load: BufferLoad::FlatMarkers,
            textured: false,
        }
    }

    const fn entity(geom_type: GeomType, style: RenderStyle) -> Self {
        let load = match geom_type {
            GeomType::Quads => BufferLoad::CrossSectionGrid,
            _ => BufferLoad::FlatTriangles,
        };
        Self {
            object_kind: ObjectKind::Entity,
            geom_type,
            render_style: Some(style),
            load,
            textured: matches!(style, RenderStyle::MeshTextured),
        }
    }

    /// Profile of a draw kind, `None` for [`DrawKind::Lighting`]
    pub const fn of(kind: DrawKind) -> Option<Self> {
        use GeomType::{LineLoop, LineStrip, Lines, Quads, Triangles};
        use RenderStyle::{MeshShaded, MeshTextured, WireFrame, WireFrameSolid};

        let profile = match kind {
            DrawKind::Lines => Self::marker(Lines),
            DrawKind::LineLoop => Self::marker(LineLoop),
            DrawKind::LineStrip => Self::marker(LineStrip),
            DrawKind::WireMesh => Self::entity(Quads, WireFrame),
            DrawKind::WireTris => Self::entity(Triangles, WireFrame),
            DrawKind::HiddenMesh => Self::entity(Quads, WireFrameSolid),
            DrawKind::HiddenTris => Self::entity(Triangles, WireFrameSolid),
            DrawKind::ShadedMesh => Self::entity(Quads, MeshShaded),
            DrawKind::ShadedTris => Self::entity(Triangles, MeshShaded),
            DrawKind::TexturedMesh => Self::entity(Quads, MeshTextured),
            DrawKind::Lighting => return None,
        };
        Some(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_kinds_are_markers() {
        for (kind, geom) in [
            (DrawKind::Lines, GeomType::Lines),
            (DrawKind::LineLoop, GeomType::LineLoop),
            (DrawKind::LineStrip, GeomType::LineStrip),
        ] {
            let profile = KindProfile::of(kind).unwrap();
            assert_eq!(profile.object_kind, ObjectKind::Marker);
            assert_eq!(profile.geom_type, geom);
            assert_eq!(profile.render_style, None);
            assert_eq!(profile.load, BufferLoad::FlatMarkers);
            assert!(!profile.textured);
        }
    }

    #[test]
    fn test_surface_kinds() {
        let table = [
            (DrawKind::WireMesh, GeomType::Quads, RenderStyle::WireFrame, BufferLoad::CrossSectionGrid),
            (DrawKind::WireTris, GeomType::Triangles, RenderStyle::WireFrame, BufferLoad::FlatTriangles),
            (DrawKind::HiddenMesh, GeomType::Quads, RenderStyle::WireFrameSolid, BufferLoad::CrossSectionGrid),
            (DrawKind::HiddenTris, GeomType::Triangles, RenderStyle::WireFrameSolid, BufferLoad::FlatTriangles),
            (DrawKind::ShadedMesh, GeomType::Quads, RenderStyle::MeshShaded, BufferLoad::CrossSectionGrid),
            (DrawKind::ShadedTris, GeomType::Triangles, RenderStyle::MeshShaded, BufferLoad::FlatTriangles),
            (DrawKind::TexturedMesh, GeomType::Quads, RenderStyle::MeshTextured, BufferLoad::CrossSectionGrid),
        ];

        for (kind, geom, style, load) in table {
            let profile = KindProfile::of(kind).unwrap();
            assert_eq!(profile.object_kind, ObjectKind::Entity, "{:?}", kind);
            assert_eq!(profile.geom_type, geom, "{:?}", kind);
            assert_eq!(profile.render_style, Some(style), "{:?}", kind);
            assert_eq!(profile.load, load, "{:?}", kind);
            assert_eq!(profile.textured, kind == DrawKind::TexturedMesh, "{:?}", kind);
        }
    }

    #[test]
    fn test_lighting_has_no_profile() {
        assert!(KindProfile::of(DrawKind::Lighting).is_none());
    }
}
