//! Interleaved vertex layout

use bytemuck::{Pod, Zeroable};

/// Interleaved vertex as uploaded to the engine
///
/// 32 bytes: position, normal, texture coordinate.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Vertex {
    /// Position in model space
    pub position: [f32; 3],
    /// Surface normal (zero for unlit markers)
    pub normal: [f32; 3],
    /// Texture coordinate (zero when untextured)
    pub tex_coord: [f32; 2],
}

impl Vertex {
    /// Number of floats per vertex
    pub const FLOATS: usize = 8;

    /// Create a vertex
    pub fn new(position: [f32; 3], normal: [f32; 3], tex_coord: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            tex_coord,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout() {
        assert_eq!(std::mem::size_of::<Vertex>(), Vertex::FLOATS * 4);

        let v = Vertex::new([1.0, 2.0, 3.0], [0.0, 0.0, 1.0], [0.5, 0.25]);
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&v));
        assert_eq!(floats, &[1.0, 2.0, 3.0, 0.0, 0.0, 1.0, 0.5, 0.25]);
    }
}
