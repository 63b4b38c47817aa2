//! Vertex and element buffer builders
//!
//! Each [`BufferLoad`] strategy turns a draw-object payload into
//! interleaved [`Vertex`] data (and, for grids, a quad index list). Uploads
//! always replace the renderable's buffers wholesale.

use thiserror::Error;

use super::kind_table::BufferLoad;
use super::tex_coords::{generate_tex_coords, grid_width};
use crate::draw::Geometry;
use crate::foundation::math::{to_f32_array, Vec3d};
use crate::render::{Renderable, Vertex};

/// Malformed vertex payloads
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// Payload shape does not match the kind's loading strategy
    #[error("{load:?} needs a {expected} payload")]
    PayloadMismatch {
        /// Strategy that was selected
        load: BufferLoad,
        /// Payload shape it accepts
        expected: &'static str,
    },

    /// Flat payload with a different number of normals than points
    #[error("{points} points but {normals} normals")]
    NormalCountMismatch {
        /// Point count
        points: usize,
        /// Normal count
        normals: usize,
    },

    /// Grid strip with a different cross-section count than the first one
    #[error("grid row {row} has {found} cross-sections, expected {expected}")]
    RaggedGrid {
        /// Offending strip
        row: usize,
        /// Cross-sections of the first strip
        expected: usize,
        /// Cross-sections of this strip
        found: usize,
    },

    /// Normal grid shaped differently from the point grid
    #[error("normal grid does not match the point grid")]
    NormalGridMismatch,

    /// Grid with more points than a 32-bit index can address
    #[error("grid of {strips}x{cross_sections} points exceeds 32-bit indices")]
    GridTooLarge {
        /// Strip count
        strips: usize,
        /// Cross-sections per strip
        cross_sections: usize,
    },
}

/// Buffer contents ready for upload
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshBuffers {
    /// Interleaved vertices
    pub vertices: Vec<Vertex>,
    /// Quad indices, `None` for non-indexed strategies
    pub indices: Option<Vec<u32>>,
}

impl MeshBuffers {
    /// Build the buffers of a payload with one strategy
    pub fn build(load: BufferLoad, geometry: &Geometry) -> Result<Self, GeometryError> {
        match (load, geometry) {
            (BufferLoad::CrossSectionGrid, Geometry::Grid { points, normals }) => {
                cross_section_grid(points, normals)
            }
            (BufferLoad::CrossSectionGrid, Geometry::Empty) => Ok(Self {
                vertices: Vec::new(),
                indices: Some(Vec::new()),
            }),
            (BufferLoad::CrossSectionGrid, Geometry::Flat { .. }) => {
                Err(GeometryError::PayloadMismatch {
                    load,
                    expected: "point grid",
                })
            }
            (BufferLoad::FlatTriangles, Geometry::Flat { points, normals }) => {
                flat_triangles(points, normals)
            }
            (BufferLoad::FlatMarkers, Geometry::Flat { points, .. }) => Ok(flat_markers(points)),
            (BufferLoad::FlatTriangles | BufferLoad::FlatMarkers, Geometry::Empty) => {
                Ok(Self::default())
            }
            (BufferLoad::FlatTriangles | BufferLoad::FlatMarkers, Geometry::Grid { .. }) => {
                Err(GeometryError::PayloadMismatch {
                    load,
                    expected: "flat point list",
                })
            }
        }
    }

    /// Replace the renderable's buffers with these contents
    ///
    /// Returns `true` when an element buffer was uploaded as well.
    pub fn upload(&self, renderable: &mut dyn Renderable) -> bool {
        renderable.empty_vertex_buffer();
        renderable.append_vertex_buffer(bytemuck::cast_slice(&self.vertices));

        match &self.indices {
            Some(indices) => {
                renderable.empty_element_buffer();
                renderable.append_element_buffer(bytemuck::cast_slice(indices));
                renderable.enable_element_buffer(true);
                true
            }
            None => false,
        }
    }
}

fn flat_triangles(points: &[Vec3d], normals: &[Vec3d]) -> Result<MeshBuffers, GeometryError> {
    if points.len() != normals.len() {
        return Err(GeometryError::NormalCountMismatch {
            points: points.len(),
            normals: normals.len(),
        });
    }

    let vertices = points
        .iter()
        .zip(normals)
        .map(|(p, n)| Vertex::new(to_f32_array(p), to_f32_array(n), [0.0; 2]))
        .collect();

    Ok(MeshBuffers {
        vertices,
        indices: None,
    })
}

fn flat_markers(points: &[Vec3d]) -> MeshBuffers {
    let vertices = points
        .iter()
        .map(|p| Vertex::new(to_f32_array(p), [0.0; 3], [0.0; 2]))
        .collect();

    MeshBuffers {
        vertices,
        indices: None,
    }
}

fn cross_section_grid(
    points: &[Vec<Vec3d>],
    normals: &[Vec<Vec3d>],
) -> Result<MeshBuffers, GeometryError> {
    let num_xsecs = grid_width(points)?;
    if normals.len() != points.len() || normals.iter().any(|row| row.len() != num_xsecs) {
        return Err(GeometryError::NormalGridMismatch);
    }

    let tex_coords = generate_tex_coords(points)?;

    let mut vertices = Vec::with_capacity(points.len() * num_xsecs);
    for ((point_row, normal_row), tex_row) in points.iter().zip(normals).zip(&tex_coords) {
        for ((p, n), t) in point_row.iter().zip(normal_row).zip(tex_row) {
            vertices.push(Vertex::new(
                to_f32_array(p),
                to_f32_array(n),
                [t[0] as f32, t[1] as f32],
            ));
        }
    }

    Ok(MeshBuffers {
        vertices,
        indices: Some(quad_strip_indices(points.len(), num_xsecs)?),
    })
}

/// Quad indices joining consecutive strips, closing each ring
///
/// For strip `i` and cross-section `j` the quad is
/// `(i*S+j, (i+1)*S+j, (i+1)*S+j+1, i*S+j+1)`, with the last cross-section
/// wrapping to `((i+1)*S, i*S)`.
///
/// Fails with [`GeometryError::GridTooLarge`] when a vertex index would not
/// fit in `u32`.
pub fn quad_strip_indices(
    num_strips: usize,
    num_xsecs: usize,
) -> Result<Vec<u32>, GeometryError> {
    let too_large = || GeometryError::GridTooLarge {
        strips: num_strips,
        cross_sections: num_xsecs,
    };
    let (Ok(rows), Ok(s)) = (u32::try_from(num_strips), u32::try_from(num_xsecs)) else {
        return Err(too_large());
    };
    if rows.checked_mul(s).is_none() {
        return Err(too_large());
    }

    let strips = rows.saturating_sub(1);
    let mut indices = Vec::with_capacity(strips as usize * num_xsecs * 4);

    for i in 0..strips {
        for j in 0..s {
            indices.push(i * s + j);
            indices.push((i + 1) * s + j);
            if j == s - 1 {
                indices.push((i + 1) * s);
                indices.push(i * s);
            } else {
                indices.push((i + 1) * s + j + 1);
                indices.push(i * s + j + 1);
            }
        }
    }

    Ok(indices)
}
