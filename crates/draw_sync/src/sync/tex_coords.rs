//! Texture coordinate generation for cross-section grids
//!
//! U runs along each strip and V across strips at a fixed cross-section.
//! Both are normalized arc length, so irregular point spacing still maps
//! to evenly stretched textures. A zero-length run (the pointed cap of a
//! pod, say) falls back to uniform `(k + 1) / n`.

use super::GeometryError;
use crate::foundation::math::{distance, Vec3d};

/// Texture coordinates shaped like the input grid, `coords[strip][xsec] = [u, v]`
pub fn generate_tex_coords(points: &[Vec<Vec3d>]) -> Result<Vec<Vec<[f64; 2]>>, GeometryError> {
    let num_xsecs = grid_width(points)?;
    let mut coords = vec![vec![[0.0; 2]; num_xsecs]; points.len()];

    for (strip, row) in points.iter().zip(coords.iter_mut()) {
        let u = normalized_arc_length(strip.iter());
        for (coord, u) in row.iter_mut().zip(u) {
            coord[0] = u;
        }
    }

    for j in 0..num_xsecs {
        let v = normalized_arc_length(points.iter().map(|strip| &strip[j]));
        for (row, v) in coords.iter_mut().zip(v) {
            row[j][1] = v;
        }
    }

    Ok(coords)
}

/// Shared cross-section count of a rectangular grid
pub(crate) fn grid_width(points: &[Vec<Vec3d>]) -> Result<usize, GeometryError> {
    let width = points.first().map_or(0, Vec::len);
    for (row, strip) in points.iter().enumerate() {
        if strip.len() != width {
            return Err(GeometryError::RaggedGrid {
                row,
                expected: width,
                found: strip.len(),
            });
        }
    }
    Ok(width)
}

fn normalized_arc_length<'a>(points: impl Iterator<Item = &'a Vec3d>) -> Vec<f64> {
    let mut cumulative = Vec::new();
    let mut total = 0.0;
    let mut prev: Option<&Vec3d> = None;

    for p in points {
        if let Some(q) = prev {
            total += distance(q, p);
        }
        cumulative.push(total);
        prev = Some(p);
    }

    let n = cumulative.len() as f64;
    if total <= 0.0 {
        (1..=cumulative.len()).map(|k| k as f64 / n).collect()
    } else {
        cumulative.into_iter().map(|d| d / total).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn strip_at_x(xs: &[f64], y: f64) -> Vec<Vec3d> {
        xs.iter().map(|&x| Vec3d::new(x, y, 0.0)).collect()
    }

    #[test]
    fn test_u_follows_arc_length() {
        let grid = vec![strip_at_x(&[0.0, 1.0, 3.0, 6.0], 0.0), strip_at_x(&[0.0, 1.0, 3.0, 6.0], 2.0)];
        let coords = generate_tex_coords(&grid).unwrap();

        let expected = [0.0, 1.0 / 6.0, 3.0 / 6.0, 1.0];
        for row in &coords {
            for (coord, u) in row.iter().zip(expected) {
                assert_relative_eq!(coord[0], u);
            }
        }
    }

    #[test]
    fn test_v_follows_arc_length_across_strips() {
        let grid: Vec<_> = [0.0, 2.0, 3.0].iter().map(|&y| strip_at_x(&[0.0, 1.0], y)).collect();
        let coords = generate_tex_coords(&grid).unwrap();

        let expected = [0.0, 2.0 / 3.0, 1.0];
        for j in 0..2 {
            for (i, v) in expected.iter().enumerate() {
                assert_relative_eq!(coords[i][j][1], *v);
            }
        }
    }

    #[test]
    fn test_degenerate_strip_is_uniform() {
        // Pointed cap: every cross-section collapses onto one point
        let tip = vec![Vec3d::new(5.0, 0.0, 0.0); 4];
        let grid = vec![tip, strip_at_x(&[0.0, 1.0, 2.0, 3.0], 1.0)];
        let coords = generate_tex_coords(&grid).unwrap();

        for (j, coord) in coords[0].iter().enumerate() {
            assert!(coord[0].is_finite());
            assert_relative_eq!(coord[0], (j + 1) as f64 / 4.0);
        }
        assert_relative_eq!(coords[1][0][0], 0.0);
        assert_relative_eq!(coords[1][3][0], 1.0);
    }

    #[test]
    fn test_single_strip_v_fallback() {
        let grid = vec![strip_at_x(&[0.0, 1.0, 2.0], 0.0)];
        let coords = generate_tex_coords(&grid).unwrap();
        for coord in &coords[0] {
            assert_relative_eq!(coord[1], 1.0);
        }
    }

    #[test]
    fn test_empty_grid() {
        assert!(generate_tex_coords(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_ragged_grid_is_rejected() {
        let grid = vec![strip_at_x(&[0.0, 1.0], 0.0), strip_at_x(&[0.0], 1.0)];
        assert!(matches!(
            generate_tex_coords(&grid),
            Err(GeometryError::RaggedGrid { row: 1, expected: 2, found: 1 })
        ));
    }
}
