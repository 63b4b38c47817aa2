//! Math utilities and types
//!
//! Geometry arriving from the scene is double precision; everything pushed
//! to the rendering engine is single precision.

pub use nalgebra::{Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// Double precision 3D vector used for scene geometry
pub type Vec3d = Vector3<f64>;

/// Straight-line distance between two points
pub fn distance(a: &Vec3d, b: &Vec3d) -> f64 {
    (b - a).norm()
}

/// Narrow a double precision vector to the engine's float layout
pub fn to_f32_array(v: &Vec3d) -> [f32; 3] {
    [v.x as f32, v.y as f32, v.z as f32]
}

/// Sign of an integer step as a float (0 for 0)
pub fn step_sign(delta: i32) -> f32 {
    match delta.signum() {
        -1 => -1.0,
        1 => 1.0,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_distance() {
        let a = Vec3d::new(0.0, 0.0, 0.0);
        let b = Vec3d::new(3.0, 4.0, 0.0);
        assert_relative_eq!(distance(&a, &b), 5.0);
        assert_relative_eq!(distance(&b, &b), 0.0);
    }

    #[test]
    fn test_step_sign() {
        assert_eq!(step_sign(-12), -1.0);
        assert_eq!(step_sign(0), 0.0);
        assert_eq!(step_sign(3), 1.0);
    }

    #[test]
    fn test_to_f32_array() {
        let v = Vec3d::new(1.5, -2.25, 1.0e-3);
        let a = to_f32_array(&v);
        assert_relative_eq!(a[0], 1.5);
        assert_relative_eq!(a[1], -2.25);
        assert_relative_eq!(a[2], 1.0e-3);
    }
}
