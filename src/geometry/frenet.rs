//! Frenet-Serret Frame: Local Shape of a Curve
//!
//! The moving frame (T, N, B) together with κ and τ satisfies
//!
//!   T' =  κ N
//!   N' = -κ T + τ B
//!   B' = -τ N
//!
//! (derivatives per unit arc length). Frames are snapshots computed on
//! demand from a curve and never mutated.

use glam::{DMat3, DVec3};

/// Frenet-Serret frame at one parameter value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrenetFrame {
    /// Unit tangent T
    pub tangent: DVec3,
    /// Unit normal N
    pub normal: DVec3,
    /// Unit binormal B = T × N
    pub binormal: DVec3,
    /// Curvature κ
    pub curvature: f64,
    /// Torsion τ
    pub torsion: f64,
}

impl FrenetFrame {
    /// Check that (T, N, B) is orthonormal and right-handed within `tol`
    pub fn is_orthonormal(&self, tol: f64) -> bool {
        let unit = |v: DVec3| (v.length() - 1.0).abs() <= tol;

        unit(self.tangent)
            && unit(self.normal)
            && unit(self.binormal)
            && self.tangent.dot(self.normal).abs() <= tol
            && self.tangent.dot(self.binormal).abs() <= tol
            && self.normal.dot(self.binormal).abs() <= tol
            && self.tangent.cross(self.normal).dot(self.binormal) > 0.0
    }

    /// Rows T, N, B as a 3×3 array
    pub fn as_rows(&self) -> [[f64; 3]; 3] {
        [
            self.tangent.to_array(),
            self.normal.to_array(),
            self.binormal.to_array(),
        ]
    }

    /// Rotation whose columns are T, N, B (local → world)
    pub fn to_rotation(&self) -> DMat3 {
        DMat3::from_cols(self.tangent, self.normal, self.binormal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> FrenetFrame {
        FrenetFrame {
            tangent: DVec3::X,
            normal: DVec3::Y,
            binormal: DVec3::Z,
            curvature: 1.0,
            torsion: 0.0,
        }
    }

    #[test]
    fn test_standard_frame_is_orthonormal() {
        assert!(standard().is_orthonormal(1e-12));
    }

    #[test]
    fn test_left_handed_frame_rejected() {
        let mut frame = standard();
        frame.binormal = -DVec3::Z;
        assert!(!frame.is_orthonormal(1e-12));
    }

    #[test]
    fn test_non_unit_rejected() {
        let mut frame = standard();
        frame.normal = DVec3::new(0.0, 2.0, 0.0);
        assert!(!frame.is_orthonormal(1e-6));
    }

    #[test]
    fn test_rows_and_rotation() {
        let frame = standard();
        assert_eq!(frame.as_rows()[1], [0.0, 1.0, 0.0]);

        let world = frame.to_rotation() * DVec3::new(0.0, 0.0, 1.0);
        assert_eq!(world, DVec3::Z);
    }
}
