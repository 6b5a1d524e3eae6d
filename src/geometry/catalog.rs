//! Curve Catalog: Closed-Form Reference Curves
//!
//! - **Helix**: γ(t) = (r cos t, r sin t, p·t/2π), constant κ and τ
//! - **Circle**: radius r in the plane through `center` orthogonal to `normal`
//! - **Viviani**: intersection of the sphere |x| = 2r with the cylinder
//!   (x - r)² + y² = r²
//! - **Lemniscate**: figure-eight lifted into 3D
//!
//! Helix and circle carry exact γ', γ'', γ'''. Viviani and the lemniscate
//! rely on finite differences.

use std::f64::consts::PI;

use glam::DVec3;

use super::curve::{axis_fallback_normal, ParametricCurve, EPSILON};
use crate::error::{Error, Result};

/// Circular helix of radius `radius` rising `pitch` per turn
///
/// κ = r / (r² + c²),  τ = c / (r² + c²),  c = p / 2π
pub fn helix(radius: f64, pitch: f64) -> ParametricCurve {
    let rise = pitch / (2.0 * PI);

    ParametricCurve::new(move |t| DVec3::new(radius * t.cos(), radius * t.sin(), rise * t))
        .with_first_derivative(move |t| DVec3::new(-radius * t.sin(), radius * t.cos(), rise))
        .with_second_derivative(move |t| DVec3::new(-radius * t.cos(), -radius * t.sin(), 0.0))
        .with_third_derivative(move |t| DVec3::new(radius * t.sin(), -radius * t.cos(), 0.0))
}

/// Closed-form helix curvature r / (r² + (p/2π)²)
pub fn helix_curvature(radius: f64, pitch: f64) -> f64 {
    let rise = pitch / (2.0 * PI);
    radius / (radius * radius + rise * rise)
}

/// Closed-form helix torsion (p/2π) / (r² + (p/2π)²)
pub fn helix_torsion(radius: f64, pitch: f64) -> f64 {
    let rise = pitch / (2.0 * PI);
    rise / (radius * radius + rise * rise)
}

/// Circle of radius `radius` around `center` in the plane orthogonal to `normal`
///
/// In-plane basis: u is eₓ (or e_y when |nₓ| ≥ 0.9) projected off n,
/// v = n × u. Fails when `normal` has zero length.
pub fn circle(radius: f64, center: DVec3, normal: DVec3) -> Result<ParametricCurve> {
    let length = normal.length();
    if length < EPSILON {
        return Err(Error::InvalidParameter(
            "circle plane normal must be non-zero".to_string(),
        ));
    }

    let n = normal / length;
    let u = axis_fallback_normal(n);
    let v = n.cross(u);

    Ok(
        ParametricCurve::new(move |t| center + radius * (t.cos() * u + t.sin() * v))
            .with_first_derivative(move |t| radius * (-t.sin() * u + t.cos() * v))
            .with_second_derivative(move |t| radius * (-t.cos() * u - t.sin() * v))
            .with_third_derivative(move |t| radius * (t.sin() * u - t.cos() * v)),
    )
}

/// Circle of radius `radius` in the xy-plane centred at the origin
pub fn planar_circle(radius: f64) -> ParametricCurve {
    let u = DVec3::X;
    let v = DVec3::Y;

    ParametricCurve::new(move |t| radius * (t.cos() * u + t.sin() * v))
        .with_first_derivative(move |t| radius * (-t.sin() * u + t.cos() * v))
        .with_second_derivative(move |t| radius * (-t.cos() * u - t.sin() * v))
        .with_third_derivative(move |t| radius * (t.sin() * u - t.cos() * v))
}

/// Viviani's curve: (r(1 + cos t), r sin t, 2r sin(t/2))
pub fn viviani_curve(radius: f64) -> ParametricCurve {
    ParametricCurve::new(move |t| {
        DVec3::new(
            radius * (1.0 + t.cos()),
            radius * t.sin(),
            2.0 * radius * (t / 2.0).sin(),
        )
    })
}

/// 3D lemniscate: a·(cos t, sin t cos t, sin t) / (1 + sin² t)
pub fn lemniscate_3d(a: f64) -> ParametricCurve {
    ParametricCurve::new(move |t| {
        let s = t.sin();
        let c = t.cos();
        let scale = a / (1.0 + s * s);
        DVec3::new(scale * c, scale * s * c, scale * s)
    })
}
