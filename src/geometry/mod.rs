//! Geometry Module: Curves in R³ and Their Frenet-Serret Invariants
//!
//! - `curve.rs`: `ParametricCurve`, analytic or finite-difference derivatives,
//!   tangent/normal/binormal, curvature, torsion, arc length
//! - `frenet.rs`: `FrenetFrame` snapshot
//! - `catalog.rs`: helix, circle, Viviani's curve, 3D lemniscate
//! - `sample.rs`: point samples and κ/τ profiles on a parameter grid
//!
//! ## Degeneracy Policy
//!
//! Directions (T, N, B) fail with `DegenerateGeometry` where |γ'| < ε.
//! Scalars (κ, τ) report 0 instead, their limit for every catalog curve.

mod curve;
mod frenet;
mod catalog;
mod sample;

pub use curve::{ParametricCurve, CurveFn, EPSILON, DEFAULT_STEP};
pub use frenet::FrenetFrame;
pub use catalog::{
    helix,
    helix_curvature,
    helix_torsion,
    circle,
    planar_circle,
    viviani_curve,
    lemniscate_3d,
};
pub use sample::{CurveSamples, CurvatureProfile};
