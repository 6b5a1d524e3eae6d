//! Dynamics Module: Single Particles Constrained to Curves
//!
//! A law of motion prescribes d²t/dτ² for the curve parameter t:
//!
//! - **Free**: a = 0, uniform parametric motion
//! - **Constant speed**: a = -(γ'·γ''/|γ'|²)v², fixed speed in R³
//! - **Curvature driven**: a = f(κ) - γ_d·v
//!
//! Custom laws implement `CurveDynamics::acceleration` and inherit
//! integration and spatial mapping.

mod traits;
mod free;
mod constant_speed;
mod curvature_driven;

pub use traits::{CurveDynamics, ParticleState, Trajectory};
pub use free::FreeParticleDynamics;
pub use constant_speed::ConstantSpeedDynamics;
pub use curvature_driven::CurvatureDrivenDynamics;
