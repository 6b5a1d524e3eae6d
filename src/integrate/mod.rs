//! Integration Module: Adaptive ODE Solver with Resampled Output
//!
//! All dynamics in this crate reduce to a first-order system y' = f(t, y)
//! solved by an embedded Runge-Kutta 5(4) pair:
//!
//! - `traits.rs`: `OdeSystem`, the right-hand-side seam
//! - `config.rs`: `SolverConfig` (tolerances, step budget)
//! - `dopri.rs`: Dormand-Prince stepping, dense output, `solve`
//!
//! The solver's own step sequence is never exposed; callers receive the
//! solution interpolated onto an evenly spaced grid over the time span.

mod traits;
mod config;
mod dopri;

pub use traits::OdeSystem;
pub use config::SolverConfig;
pub use dopri::{solve, Solution, SolverStats};
