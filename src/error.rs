//! Error Types: Failure Modes of Geometry and Integration
//!
//! Three failures are intrinsic to the problem:
//!
//! - **DegenerateGeometry**: a direction (tangent, normal) was requested
//!   where the curve is stationary, so no canonical direction exists
//! - **UnsupportedOrder**: a derivative order outside {1, 2, 3}
//! - **SolverDivergence**: the adaptive solver could not meet its
//!   tolerances within the step budget
//!
//! Curvature and torsion never fail; they report 0 at degeneracies.
//! The remaining variants reject malformed inputs before any work is done.

/// Errors raised by curve geometry and dynamics integration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Speed |γ'(t)| below epsilon where a direction is required
    #[error("degenerate geometry at t = {t}: speed {speed:e} is below epsilon")]
    DegenerateGeometry { t: f64, speed: f64 },

    /// Derivative order outside {1, 2, 3}
    #[error("derivative order {order} not supported (expected 1, 2 or 3)")]
    UnsupportedOrder { order: usize },

    /// Step control failed to satisfy tolerances within budget
    #[error("solver diverged at time {time} after {steps} steps: {reason}")]
    SolverDivergence {
        time: f64,
        steps: usize,
        reason: String,
    },

    /// Vector length does not match the particle count
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// Malformed numerical parameter (sample count, step size, tolerance)
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, Error>;
