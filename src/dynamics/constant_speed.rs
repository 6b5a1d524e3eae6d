//! Constant Physical Speed: Uniform Motion in R³
//!
//! Requiring |dγ/dτ| = |γ'(t)|·|dt/dτ| to stay constant and differentiating
//! gives
//!
//!   d²t/dτ² = -(γ' · γ'') / |γ'|² · (dt/dτ)²
//!
//! The constraint fixes only how speed is preserved; its value is set by
//! the initial velocity. `initial_state` picks the velocity that realises
//! the configured target speed.

use super::traits::{CurveDynamics, ParticleState};
use crate::error::{Error, Result};
use crate::geometry::{ParametricCurve, EPSILON};
use crate::integrate::SolverConfig;

/// Particle moving at constant speed in physical space
#[derive(Debug, Clone)]
pub struct ConstantSpeedDynamics {
    curve: ParametricCurve,
    /// Target physical speed |dγ/dτ|
    speed: f64,
    solver: SolverConfig,
}

impl ConstantSpeedDynamics {
    pub fn new(curve: ParametricCurve, speed: f64) -> Self {
        Self {
            curve,
            speed,
            solver: SolverConfig::default(),
        }
    }

    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    /// Target physical speed
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// State at `position` moving forward at the target physical speed
    ///
    /// dt/dτ = speed / |γ'(t)|; fails where the curve is stationary.
    pub fn initial_state(&self, position: f64) -> Result<ParticleState> {
        let parametric_speed = self.curve.speed(position);
        if parametric_speed < EPSILON {
            return Err(Error::DegenerateGeometry {
                t: position,
                speed: parametric_speed,
            });
        }
        Ok(ParticleState::new(position, self.speed / parametric_speed))
    }
}

impl CurveDynamics for ConstantSpeedDynamics {
    fn curve(&self) -> &ParametricCurve {
        &self.curve
    }

    fn solver_config(&self) -> &SolverConfig {
        &self.solver
    }

    fn acceleration(&self, _time: f64, position: f64, velocity: f64) -> f64 {
        let d1 = self.curve.nth_derivative(position, 1);
        let d2 = self.curve.nth_derivative(position, 2);

        let norm = d1.length();
        if norm < EPSILON {
            return 0.0;
        }

        -(d1.dot(d2) / (norm * norm)) * velocity * velocity
    }
}
