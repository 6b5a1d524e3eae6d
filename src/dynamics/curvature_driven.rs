//! Curvature-Driven Dynamics: Forcing by Local Shape
//!
//!   d²t/dτ² = f(κ(t)) - γ_d · dt/dτ
//!
//! where f is a caller-supplied force law and γ_d ≥ 0 a linear drag.
//! With f(κ) = c·κ - b a particle accelerates through tight bends and
//! coasts to rest on flat stretches.

use std::fmt;

use super::traits::CurveDynamics;
use crate::error::{Error, Result};
use crate::geometry::ParametricCurve;
use crate::integrate::SolverConfig;

/// Particle driven by a scalar force of the local curvature
#[derive(Clone)]
pub struct CurvatureDrivenDynamics<F>
where
    F: Fn(f64) -> f64,
{
    curve: ParametricCurve,
    /// Force law f(κ)
    force: F,
    /// Linear drag coefficient
    damping: f64,
    solver: SolverConfig,
}

impl<F: Fn(f64) -> f64> fmt::Debug for CurvatureDrivenDynamics<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CurvatureDrivenDynamics")
            .field("curve", &self.curve)
            .field("damping", &self.damping)
            .field("solver", &self.solver)
            .finish()
    }
}

impl<F: Fn(f64) -> f64> CurvatureDrivenDynamics<F> {
    /// Undamped dynamics with force law `force`
    pub fn new(curve: ParametricCurve, force: F) -> Self {
        Self {
            curve,
            force,
            damping: 0.0,
            solver: SolverConfig::default(),
        }
    }

    /// Set the drag coefficient; must be finite and non-negative
    pub fn with_damping(mut self, damping: f64) -> Result<Self> {
        if !(damping >= 0.0 && damping.is_finite()) {
            return Err(Error::InvalidParameter(format!(
                "damping must be finite and non-negative, got {}",
                damping
            )));
        }
        self.damping = damping;
        Ok(self)
    }

    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// Force f(κ(t)) before drag
    pub fn force_at(&self, position: f64) -> f64 {
        (self.force)(self.curve.curvature(position))
    }
}

impl<F: Fn(f64) -> f64> CurveDynamics for CurvatureDrivenDynamics<F> {
    fn curve(&self) -> &ParametricCurve {
        &self.curve
    }

    fn solver_config(&self) -> &SolverConfig {
        &self.solver
    }

    fn acceleration(&self, _time: f64, position: f64, velocity: f64) -> f64 {
        self.force_at(position) - self.damping * velocity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::ParticleState;
    use crate::geometry::{helix, planar_circle, viviani_curve};
    use approx::assert_relative_eq;

    #[test]
    fn test_negative_damping_rejected() {
        let result = CurvatureDrivenDynamics::new(planar_circle(1.0), |k| k).with_damping(-0.1);
        assert!(matches!(result, Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn test_constant_curvature_gives_constant_force() {
        // Circle of radius 2: κ = 1/2, so a = 2κ = 1 with no drag
        let dynamics = CurvatureDrivenDynamics::new(planar_circle(2.0), |k| 2.0 * k)
            .with_solver(SolverConfig::precise());
        let traj = dynamics
            .integrate(ParticleState::at_rest(0.0), (0.0, 4.0), 41)
            .unwrap();

        for i in 0..traj.len() {
            let tau = traj.times[i];
            assert_relative_eq!(traj.positions[i], 0.5 * tau * tau, epsilon = 1e-7);
            assert_relative_eq!(traj.velocities[i], tau, epsilon = 1e-7);
        }
    }

    #[test]
    fn test_damping_drives_terminal_velocity() {
        // a = κ - γ v on a helix: v → κ/γ
        let curve = helix(1.0, 1.0);
        let kappa = curve.curvature(0.0);
        let dynamics = CurvatureDrivenDynamics::new(curve, |k| k)
            .with_damping(0.5)
            .unwrap()
            .with_solver(SolverConfig::precise());

        let traj = dynamics
            .integrate(ParticleState::at_rest(0.0), (0.0, 40.0), 101)
            .unwrap();
        let last = traj.final_state().unwrap();
        assert_relative_eq!(last.velocity, kappa / 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_pure_drag_decays_velocity() {
        let dynamics = CurvatureDrivenDynamics::new(viviani_curve(1.0), |_| 0.0)
            .with_damping(1.0)
            .unwrap()
            .with_solver(SolverConfig::precise());

        let traj = dynamics
            .integrate(ParticleState::new(0.0, 2.0), (0.0, 3.0), 31)
            .unwrap();
        for i in 0..traj.len() {
            let tau = traj.times[i];
            assert_relative_eq!(traj.velocities[i], 2.0 * (-tau).exp(), epsilon = 1e-7);
            assert_relative_eq!(traj.positions[i], 2.0 * (1.0 - (-tau).exp()), epsilon = 1e-7);
        }
    }

    #[test]
    fn test_force_at_uses_curvature() {
        let dynamics = CurvatureDrivenDynamics::new(planar_circle(4.0), |k| 10.0 * k - 1.0);
        assert_relative_eq!(dynamics.force_at(1.3), 1.5, epsilon = 1e-12);
        assert_eq!(dynamics.damping(), 0.0);
    }
}
