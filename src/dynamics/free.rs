//! Free particle: d²t/dτ² = 0, uniform motion in parameter space.

use super::traits::CurveDynamics;
use crate::geometry::ParametricCurve;
use crate::integrate::SolverConfig;

/// Particle moving at constant dt/dτ
#[derive(Debug, Clone)]
pub struct FreeParticleDynamics {
    curve: ParametricCurve,
    solver: SolverConfig,
}

impl FreeParticleDynamics {
    pub fn new(curve: ParametricCurve) -> Self {
        Self {
            curve,
            solver: SolverConfig::default(),
        }
    }

    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }
}

impl CurveDynamics for FreeParticleDynamics {
    fn curve(&self) -> &ParametricCurve {
        &self.curve
    }

    fn solver_config(&self) -> &SolverConfig {
        &self.solver
    }

    fn acceleration(&self, _time: f64, _position: f64, _velocity: f64) -> f64 {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::ParticleState;
    use crate::geometry::helix;
    use approx::assert_relative_eq;

    #[test]
    fn test_free_particle_at_rest_stays_put() {
        let dynamics = FreeParticleDynamics::new(helix(1.0, 1.0));
        let traj = dynamics
            .integrate(ParticleState::at_rest(0.7), (0.0, 10.0), 100)
            .unwrap();

        assert!(traj.positions.iter().all(|&p| p == 0.7));
        assert!(traj.velocities.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_free_particle_uniform_motion() {
        let dynamics = FreeParticleDynamics::new(helix(1.0, 1.0));
        let traj = dynamics
            .integrate(ParticleState::new(1.0, 0.5), (0.0, 8.0), 81)
            .unwrap();

        for i in 0..traj.len() {
            assert_relative_eq!(traj.positions[i], 1.0 + 0.5 * traj.times[i], epsilon = 1e-9);
            assert_relative_eq!(traj.velocities[i], 0.5, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_free_particle_on_helix_rises_linearly() {
        let (r, p) = (2.0, 3.0);
        let dynamics = FreeParticleDynamics::new(helix(r, p));
        let (times, points) = dynamics
            .spatial_trajectory(ParticleState::new(0.0, 1.0), (0.0, 6.0), 13)
            .unwrap();

        for i in 0..times.len() {
            assert_relative_eq!(
                points[[i, 2]],
                p * times[i] / (2.0 * std::f64::consts::PI),
                epsilon = 1e-9
            );
        }
    }
}
