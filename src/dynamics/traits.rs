//! Single-Particle Dynamics Trait: Motion Constrained to a Curve
//!
//! A particle on γ is described by its parameter t(τ) as a function of
//! simulation time τ. Every law supplies the acceleration d²t/dτ², and the
//! second-order equation is integrated as the first-order pair
//!
//!   dt/dτ = v
//!   dv/dτ = a(τ, t, v)
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    CurveDynamics Trait                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  + acceleration()        - law-specific d²t/dτ²             │
//! │  + equations_of_motion() - (dt/dτ, d²t/dτ²)                 │
//! │  + integrate()           - adaptive solve, even time grid   │
//! │  + spatial_trajectory()  - parameter series mapped to R³    │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use ndarray::{Array1, Array2};

use crate::error::Result;
use crate::geometry::ParametricCurve;
use crate::integrate::{solve, OdeSystem, SolverConfig, SolverStats};

/// Position and velocity of one particle in parameter space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleState {
    /// Curve parameter t
    pub position: f64,
    /// dt/dτ
    pub velocity: f64,
}

impl ParticleState {
    pub fn new(position: f64, velocity: f64) -> Self {
        Self { position, velocity }
    }

    /// Particle at rest at `position`
    pub fn at_rest(position: f64) -> Self {
        Self::new(position, 0.0)
    }
}

/// Time series of one particle on an even time grid
#[derive(Debug, Clone)]
pub struct Trajectory {
    /// Sample times τᵢ
    pub times: Array1<f64>,
    /// t(τᵢ)
    pub positions: Array1<f64>,
    /// dt/dτ(τᵢ)
    pub velocities: Array1<f64>,
    /// Solver step counters
    pub stats: SolverStats,
}

impl Trajectory {
    /// Number of samples
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// State at sample `i`
    pub fn state(&self, i: usize) -> ParticleState {
        ParticleState::new(self.positions[i], self.velocities[i])
    }

    /// State at the last sample
    pub fn final_state(&self) -> Option<ParticleState> {
        self.len().checked_sub(1).map(|i| self.state(i))
    }

    /// Points γ(t(τᵢ)), shape (n, 3)
    pub fn spatial(&self, curve: &ParametricCurve) -> Array2<f64> {
        curve.evaluate_many(&self.positions.to_vec())
    }

    /// Physical speed |γ'(t)|·|dt/dτ| at each sample
    pub fn physical_speeds(&self, curve: &ParametricCurve) -> Array1<f64> {
        Array1::from_iter(
            self.positions
                .iter()
                .zip(self.velocities.iter())
                .map(|(&t, &v)| curve.speed(t) * v.abs()),
        )
    }
}

/// Law of motion for a single particle on a curve
pub trait CurveDynamics {
    /// Curve the particle is constrained to
    fn curve(&self) -> &ParametricCurve;

    /// Solver tolerances and step budget
    fn solver_config(&self) -> &SolverConfig;

    /// Acceleration d²t/dτ² at simulation time `time`
    fn acceleration(&self, time: f64, position: f64, velocity: f64) -> f64;

    /// (dt/dτ, d²t/dτ²)
    fn equations_of_motion(&self, time: f64, position: f64, velocity: f64) -> (f64, f64) {
        (velocity, self.acceleration(time, position, velocity))
    }

    /// Integrate from `initial` over `t_span`, sampled at `n_points`
    /// evenly spaced times (both endpoints included)
    fn integrate(
        &self,
        initial: ParticleState,
        t_span: (f64, f64),
        n_points: usize,
    ) -> Result<Trajectory> {
        let y0 = Array1::from_vec(vec![initial.position, initial.velocity]);
        let mut ode = SingleParticleOde { dynamics: self };
        let solution = solve(&mut ode, t_span, &y0, n_points, self.solver_config())?;

        Ok(Trajectory {
            times: solution.times,
            positions: solution.states.column(0).to_owned(),
            velocities: solution.states.column(1).to_owned(),
            stats: solution.stats,
        })
    }

    /// Integrate and map each sampled position through the curve
    ///
    /// Returns (times, points) with points of shape (n_points, 3).
    fn spatial_trajectory(
        &self,
        initial: ParticleState,
        t_span: (f64, f64),
        n_points: usize,
    ) -> Result<(Array1<f64>, Array2<f64>)> {
        let trajectory = self.integrate(initial, t_span, n_points)?;
        let points = trajectory.spatial(self.curve());
        Ok((trajectory.times, points))
    }
}

/// State vector [t, v] view of a `CurveDynamics` law
struct SingleParticleOde<'a, D: CurveDynamics + ?Sized> {
    dynamics: &'a D,
}

impl<D: CurveDynamics + ?Sized> OdeSystem for SingleParticleOde<'_, D> {
    fn dimension(&self) -> usize {
        2
    }

    fn derivatives(&mut self, time: f64, state: &Array1<f64>, rate: &mut Array1<f64>) {
        let (dposition, dvelocity) = self.dynamics.equations_of_motion(time, state[0], state[1]);
        rate[0] = dposition;
        rate[1] = dvelocity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::planar_circle;

    /// d²t/dτ² = -t, a harmonic oscillator in parameter space
    struct Spring {
        curve: ParametricCurve,
        solver: SolverConfig,
    }

    impl CurveDynamics for Spring {
        fn curve(&self) -> &ParametricCurve {
            &self.curve
        }

        fn solver_config(&self) -> &SolverConfig {
            &self.solver
        }

        fn acceleration(&self, _time: f64, position: f64, _velocity: f64) -> f64 {
            -position
        }
    }

    fn spring() -> Spring {
        Spring {
            curve: planar_circle(1.0),
            solver: SolverConfig::precise(),
        }
    }

    #[test]
    fn test_custom_law_through_trait() {
        let traj = spring()
            .integrate(ParticleState::new(1.0, 0.0), (0.0, 3.0), 31)
            .unwrap();

        assert_eq!(traj.len(), 31);
        for i in 0..traj.len() {
            let tau = traj.times[i];
            assert!((traj.positions[i] - tau.cos()).abs() < 1e-7);
            assert!((traj.velocities[i] + tau.sin()).abs() < 1e-7);
        }
    }

    #[test]
    fn test_equations_of_motion_default() {
        let (dp, dv) = spring().equations_of_motion(0.0, 2.0, 0.5);
        assert_eq!(dp, 0.5);
        assert_eq!(dv, -2.0);
    }

    #[test]
    fn test_trait_object_integration() {
        let dynamics: Box<dyn CurveDynamics> = Box::new(spring());
        let traj = dynamics
            .integrate(ParticleState::at_rest(0.0), (0.0, 1.0), 5)
            .unwrap();
        assert!(traj.positions.iter().all(|&p| p == 0.0));
    }

    #[test]
    fn test_spatial_trajectory_shape() {
        let (times, points) = spring()
            .spatial_trajectory(ParticleState::new(0.0, 1.0), (0.0, 2.0), 11)
            .unwrap();
        assert_eq!(times.len(), 11);
        assert_eq!(points.dim(), (11, 3));

        // Unit circle: every point at radius 1 in the xy-plane
        for row in points.rows() {
            assert!(((row[0] * row[0] + row[1] * row[1]).sqrt() - 1.0).abs() < 1e-12);
            assert_eq!(row[2], 0.0);
        }
    }

    #[test]
    fn test_final_state_and_speeds() {
        let traj = spring()
            .integrate(ParticleState::new(0.0, 2.0), (0.0, 1.0), 3)
            .unwrap();
        let last = traj.final_state().unwrap();
        assert_eq!(last, traj.state(2));

        // Unit circle has |γ'| = 1, physical speed equals |v|
        let speeds = traj.physical_speeds(&planar_circle(1.0));
        for i in 0..3 {
            assert!((speeds[i] - traj.velocities[i].abs()).abs() < 1e-12);
        }
    }
}
