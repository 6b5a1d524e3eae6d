//! Multi-Particle System: N Coupled Particles on One Curve
//!
//! The ensemble state is the flat vector
//!
//!   y = [t₁, …, t_N, v₁, …, v_N]
//!
//! and evolves as
//!
//!   dtᵢ/dτ = vᵢ
//!   dvᵢ/dτ = Fᵢ(t, v) + f_ext(τ, tᵢ, vᵢ) - γ_d vᵢ
//!
//! with Fᵢ from an optional `Interaction` law, f_ext an optional
//! per-particle external force and γ_d a shared linear drag.
//!
//! ## Randomness
//!
//! A noisy Vicsek law draws from a random source on every right-hand-side
//! evaluation. Each run owns its own `StdRng`: seeded from `noise_seed`
//! when set, otherwise from the thread RNG. `integrate_with_rng` accepts
//! any caller-supplied source instead.

use std::fmt;
use std::sync::Arc;

use ndarray::{s, Array1, Array2, Array3, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::interaction::Interaction;
use super::observables::{mean_pairwise_distance, order_parameter, velocity_spread};
use crate::error::{Error, Result};
use crate::geometry::ParametricCurve;
use crate::integrate::{solve, OdeSystem, SolverConfig, SolverStats};

/// Per-particle force f(τ, t, v) added on top of the interaction law
pub trait ExternalForce: Send + Sync {
    fn force(&self, time: f64, position: f64, velocity: f64) -> f64;
}

impl<F> ExternalForce for F
where
    F: Fn(f64, f64, f64) -> f64 + Send + Sync,
{
    fn force(&self, time: f64, position: f64, velocity: f64) -> f64 {
        self(time, position, velocity)
    }
}

/// Ensemble of particles sharing a curve
#[derive(Clone)]
pub struct MultiParticleSystem {
    curve: ParametricCurve,
    n_particles: usize,
    interaction: Option<Interaction>,
    /// Shared linear drag γ_d
    damping: f64,
    external_force: Option<Arc<dyn ExternalForce>>,
    solver: SolverConfig,
    /// Seed for the per-run noise stream
    noise_seed: Option<u64>,
}

impl fmt::Debug for MultiParticleSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiParticleSystem")
            .field("curve", &self.curve)
            .field("n_particles", &self.n_particles)
            .field("interaction", &self.interaction)
            .field("damping", &self.damping)
            .field("external_force", &self.external_force.is_some())
            .field("solver", &self.solver)
            .field("noise_seed", &self.noise_seed)
            .finish()
    }
}

impl MultiParticleSystem {
    /// Non-interacting, undamped ensemble of `n_particles`
    pub fn new(curve: ParametricCurve, n_particles: usize) -> Self {
        Self {
            curve,
            n_particles,
            interaction: None,
            damping: 0.0,
            external_force: None,
            solver: SolverConfig::default(),
            noise_seed: None,
        }
    }

    pub fn with_interaction(mut self, interaction: Interaction) -> Self {
        self.interaction = Some(interaction);
        self
    }

    /// Set the shared drag; must be finite and non-negative
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

    pub fn with_external_force<F: ExternalForce + 'static>(mut self, force: F) -> Self {
        self.external_force = Some(Arc::new(force));
        self
    }

    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    /// Make noisy runs reproducible
    pub fn with_noise_seed(mut self, seed: u64) -> Self {
        self.noise_seed = Some(seed);
        self
    }

    pub fn curve(&self) -> &ParametricCurve {
        &self.curve
    }

    pub fn n_particles(&self) -> usize {
        self.n_particles
    }

    pub fn interaction(&self) -> Option<&Interaction> {
        self.interaction.as_ref()
    }

    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// dy/dτ for the flat state [t₁..t_N, v₁..v_N]
    pub fn equations_of_motion<R: Rng + ?Sized>(
        &self,
        time: f64,
        state: &Array1<f64>,
        rng: &mut R,
    ) -> Result<Array1<f64>> {
        let dim = 2 * self.n_particles;
        if state.len() != dim {
            return Err(Error::DimensionMismatch {
                expected: dim,
                found: state.len(),
            });
        }
        if let Some(law) = &self.interaction {
            law.validate(self.n_particles)?;
        }
        let mut rate = Array1::zeros(dim);
        self.fill_rates(time, state, &mut rate, rng);
        Ok(rate)
    }

    fn fill_rates<R: Rng + ?Sized>(
        &self,
        time: f64,
        state: &Array1<f64>,
        rate: &mut Array1<f64>,
        rng: &mut R,
    ) {
        let n = self.n_particles;
        let positions = state.slice(s![..n]).to_owned();
        let velocities = state.slice(s![n..]).to_owned();

        let mut forces = match &self.interaction {
            Some(law) => law.forces_unchecked(&positions, &velocities, rng),
            None => Array1::zeros(n),
        };

        if let Some(external) = &self.external_force {
            for i in 0..n {
                forces[i] += external.force(time, positions[i], velocities[i]);
            }
        }

        forces.scaled_add(-self.damping, &velocities);

        rate.slice_mut(s![..n]).assign(&velocities);
        rate.slice_mut(s![n..]).assign(&forces);
    }

    /// Integrate the ensemble, sampled at `n_points` evenly spaced times
    pub fn integrate(
        &self,
        initial_positions: &Array1<f64>,
        initial_velocities: &Array1<f64>,
        t_span: (f64, f64),
        n_points: usize,
    ) -> Result<EnsembleTrajectory> {
        let mut rng = match self.noise_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        self.integrate_with_rng(initial_positions, initial_velocities, t_span, n_points, &mut rng)
    }

    /// As `integrate`, drawing noise from `rng`
    pub fn integrate_with_rng<R: Rng + ?Sized>(
        &self,
        initial_positions: &Array1<f64>,
        initial_velocities: &Array1<f64>,
        t_span: (f64, f64),
        n_points: usize,
        rng: &mut R,
    ) -> Result<EnsembleTrajectory> {
        let n = self.n_particles;
        if n == 0 {
            return Err(Error::InvalidParameter(
                "particle count must be at least 1".to_string(),
            ));
        }
        for initial in [initial_positions, initial_velocities] {
            if initial.len() != n {
                return Err(Error::DimensionMismatch {
                    expected: n,
                    found: initial.len(),
                });
            }
        }
        if let Some(law) = &self.interaction {
            law.validate(n)?;
        }

        log::debug!(
            "integrating {} particles over [{}, {}], interaction {:?}, damping {}",
            n,
            t_span.0,
            t_span.1,
            self.interaction,
            self.damping
        );

        let y0: Array1<f64> = initial_positions
            .iter()
            .chain(initial_velocities.iter())
            .copied()
            .collect();
        let mut ode = EnsembleOde { system: self, rng };
        let solution = solve(&mut ode, t_span, &y0, n_points, &self.solver)?;

        Ok(EnsembleTrajectory {
            times: solution.times,
            positions: solution.states.slice(s![.., ..n]).to_owned(),
            velocities: solution.states.slice(s![.., n..]).to_owned(),
            stats: solution.stats,
        })
    }

    /// Integrate and map every sampled position through the curve
    ///
    /// Returns (times, points) with points of shape (n_points, N, 3).
    pub fn spatial_trajectories(
        &self,
        initial_positions: &Array1<f64>,
        initial_velocities: &Array1<f64>,
        t_span: (f64, f64),
        n_points: usize,
    ) -> Result<(Array1<f64>, Array3<f64>)> {
        let trajectory = self.integrate(initial_positions, initial_velocities, t_span, n_points)?;
        let points = trajectory.spatial(&self.curve);
        Ok((trajectory.times, points))
    }
}

/// Flat-state view of a `MultiParticleSystem` for one run
struct EnsembleOde<'a, R: ?Sized> {
    system: &'a MultiParticleSystem,
    rng: &'a mut R,
}

impl<R: Rng + ?Sized> OdeSystem for EnsembleOde<'_, R> {
    fn dimension(&self) -> usize {
        2 * self.system.n_particles
    }

    fn derivatives(&mut self, time: f64, state: &Array1<f64>, rate: &mut Array1<f64>) {
        self.system.fill_rates(time, state, rate, &mut *self.rng);
    }
}

/// Ensemble time series on an even time grid
#[derive(Debug, Clone)]
pub struct EnsembleTrajectory {
    /// Sample times τ, length T
    pub times: Array1<f64>,
    /// Parameter positions, shape (T, N)
    pub positions: Array2<f64>,
    /// Parameter velocities, shape (T, N)
    pub velocities: Array2<f64>,
    /// Solver step counters
    pub stats: SolverStats,
}

impl EnsembleTrajectory {
    /// Number of time samples
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn n_particles(&self) -> usize {
        self.positions.ncols()
    }

    /// Points γ(tᵢ(τ)), shape (T, N, 3)
    pub fn spatial(&self, curve: &ParametricCurve) -> Array3<f64> {
        let (n_times, n_particles) = self.positions.dim();
        let mut points = Array3::zeros((n_times, n_particles, 3));
        for ((k, j), &t) in self.positions.indexed_iter() {
            let p = curve.evaluate(t);
            points[[k, j, 0]] = p.x;
            points[[k, j, 1]] = p.y;
            points[[k, j, 2]] = p.z;
        }
        points
    }

    /// Order parameter r(τ), positions read as phases
    pub fn order_parameter_series(&self) -> Array1<f64> {
        self.positions
            .rows()
            .into_iter()
            .map(|row| order_parameter(&row).0)
            .collect()
    }

    /// Mean pairwise distance D(τ), folded onto `period` when given
    pub fn mean_pairwise_distance_series(&self, period: Option<f64>) -> Array1<f64> {
        self.positions
            .rows()
            .into_iter()
            .map(|row| mean_pairwise_distance(&row, period))
            .collect()
    }

    /// Ensemble mean velocity ⟨v⟩(τ)
    pub fn mean_velocity_series(&self) -> Array1<f64> {
        self.velocities
            .mean_axis(Axis(1))
            .unwrap_or_else(|| Array1::zeros(self.len()))
    }

    /// Velocity standard deviation σ_v(τ)
    pub fn velocity_spread_series(&self) -> Array1<f64> {
        self.velocities
            .rows()
            .into_iter()
            .map(|row| velocity_spread(&row))
            .collect()
    }
}
