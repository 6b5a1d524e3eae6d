//! Interaction Laws: Pairwise Collective Forces in Parameter Space
//!
//! Each law maps N positions θ and N velocities v to N forces Fᵢ.
//! Sums run over every ordered pair i ≠ j:
//!
//! - **Kuramoto**:   Fᵢ = ωᵢ + (K/N) Σⱼ sin(θⱼ - θᵢ)
//! - **Attractive**: Fᵢ = K Σ_{|Δ|<R} sgn(Δ)|Δ|,   Δ = θⱼ - θᵢ
//! - **Repulsive**:  Fᵢ = -K Σⱼ sgn(Δ) / max(|Δ|, c)²
//! - **Vicsek**:     Fᵢ = K (⟨v⟩ - vᵢ) + η ξᵢ,   ξᵢ ~ N(0, 1)
//!
//! sgn(0) = 0, so coincident particles exert no force on each other.
//!
//! Only the Vicsek law with η > 0 consumes randomness; the others ignore
//! the random source they are handed.

use ndarray::Array1;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::error::{Error, Result};

/// Cutoff below which repulsion stops growing
pub const DEFAULT_REPULSION_CUTOFF: f64 = 1.0;

/// Closed set of pairwise interaction laws
#[derive(Debug, Clone, PartialEq)]
pub enum Interaction {
    /// Phase synchronization with optional natural frequencies ω
    Kuramoto {
        coupling: f64,
        natural_frequencies: Option<Array1<f64>>,
    },
    /// Linear attraction, pairs farther apart than `range` ignored
    Attractive { coupling: f64, range: f64 },
    /// Softened inverse-square repulsion
    Repulsive { coupling: f64, cutoff: f64 },
    /// Velocity alignment toward the ensemble mean plus Gaussian noise
    Vicsek { coupling: f64, noise: f64 },
}

impl Interaction {
    /// Kuramoto coupling K with all natural frequencies zero
    pub fn kuramoto(coupling: f64) -> Self {
        Interaction::Kuramoto {
            coupling,
            natural_frequencies: None,
        }
    }

    /// Attraction of unbounded range
    pub fn attractive(coupling: f64) -> Self {
        Interaction::Attractive {
            coupling,
            range: f64::INFINITY,
        }
    }

    pub fn repulsive(coupling: f64) -> Self {
        Interaction::Repulsive {
            coupling,
            cutoff: DEFAULT_REPULSION_CUTOFF,
        }
    }

    /// Noise-free alignment
    pub fn vicsek(coupling: f64) -> Self {
        Interaction::Vicsek {
            coupling,
            noise: 0.0,
        }
    }

    /// Set ωᵢ on a Kuramoto law; ignored by the other laws
    pub fn with_natural_frequencies(self, frequencies: Array1<f64>) -> Self {
        match self {
            Interaction::Kuramoto { coupling, .. } => Interaction::Kuramoto {
                coupling,
                natural_frequencies: Some(frequencies),
            },
            other => other,
        }
    }

    /// Set the range of an attractive law; ignored by the other laws
    pub fn with_range(self, range: f64) -> Self {
        match self {
            Interaction::Attractive { coupling, .. } => Interaction::Attractive { coupling, range },
            other => other,
        }
    }

    /// Set the softening distance of a repulsive law; ignored by the other laws
    pub fn with_cutoff(self, cutoff: f64) -> Self {
        match self {
            Interaction::Repulsive { coupling, .. } => Interaction::Repulsive { coupling, cutoff },
            other => other,
        }
    }

    /// Set the noise amplitude of a Vicsek law; ignored by the other laws
    pub fn with_noise(self, noise: f64) -> Self {
        match self {
            Interaction::Vicsek { coupling, .. } => Interaction::Vicsek { coupling, noise },
            other => other,
        }
    }

    /// Coupling constant K
    pub fn coupling(&self) -> f64 {
        match *self {
            Interaction::Kuramoto { coupling, .. }
            | Interaction::Attractive { coupling, .. }
            | Interaction::Repulsive { coupling, .. }
            | Interaction::Vicsek { coupling, .. } => coupling,
        }
    }

    /// Whether `forces` draws from its random source
    pub fn is_stochastic(&self) -> bool {
        matches!(self, Interaction::Vicsek { noise, .. } if *noise > 0.0)
    }

    /// Check the law against a particle count
    ///
    /// Natural frequencies must have one entry per particle, the repulsive
    /// cutoff must be positive and the noise amplitude non-negative.
    pub fn validate(&self, n_particles: usize) -> Result<()> {
        match self {
            Interaction::Kuramoto {
                natural_frequencies: Some(omega),
                ..
            } if omega.len() != n_particles => Err(Error::DimensionMismatch {
                expected: n_particles,
                found: omega.len(),
            }),
            Interaction::Repulsive { cutoff, .. } if !(*cutoff > 0.0) => {
                Err(Error::InvalidParameter(format!(
                    "repulsion cutoff must be positive, got {}",
                    cutoff
                )))
            }
            Interaction::Vicsek { noise, .. } if !(*noise >= 0.0) => Err(Error::InvalidParameter(
                format!("noise amplitude must be non-negative, got {}", noise),
            )),
            _ => Ok(()),
        }
    }

    /// Force on every particle
    ///
    /// `positions` and `velocities` hold one entry per particle; the law is
    /// checked against that count with `validate` first.
    pub fn forces<R: Rng + ?Sized>(
        &self,
        positions: &Array1<f64>,
        velocities: &Array1<f64>,
        rng: &mut R,
    ) -> Result<Array1<f64>> {
        if velocities.len() != positions.len() {
            return Err(Error::DimensionMismatch {
                expected: positions.len(),
                found: velocities.len(),
            });
        }
        self.validate(positions.len())?;
        Ok(self.forces_unchecked(positions, velocities, rng))
    }

    /// `forces` for a law already validated against `positions.len()`
    pub(crate) fn forces_unchecked<R: Rng + ?Sized>(
        &self,
        positions: &Array1<f64>,
        velocities: &Array1<f64>,
        rng: &mut R,
    ) -> Array1<f64> {
        let n = positions.len();
        let mut forces = Array1::zeros(n);
        if n == 0 {
            return forces;
        }

        match self {
            Interaction::Kuramoto {
                coupling,
                natural_frequencies,
            } => {
                let scale = coupling / n as f64;
                for i in 0..n {
                    let omega = natural_frequencies.as_ref().map_or(0.0, |w| w[i]);
                    let pull: f64 = (0..n)
                        .filter(|&j| j != i)
                        .map(|j| (positions[j] - positions[i]).sin())
                        .sum();
                    forces[i] = omega + scale * pull;
                }
            }
            Interaction::Attractive { coupling, range } => {
                for i in 0..n {
                    for j in (0..n).filter(|&j| j != i) {
                        let diff = positions[j] - positions[i];
                        let distance = diff.abs();
                        if distance < *range {
                            forces[i] += coupling * sign(diff) * distance;
                        }
                    }
                }
            }
            Interaction::Repulsive { coupling, cutoff } => {
                for i in 0..n {
                    for j in (0..n).filter(|&j| j != i) {
                        let diff = positions[j] - positions[i];
                        let distance = diff.abs().max(*cutoff);
                        forces[i] -= coupling * sign(diff) / (distance * distance);
                    }
                }
            }
            Interaction::Vicsek { coupling, noise } => {
                let mean_velocity = velocities.mean().unwrap_or(0.0);
                for i in 0..n {
                    forces[i] = coupling * (mean_velocity - velocities[i]);
                    if *noise > 0.0 {
                        let xi: f64 = StandardNormal.sample(&mut *rng);
                        forces[i] += noise * xi;
                    }
                }
            }
        }

        forces
    }
}

/// Sign with sgn(0) = 0
fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}
