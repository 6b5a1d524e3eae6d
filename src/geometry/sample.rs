//! Curve Sampling: Points and Invariant Profiles on a Parameter Grid
//!
//! Renderers draw a curve from its points on an even parameter grid and
//! annotate it with κ(t) and τ(t) sampled on the same grid.

use ndarray::{Array1, Array2};

use super::curve::ParametricCurve;
use crate::grid::linspace;

/// Points of a curve on an even parameter grid
#[derive(Debug, Clone)]
pub struct CurveSamples {
    /// Parameter values tᵢ
    pub parameters: Array1<f64>,
    /// Points γ(tᵢ), shape (n, 3)
    pub points: Array2<f64>,
}

/// Curvature and torsion on an even parameter grid
#[derive(Debug, Clone)]
pub struct CurvatureProfile {
    /// Parameter values tᵢ
    pub parameters: Array1<f64>,
    /// κ(tᵢ)
    pub curvature: Array1<f64>,
    /// τ(tᵢ)
    pub torsion: Array1<f64>,
}

impl CurvatureProfile {
    /// Largest curvature on the grid (0 for an empty profile)
    pub fn max_curvature(&self) -> f64 {
        self.curvature.iter().cloned().fold(0.0, f64::max)
    }

    /// Mean torsion on the grid (0 for an empty profile)
    pub fn mean_torsion(&self) -> f64 {
        self.torsion.mean().unwrap_or(0.0)
    }
}

impl ParametricCurve {
    /// Sample `n` points evenly over [t0, t1]
    pub fn sample(&self, t0: f64, t1: f64, n: usize) -> CurveSamples {
        let parameters = linspace(t0, t1, n);
        let points = self.evaluate_many(&parameters.to_vec());

        CurveSamples { parameters, points }
    }

    /// Sample κ and τ at `n` evenly spaced parameters over [t0, t1]
    pub fn curvature_profile(&self, t0: f64, t1: f64, n: usize) -> CurvatureProfile {
        let parameters = linspace(t0, t1, n);
        let curvature = parameters.mapv(|t| self.curvature(t));
        let torsion = parameters.mapv(|t| self.torsion(t));

        CurvatureProfile {
            parameters,
            curvature,
            torsion,
        }
    }
}
