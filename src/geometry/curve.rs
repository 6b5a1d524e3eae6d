//! Parametric Curves: Differential Geometry in R³
//!
//! A curve is a map γ: ℝ → ℝ³. From its first three derivatives we get
//! the Frenet-Serret invariants:
//!
//!   T = γ' / |γ'|
//!   κ = |γ' × γ''| / |γ'|³
//!   τ = (γ' × γ'') · γ''' / |γ' × γ''|²
//!   N = T' / |T'|,   B = T × N
//!
//! ## Numerical Differentiation
//!
//! Derivatives not supplied analytically are central differences with a
//! fixed step h owned by the curve instance:
//!
//!   γ⁽ᵏ⁾(t) ≈ (γ⁽ᵏ⁻¹⁾(t + h) - γ⁽ᵏ⁻¹⁾(t - h)) / 2h
//!
//! applied recursively. Each level multiplies round-off by roughly 1/h,
//! so with the default h = 1e-5 a numerical third derivative carries an
//! absolute error of order ε_mach·|γ|/h³ ≈ 0.1. Torsion of a purely
//! numerical curve should use a coarser step (h ≈ 1e-3) or analytic
//! derivatives, as the catalog curves supply.

use std::fmt;
use std::sync::Arc;

use glam::DVec3;
use ndarray::Array2;

use super::frenet::FrenetFrame;
use crate::error::{Error, Result};
use crate::grid::linspace;

/// Threshold below which speeds, norms and denominators count as zero
pub const EPSILON: f64 = 1e-10;

/// Default finite-difference step
pub const DEFAULT_STEP: f64 = 1e-5;

/// Axis-choice threshold for the straight-line normal fallback
const AXIS_CHOICE_THRESHOLD: f64 = 0.9;

/// Highest derivative order the curve can produce
const MAX_ORDER: usize = 3;

/// Shared vector-valued function of the curve parameter
pub type CurveFn = Arc<dyn Fn(f64) -> DVec3 + Send + Sync>;

/// Parametric curve γ(t) with optional analytic derivatives
///
/// Immutable once built; cloning shares the underlying functions.
#[derive(Clone)]
pub struct ParametricCurve {
    /// Point map γ(t)
    gamma: CurveFn,
    /// Analytic γ', γ'', γ''' (None → finite differences)
    derivatives: [Option<CurveFn>; MAX_ORDER],
    /// Finite-difference step h
    step: f64,
}

impl fmt::Debug for ParametricCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParametricCurve")
            .field("analytic_orders", &self.analytic_orders())
            .field("step", &self.step)
            .finish()
    }
}

impl ParametricCurve {
    /// Create a curve from its point map; all derivatives numerical
    pub fn new<F>(gamma: F) -> Self
    where
        F: Fn(f64) -> DVec3 + Send + Sync + 'static,
    {
        Self {
            gamma: Arc::new(gamma),
            derivatives: [None, None, None],
            step: DEFAULT_STEP,
        }
    }

    /// Supply analytic γ'
    pub fn with_first_derivative<F>(mut self, d1: F) -> Self
    where
        F: Fn(f64) -> DVec3 + Send + Sync + 'static,
    {
        self.derivatives[0] = Some(Arc::new(d1));
        self
    }

    /// Supply analytic γ''
    pub fn with_second_derivative<F>(mut self, d2: F) -> Self
    where
        F: Fn(f64) -> DVec3 + Send + Sync + 'static,
    {
        self.derivatives[1] = Some(Arc::new(d2));
        self
    }

    /// Supply analytic γ'''
    pub fn with_third_derivative<F>(mut self, d3: F) -> Self
    where
        F: Fn(f64) -> DVec3 + Send + Sync + 'static,
    {
        self.derivatives[2] = Some(Arc::new(d3));
        self
    }

    /// Set the finite-difference step h
    ///
    /// Fails unless h is finite and strictly positive.
    pub fn with_step(mut self, step: f64) -> Result<Self> {
        if !step.is_finite() || step <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "finite-difference step must be positive and finite, got {}",
                step
            )));
        }
        self.step = step;
        Ok(self)
    }

    /// Finite-difference step h
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Derivative orders backed by analytic functions
    pub fn analytic_orders(&self) -> Vec<usize> {
        (1..=MAX_ORDER)
            .filter(|&k| self.derivatives[k - 1].is_some())
            .collect()
    }

    /// Point γ(t)
    pub fn evaluate(&self, t: f64) -> DVec3 {
        (self.gamma)(t)
    }

    /// Points γ(tᵢ) as an (n, 3) array, row i = γ(t_values[i])
    pub fn evaluate_many(&self, t_values: &[f64]) -> Array2<f64> {
        let mut points = Array2::zeros((t_values.len(), 3));

        for (i, &t) in t_values.iter().enumerate() {
            let p = self.evaluate(t);
            points[[i, 0]] = p.x;
            points[[i, 1]] = p.y;
            points[[i, 2]] = p.z;
        }

        points
    }

    /// Derivative γ⁽ᵒʳᵈᵉʳ⁾(t) for order ∈ {1, 2, 3}
    pub fn derivative(&self, t: f64, order: usize) -> Result<DVec3> {
        if !(1..=MAX_ORDER).contains(&order) {
            return Err(Error::UnsupportedOrder { order });
        }
        Ok(self.nth_derivative(t, order))
    }

    /// Order already validated; recurses through lower orders
    pub(crate) fn nth_derivative(&self, t: f64, order: usize) -> DVec3 {
        if let Some(analytic) = &self.derivatives[order - 1] {
            return analytic(t);
        }

        let h = self.step;
        let (forward, backward) = if order == 1 {
            (self.evaluate(t + h), self.evaluate(t - h))
        } else {
            (
                self.nth_derivative(t + h, order - 1),
                self.nth_derivative(t - h, order - 1),
            )
        };

        (forward - backward) / (2.0 * h)
    }

    /// Speed |γ'(t)|
    pub fn speed(&self, t: f64) -> f64 {
        self.nth_derivative(t, 1).length()
    }

    /// Unit tangent T(t)
    pub fn tangent(&self, t: f64) -> Result<DVec3> {
        unit_tangent(t, self.nth_derivative(t, 1))
    }

    /// Curvature κ(t) ≥ 0; zero where |γ'|³ < ε
    pub fn curvature(&self, t: f64) -> f64 {
        curvature_from(self.nth_derivative(t, 1), self.nth_derivative(t, 2))
    }

    /// Unit normal N(t) = T'/|T'|
    ///
    /// T' is the central difference of the tangent field at t ± h. On a
    /// locally straight stretch (|T'| < ε) the normal is the Gram-Schmidt
    /// projection of eₓ, or of e_y when |Tₓ| ≥ 0.9.
    pub fn normal(&self, t: f64) -> Result<DVec3> {
        let tangent = self.tangent(t)?;
        self.normal_given_tangent(t, tangent)
    }

    fn normal_given_tangent(&self, t: f64, tangent: DVec3) -> Result<DVec3> {
        let h = self.step;
        let t_prime = (self.tangent(t + h)? - self.tangent(t - h)?) / (2.0 * h);
        let norm = t_prime.length();

        if norm < EPSILON {
            log::trace!("normal at t = {} falls back to a coordinate axis", t);
            return Ok(axis_fallback_normal(tangent));
        }

        Ok(t_prime / norm)
    }

    /// Unit binormal B(t) = T × N
    pub fn binormal(&self, t: f64) -> Result<DVec3> {
        let tangent = self.tangent(t)?;
        let normal = self.normal_given_tangent(t, tangent)?;
        Ok(tangent.cross(normal))
    }

    /// Torsion τ(t); zero where |γ' × γ''|² < ε
    pub fn torsion(&self, t: f64) -> f64 {
        torsion_from(
            self.nth_derivative(t, 1),
            self.nth_derivative(t, 2),
            self.nth_derivative(t, 3),
        )
    }

    /// Full Frenet-Serret frame at t
    ///
    /// γ', γ'', γ''' are evaluated once and shared by all five quantities.
    pub fn frenet_frame(&self, t: f64) -> Result<FrenetFrame> {
        let d1 = self.nth_derivative(t, 1);
        let d2 = self.nth_derivative(t, 2);
        let d3 = self.nth_derivative(t, 3);

        let tangent = unit_tangent(t, d1)?;
        let normal = self.normal_given_tangent(t, tangent)?;

        Ok(FrenetFrame {
            tangent,
            normal,
            binormal: tangent.cross(normal),
            curvature: curvature_from(d1, d2),
            torsion: torsion_from(d1, d2, d3),
        })
    }

    /// Arc length ∫ |γ'(t)| dt over [t0, t1]
    ///
    /// Trapezoidal rule on `n_samples` evenly spaced points; zero when
    /// fewer than two samples are requested or t0 == t1. Signed: swapping
    /// the endpoints negates the result.
    pub fn arc_length(&self, t0: f64, t1: f64, n_samples: usize) -> f64 {
        if n_samples < 2 || t0 == t1 {
            return 0.0;
        }

        let grid = linspace(t0, t1, n_samples).to_vec();
        let speeds: Vec<f64> = grid.iter().map(|&t| self.speed(t)).collect();

        grid.windows(2)
            .zip(speeds.windows(2))
            .map(|(t, s)| 0.5 * (t[1] - t[0]) * (s[0] + s[1]))
            .sum()
    }
}

fn unit_tangent(t: f64, d1: DVec3) -> Result<DVec3> {
    let speed = d1.length();
    if speed < EPSILON {
        return Err(Error::DegenerateGeometry { t, speed });
    }
    Ok(d1 / speed)
}

fn curvature_from(d1: DVec3, d2: DVec3) -> f64 {
    let denominator = d1.length().powi(3);
    if denominator < EPSILON {
        return 0.0;
    }
    d1.cross(d2).length() / denominator
}

fn torsion_from(d1: DVec3, d2: DVec3, d3: DVec3) -> f64 {
    let cross = d1.cross(d2);
    let denominator = cross.length_squared();
    if denominator < EPSILON {
        return 0.0;
    }
    cross.dot(d3) / denominator
}

/// Unit vector orthogonal to `tangent` from the {eₓ, e_y} candidate axes
pub(crate) fn axis_fallback_normal(tangent: DVec3) -> DVec3 {
    let axis = if tangent.x.abs() < AXIS_CHOICE_THRESHOLD {
        DVec3::X
    } else {
        DVec3::Y
    };
    let orthogonal = axis - axis.dot(tangent) * tangent;
    orthogonal / orthogonal.length()
}
