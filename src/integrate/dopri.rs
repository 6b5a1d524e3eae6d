//! Dormand-Prince 5(4): Adaptive Explicit Runge-Kutta with Dense Output
//!
//! Each step advances with the 5th-order solution and estimates the local
//! error from the embedded 4th-order one:
//!
//!   err = sqrt( mean( (eᵢ / (atol + rtol·max(|yᵢ|, |ŷᵢ|)))² ) )
//!
//! A step is accepted when err ≤ 1, and the next step is scaled by
//! clamp(0.9·err^(-1/5), 0.2, 10). The last stage is evaluated at the new
//! point (FSAL) and reused as the first stage of the next step.
//!
//! ## Dense Output
//!
//! Hairer's continuous extension gives a 4th-order interpolant on every
//! accepted step, so the solution can be sampled on any grid without
//! constraining the adaptive step sequence.
//!
//! ## Reference
//!
//! - Dormand, J. R. & Prince, P. J. (1980). A family of embedded
//!   Runge-Kutta formulae. J. Comput. Appl. Math. 6(1), 19-26.
//! - Hairer, Nørsett & Wanner, "Solving Ordinary Differential Equations I"
//!   (1993), §II.4-II.6.

use ndarray::{Array1, Array2};

use super::config::SolverConfig;
use super::traits::OdeSystem;
use crate::error::{Error, Result};
use crate::grid::linspace;

const C: [f64; 6] = [0.0, 1.0 / 5.0, 3.0 / 10.0, 4.0 / 5.0, 8.0 / 9.0, 1.0];

const A: [[f64; 5]; 6] = [
    [0.0, 0.0, 0.0, 0.0, 0.0],
    [1.0 / 5.0, 0.0, 0.0, 0.0, 0.0],
    [3.0 / 40.0, 9.0 / 40.0, 0.0, 0.0, 0.0],
    [44.0 / 45.0, -56.0 / 15.0, 32.0 / 9.0, 0.0, 0.0],
    [19372.0 / 6561.0, -25360.0 / 2187.0, 64448.0 / 6561.0, -212.0 / 729.0, 0.0],
    [9017.0 / 3168.0, -355.0 / 33.0, 46732.0 / 5247.0, 49.0 / 176.0, -5103.0 / 18656.0],
];

/// 5th-order weights
const B: [f64; 6] = [
    35.0 / 384.0,
    0.0,
    500.0 / 1113.0,
    125.0 / 192.0,
    -2187.0 / 6784.0,
    11.0 / 84.0,
];

/// 5th minus 4th order weights, last entry multiplies the FSAL stage
const E: [f64; 7] = [
    71.0 / 57600.0,
    0.0,
    -71.0 / 16695.0,
    71.0 / 1920.0,
    -17253.0 / 339200.0,
    22.0 / 525.0,
    -1.0 / 40.0,
];

/// Continuous-extension weights
const D: [f64; 7] = [
    -12715105075.0 / 11282082432.0,
    0.0,
    87487479700.0 / 32700410799.0,
    -10690763975.0 / 1880347072.0,
    701980252875.0 / 199316789632.0,
    -1453857185.0 / 822651844.0,
    69997945.0 / 29380423.0,
];

const SAFETY: f64 = 0.9;
const MIN_FACTOR: f64 = 0.2;
const MAX_FACTOR: f64 = 10.0;
const ERROR_EXPONENT: f64 = -1.0 / 5.0;

/// Step counters of one integration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolverStats {
    /// Accepted steps
    pub accepted: usize,
    /// Rejected steps
    pub rejected: usize,
    /// Right-hand-side evaluations
    pub evaluations: usize,
}

impl SolverStats {
    /// Steps attempted (accepted + rejected)
    pub fn steps(&self) -> usize {
        self.accepted + self.rejected
    }
}

/// Solution resampled onto an even time grid
#[derive(Debug, Clone)]
pub struct Solution {
    /// Grid times, both endpoints of the span included
    pub times: Array1<f64>,
    /// States, row i at times[i], shape (n_points, dimension)
    pub states: Array2<f64>,
    /// Step counters
    pub stats: SolverStats,
}

/// 4th-order interpolant over one accepted step
struct DenseStep {
    t_old: f64,
    h: f64,
    coefficients: [Array1<f64>; 5],
}

impl DenseStep {
    fn new(
        t_old: f64,
        h: f64,
        y_old: &Array1<f64>,
        y_new: &Array1<f64>,
        k: &[Array1<f64>; 7],
    ) -> Self {
        let ydiff = y_new - y_old;
        let bspl = &k[0] * h - &ydiff;
        let residual = &ydiff - &(&k[6] * h) - &bspl;
        let mut correction = Array1::<f64>::zeros(y_old.len());
        for (stage, &d) in k.iter().zip(D.iter()) {
            if d != 0.0 {
                correction.scaled_add(h * d, stage);
            }
        }

        Self {
            t_old,
            h,
            coefficients: [y_old.clone(), ydiff, bspl, residual, correction],
        }
    }

    fn at(&self, time: f64) -> Array1<f64> {
        let theta = (time - self.t_old) / self.h;
        let theta1 = 1.0 - theta;
        let [r1, r2, r3, r4, r5] = &self.coefficients;

        // r1 + θ(r2 + θ₁(r3 + θ(r4 + θ₁ r5)))
        let inner = r4 + &(r5 * theta1);
        let inner = r3 + &(inner * theta);
        let inner = r2 + &(inner * theta1);
        r1 + &(inner * theta)
    }
}

fn rms_scaled(values: &Array1<f64>, scale: &Array1<f64>) -> f64 {
    let n = values.len().max(1) as f64;
    let sum: f64 = values
        .iter()
        .zip(scale.iter())
        .map(|(v, s)| (v / s).powi(2))
        .sum();
    (sum / n).sqrt()
}

/// Hairer's starting-step heuristic
fn select_initial_step<S: OdeSystem + ?Sized>(
    system: &mut S,
    t0: f64,
    y0: &Array1<f64>,
    f0: &Array1<f64>,
    direction: f64,
    span: f64,
    config: &SolverConfig,
    stats: &mut SolverStats,
) -> f64 {
    let scale = y0.mapv(|y| config.atol + y.abs() * config.rtol);
    let d0 = rms_scaled(y0, &scale);
    let d1 = rms_scaled(f0, &scale);

    let h0 = if d0 < 1e-5 || d1 < 1e-5 {
        1e-6
    } else {
        0.01 * d0 / d1
    }
    .min(span);

    let y1 = y0 + &(f0 * (h0 * direction));
    let f1 = system.evaluate(t0 + h0 * direction, &y1);
    stats.evaluations += 1;
    let d2 = rms_scaled(&(&f1 - f0), &scale) / h0;

    let h1 = if d1 <= 1e-15 && d2 <= 1e-15 {
        (h0 * 1e-3).max(1e-6)
    } else {
        (0.01 / d1.max(d2)).powf(1.0 / 5.0)
    };

    (100.0 * h0).min(h1).min(span)
}

/// Integrate `system` over `t_span` from `initial`, sampled at `n_points`
/// evenly spaced times including both endpoints
///
/// A zero-length span returns `n_points` copies of `initial` without
/// evaluating the system. Reverse spans integrate backwards in time.
///
/// Fails with `SolverDivergence` when the step budget is exhausted, the
/// step size underflows, or the state stops being finite.
pub fn solve<S: OdeSystem + ?Sized>(
    system: &mut S,
    t_span: (f64, f64),
    initial: &Array1<f64>,
    n_points: usize,
    config: &SolverConfig,
) -> Result<Solution> {
    config.validate()?;

    let (t0, t1) = t_span;
    if !t0.is_finite() || !t1.is_finite() {
        return Err(Error::InvalidParameter(format!(
            "time span must be finite, got ({}, {})",
            t0, t1
        )));
    }
    if n_points == 0 {
        return Err(Error::InvalidParameter(
            "n_points must be at least 1".to_string(),
        ));
    }

    let dim = system.dimension();
    if initial.len() != dim {
        return Err(Error::DimensionMismatch {
            expected: dim,
            found: initial.len(),
        });
    }
    if initial.iter().any(|y| !y.is_finite()) {
        return Err(Error::InvalidParameter(
            "initial state must be finite".to_string(),
        ));
    }

    let times = linspace(t0, t1, n_points);
    let mut states = Array2::zeros((n_points, dim));
    let mut stats = SolverStats::default();

    if t0 == t1 {
        for mut row in states.rows_mut() {
            row.assign(initial);
        }
        return Ok(Solution { times, states, stats });
    }

    let direction = (t1 - t0).signum();
    let span = (t1 - t0).abs();

    let mut t = t0;
    let mut y = initial.clone();
    let mut f = system.evaluate(t, &y);
    stats.evaluations += 1;

    let mut h_abs = match config.first_step {
        Some(h) => h.min(span),
        None => select_initial_step(system, t, &y, &f, direction, span, config, &mut stats),
    };

    states.row_mut(0).assign(&y);
    let mut next = 1;
    let mut rejected_last = false;

    while next < n_points {
        if stats.steps() >= config.max_steps {
            return Err(divergence(t, stats, "step budget exhausted"));
        }

        if let Some(max_step) = config.max_step {
            h_abs = h_abs.min(max_step);
        }
        let min_step = 10.0 * f64::EPSILON * t.abs().max(f64::MIN_POSITIVE);
        if h_abs < min_step {
            return Err(divergence(t, stats, "step size underflow"));
        }

        let mut t_new = t + direction * h_abs;
        if direction * (t_new - t1) > 0.0 {
            t_new = t1;
        }
        let h = t_new - t;

        // Stages 1-6, then the FSAL stage at the new point
        let mut k: [Array1<f64>; 7] = std::array::from_fn(|_| Array1::zeros(dim));
        k[0].assign(&f);
        for s in 1..6 {
            let mut stage = y.clone();
            for j in 0..s {
                if A[s][j] != 0.0 {
                    stage.scaled_add(h * A[s][j], &k[j]);
                }
            }
            k[s] = system.evaluate(t + C[s] * h, &stage);
        }

        let mut y_new = y.clone();
        for (stage, &b) in k.iter().zip(B.iter()) {
            if b != 0.0 {
                y_new.scaled_add(h * b, stage);
            }
        }
        k[6] = system.evaluate(t_new, &y_new);
        stats.evaluations += 6;

        let mut error = Array1::<f64>::zeros(dim);
        for (stage, &e) in k.iter().zip(E.iter()) {
            if e != 0.0 {
                error.scaled_add(h * e, stage);
            }
        }
        let scale = Array1::from_iter(
            y.iter()
                .zip(y_new.iter())
                .map(|(a, b)| config.atol + config.rtol * a.abs().max(b.abs())),
        );
        let error_norm = rms_scaled(&error, &scale);

        let finite = error_norm.is_finite() && k[6].iter().all(|v| v.is_finite());
        if finite && error_norm <= 1.0 {
            let mut factor = if error_norm == 0.0 {
                MAX_FACTOR
            } else {
                (SAFETY * error_norm.powf(ERROR_EXPONENT)).min(MAX_FACTOR)
            };
            if rejected_last {
                factor = factor.min(1.0);
            }

            // Interpolant only for steps that straddle a grid point
            let mut dense: Option<DenseStep> = None;
            while next < n_points && direction * (times[next] - t_new) <= 0.0 {
                if times[next] == t_new {
                    states.row_mut(next).assign(&y_new);
                } else {
                    let step = dense.get_or_insert_with(|| DenseStep::new(t, h, &y, &y_new, &k));
                    states.row_mut(next).assign(&step.at(times[next]));
                }
                next += 1;
            }

            t = t_new;
            y = y_new;
            f = k[6].clone();
            h_abs *= factor;
            stats.accepted += 1;
            rejected_last = false;
        } else {
            let factor = if finite {
                (SAFETY * error_norm.powf(ERROR_EXPONENT)).max(MIN_FACTOR)
            } else {
                MIN_FACTOR
            };
            log::trace!(
                "rejected step at t = {} (h = {:e}, error norm = {:e})",
                t,
                h,
                error_norm
            );
            h_abs *= factor;
            stats.rejected += 1;
            rejected_last = true;
        }
    }

    log::debug!(
        "dopri5 over [{}, {}]: {} accepted, {} rejected, {} evaluations",
        t0,
        t1,
        stats.accepted,
        stats.rejected,
        stats.evaluations
    );

    Ok(Solution { times, states, stats })
}

fn divergence(time: f64, stats: SolverStats, reason: &str) -> Error {
    log::warn!(
        "solver diverged at t = {} after {} steps: {}",
        time,
        stats.steps(),
        reason
    );
    Error::SolverDivergence {
        time,
        steps: stats.steps(),
        reason: reason.to_string(),
    }
}
