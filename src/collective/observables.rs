//! Collective Observables: Synchrony, Spread and Alignment
//!
//! Snapshot measures of an ensemble at one instant:
//!
//!   r·e^(iψ) = (1/N) Σⱼ e^(iθⱼ)                   (order parameter)
//!   D = (2 / N(N-1)) Σ_{i<j} d(θᵢ, θⱼ)             (mean pairwise distance)
//!   σ_v = sqrt((1/N) Σᵢ (vᵢ - ⟨v⟩)²)               (velocity spread)
//!
//! With a period P the pair distance folds onto the circle:
//! d = min(|Δ| mod P, P - |Δ| mod P).

use ndarray::{ArrayBase, Data, Ix1};

/// Kuramoto order parameter (r, ψ)
///
/// r = 1 for perfect synchrony, r ≈ 0 for incoherent phases.
/// An empty ensemble yields (0, 0).
pub fn order_parameter<S>(phases: &ArrayBase<S, Ix1>) -> (f64, f64)
where
    S: Data<Elem = f64>,
{
    if phases.is_empty() {
        return (0.0, 0.0);
    }
    let n = phases.len() as f64;

    let sum_cos: f64 = phases.iter().map(|&theta| theta.cos()).sum();
    let sum_sin: f64 = phases.iter().map(|&theta| theta.sin()).sum();

    let r = ((sum_cos / n).powi(2) + (sum_sin / n).powi(2)).sqrt();
    let psi = (sum_sin / n).atan2(sum_cos / n);

    (r, psi)
}

/// Mean distance over unordered pairs; 0 with fewer than two particles
///
/// With `Some(p)` distances are folded onto a circle of period p. A period
/// that is not strictly positive is ignored and distances stay unfolded.
pub fn mean_pairwise_distance<S>(positions: &ArrayBase<S, Ix1>, period: Option<f64>) -> f64
where
    S: Data<Elem = f64>,
{
    let n = positions.len();
    if n < 2 {
        return 0.0;
    }
    let period = period.filter(|&p| p > 0.0);

    let mut total = 0.0;
    for i in 0..n {
        for j in i + 1..n {
            let d = (positions[i] - positions[j]).abs();
            total += match period {
                Some(p) => {
                    let wrapped = d.rem_euclid(p);
                    wrapped.min(p - wrapped)
                }
                None => d,
            };
        }
    }

    let pairs = (n * (n - 1) / 2) as f64;
    total / pairs
}

/// Population standard deviation of velocities; 0 for an empty ensemble
pub fn velocity_spread<S>(velocities: &ArrayBase<S, Ix1>) -> f64
where
    S: Data<Elem = f64>,
{
    if velocities.is_empty() {
        return 0.0;
    }
    velocities.std(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{array, Array1};
    use std::f64::consts::PI;

    #[test]
    fn test_in_phase_order_parameter() {
        let (r, psi) = order_parameter(&array![0.7, 0.7, 0.7, 0.7]);
        assert_relative_eq!(r, 1.0, epsilon = 1e-12);
        assert_relative_eq!(psi, 0.7, epsilon = 1e-12);
    }

    #[test]
    fn test_splay_state_is_incoherent() {
        let phases = Array1::from_iter((0..8).map(|k| 2.0 * PI * k as f64 / 8.0));
        let (r, _) = order_parameter(&phases);
        assert!(r < 1e-12, "splay state should have r = 0, got {}", r);
    }

    #[test]
    fn test_empty_order_parameter() {
        assert_eq!(order_parameter(&Array1::<f64>::zeros(0)), (0.0, 0.0));
    }

    #[test]
    fn test_pairwise_distance_on_line() {
        // pairs: 1, 3, 2
        assert_relative_eq!(mean_pairwise_distance(&array![0.0, 1.0, 3.0], None), 2.0);
        assert_eq!(mean_pairwise_distance(&array![4.0], None), 0.0);
    }

    #[test]
    fn test_pairwise_distance_folds_on_circle() {
        let d = mean_pairwise_distance(&array![0.1, 2.0 * PI - 0.1], Some(2.0 * PI));
        assert_relative_eq!(d, 0.2, epsilon = 1e-12);

        // Differences beyond one period wrap as well
        let d = mean_pairwise_distance(&array![0.0, 4.0 * PI + 0.3], Some(2.0 * PI));
        assert_relative_eq!(d, 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_non_positive_period_leaves_distances_unfolded() {
        let positions = array![0.0, 1.0, 3.0];
        for period in [0.0, -2.0, f64::NAN] {
            assert_relative_eq!(mean_pairwise_distance(&positions, Some(period)), 2.0);
        }
    }

    #[test]
    fn test_velocity_spread() {
        assert_relative_eq!(velocity_spread(&array![1.0, 3.0]), 1.0);
        assert_eq!(velocity_spread(&array![2.0, 2.0, 2.0]), 0.0);
    }

    #[test]
    fn test_observables_accept_row_views() {
        let block = ndarray::arr2(&[[0.0, 0.0], [1.0, 3.0]]);
        assert_relative_eq!(velocity_spread(&block.row(1)), 1.0);
        assert_relative_eq!(order_parameter(&block.row(0)).0, 1.0);
    }
}
