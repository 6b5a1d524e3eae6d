//! Initial conditions for ensembles.

use ndarray::Array1;
use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::error::{Error, Result};

/// `n` positions evenly spaced on [start, end), end excluded
///
/// Suited to phases on a circle, where `end` coincides with `start`.
pub fn evenly_spaced(n: usize, start: f64, end: f64) -> Array1<f64> {
    let width = (end - start) / n.max(1) as f64;
    Array1::from_iter((0..n).map(|i| start + width * i as f64))
}

/// `n` values drawn uniformly from [low, high)
pub fn uniform_random<R: Rng + ?Sized>(
    n: usize,
    low: f64,
    high: f64,
    rng: &mut R,
) -> Result<Array1<f64>> {
    let uniform = Uniform::new(low, high).map_err(|e| {
        Error::InvalidParameter(format!("uniform range [{}, {}): {}", low, high, e))
    })?;
    Ok(Array1::from_iter((0..n).map(|_| uniform.sample(&mut *rng))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::f64::consts::PI;

    #[test]
    fn test_evenly_spaced_excludes_end() {
        let phases = evenly_spaced(4, 0.0, 2.0 * PI);
        assert_eq!(phases.len(), 4);
        assert_relative_eq!(phases[1], PI / 2.0);
        assert_relative_eq!(phases[3], 3.0 * PI / 2.0);
        assert!(evenly_spaced(0, 0.0, 1.0).is_empty());
    }

    #[test]
    fn test_uniform_random_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let values = uniform_random(200, -1.0, 2.0, &mut rng).unwrap();
        assert_eq!(values.len(), 200);
        assert!(values.iter().all(|&x| (-1.0..2.0).contains(&x)));
    }

    #[test]
    fn test_uniform_random_reproducible() {
        let a = uniform_random(10, 0.0, 1.0, &mut StdRng::seed_from_u64(9)).unwrap();
        let b = uniform_random(10, 0.0, 1.0, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_uniform_random_empty_range_rejected() {
        let result = uniform_random(3, 1.0, 1.0, &mut StdRng::seed_from_u64(0));
        assert!(matches!(result, Err(Error::InvalidParameter(_))));
    }
}
