//! Evenly spaced grids over parameter and time intervals.

use ndarray::Array1;

/// `n` evenly spaced values from `start` to `end`, both inclusive
///
/// One sample yields `[start]`, zero samples an empty array. The last
/// value is exactly `end`.
pub fn linspace(start: f64, end: f64, n: usize) -> Array1<f64> {
    match n {
        0 => Array1::zeros(0),
        1 => Array1::from_elem(1, start),
        _ => {
            let step = (end - start) / (n - 1) as f64;
            Array1::from_iter((0..n).map(|i| {
                if i == n - 1 {
                    end
                } else {
                    start + i as f64 * step
                }
            }))
        }
    }
}
