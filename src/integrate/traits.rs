//! First-order ODE systems y' = f(t, y) as seen by the solver.

use ndarray::Array1;

/// Right-hand side of a first-order ODE system
///
/// `derivatives` takes `&mut self` so that a system may own a random
/// stream (stochastic forcing); deterministic systems simply ignore it.
pub trait OdeSystem {
    /// Length of the state vector
    fn dimension(&self) -> usize;

    /// Write f(time, state) into `rate` (same length as `state`)
    fn derivatives(&mut self, time: f64, state: &Array1<f64>, rate: &mut Array1<f64>);

    /// Allocate and return f(time, state)
    fn evaluate(&mut self, time: f64, state: &Array1<f64>) -> Array1<f64> {
        let mut rate = Array1::zeros(state.len());
        self.derivatives(time, state, &mut rate);
        rate
    }
}
