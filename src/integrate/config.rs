//! Solver configuration.
//!
//! Loadable from YAML/JSON; missing fields take the defaults:
//!
//! ```yaml
//! rtol: 1.0e-6        # relative error tolerance
//! atol: 1.0e-9        # absolute error tolerance
//! max_steps: 200000   # accepted + rejected step budget
//! first_step: 0.01    # omit for automatic selection
//! max_step: 0.5       # omit for unbounded
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Tolerances and step budget of the adaptive solver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Relative tolerance
    pub rtol: f64,
    /// Absolute tolerance
    pub atol: f64,
    /// Step budget (accepted + rejected) before `SolverDivergence`
    pub max_steps: usize,
    /// Initial step size; None selects one automatically
    pub first_step: Option<f64>,
    /// Upper bound on |h|; None leaves the step unbounded
    pub max_step: Option<f64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            rtol: 1e-3,
            atol: 1e-6,
            max_steps: 100_000,
            first_step: None,
            max_step: None,
        }
    }
}

impl SolverConfig {
    /// Config with the given tolerances, other fields default
    pub fn with_tolerances(rtol: f64, atol: f64) -> Self {
        Self {
            rtol,
            atol,
            ..Self::default()
        }
    }

    /// Tight tolerances for reference solutions in tests and comparisons
    pub fn precise() -> Self {
        Self::with_tolerances(1e-9, 1e-12)
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_first_step(mut self, first_step: f64) -> Self {
        self.first_step = Some(first_step);
        self
    }

    pub fn with_max_step(mut self, max_step: f64) -> Self {
        self.max_step = Some(max_step);
        self
    }

    /// Reject non-positive tolerances, steps or budgets
    pub fn validate(&self) -> Result<()> {
        if !(self.rtol > 0.0 && self.rtol.is_finite()) {
            return Err(Error::InvalidParameter(format!(
                "rtol must be positive and finite, got {}",
                self.rtol
            )));
        }
        if !(self.atol > 0.0 && self.atol.is_finite()) {
            return Err(Error::InvalidParameter(format!(
                "atol must be positive and finite, got {}",
                self.atol
            )));
        }
        if self.max_steps == 0 {
            return Err(Error::InvalidParameter(
                "max_steps must be at least 1".to_string(),
            ));
        }
        if let Some(h) = self.first_step {
            if !(h > 0.0 && h.is_finite()) {
                return Err(Error::InvalidParameter(format!(
                    "first_step must be positive and finite, got {}",
                    h
                )));
            }
        }
        if let Some(h) = self.max_step {
            if !(h > 0.0) {
                return Err(Error::InvalidParameter(format!(
                    "max_step must be positive, got {}",
                    h
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SolverConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.first_step, None);
        assert_eq!(config.max_step, None);
    }

    #[test]
    fn test_invalid_tolerances() {
        assert!(SolverConfig::with_tolerances(0.0, 1e-6).validate().is_err());
        assert!(SolverConfig::with_tolerances(1e-3, -1.0).validate().is_err());
        assert!(SolverConfig::with_tolerances(f64::NAN, 1e-6).validate().is_err());
    }

    #[test]
    fn test_invalid_steps() {
        assert!(SolverConfig::default().with_max_steps(0).validate().is_err());
        assert!(SolverConfig::default().with_first_step(0.0).validate().is_err());
        assert!(SolverConfig::default().with_max_step(-0.1).validate().is_err());
    }

    #[test]
    fn test_builder_chain() {
        let config = SolverConfig::precise()
            .with_max_steps(50)
            .with_first_step(0.01)
            .with_max_step(0.1);
        assert_eq!(config.rtol, 1e-9);
        assert_eq!(config.max_steps, 50);
        assert_eq!(config.first_step, Some(0.01));
        assert_eq!(config.max_step, Some(0.1));
        assert!(config.validate().is_ok());
    }
}
