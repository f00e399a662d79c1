use serde::{Deserialize, Serialize};

use crate::tolerance::{DEFAULT_EPS, DEFAULT_QR_ITERATIONS, EIGENVALUE_MERGE_TOL, EIGENVECTOR_EPS};

/// Tolerances and iteration counts used by the tasks.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Pivot / rank tolerance for reduction, inversion and basis extraction.
    pub eps: f64,
    /// Tolerance for the eigenvector null-space solve.
    pub eigenvector_eps: f64,
    /// Eigenvalues closer than this are reported once.
    pub eigenvalue_merge_tol: f64,
    /// QR steps for operators larger than 2x2.
    pub qr_iterations: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            eps: DEFAULT_EPS,
            eigenvector_eps: EIGENVECTOR_EPS,
            eigenvalue_merge_tol: EIGENVALUE_MERGE_TOL,
            qr_iterations: DEFAULT_QR_ITERATIONS,
        }
    }
}

impl EngineConfig {
    pub fn new(eps: f64, eigenvector_eps: f64, eigenvalue_merge_tol: f64, qr_iterations: usize) -> Self {
        Self {
            eps,
            eigenvector_eps,
            eigenvalue_merge_tol,
            qr_iterations,
        }
    }

    /// Checks that every tolerance is positive and finite and that at least
    /// one QR step is taken.
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("eps", self.eps),
            ("eigenvector_eps", self.eigenvector_eps),
            ("eigenvalue_merge_tol", self.eigenvalue_merge_tol),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(format!(
                    "{} must be a positive finite number, got {}",
                    name, value
                ));
            }
        }
        if self.qr_iterations == 0 {
            return Err("qr_iterations must be at least 1".to_string());
        }
        Ok(())
    }
}
