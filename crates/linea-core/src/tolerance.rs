//! Tolerances shared by the engine.

/// Tolerance for pivot selection, rank and basis extraction.
pub const DEFAULT_EPS: f64 = 1e-10;

/// Tolerance used when solving `(A - λI)x = 0` for eigenvectors.
pub const EIGENVECTOR_EPS: f64 = 1e-8;

/// Two eigenvalues closer than this are treated as the same root.
pub const EIGENVALUE_MERGE_TOL: f64 = 1e-6;

/// Number of QR steps taken by the iterative eigenvalue solver.
pub const DEFAULT_QR_ITERATIONS: usize = 60;

/// Returns `true` when `|x| < eps`.
#[inline]
pub fn is_near_zero(x: f64, eps: f64) -> bool {
    x.abs() < eps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_bound() {
        assert!(is_near_zero(0.0, DEFAULT_EPS));
        assert!(is_near_zero(-9e-11, DEFAULT_EPS));
        assert!(!is_near_zero(1e-10, 1e-10));
        assert!(!is_near_zero(-0.5, 0.1));
    }
}
