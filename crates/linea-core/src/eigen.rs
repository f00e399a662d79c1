//! Eigenvalues and eigenvectors of small real operators.
//!
//! 2x2 operators get the closed form from trace and determinant, which yields
//! complex-conjugate pairs when the discriminant is negative. Larger operators
//! go through plain unshifted QR iteration for a fixed number of steps; the
//! diagonal of the final iterate is returned as is, without any convergence
//! check, so results for complex or repeated roots are only approximate.

use num_complex::Complex64;

use crate::error::LinalgError;
use crate::math::{Basis, Matrix, Vector};
use crate::reduction::{kernel_vectors, reduce_in_place};
use crate::subspace::null_space_basis;
use crate::tolerance::{is_near_zero, DEFAULT_EPS};

fn require_size(op: &'static str, a: &Matrix, n: usize) -> Result<(), LinalgError> {
    if !a.is_square() {
        return Err(LinalgError::NotSquare {
            op,
            rows: a.nrows(),
            cols: a.ncols(),
        });
    }
    if a.nrows() != n {
        return Err(LinalgError::DimensionMismatch {
            op,
            left: a.dimensions(),
            right: (n, n),
        });
    }
    Ok(())
}

/// Both roots of `λ² - tλ + d = 0` for a 2x2 matrix with trace `t` and
/// determinant `d`, `+` root first.
pub fn eigenvalues_2x2(a: &Matrix) -> Result<[Complex64; 2], LinalgError> {
    require_size("eigenvalues_2x2", a, 2)?;
    let trace = a[(0, 0)] + a[(1, 1)];
    let det = a[(0, 0)] * a[(1, 1)] - a[(0, 1)] * a[(1, 0)];
    let root = Complex64::new(trace * trace - 4.0 * det, 0.0).sqrt();
    let t = Complex64::new(trace, 0.0);
    Ok([(t + root) / 2.0, (t - root) / 2.0])
}

/// Classical Gram-Schmidt QR factorisation of a square matrix.
///
/// `R[k][j]` is the inner product of column `j`, as orthogonalised so far,
/// with `q_k`; `R[j][j]` is the residual norm before normalisation. If a
/// residual vanishes the columns are dependent and `(I, A)` is returned
/// instead, which makes the next QR step a no-op.
pub fn qr_gram_schmidt(a: &Matrix) -> Result<(Matrix, Matrix), LinalgError> {
    if !a.is_square() {
        return Err(LinalgError::NotSquare {
            op: "qr_gram_schmidt",
            rows: a.nrows(),
            cols: a.ncols(),
        });
    }
    let m = a.nrows();
    let mut r = Matrix::zeros(m, m);
    let mut q_columns: Vec<Vector> = Vec::with_capacity(m);

    for j in 0..m {
        let mut v = a.column(j);
        for (k, q_k) in q_columns.iter().enumerate() {
            let projection = v.dot(q_k);
            r[(k, j)] = projection;
            for i in 0..m {
                v[i] -= projection * q_k[i];
            }
        }

        let norm = v.norm();
        if is_near_zero(norm, DEFAULT_EPS) {
            log::debug!(
                "qr_gram_schmidt: column {} is dependent, falling back to (I, A)",
                j
            );
            return Ok((Matrix::identity(m), a.clone()));
        }
        q_columns.push(v.scaled(1.0 / norm));
        r[(j, j)] = norm;
    }

    Ok((Matrix::from_columns(&q_columns)?, r))
}

/// Runs exactly `iterations` steps of `A ← R·Q` and returns the diagonal.
pub fn eigenvalues_qr(a: &Matrix, iterations: usize) -> Result<Vec<f64>, LinalgError> {
    let mut ak = a.clone();
    for _ in 0..iterations {
        let (q, r) = qr_gram_schmidt(&ak)?;
        ak = r.multiply(&q)?;
    }
    log::trace!("QR iteration finished after {} steps:\n{}", iterations, ak);
    Ok(ak.diagonal())
}

/// Approximate eigenvalues of a 3x3 matrix by QR iteration.
pub fn eigenvalues_3x3_qr(a: &Matrix, iterations: usize) -> Result<[f64; 3], LinalgError> {
    require_size("eigenvalues_3x3_qr", a, 3)?;
    let d = eigenvalues_qr(a, iterations)?;
    Ok([d[0], d[1], d[2]])
}

fn non_trivial(basis: Basis, eps: f64) -> Basis {
    basis.into_iter().filter(|v| !v.is_negligible(eps)).collect()
}

/// Basis of the eigenspace of `lambda`, i.e. the kernel of `A - λI`.
///
/// The zero vector standing for a trivial kernel is dropped. If nothing is
/// left, the kernel is recomputed once with `10 * eps`; an empty result
/// means no eigenvector was found at either tolerance.
pub fn eigenvectors_for(a: &Matrix, lambda: f64, eps: f64) -> Result<Basis, LinalgError> {
    let shifted = a.minus_scaled_identity(lambda)?;
    let found = non_trivial(null_space_basis(&shifted, eps), eps);
    if !found.is_empty() {
        return Ok(found);
    }

    let relaxed = eps * 10.0;
    log::debug!(
        "no eigenvector for lambda = {} at eps = {:e}, retrying with {:e}",
        lambda,
        eps,
        relaxed
    );
    Ok(non_trivial(null_space_basis(&shifted, relaxed), relaxed))
}

/// Eigenvector of a complex eigenvalue, one entry per coordinate.
pub type ComplexVector = Vec<Complex64>;

fn complex_kernel(mut shifted: Vec<Complex64>, n: usize, eps: f64) -> Vec<ComplexVector> {
    let pivots = reduce_in_place(&mut shifted, n, n, eps);
    kernel_vectors(&shifted, n, &pivots)
        .into_iter()
        .filter(|v| v.iter().any(|z| z.norm() > eps))
        .collect()
}

/// [`eigenvectors_for`] for a complex `lambda`: the kernel of `A - λI` is
/// reduced in complex arithmetic with the same pivot rule and the same
/// single retry at `10 * eps`.
pub fn eigenvectors_for_complex(
    a: &Matrix,
    lambda: Complex64,
    eps: f64,
) -> Result<Vec<ComplexVector>, LinalgError> {
    if !a.is_square() {
        return Err(LinalgError::NotSquare {
            op: "eigenvectors_for_complex",
            rows: a.nrows(),
            cols: a.ncols(),
        });
    }
    let n = a.nrows();
    let shifted: Vec<Complex64> = a
        .as_slice()
        .iter()
        .enumerate()
        .map(|(idx, &x)| {
            let z = Complex64::new(x, 0.0);
            if idx / n == idx % n {
                z - lambda
            } else {
                z
            }
        })
        .collect();

    let found = complex_kernel(shifted.clone(), n, eps);
    if !found.is_empty() {
        return Ok(found);
    }

    let relaxed = eps * 10.0;
    log::debug!(
        "no eigenvector for lambda = {} at eps = {:e}, retrying with {:e}",
        lambda,
        eps,
        relaxed
    );
    Ok(complex_kernel(shifted, n, relaxed))
}

/// Drops every eigenvalue within `tol` of one already kept, preserving order.
pub fn distinct_eigenvalues(values: &[Complex64], tol: f64) -> Vec<Complex64> {
    let mut kept: Vec<Complex64> = Vec::with_capacity(values.len());
    for &value in values {
        if kept.iter().all(|seen| (value - *seen).norm() >= tol) {
            kept.push(value);
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tolerance::EIGENVECTOR_EPS;

    #[test]
    fn rotation_has_conjugate_pair() {
        let a = Matrix::from_rows(&[[0.0, -1.0], [1.0, 0.0]]).unwrap();
        let [l1, l2] = eigenvalues_2x2(&a).unwrap();
        assert!((l1 - Complex64::new(0.0, 1.0)).norm() < 1e-12);
        assert!((l2 - Complex64::new(0.0, -1.0)).norm() < 1e-12);
    }

    #[test]
    fn rotation_eigenvector_is_complex() {
        let a = Matrix::from_rows(&[[0.0, -1.0], [1.0, 0.0]]).unwrap();
        let i = Complex64::new(0.0, 1.0);
        let basis = eigenvectors_for_complex(&a, i, EIGENVECTOR_EPS).unwrap();
        assert_eq!(basis.len(), 1);
        assert!((basis[0][0] - i).norm() < 1e-15);
        assert_eq!(basis[0][1], Complex64::new(1.0, 0.0));

        let conj = eigenvectors_for_complex(&a, i.conj(), EIGENVECTOR_EPS).unwrap();
        assert!((conj[0][0] + i).norm() < 1e-15);
    }

    #[test]
    fn qr_reconstructs_input() {
        let a = Matrix::from_rows(&[[2.0, 1.0, 0.0], [1.0, 3.0, 1.0], [0.0, 1.0, 4.0]]).unwrap();
        let (q, r) = qr_gram_schmidt(&a).unwrap();
        assert!(q.multiply(&r).unwrap().approx_eq(&a, 1e-10));
        let qtq = q.transpose().multiply(&q).unwrap();
        assert!(qtq.approx_eq(&Matrix::identity(3), 1e-10));
        for i in 0..3 {
            for j in 0..i {
                assert_eq!(r[(i, j)], 0.0);
            }
        }
    }

    #[test]
    fn dependent_columns_fall_back() {
        let a = Matrix::from_rows(&[[1.0, 2.0], [2.0, 4.0]]).unwrap();
        let (q, r) = qr_gram_schmidt(&a).unwrap();
        assert_eq!(q, Matrix::identity(2));
        assert_eq!(r, a);
    }

    #[test]
    fn retry_relaxes_tolerance() {
        // λ is off by 5e-8: still a pivot at 1e-8, a free column at 1e-7
        let a = Matrix::from_rows(&[[1.0, 0.0], [0.0, 2.0]]).unwrap();
        let basis = eigenvectors_for(&a, 2.0 + 5e-8, EIGENVECTOR_EPS).unwrap();
        assert_eq!(basis.len(), 1);
        assert!(basis[0][1].abs() > 0.5);
    }

    #[test]
    fn repeated_roots_are_merged() {
        let values = [
            Complex64::new(1.0, 0.0),
            Complex64::new(1.0 + 1e-9, 0.0),
            Complex64::new(2.0, 0.0),
        ];
        let distinct = distinct_eigenvalues(&values, 1e-6);
        assert_eq!(distinct, vec![values[0], values[2]]);
    }
}
