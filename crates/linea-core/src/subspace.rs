//! Operations derived from row reduction: inverse, kernel and image.

use crate::error::LinalgError;
use crate::math::{Basis, Matrix, Vector};
use crate::reduction::{kernel_vectors, reduced_row_echelon};

/// Inverse of a square matrix by Gauss-Jordan elimination on `[A | I]`.
///
/// Pivots are chosen first-found: the first row at or below the current
/// pivot row whose entry exceeds `eps`. This differs from the largest-magnitude
/// rule of [`reduced_row_echelon`].
///
/// # Errors
///
/// * `NotSquare` if `a` is not square.
/// * `SingularMatrix` if some column has no eligible pivot.
pub fn inverse(a: &Matrix, eps: f64) -> Result<Matrix, LinalgError> {
    if !a.is_square() {
        return Err(LinalgError::NotSquare {
            op: "inverse",
            rows: a.nrows(),
            cols: a.ncols(),
        });
    }
    let n = a.nrows();
    let mut ai = a.augment(&Matrix::identity(n))?;

    for j in 0..n {
        let pivot_row = match (j..n).find(|&k| ai[(k, j)].abs() > eps) {
            Some(k) => k,
            None => {
                log::debug!("inverse: no pivot in column {}, matrix is singular", j);
                return Err(LinalgError::SingularMatrix { column: j });
            }
        };

        // every earlier column consumed exactly one row, so row j is next
        ai.swap_rows(j, pivot_row);
        let pivot = ai[(j, j)];
        ai.scale_row(j, 1.0 / pivot);

        for k in 0..n {
            if k != j && ai[(k, j)].abs() > eps {
                let factor = -ai[(k, j)];
                ai.add_scaled_row(k, j, factor);
            }
        }
    }

    Ok(ai.select_columns(n..))
}

/// Basis of `{x : Ax = 0}`.
///
/// One vector per free column `f`: a 1 at position `f`, and for the pivot of
/// row `r` in column `p`, the entry `-R[r][f]`. When every column is a pivot
/// the kernel is trivial and a single zero vector is returned; use
/// [`nullity`] rather than `len()` to count dimensions.
pub fn null_space_basis(a: &Matrix, eps: f64) -> Basis {
    let n = a.ncols();
    let reduced = reduced_row_echelon(a, eps);
    let basis: Basis = kernel_vectors(reduced.matrix.as_slice(), n, &reduced.pivot_columns)
        .into_iter()
        .map(Vector::from_vec)
        .collect();

    if basis.is_empty() {
        vec![Vector::zeros(n)]
    } else {
        basis
    }
}

/// Dimension of the kernel described by a [`null_space_basis`] result.
///
/// The lone zero vector stands for the trivial kernel and counts as 0.
pub fn nullity(basis: &[Vector], eps: f64) -> usize {
    match basis {
        [only] if only.is_negligible(eps) => 0,
        _ => basis.len(),
    }
}

/// Basis of the column space: the original columns of `a` at the pivot
/// positions of its reduced form, in pivot order.
pub fn column_space_basis(a: &Matrix, eps: f64) -> Basis {
    reduced_row_echelon(a, eps)
        .pivot_columns
        .iter()
        .map(|&j| a.column(j))
        .collect()
}
