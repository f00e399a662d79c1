//! Gauss-Jordan reduction to reduced row-echelon form.
//!
//! This is the one elimination routine behind rank, null space and column
//! space. The pivot rule matters downstream: basis extraction reads the
//! pivot/free column partition straight from [`RowEchelon::pivot_columns`].

use std::fmt;
use std::ops::{Add, Div, Mul, Neg};

use num_complex::Complex64;

use crate::math::Matrix;
use crate::tolerance::is_near_zero;

/// Field elements the elimination can run over.
pub trait Scalar:
    Copy
    + fmt::Display
    + Add<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    fn zero() -> Self;
    fn one() -> Self;
    /// Absolute value, or modulus for complex numbers.
    fn magnitude(self) -> f64;
}

impl Scalar for f64 {
    fn zero() -> Self {
        0.0
    }

    fn one() -> Self {
        1.0
    }

    fn magnitude(self) -> f64 {
        self.abs()
    }
}

impl Scalar for Complex64 {
    fn zero() -> Self {
        Complex64::new(0.0, 0.0)
    }

    fn one() -> Self {
        Complex64::new(1.0, 0.0)
    }

    fn magnitude(self) -> f64 {
        self.norm()
    }
}

/// A reduced matrix together with the columns that received a leading one.
#[derive(Clone, Debug, PartialEq)]
pub struct RowEchelon {
    pub matrix: Matrix,
    pub pivot_columns: Vec<usize>,
}

impl RowEchelon {
    /// Columns without a pivot, in increasing order.
    pub fn free_columns(&self) -> Vec<usize> {
        free_columns(self.matrix.ncols(), &self.pivot_columns)
    }
}

fn free_columns(cols: usize, pivot_columns: &[usize]) -> Vec<usize> {
    (0..cols).filter(|j| !pivot_columns.contains(j)).collect()
}

/// Reduces a copy of `m` to reduced row-echelon form.
///
/// Columns are visited left to right. Within a column the pivot is the entry
/// of largest magnitude at or below the current pivot row, where a candidate
/// only replaces the running best if it beats it by more than `eps`. A column
/// whose best candidate does not exceed `eps` is left as a free column.
pub fn reduced_row_echelon(m: &Matrix, eps: f64) -> RowEchelon {
    let mut a = m.clone();
    let (rows, cols) = a.dimensions();
    let pivot_columns = reduce_in_place(a.as_mut_slice(), rows, cols, eps);
    RowEchelon {
        matrix: a,
        pivot_columns,
    }
}

/// [`reduced_row_echelon`] over a row-major `rows x cols` buffer of any
/// [`Scalar`]; returns the pivot columns.
pub fn reduce_in_place<T: Scalar>(a: &mut [T], rows: usize, cols: usize, eps: f64) -> Vec<usize> {
    let mut pivot_row = 0;
    let mut pivot_columns = Vec::new();

    if rows == 0 {
        return pivot_columns;
    }

    for j in 0..cols {
        let mut best_row = None;
        let mut best_abs = 0.0;
        for k in pivot_row..rows {
            let candidate = a[k * cols + j].magnitude();
            if candidate > best_abs + eps {
                best_abs = candidate;
                best_row = Some(k);
            }
        }

        let k = match best_row {
            Some(k) if !is_near_zero(best_abs, eps) => k,
            _ => {
                log::trace!("column {} has no pivot, treating as free", j);
                continue;
            }
        };

        if k != pivot_row {
            for c in 0..cols {
                a.swap(pivot_row * cols + c, k * cols + c);
            }
        }
        let pivot = a[pivot_row * cols + j];
        let factor = T::one() / pivot;
        for x in &mut a[pivot_row * cols..(pivot_row + 1) * cols] {
            *x = *x * factor;
        }
        a[pivot_row * cols + j] = T::one();

        for k in 0..rows {
            let entry = a[k * cols + j];
            if k != pivot_row && !is_near_zero(entry.magnitude(), eps) {
                let factor = -entry;
                for c in 0..cols {
                    let v = a[pivot_row * cols + c];
                    a[k * cols + c] = a[k * cols + c] + factor * v;
                }
            }
        }

        log::trace!("pivot {} at row {}, column {}", pivot, pivot_row, j);
        pivot_columns.push(j);
        pivot_row += 1;
        if pivot_row == rows {
            break;
        }
    }

    pivot_columns
}

/// Kernel vectors read off a reduced buffer with `cols` columns.
///
/// One vector per free column `f`: a 1 at position `f`, and for the pivot of
/// row `r` in column `p`, the entry `-R[r][f]`.
pub fn kernel_vectors<T: Scalar>(reduced: &[T], cols: usize, pivot_columns: &[usize]) -> Vec<Vec<T>> {
    free_columns(cols, pivot_columns)
        .into_iter()
        .map(|free| {
            let mut v = vec![T::zero(); cols];
            v[free] = T::one();
            for (row, &pivot) in pivot_columns.iter().enumerate() {
                v[pivot] = -reduced[row * cols + free];
            }
            v
        })
        .collect()
}

/// Number of rows of the reduced form holding an entry larger than `eps`.
pub fn rank(a: &Matrix, eps: f64) -> usize {
    let reduced = reduced_row_echelon(a, eps).matrix;
    (0..reduced.nrows())
        .filter(|&i| reduced.row_slice(i).iter().any(|x| x.abs() > eps))
        .count()
}
