use std::fmt;
use std::ops::{Index, IndexMut, RangeBounds};

use crate::error::LinalgError;
use crate::math::vector::Vector;

/// Dense row-major matrix of `f64`.
///
/// Every row has the same length and the shape never changes after
/// construction. Row operations take `&mut self`; everything else returns a
/// fresh matrix, so callers only ever mutate values they own.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    pub fn from_shape_vec(shape: (usize, usize), data: Vec<f64>) -> Result<Self, LinalgError> {
        let (rows, cols) = shape;
        if data.len() != rows * cols {
            return Err(LinalgError::Shape {
                rows,
                cols,
                len: data.len(),
            });
        }
        // A matrix without rows has no columns either.
        let cols = if rows == 0 { 0 } else { cols };
        Ok(Self { data, rows, cols })
    }

    /// Builds a matrix from a list of rows, rejecting ragged input.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, LinalgError> {
        let ncols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut data = Vec::with_capacity(rows.len() * ncols);
        for (idx, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != ncols {
                return Err(LinalgError::RaggedRows {
                    row: idx,
                    expected: ncols,
                    found: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            data,
            rows: rows.len(),
            cols: ncols,
        })
    }

    /// Builds the matrix whose `j`-th column is `columns[j]`.
    pub fn from_columns(columns: &[Vector]) -> Result<Self, LinalgError> {
        let as_rows: Vec<&[f64]> = columns.iter().map(|c| c.as_slice()).collect();
        Ok(Matrix::from_rows(&as_rows)?.transpose())
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        let cols = if rows == 0 { 0 } else { cols };
        Self {
            data: vec![0.0; rows * cols],
            rows,
            cols,
        }
    }

    pub fn identity(n: usize) -> Self {
        let mut m = Matrix::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = 1.0;
        }
        m
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`; the empty matrix reports `(0, 0)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub fn row_slice(&self, row: usize) -> &[f64] {
        let start = self.offset(row, 0);
        &self.data[start..start + self.cols]
    }

    pub fn row(&self, row: usize) -> Vector {
        Vector::from_vec(self.row_slice(row).to_vec())
    }

    pub fn column(&self, col: usize) -> Vector {
        assert!(col < self.cols, "column index out of bounds");
        (0..self.rows).map(|row| self[(row, col)]).collect()
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.rows).map(|i| self.row_slice(i).to_vec()).collect()
    }

    pub fn select_columns<R>(&self, range: R) -> Matrix
    where
        R: RangeBounds<usize>,
    {
        use std::ops::Bound;

        let start = match range.start_bound() {
            Bound::Unbounded => 0,
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s + 1,
        };

        let end = match range.end_bound() {
            Bound::Unbounded => self.cols,
            Bound::Included(&e) => e + 1,
            Bound::Excluded(&e) => e,
        };

        assert!(
            start <= end && end <= self.cols,
            "column slice out of bounds"
        );

        let new_cols = end - start;
        let mut data = Vec::with_capacity(self.rows * new_cols);
        for row in 0..self.rows {
            data.extend_from_slice(&self.row_slice(row)[start..end]);
        }

        Matrix {
            data,
            rows: self.rows,
            cols: if self.rows == 0 { 0 } else { new_cols },
        }
    }

    pub fn transpose(&self) -> Matrix {
        let mut t = Matrix::zeros(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                t[(j, i)] = self[(i, j)];
            }
        }
        t
    }

    /// Matrix product `self * rhs`.
    pub fn multiply(&self, rhs: &Matrix) -> Result<Matrix, LinalgError> {
        if self.cols != rhs.rows {
            return Err(LinalgError::DimensionMismatch {
                op: "multiply",
                left: self.dimensions(),
                right: rhs.dimensions(),
            });
        }
        let mut out = Matrix::zeros(self.rows, rhs.cols);
        for i in 0..self.rows {
            for k in 0..self.cols {
                let aik = self[(i, k)];
                if aik == 0.0 {
                    continue;
                }
                for j in 0..rhs.cols {
                    out[(i, j)] += aik * rhs[(k, j)];
                }
            }
        }
        Ok(out)
    }

    /// Product with a column vector.
    pub fn multiply_vector(&self, v: &Vector) -> Result<Vector, LinalgError> {
        if v.len() != self.cols {
            return Err(LinalgError::DimensionMismatch {
                op: "multiply_vector",
                left: self.dimensions(),
                right: (v.len(), 1),
            });
        }
        Ok((0..self.rows)
            .map(|i| {
                self.row_slice(i)
                    .iter()
                    .zip(v.iter())
                    .map(|(a, b)| a * b)
                    .sum()
            })
            .collect())
    }

    pub fn scale_row(&mut self, row: usize, factor: f64) {
        let start = self.offset(row, 0);
        for x in &mut self.data[start..start + self.cols] {
            *x *= factor;
        }
    }

    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for j in 0..self.cols {
            let (ia, ib) = (self.offset(a, j), self.offset(b, j));
            self.data.swap(ia, ib);
        }
    }

    /// `row[target] += factor * row[source]`
    pub fn add_scaled_row(&mut self, target: usize, source: usize, factor: f64) {
        for j in 0..self.cols {
            let v = self[(source, j)];
            self[(target, j)] += factor * v;
        }
    }

    /// Horizontal concatenation `[self | rhs]`.
    pub fn augment(&self, rhs: &Matrix) -> Result<Matrix, LinalgError> {
        if self.rows != rhs.rows {
            return Err(LinalgError::DimensionMismatch {
                op: "augment",
                left: self.dimensions(),
                right: rhs.dimensions(),
            });
        }
        let cols = self.cols + rhs.cols;
        let mut data = Vec::with_capacity(self.rows * cols);
        for i in 0..self.rows {
            data.extend_from_slice(self.row_slice(i));
            data.extend_from_slice(rhs.row_slice(i));
        }
        Ok(Matrix {
            data,
            rows: self.rows,
            cols,
        })
    }

    /// `self - lambda * I` for a square matrix.
    pub fn minus_scaled_identity(&self, lambda: f64) -> Result<Matrix, LinalgError> {
        if !self.is_square() {
            return Err(LinalgError::NotSquare {
                op: "minus_scaled_identity",
                rows: self.rows,
                cols: self.cols,
            });
        }
        let mut out = self.clone();
        for i in 0..self.rows {
            out[(i, i)] -= lambda;
        }
        Ok(out)
    }

    pub fn diagonal(&self) -> Vec<f64> {
        (0..self.rows.min(self.cols)).map(|i| self[(i, i)]).collect()
    }

    pub fn mapv<F>(&self, f: F) -> Matrix
    where
        F: FnMut(&f64) -> f64,
    {
        Matrix {
            data: self.data.iter().map(f).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Entry-wise comparison within `eps`.
    pub fn approx_eq(&self, other: &Matrix, eps: f64) -> bool {
        self.dimensions() == other.dimensions()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| (a - b).abs() < eps)
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        let offset = self.offset(index.0, index.1);
        &self.data[offset]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        let offset = self.offset(index.0, index.1);
        &mut self.data[offset]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", self.row(i))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(rows: &[&[f64]]) -> Matrix {
        Matrix::from_rows(rows).unwrap()
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(
            err,
            LinalgError::RaggedRows {
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn empty_matrix_has_no_columns() {
        let empty = Matrix::from_rows::<Vec<f64>>(&[]).unwrap();
        assert_eq!(empty.dimensions(), (0, 0));
        assert_eq!(Matrix::zeros(0, 4).dimensions(), (0, 0));
    }

    #[test]
    fn row_operations_mutate_in_place() {
        let mut a = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
        a.swap_rows(0, 1);
        assert_eq!(a.row_slice(0), &[3.0, 4.0]);
        a.scale_row(1, 2.0);
        assert_eq!(a.row_slice(1), &[2.0, 4.0]);
        a.add_scaled_row(0, 1, -1.5);
        assert_eq!(a.row_slice(0), &[0.0, -2.0]);
    }

    #[test]
    fn multiply_skips_zeros_but_stays_exact() {
        let a = m(&[&[0.0, 2.0], &[1.0, 0.0]]);
        let b = m(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
        let c = a.multiply(&b).unwrap();
        assert_eq!(c, m(&[&[8.0, 10.0, 12.0], &[1.0, 2.0, 3.0]]));
    }

    #[test]
    fn from_columns_transposes_input() {
        let p = Matrix::from_columns(&[
            Vector::from_vec(vec![1.0, 2.0]),
            Vector::from_vec(vec![3.0, 4.0]),
        ])
        .unwrap();
        assert_eq!(p, m(&[&[1.0, 3.0], &[2.0, 4.0]]));
    }
}
