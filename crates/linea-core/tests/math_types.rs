//! Integration tests for the Matrix and Vector value types.

use linea_core::math::{Matrix, Vector};
use linea_core::LinalgError;

fn m(rows: &[&[f64]]) -> Matrix {
    Matrix::from_rows(rows).unwrap()
}

// ---------------------------------------------------------------------------
// Construction & shape
// ---------------------------------------------------------------------------

#[test]
fn matrix_from_shape_vec() {
    let a = Matrix::from_shape_vec((2, 3), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    assert_eq!(a.nrows(), 2);
    assert_eq!(a.ncols(), 3);
    assert_eq!(a.dimensions(), (2, 3));
    assert_eq!(a[(1, 0)], 4.0);
}

#[test]
fn matrix_shape_mismatch_errors() {
    let result = Matrix::from_shape_vec((2, 3), vec![1.0, 2.0, 3.0]);
    assert!(matches!(
        result,
        Err(LinalgError::Shape {
            rows: 2,
            cols: 3,
            len: 3
        })
    ));
}

#[test]
fn identity_has_unit_diagonal() {
    let i3 = Matrix::identity(3);
    assert_eq!(i3.diagonal(), vec![1.0, 1.0, 1.0]);
    assert_eq!(i3[(0, 2)], 0.0);
    assert!(i3.is_square());
}

#[test]
fn transpose_swaps_dimensions() {
    let a = m(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
    let t = a.transpose();
    assert_eq!(t.dimensions(), (3, 2));
    assert_eq!(t.row_slice(2), &[3.0, 6.0]);
    assert_eq!(t.transpose(), a);
}

#[test]
fn rows_and_columns() {
    let a = m(&[&[1.0, 2.0], &[3.0, 4.0], &[5.0, 6.0]]);
    assert_eq!(a.column(1).to_vec(), vec![2.0, 4.0, 6.0]);
    assert_eq!(a.row(2).to_vec(), vec![5.0, 6.0]);
    assert_eq!(a.to_rows()[0], vec![1.0, 2.0]);
}

#[test]
fn select_columns_takes_a_range() {
    let a = m(&[&[1.0, 2.0, 3.0, 4.0], &[5.0, 6.0, 7.0, 8.0]]);
    let right = a.select_columns(2..);
    assert_eq!(right.dimensions(), (2, 2));
    assert_eq!(right.row_slice(1), &[7.0, 8.0]);
}

// ---------------------------------------------------------------------------
// Products & augmentation
// ---------------------------------------------------------------------------

#[test]
fn multiply_checks_inner_dimension() {
    let a = m(&[&[1.0, 2.0]]);
    let b = m(&[&[1.0, 2.0]]);
    let err = a.multiply(&b).unwrap_err();
    assert_eq!(
        err,
        LinalgError::DimensionMismatch {
            op: "multiply",
            left: (1, 2),
            right: (1, 2)
        }
    );
}

#[test]
fn multiply_vector_matches_hand_computation() {
    let a = m(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
    let v = Vector::from_vec(vec![1.0, 0.0, -1.0]);
    assert_eq!(a.multiply_vector(&v).unwrap().to_vec(), vec![-2.0, -2.0]);
}

#[test]
fn multiply_vector_rejects_wrong_length() {
    let a = Matrix::identity(3);
    let v = Vector::zeros(2);
    assert!(matches!(
        a.multiply_vector(&v),
        Err(LinalgError::DimensionMismatch { .. })
    ));
}

#[test]
fn augment_concatenates_horizontally() {
    let a = m(&[&[1.0], &[2.0]]);
    let aug = a.augment(&Matrix::identity(2)).unwrap();
    assert_eq!(aug.row_slice(0), &[1.0, 1.0, 0.0]);
    assert_eq!(aug.row_slice(1), &[2.0, 0.0, 1.0]);
}

#[test]
fn augment_requires_equal_rows() {
    let a = Matrix::identity(2);
    let b = Matrix::identity(3);
    assert!(a.augment(&b).is_err());
}

#[test]
fn minus_scaled_identity_shifts_diagonal() {
    let a = m(&[&[2.0, 1.0], &[0.0, 3.0]]);
    let shifted = a.minus_scaled_identity(2.0).unwrap();
    assert_eq!(shifted, m(&[&[0.0, 1.0], &[0.0, 1.0]]));
    assert!(m(&[&[1.0, 2.0]]).minus_scaled_identity(1.0).is_err());
}

// ---------------------------------------------------------------------------
// Vector helpers
// ---------------------------------------------------------------------------

#[test]
fn vector_dot_and_norm() {
    let v = Vector::from_vec(vec![3.0, 4.0]);
    assert_eq!(v.dot(&v), 25.0);
    assert_eq!(v.norm(), 5.0);
    assert_eq!(v.scaled(0.5).to_vec(), vec![1.5, 2.0]);
}

#[test]
fn vector_negligibility() {
    assert!(Vector::from_vec(vec![1e-12, -1e-12]).is_negligible(1e-10));
    assert!(!Vector::from_vec(vec![0.0, 1e-3]).is_negligible(1e-10));
}

#[test]
fn matrix_display_one_row_per_line() {
    let a = m(&[&[1.0, 2.0], &[3.0, 4.5]]);
    assert_eq!(a.to_string(), "[1, 2]\n[3, 4.5]");
}
