//! Dense value types used throughout the crate.
//!
//! `Matrix` is a row-major `f64` container with the handful of primitives the
//! elimination routines need; `Vector` is its column-vector companion.
pub mod matrix;
pub mod vector;

pub use matrix::Matrix;
pub use vector::{Basis, Vector};
