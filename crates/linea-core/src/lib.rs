//! linea-core: a small dense linear-algebra engine for teaching.
//!
//! The crate provides a row-major `Matrix`/`Vector` pair, Gauss-Jordan
//! reduction with partial pivoting, the subspaces derived from it (kernel,
//! image, inverse), and eigenvalue routines for 2x2 and 3x3 operators. The
//! `tasks` module packages these into the exercises offered by the console.
//!
//! Everything here is synchronous and free of I/O. Tolerances are explicit
//! parameters; the defaults live in [`tolerance`] and [`config::EngineConfig`].
pub mod config;
pub mod eigen;
pub mod error;
pub mod math;
pub mod reduction;
pub mod subspace;
pub mod tasks;
pub mod tolerance;

pub use error::{BasisRole, LinalgError, TaskError};
pub use math::{Basis, Matrix, Vector};
