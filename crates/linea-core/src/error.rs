use std::error::Error;
use std::fmt;

/// Failures raised by the matrix engine.
///
/// `DimensionMismatch`, `NotSquare`, `Shape` and `RaggedRows` are precondition violations:
/// the caller handed over operands that cannot be combined. `SingularMatrix`
/// is the one recoverable failure and only comes out of `inverse`.
#[derive(Debug, Clone, PartialEq)]
pub enum LinalgError {
    DimensionMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },
    NotSquare {
        op: &'static str,
        rows: usize,
        cols: usize,
    },
    SingularMatrix {
        column: usize,
    },
    Shape {
        rows: usize,
        cols: usize,
        len: usize,
    },
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for LinalgError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LinalgError::DimensionMismatch { op, left, right } => write!(
                f,
                "{}: incompatible dimensions {}x{} and {}x{}",
                op, left.0, left.1, right.0, right.1
            ),
            LinalgError::NotSquare { op, rows, cols } => {
                write!(f, "{}: matrix must be square, got {}x{}", op, rows, cols)
            }
            LinalgError::SingularMatrix { column } => {
                write!(f, "matrix is singular (no pivot in column {})", column)
            }
            LinalgError::Shape { rows, cols, len } => write!(
                f,
                "invalid shape ({}, {}) for buffer of length {}",
                rows, cols, len
            ),
            LinalgError::RaggedRows {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {} has {} entries, expected {}",
                row, found, expected
            ),
        }
    }
}

impl Error for LinalgError {}

/// Which basis of a change-of-basis task was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasisRole {
    Beta,
    Gamma,
}

impl fmt::Display for BasisRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BasisRole::Beta => write!(f, "beta"),
            BasisRole::Gamma => write!(f, "gamma"),
        }
    }
}

/// Failures of the teaching tasks in [`crate::tasks`].
#[derive(Debug, Clone, PartialEq)]
pub enum TaskError {
    Linalg(LinalgError),
    InvalidBasis { which: BasisRole },
    UnsupportedSize { n: usize },
}

impl fmt::Display for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TaskError::Linalg(e) => write!(f, "{}", e),
            TaskError::InvalidBasis { which } => write!(
                f,
                "the vectors of basis {} are not linearly independent (matrix is not invertible)",
                which
            ),
            TaskError::UnsupportedSize { n } => write!(
                f,
                "only 2x2 and 3x3 operators are supported, got {}x{}",
                n, n
            ),
        }
    }
}

impl Error for TaskError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TaskError::Linalg(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LinalgError> for TaskError {
    fn from(e: LinalgError) -> Self {
        TaskError::Linalg(e)
    }
}
