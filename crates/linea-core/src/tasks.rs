//! The four exercises offered by the console, as plain functions.
//!
//! Each task takes already-validated numbers and returns a result value; no
//! prompting or printing happens here, so front ends only translate text to
//! `Matrix` values and results back to text.

use num_complex::Complex64;

use crate::config::EngineConfig;
use crate::eigen::{
    distinct_eigenvalues, eigenvalues_2x2, eigenvalues_3x3_qr, eigenvectors_for,
    eigenvectors_for_complex, ComplexVector,
};
use crate::error::{BasisRole, LinalgError, TaskError};
use crate::math::{Basis, Matrix, Vector};
use crate::subspace::{column_space_basis, inverse, null_space_basis, nullity};
use crate::tolerance::is_near_zero;

/// Basis of the plane `W = {(x, y, z) : ax + by + cz = 0}`.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneBasis {
    pub normal: Vector,
    pub basis: Basis,
    pub dimension: usize,
}

impl PlaneBasis {
    /// `a = b = c = 0`: the equation reads `0 = 0` and W is all of R³.
    pub fn is_whole_space(&self) -> bool {
        self.dimension == 3
    }
}

/// Finds two spanning vectors of the plane through the origin with normal
/// `(a, b, c)`, or the canonical basis when all coefficients vanish.
pub fn plane_basis(a: f64, b: f64, c: f64, eps: f64) -> PlaneBasis {
    let normal = Vector::from_vec(vec![a, b, c]);

    if normal.iter().all(|&x| is_near_zero(x, eps)) {
        return PlaneBasis {
            normal,
            basis: (0..3).map(|i| Vector::unit(3, i)).collect(),
            dimension: 3,
        };
    }

    let mut u1 = if is_near_zero(a, eps) && is_near_zero(b, eps) {
        Vector::unit(3, 0)
    } else {
        Vector::from_vec(vec![-b, a, 0.0])
    };
    let mut u2 = normal.cross(&u1);

    if u2.iter().all(|&x| is_near_zero(x, eps)) {
        log::debug!("plane_basis: degenerate first guess, switching to e2");
        u1 = Vector::unit(3, 1);
        u2 = normal.cross(&u1);
    }

    PlaneBasis {
        normal,
        basis: vec![u1, u2],
        dimension: 2,
    }
}

/// Kernel and image of the map `x ↦ Ax`.
#[derive(Debug, Clone, PartialEq)]
pub struct KernelImage {
    pub kernel: Basis,
    pub nullity: usize,
    pub image: Basis,
    pub rank: usize,
    pub domain_dim: usize,
    pub codomain_dim: usize,
}

impl KernelImage {
    /// `rank + nullity == dim(domain)`; false only through rounding trouble.
    pub fn rank_nullity_holds(&self) -> bool {
        self.rank + self.nullity == self.domain_dim
    }

    /// True when the kernel is `{0}` and `kernel` holds only the zero vector.
    pub fn kernel_is_trivial(&self) -> bool {
        self.nullity == 0
    }
}

pub fn kernel_and_image(a: &Matrix, eps: f64) -> KernelImage {
    let (m, n) = a.dimensions();
    let kernel = null_space_basis(a, eps);
    let image = column_space_basis(a, eps);
    KernelImage {
        nullity: nullity(&kernel, eps),
        rank: image.len(),
        kernel,
        image,
        domain_dim: n,
        codomain_dim: m,
    }
}

/// The matrix whose columns are `vectors`.
pub fn basis_matrix(vectors: &[Vector]) -> Result<Matrix, LinalgError> {
    Matrix::from_columns(vectors)
}

fn invert_basis(p: &Matrix, which: BasisRole, eps: f64) -> Result<Matrix, TaskError> {
    inverse(p, eps).map_err(|e| match e {
        LinalgError::SingularMatrix { .. } => {
            log::debug!("basis {} rejected: {}", which, e);
            TaskError::InvalidBasis { which }
        }
        other => TaskError::Linalg(other),
    })
}

/// Matrix of `T` with respect to `beta` (domain) and `gamma` (codomain):
/// `[T]_{γ←β} = P_γ⁻¹ · A · P_β`, where the columns of `P_β` and `P_γ` are
/// the basis vectors.
///
/// # Errors
///
/// * `InvalidBasis` if either basis matrix is singular (gamma is checked first).
/// * `Linalg` for non-square basis matrices or shapes that do not chain.
pub fn change_of_basis(
    a: &Matrix,
    p_beta: &Matrix,
    p_gamma: &Matrix,
    eps: f64,
) -> Result<Matrix, TaskError> {
    let p_gamma_inv = invert_basis(p_gamma, BasisRole::Gamma, eps)?;
    invert_basis(p_beta, BasisRole::Beta, eps)?;

    let a_beta = a.multiply(p_beta)?;
    Ok(p_gamma_inv.multiply(&a_beta)?)
}

/// How the eigenvalues of an [`EigenAnalysis`] were obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EigenMethod {
    /// Trace/determinant formula (2x2).
    ClosedForm,
    /// Unshifted QR iteration (3x3).
    QrIteration { iterations: usize },
}

/// Eigenspace basis: real vectors for real eigenvalues, complex ones otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum Eigenvectors {
    Real(Basis),
    Complex(Vec<ComplexVector>),
}

impl Eigenvectors {
    pub fn len(&self) -> usize {
        match self {
            Eigenvectors::Real(basis) => basis.len(),
            Eigenvectors::Complex(basis) => basis.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_real(&self) -> Option<&Basis> {
        match self {
            Eigenvectors::Real(basis) => Some(basis),
            Eigenvectors::Complex(_) => None,
        }
    }

    pub fn as_complex(&self) -> Option<&[ComplexVector]> {
        match self {
            Eigenvectors::Complex(basis) => Some(basis),
            Eigenvectors::Real(_) => None,
        }
    }
}

/// One distinct eigenvalue and a basis of its eigenspace.
///
/// An empty basis means no eigenvector was found because the approximate
/// value is too far off.
#[derive(Debug, Clone, PartialEq)]
pub struct Eigenspace {
    pub eigenvalue: Complex64,
    pub basis: Eigenvectors,
}

impl Eigenspace {
    pub fn dimension(&self) -> usize {
        self.basis.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EigenAnalysis {
    /// Every eigenvalue as computed, repeats included. Imaginary parts below
    /// `eigenvector_eps` are set to exactly zero.
    pub eigenvalues: Vec<Complex64>,
    pub method: EigenMethod,
    /// One entry per distinct eigenvalue, in order of first appearance.
    pub eigenspaces: Vec<Eigenspace>,
}

/// Eigenvalues and eigenspaces of a 2x2 or 3x3 operator.
pub fn eigen_analysis(a: &Matrix, config: &EngineConfig) -> Result<EigenAnalysis, TaskError> {
    if !a.is_square() {
        return Err(LinalgError::NotSquare {
            op: "eigen_analysis",
            rows: a.nrows(),
            cols: a.ncols(),
        }
        .into());
    }

    let (eigenvalues, method) = match a.nrows() {
        2 => (eigenvalues_2x2(a)?.to_vec(), EigenMethod::ClosedForm),
        3 => (
            eigenvalues_3x3_qr(a, config.qr_iterations)?
                .iter()
                .map(|&x| Complex64::new(x, 0.0))
                .collect(),
            EigenMethod::QrIteration {
                iterations: config.qr_iterations,
            },
        ),
        n => return Err(TaskError::UnsupportedSize { n }),
    };

    let eigenvalues: Vec<Complex64> = eigenvalues
        .into_iter()
        .map(|z| {
            if is_near_zero(z.im, config.eigenvector_eps) {
                Complex64::new(z.re, 0.0)
            } else {
                z
            }
        })
        .collect();

    let mut eigenspaces = Vec::new();
    for eigenvalue in distinct_eigenvalues(&eigenvalues, config.eigenvalue_merge_tol) {
        let basis = if eigenvalue.im == 0.0 {
            Eigenvectors::Real(eigenvectors_for(a, eigenvalue.re, config.eigenvector_eps)?)
        } else {
            Eigenvectors::Complex(eigenvectors_for_complex(
                a,
                eigenvalue,
                config.eigenvector_eps,
            )?)
        };
        eigenspaces.push(Eigenspace { eigenvalue, basis });
    }

    Ok(EigenAnalysis {
        eigenvalues,
        method,
        eigenspaces,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tolerance::DEFAULT_EPS;

    fn is_orthogonal(u: &Vector, v: &Vector) -> bool {
        u.dot(v).abs() < 1e-12
    }

    #[test]
    fn plane_through_origin() {
        let plane = plane_basis(1.0, 2.0, 3.0, DEFAULT_EPS);
        assert_eq!(plane.dimension, 2);
        assert_eq!(plane.basis[0].to_vec(), vec![-2.0, 1.0, 0.0]);
        for u in &plane.basis {
            assert!(is_orthogonal(u, &plane.normal));
        }
        assert!(plane.basis[1].norm() > 0.0);
    }

    #[test]
    fn horizontal_plane_uses_e1() {
        let plane = plane_basis(0.0, 0.0, 5.0, DEFAULT_EPS);
        assert_eq!(plane.basis[0].to_vec(), vec![1.0, 0.0, 0.0]);
        assert_eq!(plane.basis[1].to_vec(), vec![0.0, 5.0, 0.0]);
    }

    #[test]
    fn zero_equation_is_whole_space() {
        let plane = plane_basis(0.0, 0.0, 0.0, DEFAULT_EPS);
        assert!(plane.is_whole_space());
        assert_eq!(plane.basis.len(), 3);
    }

    #[test]
    fn singular_gamma_reported_before_beta() {
        let a = Matrix::identity(2);
        let singular = Matrix::from_rows(&[[1.0, 2.0], [2.0, 4.0]]).unwrap();
        let err = change_of_basis(&a, &singular, &singular, DEFAULT_EPS).unwrap_err();
        assert_eq!(
            err,
            TaskError::InvalidBasis {
                which: BasisRole::Gamma
            }
        );
    }

    #[test]
    fn unsupported_operator_size() {
        let a = Matrix::identity(4);
        let err = eigen_analysis(&a, &EngineConfig::default()).unwrap_err();
        assert_eq!(err, TaskError::UnsupportedSize { n: 4 });
    }

    #[test]
    fn tiny_imaginary_parts_are_treated_as_real() {
        // eigenvalues ±1e-10 i, below eigenvector_eps
        let a = Matrix::from_rows(&[[0.0, -1e-10], [1e-10, 0.0]]).unwrap();
        let analysis = eigen_analysis(&a, &EngineConfig::default()).unwrap();
        assert!(analysis.eigenvalues.iter().all(|z| z.im == 0.0));
        assert_eq!(analysis.eigenspaces.len(), 1);
        let basis = analysis.eigenspaces[0].basis.as_real().unwrap();
        assert_eq!(basis.len(), 2);
    }

    #[test]
    fn complex_eigenvalues_get_complex_eigenvectors() {
        let a = Matrix::from_rows(&[[0.0, -1.0], [1.0, 0.0]]).unwrap();
        let analysis = eigen_analysis(&a, &EngineConfig::default()).unwrap();
        assert_eq!(analysis.eigenspaces.len(), 2);
        for space in &analysis.eigenspaces {
            assert!(space.basis.as_real().is_none());
            assert_eq!(space.dimension(), 1);
        }
    }
}
