//! Utility functions for channel matrices.
//!
//! This module contains helper functions for:
//! - Matrix operations (conjugate transpose, Kronecker product, trace).
//! - Hermiticity and positivity checks on Choi matrices.
//! - Completeness checks for Kraus operators.

use nalgebra::DMatrix;
use ndarray::Array2;
use num_complex::Complex64;

/// Tolerance used by the checks in this crate unless the caller supplies one.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Conjugate transpose $A^\dagger$.
pub fn dagger(mat: &Array2<Complex64>) -> Array2<Complex64> {
    mat.t().mapv(|c| c.conj())
}

/// Computes the Kronecker (Tensor) product of two matrices.
///
/// If `A` is an $m \times n$ matrix and `B` is a $p \times q$ matrix,
/// the result is an $mp \times nq$ matrix.
pub fn kronecker_product(a: &Array2<Complex64>, b: &Array2<Complex64>) -> Array2<Complex64> {
    ndarray::linalg::kron(a, b)
}

/// Computes the trace of a matrix (sum of diagonal elements).
pub fn trace(matrix: &Array2<Complex64>) -> Complex64 {
    matrix.diag().sum()
}

/// Largest elementwise distance between two matrices of the same shape.
///
/// Returns `f64::INFINITY` when the shapes differ.
pub fn max_abs_diff(a: &Array2<Complex64>, b: &Array2<Complex64>) -> f64 {
    if a.dim() != b.dim() {
        return f64::INFINITY;
    }
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).norm())
        .fold(0.0, f64::max)
}

/// Checks the trace preserving relation for Kraus operators.
///
/// Verifies if $\sum K_i^\dagger K_i = I$ on the input space. Operators may be
/// rectangular (`output x input`).
pub fn check_completeness(ops: &[Array2<Complex64>], tol: f64) -> bool {
    let Some(first) = ops.first() else {
        return false;
    };
    let dim = first.ncols();

    let sum = ops
        .iter()
        .fold(Array2::<Complex64>::zeros((dim, dim)), |acc, op| {
            acc + dagger(op).dot(op)
        });
    max_abs_diff(&sum, &Array2::eye(dim)) < tol
}

/// Checks if a matrix is Hermitian
pub fn is_hermitian(mat: &Array2<Complex64>, tol: f64) -> bool {
    mat.is_square()
        && mat
            .iter()
            .zip(mat.t().iter())
            .all(|(a, b)| (a - b.conj()).norm() < tol)
}

/// Eigenvalues of a Hermitian matrix in no particular order.
///
/// Only the Hermitian part of `mat` is used. Panics if `mat` is not square.
pub fn hermitian_eigenvalues(mat: &Array2<Complex64>) -> Vec<f64> {
    let (rows, cols) = mat.dim();

    // Convert ndarray -> nalgebra
    let na_mat = DMatrix::from_fn(rows, cols, |r, c| mat[[r, c]]);

    na_mat.symmetric_eigenvalues().iter().copied().collect()
}

/// Checks if a matrix is Hermitian with no eigenvalue below `-tol`.
pub fn is_positive_semidefinite(mat: &Array2<Complex64>, tol: f64) -> bool {
    is_hermitian(mat, tol) && hermitian_eigenvalues(mat).iter().all(|&v| v >= -tol)
}
