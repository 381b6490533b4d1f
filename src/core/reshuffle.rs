//! Tensor reindexing for matrices with tensor-product structure.
//!
//! A `D x D` matrix over a product space is read as a flattened tensor whose
//! axes are the row subsystems followed by the column subsystems. Reshuffling
//! permutes those axes and flattens the result back into a matrix of the
//! original shape.
//!
//! The flattening order is always explicit. Every converter in this crate uses
//! [`Order::RowMajor`], so an entry `M[(a, b), (c, d)]` of a matrix over
//! `A ⊗ B` sits at tensor index `[a, b, c, d]`.

use crate::core::errors::ReshuffleError;
use ndarray::{Array2, LinalgScalar};

pub use ndarray::Order;

/// Matrix-like values that support the operations the channel converters need.
///
/// Implemented for dense `ndarray` matrices. A symbolic or affine expression
/// type can implement it as well and then flows through every converter in
/// [`crate::representations`] unchanged.
pub trait Reshuffle: Sized {
    /// Returns `(rows, cols)`.
    fn dimensions(&self) -> (usize, usize);

    fn transposed(&self) -> Self;

    /// Reinterprets the elements, read in `order`, as a matrix of `shape`.
    fn reshaped(&self, shape: (usize, usize), order: Order) -> Result<Self, ReshuffleError>;

    /// Views the matrix as a tensor with axis sizes `dims` (read in `order`),
    /// permutes the axes as described by `permutation` and flattens back to
    /// the original shape.
    ///
    /// `permutation` is a string of distinct lowercase letters, one per axis.
    /// The source axes carry the same letters in sorted order and the output
    /// axes appear in the order given, so `"ikjl"` swaps axes 1 and 2.
    fn reshuffled(
        &self,
        permutation: &str,
        dims: &[usize],
        order: Order,
    ) -> Result<Self, ReshuffleError>;

    /// Matrix product `self * rhs`.
    fn matmul(&self, rhs: &Self) -> Result<Self, ReshuffleError>;
}

impl<A: LinalgScalar> Reshuffle for Array2<A> {
    fn dimensions(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }

    fn transposed(&self) -> Self {
        self.t().to_owned()
    }

    fn reshaped(&self, shape: (usize, usize), order: Order) -> Result<Self, ReshuffleError> {
        let expected = shape.0 * shape.1;
        if expected != self.len() {
            return Err(ReshuffleError::DimensionMismatch {
                expected,
                got: self.len(),
            });
        }

        Ok(self.to_shape((shape, order))?.into_owned())
    }

    fn reshuffled(
        &self,
        permutation: &str,
        dims: &[usize],
        order: Order,
    ) -> Result<Self, ReshuffleError> {
        let axes = parse_permutation(permutation, dims.len())?;

        let expected: usize = dims.iter().product();
        if expected != self.len() {
            return Err(ReshuffleError::DimensionMismatch {
                expected,
                got: self.len(),
            });
        }

        let tensor = self.to_shape((dims.to_vec(), order))?;
        let permuted = tensor.permuted_axes(axes);

        // Flattening a permuted view copies in the requested logical order
        let matrix = permuted.to_shape(((self.nrows(), self.ncols()), order))?;
        Ok(matrix.into_owned())
    }

    fn matmul(&self, rhs: &Self) -> Result<Self, ReshuffleError> {
        if self.ncols() != rhs.nrows() {
            return Err(ReshuffleError::InnerDimensionMismatch {
                left: self.ncols(),
                right: rhs.nrows(),
            });
        }
        Ok(self.dot(rhs))
    }
}

/// Reshuffles `matrix` through the [`Reshuffle`] capability.
pub fn reshuffle<M: Reshuffle>(
    matrix: &M,
    permutation: &str,
    dims: &[usize],
    order: Order,
) -> Result<M, ReshuffleError> {
    matrix.reshuffled(permutation, dims, order)
}

/// Fails unless `matrix` has exactly `expected` shape.
pub fn check_shape<M: Reshuffle>(
    matrix: &M,
    expected: (usize, usize),
) -> Result<(), ReshuffleError> {
    let got = matrix.dimensions();
    if got != expected {
        return Err(ReshuffleError::ShapeMismatch { expected, got });
    }
    Ok(())
}

/// Translates a label string into the axis order expected by `permuted_axes`.
fn parse_permutation(permutation: &str, num_axes: usize) -> Result<Vec<usize>, ReshuffleError> {
    let labels: Vec<char> = permutation.chars().collect();

    if labels.len() != num_axes {
        return Err(ReshuffleError::InvalidPermutation(format!(
            "'{permutation}' names {} axes but {num_axes} dimensions were declared",
            labels.len()
        )));
    }

    if let Some(bad) = labels.iter().find(|c| !c.is_ascii_lowercase()) {
        return Err(ReshuffleError::InvalidPermutation(format!(
            "'{permutation}' contains '{bad}', labels must be lowercase letters"
        )));
    }

    let mut sorted = labels.clone();
    sorted.sort_unstable();
    sorted.dedup();
    if sorted.len() != labels.len() {
        return Err(ReshuffleError::InvalidPermutation(format!(
            "'{permutation}' repeats a label"
        )));
    }

    // Output axis n is the source axis whose label is labels[n]
    Ok(labels
        .iter()
        .filter_map(|label| sorted.binary_search(label).ok())
        .collect())
}
