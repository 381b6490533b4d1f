use ndarray::ShapeError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReshuffleError {
    #[error("Dimension mismatch: declared dimensions hold {expected} elements, matrix holds {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },

    #[error("Inner dimensions do not agree: {left} columns against {right} rows")]
    InnerDimensionMismatch { left: usize, right: usize },

    #[error("Invalid permutation: {0}")]
    InvalidPermutation(String),

    #[error("Array layout error: {0}")]
    Layout(#[from] ShapeError),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChannelError {
    #[error("Channel must have at least one Kraus operator")]
    Empty,

    #[error(
        "Kraus operator {index} has shape {got:?}, expected {expected:?}: all operators must share one shape"
    )]
    OperatorShapeMismatch {
        index: usize,
        expected: (usize, usize),
        got: (usize, usize),
    },

    #[error("Kraus operators do not sum to Identity (Trace preserving relation failed)")]
    NotTracePreserving,

    #[error("Invalid probability: {0}. Must be between 0.0 and 1.0")]
    InvalidProbability(f64),

    #[error("Dimension mismatch: expected {expected}x{expected}, got {got_rows}x{got_cols}")]
    DimensionMismatch {
        expected: usize,
        got_rows: usize,
        got_cols: usize,
    },

    #[error("Reshuffle error: {0}")]
    Reshuffle(#[from] ReshuffleError),
}
