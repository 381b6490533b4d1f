//! Conversions between the Kraus, Choi-Jamiolkowski and transfer-matrix
//! representations of a quantum channel.
//!
//! Conventions for a channel `N` from an input space of dimension `da` to an
//! output space of dimension `db`, all flattened row-major:
//!
//! * Choi matrix, `(db*da) x (db*da)`:
//!   `J[(b1, a1), (b2, a2)] = <b1| N(|a1><a2|) |b2>`.
//! * Transfer matrix, `(db*db) x (da*da)`:
//!   `T[(b1, b2), (a1, a2)] = J[(b1, a1), (b2, a2)]`, so that
//!   `vec(N(rho)) = T vec(rho)` with `vec` stacking rows.
//!
//! Everything except [`kraus_to_choi`] is generic over [`Reshuffle`] and only
//! permutes, reshapes and multiplies its inputs.

use crate::core::errors::{ChannelError, ReshuffleError};
use crate::core::reshuffle::{Order, Reshuffle, check_shape};
use ndarray::{Array2, ArrayView2, Axis, stack};
use num_complex::Complex64;
use tracing::trace;

/// Choi-Jamiolkowski matrices of a channel given by its Kraus operators and of
/// its complementary channel.
///
/// The operators are read as a tensor `K[i, j, k]` of shape `(dc, db, da)`
/// (environment, output, input). The direct channel contracts the environment
/// index, `J_BA[(j, k), (s, t)] = sum_i K[i, j, k] conj(K[i, s, t])`, and the
/// complementary channel contracts the output index,
/// `J_CA[(i, k), (r, t)] = sum_j K[i, j, k] conj(K[r, j, t])`.
///
/// Returns `(J_BA, J_CA)` of sizes `(db*da)^2` and `(dc*da)^2`. Completeness
/// is not checked here; see [`crate::QuantumChannel::new_validated`].
///
/// # Errors
///
/// * [`ChannelError::Empty`] if there are no operators.
/// * [`ChannelError::OperatorShapeMismatch`] if the operators differ in shape.
pub fn kraus_to_choi(
    kraus_ops: &[Array2<Complex64>],
) -> Result<(Array2<Complex64>, Array2<Complex64>), ChannelError> {
    let (db, da) = check_kraus_shapes(kraus_ops)?;
    let dc = kraus_ops.len();

    let views: Vec<ArrayView2<Complex64>> = kraus_ops.iter().map(|op| op.view()).collect();
    // (dc, db, da)
    let tensor = stack(Axis(0), &views).map_err(ReshuffleError::from)?;

    // Rows indexed by the environment, columns by (output, input)
    let by_env = tensor.to_shape((dc, db * da)).map_err(ReshuffleError::from)?;
    let cj_ba = by_env.t().dot(&by_env.mapv(|c| c.conj()));

    // Rows indexed by the output, columns by (environment, input)
    let output_first = tensor.view().permuted_axes([1, 0, 2]);
    let by_out = output_first
        .to_shape(((db, dc * da), Order::RowMajor))
        .map_err(ReshuffleError::from)?;
    let cj_ca = by_out.t().dot(&by_out.mapv(|c| c.conj()));

    trace!(dc, db, da, "built Choi matrices from Kraus operators");

    Ok((cj_ba, cj_ca))
}

/// Checks that the sequence is non-empty and rectangular, returning the
/// common `(output, input)` shape.
pub(crate) fn check_kraus_shapes(
    kraus_ops: &[Array2<Complex64>],
) -> Result<(usize, usize), ChannelError> {
    let first = kraus_ops.first().ok_or(ChannelError::Empty)?;
    let expected = first.dim();

    for (index, op) in kraus_ops.iter().enumerate() {
        if op.dim() != expected {
            return Err(ChannelError::OperatorShapeMismatch {
                index,
                expected,
                got: op.dim(),
            });
        }
    }

    Ok(expected)
}

/// Transfer matrix of a channel from its Choi matrix.
///
/// `choi` must be `(db*da) x (db*da)`; the result is `(db*db) x (da*da)`.
pub fn choi_to_transfer<M: Reshuffle>(
    choi: &M,
    da: usize,
    db: usize,
) -> Result<M, ReshuffleError> {
    check_shape(choi, (db * da, db * da))?;
    trace!(da, db, "Choi -> transfer");

    choi.reshuffled("ikjl", &[db, da, db, da], Order::RowMajor)?
        .reshaped((db * db, da * da), Order::RowMajor)
}

/// Choi matrix of a channel from its transfer matrix. Inverse of
/// [`choi_to_transfer`].
///
/// `transfer` must be `(db*db) x (da*da)`; the result is `(db*da) x (db*da)`.
pub fn transfer_to_choi<M: Reshuffle>(
    transfer: &M,
    da: usize,
    db: usize,
) -> Result<M, ReshuffleError> {
    check_shape(transfer, (db * db, da * da))?;
    trace!(da, db, "transfer -> Choi");

    transfer
        .reshuffled("ikjl", &[db, db, da, da], Order::RowMajor)?
        .reshaped((db * da, db * da), Order::RowMajor)
}

/// Choi matrix of `second ∘ first`, where `first` maps dimension `da` to `db`
/// and `second` maps `db` to `dc`.
///
/// Both channels are converted to transfer matrices, multiplied as
/// `T_second * T_first` and converted back.
///
/// # Errors
///
/// [`ReshuffleError::ShapeMismatch`] if either Choi matrix does not match the
/// declared dimensions, which includes an output dimension of `first` that
/// disagrees with the input dimension of `second`.
pub fn compose_in_series<M: Reshuffle>(
    first: &M,
    second: &M,
    da: usize,
    db: usize,
    dc: usize,
) -> Result<M, ReshuffleError> {
    let t_ba = choi_to_transfer(first, da, db)?;
    let t_cb = choi_to_transfer(second, db, dc)?;
    let t_ca = t_cb.matmul(&t_ba)?;
    transfer_to_choi(&t_ca, da, dc)
}

/// Exchanges the last two subsystems of an operator on `A ⊗ B ⊗ B`.
///
/// `rho` must be `(da*db*db)` square. The result satisfies
/// `out[(a, b2, b1), (a', b2', b1')] = rho[(a, b1, b2), (a', b1', b2')]`,
/// and applying the swap twice returns the input.
pub fn swap_last_two_subsystems<M: Reshuffle>(
    rho: &M,
    da: usize,
    db: usize,
) -> Result<M, ReshuffleError> {
    let d = da * db * db;
    check_shape(rho, (d, d))?;

    rho.reshuffled("ikjlnm", &[da, db, db, da, db, db], Order::RowMajor)
}

/// Applies a channel given by its transfer matrix to `rho` (`da x da`),
/// returning the `db x db` output.
pub fn apply_transfer<M: Reshuffle>(
    transfer: &M,
    rho: &M,
    da: usize,
    db: usize,
) -> Result<M, ReshuffleError> {
    check_shape(transfer, (db * db, da * da))?;
    check_shape(rho, (da, da))?;

    let vec_rho = rho.reshaped((da * da, 1), Order::RowMajor)?;
    transfer
        .matmul(&vec_rho)?
        .reshaped((db, db), Order::RowMajor)
}
