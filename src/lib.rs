pub mod bounds;
mod core;

pub use crate::bounds::{binary_entropy, capacity_gap_bound};
pub use crate::core::representations::{
    apply_transfer, choi_to_transfer, compose_in_series, kraus_to_choi, swap_last_two_subsystems,
    transfer_to_choi,
};
pub use crate::core::reshuffle::reshuffle;
pub use crate::core::{
    Order, QuantumChannel, Reshuffle, ValidationOptions, errors, representations, utils,
};
