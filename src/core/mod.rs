mod channels;
pub mod errors;
pub mod representations;
pub mod reshuffle;
pub mod utils;

pub use channels::{QuantumChannel, ValidationOptions};
pub use reshuffle::{Order, Reshuffle};
