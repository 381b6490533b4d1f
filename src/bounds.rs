//! Capacity bound for epsilon-degradable channels.
//!
//! For a channel that is `eps`-degradable with an environment of dimension
//! `dc`, the quantum capacity exceeds the coherent information by at most
//!
//! ```text
//! eps*log2(dc - 1)/2 + eps*log2(dc) + h(eps/2) + (1 + eps/2)*h(eps/(2 + eps))
//! ```
//!
//! where `h` is the binary entropy in bits.

use tracing::{debug, warn};

/// Binary entropy `-x log2(x) - (1 - x) log2(1 - x)`.
///
/// Defined as `0` at both endpoints. Arguments outside `[0, 1]` give `NaN`.
pub fn binary_entropy(x: f64) -> f64 {
    if x == 0.0 || x == 1.0 {
        return 0.0;
    }
    -x * x.log2() - (1.0 - x) * (1.0 - x).log2()
}

/// Upper bound on the gap between the quantum capacity and the coherent
/// information of an `eps`-degradable channel with environment dimension `dc`.
///
/// `eps` is not range checked. For `dc <= 1` the bound is undefined; a warning
/// is logged and `0.0` is returned.
pub fn capacity_gap_bound(eps: f64, dc: usize) -> f64 {
    if dc <= 1 {
        warn!(dc, "Environment dimension must be greater than one, returning zero");
        return 0.0;
    }

    let dc = dc as f64;
    let dims_term = eps * (dc - 1.0).log2() / 2.0 + eps * dc.log2();
    let entropy_term =
        binary_entropy(eps / 2.0) + (1.0 + eps / 2.0) * binary_entropy(eps / (2.0 + eps));

    debug!(eps, dims_term, entropy_term, "capacity gap bound");

    dims_term + entropy_term
}
