use crate::core::errors::ChannelError;
use crate::core::representations::{check_kraus_shapes, kraus_to_choi};
use crate::core::utils::{self, DEFAULT_TOLERANCE};
use ndarray::{Array2, array, s};
use num_complex::Complex64;

/// Optional checks applied when building a [`QuantumChannel`].
///
/// The default trusts the caller and only validates shapes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValidationOptions {
    /// Require $\sum K_i^\dagger K_i = I$.
    pub check_trace_preserving: bool,
    pub tolerance: f64,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            check_trace_preserving: false,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl ValidationOptions {
    /// Options that also enforce the trace preserving relation.
    pub fn strict() -> Self {
        Self {
            check_trace_preserving: true,
            ..Self::default()
        }
    }
}

/// A quantum channel in Kraus form.
///
/// Every operator is `output_dim x input_dim`; the number of operators is the
/// dimension of the environment.
#[derive(Clone, Debug)]
pub struct QuantumChannel {
    pub kraus_ops: Vec<Array2<Complex64>>,
    pub input_dim: usize,
    pub output_dim: usize,
}

impl QuantumChannel {
    /// Builds a channel from Kraus operators, checking only that they exist and
    /// share one shape.
    pub fn new(kraus_ops: Vec<Array2<Complex64>>) -> Result<Self, ChannelError> {
        Self::new_validated(kraus_ops, &ValidationOptions::default())
    }

    pub fn new_validated(
        kraus_ops: Vec<Array2<Complex64>>,
        options: &ValidationOptions,
    ) -> Result<Self, ChannelError> {
        let (output_dim, input_dim) = check_kraus_shapes(&kraus_ops)?;

        if options.check_trace_preserving
            && !utils::check_completeness(&kraus_ops, options.tolerance)
        {
            return Err(ChannelError::NotTracePreserving);
        }

        Ok(Self {
            kraus_ops,
            input_dim,
            output_dim,
        })
    }

    /// Number of Kraus operators (the Choi rank when they are independent).
    pub fn env_dim(&self) -> usize {
        self.kraus_ops.len()
    }

    pub fn is_trace_preserving(&self, tol: f64) -> bool {
        utils::check_completeness(&self.kraus_ops, tol)
    }

    /// Choi-Jamiolkowski matrices of this channel and of its complement.
    pub fn choi_matrices(&self) -> Result<(Array2<Complex64>, Array2<Complex64>), ChannelError> {
        kraus_to_choi(&self.kraus_ops)
    }

    /// The complementary channel, mapping the input to the environment.
    ///
    /// Its operators are indexed by the output: $(K^c_j)_{ik} = (K_i)_{jk}$.
    pub fn complementary(&self) -> QuantumChannel {
        let env = self.env_dim();
        let kraus_ops = (0..self.output_dim)
            .map(|j| {
                Array2::from_shape_fn((env, self.input_dim), |(i, k)| self.kraus_ops[i][[j, k]])
            })
            .collect();

        QuantumChannel {
            kraus_ops,
            input_dim: self.input_dim,
            output_dim: env,
        }
    }

    /// Applies the channel: $\rho \mapsto \sum_i K_i \rho K_i^\dagger$.
    pub fn apply(&self, rho: &Array2<Complex64>) -> Result<Array2<Complex64>, ChannelError> {
        let (rows, cols) = rho.dim();
        if rows != self.input_dim || cols != self.input_dim {
            return Err(ChannelError::DimensionMismatch {
                expected: self.input_dim,
                got_rows: rows,
                got_cols: cols,
            });
        }

        let out = self.kraus_ops.iter().fold(
            Array2::<Complex64>::zeros((self.output_dim, self.output_dim)),
            |acc, k| acc + k.dot(rho).dot(&utils::dagger(k)),
        );
        Ok(out)
    }

    /// Composes the current QuantumChannel with another one applied afterwards
    pub fn compose(&self, other: &QuantumChannel) -> Result<QuantumChannel, ChannelError> {
        if self.output_dim != other.input_dim {
            return Err(ChannelError::DimensionMismatch {
                expected: self.output_dim,
                got_rows: other.input_dim,
                got_cols: other.input_dim,
            });
        }

        let new_ops: Vec<_> = other
            .kraus_ops
            .iter()
            .flat_map(|op_b| self.kraus_ops.iter().map(move |op_a| op_b.dot(op_a)))
            .collect();

        Ok(QuantumChannel {
            kraus_ops: new_ops,
            input_dim: self.input_dim,
            output_dim: other.output_dim,
        })
    }

    /// Parallel composition: the channel acting as `self ⊗ other`.
    pub fn tensor(&self, other: &QuantumChannel) -> QuantumChannel {
        let kraus_ops = self
            .kraus_ops
            .iter()
            .flat_map(|a| {
                other
                    .kraus_ops
                    .iter()
                    .map(move |b| utils::kronecker_product(a, b))
            })
            .collect();

        QuantumChannel {
            kraus_ops,
            input_dim: self.input_dim * other.input_dim,
            output_dim: self.output_dim * other.output_dim,
        }
    }

    /// Identity channel on a `dim`-dimensional space.
    pub fn identity(dim: usize) -> QuantumChannel {
        QuantumChannel {
            kraus_ops: vec![Array2::eye(dim)],
            input_dim: dim,
            output_dim: dim,
        }
    }

    /// Channel with a single (isometric or unitary) Kraus operator.
    pub fn isometry(op: Array2<Complex64>) -> Result<QuantumChannel, ChannelError> {
        QuantumChannel::new_validated(vec![op], &ValidationOptions::strict())
    }

    /// Bit Flip Channel -> X
    pub fn bit_flip(p: f64) -> Result<QuantumChannel, ChannelError> {
        validate_prob(p)?;

        let k0 = pauli_i().mapv(|x| x * (1.0 - p).sqrt());
        let k1 = pauli_x().mapv(|x| x * p.sqrt());

        QuantumChannel::new(vec![k0, k1])
    }

    /// Phase Flip Channel -> Z
    pub fn phase_flip(p: f64) -> Result<QuantumChannel, ChannelError> {
        validate_prob(p)?;

        let k0 = pauli_i().mapv(|x| x * (1.0 - p).sqrt());
        let k1 = pauli_z().mapv(|x| x * p.sqrt());

        QuantumChannel::new(vec![k0, k1])
    }

    /// Depolarizing Channel
    /// The state is replaced by the maximally mixed one with probability p
    pub fn depolarizing(p: f64) -> Result<QuantumChannel, ChannelError> {
        validate_prob(p)?;

        let weight_i = (1.0 - 0.75 * p).sqrt();
        let weight_xyz = (p / 4.0).sqrt();

        QuantumChannel::new(vec![
            pauli_i().mapv(|x| x * weight_i),
            pauli_x().mapv(|x| x * weight_xyz),
            pauli_y().mapv(|x| x * weight_xyz),
            pauli_z().mapv(|x| x * weight_xyz),
        ])
    }

    /// Amplitude Damping -> T1 relaxation
    pub fn amplitude_damping(gamma: f64) -> Result<QuantumChannel, ChannelError> {
        validate_prob(gamma)?;

        let mut k0 = Array2::<Complex64>::zeros((2, 2));
        k0[[0, 0]] = Complex64::new(1.0, 0.0);
        k0[[1, 1]] = Complex64::new((1.0 - gamma).sqrt(), 0.0);

        let mut k1 = Array2::<Complex64>::zeros((2, 2));
        k1[[0, 1]] = Complex64::new(gamma.sqrt(), 0.0);

        QuantumChannel::new(vec![k0, k1])
    }

    /// Phase Damping -> T2 relaxation
    pub fn phase_damping(lambda: f64) -> Result<QuantumChannel, ChannelError> {
        validate_prob(lambda)?;

        let mut k0 = Array2::<Complex64>::zeros((2, 2));
        k0[[0, 0]] = Complex64::new(1.0, 0.0);
        k0[[1, 1]] = Complex64::new((1.0 - lambda).sqrt(), 0.0);

        let mut k1 = Array2::<Complex64>::zeros((2, 2));
        k1[[1, 1]] = Complex64::new(lambda.sqrt(), 0.0);

        QuantumChannel::new(vec![k0, k1])
    }

    /// Qubit erasure: the input survives with probability `1 - p` and is
    /// otherwise replaced by the flag state `|2>` of a qutrit.
    pub fn erasure(p: f64) -> Result<QuantumChannel, ChannelError> {
        validate_prob(p)?;

        let mut keep = Array2::<Complex64>::zeros((3, 2));
        keep.slice_mut(s![0..2, ..])
            .assign(&pauli_i().mapv(|x| x * (1.0 - p).sqrt()));

        let erase = (0..2)
            .map(|k| {
                let mut op = Array2::<Complex64>::zeros((3, 2));
                op[[2, k]] = Complex64::new(p.sqrt(), 0.0);
                op
            })
            .collect::<Vec<_>>();

        let mut ops = vec![keep];
        ops.extend(erase);
        QuantumChannel::new(ops)
    }
}

fn pauli_i() -> Array2<Complex64> {
    Array2::eye(2)
}

fn pauli_x() -> Array2<Complex64> {
    array![
        [Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)],
        [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)]
    ]
}

fn pauli_y() -> Array2<Complex64> {
    array![
        [Complex64::new(0.0, 0.0), Complex64::new(0.0, -1.0)],
        [Complex64::new(0.0, 1.0), Complex64::new(0.0, 0.0)]
    ]
}

fn pauli_z() -> Array2<Complex64> {
    array![
        [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
        [Complex64::new(0.0, 0.0), Complex64::new(-1.0, 0.0)]
    ]
}

/// Validate probability parameter
fn validate_prob(p: f64) -> Result<(), ChannelError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(ChannelError::InvalidProbability(p));
    }
    Ok(())
}
