//! Failure modes of the stabilizer engine.

use thiserror::Error;
use crate::gate::Gate;

/// An input error raised before any row of a tableau is touched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimError {
    /// The gate has no update rule in the Clifford tableau engine.
    #[error("unsupported gate {gate}: not in the Clifford set {{X, Y, Z, H, S, S†, CX, CZ}}")]
    UnsupportedGate { gate: Gate },

    /// A qubit index is outside `0..n`, or a two-qubit gate names the same
    /// qubit twice.
    #[error("invalid qubit index {qubit} for a register of {n} qubits")]
    InvalidQubit { qubit: usize, n: usize },
}

pub type SimResult<T> = Result<T, SimError>;
