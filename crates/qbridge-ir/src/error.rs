//! Error types for the IR crate.

use crate::qubit::TargetQubit;
use thiserror::Error;

/// Errors that can occur when building IR values.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Gate applied to the wrong number of qubits.
    #[error("Gate '{gate}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate: String,
        /// Expected number of qubits.
        expected: usize,
        /// Actual number of qubits provided.
        got: usize,
    },

    /// Device declared without any qubits.
    #[error("Device '{0}' has no qubits")]
    EmptyDevice(String),

    /// Same target qubit listed twice.
    #[error("Duplicate qubit {0} in device")]
    DuplicateQubit(TargetQubit),

    /// Circuit (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
