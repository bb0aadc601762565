//! Error types for the translation crate.

use thiserror::Error;

use qbridge_ir::{IrError, QubitId};

/// Failure raised by the registry or by a rule while translating one command.
///
/// These never reach callers of the engine directly: the engine wraps them in
/// [`TranslateError::UnknownGate`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RuleError {
    /// No rule is registered for the gate type.
    #[error("No rule registered for gate '{0}'")]
    NoRule(String),

    /// A mapped position lies outside the target qubit collection.
    #[error("Qubit {qubit} maps to position {position}, but only {available} target qubits exist")]
    PositionOutOfRange {
        /// Source qubit being resolved.
        qubit: QubitId,
        /// Position it maps to.
        position: u32,
        /// Size of the target collection.
        available: usize,
    },

    /// Wrong number of target qubits for the gate.
    #[error("Gate '{gate}' expects {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Gate class name.
        gate: String,
        /// Expected number of qubits.
        expected: usize,
        /// Actual number of qubits.
        got: usize,
    },

    /// The rule has no translation for this many controls.
    #[error("Gate '{gate}' cannot be translated with {controls} control qubit(s)")]
    UnsupportedControls {
        /// Gate class name.
        gate: String,
        /// Number of controls on the command.
        controls: usize,
    },

    /// The target gate rejected its operands.
    #[error("IR error: {0}")]
    Ir(#[from] IrError),

    /// Failure raised by a user-supplied rule.
    #[error("{0}")]
    Custom(String),
}

/// Errors surfaced by the translation engine.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TranslateError {
    /// The gate has no rule, or its rule failed.
    ///
    /// Both causes produce the same message; the underlying failure is
    /// reachable through [`std::error::Error::source`].
    #[error("Gate {class} not known")]
    UnknownGate {
        /// Class name of the offending gate.
        class: String,
        /// The masked failure.
        #[source]
        cause: RuleError,
    },

    /// Neither a device nor an explicit qubit collection was given.
    #[error("Please specify one of qubits or device")]
    MissingQubitSource,

    /// Both a device and an explicit qubit collection were given.
    #[error("Specify only one of qubits or device, not both")]
    ConflictingQubitSources,

    /// Named rule extension does not exist.
    #[error("Unknown ruleset extension '{0}'")]
    UnknownExtension(String),

    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from the IR crate.
    #[error("IR error: {0}")]
    Ir(#[from] IrError),
}

impl TranslateError {
    /// Class name of the offending gate, for unknown-gate errors.
    pub fn gate_class(&self) -> Option<&str> {
        match self {
            TranslateError::UnknownGate { class, .. } => Some(class),
            _ => None,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// Reading the configuration file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid YAML for the schema.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_yaml_ng::Error),

    /// A value is out of range.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for translation operations.
pub type TranslateResult<T> = Result<T, TranslateError>;

/// Result type for a single rule invocation.
pub type RuleResult<T> = Result<T, RuleError>;
