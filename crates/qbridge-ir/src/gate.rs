//! Source-side gate types.
//!
//! A [`SourceGate`] is the operation carried by a command. Its parameter-free
//! [`GateType`] is what translation rules are registered under, so two
//! rotations with different angles share one rule.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Gates of the source command stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SourceGate {
    // Lifecycle and synchronization
    /// Qubit allocation.
    Allocate,
    /// Qubit deallocation.
    Deallocate,
    /// Barrier across the listed qubits.
    Barrier,
    /// Measurement in the computational basis.
    Measure,
    /// Synchronization marker: commit everything buffered so far.
    Flush,

    // Fixed single-qubit gates
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdag,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdag,
    /// sqrt(X) gate.
    SqrtX,

    // Fixed two-qubit gates
    /// SWAP gate.
    Swap,
    /// sqrt(SWAP) gate.
    SqrtSwap,

    // Parameterized single-qubit gates
    /// Rotation around X by an angle in radians.
    Rx(f64),
    /// Rotation around Y by an angle in radians.
    Ry(f64),
    /// Rotation around Z by an angle in radians.
    Rz(f64),
    /// Phase shift of |1⟩ by an angle in radians.
    R(f64),
    /// Global phase by an angle in radians.
    Ph(f64),

    // Xmon native gates
    /// Phased X rotation: half turns about an axis in the XY plane.
    ExpW {
        /// Rotation amount in half turns.
        half_turns: f64,
        /// Axis angle in half turns, measured from X towards Y.
        axis_half_turns: f64,
    },
    /// Z rotation in half turns.
    ExpZ {
        /// Rotation amount in half turns.
        half_turns: f64,
    },
    /// Phase on |11⟩ in half turns.
    Exp11 {
        /// Rotation amount in half turns.
        half_turns: f64,
    },

    /// Any other gate, identified by name.
    Custom {
        /// Name of the gate; doubles as its type.
        name: String,
        /// Gate parameters.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        params: Vec<f64>,
    },
}

impl SourceGate {
    /// Create a custom gate without parameters.
    pub fn custom(name: impl Into<String>) -> Self {
        SourceGate::Custom {
            name: name.into(),
            params: vec![],
        }
    }

    /// The parameter-free type of this gate.
    pub fn gate_type(&self) -> GateType {
        match self {
            SourceGate::Allocate => GateType::Allocate,
            SourceGate::Deallocate => GateType::Deallocate,
            SourceGate::Barrier => GateType::Barrier,
            SourceGate::Measure => GateType::Measure,
            SourceGate::Flush => GateType::Flush,
            SourceGate::X => GateType::X,
            SourceGate::Y => GateType::Y,
            SourceGate::Z => GateType::Z,
            SourceGate::H => GateType::H,
            SourceGate::S => GateType::S,
            SourceGate::Sdag => GateType::Sdag,
            SourceGate::T => GateType::T,
            SourceGate::Tdag => GateType::Tdag,
            SourceGate::SqrtX => GateType::SqrtX,
            SourceGate::Swap => GateType::Swap,
            SourceGate::SqrtSwap => GateType::SqrtSwap,
            SourceGate::Rx(_) => GateType::Rx,
            SourceGate::Ry(_) => GateType::Ry,
            SourceGate::Rz(_) => GateType::Rz,
            SourceGate::R(_) => GateType::R,
            SourceGate::Ph(_) => GateType::Ph,
            SourceGate::ExpW { .. } => GateType::ExpW,
            SourceGate::ExpZ { .. } => GateType::ExpZ,
            SourceGate::Exp11 { .. } => GateType::Exp11,
            SourceGate::Custom { name, .. } => GateType::Custom(name.clone()),
        }
    }

    /// Class name of this gate, as reported in errors.
    pub fn class_name(&self) -> &str {
        match self {
            SourceGate::Custom { name, .. } => name,
            other => other.gate_type().static_class_name(),
        }
    }

    /// Check if this is an allocation.
    pub fn is_allocate(&self) -> bool {
        matches!(self, SourceGate::Allocate)
    }

    /// Check if this is a deallocation.
    pub fn is_deallocate(&self) -> bool {
        matches!(self, SourceGate::Deallocate)
    }

    /// Check if this is a barrier.
    pub fn is_barrier(&self) -> bool {
        matches!(self, SourceGate::Barrier)
    }

    /// Check if this is a measurement.
    pub fn is_measure(&self) -> bool {
        matches!(self, SourceGate::Measure)
    }

    /// Check if this is the flush marker.
    pub fn is_flush(&self) -> bool {
        matches!(self, SourceGate::Flush)
    }

    /// Allocation, deallocation or barrier. Measurement is not included.
    pub fn is_lifecycle(&self) -> bool {
        matches!(
            self,
            SourceGate::Allocate | SourceGate::Deallocate | SourceGate::Barrier
        )
    }
}

impl fmt::Display for SourceGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceGate::Rx(a) => write!(f, "Rx({a})"),
            SourceGate::Ry(a) => write!(f, "Ry({a})"),
            SourceGate::Rz(a) => write!(f, "Rz({a})"),
            SourceGate::R(a) => write!(f, "R({a})"),
            SourceGate::Ph(a) => write!(f, "Ph({a})"),
            SourceGate::ExpW {
                half_turns,
                axis_half_turns,
            } => write!(f, "ExpW({half_turns}, {axis_half_turns})"),
            SourceGate::ExpZ { half_turns } => write!(f, "ExpZ({half_turns})"),
            SourceGate::Exp11 { half_turns } => write!(f, "Exp11({half_turns})"),
            SourceGate::Custom { name, params } if !params.is_empty() => {
                let params: Vec<String> = params.iter().map(ToString::to_string).collect();
                write!(f, "{name}({})", params.join(", "))
            }
            other => f.write_str(other.class_name()),
        }
    }
}

/// Type tag of a [`SourceGate`], used as the rule registry key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GateType {
    /// Qubit allocation.
    Allocate,
    /// Qubit deallocation.
    Deallocate,
    /// Scheduling barrier.
    Barrier,
    /// Measurement.
    Measure,
    /// End of a command batch.
    Flush,
    /// Pauli X.
    X,
    /// Pauli Y.
    Y,
    /// Pauli Z.
    Z,
    /// Hadamard.
    H,
    /// Phase gate S.
    S,
    /// Inverse of S.
    Sdag,
    /// T gate.
    T,
    /// Inverse of T.
    Tdag,
    /// Square root of X.
    SqrtX,
    /// Two-qubit swap.
    Swap,
    /// Square root of swap.
    SqrtSwap,
    /// Rotation about X.
    Rx,
    /// Rotation about Y.
    Ry,
    /// Rotation about Z.
    Rz,
    /// Relative phase shift.
    R,
    /// Global phase.
    Ph,
    /// Xmon W rotation.
    ExpW,
    /// Xmon Z rotation.
    ExpZ,
    /// Xmon controlled phase on |11>.
    Exp11,
    /// Custom gate type, keyed by gate name.
    Custom(String),
}

impl GateType {
    /// Class name of gates of this type.
    pub fn class_name(&self) -> &str {
        match self {
            GateType::Custom(name) => name,
            other => other.static_class_name(),
        }
    }

    fn static_class_name(&self) -> &'static str {
        match self {
            GateType::Allocate => "AllocateQubitGate",
            GateType::Deallocate => "DeallocateQubitGate",
            GateType::Barrier => "BarrierGate",
            GateType::Measure => "MeasureGate",
            GateType::Flush => "FlushGate",
            GateType::X => "XGate",
            GateType::Y => "YGate",
            GateType::Z => "ZGate",
            GateType::H => "HGate",
            GateType::S => "SGate",
            GateType::Sdag => "SdagGate",
            GateType::T => "TGate",
            GateType::Tdag => "TdagGate",
            GateType::SqrtX => "SqrtXGate",
            GateType::Swap => "SwapGate",
            GateType::SqrtSwap => "SqrtSwapGate",
            GateType::Rx => "Rx",
            GateType::Ry => "Ry",
            GateType::Rz => "Rz",
            GateType::R => "R",
            GateType::Ph => "Ph",
            GateType::ExpW => "ExpWGate",
            GateType::ExpZ => "ExpZGate",
            GateType::Exp11 => "Exp11Gate",
            GateType::Custom(_) => "CustomGate",
        }
    }
}

impl fmt::Display for GateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_parameters_do_not_change_type() {
        assert_eq!(SourceGate::Rx(PI).gate_type(), GateType::Rx);
        assert_eq!(
            SourceGate::Rx(PI).gate_type(),
            SourceGate::Rx(0.1).gate_type()
        );
        assert_ne!(SourceGate::Rx(PI).gate_type(), SourceGate::Ry(PI).gate_type());
    }

    #[test]
    fn test_custom_gate_type_keyed_by_name() {
        let a = SourceGate::custom("QFT");
        let b = SourceGate::Custom {
            name: "QFT".into(),
            params: vec![1.0],
        };
        assert_eq!(a.gate_type(), b.gate_type());
        assert_eq!(a.class_name(), "QFT");
        assert_ne!(a.gate_type(), SourceGate::custom("Oracle").gate_type());
    }

    #[test]
    fn test_class_names() {
        assert_eq!(SourceGate::X.class_name(), "XGate");
        assert_eq!(SourceGate::Rz(1.0).class_name(), "Rz");
        assert_eq!(SourceGate::Flush.class_name(), "FlushGate");
        assert_eq!(GateType::Allocate.to_string(), "AllocateQubitGate");
    }

    #[test]
    fn test_lifecycle_excludes_measure() {
        assert!(SourceGate::Allocate.is_lifecycle());
        assert!(SourceGate::Deallocate.is_lifecycle());
        assert!(SourceGate::Barrier.is_lifecycle());
        assert!(!SourceGate::Measure.is_lifecycle());
        assert!(!SourceGate::Flush.is_lifecycle());
        assert!(SourceGate::Measure.is_measure());
    }

    #[test]
    fn test_display() {
        assert_eq!(SourceGate::H.to_string(), "HGate");
        assert_eq!(SourceGate::Rx(0.5).to_string(), "Rx(0.5)");
        assert_eq!(
            SourceGate::Custom {
                name: "U".into(),
                params: vec![1.0, 2.0]
            }
            .to_string(),
            "U(1, 2)"
        );
    }
}
