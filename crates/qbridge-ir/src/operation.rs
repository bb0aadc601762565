//! Target-side gates and operations.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::qubit::TargetQubit;

/// Gates of the target representation.
///
/// Most gates are expressed as powers of a fixed gate: `XPow(1.0)` is X,
/// `ZPow(0.5)` is S, `ZPow(-0.25)` is T-dagger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TargetGate {
    /// X raised to a power.
    XPow(f64),
    /// Y raised to a power.
    YPow(f64),
    /// Z raised to a power.
    ZPow(f64),
    /// Hadamard raised to a power.
    HPow(f64),
    /// Rotation around X by an angle in radians.
    Rx(f64),
    /// Rotation around Y by an angle in radians.
    Ry(f64),
    /// Rotation around Z by an angle in radians.
    Rz(f64),
    /// CNOT raised to a power.
    CNotPow(f64),
    /// CZ raised to a power.
    CZPow(f64),
    /// SWAP raised to a power.
    SwapPow(f64),
    /// Toffoli gate.
    CCX,
    /// Doubly-controlled Z.
    CCZ,
    /// Fredkin gate.
    CSwap,
    /// Computational basis measurement of all operands under one key.
    Measure {
        /// Result key.
        key: String,
    },
    /// Xmon phased X rotation.
    ExpW {
        /// Rotation amount in half turns.
        half_turns: f64,
        /// Axis angle in half turns.
        axis_half_turns: f64,
    },
    /// Xmon Z rotation.
    ExpZ {
        /// Rotation amount in half turns.
        half_turns: f64,
    },
    /// Xmon |11⟩ phase.
    Exp11 {
        /// Rotation amount in half turns.
        half_turns: f64,
    },
}

impl TargetGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            TargetGate::XPow(_) => "X",
            TargetGate::YPow(_) => "Y",
            TargetGate::ZPow(_) => "Z",
            TargetGate::HPow(_) => "H",
            TargetGate::Rx(_) => "Rx",
            TargetGate::Ry(_) => "Ry",
            TargetGate::Rz(_) => "Rz",
            TargetGate::CNotPow(_) => "CNOT",
            TargetGate::CZPow(_) => "CZ",
            TargetGate::SwapPow(_) => "SWAP",
            TargetGate::CCX => "CCX",
            TargetGate::CCZ => "CCZ",
            TargetGate::CSwap => "CSWAP",
            TargetGate::Measure { .. } => "measure",
            TargetGate::ExpW { .. } => "ExpW",
            TargetGate::ExpZ { .. } => "ExpZ",
            TargetGate::Exp11 { .. } => "Exp11",
        }
    }

    /// Number of qubits the gate acts on, `None` if any positive count works.
    #[inline]
    pub fn num_qubits(&self) -> Option<usize> {
        match self {
            TargetGate::XPow(_)
            | TargetGate::YPow(_)
            | TargetGate::ZPow(_)
            | TargetGate::HPow(_)
            | TargetGate::Rx(_)
            | TargetGate::Ry(_)
            | TargetGate::Rz(_)
            | TargetGate::ExpW { .. }
            | TargetGate::ExpZ { .. } => Some(1),

            TargetGate::CNotPow(_)
            | TargetGate::CZPow(_)
            | TargetGate::SwapPow(_)
            | TargetGate::Exp11 { .. } => Some(2),

            TargetGate::CCX | TargetGate::CCZ | TargetGate::CSwap => Some(3),

            TargetGate::Measure { .. } => None,
        }
    }
}

/// A target operation: a gate on qubits, or a group of operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operation {
    /// A gate applied to qubits.
    Gate {
        /// The gate.
        gate: TargetGate,
        /// Operands, in gate order.
        qubits: Vec<TargetQubit>,
    },
    /// A composite of operations, applied in order.
    Tree(Vec<Operation>),
}

impl Operation {
    /// Apply `gate` to `qubits`, checking the operand count.
    pub fn on(gate: TargetGate, qubits: impl IntoIterator<Item = TargetQubit>) -> IrResult<Self> {
        let qubits: Vec<_> = qubits.into_iter().collect();
        let arity_ok = match gate.num_qubits() {
            Some(n) => qubits.len() == n,
            None => !qubits.is_empty(),
        };
        if !arity_ok {
            return Err(IrError::QubitCountMismatch {
                gate: gate.name().to_string(),
                expected: gate.num_qubits().unwrap_or(1),
                got: qubits.len(),
            });
        }
        Ok(Operation::Gate { gate, qubits })
    }

    /// Group operations into one composite operation.
    pub fn tree(ops: impl IntoIterator<Item = Operation>) -> Self {
        Operation::Tree(ops.into_iter().collect())
    }

    /// Get the gate if this is a single gate operation.
    pub fn as_gate(&self) -> Option<&TargetGate> {
        match self {
            Operation::Gate { gate, .. } => Some(gate),
            Operation::Tree(_) => None,
        }
    }

    /// Check if this is a composite.
    pub fn is_tree(&self) -> bool {
        matches!(self, Operation::Tree(_))
    }

    /// Leaf gate operations, depth-first in order.
    pub fn flatten(&self) -> Vec<&Operation> {
        let mut out = vec![];
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Operation>) {
        match self {
            Operation::Gate { .. } => out.push(self),
            Operation::Tree(ops) => {
                for op in ops {
                    op.collect_leaves(out);
                }
            }
        }
    }

    /// Number of leaf gate operations.
    pub fn len_flat(&self) -> usize {
        match self {
            Operation::Gate { .. } => 1,
            Operation::Tree(ops) => ops.iter().map(Operation::len_flat).sum(),
        }
    }

    /// Qubits touched by this operation, in first-use order without repeats.
    pub fn qubits(&self) -> Vec<TargetQubit> {
        let mut seen = vec![];
        for leaf in self.flatten() {
            if let Operation::Gate { qubits, .. } = leaf {
                for q in qubits {
                    if !seen.contains(q) {
                        seen.push(*q);
                    }
                }
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_arity_checked() {
        let q0 = TargetQubit::line(0);
        let q1 = TargetQubit::line(1);

        assert!(Operation::on(TargetGate::XPow(1.0), [q0]).is_ok());
        assert!(Operation::on(TargetGate::CNotPow(1.0), [q0, q1]).is_ok());

        let err = Operation::on(TargetGate::CZPow(1.0), [q0]).unwrap_err();
        assert!(matches!(
            err,
            IrError::QubitCountMismatch {
                expected: 2,
                got: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_measure_takes_any_positive_count() {
        let key = || TargetGate::Measure { key: "m".into() };
        assert!(Operation::on(key(), TargetQubit::line_range(3)).is_ok());
        assert!(Operation::on(key(), []).is_err());
    }

    #[test]
    fn test_tree_flatten() {
        let q0 = TargetQubit::line(0);
        let q1 = TargetQubit::line(1);
        let op = Operation::tree([
            Operation::on(TargetGate::HPow(1.0), [q1]).unwrap(),
            Operation::tree([
                Operation::on(TargetGate::CZPow(1.0), [q0, q1]).unwrap(),
                Operation::on(TargetGate::HPow(1.0), [q1]).unwrap(),
            ]),
        ]);

        assert!(op.is_tree());
        assert_eq!(op.len_flat(), 3);
        let names: Vec<_> = op
            .flatten()
            .into_iter()
            .filter_map(Operation::as_gate)
            .map(TargetGate::name)
            .collect();
        assert_eq!(names, vec!["H", "CZ", "H"]);
        assert_eq!(op.qubits(), vec![q1, q0]);
    }
}
