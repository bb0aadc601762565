//! Append-only target circuit.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::error::IrResult;
use crate::operation::Operation;
use crate::qubit::TargetQubit;

/// A target circuit: the ordered sequence of committed operations.
///
/// Operations are kept exactly as they were appended, composites included.
/// Use [`Circuit::all_operations`] for the flattened gate sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    operations: Vec<Operation>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append operations, preserving their order.
    pub fn append(&mut self, ops: impl IntoIterator<Item = Operation>) {
        self.operations.extend(ops);
    }

    /// Committed operations, in commit order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Number of committed operations (composites count once).
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Check if nothing has been committed.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Leaf gate operations, composites flattened.
    pub fn all_operations(&self) -> impl Iterator<Item = &Operation> + '_ {
        self.operations.iter().flat_map(Operation::flatten)
    }

    /// Set of target qubits touched by the circuit, sorted.
    pub fn qubits(&self) -> Vec<TargetQubit> {
        let set: FxHashSet<TargetQubit> = self
            .all_operations()
            .flat_map(|op| match op {
                Operation::Gate { qubits, .. } => qubits.clone(),
                Operation::Tree(_) => vec![],
            })
            .collect();
        let mut qubits: Vec<_> = set.into_iter().collect();
        qubits.sort();
        qubits
    }

    /// Layer leaf operations into moments.
    ///
    /// Each operation lands in the earliest moment after the last moment that
    /// touches any of its qubits, so per-qubit order is preserved.
    pub fn moments(&self) -> Vec<Vec<&Operation>> {
        let mut moments: Vec<Vec<&Operation>> = vec![];
        let mut next_free: FxHashMap<TargetQubit, usize> = FxHashMap::default();

        for op in self.all_operations() {
            let Operation::Gate { qubits, .. } = op else {
                continue;
            };
            let slot = qubits
                .iter()
                .filter_map(|q| next_free.get(q).copied())
                .max()
                .unwrap_or(0);
            if slot == moments.len() {
                moments.push(vec![]);
            }
            moments[slot].push(op);
            for q in qubits {
                next_free.insert(*q, slot + 1);
            }
        }

        moments
    }

    /// Number of moments.
    pub fn depth(&self) -> usize {
        self.moments().len()
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> IrResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> IrResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
