//! Source commands: one gate application plus its operands and tags.

use serde::{Deserialize, Serialize};

use crate::gate::SourceGate;
use crate::qubit::QubitId;

/// Placement annotation on an allocation command.
///
/// Declares the target-side position that a freshly allocated source qubit
/// should occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QubitPlacementTag {
    /// Index into the target qubit collection.
    pub position: u32,
}

impl QubitPlacementTag {
    /// Create a placement tag.
    pub fn new(position: u32) -> Self {
        Self { position }
    }
}

/// Annotation attached to a command.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tag {
    /// Target placement for an allocated qubit.
    Placement(QubitPlacementTag),
    /// Command is part of a compute section.
    Compute,
    /// Command is part of an uncompute section.
    Uncompute,
    /// Qubit may be handed out in an unknown state.
    Dirty,
    /// Free-form annotation.
    Custom(String),
}

impl Tag {
    /// Get the placement if this is a placement tag.
    pub fn as_placement(&self) -> Option<QubitPlacementTag> {
        match self {
            Tag::Placement(p) => Some(*p),
            _ => None,
        }
    }
}

impl From<QubitPlacementTag> for Tag {
    fn from(tag: QubitPlacementTag) -> Self {
        Tag::Placement(tag)
    }
}

/// A single command of the source stream.
///
/// `qubits` is a list of qubit groups (registers) the gate acts on, in order.
/// Controls are kept apart so rules can choose a controlled target gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    /// The gate being applied.
    pub gate: SourceGate,
    /// Target qubit groups.
    pub qubits: Vec<Vec<QubitId>>,
    /// Control qubits.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub control_qubits: Vec<QubitId>,
    /// Annotations, in the order they were attached.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

impl Command {
    /// Create a command acting on the given qubit groups.
    pub fn new(gate: SourceGate, qubits: impl IntoIterator<Item = Vec<QubitId>>) -> Self {
        Self {
            gate,
            qubits: qubits.into_iter().collect(),
            control_qubits: vec![],
            tags: vec![],
        }
    }

    /// Create a command acting on a single group of qubits.
    pub fn gate(gate: SourceGate, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self::new(gate, [qubits.into_iter().collect()])
    }

    /// Allocate one qubit.
    pub fn allocate(qubit: QubitId) -> Self {
        Self::gate(SourceGate::Allocate, [qubit])
    }

    /// Deallocate one qubit.
    pub fn deallocate(qubit: QubitId) -> Self {
        Self::gate(SourceGate::Deallocate, [qubit])
    }

    /// Measure one qubit.
    pub fn measure(qubit: QubitId) -> Self {
        Self::gate(SourceGate::Measure, [qubit])
    }

    /// Barrier across the given qubits.
    pub fn barrier(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self::gate(SourceGate::Barrier, qubits)
    }

    /// The flush marker.
    ///
    /// Carries no qubits; only its gate is meaningful.
    pub fn flush() -> Self {
        Self::new(SourceGate::Flush, [])
    }

    /// Add control qubits.
    #[must_use]
    pub fn with_controls(mut self, controls: impl IntoIterator<Item = QubitId>) -> Self {
        self.control_qubits.extend(controls);
        self
    }

    /// Attach a tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<Tag>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Attach a placement tag.
    #[must_use]
    pub fn with_placement(self, position: u32) -> Self {
        self.with_tag(QubitPlacementTag::new(position))
    }

    /// The first qubit of the first group.
    pub fn first_qubit(&self) -> Option<QubitId> {
        self.qubits.first().and_then(|group| group.first()).copied()
    }

    /// All target qubits, groups flattened in order.
    pub fn all_qubits(&self) -> impl Iterator<Item = QubitId> + '_ {
        self.qubits.iter().flatten().copied()
    }

    /// Number of target qubits across all groups.
    pub fn num_qubits(&self) -> usize {
        self.qubits.iter().map(Vec::len).sum()
    }

    /// Number of control qubits.
    pub fn control_count(&self) -> usize {
        self.control_qubits.len()
    }

    /// The first placement tag, in tag order.
    pub fn placement(&self) -> Option<QubitPlacementTag> {
        self.tags.iter().find_map(Tag::as_placement)
    }
}
