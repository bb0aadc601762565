//! Target devices.
//!
//! A device is only consulted for its qubit collection; connectivity and gate
//! validation are left to the target framework.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::qubit::TargetQubit;

/// A target device exposing an ordered qubit collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Name of the device.
    pub name: String,
    qubits: Vec<TargetQubit>,
}

impl Device {
    /// Create a device from an explicit qubit list.
    ///
    /// The list must be non-empty and free of duplicates.
    pub fn new(name: impl Into<String>, qubits: Vec<TargetQubit>) -> IrResult<Self> {
        let name = name.into();
        if qubits.is_empty() {
            return Err(IrError::EmptyDevice(name));
        }
        let mut seen = FxHashSet::default();
        for q in &qubits {
            if !seen.insert(*q) {
                return Err(IrError::DuplicateQubit(*q));
            }
        }
        Ok(Self { name, qubits })
    }

    /// A device of `n` line qubits.
    pub fn line(name: impl Into<String>, n: u32) -> IrResult<Self> {
        Self::new(name, TargetQubit::line_range(n))
    }

    /// A device covering a `rows × cols` grid, row-major.
    pub fn grid(name: impl Into<String>, rows: i32, cols: i32) -> IrResult<Self> {
        Self::new(name, TargetQubit::grid_rect(rows, cols))
    }

    /// The 2×11 Foxtail grid.
    pub fn foxtail() -> Self {
        Self {
            name: "foxtail".into(),
            qubits: TargetQubit::grid_rect(2, 11),
        }
    }

    /// The device qubits, in declaration order.
    pub fn qubits(&self) -> &[TargetQubit] {
        &self.qubits
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Check if the device has the given qubit.
    pub fn contains(&self, qubit: &TargetQubit) -> bool {
        self.qubits.contains(qubit)
    }
}
