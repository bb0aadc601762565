//! qbridge circuit data model
//!
//! This crate holds the values that flow through the qbridge translator:
//! the source-side command stream and the target-side circuit it is
//! translated into.
//!
//! # Source side
//!
//! - [`QubitId`]: opaque identifier of a source qubit
//! - [`SourceGate`] / [`GateType`]: the gate carried by a command and its
//!   parameter-free type, which is what translation rules are keyed by
//! - [`Command`]: a gate with qubit groups, control qubits and [`Tag`]s,
//!   among them the [`QubitPlacementTag`]
//!
//! # Target side
//!
//! - [`TargetQubit`]: line or grid qubit
//! - [`TargetGate`] / [`Operation`]: gate applications, possibly grouped
//! - [`Circuit`]: append-only sequence of committed operations
//! - [`Device`]: a qubit collection to translate onto
//!
//! # Example
//!
//! ```rust
//! use qbridge_ir::{Circuit, Command, Operation, QubitId, SourceGate, TargetGate, TargetQubit};
//!
//! let cmd = Command::gate(SourceGate::H, [QubitId(0)]);
//! assert_eq!(cmd.first_qubit(), Some(QubitId(0)));
//!
//! let mut circuit = Circuit::new();
//! circuit.append([Operation::on(TargetGate::HPow(1.0), [TargetQubit::line(0)]).unwrap()]);
//! assert_eq!(circuit.len(), 1);
//! ```

pub mod circuit;
pub mod command;
pub mod device;
pub mod error;
pub mod gate;
pub mod operation;
pub mod qubit;

pub use circuit::Circuit;
pub use command::{Command, QubitPlacementTag, Tag};
pub use device::Device;
pub use error::{IrError, IrResult};
pub use gate::{GateType, SourceGate};
pub use operation::{Operation, TargetGate};
pub use qubit::{QubitId, TargetQubit};
