//! Built-in translation rules.
//!
//! - [`common`]: the standard gate library (Paulis, Clifford+T, rotations,
//!   swaps, controlled forms, measurement)
//! - [`xmon`]: the Xmon native gate family
//!
//! [`default_ruleset`] composes both into a fresh ruleset on every call.
//! Nothing here is shared between engines.

pub mod common;
pub mod xmon;

use qbridge_ir::{Command, QubitId, TargetQubit};

use crate::error::{RuleError, RuleResult};
use crate::mapping::QubitMapping;
use crate::ruleset::Ruleset;

/// Names accepted by [`extension`].
pub const EXTENSIONS: &[&str] = &["xmon"];

/// The common ruleset merged with the Xmon extension.
pub fn default_ruleset() -> Ruleset {
    let mut rules = common::ruleset();
    rules.add_rules(&xmon::ruleset());
    rules
}

/// Look up a named ruleset extension.
pub fn extension(name: &str) -> Option<Ruleset> {
    match name {
        "xmon" => Some(xmon::ruleset()),
        _ => None,
    }
}

/// Resolve one source qubit to its target qubit.
pub fn resolve_qubit(
    qubit: QubitId,
    mapping: &QubitMapping,
    qubits: &[TargetQubit],
) -> RuleResult<TargetQubit> {
    let position = mapping.resolve(qubit);
    qubits
        .get(position as usize)
        .copied()
        .ok_or(RuleError::PositionOutOfRange {
            qubit,
            position,
            available: qubits.len(),
        })
}

/// Resolve the command's target qubits, groups flattened in order.
pub fn resolve_targets(
    command: &Command,
    mapping: &QubitMapping,
    qubits: &[TargetQubit],
) -> RuleResult<Vec<TargetQubit>> {
    command
        .all_qubits()
        .map(|q| resolve_qubit(q, mapping, qubits))
        .collect()
}

/// Resolve the command's control qubits.
pub fn resolve_controls(
    command: &Command,
    mapping: &QubitMapping,
    qubits: &[TargetQubit],
) -> RuleResult<Vec<TargetQubit>> {
    command
        .control_qubits
        .iter()
        .map(|&q| resolve_qubit(q, mapping, qubits))
        .collect()
}

/// Fail unless the command has exactly `expected` target qubits.
pub fn expect_qubits(command: &Command, expected: usize) -> RuleResult<()> {
    let got = command.num_qubits();
    if got != expected {
        return Err(RuleError::QubitCountMismatch {
            gate: command.gate.class_name().to_string(),
            expected,
            got,
        });
    }
    Ok(())
}

/// Fail unless the command has at most `max` control qubits.
pub fn expect_max_controls(command: &Command, max: usize) -> RuleResult<()> {
    if command.control_count() > max {
        return Err(unsupported_controls(command));
    }
    Ok(())
}

pub(crate) fn unsupported_controls(command: &Command) -> RuleError {
    RuleError::UnsupportedControls {
        gate: command.gate.class_name().to_string(),
        controls: command.control_count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qbridge_ir::{GateType, SourceGate};

    #[test]
    fn test_default_ruleset_composes_extension() {
        let rules = default_ruleset();
        assert!(rules.known(&GateType::X));
        assert!(rules.known(&GateType::Measure));
        assert!(rules.known(&GateType::ExpW));
        assert!(!rules.known(&GateType::Ph));
    }

    #[test]
    fn test_default_ruleset_is_fresh() {
        let mut first = default_ruleset();
        first.add_rule(GateType::Ph, |_, _, _| Err(RuleError::Custom("never".into())));
        let second = default_ruleset();
        assert!(first.known(&GateType::Ph));
        assert!(!second.known(&GateType::Ph));
    }

    #[test]
    fn test_extension_lookup() {
        for name in EXTENSIONS {
            assert!(extension(name).is_some());
        }
        assert!(extension("sycamore").is_none());
    }

    #[test]
    fn test_resolve_through_mapping() {
        let mut mapping = QubitMapping::new();
        mapping.place(QubitId(0), 2);
        let qubits = TargetQubit::grid_rect(1, 3);

        let cmd = Command::gate(SourceGate::X, [QubitId(0)]);
        assert_eq!(
            resolve_targets(&cmd, &mapping, &qubits).unwrap(),
            vec![TargetQubit::grid(0, 2)]
        );
    }

    #[test]
    fn test_resolve_out_of_range() {
        let mapping = QubitMapping::new();
        let qubits = TargetQubit::line_range(2);
        let err = resolve_qubit(QubitId(5), &mapping, &qubits).unwrap_err();
        assert!(matches!(
            err,
            RuleError::PositionOutOfRange {
                position: 5,
                available: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_expect_qubits() {
        let cmd = Command::gate(SourceGate::Swap, [QubitId(0)]);
        assert!(expect_qubits(&cmd, 1).is_ok());
        assert!(matches!(
            expect_qubits(&cmd, 2),
            Err(RuleError::QubitCountMismatch { expected: 2, got: 1, .. })
        ));
    }
}
