//! Xmon native gate family.
//!
//! `ExpW` and `ExpZ` act on one qubit, `Exp11` on two. None of them accept
//! control qubits; their half-turn parameters carry over unchanged.

use qbridge_ir::{Command, GateType, Operation, SourceGate, TargetGate, TargetQubit};

use super::{expect_max_controls, expect_qubits, resolve_targets};
use crate::error::{RuleError, RuleResult};
use crate::mapping::QubitMapping;
use crate::ruleset::Ruleset;

/// Build a fresh Xmon ruleset.
pub fn ruleset() -> Ruleset {
    Ruleset::new()
        .with_rule(GateType::ExpW, native)
        .with_rule(GateType::ExpZ, native)
        .with_rule(GateType::Exp11, native)
}

fn native(cmd: &Command, mapping: &QubitMapping, qubits: &[TargetQubit]) -> RuleResult<Operation> {
    let (gate, arity) = match cmd.gate {
        SourceGate::ExpW {
            half_turns,
            axis_half_turns,
        } => (
            TargetGate::ExpW {
                half_turns,
                axis_half_turns,
            },
            1,
        ),
        SourceGate::ExpZ { half_turns } => (TargetGate::ExpZ { half_turns }, 1),
        SourceGate::Exp11 { half_turns } => (TargetGate::Exp11 { half_turns }, 2),
        ref other => {
            return Err(RuleError::Custom(format!(
                "Gate '{}' is not an Xmon gate",
                other.class_name()
            )));
        }
    };
    expect_qubits(cmd, arity)?;
    expect_max_controls(cmd, 0)?;
    Ok(Operation::on(gate, resolve_targets(cmd, mapping, qubits)?)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qbridge_ir::QubitId;

    #[test]
    fn test_xmon_rules_registered() {
        let rules = ruleset();
        assert_eq!(
            rules.known_rules(),
            vec![&GateType::ExpW, &GateType::ExpZ, &GateType::Exp11]
        );
    }

    #[test]
    fn test_exp_w_on_grid() {
        let mut mapping = QubitMapping::new();
        mapping.place(QubitId(0), 3);
        let qubits = TargetQubit::grid_rect(2, 2);

        let cmd = Command::gate(
            SourceGate::ExpW {
                half_turns: 0.5,
                axis_half_turns: 0.25,
            },
            [QubitId(0)],
        );
        let op = ruleset().translate(&cmd, &mapping, &qubits).unwrap();
        assert_eq!(
            op,
            Operation::on(
                TargetGate::ExpW {
                    half_turns: 0.5,
                    axis_half_turns: 0.25
                },
                [TargetQubit::grid(1, 1)]
            )
            .unwrap()
        );
    }

    #[test]
    fn test_exp11_needs_two_qubits() {
        let qubits = TargetQubit::line_range(3);
        let mapping = QubitMapping::new();

        let ok = Command::gate(SourceGate::Exp11 { half_turns: 1.0 }, [QubitId(0), QubitId(2)]);
        let op = ruleset().translate(&ok, &mapping, &qubits).unwrap();
        assert_eq!(op.qubits(), vec![TargetQubit::line(0), TargetQubit::line(2)]);

        let bad = Command::gate(SourceGate::Exp11 { half_turns: 1.0 }, [QubitId(0)]);
        assert!(matches!(
            ruleset().translate(&bad, &mapping, &qubits),
            Err(RuleError::QubitCountMismatch { expected: 2, .. })
        ));
    }

    #[test]
    fn test_controls_rejected() {
        let cmd = Command::gate(SourceGate::ExpZ { half_turns: 0.5 }, [QubitId(1)])
            .with_controls([QubitId(0)]);
        assert!(matches!(
            ruleset().translate(&cmd, &QubitMapping::new(), &TargetQubit::line_range(2)),
            Err(RuleError::UnsupportedControls { .. })
        ));
    }
}
