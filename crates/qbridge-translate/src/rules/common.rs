//! Common gate library.
//!
//! | Source | Controls | Target |
//! |--------|----------|--------|
//! | `X` | 0 / 1 / 2 | `X` / `CNOT` / `CCX` |
//! | `Z` | 0 / 1 / 2 | `Z` / `CZ` / `CCZ` |
//! | `Y`, `H`, `SqrtX` | 0 | `Y`, `H`, `X**0.5` |
//! | `S`, `Sdag`, `T`, `Tdag` | 0 | `Z**±0.5`, `Z**±0.25` |
//! | `Rx`, `Ry`, `Rz` | 0 | same rotation |
//! | `R(φ)` | 0 / 1 | `Z**(φ/π)` / `CZ**(φ/π)` |
//! | `Swap` | 0 / 1 | `SWAP` / `CSWAP` |
//! | `SqrtSwap` | 0 | `SWAP**0.5` |
//! | `Measure` | 0 | `measure` keyed by source ids |
//!
//! Uncontrolled single-qubit gates on several qubits become one composite
//! operation with one gate per qubit.

use std::f64::consts::PI;

use qbridge_ir::{Command, GateType, Operation, SourceGate, TargetGate, TargetQubit};

use super::{
    expect_max_controls, expect_qubits, resolve_controls, resolve_targets, unsupported_controls,
};
use crate::error::{RuleError, RuleResult};
use crate::mapping::QubitMapping;
use crate::ruleset::Ruleset;

/// Build a fresh common ruleset.
pub fn ruleset() -> Ruleset {
    let mut rules = Ruleset::new();

    rules.add_rule(GateType::X, x);
    rules.add_rule(GateType::Z, z);
    rules.add_rule(GateType::Y, fixed(|| TargetGate::YPow(1.0)));
    rules.add_rule(GateType::H, fixed(|| TargetGate::HPow(1.0)));
    rules.add_rule(GateType::SqrtX, fixed(|| TargetGate::XPow(0.5)));
    rules.add_rule(GateType::S, fixed(|| TargetGate::ZPow(0.5)));
    rules.add_rule(GateType::Sdag, fixed(|| TargetGate::ZPow(-0.5)));
    rules.add_rule(GateType::T, fixed(|| TargetGate::ZPow(0.25)));
    rules.add_rule(GateType::Tdag, fixed(|| TargetGate::ZPow(-0.25)));

    rules.add_rule(GateType::Rx, rotation(TargetGate::Rx));
    rules.add_rule(GateType::Ry, rotation(TargetGate::Ry));
    rules.add_rule(GateType::Rz, rotation(TargetGate::Rz));
    rules.add_rule(GateType::R, phase_shift);

    rules.add_rule(GateType::Swap, swap);
    rules.add_rule(GateType::SqrtSwap, sqrt_swap);
    rules.add_rule(GateType::Measure, measure);

    rules
}

/// Rule for a fixed uncontrolled single-qubit gate.
fn fixed(
    make: fn() -> TargetGate,
) -> impl Fn(&Command, &QubitMapping, &[TargetQubit]) -> RuleResult<Operation> + Send + Sync + 'static
{
    move |cmd, mapping, qubits| {
        expect_max_controls(cmd, 0)?;
        let targets = resolve_targets(cmd, mapping, qubits)?;
        each(cmd, make, targets)
    }
}

/// Rule for a single-qubit rotation carrying an angle.
fn rotation(
    make: fn(f64) -> TargetGate,
) -> impl Fn(&Command, &QubitMapping, &[TargetQubit]) -> RuleResult<Operation> + Send + Sync + 'static
{
    move |cmd, mapping, qubits| {
        expect_max_controls(cmd, 0)?;
        let theta = angle(&cmd.gate)?;
        let targets = resolve_targets(cmd, mapping, qubits)?;
        each(cmd, || make(theta), targets)
    }
}

/// One gate per target qubit; a single target yields a plain operation.
fn each(
    cmd: &Command,
    make: impl Fn() -> TargetGate,
    targets: Vec<TargetQubit>,
) -> RuleResult<Operation> {
    match targets.as_slice() {
        [] => Err(RuleError::QubitCountMismatch {
            gate: cmd.gate.class_name().to_string(),
            expected: 1,
            got: 0,
        }),
        [q] => Ok(Operation::on(make(), [*q])?),
        many => {
            let ops = many
                .iter()
                .map(|q| Operation::on(make(), [*q]))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Operation::tree(ops))
        }
    }
}

fn angle(gate: &SourceGate) -> RuleResult<f64> {
    match gate {
        SourceGate::Rx(a)
        | SourceGate::Ry(a)
        | SourceGate::Rz(a)
        | SourceGate::R(a)
        | SourceGate::Ph(a) => Ok(*a),
        other => Err(RuleError::Custom(format!(
            "Gate '{}' carries no angle",
            other.class_name()
        ))),
    }
}

/// Controls first, then targets.
fn controlled(
    cmd: &Command,
    mapping: &QubitMapping,
    qubits: &[TargetQubit],
) -> RuleResult<Vec<TargetQubit>> {
    let mut operands = resolve_controls(cmd, mapping, qubits)?;
    operands.extend(resolve_targets(cmd, mapping, qubits)?);
    Ok(operands)
}

fn x(cmd: &Command, mapping: &QubitMapping, qubits: &[TargetQubit]) -> RuleResult<Operation> {
    let gate = match cmd.control_count() {
        0 => {
            let targets = resolve_targets(cmd, mapping, qubits)?;
            return each(cmd, || TargetGate::XPow(1.0), targets);
        }
        1 => TargetGate::CNotPow(1.0),
        2 => TargetGate::CCX,
        _ => return Err(unsupported_controls(cmd)),
    };
    expect_qubits(cmd, 1)?;
    Ok(Operation::on(gate, controlled(cmd, mapping, qubits)?)?)
}

fn z(cmd: &Command, mapping: &QubitMapping, qubits: &[TargetQubit]) -> RuleResult<Operation> {
    let gate = match cmd.control_count() {
        0 => {
            let targets = resolve_targets(cmd, mapping, qubits)?;
            return each(cmd, || TargetGate::ZPow(1.0), targets);
        }
        1 => TargetGate::CZPow(1.0),
        2 => TargetGate::CCZ,
        _ => return Err(unsupported_controls(cmd)),
    };
    expect_qubits(cmd, 1)?;
    Ok(Operation::on(gate, controlled(cmd, mapping, qubits)?)?)
}

fn phase_shift(
    cmd: &Command,
    mapping: &QubitMapping,
    qubits: &[TargetQubit],
) -> RuleResult<Operation> {
    let exponent = angle(&cmd.gate)? / PI;
    match cmd.control_count() {
        0 => {
            let targets = resolve_targets(cmd, mapping, qubits)?;
            each(cmd, || TargetGate::ZPow(exponent), targets)
        }
        1 => {
            expect_qubits(cmd, 1)?;
            Ok(Operation::on(
                TargetGate::CZPow(exponent),
                controlled(cmd, mapping, qubits)?,
            )?)
        }
        _ => Err(unsupported_controls(cmd)),
    }
}

fn swap(cmd: &Command, mapping: &QubitMapping, qubits: &[TargetQubit]) -> RuleResult<Operation> {
    expect_qubits(cmd, 2)?;
    let gate = match cmd.control_count() {
        0 => TargetGate::SwapPow(1.0),
        1 => TargetGate::CSwap,
        _ => return Err(unsupported_controls(cmd)),
    };
    Ok(Operation::on(gate, controlled(cmd, mapping, qubits)?)?)
}

fn sqrt_swap(
    cmd: &Command,
    mapping: &QubitMapping,
    qubits: &[TargetQubit],
) -> RuleResult<Operation> {
    expect_qubits(cmd, 2)?;
    expect_max_controls(cmd, 0)?;
    Ok(Operation::on(
        TargetGate::SwapPow(0.5),
        resolve_targets(cmd, mapping, qubits)?,
    )?)
}

fn measure(cmd: &Command, mapping: &QubitMapping, qubits: &[TargetQubit]) -> RuleResult<Operation> {
    expect_max_controls(cmd, 0)?;
    let key = cmd
        .all_qubits()
        .map(|q| q.0.to_string())
        .collect::<Vec<_>>()
        .join(",");
    Ok(Operation::on(
        TargetGate::Measure { key },
        resolve_targets(cmd, mapping, qubits)?,
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qbridge_ir::QubitId;

    fn run(cmd: &Command) -> RuleResult<Operation> {
        ruleset().translate(cmd, &QubitMapping::new(), &TargetQubit::line_range(4))
    }

    fn single(gate: TargetGate, q: u32) -> Operation {
        Operation::on(gate, [TargetQubit::line(q)]).unwrap()
    }

    #[test]
    fn test_x_family() {
        let x = Command::gate(SourceGate::X, [QubitId(1)]);
        assert_eq!(run(&x).unwrap(), single(TargetGate::XPow(1.0), 1));

        let cnot = x.clone().with_controls([QubitId(0)]);
        assert_eq!(
            run(&cnot).unwrap(),
            Operation::on(
                TargetGate::CNotPow(1.0),
                [TargetQubit::line(0), TargetQubit::line(1)]
            )
            .unwrap()
        );

        let toffoli = x.clone().with_controls([QubitId(2), QubitId(3)]);
        let op = run(&toffoli).unwrap();
        assert_eq!(op.as_gate(), Some(&TargetGate::CCX));
        assert_eq!(
            op.qubits(),
            vec![TargetQubit::line(2), TargetQubit::line(3), TargetQubit::line(1)]
        );

        let too_many = x.with_controls([QubitId(0), QubitId(2), QubitId(3)]);
        assert!(matches!(
            run(&too_many),
            Err(RuleError::UnsupportedControls { controls: 3, .. })
        ));
    }

    #[test]
    fn test_z_family() {
        let cz = Command::gate(SourceGate::Z, [QubitId(1)]).with_controls([QubitId(0)]);
        assert_eq!(run(&cz).unwrap().as_gate(), Some(&TargetGate::CZPow(1.0)));
    }

    #[test]
    fn test_clifford_t_as_z_powers() {
        let cases = [
            (SourceGate::S, 0.5),
            (SourceGate::Sdag, -0.5),
            (SourceGate::T, 0.25),
            (SourceGate::Tdag, -0.25),
        ];
        for (gate, exponent) in cases {
            let op = run(&Command::gate(gate, [QubitId(0)])).unwrap();
            assert_eq!(op, single(TargetGate::ZPow(exponent), 0));
        }
    }

    #[test]
    fn test_uncontrolled_gate_on_many_qubits_is_composite() {
        let cmd = Command::gate(SourceGate::H, [QubitId(0), QubitId(2)]);
        let op = run(&cmd).unwrap();
        assert!(op.is_tree());
        assert_eq!(
            op,
            Operation::tree([
                single(TargetGate::HPow(1.0), 0),
                single(TargetGate::HPow(1.0), 2)
            ])
        );
    }

    #[test]
    fn test_rotations_keep_angle() {
        let op = run(&Command::gate(SourceGate::Ry(0.3), [QubitId(2)])).unwrap();
        assert_eq!(op, single(TargetGate::Ry(0.3), 2));
    }

    #[test]
    fn test_controlled_rotation_unsupported() {
        let cmd = Command::gate(SourceGate::Rx(0.3), [QubitId(1)]).with_controls([QubitId(0)]);
        assert!(matches!(
            run(&cmd),
            Err(RuleError::UnsupportedControls { .. })
        ));
    }

    #[test]
    fn test_phase_shift() {
        let op = run(&Command::gate(SourceGate::R(PI / 2.0), [QubitId(0)])).unwrap();
        assert_eq!(op, single(TargetGate::ZPow(0.5), 0));

        let cr = Command::gate(SourceGate::R(PI), [QubitId(1)]).with_controls([QubitId(0)]);
        assert_eq!(run(&cr).unwrap().as_gate(), Some(&TargetGate::CZPow(1.0)));
    }

    #[test]
    fn test_swap_family() {
        let swap = Command::gate(SourceGate::Swap, [QubitId(0), QubitId(1)]);
        assert_eq!(run(&swap).unwrap().as_gate(), Some(&TargetGate::SwapPow(1.0)));

        let fredkin = swap.with_controls([QubitId(2)]);
        let op = run(&fredkin).unwrap();
        assert_eq!(op.as_gate(), Some(&TargetGate::CSwap));
        assert_eq!(op.qubits()[0], TargetQubit::line(2));

        let bad = Command::gate(SourceGate::SqrtSwap, [QubitId(0)]);
        assert!(matches!(
            run(&bad),
            Err(RuleError::QubitCountMismatch { expected: 2, got: 1, .. })
        ));
    }

    #[test]
    fn test_measure_key_uses_source_ids() {
        let mut mapping = QubitMapping::new();
        mapping.place(QubitId(7), 1);
        let op = ruleset()
            .translate(
                &Command::measure(QubitId(7)),
                &mapping,
                &TargetQubit::line_range(2),
            )
            .unwrap();
        assert_eq!(
            op,
            Operation::on(
                TargetGate::Measure { key: "7".into() },
                [TargetQubit::line(1)]
            )
            .unwrap()
        );
    }

    #[test]
    fn test_global_phase_has_no_rule() {
        assert!(!ruleset().known(&GateType::Ph));
    }
}
