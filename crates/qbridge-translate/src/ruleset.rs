//! Registry of translation rules keyed by source gate type.
//!
//! A [`Ruleset`] maps each [`GateType`] to a [`Rule`]: a function that turns
//! one source command into one target operation, given the current qubit
//! mapping and the target qubit collection. Rulesets compose by merging, so a
//! base library can be extended with device-specific gate families.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::debug;

use qbridge_ir::{Command, GateType, Operation, TargetQubit};

use crate::error::{RuleError, RuleResult};
use crate::mapping::QubitMapping;

/// A translation rule.
///
/// Rules are shared values: cloning a ruleset clones the handles, not the
/// functions.
pub type Rule =
    Arc<dyn Fn(&Command, &QubitMapping, &[TargetQubit]) -> RuleResult<Operation> + Send + Sync>;

/// Mergeable registry of translation rules.
#[derive(Clone, Default)]
pub struct Ruleset {
    rules: FxHashMap<GateType, Rule>,
}

impl Ruleset {
    /// Create a new empty ruleset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rule, replacing any previous rule for the same type.
    pub fn add_rule(
        &mut self,
        gate_type: GateType,
        rule: impl Fn(&Command, &QubitMapping, &[TargetQubit]) -> RuleResult<Operation>
        + Send
        + Sync
        + 'static,
    ) {
        debug!("Registering rule for {}", gate_type);
        self.rules.insert(gate_type, Arc::new(rule));
    }

    /// Builder form of [`Ruleset::add_rule`].
    #[must_use]
    pub fn with_rule(
        mut self,
        gate_type: GateType,
        rule: impl Fn(&Command, &QubitMapping, &[TargetQubit]) -> RuleResult<Operation>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        self.add_rule(gate_type, rule);
        self
    }

    /// Merge another ruleset into this one.
    ///
    /// On key collision the rule from `other` wins; all other entries of
    /// `self` are kept.
    pub fn add_rules(&mut self, other: &Ruleset) {
        for (gate_type, rule) in &other.rules {
            self.rules.insert(gate_type.clone(), Arc::clone(rule));
        }
    }

    /// Check if a rule is registered for the gate type.
    pub fn known(&self, gate_type: &GateType) -> bool {
        self.rules.contains_key(gate_type)
    }

    /// Get the rule for a gate type.
    pub fn get(&self, gate_type: &GateType) -> Option<&Rule> {
        self.rules.get(gate_type)
    }

    /// Registered gate types, sorted.
    pub fn known_rules(&self) -> Vec<&GateType> {
        let mut types: Vec<_> = self.rules.keys().collect();
        types.sort();
        types
    }

    /// Translate a command with the rule registered for its gate type.
    pub fn translate(
        &self,
        command: &Command,
        mapping: &QubitMapping,
        qubits: &[TargetQubit],
    ) -> RuleResult<Operation> {
        let gate_type = command.gate.gate_type();
        let rule = self
            .rules
            .get(&gate_type)
            .ok_or_else(|| RuleError::NoRule(gate_type.class_name().to_string()))?;
        rule(command, mapping, qubits)
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if no rules are registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Debug for Ruleset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ruleset")
            .field("known_rules", &self.known_rules())
            .finish()
    }
}
