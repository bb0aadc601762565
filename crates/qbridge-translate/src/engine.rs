//! Translation engine.
//!
//! [`CirqEngine`] consumes a stream of source commands and builds a target
//! [`Circuit`]. Translated operations are buffered and only reach the circuit
//! when a flush command arrives:
//!
//! ```text
//!            translate               flush
//!   Fresh ─────────────▶ Accumulating ─────▶ Fresh
//! ```
//!
//! Allocation, deallocation and barrier commands never touch the buffer.

use tracing::{debug, info, instrument, warn};

use qbridge_ir::{Circuit, Command, Device, Operation, TargetQubit};

use crate::config::EngineConfig;
use crate::error::{TranslateError, TranslateResult};
use crate::mapping::QubitMapping;
use crate::ruleset::Ruleset;
use crate::rules;

/// Buffer lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BufferState {
    /// Nothing translated since the last flush.
    #[default]
    Fresh,
    /// At least one command translated since the last flush.
    Accumulating,
}

/// Translates source commands into a target circuit.
#[derive(Debug)]
pub struct CirqEngine {
    rules: Ruleset,
    qubits: Vec<TargetQubit>,
    device: Option<Device>,
    mapping: QubitMapping,
    pending: Vec<Operation>,
    state: BufferState,
    circuit: Circuit,
    log_masked_causes: bool,
}

impl CirqEngine {
    fn assemble(
        rules: Ruleset,
        qubits: Vec<TargetQubit>,
        device: Option<Device>,
        log_masked_causes: bool,
    ) -> Self {
        Self {
            rules,
            qubits,
            device,
            mapping: QubitMapping::new(),
            pending: vec![],
            state: BufferState::Fresh,
            circuit: Circuit::new(),
            log_masked_causes,
        }
    }

    /// Engine over an explicit qubit collection with the default ruleset.
    pub fn with_qubits(qubits: impl IntoIterator<Item = TargetQubit>) -> Self {
        Self::assemble(
            rules::default_ruleset(),
            qubits.into_iter().collect(),
            None,
            true,
        )
    }

    /// Engine over a device's qubits with the default ruleset.
    pub fn with_device(device: Device) -> Self {
        let qubits = device.qubits().to_vec();
        Self::assemble(rules::default_ruleset(), qubits, Some(device), true)
    }

    /// Build an engine from configuration.
    ///
    /// The ruleset is the common library plus the configured extensions.
    pub fn from_config(config: &EngineConfig) -> TranslateResult<Self> {
        config.validate()?;
        let device = config
            .device
            .as_ref()
            .ok_or(TranslateError::MissingQubitSource)?
            .build()?;

        config
            .extensions
            .iter()
            .fold(
                EngineBuilder::new().with_ruleset(rules::common::ruleset()),
                |builder, name| builder.with_extension(name.clone()),
            )
            .with_device(device)
            .log_masked_causes(config.log_masked_causes)
            .build()
    }

    /// Process a batch of commands in order.
    ///
    /// Each command goes through [`CirqEngine::store`]. The first error
    /// aborts the rest of the batch, leaving the engine as it was after the
    /// last successful command.
    #[instrument(skip(self, commands), fields(count = commands.len()))]
    pub fn receive(&mut self, commands: &[Command]) -> TranslateResult<()> {
        for command in commands {
            self.store(command)?;
        }
        Ok(())
    }

    /// Handle one command. A flush command commits the buffer.
    pub fn store(&mut self, command: &Command) -> TranslateResult<()> {
        if command.gate.is_flush() {
            self.flush();
            return Ok(());
        }
        if command.gate.is_allocate() {
            self.mapping.record_allocation(command);
            return Ok(());
        }
        if command.gate.is_deallocate() || command.gate.is_barrier() {
            debug!("Ignoring {}", command.gate.class_name());
            return Ok(());
        }

        if self.state == BufferState::Fresh {
            self.pending.clear();
            self.state = BufferState::Accumulating;
        }

        match self.rules.translate(command, &self.mapping, &self.qubits) {
            Ok(op) => {
                debug!("Translated {}", command.gate);
                self.pending.push(op);
                Ok(())
            }
            Err(cause) => {
                let class = command.gate.class_name().to_string();
                if self.log_masked_causes {
                    warn!("Translation of {} failed: {}", class, cause);
                }
                Err(TranslateError::UnknownGate { class, cause })
            }
        }
    }

    /// Commit the buffered operations to the circuit.
    ///
    /// Returns the number of operations committed. The buffer is emptied, so
    /// flushing twice never commits anything twice.
    pub fn flush(&mut self) -> usize {
        let ops = std::mem::take(&mut self.pending);
        let count = ops.len();
        self.circuit.append(ops);
        self.state = BufferState::Fresh;
        info!(
            "Committed {} operations, circuit now has {}",
            count,
            self.circuit.len()
        );
        count
    }

    /// Check if the engine can handle a command.
    ///
    /// Allocation, deallocation, barrier and measurement are always
    /// accepted; other gates need a registered rule.
    pub fn is_available(&self, command: &Command) -> bool {
        let gate = &command.gate;
        gate.is_lifecycle() || gate.is_measure() || self.rules.known(&gate.gate_type())
    }

    /// The committed circuit.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// The target qubit collection.
    pub fn qubits(&self) -> &[TargetQubit] {
        &self.qubits
    }

    /// The target device, if the engine was built from one.
    pub fn device(&self) -> Option<&Device> {
        self.device.as_ref()
    }

    /// The source-to-target qubit mapping.
    pub fn mapping(&self) -> &QubitMapping {
        &self.mapping
    }

    /// Operations translated but not yet committed.
    pub fn pending(&self) -> &[Operation] {
        &self.pending
    }

    /// The buffer state.
    pub fn state(&self) -> BufferState {
        self.state
    }

    /// The active ruleset.
    pub fn ruleset(&self) -> &Ruleset {
        &self.rules
    }

    /// Clear the circuit, the buffer and the mapping.
    pub fn reset(&mut self) {
        debug!("Resetting engine");
        self.circuit = Circuit::new();
        self.pending.clear();
        self.mapping.clear();
        self.state = BufferState::Fresh;
    }

    /// Take the committed circuit. Uncommitted operations are dropped.
    pub fn into_circuit(self) -> Circuit {
        self.circuit
    }
}

/// Builder for [`CirqEngine`].
#[derive(Debug)]
pub struct EngineBuilder {
    device: Option<Device>,
    qubits: Option<Vec<TargetQubit>>,
    ruleset: Option<Ruleset>,
    extensions: Vec<String>,
    log_masked_causes: bool,
}

impl EngineBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            device: None,
            qubits: None,
            ruleset: None,
            extensions: vec![],
            log_masked_causes: true,
        }
    }

    /// Translate onto a device's qubits.
    #[must_use]
    pub fn with_device(mut self, device: Device) -> Self {
        self.device = Some(device);
        self
    }

    /// Translate onto an explicit qubit collection.
    #[must_use]
    pub fn with_qubits(mut self, qubits: impl IntoIterator<Item = TargetQubit>) -> Self {
        self.qubits = Some(qubits.into_iter().collect());
        self
    }

    /// Use this ruleset instead of the default one.
    #[must_use]
    pub fn with_ruleset(mut self, ruleset: Ruleset) -> Self {
        self.ruleset = Some(ruleset);
        self
    }

    /// Merge a named extension over the ruleset.
    #[must_use]
    pub fn with_extension(mut self, name: impl Into<String>) -> Self {
        self.extensions.push(name.into());
        self
    }

    /// Log the cause of masked unknown-gate errors (default: on).
    #[must_use]
    pub fn log_masked_causes(mut self, enabled: bool) -> Self {
        self.log_masked_causes = enabled;
        self
    }

    /// Build the engine.
    ///
    /// Exactly one of a device or a qubit collection must be given.
    pub fn build(self) -> TranslateResult<CirqEngine> {
        let (qubits, device) = match (self.device, self.qubits) {
            (Some(device), None) => (device.qubits().to_vec(), Some(device)),
            (None, Some(qubits)) => (qubits, None),
            (Some(_), Some(_)) => return Err(TranslateError::ConflictingQubitSources),
            (None, None) => return Err(TranslateError::MissingQubitSource),
        };

        let mut ruleset = self.ruleset.unwrap_or_else(rules::default_ruleset);
        for name in &self.extensions {
            let extension = rules::extension(name)
                .ok_or_else(|| TranslateError::UnknownExtension(name.clone()))?;
            ruleset.add_rules(&extension);
        }

        info!(
            "Built engine over {} qubits with {} rules",
            qubits.len(),
            ruleset.len()
        );
        Ok(CirqEngine::assemble(
            ruleset,
            qubits,
            device,
            self.log_masked_causes,
        ))
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
