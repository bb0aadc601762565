//! qbridge command-stream translator
//!
//! This crate translates a stream of source quantum commands into a target
//! circuit by dispatching each command to a translation rule keyed by its
//! gate type.
//!
//! # Overview
//!
//! ```text
//! Commands ──▶ CirqEngine::receive
//!                 │
//!                 ├── Allocate   ──▶ QubitMapping (placement or identity)
//!                 ├── Deallocate / Barrier ──▶ ignored
//!                 ├── Flush      ──▶ buffer committed to Circuit
//!                 └── other      ──▶ Ruleset::translate ──▶ buffer
//! ```
//!
//! Rules are plain functions registered in a [`Ruleset`]. The built-in
//! libraries live in [`rules`]: a common gate set and the Xmon extension,
//! composed fresh for every engine by [`rules::default_ruleset`].
//!
//! # Example
//!
//! ```rust
//! use qbridge_ir::{Command, QubitId, SourceGate, TargetQubit};
//! use qbridge_translate::{BufferState, CirqEngine};
//!
//! let mut engine = CirqEngine::with_qubits(TargetQubit::line_range(2));
//! engine
//!     .receive(&[
//!         Command::allocate(QubitId(0)),
//!         Command::allocate(QubitId(1)),
//!         Command::gate(SourceGate::H, [QubitId(0)]),
//!         Command::gate(SourceGate::X, [QubitId(1)]).with_controls([QubitId(0)]),
//!         Command::flush(),
//!     ])
//!     .unwrap();
//!
//! assert_eq!(engine.circuit().len(), 2);
//! assert_eq!(engine.state(), BufferState::Fresh);
//! ```
//!
//! # Errors
//!
//! A command whose gate has no rule, or whose rule fails, is reported as
//! [`TranslateError::UnknownGate`] naming only the gate class. The underlying
//! [`RuleError`] is kept as the error source.

pub mod config;
pub mod engine;
pub mod error;
pub mod mapping;
pub mod rules;
pub mod ruleset;
pub mod tracing_config;

pub use config::{DeviceConfig, EngineConfig, LoggingConfig};
pub use engine::{BufferState, CirqEngine, EngineBuilder};
pub use error::{ConfigError, RuleError, RuleResult, TranslateError, TranslateResult};
pub use mapping::QubitMapping;
pub use ruleset::{Rule, Ruleset};
pub use tracing_config::{TracingConfig, TracingFormat, init_default_tracing, init_tracing};
