//! Source-to-target qubit identity mapping.
//!
//! The mapping is filled in as allocation commands arrive. An allocation that
//! carries a [`QubitPlacementTag`](qbridge_ir::QubitPlacementTag) records the
//! declared position in both directions; one without records the identity in
//! the forward direction only. Positions are not checked against the target
//! device here.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use qbridge_ir::{Command, QubitId};

/// Forward and inverse maps between source qubits and target positions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QubitMapping {
    /// Source qubit to target position.
    forward: FxHashMap<QubitId, u32>,
    /// Target position to source qubit, placement entries only.
    inverse: FxHashMap<u32, QubitId>,
}

impl QubitMapping {
    /// Create a new empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a declared placement `qubit → position` in both directions.
    ///
    /// If `qubit` was previously placed elsewhere, that stale inverse entry is
    /// dropped. If another qubit held `position`, its forward entry is
    /// evicted. Both maps stay exact inverses over placement entries.
    pub fn place(&mut self, qubit: QubitId, position: u32) {
        if let Some(old) = self.forward.insert(qubit, position) {
            if old != position && self.inverse.get(&old) == Some(&qubit) {
                self.inverse.remove(&old);
            }
        }
        if let Some(other) = self.inverse.insert(position, qubit) {
            if other != qubit && self.forward.get(&other) == Some(&position) {
                warn!("{} displaces {} from position {}", qubit, other, position);
                self.forward.remove(&other);
            }
        }
    }

    /// Record `qubit → qubit` unless `qubit` already has an entry.
    ///
    /// Never touches the inverse map.
    pub fn place_identity(&mut self, qubit: QubitId) {
        self.forward.entry(qubit).or_insert(qubit.0);
    }

    /// Update the mapping for an allocation command.
    ///
    /// The first placement tag in tag order is used; later ones are ignored.
    /// Commands without a qubit are ignored.
    pub fn record_allocation(&mut self, command: &Command) {
        let Some(qubit) = command.first_qubit() else {
            return;
        };
        match command.placement() {
            Some(tag) => {
                debug!("Placing {} at position {}", qubit, tag.position);
                self.place(qubit, tag.position);
            }
            None => {
                debug!("No placement for {}, mapping to itself", qubit);
                self.place_identity(qubit);
            }
        }
    }

    /// Get the position of a source qubit, if recorded.
    pub fn get(&self, qubit: QubitId) -> Option<u32> {
        self.forward.get(&qubit).copied()
    }

    /// Get the position of a source qubit, defaulting to its own id.
    pub fn resolve(&self, qubit: QubitId) -> u32 {
        self.get(qubit).unwrap_or(qubit.0)
    }

    /// Get the source qubit placed at a position.
    pub fn inverse(&self, position: u32) -> Option<QubitId> {
        self.inverse.get(&position).copied()
    }

    /// Number of forward entries.
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Check if the mapping is empty.
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Number of inverse entries.
    pub fn inverse_len(&self) -> usize {
        self.inverse.len()
    }

    /// Iterate over (source, position) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (QubitId, u32)> + '_ {
        self.forward.iter().map(|(&q, &p)| (q, p))
    }

    /// Iterate over (position, source) pairs.
    pub fn inverse_iter(&self) -> impl Iterator<Item = (u32, QubitId)> + '_ {
        self.inverse.iter().map(|(&p, &q)| (p, q))
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.forward.clear();
        self.inverse.clear();
    }
}
