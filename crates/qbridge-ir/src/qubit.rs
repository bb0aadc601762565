//! Source-side qubit identifiers and target-side qubit values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a qubit in the source command stream.
///
/// Introduced by an allocation command; opaque to the translator apart from
/// equality and hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

/// A qubit of the target representation.
///
/// Line qubits are addressed by a single index, grid qubits by row and
/// column. Grid qubits order row-major; line qubits order before grid qubits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TargetQubit {
    /// A qubit on a one-dimensional line.
    Line {
        /// Position on the line.
        index: u32,
    },
    /// A qubit on a two-dimensional grid.
    Grid {
        /// Grid row.
        row: i32,
        /// Grid column.
        col: i32,
    },
}

impl TargetQubit {
    /// Create a line qubit.
    pub fn line(index: u32) -> Self {
        TargetQubit::Line { index }
    }

    /// Create a grid qubit.
    pub fn grid(row: i32, col: i32) -> Self {
        TargetQubit::Grid { row, col }
    }

    /// `n` line qubits with indices `0..n`.
    pub fn line_range(n: u32) -> Vec<Self> {
        (0..n).map(TargetQubit::line).collect()
    }

    /// All qubits of a `rows × cols` grid, row-major.
    pub fn grid_rect(rows: i32, cols: i32) -> Vec<Self> {
        (0..rows)
            .flat_map(|row| (0..cols).map(move |col| TargetQubit::grid(row, col)))
            .collect()
    }
}

impl fmt::Display for TargetQubit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetQubit::Line { index } => write!(f, "LineQubit({index})"),
            TargetQubit::Grid { row, col } => write!(f, "GridQubit({row}, {col})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qubit_display() {
        assert_eq!(format!("{}", QubitId(0)), "q0");
        assert_eq!(format!("{}", TargetQubit::line(3)), "LineQubit(3)");
        assert_eq!(format!("{}", TargetQubit::grid(0, 1)), "GridQubit(0, 1)");
    }

    #[test]
    fn test_grid_rect_is_row_major() {
        let qubits = TargetQubit::grid_rect(2, 2);
        assert_eq!(
            qubits,
            vec![
                TargetQubit::grid(0, 0),
                TargetQubit::grid(0, 1),
                TargetQubit::grid(1, 0),
                TargetQubit::grid(1, 1),
            ]
        );
        let mut sorted = qubits.clone();
        sorted.sort();
        assert_eq!(sorted, qubits);
    }

    #[test]
    fn test_line_range() {
        assert_eq!(TargetQubit::line_range(0), vec![]);
        assert_eq!(
            TargetQubit::line_range(2),
            vec![TargetQubit::line(0), TargetQubit::line(1)]
        );
    }
}
