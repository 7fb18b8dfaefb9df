use serde::{Deserialize, Serialize};

/// Player-visible state of one cell, as stored by the engine.
///
/// `Hidden -> Revealed` is one-way, `Hidden <-> Flagged` toggles.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Hidden,
    Revealed,
    Flagged,
}

impl Default for CellState {
    fn default() -> Self {
        Self::Hidden
    }
}

/// What a revealed cell shows.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    Mine,
    Count(u8),
}
