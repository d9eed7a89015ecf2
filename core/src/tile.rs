use serde::{Deserialize, Serialize};

/// Player-visible state of a single grid position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    Closed,
    Open(u8),
    Flagged,
    /// The mine whose opening ended the game. Reported as open.
    Exploded,
}

impl Tile {
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open(_) | Self::Exploded)
    }

    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Closed)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::Closed
    }
}

/// Per-cell snapshot handed to callers. Copies only, never a reference
/// into the grid, so external code cannot corrupt board invariants.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellState {
    pub is_open: bool,
    pub is_flagged: bool,
    pub is_mine: bool,
}
