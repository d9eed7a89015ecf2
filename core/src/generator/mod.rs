use serde::{Deserialize, Serialize};

use crate::*;

pub use random::*;

mod random;

/// Builds the frozen mine placement for a new game. Implementations other
/// than the random one can serve curated or replayed layouts.
pub trait MineLayoutGenerator {
    fn generate(self, config: GameConfig) -> MineLayout;
}

/// How much of the first-opened neighborhood is kept mine-free.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartSafety {
    /// Only the opened cell is excluded from placement.
    SafeCell,
    /// The opened cell and its neighbors are excluded, so the first open
    /// always starts a cascade.
    SafeZone,
}

impl Default for StartSafety {
    fn default() -> Self {
        Self::SafeZone
    }
}
