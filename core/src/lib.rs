#![no_std]

extern crate alloc;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use error::*;
pub use generator::*;
pub use tile::*;
pub use types::*;

mod board;
mod error;
mod generator;
mod tile;
mod types;

/// Board dimensions and mine count, fixed for the life of a game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Pos,
    pub mines: CellCount,
}

impl GameConfig {
    pub const BEGINNER: GameConfig = GameConfig::new_unchecked((9, 9), 10);
    pub const INTERMEDIATE: GameConfig = GameConfig::new_unchecked((16, 16), 40);
    pub const EXPERT: GameConfig = GameConfig::new_unchecked((30, 16), 99);

    pub const fn new_unchecked(size: Pos, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new(size: Pos, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, mines);
        config.validate()?;
        Ok(config)
    }

    /// Both dimensions must be positive and at least one cell must stay
    /// free of mines.
    pub fn validate(&self) -> Result<()> {
        let (width, height) = self.size;
        if width == 0 || height == 0 || self.mines >= area(width, height) {
            Err(BoardError::InvalidConfiguration)
        } else {
            Ok(())
        }
    }

    pub const fn total_cells(&self) -> CellCount {
        area(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

/// A frozen mine placement: boolean mask plus its mine count.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mask: Array2<bool>,
    mines: CellCount,
}

impl MineLayout {
    pub fn from_mask(mask: Array2<bool>) -> Self {
        let mines = mask
            .iter()
            .filter(|&&mine| mine)
            .count()
            .try_into()
            .unwrap();
        Self { mask, mines }
    }

    pub fn from_positions(size: Pos, positions: &[Pos]) -> Result<Self> {
        let mut mask: Array2<bool> = Array2::default(size.nd());

        for &pos in positions {
            if !in_bounds(pos, size) {
                return Err(BoardError::OutOfBounds);
            }
            mask[pos.nd()] = true;
        }

        Ok(Self::from_mask(mask))
    }

    pub fn size(&self) -> Pos {
        let dim = self.mask.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mines)
    }

    pub fn total_cells(&self) -> CellCount {
        self.mask.len().try_into().unwrap()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mines
    }

    pub fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.mask[pos.nd()]
    }

    /// Mines among the up-to-8 neighbors of `pos`. Recomputed on demand;
    /// the mask never changes once built.
    pub fn adjacent_mines(&self, pos: Pos) -> u8 {
        neighbors(pos, self.size())
            .filter(|&neighbor| self.mask[neighbor.nd()])
            .count() as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn config_rejects_zero_dimensions() {
        assert_eq!(
            GameConfig::new((0, 3), 0),
            Err(BoardError::InvalidConfiguration)
        );
        assert_eq!(
            GameConfig::new((3, 0), 0),
            Err(BoardError::InvalidConfiguration)
        );
    }

    #[test]
    fn config_requires_one_safe_cell() {
        assert_eq!(
            GameConfig::new((3, 3), 9),
            Err(BoardError::InvalidConfiguration)
        );
        let config = GameConfig::new((3, 3), 8).unwrap();
        assert_eq!(config.total_cells(), 9);
        assert_eq!(config.safe_cells(), 1);
    }

    #[test]
    fn difficulty_tiers_are_valid() {
        for tier in [
            GameConfig::BEGINNER,
            GameConfig::INTERMEDIATE,
            GameConfig::EXPERT,
        ] {
            tier.validate().unwrap();
        }
        assert_eq!(GameConfig::EXPERT.total_cells(), 480);
    }

    #[test]
    fn layout_rejects_out_of_bounds_positions() {
        assert_eq!(
            MineLayout::from_positions((2, 2), &[(2, 0)]),
            Err(BoardError::OutOfBounds)
        );
    }

    #[test]
    fn layout_counts_adjacent_mines() {
        let layout = MineLayout::from_positions((3, 3), &[(0, 0), (1, 1), (2, 2)]).unwrap();

        assert_eq!(layout.mine_count(), 3);
        assert_eq!(layout.safe_cells(), 6);
        assert_eq!(layout.adjacent_mines((1, 0)), 2);
        assert_eq!(layout.adjacent_mines((1, 1)), 2);
        assert_eq!(layout.adjacent_mines((2, 0)), 1);
        assert_eq!(layout.adjacent_mines((0, 2)), 1);
    }

    #[test]
    fn mask_constructor_derives_count() {
        let mask = Array2::from_shape_vec([2, 2], vec![true, false, false, true]).unwrap();
        let layout = MineLayout::from_mask(mask);

        assert_eq!(layout.mine_count(), 2);
        assert!(layout.contains((0, 0)));
        assert!(layout.contains((1, 1)));
        assert_eq!(layout.config(), GameConfig::new_unchecked((2, 2), 2));
    }
}
