/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Zero-based board position `(x, y)`.
pub type Pos = (Coord, Coord);

/// Conversion into an `ndarray` index.
pub trait GridIndex {
    fn nd(self) -> [usize; 2];
}

impl GridIndex for Pos {
    fn nd(self) -> [usize; 2] {
        [self.0.into(), self.1.into()]
    }
}

pub const fn area(width: Coord, height: Coord) -> CellCount {
    (width as CellCount).saturating_mul(height as CellCount)
}

pub const fn in_bounds(pos: Pos, size: Pos) -> bool {
    pos.0 < size.0 && pos.1 < size.1
}

const OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Iterates the up-to-8 neighbors of `pos` that fall inside a `size` board.
pub fn neighbors(pos: Pos, size: Pos) -> impl Iterator<Item = Pos> {
    OFFSETS.iter().filter_map(move |&(dx, dy)| {
        let x = pos.0.checked_add_signed(dx).filter(|&x| x < size.0)?;
        let y = pos.1.checked_add_signed(dy).filter(|&y| y < size.1)?;
        Some((x, y))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn corner_has_three_neighbors() {
        let found: Vec<Pos> = neighbors((0, 0), (3, 3)).collect();
        assert_eq!(found, [(1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn interior_has_eight_neighbors() {
        assert_eq!(neighbors((1, 1), (3, 3)).count(), 8);
    }

    #[test]
    fn single_cell_board_has_no_neighbors() {
        assert_eq!(neighbors((0, 0), (1, 1)).count(), 0);
    }

    #[test]
    fn strip_board_clips_vertical_neighbors() {
        let found: Vec<Pos> = neighbors((1, 0), (4, 1)).collect();
        assert_eq!(found, [(0, 0), (2, 0)]);
    }

    #[test]
    fn area_saturates_at_count_limit() {
        assert_eq!(area(255, 255), 65025);
        assert_eq!(area(0, 9), 0);
    }
}
