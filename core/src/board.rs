use alloc::collections::VecDeque;
use core::fmt::{self, Write};
use core::ops::BitOr;
use hashbrown::HashSet;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Game phase. Monotonic: once `Lost` or `Won`, every mutating call is a
/// no-op.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    InProgress,
    Won,
    Lost,
}

impl GamePhase {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GamePhase {
    fn default() -> Self {
        Self::InProgress
    }
}

/// Cells whose state changed in one call, inline for the common
/// single-cell case.
pub type ChangedCells = SmallVec<[Pos; 8]>;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OpenOutcome {
    NoChange,
    Opened,
    Exploded,
    Won,
}

impl OpenOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Merge for multi-cell opens: a loss anywhere dominates, then a win.
impl BitOr for OpenOutcome {
    type Output = OpenOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use OpenOutcome::*;
        match (self, rhs) {
            (Exploded, _) | (_, Exploded) => Exploded,
            (Won, _) | (_, Won) => Won,
            (Opened, _) | (_, Opened) => Opened,
            (NoChange, NoChange) => NoChange,
        }
    }
}

/// Result of one open or chord-open call: the merged outcome plus the
/// complete set of cells whose state changed, for incremental redraw.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenReport {
    pub outcome: OpenOutcome,
    pub changed: ChangedCells,
}

impl OpenReport {
    fn unchanged() -> Self {
        Self {
            outcome: OpenOutcome::NoChange,
            changed: ChangedCells::new(),
        }
    }

    pub fn has_update(&self) -> bool {
        self.outcome.has_update()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Changed,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed)
    }
}

/// The board engine: one fixed-size grid, one game, caller-driven and
/// synchronous. Mines are placed on the first open, never before, so the
/// first opened cell can be excluded from placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    config: GameConfig,
    layout: Option<MineLayout>,
    grid: Array2<Tile>,
    opened: CellCount,
    flagged: CellCount,
    phase: GamePhase,
    exploded: Option<Pos>,
    seed: u64,
    safety: StartSafety,
}

impl Board {
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_safety(config, seed, StartSafety::default())
    }

    pub fn with_safety(config: GameConfig, seed: u64, safety: StartSafety) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            layout: None,
            grid: Array2::default(config.size.nd()),
            opened: 0,
            flagged: 0,
            phase: GamePhase::InProgress,
            exploded: None,
            seed,
            safety,
        })
    }

    /// Board over a pre-built layout, for replays and shared puzzles.
    /// Placement is already frozen, so first-open safety does not apply.
    pub fn from_layout(layout: MineLayout) -> Self {
        let config = layout.config();
        Self {
            config,
            grid: Array2::default(config.size.nd()),
            layout: Some(layout),
            opened: 0,
            flagged: 0,
            phase: GamePhase::InProgress,
            exploded: None,
            seed: 0,
            safety: StartSafety::default(),
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Pos {
        self.config.size
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, GamePhase::Lost)
    }

    pub fn is_game_clear(&self) -> bool {
        matches!(self.phase, GamePhase::Won)
    }

    pub fn opened_count(&self) -> CellCount {
        self.opened
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged
    }

    /// How many mines have not been flagged yet. Negative when the caller
    /// has flagged more cells than there are mines.
    pub fn mines_left(&self) -> isize {
        (self.config.mines as isize) - (self.flagged as isize)
    }

    /// The position whose opening lost the game, if any.
    pub fn exploded_at(&self) -> Option<Pos> {
        self.exploded
    }

    pub fn tile(&self, pos: Pos) -> Result<Tile> {
        let pos = self.validate(pos)?;
        Ok(self.grid[pos.nd()])
    }

    /// Per-cell snapshot. `is_mine` is not concealed before the game ends;
    /// display-time concealment is the caller's concern.
    pub fn cell_state(&self, pos: Pos) -> Result<CellState> {
        let pos = self.validate(pos)?;
        let tile = self.grid[pos.nd()];
        Ok(CellState {
            is_open: tile.is_open(),
            is_flagged: tile.is_flagged(),
            is_mine: self.mine_at(pos),
        })
    }

    /// Mines among the up-to-8 neighbors, 0 before the first open has
    /// placed any.
    pub fn count_mines_around(&self, pos: Pos) -> Result<u8> {
        let pos = self.validate(pos)?;
        Ok(self.adjacent_mines(pos))
    }

    /// Open a closed cell, cascading through zero-count regions. Opening
    /// an open or flagged cell, or acting on a finished game, changes
    /// nothing and reports it.
    pub fn open_cell(&mut self, pos: Pos) -> Result<OpenReport> {
        let pos = self.validate(pos)?;

        if self.phase.is_terminal() || !self.grid[pos.nd()].is_closed() {
            return Ok(OpenReport::unchanged());
        }

        self.ensure_layout(pos);

        let mut changed = ChangedCells::new();
        let outcome = self.open_tile(pos, &mut changed);
        Ok(OpenReport { outcome, changed })
    }

    /// Open every closed neighbor of an open cell whose adjacency count is
    /// matched by its flagged neighbors. No-op otherwise.
    pub fn chord_open(&mut self, pos: Pos) -> Result<OpenReport> {
        let pos = self.validate(pos)?;

        if self.phase.is_terminal() {
            return Ok(OpenReport::unchanged());
        }

        let Tile::Open(count) = self.grid[pos.nd()] else {
            return Ok(OpenReport::unchanged());
        };
        if count != self.count_neighbors(pos, Tile::is_flagged) {
            return Ok(OpenReport::unchanged());
        }

        let size = self.config.size;
        let mut changed = ChangedCells::new();
        let outcome = neighbors(pos, size)
            .map(|neighbor| self.open_tile(neighbor, &mut changed))
            .reduce(BitOr::bitor)
            .unwrap_or(OpenOutcome::NoChange);
        Ok(OpenReport { outcome, changed })
    }

    /// Flip a closed cell to flagged or back. Flags are unlimited and
    /// never touch the mine layout, the phase, or any count.
    pub fn toggle_flag(&mut self, pos: Pos) -> Result<FlagOutcome> {
        let pos = self.validate(pos)?;

        if self.phase.is_terminal() {
            return Ok(FlagOutcome::NoChange);
        }

        Ok(match self.grid[pos.nd()] {
            Tile::Closed => {
                self.grid[pos.nd()] = Tile::Flagged;
                self.flagged += 1;
                FlagOutcome::Changed
            }
            Tile::Flagged => {
                self.grid[pos.nd()] = Tile::Closed;
                self.flagged -= 1;
                FlagOutcome::Changed
            }
            Tile::Open(_) | Tile::Exploded => FlagOutcome::NoChange,
        })
    }

    /// Flag every closed neighbor of an open cell whose adjacency count is
    /// matched by its unopened neighbors. No-op otherwise.
    pub fn chord_flag(&mut self, pos: Pos) -> Result<FlagOutcome> {
        let pos = self.validate(pos)?;

        if self.phase.is_terminal() {
            return Ok(FlagOutcome::NoChange);
        }

        let Tile::Open(count) = self.grid[pos.nd()] else {
            return Ok(FlagOutcome::NoChange);
        };
        if count != self.count_neighbors(pos, |tile| !tile.is_open()) {
            return Ok(FlagOutcome::NoChange);
        }

        let size = self.config.size;
        let mut outcome = FlagOutcome::NoChange;
        for neighbor in neighbors(pos, size) {
            if self.grid[neighbor.nd()].is_closed() {
                self.grid[neighbor.nd()] = Tile::Flagged;
                self.flagged += 1;
                outcome = FlagOutcome::Changed;
            }
        }
        Ok(outcome)
    }

    fn validate(&self, pos: Pos) -> Result<Pos> {
        if in_bounds(pos, self.config.size) {
            Ok(pos)
        } else {
            Err(BoardError::OutOfBounds)
        }
    }

    fn ensure_layout(&mut self, anchor: Pos) {
        if self.layout.is_none() {
            let generator = RandomMineGenerator::new(self.seed, anchor, self.safety);
            self.layout = Some(generator.generate(self.config));
        }
    }

    fn mine_at(&self, pos: Pos) -> bool {
        self.layout.as_ref().is_some_and(|layout| layout.contains(pos))
    }

    fn adjacent_mines(&self, pos: Pos) -> u8 {
        self.layout
            .as_ref()
            .map_or(0, |layout| layout.adjacent_mines(pos))
    }

    fn count_neighbors(&self, pos: Pos, matches_tile: impl Fn(Tile) -> bool) -> u8 {
        neighbors(pos, self.config.size)
            .filter(|&neighbor| matches_tile(self.grid[neighbor.nd()]))
            .count() as u8
    }

    fn open_tile(&mut self, pos: Pos, changed: &mut ChangedCells) -> OpenOutcome {
        if self.phase.is_terminal() || !self.grid[pos.nd()].is_closed() {
            return OpenOutcome::NoChange;
        }

        if self.mine_at(pos) {
            self.grid[pos.nd()] = Tile::Exploded;
            self.exploded = Some(pos);
            self.phase = GamePhase::Lost;
            changed.push(pos);
            log::debug!("opened a mine at {:?}, game lost", pos);
            return OpenOutcome::Exploded;
        }

        let size = self.config.size;
        let count = self.adjacent_mines(pos);
        self.grid[pos.nd()] = Tile::Open(count);
        self.opened += 1;
        changed.push(pos);
        log::debug!("opened {:?}, adjacent mines: {}", pos, count);

        if count == 0 {
            let mut visited: HashSet<Pos> = HashSet::from_iter([pos]);
            let mut queue: VecDeque<Pos> = neighbors(pos, size).collect();

            while let Some(next) = queue.pop_front() {
                if !visited.insert(next) {
                    continue;
                }

                // flags and already-open tiles are a hard stop
                if !self.grid[next.nd()].is_closed() {
                    continue;
                }

                let next_count = self.adjacent_mines(next);
                self.grid[next.nd()] = Tile::Open(next_count);
                self.opened += 1;
                changed.push(next);
                log::trace!("cascade opened {:?}, adjacent mines: {}", next, next_count);

                if next_count == 0 {
                    queue.extend(neighbors(next, size).filter(|pos| !visited.contains(pos)));
                }
            }
        }

        if self.opened == self.config.safe_cells() {
            self.phase = GamePhase::Won;
            log::debug!("all safe cells open, game won");
            OpenOutcome::Won
        } else {
            OpenOutcome::Opened
        }
    }
}

/// One character per tile, row by row: `.` closed, digit or space open,
/// `F` flagged, `*` the exploded mine. Unopened mines stay `.` even after
/// a loss; revealing them is the caller's job.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (x_end, y_end) = self.config.size;
        for y in 0..y_end {
            for x in 0..x_end {
                f.write_char(match self.grid[(x, y).nd()] {
                    Tile::Closed => '.',
                    Tile::Open(0) => ' ',
                    Tile::Open(count) => (b'0' + count) as char,
                    Tile::Flagged => 'F',
                    Tile::Exploded => '*',
                })?;
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}
