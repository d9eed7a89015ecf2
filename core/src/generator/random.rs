use alloc::vec::Vec;
use ndarray::Array2;
use smallvec::SmallVec;

use super::*;

/// Uniform random placement that keeps an anchor cell, and optionally its
/// whole neighborhood, free of mines.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMineGenerator {
    seed: u64,
    anchor: Pos,
    safety: StartSafety,
}

impl RandomMineGenerator {
    pub fn new(seed: u64, anchor: Pos, safety: StartSafety) -> Self {
        Self {
            seed,
            anchor,
            safety,
        }
    }

    fn exclusion_zone(&self, config: GameConfig) -> SmallVec<[Pos; 9]> {
        let mut zone: SmallVec<[Pos; 9]> = SmallVec::new();
        zone.push(self.anchor);

        if matches!(self.safety, StartSafety::SafeZone) {
            zone.extend(neighbors(self.anchor, config.size));
        }

        if config.mines.saturating_add(zone.len() as CellCount) > config.total_cells() {
            log::warn!(
                "start zone of {} cells leaves no room for {} mines, excluding the anchor only",
                zone.len(),
                config.mines
            );
            zone.truncate(1);
        }

        zone
    }
}

impl MineLayoutGenerator for RandomMineGenerator {
    fn generate(self, config: GameConfig) -> MineLayout {
        use rand::prelude::*;

        let size = config.size;
        let zone = self.exclusion_zone(config);

        let (x_end, y_end) = size;
        let mut candidates: Vec<Pos> = Vec::with_capacity(config.total_cells() as usize);
        for x in 0..x_end {
            for y in 0..y_end {
                let pos = (x, y);
                if !zone.contains(&pos) {
                    candidates.push(pos);
                }
            }
        }

        let mine_goal = config.mines.min(candidates.len() as CellCount);
        if mine_goal < config.mines {
            log::warn!(
                "requested {} mines but only {} cells are available",
                config.mines,
                mine_goal
            );
        }

        let mut mask: Array2<bool> = Array2::default(size.nd());
        let mut rng = SmallRng::seed_from_u64(self.seed);
        for _ in 0..mine_goal {
            let pick = rng.random_range(0..candidates.len());
            mask[candidates.swap_remove(pick).nd()] = true;
        }

        log::debug!(
            "placed {} mines on a {}x{} board around {:?}",
            mine_goal,
            x_end,
            y_end,
            self.anchor
        );
        MineLayout::from_mask(mask)
    }
}
