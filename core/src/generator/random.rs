use rand::RngExt;

use super::*;

/// Retries allowed per mine, as a multiple of the cell count.
const ATTEMPTS_PER_CELL: u32 = 64;

/// Uniform placement by rejection sampling: draw a random cell, redraw if it is
/// already mined.
///
/// The starting cell is not special-cased here, the engine relocates a mine out
/// of the way on the first reveal instead.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RandomMineGenerator {
    attempts_per_cell: u32,
}

impl RandomMineGenerator {
    pub const fn new(attempts_per_cell: u32) -> Self {
        Self { attempts_per_cell }
    }
}

impl Default for RandomMineGenerator {
    fn default() -> Self {
        Self::new(ATTEMPTS_PER_CELL)
    }
}

impl MineLayoutGenerator for RandomMineGenerator {
    fn generate<R: Rng + ?Sized>(
        &self,
        size: Coord2,
        mines: CellCount,
        rng: &mut R,
    ) -> Result<MineLayout> {
        let mut layout = MineLayout::empty(size);
        let total_cells = layout.total_cells();

        if mines > total_cells {
            return Err(GameError::TooManyMines);
        }

        let (rows, cols) = size;
        let max_attempts = u32::from(total_cells).saturating_mul(self.attempts_per_cell);

        while layout.mine_count() < mines {
            let mut attempts = 0;
            loop {
                if attempts >= max_attempts {
                    log::warn!(
                        "Gave up seeding after {} attempts, placed {} of {} mines",
                        attempts,
                        layout.mine_count(),
                        mines
                    );
                    return Err(GameError::SeedingFailed);
                }
                attempts += 1;

                let coords = (rng.random_range(0..rows), rng.random_range(0..cols));
                if layout.place_mine(coords) {
                    break;
                }
            }
        }

        log::trace!("Seeded {} mines on a {:?} grid", mines, size);
        Ok(layout)
    }
}
