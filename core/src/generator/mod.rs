use crate::*;
use rand::Rng;
pub use random::*;

mod random;

pub trait MineLayoutGenerator {
    /// Builds a layout of `size` `(rows, cols)` holding exactly `mines` mines.
    fn generate<R: Rng + ?Sized>(
        &self,
        size: Coord2,
        mines: CellCount,
        rng: &mut R,
    ) -> Result<MineLayout>;
}
