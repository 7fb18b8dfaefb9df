#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use observation::*;
pub use tile::*;
pub use types::*;

mod engine;
mod error;
mod generator;
mod observation;
mod tile;
mod types;

/// Largest width or height accepted by default.
pub const MAX_DIMENSION: Coord = 15;

/// Width and height a host should offer when nothing else is configured.
pub const DEFAULT_DIMENSION: Coord = 7;

/// Fraction of cells holding a mine when nothing else is configured.
pub const DEFAULT_DENSITY: f64 = 0.1;

/// Bounds the engine enforces on new games.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    pub max_dimension: Coord,
}

impl Limits {
    pub const fn new(max_dimension: Coord) -> Self {
        Self { max_dimension }
    }

    pub const fn accepts(&self, dimension: Coord) -> bool {
        dimension >= 1 && dimension <= self.max_dimension
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::new(MAX_DIMENSION)
    }
}

/// Parameters of a single game: grid size and mine density.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub width: Coord,
    pub height: Coord,
    pub density: f64,
}

impl GameConfig {
    pub const fn new(width: Coord, height: Coord, density: f64) -> Self {
        Self {
            width,
            height,
            density,
        }
    }

    /// Grid shape as `(rows, cols)`.
    pub const fn size(&self) -> Coord2 {
        (self.height, self.width)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.width, self.height)
    }

    /// `ceil(width * height * density)`
    pub fn mine_count(&self) -> CellCount {
        let exact = f64::from(self.total_cells()) * self.density;
        // `as` saturates, and truncates toward zero for the positive values used here
        let whole = exact as CellCount;
        if f64::from(whole) < exact {
            whole.saturating_add(1)
        } else {
            whole
        }
    }

    /// Checks the config against `limits` and returns how many mines it asks for.
    pub fn validate(&self, limits: &Limits) -> Result<CellCount> {
        if !limits.accepts(self.width) || !limits.accepts(self.height) {
            return Err(GameError::InvalidDimensions);
        }

        // also rejects NaN
        if !(self.density > 0.0 && self.density < 1.0) {
            return Err(GameError::InvalidDensity);
        }

        let mines = self.mine_count();
        if mines >= self.total_cells() {
            log::warn!(
                "{} mines requested but only {} cells, no safe first move possible",
                mines,
                self.total_cells()
            );
            return Err(GameError::TooManyMines);
        }

        Ok(mines)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSION, DEFAULT_DIMENSION, DEFAULT_DENSITY)
    }
}

/// Where the mines are. Indexed by `(row, col)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    /// Mine-free layout of `size` `(rows, cols)`.
    pub fn empty(size: Coord2) -> Self {
        Self {
            mine_mask: Array2::default(size.to_nd_index()),
            mine_count: 0,
        }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut layout = Self::empty(size);

        for &coords in mine_coords {
            let coords = layout.validate_coords(coords)?;
            layout.place_mine(coords);
        }

        Ok(layout)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    /// Shape as `(rows, cols)`.
    pub fn size(&self) -> Coord2 {
        grid_shape(&self.mine_mask)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords).filter(|&pos| self[pos]).count() as u8
    }

    /// Every mined position, row by row.
    pub fn mine_coords(&self) -> Vec<Coord2> {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((row, col), _)| (row as Coord, col as Coord))
            .collect()
    }

    /// Every unmined position except `excluded`, row by row.
    pub(crate) fn safe_coords_except(&self, excluded: Coord2) -> Vec<Coord2> {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| !is_mine)
            .map(|((row, col), _)| (row as Coord, col as Coord))
            .filter(|&coords| coords != excluded)
            .collect()
    }

    /// Returns `false` when the cell was already mined.
    pub(crate) fn place_mine(&mut self, coords: Coord2) -> bool {
        if self[coords] {
            return false;
        }
        self[coords] = true;
        self.mine_count += 1;
        true
    }

    /// Moves the mine at `from` onto the unmined cell `to`, keeping the count.
    pub(crate) fn move_mine(&mut self, from: Coord2, to: Coord2) {
        debug_assert!(self[from] && !self[to]);
        self[from] = false;
        self[to] = true;
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.mine_mask.iter_neighbors(coords)
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for MineLayout {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.mine_mask[coords.to_nd_index()]
    }
}

/// A cell whose visible state changed during a reveal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellChange {
    pub coords: Coord2,
    pub kind: CellKind,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RevealResult {
    pub status: GameStatus,
    /// In reveal order. After a loss the triggered mine comes first, followed by
    /// every other mine.
    pub changed: Vec<CellChange>,
}

impl RevealResult {
    pub(crate) fn unchanged(status: GameStatus) -> Self {
        Self {
            status,
            changed: Vec::new(),
        }
    }

    pub fn has_update(&self) -> bool {
        !self.changed.is_empty()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagResult {
    pub new_state: CellState,
    pub changed: bool,
}

impl FlagResult {
    pub const fn has_update(self) -> bool {
        self.changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mine_count_rounds_up() {
        assert_eq!(GameConfig::new(7, 7, 0.1).mine_count(), 5);
        assert_eq!(GameConfig::new(9, 9, 0.1).mine_count(), 9);
        assert_eq!(GameConfig::new(10, 10, 0.1).mine_count(), 10);
        assert_eq!(GameConfig::new(1, 2, 0.01).mine_count(), 1);
        assert_eq!(GameConfig::new(15, 15, 0.5).mine_count(), 113);
    }

    #[test]
    fn validate_checks_dimensions_against_limits() {
        let limits = Limits::default();

        assert_eq!(
            GameConfig::new(0, 5, 0.1).validate(&limits),
            Err(GameError::InvalidDimensions)
        );
        assert_eq!(
            GameConfig::new(5, 16, 0.1).validate(&limits),
            Err(GameError::InvalidDimensions)
        );
        assert_eq!(GameConfig::new(15, 15, 0.1).validate(&limits), Ok(23));
        assert_eq!(
            GameConfig::new(20, 20, 0.1).validate(&Limits::new(30)),
            Ok(40)
        );
    }

    #[test]
    fn validate_rejects_density_outside_open_interval() {
        let limits = Limits::default();

        for density in [0.0, 1.0, -0.5, 1.5, f64::NAN, f64::INFINITY] {
            assert_eq!(
                GameConfig::new(5, 5, density).validate(&limits),
                Err(GameError::InvalidDensity),
                "density {}",
                density
            );
        }
    }

    #[test]
    fn validate_rejects_boards_without_a_safe_cell() {
        let limits = Limits::default();

        assert_eq!(
            GameConfig::new(1, 1, 0.5).validate(&limits),
            Err(GameError::TooManyMines)
        );
        assert_eq!(
            GameConfig::new(2, 1, 0.9).validate(&limits),
            Err(GameError::TooManyMines)
        );
        assert_eq!(GameConfig::new(2, 1, 0.5).validate(&limits), Ok(1));
    }

    #[test]
    fn layout_from_coords_counts_distinct_mines() {
        let layout = MineLayout::from_mine_coords((2, 3), &[(0, 0), (1, 2), (0, 0)]).unwrap();

        assert_eq!(layout.size(), (2, 3));
        assert_eq!(layout.mine_count(), 2);
        assert_eq!(layout.safe_cell_count(), 4);
        assert_eq!(layout.mine_coords(), [(0, 0), (1, 2)]);
    }

    #[test]
    fn layout_from_coords_rejects_out_of_range() {
        assert_eq!(
            MineLayout::from_mine_coords((2, 3), &[(2, 0)]),
            Err(GameError::OutOfBounds)
        );
        assert_eq!(
            MineLayout::from_mine_coords((2, 3), &[(0, 3)]),
            Err(GameError::OutOfBounds)
        );
    }

    #[test]
    fn adjacent_mine_count_uses_eight_neighborhood() {
        let layout = MineLayout::from_mine_coords((3, 3), &[(0, 0), (0, 1), (1, 0)]).unwrap();

        assert_eq!(layout.adjacent_mine_count((1, 1)), 3);
        assert_eq!(layout.adjacent_mine_count((0, 2)), 1);
        assert_eq!(layout.adjacent_mine_count((2, 0)), 1);
        assert_eq!(layout.adjacent_mine_count((2, 2)), 0);
    }

    #[test]
    fn reveal_result_serializes_for_hosts() {
        let result = RevealResult {
            status: GameStatus::Lost,
            changed: alloc::vec![
                CellChange {
                    coords: (1, 1),
                    kind: CellKind::Mine,
                },
                CellChange {
                    coords: (0, 2),
                    kind: CellKind::Count(3),
                },
            ],
        };

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            serde_json::json!({
                "status": "Lost",
                "changed": [
                    { "coords": [1, 1], "kind": "Mine" },
                    { "coords": [0, 2], "kind": { "Count": 3 } },
                ],
            })
        );
    }

    #[test]
    fn move_mine_keeps_count() {
        let mut layout = MineLayout::from_mine_coords((2, 2), &[(0, 0)]).unwrap();

        layout.move_mine((0, 0), (1, 1));

        assert_eq!(layout.mine_count(), 1);
        assert!(!layout.contains_mine((0, 0)));
        assert!(layout.contains_mine((1, 1)));
        assert_eq!(layout.safe_coords_except((0, 0)), [(0, 1), (1, 0)]);
    }
}
