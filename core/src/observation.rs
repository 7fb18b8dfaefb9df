use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// How a renderer should draw one cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed(u8),
    /// Only shown once the game is over.
    Mine,
    /// The mine that ended the game.
    Exploded,
}

/// Snapshot of everything the player is allowed to see.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub size: Coord2,
    pub status: GameStatus,
    pub mines_left: isize,
    pub revealed: Array2<Option<u8>>,
    pub flags: Array2<bool>,
    /// Mine positions, present only after the game has finished.
    pub mines: Option<Array2<bool>>,
    pub triggered_mine: Option<Coord2>,
}

impl Observation {
    pub fn from_engine<R: Rng>(engine: &GameEngine<R>) -> Self {
        let size = engine.size();
        let mut revealed = Array2::from_elem(size.to_nd_index(), None);
        let mut flags = Array2::from_elem(size.to_nd_index(), false);
        let mut mines = engine
            .is_finished()
            .then(|| Array2::from_elem(size.to_nd_index(), false));

        let (rows, cols) = size;
        for row in 0..rows {
            for col in 0..cols {
                let coords = (row, col);
                match engine.cell_at(coords) {
                    CellState::Hidden => {}
                    CellState::Revealed => {
                        revealed[coords.to_nd_index()] = engine.adjacent_mine_count(coords)
                    }
                    CellState::Flagged => flags[coords.to_nd_index()] = true,
                }
                if let Some(mines) = mines.as_mut() {
                    mines[coords.to_nd_index()] = engine.has_mine_at(coords);
                }
            }
        }

        Self {
            size,
            status: engine.status(),
            mines_left: engine.mines_left(),
            revealed,
            flags,
            mines,
            triggered_mine: engine.triggered_mine(),
        }
    }

    pub fn cell(&self, coords: Coord2) -> CellView {
        let index = coords.to_nd_index();

        if self.triggered_mine == Some(coords) {
            return CellView::Exploded;
        }
        if let Some(count) = self.revealed[index] {
            return CellView::Revealed(count);
        }
        if self.mines.as_ref().is_some_and(|mines| mines[index]) {
            return CellView::Mine;
        }
        if self.flags[index] {
            CellView::Flagged
        } else {
            CellView::Hidden
        }
    }
}
