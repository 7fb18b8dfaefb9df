use alloc::collections::VecDeque;
use alloc::vec::Vec;
use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::{Rng, RngExt, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
///
/// Both ends are terminal until the next `start`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::InProgress
    }
}

/// One game session: the mine layout, what the player has uncovered, and the
/// random source used for seeding and first-move relocation.
#[derive(Clone, Debug)]
pub struct GameEngine<R = SmallRng> {
    limits: Limits,
    rng: R,
    mine_layout: MineLayout,
    board: Array2<CellState>,
    revealed_count: CellCount,
    flagged_count: CellCount,
    first_move_taken: bool,
    status: GameStatus,
    triggered_mine: Option<Coord2>,
}

impl GameEngine<SmallRng> {
    pub fn from_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::new(config, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn new(config: GameConfig, rng: R) -> Result<Self> {
        Self::with_limits(Limits::default(), config, rng)
    }

    pub fn with_limits(limits: Limits, config: GameConfig, mut rng: R) -> Result<Self> {
        let mine_layout = seed_layout(&limits, &config, &mut rng)?;
        let mut engine = Self::from_layout(mine_layout, rng)?;
        engine.limits = limits;
        Ok(engine)
    }

    /// Starts a game over a fixed layout. First-move relocation still applies,
    /// so the layout needs at least one safe cell.
    pub fn from_layout(mine_layout: MineLayout, rng: R) -> Result<Self> {
        if mine_layout.mine_count() >= mine_layout.total_cells() {
            log::warn!(
                "Layout has {} mines for {} cells, no safe cell",
                mine_layout.mine_count(),
                mine_layout.total_cells()
            );
            return Err(GameError::TooManyMines);
        }

        let size = mine_layout.size();
        Ok(Self {
            limits: Limits::default(),
            rng,
            mine_layout,
            board: Array2::default(size.to_nd_index()),
            revealed_count: 0,
            flagged_count: 0,
            first_move_taken: false,
            status: Default::default(),
            triggered_mine: None,
        })
    }

    /// Discards the current game and starts a new one. On error the current
    /// game is left untouched.
    pub fn start(&mut self, config: GameConfig) -> Result<()> {
        let mine_layout = seed_layout(&self.limits, &config, &mut self.rng)?;

        self.board = Array2::default(mine_layout.size().to_nd_index());
        self.mine_layout = mine_layout;
        self.revealed_count = 0;
        self.flagged_count = 0;
        self.first_move_taken = false;
        self.status = GameStatus::InProgress;
        self.triggered_mine = None;
        Ok(())
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Grid shape as `(rows, cols)`.
    pub fn size(&self) -> Coord2 {
        self.mine_layout.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.mine_layout.mine_count()
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    /// Mines minus flags, negative when the player over-flags.
    pub fn mines_left(&self) -> isize {
        (self.mine_layout.mine_count() as isize) - (self.flagged_count as isize)
    }

    pub fn first_move_taken(&self) -> bool {
        self.first_move_taken
    }

    /// # Panics
    ///
    /// If `coords` lies outside the grid.
    pub fn cell_at(&self, coords: Coord2) -> CellState {
        self.board[coords.to_nd_index()]
    }

    /// Adjacency count of a revealed safe cell, `None` for anything else.
    pub fn adjacent_mine_count(&self, coords: Coord2) -> Option<u8> {
        let coords = self.mine_layout.validate_coords(coords).ok()?;
        match self.board[coords.to_nd_index()] {
            CellState::Revealed if !self.mine_layout[coords] => {
                Some(self.mine_layout.adjacent_mine_count(coords))
            }
            _ => None,
        }
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn has_mine_at(&self, coords: Coord2) -> bool {
        self.mine_layout.contains_mine(coords)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagResult> {
        use CellState::*;

        let coords = self.mine_layout.validate_coords(coords)?;
        let current = self.board[coords.to_nd_index()];

        if self.status.is_finished() {
            return Ok(FlagResult {
                new_state: current,
                changed: false,
            });
        }

        let new_state = match current {
            Hidden => {
                self.flagged_count += 1;
                Flagged
            }
            Flagged => {
                self.flagged_count -= 1;
                Hidden
            }
            Revealed => Revealed,
        };
        self.board[coords.to_nd_index()] = new_state;

        Ok(FlagResult {
            new_state,
            changed: new_state != current,
        })
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealResult> {
        let coords = self.mine_layout.validate_coords(coords)?;

        if self.status.is_finished() || self.board[coords.to_nd_index()] != CellState::Hidden {
            return Ok(RevealResult::unchanged(self.status));
        }

        if !self.first_move_taken {
            self.first_move_taken = true;
            self.clear_first_move(coords);
        }

        if self.mine_layout[coords] {
            return Ok(self.detonate(coords));
        }

        let mut changed = Vec::new();
        self.flood_reveal(coords, &mut changed);

        if self.revealed_count == self.mine_layout.safe_cell_count() {
            self.end_game(GameStatus::Won);
        }

        Ok(RevealResult {
            status: self.status,
            changed,
        })
    }

    /// Moves a mine away from the first revealed cell.
    fn clear_first_move(&mut self, coords: Coord2) {
        if !self.mine_layout[coords] {
            return;
        }

        // layouts always keep a safe cell, and `coords` holds a mine
        let candidates = self.mine_layout.safe_coords_except(coords);
        debug_assert!(!candidates.is_empty());

        let target = candidates[self.rng.random_range(0..candidates.len())];
        self.mine_layout.move_mine(coords, target);
        log::debug!("Relocated first-move mine from {:?} to {:?}", coords, target);
    }

    fn detonate(&mut self, coords: Coord2) -> RevealResult {
        self.board[coords.to_nd_index()] = CellState::Revealed;
        self.triggered_mine = Some(coords);
        self.end_game(GameStatus::Lost);

        let changed = core::iter::once(coords)
            .chain(
                self.mine_layout
                    .mine_coords()
                    .into_iter()
                    .filter(|&pos| pos != coords),
            )
            .map(|coords| CellChange {
                coords,
                kind: CellKind::Mine,
            })
            .collect();

        RevealResult {
            status: self.status,
            changed,
        }
    }

    /// Reveals `start` and, through zero-count cells, everything reachable
    /// without crossing a flag. `start` must be a hidden safe cell.
    fn flood_reveal(&mut self, start: Coord2, changed: &mut Vec<CellChange>) {
        let mut to_visit = VecDeque::from([start]);

        while let Some(visit_coords) = to_visit.pop_front() {
            // skip flagged or already revealed cells
            if self.board[visit_coords.to_nd_index()] != CellState::Hidden {
                continue;
            }

            let count = self.mine_layout.adjacent_mine_count(visit_coords);
            self.board[visit_coords.to_nd_index()] = CellState::Revealed;
            self.revealed_count += 1;
            changed.push(CellChange {
                coords: visit_coords,
                kind: CellKind::Count(count),
            });
            log::trace!("Revealed {:?}, mine count: {}", visit_coords, count);

            if count == 0 {
                to_visit.extend(
                    self.mine_layout
                        .iter_neighbors(visit_coords)
                        .filter(|&pos| self.board[pos.to_nd_index()] == CellState::Hidden),
                );
            }
        }
    }

    fn end_game(&mut self, status: GameStatus) {
        if self.status.is_finished() {
            return;
        }
        self.status = status;
        log::debug!(
            "Game ended {:?}, {} of {} safe cells revealed",
            status,
            self.revealed_count,
            self.mine_layout.safe_cell_count()
        );
    }
}

fn seed_layout<R: Rng + ?Sized>(
    limits: &Limits,
    config: &GameConfig,
    rng: &mut R,
) -> Result<MineLayout> {
    let mines = config.validate(limits)?;
    let layout = RandomMineGenerator::default().generate(config.size(), mines, rng)?;
    log::debug!(
        "Started {}x{} game with {} mines",
        config.width,
        config.height,
        layout.mine_count()
    );
    Ok(layout)
}
