use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Grid dimensions out of range")]
    InvalidDimensions,
    #[error("Mine density must be within (0, 1)")]
    InvalidDensity,
    #[error("Too many mines, no safe cell would be left")]
    TooManyMines,
    #[error("Coordinates outside the grid")]
    OutOfBounds,
    #[error("Could not place every mine")]
    SeedingFailed,
}

pub type Result<T> = core::result::Result<T, GameError>;
