//! Shared engine types: cell states, attack results and board errors.

use core::fmt;

use crate::bitboard::BitBoardError;

/// State of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Empty,
    ShipPresent,
    Hit,
    Miss,
}

/// Direction a ship extends from its origin cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Increasing `x`.
    Horizontal,
    /// Increasing `y`.
    Vertical,
}

/// What a board reports back for one incoming shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackResult {
    /// A ship cell was struck; `sunk` is set when that was its last intact cell.
    Hit { sunk: bool },
    Miss,
}

impl AttackResult {
    pub fn is_hit(&self) -> bool {
        matches!(self, AttackResult::Hit { .. })
    }
}

/// Errors returned by board and ship operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Coordinate outside the grid.
    OutOfBounds { x: usize, y: usize },
    /// Ship sizes must be in `1..=GRID_SIZE`.
    InvalidShipSize(usize),
    /// Some ship cell would fall off the grid.
    ShipOutOfBounds,
    /// Placement overlaps another ship.
    ShipOverlaps,
    /// The cell was already hit or missed.
    AlreadyAttacked { x: usize, y: usize },
    /// Random placement found no legal spot within the attempt cap.
    PlacementImpossible { size: usize, attempts: usize },
    /// A board handed to a match has no ship left afloat.
    NoShipsAfloat,
}

impl From<BitBoardError> for BoardError {
    fn from(err: BitBoardError) -> Self {
        match err {
            BitBoardError::OutOfBounds { x, y } => BoardError::OutOfBounds { x, y },
        }
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::OutOfBounds { x, y } => write!(f, "Cell ({}, {}) is off the board", x, y),
            BoardError::InvalidShipSize(size) => write!(f, "Invalid ship size {}", size),
            BoardError::ShipOutOfBounds => write!(f, "Ship placement is out of bounds"),
            BoardError::ShipOverlaps => write!(f, "Ship placement overlaps with another ship"),
            BoardError::AlreadyAttacked { x, y } => {
                write!(f, "Cell ({}, {}) was already attacked", x, y)
            }
            BoardError::PlacementImpossible { size, attempts } => write!(
                f,
                "No legal placement for a ship of size {} after {} attempts",
                size, attempts
            ),
            BoardError::NoShipsAfloat => write!(f, "Board has no ships afloat"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}
