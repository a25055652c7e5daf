//! An attacker's record of the shots it has already fired at the opponent.

use crate::common::{AttackResult, BoardError, CellState};
use crate::config::GRID_SIZE;
use crate::ship::BB;

/// Only ever holds `Empty`, `Hit` or `Miss`; ship positions are never visible here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TargetGrid {
    hits: BB,
    misses: BB,
}

impl TargetGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a shot was already fired at (`x`, `y`).
    pub fn is_targeted(&self, x: usize, y: usize) -> Result<bool, BoardError> {
        Ok(self.hits.get(x, y)? || self.misses.get(x, y)?)
    }

    /// Mirror the defender's answer for a shot at (`x`, `y`).
    pub fn record(&mut self, x: usize, y: usize, result: AttackResult) -> Result<(), BoardError> {
        if self.is_targeted(x, y)? {
            return Err(BoardError::AlreadyAttacked { x, y });
        }
        if result.is_hit() {
            self.hits.set(x, y)?;
        } else {
            self.misses.set(x, y)?;
        }
        Ok(())
    }

    pub fn cell(&self, x: usize, y: usize) -> CellState {
        if self.hits.get(x, y).unwrap_or(false) {
            CellState::Hit
        } else if self.misses.get(x, y).unwrap_or(false) {
            CellState::Miss
        } else {
            CellState::Empty
        }
    }

    /// Whole grid, indexed `[y][x]`.
    pub fn cells(&self) -> [[CellState; GRID_SIZE]; GRID_SIZE] {
        core::array::from_fn(|y| core::array::from_fn(|x| self.cell(x, y)))
    }

    /// Number of shots fired so far.
    pub fn shots(&self) -> usize {
        self.hits.count_ones() + self.misses.count_ones()
    }

    pub fn hits(&self) -> usize {
        self.hits.count_ones()
    }

    /// Coordinates of successful shots in row-major order.
    pub fn hit_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.hits.iter_set_bits()
    }
}
