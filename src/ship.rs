//! A single ship: its cells on the grid and how many of them have been hit.

use alloc::vec::Vec;
use core::fmt;

use crate::bitboard::BitBoard;
use crate::common::{BoardError, Orientation};
use crate::config::GRID_SIZE;

pub(crate) type BB = BitBoard<u128, GRID_SIZE>;

/// Read-only view of a ship for renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipStatus {
    pub size: usize,
    pub hits: usize,
    pub sunk: bool,
}

#[derive(Clone, PartialEq, Eq)]
pub struct Ship {
    size: usize,
    hits: usize,
    orientation: Orientation,
    cells: Vec<(usize, usize)>,
    mask: BB,
}

impl Ship {
    /// Lay out a ship of `size` cells starting at (`x`, `y`).
    pub fn new(size: usize, orientation: Orientation, x: usize, y: usize) -> Result<Self, BoardError> {
        if size == 0 || size > GRID_SIZE {
            return Err(BoardError::InvalidShipSize(size));
        }
        let ends_on_grid = |start: usize| start.checked_add(size).is_some_and(|end| end <= GRID_SIZE);
        let fits = match orientation {
            Orientation::Horizontal => ends_on_grid(x) && y < GRID_SIZE,
            Orientation::Vertical => ends_on_grid(y) && x < GRID_SIZE,
        };
        if !fits {
            return Err(BoardError::ShipOutOfBounds);
        }

        let cells: Vec<_> = (0..size)
            .map(|i| match orientation {
                Orientation::Horizontal => (x + i, y),
                Orientation::Vertical => (x, y + i),
            })
            .collect();
        let mut mask = BB::new();
        for &(cx, cy) in &cells {
            mask.set(cx, cy)?;
        }

        Ok(Ship {
            size,
            hits: 0,
            orientation,
            cells,
            mask,
        })
    }

    /// Count one more struck cell. The board calls this once per distinct cell.
    pub fn record_hit(&mut self) {
        if self.hits < self.size {
            self.hits += 1;
        }
    }

    pub fn is_sunk(&self) -> bool {
        self.hits == self.size
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Occupied cells, origin first.
    pub fn cells(&self) -> &[(usize, usize)] {
        &self.cells
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        self.mask.get(x, y).unwrap_or(false)
    }

    pub fn origin(&self) -> (usize, usize) {
        self.cells[0]
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub(crate) fn mask(&self) -> BB {
        self.mask
    }

    pub fn status(&self) -> ShipStatus {
        ShipStatus {
            size: self.size,
            hits: self.hits,
            sunk: self.is_sunk(),
        }
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (x, y) = self.origin();
        write!(
            f,
            "Ship {{ size: {}, origin: ({}, {}), orientation: {:?}, hits: {} }}",
            self.size, x, y, self.orientation, self.hits,
        )
    }
}
