//! One player's own waters: ship placements and the damage they have taken.

use alloc::vec::Vec;
use core::fmt;
use rand::Rng;

use crate::common::{AttackResult, BoardError, CellState, Orientation};
use crate::config::{GRID_SIZE, MAX_PLACEMENT_ATTEMPTS};
use crate::ship::{Ship, ShipStatus, BB};

/// Serializable view of a board for renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardSnapshot {
    /// Indexed `[y][x]`.
    pub cells: [[CellState; GRID_SIZE]; GRID_SIZE],
    pub ships: Vec<ShipStatus>,
}

/// Ships plus three layers: where ships are, which cells were hit, which were missed.
#[derive(Clone, Default)]
pub struct Board {
    ships: Vec<Ship>,
    ship_map: BB,
    hits: BB,
    misses: BB,
}

impl Board {
    /// Empty board, no ships placed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a ship of `size` fits at (`x`, `y`) on empty cells.
    pub fn can_place(&self, x: usize, y: usize, size: usize, orientation: Orientation) -> bool {
        match Ship::new(size, orientation, x, y) {
            Ok(ship) => (self.ship_map & ship.mask()).is_empty(),
            Err(_) => false,
        }
    }

    /// Place a ship of `size` at (`x`, `y`).
    pub fn place(
        &mut self,
        x: usize,
        y: usize,
        size: usize,
        orientation: Orientation,
    ) -> Result<(), BoardError> {
        let ship = Ship::new(size, orientation, x, y)?;
        let mask = ship.mask();
        if !(self.ship_map & mask).is_empty() {
            return Err(BoardError::ShipOverlaps);
        }
        self.ship_map |= mask;
        log::trace!("placed size {} ship at ({}, {}) {:?}", size, x, y, orientation);
        self.ships.push(ship);
        Ok(())
    }

    /// Rejection-sample a legal (x, y, orientation) for a ship of `size`.
    ///
    /// Origins are drawn from the whole grid, so most attempts near the far
    /// edges are rejected for running off the board.
    pub fn random_placement<R: Rng>(
        &self,
        rng: &mut R,
        size: usize,
    ) -> Result<(usize, usize, Orientation), BoardError> {
        if size == 0 || size > GRID_SIZE {
            return Err(BoardError::InvalidShipSize(size));
        }
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let x = rng.random_range(0..GRID_SIZE);
            let y = rng.random_range(0..GRID_SIZE);
            let orientation = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            if self.can_place(x, y, size, orientation) {
                return Ok((x, y, orientation));
            }
        }
        log::warn!(
            "no placement for size {} ship after {} attempts",
            size,
            MAX_PLACEMENT_ATTEMPTS
        );
        Err(BoardError::PlacementImpossible {
            size,
            attempts: MAX_PLACEMENT_ATTEMPTS,
        })
    }

    /// Randomly place one ship per entry of `sizes`, in order.
    pub fn place_fleet<R: Rng>(&mut self, rng: &mut R, sizes: &[usize]) -> Result<(), BoardError> {
        for &size in sizes {
            let (x, y, orientation) = self.random_placement(rng, size)?;
            self.place(x, y, size, orientation)?;
        }
        Ok(())
    }

    /// Resolve an incoming shot at (`x`, `y`).
    ///
    /// A cell can only be resolved once; repeats return `AlreadyAttacked`
    /// and leave the board untouched.
    pub fn receive_attack(&mut self, x: usize, y: usize) -> Result<AttackResult, BoardError> {
        if self.hits.get(x, y)? || self.misses.get(x, y)? {
            return Err(BoardError::AlreadyAttacked { x, y });
        }
        if !self.ship_map.get(x, y)? {
            self.misses.set(x, y)?;
            return Ok(AttackResult::Miss);
        }

        self.hits.set(x, y)?;
        match self.ships.iter_mut().find(|ship| ship.contains(x, y)) {
            Some(ship) => {
                ship.record_hit();
                Ok(AttackResult::Hit {
                    sunk: ship.is_sunk(),
                })
            }
            // ship_map is the union of ship masks
            None => Ok(AttackResult::Hit { sunk: false }),
        }
    }

    /// `true` once every ship is sunk. An empty fleet counts as sunk.
    pub fn all_sunk(&self) -> bool {
        self.ships.iter().all(Ship::is_sunk)
    }

    /// State of a single cell, `Empty` when off the grid.
    pub fn cell(&self, x: usize, y: usize) -> CellState {
        if self.hits.get(x, y).unwrap_or(false) {
            CellState::Hit
        } else if self.misses.get(x, y).unwrap_or(false) {
            CellState::Miss
        } else if self.ship_map.get(x, y).unwrap_or(false) {
            CellState::ShipPresent
        } else {
            CellState::Empty
        }
    }

    /// Whole grid, indexed `[y][x]`.
    pub fn cells(&self) -> [[CellState; GRID_SIZE]; GRID_SIZE] {
        core::array::from_fn(|y| core::array::from_fn(|x| self.cell(x, y)))
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn ship_statuses(&self) -> Vec<ShipStatus> {
        self.ships.iter().map(Ship::status).collect()
    }

    /// Cells covered by ships, hit or not.
    pub fn ship_cell_count(&self) -> usize {
        self.ship_map.count_ones()
    }

    pub fn hit_count(&self) -> usize {
        self.hits.count_ones()
    }

    pub fn miss_count(&self) -> usize {
        self.misses.count_ones()
    }

    pub fn ships_remaining(&self) -> usize {
        self.ships.iter().filter(|s| !s.is_sunk()).count()
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            cells: self.cells(),
            ships: self.ship_statuses(),
        }
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{ ships: {:?} }}", self.ships)?;
        for row in self.cells() {
            for cell in row {
                let ch = match cell {
                    CellState::Empty => '.',
                    CellState::ShipPresent => 'S',
                    CellState::Hit => 'X',
                    CellState::Miss => 'o',
                };
                write!(f, "{} ", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn cell_layers_resolve_in_priority_order() {
        let mut board = Board::new();
        board.place(2, 3, 2, Orientation::Vertical).unwrap();
        assert_eq!(board.cell(2, 3), CellState::ShipPresent);
        assert_eq!(board.cell(2, 5), CellState::Empty);

        board.receive_attack(2, 4).unwrap();
        board.receive_attack(0, 0).unwrap();
        assert_eq!(board.cell(2, 4), CellState::Hit);
        assert_eq!(board.cell(0, 0), CellState::Miss);
        assert_eq!(board.cell(GRID_SIZE, 0), CellState::Empty);
        assert_eq!(board.cells()[4][2], CellState::Hit);
    }

    #[test]
    fn random_placement_rejects_oversized_ship() {
        let board = Board::new();
        let mut rng = rand::rngs::SmallRng::seed_from_u64(1);
        assert_eq!(
            board.random_placement(&mut rng, GRID_SIZE + 1),
            Err(BoardError::InvalidShipSize(GRID_SIZE + 1))
        );
    }
}
