use alloc::vec::Vec;

use crate::common::BoardError;

/// Width and height of every board.
pub const GRID_SIZE: usize = 10;
/// Ship sizes each player receives, in placement order.
pub const FLEET: [usize; 6] = [4, 3, 3, 2, 2, 2];
/// Total number of ship cells in the standard fleet.
pub const TOTAL_SHIP_CELLS: usize = fleet_cells(&FLEET);
/// Sampling attempts per ship before random placement gives up.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 10_000;

const fn fleet_cells(fleet: &[usize]) -> usize {
    let mut total = 0;
    let mut i = 0;
    while i < fleet.len() {
        total += fleet[i];
        i += 1;
    }
    total
}

/// Whether a successful shot lets the attacker fire again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnPolicy {
    /// The turn passes only on a miss.
    #[default]
    HitKeepsTurn,
    /// The turn passes after every resolved attack.
    Alternate,
}

/// Per-match settings. The grid size is fixed; only the fleet and turn rule vary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchConfig {
    pub fleet: Vec<usize>,
    pub policy: TurnPolicy,
}

impl MatchConfig {
    pub fn with_policy(policy: TurnPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Checks every fleet entry fits on the grid.
    pub fn validate(&self) -> Result<(), BoardError> {
        match self
            .fleet
            .iter()
            .find(|&&size| size == 0 || size > GRID_SIZE)
        {
            Some(&size) => Err(BoardError::InvalidShipSize(size)),
            None => Ok(()),
        }
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            fleet: FLEET.to_vec(),
            policy: TurnPolicy::default(),
        }
    }
}
