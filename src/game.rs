//! Two-player match: owns both boards, enforces turn order and decides the winner.

use core::fmt;
use rand::Rng;

use crate::board::{Board, BoardSnapshot};
use crate::common::{AttackResult, BoardError, CellState};
use crate::config::{MatchConfig, TurnPolicy, GRID_SIZE};
use crate::target::TargetGrid;

/// One of the two seats at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerId {
    First,
    Second,
}

impl PlayerId {
    /// Zero-based seat index.
    pub fn index(self) -> usize {
        match self {
            PlayerId::First => 0,
            PlayerId::Second => 1,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(PlayerId::First),
            1 => Some(PlayerId::Second),
            _ => None,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            PlayerId::First => PlayerId::Second,
            PlayerId::Second => PlayerId::First,
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.index() + 1)
    }
}

/// Lifecycle of a match. Each phase carries only what is meaningful in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Placing,
    InProgress { turn: PlayerId },
    Finished { winner: PlayerId },
}

/// Why an attack request changed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum IgnoreReason {
    NotInProgress,
    OutOfTurn,
    OutOfBounds,
    AlreadyTargeted,
}

/// Result of `Match::attack`, consumed by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackOutcome {
    Hit { sunk: bool },
    Miss,
    GameOver { winner: PlayerId },
    Ignored(IgnoreReason),
}

impl AttackOutcome {
    /// `false` only for `Ignored`.
    pub fn resolved(&self) -> bool {
        !matches!(self, AttackOutcome::Ignored(_))
    }
}

/// Read-only state of a whole match for renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchSnapshot {
    pub phase: Phase,
    /// Each player's own board, indexed by seat.
    pub boards: [BoardSnapshot; 2],
    /// Each player's view of the opponent, indexed by seat and then `[y][x]`.
    pub targets: [[[CellState; GRID_SIZE]; GRID_SIZE]; 2],
}

pub struct Match {
    boards: [Board; 2],
    targets: [TargetGrid; 2],
    phase: Phase,
    config: MatchConfig,
}

impl Match {
    /// Standard match with both fleets randomly placed; `First` opens.
    pub fn new<R: Rng>(rng: &mut R) -> Result<Self, BoardError> {
        Self::with_config(rng, MatchConfig::default())
    }

    pub fn with_config<R: Rng>(rng: &mut R, config: MatchConfig) -> Result<Self, BoardError> {
        let mut game = Self::empty(config);
        game.place_fleets(rng)?;
        Ok(game)
    }

    /// Match with empty boards, waiting in `Placing`.
    pub fn empty(config: MatchConfig) -> Self {
        Self {
            boards: [Board::new(), Board::new()],
            targets: [TargetGrid::new(), TargetGrid::new()],
            phase: Phase::Placing,
            config,
        }
    }

    /// Start from boards that already carry their fleets.
    ///
    /// Each board needs at least one ship afloat, otherwise the match would be
    /// in progress with a loser already decided.
    pub fn from_boards(boards: [Board; 2], config: MatchConfig) -> Result<Self, BoardError> {
        if boards.iter().any(Board::all_sunk) {
            return Err(BoardError::NoShipsAfloat);
        }
        Ok(Self {
            boards,
            targets: [TargetGrid::new(), TargetGrid::new()],
            phase: Phase::InProgress {
                turn: PlayerId::First,
            },
            config,
        })
    }

    /// Randomly place the configured fleet on both boards and open play.
    ///
    /// Only valid in `Placing`; later calls are a no-op. On error the match
    /// stays in `Placing` with both boards cleared.
    pub fn place_fleets<R: Rng>(&mut self, rng: &mut R) -> Result<(), BoardError> {
        if self.phase != Phase::Placing {
            return Ok(());
        }
        self.config.validate()?;
        for board in self.boards.iter_mut() {
            let mut fresh = Board::new();
            if let Err(e) = fresh.place_fleet(rng, &self.config.fleet) {
                self.boards = [Board::new(), Board::new()];
                return Err(e);
            }
            *board = fresh;
        }
        self.phase = Phase::InProgress {
            turn: PlayerId::First,
        };
        log::debug!("fleets placed, {} opens", PlayerId::First);
        Ok(())
    }

    /// Fire at (`x`, `y`) on the opponent's board on behalf of `attacker`.
    ///
    /// Requests that arrive out of turn, after the match ended, off the grid
    /// or on an already-targeted cell return `Ignored` and change nothing.
    pub fn attack(&mut self, attacker: PlayerId, x: usize, y: usize) -> AttackOutcome {
        let turn = match self.phase {
            Phase::InProgress { turn } => turn,
            _ => return Self::ignore(attacker, IgnoreReason::NotInProgress),
        };
        if attacker != turn {
            return Self::ignore(attacker, IgnoreReason::OutOfTurn);
        }
        let target = &mut self.targets[attacker.index()];
        match target.is_targeted(x, y) {
            Ok(false) => {}
            Ok(true) => return Self::ignore(attacker, IgnoreReason::AlreadyTargeted),
            Err(_) => return Self::ignore(attacker, IgnoreReason::OutOfBounds),
        }

        let defender = &mut self.boards[attacker.opponent().index()];
        let result = match defender.receive_attack(x, y) {
            Ok(result) => result,
            // the target grid already filters repeats and bounds; a board
            // prepared with prior damage still rejects its own repeats
            Err(BoardError::AlreadyAttacked { .. }) => {
                return Self::ignore(attacker, IgnoreReason::AlreadyTargeted)
            }
            Err(_) => return Self::ignore(attacker, IgnoreReason::OutOfBounds),
        };
        let fleet_sunk = defender.all_sunk();
        if target.record(x, y, result).is_err() {
            return Self::ignore(attacker, IgnoreReason::AlreadyTargeted);
        }

        log::debug!("{} fires at ({}, {}): {:?}", attacker, x, y, result);
        match result {
            AttackResult::Hit { sunk: true } if fleet_sunk => {
                self.phase = Phase::Finished { winner: attacker };
                log::debug!("{} sank the last ship", attacker);
                AttackOutcome::GameOver { winner: attacker }
            }
            AttackResult::Hit { sunk } => {
                if self.config.policy == TurnPolicy::Alternate {
                    self.pass_turn(attacker);
                }
                AttackOutcome::Hit { sunk }
            }
            AttackResult::Miss => {
                self.pass_turn(attacker);
                AttackOutcome::Miss
            }
        }
    }

    fn pass_turn(&mut self, from: PlayerId) {
        self.phase = Phase::InProgress {
            turn: from.opponent(),
        };
    }

    fn ignore(attacker: PlayerId, reason: IgnoreReason) -> AttackOutcome {
        log::debug!("ignoring attack from {}: {:?}", attacker, reason);
        AttackOutcome::Ignored(reason)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Player allowed to attack, if the match is in progress.
    pub fn turn(&self) -> Option<PlayerId> {
        match self.phase {
            Phase::InProgress { turn } => Some(turn),
            _ => None,
        }
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self.phase {
            Phase::Finished { winner } => Some(winner),
            _ => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished { .. })
    }

    /// `player`'s own board.
    pub fn board(&self, player: PlayerId) -> &Board {
        &self.boards[player.index()]
    }

    /// `player`'s record of shots fired at the opponent.
    pub fn target_grid(&self, player: PlayerId) -> &TargetGrid {
        &self.targets[player.index()]
    }

    pub fn shots_fired(&self, player: PlayerId) -> usize {
        self.targets[player.index()].shots()
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            phase: self.phase,
            boards: [self.boards[0].snapshot(), self.boards[1].snapshot()],
            targets: [self.targets[0].cells(), self.targets[1].cells()],
        }
    }
}

impl fmt::Debug for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Match")
            .field("phase", &self.phase)
            .field("policy", &self.config.policy)
            .field("boards", &self.boards)
            .finish()
    }
}
