//! Terminal drivers for a match: an interactive hot-seat loop and a scripted runner.

use std::io::{self, BufRead, Write};
use std::string::String;
use std::vec::Vec;

use anyhow::{anyhow, Context};
use serde::Serialize;

use crate::ui::{coord_to_string, parse_coord, print_player_view};
use crate::{AttackOutcome, Match, Phase, PlayerId};

/// One scripted shot and what came of it.
#[derive(Debug, Clone, Serialize)]
pub struct MoveRecord {
    pub player: PlayerId,
    pub coord: String,
    pub outcome: AttackOutcome,
}

/// Summary printed by the `script` command.
#[derive(Debug, Clone, Serialize)]
pub struct ScriptReport {
    pub moves: Vec<MoveRecord>,
    pub phase: Phase,
    pub winner: Option<PlayerId>,
    pub shots: [usize; 2],
}

/// Fire each coordinate in `moves` for whoever holds the turn, stopping at game over.
pub fn run_script<S: AsRef<str>>(game: &mut Match, moves: &[S]) -> anyhow::Result<ScriptReport> {
    let mut records = Vec::with_capacity(moves.len());
    for raw in moves {
        let Some(player) = game.turn() else {
            break;
        };
        let (x, y) = parse_coord(raw.as_ref())
            .map_err(|e| anyhow!(e))
            .with_context(|| format!("bad move '{}'", raw.as_ref()))?;
        let outcome = game.attack(player, x, y);
        records.push(MoveRecord {
            player,
            coord: coord_to_string(x, y),
            outcome,
        });
    }
    Ok(ScriptReport {
        moves: records,
        phase: game.phase(),
        winner: game.winner(),
        shots: [
            game.shots_fired(PlayerId::First),
            game.shots_fired(PlayerId::Second),
        ],
    })
}

fn describe(label: &str, outcome: AttackOutcome) -> String {
    match outcome {
        AttackOutcome::Hit { sunk: false } => format!("HIT at {}!", label),
        AttackOutcome::Hit { sunk: true } => format!("SUNK! The ship at {} goes down.", label),
        AttackOutcome::Miss => format!("Miss at {}. Only water.", label),
        AttackOutcome::GameOver { winner } => {
            format!("The last enemy ship sinks at {}. {} wins!", label, winner)
        }
        AttackOutcome::Ignored(reason) => format!("Shot at {} ignored ({:?}).", label, reason),
    }
}

/// Hide the board that was just on screen and wait until `next` is seated.
/// Returns `false` once input has run out.
fn hand_over<R: BufRead>(next: PlayerId, input: &mut R) -> anyhow::Result<bool> {
    print!("\nPass the terminal to {} and press Enter...", next);
    io::stdout().flush()?;
    let mut line = String::new();
    let read = input.read_line(&mut line).context("waiting for hand-over")?;
    print!("\x1B[2J\x1B[H");
    io::stdout().flush()?;
    Ok(read > 0)
}

/// Two humans sharing one terminal. Reads one coordinate per line from `input`
/// until the match ends, `quit` is entered or input runs out.
pub fn run_hotseat<R: BufRead>(game: &mut Match, mut input: R) -> anyhow::Result<Option<PlayerId>> {
    while let Some(player) = game.turn() {
        println!("\n==================== {} ====================", player);
        print_player_view(game, player);
        print!("\n{}, enter target (e.g. B7, 'quit' to stop): ", player);
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line).context("reading target")? == 0 {
            log::info!("input closed, leaving match unfinished");
            return Ok(None);
        }
        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") {
            return Ok(None);
        }
        let (x, y) = match parse_coord(line) {
            Ok(coord) => coord,
            Err(e) => {
                println!("Invalid coordinate: {}", e);
                continue;
            }
        };
        let outcome = game.attack(player, x, y);
        println!("{}", describe(&coord_to_string(x, y), outcome));
        match game.turn() {
            Some(next) if next == player => {
                if outcome.resolved() {
                    println!("{} fires again.", player);
                }
            }
            Some(next) => {
                if !hand_over(next, &mut input)? {
                    log::info!("input closed during hand-over, leaving match unfinished");
                    return Ok(None);
                }
            }
            None => {}
        }
    }

    if let Some(winner) = game.winner() {
        println!("\n==================== GAME OVER ====================");
        println!(
            "{} wins after {} shots.",
            winner,
            game.shots_fired(winner)
        );
    }
    Ok(game.winner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, MatchConfig, Orientation};

    fn duel() -> Match {
        let mut first = Board::new();
        first.place(0, 0, 2, Orientation::Horizontal).unwrap();
        let mut second = Board::new();
        second.place(0, 0, 2, Orientation::Vertical).unwrap();
        Match::from_boards([first, second], MatchConfig::default()).unwrap()
    }

    #[test]
    fn script_stops_at_game_over() {
        let mut game = duel();
        let report = run_script(&mut game, &["A1", "A2", "C3"]).unwrap();
        assert_eq!(report.moves.len(), 2);
        assert_eq!(report.winner, Some(PlayerId::First));
        assert_eq!(
            report.moves[1].outcome,
            AttackOutcome::GameOver {
                winner: PlayerId::First
            }
        );
        assert_eq!(report.shots, [2, 0]);
    }

    #[test]
    fn script_reports_bad_coordinates() {
        let mut game = duel();
        assert!(run_script(&mut game, &["Z9"]).is_err());
    }

    #[test]
    fn hotseat_plays_from_buffered_input() {
        let mut game = duel();
        // miss, hand over, player two misses, hand over, player one sinks the pair
        let input = "E5\n\nJ10\n\nA1\nnot-a-cell\nA2\n";
        let winner = run_hotseat(&mut game, input.as_bytes()).unwrap();
        assert_eq!(winner, Some(PlayerId::First));
        assert_eq!(game.shots_fired(PlayerId::Second), 1);
    }

    #[test]
    fn hotseat_returns_none_when_input_ends() {
        let mut game = duel();
        assert_eq!(run_hotseat(&mut game, "".as_bytes()).unwrap(), None);
        assert!(!game.is_finished());
    }

    #[test]
    fn hotseat_waits_for_hand_over_after_a_miss() {
        let mut game = duel();
        // the miss passes the turn; the next line would be the hand-over confirmation
        assert_eq!(run_hotseat(&mut game, "E5\n".as_bytes()).unwrap(), None);
        assert_eq!(game.turn(), Some(PlayerId::Second));
        assert_eq!(game.shots_fired(PlayerId::First), 1);
        assert_eq!(game.shots_fired(PlayerId::Second), 0);
    }

    #[test]
    fn hotseat_hand_over_line_is_not_a_shot() {
        let mut game = duel();
        // "A1" on the hand-over line must not be fired by player two
        let input = "E5\nA1\nJ10\n";
        assert_eq!(run_hotseat(&mut game, input.as_bytes()).unwrap(), None);
        assert_eq!(game.shots_fired(PlayerId::Second), 1);
        assert_eq!(game.board(PlayerId::First).hit_count(), 0);
    }
}
