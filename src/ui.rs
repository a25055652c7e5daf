//! Text rendering of boards and coordinate parsing for the terminal front end.

use std::fmt::Write;
use std::string::String;

use crate::{Board, CellState, Match, PlayerId, TargetGrid, GRID_SIZE};

/// `(x, y)` to the `B7` style label shown on screen.
pub fn coord_to_string(x: usize, y: usize) -> String {
    let col = (b'A' + x as u8) as char;
    format!("{}{}", col, y + 1)
}

/// Parse a label such as `B7` (column letter, 1-based row) into `(x, y)`.
pub fn parse_coord(input: &str) -> Result<(usize, usize), String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Empty input".to_string());
    }
    let mut chars = input.chars();
    let col_ch = chars
        .next()
        .ok_or("No column letter")?
        .to_ascii_uppercase();
    if !col_ch.is_ascii_alphabetic() {
        return Err(format!("Invalid column '{}' - must be a letter A-J", col_ch));
    }
    let x = (col_ch as u8 - b'A') as usize;
    if x >= GRID_SIZE {
        return Err(format!("Column '{}' out of bounds - must be A-J", col_ch));
    }
    let row_str: String = chars.collect();
    if row_str.is_empty() {
        return Err("Missing row number (e.g., A5)".to_string());
    }
    let row: usize = row_str
        .parse()
        .map_err(|_| format!("Invalid row '{}' - must be a number 1-10", row_str))?;
    if row == 0 || row > GRID_SIZE {
        return Err(format!("Row {} out of bounds - must be 1-10", row));
    }
    Ok((x, row - 1))
}

fn cell_char(cell: CellState, reveal: bool) -> char {
    match cell {
        CellState::Hit => 'X',
        CellState::Miss => 'o',
        CellState::ShipPresent if reveal => 'S',
        _ => '.',
    }
}

fn format_grid(cells: &[[CellState; GRID_SIZE]; GRID_SIZE], reveal: bool) -> String {
    let mut out = String::new();
    out.push_str("    ");
    for x in 0..GRID_SIZE {
        let _ = write!(out, " {}", (b'A' + x as u8) as char);
    }
    out.push('\n');
    for (y, row) in cells.iter().enumerate() {
        let _ = write!(out, "  {:2}", y + 1);
        for &cell in row {
            let _ = write!(out, " {}", cell_char(cell, reveal));
        }
        out.push('\n');
    }
    out
}

/// A player's own board with ships shown, followed by the fleet status.
pub fn format_board(board: &Board) -> String {
    let mut out = format_grid(&board.cells(), true);
    out.push_str("  Legend: S=Ship  X=Hit  o=Miss  .=Water\n");
    for (i, ship) in board.ships().iter().enumerate() {
        let status = if ship.is_sunk() { "SUNK" } else { "Active" };
        let (x, y) = ship.origin();
        let _ = writeln!(
            out,
            "    #{} size {} at {} ({}/{} hit): {}",
            i + 1,
            ship.size(),
            coord_to_string(x, y),
            ship.hits(),
            ship.size(),
            status
        );
    }
    out
}

/// An attacker's view of the opponent: only hits and misses.
pub fn format_target_grid(target: &TargetGrid) -> String {
    let mut out = format_grid(&target.cells(), false);
    out.push_str("  Legend: X=Hit  o=Miss  .=Unknown\n");
    out
}

/// Print what `player` is allowed to see: their shots, then their own waters.
pub fn print_player_view(game: &Match, player: PlayerId) {
    println!("{} - shots at the enemy:", player);
    print!("{}", format_target_grid(game.target_grid(player)));
    println!("\n{} - your fleet:", player);
    print!("{}", format_board(game.board(player)));
}
