use std::collections::HashSet;

use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use seabattle::{Board, CellState, FLEET, GRID_SIZE, TOTAL_SHIP_CELLS};

fn placed_board(seed: u64) -> (Board, SmallRng) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut board = Board::new();
    board.place_fleet(&mut rng, &FLEET).unwrap();
    (board, rng)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn fleet_cells_are_disjoint(seed in any::<u64>()) {
        let (board, _) = placed_board(seed);
        let mut seen = HashSet::new();
        for ship in board.ships() {
            prop_assert_eq!(ship.cells().len(), ship.size());
            for &cell in ship.cells() {
                prop_assert!(seen.insert(cell), "cell {:?} shared by two ships", cell);
                prop_assert_eq!(board.cell(cell.0, cell.1), CellState::ShipPresent);
            }
        }
        prop_assert_eq!(seen.len(), TOTAL_SHIP_CELLS);
    }

    #[test]
    fn ship_cells_are_conserved_under_fire(seed in any::<u64>(), shots in 0..150usize) {
        let (mut board, mut rng) = placed_board(seed);
        for _ in 0..shots {
            let x = rng.random_range(0..GRID_SIZE);
            let y = rng.random_range(0..GRID_SIZE);
            let _ = board.receive_attack(x, y);
        }

        let cells = board.cells();
        let count = |s: CellState| cells.iter().flatten().filter(|&&c| c == s).count();
        let ship_hits: usize = board.ships().iter().map(|s| s.hits()).sum();

        prop_assert_eq!(count(CellState::ShipPresent), TOTAL_SHIP_CELLS - ship_hits);
        prop_assert_eq!(count(CellState::Hit), ship_hits);
        for y in 0..GRID_SIZE {
            for x in 0..GRID_SIZE {
                let owners = board.ships().iter().filter(|s| s.contains(x, y)).count();
                match cells[y][x] {
                    CellState::Hit | CellState::ShipPresent => {
                        prop_assert_eq!(owners, 1);
                    }
                    CellState::Empty | CellState::Miss => {
                        prop_assert_eq!(owners, 0);
                    }
                }
            }
        }
    }

    #[test]
    fn hits_are_monotonic_and_bounded(seed in any::<u64>()) {
        let (mut board, mut rng) = placed_board(seed);
        let mut previous: Vec<usize> = board.ships().iter().map(|s| s.hits()).collect();
        for _ in 0..200 {
            let x = rng.random_range(0..GRID_SIZE);
            let y = rng.random_range(0..GRID_SIZE);
            let _ = board.receive_attack(x, y);
            for (ship, before) in board.ships().iter().zip(previous.iter_mut()) {
                prop_assert!(ship.hits() >= *before);
                prop_assert!(ship.hits() <= ship.size());
                prop_assert_eq!(ship.is_sunk(), ship.hits() == ship.size());
                *before = ship.hits();
            }
        }
    }

    #[test]
    fn sweeping_every_cell_sinks_the_fleet(seed in any::<u64>()) {
        let (mut board, _) = placed_board(seed);
        let mut sinkings = 0;
        for y in 0..GRID_SIZE {
            for x in 0..GRID_SIZE {
                if let Ok(seabattle::AttackResult::Hit { sunk: true }) = board.receive_attack(x, y) {
                    sinkings += 1;
                }
            }
        }
        prop_assert!(board.all_sunk());
        prop_assert_eq!(sinkings, FLEET.len());
        prop_assert_eq!(board.hit_count(), TOTAL_SHIP_CELLS);
    }
}
