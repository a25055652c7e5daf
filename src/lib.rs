#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod bitboard;
mod board;
mod common;
mod config;
mod game;
mod ship;
mod target;
#[cfg(feature = "std")]
pub mod cli;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod ui;

pub use bitboard::{BitBoard, BitBoardError};
pub use board::*;
pub use common::*;
pub use config::*;
pub use game::*;
pub use ship::*;
pub use target::*;
#[cfg(feature = "std")]
pub use logging::init_logging;
