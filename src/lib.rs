#![warn(clippy::all)]

mod board;
mod pattern;
mod settings;
mod symmetry;

pub use board::{Board, Cell, ALIVE_CHAR, DEAD_CHAR};
pub use pattern::{Pattern, PatternLibrary};
pub use settings::Settings;
pub use symmetry::count_symmetric;

pub const VERSION: &str = "0.1.0";
