//! Board model and rules: cells, move validation and win/tie detection.

pub mod rules;
pub mod state;

pub use rules::{evaluate, winning_symbol, MoveError, Outcome, WINNING_LINES};
pub use state::{cell_index, Board, Cell, CellIndex, IntegrityError, Symbol, CELL_COUNT};
