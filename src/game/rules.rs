use std::fmt;

use serde::{Deserialize, Serialize};

use super::state::{Board, Cell, CellIndex, Symbol};

/// Rows, then columns, then diagonals.
pub const WINNING_LINES: [[CellIndex; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [6, 4, 2],
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    InProgress,
    XWins,
    OWins,
    Tie,
}

impl Outcome {
    pub fn win_for(symbol: Symbol) -> Self {
        match symbol {
            Symbol::X => Outcome::XWins,
            Symbol::O => Outcome::OWins,
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    pub fn winner(self) -> Option<Symbol> {
        match self {
            Outcome::XWins => Some(Symbol::X),
            Outcome::OWins => Some(Symbol::O),
            Outcome::InProgress | Outcome::Tie => None,
        }
    }

    /// Single-character status used by the page script: `X`, `O`, `T`
    /// (tie) or `N` (no result yet).
    pub fn code(self) -> char {
        match self {
            Outcome::XWins => 'X',
            Outcome::OWins => 'O',
            Outcome::Tie => 'T',
            Outcome::InProgress => 'N',
        }
    }
}

impl Default for Outcome {
    fn default() -> Self {
        Outcome::InProgress
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Outcome::InProgress => "IN_PROGRESS",
            Outcome::XWins => "X_WINS",
            Outcome::OWins => "O_WINS",
            Outcome::Tie => "TIE",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum MoveError {
    OutOfRange { index: CellIndex },
    /// Negative, fractional or NaN index handed over by the page.
    NotACell,
    Occupied { index: CellIndex },
    NotAgentTurn,
    GameFinished,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::OutOfRange { index } => write!(f, "cell {index} is off the board"),
            MoveError::NotACell => f.write_str("index does not name a cell"),
            MoveError::Occupied { index } => write!(f, "cell {index} is already taken"),
            MoveError::NotAgentTurn => f.write_str("a human player is to move"),
            MoveError::GameFinished => f.write_str("the game is over"),
        }
    }
}

impl std::error::Error for MoveError {}

/// Symbol holding a complete line, if any. Every line is inspected; the
/// first match in row/column/diagonal order wins.
pub fn winning_symbol(board: &Board) -> Option<Symbol> {
    let cells = board.cells();
    let mut winner = None;
    for [a, b, c] in WINNING_LINES {
        let first = cells[a];
        let complete = first != Cell::Empty && first == cells[b] && cells[b] == cells[c];
        if complete && winner.is_none() {
            winner = first.symbol();
        }
    }
    winner
}

pub fn evaluate(board: &Board) -> Outcome {
    match winning_symbol(board) {
        Some(symbol) => Outcome::win_for(symbol),
        None if board.is_full() => Outcome::Tie,
        None => Outcome::InProgress,
    }
}
