use std::fmt;

use serde::{Deserialize, Serialize};

use super::rules::{self, MoveError, Outcome};

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// Board index, row-major from the top-left cell (0..9).
pub type CellIndex = usize;

/// Converts a JavaScript number into a board index. Anything that is not a
/// whole number in `0..9` is refused.
pub fn cell_index(value: f64) -> Result<CellIndex, MoveError> {
    if !value.is_finite() || value.fract() != 0.0 || value < 0.0 {
        return Err(MoveError::NotACell);
    }
    if value >= CELL_COUNT as f64 {
        return Err(MoveError::OutOfRange {
            index: value as CellIndex,
        });
    }
    Ok(value as CellIndex)
}

/// Mark a participant places on the board.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Symbol {
    X,
    O,
}

impl Symbol {
    pub fn opponent(self) -> Self {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Symbol::X => 'X',
            Symbol::O => 'O',
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn symbol(self) -> Option<Symbol> {
        match self {
            Cell::Empty => None,
            Cell::X => Some(Symbol::X),
            Cell::O => Some(Symbol::O),
        }
    }

    pub fn as_char(self) -> char {
        self.symbol().map(Symbol::as_char).unwrap_or(' ')
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Empty
    }
}

impl From<Symbol> for Cell {
    fn from(symbol: Symbol) -> Self {
        match symbol {
            Symbol::X => Cell::X,
            Symbol::O => Cell::O,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum IntegrityError {
    UnbalancedMarks { x_count: usize, o_count: usize },
}

/// The 3x3 grid, owned by exactly one session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; CELL_COUNT],
        }
    }

    pub fn from_cells(cells: [Cell; CELL_COUNT]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    pub fn cell(&self, index: CellIndex) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Places `symbol` at `index`. Returns `false` and leaves the board
    /// untouched when the index is off the board or the cell is taken.
    pub fn apply_move(&mut self, index: CellIndex, symbol: Symbol) -> bool {
        self.try_apply(index, symbol).is_ok()
    }

    pub fn try_apply(&mut self, index: CellIndex, symbol: Symbol) -> Result<(), MoveError> {
        let cell = self
            .cells
            .get_mut(index)
            .ok_or(MoveError::OutOfRange { index })?;
        if !cell.is_empty() {
            return Err(MoveError::Occupied { index });
        }
        *cell = symbol.into();
        Ok(())
    }

    pub fn reset(&mut self) {
        self.cells = [Cell::Empty; CELL_COUNT];
    }

    pub fn evaluate(&self) -> Outcome {
        rules::evaluate(self)
    }

    pub fn empty_cells(&self) -> Vec<CellIndex> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(index, _)| index)
            .collect()
    }

    pub fn count(&self, symbol: Symbol) -> usize {
        let target = Cell::from(symbol);
        self.cells.iter().filter(|cell| **cell == target).count()
    }

    pub fn marks_placed(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    pub fn integrity_check(&self) -> Result<(), IntegrityError> {
        let x_count = self.count(Symbol::X);
        let o_count = self.count(Symbol::O);
        if x_count.abs_diff(o_count) > 1 {
            return Err(IntegrityError::UnbalancedMarks { x_count, o_count });
        }
        Ok(())
    }

    /// ASCII picture of the board, one row per line with `---+---+---`
    /// separators.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, chunk) in self.cells.chunks(3).enumerate() {
            if row > 0 {
                writeln!(f, "---+---+---")?;
            }
            writeln!(
                f,
                " {} | {} | {} ",
                chunk[0].as_char(),
                chunk[1].as_char(),
                chunk[2].as_char()
            )?;
        }
        Ok(())
    }
}
