use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::game::{Board, CellIndex};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentConfig {
    /// Fixed seed for reproducible games; entropy is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl AgentConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Computer opponent that plays a uniformly random empty cell.
#[derive(Debug, Clone)]
pub struct RandomAgent {
    rng: SmallRng,
}

impl RandomAgent {
    pub fn new(config: &AgentConfig) -> Self {
        match config.seed {
            Some(seed) => Self::with_seed(seed),
            None => Self {
                rng: SmallRng::from_entropy(),
            },
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// `None` once the board is full.
    pub fn choose_move(&mut self, board: &Board) -> Option<CellIndex> {
        board.empty_cells().choose(&mut self.rng).copied()
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new(&AgentConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Symbol, CELL_COUNT};

    #[test]
    fn picks_only_empty_cells() {
        let mut agent = RandomAgent::with_seed(7);
        let mut board = Board::new();
        for (index, symbol) in [(0, Symbol::X), (4, Symbol::O), (5, Symbol::X), (7, Symbol::O)] {
            board.apply_move(index, symbol);
        }

        for _ in 0..200 {
            let choice = agent.choose_move(&board).expect("board has room");
            assert_eq!(board.cell(choice), Some(Cell::Empty), "cell {choice} is taken");
        }
    }

    #[test]
    fn selection_is_roughly_uniform() {
        let mut agent = RandomAgent::with_seed(2024);
        let board = Board::new();
        let trials = 9_000;
        let mut counts = [0usize; CELL_COUNT];
        for _ in 0..trials {
            let choice = agent.choose_move(&board).expect("board is empty");
            counts[choice] += 1;
        }

        let expected = trials / CELL_COUNT;
        for (index, count) in counts.iter().enumerate() {
            assert!(
                count.abs_diff(expected) < expected / 5,
                "cell {index} chosen {count} times, expected about {expected}"
            );
        }
    }

    #[test]
    fn selection_is_uniform_over_remaining_cells() {
        let mut agent = RandomAgent::with_seed(77);
        let mut board = Board::new();
        for (index, symbol) in [(0, Symbol::X), (4, Symbol::O), (5, Symbol::X), (7, Symbol::O)] {
            board.apply_move(index, symbol);
        }
        let open = board.empty_cells();
        assert_eq!(open, vec![1, 2, 3, 6, 8]);

        let trials = 10_000;
        let mut counts = [0usize; CELL_COUNT];
        for _ in 0..trials {
            let choice = agent.choose_move(&board).expect("board has room");
            counts[choice] += 1;
        }

        let expected = trials / open.len();
        for (index, count) in counts.iter().enumerate() {
            if open.contains(&index) {
                assert!(
                    count.abs_diff(expected) < expected / 5,
                    "cell {index} chosen {count} times, expected about {expected}"
                );
            } else {
                assert_eq!(*count, 0, "occupied cell {index} was chosen");
            }
        }
    }

    #[test]
    fn full_board_has_no_move() {
        let cells = [
            Cell::X,
            Cell::O,
            Cell::X,
            Cell::O,
            Cell::X,
            Cell::O,
            Cell::O,
            Cell::X,
            Cell::O,
        ];
        let mut agent = RandomAgent::default();
        assert_eq!(agent.choose_move(&Board::from_cells(cells)), None);
    }

    #[test]
    fn same_seed_same_choices() {
        let config = AgentConfig::default().with_seed(99);
        let mut first = RandomAgent::new(&config);
        let mut second = RandomAgent::new(&config);
        let board = Board::new();
        for _ in 0..20 {
            assert_eq!(first.choose_move(&board), second.choose_move(&board));
        }
    }
}
