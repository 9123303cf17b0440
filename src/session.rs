use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ai::{AgentConfig, RandomAgent};
use crate::game::{cell_index, Board, CellIndex, MoveError, Outcome, Symbol};
use crate::utils;

const DEFAULT_FIRST_NAME: &str = "Player 1";
const DEFAULT_SECOND_NAME: &str = "Player 2";
const DEFAULT_AGENT_NAME: &str = "Computer";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum GameMode {
    /// One human (X) against the random agent (O).
    Single,
    /// Two humans sharing the page.
    Two,
}

impl FromStr for GameMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" | "one" | "1" | "solo" => Ok(GameMode::Single),
            "two" | "2" | "multi" | "versus" => Ok(GameMode::Two),
            _ => Err(()),
        }
    }
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::Two
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::Single => f.write_str("single-player"),
            GameMode::Two => f.write_str("two-player"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionConfig {
    pub mode: GameMode,
    #[serde(default)]
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_name: Option<String>,
    #[serde(default = "default_agent_name")]
    pub agent_name: String,
    #[serde(default)]
    pub agent: AgentConfig,
}

fn default_agent_name() -> String {
    DEFAULT_AGENT_NAME.to_string()
}

impl SessionConfig {
    pub fn new(mode: GameMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn with_names(mut self, first: impl Into<String>, second: Option<String>) -> Self {
        self.first_name = first.into();
        self.second_name = second;
        self
    }

    pub fn with_agent(mut self, agent: AgentConfig) -> Self {
        self.agent = agent;
        self
    }

    pub fn with_agent_name(mut self, name: impl Into<String>) -> Self {
        self.agent_name = name.into();
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::default(),
            first_name: String::new(),
            second_name: None,
            agent_name: default_agent_name(),
            agent: AgentConfig::default(),
        }
    }
}

fn name_or(name: Option<&str>, fallback: &str) -> String {
    match name.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => fallback.to_string(),
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantKind {
    Human,
    Agent,
}

/// One side of a game. Humans move through `Session::submit_move`; the
/// agent picks its own cell.
#[derive(Debug, Clone)]
pub enum Participant {
    Human {
        name: String,
        symbol: Symbol,
    },
    Agent {
        name: String,
        symbol: Symbol,
        agent: RandomAgent,
    },
}

impl Participant {
    pub fn human(name: impl Into<String>, symbol: Symbol) -> Self {
        Participant::Human {
            name: name.into(),
            symbol,
        }
    }

    pub fn agent(name: impl Into<String>, symbol: Symbol, config: &AgentConfig) -> Self {
        Participant::Agent {
            name: name.into(),
            symbol,
            agent: RandomAgent::new(config),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Participant::Human { name, .. } | Participant::Agent { name, .. } => name,
        }
    }

    pub fn symbol(&self) -> Symbol {
        match self {
            Participant::Human { symbol, .. } | Participant::Agent { symbol, .. } => *symbol,
        }
    }

    pub fn kind(&self) -> ParticipantKind {
        match self {
            Participant::Human { .. } => ParticipantKind::Human,
            Participant::Agent { .. } => ParticipantKind::Agent,
        }
    }

    pub fn is_human(&self) -> bool {
        matches!(self, Participant::Human { .. })
    }

    /// Humans never choose on their own; the agent returns `None` only on a
    /// full board.
    pub fn choose_move(&mut self, board: &Board) -> Option<CellIndex> {
        match self {
            Participant::Human { .. } => None,
            Participant::Agent { agent, .. } => agent.choose_move(board),
        }
    }

    pub fn info(&self) -> ParticipantInfo {
        ParticipantInfo {
            name: self.name().to_string(),
            symbol: self.symbol(),
            kind: self.kind(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParticipantInfo {
    pub name: String,
    pub symbol: Symbol,
    pub kind: ParticipantKind,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlacedMark {
    pub index: CellIndex,
    pub symbol: Symbol,
}

/// Result of one `submit_move` call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoveResolution {
    pub accepted: bool,
    pub outcome: Outcome,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub placed: Vec<PlacedMark>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection: Option<MoveError>,
    /// Symbol to move next; absent once the game is over.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<Symbol>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub mode: GameMode,
    pub players: Vec<ParticipantInfo>,
    pub board: Board,
    pub current: Symbol,
    pub outcome: Outcome,
    pub marks_placed: usize,
}

/// A single game: two participants, the board they share, and whose turn
/// it is. X always opens.
#[derive(Debug, Clone)]
pub struct Session {
    mode: GameMode,
    board: Board,
    // Indexed by `slot`: X first, then O.
    participants: [Participant; 2],
    current: Symbol,
    outcome: Outcome,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        let first = Participant::human(
            name_or(Some(config.first_name.as_str()), DEFAULT_FIRST_NAME),
            Symbol::X,
        );
        let second = match config.mode {
            GameMode::Single => Participant::agent(
                name_or(Some(config.agent_name.as_str()), DEFAULT_AGENT_NAME),
                Symbol::O,
                &config.agent,
            ),
            GameMode::Two => Participant::human(
                name_or(config.second_name.as_deref(), DEFAULT_SECOND_NAME),
                Symbol::O,
            ),
        };

        utils::log(&format!(
            "New {} game: {} (X) vs {} (O)",
            config.mode,
            first.name(),
            second.name()
        ));

        Self {
            mode: config.mode,
            board: Board::new(),
            participants: [first, second],
            current: Symbol::X,
            outcome: Outcome::InProgress,
        }
    }

    fn slot(symbol: Symbol) -> usize {
        match symbol {
            Symbol::X => 0,
            Symbol::O => 1,
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_terminal()
    }

    pub fn current_symbol(&self) -> Symbol {
        self.current
    }

    pub fn participant(&self, symbol: Symbol) -> &Participant {
        &self.participants[Self::slot(symbol)]
    }

    pub fn current_participant(&self) -> &Participant {
        self.participant(self.current)
    }

    /// Plays `index` for the human whose turn it is, then lets the agent
    /// answer while it holds the turn. Rejections leave the session as it
    /// was.
    pub fn submit_move(&mut self, index: CellIndex) -> MoveResolution {
        match self.play_human_turn(index) {
            Ok(mark) => {
                let mut placed = vec![mark];
                self.play_agent_turns(&mut placed);
                self.resolution(placed, None)
            }
            Err(error) => self.resolution(Vec::new(), Some(error)),
        }
    }

    /// `submit_move` for a raw number from the page.
    pub fn submit_index(&mut self, value: f64) -> MoveResolution {
        match cell_index(value) {
            Ok(index) => self.submit_move(index),
            Err(error) => self.resolution(Vec::new(), Some(error)),
        }
    }

    fn play_human_turn(&mut self, index: CellIndex) -> Result<PlacedMark, MoveError> {
        self.ensure_in_progress()?;
        self.place(index)
    }

    /// Lets the agent holding the turn pick and play a cell.
    pub fn play_agent_turn(&mut self) -> Result<PlacedMark, MoveError> {
        self.ensure_in_progress()?;
        let slot = Self::slot(self.current);
        let participant = &mut self.participants[slot];
        if participant.is_human() {
            return Err(MoveError::NotAgentTurn);
        }
        let index = participant
            .choose_move(&self.board)
            .ok_or(MoveError::GameFinished)?;
        self.place(index)
    }

    fn play_agent_turns(&mut self, placed: &mut Vec<PlacedMark>) {
        while !self.is_finished() && !self.current_participant().is_human() {
            match self.play_agent_turn() {
                Ok(mark) => placed.push(mark),
                Err(_) => break,
            }
        }
    }

    fn ensure_in_progress(&self) -> Result<(), MoveError> {
        if self.is_finished() {
            return Err(MoveError::GameFinished);
        }
        Ok(())
    }

    fn place(&mut self, index: CellIndex) -> Result<PlacedMark, MoveError> {
        let symbol = self.current;
        self.board.try_apply(index, symbol)?;
        self.outcome = self.board.evaluate();
        if self.outcome.is_terminal() {
            self.announce_outcome();
        } else {
            self.current = symbol.opponent();
        }
        Ok(PlacedMark { index, symbol })
    }

    fn announce_outcome(&self) {
        let headline = match self.outcome.winner() {
            Some(symbol) => format!("{} ({symbol}) wins", self.participant(symbol).name()),
            None => "Tie game".to_string(),
        };
        utils::log(&format!("{headline}\n{}", self.board.render()));
    }

    fn resolution(&self, placed: Vec<PlacedMark>, rejection: Option<MoveError>) -> MoveResolution {
        MoveResolution {
            accepted: rejection.is_none(),
            outcome: self.outcome,
            placed,
            rejection,
            next: (!self.is_finished()).then_some(self.current),
        }
    }

    /// Clears the board for a rematch between the same participants.
    pub fn reset(&mut self) {
        self.board.reset();
        self.current = Symbol::X;
        self.outcome = Outcome::InProgress;
        utils::log("Board reset");
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            mode: self.mode,
            players: self.participants.iter().map(Participant::info).collect(),
            board: self.board.clone(),
            current: self.current,
            outcome: self.outcome,
            marks_placed: self.board.marks_placed(),
        }
    }
}
