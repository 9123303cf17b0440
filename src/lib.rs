pub mod ai;
pub mod game;
pub mod session;
pub mod utils;

use serde::Serialize;
use serde_wasm_bindgen::{from_value, to_value};
use std::str::FromStr;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;
use web_sys::js_sys::Promise;

pub use ai::{AgentConfig, RandomAgent};
pub use game::{
    cell_index, evaluate, Board, Cell, CellIndex, IntegrityError, MoveError, Outcome, Symbol,
    CELL_COUNT, WINNING_LINES,
};
pub use session::{
    GameMode, MoveResolution, Participant, ParticipantInfo, ParticipantKind, PlacedMark, Session,
    SessionConfig, SessionSnapshot,
};

#[cfg(all(feature = "wee_alloc", target_arch = "wasm32"))]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn start() {
    utils::set_panic_hook();
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    to_value(value).map_err(JsValue::from)
}

fn serde_to_js_error<E: std::fmt::Display>(error: E) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn integrity_to_js_error(error: IntegrityError) -> JsValue {
    to_value(&error).unwrap_or_else(|serialize_err| JsValue::from_str(&serialize_err.to_string()))
}

fn board_from_js(cells: JsValue) -> Result<Board, JsValue> {
    let cells: Vec<Cell> = from_value(cells).map_err(JsValue::from)?;
    let count = cells.len();
    let cells: [Cell; CELL_COUNT] = cells.try_into().map_err(|_| {
        JsValue::from_str(&format!("expected {CELL_COUNT} cells, got {count}"))
    })?;
    let board = Board::from_cells(cells);
    board.integrity_check().map_err(integrity_to_js_error)?;
    Ok(board)
}

fn parse_mode(mode: &str) -> Result<GameMode, JsValue> {
    GameMode::from_str(mode).map_err(|_| JsValue::from_str(&format!("unknown game mode: {mode}")))
}

#[wasm_bindgen]
pub struct GameSession {
    session: Session,
}

#[wasm_bindgen]
impl GameSession {
    #[wasm_bindgen(constructor)]
    pub fn new(
        mode: &str,
        name1: Option<String>,
        name2: Option<String>,
    ) -> Result<GameSession, JsValue> {
        let config =
            SessionConfig::new(parse_mode(mode)?).with_names(name1.unwrap_or_default(), name2);
        Ok(GameSession {
            session: Session::new(config),
        })
    }

    /// Same as the constructor, with a fixed seed for the computer player.
    pub fn seeded(
        mode: &str,
        name1: Option<String>,
        name2: Option<String>,
        seed: u32,
    ) -> Result<GameSession, JsValue> {
        let config = SessionConfig::new(parse_mode(mode)?)
            .with_names(name1.unwrap_or_default(), name2)
            .with_agent(AgentConfig::default().with_seed(u64::from(seed)));
        Ok(GameSession {
            session: Session::new(config),
        })
    }

    #[wasm_bindgen(js_name = "submitMove")]
    pub fn submit_move(&mut self, index: f64) -> Result<JsValue, JsValue> {
        let resolution = self.session.submit_index(index);
        to_js(&resolution)
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    pub fn outcome(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.outcome())
    }

    #[wasm_bindgen(js_name = "outcomeCode")]
    pub fn outcome_code(&self) -> char {
        self.session.outcome().code()
    }

    #[wasm_bindgen(js_name = "isFinished")]
    pub fn is_finished(&self) -> bool {
        self.session.is_finished()
    }

    #[wasm_bindgen(js_name = "currentSymbol")]
    pub fn current_symbol(&self) -> String {
        self.session.current_symbol().to_string()
    }

    #[wasm_bindgen(js_name = "currentName")]
    pub fn current_name(&self) -> String {
        self.session.current_participant().name().to_string()
    }

    pub fn cells(&self) -> Result<JsValue, JsValue> {
        to_js(self.session.board().cells())
    }

    #[wasm_bindgen(js_name = "stateJson")]
    pub fn state_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.snapshot()).map_err(serde_to_js_error)
    }

    pub fn render(&self) -> String {
        self.session.board().render()
    }
}

#[wasm_bindgen(js_name = "newSession")]
pub fn new_session(
    mode: &str,
    name1: Option<String>,
    name2: Option<String>,
) -> Result<GameSession, JsValue> {
    GameSession::new(mode, name1, name2)
}

#[wasm_bindgen(js_name = "evaluateBoard")]
pub fn evaluate_board(cells: JsValue) -> Result<JsValue, JsValue> {
    let board = board_from_js(cells)?;
    to_js(&board.evaluate())
}

#[wasm_bindgen(js_name = "chooseRandomMove")]
pub fn choose_random_move(cells: JsValue) -> Result<Option<u32>, JsValue> {
    let board = board_from_js(cells)?;
    let mut agent = RandomAgent::default();
    Ok(agent.choose_move(&board).map(|index| index as u32))
}

/// Resolves to `undefined` on a full board, like `chooseRandomMove`.
#[wasm_bindgen(js_name = "thinkAgent")]
pub fn think_agent(cells: JsValue) -> Promise {
    let board = board_from_js(cells);
    future_to_promise(async move {
        let board = board?;
        let mut agent = RandomAgent::default();
        Ok(agent
            .choose_move(&board)
            .map(|index| JsValue::from(index as u32))
            .unwrap_or(JsValue::UNDEFINED))
    })
}

#[wasm_bindgen(js_name = "renderBoard")]
pub fn render_board(cells: JsValue) -> Result<String, JsValue> {
    Ok(board_from_js(cells)?.render())
}
