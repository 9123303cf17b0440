//! Browser tests for the exported game session.

#![cfg(target_arch = "wasm32")]

use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;

use wasm_tictactoe::{
    choose_random_move, evaluate_board, new_session, think_agent, Cell, GameSession, MoveError,
    MoveResolution, Outcome, Symbol,
};

wasm_bindgen_test_configure!(run_in_browser);

fn cells_js(cells: &[Cell]) -> JsValue {
    to_value(cells).expect("cells should convert")
}

fn submit(session: &mut GameSession, index: f64) -> MoveResolution {
    let value = session.submit_move(index).expect("submitMove should not throw");
    from_value(value).expect("resolution should deserialize")
}

#[wasm_bindgen_test]
fn two_player_session_alternates_and_finishes() {
    let mut session = new_session("two", Some("Ada".into()), Some("Grace".into()))
        .expect("mode should parse");
    assert_eq!(session.current_name(), "Ada");

    let first = submit(&mut session, 0.0);
    assert!(first.accepted);
    assert_eq!(first.next, Some(Symbol::O));
    assert_eq!(session.current_symbol(), "O");

    for index in [3.0, 1.0, 4.0] {
        assert!(submit(&mut session, index).accepted);
    }
    let winning = submit(&mut session, 2.0);
    assert_eq!(winning.outcome, Outcome::XWins);
    assert_eq!(session.outcome_code(), 'X');

    let late = submit(&mut session, 8.0);
    assert!(!late.accepted);
    assert_eq!(late.rejection, Some(MoveError::GameFinished));

    session.reset();
    assert!(!session.is_finished());
    assert_eq!(session.outcome_code(), 'N');
}

#[wasm_bindgen_test]
fn malformed_indices_are_rejected() {
    let mut session = GameSession::new("single", None, None).expect("mode should parse");
    for index in [-1.0, f64::NAN, 0.5] {
        let resolution = submit(&mut session, index);
        assert!(!resolution.accepted, "index {index} was accepted");
        assert_eq!(resolution.rejection, Some(MoveError::NotACell));
    }
    let off_board = submit(&mut session, 9.0);
    assert_eq!(off_board.rejection, Some(MoveError::OutOfRange { index: 9 }));
    assert!(!session.is_finished());
    assert_eq!(
        from_value::<Vec<Cell>>(session.cells().expect("cells")).expect("cells deserialize"),
        vec![Cell::Empty; 9]
    );
}

#[wasm_bindgen_test]
fn seeded_single_player_gets_a_reply() {
    let mut session =
        GameSession::seeded("single", Some("Ada".into()), None, 17).expect("mode should parse");
    let resolution = submit(&mut session, 4.0);
    assert_eq!(resolution.placed.len(), 2);
    assert_eq!(resolution.placed[1].symbol, Symbol::O);
    assert!(session.state_json().expect("state should serialize").contains("Computer"));
}

#[wasm_bindgen_test]
fn unknown_mode_throws() {
    assert!(new_session("three", None, None).is_err());
}

#[wasm_bindgen_test]
fn evaluate_board_reads_page_cells() {
    use Cell::{Empty as E, O, X};
    let outcome = evaluate_board(cells_js(&[X, X, X, O, O, E, E, E, E])).expect("valid board");
    assert_eq!(from_value::<Outcome>(outcome).expect("outcome"), Outcome::XWins);

    assert!(evaluate_board(cells_js(&[X, X, E])).is_err());
    assert!(evaluate_board(cells_js(&[X, X, X, E, E, E, E, E, E])).is_err());
}

#[wasm_bindgen_test]
fn random_move_lands_on_empty_cell() {
    use Cell::{Empty as E, O, X};
    let cells = [X, O, X, O, X, O, E, E, E];
    let choice = choose_random_move(cells_js(&cells))
        .expect("valid board")
        .expect("board has room");
    assert!(choice >= 6);
}

#[wasm_bindgen_test]
async fn full_board_yields_undefined_from_both_agents() {
    use Cell::{O, X};
    let cells = [X, O, X, O, X, O, O, X, O];
    let direct = choose_random_move(cells_js(&cells)).expect("valid board");
    assert_eq!(direct, None);

    let value = JsFuture::from(think_agent(cells_js(&cells)))
        .await
        .expect("promise should resolve");
    assert!(value.is_undefined());
}

#[wasm_bindgen_test]
async fn think_agent_resolves_with_a_cell() {
    use Cell::{Empty as E, O, X};
    let cells = [X, O, X, O, X, O, O, X, E];
    let value = JsFuture::from(think_agent(cells_js(&cells)))
        .await
        .expect("promise should resolve");
    assert_eq!(value.as_f64(), Some(8.0));
}
