//! JavaScript bindings. Values cross the boundary through
//! `serde-wasm-bindgen`; every error becomes a JS string.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::error::GameError;
use crate::game::{GameMode, GameSession};
use crate::protocol::NetworkMessage;
use crate::types::{Difficulty, Move, MoveReport, Position};

/// Reply to `play`: the applied move plus the relay message an online client
/// must forward to its peer.
#[derive(Serialize)]
struct PlayReply {
    report: MoveReport,
    outgoing: Option<NetworkMessage>,
}

#[wasm_bindgen]
pub struct WasmGame {
    session: GameSession,
}

#[wasm_bindgen]
impl WasmGame {
    /// `mode` is `"local"`, `"bot"` or `"online"` (with `local_side` set to
    /// `"red"` or `"blue"`); `difficulty` is `"easy"`, `"medium"` or `"hard"`.
    #[wasm_bindgen(constructor)]
    pub fn new(
        mode: &str,
        difficulty: &str,
        local_side: Option<String>,
        seed: u32,
    ) -> Result<WasmGame, JsValue> {
        let mode = GameMode::parse(mode, local_side.as_deref()).map_err(to_js_error)?;
        let difficulty: Difficulty = difficulty.parse().map_err(to_js_error)?;
        Ok(Self {
            session: GameSession::with_engine(mode, difficulty, u64::from(seed)),
        })
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.to_game_state())
    }

    pub fn legal_destinations(&self, row: u8, col: u8) -> Result<JsValue, JsValue> {
        let pos = Position::new(row, col).map_err(to_js_error)?;
        to_js(&self.session.destinations_for(pos))
    }

    pub fn play(
        &mut self,
        from_row: u8,
        from_col: u8,
        to_row: u8,
        to_col: u8,
    ) -> Result<JsValue, JsValue> {
        let mv = parse_move(from_row, from_col, to_row, to_col).map_err(to_js_error)?;
        let report = self.session.play(mv).map_err(to_js_error)?;
        let outgoing = match self.session.mode() {
            GameMode::Online(side) => Some(NetworkMessage::outgoing_move(mv, side)),
            GameMode::Local | GameMode::Bot => None,
        };
        to_js(&PlayReply { report, outgoing })
    }

    pub fn ai_move(&mut self) -> Result<JsValue, JsValue> {
        let report = self.session.ai_move().map_err(to_js_error)?;
        to_js(&report)
    }

    pub fn set_difficulty(&mut self, difficulty: &str) -> Result<(), JsValue> {
        let difficulty: Difficulty = difficulty.parse().map_err(to_js_error)?;
        self.session.set_difficulty(difficulty);
        Ok(())
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Feeds one message received from the relay. Returns the applied move
    /// report, or `undefined` when the message carried no move.
    pub fn handle_message(&mut self, msg: JsValue) -> Result<JsValue, JsValue> {
        let msg: NetworkMessage = serde_wasm_bindgen::from_value(msg)?;
        let report = self.session.handle_message(msg).map_err(to_js_error)?;
        to_js(&report)
    }
}

fn parse_move(from_row: u8, from_col: u8, to_row: u8, to_col: u8) -> Result<Move, GameError> {
    Ok(Move::new(
        Position::new(from_row, from_col)?,
        Position::new(to_row, to_col)?,
    ))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    Ok(serde_wasm_bindgen::to_value(value)?)
}

fn to_js_error(err: GameError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_move_range_checks_both_squares() {
        assert!(parse_move(0, 0, 1, 0).is_ok());
        assert_eq!(
            parse_move(0, 0, 4, 0),
            Err(GameError::OutOfRange { row: 4, col: 0 })
        );
    }
}
