//! Relay message model.
//!
//! The relay forwards JSON messages between the two peers of a room without
//! interpreting them. Only `MOVE`, `RESET`, `JOIN` and `ONLINE_COUNT` affect a
//! session; everything else is accepted and dropped.

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::types::{Move, Position, Side};

/// A square as it travels over the relay: `{"r": row, "c": col}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub r: u8,
    pub c: u8,
}

impl From<Position> for Point {
    fn from(pos: Position) -> Self {
        Self {
            r: pos.row(),
            c: pos.col(),
        }
    }
}

impl TryFrom<Point> for Position {
    type Error = GameError;

    fn try_from(point: Point) -> Result<Self, Self::Error> {
        Position::new(point.r, point.c)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovePayload {
    pub from: Point,
    pub to: Point,
}

impl MovePayload {
    /// Range-checks both squares.
    pub fn to_move(self) -> Result<Move, GameError> {
        Ok(Move::new(self.from.try_into()?, self.to.try_into()?))
    }
}

impl From<Move> for MovePayload {
    fn from(mv: Move) -> Self {
        Self {
            from: mv.from.into(),
            to: mv.to.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NetworkMessage {
    Move {
        payload: MovePayload,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sender: Option<Side>,
    },
    Reset,
    /// A peer entered the room.
    Join,
    Sync,
    /// Number of players currently online, pushed by the relay.
    OnlineCount {
        #[serde(default)]
        payload: Option<u32>,
    },
    Emoji,
    PlayerLeft,
    #[serde(other)]
    Unknown,
}

impl NetworkMessage {
    /// The message a client broadcasts after playing `mv` as `side`.
    pub fn outgoing_move(mv: Move, side: Side) -> Self {
        NetworkMessage::Move {
            payload: mv.into(),
            sender: Some(side),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: u8, col: u8) -> Position {
        Position::new(row, col).unwrap()
    }

    #[test]
    fn parses_move_message_from_relay() {
        let raw = r#"{"type":"MOVE","payload":{"from":{"r":0,"c":1},"to":{"r":1,"c":1}},"sender":"red","senderId":"abc"}"#;

        let msg: NetworkMessage = serde_json::from_str(raw).unwrap();

        let NetworkMessage::Move { payload, sender } = msg else {
            panic!("expected MOVE, got {msg:?}");
        };
        assert_eq!(sender, Some(Side::Red));
        assert_eq!(payload.to_move(), Ok(Move::new(pos(0, 1), pos(1, 1))));
    }

    #[test]
    fn outgoing_move_uses_relay_wire_shape() {
        let msg = NetworkMessage::outgoing_move(Move::new(pos(3, 2), pos(2, 2)), Side::Blue);

        let json = serde_json::to_value(&msg).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "type": "MOVE",
                "payload": {"from": {"r": 3, "c": 2}, "to": {"r": 2, "c": 2}},
                "sender": "blue"
            })
        );
    }

    #[test]
    fn parses_control_messages() {
        let reset: NetworkMessage = serde_json::from_str(r#"{"type":"RESET"}"#).unwrap();
        let join: NetworkMessage = serde_json::from_str(r#"{"type":"JOIN","senderId":"x"}"#).unwrap();
        let count: NetworkMessage =
            serde_json::from_str(r#"{"type":"ONLINE_COUNT","payload":3}"#).unwrap();

        assert_eq!(reset, NetworkMessage::Reset);
        assert_eq!(join, NetworkMessage::Join);
        assert_eq!(count, NetworkMessage::OnlineCount { payload: Some(3) });
    }

    #[test]
    fn unrelated_message_types_are_tolerated() {
        let emoji: NetworkMessage =
            serde_json::from_str(r#"{"type":"EMOJI","payload":"wave"}"#).unwrap();
        let left: NetworkMessage =
            serde_json::from_str(r#"{"type":"PLAYER_LEFT","senderId":"x"}"#).unwrap();
        let other: NetworkMessage = serde_json::from_str(r#"{"type":"PING"}"#).unwrap();

        assert_eq!(emoji, NetworkMessage::Emoji);
        assert_eq!(left, NetworkMessage::PlayerLeft);
        assert_eq!(other, NetworkMessage::Unknown);
    }

    #[test]
    fn off_grid_payload_fails_conversion() {
        let payload = MovePayload {
            from: Point { r: 3, c: 3 },
            to: Point { r: 4, c: 3 },
        };

        assert_eq!(payload.to_move(), Err(GameError::OutOfRange { row: 4, col: 3 }));
    }
}
