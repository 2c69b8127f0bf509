use actix::Message;
use serde::{Deserialize, Serialize};

use crate::models::game_state::SessionSnapshot;

/// Message sent from the page to the server
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ClientMessage {
    pub message_type: String,
    pub source: Option<String>,
    pub target: Option<String>,
    pub mode: Option<String>,
    pub theme: Option<String>,
}

/// Message sent from the server to the page
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ServerMessage {
    pub message_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fen: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_over: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub white_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub black_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub piece_theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_moves: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServerMessage {
    pub fn new(message_type: &str) -> Self {
        ServerMessage {
            message_type: message_type.to_string(),
            ..Default::default()
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        ServerMessage {
            error: Some(text.into()),
            ..ServerMessage::new("error")
        }
    }
}

/// Serialized server message on its way to the socket
#[derive(Message)]
#[rtype(result = "()")]
pub struct ChessWebSocketMessage(pub String);

/// A piece dropped on the board widget
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct DropPiece {
    pub source: String,
    pub target: String,
}

/// Ask for the legal destinations of a piece
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct GetMoves {
    pub source: String,
}

#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct UndoMove;

#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct SetMode(pub String);

#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct SetTheme(pub String);

/// The socket closed; the session stops its timers and itself
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct EndSession;

/// Read-only view of a session, for tests and diagnostics
#[derive(Message, Debug, Clone)]
#[rtype(result = "SessionSnapshot")]
pub struct GetSnapshot;
