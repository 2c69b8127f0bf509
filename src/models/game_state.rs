use actix::MessageResponse;
use serde::Serialize;

use crate::game::GameMode;

/// What a game session looks like at one instant
#[derive(MessageResponse, Serialize, Debug, Clone)]
pub struct SessionSnapshot {
    pub session_id: String,
    pub fen: String,
    pub history: Vec<String>,
    pub status: String,
    pub mode: GameMode,
    pub white_seconds: u32,
    pub black_seconds: u32,
    pub clock_running: bool,
    pub opponent_pending: bool,
}
