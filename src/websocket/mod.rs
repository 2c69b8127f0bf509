pub mod game_handlers;
pub mod handler;
pub mod session;

pub use handler::{ws_index, ChessWebSocket};
pub use session::{GameSession, Outbox};
