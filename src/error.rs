//! Error types for the game controller and server configuration.

/// Errors raised while handling board events.
///
/// None of these reach the user as text: an illegal drop becomes a snapback,
/// the rest are logged and answered with an `error` message.
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error("Illegal move: {from} -> {to}")]
    IllegalMove { from: String, to: String },

    #[error("Invalid square: {0}")]
    InvalidSquare(String),

    #[error("Unknown game mode: {0}")]
    UnknownMode(String),

    #[error("Invalid position: {0}")]
    InvalidPosition(String),
}

/// Errors raised while reading the server configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}
