pub mod clock;
pub mod controller;
pub mod engine;
pub mod opponent;
pub mod san;
pub mod settings;
pub mod surface;
pub mod utils;

pub use clock::{Clock, Tick};
pub use controller::{authorize_drag_start, DropOutcome, GameController};
pub use engine::{ChessEngine, RulesEngine};
pub use settings::{GameMode, PieceThemes};
pub use surface::BoardSurface;
