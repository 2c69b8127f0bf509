//! The game controller: board widget events in, display updates out.
//!
//! One controller per board. It owns the rules engine, the clock, the mode and
//! theme selection, and the random opponent. Scheduling is left to the host:
//! the controller only reports when an opponent move is due and re-checks that
//! precondition when asked to play it.

use chess::{ChessMove, Color, Piece, Rank};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::Rng;

use crate::error::ControllerError;
use crate::game::clock::{Clock, Tick};
use crate::game::engine::{ChessEngine, RulesEngine};
use crate::game::opponent::pick_random_move;
use crate::game::settings::{GameMode, PieceThemes, DEFAULT_THEME};
use crate::game::surface::BoardSurface;
use crate::game::utils::{color_name, format_time, number_history, parse_square};

/// The human always plays White; in [`GameMode::VsRandom`] Black is the opponent.
pub const HUMAN_COLOR: Color = Color::White;
pub const OPPONENT_COLOR: Color = Color::Black;

/// Result of a piece drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The move was illegal or not allowed; the piece goes back.
    Snapback,
    /// The move was played. `opponent_due` asks the host to schedule the opponent.
    Accepted { opponent_due: bool },
}

/// Drag-start rule of the board widget.
///
/// `piece` uses the widget's codes (`wP`, `bK`, ...). Anything that does not
/// start with `w` or `b` is refused.
pub fn authorize_drag_start(piece: &str, turn: Color, game_over: bool) -> bool {
    if game_over {
        return false;
    }
    match piece.chars().next() {
        Some('w') => turn == Color::White,
        Some('b') => turn == Color::Black,
        _ => false,
    }
}

fn opponent_prefix() -> char {
    match OPPONENT_COLOR {
        Color::White => 'w',
        Color::Black => 'b',
    }
}

/// Widget code for a piece: `wP`, `bN`, ...
fn piece_code(piece: Piece, color: Color) -> String {
    let side = match color {
        Color::White => 'w',
        Color::Black => 'b',
    };
    format!("{}{}", side, piece.to_string(Color::White))
}

pub struct GameController<E = ChessEngine, R = StdRng> {
    engine: E,
    clock: Clock,
    mode: GameMode,
    themes: PieceThemes,
    theme: String,
    /// Flag-fall message. Once set it wins over any derived status.
    status_override: Option<String>,
    rng: R,
}

impl<E: RulesEngine, R: Rng> GameController<E, R> {
    pub fn new(engine: E, start_seconds: u32, rng: R) -> Self {
        GameController {
            engine,
            clock: Clock::new(start_seconds),
            mode: GameMode::default(),
            themes: PieceThemes::default(),
            theme: DEFAULT_THEME.to_string(),
            status_override: None,
            rng,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn piece_theme(&self) -> &str {
        self.themes.resolve(&self.theme)
    }

    /// Over by the rules, or by a flag fall.
    pub fn is_game_over(&self) -> bool {
        self.status_override.is_some() || self.engine.is_game_over()
    }

    /// Push the whole state to a freshly attached surface.
    pub fn render(&self, surface: &mut impl BoardSurface) {
        surface.set_piece_theme(self.piece_theme());
        self.sync_board(surface);
        self.sync_timers(surface);
    }

    /// [`authorize_drag_start`] for the current game. In [`GameMode::VsRandom`]
    /// the opponent's pieces are never draggable.
    pub fn can_drag(&self, piece: &str) -> bool {
        if self.mode == GameMode::VsRandom && piece.starts_with(opponent_prefix()) {
            return false;
        }
        authorize_drag_start(piece, self.engine.side_to_move(), self.is_game_over())
    }

    /// Handle a drop from the widget.
    ///
    /// Pawns reaching the last rank always become queens.
    pub fn apply_drop(
        &mut self,
        source: &str,
        target: &str,
        surface: &mut impl BoardSurface,
    ) -> DropOutcome {
        match self.try_drop(source, target) {
            Ok(()) => {
                self.sync_board(surface);
                let opponent_due = self.opponent_move_due();
                if opponent_due {
                    debug!("Opponent move due after {}-{}", source, target);
                }
                DropOutcome::Accepted { opponent_due }
            }
            Err(e) => {
                debug!("Snapping back: {}", e);
                surface.snapback(source, target);
                DropOutcome::Snapback
            }
        }
    }

    fn try_drop(&mut self, source: &str, target: &str) -> Result<(), ControllerError> {
        let from = parse_square(source)?;
        let to = parse_square(target)?;
        let illegal = || ControllerError::IllegalMove {
            from: source.to_string(),
            to: target.to_string(),
        };

        let (piece, color) = self.engine.piece_on(from).ok_or_else(illegal)?;
        if !self.can_drag(&piece_code(piece, color)) {
            return Err(illegal());
        }

        let last_rank = match color {
            Color::White => Rank::Eighth,
            Color::Black => Rank::First,
        };
        let promotion = if piece == Piece::Pawn && to.get_rank() == last_rank {
            Some(Piece::Queen)
        } else {
            None
        };

        if self.engine.apply(ChessMove::new(from, to, promotion)) {
            Ok(())
        } else {
            Err(illegal())
        }
    }

    /// Status line, in order: flag fall, checkmate, stalemate, threefold
    /// repetition, other draws, then whose move it is.
    pub fn compute_status(&self) -> String {
        if let Some(message) = &self.status_override {
            return message.clone();
        }

        let mover = color_name(self.engine.side_to_move());
        if self.engine.is_checkmate() {
            format!("Game over, {} is in checkmate.", mover)
        } else if self.engine.is_stalemate() {
            "Game over, stalemate.".to_string()
        } else if self.engine.is_threefold_repetition() {
            "Game over, threefold repetition.".to_string()
        } else if self.engine.is_other_draw() {
            "Game over, drawn position.".to_string()
        } else if self.engine.is_check() {
            format!("{} to move, {} is in check.", mover, mover)
        } else {
            format!("{} to move", mover)
        }
    }

    pub fn history_view(&self) -> Vec<String> {
        number_history(self.engine.history())
    }

    /// One second of clock time for the side to move.
    pub fn tick(&mut self, surface: &mut impl BoardSurface) -> Tick {
        let to_move = self.engine.side_to_move();
        let game_over = self.is_game_over();
        let tick = self.clock.tick(to_move, game_over);

        match tick {
            Tick::Running => self.sync_timers(surface),
            Tick::Flagged(color) => {
                let message = format!(
                    "{} ran out of time. {} wins!",
                    color_name(color),
                    color_name(!color)
                );
                info!("{}", message);
                self.status_override = Some(message);
                self.sync_timers(surface);
                self.sync_board(surface);
            }
            Tick::Stopped => {}
        }
        tick
    }

    /// Take back the last move; in [`GameMode::VsRandom`] take back the
    /// opponent's reply too so the human is to move again.
    ///
    /// Clock time already spent stays spent.
    pub fn undo_last_move(&mut self, surface: &mut impl BoardSurface) {
        let played = self.engine.history().len();
        if played == 0 {
            return;
        }

        if self.mode == GameMode::VsRandom && played % 2 == 0 {
            self.engine.undo();
        }
        self.engine.undo();
        debug!(
            "Undo: {} -> {} moves recorded",
            played,
            self.engine.history().len()
        );

        self.sync_board(surface);
    }

    /// Whether the random opponent should move now.
    pub fn opponent_move_due(&self) -> bool {
        self.mode == GameMode::VsRandom
            && self.engine.side_to_move() == OPPONENT_COLOR
            && !self.is_game_over()
    }

    /// Play one uniformly random legal move for the opponent.
    ///
    /// Re-checks [`Self::opponent_move_due`] first, so a callback scheduled
    /// before an undo, a mode switch or a flag fall does nothing.
    pub fn make_opponent_move(&mut self, surface: &mut impl BoardSurface) -> Option<ChessMove> {
        if !self.opponent_move_due() {
            debug!("Opponent move no longer due, skipping");
            return None;
        }

        let moves = self.engine.legal_moves();
        let mv = pick_random_move(&moves, &mut self.rng)?;
        if !self.engine.apply(mv) {
            warn!("Rules engine refused its own legal move {}", mv);
            return None;
        }
        debug!("Opponent played {}", mv);

        self.sync_board(surface);
        Some(mv)
    }

    /// Destinations of legal moves from `source` for the side to move.
    pub fn legal_targets(&self, source: &str) -> Result<Vec<String>, ControllerError> {
        let from = parse_square(source)?;
        if self.is_game_over() {
            return Ok(Vec::new());
        }
        Ok(self
            .engine
            .legal_moves_from(from)
            .into_iter()
            .filter(|mv| mv.get_promotion().is_none() || mv.get_promotion() == Some(Piece::Queen))
            .map(|mv| mv.get_dest().to_string())
            .collect())
    }

    pub fn set_mode(&mut self, value: &str) -> Result<GameMode, ControllerError> {
        let mode: GameMode = value.parse()?;
        if mode != self.mode {
            info!("Game mode changed to {}", mode);
        }
        self.mode = mode;
        Ok(mode)
    }

    pub fn set_theme(&mut self, name: &str, surface: &mut impl BoardSurface) {
        self.theme = name.to_string();
        surface.set_piece_theme(self.piece_theme());
    }

    /// Redraw the board and everything derived from the game record.
    fn sync_board(&self, surface: &mut impl BoardSurface) {
        surface.set_position(
            &self.engine.fen(),
            self.engine.side_to_move(),
            self.is_game_over(),
        );
        surface.set_status(&self.compute_status());
        surface.set_history(&self.history_view());
    }

    fn sync_timers(&self, surface: &mut impl BoardSurface) {
        surface.set_timers(
            &format_time(self.clock.remaining(Color::White)),
            &format_time(self.clock.remaining(Color::Black)),
        );
    }
}
