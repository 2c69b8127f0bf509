//! Rules engine seam.
//!
//! The controller only talks to [`RulesEngine`]. [`ChessEngine`] backs it with
//! the `chess` crate and adds what that crate leaves to the caller: undo, SAN
//! history, move counters, repetition and draw rules.

use chess::{Board, BoardStatus, ChessMove, Color, MoveGen, Piece, Rank, Square, EMPTY};
use std::str::FromStr;

use crate::error::ControllerError;
use crate::game::san::to_san;
use crate::game::utils::has_insufficient_material;

/// Everything the controller needs from a chess rules implementation.
pub trait RulesEngine {
    fn side_to_move(&self) -> Color;

    fn piece_on(&self, square: Square) -> Option<(Piece, Color)>;

    fn legal_moves(&self) -> Vec<ChessMove>;

    fn legal_moves_from(&self, square: Square) -> Vec<ChessMove> {
        self.legal_moves()
            .into_iter()
            .filter(|mv| mv.get_source() == square)
            .collect()
    }

    /// Applies the move if legal. Returns `false` and leaves the game untouched otherwise.
    fn apply(&mut self, mv: ChessMove) -> bool;

    /// Takes back the last move, if any.
    fn undo(&mut self) -> Option<ChessMove>;

    fn fen(&self) -> String;

    /// Moves played so far, in SAN.
    fn history(&self) -> &[String];

    fn is_checkmate(&self) -> bool;
    fn is_stalemate(&self) -> bool;
    fn is_threefold_repetition(&self) -> bool;
    /// Insufficient material or the fifty-move rule.
    fn is_other_draw(&self) -> bool;
    fn is_check(&self) -> bool;

    fn is_game_over(&self) -> bool {
        self.is_checkmate()
            || self.is_stalemate()
            || self.is_threefold_repetition()
            || self.is_other_draw()
    }
}

#[derive(Debug, Clone, Copy)]
struct Ply {
    board: Board,
    /// Square skipped by a double pawn step on the previous move, capturable or not.
    en_passant: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
}

/// A game on top of `chess::Board`, keeping one board per ply so undo is a pop.
#[derive(Debug, Clone)]
pub struct ChessEngine {
    plies: Vec<Ply>,
    moves: Vec<ChessMove>,
    san: Vec<String>,
}

impl Default for ChessEngine {
    fn default() -> Self {
        ChessEngine::from_board(Board::default(), 0, 1)
    }
}

impl ChessEngine {
    pub fn new() -> Self {
        ChessEngine::default()
    }

    /// Starts from a FEN. Missing move counters default to `0 1`.
    pub fn from_fen(fen: &str) -> Result<Self, ControllerError> {
        let board =
            Board::from_str(fen).map_err(|_| ControllerError::InvalidPosition(fen.to_string()))?;

        let mut fields = fen.split_whitespace().skip(3);
        let en_passant = match fields.next() {
            None | Some("-") => None,
            Some(square) => Some(
                Square::from_str(square)
                    .map_err(|_| ControllerError::InvalidPosition(fen.to_string()))?,
            ),
        };
        let halfmove_clock = counter(fields.next(), 0, fen)?;
        let fullmove_number = counter(fields.next(), 1, fen)?;

        let mut engine = ChessEngine::from_board(board, halfmove_clock, fullmove_number);
        engine.plies[0].en_passant = en_passant;
        Ok(engine)
    }

    fn from_board(board: Board, halfmove_clock: u32, fullmove_number: u32) -> Self {
        ChessEngine {
            plies: vec![Ply {
                board,
                en_passant: None,
                halfmove_clock,
                fullmove_number,
            }],
            moves: Vec::new(),
            san: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.current().board
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.current().halfmove_clock
    }

    fn current(&self) -> &Ply {
        // plies always holds the starting position
        &self.plies[self.plies.len() - 1]
    }
}

/// Placement, side to move, castling rights and en-passant square: the part of
/// the FEN that identifies a position for repetition.
fn position_key(ply: &Ply) -> String {
    let fields: Vec<String> = ply
        .board
        .to_string()
        .split_whitespace()
        .take(3)
        .map(str::to_string)
        .collect();
    let en_passant = ply
        .en_passant
        .map(|square| square.to_string())
        .unwrap_or_else(|| "-".to_string());
    format!("{} {}", fields.join(" "), en_passant)
}

fn double_step_square(board: &Board, mv: ChessMove) -> Option<Square> {
    if board.piece_on(mv.get_source()) != Some(Piece::Pawn) {
        return None;
    }
    let from = mv.get_source().get_rank().to_index();
    let to = mv.get_dest().get_rank().to_index();
    if from.abs_diff(to) != 2 {
        return None;
    }
    Some(Square::make_square(
        Rank::from_index((from + to) / 2),
        mv.get_source().get_file(),
    ))
}

fn counter(field: Option<&str>, default: u32, fen: &str) -> Result<u32, ControllerError> {
    match field {
        Some(value) => value
            .parse()
            .map_err(|_| ControllerError::InvalidPosition(fen.to_string())),
        None => Ok(default),
    }
}

impl RulesEngine for ChessEngine {
    fn side_to_move(&self) -> Color {
        self.board().side_to_move()
    }

    fn piece_on(&self, square: Square) -> Option<(Piece, Color)> {
        let board = self.board();
        Some((board.piece_on(square)?, board.color_on(square)?))
    }

    fn legal_moves(&self) -> Vec<ChessMove> {
        MoveGen::new_legal(self.board()).collect()
    }

    fn apply(&mut self, mv: ChessMove) -> bool {
        let ply = *self.current();
        if !ply.board.legal(mv) {
            return false;
        }

        let resets_clock = ply.board.piece_on(mv.get_source()) == Some(Piece::Pawn)
            || ply.board.piece_on(mv.get_dest()).is_some();
        let fullmove_number = match ply.board.side_to_move() {
            Color::White => ply.fullmove_number,
            Color::Black => ply.fullmove_number + 1,
        };

        self.san.push(to_san(&ply.board, mv));
        self.moves.push(mv);
        self.plies.push(Ply {
            board: ply.board.make_move_new(mv),
            en_passant: double_step_square(&ply.board, mv),
            halfmove_clock: if resets_clock { 0 } else { ply.halfmove_clock + 1 },
            fullmove_number,
        });
        true
    }

    fn undo(&mut self) -> Option<ChessMove> {
        let mv = self.moves.pop()?;
        self.san.pop();
        self.plies.pop();
        Some(mv)
    }

    fn fen(&self) -> String {
        let ply = self.current();
        format!(
            "{} {} {}",
            position_key(ply),
            ply.halfmove_clock,
            ply.fullmove_number
        )
    }

    fn history(&self) -> &[String] {
        &self.san
    }

    fn is_checkmate(&self) -> bool {
        self.board().status() == BoardStatus::Checkmate
    }

    fn is_stalemate(&self) -> bool {
        self.board().status() == BoardStatus::Stalemate
    }

    fn is_threefold_repetition(&self) -> bool {
        let key = position_key(self.current());
        self.plies
            .iter()
            .filter(|ply| position_key(ply) == key)
            .count()
            >= 3
    }

    fn is_other_draw(&self) -> bool {
        self.halfmove_clock() >= 100 || has_insufficient_material(self.board())
    }

    fn is_check(&self) -> bool {
        *self.board().checkers() != EMPTY
    }
}
