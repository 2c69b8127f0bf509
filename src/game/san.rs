//! Standard algebraic notation for the move history.

use chess::{Board, BoardStatus, ChessMove, MoveGen, Piece, Square, EMPTY};

/// Render `mv` in SAN as seen from `board`, the position before the move.
///
/// `mv` is expected to be legal on `board`.
pub fn to_san(board: &Board, mv: ChessMove) -> String {
    let source = mv.get_source();
    let dest = mv.get_dest();

    let piece = match board.piece_on(source) {
        Some(piece) => piece,
        None => return mv.to_string(),
    };

    let mut san = String::new();

    let file_jump = dest.get_file().to_index() as i32 - source.get_file().to_index() as i32;
    if piece == Piece::King && file_jump.abs() == 2 {
        san.push_str(if file_jump > 0 { "O-O" } else { "O-O-O" });
    } else if piece == Piece::Pawn {
        // a pawn changing file always captures, en passant included
        if file_jump != 0 {
            san.push(file_char(source));
            san.push('x');
        }
        san.push_str(&dest.to_string());
        if let Some(promotion) = mv.get_promotion() {
            san.push('=');
            san.push(piece_letter(promotion));
        }
    } else {
        san.push(piece_letter(piece));
        san.push_str(&disambiguation(board, mv, piece));
        if board.piece_on(dest).is_some() {
            san.push('x');
        }
        san.push_str(&dest.to_string());
    }

    let after = board.make_move_new(mv);
    if after.status() == BoardStatus::Checkmate {
        san.push('#');
    } else if *after.checkers() != EMPTY {
        san.push('+');
    }

    san
}

fn disambiguation(board: &Board, mv: ChessMove, piece: Piece) -> String {
    let source = mv.get_source();
    let rivals: Vec<Square> = MoveGen::new_legal(board)
        .filter(|other| {
            other.get_dest() == mv.get_dest()
                && other.get_source() != source
                && board.piece_on(other.get_source()) == Some(piece)
        })
        .map(|other| other.get_source())
        .collect();

    if rivals.is_empty() {
        return String::new();
    }
    if rivals.iter().all(|sq| sq.get_file() != source.get_file()) {
        return file_char(source).to_string();
    }
    if rivals.iter().all(|sq| sq.get_rank() != source.get_rank()) {
        return rank_char(source).to_string();
    }
    source.to_string()
}

fn piece_letter(piece: Piece) -> char {
    match piece {
        Piece::Pawn => 'P',
        Piece::Knight => 'N',
        Piece::Bishop => 'B',
        Piece::Rook => 'R',
        Piece::Queen => 'Q',
        Piece::King => 'K',
    }
}

fn file_char(square: Square) -> char {
    (b'a' + square.get_file().to_index() as u8) as char
}

fn rank_char(square: Square) -> char {
    (b'1' + square.get_rank().to_index() as u8) as char
}
