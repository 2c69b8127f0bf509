use chess::{Board, Color, Piece, Square, EMPTY};
use std::str::FromStr;

use crate::error::ControllerError;

/// Convert a chess color to its wire name
pub fn color_to_string(color: Color) -> String {
    match color {
        Color::White => "white".to_string(),
        Color::Black => "black".to_string(),
    }
}

/// Capitalised color name used in status text
pub fn color_name(color: Color) -> &'static str {
    match color {
        Color::White => "White",
        Color::Black => "Black",
    }
}

/// Parse a square name such as `e4`
pub fn parse_square(name: &str) -> Result<Square, ControllerError> {
    Square::from_str(&name.trim().to_lowercase())
        .map_err(|_| ControllerError::InvalidSquare(name.to_string()))
}

/// Format seconds as `mm:ss`
pub fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Number each ply of a SAN history: `1. e4`, `2. e5`, ...
pub fn number_history(moves: &[String]) -> Vec<String> {
    moves
        .iter()
        .enumerate()
        .map(|(index, san)| format!("{}. {}", index + 1, san))
        .collect()
}

/// Check if the board has insufficient material for checkmate
///
/// Bare kings, a single minor piece, or any number of bishops that all stand
/// on the same square color.
pub fn has_insufficient_material(board: &Board) -> bool {
    let majors_and_pawns =
        *board.pieces(Piece::Pawn) | *board.pieces(Piece::Rook) | *board.pieces(Piece::Queen);
    if majors_and_pawns != EMPTY {
        return false;
    }

    let knights = board.pieces(Piece::Knight).popcnt();
    let bishops = *board.pieces(Piece::Bishop);

    match (knights, bishops.popcnt()) {
        (0, 0) | (1, 0) | (0, 1) => true,
        (0, _) => {
            let mut light = false;
            let mut dark = false;
            for square in bishops {
                if (square.get_rank().to_index() + square.get_file().to_index()) % 2 == 0 {
                    dark = true;
                } else {
                    light = true;
                }
            }
            light != dark
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(fen: &str) -> Board {
        Board::from_str(fen).unwrap()
    }

    #[test]
    fn formats_clock_readouts() {
        assert_eq!(format_time(300), "05:00");
        assert_eq!(format_time(9), "00:09");
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(754), "12:34");
    }

    #[test]
    fn numbers_every_ply() {
        let moves = vec!["e4".to_string(), "e5".to_string(), "Nf3".to_string()];
        assert_eq!(number_history(&moves), vec!["1. e4", "2. e5", "3. Nf3"]);
        assert!(number_history(&[]).is_empty());
    }

    #[test]
    fn parses_squares_case_insensitively() {
        assert_eq!(parse_square("E4").unwrap(), Square::E4);
        assert!(matches!(
            parse_square("z9"),
            Err(ControllerError::InvalidSquare(_))
        ));
    }

    #[test]
    fn bare_kings_and_single_minors_are_insufficient() {
        assert!(has_insufficient_material(&board("8/8/8/4k3/8/8/8/4K3 w - - 0 1")));
        assert!(has_insufficient_material(&board("8/8/8/4k3/8/8/8/2B1K3 w - - 0 1")));
        assert!(has_insufficient_material(&board("8/8/8/4k3/8/8/8/1N2K3 w - - 0 1")));
    }

    #[test]
    fn same_colored_bishops_are_insufficient() {
        // c1 and f8 are both dark squares
        assert!(has_insufficient_material(&board("5b2/8/8/4k3/8/8/8/2B1K3 w - - 0 1")));
        // c1 dark, c8 light
        assert!(!has_insufficient_material(&board("2b5/8/8/4k3/8/8/8/2B1K3 w - - 0 1")));
    }

    #[test]
    fn pawns_rooks_and_knight_pairs_are_sufficient() {
        assert!(!has_insufficient_material(&board("8/8/8/4k3/8/8/4P3/4K3 w - - 0 1")));
        assert!(!has_insufficient_material(&board("8/8/8/4k3/8/8/8/R3K3 w - - 0 1")));
        assert!(!has_insufficient_material(&board("8/8/8/4k3/8/8/8/1N2K1N1 w - - 0 1")));
    }
}
