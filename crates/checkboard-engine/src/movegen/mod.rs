//! Reachable and legal destinations.
//!
//! [`attacks`] answers "where can this piece go" from movement rules alone.
//! The functions here add king safety on top, so their answers match what
//! [`crate::rules::try_move`] would accept.

pub mod attacks;

pub use attacks::{is_in_check, piece_targets, targets, Direction};

use crate::rules::validate_castle;
use crate::SquareSet;
use checkboard_core::{Board, CastlingSide, CastlingState, Color, PieceKind, Square};

/// Destinations the piece on `from` may legally move to.
///
/// Includes the king's castling landing squares when castling is currently
/// allowed. An empty square has no legal targets.
pub fn legal_targets(board: &Board, castling: &CastlingState, from: Square) -> SquareSet {
    let piece = match board.get(from) {
        Some(piece) => piece,
        None => return SquareSet::EMPTY,
    };

    let mut legal: SquareSet = piece_targets(board, from, piece)
        .into_iter()
        .filter(|&to| !exposes_king(board, from, to, piece.color))
        .collect();

    if piece.kind == PieceKind::King && from == CastlingSide::king_from(piece.color) {
        for side in CastlingSide::ALL {
            if validate_castle(board, castling, piece.color, side).is_ok() {
                legal.insert(side.king_to(piece.color));
            }
        }
    }

    legal
}

/// Returns true if `color` has at least one move that does not leave its king attacked.
///
/// Castling is not considered: it is never available while in check, which
/// is the only situation this is asked about.
pub fn has_legal_move(board: &Board, color: Color) -> bool {
    board.pieces_of(color).any(|(from, piece)| {
        piece_targets(board, from, piece)
            .into_iter()
            .any(|to| !exposes_king(board, from, to, color))
    })
}

/// Returns true if `color` is in check and cannot get out of it.
pub fn is_checkmate(board: &Board, color: Color) -> bool {
    is_in_check(board, color) && !has_legal_move(board, color)
}

fn exposes_king(board: &Board, from: Square, to: Square, color: Color) -> bool {
    let mut after = *board;
    after.move_raw(from, to);
    is_in_check(&after, color)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(index: u8) -> Square {
        Square::from_index(index).unwrap()
    }

    fn board(layout: &str) -> Board {
        Board::from_layout(layout).unwrap()
    }

    #[test]
    fn opening_knight_targets() {
        let b = Board::standard();
        assert_eq!(
            legal_targets(&b, &CastlingState::new(), Square::B1).indices(),
            vec![16, 18]
        );
    }

    #[test]
    fn pinned_piece_has_no_legal_targets() {
        // bishop on e2 pinned by the rook on e8
        let b = board("4r2k/8/8/8/8/8/4B3/4K3");
        assert!(legal_targets(&b, &CastlingState::none(), sq(12)).is_empty());
    }

    #[test]
    fn pinned_rook_may_slide_along_the_pin() {
        let b = board("4r2k/8/8/8/8/8/4R3/4K3");
        let set = legal_targets(&b, &CastlingState::none(), sq(12));
        assert_eq!(set.indices(), vec![20, 28, 36, 44, 52, 60]);
    }

    #[test]
    fn castling_squares_are_listed() {
        let b = board("r3k2r/8/8/8/8/8/8/R3K2R");
        let set = legal_targets(&b, &CastlingState::new(), Square::E1);
        assert!(set.contains(Square::G1));
        assert!(set.contains(Square::C1));

        let set = legal_targets(&b, &CastlingState::none(), Square::E1);
        assert!(!set.contains(Square::G1));
        assert!(!set.contains(Square::C1));
    }

    #[test]
    fn back_rank_mate() {
        let b = board("R5k1/5ppp/8/8/8/8/8/6K1");
        assert!(is_checkmate(&b, Color::Black));
        assert!(!is_checkmate(&b, Color::White));
    }

    #[test]
    fn check_with_an_escape_is_not_mate() {
        let b = board("R5k1/5pp1/8/8/8/8/8/6K1");
        assert!(is_in_check(&b, Color::Black));
        assert!(has_legal_move(&b, Color::Black));
        assert!(!is_checkmate(&b, Color::Black));
    }

    #[test]
    fn blocking_the_check_counts_as_a_move() {
        // black rook on d7 can interpose on d8
        let b = board("R5k1/3r1ppp/8/8/8/8/8/6K1");
        assert!(!is_checkmate(&b, Color::Black));
    }

    #[test]
    fn side_without_pieces_has_no_move() {
        let b = board("8/8/8/8/8/8/8/K7");
        assert!(!has_legal_move(&b, Color::Black));
    }
}
