//! Rejection reasons.
//!
//! Every error here is recoverable: the board, castling rights and turn are
//! exactly as they were before the rejected call.

use checkboard_core::{Color, PieceKind};
use thiserror::Error;

/// Why a submitted move was not played.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum MoveError {
    /// The piece cannot reach the target by its movement rule.
    #[error("{}", shape_message(.0))]
    IllegalShape(PieceKind),

    /// The destination holds a piece of the mover's own color.
    #[error("{0} cannot move to its own piece")]
    OccupiedByFriend(Color),

    /// The piece belongs to the side that is not to move.
    #[error("it's not your turn")]
    OutOfTurn,

    /// The move would leave the mover's king attacked.
    #[error("you cannot move there because your king would be in check")]
    SelfCheck,

    /// A castling attempt failed one of its preconditions.
    #[error("castling unavailable: {0}")]
    CastlingUnavailable(CastlingBlock),

    /// A square index outside 0..63.
    #[error("square {0} is off the board")]
    OutOfRange(i64),

    /// There is no piece on the origin square.
    #[error("there is no piece on that square")]
    EmptySquare,

    /// A promoted pawn is waiting for its new kind.
    #[error("choose a piece for the promoted pawn first")]
    PromotionPending,

    /// The game has already ended.
    #[error("the game is over")]
    GameFinished,
}

fn shape_message(kind: &PieceKind) -> &'static str {
    match kind {
        PieceKind::King => "the King can only move one square in any direction",
        PieceKind::Queen => "the Queen can move horizontally, vertically, or diagonally",
        PieceKind::Rook => "the Rook can only move horizontally or vertically",
        PieceKind::Bishop => "the Bishop can only move diagonally",
        PieceKind::Knight => "the Knight can only move in an L shape",
        PieceKind::Pawn => "the Pawn can only move forward, or capture diagonally",
    }
}

/// The precondition a castling attempt failed.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum CastlingBlock {
    #[error("the king or that rook has already moved")]
    RightsLost,

    #[error("the rook is not on its starting square")]
    RookMissing,

    #[error("pieces stand between the king and the rook")]
    PathBlocked,

    #[error("the king is in check")]
    KingInCheck,

    #[error("the king would pass through or land on an attacked square")]
    PassesThroughCheck,
}

/// Why a promotion choice was refused.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum PromotionError {
    #[error("no promotion is pending")]
    NotPending,

    #[error("a pawn cannot promote to a {0}")]
    InvalidKind(PieceKind),

    #[error("there is no pawn to promote on that square")]
    NoPawn,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_messages_name_the_piece() {
        assert_eq!(
            MoveError::IllegalShape(PieceKind::Knight).to_string(),
            "the Knight can only move in an L shape"
        );
        assert!(MoveError::IllegalShape(PieceKind::Bishop)
            .to_string()
            .contains("diagonally"));
    }

    #[test]
    fn friend_message_names_the_color() {
        assert_eq!(
            MoveError::OccupiedByFriend(Color::Black).to_string(),
            "Black cannot move to its own piece"
        );
    }

    #[test]
    fn castling_block_is_nested() {
        let err = MoveError::CastlingUnavailable(CastlingBlock::PathBlocked);
        assert_eq!(
            err.to_string(),
            "castling unavailable: pieces stand between the king and the rook"
        );
    }

    #[test]
    fn promotion_errors() {
        assert_eq!(
            PromotionError::InvalidKind(PieceKind::King).to_string(),
            "a pawn cannot promote to a King"
        );
        assert_eq!(PromotionError::NotPending.to_string(), "no promotion is pending");
    }
}
