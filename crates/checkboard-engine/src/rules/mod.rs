//! Move validation and application.
//!
//! [`try_move`] is the single entry point that turns a `(from, to)` pair into
//! a board change. It holds no state of its own: the board and castling
//! rights are borrowed for the duration of the call, and on any rejection
//! they are left exactly as they were.

mod castling;

pub use castling::{try_castle, validate_castle};

use crate::error::{MoveError, PromotionError};
use crate::movegen::{is_in_check, piece_targets};
use checkboard_core::{Board, CastlingSide, CastlingState, Color, Piece, PieceKind, Square};
use std::fmt;
use tracing::{debug, info};

/// A special effect attached to an applied move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Special {
    None,
    /// King and rook were relocated together.
    Castle(CastlingSide),
    /// A pawn reached the far rank and waits for its new kind.
    Promotion,
}

/// A move that was played on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedMove {
    /// The piece that moved, as it was before any promotion.
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
    pub captured: Option<Piece>,
    pub special: Special,
}

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEndReason {
    /// The side to move is in check and has no move that escapes it.
    Checkmate,
    /// A king was taken off the board by a capture.
    KingCaptured,
    /// A king was already missing when a move was submitted.
    KingMissing,
}

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameResult {
    /// `None` only when both kings are missing.
    pub winner: Option<Color>,
    pub reason: GameEndReason,
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let how = match self.reason {
            GameEndReason::Checkmate => "checkmate",
            GameEndReason::KingCaptured => "capturing the king",
            GameEndReason::KingMissing => "the opposing king being absent",
        };
        match self.winner {
            Some(color) => write!(f, "{} wins by {}", color, how),
            None => write!(f, "no winner: both kings are missing"),
        }
    }
}

/// What happened to a submitted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Applied(AppliedMove),
    Rejected(MoveError),
    /// The piece on the origin square belongs to the side not to move.
    NotPlayersTurn,
    /// The game ended, either by this move (`applied` is set) or because a
    /// king was already gone.
    GameOver {
        applied: Option<AppliedMove>,
        result: GameResult,
    },
}

impl MoveOutcome {
    /// Returns the move that was played, if any.
    pub fn applied(&self) -> Option<&AppliedMove> {
        match self {
            MoveOutcome::Applied(applied) => Some(applied),
            MoveOutcome::GameOver { applied, .. } => applied.as_ref(),
            _ => None,
        }
    }

    /// Returns true if the board changed.
    pub fn is_applied(&self) -> bool {
        self.applied().is_some()
    }

    /// Returns the rejection reason. `NotPlayersTurn` maps to [`MoveError::OutOfTurn`].
    pub fn reason(&self) -> Option<MoveError> {
        match self {
            MoveOutcome::Rejected(err) => Some(*err),
            MoveOutcome::NotPlayersTurn => Some(MoveError::OutOfTurn),
            _ => None,
        }
    }

    /// Returns true if the outcome ends the game.
    pub fn is_game_over(&self) -> bool {
        matches!(self, MoveOutcome::GameOver { .. })
    }

    /// Returns true if a promotion choice is now required.
    pub fn needs_promotion(&self) -> bool {
        matches!(self, MoveOutcome::Applied(applied) if applied.special == Special::Promotion)
    }
}

impl fmt::Display for AppliedMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.special, self.captured) {
            (Special::Castle(side), _) => write!(f, "{} castles {}", self.piece.color, side),
            (_, Some(captured)) => write!(f, "{} attacks and captures {}", self.piece, captured),
            _ => write!(f, "{} moves from {} to {}", self.piece, self.from, self.to),
        }?;
        if self.special == Special::Promotion {
            write!(f, "; choose a piece for the promoted pawn")?;
        }
        Ok(())
    }
}

impl fmt::Display for MoveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveOutcome::Applied(applied) => write!(f, "{}", applied),
            MoveOutcome::Rejected(err) => write!(f, "{}", err),
            MoveOutcome::NotPlayersTurn => write!(f, "{}", MoveError::OutOfTurn),
            MoveOutcome::GameOver {
                applied: Some(applied),
                result,
            } => write!(f, "{}. Game over: {}", applied, result),
            MoveOutcome::GameOver {
                applied: None,
                result,
            } => write!(f, "Game over: {}", result),
        }
    }
}

/// Validates and plays `from -> to` for the side `turn`.
///
/// The checks run in this order: a piece must stand on `from`, it must
/// belong to `turn`, both kings must be present, a canonical king castling
/// move is handed to [`try_castle`], the destination must not hold a friend,
/// the piece must be able to reach `to`, and finally the move is played
/// provisionally and undone if it leaves the mover's king attacked.
pub fn try_move(
    board: &mut Board,
    castling: &mut CastlingState,
    turn: Color,
    from: Square,
    to: Square,
) -> MoveOutcome {
    let piece = match board.get(from) {
        Some(piece) => piece,
        None => return reject(MoveError::EmptySquare, from, to),
    };

    if piece.color != turn {
        debug!(%from, %to, %turn, "piece does not belong to the side to move");
        return MoveOutcome::NotPlayersTurn;
    }

    if let Some(result) = missing_king(board) {
        info!(%result, "king missing before move");
        return MoveOutcome::GameOver {
            applied: None,
            result,
        };
    }

    if piece.kind == PieceKind::King {
        if let Some(side) = CastlingSide::from_king_move(piece.color, from, to) {
            return match try_castle(board, castling, piece.color, side) {
                Ok(applied) => MoveOutcome::Applied(applied),
                Err(block) => reject(MoveError::CastlingUnavailable(block), from, to),
            };
        }
    }

    let target = board.get(to);
    if target.is_some_and(|other| other.color == piece.color) {
        return reject(MoveError::OccupiedByFriend(piece.color), from, to);
    }

    if !piece_targets(board, from, piece).contains(to) {
        return reject(MoveError::IllegalShape(piece.kind), from, to);
    }

    let captured = match target {
        Some(victim) if victim.kind == PieceKind::King => {
            board.move_raw(from, to);
            let applied = record(piece, from, to, Some(victim));
            update_castling_rights(castling, &applied);
            let result = GameResult {
                winner: Some(piece.color),
                reason: GameEndReason::KingCaptured,
            };
            info!(%result, "king captured");
            return MoveOutcome::GameOver {
                applied: Some(applied),
                result,
            };
        }
        _ => {
            let snapshot = *board;
            let captured = board.move_raw(from, to);
            if is_in_check(board, piece.color) {
                *board = snapshot;
                return reject(MoveError::SelfCheck, from, to);
            }
            captured
        }
    };

    let applied = record(piece, from, to, captured);
    update_castling_rights(castling, &applied);
    if applied.special == Special::Promotion {
        info!(square = %to, color = %piece.color, "pawn reached the promotion rank");
    }
    MoveOutcome::Applied(applied)
}

/// Replaces the pawn on `square` with a piece of `kind` and the same color.
pub fn promote(board: &mut Board, square: Square, kind: PieceKind) -> Result<Piece, PromotionError> {
    if !kind.is_promotion_target() {
        return Err(PromotionError::InvalidKind(kind));
    }

    match board.get(square) {
        Some(pawn)
            if pawn.kind == PieceKind::Pawn && square.rank() == pawn.color.promotion_rank() =>
        {
            board.set_kind(square, kind);
            info!(%square, %kind, color = %pawn.color, "pawn promoted");
            Ok(Piece::new(kind, pawn.color))
        }
        _ => Err(PromotionError::NoPawn),
    }
}

/// Returns a result if either king is absent from the board.
pub fn missing_king(board: &Board) -> Option<GameResult> {
    let white = board.king_square(Color::White).is_some();
    let black = board.king_square(Color::Black).is_some();
    let winner = match (white, black) {
        (true, true) => return None,
        (true, false) => Some(Color::White),
        (false, true) => Some(Color::Black),
        (false, false) => None,
    };
    Some(GameResult {
        winner,
        reason: GameEndReason::KingMissing,
    })
}

fn record(piece: Piece, from: Square, to: Square, captured: Option<Piece>) -> AppliedMove {
    let special = if piece.kind == PieceKind::Pawn && to.rank() == piece.color.promotion_rank() {
        Special::Promotion
    } else {
        Special::None
    };
    AppliedMove {
        piece,
        from,
        to,
        captured,
        special,
    }
}

/// Revokes rights when a king or rook leaves home, or a rook is captured at home.
fn update_castling_rights(castling: &mut CastlingState, applied: &AppliedMove) {
    let color = applied.piece.color;
    match applied.piece.kind {
        PieceKind::King => castling.for_color_mut(color).mark_king_moved(),
        PieceKind::Rook => {
            if let Some(side) = CastlingSide::from_rook_home(color, applied.from) {
                castling.for_color_mut(color).mark_rook_moved(side);
            }
        }
        _ => {}
    }

    if let Some(victim) = applied.captured {
        if victim.kind == PieceKind::Rook {
            if let Some(side) = CastlingSide::from_rook_home(victim.color, applied.to) {
                castling.for_color_mut(victim.color).mark_rook_moved(side);
            }
        }
    }
}

fn reject(err: MoveError, from: Square, to: Square) -> MoveOutcome {
    debug!(%from, %to, reason = %err, "move rejected");
    MoveOutcome::Rejected(err)
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

    fn play(b: &mut Board, turn: Color, from: u8, to: u8) -> MoveOutcome {
        let mut castling = CastlingState::none();
        try_move(b, &mut castling, turn, sq(from), sq(to))
    }

    #[test]
    fn knight_opening_move() {
        let mut b = Board::standard();
        let outcome = play(&mut b, Color::White, 1, 18);
        assert!(outcome.is_applied());
        assert_eq!(b.get(sq(18)), Some(Piece::white(PieceKind::Knight)));
        assert!(b.is_empty(sq(1)));
    }

    #[test]
    fn empty_origin_is_rejected() {
        let mut b = Board::standard();
        assert_eq!(
            play(&mut b, Color::White, 20, 28),
            MoveOutcome::Rejected(MoveError::EmptySquare)
        );
    }

    #[test]
    fn wrong_side_is_not_players_turn() {
        let mut b = Board::standard();
        let outcome = play(&mut b, Color::White, 52, 36);
        assert_eq!(outcome, MoveOutcome::NotPlayersTurn);
        assert_eq!(outcome.reason(), Some(MoveError::OutOfTurn));
        assert_eq!(b, Board::standard());
    }

    #[test]
    fn friendly_destination_is_rejected() {
        let mut b = Board::standard();
        assert_eq!(
            play(&mut b, Color::White, 0, 8),
            MoveOutcome::Rejected(MoveError::OccupiedByFriend(Color::White))
        );
    }

    #[test]
    fn bad_shape_is_rejected() {
        let mut b = Board::standard();
        assert_eq!(
            play(&mut b, Color::White, 12, 36),
            MoveOutcome::Rejected(MoveError::IllegalShape(PieceKind::Pawn))
        );
        assert_eq!(
            play(&mut b, Color::White, 1, 17),
            MoveOutcome::Rejected(MoveError::IllegalShape(PieceKind::Knight))
        );
    }

    #[test]
    fn capture_is_recorded() {
        let mut b = board("4k3/8/8/3p4/4P3/8/8/4K3");
        let outcome = play(&mut b, Color::White, 28, 35);
        let applied = outcome.applied().copied().unwrap();
        assert_eq!(applied.captured, Some(Piece::black(PieceKind::Pawn)));
        assert_eq!(
            outcome.to_string(),
            "White Pawn attacks and captures Black Pawn"
        );
    }

    #[test]
    fn pinned_piece_cannot_expose_king() {
        // white king e1, white bishop e2, black rook e8
        let mut b = board("4r2k/8/8/8/8/8/4B3/4K3");
        let before = b;
        assert_eq!(
            play(&mut b, Color::White, 12, 21),
            MoveOutcome::Rejected(MoveError::SelfCheck)
        );
        assert_eq!(b, before);
    }

    #[test]
    fn king_cannot_step_into_attack() {
        let mut b = board("5r1k/8/8/8/8/8/8/4K3");
        assert_eq!(
            play(&mut b, Color::White, 4, 5),
            MoveOutcome::Rejected(MoveError::SelfCheck)
        );
        assert!(play(&mut b, Color::White, 4, 3).is_applied());
    }

    #[test]
    fn king_cannot_retreat_along_the_checking_ray() {
        // black rook a1 checks the king on e1; f1 stays on the ray
        let mut b = board("7k/8/8/8/8/8/8/r3K3");
        assert_eq!(
            play(&mut b, Color::White, 4, 5),
            MoveOutcome::Rejected(MoveError::SelfCheck)
        );
    }

    #[test]
    fn capturing_the_king_ends_the_game() {
        let mut b = board("4k3/8/8/8/8/8/8/4R2K");
        let outcome = play(&mut b, Color::White, 4, 60);
        assert!(outcome.is_game_over());
        assert!(outcome.is_applied());
        match outcome {
            MoveOutcome::GameOver { result, .. } => {
                assert_eq!(result.winner, Some(Color::White));
                assert_eq!(result.reason, GameEndReason::KingCaptured);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn missing_king_is_game_over_without_moving() {
        let mut b = board("8/8/8/8/8/8/8/R3K3");
        let before = b;
        let outcome = play(&mut b, Color::White, 0, 8);
        assert_eq!(
            outcome,
            MoveOutcome::GameOver {
                applied: None,
                result: GameResult {
                    winner: Some(Color::White),
                    reason: GameEndReason::KingMissing,
                },
            }
        );
        assert_eq!(b, before);
    }

    #[test]
    fn pawn_reaching_last_rank_signals_promotion() {
        let mut b = board("k7/7P/8/8/8/8/8/K7");
        let outcome = play(&mut b, Color::White, 55, 63);
        assert!(outcome.needs_promotion());
        assert_eq!(b.get(sq(63)), Some(Piece::white(PieceKind::Pawn)));
    }

    #[test]
    fn black_pawn_promotes_on_rank_one() {
        let mut b = board("k7/8/8/8/8/8/p7/7K");
        assert!(play(&mut b, Color::Black, 8, 0).needs_promotion());
    }

    #[test]
    fn promote_changes_kind_in_place() {
        let mut b = board("k6P/8/8/8/8/8/8/K7");
        assert_eq!(
            promote(&mut b, sq(63), PieceKind::Knight),
            Ok(Piece::white(PieceKind::Knight))
        );
        assert_eq!(b.get(sq(63)), Some(Piece::white(PieceKind::Knight)));
    }

    #[test]
    fn promote_rejects_bad_requests() {
        let mut b = board("k6P/8/8/8/8/8/P7/K7");
        assert_eq!(
            promote(&mut b, sq(63), PieceKind::King),
            Err(PromotionError::InvalidKind(PieceKind::King))
        );
        assert_eq!(
            promote(&mut b, sq(8), PieceKind::Queen),
            Err(PromotionError::NoPawn)
        );
        assert_eq!(
            promote(&mut b, sq(62), PieceKind::Queen),
            Err(PromotionError::NoPawn)
        );
    }

    #[test]
    fn rook_and_king_moves_revoke_rights() {
        let mut b = board("r3k2r/8/8/8/8/8/8/R3K2R");
        let mut castling = CastlingState::new();
        assert!(try_move(&mut b, &mut castling, Color::White, sq(7), sq(15)).is_applied());
        assert!(!castling.for_color(Color::White).king_side_available());
        assert!(castling.for_color(Color::White).queen_side_available());

        assert!(try_move(&mut b, &mut castling, Color::Black, sq(60), sq(59)).is_applied());
        assert!(!castling.for_color(Color::Black).queen_side_available());
    }

    #[test]
    fn capturing_a_home_rook_revokes_its_wing() {
        // white bishop g7 takes the rook on h8
        let mut b = board("4k2r/6B1/8/8/8/8/8/4K3");
        let mut castling = CastlingState::new();
        assert!(try_move(&mut b, &mut castling, Color::White, sq(54), sq(63)).is_applied());
        let black = castling.for_color(Color::Black);
        assert!(!black.king_side_available());
        assert!(black.queen_side_available());
    }

    #[test]
    fn game_result_display() {
        let result = GameResult {
            winner: Some(Color::Black),
            reason: GameEndReason::Checkmate,
        };
        assert_eq!(result.to_string(), "Black wins by checkmate");
    }
}
