//! Castling validation and execution.

use super::{AppliedMove, Special};
use crate::error::CastlingBlock;
use crate::movegen::is_in_check;
use checkboard_core::{Board, CastlingSide, CastlingState, Color, Piece, PieceKind};
use tracing::info;

/// Checks whether `color` may castle toward `side` without changing anything.
///
/// Preconditions are tested in a fixed order and the first failure is
/// reported: rights, rook presence, empty path, not in check, and finally
/// every square the king crosses, each tested by placing the king there on
/// a scratch copy of the board.
pub fn validate_castle(
    board: &Board,
    castling: &CastlingState,
    color: Color,
    side: CastlingSide,
) -> Result<(), CastlingBlock> {
    let king_from = CastlingSide::king_from(color);

    if !castling.for_color(color).available(side)
        || board.get(king_from) != Some(Piece::new(PieceKind::King, color))
    {
        return Err(CastlingBlock::RightsLost);
    }

    if board.get(side.rook_from(color)) != Some(Piece::new(PieceKind::Rook, color)) {
        return Err(CastlingBlock::RookMissing);
    }

    if side.between(color).into_iter().any(|sq| !board.is_empty(sq)) {
        return Err(CastlingBlock::PathBlocked);
    }

    if is_in_check(board, color) {
        return Err(CastlingBlock::KingInCheck);
    }

    for step in side.king_path(color) {
        let mut provisional = *board;
        provisional.move_raw(king_from, step);
        if is_in_check(&provisional, color) {
            return Err(CastlingBlock::PassesThroughCheck);
        }
    }

    Ok(())
}

/// Castles if [`validate_castle`] allows it, moving king and rook together.
///
/// Both of the side's rights are spent afterwards. On failure nothing changes.
pub fn try_castle(
    board: &mut Board,
    castling: &mut CastlingState,
    color: Color,
    side: CastlingSide,
) -> Result<AppliedMove, CastlingBlock> {
    validate_castle(board, castling, color, side)?;

    let king_from = CastlingSide::king_from(color);
    let king_to = side.king_to(color);
    board.move_raw(king_from, king_to);
    board.move_raw(side.rook_from(color), side.rook_to(color));
    castling.for_color_mut(color).mark_castled();

    info!(%color, %side, "castled");
    Ok(AppliedMove {
        piece: Piece::new(PieceKind::King, color),
        from: king_from,
        to: king_to,
        captured: None,
        special: Special::Castle(side),
    })
}
