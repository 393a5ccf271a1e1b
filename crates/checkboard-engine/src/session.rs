//! Turn-based game management.
//!
//! The [`GameSession`] struct owns everything a two-player game needs:
//! - The board and both sides' castling rights
//! - Whose turn it is
//! - A pending promotion, if a pawn just reached the far rank
//! - The result once the game has ended
//!
//! [`GameSession::submit_move`] and [`GameSession::promote`] are the only
//! calls that change anything. Every other method is a read-only query for
//! whatever draws the board.

use crate::error::{MoveError, PromotionError};
use crate::movegen;
use crate::rules::{self, GameEndReason, GameResult, MoveOutcome, Special};
use crate::SquareSet;
use checkboard_core::{
    Board, CastlingRights, CastlingSide, CastlingState, Color, LayoutError, Piece, PieceKind,
    Square,
};
use tracing::{debug, info};

/// The completed promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromotionOutcome {
    pub square: Square,
    /// The piece now standing on `square`.
    pub piece: Piece,
    /// Set when the promotion ended the game.
    pub result: Option<GameResult>,
}

/// A two-player game played through raw square indices.
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    castling: CastlingState,
    turn: Color,
    /// Square of a pawn waiting for its new kind.
    pending_promotion: Option<Square>,
    result: Option<GameResult>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// Creates a game from the standard starting position, White to move.
    pub fn new() -> Self {
        Self::with_castling(Board::standard(), Color::White, CastlingState::new())
    }

    /// Creates a game from an arbitrary board.
    ///
    /// Castling rights are granted only where king and rook still stand on
    /// their home squares.
    pub fn from_board(board: Board, turn: Color) -> Self {
        let castling = inferred_castling(&board);
        Self::with_castling(board, turn, castling)
    }

    /// Creates a game from a board and explicit castling rights.
    pub fn with_castling(board: Board, turn: Color, castling: CastlingState) -> Self {
        GameSession {
            board,
            castling,
            turn,
            pending_promotion: None,
            result: None,
        }
    }

    /// Creates a game from a layout string such as `"4k3/8/8/8/8/8/8/4K2R"`.
    pub fn from_layout(layout: &str, turn: Color) -> Result<Self, LayoutError> {
        Ok(Self::from_board(Board::from_layout(layout)?, turn))
    }

    /// Submits a move by raw square index (0 = a1, 63 = h8).
    ///
    /// The turn passes to the other side only when the move completes. A
    /// pawn reaching the far rank leaves the turn with the mover until
    /// [`GameSession::promote`] is called.
    pub fn submit_move(&mut self, from: impl Into<i64>, to: impl Into<i64>) -> MoveOutcome {
        if self.result.is_some() {
            return MoveOutcome::Rejected(MoveError::GameFinished);
        }
        if self.pending_promotion.is_some() {
            return MoveOutcome::Rejected(MoveError::PromotionPending);
        }

        let (from, to) = match (square(from.into()), square(to.into())) {
            (Ok(from), Ok(to)) => (from, to),
            (Err(err), _) | (_, Err(err)) => {
                debug!(reason = %err, "move rejected");
                return MoveOutcome::Rejected(err);
            }
        };

        let outcome = rules::try_move(&mut self.board, &mut self.castling, self.turn, from, to);
        match outcome {
            MoveOutcome::Applied(applied) if applied.special == Special::Promotion => {
                self.pending_promotion = Some(applied.to);
                outcome
            }
            MoveOutcome::Applied(applied) => match self.finish_turn() {
                Some(result) => MoveOutcome::GameOver {
                    applied: Some(applied),
                    result,
                },
                None => outcome,
            },
            MoveOutcome::GameOver { applied, result } => {
                if applied.is_some() {
                    self.turn = self.turn.opposite();
                }
                self.result = Some(result);
                outcome
            }
            MoveOutcome::Rejected(_) | MoveOutcome::NotPlayersTurn => outcome,
        }
    }

    /// Chooses the new kind for the pending promotion and completes the move.
    pub fn promote(&mut self, kind: PieceKind) -> Result<PromotionOutcome, PromotionError> {
        let square = self.pending_promotion.ok_or(PromotionError::NotPending)?;
        let piece = rules::promote(&mut self.board, square, kind)?;
        self.pending_promotion = None;
        let result = self.finish_turn();
        Ok(PromotionOutcome {
            square,
            piece,
            result,
        })
    }

    /// Passes the turn and records checkmate if the new side to move is mated.
    fn finish_turn(&mut self) -> Option<GameResult> {
        let mover = self.turn;
        self.turn = mover.opposite();

        if movegen::is_checkmate(&self.board, self.turn) {
            let result = GameResult {
                winner: Some(mover),
                reason: GameEndReason::Checkmate,
            };
            info!(%result, "game over");
            self.result = Some(result);
        }
        self.result
    }

    /// Returns the side to move.
    pub fn current_turn(&self) -> Color {
        self.turn
    }

    /// Returns the piece on the square at `index`, or `None` if the square
    /// is empty or off the board.
    pub fn piece_at(&self, index: impl Into<i64>) -> Option<Piece> {
        self.board.at(index.into())
    }

    /// Returns true if `color`'s king is attacked.
    pub fn is_in_check(&self, color: Color) -> bool {
        movegen::is_in_check(&self.board, color)
    }

    pub fn castling_rights(&self, color: Color) -> CastlingRights {
        *self.castling.for_color(color)
    }

    /// Square of the pawn waiting for [`GameSession::promote`].
    pub fn pending_promotion(&self) -> Option<Square> {
        self.pending_promotion
    }

    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    pub fn is_game_over(&self) -> bool {
        self.result.is_some()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Legal destinations of the piece on `index`. Empty for off-board
    /// indices and empty squares.
    pub fn legal_targets(&self, index: impl Into<i64>) -> SquareSet {
        match Square::try_from_int(index.into()) {
            Some(from) => movegen::legal_targets(&self.board, &self.castling, from),
            None => SquareSet::EMPTY,
        }
    }

    /// Pieces of one side with their squares, in index order.
    pub fn roster(&self, color: Color) -> Vec<(Square, Piece)> {
        self.board.pieces_of(color).collect()
    }
}

fn square(index: i64) -> Result<Square, MoveError> {
    Square::try_from_int(index).ok_or(MoveError::OutOfRange(index))
}

fn inferred_castling(board: &Board) -> CastlingState {
    let rights = |color: Color| {
        let mut rights = CastlingRights::new();
        if board.get(CastlingSide::king_from(color)) != Some(Piece::new(PieceKind::King, color)) {
            rights.mark_king_moved();
        }
        for side in CastlingSide::ALL {
            if board.get(side.rook_from(color)) != Some(Piece::new(PieceKind::Rook, color)) {
                rights.mark_rook_moved(side);
            }
        }
        rights
    };
    CastlingState::from_rights(rights(Color::White), rights(Color::Black))
}
