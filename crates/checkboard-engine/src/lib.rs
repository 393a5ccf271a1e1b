//! Rules engine for two-player chess.
//!
//! This crate provides:
//! - [`SquareSet`] - 64-bit set of squares returned by reachability queries
//! - [`GameSession`] - Turn state, castling rights and promotion for one game
//! - [`try_move`](rules::try_move) - Stateless validation and application of one move
//! - Check detection and legal destination queries in [`movegen`]
//! - Parsing of remote opponent replies in [`reply`]
//!
//! # Architecture
//!
//! The board is a plain 64-entry array from `checkboard-core`, indexed
//! rank-major from a1 (0) to h8 (63). Every piece movement is derived by
//! stepping file and rank deltas, so no ray or jump can wrap around an edge.
//! A move is validated in stages (ownership, shape, friendly fire) and then
//! played provisionally; if it leaves the mover's king attacked the board is
//! restored and the move is rejected.
//!
//! # Example
//!
//! ```
//! use checkboard_engine::{GameSession, MoveOutcome};
//! use checkboard_core::{Color, PieceKind};
//!
//! let mut session = GameSession::new();
//! assert!(session.submit_move(1, 18).is_applied());
//! assert_eq!(session.current_turn(), Color::Black);
//!
//! // a white piece cannot move on Black's turn
//! assert_eq!(session.submit_move(18, 35), MoveOutcome::NotPlayersTurn);
//! assert_eq!(session.piece_at(18).map(|p| p.kind), Some(PieceKind::Knight));
//! ```

mod error;
pub mod movegen;
pub mod reply;
pub mod rules;
mod session;
mod square_set;

pub use error::{CastlingBlock, MoveError, PromotionError};
pub use reply::{parse_reply, ReplyError};
pub use rules::{AppliedMove, GameEndReason, GameResult, MoveOutcome, Special};
pub use session::{GameSession, PromotionOutcome};
pub use square_set::SquareSet;
