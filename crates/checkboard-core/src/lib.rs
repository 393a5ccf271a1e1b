//! Core types for the checkboard rules engine.
//!
//! This crate provides the leaf types shared by the engine and its callers:
//! - [`Piece`], [`PieceKind`] and [`Color`] for piece representation
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`Board`], the 64-square placement array
//! - [`CastlingRights`] and [`CastlingState`] for castling bookkeeping
//! - Layout strings for describing a board in one line

mod board;
mod castling;
mod color;
pub mod layout;
mod piece;
mod square;

pub use board::Board;
pub use castling::{CastlingRights, CastlingSide, CastlingState};
pub use color::Color;
pub use layout::LayoutError;
pub use piece::{Piece, PieceKind};
pub use square::{File, Rank, Square};
