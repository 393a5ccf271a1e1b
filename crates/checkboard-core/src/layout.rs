//! Board layout strings.
//!
//! A layout is the piece-placement field of a FEN record: eight ranks
//! separated by `/`, rank 8 first, digits counting empty squares and
//! `KQRBNP`/`kqrbnp` naming White/Black pieces. Side to move, castling and
//! clocks are not part of a layout; the session carries those separately.

use crate::Piece;
use thiserror::Error;

/// Errors that can occur when parsing a layout string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("invalid layout: expected 8 ranks, got {0}")]
    RankCount(usize),

    #[error("invalid character '{character}' in rank {rank}")]
    InvalidCharacter { character: char, rank: u8 },

    #[error("rank {rank} has {squares} squares, expected 8")]
    RankLength { rank: u8, squares: u32 },
}

/// The standard starting layout.
pub const STANDARD_LAYOUT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

/// Parses a layout into a square-indexed array.
pub fn parse_layout(layout: &str) -> Result<[Option<Piece>; 64], LayoutError> {
    let ranks: Vec<&str> = layout.trim().split('/').collect();
    if ranks.len() != 8 {
        return Err(LayoutError::RankCount(ranks.len()));
    }

    let mut squares = [None; 64];
    for (i, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - i;
        let rank_label = rank as u8 + 1;
        let mut file = 0u32;

        for c in rank_str.chars() {
            if let Some(digit) = c.to_digit(10) {
                file += digit;
            } else if let Some(piece) = Piece::from_layout_char(c) {
                if file < 8 {
                    squares[rank * 8 + file as usize] = Some(piece);
                }
                file += 1;
            } else {
                return Err(LayoutError::InvalidCharacter {
                    character: c,
                    rank: rank_label,
                });
            }
            if file > 8 {
                break;
            }
        }

        if file != 8 {
            return Err(LayoutError::RankLength {
                rank: rank_label,
                squares: file,
            });
        }
    }

    Ok(squares)
}

/// Writes a square-indexed array as a layout string.
pub fn write_layout(squares: &[Option<Piece>; 64]) -> String {
    let mut out = String::new();

    for rank in (0..8u8).rev() {
        let mut empty_count = 0;
        for file in 0..8u8 {
            let sq = rank * 8 + file;
            match squares[sq as usize] {
                Some(piece) => {
                    if empty_count > 0 {
                        out.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    out.push(piece.to_layout_char());
                }
                None => empty_count += 1,
            }
        }
        if empty_count > 0 {
            out.push_str(&empty_count.to_string());
        }
        if rank > 0 {
            out.push('/');
        }
    }

    out
}
