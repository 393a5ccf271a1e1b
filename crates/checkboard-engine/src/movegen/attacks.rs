//! Reachability for every piece kind, and check detection built on it.
//!
//! Everything here is computed by walking the board square by square with
//! [`Square::offset`], which refuses to step past an edge. That keeps rays
//! and knight jumps from wrapping onto the opposite file.

use crate::SquareSet;
use checkboard_core::{Board, Color, Piece, PieceKind, Square};

/// Longest possible ray on an 8x8 board.
pub const MAX_RAY: u8 = 7;

/// The eight compass directions a ray can travel in.
///
/// North is toward rank 8 (higher indices), East toward the h-file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    /// Rook directions.
    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Bishop directions.
    pub const DIAGONAL: [Direction; 4] = [
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    /// Queen and king directions.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    /// Returns the (file, rank) step of this direction.
    #[inline]
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::NorthEast => (1, 1),
            Direction::NorthWest => (-1, 1),
            Direction::SouthEast => (1, -1),
            Direction::SouthWest => (-1, -1),
        }
    }
}

/// Knight jumps as (file, rank) deltas.
///
/// In raw index terms these are +17, +15, +10, +6, -6, -10, -15, -17; going
/// through deltas is what rejects jumps that would wrap around an edge.
const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (-1, 2),
    (2, 1),
    (-2, 1),
    (2, -1),
    (-2, -1),
    (1, -2),
    (-1, -2),
];

/// Walks from `from` in `direction` for at most `limit` steps.
///
/// Empty squares are collected and the walk continues. The first occupied
/// square ends the walk; it is collected only if it holds a piece of the
/// other color than `mover`.
pub fn ray(board: &Board, from: Square, mover: Color, direction: Direction, limit: u8) -> SquareSet {
    let (file_delta, rank_delta) = direction.delta();
    let mut set = SquareSet::EMPTY;
    let mut current = from;

    for _ in 0..limit {
        current = match current.offset(file_delta, rank_delta) {
            Some(next) => next,
            None => break,
        };
        match board.get(current) {
            None => set.insert(current),
            Some(piece) => {
                if piece.is_enemy_of(mover) {
                    set.insert(current);
                }
                break;
            }
        }
    }

    set
}

/// Union of [`ray`] over several directions.
pub fn rays(
    board: &Board,
    from: Square,
    mover: Color,
    directions: &[Direction],
    limit: u8,
) -> SquareSet {
    directions
        .iter()
        .fold(SquareSet::EMPTY, |acc, &dir| acc | ray(board, from, mover, dir, limit))
}

/// Knight destinations that are empty or hold an enemy piece.
pub fn knight_targets(board: &Board, from: Square, mover: Color) -> SquareSet {
    KNIGHT_DELTAS
        .iter()
        .filter_map(|&(df, dr)| from.offset(df, dr))
        .filter(|&to| board.get(to).map_or(true, |piece| piece.is_enemy_of(mover)))
        .collect()
}

/// King destinations: one step in any direction. Castling is handled by the rules.
#[inline]
pub fn king_targets(board: &Board, from: Square, mover: Color) -> SquareSet {
    rays(board, from, mover, &Direction::ALL, 1)
}

/// Pawn destinations: pushes onto empty squares, diagonal steps onto enemies.
pub fn pawn_targets(board: &Board, from: Square, mover: Color) -> SquareSet {
    let dir = mover.pawn_direction();
    let mut set = SquareSet::EMPTY;

    if let Some(one) = from.offset(0, dir) {
        if board.is_empty(one) {
            set.insert(one);
            if from.rank() == mover.pawn_rank() {
                if let Some(two) = one.offset(0, dir) {
                    if board.is_empty(two) {
                        set.insert(two);
                    }
                }
            }
        }
    }

    for side in [-1, 1] {
        if let Some(to) = from.offset(side, dir) {
            if board.get(to).is_some_and(|piece| piece.is_enemy_of(mover)) {
                set.insert(to);
            }
        }
    }

    set
}

/// Squares the given piece could move to from `from`, ignoring king safety.
pub fn piece_targets(board: &Board, from: Square, piece: Piece) -> SquareSet {
    let mover = piece.color;
    match piece.kind {
        PieceKind::Pawn => pawn_targets(board, from, mover),
        PieceKind::Knight => knight_targets(board, from, mover),
        PieceKind::Bishop => rays(board, from, mover, &Direction::DIAGONAL, MAX_RAY),
        PieceKind::Rook => rays(board, from, mover, &Direction::ORTHOGONAL, MAX_RAY),
        PieceKind::Queen => rays(board, from, mover, &Direction::ALL, MAX_RAY),
        PieceKind::King => king_targets(board, from, mover),
    }
}

/// Squares the piece on `from` could move to, ignoring king safety.
///
/// An empty square has no targets.
#[inline]
pub fn targets(board: &Board, from: Square) -> SquareSet {
    match board.get(from) {
        Some(piece) => piece_targets(board, from, piece),
        None => SquareSet::EMPTY,
    }
}

/// Returns true if any piece of color `by` could move onto `square`.
///
/// Only meaningful for an occupied square: on an empty one a pawn push
/// counts and a pawn's diagonal does not.
fn is_square_attacked(board: &Board, square: Square, by: Color) -> bool {
    board
        .pieces_of(by)
        .any(|(from, piece)| piece_targets(board, from, piece).contains(square))
}

/// Returns true if `color`'s king is attacked.
///
/// A board without a king for `color` is never in check; callers that need
/// to treat a missing king as game over check [`Board::king_square`] first.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    match board.king_square(color) {
        Some(king) => is_square_attacked(board, king, color.opposite()),
        None => false,
    }
}
