//! The 64-square board.

use crate::layout::{parse_layout, write_layout, LayoutError, STANDARD_LAYOUT};
use crate::{Color, File, Piece, PieceKind, Rank, Square};
use std::fmt;

/// Square-indexed piece placement.
///
/// The board knows nothing about legality: `place`, `remove` and `move_raw`
/// mutate unconditionally and are meant to be called after a move has been
/// validated. Being `Copy`, a board can be snapshotted and restored by value.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Board {
    /// Creates a board with no pieces.
    pub const fn empty() -> Self {
        Board {
            squares: [None; 64],
        }
    }

    /// Creates the standard starting position.
    pub fn standard() -> Self {
        Self::from_layout(STANDARD_LAYOUT).expect("STANDARD_LAYOUT is valid")
    }

    /// Creates a board from a layout string (see [`crate::layout`]).
    pub fn from_layout(layout: &str) -> Result<Self, LayoutError> {
        Ok(Board {
            squares: parse_layout(layout)?,
        })
    }

    /// Returns the layout string for this board.
    pub fn to_layout(&self) -> String {
        write_layout(&self.squares)
    }

    /// Returns the piece on `square`, if any.
    #[inline]
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.squares[square.as_usize()]
    }

    /// Returns the piece at a raw index; out-of-range indices read as empty.
    #[inline]
    pub fn at(&self, index: i64) -> Option<Piece> {
        Square::try_from_int(index).and_then(|sq| self.get(sq))
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.squares[square.as_usize()].is_none()
    }

    /// Puts `piece` on `square`, replacing whatever stood there.
    #[inline]
    pub fn place(&mut self, square: Square, piece: Piece) {
        self.squares[square.as_usize()] = Some(piece);
    }

    /// Empties `square`, returning the piece that stood there.
    #[inline]
    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.as_usize()].take()
    }

    /// Moves whatever stands on `from` to `to`, returning the displaced piece.
    ///
    /// Moving from an empty square empties `to`.
    #[inline]
    pub fn move_raw(&mut self, from: Square, to: Square) -> Option<Piece> {
        let moving = self.remove(from);
        std::mem::replace(&mut self.squares[to.as_usize()], moving)
    }

    /// Changes the kind of the piece on `square` in place.
    ///
    /// Returns false if the square is empty.
    pub fn set_kind(&mut self, square: Square, kind: PieceKind) -> bool {
        match self.squares[square.as_usize()].as_mut() {
            Some(piece) => {
                piece.kind = kind;
                true
            }
            None => false,
        }
    }

    /// Returns the first square (in index order) whose piece matches.
    pub fn find<F>(&self, mut predicate: F) -> Option<Square>
    where
        F: FnMut(Piece) -> bool,
    {
        self.pieces()
            .find(|&(_, piece)| predicate(piece))
            .map(|(sq, _)| sq)
    }

    /// Returns the square of `color`'s king.
    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.find(|piece| piece.is(PieceKind::King, color))
    }

    /// Iterates over occupied squares in index order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.get(sq).map(|piece| (sq, piece)))
    }

    /// Iterates over the squares occupied by `color`.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    /// Number of occupied squares.
    pub fn count(&self) -> usize {
        self.squares.iter().filter(|sq| sq.is_some()).count()
    }

    /// Renders the board as a text diagram, using chess symbols when `unicode` is set.
    pub fn diagram(&self, unicode: bool) -> String {
        let mut out = String::new();
        for rank in Rank::ALL.into_iter().rev() {
            out.push_str(&format!("{:>2} ", rank.index() * 8));
            for file in File::ALL {
                let sq = Square::new(file, rank);
                let c = match self.get(sq) {
                    Some(piece) if unicode => piece.symbol(),
                    Some(piece) => piece.to_layout_char(),
                    None => '.',
                };
                out.push(' ');
                out.push(c);
            }
            out.push('\n');
        }
        out.push_str("    a b c d e f g h\n");
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.to_layout())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diagram(false))
    }
}
