//! Sets of squares.
//!
//! A square set is a 64-bit integer where each bit represents a square on
//! the board. Reachability and attack queries return square sets so callers
//! can test membership, count or iterate without allocating.

use checkboard_core::Square;
use std::fmt;
use std::ops::BitOr;

/// A set of board squares.
///
/// Bit 0 = square 0 (a1), ..., bit 63 = square 63 (h8).
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct SquareSet(u64);

impl SquareSet {
    /// Empty set.
    pub const EMPTY: SquareSet = SquareSet(0);

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the number of squares in the set.
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    pub const fn contains(self, sq: Square) -> bool {
        (self.0 & (1u64 << sq.index())) != 0
    }

    #[inline]
    pub fn insert(&mut self, sq: Square) {
        self.0 |= 1u64 << sq.index();
    }

    /// Pops and returns the lowest-indexed square.
    #[inline]
    pub fn pop_first(&mut self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            let index = self.0.trailing_zeros() as u8;
            self.0 &= self.0 - 1;
            Square::from_index(index)
        }
    }

    /// Returns the squares as raw indices, lowest first.
    pub fn indices(self) -> Vec<u8> {
        self.into_iter().map(Square::index).collect()
    }
}

impl BitOr for SquareSet {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        SquareSet(self.0 | rhs.0)
    }
}

impl FromIterator<Square> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut set = SquareSet::EMPTY;
        for sq in iter {
            set.insert(sq);
        }
        set
    }
}

impl fmt::Debug for SquareSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SquareSet({:#018x})", self.0)?;
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let sq = rank * 8 + file;
                if (self.0 >> sq) & 1 == 1 {
                    write!(f, "X ")?;
                } else {
                    write!(f, ". ")?;
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "  a b c d e f g h")
    }
}

/// Iterator over the squares of a set, lowest index first.
pub struct SquareSetIter(SquareSet);

impl Iterator for SquareSetIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop_first()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.0.count() as usize;
        (count, Some(count))
    }
}

impl IntoIterator for SquareSet {
    type Item = Square;
    type IntoIter = SquareSetIter;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        SquareSetIter(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(index: u8) -> Square {
        Square::from_index(index).unwrap()
    }

    #[test]
    fn insert_and_contains() {
        let mut set = SquareSet::EMPTY;
        assert!(set.is_empty());
        set.insert(Square::A1);
        set.insert(sq(63));
        set.insert(sq(63));
        assert_eq!(set.count(), 2);
        assert!(set.contains(Square::A1));
        assert!(!set.contains(Square::B1));
    }

    #[test]
    fn iterates_in_index_order() {
        let set: SquareSet = [sq(40), sq(3), sq(17)].into_iter().collect();
        assert_eq!(set.indices(), vec![3, 17, 40]);
        assert_eq!(set.into_iter().size_hint(), (3, Some(3)));
    }

    #[test]
    fn pop_first() {
        let mut set: SquareSet = [sq(3), sq(1)].into_iter().collect();
        assert_eq!(set.pop_first().map(|s| s.index()), Some(1));
        assert_eq!(set.pop_first().map(|s| s.index()), Some(3));
        assert_eq!(set.pop_first(), None);
    }

    #[test]
    fn union() {
        let a: SquareSet = [sq(1), sq(2)].into_iter().collect();
        let b: SquareSet = [sq(2), sq(3)].into_iter().collect();
        assert_eq!((a | b).indices(), vec![1, 2, 3]);
    }

    #[test]
    fn debug_grid_marks_members() {
        let set: SquareSet = [Square::A1].into_iter().collect();
        let grid = format!("{:?}", set);
        assert!(grid.contains("1 X . . . . . . ."));
    }
}
