//! Castling rights bookkeeping and castling geometry.

use crate::{Color, File, Square};

/// The two wings a king can castle toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastlingSide {
    /// Toward the h-file rook.
    KingSide,
    /// Toward the a-file rook.
    QueenSide,
}

impl CastlingSide {
    pub const ALL: [CastlingSide; 2] = [CastlingSide::KingSide, CastlingSide::QueenSide];

    const fn home(color: Color, file: File) -> Square {
        Square::new(file, color.back_rank())
    }

    /// Square the king starts on.
    pub const fn king_from(color: Color) -> Square {
        Self::home(color, File::E)
    }

    /// Square the king lands on.
    pub const fn king_to(self, color: Color) -> Square {
        match self {
            CastlingSide::KingSide => Self::home(color, File::G),
            CastlingSide::QueenSide => Self::home(color, File::C),
        }
    }

    /// Home square of the rook on this wing.
    pub const fn rook_from(self, color: Color) -> Square {
        match self {
            CastlingSide::KingSide => Self::home(color, File::H),
            CastlingSide::QueenSide => Self::home(color, File::A),
        }
    }

    /// Square the rook lands on.
    pub const fn rook_to(self, color: Color) -> Square {
        match self {
            CastlingSide::KingSide => Self::home(color, File::F),
            CastlingSide::QueenSide => Self::home(color, File::D),
        }
    }

    /// Squares between king and rook that must be empty.
    pub fn between(self, color: Color) -> Vec<Square> {
        let files: &[File] = match self {
            CastlingSide::KingSide => &[File::F, File::G],
            CastlingSide::QueenSide => &[File::B, File::C, File::D],
        };
        files.iter().map(|&f| Self::home(color, f)).collect()
    }

    /// Squares the king crosses, in order, including the landing square.
    pub fn king_path(self, color: Color) -> [Square; 2] {
        match self {
            CastlingSide::KingSide => [Self::home(color, File::F), Self::home(color, File::G)],
            CastlingSide::QueenSide => [Self::home(color, File::D), Self::home(color, File::C)],
        }
    }

    /// Returns the wing if `from -> to` is one of the canonical castling king moves.
    pub fn from_king_move(color: Color, from: Square, to: Square) -> Option<Self> {
        if from != Self::king_from(color) {
            return None;
        }
        Self::ALL.into_iter().find(|side| side.king_to(color) == to)
    }

    /// Returns the wing whose rook starts on `square`, if any.
    pub fn from_rook_home(color: Color, square: Square) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|side| side.rook_from(color) == square)
    }
}

impl std::fmt::Display for CastlingSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CastlingSide::KingSide => write!(f, "king side"),
            CastlingSide::QueenSide => write!(f, "queen side"),
        }
    }
}

/// Movement history of one side's king and rooks.
///
/// Flags only ever go from `false` to `true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastlingRights {
    king_moved: bool,
    queen_rook_moved: bool,
    king_rook_moved: bool,
}

impl CastlingRights {
    /// Rights of a side whose king and rooks have not moved.
    pub const fn new() -> Self {
        CastlingRights {
            king_moved: false,
            queen_rook_moved: false,
            king_rook_moved: false,
        }
    }

    /// Rights of a side that may no longer castle at all.
    pub const fn revoked() -> Self {
        CastlingRights {
            king_moved: true,
            queen_rook_moved: true,
            king_rook_moved: true,
        }
    }

    #[inline]
    pub fn mark_king_moved(&mut self) {
        self.king_moved = true;
    }

    #[inline]
    pub fn mark_rook_moved(&mut self, side: CastlingSide) {
        match side {
            CastlingSide::KingSide => self.king_rook_moved = true,
            CastlingSide::QueenSide => self.queen_rook_moved = true,
        }
    }

    /// Sets every flag once a castle has been played.
    #[inline]
    pub fn mark_castled(&mut self) {
        *self = Self::revoked();
    }

    #[inline]
    pub const fn king_moved(&self) -> bool {
        self.king_moved
    }

    #[inline]
    pub const fn rook_moved(&self, side: CastlingSide) -> bool {
        match side {
            CastlingSide::KingSide => self.king_rook_moved,
            CastlingSide::QueenSide => self.queen_rook_moved,
        }
    }

    #[inline]
    pub const fn king_side_available(&self) -> bool {
        !self.king_moved && !self.king_rook_moved
    }

    #[inline]
    pub const fn queen_side_available(&self) -> bool {
        !self.king_moved && !self.queen_rook_moved
    }

    #[inline]
    pub const fn available(&self, side: CastlingSide) -> bool {
        match side {
            CastlingSide::KingSide => self.king_side_available(),
            CastlingSide::QueenSide => self.queen_side_available(),
        }
    }
}

/// Castling rights for both colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastlingState([CastlingRights; 2]);

impl CastlingState {
    /// Both sides may still castle on both wings.
    pub const fn new() -> Self {
        CastlingState([CastlingRights::new(); 2])
    }

    /// Neither side may castle.
    pub const fn none() -> Self {
        CastlingState([CastlingRights::revoked(); 2])
    }

    /// Builds the state from per-color rights.
    pub const fn from_rights(white: CastlingRights, black: CastlingRights) -> Self {
        CastlingState([white, black])
    }

    #[inline]
    pub fn for_color(&self, color: Color) -> &CastlingRights {
        &self.0[color as usize]
    }

    #[inline]
    pub fn for_color_mut(&mut self, color: Color) -> &mut CastlingRights {
        &mut self.0[color as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_rights_allow_both_wings() {
        let rights = CastlingRights::new();
        assert!(rights.king_side_available());
        assert!(rights.queen_side_available());
    }

    #[test]
    fn rook_move_revokes_one_wing() {
        let mut rights = CastlingRights::new();
        rights.mark_rook_moved(CastlingSide::QueenSide);
        assert!(rights.king_side_available());
        assert!(!rights.queen_side_available());
        assert!(rights.rook_moved(CastlingSide::QueenSide));
    }

    #[test]
    fn king_move_revokes_both_wings() {
        let mut rights = CastlingRights::new();
        rights.mark_king_moved();
        assert!(!rights.king_side_available());
        assert!(!rights.queen_side_available());
        assert!(!rights.rook_moved(CastlingSide::KingSide));
    }

    #[test]
    fn mark_castled_sets_every_flag() {
        let mut rights = CastlingRights::new();
        rights.mark_castled();
        assert!(rights.king_moved());
        assert!(rights.rook_moved(CastlingSide::KingSide));
        assert!(rights.rook_moved(CastlingSide::QueenSide));
        assert_eq!(rights, CastlingRights::revoked());
    }

    #[test]
    fn state_is_per_color() {
        let mut state = CastlingState::new();
        state.for_color_mut(Color::Black).mark_king_moved();
        assert!(state.for_color(Color::White).king_side_available());
        assert!(!state.for_color(Color::Black).king_side_available());
        assert!(!CastlingState::none().for_color(Color::White).queen_side_available());
    }

    #[test]
    fn white_geometry() {
        let side = CastlingSide::KingSide;
        assert_eq!(CastlingSide::king_from(Color::White).index(), 4);
        assert_eq!(side.king_to(Color::White).index(), 6);
        assert_eq!(side.rook_from(Color::White).index(), 7);
        assert_eq!(side.rook_to(Color::White).index(), 5);

        let side = CastlingSide::QueenSide;
        assert_eq!(side.king_to(Color::White).index(), 2);
        assert_eq!(side.rook_from(Color::White).index(), 0);
        assert_eq!(side.rook_to(Color::White).index(), 3);
        let between: Vec<u8> = side.between(Color::White).iter().map(|s| s.index()).collect();
        assert_eq!(between, vec![1, 2, 3]);
    }

    #[test]
    fn black_geometry() {
        assert_eq!(CastlingSide::king_from(Color::Black), Square::E8);
        assert_eq!(CastlingSide::KingSide.king_to(Color::Black), Square::G8);
        assert_eq!(CastlingSide::QueenSide.rook_from(Color::Black), Square::A8);
        assert_eq!(
            CastlingSide::QueenSide.king_path(Color::Black),
            [Square::D8, Square::C8]
        );
    }

    #[test]
    fn canonical_king_moves() {
        assert_eq!(
            CastlingSide::from_king_move(Color::White, Square::E1, Square::G1),
            Some(CastlingSide::KingSide)
        );
        assert_eq!(
            CastlingSide::from_king_move(Color::Black, Square::E8, Square::C8),
            Some(CastlingSide::QueenSide)
        );
        assert_eq!(
            CastlingSide::from_king_move(Color::White, Square::E1, Square::F1),
            None
        );
        // a black king on e1 is not castling
        assert_eq!(
            CastlingSide::from_king_move(Color::Black, Square::E1, Square::G1),
            None
        );
    }

    #[test]
    fn rook_homes() {
        assert_eq!(
            CastlingSide::from_rook_home(Color::White, Square::H1),
            Some(CastlingSide::KingSide)
        );
        assert_eq!(
            CastlingSide::from_rook_home(Color::Black, Square::A8),
            Some(CastlingSide::QueenSide)
        );
        assert_eq!(CastlingSide::from_rook_home(Color::White, Square::A8), None);
    }
}
