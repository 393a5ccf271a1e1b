//! Console command parsing.

use checkboard_core::PieceKind;
use checkboard_engine::{parse_reply, ReplyError};
use thiserror::Error;

/// Commands typed at the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Move by raw square indices, e.g. `12 28` or `12, 28`.
    Move { from: i64, to: i64 },
    /// Choose the kind of a pending promotion.
    Promote(PieceKind),
    /// Print the board.
    Board,
    /// List legal destinations of the piece on a square.
    Hints(i64),
    /// List the pieces of the side to move.
    Pieces,
    Quit,
    /// Blank line.
    Empty,
}

/// Errors that can occur when parsing a console line.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("promote expects one of q, r, b, n")]
    PromotionChoice,

    #[error("hints expects a square index")]
    MissingSquare,

    #[error(transparent)]
    Move(#[from] ReplyError),
}

impl Command {
    /// Parse a console line.
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        let input = input.trim();
        let mut parts = input.split_whitespace();

        let cmd = match parts.next() {
            Some(cmd) => cmd,
            None => return Ok(Command::Empty),
        };

        if cmd.starts_with(|c: char| c.is_ascii_digit() || c == '-') {
            let (from, to) = parse_reply(input)?;
            return Ok(Command::Move { from, to });
        }

        match cmd {
            "board" => Ok(Command::Board),
            "pieces" => Ok(Command::Pieces),
            "quit" | "exit" => Ok(Command::Quit),
            "promote" => parts
                .next()
                .and_then(parse_kind)
                .map(Command::Promote)
                .ok_or(CommandError::PromotionChoice),
            "hints" => parts
                .next()
                .and_then(|sq| sq.parse().ok())
                .map(Command::Hints)
                .ok_or(CommandError::MissingSquare),
            _ => Err(CommandError::Unknown(input.to_string())),
        }
    }
}

fn parse_kind(text: &str) -> Option<PieceKind> {
    match text.to_ascii_lowercase().as_str() {
        "queen" => Some(PieceKind::Queen),
        "rook" => Some(PieceKind::Rook),
        "bishop" => Some(PieceKind::Bishop),
        "knight" => Some(PieceKind::Knight),
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => PieceKind::from_char(c),
                _ => None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_moves() {
        assert_eq!(
            Command::parse("12 28").unwrap(),
            Command::Move { from: 12, to: 28 }
        );
        assert_eq!(
            Command::parse("52, 36\n").unwrap(),
            Command::Move { from: 52, to: 36 }
        );
        assert_eq!(
            Command::parse("-1 8").unwrap(),
            Command::Move { from: -1, to: 8 }
        );
    }

    #[test]
    fn parse_bad_move() {
        assert!(matches!(
            Command::parse("12"),
            Err(CommandError::Move(ReplyError::Malformed(_)))
        ));
    }

    #[test]
    fn parse_promote() {
        assert_eq!(
            Command::parse("promote q").unwrap(),
            Command::Promote(PieceKind::Queen)
        );
        assert_eq!(
            Command::parse("promote Knight").unwrap(),
            Command::Promote(PieceKind::Knight)
        );
        // the session decides whether the kind is allowed
        assert_eq!(
            Command::parse("promote k").unwrap(),
            Command::Promote(PieceKind::King)
        );
        assert_eq!(
            Command::parse("promote"),
            Err(CommandError::PromotionChoice)
        );
        assert_eq!(
            Command::parse("promote dragon"),
            Err(CommandError::PromotionChoice)
        );
    }

    #[test]
    fn parse_keywords() {
        assert_eq!(Command::parse("board").unwrap(), Command::Board);
        assert_eq!(Command::parse("pieces").unwrap(), Command::Pieces);
        assert_eq!(Command::parse("quit").unwrap(), Command::Quit);
        assert_eq!(Command::parse("   ").unwrap(), Command::Empty);
        assert_eq!(Command::parse("hints 1").unwrap(), Command::Hints(1));
        assert_eq!(Command::parse("hints"), Err(CommandError::MissingSquare));
    }

    #[test]
    fn parse_unknown() {
        assert_eq!(
            Command::parse("resign now"),
            Err(CommandError::Unknown("resign now".to_string()))
        );
    }
}
