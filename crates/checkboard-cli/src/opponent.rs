//! Scripted remote opponent.
//!
//! The opponent is a list of replies in the same text format a remote
//! player would send (`52, 36`), read up front from a file. Replies of
//! `false` and unparsable lines are skipped, the way a caller would ask a
//! remote player again.

use checkboard_core::Color;
use checkboard_engine::{parse_reply, GameSession, ReplyError};
use std::collections::VecDeque;
use std::io::BufRead;
use std::path::Path;

/// Plays one side from a queue of scripted replies.
#[derive(Debug, Clone)]
pub struct ScriptedOpponent {
    side: Color,
    replies: VecDeque<String>,
}

impl ScriptedOpponent {
    /// Reads one reply per line.
    pub fn from_reader(side: Color, reader: impl BufRead) -> std::io::Result<Self> {
        let replies = reader
            .lines()
            .collect::<Result<VecDeque<_>, _>>()?;
        Ok(ScriptedOpponent { side, replies })
    }

    /// Reads the replies from a file.
    pub fn open(side: Color, path: &Path) -> std::io::Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(side, std::io::BufReader::new(file))
    }

    /// The side this opponent plays.
    pub fn side(&self) -> Color {
        self.side
    }

    /// Returns the next usable `(from, to)` pair, or `None` once the script
    /// is exhausted.
    pub fn next_move(&mut self) -> Option<(i64, i64)> {
        while let Some(reply) = self.replies.pop_front() {
            match parse_reply(&reply) {
                Ok(pair) => return Some(pair),
                Err(ReplyError::Retry) => {
                    tracing::debug!(side = %self.side, "opponent asked to retry");
                }
                Err(e) => {
                    tracing::warn!(side = %self.side, "skipping opponent reply: {}", e);
                }
            }
        }
        None
    }
}

/// Describes the opponent's pieces the way a remote player is briefed,
/// e.g. `Your pieces: Pawn at 48, Pawn at 49, ...`.
pub fn briefing(session: &GameSession, side: Color) -> String {
    let pieces: Vec<String> = session
        .roster(side)
        .into_iter()
        .map(|(square, piece)| format!("{} at {}", piece.kind, square))
        .collect();
    format!("You play {}. Your pieces: {}", side, pieces.join(", "))
}
