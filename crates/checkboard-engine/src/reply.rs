//! Parsing of remote opponent replies.
//!
//! A remote opponent answers with two square indices separated by a comma,
//! such as `"52, 36"`. It answers `false` when it wants to be asked again.

use thiserror::Error;

/// Why a reply could not be turned into a move.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReplyError {
    /// The opponent declined to answer and should be asked again.
    #[error("opponent asked to retry")]
    Retry,

    #[error("expected two square indices, got {0:?}")]
    Malformed(String),

    #[error("invalid square index: {0:?}")]
    InvalidNumber(String),
}

/// Parses a reply into a `(from, to)` pair of raw indices.
///
/// Commas and whitespace both separate the two numbers. Range checking is
/// left to [`crate::GameSession::submit_move`].
pub fn parse_reply(reply: &str) -> Result<(i64, i64), ReplyError> {
    let reply = reply.trim();
    if reply.eq_ignore_ascii_case("false") {
        return Err(ReplyError::Retry);
    }

    let parts: Vec<&str> = reply
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect();

    match parts.as_slice() {
        [from, to] => Ok((number(from)?, number(to)?)),
        _ => Err(ReplyError::Malformed(reply.to_string())),
    }
}

fn number(text: &str) -> Result<i64, ReplyError> {
    text.parse()
        .map_err(|_| ReplyError::InvalidNumber(text.to_string()))
}
