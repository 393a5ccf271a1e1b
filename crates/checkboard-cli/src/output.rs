//! Reporting of game events, as plain text or one JSON object per line.

use checkboard_engine::{GameSession, MoveOutcome, PromotionError, PromotionOutcome, SquareSet};
use serde::Serialize;
use std::io::{self, Write};

/// One reportable event.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Report {
    /// `applied`, `promotion`, `rejected`, `not_your_turn`, `game_over`,
    /// `error`, or one of the informational `board`, `hints`, `pieces`, `notice`.
    pub event: &'static str,
    /// Human-readable notification.
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
    /// Legal destinations, for `hints`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<u8>>,
    /// Board layout, for `board`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    /// Side to move after the event.
    pub turn: String,
    /// Whether the side to move is in check.
    pub check: bool,
}

impl Report {
    fn new(event: &'static str, message: String, session: &GameSession) -> Self {
        let turn = session.current_turn();
        Report {
            event,
            message,
            from: None,
            to: None,
            captured: None,
            winner: None,
            targets: None,
            layout: None,
            turn: turn.to_string(),
            check: session.is_in_check(turn),
        }
    }

    /// Describes the outcome of a submitted move.
    pub fn from_outcome(outcome: &MoveOutcome, session: &GameSession) -> Self {
        let event = match outcome {
            MoveOutcome::Applied(_) if outcome.needs_promotion() => "promotion",
            MoveOutcome::Applied(_) => "applied",
            MoveOutcome::Rejected(_) => "rejected",
            MoveOutcome::NotPlayersTurn => "not_your_turn",
            MoveOutcome::GameOver { .. } => "game_over",
        };
        let mut report = Report::new(event, outcome.to_string(), session);
        if let Some(applied) = outcome.applied() {
            report.from = Some(applied.from.index());
            report.to = Some(applied.to.index());
            report.captured = applied.captured.map(|piece| piece.to_string());
        }
        if let MoveOutcome::GameOver { result, .. } = outcome {
            report.winner = result.winner.map(|color| color.to_string());
        }
        report
    }

    /// Describes the answer to a promotion choice.
    pub fn from_promotion(
        result: &Result<PromotionOutcome, PromotionError>,
        session: &GameSession,
    ) -> Self {
        match result {
            Ok(done) => {
                let message = format!("pawn on {} promoted to {}", done.square, done.piece);
                match done.result {
                    Some(end) => {
                        let mut report =
                            Report::new("game_over", format!("{}. Game over: {}", message, end), session);
                        report.winner = end.winner.map(|color| color.to_string());
                        report
                    }
                    None => Report::new("applied", message, session),
                }
            }
            Err(e) => Report::new("rejected", e.to_string(), session),
        }
    }

    /// Describes an input that could not be understood.
    pub fn error(message: impl ToString, session: &GameSession) -> Self {
        Report::new("error", message.to_string(), session)
    }

    /// Informational text that is not the answer to a move.
    pub fn notice(event: &'static str, message: String, session: &GameSession) -> Self {
        Report::new(event, message, session)
    }

    /// The board diagram, with the layout alongside for machine readers.
    pub fn board(session: &GameSession, unicode: bool) -> Self {
        let mut report = Report::new("board", session.board().diagram(unicode), session);
        report.layout = Some(session.board().to_layout());
        report
    }

    /// Legal destinations of the piece on `square`.
    pub fn hints(square: i64, targets: SquareSet, session: &GameSession) -> Self {
        let indices = targets.indices();
        let message = if indices.is_empty() {
            format!("no legal moves from {}", square)
        } else {
            let list: Vec<String> = indices.iter().map(u8::to_string).collect();
            format!("{} -> {}", square, list.join(", "))
        };
        let mut report = Report::new("hints", message, session);
        report.targets = Some(indices);
        report
    }
}

/// Writes reports and board views in the selected format.
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    pub json: bool,
    pub unicode: bool,
}

impl Printer {
    pub fn report(&self, out: &mut impl Write, report: &Report) -> io::Result<()> {
        if self.json {
            let line = serde_json::to_string(report)?;
            return writeln!(out, "{}", line);
        }

        write!(out, "{}", report.message)?;
        if !report.message.ends_with('\n') {
            writeln!(out)?;
        }
        match report.event {
            "applied" | "not_your_turn" | "rejected" if report.check => {
                writeln!(out, "{} is in check. {} to move.", report.turn, report.turn)
            }
            "applied" => writeln!(out, "{} to move.", report.turn),
            _ => Ok(()),
        }
    }

    pub fn board(&self, out: &mut impl Write, session: &GameSession) -> io::Result<()> {
        self.report(out, &Report::board(session, self.unicode))
    }
}
