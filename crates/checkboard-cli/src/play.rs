//! The console game loop.

use crate::command::Command;
use crate::opponent::{briefing, ScriptedOpponent};
use crate::output::{Printer, Report};
use checkboard_core::PieceKind;
use checkboard_engine::{GameSession, MoveOutcome};
use std::io::{BufRead, Write};

/// Drives one game from console input, letting a scripted opponent move
/// whenever it is its turn.
pub struct Driver<W: Write> {
    session: GameSession,
    opponent: Option<ScriptedOpponent>,
    printer: Printer,
    hints: bool,
    out: W,
}

impl<W: Write> Driver<W> {
    pub fn new(
        session: GameSession,
        opponent: Option<ScriptedOpponent>,
        printer: Printer,
        hints: bool,
        out: W,
    ) -> Self {
        Driver {
            session,
            opponent,
            printer,
            hints,
            out,
        }
    }

    #[cfg(test)]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Reads commands until `quit`, end of input, or the end of the game.
    pub fn run(&mut self, input: impl BufRead) -> anyhow::Result<()> {
        if !self.printer.json {
            self.printer.board(&mut self.out, &self.session)?;
            writeln!(self.out, "{} to move.", self.session.current_turn())?;
        }
        self.opponent_turns()?;

        for line in input.lines() {
            if self.session.is_game_over() {
                break;
            }
            let line = line?;
            let command = match Command::parse(&line) {
                Ok(command) => command,
                Err(e) => {
                    let report = Report::error(e, &self.session);
                    self.printer.report(&mut self.out, &report)?;
                    continue;
                }
            };

            match command {
                Command::Quit => break,
                Command::Empty => continue,
                Command::Move { from, to } => self.play(from, to)?,
                Command::Promote(kind) => self.promote(kind)?,
                Command::Board => self.printer.board(&mut self.out, &self.session)?,
                Command::Hints(square) => self.hints(square)?,
                Command::Pieces => {
                    let text = briefing(&self.session, self.session.current_turn());
                    let report = Report::notice("pieces", text, &self.session);
                    self.printer.report(&mut self.out, &report)?;
                }
            }
            self.opponent_turns()?;
        }

        if let Some(result) = self.session.result() {
            tracing::info!(%result, "game finished");
        }
        self.out.flush()?;
        Ok(())
    }

    fn play(&mut self, from: i64, to: i64) -> anyhow::Result<()> {
        let outcome = self.session.submit_move(from, to);
        self.printer
            .report(&mut self.out, &Report::from_outcome(&outcome, &self.session))?;

        if self.hints && matches!(outcome, MoveOutcome::Rejected(_)) {
            self.hints(from)?;
        }
        Ok(())
    }

    fn promote(&mut self, kind: PieceKind) -> anyhow::Result<()> {
        let result = self.session.promote(kind);
        self.printer
            .report(&mut self.out, &Report::from_promotion(&result, &self.session))?;
        Ok(())
    }

    fn hints(&mut self, square: i64) -> anyhow::Result<()> {
        let targets = self.session.legal_targets(square);
        let report = Report::hints(square, targets, &self.session);
        self.printer.report(&mut self.out, &report)?;
        Ok(())
    }

    /// Lets the scripted opponent move for as long as it is to move.
    ///
    /// The opponent always promotes to a queen. Once its script runs out it
    /// is dropped and the console plays both sides.
    fn opponent_turns(&mut self) -> anyhow::Result<()> {
        while let Some(opponent) = self.opponent.as_mut() {
            if self.session.is_game_over() || opponent.side() != self.session.current_turn() {
                break;
            }

            let (from, to) = match opponent.next_move() {
                Some(pair) => pair,
                None => {
                    tracing::warn!(side = %opponent.side(), "opponent script exhausted");
                    let text = format!("{} has no more replies; enter its moves.", opponent.side());
                    self.opponent = None;
                    let report = Report::notice("notice", text, &self.session);
                    self.printer.report(&mut self.out, &report)?;
                    break;
                }
            };

            tracing::debug!(from, to, "opponent move");
            let outcome = self.session.submit_move(from, to);
            self.printer
                .report(&mut self.out, &Report::from_outcome(&outcome, &self.session))?;
            if outcome.needs_promotion() {
                self.promote(PieceKind::Queen)?;
            }
        }
        Ok(())
    }
}
