//! UCI command handling over any reader/writer pair.

use std::io::{self, Write};

use chess_core::{Color, FenError, MoveParseError, Position, play_uci_moves};
use hybrid_engine::{EvaluationError, HybridEngine, MAX_DEPTH, MIN_DEPTH, ordering::order_moves};
use thiserror::Error;
use tracing::{info, warn};

const DEFAULT_DEPTH: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Error, Debug, PartialEq)]
pub enum PositionCommandError {
    #[error("expected 'startpos' or 'fen'")]
    MissingKind,
    #[error(transparent)]
    Fen(#[from] FenError),
    #[error(transparent)]
    Move(#[from] MoveParseError),
}

/// Parses the arguments of a `position` command.
pub fn parse_position(args: &[&str]) -> Result<Position, PositionCommandError> {
    let moves_at = args.iter().position(|&a| a == "moves").unwrap_or(args.len());
    let (setup, moves) = args.split_at(moves_at);
    let start = match setup.split_first() {
        Some((&"startpos", _)) => Position::startpos(),
        Some((&"fen", fields)) => Position::from_fen(&fields.join(" "))?,
        _ => return Err(PositionCommandError::MissingKind),
    };
    Ok(play_uci_moves(start, moves.iter().skip(1).copied())?)
}

/// `go` parameters this engine honours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GoParams {
    pub depth: Option<u8>,
    pub movetime_ms: Option<u64>,
}

pub fn parse_go(args: &[&str]) -> GoParams {
    let mut params = GoParams::default();
    let mut it = args.iter();
    while let Some(&key) = it.next() {
        match key {
            "depth" => params.depth = it.next().and_then(|v| v.parse().ok()),
            "movetime" => params.movetime_ms = it.next().and_then(|v| v.parse().ok()),
            _ => {}
        }
    }
    params
}

pub struct Session {
    engine: HybridEngine,
    pos: Position,
    depth: u8,
}

impl Session {
    pub fn new(engine: HybridEngine) -> Self {
        Self {
            engine,
            pos: Position::startpos(),
            depth: DEFAULT_DEPTH,
        }
    }

    pub fn position(&self) -> &Position {
        &self.pos
    }

    pub fn handle(&mut self, line: &str, out: &mut impl Write) -> io::Result<Flow> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = parts.split_first() else {
            return Ok(Flow::Continue);
        };

        match command {
            "uci" => {
                writeln!(out, "id name Hybrid 0.1")?;
                writeln!(out, "id author ML-chess")?;
                writeln!(
                    out,
                    "option name Depth type spin default {DEFAULT_DEPTH} min {MIN_DEPTH} max {MAX_DEPTH}"
                )?;
                writeln!(out, "uciok")?;
            }
            "isready" => writeln!(out, "readyok")?,
            "setoption" => self.set_option(args),
            "ucinewgame" => self.pos = Position::startpos(),
            "position" => match parse_position(args) {
                Ok(pos) => self.pos = pos,
                Err(e) => warn!(error = %e, "ignoring position command"),
            },
            "go" => self.go(parse_go(args), out)?,
            "quit" => return Ok(Flow::Quit),
            _ => {}
        }
        out.flush()?;
        Ok(Flow::Continue)
    }

    /// Only `setoption name Depth value N` is recognised.
    fn set_option(&mut self, args: &[&str]) {
        let name = args.iter().position(|&a| a == "name").and_then(|i| args.get(i + 1));
        let value = args.iter().position(|&a| a == "value").and_then(|i| args.get(i + 1));
        if let (Some(&"Depth"), Some(v)) = (name, value)
            && let Ok(d) = v.parse::<u8>()
        {
            self.depth = d.clamp(MIN_DEPTH, MAX_DEPTH);
            info!(depth = self.depth, "depth set");
        }
    }

    fn go(&mut self, params: GoParams, out: &mut impl Write) -> io::Result<()> {
        let depth = params.depth.unwrap_or(self.depth).clamp(MIN_DEPTH, MAX_DEPTH);
        let mut config = self.engine.config().clone();
        if let Some(ms) = params.movetime_ms {
            config.search.time_limit_ms = Some(ms);
        }

        match self.engine.evaluate_with(&self.pos, depth, &config.search) {
            Ok(result) => {
                // UCI scores are from the mover's side, in centipawns.
                let sign = match self.pos.side_to_move {
                    Color::White => 1.0,
                    Color::Black => -1.0,
                };
                let cp = (sign * result.evaluation * 100.0).round() as i64;
                let pv = result
                    .all_lines
                    .first()
                    .map(|line| {
                        std::iter::once(line.mv)
                            .chain(line.continuation.iter().copied())
                            .map(|m| m.to_string())
                            .collect::<Vec<_>>()
                            .join(" ")
                    })
                    .unwrap_or_default();
                writeln!(
                    out,
                    "info depth {depth} score cp {cp} nodes {} pv {pv}",
                    result.nodes
                )?;
                writeln!(out, "bestmove {}", result.best_move)?;
            }
            Err(EvaluationError::SearchAborted { nodes }) => {
                // Out of time: play the move the heuristic likes best.
                let fallback = order_moves(&self.pos, chess_core::legal_moves(&self.pos))
                    .into_iter()
                    .next()
                    .map(|(mv, _)| mv.to_string())
                    .unwrap_or_else(|| "0000".to_string());
                warn!(nodes, "search aborted, playing heuristic move");
                writeln!(out, "bestmove {fallback}")?;
            }
            Err(e) => {
                warn!(error = %e, "no move to play");
                writeln!(out, "bestmove 0000")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
