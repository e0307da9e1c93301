//! Random legal play, used by the `lines-autoplay` binary and soak tests.
use rand::Rng;
use rand::seq::SliceRandom;

use lines_core::{Board, GameStatus, Position, TouchOutcome, find_route};

use crate::config::read_env;
use crate::error::Result;
use crate::session::Session;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AutoplayConfig {
    pub max_moves: usize,
}

impl AutoplayConfig {
    pub const DEFAULT_MAX_MOVES: usize = 10_000;

    /// Environment variables:
    /// - `LINES_AUTOPLAY_MAX_MOVES` - Move limit (default: 10000)
    pub fn from_env() -> Self {
        Self {
            max_moves: read_env("LINES_AUTOPLAY_MAX_MOVES").unwrap_or(Self::DEFAULT_MAX_MOVES),
        }
    }
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            max_moves: Self::DEFAULT_MAX_MOVES,
        }
    }
}

/// How an autoplay run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AutoplayReport {
    pub moves: usize,
    pub score: u32,
    pub game_over: bool,
}

/// Picks a random marble that can reach at least one empty cell, and a
/// random reachable cell for it.
pub fn pick_move(board: &Board, rng: &mut impl Rng) -> Option<(Position, Position)> {
    let grid = board.occupancy();
    let empty = board.empty_cells();
    let mut marbles: Vec<Position> = board.marbles().map(|marble| marble.position).collect();
    marbles.shuffle(rng);

    marbles.into_iter().find_map(|from| {
        let targets: Vec<Position> = empty
            .iter()
            .copied()
            .filter(|&to| find_route(&grid, from, to).is_some())
            .collect();
        targets.choose(rng).map(|&to| (from, to))
    })
}

/// Plays random legal moves by clicking cell centers until the game ends,
/// no move is left, or `config.max_moves` is reached.
pub fn run(session: &mut Session, config: AutoplayConfig, rng: &mut impl Rng) -> Result<AutoplayReport> {
    if session.status() == GameStatus::Stopped {
        session.start()?;
    }

    let mut moves = 0;
    while moves < config.max_moves && session.status() == GameStatus::Started {
        let Some((from, to)) = pick_move(session.board(), rng) else {
            tracing::warn!("No legal move left with {} marbles", session.board().len());
            break;
        };

        let (fx, fy) = session.geometry().cell_center(from);
        let (tx, ty) = session.geometry().cell_center(to);
        session.touch(fx, fy)?;
        if !matches!(session.touch(tx, ty)?, TouchOutcome::MoveStarted { .. }) {
            tracing::warn!("Move {} -> {} did not start", from, to);
            break;
        }
        session.run_until_idle()?;
        moves += 1;
    }

    let report = AutoplayReport {
        moves,
        score: session.score(),
        game_over: session.status() == GameStatus::Stopped,
    };
    tracing::info!(
        "Autoplay finished after {} moves with score {} (game over: {})",
        report.moves,
        report.score,
        report.game_over
    );
    Ok(report)
}
