//! Fixed-depth negamax move selection.
//!
//! Every candidate move is searched full width down to the lookahead level
//! and scored by material alone. Scores are always from the point of view
//! of the side that made the move being scored; a parent negates its
//! child's best score. There is no pruning, so among equally scored root
//! moves the first one in the (shuffled) candidate order wins.

use std::fmt;
use std::io::Write;

use fastrand::Rng;

use crate::board::Player;
use crate::constants::{DEFAULT_LEVEL, MAX_LEVEL, MIN_LEVEL, WIN_SCORE};
use crate::error::CheckersError;
use crate::game::GameState;
use crate::moves::Move;
use crate::rules::find_moves;

/// Destination for the line-oriented search trace.
pub type TraceSink = Box<dyn Write + Send>;

/// Clamp a requested lookahead level into the supported range.
pub fn clamp_level(level: i32) -> u8 {
    level.clamp(MIN_LEVEL, MAX_LEVEL) as u8
}

/// The automated player.
pub struct AutoPlayer {
    level: u8,
    rng: Rng,
    trace: Option<TraceSink>,
}

impl Default for AutoPlayer {
    fn default() -> Self {
        Self::new(DEFAULT_LEVEL as i32)
    }
}

impl AutoPlayer {
    /// A player looking `level` plies past its own move (clamped to 0..=10).
    pub fn new(level: i32) -> Self {
        Self::with_rng(level, Rng::new())
    }

    pub fn with_seed(level: i32, seed: u64) -> Self {
        Self::with_rng(level, Rng::with_seed(seed))
    }

    pub fn with_rng(level: i32, rng: Rng) -> Self {
        Self {
            level: clamp_level(level),
            rng,
            trace: None,
        }
    }

    /// Write the per-candidate trace to `sink`.
    pub fn with_trace(mut self, sink: TraceSink) -> Self {
        self.trace = Some(sink);
        self
    }

    pub fn set_trace(&mut self, sink: Option<TraceSink>) {
        self.trace = sink;
    }

    pub fn set_level(&mut self, level: i32) {
        self.level = clamp_level(level);
    }

    #[inline]
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Pick a move for the side to move in `state`.
    ///
    /// Returns `Ok(None)` when there is nothing to play. Callers are
    /// expected not to ask once the game is over.
    pub fn choose_move(&mut self, state: &GameState) -> Result<Option<Move>, CheckersError> {
        let state = *state;
        let moves = find_moves(&state, &mut self.rng);
        if moves.is_empty() {
            return Ok(None);
        }
        self.trace(format_args!("Possible moves: {}", moves.len()));

        let mut best: Option<(Move, i32)> = None;
        for (i, mv) in moves.into_iter().enumerate() {
            let score = self.score_move(&state, &mv, 0)?;
            self.trace(format_args!("{}) {mv} = {score}", i + 1));
            log::debug!("candidate {mv} scores {score}");
            let better = match &best {
                Some((_, best_score)) => score > *best_score,
                None => true,
            };
            if better {
                best = Some((mv, score));
            }
        }

        Ok(best.map(|(mv, score)| {
            self.trace(format_args!("MOVING {mv}"));
            log::info!("level {} chose {mv} ({score})", self.level);
            mv
        }))
    }

    /// Score `mv` from the point of view of the side playing it.
    ///
    /// Evaluates statically once `depth` reaches the lookahead level or the
    /// move ends the game; otherwise recurses into the opponent's replies.
    pub fn score_move(
        &mut self,
        state: &GameState,
        mv: &Move,
        depth: u8,
    ) -> Result<i32, CheckersError> {
        let mover = state.active_player().ok_or(CheckersError::NoLegalMoves)?;
        let mut scratch = *state;
        scratch.apply_move(mv);

        if depth >= self.level || scratch.is_terminal() {
            return Ok(static_evaluation(&scratch, mover));
        }
        Ok(-self.find_best_score(&scratch, depth + 1)?)
    }

    /// Best score available to the side to move in `state`.
    ///
    /// The state must have at least one legal move; the terminal check
    /// belongs to the caller one level up.
    pub fn find_best_score(&mut self, state: &GameState, depth: u8) -> Result<i32, CheckersError> {
        let moves = find_moves(state, &mut self.rng);
        let mut best = None;
        for mv in &moves {
            let score = self.score_move(state, mv, depth)?;
            if best.is_none_or(|b| score > b) {
                best = Some(score);
            }
        }
        best.ok_or(CheckersError::NoLegalMoves)
    }

    fn trace(&mut self, line: fmt::Arguments<'_>) {
        let Some(sink) = self.trace.as_mut() else {
            return;
        };
        if let Err(err) = writeln!(sink, "{line}") {
            log::warn!("dropping search trace: {err}");
            self.trace = None;
        }
    }
}

/// Material score of `state` from `viewpoint`'s side.
///
/// A finished game in which `viewpoint` still has pieces is a win. A side
/// with no pieces scores as a loss for it. Otherwise men and kings count one
/// point each.
pub fn static_evaluation(state: &GameState, viewpoint: Player) -> i32 {
    let own = Some(viewpoint);
    let opp = Some(viewpoint.opponent());
    let own_pieces = state.piece_count(own) as i32;
    let opp_pieces = state.piece_count(opp) as i32;

    if state.is_terminal() && own_pieces > 0 {
        return WIN_SCORE;
    }
    if own_pieces == 0 {
        return -WIN_SCORE;
    }
    if opp_pieces == 0 {
        return WIN_SCORE;
    }
    own_pieces - opp_pieces
}
