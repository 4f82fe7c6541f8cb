//! Error type shared by the rules engine, session and search.

use thiserror::Error;

use crate::moves::Move;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckersError {
    /// The submitted move is not in the current legal-move set.
    #[error("illegal move: {0}")]
    IllegalMove(Move),

    /// The search was asked to score a position with no legal moves.
    #[error("look for best move of none")]
    NoLegalMoves,

    /// A search request was made while another one is still running.
    #[error("a search is already in flight")]
    SearchInFlight,

    /// The search worker thread has stopped.
    #[error("search worker is gone")]
    WorkerGone,

    /// Malformed square, move path or board diagram.
    #[error("parse error: {0}")]
    Parse(String),
}

impl CheckersError {
    pub fn parse(message: impl Into<String>) -> Self {
        CheckersError::Parse(message.into())
    }
}
