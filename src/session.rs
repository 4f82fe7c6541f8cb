//! The session keeps the game in progress.
//!
//! It owns the current [`GameState`] and the legal moves computed for it,
//! accepts only moves from that set, and tells its subscribers whenever the
//! state changes. It is single-writer: `execute_move`, `restart` and `clear`
//! must not be called concurrently, and there is no locking inside.

use fastrand::Rng;

use crate::board::Player;
use crate::error::CheckersError;
use crate::game::GameState;
use crate::moves::Move;
use crate::rules::find_moves;
use crate::square::Square;

/// Callback run synchronously after every state change.
pub type Subscriber = Box<dyn FnMut(&GameState) + Send>;

/// Handle returned by [`Session::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// A test on a move, used to filter the legal moves.
pub trait MovePredicate {
    fn test(&self, mv: &Move) -> bool;
}

impl<F: Fn(&Move) -> bool> MovePredicate for F {
    fn test(&self, mv: &Move) -> bool {
        self(mv)
    }
}

/// Matches moves starting on the given square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OriginatesAt(pub Square);

impl MovePredicate for OriginatesAt {
    fn test(&self, mv: &Move) -> bool {
        mv.origin() == self.0
    }
}

/// Matches capture chains that continue the given partial chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extends(pub Move);

impl MovePredicate for Extends {
    fn test(&self, mv: &Move) -> bool {
        mv.is_extension_of(&self.0)
    }
}

pub struct Session {
    state: GameState,
    /// Legal moves for `state`, recomputed after every change.
    moves: Vec<Move>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: u64,
    rng: Rng,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A session at the starting position, South to move.
    pub fn new() -> Self {
        Self::with_rng(Rng::new())
    }

    /// Like [`Session::new`] but with reproducible move ordering.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(Rng::with_seed(seed))
    }

    pub fn with_rng(rng: Rng) -> Self {
        Self::from_state(GameState::new(), rng)
    }

    /// A session continuing from an arbitrary position.
    pub fn from_state(state: GameState, rng: Rng) -> Self {
        let mut session = Self {
            state,
            moves: Vec::new(),
            subscribers: Vec::new(),
            next_id: 0,
            rng,
        };
        session.refresh_moves();
        session
    }

    pub fn subscribe(
        &mut self,
        subscriber: impl FnMut(&GameState) + Send + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Remove a subscriber. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Start a new game: standard setup, South to move.
    pub fn restart(&mut self) {
        self.state = GameState::new();
        self.refresh_moves();
        log::info!("new game, {} opening moves", self.moves.len());
        self.notify();
    }

    /// Empty the board and end the game.
    pub fn clear(&mut self) {
        self.state = GameState::cleared();
        self.refresh_moves();
        log::info!("board cleared");
        self.notify();
    }

    #[inline]
    pub fn active_player(&self) -> Option<Player> {
        self.state.active_player()
    }

    pub fn player_at(&self, row: i32, col: i32) -> Option<Player> {
        self.state.player_at(row, col)
    }

    pub fn is_king_at(&self, row: i32, col: i32) -> bool {
        self.state.is_king_at(row, col)
    }

    /// A private copy of the current state, e.g. for a search.
    pub fn game_state(&self) -> GameState {
        self.state
    }

    pub fn legal_moves(&self) -> &[Move] {
        &self.moves
    }

    /// Legal moves accepted by `predicate`. Each call starts a fresh pass.
    pub fn iter_moves<'a, P>(&'a self, predicate: P) -> impl Iterator<Item = &'a Move> + 'a
    where
        P: MovePredicate + 'a,
    {
        self.moves.iter().filter(move |mv| predicate.test(mv))
    }

    /// The legal move whose path is exactly `vertices`, if any.
    pub fn find_move(&self, vertices: &[Square]) -> Option<&Move> {
        self.moves.iter().find(|mv| mv.vertices() == vertices)
    }

    /// Play `mv` if it is one of the current legal moves.
    ///
    /// On success the legal moves are recomputed and every subscriber is
    /// notified before returning. An illegal move leaves the session as it
    /// was.
    pub fn execute_move(&mut self, mv: &Move) -> Result<(), CheckersError> {
        if !self.moves.contains(mv) {
            log::warn!("rejected {mv}");
            return Err(CheckersError::IllegalMove(mv.clone()));
        }

        let mover = self.state.active_player();
        self.state.apply_move(mv);
        self.refresh_moves();
        match (mover, self.state.active_player()) {
            (Some(p), Some(_)) => log::info!("{p} played {mv}"),
            (Some(p), None) => log::info!("{p} played {mv}, game over"),
            (None, _) => log::info!("played {mv}, game over"),
        }
        self.notify();
        Ok(())
    }

    fn refresh_moves(&mut self) {
        self.moves = find_moves(&self.state, &mut self.rng);
        log::debug!("{} legal moves", self.moves.len());
    }

    fn notify(&mut self) {
        let state = self.state;
        for (_, subscriber) in &mut self.subscribers {
            subscriber(&state);
        }
    }
}
