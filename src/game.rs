//! Game state: the board plus whose turn it is.
//!
//! Applying a move takes care of crowning and of detecting the end of the
//! game. The active player is `None` once the game is over.

use std::fmt;

use crate::board::{BoardState, Player};
use crate::constants::SQUARES_ON_SIDE;
use crate::moves::Move;
use crate::rules::can_play;
use crate::square::Square;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct GameState {
    board: BoardState,
    active: Option<Player>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Standard starting position with South to move.
    pub fn new() -> Self {
        Self {
            board: BoardState::new_game(),
            active: Some(Player::South),
        }
    }

    /// An empty board with nobody to move.
    pub fn cleared() -> Self {
        Self {
            board: BoardState::empty(),
            active: None,
        }
    }

    /// Arbitrary position, e.g. parsed from a diagram.
    pub fn from_parts(board: BoardState, active: Option<Player>) -> Self {
        Self { board, active }
    }

    #[inline]
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    #[inline]
    pub fn active_player(&self) -> Option<Player> {
        self.active
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.active.is_none()
    }

    /// Owner of the piece at (row, column). Off-board and non-playable
    /// coordinates hold no piece.
    pub fn player_at(&self, row: i32, col: i32) -> Option<Player> {
        Square::from_row_col(row, col).and_then(|sq| self.board.player_at(sq))
    }

    pub fn is_king_at(&self, row: i32, col: i32) -> bool {
        Square::from_row_col(row, col).is_some_and(|sq| self.board.is_king(sq))
    }

    /// All pieces of `player`, men and kings. Zero for `None`.
    pub fn piece_count(&self, player: Option<Player>) -> u32 {
        player.map_or(0, |p| self.board.piece_count(p, false))
    }

    /// Kings of `player`. Zero for `None`.
    pub fn king_count(&self, player: Option<Player>) -> u32 {
        player.map_or(0, |p| self.board.piece_count(p, true))
    }

    /// The side that has won, once the game is over.
    ///
    /// A side without pieces has lost. Otherwise the game ended because the
    /// side that would move next had nothing to play, so the winner is the
    /// one that made the last move, which is the only one that still can.
    pub fn winner(&self) -> Option<Player> {
        if self.active.is_some() {
            return None;
        }
        match (
            self.board.has_piece(Player::South),
            self.board.has_piece(Player::North),
        ) {
            (true, false) => Some(Player::South),
            (false, true) => Some(Player::North),
            (false, false) => None,
            (true, true) => [Player::South, Player::North]
                .into_iter()
                .find(|&p| can_play(&self.board, p)),
        }
    }

    /// Play `mv`, crown the mover if it reached its far row, and hand the
    /// turn over (or end the game).
    ///
    /// The move is not validated here; that is the session's job.
    pub fn apply_move(&mut self, mv: &Move) {
        let mover = self.active.or_else(|| self.board.player_at(mv.origin()));
        self.board = self.board.apply_move(mv);

        let target = mv.destination();
        if let Some(mover) = mover {
            if target.row() == mover.crown_row() {
                self.board = self.board.with_king(target);
            }
        }

        self.active = match mover {
            Some(mover)
                if self.board.has_piece(Player::South)
                    && self.board.has_piece(Player::North)
                    && can_play(&self.board, mover.opponent()) =>
            {
                Some(mover.opponent())
            }
            _ => None,
        };
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.board.to_string().lines().enumerate() {
            writeln!(f, "{} {line}", SQUARES_ON_SIDE - i)?;
        }
        write!(f, " ")?;
        for col in 0..SQUARES_ON_SIDE {
            write!(f, " {}", (b'a' + col as u8) as char)?;
        }
        writeln!(f)?;
        match (self.active, self.winner()) {
            (Some(p), _) => writeln!(f, "{p} to move"),
            (None, Some(w)) => writeln!(f, "game over, {w} wins"),
            (None, None) => writeln!(f, "game over"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    #[test]
    fn test_new_game() {
        let state = GameState::new();
        assert_eq!(state.active_player(), Some(Player::South));
        assert_eq!(state.piece_count(Some(Player::South)), 12);
        assert_eq!(state.piece_count(Some(Player::North)), 12);
        assert_eq!(state.king_count(Some(Player::South)), 0);
        assert_eq!(state.piece_count(None), 0);
        assert_eq!(state.king_count(None), 0);
        assert_eq!(state.winner(), None);
    }

    #[test]
    fn test_queries_are_total() {
        let state = GameState::new();
        assert_eq!(state.player_at(-1, 0), None);
        assert_eq!(state.player_at(0, 1), None);
        assert_eq!(state.player_at(100, 100), None);
        assert!(!state.is_king_at(9, 9));
        assert_eq!(state.player_at(0, 0), Some(Player::North));
        assert_eq!(state.player_at(7, 1), Some(Player::South));
    }

    #[test]
    fn test_turn_toggles() {
        let mut state = GameState::new();
        state.apply_move(&Move::slide(sq("b3"), sq("a4")));
        assert_eq!(state.active_player(), Some(Player::North));
        state.apply_move(&Move::slide(sq("c6"), sq("b5")));
        assert_eq!(state.active_player(), Some(Player::South));
    }

    #[test]
    fn test_crowning_on_far_row() {
        let board = BoardState::empty()
            .with_piece(sq("b7"), Player::South, false)
            .with_piece(sq("g2"), Player::North, false);
        let mut state = GameState::from_parts(board, Some(Player::South));
        state.apply_move(&Move::slide(sq("b7"), sq("a8")));
        assert!(state.board().is_king(sq("a8")));
        assert_eq!(state.active_player(), Some(Player::North));
    }

    #[test]
    fn test_north_crowns_on_row_seven() {
        let board = BoardState::empty()
            .with_piece(sq("c2"), Player::North, false)
            .with_piece(sq("g8"), Player::South, false)
            .with_piece(sq("h7"), Player::North, false);
        let mut state = GameState::from_parts(board, Some(Player::North));
        state.apply_move(&Move::slide(sq("c2"), sq("d1")));
        assert!(state.board().is_king(sq("d1")));
        // South's only man is on its crown row facing the edge, blocked.
        assert_eq!(state.active_player(), None);
        assert_eq!(state.winner(), Some(Player::North));
    }

    #[test]
    fn test_last_capture_ends_game() {
        let board = BoardState::empty()
            .with_piece(sq("b3"), Player::South, false)
            .with_piece(sq("c4"), Player::North, false);
        let mut state = GameState::from_parts(board, Some(Player::South));
        state.apply_move(&Move::hop(sq("b3"), sq("d5")));
        assert_eq!(state.piece_count(Some(Player::North)), 0);
        assert!(state.is_terminal());
        assert_eq!(state.winner(), Some(Player::South));
    }

    #[test]
    fn test_display_mentions_side_to_move() {
        let text = GameState::new().to_string();
        assert!(text.contains("South to move"));
        assert!(text.lines().next().unwrap().starts_with("8 n - n"));
    }
}
