//! Bit-packed board state.
//!
//! Each of the 32 playable squares owns one bit in three masks: occupied,
//! owned by South, and king. A king bit is only ever set on an occupied
//! square; the South bit means nothing on an empty one.

use std::fmt;
use std::str::FromStr;

use crate::constants::{
    EMPTY, NORTH_CROWN_ROW, NORTH_KING, NORTH_MAN, NORTH_START_MASK, OFF, SOUTH_CROWN_ROW,
    SOUTH_KING, SOUTH_MAN, SOUTH_START_MASK, SQUARES_ON_SIDE,
};
use crate::error::CheckersError;
use crate::moves::Move;
use crate::square::Square;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    /// Starts on rows 5-7 and moves towards row 0. Moves first.
    South,
    /// Starts on rows 0-2 and moves towards row 7.
    North,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::South => Player::North,
            Player::North => Player::South,
        }
    }

    /// Row on which this player's men are crowned.
    pub fn crown_row(self) -> usize {
        match self {
            Player::South => SOUTH_CROWN_ROW,
            Player::North => NORTH_CROWN_ROW,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::South => f.write_str("South"),
            Player::North => f.write_str("North"),
        }
    }
}

impl FromStr for Player {
    type Err = CheckersError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "south" | "s" => Ok(Player::South),
            "north" | "n" => Ok(Player::North),
            _ => Err(CheckersError::parse(format!("unknown player '{s}'"))),
        }
    }
}

/// Immutable snapshot of the pieces on the board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BoardState {
    occupied: u32,
    south: u32,
    kings: u32,
}

impl BoardState {
    /// A board with no pieces.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Standard starting position: twelve men a side, no kings.
    pub fn new_game() -> Self {
        Self {
            occupied: NORTH_START_MASK | SOUTH_START_MASK,
            south: SOUTH_START_MASK,
            kings: 0,
        }
    }

    pub fn player_at(&self, sq: Square) -> Option<Player> {
        let mask = sq.mask();
        if self.occupied & mask == 0 {
            None
        } else if self.south & mask != 0 {
            Some(Player::South)
        } else {
            Some(Player::North)
        }
    }

    #[inline]
    pub fn is_king(&self, sq: Square) -> bool {
        self.kings & sq.mask() != 0
    }

    #[inline]
    pub fn is_empty_at(&self, sq: Square) -> bool {
        self.occupied & sq.mask() == 0
    }

    /// Crown the piece on `sq`. An empty square is left alone.
    pub fn with_king(self, sq: Square) -> Self {
        let mask = sq.mask() & self.occupied;
        Self {
            kings: self.kings | mask,
            ..self
        }
    }

    /// Put a piece on `sq`, replacing whatever was there.
    pub fn with_piece(self, sq: Square, player: Player, king: bool) -> Self {
        let mask = sq.mask();
        let cleared = self.without_piece(sq);
        Self {
            occupied: cleared.occupied | mask,
            south: if player == Player::South {
                cleared.south | mask
            } else {
                cleared.south
            },
            kings: if king { cleared.kings | mask } else { cleared.kings },
        }
    }

    pub fn without_piece(self, sq: Square) -> Self {
        let keep = !sq.mask();
        Self {
            occupied: self.occupied & keep,
            south: self.south & keep,
            kings: self.kings & keep,
        }
    }

    /// Occupied squares belonging to `player`.
    #[inline]
    fn owned(&self, player: Player) -> u32 {
        match player {
            Player::South => self.occupied & self.south,
            Player::North => self.occupied & !self.south,
        }
    }

    /// Number of `player`'s pieces; with `kings_only` set, only kings count.
    pub fn piece_count(&self, player: Player, kings_only: bool) -> u32 {
        let mut bits = self.owned(player);
        if kings_only {
            bits &= self.kings;
        }
        bits.count_ones()
    }

    pub fn has_piece(&self, player: Player) -> bool {
        self.owned(player) != 0
    }

    /// Squares holding one of `player`'s pieces, in index order.
    pub fn squares_of(&self, player: Player) -> impl Iterator<Item = Square> + use<> {
        let bits = self.owned(player);
        Square::all().filter(move |sq| bits & sq.mask() != 0)
    }

    /// Play `mv` and return the resulting board.
    ///
    /// Captured pieces are removed leg by leg and the mover keeps its
    /// original flags. This never crowns: the rules engine relies on that
    /// to keep a man a man for the remainder of a capture chain.
    pub fn apply_move(&self, mv: &Move) -> BoardState {
        let origin = mv.origin();
        let south_moving = self.south & origin.mask() != 0;
        let king_moving = self.kings & origin.mask() != 0;

        let mut board = self.without_piece(origin);
        if mv.is_capture() {
            for (from, to) in mv.legs() {
                if let Some(hopped) = from.between(to) {
                    board = board.without_piece(hopped);
                }
            }
        }

        let target = mv.destination().mask();
        board.occupied |= target;
        if south_moving {
            board.south |= target;
        }
        if king_moving {
            board.kings |= target;
        }
        board
    }

    fn symbol_at(&self, row: usize, col: usize) -> char {
        let Some(sq) = Square::from_row_col(row as i32, col as i32) else {
            return OFF;
        };
        match (self.player_at(sq), self.is_king(sq)) {
            (None, _) => EMPTY,
            (Some(Player::South), false) => SOUTH_MAN,
            (Some(Player::South), true) => SOUTH_KING,
            (Some(Player::North), false) => NORTH_MAN,
            (Some(Player::North), true) => NORTH_KING,
        }
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..SQUARES_ON_SIDE {
            for col in 0..SQUARES_ON_SIDE {
                if col > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", self.symbol_at(row, col))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for BoardState {
    type Err = CheckersError;

    /// Parse the diagram produced by `Display`: eight rows of eight
    /// whitespace-separated cells, row 0 first. Blank lines are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        if rows.len() != SQUARES_ON_SIDE {
            return Err(CheckersError::parse(format!(
                "expected {SQUARES_ON_SIDE} rows, got {}",
                rows.len()
            )));
        }

        let mut board = BoardState::empty();
        for (row, line) in rows.iter().enumerate() {
            let cells: Vec<&str> = line.split_whitespace().collect();
            if cells.len() != SQUARES_ON_SIDE {
                return Err(CheckersError::parse(format!(
                    "row {row}: expected {SQUARES_ON_SIDE} cells, got {}",
                    cells.len()
                )));
            }
            for (col, cell) in cells.iter().enumerate() {
                let mut chars = cell.chars();
                let (Some(c), None) = (chars.next(), chars.next()) else {
                    return Err(CheckersError::parse(format!("bad cell '{cell}'")));
                };
                let piece = match c {
                    SOUTH_MAN => Some((Player::South, false)),
                    SOUTH_KING => Some((Player::South, true)),
                    NORTH_MAN => Some((Player::North, false)),
                    NORTH_KING => Some((Player::North, true)),
                    EMPTY | OFF => None,
                    other => {
                        return Err(CheckersError::parse(format!("unknown symbol '{other}'")));
                    }
                };
                let Some((player, king)) = piece else {
                    continue;
                };
                let sq = Square::from_row_col(row as i32, col as i32).ok_or_else(|| {
                    CheckersError::parse(format!("piece on non-playable square ({row}, {col})"))
                })?;
                board = board.with_piece(sq, player, king);
            }
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: i32, col: i32) -> Square {
        Square::from_row_col(row, col).unwrap()
    }

    #[test]
    fn test_new_game_layout() {
        let board = BoardState::new_game();
        assert_eq!(board.piece_count(Player::South, false), 12);
        assert_eq!(board.piece_count(Player::North, false), 12);
        assert_eq!(board.piece_count(Player::South, true), 0);
        assert_eq!(board.piece_count(Player::North, true), 0);

        for s in Square::all() {
            let expected = match s.row() {
                0..=2 => Some(Player::North),
                5..=7 => Some(Player::South),
                _ => None,
            };
            assert_eq!(board.player_at(s), expected, "square {s}");
        }
    }

    #[test]
    fn test_with_king_keeps_invariant() {
        let board = BoardState::empty().with_king(sq(3, 3));
        assert!(!board.is_king(sq(3, 3)), "empty square must not become a king");

        let board = BoardState::empty()
            .with_piece(sq(3, 3), Player::North, false)
            .with_king(sq(3, 3));
        assert!(board.is_king(sq(3, 3)));
        assert_eq!(board.player_at(sq(3, 3)), Some(Player::North));
        assert_eq!(board.piece_count(Player::North, true), 1);
    }

    #[test]
    fn test_apply_slide() {
        let board = BoardState::new_game();
        let mv = Move::slide(sq(5, 1), sq(4, 0));
        let after = board.apply_move(&mv);
        assert_eq!(after.player_at(sq(5, 1)), None);
        assert_eq!(after.player_at(sq(4, 0)), Some(Player::South));
        assert_eq!(after.piece_count(Player::South, false), 12);
        // The original snapshot is untouched.
        assert_eq!(board.player_at(sq(5, 1)), Some(Player::South));
    }

    #[test]
    fn test_apply_double_hop_removes_both() {
        let board = BoardState::empty()
            .with_piece(sq(6, 0), Player::South, false)
            .with_piece(sq(5, 1), Player::North, false)
            .with_piece(sq(3, 3), Player::North, true);
        let mv = Move::hop(sq(6, 0), sq(4, 2)).extend(sq(2, 4));
        let after = board.apply_move(&mv);
        assert_eq!(after.player_at(sq(6, 0)), None);
        assert_eq!(after.player_at(sq(5, 1)), None);
        assert_eq!(after.player_at(sq(3, 3)), None);
        assert!(!after.is_king(sq(3, 3)));
        assert_eq!(after.player_at(sq(2, 4)), Some(Player::South));
        assert!(!after.has_piece(Player::North));
    }

    #[test]
    fn test_apply_move_never_crowns() {
        let board = BoardState::empty().with_piece(sq(1, 1), Player::South, false);
        let after = board.apply_move(&Move::slide(sq(1, 1), sq(0, 0)));
        assert_eq!(after.player_at(sq(0, 0)), Some(Player::South));
        assert!(!after.is_king(sq(0, 0)));
    }

    #[test]
    fn test_king_flag_travels() {
        let board = BoardState::empty().with_piece(sq(4, 4), Player::North, true);
        let after = board.apply_move(&Move::slide(sq(4, 4), sq(3, 3)));
        assert!(after.is_king(sq(3, 3)));
        assert!(!after.is_king(sq(4, 4)));
    }

    #[test]
    fn test_diagram_roundtrip() {
        let board = BoardState::new_game();
        let text = board.to_string();
        assert!(text.starts_with("n - n - n - n -"));
        assert_eq!(text.parse::<BoardState>().unwrap(), board);
    }

    #[test]
    fn test_diagram_rejects_bad_input() {
        assert!("n - n".parse::<BoardState>().is_err());
        let piece_off = "\
            - n - . - . - .
            . - . - . - . -
            - . - . - . - .
            . - . - . - . -
            - . - . - . - .
            . - . - . - . -
            - . - . - . - .
            . - . - . - . -";
        assert!(piece_off.parse::<BoardState>().is_err());
        let bad_symbol = "\
            x - . - . - . -
            - . - . - . - .
            . - . - . - . -
            - . - . - . - .
            . - . - . - . -
            - . - . - . - .
            . - . - . - . -
            - . - . - . - .";
        assert!(bad_symbol.parse::<BoardState>().is_err());
    }

    #[test]
    fn test_player_parse_and_opponent() {
        assert_eq!("north".parse::<Player>().unwrap(), Player::North);
        assert_eq!("S".parse::<Player>().unwrap(), Player::South);
        assert!("east".parse::<Player>().is_err());
        assert_eq!(Player::South.opponent(), Player::North);
        assert_eq!(Player::North.crown_row(), 7);
    }
}
