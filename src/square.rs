//! Coordinate mapping between (row, column) and playable-square indices.
//!
//! Row 0 is North's home edge and row 7 is South's. A square is playable
//! when its row and column have the same parity, so (0, 0) is playable and
//! (0, 1) is not. Playable squares are numbered row by row, four per row.
//!
//! Squares print in algebraic form: files `a`..`h` are columns 0..7 and
//! ranks `8`..`1` are rows 0..7, so South sits on ranks 1-3.

use std::fmt;
use std::str::FromStr;

use crate::board::Player;
use crate::constants::{PLAYABLE_SQUARES, SQUARES_ON_SIDE, SQUARES_PER_ROW};
use crate::error::CheckersError;

/// One of the 32 playable squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Square from its linear index, if `index < 32`.
    pub fn new(index: usize) -> Option<Self> {
        (index < PLAYABLE_SQUARES).then(|| Square(index as u8))
    }

    /// Square at (row, column), or `None` when the pair is off the board or
    /// names a non-playable square.
    pub fn from_row_col(row: i32, col: i32) -> Option<Self> {
        if !is_playable(row, col) {
            return None;
        }
        let index = row as usize * SQUARES_PER_ROW + col as usize / 2;
        Some(Square(index as u8))
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn row(self) -> usize {
        self.index() / SQUARES_PER_ROW
    }

    #[inline]
    pub fn col(self) -> usize {
        (self.index() % SQUARES_PER_ROW) * 2 + self.row() % 2
    }

    /// Bit for this square in a board mask.
    #[inline]
    pub(crate) fn mask(self) -> u32 {
        1 << self.0
    }

    /// The square jumped over when moving from `self` to `other`.
    ///
    /// Returns `None` unless the two squares are exactly two rows and two
    /// columns apart.
    pub fn between(self, other: Square) -> Option<Square> {
        let (r1, c1) = (self.row() as i32, self.col() as i32);
        let (r2, c2) = (other.row() as i32, other.col() as i32);
        if (r1 - r2).abs() != 2 || (c1 - c2).abs() != 2 {
            return None;
        }
        Square::from_row_col((r1 + r2) / 2, (c1 + c2) / 2)
    }

    /// Diagonal neighbour in `direction`, or `None` at the edge.
    pub fn step(self, direction: Direction) -> Option<Square> {
        let (dr, dc) = direction.delta();
        Square::from_row_col(self.row() as i32 + dr, self.col() as i32 + dc)
    }

    /// All playable squares in index order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..PLAYABLE_SQUARES as u8).map(Square)
    }
}

/// Whether (row, column) is on the board and playable.
pub fn is_playable(row: i32, col: i32) -> bool {
    let side = SQUARES_ON_SIDE as i32;
    (0..side).contains(&row) && (0..side).contains(&col) && row % 2 == col % 2
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.col() as u8) as char;
        let rank = SQUARES_ON_SIDE - self.row();
        write!(f, "{file}{rank}")
    }
}

impl FromStr for Square {
    type Err = CheckersError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.trim().as_bytes();
        if bytes.len() != 2 {
            return Err(CheckersError::parse(format!("bad square '{s}'")));
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(CheckersError::parse(format!("bad square '{s}'")));
        }
        let col = (file - b'a') as i32;
        let row = SQUARES_ON_SIDE as i32 - (rank - b'0') as i32;
        Square::from_row_col(row, col)
            .ok_or_else(|| CheckersError::parse(format!("'{s}' is not a playable square")))
    }
}

/// Diagonal direction. "North" is towards row 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

const NORTHWARD: [Direction; 2] = [Direction::NorthWest, Direction::NorthEast];
const SOUTHWARD: [Direction; 2] = [Direction::SouthWest, Direction::SouthEast];

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::NorthWest,
        Direction::NorthEast,
        Direction::SouthWest,
        Direction::SouthEast,
    ];

    /// (row, column) offset of one step.
    #[inline]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::NorthWest => (-1, -1),
            Direction::NorthEast => (-1, 1),
            Direction::SouthWest => (1, -1),
            Direction::SouthEast => (1, 1),
        }
    }

    /// Directions a piece may move in: kings go anywhere, men only forward.
    pub fn for_piece(player: Player, king: bool) -> &'static [Direction] {
        if king {
            return &Direction::ALL;
        }
        match player {
            Player::South => &NORTHWARD,
            Player::North => &SOUTHWARD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_col_roundtrip() {
        for sq in Square::all() {
            let back = Square::from_row_col(sq.row() as i32, sq.col() as i32);
            assert_eq!(back, Some(sq));
        }
        assert_eq!(Square::all().count(), 32);
    }

    #[test]
    fn test_non_playable_and_off_board() {
        assert_eq!(Square::from_row_col(0, 1), None);
        assert_eq!(Square::from_row_col(-1, -1), None);
        assert_eq!(Square::from_row_col(8, 0), None);
        assert_eq!(Square::from_row_col(7, 8), None);
        assert!(Square::from_row_col(0, 0).is_some());
        assert!(Square::from_row_col(7, 7).is_some());
        assert_eq!(Square::new(32), None);
    }

    #[test]
    fn test_between() {
        let a = Square::from_row_col(5, 1).unwrap();
        let b = Square::from_row_col(3, 3).unwrap();
        assert_eq!(a.between(b), Square::from_row_col(4, 2));
        assert_eq!(b.between(a), Square::from_row_col(4, 2));

        // Adjacent squares have nothing in between.
        let c = Square::from_row_col(4, 2).unwrap();
        assert_eq!(a.between(c), None);
    }

    #[test]
    fn test_step_stops_at_edge() {
        let corner = Square::from_row_col(0, 0).unwrap();
        assert_eq!(corner.step(Direction::NorthWest), None);
        assert_eq!(corner.step(Direction::NorthEast), None);
        assert_eq!(corner.step(Direction::SouthWest), None);
        assert_eq!(corner.step(Direction::SouthEast), Square::from_row_col(1, 1));
    }

    #[test]
    fn test_display_and_parse() {
        let sq = Square::from_row_col(5, 1).unwrap();
        assert_eq!(sq.to_string(), "b3");
        assert_eq!("b3".parse::<Square>().unwrap(), sq);
        assert_eq!("B3".parse::<Square>().unwrap(), sq);
        for sq in Square::all() {
            assert_eq!(sq.to_string().parse::<Square>().unwrap(), sq);
        }
        assert!("a1".parse::<Square>().is_err(), "a1 is not playable");
        assert!("z9".parse::<Square>().is_err());
        assert!("".parse::<Square>().is_err());
    }

    #[test]
    fn test_directions_for_piece() {
        assert_eq!(
            Direction::for_piece(Player::South, false),
            &[Direction::NorthWest, Direction::NorthEast]
        );
        assert_eq!(
            Direction::for_piece(Player::North, false),
            &[Direction::SouthWest, Direction::SouthEast]
        );
        assert_eq!(Direction::for_piece(Player::North, true).len(), 4);
    }
}
