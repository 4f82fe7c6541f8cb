//! Moves: single-step slides and capture chains.
//!
//! A move is an immutable path of squares. A slide has exactly two
//! vertices; a capture chain has its origin followed by one landing square
//! per leg, each leg jumping the opposing piece on the midpoint.

use std::fmt;

use crate::error::CheckersError;
use crate::square::Square;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    /// Origin followed by every landing square.
    path: Vec<Square>,
    capture: bool,
}

impl Move {
    /// A non-capturing one-step move.
    pub fn slide(from: Square, to: Square) -> Self {
        Self {
            path: vec![from, to],
            capture: false,
        }
    }

    /// A single-leg capture.
    pub fn hop(from: Square, to: Square) -> Self {
        Self {
            path: vec![from, to],
            capture: true,
        }
    }

    /// A new capture chain with one more leg landing on `next`.
    pub fn extend(&self, next: Square) -> Self {
        debug_assert!(self.capture, "only capture chains can be extended");
        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend_from_slice(&self.path);
        path.push(next);
        Self {
            path,
            capture: true,
        }
    }

    #[inline]
    pub fn origin(&self) -> Square {
        self.path[0]
    }

    #[inline]
    pub fn destination(&self) -> Square {
        self.path[self.path.len() - 1]
    }

    /// Number of legs.
    #[inline]
    pub fn len(&self) -> usize {
        self.path.len() - 1
    }

    /// Always false: every move has at least one leg.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Vertex `index`, where 0 is the origin and `len()` the destination.
    pub fn vertex(&self, index: usize) -> Option<Square> {
        self.path.get(index).copied()
    }

    pub fn vertices(&self) -> &[Square] {
        &self.path
    }

    /// Consecutive (from, to) pairs, one per leg.
    pub fn legs(&self) -> impl Iterator<Item = (Square, Square)> + '_ {
        self.path.windows(2).map(|w| (w[0], w[1]))
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.capture
    }

    /// True if this is a capture chain that starts with the whole path of
    /// `other` and goes further.
    pub fn is_extension_of(&self, other: &Move) -> bool {
        self.capture && self.path.len() > other.path.len() && self.path.starts_with(&other.path)
    }

    /// Parse a path such as `b3-c4` or `b3xd5xf3` into its squares.
    ///
    /// A leading `move` or `hop` word is accepted, so `Display` output
    /// parses back. The result carries no legality information; callers
    /// look it up among the legal moves.
    pub fn parse_path(s: &str) -> Result<Vec<Square>, CheckersError> {
        let s = s.trim();
        let s = s
            .strip_prefix("move ")
            .or_else(|| s.strip_prefix("hop "))
            .unwrap_or(s);
        let squares = s
            .split(['-', 'x', 'X', ':'])
            .map(str::parse::<Square>)
            .collect::<Result<Vec<_>, _>>()?;
        if squares.len() < 2 {
            return Err(CheckersError::parse(format!("path '{s}' needs two squares")));
        }
        Ok(squares)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (word, sep) = if self.capture { ("hop", "x") } else { ("move", "-") };
        write!(f, "{word} {}", self.origin())?;
        for sq in &self.path[1..] {
            write!(f, "{sep}{sq}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    #[test]
    fn test_slide_basics() {
        let mv = Move::slide(sq("b3"), sq("c4"));
        assert_eq!(mv.len(), 1);
        assert!(!mv.is_capture());
        assert_eq!(mv.origin(), sq("b3"));
        assert_eq!(mv.destination(), sq("c4"));
        assert_eq!(mv.vertex(2), None);
        assert_eq!(mv.to_string(), "move b3-c4");
    }

    #[test]
    fn test_extend_is_immutable() {
        let first = Move::hop(sq("b3"), sq("d5"));
        let chain = first.extend(sq("f3"));
        assert_eq!(first.len(), 1);
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.vertices(), &[sq("b3"), sq("d5"), sq("f3")]);
        assert_eq!(
            chain.legs().collect::<Vec<_>>(),
            vec![(sq("b3"), sq("d5")), (sq("d5"), sq("f3"))]
        );
        assert_eq!(chain.to_string(), "hop b3xd5xf3");
    }

    #[test]
    fn test_equality_is_by_path() {
        let a = Move::hop(sq("b3"), sq("d5")).extend(sq("f3"));
        let b = Move::hop(sq("b3"), sq("d5")).extend(sq("f3"));
        let c = Move::hop(sq("b3"), sq("d5")).extend(sq("b7"));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, Move::hop(sq("b3"), sq("d5")));
    }

    #[test]
    fn test_is_extension_of() {
        let partial = Move::hop(sq("b3"), sq("d5"));
        let full = partial.extend(sq("f3"));
        assert!(full.is_extension_of(&partial));
        assert!(!partial.is_extension_of(&partial), "must be strictly longer");
        assert!(!partial.is_extension_of(&full));

        let other = Move::hop(sq("b3"), sq("f5")).extend(sq("b7"));
        assert!(!other.is_extension_of(&partial));

        let slide = Move::slide(sq("b3"), sq("c4"));
        assert!(!slide.is_extension_of(&Move::slide(sq("b3"), sq("c4"))));
    }

    #[test]
    fn test_parse_path() {
        assert_eq!(
            Move::parse_path("b3-c4").unwrap(),
            vec![sq("b3"), sq("c4")]
        );
        assert_eq!(
            Move::parse_path("hop b3xd5xf3").unwrap(),
            vec![sq("b3"), sq("d5"), sq("f3")]
        );
        assert!(Move::parse_path("b3").is_err());
        assert!(Move::parse_path("b3-a1").is_err());
    }
}
