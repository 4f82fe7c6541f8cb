//! Constants for board geometry, player setup and search parameters.
//!
//! The board is the standard 8x8 draughts board. Only the 32 squares whose
//! row parity equals their column parity are playable; they are numbered
//! 0..32 row by row, four per row, so every per-square fact fits in one bit
//! of a `u32`.

// =============================================================================
// Board Geometry
// =============================================================================

/// Squares along one side of the board.
pub const SQUARES_ON_SIDE: usize = 8;

/// Playable squares per row.
pub const SQUARES_PER_ROW: usize = SQUARES_ON_SIDE / 2;

/// Total number of playable squares.
pub const PLAYABLE_SQUARES: usize = SQUARES_ON_SIDE * SQUARES_PER_ROW;

/// Row on which a South man is crowned (North's home edge).
pub const SOUTH_CROWN_ROW: usize = 0;

/// Row on which a North man is crowned (South's home edge).
pub const NORTH_CROWN_ROW: usize = SQUARES_ON_SIDE - 1;

// =============================================================================
// Starting Position
// =============================================================================

/// Pieces each player starts with.
pub const STARTING_PIECES_PER_PLAYER: u32 = 12;

/// North's men occupy rows 0..3, i.e. playable squares 0..12.
pub const NORTH_START_MASK: u32 = 0x0000_0fff;

/// South's men occupy rows 5..8, i.e. playable squares 20..32.
pub const SOUTH_START_MASK: u32 = 0xfff0_0000;

// =============================================================================
// Search Parameters
// =============================================================================

/// Default lookahead level of the automated player.
pub const DEFAULT_LEVEL: u8 = 1;

/// Lowest accepted lookahead level.
pub const MIN_LEVEL: i32 = 0;

/// Highest accepted lookahead level.
pub const MAX_LEVEL: i32 = 10;

/// Score of a won game. Every material score lies strictly inside
/// `-WIN_SCORE..WIN_SCORE`.
pub const WIN_SCORE: i32 = 1000;

// =============================================================================
// Diagram Symbols
// =============================================================================

/// South man.
pub const SOUTH_MAN: char = 's';

/// South king.
pub const SOUTH_KING: char = 'S';

/// North man.
pub const NORTH_MAN: char = 'n';

/// North king.
pub const NORTH_KING: char = 'N';

/// Empty playable square.
pub const EMPTY: char = '.';

/// Square that can never hold a piece.
pub const OFF: char = '-';
