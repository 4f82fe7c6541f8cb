//! Checkers-Rust: a checkers rules engine and a lookahead opponent.
//!
//! This crate plays standard 8x8 checkers with mandatory captures. South
//! moves first. The automated player runs a fixed-depth negamax search
//! scored by material.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, starting setup and search parameters
//! - [`square`] - Coordinate mapping and diagonal directions
//! - [`board`] - Bit-packed board state
//! - [`moves`] - Slides and capture chains
//! - [`game`] - Game state, crowning and end-of-game detection
//! - [`rules`] - Legal move generation
//! - [`session`] - The game in progress, with change notifications
//! - [`search`] - Negamax move selection
//! - [`worker`] - Background search thread
//! - [`console`] - Text command loop
//!
//! ## Example
//!
//! ```
//! use checkers_rust::search::AutoPlayer;
//! use checkers_rust::session::Session;
//!
//! let mut session = Session::new();
//! let mut engine = AutoPlayer::new(2);
//!
//! // Let the engine play South's first move.
//! let mv = engine.choose_move(&session.game_state()).unwrap().unwrap();
//! session.execute_move(&mv).unwrap();
//! println!("{}", session.game_state());
//! ```

pub mod board;
pub mod console;
pub mod constants;
pub mod error;
pub mod game;
pub mod moves;
pub mod rules;
pub mod search;
pub mod session;
pub mod square;
pub mod worker;

pub use board::{BoardState, Player};
pub use error::CheckersError;
pub use game::GameState;
pub use moves::Move;
pub use square::Square;
