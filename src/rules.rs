//! Legal move generation.
//!
//! Capturing is mandatory for the whole turn: if any piece of the side to
//! move can capture, only capture chains are legal, and every chain must be
//! maximal (no further leg available from its last square). Chains of
//! different lengths may all be legal at once; there is no longest-capture
//! rule.
//!
//! Chains are explored on owned board copies, one per leg, so no undo
//! bookkeeping is needed. Since `BoardState::apply_move` never crowns, a man
//! that reaches the far row in the middle of a chain keeps moving as a man.

use fastrand::Rng;

use crate::board::{BoardState, Player};
use crate::game::GameState;
use crate::moves::Move;
use crate::square::{Direction, Square};

/// All legal moves for the side to move, in random order.
///
/// Returns an empty list when the game is over. The shuffle lets a caller
/// that keeps the first of several equally good moves pick fairly among
/// them.
pub fn find_moves(state: &GameState, rng: &mut Rng) -> Vec<Move> {
    let mut moves = find_moves_unshuffled(state);
    rng.shuffle(&mut moves);
    moves
}

/// All legal moves for the side to move, in board scan order.
pub fn find_moves_unshuffled(state: &GameState) -> Vec<Move> {
    let Some(player) = state.active_player() else {
        return Vec::new();
    };
    let board = state.board();

    let mut moves = Vec::new();
    for origin in board.squares_of(player) {
        collect_hops(*board, origin, None, &mut moves);
    }

    // Slides only when nothing anywhere on the board can capture.
    if moves.is_empty() {
        for origin in board.squares_of(player) {
            let king = board.is_king(origin);
            for &dir in Direction::for_piece(player, king) {
                if let Some(target) = slide_target(board, origin, dir) {
                    moves.push(Move::slide(origin, target));
                }
            }
        }
    }
    moves
}

/// Whether `player` has at least one slide or single capture available.
///
/// A cheap existence probe used for end-of-game detection; it does not
/// build chains.
pub fn can_play(board: &BoardState, player: Player) -> bool {
    board.squares_of(player).any(|origin| {
        let king = board.is_king(origin);
        Direction::for_piece(player, king).iter().any(|&dir| {
            slide_target(board, origin, dir).is_some() || hop_target(board, origin, dir).is_some()
        })
    })
}

/// Extend every capture chain reachable from `origin` and record the
/// maximal ones. Returns the number of chains recorded.
///
/// `board` already reflects the legs of `chain` played so far, with the
/// moving piece standing on `origin`.
fn collect_hops(
    board: BoardState,
    origin: Square,
    chain: Option<&Move>,
    out: &mut Vec<Move>,
) -> usize {
    let Some(player) = board.player_at(origin) else {
        return 0;
    };
    let king = board.is_king(origin);

    let mut found = 0;
    for &dir in Direction::for_piece(player, king) {
        let Some(target) = hop_target(&board, origin, dir) else {
            continue;
        };
        let leg = Move::hop(origin, target);
        let whole = match chain {
            Some(prev) => prev.extend(target),
            None => leg.clone(),
        };
        let further = collect_hops(board.apply_move(&leg), target, Some(&whole), out);
        if further == 0 {
            out.push(whole);
            found += 1;
        } else {
            found += further;
        }
    }
    found
}

/// Landing square of a single capture from `origin` in `dir`, if any: the
/// adjacent square must hold an opposing piece and the one beyond it must
/// be empty.
fn hop_target(board: &BoardState, origin: Square, dir: Direction) -> Option<Square> {
    let hopper = board.player_at(origin)?;
    let over = origin.step(dir)?;
    if board.player_at(over) != Some(hopper.opponent()) {
        return None;
    }
    let target = over.step(dir)?;
    board.is_empty_at(target).then_some(target)
}

fn slide_target(board: &BoardState, origin: Square, dir: Direction) -> Option<Square> {
    let target = origin.step(dir)?;
    board.is_empty_at(target).then_some(target)
}
