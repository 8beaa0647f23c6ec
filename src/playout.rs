//! Random playouts.
//!
//! A playout plays random legal moves until two consecutive passes or a move
//! limit. The result serves as a terminal sample for
//! [`Board::remove_dead_stones`](crate::board::Board::remove_dead_stones) and
//! drives the invariant stress tests and the `bench` command.

use std::convert::Infallible;

use crate::board::Vertex;
use crate::constants::PASS;
use crate::position::Position;

/// Choose a random legal move for the side to move that does not fill one of
/// its own eyes, or [`PASS`] if there is none.
///
/// Scans the free-list from a random offset, so no candidate list is built.
pub fn random_move(pos: &Position, rng: &mut fastrand::Rng) -> Vertex {
    let board = pos.board();
    let color = pos.to_move();
    let empties = board.empty_vertices();
    if empties.is_empty() {
        return PASS;
    }

    let start = rng.usize(..empties.len());
    for i in 0..empties.len() {
        let vertex = empties[(start + i) % empties.len()];
        if board.is_eye(color, vertex) {
            continue;
        }
        if pos.is_move_legal(color, vertex) {
            return vertex;
        }
    }
    PASS
}

/// Play random moves until two consecutive passes or `max_moves` moves.
/// Returns the number of moves played, passes included.
pub fn playout(pos: &mut Position, rng: &mut fastrand::Rng, max_moves: usize) -> usize {
    match playout_with(pos, rng, max_moves, |_| Ok::<(), Infallible>(())) {
        Ok(played) => played,
        Err(never) => match never {},
    }
}

/// [`playout`] calling `after_move` after every move; stops at the first
/// error it returns.
pub fn playout_with<F, E>(
    pos: &mut Position,
    rng: &mut fastrand::Rng,
    max_moves: usize,
    mut after_move: F,
) -> Result<usize, E>
where
    F: FnMut(&Position) -> Result<(), E>,
{
    let mut played = 0;
    while pos.passes() < 2 && played < max_moves {
        let vertex = random_move(pos, rng);
        pos.play_move(vertex);
        played += 1;
        after_move(pos)?;
    }
    Ok(played)
}
