//! Random-constant table for Zobrist hashing.
//!
//! The table is built once from a seed and shared read-only by every board
//! through an [`Arc`]. Boards never mutate it, so clones handed to other
//! threads can keep hashing against the same constants.

use std::sync::Arc;

use crate::board::{Color, Vertex, VertexState};
use crate::constants::{DEFAULT_ZOBRIST_SEED, MAX_PASSES, NO_VERTEX, NUM_VERTICES, PRISONER_SLOTS};

/// Precomputed random terms for every hashed attribute of a position.
#[derive(Debug, Clone)]
pub struct Zobrist {
    /// Base value every full hash starts from.
    empty: u64,
    /// Per (vertex state, vertex) terms. Indexed by [`VertexState::index`].
    stones: [[u64; NUM_VERTICES]; 4],
    /// XORed in while Black is to move.
    black_to_move: u64,
    /// Per ko vertex terms; slot `NO_VERTEX` stands for "no ko".
    ko: [u64; NUM_VERTICES],
    /// Per (colour, prisoner count) terms.
    prisoners: [[u64; PRISONER_SLOTS]; 2],
    /// Per consecutive-pass count terms.
    pass: [u64; MAX_PASSES + 1],
}

impl Default for Zobrist {
    fn default() -> Self {
        Self::new(DEFAULT_ZOBRIST_SEED)
    }
}

impl Zobrist {
    /// Build a table from `seed`. The same seed always yields the same table.
    pub fn new(seed: u64) -> Self {
        let mut rng = fastrand::Rng::with_seed(seed);

        let empty = rng.u64(..);
        let mut stones = [[0u64; NUM_VERTICES]; 4];
        for row in &mut stones {
            row.fill_with(|| rng.u64(..));
        }
        let black_to_move = rng.u64(..);
        let mut ko = [0u64; NUM_VERTICES];
        ko.fill_with(|| rng.u64(..));
        let mut prisoners = [[0u64; PRISONER_SLOTS]; 2];
        for row in &mut prisoners {
            row.fill_with(|| rng.u64(..));
        }
        let mut pass = [0u64; MAX_PASSES + 1];
        pass.fill_with(|| rng.u64(..));

        Zobrist {
            empty,
            stones,
            black_to_move,
            ko,
            prisoners,
            pass,
        }
    }

    /// Build a table and wrap it for sharing between boards.
    pub fn shared(seed: u64) -> Arc<Self> {
        Arc::new(Self::new(seed))
    }

    #[inline]
    pub fn empty(&self) -> u64 {
        self.empty
    }

    #[inline]
    pub fn stone(&self, state: VertexState, vertex: Vertex) -> u64 {
        self.stones[state.index()][vertex]
    }

    /// Side-to-move term: only Black contributes.
    #[inline]
    pub fn to_move(&self, color: Color) -> u64 {
        match color {
            Color::Black => self.black_to_move,
            Color::White => 0,
        }
    }

    #[inline]
    pub fn ko(&self, ko: Option<Vertex>) -> u64 {
        self.ko[ko.unwrap_or(NO_VERTEX)]
    }

    /// Prisoner term for `color` holding `count` prisoners. Counts past the
    /// table length wrap, identically for incremental and full hashing.
    #[inline]
    pub fn prisoners(&self, color: Color, count: u32) -> u64 {
        self.prisoners[color.index()][count as usize % PRISONER_SLOTS]
    }

    #[inline]
    pub fn pass(&self, passes: usize) -> u64 {
        self.pass[passes.min(MAX_PASSES)]
    }
}
