//! Hash Maintainer: incremental and from-scratch position hashing.
//!
//! Two hashes are kept in step with every mutation:
//! - the position hash: stones, prisoners, side to move and ko vertex;
//! - the ko hash: stones only, for positional superko checks by the caller.
//!
//! Incremental updates XOR the old term out and the new term in around each
//! change. The `calc_*` functions rebuild the same values in O(board) and are
//! used for reset, symmetry canonicalisation and verification.

use crate::board::{Board, Color, Vertex, VertexState};
use crate::symmetry::get_symmetry;

impl Board {
    /// Full position hash with `ko` as ko vertex, every vertex mapped through
    /// `transform` before its term is looked up.
    pub fn calc_hash_with<F>(&self, ko: Option<Vertex>, transform: F) -> u64
    where
        F: Fn(Vertex) -> Vertex,
    {
        let z = &self.zobrist;
        let mut res = z.empty();

        for vertex in 0..self.num_vertices {
            let state = self.state[vertex];
            if state != VertexState::Invalid {
                res ^= z.stone(state, transform(vertex));
            }
        }

        res ^= z.prisoners(Color::Black, self.prisoners[Color::Black.index()]);
        res ^= z.prisoners(Color::White, self.prisoners[Color::White.index()]);
        res ^= z.to_move(self.to_move);
        res ^= z.ko(ko.map(&transform));

        res
    }

    /// Full position hash of the board as it stands.
    pub fn calc_hash(&self) -> u64 {
        self.calc_hash_with(self.ko_move, |v| v)
    }

    /// Position hash as if the board were transformed by `symmetry`.
    /// Symmetry 0 gives [`Self::calc_hash`]. The board is not modified.
    pub fn calc_symmetry_hash(&self, symmetry: usize) -> u64 {
        self.calc_hash_with(self.ko_move, |vertex| {
            let (x, y) = get_symmetry(self.xy(vertex), symmetry, self.size);
            self.vertex(x, y)
        })
    }

    /// Stones-only hash.
    pub fn calc_ko_hash(&self) -> u64 {
        let z = &self.zobrist;
        let mut res = z.empty();
        for vertex in 0..self.num_vertices {
            let state = self.state[vertex];
            if state != VertexState::Invalid {
                res ^= z.stone(state, vertex);
            }
        }
        res
    }

    /// Change the side to move.
    pub fn set_to_move(&mut self, color: Color) {
        if self.to_move != color {
            self.hash ^= self.zobrist.to_move(Color::Black);
        }
        self.to_move = color;
    }

    /// Change a vertex state, keeping both hashes in step.
    #[inline]
    pub(crate) fn set_state(&mut self, vertex: Vertex, state: VertexState) {
        let toggle =
            self.zobrist.stone(self.state[vertex], vertex) ^ self.zobrist.stone(state, vertex);
        self.hash ^= toggle;
        self.ko_hash ^= toggle;
        self.state[vertex] = state;
    }

    /// Credit `count` prisoners to `color`.
    #[inline]
    pub(crate) fn add_prisoners(&mut self, color: Color, count: usize) {
        let c = color.index();
        self.hash ^= self.zobrist.prisoners(color, self.prisoners[c]);
        self.prisoners[c] += count as u32;
        self.hash ^= self.zobrist.prisoners(color, self.prisoners[c]);
    }

    /// Replace the ko vertex.
    #[inline]
    pub(crate) fn set_ko_move(&mut self, ko: Option<Vertex>) {
        self.hash ^= self.zobrist.ko(self.ko_move);
        self.ko_move = ko;
        self.hash ^= self.zobrist.ko(ko);
    }

    /// Drop any pending ko, as after a pass.
    pub fn clear_ko(&mut self) {
        self.set_ko_move(None);
    }
}

#[cfg(test)]
mod tests {
    use crate::board::{Board, Color};
    use crate::constants::NUM_SYMMETRIES;
    use crate::zobrist::Zobrist;

    fn board(size: usize) -> Board {
        Board::new(Zobrist::shared(11), size).unwrap()
    }

    #[test]
    fn test_empty_board_hash_is_deterministic() {
        let a = board(9);
        let b = board(9);
        assert_eq!(a.hash(), b.hash());
        assert_eq!(a.ko_hash(), b.ko_hash());
        assert_ne!(a.hash(), a.ko_hash());
    }

    #[test]
    fn test_board_sizes_hash_differently() {
        assert_ne!(board(9).ko_hash(), board(7).ko_hash());
    }

    #[test]
    fn test_to_move_toggles_position_hash_only() {
        let mut b = board(9);
        let (h, kh) = (b.hash(), b.ko_hash());
        b.set_to_move(Color::White);
        assert_ne!(b.hash(), h);
        assert_eq!(b.ko_hash(), kh);
        assert_eq!(b.hash(), b.calc_hash());
        b.set_to_move(Color::White);
        assert_eq!(b.hash(), b.calc_hash());
        b.set_to_move(Color::Black);
        assert_eq!(b.hash(), h);
    }

    #[test]
    fn test_stone_then_removal_restores_ko_hash() {
        let mut b = board(9);
        let kh = b.ko_hash();
        let v = b.text_to_move("C3").unwrap();
        b.update_board(Color::Black, v);
        assert_ne!(b.ko_hash(), kh);
        b.remove_string(v);
        assert_eq!(b.ko_hash(), kh);
        assert_eq!(b.hash(), b.calc_hash());
    }

    #[test]
    fn test_identity_symmetry_matches_plain_hash() {
        let mut b = board(9);
        for t in ["C3", "D4", "G7"] {
            let v = b.text_to_move(t).unwrap();
            b.update_board(Color::Black, v);
        }
        assert_eq!(b.calc_symmetry_hash(0), b.calc_hash());
        assert_eq!(b.calc_symmetry_hash(0), b.hash());
    }

    #[test]
    fn test_mirrored_positions_share_a_symmetry_hash() {
        let mut a = board(9);
        let mut b = board(9);
        let va = a.vertex(1, 2);
        let vb = b.vertex(7, 2); // x mirrored
        a.update_board(Color::Black, va);
        b.update_board(Color::Black, vb);
        assert_ne!(a.hash(), b.hash());

        let hashes: Vec<u64> = (0..NUM_SYMMETRIES).map(|s| a.calc_symmetry_hash(s)).collect();
        assert!(hashes.contains(&b.hash()));
        // symmetry 2 mirrors x
        assert_eq!(a.calc_symmetry_hash(2), b.hash());
    }

    #[test]
    fn test_symmetry_hash_does_not_mutate() {
        let mut b = board(9);
        let v = b.text_to_move("B7").unwrap();
        b.update_board(Color::White, v);
        let h = b.hash();
        for s in 0..NUM_SYMMETRIES {
            b.calc_symmetry_hash(s);
        }
        assert_eq!(b.hash(), h);
    }
}
