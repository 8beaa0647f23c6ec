//! Group Structure: strings as embedded circular lists.
//!
//! Every stone stores the next stone of its string (`next`, circular) and the
//! string's representative (`parent`). Liberty and stone counts are kept at
//! the representative only. Merging walks the absorbed string once, removal
//! walks the removed string once; nothing allocates.

use crate::board::{Board, Color, EMPTY_NBR, Vertex, VertexState};
use crate::constants::NO_GROUP;

impl Board {
    /// Number of empty orthogonal neighbours ("pseudo-liberties") of a vertex.
    #[inline]
    pub fn count_pliberties(&self, vertex: Vertex) -> usize {
        self.nbr_counts[vertex][EMPTY_NBR] as usize
    }

    /// Representative of the string holding `vertex`, `NO_GROUP` if empty.
    #[inline]
    pub fn parent(&self, vertex: Vertex) -> Vertex {
        self.parent[vertex]
    }

    /// Liberties of the string holding `vertex`.
    #[inline]
    pub fn string_liberties(&self, vertex: Vertex) -> usize {
        debug_assert!(self.state[vertex].is_stone());
        self.libs[self.parent[vertex]] as usize
    }

    /// Stone count of the string holding `vertex`.
    #[inline]
    pub fn string_size(&self, vertex: Vertex) -> usize {
        debug_assert!(self.state[vertex].is_stone());
        self.stones[self.parent[vertex]] as usize
    }

    /// All stones of the string holding `vertex`, starting at `vertex`.
    pub fn string_stones(&self, vertex: Vertex) -> Vec<Vertex> {
        let mut out = Vec::with_capacity(self.string_size(vertex));
        let mut pos = vertex;
        loop {
            out.push(pos);
            pos = self.next[pos];
            if pos == vertex {
                break;
            }
        }
        out
    }

    /// Would `color` playing at empty `vertex` be suicide?
    ///
    /// Answered from neighbour liberties alone: a move lives if it touches an
    /// empty point, connects to a string with another liberty, or takes the
    /// last liberty of an opposing string.
    pub fn is_suicide(&self, vertex: Vertex, color: Color) -> bool {
        if self.count_pliberties(vertex) > 0 {
            return false;
        }

        let own = VertexState::from(color);
        let opp = VertexState::from(color.opponent());
        for ai in self.neighbours(vertex) {
            let libs = self.libs[self.parent[ai]];
            let state = self.state[ai];
            if state == own && libs > 1 {
                return false;
            }
            if state == opp && libs <= 1 {
                return false;
            }
        }
        true
    }

    /// Is `vertex` an eye of `color`?
    ///
    /// All orthogonal neighbours must be `color` or edge. In the centre at
    /// most one diagonal may hold an opposing stone; on the edge none may.
    pub fn is_eye(&self, color: Color, vertex: Vertex) -> bool {
        if self.nbr_counts[vertex][color.index()] != 4 {
            return false;
        }

        let opp = VertexState::from(color.opponent());
        let mut at_edge = false;
        let mut false_count = 0;
        for d in self.diagonals(vertex) {
            match self.state[d] {
                VertexState::Invalid => at_edge = true,
                s if s == opp => false_count += 1,
                _ => {}
            }
        }

        let tolerance = if at_edge { 0 } else { 1 };
        false_count <= tolerance
    }

    /// A stone of `color` now occupies `vertex`: update neighbour counts and
    /// take one liberty from each distinct adjacent string.
    pub(crate) fn add_neighbour(&mut self, vertex: Vertex, color: Color) {
        let mut seen = [NO_GROUP; 4];
        let mut seen_cnt = 0;

        for ai in self.neighbours(vertex) {
            if self.state[ai] == VertexState::Invalid {
                continue;
            }
            let counts = &mut self.nbr_counts[ai];
            counts[color.index()] += 1;
            counts[EMPTY_NBR] -= 1;

            let p = self.parent[ai];
            if p != NO_GROUP && !seen[..seen_cnt].contains(&p) {
                self.libs[p] -= 1;
                seen[seen_cnt] = p;
                seen_cnt += 1;
            }
        }
    }

    /// A stone of `color` left `vertex`: the reverse of [`Self::add_neighbour`].
    pub(crate) fn remove_neighbour(&mut self, vertex: Vertex, color: Color) {
        let mut seen = [NO_GROUP; 4];
        let mut seen_cnt = 0;

        for ai in self.neighbours(vertex) {
            if self.state[ai] == VertexState::Invalid {
                continue;
            }
            let counts = &mut self.nbr_counts[ai];
            counts[color.index()] -= 1;
            counts[EMPTY_NBR] += 1;

            let p = self.parent[ai];
            if p != NO_GROUP && !seen[..seen_cnt].contains(&p) {
                self.libs[p] += 1;
                seen[seen_cnt] = p;
                seen_cnt += 1;
            }
        }
    }

    /// Absorb string `aip` into string `ip` (both representatives).
    ///
    /// Liberties of `aip` are added to `ip` unless already adjacent to a stone
    /// of `ip`, including stones relabelled earlier in this walk.
    pub(crate) fn merge_strings(&mut self, ip: Vertex, aip: Vertex) {
        debug_assert!(ip != NO_GROUP && aip != NO_GROUP && ip != aip);

        self.stones[ip] += self.stones[aip];

        let mut pos = aip;
        loop {
            for ai in self.neighbours(pos) {
                if self.state[ai] != VertexState::Empty {
                    continue;
                }
                let shared = self
                    .neighbours(ai)
                    .iter()
                    .any(|&aai| self.parent[aai] == ip);
                if !shared {
                    self.libs[ip] += 1;
                }
            }
            self.parent[pos] = ip;
            pos = self.next[pos];
            if pos == aip {
                break;
            }
        }

        // splice the two cycles
        self.next.swap(aip, ip);
    }

    /// Remove the whole string holding `start` and return its stone count.
    ///
    /// Each stone becomes empty (hashes toggled), goes back on the free-list
    /// and hands a liberty to every distinct adjacent string.
    pub(crate) fn remove_string(&mut self, start: Vertex) -> usize {
        let Some(color) = self.state[start].color() else {
            panic!("remove_string on non-stone vertex {start}");
        };

        let mut pos = start;
        let mut removed = 0;
        loop {
            self.set_state(pos, VertexState::Empty);
            self.parent[pos] = NO_GROUP;
            self.remove_neighbour(pos, color);
            self.push_empty(pos);

            removed += 1;
            pos = self.next[pos];
            if pos == start {
                break;
            }
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use crate::board::{Board, Color, Vertex};
    use crate::zobrist::Zobrist;

    fn board(size: usize) -> Board {
        Board::new(Zobrist::shared(3), size).unwrap()
    }

    fn play(b: &mut Board, color: Color, text: &str) -> Vertex {
        let v = b.text_to_move(text).unwrap();
        b.update_board(color, v);
        v
    }

    #[test]
    fn test_singleton_liberties() {
        let mut b = board(9);
        let center = play(&mut b, Color::Black, "E5");
        let edge = play(&mut b, Color::Black, "A5");
        let corner = play(&mut b, Color::Black, "A1");
        assert_eq!(b.string_liberties(center), 4);
        assert_eq!(b.string_liberties(edge), 3);
        assert_eq!(b.string_liberties(corner), 2);
        assert_eq!(b.string_size(center), 1);
    }

    #[test]
    fn test_shared_neighbour_loses_one_liberty() {
        let mut b = board(9);
        // L shape: C3 touches the new stone at D3 once, D4 is another string
        play(&mut b, Color::White, "C3");
        play(&mut b, Color::White, "C4");
        let d4 = play(&mut b, Color::White, "D4");
        let c3 = b.text_to_move("C3").unwrap();
        assert_eq!(b.parent(c3), b.parent(d4));
        let before = b.string_liberties(c3);

        // black stone at D3 touches the white string at C3 and D4
        play(&mut b, Color::Black, "D3");
        assert_eq!(b.string_liberties(c3), before - 1);
    }

    #[test]
    fn test_merge_walks_circular_list() {
        let mut b = board(9);
        for t in ["B2", "D2", "C3"] {
            play(&mut b, Color::Black, t);
        }
        let c2 = play(&mut b, Color::Black, "C2");
        let mut stones = b.string_stones(c2);
        stones.sort();
        let mut expected: Vec<Vertex> = ["B2", "D2", "C3", "C2"]
            .iter()
            .map(|t| b.text_to_move(t).unwrap())
            .collect();
        expected.sort();
        assert_eq!(stones, expected);
        assert_eq!(b.string_size(c2), 4);
        for &s in &expected {
            assert_eq!(b.parent(s), b.parent(c2));
        }
        assert_eq!(b.string_liberties(c2), b.brute_force_liberties(c2));
    }

    #[test]
    fn test_is_suicide() {
        let mut b = board(9);
        play(&mut b, Color::Black, "A2");
        play(&mut b, Color::Black, "B1");
        let a1 = b.text_to_move("A1").unwrap();
        assert!(b.is_suicide(a1, Color::White));
        assert!(!b.is_suicide(a1, Color::Black));

        // once the black stones are in atari, white A1 captures
        play(&mut b, Color::White, "A3");
        play(&mut b, Color::White, "B2");
        play(&mut b, Color::White, "C1");
        assert!(!b.is_suicide(a1, Color::White));
    }

    #[test]
    fn test_is_eye() {
        let mut b = board(9);
        for t in ["A2", "B1", "B2"] {
            play(&mut b, Color::Black, t);
        }
        let a1 = b.text_to_move("A1").unwrap();
        assert!(b.is_eye(Color::Black, a1));
        assert!(!b.is_eye(Color::White, a1));

        // an opposing stone on the only diagonal spoils an edge eye
        let mut b = board(9);
        for t in ["A2", "B1"] {
            play(&mut b, Color::Black, t);
        }
        play(&mut b, Color::White, "B2");
        assert!(!b.is_eye(Color::Black, a1));
    }

    #[test]
    fn test_center_eye_tolerates_one_diagonal() {
        let mut b = board(9);
        for t in ["D5", "F5", "E4", "E6"] {
            play(&mut b, Color::Black, t);
        }
        let e5 = b.text_to_move("E5").unwrap();
        assert!(b.is_eye(Color::Black, e5));
        play(&mut b, Color::White, "D4");
        assert!(b.is_eye(Color::Black, e5));
        play(&mut b, Color::White, "F6");
        assert!(!b.is_eye(Color::Black, e5));
    }
}
