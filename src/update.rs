//! Move/Capture Engine.
//!
//! [`Board::update_board`] is the only way stones get onto the board. It
//! places the stone, fixes neighbour liberties, captures, merges, handles
//! suicide and reports a simple ko, mirroring every change into both hashes
//! as it goes.

use tracing::trace;

use crate::board::{Board, Color, Vertex, VertexState};
use crate::constants::NO_VERTEX;

impl Board {
    /// Place a `color` stone on empty `vertex`.
    ///
    /// Returns the vertex of a single stone captured by playing into an
    /// opposing eye (a simple-ko recapture point for the opponent's next
    /// move), or `None`. The result is also stored as the board's ko vertex.
    ///
    /// # Panics
    /// If `vertex` is not an empty on-board vertex (pass included). Move
    /// legality is the caller's job.
    pub fn update_board(&mut self, color: Color, vertex: Vertex) -> Option<Vertex> {
        assert!(
            self.is_on_board(vertex),
            "update_board on off-board vertex {vertex}"
        );
        assert_eq!(
            self.state[vertex],
            VertexState::Empty,
            "update_board on occupied vertex {vertex}"
        );

        let stone = VertexState::from(color);
        let opp = VertexState::from(color.opponent());

        self.set_state(vertex, stone);
        self.next[vertex] = vertex;
        self.parent[vertex] = vertex;
        self.libs[vertex] = self.count_pliberties(vertex) as u16;
        self.stones[vertex] = 1;

        // every adjacent string loses this liberty
        self.add_neighbour(vertex, color);

        // surrounded by opponent or edge?
        let eye_play = self.nbr_counts[vertex][color.opponent().index()] == 4;

        let mut captured_stones = 0;
        let mut captured_vtx = NO_VERTEX;

        for ai in self.neighbours(vertex) {
            let state = self.state[ai];
            if state == opp {
                if self.libs[self.parent[ai]] == 0 {
                    captured_stones += self.remove_string(ai);
                    captured_vtx = ai;
                }
            } else if state == stone {
                let ip = self.parent[vertex];
                let aip = self.parent[ai];
                if ip != aip {
                    if self.stones[ip] >= self.stones[aip] {
                        self.merge_strings(ip, aip);
                    } else {
                        self.merge_strings(aip, ip);
                    }
                }
            }
        }

        self.add_prisoners(color, captured_stones);
        self.take_empty(vertex);

        // suicide: the new string has no liberties left
        if self.libs[self.parent[vertex]] == 0 {
            debug_assert_eq!(captured_stones, 0, "suicide after capturing");
            let removed = self.remove_string(vertex);
            trace!(vertex, removed, "suicide");
        } else if captured_stones > 0 {
            trace!(vertex, captured_stones, "capture");
        }

        let ko = (captured_stones == 1 && eye_play).then_some(captured_vtx);
        debug_assert!(ko.is_none_or(|k| self.state[k] == VertexState::Empty));
        self.set_ko_move(ko);
        if let Some(ko) = ko {
            trace!(vertex, ko, "simple ko");
        }

        debug_assert_eq!(self.hash, self.calc_hash(), "hash drifted at {vertex}");
        debug_assert_eq!(self.ko_hash, self.calc_ko_hash(), "ko hash drifted at {vertex}");
        ko
    }
}
