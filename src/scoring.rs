//! Scoring Resolver: dead-stone removal against a terminal board, and
//! Tromp-Taylor area counting.

use std::collections::VecDeque;

use tracing::debug;

use crate::board::{Board, Color, Vertex, VertexState};

impl Board {
    /// Remove every string judged dead by comparison with `terminal`.
    ///
    /// A stone is alive if `terminal` holds the same colour on its vertex and
    /// dead otherwise. Dead stones are removed as whole strings and credited
    /// to the opponent as prisoners. Returns `false` if that removal emptied
    /// a vertex that was classified alive, i.e. the terminal sample
    /// disagrees with the live board's string structure and the caller
    /// should retry with another sample.
    pub fn remove_dead_stones(&mut self, terminal: &Board) -> bool {
        debug_assert_eq!(self.size, terminal.size);

        let mut alive: Vec<Vertex> = Vec::new();
        let mut map = String::new();
        let render = tracing::enabled!(tracing::Level::DEBUG);

        for y in (0..self.size).rev() {
            for x in 0..self.size {
                let vertex = self.vertex(x, y);
                let current = self.state[vertex];
                let ch = if current == VertexState::Empty {
                    '.'
                } else if current == terminal.state_at(x, y) {
                    alive.push(vertex);
                    'A'
                } else {
                    'v'
                };
                if render {
                    map.push(ch);
                    map.push(' ');
                }
            }
            if render {
                map.push('\n');
            }
        }

        let mut removed = 0;
        for x in 0..self.size {
            for y in 0..self.size {
                let vertex = self.vertex(x, y);
                let current = self.state[vertex];
                let Some(color) = current.color() else {
                    continue;
                };
                if current != terminal.state_at(x, y) {
                    let count = self.remove_string(vertex);
                    self.add_prisoners(color.opponent(), count);
                    removed += count;
                }
            }
        }

        let consistent = alive
            .iter()
            .all(|&v| self.state[v] != VertexState::Empty);

        if render {
            debug!(
                alive = alive.len(),
                removed,
                consistent,
                "dead stone classification\n{map}"
            );
        }
        consistent
    }

    /// Area score from Black's point of view: stones plus empty points
    /// reachable from them, Black minus White minus `komi`. Empty regions
    /// touching both colours cancel out.
    pub fn area_score(&self, komi: f32) -> f32 {
        let black = self.calc_reach_color(Color::Black);
        let white = self.calc_reach_color(Color::White);
        black as f32 - white as f32 - komi
    }

    /// Count `color` stones plus the empty points connected to them.
    fn calc_reach_color(&self, color: Color) -> usize {
        let stone = VertexState::from(color);
        let mut seen = vec![false; self.num_vertices];
        let mut open = VecDeque::new();
        let mut reachable = 0;

        for vertex in self.vertices() {
            if self.state[vertex] == stone {
                reachable += 1;
                seen[vertex] = true;
                open.push_back(vertex);
            }
        }
        while let Some(vertex) = open.pop_front() {
            for n in self.neighbours(vertex) {
                if !seen[n] && self.state[n] == VertexState::Empty {
                    reachable += 1;
                    seen[n] = true;
                    open.push_back(n);
                }
            }
        }
        reachable
    }
}
