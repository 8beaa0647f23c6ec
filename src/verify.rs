//! Brute-force verification of the incremental bookkeeping.
//!
//! Everything [`Board::update_board`] maintains incrementally is recomputed
//! here from the grid alone. Too slow for search; used by tests, the
//! `bench --verify` run and debugging sessions.

use thiserror::Error;

use crate::board::{Board, Color, EMPTY_NBR, Vertex, VertexState};
use crate::constants::NO_GROUP;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantError {
    #[error("position hash {actual:016X} != recomputed {expected:016X}")]
    Hash { expected: u64, actual: u64 },
    #[error("ko hash {actual:016X} != recomputed {expected:016X}")]
    KoHash { expected: u64, actual: u64 },
    #[error("free-list disagrees with grid at vertex {vertex}")]
    FreeList { vertex: Vertex },
    #[error("neighbour counts wrong at vertex {vertex}")]
    NeighbourCount { vertex: Vertex },
    #[error("string links broken at vertex {vertex}")]
    StringLinks { vertex: Vertex },
    #[error("string at {vertex} has {actual} stones recorded, {expected} on the board")]
    StoneCount {
        vertex: Vertex,
        expected: usize,
        actual: usize,
    },
    #[error("string at {vertex} has {actual} liberties recorded, {expected} on the board")]
    Liberties {
        vertex: Vertex,
        expected: usize,
        actual: usize,
    },
    #[error("ko vertex {vertex} is not empty")]
    KoOccupied { vertex: Vertex },
}

impl Board {
    /// Check every incremental invariant against a full recomputation.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let expected = self.calc_hash();
        if self.hash != expected {
            return Err(InvariantError::Hash {
                expected,
                actual: self.hash,
            });
        }
        let expected = self.calc_ko_hash();
        if self.ko_hash != expected {
            return Err(InvariantError::KoHash {
                expected,
                actual: self.ko_hash,
            });
        }
        if let Some(vertex) = self.ko_move {
            if self.state[vertex] != VertexState::Empty {
                return Err(InvariantError::KoOccupied { vertex });
            }
        }

        self.check_free_list()?;
        self.check_neighbour_counts()?;
        self.check_strings()
    }

    /// Liberties of the string at `vertex`, counted by flood fill.
    pub fn brute_force_liberties(&self, vertex: Vertex) -> usize {
        let mut members = Vec::new();
        self.collect_string(vertex, &mut members);

        let mut liberty_seen = vec![false; self.num_vertices];
        let mut libs = 0;
        for &pt in &members {
            for n in self.neighbours(pt) {
                if self.state[n] == VertexState::Empty && !liberty_seen[n] {
                    liberty_seen[n] = true;
                    libs += 1;
                }
            }
        }
        libs
    }

    /// Flood-fill the string at `start` into `out`, returning its size.
    fn collect_string(&self, start: Vertex, out: &mut Vec<Vertex>) -> usize {
        let color = self.state[start];
        let mut stack = vec![start];
        let mut visited = vec![false; self.num_vertices];
        let mut count = 0;

        while let Some(pt) = stack.pop() {
            if visited[pt] {
                continue;
            }
            visited[pt] = true;

            if self.state[pt] == color {
                out.push(pt);
                count += 1;
                for n in self.neighbours(pt) {
                    if !visited[n] && self.state[n] == color {
                        stack.push(n);
                    }
                }
            }
        }
        count
    }

    fn check_free_list(&self) -> Result<(), InvariantError> {
        let empties = self
            .vertices()
            .filter(|&v| self.state[v] == VertexState::Empty)
            .count();
        if empties != self.empty_cnt {
            let vertex = self.empty_vertices().first().copied().unwrap_or(0);
            return Err(InvariantError::FreeList { vertex });
        }
        for (idx, &vertex) in self.empty_vertices().iter().enumerate() {
            if self.state[vertex] != VertexState::Empty || self.empty_idx[vertex] != idx {
                return Err(InvariantError::FreeList { vertex });
            }
        }
        Ok(())
    }

    fn check_neighbour_counts(&self) -> Result<(), InvariantError> {
        for vertex in self.vertices() {
            let mut counts = [0u8; 3];
            for n in self.neighbours(vertex) {
                match self.state[n] {
                    VertexState::Black => counts[Color::Black.index()] += 1,
                    VertexState::White => counts[Color::White.index()] += 1,
                    VertexState::Empty => counts[EMPTY_NBR] += 1,
                    VertexState::Invalid => {
                        counts[Color::Black.index()] += 1;
                        counts[Color::White.index()] += 1;
                    }
                }
            }
            if counts != self.nbr_counts[vertex] {
                return Err(InvariantError::NeighbourCount { vertex });
            }
        }
        Ok(())
    }

    fn check_strings(&self) -> Result<(), InvariantError> {
        for vertex in self.vertices() {
            if !self.state[vertex].is_stone() {
                if self.parent[vertex] != NO_GROUP {
                    return Err(InvariantError::StringLinks { vertex });
                }
                continue;
            }

            let mut members = Vec::new();
            let size = self.collect_string(vertex, &mut members);
            let rep = self.parent[vertex];
            if rep == NO_GROUP || members.iter().any(|&m| self.parent[m] != rep) {
                return Err(InvariantError::StringLinks { vertex });
            }

            // the circular list visits exactly the flood-filled members
            let mut walked = Vec::with_capacity(size);
            let mut pos = vertex;
            loop {
                walked.push(pos);
                if walked.len() > size {
                    return Err(InvariantError::StringLinks { vertex });
                }
                pos = self.next[pos];
                if pos == vertex {
                    break;
                }
            }
            walked.sort_unstable();
            members.sort_unstable();
            if walked != members {
                return Err(InvariantError::StringLinks { vertex });
            }

            let actual = self.stones[rep] as usize;
            if actual != size {
                return Err(InvariantError::StoneCount {
                    vertex,
                    expected: size,
                    actual,
                });
            }
            let expected = self.brute_force_liberties(vertex);
            let actual = self.libs[rep] as usize;
            if actual != expected {
                return Err(InvariantError::Liberties {
                    vertex,
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }
}
