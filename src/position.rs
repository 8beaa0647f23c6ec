//! Game state around a board: side to move, passes, move number and komi.
//!
//! [`Position`] is what a search engine clones per branch. Stone placement
//! goes through [`Board::update_board`]; this layer adds pass handling, turn
//! order and the simple-ko legality test, and keeps the consecutive-pass
//! count folded into its hash.

use std::fmt;
use std::sync::Arc;

use crate::board::{Board, BoardError, Color, Vertex, VertexState};
use crate::constants::{MAX_PASSES, NUM_SYMMETRIES, PASS, RESIGN};
use crate::symmetry::get_symmetry;
use crate::zobrist::Zobrist;

#[derive(Clone, Debug)]
pub struct Position {
    board: Board,
    /// Moves played since the start of the game.
    movenum: usize,
    /// Consecutive passes, saturating at `MAX_PASSES`.
    passes: usize,
    last_move: Option<Vertex>,
    komi: f32,
    /// Handicap stones given to Black. Not part of the score.
    handicap: usize,
}

impl Position {
    pub fn new(zobrist: Arc<Zobrist>, size: usize, komi: f32) -> Result<Self, BoardError> {
        Ok(Position {
            board: Board::new(zobrist, size)?,
            movenum: 0,
            passes: 0,
            last_move: None,
            komi,
            handicap: 0,
        })
    }

    /// Clear the board (same size), the game counters and the handicap.
    /// Komi is kept.
    pub fn reset_game(&mut self) {
        let size = self.board.size();
        self.board.clear(size);
        self.movenum = 0;
        self.passes = 0;
        self.last_move = None;
        self.handicap = 0;
    }

    // -- Accessors --

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn movenum(&self) -> usize {
        self.movenum
    }

    pub fn passes(&self) -> usize {
        self.passes
    }

    pub fn last_move(&self) -> Option<Vertex> {
        self.last_move
    }

    pub fn komi(&self) -> f32 {
        self.komi
    }

    pub fn set_komi(&mut self, komi: f32) {
        self.komi = komi;
    }

    pub fn handicap(&self) -> usize {
        self.handicap
    }

    pub fn set_handicap(&mut self, handicap: usize) {
        self.handicap = handicap;
    }

    pub fn to_move(&self) -> Color {
        self.board.to_move()
    }

    pub fn set_to_move(&mut self, color: Color) {
        self.board.set_to_move(color);
    }

    pub fn ko_move(&self) -> Option<Vertex> {
        self.board.ko_move()
    }

    // -- Moves --

    /// Is `vertex` playable for `color`? Pass and resign always are; a board
    /// point must be empty, not the simple-ko point and not suicide.
    pub fn is_move_legal(&self, color: Color, vertex: Vertex) -> bool {
        if vertex == PASS || vertex == RESIGN {
            return true;
        }
        self.board.is_on_board(vertex)
            && Some(vertex) != self.board.ko_move()
            && self.board.state(vertex) == VertexState::Empty
            && !self.board.is_suicide(vertex, color)
    }

    /// Play `vertex` ([`PASS`] and [`RESIGN`] included) for the side to move.
    pub fn play_move(&mut self, vertex: Vertex) {
        self.play_move_as(self.to_move(), vertex);
    }

    /// Play `vertex` for `color`; the opponent moves next.
    ///
    /// [`RESIGN`] ends the game: it is recorded as the last move but leaves
    /// the board, passes and side to move alone.
    ///
    /// # Panics
    /// On an occupied or off-board vertex other than pass and resign.
    pub fn play_move_as(&mut self, color: Color, vertex: Vertex) {
        if vertex == RESIGN {
            self.last_move = Some(vertex);
            self.movenum += 1;
            return;
        }

        if vertex == PASS {
            self.board.clear_ko();
            self.passes = (self.passes + 1).min(MAX_PASSES);
        } else {
            self.board.update_board(color, vertex);
            self.passes = 0;
        }

        self.last_move = Some(vertex);
        self.movenum += 1;
        self.board.set_to_move(color.opponent());
    }

    // -- Hashing --

    /// Position hash including the consecutive-pass count.
    pub fn hash(&self) -> u64 {
        self.board.hash() ^ self.board.zobrist().pass(self.passes)
    }

    /// [`Self::hash`] recomputed from scratch.
    pub fn calc_hash(&self) -> u64 {
        self.board.calc_hash() ^ self.board.zobrist().pass(self.passes)
    }

    pub fn ko_hash(&self) -> u64 {
        self.board.ko_hash()
    }

    /// [`Self::hash`] of the position transformed by `symmetry`.
    pub fn symmetry_hash(&self, symmetry: usize) -> u64 {
        self.board.calc_symmetry_hash(symmetry) ^ self.board.zobrist().pass(self.passes)
    }

    /// Smallest hash over all 8 symmetries, for symmetry-folded cache keys.
    pub fn canonical_hash(&self) -> u64 {
        (0..NUM_SYMMETRIES)
            .map(|s| self.symmetry_hash(s))
            .min()
            .unwrap_or_else(|| self.hash())
    }

    /// Does `symmetry` map the position (stones and ko point) onto itself?
    pub fn is_symmetry_invariant(&self, symmetry: usize) -> bool {
        let board = &self.board;
        let size = board.size();
        let image = |vertex: Vertex| {
            let (x, y) = get_symmetry(board.xy(vertex), symmetry, size);
            board.vertex(x, y)
        };

        if board.vertices().any(|v| board.state(v) != board.state(image(v))) {
            return false;
        }
        match board.ko_move() {
            Some(ko) => image(ko) == ko,
            None => true,
        }
    }

    /// Area score with komi, from Black's point of view.
    pub fn final_score(&self) -> f32 {
        self.board.area_score(self.komi)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Passes: {}            Black (X) Prisoners: {}",
            self.passes,
            self.board.prisoners(Color::Black)
        )?;
        let side = match self.to_move() {
            Color::Black => "Black (X) to move",
            Color::White => "White (O) to move",
        };
        writeln!(
            f,
            "{side}    White (O) Prisoners: {}",
            self.board.prisoners(Color::White)
        )?;
        writeln!(f, "                     Komi: {:.1}", self.komi)?;
        writeln!(f)?;
        write!(f, "{}", self.board)
    }
}
