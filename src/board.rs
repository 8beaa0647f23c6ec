//! Grid Store: padded vertex array, neighbour counts and the empty free-list.
//!
//! The board is a 1D array with one ring of [`VertexState::Invalid`] cells
//! around the playable area, so neighbour access never needs a bounds
//! check. Group bookkeeping lives in [`crate::strings`], hashing in
//! [`crate::hash`] and the move engine in [`crate::update`]; they all work
//! on the fields of [`Board`] defined here.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::constants::{MAX_SIZE, NO_GROUP, NUM_VERTICES, PASS, RESIGN};
use crate::zobrist::Zobrist;

/// A cell of the padded grid, represented as an index into the 1D arrays.
pub type Vertex = usize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Index into per-colour arrays (prisoners, neighbour counts).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Color::Black => 0,
            Color::White => 1,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum VertexState {
    Black,
    White,
    Empty,
    /// Padding outside the playable area.
    Invalid,
}

impl VertexState {
    #[inline]
    pub fn index(self) -> usize {
        match self {
            VertexState::Black => 0,
            VertexState::White => 1,
            VertexState::Empty => 2,
            VertexState::Invalid => 3,
        }
    }

    #[inline]
    pub fn color(self) -> Option<Color> {
        match self {
            VertexState::Black => Some(Color::Black),
            VertexState::White => Some(Color::White),
            _ => None,
        }
    }

    #[inline]
    pub fn is_stone(self) -> bool {
        self.color().is_some()
    }
}

impl From<Color> for VertexState {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => VertexState::Black,
            Color::White => VertexState::White,
        }
    }
}

/// Recoverable errors of the board API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("unsupported board size {size} (this build holds 1..={max})", max = MAX_SIZE)]
    UnsupportedSize { size: usize },
    #[error("invalid coordinate '{0}'")]
    InvalidCoordinate(String),
}

/// Index of the empty count in a vertex's neighbour counts.
pub(crate) const EMPTY_NBR: usize = 2;

/// A Go board with incremental group, liberty and hash bookkeeping.
///
/// Cloning makes a fully independent copy; only the random-constant table is
/// shared.
#[derive(Clone)]
pub struct Board {
    pub(crate) zobrist: Arc<Zobrist>,
    /// Playable size (NxN).
    pub(crate) size: usize,
    /// Row width including padding (`size + 2`).
    pub(crate) side: usize,
    /// Cells in use of the padded grid (`side * side`).
    pub(crate) num_vertices: usize,
    /// Offsets to the orthogonal neighbours: North, East, South, West.
    pub(crate) dirs: [isize; 4],
    pub(crate) state: [VertexState; NUM_VERTICES],
    /// Black / white / empty neighbour counts. Padding counts as both colours.
    pub(crate) nbr_counts: [[u8; 3]; NUM_VERTICES],
    /// Next stone of the same string, circular.
    pub(crate) next: [Vertex; NUM_VERTICES + 1],
    /// String representative; `NO_GROUP` for non-stones.
    pub(crate) parent: [Vertex; NUM_VERTICES + 1],
    /// Liberties, valid at representatives.
    pub(crate) libs: [u16; NUM_VERTICES + 1],
    /// Stone count, valid at representatives.
    pub(crate) stones: [u16; NUM_VERTICES + 1],
    /// Dense list of empty vertices, `empty[..empty_cnt]`.
    pub(crate) empty: [Vertex; NUM_VERTICES],
    /// Position of each empty vertex inside `empty`.
    pub(crate) empty_idx: [usize; NUM_VERTICES],
    pub(crate) empty_cnt: usize,
    /// Stones captured by each colour.
    pub(crate) prisoners: [u32; 2],
    pub(crate) to_move: Color,
    pub(crate) ko_move: Option<Vertex>,
    pub(crate) hash: u64,
    pub(crate) ko_hash: u64,
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("size", &self.size)
            .field("to_move", &self.to_move)
            .field("prisoners", &self.prisoners)
            .field("ko_move", &self.ko_move)
            .field("hash", &format_args!("{:016X}", self.hash))
            .field("ko_hash", &format_args!("{:016X}", self.ko_hash))
            .finish_non_exhaustive()
    }
}

impl Board {
    /// Create an empty `size` x `size` board hashing with `zobrist`.
    pub fn new(zobrist: Arc<Zobrist>, size: usize) -> Result<Self, BoardError> {
        let mut board = Board {
            zobrist,
            size: 0,
            side: 2,
            num_vertices: 4,
            dirs: [0; 4],
            state: [VertexState::Invalid; NUM_VERTICES],
            nbr_counts: [[0; 3]; NUM_VERTICES],
            next: [NO_GROUP; NUM_VERTICES + 1],
            parent: [NO_GROUP; NUM_VERTICES + 1],
            libs: [0; NUM_VERTICES + 1],
            stones: [0; NUM_VERTICES + 1],
            empty: [0; NUM_VERTICES],
            empty_idx: [0; NUM_VERTICES],
            empty_cnt: 0,
            prisoners: [0; 2],
            to_move: Color::Black,
            ko_move: None,
            hash: 0,
            ko_hash: 0,
        };
        board.reset_board(size)?;
        Ok(board)
    }

    /// Reset to an empty `size` x `size` board with Black to move, no
    /// prisoners and no ko, and recompute both hashes from scratch.
    pub fn reset_board(&mut self, size: usize) -> Result<(), BoardError> {
        if size == 0 || size > MAX_SIZE {
            return Err(BoardError::UnsupportedSize { size });
        }
        self.clear(size);
        debug!(size, hash = self.hash, "board reset");
        Ok(())
    }

    /// Reset layout for an already validated size.
    pub(crate) fn clear(&mut self, size: usize) {
        let side = size + 2;
        self.size = size;
        self.side = side;
        self.num_vertices = side * side;
        self.dirs = [-(side as isize), 1, side as isize, -1];

        self.to_move = Color::Black;
        self.prisoners = [0; 2];
        self.ko_move = None;
        self.empty_cnt = 0;

        self.state.fill(VertexState::Invalid);
        self.nbr_counts.fill([0; 3]);
        self.next.fill(NO_GROUP);
        self.parent.fill(NO_GROUP);
        self.libs.fill(0);
        self.stones.fill(0);

        for y in 0..size {
            for x in 0..size {
                let vertex = self.vertex(x, y);
                self.state[vertex] = VertexState::Empty;
                self.push_empty(vertex);
            }
        }
        for y in 0..size {
            for x in 0..size {
                let vertex = self.vertex(x, y);
                for n in self.neighbours(vertex) {
                    let counts = &mut self.nbr_counts[vertex];
                    match self.state[n] {
                        VertexState::Invalid => {
                            counts[Color::Black.index()] += 1;
                            counts[Color::White.index()] += 1;
                        }
                        _ => counts[EMPTY_NBR] += 1,
                    }
                }
            }
        }

        self.hash = self.calc_hash();
        self.ko_hash = self.calc_ko_hash();
    }

    // -- Accessors --

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn zobrist(&self) -> &Arc<Zobrist> {
        &self.zobrist
    }

    /// Number of cells of the padded grid in use.
    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    pub fn to_move(&self) -> Color {
        self.to_move
    }

    pub fn prisoners(&self, color: Color) -> u32 {
        self.prisoners[color.index()]
    }

    /// Vertex a single-stone recapture is forbidden on, if any.
    pub fn ko_move(&self) -> Option<Vertex> {
        self.ko_move
    }

    pub fn hash(&self) -> u64 {
        self.hash
    }

    pub fn ko_hash(&self) -> u64 {
        self.ko_hash
    }

    #[inline]
    pub fn state(&self, vertex: Vertex) -> VertexState {
        self.state[vertex]
    }

    #[inline]
    pub fn state_at(&self, x: usize, y: usize) -> VertexState {
        self.state[self.vertex(x, y)]
    }

    /// The empty vertices, in free-list order.
    pub fn empty_vertices(&self) -> &[Vertex] {
        &self.empty[..self.empty_cnt]
    }

    pub fn empty_count(&self) -> usize {
        self.empty_cnt
    }

    /// Number of black (or white, or empty) orthogonal neighbours. The edge
    /// counts as both colours.
    #[inline]
    pub fn neighbour_count(&self, vertex: Vertex, state: VertexState) -> usize {
        self.nbr_counts[vertex][state.index()] as usize
    }

    pub fn stone_count(&self) -> usize {
        self.size * self.size - self.empty_cnt
    }

    // -- Geometry --

    /// Vertex of board point `(x, y)`; `(0, 0)` is A1.
    #[inline]
    pub fn vertex(&self, x: usize, y: usize) -> Vertex {
        debug_assert!(x < self.size && y < self.size);
        (y + 1) * self.side + (x + 1)
    }

    /// Board point of an on-board vertex.
    #[inline]
    pub fn xy(&self, vertex: Vertex) -> (usize, usize) {
        debug_assert!(self.is_on_board(vertex));
        (vertex % self.side - 1, vertex / self.side - 1)
    }

    #[inline]
    pub fn is_on_board(&self, vertex: Vertex) -> bool {
        vertex < self.num_vertices && self.state[vertex] != VertexState::Invalid
    }

    /// The 4 orthogonal neighbours (N, E, S, W) of a vertex.
    #[inline]
    pub fn neighbours(&self, vertex: Vertex) -> [Vertex; 4] {
        std::array::from_fn(|k| (vertex as isize + self.dirs[k]) as usize)
    }

    /// The 4 diagonal neighbours (NE, SE, SW, NW) of a vertex.
    #[inline]
    pub fn diagonals(&self, vertex: Vertex) -> [Vertex; 4] {
        let side = self.side as isize;
        [-side + 1, side + 1, side - 1, -side - 1].map(|d| (vertex as isize + d) as usize)
    }

    /// Iterate every on-board vertex, row by row from A1.
    pub fn vertices(&self) -> impl Iterator<Item = Vertex> + '_ {
        (0..self.size).flat_map(move |y| (0..self.size).map(move |x| self.vertex(x, y)))
    }

    // -- Free-list --

    #[inline]
    pub(crate) fn push_empty(&mut self, vertex: Vertex) {
        self.empty_idx[vertex] = self.empty_cnt;
        self.empty[self.empty_cnt] = vertex;
        self.empty_cnt += 1;
    }

    /// Swap-remove `vertex` from the free-list.
    #[inline]
    pub(crate) fn take_empty(&mut self, vertex: Vertex) {
        self.empty_cnt -= 1;
        let last = self.empty[self.empty_cnt];
        let idx = self.empty_idx[vertex];
        self.empty_idx[last] = idx;
        self.empty[idx] = last;
    }

    // -- Text coordinates --

    /// Convert a vertex to text (e.g. "D4"). Columns skip 'I'.
    pub fn move_to_text(&self, vertex: Vertex) -> String {
        match vertex {
            PASS => "pass".into(),
            RESIGN => "resign".into(),
            v if self.is_on_board(v) => {
                let (x, y) = self.xy(v);
                let mut c = b'A' + x as u8;
                if c >= b'I' {
                    c += 1;
                }
                format!("{}{}", c as char, y + 1)
            }
            _ => "error".into(),
        }
    }

    /// Parse a text coordinate ("D4", "pass", "resign") into a vertex.
    pub fn text_to_move(&self, text: &str) -> Result<Vertex, BoardError> {
        let invalid = || BoardError::InvalidCoordinate(text.to_string());
        let text = text.trim();
        if text.eq_ignore_ascii_case("pass") {
            return Ok(PASS);
        }
        if text.eq_ignore_ascii_case("resign") {
            return Ok(RESIGN);
        }

        let mut chars = text.chars();
        let col = chars.next().ok_or_else(invalid)?.to_ascii_uppercase();
        if !col.is_ascii_uppercase() || col == 'I' {
            return Err(invalid());
        }
        let mut x = (col as u8 - b'A') as usize;
        if col > 'I' {
            x -= 1;
        }
        let row: usize = chars.as_str().parse().map_err(|_| invalid())?;
        if row == 0 || row > self.size || x >= self.size {
            return Err(invalid());
        }
        Ok(self.vertex(x, row - 1))
    }

    fn column_labels(&self) -> String {
        (0..self.size)
            .map(|x| {
                let c = b'a' + x as u8;
                let c = if c >= b'i' { c + 1 } else { c };
                format!("{} ", c as char)
            })
            .collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "   {}", self.column_labels())?;
        for y in (0..self.size).rev() {
            write!(f, "{:2} ", y + 1)?;
            for x in 0..self.size {
                let vertex = self.vertex(x, y);
                let ch = match self.state[vertex] {
                    VertexState::Black => 'X',
                    VertexState::White => 'O',
                    _ if self.ko_move == Some(vertex) => '*',
                    _ => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f, "{:2}", y + 1)?;
        }
        writeln!(f, "   {}", self.column_labels())?;
        writeln!(f)?;
        writeln!(f, "Hash: {:X} Ko-Hash: {:X}", self.hash, self.ko_hash)
    }
}
