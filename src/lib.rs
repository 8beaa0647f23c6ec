//! Fullboard: an incremental Go board for tree search.
//!
//! The board keeps strings (connected groups), their liberties, captures,
//! simple ko and two Zobrist hashes up to date in O(1) amortized work per
//! move, so a search can clone and play millions of positions per second.
//!
//! ## Modules
//!
//! - [`constants`] - Grid capacity and special vertex values
//! - [`board`] - Grid store: padded vertex array, free-list, coordinates
//! - [`strings`] - Strings as embedded circular lists with liberty counts
//! - [`zobrist`] / [`hash`] - Random-constant table and hash maintenance
//! - [`update`] - The move/capture engine
//! - [`scoring`] - Dead-stone removal and area scoring
//! - [`position`] - Game state: turn, passes, ko legality
//! - [`symmetry`] - The 8 board symmetries
//! - [`verify`] - Brute-force invariant checks
//! - [`playout`] - Random playouts
//!
//! ## Example
//!
//! ```
//! use fullboard::position::Position;
//! use fullboard::zobrist::Zobrist;
//! use fullboard::constants::DEFAULT_ZOBRIST_SEED;
//!
//! let zobrist = Zobrist::shared(DEFAULT_ZOBRIST_SEED);
//! let mut pos = Position::new(zobrist, 9, 7.5).unwrap();
//!
//! let d4 = pos.board().text_to_move("D4").unwrap();
//! pos.play_move(d4);
//!
//! assert_eq!(pos.hash(), pos.calc_hash());
//! assert_eq!(pos.board().string_liberties(d4), 4);
//! ```

pub mod board;
pub mod constants;
pub mod hash;
pub mod playout;
pub mod position;
pub mod scoring;
pub mod strings;
pub mod symmetry;
pub mod update;
pub mod verify;
pub mod zobrist;

pub use board::{Board, BoardError, Color, Vertex, VertexState};
pub use position::Position;
pub use verify::InvariantError;
pub use zobrist::Zobrist;
