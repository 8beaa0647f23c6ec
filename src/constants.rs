//! Grid capacity and special vertex values.
//!
//! The board is a 1D array with one ring of padding around the playable
//! area, so every on-board vertex has four addressable neighbours.
//!
//! # Capacity Configuration
//!
//! The largest supported board is fixed at compile time by a Cargo feature:
//! - `board19x19` (default)
//! - `board13x13`
//! - `board9x9`
//!
//! Any smaller size can be reset into at runtime; all per-vertex arrays are
//! sized for the capacity so boards never allocate after construction.
//! ```sh
//! cargo build                                              # up to 19x19
//! cargo build --no-default-features --features board9x9    # up to 9x9
//! ```

// =============================================================================
// Grid Geometry
// =============================================================================

/// Largest board size (NxN) this build can hold.
#[cfg(feature = "board19x19")]
pub const MAX_SIZE: usize = 19;

#[cfg(feature = "board13x13")]
pub const MAX_SIZE: usize = 13;

#[cfg(feature = "board9x9")]
pub const MAX_SIZE: usize = 9;

#[cfg(any(
    all(feature = "board9x9", feature = "board13x13"),
    all(feature = "board9x9", feature = "board19x19"),
    all(feature = "board13x13", feature = "board19x19"),
))]
compile_error!("Enable exactly one board capacity feature: 'board9x9', 'board13x13' or 'board19x19'");

#[cfg(not(any(feature = "board9x9", feature = "board13x13", feature = "board19x19")))]
compile_error!("Must enable one board capacity feature: 'board9x9', 'board13x13' or 'board19x19'");

/// Row width of the largest grid, padding included.
pub const MAX_SIDE: usize = MAX_SIZE + 2;

/// Number of cells in the largest padded grid.
pub const NUM_VERTICES: usize = MAX_SIDE * MAX_SIDE;

/// Parent value of vertices that do not hold a stone. Indexes the one spare
/// slot at the end of the group arrays.
pub const NO_GROUP: usize = NUM_VERTICES;

// =============================================================================
// Special Vertex Values
// =============================================================================

/// "No vertex" marker. Index 0 is a corner of the padding, never playable.
pub const NO_VERTEX: usize = 0;

/// Pass move marker (outside the grid).
pub const PASS: usize = NUM_VERTICES + 1;

/// Resign move marker.
pub const RESIGN: usize = usize::MAX;

/// Consecutive passes tracked for hashing; further passes saturate.
pub const MAX_PASSES: usize = 4;

/// Number of distinct prisoner hash terms per colour. Counts wrap modulo this.
pub const PRISONER_SLOTS: usize = 2 * NUM_VERTICES;

/// Number of square-board symmetries (rotations and reflections).
pub const NUM_SYMMETRIES: usize = 8;

/// Seed of the default random-constant table.
pub const DEFAULT_ZOBRIST_SEED: u64 = 0x5EED_0F_B0A2D;

/// Hard cap on random playout length (3 times the largest board area).
pub const MAX_GAME_LEN: usize = MAX_SIZE * MAX_SIZE * 3;
