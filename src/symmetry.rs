//! The 8 symmetries of a square board.
//!
//! Symmetry `s` is composed from three bits: bit 2 transposes, bit 1 mirrors
//! x, bit 0 mirrors y. Symmetry 0 is the identity.

use crate::constants::NUM_SYMMETRIES;

/// Map board point `(x, y)` through `symmetry` on a `size` x `size` board.
pub fn get_symmetry((x, y): (usize, usize), symmetry: usize, size: usize) -> (usize, usize) {
    assert!(symmetry < NUM_SYMMETRIES, "symmetry {symmetry} out of range");
    debug_assert!(x < size && y < size);

    let (mut x, mut y) = (x, y);
    if symmetry & 4 != 0 {
        std::mem::swap(&mut x, &mut y);
    }
    if symmetry & 2 != 0 {
        x = size - x - 1;
    }
    if symmetry & 1 != 0 {
        y = size - y - 1;
    }
    (x, y)
}
