//! Integration tests for fullboard
//!
//! Scenario tests for captures, ko, merging, scoring and hashing through the
//! public API.

use std::sync::Arc;

use fullboard::constants::{DEFAULT_ZOBRIST_SEED, NUM_SYMMETRIES, PASS};
use fullboard::{Board, Color, Position, Vertex, VertexState, Zobrist};

// =============================================================================
// Helper functions
// =============================================================================

fn zobrist() -> Arc<Zobrist> {
    Zobrist::shared(DEFAULT_ZOBRIST_SEED)
}

fn vertex(board: &Board, text: &str) -> Vertex {
    board.text_to_move(text).unwrap()
}

/// Play the moves alternately, Black first. "pass" passes.
fn setup_position(size: usize, moves: &[&str]) -> Position {
    let mut pos = Position::new(zobrist(), size, 7.5).unwrap();
    for mv in moves {
        let v = vertex(pos.board(), mv);
        assert!(pos.is_move_legal(pos.to_move(), v), "illegal setup move {mv}");
        pos.play_move(v);
    }
    pos
}

/// Place stones directly with `update_board`.
fn setpos(size: usize, black: &[&str], white: &[&str]) -> Board {
    let mut board = Board::new(zobrist(), size).unwrap();
    for t in black {
        let v = vertex(&board, t);
        board.update_board(Color::Black, v);
    }
    for t in white {
        let v = vertex(&board, t);
        board.update_board(Color::White, v);
    }
    board
}

fn assert_hashes_match(board: &Board) {
    assert_eq!(board.hash(), board.calc_hash(), "position hash drifted");
    assert_eq!(board.ko_hash(), board.calc_ko_hash(), "ko hash drifted");
}

// =============================================================================
// Captures and ko
// =============================================================================

#[test]
fn test_edge_ko_on_5x5() {
    // black C1 sits in a one-eye shape on the first line; white D1 takes it
    let mut pos = setup_position(5, &["C1", "B1", "D2", "C2", "E1"]);
    let prisoners_before = pos.board().prisoners(Color::White);
    let d1 = vertex(pos.board(), "D1");
    pos.play_move(d1);

    let board = pos.board();
    let c1 = vertex(board, "C1");
    assert_eq!(board.state(c1), VertexState::Empty);
    assert_eq!(board.prisoners(Color::White), prisoners_before + 1);
    assert_eq!(board.ko_move(), Some(c1));
    assert_hashes_match(board);
    assert!(!pos.is_move_legal(Color::Black, c1));
}

#[test]
fn test_ko_vertex_needs_eye_play() {
    // same single capture, but the capturing stone has an empty neighbour
    let mut board = setpos(5, &["C3"], &["B3", "C4", "D3"]);
    let c2 = vertex(&board, "C2");
    let ko = board.update_board(Color::White, c2);
    assert_eq!(ko, None);
    assert_eq!(board.prisoners(Color::White), 1);
    assert_hashes_match(&board);
}

#[test]
fn test_multi_stone_capture_is_not_ko() {
    // two black stones captured by a move into black's eye
    let mut board = setpos(5, &["B1", "C1", "E1", "D2"], &["A1", "B2", "C2"]);
    let d1 = vertex(&board, "D1");
    let ko = board.update_board(Color::White, d1);
    assert_eq!(ko, None);
    assert_eq!(board.prisoners(Color::White), 2);
    for t in ["B1", "C1"] {
        assert_eq!(board.state(vertex(&board, t)), VertexState::Empty);
    }
    board.check_invariants().unwrap();
}

#[test]
fn test_capture_credits_exact_stone_count() {
    let mut board = setpos(
        9,
        &["C3", "D3", "E3", "C4"],
        &["B3", "B4", "C5", "D4", "E4", "F3", "C2", "D2"],
    );
    let before = board.prisoners(Color::White);
    let empties = board.empty_count();
    let e2 = vertex(&board, "E2");
    board.update_board(Color::White, e2);
    assert_eq!(board.prisoners(Color::White), before + 4);
    assert_eq!(board.empty_count(), empties - 1 + 4);
    assert_eq!(board.prisoners(Color::Black), 0);
    board.check_invariants().unwrap();
}

#[test]
fn test_suicide_never_credits_prisoners() {
    let mut board = setpos(9, &["A2", "B1"], &[]);
    let a1 = vertex(&board, "A1");
    assert!(board.is_suicide(a1, Color::White));
    board.update_board(Color::White, a1);
    assert_eq!(board.state(a1), VertexState::Empty);
    assert_eq!(board.prisoners(Color::White), 0);
    assert_eq!(board.prisoners(Color::Black), 0);
    board.check_invariants().unwrap();
}

#[test]
fn test_capture_restores_liberties_of_neighbours() {
    // the white stones around the captured black stone regain the point
    let mut board = setpos(9, &["E5"], &["E6", "D5", "F5"]);
    let e6 = vertex(&board, "E6");
    assert_eq!(board.string_liberties(e6), 3);
    let e4 = vertex(&board, "E4");
    board.update_board(Color::White, e4);
    assert_eq!(board.string_liberties(e6), 4);
    board.check_invariants().unwrap();
}

// =============================================================================
// Strings
// =============================================================================

#[test]
fn test_merge_two_and_five() {
    let mut board = setpos(9, &["B3", "C3", "E3", "E4", "E5", "E6", "E7"], &[]);
    let b3 = vertex(&board, "B3");
    let e3 = vertex(&board, "E3");
    assert_eq!(board.string_size(b3), 2);
    assert_eq!(board.string_size(e3), 5);

    let d3 = vertex(&board, "D3");
    board.update_board(Color::Black, d3);
    assert_eq!(board.string_size(b3), 8);
    assert_eq!(board.parent(b3), board.parent(e3));
    assert_eq!(board.string_liberties(b3), board.brute_force_liberties(b3));
    board.check_invariants().unwrap();
}

#[test]
fn test_merge_into_seven() {
    // the placed stone plus a lone stone form 2, joined with a string of 5
    let mut board = setpos(9, &["A5", "C5", "D5", "E5", "F5", "G5"], &[]);
    let b5 = vertex(&board, "B5");
    board.update_board(Color::Black, b5);
    assert_eq!(board.string_size(b5), 7);
    assert_eq!(board.string_stones(b5).len(), 7);
    assert_eq!(board.string_liberties(b5), board.brute_force_liberties(b5));
    board.check_invariants().unwrap();
}

#[test]
fn test_merge_around_shared_liberties() {
    // E4 joins two columns; E5 touches both and the new stone but counts once
    let mut board = setpos(9, &["D4", "D5", "D6", "F4", "F5", "F6"], &[]);
    let d4 = vertex(&board, "D4");
    let f4 = vertex(&board, "F4");
    assert_ne!(board.parent(d4), board.parent(f4));

    let e4 = vertex(&board, "E4");
    board.update_board(Color::Black, e4);
    assert_eq!(board.parent(d4), board.parent(f4));
    assert_eq!(board.string_size(e4), 7);
    assert_eq!(board.string_liberties(e4), board.brute_force_liberties(e4));
    board.check_invariants().unwrap();
}

// =============================================================================
// Hashing
// =============================================================================

#[test]
fn test_hash_depends_on_move_context_but_ko_hash_does_not() {
    // same stones, different side to move and pass count
    let a = setup_position(9, &["C3", "G7"]);
    let b = setup_position(9, &["C3", "G7", "pass"]);
    assert_eq!(a.ko_hash(), b.ko_hash());
    assert_ne!(a.hash(), b.hash());
    assert_ne!(a.board().hash(), b.board().hash());
}

#[test]
fn test_transpositions_share_hash() {
    let a = setup_position(9, &["C3", "G7", "D4", "F6"]);
    let b = setup_position(9, &["D4", "F6", "C3", "G7"]);
    assert_eq!(a.hash(), b.hash());
    assert_eq!(a.board().ko_hash(), b.board().ko_hash());
}

#[test]
fn test_prisoners_enter_position_hash() {
    // same stones on the board, but only `a` captured to get there
    let a = setpos(9, &["A1"], &["A2", "B1"]);
    let b = setpos(9, &[], &["A2", "B1"]);
    assert_eq!(a.prisoners(Color::White), 1);
    assert_eq!(b.prisoners(Color::White), 0);
    assert_eq!(a.ko_hash(), b.ko_hash());
    assert_ne!(a.hash(), b.hash());
    assert_hashes_match(&a);
    assert_hashes_match(&b);
}

#[test]
fn test_symmetry_hash_of_rotated_position() {
    // white C3 / black D7 and their transposes
    let a = setup_position(9, &["D7", "C3"]);
    let b = setup_position(9, &["G4", "C3"]);
    let found = (0..NUM_SYMMETRIES).any(|s| a.symmetry_hash(s) == b.hash());
    assert!(found);
    assert_eq!(a.canonical_hash(), b.canonical_hash());
}

#[test]
fn test_clones_are_independent() {
    let a = setup_position(9, &["C3", "D4"]);
    let mut b = a.clone();
    let e5 = vertex(b.board(), "E5");
    b.play_move(e5);
    assert_eq!(a.board().state(e5), VertexState::Empty);
    assert_eq!(a.movenum(), 2);
    assert_ne!(a.hash(), b.hash());
    assert_eq!(a.hash(), a.calc_hash());
    assert_eq!(b.hash(), b.calc_hash());
}

#[test]
fn test_zobrist_shared_between_threads() {
    let pos = setup_position(9, &["C3", "D4"]);
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let mut branch = pos.clone();
            std::thread::spawn(move || {
                let v = branch.board().vertex(i, 8);
                branch.play_move(v);
                branch.hash() == branch.calc_hash()
            })
        })
        .collect();
    for h in handles {
        assert!(h.join().unwrap());
    }
}

// =============================================================================
// Scoring
// =============================================================================

#[test]
fn test_scoring_identical_boards() {
    let live = setpos(5, &["B2", "B3", "B4"], &["D2", "D3", "D4"]);
    let mut board = live.clone();
    assert!(board.remove_dead_stones(&live));
    assert_eq!(board.stone_count(), 6);
    assert_eq!(board.hash(), live.hash());
}

#[test]
fn test_scoring_removes_recoloured_lone_stone() {
    let live = setpos(5, &["B2", "B3", "B4"], &["D2", "D3", "D4", "A1"]);
    // terminal sample: the white stone at A1 died
    let terminal = setpos(5, &["B2", "B3", "B4", "A1"], &["D2", "D3", "D4"]);
    let mut board = live.clone();
    assert!(board.remove_dead_stones(&terminal));
    assert_eq!(board.state(vertex(&board, "A1")), VertexState::Empty);
    assert_eq!(board.stone_count(), 6);
    assert_eq!(board.prisoners(Color::Black), 1);
    board.check_invariants().unwrap();
}

#[test]
fn test_scoring_rejects_split_string() {
    let live = setpos(5, &["B2", "B3", "B4"], &["D2", "D3", "D4"]);
    // terminal recolours only B4 of the three-stone string
    let terminal = setpos(5, &["B2", "B3"], &["D2", "D3", "D4", "B4"]);
    let mut board = live.clone();
    assert!(!board.remove_dead_stones(&terminal));
    assert_eq!(board.state(vertex(&board, "B2")), VertexState::Empty);
    board.check_invariants().unwrap();
}

#[test]
fn test_score_after_pass_pass() {
    let mut pos = setup_position(
        5,
        &["C1", "pass", "C2", "pass", "C3", "pass", "C4", "pass", "C5"],
    );
    pos.play_move(PASS);
    assert_eq!(pos.final_score(), 25.0 - 7.5);
}
