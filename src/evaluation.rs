//! Match evaluation: a cheap score of how much matchable structure a board holds.
//!
//! The score is only a relative ranking signal between candidate moves within one
//! search. It does not reproduce the puzzle's real scoring, and it does not clear
//! matches or simulate cascades.

use crate::engine::{Board, Tile, BOARD_SIZE};

/// Number of identical tiles, counting the origin, a run needs before it scores.
pub const MATCH_THRESHOLD: u32 = 3;

/// Longest run measured from a single origin cell. Longer runs are reported as this length.
pub const RUN_LOOKAHEAD: usize = 5;

/// Length of the run of `tile` starting at `(r, c)` and stepping by `(dr, dc)`.
///
/// The origin always counts. Scanning stops at the first differing cell, the board
/// edge, or after `RUN_LOOKAHEAD` cells.
fn run_length(board: &Board, r: usize, c: usize, dr: usize, dc: usize, tile: Tile) -> u32 {
    let mut run = 1;
    for i in 1..RUN_LOOKAHEAD {
        let (nr, nc) = (r + dr * i, c + dc * i);
        if nr >= BOARD_SIZE || nc >= BOARD_SIZE || board.get_tile(nr, nc) != tile {
            break;
        }
        run += 1;
    }
    run
}

/// Rightward run length from `(r, c)`, capped at `RUN_LOOKAHEAD`. Zero for an empty cell.
pub fn right_run(board: &Board, r: usize, c: usize) -> u32 {
    let tile = board.get_tile(r, c);
    if !tile.is_colored() {
        return 0;
    }
    run_length(board, r, c, 0, 1, tile)
}

/// Downward run length from `(r, c)`, capped at `RUN_LOOKAHEAD`. Zero for an empty cell.
pub fn down_run(board: &Board, r: usize, c: usize) -> u32 {
    let tile = board.get_tile(r, c);
    if !tile.is_colored() {
        return 0;
    }
    run_length(board, r, c, 1, 0, tile)
}

/// Scores a full board snapshot.
///
/// Every colored cell contributes its right run and its down run, each only when it
/// reaches `MATCH_THRESHOLD`. Runs overlap: in a row of four reds the first cell
/// contributes 4 and the second contributes 3.
///
/// # Examples
/// ```
/// use bejeweled_solver::evaluation::evaluate_state;
/// use bejeweled_solver::utils::board_from_str_array;
///
/// let board = board_from_str_array(&["RRR"]).unwrap();
/// assert_eq!(evaluate_state(&board), 3);
/// ```
pub fn evaluate_state(board: &Board) -> u32 {
    let mut score = 0;

    for r in 0..BOARD_SIZE {
        for c in 0..BOARD_SIZE {
            let right = right_run(board, r, c);
            if right >= MATCH_THRESHOLD {
                score += right;
            }
            let down = down_run(board, r, c);
            if down >= MATCH_THRESHOLD {
                score += down;
            }
        }
    }

    score
}
