//! Move search: find the single adjacent swap that maximizes `evaluate_state`.
//!
//! Candidates are generated in a fixed order (bottom row first, left to right, the
//! right-swap before the down-swap) and the first candidate with the greatest score
//! wins. The sequential search swaps in place on the caller's board and swaps back;
//! the parallel search gives every candidate its own copy of the board.

use crate::engine::{Board, Coord, BOARD_SIZE};
use crate::evaluation::evaluate_state;
use log::debug;
use rayon::prelude::*;
use std::fmt;

/// Direction of a canonical swap, seen from the origin cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    Down,
}

/// A swap between two adjacent cells, `(src_row, src_col) -> (dst_row, dst_col)`.
///
/// Moves are only built through [`Move::new`], so the destination is always the
/// right or lower neighbour of the source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub src_row: usize,
    pub src_col: usize,
    pub dst_row: usize,
    pub dst_col: usize,
}

impl Move {
    /// Builds the move swapping `(row, col)` with its neighbour in `direction`.
    ///
    /// # Panics
    /// Panics if the neighbour would fall off the board.
    pub fn new(row: usize, col: usize, direction: Direction) -> Self {
        let (dst_row, dst_col) = match direction {
            Direction::Right => (row, col + 1),
            Direction::Down => (row + 1, col),
        };
        assert!(
            dst_row < BOARD_SIZE && dst_col < BOARD_SIZE,
            "move from ({}, {}) {:?} leaves the board",
            row,
            col,
            direction
        );
        Move {
            src_row: row,
            src_col: col,
            dst_row,
            dst_col,
        }
    }

    pub fn src(&self) -> Coord {
        (self.src_row, self.src_col)
    }

    pub fn dst(&self) -> Coord {
        (self.dst_row, self.dst_col)
    }

    pub fn direction(&self) -> Direction {
        if self.dst_row == self.src_row {
            Direction::Right
        } else {
            Direction::Down
        }
    }

    /// The move as the four coordinates `(src_row, src_col, dst_row, dst_col)`.
    pub fn as_tuple(&self) -> (usize, usize, usize, usize) {
        (self.src_row, self.src_col, self.dst_row, self.dst_col)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}] -> [{}, {}]",
            self.src_row, self.src_col, self.dst_row, self.dst_col
        )
    }
}

/// A candidate move together with the score of the board after the swap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveEval {
    pub mv: Move,
    pub score: u32,
}

/// Which search implementation to run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SearchMode {
    /// Swap, score and swap back on the caller's board, one candidate at a time.
    #[default]
    Sequential,
    /// Score every candidate on its own board copy using the rayon pool.
    Parallel,
}

/// Lists every candidate move in tie-break order.
///
/// Rows are visited from the bottom (7) to the top (0), columns from left to right.
/// Each colored cell yields its right-swap (if not in the last column) and then its
/// down-swap (if not in the last row). Empty cells yield nothing, although they can
/// still be the destination of a neighbour's move.
pub fn candidate_moves(board: &Board) -> Vec<Move> {
    let mut moves = Vec::new();

    for row in (0..BOARD_SIZE).rev() {
        for col in 0..BOARD_SIZE {
            if !board.get_tile(row, col).is_colored() {
                continue;
            }
            if col < BOARD_SIZE - 1 {
                moves.push(Move::new(row, col, Direction::Right));
            }
            if row < BOARD_SIZE - 1 {
                moves.push(Move::new(row, col, Direction::Down));
            }
        }
    }

    moves
}

/// Scores the board as it would be after `mv`, then restores it.
///
/// The board is mutated only between the two swaps; on return it is identical to
/// its state on entry.
pub fn evaluate_move(board: &mut Board, mv: Move) -> u32 {
    board.swap(mv.src(), mv.dst());
    let score = evaluate_state(board);
    board.swap(mv.src(), mv.dst());
    score
}

/// Picks the winning evaluation from a slice in generation order.
///
/// The greatest score wins and, among equal scores, the earliest entry. Scores of
/// zero never win: a swap that leaves no run of `MATCH_THRESHOLD` anywhere on the
/// board is not worth playing.
pub fn select_best(evals: &[MoveEval]) -> Option<MoveEval> {
    let mut best: Option<MoveEval> = None;
    for eval in evals {
        let best_score = best.map_or(0, |b| b.score);
        if eval.score > best_score {
            best = Some(*eval);
        }
    }
    best
}

/// Evaluates every candidate sequentially, returning `(move, score)` in generation order.
pub fn rank_moves(board: &mut Board) -> Vec<MoveEval> {
    candidate_moves(board)
        .into_iter()
        .map(|mv| MoveEval {
            mv,
            score: evaluate_move(board, mv),
        })
        .collect()
}

/// Evaluates every candidate on the rayon pool, returning `(move, score)` in generation order.
///
/// Each task clones the snapshot before swapping, so the tasks share nothing mutable
/// and the caller's board is never touched.
pub fn rank_moves_parallel(board: &Board) -> Vec<MoveEval> {
    candidate_moves(board)
        .into_par_iter()
        .map(|mv| {
            let mut private = board.clone();
            MoveEval {
                mv,
                score: evaluate_move(&mut private, mv),
            }
        })
        .collect()
}

/// Finds the best single swap, searching sequentially on `board`.
///
/// Returns `None` when the board has no colored tile, or when no swap produces any
/// scoring run.
///
/// # Examples
/// ```
/// use bejeweled_solver::search::find_optimal_move;
/// use bejeweled_solver::utils::board_from_str_array;
///
/// let mut board = board_from_str_array(&["", "", "", "", "", "..R", "..R", "RRB"]).unwrap();
/// let best = find_optimal_move(&mut board).unwrap();
/// assert_eq!(best.as_tuple(), (7, 1, 7, 2));
/// ```
pub fn find_optimal_move(board: &mut Board) -> Option<Move> {
    let evals = rank_moves(board);
    let best = select_best(&evals);
    log_result(&evals, best, SearchMode::Sequential);
    best.map(|eval| eval.mv)
}

/// Parallel counterpart of [`find_optimal_move`], with the same result on every board.
pub fn find_optimal_move_parallel(board: &Board) -> Option<Move> {
    let evals = rank_moves_parallel(board);
    let best = select_best(&evals);
    log_result(&evals, best, SearchMode::Parallel);
    best.map(|eval| eval.mv)
}

/// Runs the search selected by `mode`.
pub fn find_move(board: &mut Board, mode: SearchMode) -> Option<Move> {
    match mode {
        SearchMode::Sequential => find_optimal_move(board),
        SearchMode::Parallel => find_optimal_move_parallel(board),
    }
}

fn log_result(evals: &[MoveEval], best: Option<MoveEval>, mode: SearchMode) {
    match best {
        Some(eval) => debug!(
            "{:?} search: {} candidates, best {} scores {}",
            mode,
            evals.len(),
            eval.mv,
            eval.score
        ),
        None => debug!("{:?} search: {} candidates, no scoring move", mode, evals.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Tile;
    use crate::utils::board_from_str_array;

    fn scenario_board() -> Board {
        board_from_str_array(&["", "", "", "", "", "..R", "..R", "RRB"]).unwrap()
    }

    #[test]
    fn test_move_new_and_accessors() {
        let right = Move::new(7, 1, Direction::Right);
        assert_eq!(right.as_tuple(), (7, 1, 7, 2));
        assert_eq!(right.direction(), Direction::Right);

        let down = Move::new(2, 3, Direction::Down);
        assert_eq!(down.src(), (2, 3));
        assert_eq!(down.dst(), (3, 3));
        assert_eq!(down.direction(), Direction::Down);
        assert_eq!(down.to_string(), "[2, 3] -> [3, 3]");
    }

    #[test]
    #[should_panic]
    fn test_move_off_board_panics() {
        Move::new(0, BOARD_SIZE - 1, Direction::Right);
    }

    #[test]
    fn test_candidate_order_bottom_row_first() {
        let mut board = Board::new_empty();
        board.set_tile(7, 0, Tile::Red);
        board.set_tile(6, 7, Tile::Blue);
        board.set_tile(0, 0, Tile::Green);

        let moves: Vec<_> = candidate_moves(&board).iter().map(Move::as_tuple).collect();
        assert_eq!(
            moves,
            vec![
                (7, 0, 7, 1), // bottom row: right only
                (6, 7, 7, 7), // last column: down only
                (0, 0, 0, 1), // right before down
                (0, 0, 1, 0),
            ]
        );
    }

    #[test]
    fn test_full_board_candidate_count() {
        let board = Board::new_random_with_seed(7);
        assert_eq!(candidate_moves(&board).len(), 2 * BOARD_SIZE * (BOARD_SIZE - 1));
    }

    #[test]
    fn test_empty_origin_generates_nothing() {
        assert!(candidate_moves(&Board::new_empty()).is_empty());
    }

    #[test]
    fn test_evaluate_move_restores_board() {
        let mut board = scenario_board();
        let before = board.clone();
        let score = evaluate_move(&mut board, Move::new(7, 1, Direction::Right));
        assert_eq!(score, 3);
        assert_eq!(board, before);
    }

    #[test]
    fn test_scenario_vertical_run_after_swap() {
        let mut board = scenario_board();
        let best = find_optimal_move(&mut board);
        assert_eq!(best.map(|m| m.as_tuple()), Some((7, 1, 7, 2)));
        assert_eq!(find_optimal_move_parallel(&board), best);
    }

    #[test]
    fn test_all_empty_board_has_no_move() {
        let mut board = Board::new_empty();
        assert_eq!(find_optimal_move(&mut board), None);
        assert_eq!(find_optimal_move_parallel(&board), None);
    }

    #[test]
    fn test_single_tile_has_no_move() {
        let mut board = Board::new_empty();
        board.set_tile(4, 4, Tile::Purple);
        assert_eq!(rank_moves(&mut board).len(), 2);
        assert_eq!(find_optimal_move(&mut board), None);
        assert_eq!(find_optimal_move_parallel(&board), None);
    }

    #[test]
    fn test_tie_break_prefers_first_generated() {
        // Two independent setups that both complete a run of three. The one in the
        // lower row is generated first and must win.
        let mut board = board_from_str_array(&["", "GGBG", "", "", "", "", "RRBR", ""]).unwrap();
        let evals = rank_moves(&mut board);
        let best = select_best(&evals).unwrap();
        assert_eq!(best.mv.as_tuple(), (6, 2, 6, 3));
        let rival = evals
            .iter()
            .find(|e| e.mv.as_tuple() == (1, 2, 1, 3))
            .unwrap();
        assert_eq!(rival.score, best.score);
        assert_eq!(find_optimal_move_parallel(&board).map(|m| m.as_tuple()), Some((6, 2, 6, 3)));
    }

    #[test]
    fn test_tie_break_right_before_down() {
        // From (2,1) the right-swap completes B at row 2, the down-swap completes B at row 3.
        let mut board = board_from_str_array(&["", "", ".BGBB", ".YBB"]).unwrap();
        let evals = rank_moves(&mut board);
        let right_idx = evals.iter().position(|e| e.mv.as_tuple() == (2, 1, 2, 2)).unwrap();
        let down_idx = evals.iter().position(|e| e.mv.as_tuple() == (2, 1, 3, 1)).unwrap();
        assert_eq!(evals[right_idx].score, 3);
        assert_eq!(evals[down_idx].score, 3);
        assert_eq!(right_idx + 1, down_idx);

        let best = select_best(&evals).unwrap();
        assert_eq!(best.mv.as_tuple(), (2, 1, 2, 2));
    }

    #[test]
    fn test_select_best_uses_strict_comparison() {
        let evals = [
            MoveEval { mv: Move::new(7, 0, Direction::Right), score: 0 },
            MoveEval { mv: Move::new(6, 0, Direction::Right), score: 4 },
            MoveEval { mv: Move::new(5, 0, Direction::Right), score: 4 },
            MoveEval { mv: Move::new(4, 0, Direction::Right), score: 3 },
        ];
        assert_eq!(select_best(&evals).map(|e| e.mv.src()), Some((6, 0)));
        assert_eq!(select_best(&evals[..1]), None);
        assert_eq!(select_best(&[]), None);
    }

    #[test]
    fn test_search_does_not_mutate_board() {
        for seed in 0..20 {
            let original = Board::new_random_with_seed(seed);
            let mut board = original.clone();
            find_optimal_move(&mut board);
            assert_eq!(board, original);
            find_optimal_move_parallel(&board);
            assert_eq!(board, original);
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        for seed in 0..50 {
            let mut board = Board::new_random_with_seed(seed);
            // Knock out a few cells so empty origins are exercised too.
            board.set_tile((seed % 8) as usize, 3, Tile::Empty);
            board.set_tile(7, (seed % 8) as usize, Tile::Empty);

            let parallel = rank_moves_parallel(&board);
            let sequential = rank_moves(&mut board);
            assert_eq!(parallel, sequential);
            assert_eq!(
                find_move(&mut board, SearchMode::Parallel),
                find_move(&mut board, SearchMode::Sequential)
            );
        }
    }

    #[test]
    fn test_empty_cell_as_destination() {
        // (7,2) is empty; the swap is generated from (7,1) as origin.
        let mut board = board_from_str_array(&["", "", "", "", "", "..G", "..G", ".G."]).unwrap();
        assert_eq!(
            find_optimal_move(&mut board).map(|m| m.as_tuple()),
            Some((7, 1, 7, 2))
        );
    }
}
