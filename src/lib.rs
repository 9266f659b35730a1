//! # Bejeweled Solver Library
//!
//! This library provides the board model and single-swap move search for an 8x8
//! match-3 puzzle, plus the pieces an autoplayer needs around it: palette-based
//! classification of captured frames and a capture/search/click control loop.
//!
//! It is used by three binaries:
//! - `move_finder`: Reads a board file and prints the best swap.
//! - `search_evaluator`: Runs sequential and parallel search over seeded random
//!   boards and compares their results and timings.
//! - `autoplay_sim`: Drives the control loop against a simulated game.
//!
//! ## Modules
//! - `engine`: The `Tile` colors, the 8x8 `Board` and its reversible `swap`.
//! - `evaluation`: `evaluate_state`, the run-based score of a board.
//! - `search`: Candidate generation, tie-break order, sequential and parallel search.
//! - `palette`: Pixel to tile classification against reference colors.
//! - `capture`: Frames, the on-screen grid region and whole-board classification.
//! - `driver`: The autoplay loop over screen, pointer and stop-key collaborators.
//! - `utils`: Parsing boards from text rows and files.
//! - `error`: `SolverError` and the crate `Result` alias.

pub mod capture;
pub mod driver;
pub mod engine;
pub mod error;
pub mod evaluation;
pub mod palette;
pub mod search;
pub mod utils;

// Items from sub-modules should be accessed via their full path,
// e.g. `bejeweled_solver::search::find_optimal_move()`.
