//! Error type shared by the library and its binaries.

use crate::engine::BOARD_SIZE;

/// Recoverable failures: malformed board text, bad frames or regions, and
/// errors reported by the screen or pointer collaborators.
///
/// Programming errors such as out-of-range coordinates are not represented
/// here; they panic.
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    #[error("Invalid number of rows. Expected at most {}, found {found}", BOARD_SIZE)]
    TooManyRows { found: usize },

    #[error("Row {row} is too long. Expected at most {} characters, found {found}", BOARD_SIZE)]
    RowTooLong { row: usize, found: usize },

    #[error("Unrecognized character '{ch}' at row {row}, column {col}")]
    UnrecognizedChar { ch: char, row: usize, col: usize },

    #[error("Invalid board file: {0}")]
    BoardFile(String),

    #[error("Frame of {width}x{height} needs {expected} pixels, got {found}")]
    FrameSize {
        width: usize,
        height: usize,
        expected: usize,
        found: usize,
    },

    #[error("Frame of {width}x{height} is too small to hold an {}x{} grid", BOARD_SIZE, BOARD_SIZE)]
    FrameTooSmall { width: usize, height: usize },

    #[error("Invalid grid region: {0}")]
    Region(String),

    #[error("Screen capture failed: {0}")]
    Capture(String),

    #[error("Pointer input failed: {0}")]
    Pointer(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SolverError>;
