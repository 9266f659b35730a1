use crate::engine::{Board, Tile, BOARD_SIZE};
use crate::error::{Result, SolverError};
use std::fs;
use std::path::Path;

/// Parses an array of string slices into a `Board` object.
///
/// Each string slice represents a row, starting from row 0 (the top). Missing rows and
/// the missing tail of a short row are filled with `Tile::Empty`.
///
/// Valid characters are the ones produced by `Tile::to_char`:
/// `B`, `G`, `R`, `P`, `O`, `Y`, `W` for the colors and `.` for `Tile::Empty`.
///
/// # Errors
/// * `SolverError::TooManyRows` if more than `BOARD_SIZE` rows are given.
/// * `SolverError::RowTooLong` if a row has more than `BOARD_SIZE` characters.
/// * `SolverError::UnrecognizedChar` for any other character.
///
/// # Examples
/// ```
/// use bejeweled_solver::utils::board_from_str_array;
/// use bejeweled_solver::engine::Tile;
///
/// let board = board_from_str_array(&["RGY", "B.P"]).unwrap();
/// assert_eq!(board.get_tile(0, 2), Tile::Yellow);
/// assert_eq!(board.get_tile(1, 1), Tile::Empty);
/// assert_eq!(board.get_tile(2, 0), Tile::Empty);
///
/// assert!(board_from_str_array(&["RXB"]).is_err());
/// ```
pub fn board_from_str_array(s: &[&str]) -> Result<Board> {
    if s.len() > BOARD_SIZE {
        return Err(SolverError::TooManyRows { found: s.len() });
    }

    let mut grid = [[Tile::Empty; BOARD_SIZE]; BOARD_SIZE];

    for (r, row_str) in s.iter().enumerate() {
        let len = row_str.chars().count();
        if len > BOARD_SIZE {
            return Err(SolverError::RowTooLong { row: r, found: len });
        }

        for (c, ch) in row_str.chars().enumerate() {
            grid[r][c] = Tile::from_char(ch).ok_or(SolverError::UnrecognizedChar { ch, row: r, col: c })?;
        }
    }

    Ok(Board::from_grid(grid))
}

/// Parses a complete board: exactly `BOARD_SIZE` non-blank lines of exactly
/// `BOARD_SIZE` tile characters. Leading and trailing whitespace on each line is ignored.
pub fn parse_board_text(content: &str) -> Result<Board> {
    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.len() != BOARD_SIZE {
        return Err(SolverError::BoardFile(format!(
            "expected {} rows, found {}",
            BOARD_SIZE,
            lines.len()
        )));
    }
    for (i, line) in lines.iter().enumerate() {
        let len = line.chars().count();
        if len != BOARD_SIZE {
            return Err(SolverError::BoardFile(format!(
                "line {} has {} characters, expected {}",
                i + 1,
                len,
                BOARD_SIZE
            )));
        }
    }

    board_from_str_array(&lines)
}

/// Reads a board file in the format accepted by [`parse_board_text`].
pub fn load_board_file(path: impl AsRef<Path>) -> Result<Board> {
    let content = fs::read_to_string(path)?;
    parse_board_text(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;

    const FULL_BOARD: &str = "\
RGBPOYWR
GBPOYWRG
BPOYWRGB
POYWRGBP
OYWRGBPO
YWRGBPOY
WRGBPOYW
RGBPOYWR
";

    #[test]
    fn test_board_from_str_array_valid_full() {
        let rows: Vec<&str> = FULL_BOARD.lines().collect();
        let board = board_from_str_array(&rows).unwrap();
        assert_eq!(board.get_tile(0, 0), Tile::Red);
        assert_eq!(board.get_tile(0, 4), Tile::Orange);
        assert_eq!(board.get_tile(7, 6), Tile::White);
        assert_eq!(board.count_non_empty(), BOARD_SIZE * BOARD_SIZE);
    }

    #[test]
    fn test_board_from_str_array_invalid_char() {
        let result = board_from_str_array(&["RGYBX"]);
        assert_matches!(
            result,
            Err(SolverError::UnrecognizedChar { ch: 'X', row: 0, col: 4 })
        );
        let message = result.unwrap_err().to_string();
        assert!(message.contains("Unrecognized character 'X'"));
    }

    #[test]
    fn test_board_from_str_array_with_spaces() {
        assert_matches!(
            board_from_str_array(&["R G"]),
            Err(SolverError::UnrecognizedChar { ch: ' ', .. })
        );
    }

    #[test]
    fn test_board_from_str_array_row_too_long() {
        let too_long_row = "R".repeat(BOARD_SIZE + 1);
        let result = board_from_str_array(&[too_long_row.as_str()]);
        assert_matches!(result, Err(SolverError::RowTooLong { row: 0, found: 9 }));
        assert!(result.unwrap_err().to_string().contains("Row 0 is too long"));
    }

    #[test]
    fn test_board_from_str_array_too_many_rows() {
        let rows = vec!["R"; BOARD_SIZE + 1];
        assert_matches!(
            board_from_str_array(&rows),
            Err(SolverError::TooManyRows { found: 9 })
        );
    }

    #[test]
    fn test_board_from_str_array_empty_input() {
        let board = board_from_str_array(&[]).unwrap();
        assert!(board.is_empty());
    }

    #[test]
    fn test_round_trip_through_rows() {
        let board = Board::new_random_with_seed(42);
        let rows = board.to_rows();
        let refs: Vec<&str> = rows.iter().map(String::as_str).collect();
        assert_eq!(board_from_str_array(&refs).unwrap(), board);
    }

    #[test]
    fn test_parse_board_text_trims_and_skips_blank_lines() {
        let padded = format!("\n  {}\n", FULL_BOARD.lines().collect::<Vec<_>>().join("  \n\n  "));
        let board = parse_board_text(&padded).unwrap();
        assert_eq!(board, parse_board_text(FULL_BOARD).unwrap());
    }

    #[test]
    fn test_parse_board_text_requires_full_grid() {
        assert_matches!(parse_board_text("RGB\n"), Err(SolverError::BoardFile(_)));

        let short_line = FULL_BOARD.replacen("RGBPOYWR", "RGBPOYW", 1);
        let err = parse_board_text(&short_line).unwrap_err();
        assert!(err.to_string().contains("line 1 has 7 characters"));
    }

    #[test]
    fn test_load_board_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FULL_BOARD.as_bytes()).unwrap();
        let board = load_board_file(file.path()).unwrap();
        assert_eq!(board.get_tile(1, 0), Tile::Green);
    }

    #[test]
    fn test_load_missing_board_file() {
        let dir = tempfile::tempdir().unwrap();
        assert_matches!(
            load_board_file(dir.path().join("missing.txt")),
            Err(SolverError::Io(_))
        );
    }
}
