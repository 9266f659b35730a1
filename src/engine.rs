//! Board model for the match-3 grid.
//!
//! This module defines the game's fundamental components:
//! - `Tile`: The recognized color of a cell, or `Tile::Empty` when nothing was recognized.
//! - `Board`: The 8x8 grid of tiles with direct cell access and the reversible
//!   `swap` primitive used by the move search.
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt;

/// Represents the color of a tile on the game board.
///
/// `Tile::Empty` is not a seventh color: it marks a cell where the classifier
/// found no known color, and it never takes part in a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tile {
    /// No recognized tile at this position.
    Empty,
    Blue,
    Green,
    Red,
    Purple,
    Orange,
    Yellow,
    White,
}

impl Tile {
    /// Every colored variant, in palette order.
    pub const COLORS: [Tile; 7] = [
        Tile::Blue,
        Tile::Green,
        Tile::Red,
        Tile::Purple,
        Tile::Orange,
        Tile::Yellow,
        Tile::White,
    ];

    /// Converts the tile to its character representation.
    ///
    /// This is primarily used for text-based display or serialization of the board.
    ///
    /// # Examples
    ///
    /// ```
    /// use bejeweled_solver::engine::Tile;
    /// assert_eq!(Tile::Red.to_char(), 'R');
    /// assert_eq!(Tile::Empty.to_char(), '.');
    /// ```
    pub fn to_char(&self) -> char {
        match self {
            Tile::Empty => '.',
            Tile::Blue => 'B',
            Tile::Green => 'G',
            Tile::Red => 'R',
            Tile::Purple => 'P',
            Tile::Orange => 'O',
            Tile::Yellow => 'Y',
            Tile::White => 'W',
        }
    }

    /// Parses a tile from its character representation, the inverse of [`Tile::to_char`].
    ///
    /// Returns `None` for any character that does not name a tile.
    pub fn from_char(ch: char) -> Option<Tile> {
        match ch {
            '.' => Some(Tile::Empty),
            'B' => Some(Tile::Blue),
            'G' => Some(Tile::Green),
            'R' => Some(Tile::Red),
            'P' => Some(Tile::Purple),
            'O' => Some(Tile::Orange),
            'Y' => Some(Tile::Yellow),
            'W' => Some(Tile::White),
            _ => None,
        }
    }

    /// Returns `true` for every variant except `Tile::Empty`.
    pub fn is_colored(&self) -> bool {
        *self != Tile::Empty
    }

    /// Returns the ANSI background color code string for terminal output.
    fn to_ansi_color_code(&self) -> &'static str {
        match self {
            Tile::Empty => "40",
            Tile::Red => "41",
            Tile::Green => "42",
            Tile::Yellow => "43",
            Tile::Blue => "44",
            Tile::Purple => "45",
            Tile::Orange => "101",
            Tile::White => "47",
        }
    }
}

fn generate_random_tile_color(rng: &mut impl Rng) -> Tile {
    Tile::COLORS[rng.gen_range(0..Tile::COLORS.len())]
}

/// Defines the size of the game board (width and height).
/// The board is always square: an 8x8 grid.
pub const BOARD_SIZE: usize = 8;

/// A `(row, column)` coordinate on the board. Row 0 is the top row.
pub type Coord = (usize, usize);

/// Represents the game board as a 2D grid of `Tile`s.
///
/// The board is rebuilt once per observation cycle. The move search borrows it,
/// swaps tiles transiently and always swaps them back, so a search never leaves
/// an observable mutation behind.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    grid: [[Tile; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Board::new_empty()
    }
}

impl Board {
    /// Creates a new empty game board with all tiles set to `Tile::Empty`.
    ///
    /// # Examples
    /// ```
    /// use bejeweled_solver::engine::{Board, Tile};
    /// let board = Board::new_empty();
    /// assert_eq!(board.get_tile(0, 0), Tile::Empty);
    /// ```
    pub fn new_empty() -> Self {
        Board {
            grid: [[Tile::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Creates a new game board with randomly assigned, non-empty colors for each tile.
    ///
    /// Uses a fixed internal seed (`514514`), so every call produces the same board.
    pub fn new_random() -> Self {
        Self::new_random_with_seed(514514)
    }

    /// Creates a new game board with randomly assigned, non-empty colors using a provided seed.
    ///
    /// The same seed always produces the same board. No `Tile::Empty` is generated.
    ///
    /// # Arguments
    /// * `seed`: A `u64` value used to seed the random number generator.
    pub fn new_random_with_seed(seed: u64) -> Self {
        let mut grid = [[Tile::Empty; BOARD_SIZE]; BOARD_SIZE];
        let mut rng = SmallRng::seed_from_u64(seed);

        for row in grid.iter_mut() {
            for cell in row.iter_mut() {
                *cell = generate_random_tile_color(&mut rng);
            }
        }
        Board { grid }
    }

    /// Creates a new board from a predefined grid configuration.
    pub fn from_grid(initial_grid: [[Tile; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Board { grid: initial_grid }
    }

    /// Returns the tile at the specified row (`r`) and column (`c`).
    ///
    /// # Panics
    /// Panics if `r` or `c` are outside the board dimensions (`0 <= r < BOARD_SIZE`, `0 <= c < BOARD_SIZE`).
    pub fn get_tile(&self, r: usize, c: usize) -> Tile {
        self.grid[r][c]
    }

    /// Sets the tile at the specified row (`r`) and column (`c`) to the given `tile`.
    ///
    /// # Panics
    /// Panics if `r` or `c` are outside the board dimensions.
    pub fn set_tile(&mut self, r: usize, c: usize, tile: Tile) {
        self.grid[r][c] = tile;
    }

    /// Exchanges the tiles at coordinates `a` and `b` in place.
    ///
    /// Swapping the same pair twice restores the original board exactly. Adjacency is
    /// not checked here; the move search only ever passes neighbouring cells.
    ///
    /// # Panics
    /// Panics if either coordinate is out of range. `a` and `b` must be distinct.
    ///
    /// # Examples
    /// ```
    /// use bejeweled_solver::engine::{Board, Tile};
    /// let mut board = Board::new_empty();
    /// board.set_tile(7, 0, Tile::Red);
    /// board.swap((7, 0), (7, 1));
    /// assert_eq!(board.get_tile(7, 1), Tile::Red);
    /// assert_eq!(board.get_tile(7, 0), Tile::Empty);
    /// ```
    pub fn swap(&mut self, a: Coord, b: Coord) {
        debug_assert_ne!(a, b, "swap requires two distinct cells");
        let first = self.grid[a.0][a.1];
        self.grid[a.0][a.1] = self.grid[b.0][b.1];
        self.grid[b.0][b.1] = first;
    }

    /// Returns an immutable reference to the underlying 2D grid of tiles.
    pub fn get_grid(&self) -> &[[Tile; BOARD_SIZE]; BOARD_SIZE] {
        &self.grid
    }

    /// Number of cells holding a colored tile.
    pub fn count_non_empty(&self) -> usize {
        self.grid
            .iter()
            .flatten()
            .filter(|tile| tile.is_colored())
            .count()
    }

    /// Returns `true` when no cell holds a colored tile.
    pub fn is_empty(&self) -> bool {
        self.count_non_empty() == 0
    }

    /// Generates a string representation of the board with an optional highlighted position.
    ///
    /// The output includes row and column numbers and uses ANSI escape codes for tile colors.
    /// If `pos` is `Some((r, c))`, that tile is drawn as `..` instead of blank space.
    pub fn to_string_with_highlight(&self, pos: Option<Coord>) -> String {
        let mut output = String::new();

        output.push_str("  ");
        for c_idx in 0..BOARD_SIZE {
            output.push_str(&format!("{:<2}", c_idx));
        }
        output.push('\n');

        for r_idx in 0..BOARD_SIZE {
            output.push_str(&format!("{:<2}", r_idx));

            for c_idx in 0..BOARD_SIZE {
                let is_highlight = pos == Some((r_idx, c_idx));
                let color_code = self.grid[r_idx][c_idx].to_ansi_color_code();
                let content = if is_highlight { ".." } else { "  " };
                output.push_str(&format!("\x1b[1;{};m{}\x1b[m", color_code, content));
            }
            if r_idx < BOARD_SIZE - 1 {
                output.push('\n');
            }
        }

        output
    }

    /// Plain-text rows of tile characters, one string per row.
    ///
    /// The result parses back through `utils::board_from_str_array`.
    pub fn to_rows(&self) -> Vec<String> {
        self.grid
            .iter()
            .map(|row| row.iter().map(Tile::to_char).collect())
            .collect()
    }
}

impl fmt::Display for Board {
    /// Formats the board for display using `to_string_with_highlight(None)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_with_highlight(None))
    }
}
