//! Captured frames and the geometry tying screen pixels to board cells.
//!
//! A `Frame` is the image of the board region, split into an 8x8 lattice of equal
//! cells using integer division. Any remainder pixels on the right and bottom edges
//! belong to no cell.

use crate::engine::{Board, Coord, Tile, BOARD_SIZE};
use crate::error::{Result, SolverError};
use crate::palette::{Bgr, Palette};
use rayon::prelude::*;

/// A row-major image of the board region.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    pixels: Vec<Bgr>,
}

impl Frame {
    /// Wraps a pixel buffer.
    ///
    /// Fails unless `pixels.len() == width * height` and the frame is at least one
    /// pixel per cell in both directions.
    pub fn new(width: usize, height: usize, pixels: Vec<Bgr>) -> Result<Self> {
        let expected = width * height;
        if pixels.len() != expected {
            return Err(SolverError::FrameSize {
                width,
                height,
                expected,
                found: pixels.len(),
            });
        }
        if width < BOARD_SIZE || height < BOARD_SIZE {
            return Err(SolverError::FrameTooSmall { width, height });
        }
        Ok(Frame {
            width,
            height,
            pixels,
        })
    }

    /// A frame filled with a single color.
    pub fn filled(width: usize, height: usize, color: Bgr) -> Result<Self> {
        Self::new(width, height, vec![color; width * height])
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_width(&self) -> usize {
        self.width / BOARD_SIZE
    }

    pub fn cell_height(&self) -> usize {
        self.height / BOARD_SIZE
    }

    /// # Panics
    /// Panics if `(x, y)` lies outside the frame.
    pub fn pixel(&self, x: usize, y: usize) -> Bgr {
        assert!(x < self.width && y < self.height, "pixel ({}, {}) outside frame", x, y);
        self.pixels[y * self.width + x]
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: Bgr) {
        assert!(x < self.width && y < self.height, "pixel ({}, {}) outside frame", x, y);
        self.pixels[y * self.width + x] = color;
    }

    /// Copies out the pixels of cell `(row, col)`, row by row.
    pub fn cell_pixels(&self, row: usize, col: usize) -> Vec<Bgr> {
        let (cw, ch) = (self.cell_width(), self.cell_height());
        let (x0, y0) = (col * cw, row * ch);
        let mut out = Vec::with_capacity(cw * ch);
        for y in y0..y0 + ch {
            let start = y * self.width + x0;
            out.extend_from_slice(&self.pixels[start..start + cw]);
        }
        out
    }

    /// Fills every pixel of cell `(row, col)` with `color`.
    pub fn fill_cell(&mut self, row: usize, col: usize, color: Bgr) {
        let (cw, ch) = (self.cell_width(), self.cell_height());
        for y in row * ch..(row + 1) * ch {
            let start = y * self.width + col * cw;
            self.pixels[start..start + cw].fill(color);
        }
    }
}

/// Classifies all 64 cells of `frame` into a fresh board.
///
/// Cells are classified concurrently on the rayon pool. Each cell that matches no
/// palette color becomes `Tile::Empty`.
pub fn classify_board(frame: &Frame, palette: &Palette) -> Board {
    let tiles: Vec<(Coord, Tile)> = (0..BOARD_SIZE * BOARD_SIZE)
        .into_par_iter()
        .map(|idx| {
            let (row, col) = (idx / BOARD_SIZE, idx % BOARD_SIZE);
            ((row, col), palette.classify_cell(&frame.cell_pixels(row, col)))
        })
        .collect();

    let mut board = Board::new_empty();
    for ((row, col), tile) in tiles {
        board.set_tile(row, col, tile);
    }
    board
}

/// Paints `board` into a frame, one solid block of `cell_size` pixels per cell.
///
/// Colored tiles use their palette reference color and empty cells use `background`.
/// Classifying the result with the same palette gives back `board`, provided
/// `background` is not within tolerance of any palette color.
pub fn render_board(board: &Board, palette: &Palette, cell_size: usize, background: Bgr) -> Result<Frame> {
    let side = cell_size * BOARD_SIZE;
    let mut frame = Frame::filled(side, side, background)?;
    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            if let Some(color) = palette.reference(board.get_tile(row, col)) {
                frame.fill_cell(row, col, color);
            }
        }
    }
    Ok(frame)
}

/// The screen rectangle holding the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridRegion {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl GridRegion {
    /// Region spanning the top-left and bottom-right corners of the grid.
    ///
    /// Both spans must be at least one pixel per cell.
    pub fn from_corners(top_left: (i32, i32), bottom_right: (i32, i32)) -> Result<Self> {
        let width = bottom_right.0 - top_left.0;
        let height = bottom_right.1 - top_left.1;
        if width < BOARD_SIZE as i32 || height < BOARD_SIZE as i32 {
            return Err(SolverError::Region(format!(
                "corners {:?} and {:?} span {}x{} pixels",
                top_left, bottom_right, width, height
            )));
        }
        Ok(GridRegion {
            left: top_left.0,
            top: top_left.1,
            width,
            height,
        })
    }

    /// Screen coordinates of the center of cell `(row, col)`.
    ///
    /// # Examples
    /// ```
    /// use bejeweled_solver::capture::GridRegion;
    /// let region = GridRegion::from_corners((100, 50), (420, 370)).unwrap();
    /// assert_eq!(region.cell_center(0, 0), (120, 70));
    /// assert_eq!(region.cell_center(7, 1), (160, 350));
    /// ```
    pub fn cell_center(&self, row: usize, col: usize) -> (i32, i32) {
        let cell_w = self.width / BOARD_SIZE as i32;
        let cell_h = self.height / BOARD_SIZE as i32;
        let half = BOARD_SIZE as i32 * 2;
        (
            self.left + col as i32 * cell_w + self.width / half,
            self.top + row as i32 * cell_h + self.height / half,
        )
    }

    /// The cell containing screen point `(x, y)`, if any.
    pub fn cell_at(&self, x: i32, y: i32) -> Option<Coord> {
        let cell_w = self.width / BOARD_SIZE as i32;
        let cell_h = self.height / BOARD_SIZE as i32;
        let (dx, dy) = (x - self.left, y - self.top);
        if dx < 0 || dy < 0 {
            return None;
        }
        let (col, row) = ((dx / cell_w) as usize, (dy / cell_h) as usize);
        (row < BOARD_SIZE && col < BOARD_SIZE).then_some((row, col))
    }
}
