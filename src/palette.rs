//! Palette lookup from sampled pixels to tile colors.
//!
//! A cell is recognized as a color when at least one of its pixels lies within a
//! per-channel tolerance of that color's reference value. Palette entries are tried
//! in order and the first hit wins, so overlapping entries resolve deterministically.

use crate::engine::Tile;

/// A pixel sample in blue, green, red channel order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bgr {
    pub b: u8,
    pub g: u8,
    pub r: u8,
}

impl Bgr {
    pub const fn new(b: u8, g: u8, r: u8) -> Self {
        Bgr { b, g, r }
    }

    /// `true` when every channel differs from `other` by at most `tolerance`.
    pub fn within(&self, other: Bgr, tolerance: u8) -> bool {
        self.b.abs_diff(other.b) <= tolerance
            && self.g.abs_diff(other.g) <= tolerance
            && self.r.abs_diff(other.r) <= tolerance
    }
}

/// Per-channel tolerance used by [`Palette::default`].
pub const DEFAULT_TOLERANCE: u8 = 3;

/// Reference colors of the game's tiles, in lookup order.
const REFERENCE_COLORS: [(Bgr, Tile); 7] = [
    (Bgr::new(206, 165, 33), Tile::Blue),
    (Bgr::new(41, 115, 16), Tile::Green),
    (Bgr::new(16, 49, 239), Tile::Red),
    (Bgr::new(206, 70, 196), Tile::Purple),
    (Bgr::new(24, 123, 255), Tile::Orange),
    (Bgr::new(24, 222, 255), Tile::Yellow),
    (Bgr::new(211, 211, 211), Tile::White),
];

/// Ordered table of reference colors with a matching tolerance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<(Bgr, Tile)>,
    tolerance: u8,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            entries: REFERENCE_COLORS.to_vec(),
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl Palette {
    /// Builds a palette from explicit entries.
    ///
    /// Entries mapping to `Tile::Empty` are dropped: an unmatched cell is already empty.
    pub fn new(entries: Vec<(Bgr, Tile)>, tolerance: u8) -> Self {
        let entries = entries
            .into_iter()
            .filter(|(_, tile)| tile.is_colored())
            .collect();
        Palette { entries, tolerance }
    }

    /// Same reference colors with a different tolerance.
    pub fn with_tolerance(mut self, tolerance: u8) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn tolerance(&self) -> u8 {
        self.tolerance
    }

    pub fn entries(&self) -> &[(Bgr, Tile)] {
        &self.entries
    }

    /// The reference color of `tile`, if the palette has one.
    pub fn reference(&self, tile: Tile) -> Option<Bgr> {
        self.entries
            .iter()
            .find(|(_, t)| *t == tile)
            .map(|(color, _)| *color)
    }

    /// Tile whose reference color lies within tolerance of `pixel`.
    pub fn classify_pixel(&self, pixel: Bgr) -> Tile {
        self.entries
            .iter()
            .find(|(color, _)| pixel.within(*color, self.tolerance))
            .map_or(Tile::Empty, |(_, tile)| *tile)
    }

    /// Classifies a cell from its pixels.
    ///
    /// Each palette entry is tested against every pixel before the next entry is
    /// tried, so a cell containing pixels of two colors resolves to the one listed
    /// first in the palette.
    ///
    /// # Examples
    /// ```
    /// use bejeweled_solver::engine::Tile;
    /// use bejeweled_solver::palette::{Bgr, Palette};
    ///
    /// let palette = Palette::default();
    /// let cell = [Bgr::new(0, 0, 0), Bgr::new(17, 50, 237)];
    /// assert_eq!(palette.classify_cell(&cell), Tile::Red);
    /// assert_eq!(palette.classify_cell(&[Bgr::new(0, 0, 0)]), Tile::Empty);
    /// ```
    pub fn classify_cell(&self, pixels: &[Bgr]) -> Tile {
        for (color, tile) in &self.entries {
            if pixels.iter().any(|p| p.within(*color, self.tolerance)) {
                return *tile;
            }
        }
        Tile::Empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette_covers_every_color() {
        let palette = Palette::default();
        assert_eq!(palette.tolerance(), DEFAULT_TOLERANCE);
        for tile in Tile::COLORS {
            let reference = palette.reference(tile).unwrap();
            assert_eq!(palette.classify_pixel(reference), tile);
        }
        assert_eq!(palette.reference(Tile::Empty), None);
    }

    #[test]
    fn test_tolerance_is_inclusive() {
        let palette = Palette::default();
        assert_eq!(palette.classify_pixel(Bgr::new(209, 162, 36)), Tile::Blue);
        assert_eq!(palette.classify_pixel(Bgr::new(210, 165, 33)), Tile::Empty);
        assert_eq!(palette.classify_pixel(Bgr::new(206, 165, 29)), Tile::Empty);
    }

    #[test]
    fn test_tolerance_near_channel_limits() {
        let palette = Palette::default();
        // Orange has a saturated red channel; 255 + 3 must not wrap.
        assert_eq!(palette.classify_pixel(Bgr::new(22, 121, 252)), Tile::Orange);
        assert_eq!(palette.classify_pixel(Bgr::new(24, 123, 251)), Tile::Empty);
    }

    #[test]
    fn test_classify_cell_prefers_palette_order() {
        let palette = Palette::default();
        let white = palette.reference(Tile::White).unwrap();
        let green = palette.reference(Tile::Green).unwrap();
        // Green comes before White in the palette, whatever the pixel order.
        assert_eq!(palette.classify_cell(&[white, green]), Tile::Green);
    }

    #[test]
    fn test_classify_cell_without_match_is_empty() {
        let palette = Palette::default();
        assert_eq!(palette.classify_cell(&[]), Tile::Empty);
        assert_eq!(
            palette.classify_cell(&[Bgr::new(1, 2, 3), Bgr::new(100, 100, 100)]),
            Tile::Empty
        );
    }

    #[test]
    fn test_custom_palette_and_tolerance() {
        let palette = Palette::new(
            vec![
                (Bgr::new(0, 0, 0), Tile::Empty),
                (Bgr::new(50, 50, 50), Tile::Purple),
            ],
            0,
        );
        assert_eq!(palette.entries().len(), 1);
        assert_eq!(palette.classify_pixel(Bgr::new(50, 50, 50)), Tile::Purple);
        assert_eq!(palette.classify_pixel(Bgr::new(51, 50, 50)), Tile::Empty);

        let loose = palette.with_tolerance(10);
        assert_eq!(loose.classify_pixel(Bgr::new(60, 40, 55)), Tile::Purple);
    }
}
