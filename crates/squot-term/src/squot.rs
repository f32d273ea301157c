// SPDX-License-Identifier: MIT
//
// SquotImage — a bitmap of 2×3 sub-pixel cells.
//
// Every terminal cell stores one 6-bit mask and one color. The color belongs
// to the cell, not to the sub-pixel: all set bits in a cell share it, and the
// last non-CLEAR write to any sub-pixel of the cell wins for the whole cell.
//
// Storage is two flat row-major vectors of the same length:
//
//   bits[addr]    Sextant mask
//   colors[addr]  foreground color shared by the set bits
//
// with addr = floor(y / 3) * width_in_chars + floor(x / 2). Cloning copies
// both vectors, so a clone is fully independent of its source.

use crate::color::Color;
use crate::error::{Error, Result};
use crate::glyph::Sextant;
use crate::image::{PixelReader, PixelWriter};

/// Where a pixel lives: the cell address and the bit inside that cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// Row-major cell index.
    pub address: usize,
    /// The single sub-pixel bit.
    pub bit: Sextant,
}

/// One character row of a [`SquotImage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SquotRow<'a> {
    /// Masks, one per cell.
    pub bits: &'a [Sextant],
    /// Cell colors, aligned with `bits`.
    pub colors: &'a [Color],
}

/// A squot bitmap `width_in_chars × height_in_chars` cells large.
///
/// ```
/// use squot_term::color::Color;
/// use squot_term::image::{PixelReader, PixelWriter};
/// use squot_term::squot::SquotImage;
///
/// let mut img = SquotImage::new(4, 3).unwrap();
/// assert_eq!((img.width(), img.height()), (8, 9));
///
/// img.set_pixel(1, 1, Color::GREEN);
/// assert_eq!(img.pixel(1, 1), Color::GREEN);
/// assert_eq!(img.pixel(0, 0), Color::CLEAR);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SquotImage {
    width_in_chars: u16,
    height_in_chars: u16,
    bits: Vec<Sextant>,
    colors: Vec<Color>,
}

impl SquotImage {
    /// Allocate a blank bitmap.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if either dimension is zero.
    pub fn new(width_in_chars: u16, height_in_chars: u16) -> Result<Self> {
        if width_in_chars == 0 {
            return Err(Error::InvalidDimension {
                what: "width_in_chars",
                value: 0,
            });
        }
        if height_in_chars == 0 {
            return Err(Error::InvalidDimension {
                what: "height_in_chars",
                value: 0,
            });
        }

        let len = usize::from(width_in_chars) * usize::from(height_in_chars);
        Ok(Self {
            width_in_chars,
            height_in_chars,
            bits: vec![Sextant::empty(); len],
            colors: vec![Color::default(); len],
        })
    }

    // ─── Dimensions ──────────────────────────────────────────────────────

    /// Width in cells.
    #[inline]
    #[must_use]
    pub const fn width_in_chars(&self) -> u16 {
        self.width_in_chars
    }

    /// Height in cells.
    #[inline]
    #[must_use]
    pub const fn height_in_chars(&self) -> u16 {
        self.height_in_chars
    }

    /// Width in pixels (two per cell).
    #[inline]
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width_in_chars as u32 * 2
    }

    /// Height in pixels (three per cell).
    #[inline]
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height_in_chars as u32 * 3
    }

    // ─── Addressing ──────────────────────────────────────────────────────

    /// Translate a pixel coordinate into a cell address and bit.
    ///
    /// Returns `None` outside `[0, width) × [0, height)`.
    #[must_use]
    pub fn location(&self, x: i32, y: i32) -> Option<Location> {
        let x = u32::try_from(x).ok()?;
        let y = u32::try_from(y).ok()?;
        if x >= self.width() || y >= self.height() {
            return None;
        }

        let address = (y / 3) as usize * usize::from(self.width_in_chars) + (x / 2) as usize;
        // Both sub-coordinates are < 3, so the narrowing is lossless.
        #[allow(clippy::cast_possible_truncation)]
        let bit = Sextant::at((x % 2) as u8, (y % 3) as u8);
        Some(Location { address, bit })
    }

    // ─── Cell access ─────────────────────────────────────────────────────

    /// Mask of the cell at `address`. Panics if out of range.
    #[inline]
    #[must_use]
    pub fn bits_at(&self, address: usize) -> Sextant {
        self.bits[address]
    }

    /// Color of the cell at `address`. Panics if out of range.
    #[inline]
    #[must_use]
    pub fn color_at(&self, address: usize) -> Color {
        self.colors[address]
    }

    /// OR `mask` into a cell and, if `mask` is non-empty, take `color`.
    ///
    /// Never clears bits. Addresses past the end are ignored.
    pub fn draw_cell(&mut self, address: usize, mask: Sextant, color: Color) {
        if mask.is_empty() || address >= self.bits.len() {
            return;
        }
        self.bits[address] |= mask;
        self.colors[address] = color;
    }

    /// Clear every bit. Cell colors are left as they are.
    pub fn clear(&mut self) {
        self.bits.fill(Sextant::empty());
    }

    /// All masks, row-major.
    #[inline]
    #[must_use]
    pub fn as_bits(&self) -> &[Sextant] {
        &self.bits
    }

    /// All cell colors, row-major.
    #[inline]
    #[must_use]
    pub fn as_colors(&self) -> &[Color] {
        &self.colors
    }

    // ─── Rows ────────────────────────────────────────────────────────────

    /// Masks, one slice per character row.
    ///
    /// Each call starts a new pass from the top.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[Sextant]> + '_ {
        self.bits.chunks_exact(usize::from(self.width_in_chars))
    }

    /// Masks and colors, one pair per character row.
    pub fn squot_rows(&self) -> impl ExactSizeIterator<Item = SquotRow<'_>> + '_ {
        let width = usize::from(self.width_in_chars);
        self.bits
            .chunks_exact(width)
            .zip(self.colors.chunks_exact(width))
            .map(|(bits, colors)| SquotRow { bits, colors })
    }
}

impl PixelReader for SquotImage {
    fn width(&self) -> u32 {
        Self::width(self)
    }

    fn height(&self) -> u32 {
        Self::height(self)
    }

    fn pixel(&self, x: i32, y: i32) -> Color {
        match self.location(x, y) {
            Some(Location { address, bit }) if self.bits[address].contains(bit) => {
                self.colors[address]
            }
            _ => Color::CLEAR,
        }
    }
}

impl PixelWriter for SquotImage {
    fn width(&self) -> u32 {
        Self::width(self)
    }

    fn height(&self) -> u32 {
        Self::height(self)
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        let Some(Location { address, bit }) = self.location(x, y) else {
            return;
        };

        if color.is_clear() {
            self.bits[address].remove(bit);
        } else {
            self.bits[address].insert(bit);
            self.colors[address] = color;
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> SquotImage {
        SquotImage::new(4, 3).unwrap()
    }

    // ── Construction ────────────────────────────────────────────────────

    #[test]
    fn dimensions_are_cells_times_subpixels() {
        let img = image();
        assert_eq!(img.width_in_chars(), 4);
        assert_eq!(img.height_in_chars(), 3);
        assert_eq!(img.width(), 8);
        assert_eq!(img.height(), 9);
        assert_eq!(img.as_bits().len(), 12);
    }

    #[test]
    fn zero_dimensions_rejected() {
        assert!(matches!(
            SquotImage::new(0, 3),
            Err(Error::InvalidDimension { what: "width_in_chars", .. })
        ));
        assert!(matches!(
            SquotImage::new(3, 0),
            Err(Error::InvalidDimension { what: "height_in_chars", .. })
        ));
    }

    // ── Location ────────────────────────────────────────────────────────

    #[test]
    fn location_maps_address_and_bit() {
        let img = image();
        assert_eq!(
            img.location(0, 0),
            Some(Location { address: 0, bit: Sextant::TOP_LEFT })
        );
        assert_eq!(
            img.location(3, 4),
            Some(Location { address: 5, bit: Sextant::MIDDLE_RIGHT })
        );
        assert_eq!(
            img.location(7, 8),
            Some(Location { address: 11, bit: Sextant::BOTTOM_RIGHT })
        );
    }

    #[test]
    fn location_out_of_range() {
        let img = image();
        assert_eq!(img.location(-1, 0), None);
        assert_eq!(img.location(0, -1), None);
        assert_eq!(img.location(8, 0), None);
        assert_eq!(img.location(0, 9), None);
    }

    // ── Get / Set ───────────────────────────────────────────────────────

    #[test]
    fn set_then_get_every_pixel() {
        let mut img = image();
        for y in 0..9 {
            for x in 0..8 {
                let c = Color::rgb(x as u8, y as u8, 7);
                img.set_pixel(x, y, c);
                assert_eq!(img.pixel(x, y), c);

                img.set_pixel(x, y, Color::CLEAR);
                assert_eq!(img.pixel(x, y), Color::CLEAR);
            }
        }
    }

    #[test]
    fn cell_color_is_shared_last_writer_wins() {
        let mut img = image();
        img.set_pixel(0, 0, Color::RED);
        img.set_pixel(1, 2, Color::BLUE);

        assert_eq!(img.pixel(0, 0), Color::BLUE);
        assert_eq!(img.bits_at(0), Sextant::TOP_LEFT | Sextant::BOTTOM_RIGHT);
    }

    #[test]
    fn clear_only_removes_the_bit() {
        let mut img = image();
        img.set_pixel(0, 0, Color::RED);
        img.set_pixel(1, 0, Color::RED);
        img.set_pixel(0, 0, Color::CLEAR);

        assert_eq!(img.bits_at(0), Sextant::TOP_RIGHT);
        assert_eq!(img.color_at(0), Color::RED);
    }

    #[test]
    fn out_of_range_access_is_inert() {
        let mut img = image();
        let before = img.clone();

        for (x, y) in [(-1, -1), (8, 0), (0, 9), (100, 100)] {
            assert_eq!(img.pixel(x, y), Color::CLEAR);
            img.set_pixel(x, y, Color::RED);
        }
        assert_eq!(img, before);
    }

    // ── Clone ───────────────────────────────────────────────────────────

    #[test]
    fn clone_is_equal_and_independent() {
        let mut original = image();
        original.set_pixel(2, 2, Color::YELLOW);

        let mut copy = original.clone();
        assert_eq!(copy, original);

        copy.set_pixel(2, 2, Color::CLEAR);
        copy.set_pixel(5, 5, Color::CYAN);
        assert_eq!(original.pixel(2, 2), Color::YELLOW);
        assert_eq!(original.pixel(5, 5), Color::CLEAR);

        original.set_pixel(0, 0, Color::RED);
        assert_eq!(copy.pixel(0, 0), Color::CLEAR);
    }

    // ── Draw cell ───────────────────────────────────────────────────────

    #[test]
    fn draw_cell_ors_and_recolors() {
        let mut img = image();
        img.set_pixel(0, 0, Color::RED);
        img.draw_cell(0, Sextant::BOTTOM_LEFT, Color::GREEN);

        assert_eq!(img.bits_at(0), Sextant::TOP_LEFT | Sextant::BOTTOM_LEFT);
        assert_eq!(img.color_at(0), Color::GREEN);
    }

    #[test]
    fn draw_cell_empty_mask_keeps_color() {
        let mut img = image();
        img.set_pixel(0, 0, Color::RED);
        img.draw_cell(0, Sextant::empty(), Color::GREEN);
        assert_eq!(img.color_at(0), Color::RED);

        img.draw_cell(99, Sextant::FULL, Color::GREEN);
        assert_eq!(img.as_bits().len(), 12);
    }

    // ── Rows ────────────────────────────────────────────────────────────

    #[test]
    fn rows_are_restartable() {
        let mut img = image();
        img.set_pixel(7, 8, Color::RED);

        let first: Vec<&[Sextant]> = img.rows().collect();
        let second: Vec<&[Sextant]> = img.rows().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
        assert_eq!(first[2][3], Sextant::BOTTOM_RIGHT);
    }

    #[test]
    fn squot_rows_pair_bits_and_colors() {
        let mut img = image();
        img.set_pixel(2, 3, Color::MAGENTA);

        let rows: Vec<SquotRow<'_>> = img.squot_rows().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].bits[1], Sextant::TOP_LEFT);
        assert_eq!(rows[1].colors[1], Color::MAGENTA);
        assert_eq!(rows[1].bits.len(), rows[1].colors.len());
    }
}
