// SPDX-License-Identifier: MIT
//
// Sprites — fixed bitmaps that can be stamped anywhere on a canvas.
//
// A squot cell is 2×3 pixels, so a sprite placed at an arbitrary pixel
// position straddles cells differently depending on (x mod 2, y mod 3).
// Rather than re-slicing the bitmap on every placement, a sprite bakes all
// six alignments up front:
//
//   phase = (x mod 2) + 2 * (y mod 3)
//
//   phase 0: pixels copied to (x, y)          phase 1: to (x + 1, y)
//   phase 2: pixels copied to (x, y + 1)      ...
//   phase 5: pixels copied to (x + 1, y + 2)
//
// Placement then only ORs whole cell masks into the canvas, starting at the
// cell that contains the target pixel. Sprite drawing never erases: bits
// are added, and a cell's color changes only where the sprite has bits.

use crate::canvas::Canvas;
use crate::color::Color;
use crate::error::{Error, Result};
use crate::geometry::rem;
use crate::image::{Image, PixelReader, PixelWriter};
use crate::squot::SquotImage;

/// Characters that mark a transparent pixel in text art.
const BLANK_PIXELS: [char; 4] = ['.', ' ', '-', '+'];

/// An immutable bitmap with its six pre-aligned renders.
///
/// ```
/// use squot_term::canvas::Canvas;
/// use squot_term::color::Color;
/// use squot_term::image::PixelReader;
/// use squot_term::sprite::Sprite;
///
/// let ship = Sprite::from_text(&[
///     ".#.",
///     "###",
/// ]).unwrap();
///
/// let mut canvas = Canvas::with_char_dimensions(10, 5, Color::BLACK).unwrap();
/// ship.write_sprite(&mut canvas, 5, 7, Color::GREEN);
///
/// assert_eq!(canvas.pixel(6, 7), Color::GREEN);
/// assert_eq!(canvas.pixel(5, 7), Color::CLEAR);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    width: u32,
    height: u32,
    renders: Vec<SquotImage>,
}

impl Sprite {
    /// Build a sprite from any pixel source. Every non-CLEAR pixel is solid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if the source is empty or too
    /// large to address as cells.
    pub fn from_reader<R: PixelReader + ?Sized>(source: &R) -> Result<Self> {
        let width = source.width();
        let height = source.height();

        let renders = (0..6u32)
            .map(|index| {
                let (dx, dy) = (index % 2, index / 2);
                let mut render = SquotImage::new(
                    cells("width", width, dx, 2)?,
                    cells("height", height, dy, 3)?,
                )?;

                for (y, ry) in (0..height).zip(dy..) {
                    for (x, rx) in (0..width).zip(dx..) {
                        if !source.pixel(to_i32(x), to_i32(y)).is_clear() {
                            render.set_pixel(to_i32(rx), to_i32(ry), Color::OPAQUE_WHITE);
                        }
                    }
                }
                Ok(render)
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(width, height, "built sprite phase renders");
        Ok(Self {
            width,
            height,
            renders,
        })
    }

    /// Build a sprite from text art, one string per pixel row.
    ///
    /// `.`, space, `-` and `+` are blank; any other character is solid. The
    /// width is the longest row in characters; shorter rows are padded with
    /// blanks.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if there are no rows or every row
    /// is empty.
    pub fn from_text<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let width = rows
            .iter()
            .map(|row| row.as_ref().chars().count())
            .max()
            .unwrap_or(0);
        let width = u32::try_from(width).map_err(|_| Error::InvalidDimension {
            what: "width",
            value: width as u64,
        })?;
        let height = u32::try_from(rows.len()).map_err(|_| Error::InvalidDimension {
            what: "height",
            value: rows.len() as u64,
        })?;

        let mut bitmap = Image::new(width, height, Color::CLEAR)?;
        for (y, row) in (0i32..).zip(rows) {
            for (x, ch) in (0i32..).zip(row.as_ref().chars()) {
                if !BLANK_PIXELS.contains(&ch) {
                    bitmap.set_pixel(x, y, Color::OPAQUE_WHITE);
                }
            }
        }

        Self::from_reader(&bitmap)
    }

    /// Bitmap width in pixels.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Bitmap height in pixels.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// The pre-aligned render for `phase` (0–5). Panics if out of range.
    #[must_use]
    pub fn phase(&self, phase: usize) -> &SquotImage {
        &self.renders[phase]
    }

    /// Stamp the sprite with its top-left pixel at `(x, y)` in `color`.
    ///
    /// Bits are ORed into the canvas foreground; cells the sprite touches
    /// take `color`. Cells outside the canvas are skipped individually, so
    /// the sprite may hang off any edge.
    pub fn write_sprite(&self, canvas: &mut Canvas, x: i32, y: i32, color: Color) {
        let phase = rem(x, 2) + 2 * rem(y, 3);
        let render = &self.renders[usize::try_from(phase).unwrap_or(0)];

        let columns = canvas.width_in_chars();
        let lines = canvas.height_in_chars();
        let first_col = x.div_euclid(2);
        let first_row = y.div_euclid(3);
        let fg = canvas.fg_mut();

        for (i, bits) in render.rows().enumerate() {
            let Some(row) = cell_index(first_row, i, lines) else {
                continue;
            };
            for (j, &mask) in bits.iter().enumerate() {
                if let Some(col) = cell_index(first_col, j, columns) {
                    fg.draw_cell(row * usize::from(columns) + col, mask, color);
                }
            }
        }
    }
}

/// Cells needed to hold `pixels` shifted by `offset`, at `per_cell` pixels
/// per cell, rounding up.
fn cells(what: &'static str, pixels: u32, offset: u32, per_cell: u32) -> Result<u16> {
    pixels
        .checked_add(offset)
        .and_then(|n| u16::try_from(n.div_ceil(per_cell)).ok())
        .ok_or_else(|| Error::InvalidDimension {
            what,
            value: u64::from(pixels),
        })
}

/// `start + offset` as a cell index, if it lands inside `0..limit`.
fn cell_index(start: i32, offset: usize, limit: u16) -> Option<usize> {
    let pos = i64::from(start) + i64::try_from(offset).ok()?;
    usize::try_from(pos).ok().filter(|&p| p < usize::from(limit))
}

/// Sprite coordinates are bounded by `u16` cell counts, so they fit `i32`.
fn to_i32(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::Sextant;

    fn canvas() -> Canvas {
        Canvas::with_char_dimensions(6, 4, Color::BLACK).unwrap()
    }

    // ── Construction ────────────────────────────────────────────────────

    #[test]
    fn text_dimensions_use_longest_row() {
        let s = Sprite::from_text(&["#.", "###", "#"]).unwrap();
        assert_eq!((s.width(), s.height()), (3, 3));
    }

    #[test]
    fn text_width_counts_characters_not_bytes() {
        let s = Sprite::from_text(&["██"]).unwrap();
        assert_eq!(s.width(), 2);
    }

    #[test]
    fn empty_text_rejected() {
        let none: [&str; 0] = [];
        assert!(matches!(
            Sprite::from_text(&none),
            Err(Error::InvalidDimension { .. })
        ));
        assert!(Sprite::from_text(&["", ""]).is_err());
    }

    #[test]
    fn oversized_source_is_an_error() {
        struct Endless;
        impl PixelReader for Endless {
            fn width(&self) -> u32 {
                u32::MAX
            }
            fn height(&self) -> u32 {
                u32::MAX
            }
            fn pixel(&self, _: i32, _: i32) -> Color {
                Color::CLEAR
            }
        }

        assert!(matches!(
            Sprite::from_reader(&Endless),
            Err(Error::InvalidDimension { .. })
        ));
        assert!(cells("width", u32::MAX, 1, 2).is_err());
        assert_eq!(cells("height", 4, 2, 3).unwrap(), 2);
    }

    #[test]
    fn phase_renders_are_sized_to_whole_cells() {
        let s = Sprite::from_text(&["###", "###", "###", "###"]).unwrap();
        let sizes: Vec<(u16, u16)> = (0..6)
            .map(|i| (s.phase(i).width_in_chars(), s.phase(i).height_in_chars()))
            .collect();
        assert_eq!(sizes, vec![(2, 2), (2, 2), (2, 2), (2, 2), (2, 2), (2, 2)]);

        let small = Sprite::from_text(&["##", "##", "##"]).unwrap();
        assert_eq!(small.phase(0).width_in_chars(), 1);
        assert_eq!(small.phase(1).width_in_chars(), 2);
        assert_eq!(small.phase(0).height_in_chars(), 1);
        assert_eq!(small.phase(2).height_in_chars(), 2);
    }

    #[test]
    fn blank_characters_are_transparent() {
        let s = Sprite::from_text(&[". -+#"]).unwrap();
        let render = s.phase(0);
        for x in 0..4 {
            assert_eq!(render.pixel(x, 0), Color::CLEAR);
        }
        assert_eq!(render.pixel(4, 0), Color::OPAQUE_WHITE);
    }

    #[test]
    fn phases_shift_the_bitmap() {
        let s = Sprite::from_text(&["#"]).unwrap();
        assert_eq!(s.phase(0).bits_at(0), Sextant::TOP_LEFT);
        assert_eq!(s.phase(1).bits_at(0), Sextant::TOP_RIGHT);
        assert_eq!(s.phase(4).bits_at(0), Sextant::BOTTOM_LEFT);
        assert_eq!(s.phase(5).bits_at(0), Sextant::BOTTOM_RIGHT);
    }

    // ── Placement ───────────────────────────────────────────────────────

    #[test]
    fn single_pixel_lands_exactly_everywhere() {
        let dot = Sprite::from_text(&["#"]).unwrap();
        for y in 0..12 {
            for x in 0..12 {
                let mut c = canvas();
                dot.write_sprite(&mut c, x, y, Color::RED);
                assert_eq!(c.pixel(x, y), Color::RED, "at ({x}, {y})");
                let set: u32 = c.fg().as_bits().iter().map(|b| b.bits().count_ones()).sum();
                assert_eq!(set, 1, "at ({x}, {y})");
            }
        }
    }

    #[test]
    fn shape_matches_text_at_odd_offset() {
        let s = Sprite::from_text(&["#.#", ".#.", "#.#", "..."]).unwrap();
        let mut c = canvas();
        s.write_sprite(&mut c, 3, 4, Color::CYAN);

        for (dy, row) in ["#.#", ".#.", "#.#", "..."].iter().enumerate() {
            for (dx, ch) in row.chars().enumerate() {
                let expected = if ch == '#' { Color::CYAN } else { Color::CLEAR };
                assert_eq!(c.pixel(3 + dx as i32, 4 + dy as i32), expected);
            }
        }
    }

    #[test]
    fn drawing_is_additive() {
        let s = Sprite::from_text(&["#"]).unwrap();
        let mut c = canvas();
        c.set_pixel(1, 2, Color::BLUE);
        s.write_sprite(&mut c, 0, 0, Color::RED);

        assert_eq!(c.fg().bits_at(0), Sextant::TOP_LEFT | Sextant::BOTTOM_RIGHT);
        assert_eq!(c.fg().color_at(0), Color::RED);
    }

    #[test]
    fn empty_cells_keep_their_color() {
        // Phase 0 of a 1×1 sprite touches only cell 0.
        let s = Sprite::from_text(&["#"]).unwrap();
        let mut c = canvas();
        c.set_pixel(2, 0, Color::BLUE);
        s.write_sprite(&mut c, 0, 0, Color::RED);
        assert_eq!(c.fg().color_at(1), Color::BLUE);
    }

    #[test]
    fn partially_off_the_left_edge() {
        let s = Sprite::from_text(&["####", "####", "####"]).unwrap();
        let mut c = canvas();
        s.write_sprite(&mut c, -2, 0, Color::GREEN);

        assert_eq!(c.fg().bits_at(0), Sextant::FULL);
        assert_eq!(c.pixel(1, 2), Color::GREEN);
        assert_eq!(c.pixel(2, 0), Color::CLEAR);
    }

    #[test]
    fn partially_off_every_edge() {
        let s = Sprite::from_text(&["###", "###", "###", "###"]).unwrap();
        let mut c = canvas();

        s.write_sprite(&mut c, -1, -1, Color::RED);
        assert_eq!(c.pixel(0, 0), Color::RED);
        assert_eq!(c.pixel(1, 2), Color::RED);
        assert_eq!(c.pixel(2, 0), Color::CLEAR);

        s.write_sprite(&mut c, 10, 10, Color::YELLOW);
        assert_eq!(c.pixel(11, 11), Color::YELLOW);
        assert_eq!(c.pixel(10, 10), Color::YELLOW);
    }

    #[test]
    fn entirely_off_canvas_is_a_no_op() {
        let s = Sprite::from_text(&["##"]).unwrap();
        let mut c = canvas();
        let before = c.clone();
        s.write_sprite(&mut c, -10, -10, Color::RED);
        s.write_sprite(&mut c, 100, 3, Color::RED);
        s.write_sprite(&mut c, i32::MIN, i32::MAX, Color::RED);
        assert_eq!(c, before);
    }
}
