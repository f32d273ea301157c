// SPDX-License-Identifier: MIT
//
// Canvas — one rendered frame: a squot foreground over a cell background.
//
// Two layers of identical cell dimensions:
//
//   fg  SquotImage  six sub-pixels and one color per cell
//   bg  Image       one color per cell
//
// Two ways to get a canvas onto the terminal:
//
//   print()       full redraw. Every cell, every row, colors only when they
//                 change from the previous cell in the same row.
//
//   print_diff()  incremental redraw against the previously displayed
//                 canvas. Unchanged cells are skipped entirely; the first
//                 dirty cell after a skip gets a cursor-column move.
//
// Both write into an OutputBuffer and never touch the terminal themselves.
// The caller decides when to flush.

use std::io;

use crate::ansi;
use crate::codec::ColorCodec;
use crate::color::Color;
use crate::error::{Error, Result};
use crate::geometry::{make_divisible_by_3, make_even};
use crate::glyph::Sextant;
use crate::image::{Image, PixelReader, PixelWriter, check_dimension};
use crate::output::{OutputBuffer, SquotWriter};
use crate::squot::SquotImage;

// ─── RenderStats ─────────────────────────────────────────────────────────────

/// Statistics from a print pass, for profiling and debugging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    /// Cells whose glyph and colors were emitted.
    pub cells_rendered: usize,
    /// Cells that matched the previous frame and were skipped.
    pub cells_skipped: usize,
    /// Bytes appended to the output buffer, including any callback output.
    pub bytes_written: usize,
}

impl RenderStats {
    /// Total cells processed (rendered + skipped).
    #[inline]
    #[must_use]
    pub const fn total_cells(&self) -> usize {
        self.cells_rendered + self.cells_skipped
    }
}

// ─── CanvasRow ───────────────────────────────────────────────────────────────

/// One character row of a [`Canvas`], all three layers aligned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasRow<'a> {
    /// Squot masks.
    pub bits: &'a [Sextant],
    /// Foreground colors.
    pub fg: &'a [Color],
    /// Background colors.
    pub bg: &'a [Color],
}

// ─── Canvas ──────────────────────────────────────────────────────────────────

/// A squot foreground paired with a per-cell background.
///
/// ```
/// use squot_term::canvas::Canvas;
/// use squot_term::codec::ColorCodec;
/// use squot_term::color::Color;
/// use squot_term::image::PixelWriter;
/// use squot_term::output::OutputBuffer;
///
/// let mut canvas = Canvas::with_char_dimensions(4, 3, Color::BLACK).unwrap();
/// canvas.fg_mut().set_pixel(0, 0, Color::RED);
///
/// let mut out = OutputBuffer::new();
/// canvas.print(&mut out, &ColorCodec::new(), false).unwrap();
/// assert!(out.as_bytes().starts_with("\x1b[31m\x1b[40m\u{1FB00}".as_bytes()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    fg: SquotImage,
    bg: Image,
}

impl Canvas {
    /// A blank canvas `width_in_chars × height_in_chars` cells large with
    /// every background cell set to `bg`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if either dimension is zero.
    pub fn with_char_dimensions(width_in_chars: u16, height_in_chars: u16, bg: Color) -> Result<Self> {
        let fg = SquotImage::new(width_in_chars, height_in_chars)?;
        let bg = Image::new(u32::from(width_in_chars), u32::from(height_in_chars), bg)?;
        Ok(Self { fg, bg })
    }

    /// A blank canvas covering at least `width × height` pixels.
    ///
    /// Width rounds up to even and height to a multiple of three, so the
    /// canvas always consists of whole cells.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if either dimension is zero or the
    /// cell count does not fit a terminal coordinate.
    pub fn with_pixel_dimensions(width: u32, height: u32, bg: Color) -> Result<Self> {
        let width = check_dimension("width", width)?;
        let height = check_dimension("height", height)?;
        let chars = |what, pixels: u32, rounded: Option<u32>, per_cell: u32| {
            rounded
                .and_then(|n| u16::try_from(n / per_cell).ok())
                .ok_or_else(|| Error::InvalidDimension {
                    what,
                    value: u64::from(pixels),
                })
        };

        Self::with_char_dimensions(
            chars("width", width, make_even(width), 2)?,
            chars("height", height, make_divisible_by_3(height), 3)?,
            bg,
        )
    }

    // ─── Layers ──────────────────────────────────────────────────────────

    /// The squot foreground.
    #[inline]
    #[must_use]
    pub const fn fg(&self) -> &SquotImage {
        &self.fg
    }

    /// The squot foreground, for drawing.
    #[inline]
    pub fn fg_mut(&mut self) -> &mut SquotImage {
        &mut self.fg
    }

    /// The background grid, one entry per cell.
    #[inline]
    #[must_use]
    pub const fn bg(&self) -> &Image {
        &self.bg
    }

    /// The background grid, for painting.
    #[inline]
    pub fn bg_mut(&mut self) -> &mut Image {
        &mut self.bg
    }

    /// Width in cells.
    #[inline]
    #[must_use]
    pub const fn width_in_chars(&self) -> u16 {
        self.fg.width_in_chars()
    }

    /// Height in cells.
    #[inline]
    #[must_use]
    pub const fn height_in_chars(&self) -> u16 {
        self.fg.height_in_chars()
    }

    /// Width in pixels.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.fg.width()
    }

    /// Height in pixels.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.fg.height()
    }

    /// Clear the foreground and set every background cell to `bg`.
    pub fn clear(&mut self, bg: Color) {
        self.fg.clear();
        self.bg.fill(bg);
    }

    /// Aligned `(bits, fg, bg)` slices, one per character row.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = CanvasRow<'_>> + '_ {
        self.fg
            .squot_rows()
            .zip(self.bg.rows())
            .map(|(row, bg)| CanvasRow {
                bits: row.bits,
                fg: row.colors,
                bg,
            })
    }

    // ─── Full redraw ─────────────────────────────────────────────────────

    /// Render every cell.
    ///
    /// With `home`, the cursor moves to the top-left corner first; without
    /// it, output starts wherever the cursor is. Each row ends with an
    /// attribute reset, and rows are separated by line feeds (the last row
    /// has none, so the frame never scrolls the terminal).
    ///
    /// # Errors
    ///
    /// Only fails if writing to `out` fails.
    pub fn print(&self, out: &mut OutputBuffer, codec: &ColorCodec, home: bool) -> io::Result<RenderStats> {
        let start = out.len();
        let mut stats = RenderStats::default();

        if home {
            ansi::home(out)?;
        }

        for (y, row) in self.rows().enumerate() {
            if y > 0 {
                out.write_str("\n");
            }

            let mut writer = SquotWriter::new();
            for ((&bits, &fg), &bg) in row.bits.iter().zip(row.fg).zip(row.bg) {
                writer.write_cell(out, codec, fg, bg, bits)?;
            }
            stats.cells_rendered += row.bits.len();

            ansi::reset(out)?;
        }

        stats.bytes_written = out.len() - start;
        tracing::debug!(
            cells = stats.cells_rendered,
            bytes = stats.bytes_written,
            "printed full canvas"
        );
        Ok(stats)
    }

    // ─── Incremental redraw ──────────────────────────────────────────────

    /// Render only the cells that differ from `old`, the canvas currently
    /// on screen.
    ///
    /// A cell is unchanged when its background matches and either both
    /// masks are empty or masks and foreground colors both match. Two blank
    /// cells compare equal whatever foreground color they remember, since a
    /// blank glyph shows no foreground.
    ///
    /// If `on_after_draw` is given, the cursor goes home, colors are forced
    /// to white on black, and the callback may write overlay text into
    /// `out`. That text is not tracked: the next diff will not repaint under
    /// it unless the cells beneath change. Output always ends with an
    /// attribute reset.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the canvases differ in pixel
    /// size, or [`Error::Io`] if writing fails.
    pub fn print_diff(
        &self,
        old: &Self,
        out: &mut OutputBuffer,
        codec: &ColorCodec,
        on_after_draw: Option<&mut dyn FnMut(&mut OutputBuffer)>,
    ) -> Result<RenderStats> {
        if self.width() != old.width() || self.height() != old.height() {
            return Err(Error::DimensionMismatch {
                new_width: self.width(),
                new_height: self.height(),
                old_width: old.width(),
                old_height: old.height(),
            });
        }

        let start = out.len();
        let mut stats = RenderStats::default();
        ansi::home(out)?;

        for (y, (new_row, old_row)) in self.rows().zip(old.rows()).enumerate() {
            if y > 0 {
                out.write_str("\n");
            }

            let mut run: Option<SquotWriter> = None;
            let mut row_rendered = 0usize;
            for x in 0..new_row.bits.len() {
                let bits = new_row.bits[x];
                let old_bits = old_row.bits[x];
                let unchanged = ((bits.is_empty() && old_bits.is_empty())
                    || (bits == old_bits && new_row.fg[x] == old_row.fg[x]))
                    && new_row.bg[x] == old_row.bg[x];

                if unchanged {
                    run = None;
                    continue;
                }

                if run.is_none() {
                    // x < width_in_chars ≤ u16::MAX, so x + 1 always fits.
                    let column = u16::try_from(x + 1).unwrap_or(u16::MAX);
                    ansi::cursor_column(out, column)?;
                }
                let writer = run.get_or_insert_with(SquotWriter::new);
                writer.write_cell(out, codec, new_row.fg[x], new_row.bg[x], bits)?;
                row_rendered += 1;
            }

            tracing::trace!(row = y, cells = row_rendered, "diffed row");
            stats.cells_rendered += row_rendered;
            stats.cells_skipped += new_row.bits.len() - row_rendered;
        }

        if let Some(callback) = on_after_draw {
            ansi::home(out)?;
            codec.fg(out, Color::WHITE)?;
            codec.bg(out, Color::BLACK)?;
            callback(&mut *out);
        }

        ansi::reset(out)?;

        stats.bytes_written = out.len() - start;
        tracing::debug!(
            rendered = stats.cells_rendered,
            skipped = stats.cells_skipped,
            bytes = stats.bytes_written,
            "printed canvas diff"
        );
        Ok(stats)
    }
}

impl PixelReader for Canvas {
    fn width(&self) -> u32 {
        Self::width(self)
    }

    fn height(&self) -> u32 {
        Self::height(self)
    }

    /// The foreground pixel; background does not show through a read.
    fn pixel(&self, x: i32, y: i32) -> Color {
        self.fg.pixel(x, y)
    }
}

impl PixelWriter for Canvas {
    fn width(&self) -> u32 {
        Self::width(self)
    }

    fn height(&self) -> u32 {
        Self::height(self)
    }

    /// Draw on the foreground.
    fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        self.fg.set_pixel(x, y, color);
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
