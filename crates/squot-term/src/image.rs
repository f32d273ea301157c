// SPDX-License-Identifier: MIT
//
// Pixel sources, pixel sinks, and the plain color grid.
//
// Everything that can be sampled implements `PixelReader`; everything that
// can be drawn on implements `PixelWriter`. The resampler, the line drawer
// and the demo code only speak these two traits, so a decoded photo, a
// squot bitmap and a background grid are interchangeable.
//
// Coordinates are signed. Drawing code routinely computes positions off the
// edge, and the contract is that this is fine: reads outside the grid return
// `Color::CLEAR`, writes outside it do nothing.

use crate::color::Color;
use crate::error::{Error, Result};

// ─── Traits ──────────────────────────────────────────────────────────────────

/// Something with a width, a height, and a color at each pixel.
pub trait PixelReader {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// The color at `(x, y)`. Out-of-range coordinates return
    /// [`Color::CLEAR`].
    fn pixel(&self, x: i32, y: i32) -> Color;
}

/// Something pixels can be written to.
pub trait PixelWriter {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Store `color` at `(x, y)`. Out-of-range coordinates are ignored.
    fn set_pixel(&mut self, x: i32, y: i32, color: Color);
}

/// Check a dimension is positive and return it.
pub(crate) fn check_dimension(what: &'static str, value: u32) -> Result<u32> {
    if value == 0 {
        Err(Error::InvalidDimension {
            what,
            value: u64::from(value),
        })
    } else {
        Ok(value)
    }
}

// ─── Image ───────────────────────────────────────────────────────────────────

/// A rectangular grid of colors, stored row-major.
///
/// As a canvas background, one entry is one terminal cell. As a resampler
/// target it is one pixel per entry, ready for half-block or full-character
/// output.
///
/// ```
/// use squot_term::color::Color;
/// use squot_term::image::{Image, PixelReader, PixelWriter};
///
/// let mut img = Image::new(4, 2, Color::BLACK).unwrap();
/// img.set_pixel(3, 1, Color::RED);
/// img.set_pixel(9, 9, Color::RED); // ignored
///
/// assert_eq!(img.pixel(3, 1), Color::RED);
/// assert_eq!(img.pixel(-1, 0), Color::CLEAR);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    data: Vec<Color>,
}

impl Image {
    /// Create a `width × height` grid filled with `fill`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if either dimension is zero.
    pub fn new(width: u32, height: u32, fill: Color) -> Result<Self> {
        let width = check_dimension("width", width)?;
        let height = check_dimension("height", height)?;
        let len = width as usize * height as usize;
        Ok(Self {
            width,
            height,
            data: vec![fill; len],
        })
    }

    /// Width in entries.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in entries.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Row-major index of `(x, y)`, or `None` if out of bounds.
    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = u32::try_from(x).ok()?;
        let y = u32::try_from(y).ok()?;
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    /// Color at a flat index. Panics if out of range.
    #[inline]
    #[must_use]
    pub fn at(&self, index: usize) -> Color {
        self.data[index]
    }

    /// Fill every entry with `color`.
    pub fn fill(&mut self, color: Color) {
        self.data.fill(color);
    }

    /// All entries, row-major.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Color] {
        &self.data
    }

    /// All entries, row-major, mutably.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Color] {
        &mut self.data
    }

    /// One slice per row, top to bottom.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[Color]> + '_ {
        self.data.chunks_exact(self.width as usize)
    }
}

impl PixelReader for Image {
    fn width(&self) -> u32 {
        Self::width(self)
    }

    fn height(&self) -> u32 {
        Self::height(self)
    }

    fn pixel(&self, x: i32, y: i32) -> Color {
        self.index(x, y).map_or(Color::CLEAR, |i| self.data[i])
    }
}

impl PixelWriter for Image {
    fn width(&self) -> u32 {
        Self::width(self)
    }

    fn height(&self) -> u32 {
        Self::height(self)
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.data[i] = color;
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
