// SPDX-License-Identifier: MIT
//
// Whole-character renderings of a plain color grid.
//
// Squots trade color resolution for shape: one color per six sub-pixels.
// For photographs the opposite trade often looks better, so an `Image` can
// also be printed as
//
//   half blocks  '▀' per cell, top pixel as foreground, bottom pixel as
//                background: two full-color pixels per cell
//   full chars   a space per cell with the pixel as background: one
//                full-color pixel per cell, handy behind squot sprites
//
// Each line ends with a reset and a line feed.

use std::io;

use crate::ansi;
use crate::codec::ColorCodec;
use crate::color::Color;
use crate::image::{Image, PixelReader};
use crate::output::{OutputBuffer, SquotWriter};

/// Upper half block.
pub const UPPER_HALF: char = '▀';

/// Print `image` two pixel rows per line using upper half blocks.
///
/// An odd last row is paired with CLEAR, which shows the terminal's default
/// background.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn print_half_blocks(image: &Image, out: &mut OutputBuffer, codec: &ColorCodec) -> io::Result<()> {
    let height = i32::try_from(image.height()).unwrap_or(i32::MAX);
    let width = i32::try_from(image.width()).unwrap_or(i32::MAX);

    for y in (0..height).step_by(2) {
        let mut writer = SquotWriter::new();
        for x in 0..width {
            let top = image.pixel(x, y);
            let bottom = image.pixel(x, y + 1);
            writer.write_char(out, codec, top, bottom, UPPER_HALF)?;
        }
        ansi::reset(out)?;
        out.write_str("\n");
    }
    Ok(())
}

/// Print `image` one pixel per cell as colored spaces.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn print_full_chars(image: &Image, out: &mut OutputBuffer, codec: &ColorCodec) -> io::Result<()> {
    for row in image.rows() {
        let mut writer = SquotWriter::new();
        for &color in row {
            writer.write_char(out, codec, Color::CLEAR, color, ' ')?;
        }
        ansi::reset(out)?;
        out.write_str("\n");
    }
    Ok(())
}

// ─── Tests ───────────────────────────────────────────────────────────────────
