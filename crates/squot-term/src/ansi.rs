// SPDX-License-Identifier: MIT
//
// ANSI escape sequence generation.
//
// Pure functions that write escape sequences to any `impl Write`. No state,
// no decisions about when to emit; that's the canvas printer's job. Color
// escapes live in `codec` because they are table driven; this module covers
// cursor movement, resets, and the SGR text attributes.
//
// Cursor coordinates in this module are the terminal's own 1-based values.
// Zero is rejected rather than silently bumped to 1.

use std::io::{self, Write};

use crate::error::{Error, Result};

/// Control Sequence Introducer.
pub const ESC: &str = "\x1b[";

// ─── Cursor ──────────────────────────────────────────────────────────────────

/// Move the cursor to `(row, column)` using CUP. Top left is `(1, 1)`.
///
/// # Errors
///
/// Returns [`Error::InvalidCursor`] if either coordinate is 0, or
/// [`Error::Io`] if the writer fails.
pub fn goto(w: &mut impl Write, row: u16, column: u16) -> Result<()> {
    if row < 1 || column < 1 {
        return Err(Error::InvalidCursor { row, column });
    }
    write!(w, "\x1b[{row};{column}H")?;
    Ok(())
}

/// Move the cursor to the top-left corner (`ESC[1;1H`).
#[inline]
pub fn home(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[1;1H")
}

/// Cursor Horizontal Absolute (CHA). The leftmost column is 1.
///
/// # Errors
///
/// Returns [`Error::InvalidCursor`] if `column` is 0.
pub fn cursor_column(w: &mut impl Write, column: u16) -> Result<()> {
    if column < 1 {
        return Err(Error::InvalidCursor { row: 1, column });
    }
    write!(w, "\x1b[{column}G")?;
    Ok(())
}

/// Hide the cursor (DECTCEM reset).
#[inline]
pub fn cursor_hide(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25l")
}

/// Show the cursor (DECTCEM set).
#[inline]
pub fn cursor_show(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25h")
}

/// Clear the entire screen (ED 2).
#[inline]
pub fn clear_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[2J")
}

// ─── SGR ─────────────────────────────────────────────────────────────────────

/// Reset all SGR attributes to terminal defaults (SGR 0).
///
/// This clears colors too; any printer tracking the last emitted color must
/// forget it after calling this.
#[inline]
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[0m")
}

/// Single-parameter SGR text attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sgr {
    /// All attributes off.
    Reset,
    /// Bold or increased intensity.
    Bold,
    /// Faint, decreased intensity, or dim.
    Faint,
    /// Italic. Not widely supported; sometimes rendered as inverse.
    Italic,
    /// Underline.
    Underline,
    /// Slow blink, under 150 per minute.
    Blink,
    /// Rapid blink. Rarely supported.
    RapidBlink,
    /// Swap foreground and background.
    Invert,
    /// Conceal. Not widely supported.
    Conceal,
    /// Crossed out.
    Strike,
    /// Primary (default) font.
    DefaultFont,
    /// Fraktur (gothic). Rarely supported.
    Fraktur,
}

impl Sgr {
    /// The numeric SGR parameter.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Reset => 0,
            Self::Bold => 1,
            Self::Faint => 2,
            Self::Italic => 3,
            Self::Underline => 4,
            Self::Blink => 5,
            Self::RapidBlink => 6,
            Self::Invert => 7,
            Self::Conceal => 8,
            Self::Strike => 9,
            Self::DefaultFont => 10,
            Self::Fraktur => 20,
        }
    }
}

/// Emit one SGR attribute.
pub fn sgr(w: &mut impl Write, attr: Sgr) -> io::Result<()> {
    write!(w, "\x1b[{}m", attr.code())
}

/// Select alternative font 1 to 9 (SGR 11–19).
///
/// # Errors
///
/// Returns [`Error::InvalidFont`] if `font` is outside `1..=9`.
pub fn alt_font(w: &mut impl Write, font: u8) -> Result<()> {
    if !(1..=9).contains(&font) {
        return Err(Error::InvalidFont(font));
    }
    write!(w, "\x1b[{}m", 10 + font)?;
    Ok(())
}

// ─── Tests ───────────────────────────────────────────────────────────────────
