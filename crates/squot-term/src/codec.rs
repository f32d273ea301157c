// SPDX-License-Identifier: MIT
//
// ColorCodec — table-driven color escape encoding.
//
// Color escapes are the hottest bytes on the emission path: a full-screen
// 24-bit picture changes color on almost every cell. So the codec builds its
// tables once, explicitly, and then only copies bytes:
//
//   fg[256] / bg[256]  complete escape for each palette index
//                      (30–37, 90–97 / 40–47, 100–107 for 0–15,
//                       38;5;n / 48;5;n for 16–255)
//   decimal[256]       "0".."255" without leading zeros, for 38;2;r;g;b
//
// The tables are built by `ColorCodec::new()` rather than lazily on first
// use, so initialization order is visible and the codec can be constructed
// (and tested) like any other value.
//
// The codec also carries the caller's `ColorMode`. In palette mode every
// 24-bit color is mapped onto the 256-color palette before encoding, so the
// canvas printers never need to know which family goes on the wire.

use std::io::{self, Write};

use crate::color::{Color, ColorMode};

const FG_TRUECOLOR_PREFIX: &[u8] = b"\x1b[38;2;";
const BG_TRUECOLOR_PREFIX: &[u8] = b"\x1b[48;2;";
const FG_DEFAULT: &[u8] = b"\x1b[39m";
const BG_DEFAULT: &[u8] = b"\x1b[49m";

/// Precomputed color escape tables.
#[derive(Debug, Clone)]
pub struct ColorCodec {
    fg: Vec<Box<[u8]>>,
    bg: Vec<Box<[u8]>>,
    decimal: Vec<Box<[u8]>>,
    mode: ColorMode,
}

impl ColorCodec {
    /// Build every table, emitting 24-bit colors as-is.
    #[must_use]
    pub fn new() -> Self {
        Self::with_mode(ColorMode::TrueColor)
    }

    /// Build every table for the given output mode.
    #[must_use]
    pub fn with_mode(mode: ColorMode) -> Self {
        let fg = (0..=255u8).map(|i| palette_escape(i, 30, 90, 38)).collect();
        let bg = (0..=255u8).map(|i| palette_escape(i, 40, 100, 48)).collect();
        let decimal = (0..=255u8)
            .map(|i| i.to_string().into_bytes().into_boxed_slice())
            .collect();

        tracing::debug!(?mode, "built color escape tables");
        Self { fg, bg, decimal, mode }
    }

    /// The output mode this codec encodes for.
    #[inline]
    #[must_use]
    pub const fn mode(&self) -> ColorMode {
        self.mode
    }

    /// Write the foreground escape for `color`.
    ///
    /// CLEAR has no color of its own, so it selects the terminal default
    /// (`39m`).
    pub fn fg(&self, w: &mut impl Write, color: Color) -> io::Result<()> {
        match self.mode.apply(color) {
            Color::Palette(idx) => w.write_all(&self.fg[usize::from(idx)]),
            Color::Rgb(r, g, b) => self.truecolor(w, FG_TRUECOLOR_PREFIX, r, g, b),
            Color::Clear => w.write_all(FG_DEFAULT),
        }
    }

    /// Write the background escape for `color`.
    ///
    /// CLEAR selects the terminal default (`49m`).
    pub fn bg(&self, w: &mut impl Write, color: Color) -> io::Result<()> {
        match self.mode.apply(color) {
            Color::Palette(idx) => w.write_all(&self.bg[usize::from(idx)]),
            Color::Rgb(r, g, b) => self.truecolor(w, BG_TRUECOLOR_PREFIX, r, g, b),
            Color::Clear => w.write_all(BG_DEFAULT),
        }
    }

    /// Foreground escape as owned bytes (for tests and ad hoc text).
    #[must_use]
    pub fn fg_bytes(&self, color: Color) -> Vec<u8> {
        self.escape_bytes(&self.fg, FG_TRUECOLOR_PREFIX, FG_DEFAULT, color)
    }

    /// Background escape as owned bytes (for tests and ad hoc text).
    #[must_use]
    pub fn bg_bytes(&self, color: Color) -> Vec<u8> {
        self.escape_bytes(&self.bg, BG_TRUECOLOR_PREFIX, BG_DEFAULT, color)
    }

    fn escape_bytes(&self, table: &[Box<[u8]>], prefix: &[u8], default: &[u8], color: Color) -> Vec<u8> {
        match self.mode.apply(color) {
            Color::Palette(idx) => table[usize::from(idx)].to_vec(),
            Color::Rgb(r, g, b) => {
                let mut out = Vec::with_capacity(20);
                out.extend_from_slice(prefix);
                out.extend_from_slice(self.decimal(r));
                out.push(b';');
                out.extend_from_slice(self.decimal(g));
                out.push(b';');
                out.extend_from_slice(self.decimal(b));
                out.push(b'm');
                out
            }
            Color::Clear => default.to_vec(),
        }
    }

    /// Decimal text of a channel value, no leading zeros.
    #[inline]
    #[must_use]
    pub fn decimal(&self, value: u8) -> &[u8] {
        &self.decimal[usize::from(value)]
    }

    fn truecolor(&self, w: &mut impl Write, prefix: &[u8], r: u8, g: u8, b: u8) -> io::Result<()> {
        w.write_all(prefix)?;
        w.write_all(self.decimal(r))?;
        w.write_all(b";")?;
        w.write_all(self.decimal(g))?;
        w.write_all(b";")?;
        w.write_all(self.decimal(b))?;
        w.write_all(b"m")
    }
}

impl Default for ColorCodec {
    fn default() -> Self {
        Self::new()
    }
}

/// Escape for one palette index: direct codes for 0–15, indexed for the rest.
fn palette_escape(idx: u8, base: u16, bright_base: u16, extended: u16) -> Box<[u8]> {
    let s = match idx {
        0..=7 => format!("\x1b[{}m", base + u16::from(idx)),
        8..=15 => format!("\x1b[{}m", bright_base + u16::from(idx - 8)),
        _ => format!("\x1b[{extended};5;{idx}m"),
    };
    s.into_bytes().into_boxed_slice()
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fg(color: Color) -> String {
        String::from_utf8(ColorCodec::new().fg_bytes(color)).unwrap()
    }

    fn bg(color: Color) -> String {
        String::from_utf8(ColorCodec::new().bg_bytes(color)).unwrap()
    }

    // ── Palette ─────────────────────────────────────────────────────────

    #[test]
    fn fg_palette_black() {
        assert_eq!(fg(Color::BLACK), "\x1b[30m");
    }

    #[test]
    fn fg_palette_standard_white() {
        assert_eq!(fg(Color::WHITE), "\x1b[37m");
    }

    #[test]
    fn fg_palette_bright() {
        assert_eq!(fg(Color::Palette(8)), "\x1b[90m");
        assert_eq!(fg(Color::Palette(15)), "\x1b[97m");
    }

    #[test]
    fn fg_palette_extended() {
        assert_eq!(fg(Color::Palette(16)), "\x1b[38;5;16m");
        assert_eq!(fg(Color::Palette(255)), "\x1b[38;5;255m");
    }

    #[test]
    fn bg_palette_direct_codes() {
        assert_eq!(bg(Color::BLACK), "\x1b[40m");
        assert_eq!(bg(Color::Palette(7)), "\x1b[47m");
        assert_eq!(bg(Color::Palette(8)), "\x1b[100m");
        assert_eq!(bg(Color::Palette(15)), "\x1b[107m");
    }

    #[test]
    fn bg_palette_extended() {
        assert_eq!(bg(Color::Palette(200)), "\x1b[48;5;200m");
    }

    // ── TrueColor ───────────────────────────────────────────────────────

    #[test]
    fn bg_truecolor_no_leading_zeros() {
        assert_eq!(bg(Color::rgb(255, 0, 128)), "\x1b[48;2;255;0;128m");
    }

    #[test]
    fn fg_truecolor() {
        assert_eq!(fg(Color::rgb(7, 80, 255)), "\x1b[38;2;7;80;255m");
    }

    #[test]
    fn decimal_table_matches_to_string() {
        let codec = ColorCodec::new();
        for v in 0..=255u8 {
            assert_eq!(codec.decimal(v), v.to_string().as_bytes());
        }
    }

    #[test]
    fn owned_bytes_match_streamed_escapes() {
        for mode in [ColorMode::TrueColor, ColorMode::Palette] {
            let codec = ColorCodec::with_mode(mode);
            for color in [Color::BLACK, Color::Palette(200), Color::rgb(7, 80, 255), Color::CLEAR] {
                let (mut fg, mut bg) = (Vec::new(), Vec::new());
                codec.fg(&mut fg, color).unwrap();
                codec.bg(&mut bg, color).unwrap();
                assert_eq!(codec.fg_bytes(color), fg, "{mode:?} fg {color:?}");
                assert_eq!(codec.bg_bytes(color), bg, "{mode:?} bg {color:?}");
            }
        }
    }

    // ── CLEAR ───────────────────────────────────────────────────────────

    #[test]
    fn clear_selects_terminal_default() {
        assert_eq!(fg(Color::Clear), "\x1b[39m");
        assert_eq!(bg(Color::Clear), "\x1b[49m");
    }

    // ── ColorMode ───────────────────────────────────────────────────────

    #[test]
    fn palette_mode_downgrades_truecolor() {
        let codec = ColorCodec::with_mode(ColorMode::Palette);
        assert_eq!(codec.mode(), ColorMode::Palette);
        // Pure red sits on a cube corner: 16 + 36 * 5.
        assert_eq!(codec.fg_bytes(Color::rgb(255, 0, 0)), b"\x1b[38;5;196m");
        assert_eq!(codec.bg_bytes(Color::RED), b"\x1b[41m");
    }
}
