// SPDX-License-Identifier: MIT
//
// squot color model — palette indices, 24-bit RGB, and the CLEAR sentinel.
//
// The packed form used by config files and raw color tables is one 32-bit
// integer whose high byte is the discriminant:
//
//   0x00nnnnnn  8-bit palette index in the low byte (0–255)
//   0xFFrrggbb  24-bit color
//   0x00FFFFFF  CLEAR — "no color", fully transparent
//
// The packed form exists only at the boundary (`from_packed` /
// `to_packed`). Everything else works on the tagged `Color` enum, so a stray
// alpha byte or a palette index above 255 is rejected on the way in and can
// never be stored.
//
// Raw decoded pixels carry alpha. The resampler reads and writes through
// `to_argb` / `from_argb`: palette colors are sampled via their xterm RGB
// values and a fully transparent sample comes back as CLEAR.

use std::fmt;

use crate::error::{Error, Result};

// ─── Color ───────────────────────────────────────────────────────────────────

/// A terminal color: palette index, 24-bit RGB, or nothing at all.
///
/// # Examples
///
/// ```
/// use squot_term::color::Color;
///
/// let red = Color::RED;
/// let orange = Color::rgb(255, 128, 0);
/// let teal = Color::cube(0, 3, 3).unwrap();
///
/// assert_eq!(red.to_packed(), 0x0000_0001);
/// assert_eq!(orange.to_packed(), 0xFF_FF_80_00);
/// assert_eq!(teal, Color::Palette(16 + 18 + 3));
/// assert!(Color::cube(6, 0, 0).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// 8-bit palette index: 0–15 direct colors, 16–231 cube, 232–255 greys.
    Palette(u8),

    /// 24-bit `TrueColor`.
    Rgb(u8, u8, u8),

    /// No color. Reading an unset pixel yields this; writing it clears.
    Clear,
}

/// Offset from a base color (0–7) to its bright variant (8–15).
pub const BRIGHT: u8 = 8;

/// Packed form of [`Color::Clear`].
pub const CLEAR_PACKED: u32 = 0x00FF_FFFF;

impl Color {
    // ─── Named palette colors ────────────────────────────────────────────

    /// Palette 0.
    pub const BLACK: Self = Self::Palette(0);
    /// Palette 1.
    pub const RED: Self = Self::Palette(1);
    /// Palette 2.
    pub const GREEN: Self = Self::Palette(2);
    /// Palette 3.
    pub const YELLOW: Self = Self::Palette(3);
    /// Palette 4.
    pub const BLUE: Self = Self::Palette(4);
    /// Palette 5.
    pub const MAGENTA: Self = Self::Palette(5);
    /// Palette 6.
    pub const CYAN: Self = Self::Palette(6);
    /// Palette 7.
    pub const WHITE: Self = Self::Palette(7);

    /// Alias for [`Color::Clear`].
    pub const CLEAR: Self = Self::Clear;

    /// Opaque 24-bit white, used for sprite bitmaps and line defaults.
    pub const OPAQUE_WHITE: Self = Self::Rgb(255, 255, 255);

    // ─── Constructors ────────────────────────────────────────────────────

    /// A 24-bit color.
    #[inline]
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb(r, g, b)
    }

    /// The bright variant of a base color index (0–7).
    ///
    /// # Errors
    ///
    /// Returns [`Error::ComponentOutOfRange`] if `base` is above 7.
    pub const fn bright(base: u8) -> Result<Self> {
        if base > 7 {
            return Err(Error::ComponentOutOfRange {
                component: "bright base color",
                max: 7,
                value: base,
            });
        }
        Ok(Self::Palette(base + BRIGHT))
    }

    /// A color from the 6×6×6 cube (indices 16–231).
    ///
    /// # Errors
    ///
    /// Returns [`Error::ComponentOutOfRange`] if any coordinate is above 5.
    pub fn cube(r: u8, g: u8, b: u8) -> Result<Self> {
        check_cube("cube r (red)", r)?;
        check_cube("cube g (green)", g)?;
        check_cube("cube b (blue)", b)?;
        Ok(Self::Palette(16 + 36 * r + 6 * g + b))
    }

    /// A shade from the 24-step greyscale ramp (indices 232–255).
    ///
    /// # Errors
    ///
    /// Returns [`Error::ComponentOutOfRange`] if `brightness` is above 23.
    pub const fn greyscale(brightness: u8) -> Result<Self> {
        if brightness > 23 {
            return Err(Error::ComponentOutOfRange {
                component: "greyscale brightness",
                max: 23,
                value: brightness,
            });
        }
        Ok(Self::Palette(232 + brightness))
    }

    // ─── Packing boundary ────────────────────────────────────────────────

    /// Decode the packed 32-bit form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedColor`] if the discriminant byte is neither
    /// `0x00` nor `0xFF`, or if a `0x00` value carries a payload above 255
    /// that is not the CLEAR sentinel.
    pub const fn from_packed(value: u32) -> Result<Self> {
        match value >> 24 {
            0x00 => {
                if value == CLEAR_PACKED {
                    Ok(Self::Clear)
                } else if value <= 0xFF {
                    #[allow(clippy::cast_possible_truncation)]
                    Ok(Self::Palette(value as u8))
                } else {
                    Err(Error::MalformedColor { value })
                }
            }
            0xFF => {
                #[allow(clippy::cast_possible_truncation)]
                Ok(Self::Rgb(
                    (value >> 16) as u8,
                    (value >> 8) as u8,
                    value as u8,
                ))
            }
            _ => Err(Error::MalformedColor { value }),
        }
    }

    /// Encode to the packed 32-bit form.
    #[must_use]
    pub const fn to_packed(self) -> u32 {
        match self {
            Self::Palette(idx) => idx as u32,
            Self::Rgb(r, g, b) => 0xFF00_0000 | (r as u32) << 16 | (g as u32) << 8 | b as u32,
            Self::Clear => CLEAR_PACKED,
        }
    }

    // ─── Raw pixel (ARGB) boundary ───────────────────────────────────────

    /// Build a color from raw pixel channels.
    ///
    /// Alpha 0 is transparent and becomes [`Color::Clear`]; any other alpha
    /// is treated as opaque, since terminals cannot blend.
    #[inline]
    #[must_use]
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        if a == 0 { Self::Clear } else { Self::Rgb(r, g, b) }
    }

    /// Raw pixel channels `(alpha, red, green, blue)`.
    ///
    /// Palette colors resolve through the standard xterm palette and are
    /// fully opaque. CLEAR is `(0, 0, 0, 0)`.
    #[must_use]
    pub const fn to_argb(self) -> (u8, u8, u8, u8) {
        match self {
            Self::Palette(idx) => {
                let (r, g, b) = palette::to_rgb(idx);
                (255, r, g, b)
            }
            Self::Rgb(r, g, b) => (255, r, g, b),
            Self::Clear => (0, 0, 0, 0),
        }
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    /// Whether this is the CLEAR sentinel.
    #[inline]
    #[must_use]
    pub const fn is_clear(self) -> bool {
        matches!(self, Self::Clear)
    }

    /// Map a 24-bit color onto the nearest 256-color palette entry.
    ///
    /// Palette colors and CLEAR pass through unchanged.
    #[must_use]
    pub fn to_palette(self) -> Self {
        match self {
            Self::Rgb(r, g, b) => Self::Palette(palette::nearest(r, g, b)),
            other => other,
        }
    }
}

impl Default for Color {
    /// Palette black, what a freshly allocated cell holds.
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Palette(idx) => write!(f, "palette({idx})"),
            Self::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
            Self::Clear => write!(f, "clear"),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl TryFrom<u32> for Color {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        Self::from_packed(value)
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.to_packed()
    }
}

fn check_cube(component: &'static str, value: u8) -> Result<()> {
    if value > 5 {
        Err(Error::ComponentOutOfRange {
            component,
            max: 5,
            value,
        })
    } else {
        Ok(())
    }
}

// ─── ColorMode ───────────────────────────────────────────────────────────────

/// Which escape family the caller wants on the wire.
///
/// Terminal capabilities are never detected; the caller decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum ColorMode {
    /// Emit 24-bit colors as-is (`38;2;r;g;b`).
    #[default]
    TrueColor,
    /// Downgrade every 24-bit color to the 256-color palette first.
    Palette,
}

impl ColorMode {
    /// Apply this mode to a color.
    #[inline]
    #[must_use]
    pub fn apply(self, color: Color) -> Color {
        match self {
            Self::TrueColor => color,
            Self::Palette => color.to_palette(),
        }
    }
}

// ─── Palette ─────────────────────────────────────────────────────────────────

pub mod palette {
    //! The xterm 256-color palette.
    //!
    //! - Colors 0–7: standard (black, red, green, yellow, blue, magenta, cyan, white)
    //! - Colors 8–15: bright variants
    //! - Colors 16–231: 6×6×6 RGB cube
    //! - Colors 232–255: 24-step grayscale ramp

    /// The standard ANSI-16 palette as RGB values (xterm defaults).
    pub const ANSI16_RGB: [(u8, u8, u8); 16] = [
        (0, 0, 0),       // 0: Black
        (128, 0, 0),     // 1: Red
        (0, 128, 0),     // 2: Green
        (128, 128, 0),   // 3: Yellow
        (0, 0, 128),     // 4: Blue
        (128, 0, 128),   // 5: Magenta
        (0, 128, 128),   // 6: Cyan
        (192, 192, 192), // 7: White
        (128, 128, 128), // 8: Bright Black
        (255, 0, 0),     // 9: Bright Red
        (0, 255, 0),     // 10: Bright Green
        (255, 255, 0),   // 11: Bright Yellow
        (0, 0, 255),     // 12: Bright Blue
        (255, 0, 255),   // 13: Bright Magenta
        (0, 255, 255),   // 14: Bright Cyan
        (255, 255, 255), // 15: Bright White
    ];

    /// Channel values of the six cube steps.
    pub const CUBE_STEPS: [u8; 6] = [0, 95, 135, 175, 215, 255];

    /// Convert a palette index to RGB.
    #[must_use]
    pub const fn to_rgb(idx: u8) -> (u8, u8, u8) {
        match idx {
            0..=15 => ANSI16_RGB[idx as usize],
            16..=231 => {
                let idx = idx - 16;
                (
                    CUBE_STEPS[(idx / 36) as usize],
                    CUBE_STEPS[((idx % 36) / 6) as usize],
                    CUBE_STEPS[(idx % 6) as usize],
                )
            }
            232..=255 => {
                let v = 8 + 10 * (idx - 232);
                (v, v, v)
            }
        }
    }

    /// Nearest cube step (0–5) for one channel.
    const fn cube_step(c: u8) -> u8 {
        if c < 48 {
            0
        } else if c < 115 {
            1
        } else {
            (c - 35) / 40
        }
    }

    fn distance(a: (u8, u8, u8), b: (u8, u8, u8)) -> u32 {
        let d = |x: u8, y: u8| u32::from(x.abs_diff(y)).pow(2);
        d(a.0, b.0) + d(a.1, b.1) + d(a.2, b.2)
    }

    /// Nearest cube or greyscale index (16–255) for an RGB triple.
    #[must_use]
    pub fn nearest(r: u8, g: u8, b: u8) -> u8 {
        let cube = 16 + 36 * cube_step(r) + 6 * cube_step(g) + cube_step(b);

        let avg = (u16::from(r) + u16::from(g) + u16::from(b)) / 3;
        #[allow(clippy::cast_possible_truncation)]
        let grey_step = (avg.saturating_sub(3) / 10).min(23) as u8;
        let grey = 232 + grey_step;

        if distance((r, g, b), to_rgb(grey)) < distance((r, g, b), to_rgb(cube)) {
            grey
        } else {
            cube
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
