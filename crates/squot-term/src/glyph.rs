// SPDX-License-Identifier: MIT
//
// Squot glyphs — one character per 2×3 sub-pixel pattern.
//
// A squot cell has six sub-pixels, numbered left-to-right, top-to-bottom:
//
//   ┌───┬───┐
//   │ 0 │ 1 │
//   ├───┼───┤
//   │ 2 │ 3 │      bit = (x mod 2) + 2 * (y mod 3)
//   ├───┼───┤
//   │ 4 │ 5 │
//   └───┴───┘
//
// That is exactly the numbering of the Unicode "block sextant" characters
// (Symbols for Legacy Computing, U+1FB00–U+1FB3B): sextant-1 is bit 0,
// sextant-2 is bit 1, and so on, with the code points counting through the
// masks in binary order. Unicode skips the four patterns that already exist
// as classic block elements: empty (space), left column (▌), right column
// (▐), and full (█), so the table below splices those in.

bitflags::bitflags! {
    /// The six sub-pixels of one squot cell.
    ///
    /// ```
    /// use squot_term::glyph::{glyph, Sextant};
    ///
    /// let left = Sextant::TOP_LEFT | Sextant::MIDDLE_LEFT | Sextant::BOTTOM_LEFT;
    /// assert_eq!(left, Sextant::LEFT_COLUMN);
    /// assert_eq!(glyph(left), '▌');
    /// assert_eq!(glyph(Sextant::empty()), ' ');
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Sextant: u8 {
        /// Bit 0, `(0, 0)`.
        const TOP_LEFT      = 1 << 0;
        /// Bit 1, `(1, 0)`.
        const TOP_RIGHT     = 1 << 1;
        /// Bit 2, `(0, 1)`.
        const MIDDLE_LEFT   = 1 << 2;
        /// Bit 3, `(1, 1)`.
        const MIDDLE_RIGHT  = 1 << 3;
        /// Bit 4, `(0, 2)`.
        const BOTTOM_LEFT   = 1 << 4;
        /// Bit 5, `(1, 2)`.
        const BOTTOM_RIGHT  = 1 << 5;

        /// Left half block.
        const LEFT_COLUMN   = Self::TOP_LEFT.bits() | Self::MIDDLE_LEFT.bits() | Self::BOTTOM_LEFT.bits();
        /// Right half block.
        const RIGHT_COLUMN  = Self::TOP_RIGHT.bits() | Self::MIDDLE_RIGHT.bits() | Self::BOTTOM_RIGHT.bits();
        /// Full block.
        const FULL          = Self::LEFT_COLUMN.bits() | Self::RIGHT_COLUMN.bits();
    }
}

impl Sextant {
    /// The single sub-pixel at `(x mod 2, y mod 3)` within a cell.
    ///
    /// `sub_x` must be 0–1 and `sub_y` 0–2.
    #[inline]
    #[must_use]
    pub const fn at(sub_x: u8, sub_y: u8) -> Self {
        Self::from_bits_truncate(1 << (sub_x + 2 * sub_y))
    }
}

/// First code point of the Unicode block sextants (sextant-1).
const SEXTANT_BASE: u32 = 0x1FB00;

/// Glyph for every 6-bit mask, indexed by `Sextant::bits()`.
pub const GLYPHS: [char; 64] = build_glyphs();

const fn build_glyphs() -> [char; 64] {
    let mut table = [' '; 64];
    let mut mask: u32 = 1;
    while mask < 64 {
        table[mask as usize] = match mask {
            0b01_0101 => '▌',
            0b10_1010 => '▐',
            0b11_1111 => '█',
            _ => {
                // Masks above each skipped half-block shift down one slot.
                let skipped = (mask > 0b01_0101) as u32 + (mask > 0b10_1010) as u32;
                match char::from_u32(SEXTANT_BASE + mask - 1 - skipped) {
                    Some(ch) => ch,
                    None => '?',
                }
            }
        };
        mask += 1;
    }
    table
}

/// The glyph for a squot mask. The empty mask is a space.
#[inline]
#[must_use]
pub const fn glyph(bits: Sextant) -> char {
    GLYPHS[bits.bits() as usize]
}

// ─── Tests ───────────────────────────────────────────────────────────────────
