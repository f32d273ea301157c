// SPDX-License-Identifier: MIT
//
// squot-term — pictures in the terminal, six pixels per character.
//
// A squot is one terminal cell drawn as a 2×3 block of binary sub-pixels
// using the Unicode block sextants. Every cell has one foreground color for
// its set sub-pixels and one background color, which is coarse for color
// but fine enough for shapes, lines and sprites.
//
// The pipeline:
//
//   pixel source ─ scale ─▶ Canvas (SquotImage fg + Image bg)
//                                │
//                 Sprite ───────▶┤ write_sprite
//                                ▼
//                    print / print_diff ─▶ OutputBuffer ─▶ terminal
//
// Nothing here queries the terminal. Callers choose dimensions and the color
// mode; the crate turns frames into the fewest escape bytes it can.

pub mod ansi;
pub mod blocks;
pub mod canvas;
pub mod caps;
pub mod codec;
pub mod color;
#[cfg(feature = "decode")]
pub mod decode;
pub mod draw;
pub mod error;
pub mod geometry;
pub mod glyph;
pub mod image;
pub mod output;
pub mod scale;
pub mod screen;
pub mod sprite;
pub mod squot;

pub use error::{Error, Result};
