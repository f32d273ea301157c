// SPDX-License-Identifier: MIT
//
// Error type for the squot rendering engine.
//
// Everything in this crate is pure, synchronous computation, so failures are
// argument validation (rejected immediately, never clamped) plus whatever the
// output sink reports when bytes finally leave the process. Out-of-range pixel
// coordinates are not errors: reads return `Color::CLEAR` and
// writes are no-ops, so drawing code can run off the edges freely.

use std::io;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while building or rendering a frame.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A width or height was zero (or too large to address as cells).
    #[error("{what} must be a positive integer, got {value}")]
    InvalidDimension {
        /// Which dimension was rejected, e.g. `"width_in_chars"`.
        what: &'static str,
        /// The offending value.
        value: u64,
    },

    /// A color component fell outside its allowed range.
    #[error("{component} must be between 0 and {max}, got {value}")]
    ComponentOutOfRange {
        /// Which component, e.g. `"cube r (red)"`.
        component: &'static str,
        /// Inclusive upper bound.
        max: u8,
        /// The offending value.
        value: u8,
    },

    /// Cursor coordinates are 1-based; zero is rejected.
    #[error("cursor position must be 1 or greater, got ({row}, {column})")]
    InvalidCursor {
        /// Row (1-based).
        row: u16,
        /// Column (1-based).
        column: u16,
    },

    /// A packed 32-bit color whose discriminant byte is neither `0x00` nor
    /// `0xFF`, or a palette payload above 255 that is not the CLEAR sentinel.
    #[error("illegal color value 0x{value:08x} (hiByte=0x{:02x})", .value >> 24)]
    MalformedColor {
        /// The packed value.
        value: u32,
    },

    /// Alternative fonts are numbered 1 to 9.
    #[error("font must be in 1..=9 but got {0}")]
    InvalidFont(u8),

    /// `print_diff` was asked to compare canvases of different pixel sizes.
    #[error("pixel dimensions must match: ({new_width},{new_height}) != ({old_width},{old_height})")]
    DimensionMismatch {
        /// Width in pixels of the new canvas.
        new_width: u32,
        /// Height in pixels of the new canvas.
        new_height: u32,
        /// Width in pixels of the old canvas.
        old_width: u32,
        /// Height in pixels of the old canvas.
        old_height: u32,
    },

    /// The output sink failed.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// An image could not be opened or decoded.
    #[cfg(feature = "decode")]
    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),
}
