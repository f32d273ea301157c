// SPDX-License-Identifier: MIT
//
// Small integer and point helpers shared by the drawing code.

/// Remainder that is never negative for a positive divisor.
///
/// Rust's `%` keeps the sign of the dividend (`-1 % 3 == -1`); cell phase
/// math needs the mathematical modulo instead.
///
/// ```
/// use squot_term::geometry::rem;
///
/// assert_eq!(rem(-1, 3), 2);
/// assert_eq!(rem(4, 3), 1);
/// ```
#[inline]
#[must_use]
pub const fn rem(n: i32, d: i32) -> i32 {
    n.rem_euclid(d)
}

/// Round up to the next even number, or `None` if that overflows.
#[inline]
#[must_use]
pub const fn make_even(n: u32) -> Option<u32> {
    n.checked_add(n & 1)
}

/// Round up to the next multiple of 3, or `None` if that overflows.
#[inline]
#[must_use]
pub const fn make_divisible_by_3(n: u32) -> Option<u32> {
    match n % 3 {
        0 => Some(n),
        r => n.checked_add(3 - r),
    }
}

/// A point in continuous pixel space.
///
/// Sampling rectangles are given by two opposite corners; whole pixels span
/// `[x, x + 1)`, so the full extent of a `w × h` source is `(0,0)-(w,h)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate, growing right.
    pub x: f64,
    /// Vertical coordinate, growing down.
    pub y: f64,
}

impl Point {
    /// Create a point.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self {
            x: f64::from(x),
            y: f64::from(y),
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
