// SPDX-License-Identifier: MIT
//
// Area-weighted resampling (a separable box filter).
//
// Each destination pixel covers a rectangle of the source. Every source
// pixel that rectangle touches contributes in proportion to the overlapped
// area, so downscaling averages and upscaling repeats, with no aliasing past
// the nearest source pixels.
//
// The two axes are independent. For each axis the source range is cut into
// `len` equal intervals and every interval becomes a short list of
// (integer pixel, overlap length) samples:
//
//   interval [1.5, 3.0)  →  (1, 0.5) (2, 1.0)
//
// A destination pixel then takes the cross product of its x and y lists.
// Stretches outside the source all read CLEAR, so each one collapses into a
// single sample just past the edge, however far the corners reach.
//
// Sampling corners describe a rectangle in continuous space, not a pixel
// index range: pixel (x, y) occupies [x, x+1) × [y, y+1), so sampling the
// whole of a w × h source means (0, 0)-(w, h).

use crate::color::Color;
use crate::geometry::Point;
use crate::image::{PixelReader, PixelWriter};

/// Weights at or below this are floating-point slivers, not real overlap.
const MIN_WEIGHT: f64 = 1e-4;

/// One source pixel's contribution along one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Source pixel index along the axis.
    pub ord: i32,
    /// Overlap length, in pixels.
    pub weight: f64,
}

/// Split `[lower_bound, upper_bound)` into `len` equal intervals and list the
/// integer pixels each interval overlaps, for a source axis `extent` pixels
/// long.
///
/// Overlap before pixel 0 is reported as one sample at `-1`, overlap past the
/// last pixel as one sample at `extent`. The weights of each list sum to the
/// interval length, `(upper - lower) / len`, minus any discarded slivers.
#[must_use]
pub fn samples(len: u32, lower_bound: f64, upper_bound: f64, extent: u32) -> Vec<Vec<Sample>> {
    if len == 0 {
        return Vec::new();
    }

    let delta = (upper_bound - lower_bound) / f64::from(len);
    let end = f64::from(extent);
    (0..len)
        .map(|a| {
            let lower = lower_bound + f64::from(a) * delta;
            let upper = lower + delta;

            // Interval edges: lower, every integer inside it and [0, extent], upper.
            let (first, last) = (lower.ceil().max(0.0), upper.floor().min(end));
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let inner = if first <= last { first as u32..=last as u32 } else { 1..=0 };
            let mut edges = Vec::with_capacity(2 + inner.size_hint().0);
            edges.push(lower);
            edges.extend(inner.map(f64::from));
            edges.push(upper);

            edges
                .windows(2)
                .filter_map(|pair| {
                    let weight = pair[1] - pair[0];
                    #[allow(clippy::cast_possible_truncation)]
                    let ord = pair[0].floor().clamp(-1.0, end) as i32;
                    (weight > MIN_WEIGHT).then_some(Sample { ord, weight })
                })
                .collect()
        })
        .collect()
}

/// Resample the rectangle spanned by `corner_a` and `corner_b` of `reader`
/// onto the whole of `writer`.
///
/// The corners may be given in any order. The area outside the reader
/// counts as CLEAR (transparent black), however far the corners reach. Each output channel is
/// `min(255, floor(256 * acc / total_weight))`; an output with zero alpha is
/// written as CLEAR.
///
/// ```
/// use squot_term::color::Color;
/// use squot_term::geometry::Point;
/// use squot_term::image::{Image, PixelReader, PixelWriter};
/// use squot_term::scale::scale;
///
/// let mut src = Image::new(2, 1, Color::rgb(0, 0, 0)).unwrap();
/// src.set_pixel(1, 0, Color::rgb(255, 255, 255));
///
/// let mut dst = Image::new(1, 1, Color::CLEAR).unwrap();
/// scale(&src, &mut dst, Point::new(0.0, 0.0), Point::new(2.0, 1.0));
/// assert_eq!(dst.pixel(0, 0), Color::rgb(128, 128, 128));
/// ```
pub fn scale<R, W>(reader: &R, writer: &mut W, corner_a: Point, corner_b: Point)
where
    R: PixelReader + ?Sized,
    W: PixelWriter + ?Sized,
{
    let (x0, x1) = (corner_a.x.min(corner_b.x), corner_a.x.max(corner_b.x));
    let (y0, y1) = (corner_a.y.min(corner_b.y), corner_a.y.max(corner_b.y));

    let width = writer.width();
    let height = writer.height();
    let x_samples = samples(width, x0, x1, reader.width());
    let y_samples = samples(height, y0, y1, reader.height());

    tracing::debug!(
        src_width = reader.width(),
        src_height = reader.height(),
        dst_width = width,
        dst_height = height,
        "resampling"
    );

    for (y, y_sample) in (0i32..).zip(&y_samples) {
        for (x, x_sample) in (0i32..).zip(&x_samples) {
            let mut acc = [0.0f64; 4];
            let mut total = 0.0f64;

            for ys in y_sample {
                for xs in x_sample {
                    let (a, r, g, b) = reader.pixel(xs.ord, ys.ord).to_argb();
                    let weight = xs.weight * ys.weight;

                    for (slot, channel) in acc.iter_mut().zip([a, r, g, b]) {
                        *slot += f64::from(channel) / 255.0 * weight;
                    }
                    total += weight;
                }
            }

            let color = if total > 0.0 {
                let [a, r, g, b] = acc.map(|v| average(v, total));
                Color::from_argb(a, r, g, b)
            } else {
                Color::CLEAR
            };
            writer.set_pixel(x, y, color);
        }
    }
}

/// Resample the whole of `reader` onto the whole of `writer`.
pub fn scale_to_fit<R, W>(reader: &R, writer: &mut W)
where
    R: PixelReader + ?Sized,
    W: PixelWriter + ?Sized,
{
    let far = Point::new(f64::from(reader.width()), f64::from(reader.height()));
    scale(reader, writer, Point::default(), far);
}

#[inline]
fn average(acc: f64, total: f64) -> u8 {
    let v = (256.0 * acc / total).floor().clamp(0.0, 255.0);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let v = v as u8;
    v
}

// ─── Tests ───────────────────────────────────────────────────────────────────
