// SPDX-License-Identifier: MIT
//
// Line drawing.

use crate::color::Color;
use crate::geometry::Point;
use crate::image::PixelWriter;

/// Draw a line segment from `p1` to `p2`, both ends included.
///
/// Points are snapped to the pixel that contains them, then walked with
/// Bresenham's algorithm. Nothing is clipped: off-canvas pixels are simply
/// ignored by the writer, so very long lines still cost their full length.
///
/// ```
/// use squot_term::color::Color;
/// use squot_term::draw::draw_line;
/// use squot_term::geometry::Point;
/// use squot_term::image::{Image, PixelReader};
///
/// let mut img = Image::new(4, 4, Color::CLEAR).unwrap();
/// draw_line(&mut img, Point::new(0.0, 0.0), Point::new(3.0, 3.0), Color::RED);
/// assert_eq!(img.pixel(2, 2), Color::RED);
/// assert_eq!(img.pixel(2, 1), Color::CLEAR);
/// ```
pub fn draw_line<W: PixelWriter + ?Sized>(writer: &mut W, p1: Point, p2: Point, color: Color) {
    let (mut x, mut y) = snap(p1);
    let (x2, y2) = snap(p2);

    let dx = (x2 - x).abs();
    let dy = -(y2 - y).abs();
    let sx = if x < x2 { 1 } else { -1 };
    let sy = if y < y2 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        writer.set_pixel(clamp_i32(x), clamp_i32(y), color);
        if x == x2 && y == y2 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Integer pixel containing `p`, widened so the error terms cannot overflow.
#[allow(clippy::cast_possible_truncation)]
fn snap(p: Point) -> (i64, i64) {
    (p.x.floor() as i64, p.y.floor() as i64)
}

fn clamp_i32(v: i64) -> i32 {
    i32::try_from(v).unwrap_or(if v < 0 { i32::MIN } else { i32::MAX })
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::{Image, PixelReader};
    use crate::squot::SquotImage;

    fn lit(img: &Image) -> Vec<(i32, i32)> {
        let mut points = Vec::new();
        for y in 0..img.height() as i32 {
            for x in 0..img.width() as i32 {
                if !img.pixel(x, y).is_clear() {
                    points.push((x, y));
                }
            }
        }
        points
    }

    fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Vec<(i32, i32)> {
        let mut img = Image::new(8, 8, Color::CLEAR).unwrap();
        draw_line(&mut img, Point::new(x1, y1), Point::new(x2, y2), Color::WHITE);
        lit(&img)
    }

    #[test]
    fn single_point() {
        assert_eq!(line(3.0, 4.0, 3.0, 4.0), vec![(3, 4)]);
    }

    #[test]
    fn horizontal_and_vertical() {
        assert_eq!(line(1.0, 2.0, 4.0, 2.0), vec![(1, 2), (2, 2), (3, 2), (4, 2)]);
        assert_eq!(line(5.0, 3.0, 5.0, 0.0), vec![(5, 0), (5, 1), (5, 2), (5, 3)]);
    }

    #[test]
    fn diagonal() {
        assert_eq!(line(0.0, 0.0, 3.0, 3.0), vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
    }

    #[test]
    fn reversed_line_covers_the_same_span() {
        let forward = line(0.0, 1.0, 7.0, 4.0);
        let backward = line(7.0, 4.0, 0.0, 1.0);
        assert_eq!(forward.len(), 8);
        assert_eq!(backward.len(), 8);
        for points in [&forward, &backward] {
            assert!(points.contains(&(0, 1)));
            assert!(points.contains(&(7, 4)));
        }
    }

    #[test]
    fn steep_line_is_continuous() {
        let points = line(1.0, 0.0, 3.0, 7.0);
        assert_eq!(points.len(), 8);
        for w in points.windows(2) {
            assert_eq!(w[1].1 - w[0].1, 1);
            assert!((w[1].0 - w[0].0).abs() <= 1);
        }
    }

    #[test]
    fn fractional_points_snap_down() {
        assert_eq!(line(0.9, 0.9, 2.5, 0.2), vec![(0, 0), (1, 0), (2, 0)]);
    }

    #[test]
    fn off_canvas_segments_are_ignored() {
        let points = line(-3.0, 2.0, 2.0, 2.0);
        assert_eq!(points, vec![(0, 2), (1, 2), (2, 2)]);
    }

    #[test]
    fn draws_on_squot_images() {
        let mut img = SquotImage::new(2, 1).unwrap();
        draw_line(&mut img, Point::new(0.0, 1.0), Point::new(3.0, 1.0), Color::GREEN);
        for x in 0..4 {
            assert_eq!(img.pixel(x, 1), Color::GREEN);
        }
        assert_eq!(img.pixel(0, 0), Color::CLEAR);
    }
}
