// SPDX-License-Identifier: MIT
//
// The demo commands behind each subcommand.

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use squot_term::ansi::{self, Sgr};
use squot_term::blocks;
use squot_term::canvas::{Canvas, RenderStats};
use squot_term::caps::ScreenCapabilities;
use squot_term::codec::ColorCodec;
use squot_term::color::{Color, ColorMode};
use squot_term::decode::DecodedImage;
use squot_term::draw::draw_line;
use squot_term::geometry::Point;
use squot_term::glyph::Sextant;
use squot_term::image::{Image, PixelReader, PixelWriter};
use squot_term::output::OutputBuffer;
use squot_term::scale::scale_to_fit;
use squot_term::screen::Screen;
use squot_term::sprite::Sprite;

use crate::cli::ViewStyle;

/// Effective settings after the config file and flags are merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub mode: ColorMode,
    pub width: u16,
    pub height: u16,
    pub background: Color,
    pub fps: u32,
    pub frames: u32,
    pub alt_screen: bool,
}

// ─── view ────────────────────────────────────────────────────────────────────

pub fn view(path: &Path, style: ViewStyle, settings: &Settings) -> Result<()> {
    let picture = DecodedImage::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    tracing::debug!(
        width = picture.width(),
        height = picture.height(),
        ?style,
        "decoded picture"
    );

    let codec = ColorCodec::with_mode(settings.mode);
    let mut out = OutputBuffer::new();
    let (width, height) = (u32::from(settings.width), u32::from(settings.height));

    let caption = match style {
        ViewStyle::Squot => {
            let mut pixels = Image::new(width * 2, height * 3, settings.background)?;
            scale_to_fit(&picture, &mut pixels);
            two_tone(&pixels, settings.background)?.print(&mut out, &codec, false)?;
            "Squot pictures keep the shapes and lose some of the color."
        }
        ViewStyle::HalfBlock => {
            let mut pixels = Image::new(width, height * 2, settings.background)?;
            scale_to_fit(&picture, &mut pixels);
            blocks::print_half_blocks(&pixels, &mut out, &codec)?;
            "Half-block pictures keep two full-color pixels per character."
        }
        ViewStyle::FullChar => {
            let mut pixels = Image::new(width, height, settings.background)?;
            scale_to_fit(&picture, &mut pixels);
            blocks::print_full_chars(&pixels, &mut out, &codec)?;
            "Full-char pictures make a good backdrop for squot sprites."
        }
    };

    out.writeln("");
    out.writeln(caption);
    out.flush_stdout().context("failed to write to stdout")
}

/// Quantize every 2×3 block of `pixels` to two colors.
///
/// Sub-pixels brighter than their cell's mean luminance become foreground
/// bits in the average of the bright colors; the rest set the background.
fn two_tone(pixels: &Image, fallback: Color) -> Result<Canvas> {
    let cols = u16::try_from(pixels.width() / 2).context("picture too wide")?;
    let rows = u16::try_from(pixels.height() / 3).context("picture too tall")?;
    let mut canvas = Canvas::with_char_dimensions(cols, rows, fallback)?;

    for cy in 0..rows {
        for cx in 0..cols {
            let (x0, y0) = (i32::from(cx) * 2, i32::from(cy) * 3);
            let mut cell = Vec::with_capacity(6);
            for sy in 0..3u8 {
                for sx in 0..2u8 {
                    let (_, r, g, b) = pixels.pixel(x0 + i32::from(sx), y0 + i32::from(sy)).to_argb();
                    cell.push((Sextant::at(sx, sy), (r, g, b)));
                }
            }

            let luma = |(r, g, b): (u8, u8, u8)| 299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b);
            let mean = cell.iter().map(|&(_, rgb)| luma(rgb)).sum::<u32>() / 6;

            let (bright, dark): (Vec<_>, Vec<_>) = cell.into_iter().partition(|&(_, rgb)| luma(rgb) > mean);
            let mask = bright.iter().fold(Sextant::empty(), |acc, &(bit, _)| acc | bit);

            let address = usize::from(cy) * usize::from(cols) + usize::from(cx);
            canvas.bg_mut().set_pixel(i32::from(cx), i32::from(cy), average(dark.into_iter().map(|(_, rgb)| rgb)));
            canvas.fg_mut().draw_cell(address, mask, average(bright.into_iter().map(|(_, rgb)| rgb)));
        }
    }
    Ok(canvas)
}

fn average(colors: impl Iterator<Item = (u8, u8, u8)>) -> Color {
    let (mut n, mut sum) = (0u32, [0u32; 3]);
    for (r, g, b) in colors {
        n += 1;
        sum[0] += u32::from(r);
        sum[1] += u32::from(g);
        sum[2] += u32::from(b);
    }
    if n == 0 {
        return Color::CLEAR;
    }
    let [r, g, b] = sum.map(|v| u8::try_from(v / n).unwrap_or(u8::MAX));
    Color::rgb(r, g, b)
}

// ─── lines ───────────────────────────────────────────────────────────────────

pub fn lines(settings: &Settings) -> Result<()> {
    let mut canvas = Canvas::with_pixel_dimensions(140, 100, settings.background)?;
    let yellow = Color::rgb(255, 255, 0);
    let origin = Point::new(2.0, 2.0);

    for step in 0..=8 {
        let t = f64::from(step);
        draw_line(canvas.fg_mut(), origin, Point::new(138.0, 2.0 + t * 12.0), yellow);
        draw_line(canvas.fg_mut(), origin, Point::new(2.0 + t * 17.0, 98.0), yellow);
    }

    let codec = ColorCodec::with_mode(settings.mode);
    let mut out = OutputBuffer::new();
    out.writeln("");
    canvas.print(&mut out, &codec, false)?;
    out.writeln("");
    out.writeln("Squot pixels are not square. They are about 1.3 times as high as wide.");
    out.writeln("The exact aspect ratio will vary a bit by terminal and font.");
    out.flush_stdout().context("failed to write to stdout")
}

// ─── sprites ─────────────────────────────────────────────────────────────────

const SHIP: [&str; 5] = [
    "...##...", //
    "..####..",
    ".##..##.",
    "########",
    "#.#..#.#",
];

const INVADER: [&str; 8] = [
    "..#.....#..",
    "...#...#...",
    "..#######..",
    ".##.###.##.",
    "###########",
    "#.#######.#",
    "#.#.....#.#",
    "...##.##...",
];

const BALL: [&str; 4] = [
    ".##.", //
    "####",
    "####",
    ".##.",
];

struct Body<'a> {
    sprite: &'a Sprite,
    color: Color,
    x: i32,
    y: i32,
    dx: i32,
    dy: i32,
}

impl Body<'_> {
    fn advance(&mut self, width: i32, height: i32) {
        let right = width - i32::try_from(self.sprite.width()).unwrap_or(width);
        let bottom = height - i32::try_from(self.sprite.height()).unwrap_or(height);

        self.x += self.dx;
        self.y += self.dy;
        if self.x <= 0 || self.x >= right {
            self.dx = -self.dx;
            self.x = self.x.clamp(0, right.max(0));
        }
        if self.y <= 0 || self.y >= bottom {
            self.dy = -self.dy;
            self.y = self.y.clamp(0, bottom.max(0));
        }
    }
}

/// Leaves the alternate screen and shows the cursor again on drop.
struct AltScreen {
    caps: ScreenCapabilities,
}

impl AltScreen {
    fn enter(caps: ScreenCapabilities) -> io::Result<Self> {
        let mut stdout = io::stdout().lock();
        caps.enter_alt_screen(&mut stdout)?;
        ansi::clear_screen(&mut stdout)?;
        ansi::cursor_hide(&mut stdout)?;
        stdout.flush()?;
        Ok(Self { caps })
    }
}

impl Drop for AltScreen {
    fn drop(&mut self) {
        if let Err(err) = restore(&self.caps, &mut io::stdout().lock()) {
            tracing::warn!(%err, "failed to restore the terminal");
        }
    }
}

/// Attributes off, cursor on, back to the normal screen.
fn restore(caps: &ScreenCapabilities, w: &mut impl Write) -> io::Result<()> {
    ansi::reset(w)?;
    ansi::cursor_show(w)?;
    caps.leave_alt_screen(w)?;
    w.flush()
}

pub fn sprites(settings: &Settings, slow: bool) -> Result<()> {
    let ship = Sprite::from_text(&SHIP)?;
    let invader = Sprite::from_text(&INVADER)?;
    let ball = Sprite::from_text(&BALL)?;

    let mut canvas = Canvas::with_char_dimensions(settings.width, settings.height, settings.background)?;
    let (width, height) = (
        i32::try_from(canvas.width()).context("canvas too wide")?,
        i32::try_from(canvas.height()).context("canvas too tall")?,
    );

    let mut bodies = vec![
        Body { sprite: &ship, color: Color::GREEN, x: 3, y: 5, dx: 1, dy: 1 },
        Body { sprite: &invader, color: Color::rgb(255, 80, 200), x: width / 2, y: height / 3, dx: -1, dy: 1 },
        Body { sprite: &ball, color: Color::YELLOW, x: width / 3, y: height / 2, dx: 2, dy: -1 },
        Body { sprite: &ball, color: Color::CYAN, x: width - 10, y: 4, dx: -2, dy: 2 },
    ];

    let _guard = if settings.alt_screen {
        let caps = ScreenCapabilities::query();
        if caps.has_alt_screen() {
            Some(AltScreen::enter(caps).context("failed to switch to the alternate screen")?)
        } else {
            None
        }
    } else {
        None
    };

    // Ctrl-C ends the loop so the guard above still restores the terminal.
    let running = Arc::new(AtomicBool::new(true));
    let flag = Arc::clone(&running);
    ctrlc::set_handler(move || flag.store(false, Ordering::SeqCst))
        .context("failed to install the Ctrl-C handler")?;

    let frame_time = Duration::from_secs_f64(1.0 / f64::from(settings.fps.max(1)));
    let mut screen = Screen::new(settings.mode);
    let mut last = RenderStats::default();
    let mut totals = RenderStats::default();
    let mut drawn = 0;

    for frame in 0..settings.frames {
        if !running.load(Ordering::SeqCst) {
            tracing::debug!(frame, "interrupted");
            break;
        }
        let started = Instant::now();

        backdrop(&mut canvas, settings.background, frame);
        for body in &mut bodies {
            body.sprite.write_sprite(&mut canvas, body.x, body.y, body.color);
            body.advance(width, height);
        }

        let shown = last;
        let mut overlay = |out: &mut OutputBuffer| {
            out.write_str(&format!(
                "frame {frame:>5}  cells {:>5}/{:<5}  bytes {:>6}",
                shown.cells_rendered,
                shown.total_cells(),
                shown.bytes_written
            ));
        };
        last = screen.present_with(&canvas, Some(&mut overlay))?;
        totals.cells_rendered += last.cells_rendered;
        totals.cells_skipped += last.cells_skipped;
        totals.bytes_written += last.bytes_written;
        drawn += 1;

        let mut stdout = io::stdout().lock();
        if slow {
            screen.slow_flush_to(&mut stdout)?;
        } else {
            screen.flush_to(&mut stdout)?;
        }
        drop(stdout);

        if let Some(rest) = frame_time.checked_sub(started.elapsed()) {
            thread::sleep(rest);
        }
    }

    tracing::info!(
        frames = drawn,
        cells_rendered = totals.cells_rendered,
        cells_skipped = totals.cells_skipped,
        bytes_written = totals.bytes_written,
        "animation finished"
    );
    Ok(())
}

/// Slowly drifting vertical bands behind the sprites.
fn backdrop(canvas: &mut Canvas, base: Color, frame: u32) {
    canvas.clear(base);
    let (_, r, g, b) = base.to_argb();
    let rows = i32::from(canvas.height_in_chars());
    let cols = i32::from(canvas.width_in_chars());
    for cy in 0..rows {
        for cx in 0..cols {
            let wave = (cx + cy + i32::try_from(frame / 4).unwrap_or(0)) % 16;
            let lift = u8::try_from(if wave < 8 { wave } else { 16 - wave }).unwrap_or(0) * 3;
            canvas
                .bg_mut()
                .set_pixel(cx, cy, Color::rgb(r.saturating_add(lift), g.saturating_add(lift), b.saturating_add(lift * 2)));
        }
    }
}

// ─── sgr ─────────────────────────────────────────────────────────────────────

pub fn sgr() -> Result<()> {
    let mut out = OutputBuffer::new();
    out.writeln("This is normal text.");

    let showcase = [
        (Sgr::Bold, "This is BOLD."),
        (Sgr::Faint, "This is FAINT."),
        (Sgr::Italic, "This is ITALIC."),
        (Sgr::Underline, "This is UNDERLINE."),
        (Sgr::Blink, "This is slow BLINK."),
        (Sgr::RapidBlink, "This is RAPID BLINK."),
        (Sgr::Invert, "This is INVERT."),
    ];
    for (attr, text) in showcase {
        ansi::sgr(&mut out, attr)?;
        out.write_str(text);
        ansi::reset(&mut out)?;
        out.writeln("");
    }

    out.write_str("This is CONCEAL -> [[");
    ansi::sgr(&mut out, Sgr::Conceal)?;
    out.write_str("I am INVISIBLE!");
    ansi::reset(&mut out)?;
    out.writeln("]]");

    for (attr, text) in [(Sgr::Strike, "This is STRIKE."), (Sgr::DefaultFont, "This is DEFAULT FONT.")] {
        ansi::sgr(&mut out, attr)?;
        out.write_str(text);
        ansi::reset(&mut out)?;
        out.writeln("");
    }

    for font in 1..=9 {
        ansi::alt_font(&mut out, font)?;
        out.write_str(&format!("This is alt font {font}."));
        ansi::sgr(&mut out, Sgr::DefaultFont)?;
        out.writeln("");
    }

    ansi::sgr(&mut out, Sgr::Fraktur)?;
    out.write_str("This is FRAKTUR.");
    ansi::reset(&mut out)?;
    out.writeln("");

    out.flush_stdout().context("failed to write to stdout")
}

// ─── Tests ───────────────────────────────────────────────────────────────────
