// SPDX-License-Identifier: MIT
//
// Screen — frame-to-frame presentation of canvases.
//
// Diffing needs the canvas that is currently on the terminal. Screen keeps
// it, so animation code only has to build each new frame:
//
//   1. Build the next frame into a Canvas.
//   2. Screen::present() prints it in full the first time (or after a size
//      change or force_redraw), and diffs it against the retained frame
//      otherwise.
//   3. All output sits in one OutputBuffer until flush(). Presents that are
//      not flushed in between append, so every diff still reaches the
//      terminal in order.
//   4. The presented frame becomes the new "previous". When sizes match the
//      old allocation is reused, so steady-state animation does not allocate.

use std::io::{self, Write};

use crate::canvas::{Canvas, RenderStats};
use crate::codec::ColorCodec;
use crate::color::ColorMode;
use crate::error::Result;
use crate::output::OutputBuffer;

/// Stateful canvas presenter with its own output buffer.
///
/// ```
/// use squot_term::canvas::Canvas;
/// use squot_term::color::{Color, ColorMode};
/// use squot_term::image::PixelWriter;
/// use squot_term::screen::Screen;
///
/// let mut screen = Screen::new(ColorMode::TrueColor);
/// let mut frame = Canvas::with_char_dimensions(8, 2, Color::BLACK).unwrap();
///
/// let first = screen.present(&frame).unwrap();
/// assert_eq!(first.cells_rendered, 16);
///
/// frame.set_pixel(0, 0, Color::RED);
/// let second = screen.present(&frame).unwrap();
/// assert_eq!(second.cells_rendered, 1);
/// ```
pub struct Screen {
    output: OutputBuffer,
    codec: ColorCodec,
    previous: Option<Canvas>,
}

impl Screen {
    /// A screen with nothing displayed yet.
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self {
            output: OutputBuffer::new(),
            codec: ColorCodec::with_mode(mode),
            previous: None,
        }
    }

    /// Render `frame` into the output buffer.
    ///
    /// Output is appended after anything not yet flushed, since the retained
    /// frame assumes earlier diffs reach the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error only if writing to the in-memory buffer fails.
    pub fn present(&mut self, frame: &Canvas) -> Result<RenderStats> {
        self.present_with(frame, None)
    }

    /// Like [`present`](Self::present), with an overlay callback that runs
    /// after a diff (see [`Canvas::print_diff`]). Full redraws do not run it.
    ///
    /// # Errors
    ///
    /// Returns an error only if writing to the in-memory buffer fails.
    pub fn present_with(
        &mut self,
        frame: &Canvas,
        on_after_draw: Option<&mut dyn FnMut(&mut OutputBuffer)>,
    ) -> Result<RenderStats> {
        let stats = match &self.previous {
            Some(prev) if prev.width() == frame.width() && prev.height() == frame.height() => {
                frame.print_diff(prev, &mut self.output, &self.codec, on_after_draw)?
            }
            _ => frame.print(&mut self.output, &self.codec, true)?,
        };

        self.store_frame(frame);
        Ok(stats)
    }

    /// Bytes rendered since the last flush.
    #[must_use]
    pub fn output_bytes(&self) -> &[u8] {
        self.output.as_bytes()
    }

    /// The codec used for color escapes.
    #[must_use]
    pub const fn codec(&self) -> &ColorCodec {
        &self.codec
    }

    /// Write pending output to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to stdout fails.
    pub fn flush(&mut self) -> io::Result<()> {
        self.output.flush_stdout()
    }

    /// Write pending output to `w`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn flush_to(&mut self, w: &mut impl Write) -> io::Result<()> {
        self.output.flush_to(w)
    }

    /// Write pending output to `w` one byte at a time.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn slow_flush_to(&mut self, w: &mut impl Write) -> io::Result<()> {
        self.output.slow_flush_to(w)
    }

    /// Forget the displayed frame so the next present draws everything.
    ///
    /// Needed after anything else has written to the terminal, such as
    /// switching screens or printing a message.
    pub fn force_redraw(&mut self) {
        self.previous = None;
    }

    fn store_frame(&mut self, frame: &Canvas) {
        match &mut self.previous {
            Some(prev) if prev.width() == frame.width() && prev.height() == frame.height() => {
                prev.clone_from(frame);
            }
            _ => self.previous = Some(frame.clone()),
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::image::PixelWriter;

    fn frame() -> Canvas {
        Canvas::with_char_dimensions(10, 5, Color::BLACK).unwrap()
    }

    fn output(screen: &Screen) -> String {
        String::from_utf8(screen.output_bytes().to_vec()).unwrap()
    }

    #[test]
    fn first_present_draws_everything() {
        let mut screen = Screen::new(ColorMode::TrueColor);
        let stats = screen.present(&frame()).unwrap();

        assert_eq!(stats.cells_rendered, 50);
        assert_eq!(stats.cells_skipped, 0);
        assert!(output(&screen).starts_with("\x1b[1;1H"));
    }

    #[test]
    fn identical_frames_skip_everything() {
        let mut screen = Screen::new(ColorMode::TrueColor);
        let f = frame();
        screen.present(&f).unwrap();

        screen.flush_to(&mut Vec::new()).unwrap();

        let stats = screen.present(&f).unwrap();
        assert_eq!(stats.cells_rendered, 0);
        assert_eq!(stats.cells_skipped, 50);
        assert_eq!(output(&screen), "\x1b[1;1H\n\n\n\n\x1b[0m");
    }

    #[test]
    fn consecutive_presents_track_changes() {
        let mut screen = Screen::new(ColorMode::TrueColor);
        let mut f = frame();

        assert_eq!(screen.present(&f).unwrap().cells_rendered, 50);
        assert_eq!(screen.present(&f).unwrap().cells_rendered, 0);

        f.set_pixel(0, 0, Color::RED);
        assert_eq!(screen.present(&f).unwrap().cells_rendered, 1);

        f.set_pixel(0, 0, Color::CLEAR);
        assert_eq!(screen.present(&f).unwrap().cells_rendered, 1);

        assert_eq!(screen.present(&f).unwrap().cells_rendered, 0);
    }

    #[test]
    fn size_change_redraws_in_full() {
        let mut screen = Screen::new(ColorMode::TrueColor);
        screen.present(&frame()).unwrap();

        let big = Canvas::with_char_dimensions(20, 5, Color::BLACK).unwrap();
        let stats = screen.present(&big).unwrap();
        assert_eq!(stats.cells_rendered, 100);
        assert_eq!(stats.cells_skipped, 0);
    }

    #[test]
    fn force_redraw_draws_everything_again() {
        let mut screen = Screen::new(ColorMode::TrueColor);
        let f = frame();
        screen.present(&f).unwrap();
        screen.force_redraw();

        assert_eq!(screen.present(&f).unwrap().cells_rendered, 50);
    }

    #[test]
    fn flush_to_drains_the_buffer() {
        let mut screen = Screen::new(ColorMode::TrueColor);
        screen.present(&frame()).unwrap();
        let expected = screen.output_bytes().to_vec();

        let mut sink = Vec::new();
        screen.flush_to(&mut sink).unwrap();
        assert_eq!(sink, expected);
        assert!(screen.output_bytes().is_empty());
    }

    #[test]
    fn palette_mode_never_emits_truecolor() {
        let mut screen = Screen::new(ColorMode::Palette);
        let mut f = Canvas::with_char_dimensions(2, 1, Color::rgb(10, 200, 30)).unwrap();
        f.set_pixel(0, 0, Color::rgb(250, 10, 10));
        screen.present(&f).unwrap();

        let out = output(&screen);
        assert!(!out.contains(";2;"));
        assert!(out.contains("38;5;"));
    }

    #[test]
    fn unflushed_diffs_are_kept_until_flush() {
        let mut screen = Screen::new(ColorMode::TrueColor);
        let mut f = frame();
        screen.present(&f).unwrap();
        screen.flush_to(&mut Vec::new()).unwrap();

        f.set_pixel(0, 0, Color::RED);
        assert_eq!(screen.present(&f).unwrap().cells_rendered, 1);
        assert_eq!(screen.present(&f).unwrap().cells_rendered, 0);

        let mut sink = Vec::new();
        screen.flush_to(&mut sink).unwrap();
        let sent = String::from_utf8(sink).unwrap();
        assert!(sent.contains("\x1b[1G\x1b[31m\x1b[40m\u{1FB00}"));
        assert_eq!(sent.matches("\x1b[1;1H").count(), 2);
    }

    #[test]
    fn overlay_runs_on_diffs() {
        let mut screen = Screen::new(ColorMode::TrueColor);
        let f = frame();
        screen.present(&f).unwrap();

        let mut overlay = |out: &mut OutputBuffer| out.write_str("hello");
        screen.present_with(&f, Some(&mut overlay)).unwrap();
        assert!(output(&screen).ends_with("hello\x1b[0m"));
    }
}
