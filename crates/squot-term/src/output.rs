// SPDX-License-Identifier: MIT
//
// Output buffering and stateful squot emission.
//
// Two components work together to minimize terminal I/O:
//
//   OutputBuffer — accumulates all ANSI bytes in memory so the entire frame
//   can be handed to the terminal in a few large writes. Lots of small
//   writes really slow down some terminal emulators; this keeps them happy.
//
//   SquotWriter — remembers the last foreground and background it emitted
//   and skips color escapes that would not change anything. If the previous
//   cell was red on black and so is this one, only the glyph goes out.
//
// A SquotWriter lives for one run of adjacent cells. Anything that breaks
// the run (a new row, a skipped cell in a diff) starts a fresh writer, so
// the first cell of every run always states both colors.

use std::io::{self, Write};

use crate::codec::ColorCodec;
use crate::color::Color;
use crate::glyph::{self, Sextant};

// ─── OutputBuffer ────────────────────────────────────────────────────────────

/// A byte buffer that accumulates ANSI output until an explicit flush.
///
/// Default capacity: 16 KB, enough for most frames without reallocation.
pub struct OutputBuffer {
    buf: Vec<u8>,
}

const DEFAULT_CAPACITY: usize = 16_384;

/// Largest single write issued by [`OutputBuffer::flush_to`].
pub const FLUSH_CHUNK: usize = 16_384;

impl OutputBuffer {
    /// Create an empty buffer with default capacity (16 KB).
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(DEFAULT_CAPACITY),
        }
    }

    /// Number of bytes accumulated.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether the buffer is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The accumulated bytes (for testing and debugging).
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Append text.
    #[inline]
    pub fn write_str(&mut self, text: &str) {
        self.buf.extend_from_slice(text.as_bytes());
    }

    /// Append raw bytes.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Append text followed by a line feed.
    pub fn writeln(&mut self, text: &str) {
        self.buf.extend_from_slice(text.as_bytes());
        self.buf.push(b'\n');
    }

    /// Append the glyph for a squot mask as UTF-8.
    #[inline]
    pub fn write_glyph(&mut self, bits: Sextant) {
        let mut enc = [0u8; 4];
        let s = glyph::glyph(bits).encode_utf8(&mut enc);
        self.buf.extend_from_slice(s.as_bytes());
    }

    /// Clear the buffer for reuse (keeps allocated capacity).
    #[inline]
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Write accumulated output to stdout and clear the buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to stdout fails.
    pub fn flush_stdout(&mut self) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        self.flush_to(&mut stdout)
    }

    /// Write accumulated output to `w` in chunks of at most
    /// [`FLUSH_CHUNK`] bytes, then clear the buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails. The buffer is left intact
    /// in that case.
    pub fn flush_to(&mut self, w: &mut impl Write) -> io::Result<()> {
        self.flush_chunked(w, FLUSH_CHUNK)
    }

    /// Write accumulated output one byte per write call, then clear.
    ///
    /// Painfully slow on purpose: watching a frame arrive byte by byte is
    /// the easiest way to see what the diff engine actually sends.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn slow_flush_to(&mut self, w: &mut impl Write) -> io::Result<()> {
        self.flush_chunked(w, 1)
    }

    fn flush_chunked(&mut self, w: &mut impl Write, chunk: usize) -> io::Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        for part in self.buf.chunks(chunk) {
            w.write_all(part)?;
        }
        w.flush()?;
        tracing::trace!(bytes = self.buf.len(), chunk, "flushed output buffer");
        self.buf.clear();
        Ok(())
    }
}

impl Write for OutputBuffer {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        // Intentionally a no-op. Real flushing via flush_stdout() / flush_to().
        Ok(())
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

// ─── SquotWriter ─────────────────────────────────────────────────────────────

/// Per-run color state: emits fg/bg escapes only when they change.
#[derive(Debug, Clone, Copy, Default)]
pub struct SquotWriter {
    last_fg: Option<Color>,
    last_bg: Option<Color>,
}

impl SquotWriter {
    /// Create a writer with no tracked state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_fg: None,
            last_bg: None,
        }
    }

    /// Emit one cell: colors if changed, then the glyph for `bits`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn write_cell(
        &mut self,
        out: &mut OutputBuffer,
        codec: &ColorCodec,
        fg: Color,
        bg: Color,
        bits: Sextant,
    ) -> io::Result<()> {
        self.write_char(out, codec, fg, bg, glyph::glyph(bits))
    }

    /// Emit one cell holding an arbitrary character.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn write_char(
        &mut self,
        out: &mut OutputBuffer,
        codec: &ColorCodec,
        fg: Color,
        bg: Color,
        ch: char,
    ) -> io::Result<()> {
        if self.last_fg != Some(fg) {
            codec.fg(out, fg)?;
            self.last_fg = Some(fg);
        }

        if self.last_bg != Some(bg) {
            codec.bg(out, bg)?;
            self.last_bg = Some(bg);
        }

        let mut enc = [0u8; 4];
        out.write_str(ch.encode_utf8(&mut enc));
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
