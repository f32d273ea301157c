// SPDX-License-Identifier: MIT
//
// Alternate screen strings from the terminfo database.
//
// `tput smcup` / `tput rmcup` print the enter and leave sequences for the
// alternate screen buffer. They are fetched once at startup. Anything that
// goes wrong (no tput, no TERM, a terminal without the capability) leaves
// the strings empty: the program then draws on the normal screen instead of
// failing to start.

use std::io::{self, Write};
use std::process::Command;

/// Terminal strings obtained from terminfo.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenCapabilities {
    enter_alt_screen: Vec<u8>,
    leave_alt_screen: Vec<u8>,
}

impl ScreenCapabilities {
    /// Ask `tput` for the alternate screen strings. Never fails.
    #[must_use]
    pub fn query() -> Self {
        let caps = Self {
            enter_alt_screen: tput("smcup"),
            leave_alt_screen: tput("rmcup"),
        };
        tracing::debug!(
            smcup = caps.enter_alt_screen.len(),
            rmcup = caps.leave_alt_screen.len(),
            "queried screen capabilities"
        );
        caps
    }

    /// Capabilities from known strings.
    #[must_use]
    pub fn new(enter_alt_screen: impl Into<Vec<u8>>, leave_alt_screen: impl Into<Vec<u8>>) -> Self {
        Self {
            enter_alt_screen: enter_alt_screen.into(),
            leave_alt_screen: leave_alt_screen.into(),
        }
    }

    /// Whether both alternate screen strings are known.
    #[must_use]
    pub fn has_alt_screen(&self) -> bool {
        !self.enter_alt_screen.is_empty() && !self.leave_alt_screen.is_empty()
    }

    /// The enter sequence, possibly empty.
    #[must_use]
    pub fn enter_alt_screen_bytes(&self) -> &[u8] {
        &self.enter_alt_screen
    }

    /// The leave sequence, possibly empty.
    #[must_use]
    pub fn leave_alt_screen_bytes(&self) -> &[u8] {
        &self.leave_alt_screen
    }

    /// Switch to the alternate screen. Writes nothing if unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn enter_alt_screen(&self, w: &mut impl Write) -> io::Result<()> {
        w.write_all(&self.enter_alt_screen)
    }

    /// Return to the normal screen. Writes nothing if unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn leave_alt_screen(&self, w: &mut impl Write) -> io::Result<()> {
        w.write_all(&self.leave_alt_screen)
    }
}

/// Output of `tput <capability>`, or nothing on any failure.
fn tput(capability: &str) -> Vec<u8> {
    match Command::new("tput").arg(capability).output() {
        Ok(output) if output.status.success() => output.stdout,
        Ok(output) => {
            tracing::debug!(capability, status = %output.status, "tput reported no capability");
            Vec::new()
        }
        Err(err) => {
            tracing::debug!(capability, %err, "tput unavailable");
            Vec::new()
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
