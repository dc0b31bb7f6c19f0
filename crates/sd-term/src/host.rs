// SPDX-License-Identifier: MIT
//
// Host terminal queries and the few operations a screen asks of its host.
//
// Safety: the TTY implementation uses `unsafe` for ioctl (TIOCGWINSZ) and
// isatty. These are the standard POSIX interfaces for terminal queries;
// each unsafe block is minimal.
#![allow(unsafe_code)]
//
// A screen needs four things from the outside world: the live terminal size,
// the console font's cell width (to derive a minimum width), a one-shot
// destructive resize, and a way to set the terminal's baseline colors. All
// four are behind the `Host` trait so screens can be driven against a fixed
// geometry in tests or when embedded in something that is not a terminal.

use std::io::{self, Write};

use crate::ansi;

// ─── Size ───────────────────────────────────────────────────────────────────

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    /// Number of columns (width in character cells).
    pub cols: u16,
    /// Number of rows (height in character cells).
    pub rows: u16,
}

impl Size {
    #[inline]
    #[must_use]
    pub const fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }
}

// ─── Terminal Queries ───────────────────────────────────────────────────────

#[cfg(unix)]
fn winsize() -> Option<libc::winsize> {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut ws) };
    (result == 0).then_some(ws)
}

/// Query the current terminal size via `ioctl(TIOCGWINSZ)`.
///
/// Returns `None` if stdout is not a terminal or the query fails.
#[cfg(unix)]
#[must_use]
pub fn get_size() -> Option<Size> {
    winsize()
        .filter(|ws| ws.ws_col > 0 && ws.ws_row > 0)
        .map(|ws| Size::new(ws.ws_col, ws.ws_row))
}

#[cfg(not(unix))]
#[must_use]
pub fn get_size() -> Option<Size> {
    None
}

/// Width in pixels of one character cell of the console font.
///
/// Derived from the pixel dimensions `TIOCGWINSZ` reports. Many emulators
/// leave those fields zero, in which case the metric is unavailable.
#[cfg(unix)]
#[must_use]
pub fn font_cell_width() -> Option<u16> {
    winsize()
        .filter(|ws| ws.ws_col > 0 && ws.ws_xpixel > 0)
        .map(|ws| ws.ws_xpixel / ws.ws_col)
        .filter(|&w| w > 0)
}

#[cfg(not(unix))]
#[must_use]
pub fn font_cell_width() -> Option<u16> {
    None
}

/// Check whether stdout is connected to a terminal (TTY).
#[cfg(unix)]
#[must_use]
pub fn is_tty() -> bool {
    unsafe { libc::isatty(libc::STDOUT_FILENO) != 0 }
}

#[cfg(not(unix))]
#[must_use]
pub fn is_tty() -> bool {
    false
}

// ─── Host ───────────────────────────────────────────────────────────────────

/// The external collaborator a screen runs against.
///
/// Operations that the host cannot perform return `Ok(false)` rather than an
/// error: a terminal that ignores a resize request is not a failure.
pub trait Host {
    /// Live size of the terminal, if it can be determined.
    fn size(&self) -> Option<Size>;

    /// Pixel width of one font cell, if it can be determined.
    fn font_cell_width(&self) -> Option<u16>;

    /// Destructively resize the terminal. Clears all prior content.
    ///
    /// # Errors
    ///
    /// Returns an error if writing the request to `out` fails.
    fn resize(&mut self, out: &mut dyn Write, size: Size) -> io::Result<bool>;

    /// Apply baseline colors given as a legacy two-digit code (background
    /// digit first, then foreground, e.g. `"0F"`).
    ///
    /// # Errors
    ///
    /// Returns an error if the host command cannot be issued.
    fn apply_baseline(&mut self, out: &mut dyn Write, legacy: &str) -> io::Result<bool>;
}

// ─── TtyHost ────────────────────────────────────────────────────────────────

/// The real terminal attached to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct TtyHost;

impl TtyHost {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Host for TtyHost {
    fn size(&self) -> Option<Size> {
        get_size()
    }

    fn font_cell_width(&self) -> Option<u16> {
        font_cell_width()
    }

    fn resize(&mut self, mut out: &mut dyn Write, size: Size) -> io::Result<bool> {
        if !is_tty() {
            tracing::debug!(?size, "not a tty, skipping resize");
            return Ok(false);
        }
        ansi::resize_window(&mut out, size.cols, size.rows)?;
        out.flush()?;
        Ok(true)
    }

    #[cfg(windows)]
    fn apply_baseline(&mut self, _out: &mut dyn Write, legacy: &str) -> io::Result<bool> {
        let status = std::process::Command::new("cmd")
            .args(["/C", "color", legacy])
            .status()?;
        Ok(status.success())
    }

    #[cfg(not(windows))]
    fn apply_baseline(&mut self, _out: &mut dyn Write, legacy: &str) -> io::Result<bool> {
        tracing::debug!(legacy, "terminal baseline colors unsupported on this host");
        Ok(false)
    }
}

// ─── FixedHost ──────────────────────────────────────────────────────────────

/// A host with fixed geometry that records what was asked of it.
///
/// Used for tests and for screens rendered into something other than a
/// live terminal (a log, a pipe, an emulator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedHost {
    size: Size,
    font_cell_width: Option<u16>,
    /// Every resize request, in order.
    pub resizes: Vec<Size>,
    /// Every baseline color code applied, in order.
    pub baselines: Vec<String>,
}

impl FixedHost {
    #[must_use]
    pub const fn new(cols: u16, rows: u16) -> Self {
        Self {
            size: Size::new(cols, rows),
            font_cell_width: None,
            resizes: Vec::new(),
            baselines: Vec::new(),
        }
    }

    /// Report a font cell width, as a real console would.
    #[must_use]
    pub fn with_font_cell_width(mut self, px: u16) -> Self {
        self.font_cell_width = Some(px);
        self
    }
}

impl Host for FixedHost {
    fn size(&self) -> Option<Size> {
        Some(self.size)
    }

    fn font_cell_width(&self) -> Option<u16> {
        self.font_cell_width
    }

    fn resize(&mut self, _out: &mut dyn Write, size: Size) -> io::Result<bool> {
        self.resizes.push(size);
        Ok(true)
    }

    fn apply_baseline(&mut self, _out: &mut dyn Write, legacy: &str) -> io::Result<bool> {
        self.baselines.push(legacy.to_owned());
        Ok(true)
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
