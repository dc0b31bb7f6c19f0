// SPDX-License-Identifier: MIT
//
// ANSI escape sequence generation.
//
// Pure functions that write escape sequences to any `impl Write`. No state,
// no decisions about what color a fragment resolves to — that's the screen's
// job. This module just knows the byte-level encoding of every terminal
// command a screen needs.
//
// All cursor positions are 0-indexed in our API and converted to 1-indexed
// for the terminal (ANSI standard uses 1-based coordinates).
//
// Color arguments are SGR *offsets*: 0–7 for the base palette, 9 for the
// terminal's own default, 60–67 for the light palette. The foreground
// writer adds 30, the background writer adds 40, so 61 becomes `91` / `101`.
use std::io::{self, Write};

// ─── Cursor ──────────────────────────────────────────────────────────────────

/// Move the cursor to `(x, y)` using the CUP (Cursor Position) sequence.
///
/// Our coordinates are 0-indexed; ANSI CUP is 1-indexed. Arguments are
/// `u32` so that a sub-screen offset plus a coordinate never overflows.
#[inline]
pub fn cursor_to(w: &mut impl Write, x: u32, y: u32) -> io::Result<()> {
    write!(w, "\x1b[{};{}H", y + 1, x + 1)
}

// ─── Screen ──────────────────────────────────────────────────────────────────

/// Clear the entire screen (ED 2).
#[inline]
pub fn clear_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[2J")
}

/// Reset all SGR attributes to terminal defaults (SGR 0).
#[inline]
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[0m")
}

/// Ask the terminal emulator to resize its text area (XTWINOPS 8).
///
/// Most emulators reflow or clear the visible content when this is honored,
/// and many ignore it entirely. Callers treat it as a one-shot operation.
#[inline]
pub fn resize_window(w: &mut impl Write, cols: u16, rows: u16) -> io::Result<()> {
    write!(w, "\x1b[8;{rows};{cols}t")
}

// ─── Select Graphic Rendition ────────────────────────────────────────────────

/// Set the foreground color from an SGR offset (`30 + offset`).
#[inline]
pub fn fg(w: &mut impl Write, offset: u8) -> io::Result<()> {
    write!(w, "\x1b[{}m", 30 + u16::from(offset))
}

/// Set the background color from an SGR offset (`40 + offset`).
#[inline]
pub fn bg(w: &mut impl Write, offset: u8) -> io::Result<()> {
    write!(w, "\x1b[{}m", 40 + u16::from(offset))
}

/// Set the intensity with its raw SGR code (1 bright, 2 dim, 22 normal).
#[inline]
pub fn intensity(w: &mut impl Write, code: u8) -> io::Result<()> {
    write!(w, "\x1b[{code}m")
}

// ─── Tests ───────────────────────────────────────────────────────────────────
