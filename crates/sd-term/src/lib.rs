// SPDX-License-Identifier: MIT
//
// sd-term — terminal primitives for screen-display.
//
// The byte-level layer under a screen: the handful of ANSI sequences it
// needs (cursor position, SGR colors and intensity, clear, reset, window
// resize) and the host queries that size it. Every escape sequence is
// written straight into the caller's `Write`; nothing is buffered here.

pub mod ansi;
pub mod host;

pub use host::{FixedHost, Host, Size, TtyHost};
