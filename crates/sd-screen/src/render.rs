//! Render / erase engine.
//!
//! Both directions replay cached runs in paint order: `render` writes every
//! projection's visible runs over a cleared screen, `erase_all` writes every
//! blank run and leaves all other cells alone. Each run is a cursor move,
//! a style, then the literal characters.
//!
//! Visible runs resolve placeholder channels against the default style at
//! write time. Blank runs carry the default style captured when their
//! projection was last derived, so erasing after a default-style change
//! without an update blanks with the old default.

use std::io::{self, Write};

use sd_style::TextStyle;
use sd_term::Host;

use crate::error::Result;
use crate::fragment::FragmentId;
use crate::projection::{Projection, RenderRun};
use crate::screen::{Screen, cursor_to, style_sgr};

/// Which half of a projection to replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    Visible,
    Blank,
}

impl Pass {
    fn runs(self, projection: &Projection) -> &[RenderRun] {
        match self {
            Self::Visible => projection.visible(),
            Self::Blank => projection.blank(),
        }
    }
}

/// Cursor move, style, then the literal characters.
fn write_run(
    out: &mut impl Write,
    offset: (u16, u16),
    default: TextStyle,
    run: &RenderRun,
) -> io::Result<()> {
    cursor_to(out, offset, run.x, run.y)?;
    style_sgr(out, run.style, default)?;
    out.write_all(run.text.as_bytes())
}

impl<W: Write, H: Host> Screen<W, H> {
    /// Clear the terminal and paint every tracked fragment.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output fails.
    pub fn render(&mut self) -> Result<()> {
        self.warn_if_stale("render");
        self.reset_color()?;
        self.reset_cursor()?;
        self.clear()?;
        self.set_default_style(self.default_style)?;
        let runs = self.replay_all(Pass::Visible)?;
        self.set_style(self.default_style)?;
        tracing::debug!(fragments = self.fragment_count(), runs, "rendered");
        Ok(())
    }

    /// Blank every cell a tracked fragment paints, and nothing else.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output fails.
    pub fn erase_all(&mut self) -> Result<()> {
        self.warn_if_stale("erase");
        self.reset_color()?;
        self.reset_cursor()?;
        self.set_default_style(self.default_style)?;
        let runs = self.replay_all(Pass::Blank)?;
        self.set_style(self.default_style)?;
        tracing::debug!(fragments = self.fragment_count(), runs, "erased");
        Ok(())
    }

    /// Paint one fragment without clearing or resetting anything.
    /// Returns whether the fragment is tracked.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output fails.
    pub fn display_fragment(&mut self, id: FragmentId) -> Result<bool> {
        self.replay(id, Pass::Visible)
    }

    /// Blank one fragment's cells. Returns whether the fragment is tracked.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output fails.
    pub fn erase_fragment(&mut self, id: FragmentId) -> Result<bool> {
        self.replay(id, Pass::Blank)
    }

    fn replay_all(&mut self, pass: Pass) -> Result<usize> {
        let mut count = 0;
        for id in self.fragment_ids() {
            count += self.runs(id, pass).map_or(0, <[RenderRun]>::len);
            self.replay(id, pass)?;
        }
        Ok(count)
    }

    fn replay(&mut self, id: FragmentId, pass: Pass) -> Result<bool> {
        let (offset, default) = (self.offset(), self.default_style);
        let Some(tracked) = self.slots.get(id.0).and_then(Option::as_ref) else {
            return Ok(false);
        };
        for run in pass.runs(&tracked.projection) {
            write_run(&mut self.out, offset, default, run)?;
        }
        Ok(true)
    }

    fn runs(&self, id: FragmentId, pass: Pass) -> Option<&[RenderRun]> {
        self.tracked(id).map(|t| pass.runs(&t.projection))
    }

    fn warn_if_stale(&self, op: &'static str) {
        if self.has_stale_projections() {
            tracing::warn!(
                op,
                width = self.width,
                height = self.height,
                "projections predate the last geometry change; call update_all_fragments first"
            );
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
