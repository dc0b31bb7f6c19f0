//! The screen — geometry, default style, and the tracked fragment list.
//!
//! A [`Screen`] owns its output stream and its host. Geometry changes made
//! through the setters only change the numbers: projections keep the
//! clipping they were derived with until [`Screen::update_all_fragments`]
//! runs. Painting and blanking live in [`crate::render`].
//!
//! # Lifecycle
//!
//! ```text
//! new ──► init ──► (add / update / render / erase)* ──► dispose
//! ```
//!
//! A top-level screen sizes the real terminal once during init (clearing
//! it). A sub-screen never touches the terminal size; it is clamped to fit
//! inside it. `dispose` resets colors and parks the cursor on the bottom
//! line. Both `init` and `dispose` are idempotent, and dropping an
//! initialised screen disposes it.

use std::io::{self, Write};

use sd_style::{Color, Intensity, TextStyle};
use sd_term::{Host, Size, ansi};

use crate::config::{self, MIN_HEIGHT, ScreenConfig};
use crate::error::{Result, ScreenError};
use crate::fragment::{FragmentId, TextFragment};
use crate::projection::Projection;

/// Size assumed when neither the config nor the host knows better.
const FALLBACK_SIZE: Size = Size::new(80, 24);

/// A fragment and its current projection.
#[derive(Debug)]
pub(crate) struct Tracked {
    pub(crate) fragment: TextFragment,
    pub(crate) projection: Projection,
}

/// A character terminal, or a region of one, as an addressable canvas.
pub struct Screen<W: Write, H: Host> {
    pub(crate) out: W,
    pub(crate) host: H,
    pub(crate) width: u16,
    pub(crate) height: u16,
    /// Sub-screen offset; `None` for a top-level screen.
    pub(crate) offset: Option<(u16, u16)>,
    pub(crate) min_width: u16,
    pub(crate) default_style: TextStyle,
    /// Paint order is slot order. Removed fragments leave an empty slot.
    pub(crate) slots: Vec<Option<Tracked>>,
    /// Bumped on every geometry change.
    pub(crate) generation: u64,
    initialized: bool,
    in_terminal: bool,
    requested: (Option<u16>, Option<u16>),
}

impl<W: Write, H: Host> Screen<W, H> {
    /// Create and initialise a screen.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` or a host operation fails.
    pub fn new(out: W, host: H, config: ScreenConfig) -> Result<Self> {
        let mut screen = Self {
            out,
            host,
            width: 1,
            height: MIN_HEIGHT,
            offset: config.offset,
            min_width: 1,
            default_style: config.default_style.as_default(),
            slots: Vec::new(),
            generation: 0,
            initialized: false,
            in_terminal: config.in_terminal,
            requested: (config.width, config.height),
        };
        screen.init()?;
        Ok(screen)
    }

    /// Resolve geometry and, for a top-level screen, size the terminal.
    ///
    /// No-op if already initialised.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output or a host operation fails.
    pub fn init(&mut self) -> Result<()> {
        if self.initialized {
            return Ok(());
        }
        self.initialized = true;

        let live = self.host.size().unwrap_or(FALLBACK_SIZE);
        let (off_x, off_y) = self.offset.unwrap_or((0, 0));

        self.min_width = if self.is_sub_screen() {
            1
        } else {
            config::min_width(self.in_terminal, self.host.font_cell_width())
        };

        let width = self.requested.0.unwrap_or_else(|| live.cols.saturating_sub(off_x));
        let height = self.requested.1.unwrap_or_else(|| live.rows.saturating_sub(off_y));
        self.set_size(width, height);

        tracing::debug!(
            width = self.width,
            height = self.height,
            min_width = self.min_width,
            sub_screen = self.is_sub_screen(),
            "screen initialised"
        );

        self.set_default_style(self.default_style)?;
        if !self.is_sub_screen() {
            self.change_size()?;
        }
        Ok(())
    }

    /// Reset colors, park the cursor on the bottom line, and flush.
    ///
    /// No-op if not initialised. Must run before the terminal is reused
    /// for other output.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output fails.
    pub fn dispose(&mut self) -> Result<()> {
        if !self.initialized {
            return Ok(());
        }
        self.initialized = false;
        self.reset()?;
        self.out.flush()?;
        tracing::debug!("screen disposed");
        Ok(())
    }

    // ── Queries ─────────────────────────────────────────────────────────

    #[inline]
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Sub-screen offset, `(0, 0)` for a top-level screen.
    #[must_use]
    pub fn offset(&self) -> (u16, u16) {
        self.offset.unwrap_or((0, 0))
    }

    #[must_use]
    pub const fn is_sub_screen(&self) -> bool {
        self.offset.is_some()
    }

    #[must_use]
    pub const fn min_width(&self) -> u16 {
        self.min_width
    }

    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The current default style. Never holds a placeholder.
    #[must_use]
    pub const fn default_style(&self) -> TextStyle {
        self.default_style
    }

    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// Everything written so far, when the output is inspectable.
    #[must_use]
    pub const fn output(&self) -> &W {
        &self.out
    }

    pub const fn output_mut(&mut self) -> &mut W {
        &mut self.out
    }

    /// Number of tracked fragments.
    #[must_use]
    pub fn fragment_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Handles of every tracked fragment, in paint order.
    #[must_use]
    pub fn fragment_ids(&self) -> Vec<FragmentId> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(i, _)| FragmentId(i))
            .collect()
    }

    #[must_use]
    pub fn fragment(&self, id: FragmentId) -> Option<&TextFragment> {
        self.tracked(id).map(|t| &t.fragment)
    }

    #[must_use]
    pub fn projection(&self, id: FragmentId) -> Option<&Projection> {
        self.tracked(id).map(|t| &t.projection)
    }

    pub(crate) fn tracked(&self, id: FragmentId) -> Option<&Tracked> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    // ── Geometry ────────────────────────────────────────────────────────

    /// Set the width in cells, clamped to the minimum and, for a
    /// sub-screen, to what fits inside the terminal.
    ///
    /// Does not resize the terminal and does not re-project fragments.
    pub fn set_width(&mut self, width: u16) {
        let mut width = width.max(self.min_width);
        if let (Some((off_x, _)), Some(live)) = (self.offset, self.host.size()) {
            if u32::from(width) + u32::from(off_x) > u32::from(live.cols) {
                width = live.cols.saturating_sub(off_x).max(1);
            }
        }
        if width != self.width {
            self.width = width;
            self.generation += 1;
            tracing::debug!(width, "screen width changed");
        }
    }

    /// Set the height in cells; see [`set_width`](Self::set_width).
    pub fn set_height(&mut self, height: u16) {
        let mut height = height.max(MIN_HEIGHT);
        if let (Some((_, off_y)), Some(live)) = (self.offset, self.host.size()) {
            if u32::from(height) + u32::from(off_y) > u32::from(live.rows) {
                height = live.rows.saturating_sub(off_y).max(1);
            }
        }
        if height != self.height {
            self.height = height;
            self.generation += 1;
            tracing::debug!(height, "screen height changed");
        }
    }

    pub fn set_size(&mut self, width: u16, height: u16) {
        self.set_width(width);
        self.set_height(height);
    }

    /// Resize the real terminal to this screen's size, then re-render.
    ///
    /// Clears everything on the terminal; call it once, not per frame.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output or the host resize fails.
    pub fn change_size(&mut self) -> Result<()> {
        let size = self.size();
        if !self.host.resize(&mut self.out, size)? {
            tracing::warn!(?size, "host ignored terminal resize");
        }
        self.render()
    }

    // ── Default style ───────────────────────────────────────────────────

    /// Change the default style channel by channel.
    ///
    /// `None` leaves a channel alone; `Default` and `Reset` collapse to white
    /// on black at normal intensity. The new default is pushed to the host
    /// as the terminal's baseline colors.
    ///
    /// Projections are not rebuilt: blank runs keep the default they were
    /// derived with until the next update.
    ///
    /// # Errors
    ///
    /// Returns an error if the host baseline command fails.
    pub fn set_default(
        &mut self,
        fg: Option<Color>,
        bg: Option<Color>,
        intensity: Option<Intensity>,
    ) -> Result<()> {
        self.default_style = self.default_style.with_default_channels(fg, bg, intensity);
        tracing::debug!(
            fg = %self.default_style.fg,
            bg = %self.default_style.bg,
            intensity = %self.default_style.intensity,
            "default style changed"
        );
        let legacy = self.default_style.legacy_code();
        if !self.host.apply_baseline(&mut self.out, &legacy)? {
            tracing::trace!(legacy = %legacy, "host kept its baseline colors");
        }
        Ok(())
    }

    /// Change every channel of the default style at once.
    ///
    /// # Errors
    ///
    /// See [`set_default`](Self::set_default).
    pub fn set_default_style(&mut self, style: TextStyle) -> Result<()> {
        self.set_default(Some(style.fg), Some(style.bg), Some(style.intensity))
    }

    // ── Placement ───────────────────────────────────────────────────────

    /// Track a fragment. It paints above everything added before it.
    ///
    /// # Errors
    ///
    /// Returns an error if the fragment uses a reserved wrap policy or a
    /// cutoff marker.
    pub fn add_fragment(&mut self, fragment: TextFragment) -> Result<FragmentId> {
        fragment.validate()?;
        Ok(self.push(fragment))
    }

    /// Track several fragments in order. Nothing is added unless every
    /// fragment is valid.
    ///
    /// # Errors
    ///
    /// See [`add_fragment`](Self::add_fragment).
    pub fn add_fragments<I>(&mut self, fragments: I) -> Result<Vec<FragmentId>>
    where
        I: IntoIterator<Item = TextFragment>,
    {
        let fragments: Vec<TextFragment> = fragments.into_iter().collect();
        fragments.iter().try_for_each(TextFragment::validate)?;
        Ok(fragments.into_iter().map(|f| self.push(f)).collect())
    }

    fn push(&mut self, fragment: TextFragment) -> FragmentId {
        let projection = self.project(&fragment);
        let id = FragmentId(self.slots.len());
        tracing::debug!(%id, visible = projection.is_visible(), "fragment added");
        self.slots.push(Some(Tracked {
            fragment,
            projection,
        }));
        id
    }

    /// Stop tracking a fragment. Other handles stay valid and keep their
    /// paint order. Nothing is written to the terminal.
    pub fn remove_fragment(&mut self, id: FragmentId) -> Option<TextFragment> {
        let removed = self.slots.get_mut(id.0).and_then(Option::take)?;
        tracing::debug!(%id, "fragment removed");
        Some(removed.fragment)
    }

    /// Re-derive one fragment's projection. Returns whether it was found.
    pub fn update_fragment(&mut self, id: FragmentId) -> bool {
        let (width, height, style, generation) =
            (self.width, self.height, self.default_style, self.generation);
        match self.slots.get_mut(id.0).and_then(Option::as_mut) {
            Some(tracked) => {
                tracked.projection = derive(&tracked.fragment, width, height, style, generation);
                true
            }
            None => false,
        }
    }

    /// Like [`update_fragment`](Self::update_fragment) but an unknown
    /// handle is an error.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::UnknownFragment`] if `id` is not tracked.
    pub fn try_update_fragment(&mut self, id: FragmentId) -> Result<()> {
        if self.update_fragment(id) {
            Ok(())
        } else {
            Err(ScreenError::UnknownFragment(id))
        }
    }

    /// Re-derive every projection. Required after a geometry change before
    /// the next redraw.
    pub fn update_all_fragments(&mut self) {
        let (width, height, style, generation) =
            (self.width, self.height, self.default_style, self.generation);
        for tracked in self.slots.iter_mut().flatten() {
            tracked.projection = derive(&tracked.fragment, width, height, style, generation);
        }
    }

    fn project(&self, fragment: &TextFragment) -> Projection {
        derive(
            fragment,
            self.width,
            self.height,
            self.default_style,
            self.generation,
        )
    }

    /// Whether any projection was derived with an older geometry.
    #[must_use]
    pub fn has_stale_projections(&self) -> bool {
        self.slots
            .iter()
            .flatten()
            .any(|t| t.projection.generation != self.generation)
    }
}

fn derive(
    fragment: &TextFragment,
    width: u16,
    height: u16,
    blank_style: TextStyle,
    generation: u64,
) -> Projection {
    let mut projection = Projection::new(fragment, width, height, blank_style);
    projection.generation = generation;
    tracing::trace!(
        x = fragment.x(),
        y = fragment.y(),
        width,
        height,
        visible = projection.is_visible(),
        "projection derived"
    );
    projection
}

impl<W: Write, H: Host> Drop for Screen<W, H> {
    fn drop(&mut self) {
        if let Err(e) = self.dispose() {
            tracing::warn!(error = %e, "failed to dispose screen");
        }
    }
}

// Terminal writes used by both the screen and the render engine.
impl<W: Write, H: Host> Screen<W, H> {
    /// Reset the current SGR state (not the default style).
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output fails.
    pub fn reset_color(&mut self) -> Result<()> {
        ansi::reset(&mut self.out)?;
        Ok(())
    }

    /// Reset the current SGR state and the default style to the baseline.
    ///
    /// # Errors
    ///
    /// Returns an error if writing or the host baseline command fails.
    pub fn reset_all_color(&mut self) -> Result<()> {
        self.reset_color()?;
        self.set_default(Some(Color::Reset), Some(Color::Reset), Some(Intensity::Normal))
    }

    /// Move the cursor to the start of the bottom line.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output fails.
    pub fn reset_cursor(&mut self) -> Result<()> {
        self.move_cursor(0, self.height.saturating_sub(1))
    }

    /// Reset every color and park the cursor on the bottom line.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output fails.
    pub fn reset(&mut self) -> Result<()> {
        self.reset_all_color()?;
        self.reset_cursor()
    }

    /// Clear the whole terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output fails.
    pub fn clear(&mut self) -> Result<()> {
        ansi::clear_screen(&mut self.out)?;
        Ok(())
    }

    /// Move the cursor to a screen cell, offset for sub-screens.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output fails.
    pub fn move_cursor(&mut self, x: u16, y: u16) -> Result<()> {
        let offset = self.offset();
        cursor_to(&mut self.out, offset, x, y)?;
        Ok(())
    }

    /// Make `style` the current terminal style, resolving placeholder
    /// channels against the default style as it is right now.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output fails.
    pub fn set_style(&mut self, style: TextStyle) -> Result<()> {
        style_sgr(&mut self.out, style, self.default_style)?;
        Ok(())
    }

    /// Apply `style` and write `text` at the current cursor position.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output fails.
    pub fn write_styled(&mut self, text: &str, style: TextStyle) -> Result<()> {
        self.set_style(style)?;
        self.out.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Write `text` at `(x, y)` right away, outside the fragment list.
    ///
    /// The origin is clamped onto the screen the way a wrapping fragment's
    /// is, and the text is written in whatever style is current.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output fails.
    pub fn write_to(&mut self, text: &str, x: u16, y: u16) -> Result<()> {
        self.move_cursor(
            x.min(self.width.saturating_sub(1)),
            y.min(self.height.saturating_sub(1)),
        )?;
        self.out.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Flush the output stream.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// Cursor move to a screen cell, shifted by the sub-screen offset.
pub(crate) fn cursor_to(
    out: &mut impl Write,
    (off_x, off_y): (u16, u16),
    x: u16,
    y: u16,
) -> io::Result<()> {
    ansi::cursor_to(
        out,
        u32::from(off_x) + u32::from(x),
        u32::from(off_y) + u32::from(y),
    )
}

/// SGR for `style` with placeholder channels bound to `default`.
pub(crate) fn style_sgr(
    out: &mut impl Write,
    style: TextStyle,
    default: TextStyle,
) -> io::Result<()> {
    let resolved = style.resolve_against(default);
    if let Some(fg) = resolved.fg.sgr_offset() {
        ansi::fg(out, fg)?;
    }
    if let Some(bg) = resolved.bg.sgr_offset() {
        ansi::bg(out, bg)?;
    }
    if let Some(code) = resolved.intensity.sgr_code() {
        ansi::intensity(out, code)?;
    }
    Ok(())
}

// ─── Tests ───────────────────────────────────────────────────────────────────
