//! `TextStyle` and late-bound default resolution.
//!
//! A `TextStyle` may hold `Default` in any channel. Those placeholders are
//! never replaced when the style is built; they are resolved against the
//! screen's default style immediately before escape codes are emitted, so a
//! style that outlives a default change picks up the new default.

use crate::color::{Color, Intensity};

// ─── Resolution ──────────────────────────────────────────────────────────────

/// A style channel that can hold the `Default` placeholder.
pub trait Channel: Copy {
    fn is_default(self) -> bool;
}

impl Channel for Color {
    #[inline]
    fn is_default(self) -> bool {
        Self::is_default(self)
    }
}

impl Channel for Intensity {
    #[inline]
    fn is_default(self) -> bool {
        Self::is_default(self)
    }
}

/// Return `fallback` if `requested` is the placeholder, `requested` otherwise.
#[inline]
#[must_use]
pub fn resolve<T: Channel>(requested: T, fallback: T) -> T {
    if requested.is_default() {
        fallback
    } else {
        requested
    }
}

// ─── TextStyle ───────────────────────────────────────────────────────────────

/// Foreground color, background color and intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextStyle {
    pub fg: Color,
    pub bg: Color,
    pub intensity: Intensity,
}

impl TextStyle {
    /// Every channel inherits from the screen default.
    pub const INHERIT: Self = Self::new(Color::Default, Color::Default, Intensity::Default);

    /// What a default channel collapses to when it is reset: white on black,
    /// normal intensity.
    pub const BASELINE: Self = Self::new(Color::White, Color::Black, Intensity::Normal);

    #[inline]
    #[must_use]
    pub const fn new(fg: Color, bg: Color, intensity: Intensity) -> Self {
        Self { fg, bg, intensity }
    }

    #[inline]
    #[must_use]
    pub const fn with_fg(self, fg: Color) -> Self {
        Self { fg, ..self }
    }

    #[inline]
    #[must_use]
    pub const fn with_bg(self, bg: Color) -> Self {
        Self { bg, ..self }
    }

    #[inline]
    #[must_use]
    pub const fn with_intensity(self, intensity: Intensity) -> Self {
        Self { intensity, ..self }
    }

    /// Resolve each placeholder channel independently against `default`.
    #[must_use]
    pub fn resolve_against(self, default: Self) -> Self {
        Self {
            fg: resolve(self.fg, default.fg),
            bg: resolve(self.bg, default.bg),
            intensity: resolve(self.intensity, default.intensity),
        }
    }

    /// Whether no channel holds a placeholder.
    #[must_use]
    pub const fn is_resolved(self) -> bool {
        !self.fg.is_default() && !self.bg.is_default() && !self.intensity.is_default()
    }

    /// Produce a new default style from this one.
    ///
    /// `None` leaves a channel unchanged. `Default` or `Reset` collapse to the
    /// baseline (white foreground, black background, normal intensity); any
    /// other value is stored as given. The result never holds a placeholder
    /// as long as `self` didn't.
    #[must_use]
    pub fn with_default_channels(
        self,
        fg: Option<Color>,
        bg: Option<Color>,
        intensity: Option<Intensity>,
    ) -> Self {
        let collapse = |c: Color, baseline: Color| match c {
            Color::Default | Color::Reset => baseline,
            other => other,
        };
        Self {
            fg: fg.map_or(self.fg, |c| collapse(c, Color::White)),
            bg: bg.map_or(self.bg, |c| collapse(c, Color::Black)),
            intensity: intensity.map_or(self.intensity, |i| resolve(i, Intensity::Normal)),
        }
    }

    /// Collapse this style into a screen default, as
    /// [`with_default_channels`](Self::with_default_channels) does with every
    /// channel supplied.
    #[must_use]
    pub fn as_default(self) -> Self {
        Self::BASELINE.with_default_channels(Some(self.fg), Some(self.bg), Some(self.intensity))
    }

    /// Legacy two-digit console color code: background digit, then
    /// foreground digit. Channels without a legacy digit fall back to black
    /// background and white foreground.
    #[must_use]
    pub fn legacy_code(self) -> String {
        let bg = self.bg.legacy_hex().unwrap_or('0');
        let fg = self.fg.legacy_hex().unwrap_or('7');
        [bg, fg].iter().collect()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
