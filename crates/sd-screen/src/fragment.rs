//! Text fragments — positioned, styled pieces of text a screen tracks.
//!
//! A fragment is fixed once built: the screen never changes its content or
//! position. To move or reword one, remove it and add a fresh fragment.

use std::fmt;

use sd_style::TextStyle;

use crate::error::{Result, ScreenError};

// ─── WrapPolicy ──────────────────────────────────────────────────────────────

/// Where the continuation of a wrapping fragment starts.
///
/// Only [`Left`](Self::Left) has defined behavior. The others are reserved
/// and rejected when a fragment is added to a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WrapPolicy {
    /// Continue at the terminal's left edge (the terminal's own wrapping).
    #[default]
    Left,
    Center,
    Right,
    /// Continue under the fragment's origin column.
    Under,
}

impl WrapPolicy {
    #[must_use]
    pub const fn is_supported(self) -> bool {
        matches!(self, Self::Left)
    }
}

// ─── FragmentId ──────────────────────────────────────────────────────────────

/// Stable handle to a fragment tracked by a screen.
///
/// Handles are slot indices: they keep paint order and never shift when
/// another fragment is removed. A handle is only meaningful for the screen
/// that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FragmentId(pub(crate) usize);

impl FragmentId {
    /// Position in paint order (0 paints first).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for FragmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ─── TextFragment ────────────────────────────────────────────────────────────

/// A piece of text at a fixed cell position.
///
/// # Examples
///
/// ```
/// use sd_screen::fragment::TextFragment;
/// use sd_style::{Color, TextStyle};
///
/// let title = TextFragment::new("Hello", 2, 1)
///     .with_style(TextStyle::INHERIT.with_fg(Color::Green))
///     .wrapping(true);
/// assert_eq!(title.text(), "Hello");
/// assert!(title.wraps());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFragment {
    text: String,
    x: u16,
    y: u16,
    style: TextStyle,
    wrap: bool,
    wrap_policy: WrapPolicy,
    cutoff: Option<String>,
}

impl TextFragment {
    /// A non-wrapping fragment with every style channel inherited.
    #[must_use]
    pub fn new(text: impl Into<String>, x: u16, y: u16) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            style: TextStyle::INHERIT,
            wrap: false,
            wrap_policy: WrapPolicy::Left,
            cutoff: None,
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    /// Let the terminal wrap overflow instead of truncating it.
    #[must_use]
    pub fn wrapping(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    #[must_use]
    pub fn with_wrap_policy(mut self, policy: WrapPolicy) -> Self {
        self.wrap_policy = policy;
        self
    }

    /// Replace the tail of overflowing text with `marker` (e.g. `"..."`).
    #[must_use]
    pub fn with_cutoff(mut self, marker: impl Into<String>) -> Self {
        self.cutoff = Some(marker.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    #[must_use]
    pub const fn x(&self) -> u16 {
        self.x
    }

    #[inline]
    #[must_use]
    pub const fn y(&self) -> u16 {
        self.y
    }

    #[inline]
    #[must_use]
    pub const fn style(&self) -> TextStyle {
        self.style
    }

    #[inline]
    #[must_use]
    pub const fn wraps(&self) -> bool {
        self.wrap
    }

    #[inline]
    #[must_use]
    pub const fn wrap_policy(&self) -> WrapPolicy {
        self.wrap_policy
    }

    #[must_use]
    pub fn cutoff(&self) -> Option<&str> {
        self.cutoff.as_deref()
    }

    /// Reject the reserved options before the fragment reaches a screen.
    ///
    /// # Errors
    ///
    /// [`ScreenError::UnsupportedWrapPolicy`] for any policy but `Left`,
    /// [`ScreenError::UnsupportedCutoff`] if a cutoff marker is set.
    pub fn validate(&self) -> Result<()> {
        if !self.wrap_policy.is_supported() {
            return Err(ScreenError::UnsupportedWrapPolicy(self.wrap_policy));
        }
        if self.cutoff.is_some() {
            return Err(ScreenError::UnsupportedCutoff);
        }
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use sd_style::{Color, Intensity};

    #[test]
    fn new_fragment_defaults() {
        let f = TextFragment::new("abc", 3, 4);
        assert_eq!(f.text(), "abc");
        assert_eq!((f.x(), f.y()), (3, 4));
        assert_eq!(f.style(), TextStyle::INHERIT);
        assert!(!f.wraps());
        assert_eq!(f.wrap_policy(), WrapPolicy::Left);
        assert_eq!(f.cutoff(), None);
    }

    #[test]
    fn builders_set_fields() {
        let style = TextStyle::new(Color::Red, Color::Default, Intensity::Bright);
        let f = TextFragment::new(String::from("x"), 0, 0)
            .with_style(style)
            .wrapping(true);
        assert_eq!(f.style(), style);
        assert!(f.wraps());
    }

    #[test]
    fn left_policy_validates() {
        assert!(TextFragment::new("ok", 0, 0).validate().is_ok());
    }

    #[test]
    fn reserved_policies_fail_fast() {
        for policy in [WrapPolicy::Center, WrapPolicy::Right, WrapPolicy::Under] {
            let f = TextFragment::new("x", 0, 0).with_wrap_policy(policy);
            assert!(matches!(
                f.validate(),
                Err(ScreenError::UnsupportedWrapPolicy(p)) if p == policy
            ));
        }
    }

    #[test]
    fn cutoff_fails_fast() {
        let f = TextFragment::new("x", 0, 0).with_cutoff("...");
        assert_eq!(f.cutoff(), Some("..."));
        assert!(matches!(f.validate(), Err(ScreenError::UnsupportedCutoff)));
    }

    #[test]
    fn fragment_id_display_and_order() {
        assert_eq!(FragmentId(3).to_string(), "#3");
        assert!(FragmentId(1) < FragmentId(2));
        assert_eq!(FragmentId(7).index(), 7);
    }
}
