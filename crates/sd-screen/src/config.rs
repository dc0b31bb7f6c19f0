//! Screen configuration and `key=value` option parsing.
//!
//! A [`ScreenConfig`] says how big a screen should be, what its default
//! style is, and whether it is a top-level screen or a sub-screen nested at
//! an offset inside the terminal. Options can also be read from strings:
//!
//! | Key         | Value                       |
//! |-------------|-----------------------------|
//! | `width`     | columns (`u16`)             |
//! | `height`    | rows (`u16`)                |
//! | `fg`        | color name                  |
//! | `bg`        | color name                  |
//! | `intensity` | `bright` / `dim` / `normal` |
//! | `terminal`  | `true` / `false`            |
//! | `offset`    | `X,Y` (makes a sub-screen)  |

use std::str::FromStr;

use sd_style::{Color, Intensity, TextStyle};

use crate::error::{Result, ScreenError};

/// Minimum width when the font metric is unavailable or the host is not a
/// real terminal (an embedded or IDE console).
pub const FALLBACK_MIN_WIDTH: u16 = 30;

/// Minimum height for every screen.
pub const MIN_HEIGHT: u16 = 1;

/// Pixel budget the font-derived width floor must cover.
pub const MIN_WIDTH_PIXELS: u16 = 120;

/// Minimum screen width in cells for a given font cell width.
///
/// `ceil(120 / px)` inside a real terminal with a known metric, the fixed
/// 30-cell floor otherwise.
#[must_use]
pub fn min_width(in_terminal: bool, font_cell_width: Option<u16>) -> u16 {
    match font_cell_width {
        Some(px) if in_terminal && px >= 1 => MIN_WIDTH_PIXELS.div_ceil(px),
        _ => FALLBACK_MIN_WIDTH,
    }
}

// ─── ScreenConfig ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenConfig {
    /// Columns, or `None` to use the live terminal width.
    pub width: Option<u16>,
    /// Rows, or `None` to use the live terminal height.
    pub height: Option<u16>,
    /// Initial default style. Placeholder channels collapse to the baseline.
    pub default_style: TextStyle,
    /// Running in a real terminal rather than an embedded console.
    pub in_terminal: bool,
    /// Sub-screen offset inside the terminal.
    pub offset: Option<(u16, u16)>,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            default_style: TextStyle::INHERIT,
            in_terminal: true,
            offset: None,
        }
    }
}

impl ScreenConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_size(mut self, width: u16, height: u16) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    #[must_use]
    pub const fn with_default_style(mut self, style: TextStyle) -> Self {
        self.default_style = style;
        self
    }

    #[must_use]
    pub const fn in_terminal(mut self, in_terminal: bool) -> Self {
        self.in_terminal = in_terminal;
        self
    }

    /// Nest the screen at `(x, y)` inside the terminal.
    #[must_use]
    pub const fn sub_screen(mut self, x: u16, y: u16) -> Self {
        self.offset = Some((x, y));
        self
    }

    /// Apply one option. Returns `Ok(false)` for keys this config doesn't
    /// own, so callers can layer their own options on top.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::Config`] or [`ScreenError::Style`] for a
    /// malformed value.
    pub fn set(&mut self, key: &str, value: &str) -> Result<bool> {
        match key {
            "width" => self.width = Some(parse_value(key, value)?),
            "height" => self.height = Some(parse_value(key, value)?),
            "fg" => self.default_style.fg = value.parse::<Color>()?,
            "bg" => self.default_style.bg = value.parse::<Color>()?,
            "intensity" => self.default_style.intensity = value.parse::<Intensity>()?,
            "terminal" => self.in_terminal = parse_value(key, value)?,
            "offset" => {
                let (x, y) = value
                    .split_once(',')
                    .ok_or_else(|| ScreenError::Config(format!("offset expects X,Y, got {value:?}")))?;
                self.offset = Some((parse_value(key, x)?, parse_value(key, y)?));
            }
            _ => return Ok(false),
        }
        Ok(true)
    }
}

// ─── Parsing ─────────────────────────────────────────────────────────────────

/// Split a `key=value` argument.
///
/// # Errors
///
/// Returns [`ScreenError::Config`] if there is no `=` or the key is empty.
pub fn parse_option(arg: &str) -> Result<(&str, &str)> {
    match arg.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value.trim())),
        _ => Err(ScreenError::Config(format!("expected key=value, got {arg:?}"))),
    }
}

/// Parse an option value, naming the key in the error.
///
/// # Errors
///
/// Returns [`ScreenError::Config`] if `value` doesn't parse as `T`.
pub fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| ScreenError::Config(format!("invalid value for {key}: {value:?}")))
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_width_from_font_metric() {
        assert_eq!(min_width(true, Some(8)), 15);
        assert_eq!(min_width(true, Some(7)), 18); // 120 / 7 = 17.14
        assert_eq!(min_width(true, Some(120)), 1);
    }

    #[test]
    fn min_width_falls_back() {
        assert_eq!(min_width(true, None), FALLBACK_MIN_WIDTH);
        assert_eq!(min_width(true, Some(0)), FALLBACK_MIN_WIDTH);
        assert_eq!(min_width(false, Some(8)), FALLBACK_MIN_WIDTH);
    }

    #[test]
    fn default_config() {
        let c = ScreenConfig::new();
        assert_eq!(c.width, None);
        assert_eq!(c.height, None);
        assert!(c.in_terminal);
        assert_eq!(c.offset, None);
        assert_eq!(c.default_style, TextStyle::INHERIT);
    }

    #[test]
    fn builders() {
        let c = ScreenConfig::new()
            .with_size(40, 12)
            .in_terminal(false)
            .sub_screen(3, 4);
        assert_eq!((c.width, c.height), (Some(40), Some(12)));
        assert!(!c.in_terminal);
        assert_eq!(c.offset, Some((3, 4)));
    }

    #[test]
    fn parse_option_splits() {
        assert_eq!(parse_option("width=80").unwrap(), ("width", "80"));
        assert_eq!(parse_option(" fg = red ").unwrap(), ("fg", "red"));
        assert!(parse_option("width").is_err());
        assert!(parse_option("=5").is_err());
    }

    #[test]
    fn set_known_keys() {
        let mut c = ScreenConfig::new();
        assert!(c.set("width", "100").unwrap());
        assert!(c.set("height", "30").unwrap());
        assert!(c.set("fg", "light green").unwrap());
        assert!(c.set("bg", "blue").unwrap());
        assert!(c.set("intensity", "dim").unwrap());
        assert!(c.set("terminal", "false").unwrap());
        assert!(c.set("offset", "2,5").unwrap());
        assert_eq!((c.width, c.height), (Some(100), Some(30)));
        assert_eq!(
            c.default_style,
            TextStyle::new(Color::LightGreen, Color::Blue, Intensity::Dim)
        );
        assert!(!c.in_terminal);
        assert_eq!(c.offset, Some((2, 5)));
    }

    #[test]
    fn set_unknown_key_is_not_an_error() {
        let mut c = ScreenConfig::new();
        assert!(!c.set("interval", "50").unwrap());
    }

    #[test]
    fn set_malformed_values() {
        let mut c = ScreenConfig::new();
        assert!(matches!(c.set("width", "wide"), Err(ScreenError::Config(_))));
        assert!(matches!(c.set("width", "-1"), Err(ScreenError::Config(_))));
        assert!(matches!(c.set("fg", "teal"), Err(ScreenError::Style(_))));
        assert!(matches!(c.set("offset", "3"), Err(ScreenError::Config(_))));
    }
}
