//! Colors and intensity — the enumerated SGR channels.
//!
//! Both enums carry a `Default` variant that is *not* a color: it is a
//! placeholder that the screen resolves against its current default style
//! at the moment something is written. See [`crate::style::resolve`].
//!
//! # Code tables
//!
//! | Color          | SGR offset | Legacy hex |
//! |----------------|-----------:|:----------:|
//! | `Black`        | 0          | `0`        |
//! | `Red`          | 1          | `4`        |
//! | `Green`        | 2          | `2`        |
//! | `Yellow`       | 3          | `6`        |
//! | `Blue`         | 4          | `1`        |
//! | `Magenta`      | 5          | `5`        |
//! | `Cyan`         | 6          | `3`        |
//! | `White`        | 7          | `7`        |
//! | `Reset`        | 9          | —          |
//! | `LightBlack`   | 60         | `8`        |
//! | `LightRed`     | 61         | `C`        |
//! | `LightGreen`   | 62         | `A`        |
//! | `LightYellow`  | 63         | `E`        |
//! | `LightBlue`    | 64         | `9`        |
//! | `LightMagenta` | 65         | `D`        |
//! | `LightCyan`    | 66         | `B`        |
//! | `LightWhite`   | 67         | `F`        |
//!
//! The SGR offset is added to 30 (foreground) or 40 (background). The legacy
//! hex digit is the console color-table index used by baseline color
//! commands, whose palette order differs from ANSI (blue and red swap).

use std::fmt;
use std::str::FromStr;

use crate::error::StyleError;

// ─── Color ───────────────────────────────────────────────────────────────────

/// One of the sixteen terminal palette colors, the terminal's own reset
/// color, or the late-bound `Default` placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    /// The terminal's baseline color (SGR 39 / 49).
    Reset,
    /// Inherit from the screen's default style when written.
    #[default]
    Default,
    LightBlack,
    LightRed,
    LightGreen,
    LightYellow,
    LightBlue,
    LightMagenta,
    LightCyan,
    LightWhite,
}

impl Color {
    /// Every variant, in declaration order.
    pub const ALL: [Self; 18] = [
        Self::Black,
        Self::Red,
        Self::Green,
        Self::Yellow,
        Self::Blue,
        Self::Magenta,
        Self::Cyan,
        Self::White,
        Self::Reset,
        Self::Default,
        Self::LightBlack,
        Self::LightRed,
        Self::LightGreen,
        Self::LightYellow,
        Self::LightBlue,
        Self::LightMagenta,
        Self::LightCyan,
        Self::LightWhite,
    ];

    /// SGR offset for this color, or `None` for the unresolved placeholder.
    #[must_use]
    pub const fn sgr_offset(self) -> Option<u8> {
        Some(match self {
            Self::Black => 0,
            Self::Red => 1,
            Self::Green => 2,
            Self::Yellow => 3,
            Self::Blue => 4,
            Self::Magenta => 5,
            Self::Cyan => 6,
            Self::White => 7,
            Self::Reset => 9,
            Self::Default => return None,
            Self::LightBlack => 60,
            Self::LightRed => 61,
            Self::LightGreen => 62,
            Self::LightYellow => 63,
            Self::LightBlue => 64,
            Self::LightMagenta => 65,
            Self::LightCyan => 66,
            Self::LightWhite => 67,
        })
    }

    /// Legacy console color-table digit, or `None` for `Reset` / `Default`.
    #[must_use]
    pub const fn legacy_hex(self) -> Option<char> {
        Some(match self {
            Self::Black => '0',
            Self::Red => '4',
            Self::Green => '2',
            Self::Yellow => '6',
            Self::Blue => '1',
            Self::Magenta => '5',
            Self::Cyan => '3',
            Self::White => '7',
            Self::LightBlack => '8',
            Self::LightRed => 'C',
            Self::LightGreen => 'A',
            Self::LightYellow => 'E',
            Self::LightBlue => '9',
            Self::LightMagenta => 'D',
            Self::LightCyan => 'B',
            Self::LightWhite => 'F',
            Self::Reset | Self::Default => return None,
        })
    }

    /// Whether this is the late-bound placeholder.
    #[inline]
    #[must_use]
    pub const fn is_default(self) -> bool {
        matches!(self, Self::Default)
    }

    /// Lowercase name, as accepted by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
            Self::White => "white",
            Self::Reset => "reset",
            Self::Default => "default",
            Self::LightBlack => "lightblack",
            Self::LightRed => "lightred",
            Self::LightGreen => "lightgreen",
            Self::LightYellow => "lightyellow",
            Self::LightBlue => "lightblue",
            Self::LightMagenta => "lightmagenta",
            Self::LightCyan => "lightcyan",
            Self::LightWhite => "lightwhite",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = StyleError;

    /// Parse a color name. Case-insensitive; `_`, `-` and spaces are ignored,
    /// so `"Light Red"`, `"light_red"` and `"LIGHTRED"` are all accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Self::ALL
            .into_iter()
            .find(|c| c.name() == key)
            .ok_or_else(|| StyleError::UnknownColor(s.to_owned()))
    }
}

impl TryFrom<i16> for Color {
    type Error = StyleError;

    /// Convert an SGR offset back to a color. `-1` is the placeholder.
    fn try_from(code: i16) -> Result<Self, Self::Error> {
        if code == -1 {
            return Ok(Self::Default);
        }
        Self::ALL
            .into_iter()
            .find(|c| c.sgr_offset().map(i16::from) == Some(code))
            .ok_or(StyleError::UnknownColorCode(code))
    }
}

// ─── Intensity ───────────────────────────────────────────────────────────────

/// Text intensity (SGR 1 / 2 / 22) or the late-bound `Default` placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Intensity {
    Bright,
    Dim,
    Normal,
    #[default]
    Default,
}

impl Intensity {
    pub const ALL: [Self; 4] = [Self::Bright, Self::Dim, Self::Normal, Self::Default];

    /// Raw SGR code, or `None` for the unresolved placeholder.
    #[must_use]
    pub const fn sgr_code(self) -> Option<u8> {
        match self {
            Self::Bright => Some(1),
            Self::Dim => Some(2),
            Self::Normal => Some(22),
            Self::Default => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_default(self) -> bool {
        matches!(self, Self::Default)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bright => "bright",
            Self::Dim => "dim",
            Self::Normal => "normal",
            Self::Default => "default",
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Intensity {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|i| i.name() == key)
            .ok_or_else(|| StyleError::UnknownIntensity(s.to_owned()))
    }
}

impl TryFrom<i16> for Intensity {
    type Error = StyleError;

    fn try_from(code: i16) -> Result<Self, Self::Error> {
        match code {
            -1 => Ok(Self::Default),
            1 => Ok(Self::Bright),
            2 => Ok(Self::Dim),
            22 => Ok(Self::Normal),
            other => Err(StyleError::UnknownIntensityCode(other)),
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // -- SGR offsets ----------------------------------------------------------

    #[test]
    fn base_palette_offsets() {
        assert_eq!(Color::Black.sgr_offset(), Some(0));
        assert_eq!(Color::Red.sgr_offset(), Some(1));
        assert_eq!(Color::White.sgr_offset(), Some(7));
    }

    #[test]
    fn reset_offset_is_nine() {
        assert_eq!(Color::Reset.sgr_offset(), Some(9));
    }

    #[test]
    fn light_palette_offsets() {
        assert_eq!(Color::LightBlack.sgr_offset(), Some(60));
        assert_eq!(Color::LightWhite.sgr_offset(), Some(67));
    }

    #[test]
    fn default_has_no_offset() {
        assert_eq!(Color::Default.sgr_offset(), None);
    }

    // -- Legacy table ---------------------------------------------------------

    #[test]
    fn legacy_table_matches_console_palette() {
        let base: String = [
            Color::Black,
            Color::Red,
            Color::Green,
            Color::Yellow,
            Color::Blue,
            Color::Magenta,
            Color::Cyan,
            Color::White,
        ]
        .iter()
        .filter_map(|c| c.legacy_hex())
        .collect();
        assert_eq!(base, "04261537");

        let light: String = [
            Color::LightBlack,
            Color::LightRed,
            Color::LightGreen,
            Color::LightYellow,
            Color::LightBlue,
            Color::LightMagenta,
            Color::LightCyan,
            Color::LightWhite,
        ]
        .iter()
        .filter_map(|c| c.legacy_hex())
        .collect();
        assert_eq!(light, "8CAE9DBF");
    }

    #[test]
    fn reset_and_default_have_no_legacy_digit() {
        assert_eq!(Color::Reset.legacy_hex(), None);
        assert_eq!(Color::Default.legacy_hex(), None);
    }

    // -- Parsing --------------------------------------------------------------

    #[test]
    fn parse_names_loosely() {
        assert_eq!("red".parse::<Color>().unwrap(), Color::Red);
        assert_eq!("Light Red".parse::<Color>().unwrap(), Color::LightRed);
        assert_eq!("light_cyan".parse::<Color>().unwrap(), Color::LightCyan);
        assert_eq!("DEFAULT".parse::<Color>().unwrap(), Color::Default);
    }

    #[test]
    fn parse_unknown_name_fails() {
        let err = "purple".parse::<Color>().unwrap_err();
        assert_eq!(err, StyleError::UnknownColor("purple".to_owned()));
    }

    #[test]
    fn every_color_round_trips_through_its_name() {
        for c in Color::ALL {
            assert_eq!(c.to_string().parse::<Color>().unwrap(), c);
        }
    }

    #[test]
    fn color_from_code() {
        assert_eq!(Color::try_from(-1).unwrap(), Color::Default);
        assert_eq!(Color::try_from(3).unwrap(), Color::Yellow);
        assert_eq!(Color::try_from(9).unwrap(), Color::Reset);
        assert_eq!(Color::try_from(64).unwrap(), Color::LightBlue);
    }

    #[test]
    fn color_from_unknown_code_fails() {
        assert_eq!(Color::try_from(8), Err(StyleError::UnknownColorCode(8)));
        assert_eq!(Color::try_from(68), Err(StyleError::UnknownColorCode(68)));
    }

    // -- Intensity ------------------------------------------------------------

    #[test]
    fn intensity_codes() {
        assert_eq!(Intensity::Bright.sgr_code(), Some(1));
        assert_eq!(Intensity::Dim.sgr_code(), Some(2));
        assert_eq!(Intensity::Normal.sgr_code(), Some(22));
        assert_eq!(Intensity::Default.sgr_code(), None);
    }

    #[test]
    fn intensity_parsing() {
        assert_eq!(" Dim ".parse::<Intensity>().unwrap(), Intensity::Dim);
        assert_eq!(Intensity::try_from(22).unwrap(), Intensity::Normal);
        assert_eq!(
            "bold".parse::<Intensity>(),
            Err(StyleError::UnknownIntensity("bold".to_owned()))
        );
        assert_eq!(
            Intensity::try_from(3),
            Err(StyleError::UnknownIntensityCode(3))
        );
    }

    #[test]
    fn defaults_are_placeholders() {
        assert!(Color::default().is_default());
        assert!(Intensity::default().is_default());
    }
}
