//! Fragment projection — where a fragment actually lands on a screen.
//!
//! A projection is derived from a fragment plus the screen's geometry and
//! holds two parallel run lists: `visible` paints the fragment, `blank`
//! covers exactly the same cells with spaces. They are always rebuilt
//! together, so `blank[i]` matches `visible[i]` in position and length.
//!
//! # Placement rules
//!
//! Wrapping fragments clamp their origin to `(min(x, w-1), min(y, h-1))` and
//! emit the whole text; the terminal's own line wrap handles overflow.
//!
//! Non-wrapping fragments are placed only when `x + 1 < w` and `y + 1 < h`.
//! The comparison is strict: the last column and last row never start a
//! non-wrapping fragment. A placed fragment keeps its first `w - x`
//! characters and drops the rest. A fragment that fails the check projects
//! to nothing.

use sd_style::TextStyle;

use crate::fragment::TextFragment;

// ─── RenderRun ───────────────────────────────────────────────────────────────

/// A string ready to be written verbatim at an absolute screen cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRun {
    pub x: u16,
    pub y: u16,
    pub text: String,
    pub style: TextStyle,
}

impl RenderRun {
    /// Number of cells the run covers (one per `char`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

// ─── Projection ──────────────────────────────────────────────────────────────

/// The cached render and erase runs for one fragment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Projection {
    visible: Vec<RenderRun>,
    blank: Vec<RenderRun>,
    /// Geometry generation of the screen when this was derived.
    pub(crate) generation: u64,
}

impl Projection {
    /// Project `fragment` onto a `width × height` screen.
    ///
    /// `blank_style` is the screen's default style at the time of the call;
    /// the blank runs keep it until the next projection.
    #[must_use]
    pub fn new(fragment: &TextFragment, width: u16, height: u16, blank_style: TextStyle) -> Self {
        let mut projection = Self::default();
        if let Some((x, y, text)) = place(fragment, width, height) {
            let blank = " ".repeat(text.chars().count());
            projection.blank.push(RenderRun {
                x,
                y,
                text: blank,
                style: blank_style,
            });
            projection.visible.push(RenderRun {
                x,
                y,
                text,
                style: fragment.style(),
            });
        }
        projection
    }

    /// Runs that paint the fragment.
    #[must_use]
    pub fn visible(&self) -> &[RenderRun] {
        &self.visible
    }

    /// Runs that blank the cells the fragment paints.
    #[must_use]
    pub fn blank(&self) -> &[RenderRun] {
        &self.blank
    }

    /// Whether the fragment lands anywhere on screen.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        !self.visible.is_empty()
    }
}

/// Origin and text of a fragment on a screen, or `None` if it is dropped.
fn place(fragment: &TextFragment, width: u16, height: u16) -> Option<(u16, u16, String)> {
    let (x, y) = (fragment.x(), fragment.y());

    if fragment.wraps() {
        let x = x.min(width.saturating_sub(1));
        let y = y.min(height.saturating_sub(1));
        return Some((x, y, fragment.text().to_owned()));
    }

    if u32::from(x) + 1 >= u32::from(width) || u32::from(y) + 1 >= u32::from(height) {
        return None;
    }

    let allowed = usize::from(width - x);
    let text = fragment.text().chars().take(allowed).collect();
    Some((x, y, text))
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sd_style::{Color, Intensity};

    fn project(f: &TextFragment, w: u16, h: u16) -> Projection {
        Projection::new(f, w, h, TextStyle::BASELINE)
    }

    fn visible_text(p: &Projection) -> Option<(u16, u16, &str)> {
        p.visible().first().map(|r| (r.x, r.y, r.text.as_str()))
    }

    // -- Non-wrapping ---------------------------------------------------------

    #[test]
    fn truncates_to_width_minus_x() {
        let p = project(&TextFragment::new("HELLO", 18, 0), 20, 5);
        assert_eq!(visible_text(&p), Some((18, 0, "HE")));
    }

    #[test]
    fn last_column_is_never_an_origin() {
        let p = project(&TextFragment::new("X", 9, 0), 10, 5);
        assert!(!p.is_visible());
        assert!(p.blank().is_empty());
    }

    #[test]
    fn last_row_is_never_an_origin() {
        let p = project(&TextFragment::new("X", 0, 4), 10, 5);
        assert!(!p.is_visible());
    }

    #[test]
    fn far_out_of_bounds_is_dropped() {
        let p = project(&TextFragment::new("X", u16::MAX, u16::MAX), 10, 5);
        assert!(!p.is_visible());
    }

    #[test]
    fn second_to_last_cell_is_placed() {
        let p = project(&TextFragment::new("XYZ", 8, 3), 10, 5);
        assert_eq!(visible_text(&p), Some((8, 3, "XY")));
    }

    #[test]
    fn fitting_text_is_untouched() {
        let p = project(&TextFragment::new("ABC", 2, 1), 10, 5);
        assert_eq!(visible_text(&p), Some((2, 1, "ABC")));
    }

    #[test]
    fn exact_fit_is_untouched() {
        // allowed = 10 - 5 = 5, text is exactly 5.
        let p = project(&TextFragment::new("ABCDE", 5, 0), 10, 5);
        assert_eq!(visible_text(&p), Some((5, 0, "ABCDE")));
    }

    #[test]
    fn truncation_counts_chars_not_bytes() {
        let p = project(&TextFragment::new("héllo", 7, 0), 10, 5);
        assert_eq!(visible_text(&p), Some((7, 0, "hél")));
        assert_eq!(p.blank()[0].text, "   ");
    }

    #[test]
    fn visible_length_law() {
        let content = "0123456789ABCDEF";
        for width in 2..20u16 {
            for x in 0..width - 1 {
                let p = project(&TextFragment::new(content, x, 0), width, 3);
                let run = &p.visible()[0];
                let expected = content.len().min(usize::from(width - x));
                assert_eq!(run.len(), expected, "width {width}, x {x}");
                assert!(content.starts_with(&run.text));
            }
        }
    }

    // -- Wrapping -------------------------------------------------------------

    #[test]
    fn wrapping_clamps_origin_and_keeps_text() {
        let p = project(&TextFragment::new("ABCDE", 8, 1).wrapping(true), 10, 5);
        assert_eq!(visible_text(&p), Some((8, 1, "ABCDE")));

        let p = project(&TextFragment::new("ABCDE", 12, 1).wrapping(true), 10, 5);
        assert_eq!(visible_text(&p), Some((9, 1, "ABCDE")));
    }

    #[test]
    fn wrapping_clamps_both_axes() {
        let p = project(&TextFragment::new("Z", 500, 500).wrapping(true), 10, 5);
        assert_eq!(visible_text(&p), Some((9, 4, "Z")));
    }

    #[test]
    fn wrapping_origin_ignores_content_length() {
        for content in ["", "a", "a much longer line than the screen is wide"] {
            let p = project(&TextFragment::new(content, 30, 2).wrapping(true), 10, 5);
            assert_eq!((p.visible()[0].x, p.visible()[0].y), (9, 2));
        }
    }

    // -- Blank runs -----------------------------------------------------------

    #[test]
    fn blank_mirrors_visible() {
        let style = TextStyle::new(Color::Red, Color::Blue, Intensity::Bright);
        let f = TextFragment::new("HELLO", 18, 2).with_style(style);
        let blank_style = TextStyle::new(Color::White, Color::Green, Intensity::Normal);
        let p = Projection::new(&f, 20, 5, blank_style);

        assert_eq!(p.visible().len(), p.blank().len());
        for (v, b) in p.visible().iter().zip(p.blank()) {
            assert_eq!((v.x, v.y), (b.x, b.y));
            assert_eq!(v.len(), b.len());
            assert!(b.text.chars().all(|c| c == ' '));
        }
        assert_eq!(p.visible()[0].style, style);
        assert_eq!(p.blank()[0].style, blank_style);
    }

    #[test]
    fn projection_is_deterministic() {
        let f = TextFragment::new("repeat", 4, 2);
        assert_eq!(project(&f, 8, 4), project(&f, 8, 4));
    }
}
