//! # sd-screen — a terminal as an addressable 2D canvas
//!
//! Text fragments are placed at cell coordinates, clipped to the screen,
//! and painted or blanked through cached render runs:
//!
//! - **[`fragment`]** — `TextFragment`, what to draw and where
//! - **[`projection`]** — where a fragment lands once clipped (`RenderRun`)
//! - **[`screen`]** — `Screen`, geometry, default style, fragment tracking
//! - **[`render`]** — full redraw, erase, and per-fragment replay
//! - **[`blink`]** — `Blinker`, the erase/display animation loop
//! - **[`config`]** — `ScreenConfig` and `key=value` option parsing
//! - **[`error`]** — `ScreenError`
//!
//! ```no_run
//! use sd_screen::{Screen, ScreenConfig, TextFragment};
//! use sd_term::TtyHost;
//!
//! # fn main() -> sd_screen::Result<()> {
//! let mut screen = Screen::new(std::io::stdout(), TtyHost::new(), ScreenConfig::new())?;
//! screen.add_fragment(TextFragment::new("hello", 2, 1))?;
//! screen.render()?;
//! screen.dispose()?;
//! # Ok(())
//! # }
//! ```

pub mod blink;
pub mod config;
pub mod error;
pub mod fragment;
pub mod projection;
pub mod render;
pub mod screen;

pub use blink::Blinker;
pub use config::ScreenConfig;
pub use error::{Result, ScreenError};
pub use fragment::{FragmentId, TextFragment, WrapPolicy};
pub use projection::{Projection, RenderRun};
pub use screen::Screen;
