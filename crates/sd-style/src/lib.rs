//! # sd-style — style model for screen-display
//!
//! Value types for what a fragment looks like:
//!
//! - **[`color`]** — `Color` (16 palette colors, `Reset`, and the `Default`
//!   placeholder) and `Intensity`, with SGR and legacy console code tables
//! - **[`style`]** — `TextStyle` and the `resolve` step that binds
//!   placeholders to a screen's current default at write time
//! - **[`error`]** — `StyleError` for values parsed from outside
//!
//! Nothing here writes to a terminal. The screen crate turns resolved
//! styles into escape sequences.

pub mod color;
pub mod error;
pub mod style;

pub use color::{Color, Intensity};
pub use error::StyleError;
pub use style::{Channel, TextStyle, resolve};
