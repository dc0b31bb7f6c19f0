//! Screen errors.
//!
//! Geometry never produces an error: sizes are clamped and out-of-bounds
//! fragments are dropped. What does fail is I/O on the output stream, values
//! that fall outside the supported set, and malformed configuration.

use std::io;

use sd_style::StyleError;
use thiserror::Error;

use crate::fragment::{FragmentId, WrapPolicy};

#[derive(Error, Debug)]
pub enum ScreenError {
    #[error("failed to write to terminal: {0}")]
    Io(#[from] io::Error),
    #[error("wrap policy {0:?} is not supported yet")]
    UnsupportedWrapPolicy(WrapPolicy),
    #[error("cutoff strings are not supported yet")]
    UnsupportedCutoff,
    #[error("no fragment with id {0}")]
    UnknownFragment(FragmentId),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Style(#[from] StyleError),
}

pub type Result<T> = std::result::Result<T, ScreenError>;
