//! Errors raised when style values arrive from outside the type system
//! (configuration strings, raw SGR codes).

use thiserror::Error;

/// A color or intensity that is not part of the enumerated set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StyleError {
    #[error("unknown color name: {0:?}")]
    UnknownColor(String),
    #[error("unknown color code: {0}")]
    UnknownColorCode(i16),
    #[error("unknown intensity name: {0:?}")]
    UnknownIntensity(String),
    #[error("unknown intensity code: {0}")]
    UnknownIntensityCode(i16),
}
