//! Error types for boardtest-core
//!
//! This module provides a no_std compatible error type that can be used
//! throughout the crate.

use core::fmt;

/// Core error type - no_std compatible, Copy for efficiency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    // Bus errors
    /// Writing a byte to the expander failed
    BusWriteFailed,
    /// The expander accepted fewer bytes than were sent
    ShortWrite,

    // Display errors
    /// Cursor position lies outside the configured geometry
    InvalidPosition {
        /// Requested column
        col: u8,
        /// Requested row
        row: u8,
    },
    /// Geometry is not one the controller can address
    InvalidGeometry,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BusWriteFailed => write!(f, "expander write failed"),
            Self::ShortWrite => write!(f, "short write to expander"),
            Self::InvalidPosition { col, row } => {
                write!(f, "cursor position ({}, {}) is off screen", col, row)
            }
            Self::InvalidGeometry => write!(f, "unsupported display geometry"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type alias using the core Error type
pub type Result<T> = core::result::Result<T, Error>;
