//! Expander bus abstraction
//!
//! This module defines the trait every LCD backend must implement to
//! drive the display.

mod traits;

pub use traits::*;
