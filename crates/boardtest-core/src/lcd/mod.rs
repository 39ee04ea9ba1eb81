//! HD44780 character LCD support
//!
//! This module contains the instruction set ([`commands`]), the status
//! register flag types ([`flags`]), the 4-bit nibble protocol through the
//! port expander ([`protocol`]) and the stateful [`Lcd`] driver built on
//! top of them.

pub mod commands;
mod driver;
pub mod flags;
pub mod protocol;

pub use driver::{Lcd, LcdConfig, DEFAULT_ADDRESS, ROW_OFFSETS};
pub use flags::{Backlight, DisplayControl, EntryMode, FunctionSet, Pins, ShiftFlags};
pub use protocol::Mode;
