//! boardtest-core - Core library for character LCD bring-up
//!
//! This crate provides the HD44780 instruction set spoken through a
//! PCF8574-style I2C port expander in 4-bit mode. It is `no_std`
//! compatible; the only thing it needs from the platform is an
//! [`ExpanderBus`](bus::ExpanderBus) that can write one byte to the
//! expander and wait.
//!
//! # Features
//!
//! - `std` - Implement `std::error::Error` for the core error type
//!
//! # Example
//!
//! ```ignore
//! use boardtest_core::bus::ExpanderBus;
//! use boardtest_core::lcd::{Lcd, LcdConfig};
//!
//! fn hello<B: ExpanderBus>(bus: B) -> boardtest_core::Result<()> {
//!     let mut lcd = Lcd::new(bus, LcdConfig::default());
//!     lcd.begin()?;
//!     lcd.backlight()?;
//!     lcd.write_str("hello")?;
//!     Ok(())
//! }
//! ```

#![no_std]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

#[cfg(feature = "std")]
extern crate std;

pub mod bus;
pub mod error;
pub mod lcd;

pub use error::{Error, Result};
