//! boardtest-linux-i2c - Linux i2c-dev port expander support
//!
//! This crate drives a PCF8574-style I2C port expander through the Linux
//! `/dev/i2c-N` character device interface.
//!
//! # Overview
//!
//! The i2c-dev driver exposes each I2C adapter as a character device. After
//! binding the file descriptor to a slave address with the `I2C_SLAVE`
//! ioctl, every `write(2)` becomes one I2C write transaction to that slave.
//! A PCF8574 latches the last byte of each transaction onto its output
//! lines, which is all an HD44780 backpack needs.
//!
//! # Example
//!
//! ```no_run
//! use boardtest_core::lcd::{Lcd, LcdConfig};
//! use boardtest_linux_i2c::{LinuxI2c, LinuxI2cConfig};
//!
//! let config = LinuxI2cConfig::new("/dev/i2c-1").with_address(0x27);
//! let bus = LinuxI2c::open(&config)?;
//!
//! let mut lcd = Lcd::new(bus, LcdConfig::default());
//! lcd.begin()?;
//! lcd.write_str("hello")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Usage with boardtest CLI
//!
//! ```bash
//! # Default: /dev/i2c-1, address 0x27
//! boardtest lcd
//!
//! # Another bus and a backpack with A0 bridged
//! boardtest lcd -p linux_i2c:bus=0,addr=0x26
//! ```
//!
//! # System Requirements
//!
//! - Linux kernel with i2c-dev support (`CONFIG_I2C_CHARDEV`, or `modprobe i2c-dev`)
//! - Read/write access to `/dev/i2c-N` (usually the `i2c` group)

pub mod device;
pub mod error;

// Re-exports
pub use device::{parse_address, parse_options, LinuxI2c, LinuxI2cConfig};
pub use error::{LinuxI2cError, Result};

/// Open a Linux I2C expander from programmer-style options
///
/// This is a convenience function for use in the CLI device dispatch.
///
/// # Example Options
///
/// - `dev=/dev/i2c-1` - device path
/// - `bus=1` - bus number (alternative to dev)
/// - `addr=0x27` - 7-bit slave address
pub fn open_linux_i2c(
    options: &[(&str, &str)],
) -> std::result::Result<LinuxI2c, Box<dyn std::error::Error>> {
    let config = parse_options(options)?;
    let bus = LinuxI2c::open(&config)?;
    Ok(bus)
}
