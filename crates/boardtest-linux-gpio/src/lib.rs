//! boardtest-linux-gpio - Linux sysfs GPIO support
//!
//! This crate exercises GPIO pins through the legacy sysfs interface at
//! `/sys/class/gpio`.
//!
//! # Overview
//!
//! A pin has to be exported before it can be used: writing its number to
//! `export` makes the kernel create `gpioN/` with `direction` and `value`
//! attributes. Writing the number to `unexport` removes it again. The
//! character device interface replaces sysfs on new kernels, but sysfs is
//! still what most vendor board-support kernels ship and what bring-up
//! scripts expect.
//!
//! # Example
//!
//! ```no_run
//! use boardtest_linux_gpio::{Direction, SysfsGpio, SysfsGpioConfig};
//!
//! let gpio = SysfsGpio::open(&SysfsGpioConfig::default())?;
//! gpio.export(17)?;
//! gpio.settle();
//! gpio.set_direction(17, Direction::In)?;
//! println!("GPIO17 = {}", gpio.read(17)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # System Requirements
//!
//! - Linux kernel with `CONFIG_GPIO_SYSFS`
//! - Write access to `/sys/class/gpio` (root, or the `gpio` group via udev rules)
//!
//! Freshly exported attributes are created root-owned and only fixed up
//! by udev a moment later, which is why the test sequence waits between
//! steps.

pub mod device;
pub mod error;

// Re-exports
pub use device::{parse_level, Direction, Level, SysfsGpio, SysfsGpioConfig};
pub use error::{LinuxGpioError, Result};
