//! CLI command implementations
//!
//! Each bring-up test is a fixed sequence of calls against one device:
//!
//! - `gpio` re-exports a pin through sysfs and samples it
//! - `lcd` initializes a character LCD and writes text to it

#[cfg(feature = "linux-gpio")]
pub mod gpio;
pub mod lcd;
mod list;

pub use list::list_devices;
