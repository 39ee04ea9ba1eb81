//! Linux sysfs GPIO implementation
//!
//! This module provides the `SysfsGpio` handle that reads and writes the
//! export, unexport, direction and value attributes under the GPIO class
//! directory.

use crate::error::{LinuxGpioError, Result};

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Where the kernel mounts the GPIO class
const DEFAULT_SYSFS_ROOT: &str = "/sys/class/gpio";

/// Default wait after each sysfs step, long enough for udev to fix up permissions
const DEFAULT_SETTLE_MS: u64 = 100;

/// Pin direction as spelled in the `direction` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Input
    In,
    /// Output
    Out,
}

impl Direction {
    fn as_sysfs(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sysfs())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "in" => Ok(Self::In),
            "out" => Ok(Self::Out),
            other => Err(format!("Invalid direction: {} (expected in or out)", other)),
        }
    }
}

/// Logic level as spelled in the `value` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Logic 0
    Low,
    /// Logic 1
    High,
}

impl Level {
    fn as_sysfs(self) -> &'static str {
        match self {
            Self::Low => "0",
            Self::High => "1",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sysfs())
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Self::High
        } else {
            Self::Low
        }
    }
}

/// Parse a level from the command line
///
/// Accepts `0`/`1`, `low`/`high`, and any other integer (non-zero is high).
pub fn parse_level(s: &str) -> Result<Level> {
    match s.trim().to_ascii_lowercase().as_str() {
        "low" => Ok(Level::Low),
        "high" => Ok(Level::High),
        other => other
            .parse::<i64>()
            .map(|v| Level::from(v != 0))
            .map_err(|_| LinuxGpioError::InvalidParameter(format!("Invalid level: {}", s))),
    }
}

/// Configuration for the sysfs GPIO handle
#[derive(Debug, Clone)]
pub struct SysfsGpioConfig {
    /// GPIO class directory (e.g., "/sys/class/gpio")
    pub root: PathBuf,
    /// Wait inserted by [`SysfsGpio::settle`]
    pub settle: Duration,
}

impl Default for SysfsGpioConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_SYSFS_ROOT),
            settle: Duration::from_millis(DEFAULT_SETTLE_MS),
        }
    }
}

impl SysfsGpioConfig {
    /// Create a configuration rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    /// Set the settle delay in milliseconds
    pub fn with_settle_ms(mut self, ms: u64) -> Self {
        self.settle = Duration::from_millis(ms);
        self
    }
}

/// Handle on the sysfs GPIO class directory
pub struct SysfsGpio {
    root: PathBuf,
    settle: Duration,
}

impl SysfsGpio {
    /// Open the GPIO class directory
    pub fn open(config: &SysfsGpioConfig) -> Result<Self> {
        if !config.root.is_dir() {
            return Err(LinuxGpioError::NoSysfs(config.root.display().to_string()));
        }

        log::debug!("sysfs_gpio: Using {}", config.root.display());

        Ok(Self {
            root: config.root.clone(),
            settle: config.settle,
        })
    }

    /// Root directory this handle operates on
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn pin_dir(&self, pin: u32) -> PathBuf {
        self.root.join(format!("gpio{}", pin))
    }

    /// Whether `gpioN/` currently exists
    pub fn is_exported(&self, pin: u32) -> bool {
        self.pin_dir(pin).is_dir()
    }

    /// Ask the kernel to expose `pin`
    pub fn export(&self, pin: u32) -> Result<()> {
        log::debug!("sysfs_gpio: export {}", pin);
        write_attribute(&self.root.join("export"), &pin.to_string())
            .map_err(|source| LinuxGpioError::ExportFailed { pin, source })
    }

    /// Release `pin` back to the kernel
    pub fn unexport(&self, pin: u32) -> Result<()> {
        log::debug!("sysfs_gpio: unexport {}", pin);
        write_attribute(&self.root.join("unexport"), &pin.to_string())
            .map_err(|source| LinuxGpioError::UnexportFailed { pin, source })
    }

    /// Configure `pin` as input or output
    pub fn set_direction(&self, pin: u32, direction: Direction) -> Result<()> {
        let path = self.pin_dir(pin).join("direction");
        log::debug!("sysfs_gpio: {} <- {}", path.display(), direction);
        write_attribute(&path, direction.as_sysfs()).map_err(|source| {
            LinuxGpioError::AttributeFailed {
                path: path.display().to_string(),
                source,
            }
        })
    }

    /// Read back the configured direction of `pin`
    pub fn direction(&self, pin: u32) -> Result<Direction> {
        let path = self.pin_dir(pin).join("direction");
        let value = read_attribute(&path)?;
        value
            .parse()
            .map_err(|_| LinuxGpioError::UnexpectedValue {
                path: path.display().to_string(),
                value,
            })
    }

    /// Sample the level of `pin`
    pub fn read(&self, pin: u32) -> Result<Level> {
        let path = self.pin_dir(pin).join("value");
        let value = read_attribute(&path)?;
        match value.as_str() {
            "0" => Ok(Level::Low),
            "1" => Ok(Level::High),
            _ => Err(LinuxGpioError::UnexpectedValue {
                path: path.display().to_string(),
                value,
            }),
        }
    }

    /// Drive `pin` to `level` (the pin must be an output)
    pub fn write(&self, pin: u32, level: Level) -> Result<()> {
        let path = self.pin_dir(pin).join("value");
        log::debug!("sysfs_gpio: {} <- {}", path.display(), level);
        write_attribute(&path, level.as_sysfs()).map_err(|source| {
            LinuxGpioError::AttributeFailed {
                path: path.display().to_string(),
                source,
            }
        })
    }

    /// Sleep for the configured settle delay
    pub fn settle(&self) {
        if !self.settle.is_zero() {
            std::thread::sleep(self.settle);
        }
    }
}

/// Write a sysfs attribute in a single write call
///
/// sysfs attributes must already exist; opening never creates them.
fn write_attribute(path: &Path, value: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().write(true).open(path)?;
    file.write_all(value.as_bytes())
}

/// Read a sysfs attribute and strip the trailing newline
fn read_attribute(path: &Path) -> Result<String> {
    let content =
        std::fs::read_to_string(path).map_err(|source| LinuxGpioError::AttributeFailed {
            path: path.display().to_string(),
            source,
        })?;
    Ok(content.trim_end().to_string())
}
