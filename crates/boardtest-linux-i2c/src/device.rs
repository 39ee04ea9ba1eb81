//! Linux I2C device implementation
//!
//! This module provides the `LinuxI2c` struct that implements the
//! `ExpanderBus` trait using Linux's i2c-dev interface.

use crate::error::{LinuxI2cError, Result};

use boardtest_core::bus::ExpanderBus;
use boardtest_core::error::{Error as CoreError, Result as CoreResult};
use boardtest_core::lcd::DEFAULT_ADDRESS;

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::os::unix::io::AsRawFd;
use std::time::Duration;

/// Default I2C adapter on most single-board computers
const DEFAULT_DEVICE: &str = "/dev/i2c-1";

/// Linux i2c-dev ioctl constants
mod ioctl {
    use nix::ioctl_write_int_bad;

    /// Use this slave address (from linux/i2c-dev.h)
    const I2C_SLAVE: u16 = 0x0703;

    // I2C_SLAVE takes the address by value, not through a pointer
    ioctl_write_int_bad!(i2c_set_slave, I2C_SLAVE);
}

/// Configuration for opening a Linux I2C expander
#[derive(Debug, Clone)]
pub struct LinuxI2cConfig {
    /// Device path (e.g., "/dev/i2c-1")
    pub device: String,
    /// 7-bit slave address of the expander
    pub address: u8,
}

impl Default for LinuxI2cConfig {
    fn default() -> Self {
        Self {
            device: DEFAULT_DEVICE.to_string(),
            address: DEFAULT_ADDRESS,
        }
    }
}

impl LinuxI2cConfig {
    /// Create a new configuration with the given device path
    pub fn new(device: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            ..Default::default()
        }
    }

    /// Create a configuration for adapter number `bus`
    pub fn for_bus(bus: u32) -> Self {
        Self::new(format!("/dev/i2c-{}", bus))
    }

    /// Set the slave address
    pub fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }
}

/// Port expander on a Linux I2C adapter
///
/// This struct implements the `ExpanderBus` trait for Linux systems using
/// the `/dev/i2c-N` device interface. The file is closed on drop.
pub struct LinuxI2c {
    /// File handle bound to the slave address
    file: File,
    /// Device path, kept for diagnostics
    device: String,
    /// Slave address the handle is bound to
    address: u8,
}

impl LinuxI2c {
    /// Open a Linux I2C device and bind it to the configured slave
    pub fn open(config: &LinuxI2cConfig) -> Result<Self> {
        if config.device.is_empty() {
            return Err(LinuxI2cError::NoDevice);
        }
        if !(0x03..=0x77).contains(&config.address) {
            return Err(LinuxI2cError::InvalidAddress(config.address.into()));
        }

        log::debug!("linux_i2c: Opening device {}", config.device);

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&config.device)
            .map_err(|e| LinuxI2cError::OpenFailed {
                path: config.device.clone(),
                source: e,
            })?;

        // On failure `file` is dropped here, closing the descriptor
        let fd = file.as_raw_fd();
        unsafe {
            ioctl::i2c_set_slave(fd, config.address as libc::c_int).map_err(|e| {
                LinuxI2cError::SlaveAddressFailed {
                    path: config.device.clone(),
                    address: config.address,
                    source: std::io::Error::from_raw_os_error(e as i32),
                }
            })?;
        }

        log::info!(
            "linux_i2c: Opened {} (slave=0x{:02X})",
            config.device,
            config.address
        );

        Ok(Self {
            file,
            device: config.device.clone(),
            address: config.address,
        })
    }

    /// Open a device with the default slave address
    pub fn open_device(device: &str) -> Result<Self> {
        Self::open(&LinuxI2cConfig::new(device))
    }

    /// Device path this handle was opened on
    pub fn device(&self) -> &str {
        &self.device
    }

    /// Slave address this handle is bound to
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Write raw bytes to the slave as one transaction
    pub fn write_raw(&mut self, data: &[u8]) -> Result<()> {
        let written = self.file.write(data).map_err(LinuxI2cError::WriteFailed)?;
        if written != data.len() {
            return Err(LinuxI2cError::WriteFailed(std::io::Error::new(
                std::io::ErrorKind::WriteZero,
                format!("wrote {} of {} bytes", written, data.len()),
            )));
        }
        Ok(())
    }
}

impl ExpanderBus for LinuxI2c {
    fn write_byte(&mut self, data: u8) -> CoreResult<()> {
        self.write_raw(&[data]).map_err(|e| {
            log::error!("linux_i2c: {}", e);
            to_core_error(&e)
        })
    }

    fn delay_us(&mut self, us: u32) {
        std::thread::sleep(Duration::from_micros(us as u64));
    }
}

/// Map a write failure onto the bus-level error the display driver sees
fn to_core_error(e: &LinuxI2cError) -> CoreError {
    match e {
        LinuxI2cError::WriteFailed(io) if io.kind() == std::io::ErrorKind::WriteZero => {
            CoreError::ShortWrite
        }
        _ => CoreError::BusWriteFailed,
    }
}

/// Parse a 7-bit I2C address given in hex (`0x27`) or decimal (`39`)
pub fn parse_address(s: &str) -> Result<u8> {
    let value = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u16::from_str_radix(hex, 16)
    } else {
        s.parse::<u16>()
    }
    .map_err(|_| LinuxI2cError::InvalidParameter(format!("Invalid addr value: {}", s)))?;

    if !(0x03..=0x77).contains(&value) {
        return Err(LinuxI2cError::InvalidAddress(value));
    }
    Ok(value as u8)
}

/// Parse device options from a list of key-value pairs
///
/// # Supported Options
///
/// - `dev=/dev/i2c-N` - I2C adapter device path (default `/dev/i2c-1`)
/// - `bus=N` - adapter number (alternative to dev)
/// - `addr=0x27` - 7-bit slave address, hex or decimal (default 0x27)
pub fn parse_options(options: &[(&str, &str)]) -> Result<LinuxI2cConfig> {
    let mut config = LinuxI2cConfig::default();
    let mut dev: Option<String> = None;
    let mut bus: Option<u32> = None;

    for (key, value) in options {
        match *key {
            "dev" => {
                dev = Some(value.to_string());
            }
            "bus" => {
                bus = Some(value.parse().map_err(|_| {
                    LinuxI2cError::InvalidParameter(format!("Invalid bus value: {}", value))
                })?);
            }
            "addr" | "address" => {
                config.address = parse_address(value)?;
            }
            _ => {
                log::warn!("linux_i2c: Unknown option: {}={}", key, value);
            }
        }
    }

    match (dev, bus) {
        (Some(_), Some(_)) => {
            return Err(LinuxI2cError::InvalidParameter(
                "Only one of 'dev' or 'bus' can be specified".to_string(),
            ));
        }
        (Some(dev), None) if dev.is_empty() => return Err(LinuxI2cError::NoDevice),
        (Some(dev), None) => config.device = dev,
        (None, Some(n)) => config.device = LinuxI2cConfig::for_bus(n).device,
        (None, None) => {}
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = parse_options(&[]).unwrap();
        assert_eq!(config.device, "/dev/i2c-1");
        assert_eq!(config.address, 0x27);
    }

    #[test]
    fn test_parse_bus_and_address() {
        let config = parse_options(&[("bus", "0"), ("addr", "0x3F")]).unwrap();
        assert_eq!(config.device, "/dev/i2c-0");
        assert_eq!(config.address, 0x3F);

        let config = parse_options(&[("dev", "/dev/i2c-7"), ("addr", "39")]).unwrap();
        assert_eq!(config.device, "/dev/i2c-7");
        assert_eq!(config.address, 0x27);
    }

    #[test]
    fn test_dev_and_bus_conflict() {
        assert!(matches!(
            parse_options(&[("dev", "/dev/i2c-1"), ("bus", "1")]),
            Err(LinuxI2cError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_reserved_addresses_rejected() {
        assert!(matches!(
            parse_address("0x78"),
            Err(LinuxI2cError::InvalidAddress(0x78))
        ));
        assert!(matches!(
            parse_address("0x00"),
            Err(LinuxI2cError::InvalidAddress(0))
        ));
        assert!(matches!(
            parse_address("zz"),
            Err(LinuxI2cError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_for_bus_path() {
        assert_eq!(LinuxI2cConfig::for_bus(3).device, "/dev/i2c-3");
    }

    #[test]
    fn test_write_error_mapping() {
        let short = LinuxI2cError::WriteFailed(std::io::Error::new(
            std::io::ErrorKind::WriteZero,
            "wrote 0 of 1 bytes",
        ));
        assert_eq!(to_core_error(&short), CoreError::ShortWrite);

        let nak = LinuxI2cError::WriteFailed(std::io::Error::from_raw_os_error(libc::EREMOTEIO));
        assert_eq!(to_core_error(&nak), CoreError::BusWriteFailed);

        assert_eq!(to_core_error(&LinuxI2cError::NoDevice), CoreError::BusWriteFailed);
    }

    #[test]
    fn test_open_missing_device() {
        let config = LinuxI2cConfig::new("/nonexistent/i2c-99");
        assert!(matches!(
            LinuxI2c::open(&config),
            Err(LinuxI2cError::OpenFailed { .. })
        ));
    }

    #[test]
    fn test_open_rejects_non_i2c_file() {
        // A regular file opens fine but has no I2C_SLAVE ioctl
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = LinuxI2cConfig::new(file.path().to_string_lossy());
        match LinuxI2c::open(&config) {
            Err(LinuxI2cError::SlaveAddressFailed { address, .. }) => assert_eq!(address, 0x27),
            Err(e) => panic!("unexpected error: {}", e),
            Ok(_) => panic!("ioctl on a regular file should fail"),
        }
    }

    #[test]
    fn test_open_validates_address_first() {
        let config = LinuxI2cConfig::new("/dev/i2c-1").with_address(0x01);
        assert!(matches!(
            LinuxI2c::open(&config),
            Err(LinuxI2cError::InvalidAddress(1))
        ));
    }
}
