//! LCD bus registration and dispatch
//!
//! The `lcd` command takes a device string of the form `name` or
//! `name:key1=value1,key2=value2`. This module lists the backends compiled
//! in, splits device strings, and opens the selected backend.

use boardtest_core::bus::ExpanderBus;
use boardtest_core::error::Result as CoreResult;
use boardtest_core::lcd::LcdConfig;
use thiserror::Error;

/// Device string used when `-p` is not given
pub const DEFAULT_DEVICE: &str = "linux_i2c";

/// Information about an LCD bus backend
pub struct DeviceInfo {
    /// Primary name (used for matching)
    pub name: &'static str,
    /// Alternative names/aliases
    pub aliases: &'static [&'static str],
    /// Short description
    pub description: &'static str,
}

/// Get information about all available backends (enabled at compile time)
#[allow(unused_mut, clippy::vec_init_then_push)]
pub fn available_devices() -> Vec<DeviceInfo> {
    let mut devices = Vec::new();

    #[cfg(feature = "linux-i2c")]
    devices.push(DeviceInfo {
        name: "linux_i2c",
        aliases: &["linux-i2c", "i2c"],
        description: "Linux i2c-dev PCF8574 backpack (dev=/dev/i2c-N or bus=N, addr=<0x03-0x77>)",
    });

    #[cfg(feature = "dummy")]
    devices.push(DeviceInfo {
        name: "dummy",
        aliases: &[],
        description: "In-memory LCD emulator, prints the screen afterwards (cols=N,rows=N)",
    });

    devices
}

/// Generate a short list of backend names for CLI help
pub fn device_names_short() -> String {
    let devices = available_devices();
    let names: Vec<&str> = devices.iter().map(|d| d.name).collect();
    names.join(", ")
}

/// Resolve a name or alias to the canonical backend name
pub fn find_device(name: &str) -> Option<&'static str> {
    available_devices()
        .into_iter()
        .find(|d| d.name == name || d.aliases.contains(&name))
        .map(|d| d.name)
}

/// Errors from splitting a device string
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeviceStringError {
    /// Nothing before the colon
    #[error("Empty device name")]
    EmptyName,

    /// An option without `=`
    #[error("Invalid parameter format: '{0}' (expected key=value)")]
    InvalidParameter(String),

    /// Name does not match any compiled-in backend
    #[error("Unknown device '{name}' [available: {available}]")]
    UnknownDevice { name: String, available: String },
}

/// Parsed device string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceParams {
    /// Backend name as given
    pub name: String,
    /// Key-value parameters in the order given
    pub params: Vec<(String, String)>,
}

impl DeviceParams {
    /// Borrow the parameters as the `(key, value)` slice backends expect
    pub fn options(&self) -> Vec<(&str, &str)> {
        self.params
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }
}

/// Parse a device string into name and parameters
///
/// Format: "name" or "name:key1=value1,key2=value2"
pub fn parse_device_params(s: &str) -> Result<DeviceParams, DeviceStringError> {
    let (name, opts_str) = s.split_once(':').unwrap_or((s, ""));
    if name.is_empty() {
        return Err(DeviceStringError::EmptyName);
    }

    let mut params = Vec::new();
    if !opts_str.is_empty() {
        for opt in opts_str.split(',') {
            if let Some((key, value)) = opt.split_once('=') {
                params.push((key.to_string(), value.to_string()));
            } else {
                return Err(DeviceStringError::InvalidParameter(opt.to_string()));
            }
        }
    }

    Ok(DeviceParams {
        name: name.to_string(),
        params,
    })
}

/// An opened LCD bus
pub enum LcdBus {
    /// Real hardware on an I2C adapter
    #[cfg(feature = "linux-i2c")]
    LinuxI2c(boardtest_linux_i2c::LinuxI2c),
    /// In-memory emulator
    #[cfg(feature = "dummy")]
    Dummy(boardtest_dummy::DummyLcd),
}

impl ExpanderBus for LcdBus {
    fn write_byte(&mut self, data: u8) -> CoreResult<()> {
        match self {
            #[cfg(feature = "linux-i2c")]
            Self::LinuxI2c(bus) => bus.write_byte(data),
            #[cfg(feature = "dummy")]
            Self::Dummy(bus) => bus.write_byte(data),
        }
    }

    fn delay_us(&mut self, us: u32) {
        match self {
            #[cfg(feature = "linux-i2c")]
            Self::LinuxI2c(bus) => bus.delay_us(us),
            #[cfg(feature = "dummy")]
            Self::Dummy(bus) => bus.delay_us(us),
        }
    }
}

/// Open the LCD bus named by a device string
///
/// `geometry` is what the driver will assume; the emulator takes it as its
/// default size so its screen matches what is sent to it.
#[allow(unused_variables)]
pub fn open_lcd_bus(
    device: &str,
    geometry: &LcdConfig,
) -> Result<LcdBus, Box<dyn std::error::Error>> {
    let params = parse_device_params(device)?;
    #[allow(unused_variables)]
    let options = params.options();

    match find_device(&params.name) {
        #[cfg(feature = "linux-i2c")]
        Some("linux_i2c") => Ok(LcdBus::LinuxI2c(boardtest_linux_i2c::open_linux_i2c(
            &options,
        )?)),
        #[cfg(feature = "dummy")]
        Some("dummy") => {
            let base = boardtest_dummy::DummyConfig::new(geometry.cols, geometry.rows);
            let config = boardtest_dummy::parse_options(&options, base)?;
            log::info!("dummy: Emulating {}x{} display", config.cols, config.rows);
            Ok(LcdBus::Dummy(boardtest_dummy::DummyLcd::new(config)))
        }
        _ => Err(DeviceStringError::UnknownDevice {
            name: params.name,
            available: device_names_short(),
        }
        .into()),
    }
}
