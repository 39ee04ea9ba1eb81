//! Error types for Linux I2C operations

use thiserror::Error;

/// Linux I2C specific errors
#[derive(Debug, Error)]
pub enum LinuxI2cError {
    /// Failed to open device
    #[error("Failed to open I2C device {path}: {source}")]
    OpenFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to bind the file descriptor to a slave address
    #[error("Failed to connect to I2C slave 0x{address:02X} on {path}: {source}")]
    SlaveAddressFailed {
        path: String,
        address: u8,
        #[source]
        source: std::io::Error,
    },

    /// Write to the slave failed
    #[error("Error writing data over I2C: {0}")]
    WriteFailed(#[source] std::io::Error),

    /// Address outside the 7-bit range usable by ordinary slaves
    #[error("Invalid I2C address 0x{0:02X} (must be 0x03-0x77)")]
    InvalidAddress(u16),

    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Device not specified
    #[error("No device specified. Use dev=/dev/i2c-N or bus=N")]
    NoDevice,
}

/// Result type for Linux I2C operations
pub type Result<T> = std::result::Result<T, LinuxI2cError>;
