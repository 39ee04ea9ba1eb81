//! Error types for Linux sysfs GPIO operations

use thiserror::Error;

/// Linux sysfs GPIO specific errors
#[derive(Debug, Error)]
pub enum LinuxGpioError {
    /// The sysfs GPIO class directory does not exist
    #[error("GPIO sysfs interface not found at '{0}' (kernel built without CONFIG_GPIO_SYSFS?)")]
    NoSysfs(String),

    /// Writing the export file failed
    #[error("Failed to export GPIO {pin}: {source}")]
    ExportFailed {
        pin: u32,
        #[source]
        source: std::io::Error,
    },

    /// Writing the unexport file failed
    #[error("Failed to unexport GPIO {pin}: {source}")]
    UnexportFailed {
        pin: u32,
        #[source]
        source: std::io::Error,
    },

    /// Reading or writing a per-pin attribute failed
    #[error("Failed to access '{path}': {source}")]
    AttributeFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// An attribute held something other than what the kernel documents
    #[error("Unexpected contents in '{path}': {value:?}")]
    UnexpectedValue { path: String, value: String },

    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for Linux sysfs GPIO operations
pub type Result<T> = std::result::Result<T, LinuxGpioError>;
