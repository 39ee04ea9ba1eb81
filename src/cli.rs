//! CLI argument parsing

use crate::devices;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Generate dynamic help text for the device argument
fn device_help() -> String {
    format!(
        "LCD bus to use, name[:key=value,...] [available: {}]",
        devices::device_names_short()
    )
}

#[derive(Parser)]
#[command(name = "boardtest")]
#[command(author, version, about = "GPIO and I2C LCD bring-up tests", long_about = None)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Pin direction for the GPIO test
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DirectionArg {
    /// Configure as input and sample it
    In,
    /// Configure as output, drive the value, then sample it
    Out,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Re-export a GPIO pin via sysfs, set its direction and read it
    Gpio {
        /// GPIO number (kernel numbering)
        pin: u32,

        /// Level to drive when --direction out (0/1/low/high)
        value: String,

        /// Pin direction
        #[arg(short, long, value_enum, default_value_t = DirectionArg::In)]
        direction: DirectionArg,

        /// Wait after each sysfs step, in milliseconds
        #[arg(long, default_value_t = 100)]
        settle_ms: u64,

        /// GPIO class directory
        #[arg(long, default_value = "/sys/class/gpio")]
        sysfs_root: PathBuf,

        /// Unexport the pin when done
        #[arg(long)]
        release: bool,
    },

    /// Initialize an HD44780 LCD behind a PCF8574 expander and write text
    Lcd {
        /// LCD bus to use
        #[arg(
            short = 'p',
            long = "device",
            help = device_help(),
            default_value = devices::DEFAULT_DEVICE
        )]
        device: String,

        /// Text for the first row
        #[arg(short, long, default_value = "deneme")]
        text: String,

        /// Text for the second row
        #[arg(long)]
        line2: Option<String>,

        /// Visible columns
        #[arg(long, default_value_t = 16)]
        cols: u8,

        /// Visible rows
        #[arg(long, default_value_t = 2)]
        rows: u8,

        /// Don't wait for Enter before clearing the display
        #[arg(long)]
        no_wait: bool,
    },

    /// List available LCD bus backends
    ListDevices,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_gpio_positional_args() {
        let cli = Cli::try_parse_from(["boardtest", "gpio", "17", "1", "-d", "out"]).unwrap();
        match cli.command {
            Commands::Gpio {
                pin,
                value,
                direction,
                settle_ms,
                ..
            } => {
                assert_eq!(pin, 17);
                assert_eq!(value, "1");
                assert_eq!(direction, DirectionArg::Out);
                assert_eq!(settle_ms, 100);
            }
            _ => panic!("expected gpio"),
        }
    }

    #[test]
    fn test_gpio_requires_value() {
        assert!(Cli::try_parse_from(["boardtest", "gpio", "17"]).is_err());
    }

    #[test]
    fn test_lcd_defaults() {
        let cli = Cli::try_parse_from(["boardtest", "-v", "lcd"]).unwrap();
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Lcd {
                device,
                text,
                cols,
                rows,
                no_wait,
                ..
            } => {
                assert_eq!(device, devices::DEFAULT_DEVICE);
                assert_eq!(text, "deneme");
                assert_eq!((cols, rows), (16, 2));
                assert!(!no_wait);
            }
            _ => panic!("expected lcd"),
        }
    }
}
