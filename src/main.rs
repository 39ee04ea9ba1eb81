//! boardtest - GPIO and character LCD bring-up tests
//!
//! Two small hardware checks for single-board computers:
//!
//! - **gpio**: re-export a pin through the sysfs GPIO interface, set its
//!   direction and read it back (optionally driving it first)
//! - **lcd**: initialize an HD44780 16x2 display behind a PCF8574 I2C
//!   backpack in 4-bit mode and write a line of text to it
//!
//! Both are plain blocking sequences against device files; there is no
//! retry or recovery logic.

mod cli;
mod commands;
mod devices;

use boardtest_core::lcd::LcdConfig;
use clap::Parser;
use cli::{Cli, Commands};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // RUST_LOG still wins over -v when set
    logger(cli.verbose, env_logger::DEFAULT_FILTER_ENV).init();

    match cli.command {
        Commands::Gpio {
            pin,
            value,
            direction,
            settle_ms,
            sysfs_root,
            release,
        } => run_gpio(pin, &value, direction, settle_ms, &sysfs_root, release),
        Commands::Lcd {
            device,
            text,
            line2,
            cols,
            rows,
            no_wait,
        } => commands::lcd::run_lcd(
            &device,
            &text,
            line2.as_deref(),
            LcdConfig::new(cols, rows),
            !no_wait,
        ),
        Commands::ListDevices => {
            commands::list_devices();
            Ok(())
        }
    }
}

/// Default log level for a `-v` count
fn log_filter(verbose: u8) -> log::LevelFilter {
    match verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

fn logger(verbose: u8, filter_env: &str) -> env_logger::Builder {
    let env = env_logger::Env::new()
        .filter_or(filter_env, log_filter(verbose).to_string())
        .write_style(env_logger::DEFAULT_WRITE_STYLE_ENV);
    env_logger::Builder::from_env(env)
}

#[cfg(feature = "linux-gpio")]
fn run_gpio(
    pin: u32,
    value: &str,
    direction: cli::DirectionArg,
    settle_ms: u64,
    sysfs_root: &std::path::Path,
    release: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    use boardtest_linux_gpio::{parse_level, Direction};

    let test = commands::gpio::GpioTest {
        pin,
        direction: match direction {
            cli::DirectionArg::In => Direction::In,
            cli::DirectionArg::Out => Direction::Out,
        },
        level: parse_level(value)?,
        release,
    };
    commands::gpio::run_gpio(&test, sysfs_root, settle_ms)
}

#[cfg(not(feature = "linux-gpio"))]
fn run_gpio(
    _pin: u32,
    _value: &str,
    _direction: cli::DirectionArg,
    _settle_ms: u64,
    _sysfs_root: &std::path::Path,
    _release: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    Err("GPIO support not compiled in (enable the linux-gpio feature)".into())
}
