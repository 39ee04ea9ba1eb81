//! GPIO sysfs test

use boardtest_linux_gpio::{Direction, Level, SysfsGpio, SysfsGpioConfig};
use std::path::Path;

/// One run of the GPIO test
#[derive(Debug, Clone, Copy)]
pub struct GpioTest {
    /// Pin under test
    pub pin: u32,
    /// Direction to configure
    pub direction: Direction,
    /// Level to drive when the pin is an output
    pub level: Level,
    /// Unexport the pin afterwards
    pub release: bool,
}

/// Open sysfs and run the test, printing the sampled level
pub fn run_gpio(
    test: &GpioTest,
    sysfs_root: &Path,
    settle_ms: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = SysfsGpioConfig::new(sysfs_root).with_settle_ms(settle_ms);
    let gpio = SysfsGpio::open(&config)?;

    let level = run_sequence(&gpio, test)?;
    println!("{}", level);
    Ok(())
}

/// Unexport, export, configure and sample the pin
///
/// A pin left exported by an earlier run is released first so the test
/// always starts from a fresh export. Failures of those two steps are
/// logged and the sequence carries on; if the pin really is unusable the
/// direction write reports it.
pub fn run_sequence(gpio: &SysfsGpio, test: &GpioTest) -> boardtest_linux_gpio::Result<Level> {
    let pin = test.pin;

    if let Err(e) = gpio.unexport(pin) {
        if gpio.is_exported(pin) {
            log::warn!("{}", e);
        } else {
            log::debug!("GPIO {} was not exported", pin);
        }
    }
    gpio.settle();

    if let Err(e) = gpio.export(pin) {
        log::warn!("{}", e);
    }
    gpio.settle();

    gpio.set_direction(pin, test.direction)?;
    gpio.settle();

    if test.direction == Direction::Out {
        gpio.write(pin, test.level)?;
        gpio.settle();
    }

    let level = gpio.read(pin)?;
    log::info!("GPIO {} ({}) reads {}", pin, test.direction, level);

    if test.release {
        gpio.unexport(pin)?;
    }

    Ok(level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn fake_sysfs(pin: u32, value: &str) -> (TempDir, SysfsGpio) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("export"), "").unwrap();
        fs::write(dir.path().join("unexport"), "").unwrap();
        let pin_dir = dir.path().join(format!("gpio{}", pin));
        fs::create_dir(&pin_dir).unwrap();
        fs::write(pin_dir.join("direction"), "out\n").unwrap();
        fs::write(pin_dir.join("value"), value).unwrap();

        let gpio = SysfsGpio::open(&SysfsGpioConfig::new(dir.path()).with_settle_ms(0)).unwrap();
        (dir, gpio)
    }

    #[test]
    fn test_input_sequence() {
        let (dir, gpio) = fake_sysfs(17, "1\n");
        let test = GpioTest {
            pin: 17,
            direction: Direction::In,
            level: Level::Low,
            release: false,
        };

        assert_eq!(run_sequence(&gpio, &test).unwrap(), Level::High);
        assert_eq!(fs::read_to_string(dir.path().join("unexport")).unwrap(), "17");
        assert_eq!(fs::read_to_string(dir.path().join("export")).unwrap(), "17");
        assert!(fs::read_to_string(dir.path().join("gpio17/direction"))
            .unwrap()
            .starts_with("in"));
        // Input pins are never driven
        assert_eq!(
            fs::read_to_string(dir.path().join("gpio17/value")).unwrap(),
            "1\n"
        );
    }

    #[test]
    fn test_output_sequence_drives_level() {
        let (dir, gpio) = fake_sysfs(5, "0\n");
        let test = GpioTest {
            pin: 5,
            direction: Direction::Out,
            level: Level::High,
            release: false,
        };

        assert_eq!(run_sequence(&gpio, &test).unwrap(), Level::High);
        assert!(fs::read_to_string(dir.path().join("gpio5/direction"))
            .unwrap()
            .starts_with("out"));
    }

    #[test]
    fn test_export_failure_is_tolerated() {
        let (dir, gpio) = fake_sysfs(6, "0\n");
        fs::remove_file(dir.path().join("export")).unwrap();
        fs::remove_file(dir.path().join("unexport")).unwrap();
        let test = GpioTest {
            pin: 6,
            direction: Direction::In,
            level: Level::Low,
            release: false,
        };

        assert_eq!(run_sequence(&gpio, &test).unwrap(), Level::Low);
    }

    #[test]
    fn test_missing_pin_fails_at_direction() {
        let (_dir, gpio) = fake_sysfs(6, "0\n");
        let test = GpioTest {
            pin: 7,
            direction: Direction::In,
            level: Level::Low,
            release: false,
        };

        assert!(matches!(
            run_sequence(&gpio, &test),
            Err(boardtest_linux_gpio::LinuxGpioError::AttributeFailed { .. })
        ));
    }

    #[test]
    fn test_release_unexports() {
        let (dir, gpio) = fake_sysfs(8, "0\n");
        fs::write(dir.path().join("unexport"), "").unwrap();
        let test = GpioTest {
            pin: 8,
            direction: Direction::In,
            level: Level::Low,
            release: true,
        };

        run_sequence(&gpio, &test).unwrap();
        assert_eq!(fs::read_to_string(dir.path().join("unexport")).unwrap(), "8");
    }
}
