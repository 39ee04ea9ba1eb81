//! Character LCD test

use crate::devices::{self, LcdBus};
use boardtest_core::bus::ExpanderBus;
use boardtest_core::lcd::{Lcd, LcdConfig};
use boardtest_core::Result as CoreResult;
use std::io::BufRead;

/// Initialize the display, write the text and wait for the operator
pub fn run_lcd(
    device: &str,
    text: &str,
    line2: Option<&str>,
    config: LcdConfig,
    wait: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Opening LCD on {}", device);
    let bus = devices::open_lcd_bus(device, &config)?;
    let mut lcd = Lcd::new(bus, config);

    show(&mut lcd, text, line2)?;

    print_if_emulated(lcd.bus());

    if wait {
        println!("Press Enter to exit.");
        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line)?;
    }

    finish(&mut lcd)?;
    Ok(())
}

/// Bring the display up and write the test text
///
/// Cursor and blink are switched on so a dead display can be told apart
/// from one that is merely showing blanks.
pub fn show<B: ExpanderBus>(lcd: &mut Lcd<B>, text: &str, line2: Option<&str>) -> CoreResult<()> {
    lcd.begin()?;
    lcd.cursor()?;
    lcd.blink()?;
    lcd.backlight()?;

    lcd.write_line(0, text)?;
    if let Some(second) = line2 {
        if lcd.config().rows > 1 {
            lcd.write_line(1, second)?;
        } else {
            log::warn!("Display has one row, ignoring second line");
        }
    }
    log::info!("Wrote test text to {}x{} display", lcd.config().cols, lcd.config().rows);
    Ok(())
}

/// Blank the display, leaving the backlight on
pub fn finish<B: ExpanderBus>(lcd: &mut Lcd<B>) -> CoreResult<()> {
    lcd.clear()?;
    lcd.backlight()
}

/// Show what the emulator would have on its glass
#[cfg(feature = "dummy")]
fn print_if_emulated(bus: &LcdBus) {
    match bus {
        LcdBus::Dummy(dummy) => print_screen(&dummy.screen()),
        #[allow(unreachable_patterns)]
        _ => {}
    }
}

#[cfg(not(feature = "dummy"))]
fn print_if_emulated(_bus: &LcdBus) {}

#[cfg(feature = "dummy")]
fn print_screen(lines: &[String]) {
    let width = lines.first().map_or(0, |l| l.len());
    println!("+{}+", "-".repeat(width));
    for line in lines {
        println!("|{}|", line);
    }
    println!("+{}+", "-".repeat(width));
}
