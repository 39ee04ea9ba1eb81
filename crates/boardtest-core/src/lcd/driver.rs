//! Stateful HD44780 driver
//!
//! The controller's status registers are write-only from our side, so
//! the driver keeps a shadow copy of each and re-issues the whole
//! register whenever a single flag changes.

use core::fmt;

use crate::bus::ExpanderBus;
use crate::error::{Error, Result};
use crate::lcd::commands::*;
use crate::lcd::flags::{Backlight, DisplayControl, EntryMode, FunctionSet, ShiftFlags};
use crate::lcd::protocol;

/// DDRAM start address of each display row
///
/// Rows 2 and 3 of a 4-line panel continue rows 0 and 1 in memory.
pub const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

/// Default I2C address of PCF8574 backpacks with all address jumpers open
pub const DEFAULT_ADDRESS: u8 = 0x27;

/// Display geometry and font
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LcdConfig {
    /// Visible columns
    pub cols: u8,
    /// Visible rows (1-4)
    pub rows: u8,
    /// Use the 5x10 font (single-line panels only)
    pub tall_font: bool,
}

impl Default for LcdConfig {
    fn default() -> Self {
        Self {
            cols: 16,
            rows: 2,
            tall_font: false,
        }
    }
}

impl LcdConfig {
    /// Create a configuration for the given geometry
    pub fn new(cols: u8, rows: u8) -> Self {
        Self {
            cols,
            rows,
            ..Default::default()
        }
    }

    /// Select the 5x10 font
    pub fn with_tall_font(mut self, tall: bool) -> Self {
        self.tall_font = tall;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.cols == 0
            || self.cols > 40
            || self.rows == 0
            || self.rows as usize > ROW_OFFSETS.len()
        {
            return Err(Error::InvalidGeometry);
        }
        Ok(())
    }

    fn function_set(&self) -> FunctionSet {
        let mut flags = FunctionSet::empty();
        if self.rows > 1 {
            flags |= FunctionSet::TWO_LINE;
        } else if self.tall_font {
            flags |= FunctionSet::DOTS_5X10;
        }
        flags
    }
}

/// Character LCD driven through a port expander
pub struct Lcd<B: ExpanderBus> {
    bus: B,
    config: LcdConfig,
    backlight: Backlight,
    function: FunctionSet,
    control: DisplayControl,
    mode: EntryMode,
}

impl<B: ExpanderBus> Lcd<B> {
    /// Wrap a bus; nothing is sent until [`begin`](Self::begin)
    pub fn new(bus: B, config: LcdConfig) -> Self {
        Self {
            bus,
            function: config.function_set(),
            config,
            backlight: Backlight::On,
            control: DisplayControl::DISPLAY_ON,
            mode: EntryMode::LEFT,
        }
    }

    /// Run the power-on initialization sequence
    ///
    /// The controller may be in 8-bit mode or halfway through a 4-bit
    /// transfer, so the 8-bit function set nibble is sent three times
    /// before switching to 4 bits. Leaves the display on, cursor and
    /// blink off, cleared, left-to-right, cursor at home.
    pub fn begin(&mut self) -> Result<()> {
        self.config.validate()?;
        self.function = self.config.function_set();

        log::debug!(
            "lcd: init {}x{} (function set 0x{:02X})",
            self.config.cols,
            self.config.rows,
            FUNCTION_SET | self.function.bits()
        );

        self.bus.delay_ms(POWER_ON_DELAY_MS);
        protocol::expander_write(&mut self.bus, 0, self.backlight)?;
        self.bus.delay_ms(BACKLIGHT_SETTLE_MS);

        for _ in 0..3 {
            protocol::write4bits(&mut self.bus, INIT_8BIT_NIBBLE, self.backlight)?;
            self.bus.delay_ms(INIT_NIBBLE_DELAY_MS);
        }
        protocol::write4bits(&mut self.bus, INIT_4BIT_NIBBLE, self.backlight)?;

        self.command(FUNCTION_SET | self.function.bits())?;

        self.control = DisplayControl::DISPLAY_ON;
        self.display()?;
        self.clear()?;

        self.mode = EntryMode::LEFT;
        self.command(ENTRY_MODE_SET | self.mode.bits())?;
        self.home()
    }

    fn command(&mut self, value: u8) -> Result<()> {
        protocol::command(&mut self.bus, value, self.backlight)
    }

    fn update_control(&mut self, flag: DisplayControl, on: bool) -> Result<()> {
        self.control.set(flag, on);
        self.command(DISPLAY_CONTROL | self.control.bits())
    }

    fn update_mode(&mut self, flag: EntryMode, on: bool) -> Result<()> {
        self.mode.set(flag, on);
        self.command(ENTRY_MODE_SET | self.mode.bits())
    }

    /// Turn the display on (contents are kept while off)
    pub fn display(&mut self) -> Result<()> {
        self.update_control(DisplayControl::DISPLAY_ON, true)
    }

    /// Turn the display off
    pub fn no_display(&mut self) -> Result<()> {
        self.update_control(DisplayControl::DISPLAY_ON, false)
    }

    /// Show the underline cursor
    pub fn cursor(&mut self) -> Result<()> {
        self.update_control(DisplayControl::CURSOR_ON, true)
    }

    /// Hide the underline cursor
    pub fn no_cursor(&mut self) -> Result<()> {
        self.update_control(DisplayControl::CURSOR_ON, false)
    }

    /// Blink the character at the cursor
    pub fn blink(&mut self) -> Result<()> {
        self.update_control(DisplayControl::BLINK_ON, true)
    }

    /// Stop blinking
    pub fn no_blink(&mut self) -> Result<()> {
        self.update_control(DisplayControl::BLINK_ON, false)
    }

    /// Clear the display and move the cursor home
    pub fn clear(&mut self) -> Result<()> {
        self.command(CLEAR_DISPLAY)?;
        self.bus.delay_ms(SLOW_COMMAND_DELAY_MS);
        Ok(())
    }

    /// Move the cursor home and undo any display shift
    pub fn home(&mut self) -> Result<()> {
        self.command(RETURN_HOME)?;
        self.bus.delay_ms(SLOW_COMMAND_DELAY_MS);
        Ok(())
    }

    /// Move the cursor to `(col, row)`, both zero-based
    ///
    /// Rows past the bottom are clamped to the last row. Columns past
    /// the right edge are rejected.
    pub fn set_cursor(&mut self, col: u8, row: u8) -> Result<()> {
        self.config.validate()?;
        if col >= self.config.cols {
            return Err(Error::InvalidPosition { col, row });
        }
        let row = row.min(self.config.rows - 1);
        self.command(SET_DDRAM_ADDR | (col + ROW_OFFSETS[row as usize]))
    }

    /// Shift the whole display one position to the left
    pub fn scroll_display_left(&mut self) -> Result<()> {
        self.command(CURSOR_SHIFT | ShiftFlags::DISPLAY_MOVE.bits())
    }

    /// Shift the whole display one position to the right
    pub fn scroll_display_right(&mut self) -> Result<()> {
        self.command(CURSOR_SHIFT | (ShiftFlags::DISPLAY_MOVE | ShiftFlags::MOVE_RIGHT).bits())
    }

    /// Text flows left to right
    pub fn left_to_right(&mut self) -> Result<()> {
        self.update_mode(EntryMode::LEFT, true)
    }

    /// Text flows right to left
    pub fn right_to_left(&mut self) -> Result<()> {
        self.update_mode(EntryMode::LEFT, false)
    }

    /// Shift the display on every character written
    pub fn autoscroll(&mut self) -> Result<()> {
        self.update_mode(EntryMode::SHIFT_INCREMENT, true)
    }

    /// Keep the display still while writing
    pub fn no_autoscroll(&mut self) -> Result<()> {
        self.update_mode(EntryMode::SHIFT_INCREMENT, false)
    }

    /// Define custom glyph `location` (0-7) from eight 5-bit rows
    ///
    /// Leaves the address counter in CGRAM; call [`set_cursor`](Self::set_cursor)
    /// or [`home`](Self::home) before writing text again.
    pub fn create_char(&mut self, location: u8, charmap: &[u8; 8]) -> Result<()> {
        let location = location & 0x07;
        self.command(SET_CGRAM_ADDR | (location << 3))?;
        for &row in charmap {
            protocol::write_data(&mut self.bus, row, self.backlight)?;
        }
        Ok(())
    }

    /// Switch the backlight on
    pub fn backlight(&mut self) -> Result<()> {
        self.set_backlight(true)
    }

    /// Switch the backlight off
    pub fn no_backlight(&mut self) -> Result<()> {
        self.set_backlight(false)
    }

    /// Switch the backlight on or off
    pub fn set_backlight(&mut self, on: bool) -> Result<()> {
        self.backlight = Backlight::from(on);
        protocol::expander_write(&mut self.bus, 0, self.backlight)
    }

    /// Write a single character code at the cursor
    pub fn write_char(&mut self, code: u8) -> Result<()> {
        protocol::write_data(&mut self.bus, code, self.backlight)
    }

    /// Write text at the cursor, at most one row's worth
    ///
    /// Characters outside ASCII have no fixed place in the controller's
    /// ROM and are shown as `?`.
    pub fn write_str(&mut self, text: &str) -> Result<()> {
        for c in text.chars().take(self.config.cols as usize) {
            let code = if c.is_ascii() { c as u8 } else { b'?' };
            self.write_char(code)?;
        }
        Ok(())
    }

    /// Write text starting at the beginning of `row`
    pub fn write_line(&mut self, row: u8, text: &str) -> Result<()> {
        self.set_cursor(0, row)?;
        self.write_str(text)
    }

    /// Configured geometry
    pub fn config(&self) -> &LcdConfig {
        &self.config
    }

    /// Current display control register
    pub fn display_control(&self) -> DisplayControl {
        self.control
    }

    /// Current entry mode register
    pub fn entry_mode(&self) -> EntryMode {
        self.mode
    }

    /// Current function set register
    pub fn function_set(&self) -> FunctionSet {
        self.function
    }

    /// Current backlight state
    pub fn backlight_state(&self) -> Backlight {
        self.backlight
    }

    /// Borrow the underlying bus
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Release the underlying bus
    pub fn into_bus(self) -> B {
        self.bus
    }
}

impl<B: ExpanderBus> fmt::Write for Lcd<B> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        Lcd::write_str(self, s).map_err(|_| fmt::Error)
    }
}
