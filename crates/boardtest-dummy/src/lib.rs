//! boardtest-dummy - In-memory LCD emulator for testing
//!
//! This crate provides a dummy expander bus that emulates a PCF8574
//! backpack with an HD44780 controller behind it. Every byte written is
//! recorded, and every falling edge of EN is decoded the way the real
//! controller would see it, so tests can check both the raw byte stream
//! and what would end up on the glass.

use boardtest_core::bus::ExpanderBus;
use boardtest_core::error::Result;
use boardtest_core::lcd::commands::*;
use boardtest_core::lcd::flags::{DisplayControl, EntryMode, FunctionSet, Pins, ShiftFlags};
use boardtest_core::lcd::ROW_OFFSETS;

/// Characters per DDRAM line in 2-line mode
const LINE_LEN: u8 = 40;

/// DDRAM start address of each memory line
const LINE_BASE: [u8; 2] = [0x00, 0x40];

/// Configuration for the dummy display
#[derive(Debug, Clone)]
pub struct DummyConfig {
    /// Visible columns
    pub cols: u8,
    /// Visible rows
    pub rows: u8,
}

impl Default for DummyConfig {
    fn default() -> Self {
        Self { cols: 16, rows: 2 }
    }
}

impl DummyConfig {
    /// Create a configuration for a `cols` x `rows` display
    pub fn new(cols: u8, rows: u8) -> Self {
        Self { cols, rows }
    }
}

/// Which RAM the address counter points into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Ddram,
    Cgram,
}

/// Dummy LCD backpack
///
/// Emulates the expander and the controller in memory for testing purposes.
pub struct DummyLcd {
    config: DummyConfig,
    history: Vec<u8>,
    instructions: Vec<u8>,
    latch: u8,
    delay_us: u64,
    four_bit: bool,
    pending_nibble: Option<u8>,
    ddram: [u8; 0x80],
    cgram: [u8; 64],
    address: u8,
    target: Target,
    function: FunctionSet,
    control: DisplayControl,
    entry: EntryMode,
    shift: u8,
}

impl DummyLcd {
    /// Create a new dummy display with the given configuration
    ///
    /// The controller starts the way it comes out of power-on reset:
    /// 8-bit interface, display off, DDRAM blank. A geometry the
    /// controller cannot address is clamped to the nearest one it can.
    pub fn new(mut config: DummyConfig) -> Self {
        config.cols = config.cols.clamp(1, LINE_LEN);
        config.rows = config.rows.clamp(1, ROW_OFFSETS.len() as u8);
        Self {
            config,
            history: Vec::new(),
            instructions: Vec::new(),
            latch: 0,
            delay_us: 0,
            four_bit: false,
            pending_nibble: None,
            ddram: [b' '; 0x80],
            cgram: [0; 64],
            address: 0,
            target: Target::Ddram,
            function: FunctionSet::EIGHT_BIT,
            control: DisplayControl::empty(),
            entry: EntryMode::LEFT,
            shift: 0,
        }
    }

    /// Create a new dummy display with default configuration (16x2)
    pub fn new_default() -> Self {
        Self::new(DummyConfig::default())
    }

    /// Get the configuration
    pub fn config(&self) -> &DummyConfig {
        &self.config
    }

    /// Every byte written to the expander, in order
    pub fn history(&self) -> &[u8] {
        &self.history
    }

    /// Every instruction the controller executed, in order
    pub fn instructions(&self) -> &[u8] {
        &self.instructions
    }

    /// Forget recorded bytes and instructions, keeping controller state
    pub fn clear_history(&mut self) {
        self.history.clear();
        self.instructions.clear();
    }

    /// Total delay requested through the bus, in microseconds
    pub fn total_delay_us(&self) -> u64 {
        self.delay_us
    }

    /// Whether the controller has been switched to the 4-bit interface
    pub fn is_four_bit(&self) -> bool {
        self.four_bit
    }

    /// Whether the backlight line is currently driven
    pub fn backlight(&self) -> bool {
        self.latch & Pins::BACKLIGHT.bits() != 0
    }

    /// Last function set received
    pub fn function_set(&self) -> FunctionSet {
        self.function
    }

    /// Last display control received
    pub fn display_control(&self) -> DisplayControl {
        self.control
    }

    /// Last entry mode received
    pub fn entry_mode(&self) -> EntryMode {
        self.entry
    }

    /// Current address counter (DDRAM or CGRAM, whichever was set last)
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Display shift in characters, 0..40
    pub fn display_shift(&self) -> u8 {
        self.shift
    }

    /// The eight rows of custom glyph `location`
    pub fn glyph(&self, location: u8) -> [u8; 8] {
        let start = ((location & 0x07) as usize) * 8;
        let mut rows = [0u8; 8];
        rows.copy_from_slice(&self.cgram[start..start + 8]);
        rows
    }

    /// Raw DDRAM byte at `addr`
    pub fn ddram(&self, addr: u8) -> u8 {
        self.ddram[(addr & 0x7F) as usize]
    }

    /// What is visible on `row`, taking display shift into account
    ///
    /// Custom glyphs render as `#`, other unprintable codes as `?`. A
    /// display that is switched off renders as blanks.
    pub fn line(&self, row: u8) -> String {
        let row = row.min(self.config.rows.saturating_sub(1)) as usize;
        let line = row % 2;
        let start = ROW_OFFSETS[row] - LINE_BASE[line];

        (0..self.config.cols)
            .map(|col| {
                if !self.control.contains(DisplayControl::DISPLAY_ON) {
                    return ' ';
                }
                let pos = (start + col + self.shift) % LINE_LEN;
                match self.ddram[(LINE_BASE[line] + pos) as usize] {
                    0x00..=0x07 => '#',
                    c @ 0x20..=0x7E => c as char,
                    _ => '?',
                }
            })
            .collect()
    }

    /// All visible rows, top to bottom
    pub fn screen(&self) -> Vec<String> {
        (0..self.config.rows).map(|row| self.line(row)).collect()
    }

    fn clock(&mut self, byte: u8) {
        let rs = byte & Pins::RS.bits() != 0;
        let nibble = byte & Pins::DATA.bits();

        if !self.four_bit {
            // D0..D3 are not wired, the controller reads them as zero
            self.execute(nibble, rs);
            return;
        }

        match self.pending_nibble.take() {
            None => self.pending_nibble = Some(nibble),
            Some(high) => self.execute(high | (nibble >> 4), rs),
        }
    }

    fn execute(&mut self, value: u8, rs: bool) {
        if rs {
            self.write_data(value);
        } else {
            self.instructions.push(value);
            self.instruction(value);
        }
    }

    fn instruction(&mut self, value: u8) {
        log::trace!("dummy_lcd: instruction 0x{:02X}", value);

        if value & SET_DDRAM_ADDR != 0 {
            self.address = value & 0x7F;
            self.target = Target::Ddram;
        } else if value & SET_CGRAM_ADDR != 0 {
            self.address = value & 0x3F;
            self.target = Target::Cgram;
        } else if value & FUNCTION_SET != 0 {
            self.function = FunctionSet::from_bits_truncate(value);
            let four_bit = !self.function.contains(FunctionSet::EIGHT_BIT);
            if four_bit != self.four_bit {
                self.pending_nibble = None;
            }
            self.four_bit = four_bit;
        } else if value & CURSOR_SHIFT != 0 {
            let flags = ShiftFlags::from_bits_truncate(value);
            let right = flags.contains(ShiftFlags::MOVE_RIGHT);
            if flags.contains(ShiftFlags::DISPLAY_MOVE) {
                // Content moving right means the window moves left
                self.shift = if right {
                    (self.shift + LINE_LEN - 1) % LINE_LEN
                } else {
                    (self.shift + 1) % LINE_LEN
                };
            } else {
                self.step_address(right);
            }
        } else if value & DISPLAY_CONTROL != 0 {
            self.control = DisplayControl::from_bits_truncate(value);
        } else if value & ENTRY_MODE_SET != 0 {
            self.entry = EntryMode::from_bits_truncate(value);
        } else if value & RETURN_HOME != 0 {
            self.address = 0;
            self.target = Target::Ddram;
            self.shift = 0;
        } else if value & CLEAR_DISPLAY != 0 {
            self.ddram = [b' '; 0x80];
            self.address = 0;
            self.target = Target::Ddram;
            self.shift = 0;
            self.entry.insert(EntryMode::LEFT);
        }
    }

    fn write_data(&mut self, value: u8) {
        let increment = self.entry.contains(EntryMode::LEFT);
        match self.target {
            Target::Cgram => {
                self.cgram[(self.address & 0x3F) as usize] = value;
                self.address = if increment {
                    (self.address + 1) & 0x3F
                } else {
                    self.address.wrapping_sub(1) & 0x3F
                };
            }
            Target::Ddram => {
                self.ddram[(self.address & 0x7F) as usize] = value;
                self.step_address(increment);
                if self.entry.contains(EntryMode::SHIFT_INCREMENT) {
                    self.shift = if increment {
                        (self.shift + 1) % LINE_LEN
                    } else {
                        (self.shift + LINE_LEN - 1) % LINE_LEN
                    };
                }
            }
        }
    }

    /// Move the DDRAM address counter one step, wrapping between lines
    fn step_address(&mut self, forward: bool) {
        let line = usize::from(self.address >= LINE_BASE[1]);
        let offset = self.address - LINE_BASE[line];
        self.address = if forward {
            if offset + 1 < LINE_LEN {
                self.address + 1
            } else {
                LINE_BASE[1 - line]
            }
        } else if offset > 0 {
            self.address - 1
        } else {
            LINE_BASE[1 - line] + LINE_LEN - 1
        };
    }
}

impl ExpanderBus for DummyLcd {
    fn write_byte(&mut self, data: u8) -> Result<()> {
        self.history.push(data);

        let previous = self.latch;
        self.latch = data;

        // The controller latches D4..D7 and RS on the falling edge of EN
        let en = Pins::EN.bits();
        if previous & en != 0 && data & en == 0 {
            self.clock(previous);
        }
        Ok(())
    }

    fn delay_us(&mut self, us: u32) {
        // No real delay for an in-memory display
        self.delay_us += u64::from(us);
    }
}

/// Parse dummy options from a list of key-value pairs
///
/// # Supported Options
///
/// - `cols=N` - visible columns (default from `base`)
/// - `rows=N` - visible rows, 1-4 (default from `base`)
pub fn parse_options(
    options: &[(&str, &str)],
    base: DummyConfig,
) -> std::result::Result<DummyConfig, String> {
    let mut config = base;

    for (key, value) in options {
        match *key {
            "cols" => {
                config.cols = value
                    .parse()
                    .map_err(|_| format!("Invalid cols value: {}", value))?;
            }
            "rows" => {
                config.rows = value
                    .parse()
                    .map_err(|_| format!("Invalid rows value: {}", value))?;
            }
            _ => {
                log::warn!("dummy: Unknown option: {}={}", key, value);
            }
        }
    }

    if config.cols == 0 || config.cols > LINE_LEN {
        return Err(format!("cols must be 1-{}", LINE_LEN));
    }
    if config.rows == 0 || config.rows as usize > ROW_OFFSETS.len() {
        return Err(format!("rows must be 1-{}", ROW_OFFSETS.len()));
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use boardtest_core::error::Error;
    use boardtest_core::lcd::{Lcd, LcdConfig};
    use std::fmt::Write as _;

    fn started() -> Lcd<DummyLcd> {
        let mut lcd = Lcd::new(DummyLcd::new_default(), LcdConfig::default());
        lcd.begin().unwrap();
        lcd
    }

    #[test]
    fn test_begin_switches_to_four_bit() {
        let lcd = started();
        let bus = lcd.bus();

        assert!(bus.is_four_bit());
        assert!(bus.backlight());
        assert_eq!(bus.function_set(), FunctionSet::TWO_LINE);
        assert_eq!(bus.display_control(), DisplayControl::DISPLAY_ON);
        assert_eq!(bus.entry_mode(), EntryMode::LEFT);
        assert_eq!(bus.address(), 0);
        assert_eq!(bus.screen(), vec![" ".repeat(16), " ".repeat(16)]);
    }

    #[test]
    fn test_begin_byte_stream() {
        let lcd = started();
        let history = lcd.bus().history();

        // Backlight only, then the three 8-bit nibbles and the 4-bit switch
        assert_eq!(
            &history[..13],
            &[
                0x08, // backlight
                0x38, 0x3C, 0x38, // 0x3
                0x38, 0x3C, 0x38, // 0x3
                0x38, 0x3C, 0x38, // 0x3
                0x28, 0x2C, 0x28, // 0x2
            ]
        );
        assert_eq!(
            lcd.bus().instructions(),
            &[0x30, 0x30, 0x30, 0x20, 0x28, 0x0C, 0x01, 0x06, 0x02]
        );
    }

    #[test]
    fn test_begin_waits_for_power_on() {
        let lcd = started();
        let ms = lcd.bus().total_delay_us() / 1000;
        let floor = POWER_ON_DELAY_MS
            + BACKLIGHT_SETTLE_MS
            + 3 * INIT_NIBBLE_DELAY_MS
            + 2 * SLOW_COMMAND_DELAY_MS;
        assert!(ms >= u64::from(floor));
    }

    #[test]
    fn test_write_text() {
        let mut lcd = started();
        lcd.write_str("deneme").unwrap();
        assert_eq!(lcd.bus().line(0), "deneme          ");
        assert_eq!(lcd.bus().address(), 6);
    }

    #[test]
    fn test_write_str_truncates_to_row() {
        let mut lcd = started();
        lcd.write_str("0123456789abcdefXYZ").unwrap();
        assert_eq!(lcd.bus().line(0), "0123456789abcdef");
        assert_eq!(lcd.bus().line(1), " ".repeat(16));
    }

    #[test]
    fn test_non_ascii_becomes_question_mark() {
        let mut lcd = started();
        lcd.write_str("güle").unwrap();
        assert_eq!(&lcd.bus().line(0)[..4], "g?le");
    }

    #[test]
    fn test_write_line_second_row() {
        let mut lcd = started();
        lcd.write_line(0, "top").unwrap();
        lcd.write_line(1, "bottom").unwrap();
        assert_eq!(
            lcd.bus().screen(),
            vec!["top             ".to_string(), "bottom          ".to_string()]
        );
    }

    #[test]
    fn test_set_cursor_clamps_row() {
        let mut lcd = started();
        lcd.set_cursor(3, 7).unwrap();
        assert_eq!(lcd.bus().address(), 0x43);
    }

    #[test]
    fn test_set_cursor_rejects_column() {
        let mut lcd = started();
        assert_eq!(
            lcd.set_cursor(16, 0),
            Err(Error::InvalidPosition { col: 16, row: 0 })
        );
    }

    #[test]
    fn test_cursor_and_blink() {
        let mut lcd = started();
        lcd.cursor().unwrap();
        lcd.blink().unwrap();
        let all = DisplayControl::DISPLAY_ON | DisplayControl::CURSOR_ON | DisplayControl::BLINK_ON;
        assert_eq!(lcd.bus().display_control(), all);
        assert_eq!(lcd.display_control(), all);

        lcd.no_cursor().unwrap();
        lcd.no_blink().unwrap();
        assert_eq!(lcd.bus().display_control(), DisplayControl::DISPLAY_ON);
    }

    #[test]
    fn test_no_display_blanks_but_keeps_ram() {
        let mut lcd = started();
        lcd.write_str("hi").unwrap();
        lcd.no_display().unwrap();
        assert_eq!(lcd.bus().line(0), " ".repeat(16));
        lcd.display().unwrap();
        assert_eq!(&lcd.bus().line(0)[..2], "hi");
    }

    #[test]
    fn test_clear_and_home() {
        let mut lcd = started();
        lcd.write_str("abc").unwrap();
        lcd.scroll_display_left().unwrap();
        lcd.home().unwrap();
        assert_eq!(lcd.bus().display_shift(), 0);
        assert_eq!(&lcd.bus().line(0)[..3], "abc");

        lcd.clear().unwrap();
        assert_eq!(lcd.bus().line(0), " ".repeat(16));
        assert_eq!(lcd.bus().address(), 0);
    }

    #[test]
    fn test_scroll_display() {
        let mut lcd = started();
        lcd.write_str("abc").unwrap();

        lcd.scroll_display_left().unwrap();
        assert_eq!(&lcd.bus().line(0)[..2], "bc");

        lcd.scroll_display_right().unwrap();
        lcd.scroll_display_right().unwrap();
        assert_eq!(&lcd.bus().line(0)[..4], " abc");
    }

    #[test]
    fn test_right_to_left() {
        let mut lcd = started();
        lcd.set_cursor(5, 0).unwrap();
        lcd.right_to_left().unwrap();
        lcd.write_str("ab").unwrap();
        assert_eq!(&lcd.bus().line(0)[..6], "    ba");
        assert!(!lcd.entry_mode().contains(EntryMode::LEFT));

        lcd.left_to_right().unwrap();
        assert_eq!(lcd.bus().entry_mode(), EntryMode::LEFT);
    }

    #[test]
    fn test_autoscroll_shifts_display() {
        let mut lcd = started();
        lcd.autoscroll().unwrap();
        lcd.write_str("xy").unwrap();
        assert_eq!(lcd.bus().display_shift(), 2);
        assert_eq!(
            lcd.bus().entry_mode(),
            EntryMode::LEFT | EntryMode::SHIFT_INCREMENT
        );

        lcd.no_autoscroll().unwrap();
        assert_eq!(lcd.bus().entry_mode(), EntryMode::LEFT);
    }

    #[test]
    fn test_create_char() {
        let mut lcd = started();
        let heart = [0x00, 0x0A, 0x1F, 0x1F, 0x0E, 0x04, 0x00, 0x00];
        lcd.create_char(9, &heart).unwrap(); // masked to 1
        assert_eq!(lcd.bus().glyph(1), heart);

        lcd.set_cursor(0, 0).unwrap();
        lcd.write_char(1).unwrap();
        assert_eq!(lcd.bus().line(0).chars().next(), Some('#'));
    }

    #[test]
    fn test_backlight_toggle() {
        let mut lcd = started();
        lcd.no_backlight().unwrap();
        assert!(!lcd.bus().backlight());
        assert_eq!(lcd.bus().history().last(), Some(&0x00));

        // Subsequent writes keep the backlight off
        lcd.write_char(b'a').unwrap();
        assert!(!lcd.bus().backlight());

        lcd.set_backlight(true).unwrap();
        assert!(lcd.bus().backlight());
        assert_eq!(lcd.bus().history().last(), Some(&0x08));
    }

    #[test]
    fn test_fmt_write() {
        let mut lcd = started();
        write!(lcd, "T={}C", 21).unwrap();
        assert_eq!(&lcd.bus().line(0)[..5], "T=21C");
    }

    #[test]
    fn test_invalid_geometry() {
        let mut lcd = Lcd::new(DummyLcd::new_default(), LcdConfig::new(16, 0));
        assert_eq!(lcd.begin(), Err(Error::InvalidGeometry));
        assert!(lcd.bus().history().is_empty());
    }

    #[test]
    fn test_single_line_tall_font() {
        let config = DummyConfig { cols: 8, rows: 1 };
        let mut lcd = Lcd::new(
            DummyLcd::new(config),
            LcdConfig::new(8, 1).with_tall_font(true),
        );
        lcd.begin().unwrap();
        assert_eq!(lcd.bus().function_set(), FunctionSet::DOTS_5X10);
        lcd.write_line(3, "one").unwrap();
        assert_eq!(lcd.bus().line(0), "one     ");
    }

    #[test]
    fn test_four_row_offsets() {
        let config = DummyConfig { cols: 20, rows: 4 };
        let mut lcd = Lcd::new(DummyLcd::new(config), LcdConfig::new(20, 4));
        lcd.begin().unwrap();
        lcd.write_line(2, "third").unwrap();
        lcd.write_line(3, "fourth").unwrap();
        assert_eq!(lcd.bus().line(2).trim_end(), "third");
        assert_eq!(lcd.bus().line(3).trim_end(), "fourth");
    }

    #[test]
    fn test_parse_options() {
        let options = [("cols", "20"), ("rows", "4")];
        let config = parse_options(&options, DummyConfig::default()).unwrap();
        assert_eq!((config.cols, config.rows), (20, 4));

        assert!(parse_options(&[("rows", "5")], DummyConfig::default()).is_err());
        assert!(parse_options(&[("cols", "wide")], DummyConfig::default()).is_err());

        // Unset keys fall back to the base geometry
        let config = parse_options(&[("rows", "1")], DummyConfig::new(20, 4)).unwrap();
        assert_eq!((config.cols, config.rows), (20, 1));
    }

    #[test]
    fn test_out_of_range_geometry_is_clamped() {
        let lcd = DummyLcd::new(DummyConfig::new(80, 5));
        assert_eq!((lcd.config().cols, lcd.config().rows), (40, 4));
        assert_eq!(lcd.line(4).len(), 40);
        assert_eq!(lcd.screen().len(), 4);

        let lcd = DummyLcd::new(DummyConfig::new(0, 0));
        assert_eq!((lcd.config().cols, lcd.config().rows), (1, 1));
        assert_eq!(lcd.screen(), vec![" ".to_string()]);
    }
}
