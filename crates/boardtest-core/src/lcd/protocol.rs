//! HD44780 4-bit protocol through a port expander
//!
//! The expander gives us eight output lines and nothing else, so every
//! bus cycle of the LCD has to be built by hand:
//!
//! 1. put the nibble (plus RS and the backlight bit) on the lines
//! 2. raise EN, wait at least 450 ns
//! 3. drop EN, wait for the instruction to execute
//!
//! A full byte is two such cycles, high nibble first.

use crate::bus::ExpanderBus;
use crate::error::Result;
use crate::lcd::commands::{COMMAND_SETTLE_US, ENABLE_PULSE_US};
use crate::lcd::flags::{Backlight, Pins};

/// Register select for a byte sent with [`send`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Instruction register (RS = 0)
    Command,
    /// Data register (RS = 1)
    Data,
}

impl Mode {
    fn bits(self) -> u8 {
        match self {
            Self::Command => 0,
            Self::Data => Pins::RS.bits(),
        }
    }
}

/// Write one raw byte to the expander with the backlight bit applied
pub fn expander_write<B: ExpanderBus + ?Sized>(
    bus: &mut B,
    data: u8,
    backlight: Backlight,
) -> Result<()> {
    let byte = data | backlight.bits();
    log::trace!("lcd: expander <- 0x{:02X}", byte);
    bus.write_byte(byte)
}

/// Strobe the enable line so the controller latches the current nibble
pub fn pulse_enable<B: ExpanderBus + ?Sized>(
    bus: &mut B,
    data: u8,
    backlight: Backlight,
) -> Result<()> {
    expander_write(bus, data | Pins::EN.bits(), backlight)?;
    bus.delay_us(ENABLE_PULSE_US);
    expander_write(bus, data & !Pins::EN.bits(), backlight)?;
    bus.delay_us(COMMAND_SETTLE_US);
    Ok(())
}

/// Present a nibble (in bits 7..4 of `value`) and clock it in
pub fn write4bits<B: ExpanderBus + ?Sized>(
    bus: &mut B,
    value: u8,
    backlight: Backlight,
) -> Result<()> {
    expander_write(bus, value, backlight)?;
    pulse_enable(bus, value, backlight)
}

/// Send a full byte as two nibbles, high nibble first
pub fn send<B: ExpanderBus + ?Sized>(
    bus: &mut B,
    value: u8,
    mode: Mode,
    backlight: Backlight,
) -> Result<()> {
    let high = value & 0xF0;
    let low = (value << 4) & 0xF0;
    write4bits(bus, high | mode.bits(), backlight)?;
    write4bits(bus, low | mode.bits(), backlight)
}

/// Send an instruction byte
pub fn command<B: ExpanderBus + ?Sized>(
    bus: &mut B,
    value: u8,
    backlight: Backlight,
) -> Result<()> {
    send(bus, value, Mode::Command, backlight)
}

/// Send a data byte (character code or CGRAM row)
pub fn write_data<B: ExpanderBus + ?Sized>(
    bus: &mut B,
    value: u8,
    backlight: Backlight,
) -> Result<()> {
    send(bus, value, Mode::Data, backlight)
}
