//! HD44780 instruction codes
//!
//! Each instruction is the command byte below OR'd with the flag bits from
//! [`super::flags`].

// ============================================================================
// Instructions
// ============================================================================

/// Clear display and set DDRAM address to 0
pub const CLEAR_DISPLAY: u8 = 0x01;
/// Set DDRAM address to 0 and undo any display shift
pub const RETURN_HOME: u8 = 0x02;
/// Entry mode set (cursor direction, display shift on write)
pub const ENTRY_MODE_SET: u8 = 0x04;
/// Display on/off control (display, cursor, blink)
pub const DISPLAY_CONTROL: u8 = 0x08;
/// Cursor or display shift without changing DDRAM
pub const CURSOR_SHIFT: u8 = 0x10;
/// Function set (interface width, line count, font)
pub const FUNCTION_SET: u8 = 0x20;
/// Set CGRAM address
pub const SET_CGRAM_ADDR: u8 = 0x40;
/// Set DDRAM address
pub const SET_DDRAM_ADDR: u8 = 0x80;

// ============================================================================
// Initialization
// ============================================================================

/// Upper nibble sent three times to force 8-bit mode from any state
pub const INIT_8BIT_NIBBLE: u8 = 0x03 << 4;
/// Upper nibble that switches the interface to 4 bits
pub const INIT_4BIT_NIBBLE: u8 = 0x02 << 4;

// ============================================================================
// Timing (microseconds unless noted)
// ============================================================================

/// Time the enable line is held high
pub const ENABLE_PULSE_US: u32 = 1;
/// Settle time after enable falls; most instructions need 37 us
pub const COMMAND_SETTLE_US: u32 = 50;
/// Wait after power-on before the first write (ms)
pub const POWER_ON_DELAY_MS: u32 = 50;
/// Wait after switching the backlight on during init (ms)
pub const BACKLIGHT_SETTLE_MS: u32 = 1000;
/// Wait between the 8-bit init nibbles (ms)
pub const INIT_NIBBLE_DELAY_MS: u32 = 5;
/// Clear and return home are slow instructions (ms)
pub const SLOW_COMMAND_DELAY_MS: u32 = 2;
