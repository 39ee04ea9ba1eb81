//! Status register flags and expander pin assignments

use bitflags::bitflags;

bitflags! {
    /// Expander output lines as wired on common PCF8574 LCD backpacks
    ///
    /// D4..D7 of the display sit on P4..P7, so a data nibble is always
    /// carried in the upper half of the expander byte.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Pins: u8 {
        /// Register select: 0 = instruction, 1 = data
        const RS        = 1 << 0;
        /// Read/write: always 0 here, the driver never reads
        const RW        = 1 << 1;
        /// Enable strobe, latched on the falling edge
        const EN        = 1 << 2;
        /// Backlight transistor
        const BACKLIGHT = 1 << 3;
        /// Data lines D4..D7
        const DATA      = 0xF0;
    }
}

bitflags! {
    /// Entry mode set flags (OR'd with `ENTRY_MODE_SET`)
    ///
    /// The empty set means right-to-left with no display shift.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EntryMode: u8 {
        /// Shift the display on every write (autoscroll)
        const SHIFT_INCREMENT = 0x01;
        /// Cursor moves left-to-right (address increments)
        const LEFT            = 0x02;
    }
}

bitflags! {
    /// Display on/off control flags (OR'd with `DISPLAY_CONTROL`)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DisplayControl: u8 {
        /// Blinking block at the cursor position
        const BLINK_ON   = 0x01;
        /// Underline cursor visible
        const CURSOR_ON  = 0x02;
        /// Display on
        const DISPLAY_ON = 0x04;
    }
}

bitflags! {
    /// Cursor/display shift flags (OR'd with `CURSOR_SHIFT`)
    ///
    /// The empty set moves the cursor to the left.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ShiftFlags: u8 {
        /// Shift to the right instead of the left
        const MOVE_RIGHT   = 0x04;
        /// Shift the whole display instead of the cursor
        const DISPLAY_MOVE = 0x08;
    }
}

bitflags! {
    /// Function set flags (OR'd with `FUNCTION_SET`)
    ///
    /// The empty set is 4-bit, 1-line, 5x8 dots.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FunctionSet: u8 {
        /// 5x10 dot font (only valid with one line)
        const DOTS_5X10 = 0x04;
        /// Two display lines
        const TWO_LINE  = 0x08;
        /// 8-bit interface
        const EIGHT_BIT = 0x10;
    }
}

/// Backlight state, carried on every expander write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backlight {
    /// Backlight off
    Off,
    /// Backlight on
    #[default]
    On,
}

impl Backlight {
    /// Expander bits for this state
    pub fn bits(self) -> u8 {
        match self {
            Self::On => Pins::BACKLIGHT.bits(),
            Self::Off => 0,
        }
    }
}

impl From<bool> for Backlight {
    fn from(on: bool) -> Self {
        if on {
            Self::On
        } else {
            Self::Off
        }
    }
}
