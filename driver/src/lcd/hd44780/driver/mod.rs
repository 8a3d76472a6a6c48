mod i2c;
mod pcf8574;

use crate::{LcdError, LcdResult};
pub use i2c::*;
pub use pcf8574::*;
use std::fmt::Debug;

/// Instruction opcodes and their flag bits.
pub mod consts {
    pub const CLEAR_DISPLAY: u8 = 0b00000001;
    pub const RETURN_HOME: u8 = 0b00000010;
    pub const ENTRY_MODE_SET: u8 = 0b00000100;
    pub const DISPLAY_CONTROL: u8 = 0b00001000;
    pub const CURSOR_SHIFT: u8 = 0b00010000;
    pub const FUNCTION_SET: u8 = 0b00100000;
    pub const SET_CGRAM_ADDRESS: u8 = 0b01000000;
    pub const SET_DDRAM_ADDRESS: u8 = 0b10000000;

    // Entry mode set
    pub const ENTRY_INCREMENT: u8 = 0b00000010;
    pub const ENTRY_SHIFT: u8 = 0b00000001;

    // Display control
    pub const DISPLAY_ON: u8 = 0b00000100;
    pub const CURSOR_ON: u8 = 0b00000010;
    pub const BLINK_ON: u8 = 0b00000001;

    // Cursor/display shift
    pub const DISPLAY_MOVE: u8 = 0b00001000;
    pub const MOVE_RIGHT: u8 = 0b00000100;

    // Function set
    pub const EIGHT_BIT_MODE: u8 = 0b00010000;
    pub const TWO_LINES: u8 = 0b00001000;
    pub const FONT_5X10: u8 = 0b00000100;

    /// DDRAM address of the first column of each row.
    pub const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

    /// Number of CGRAM glyph slots.
    pub const CGRAM_SLOTS: u8 = 8;
}

use consts::*;

/// Raw HD44780 instruction set, built on [HD44780Driver::send_command] and
/// [HD44780Driver::send_data].
pub trait HD44780Driver: Debug {
    /// Runs the power-on initialization sequence.
    fn init(&mut self) -> LcdResult<()>;

    /// Clears the display and sets the cursor to the home position.
    ///
    /// Returns once the controller has finished, which takes far longer than other instructions.
    fn clear_display(&mut self) -> LcdResult<()>;

    /// Sets the cursor to the home position. Takes as long as [HD44780Driver::clear_display].
    fn return_home(&mut self) -> LcdResult<()>;

    /// Sets the display to the specified entry mode.
    fn set_entry_mode(&mut self, cursor_direction: CursorDirection, shift: bool) -> LcdResult<()> {
        let mut command = ENTRY_MODE_SET;
        if cursor_direction == CursorDirection::Right {
            command |= ENTRY_INCREMENT;
        }
        if shift {
            command |= ENTRY_SHIFT;
        }
        self.send_command(command)
    }

    /// Sets the display on/off, cursor on/off, and blinking on/off.
    fn set_display_control(
        &mut self,
        display_on: bool,
        cursor_on: bool,
        blink_on: bool,
    ) -> LcdResult<()> {
        let mut command = DISPLAY_CONTROL;
        if display_on {
            command |= DISPLAY_ON;
        }
        if cursor_on {
            command |= CURSOR_ON;
        }
        if blink_on {
            command |= BLINK_ON;
        }
        self.send_command(command)
    }

    /// Moves the cursor or shifts the display.
    fn cursor_shift(&mut self, display_shift: bool, direction: CursorDirection) -> LcdResult<()> {
        let mut command = CURSOR_SHIFT;
        if display_shift {
            command |= DISPLAY_MOVE;
        }
        if direction == CursorDirection::Right {
            command |= MOVE_RIGHT;
        }
        self.send_command(command)
    }

    /// Sets the function set.
    fn function_set(&mut self, data_length: bool, two_lines: bool, font: bool) -> LcdResult<()> {
        let mut command = FUNCTION_SET;
        if data_length {
            command |= EIGHT_BIT_MODE;
        }
        if two_lines {
            command |= TWO_LINES;
        }
        if font {
            command |= FONT_5X10;
        }
        self.send_command(command)
    }

    /// Sets the CGRAM address.
    fn set_cgram_address(&mut self, address: u8) -> LcdResult<()> {
        if address > 0b00111111 {
            return Err(LcdError::InvalidArgument);
        }
        self.send_command(SET_CGRAM_ADDRESS | address)
    }

    /// Sets the DDRAM address.
    ///
    /// Addresses past the last cell are not checked; what they show depends on the module.
    fn set_ddram_address(&mut self, address: u8) -> LcdResult<()> {
        self.send_command(SET_DDRAM_ADDRESS | address)
    }

    // Low-level commands
    // These raw commands are used by the high-level functions above.
    // They are not meant to be used directly, but implemented by the driver implementation.

    /// Sends a command to the HD44780 controller.
    /// Sets the RS pin to 0 (command).
    fn send_command(&mut self, command: u8) -> LcdResult<()>;

    /// Sends data to the HD44780 controller.
    /// Sets the RS pin to 1 (data).
    fn send_data(&mut self, data: u8) -> LcdResult<()>;
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CursorDirection {
    /// Moves the cursor to the left after writing data.
    Left,
    /// Moves the cursor to the right after writing data.
    Right,
}

/// Character cell height. The taller font exists only on single-line displays.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum CharSize {
    #[default]
    Dots5x8,
    Dots5x10,
}
