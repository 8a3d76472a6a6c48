use crate::delay::Delay;
use crate::i2c::I2cBus;
use crate::lcd::CharacterDisplay;
use crate::lcd::hd44780::driver::consts::*;
use crate::lcd::hd44780::driver::{
    CharSize, CursorDirection, HD44780Driver, PIN_E, PIN_RS, Pcf8574Backpack,
};
use crate::{LcdError, LcdResult};
use log::{debug, trace, warn};
use std::fmt;

/// HD44780 driver talking 4-bit mode through a [Pcf8574Backpack].
///
/// Configure the address, resolution and font first, then call [CharacterDisplay::begin] once.
/// Every other method assumes the display was initialized.
///
/// The display control and entry mode bytes are cached, so toggling a single flag (e.g.
/// [I2cHD44780Driver::cursor]) re-sends the whole instruction. Raw [HD44780Driver] calls bypass
/// the cache.
#[derive(Debug)]
pub struct I2cHD44780Driver<B: I2cBus, D: Delay> {
    expander: Pcf8574Backpack<B>,
    delay: D,
    cols: u8,
    rows: u8,
    char_size: CharSize,
    display_function: u8,
    display_control: u8,
    display_mode: u8,
}

impl<B: I2cBus, D: Delay> I2cHD44780Driver<B, D> {
    /// Creates a driver for a 16x2 display at [Pcf8574Backpack::DEFAULT_ADDRESS], backlight off.
    pub fn new(bus: B, delay: D) -> Self {
        I2cHD44780Driver {
            expander: Pcf8574Backpack::new(bus, Pcf8574Backpack::<B>::DEFAULT_ADDRESS),
            delay,
            cols: 16,
            rows: 2,
            char_size: CharSize::default(),
            display_function: 0,
            display_control: 0,
            display_mode: 0,
        }
    }

    /// Sets the backlight state written by the first bus contact in [CharacterDisplay::begin].
    pub fn with_backlight(mut self, on: bool) -> Self {
        self.expander.set_backlight(on);
        self
    }

    pub fn set_address(&mut self, address: u8) {
        self.expander.set_address(address);
    }

    /// Sets the display geometry.
    ///
    /// # Errors
    /// - `LcdError::InvalidArgument` if `rows` is not 1 to 4.
    pub fn set_resolution(&mut self, cols: u8, rows: u8) -> LcdResult<()> {
        if rows == 0 || rows as usize > ROW_OFFSETS.len() {
            return Err(LcdError::InvalidArgument);
        }
        self.cols = cols;
        self.rows = rows;
        Ok(())
    }

    /// Selects the font. [CharSize::Dots5x10] only takes effect on single-row displays.
    pub fn set_char_size(&mut self, char_size: CharSize) {
        self.char_size = char_size;
    }

    pub fn address(&self) -> u8 {
        self.expander.address()
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn backlight(&self) -> bool {
        self.expander.backlight()
    }

    /// Turns the display on or off. The contents are kept either way.
    pub fn display(&mut self, on: bool) -> LcdResult<()> {
        self.update_display_control(DISPLAY_ON, on)
    }

    /// Shows or hides the underline cursor.
    pub fn cursor(&mut self, on: bool) -> LcdResult<()> {
        self.update_display_control(CURSOR_ON, on)
    }

    /// Turns blinking of the cursor cell on or off.
    pub fn blink(&mut self, on: bool) -> LcdResult<()> {
        self.update_display_control(BLINK_ON, on)
    }

    /// Shifts the whole display one position to the left, without changing DDRAM.
    pub fn scroll_display_left(&mut self) -> LcdResult<()> {
        self.cursor_shift(true, CursorDirection::Left)
    }

    /// Shifts the whole display one position to the right, without changing DDRAM.
    pub fn scroll_display_right(&mut self) -> LcdResult<()> {
        self.cursor_shift(true, CursorDirection::Right)
    }

    /// Text flows left to right: the cursor moves right after each character.
    pub fn left_to_right(&mut self) -> LcdResult<()> {
        self.update_entry_mode(ENTRY_INCREMENT, true)
    }

    /// Text flows right to left: the cursor moves left after each character.
    pub fn right_to_left(&mut self) -> LcdResult<()> {
        self.update_entry_mode(ENTRY_INCREMENT, false)
    }

    /// With autoscroll on, the display shifts on each character instead of the cursor moving.
    pub fn autoscroll(&mut self, on: bool) -> LcdResult<()> {
        self.update_entry_mode(ENTRY_SHIFT, on)
    }

    pub fn into_inner(self) -> (B, D) {
        (self.expander.into_inner(), self.delay)
    }

    fn update_display_control(&mut self, flag: u8, on: bool) -> LcdResult<()> {
        let control = set_flag(self.display_control, flag, on);
        self.display_control = control;
        self.set_display_control(
            control & DISPLAY_ON != 0,
            control & CURSOR_ON != 0,
            control & BLINK_ON != 0,
        )
    }

    fn update_entry_mode(&mut self, flag: u8, on: bool) -> LcdResult<()> {
        let mode = set_flag(self.display_mode, flag, on);
        self.display_mode = mode;
        let direction = if mode & ENTRY_INCREMENT != 0 {
            CursorDirection::Right
        } else {
            CursorDirection::Left
        };
        self.set_entry_mode(direction, mode & ENTRY_SHIFT != 0)
    }

    /// Function set flags for the configured geometry: 4-bit bus, two lines for anything taller
    /// than one row, and the tall font only when asked for on a single-row display.
    fn function_flags(&self) -> u8 {
        let mut flags = 0;
        if self.rows > 1 {
            flags |= TWO_LINES;
        }
        if self.char_size == CharSize::Dots5x10 && self.rows == 1 {
            flags |= FONT_5X10;
        }
        flags
    }

    fn pulse_enable(&mut self, data: u8) -> LcdResult<()> {
        self.expander.write(data | PIN_E)?;
        // Enable pulse must be >450 ns
        self.delay.delay_us(1);
        self.expander.write(data & !PIN_E)?;
        // Commands need >37 us to settle
        self.delay.delay_us(50);
        Ok(())
    }

    fn write_4bits(&mut self, nibble: u8) -> LcdResult<()> {
        self.expander.write(nibble)?;
        self.pulse_enable(nibble)
    }

    fn send(&mut self, value: u8, mode: u8) -> LcdResult<()> {
        trace!("Sending data: {:08b}, mode: {:08b}", value, mode);
        let high_nibble = value & 0xF0;
        let low_nibble = (value << 4) & 0xF0;
        self.write_4bits(high_nibble | mode)?;
        self.write_4bits(low_nibble | mode)
    }
}

fn set_flag(bits: u8, flag: u8, on: bool) -> u8 {
    if on { bits | flag } else { bits & !flag }
}

impl<B: I2cBus, D: Delay> HD44780Driver for I2cHD44780Driver<B, D> {
    fn init(&mut self) -> LcdResult<()> {
        debug!(
            "Initializing {}x{} display at {:#04x}",
            self.cols,
            self.rows,
            self.expander.address()
        );
        self.expander.open()?;
        self.display_function = self.function_flags();

        // At least 40 ms after Vcc rises above 2.7 V. A host restart does not reset the
        // controller, so this runs every time.
        self.delay.delay_ms(50);

        // RS and R/W low, backlight as preset
        let backlight = self.expander.compose(0);
        self.expander.write(backlight)?;
        self.delay.delay_ms(1000);

        // Whatever interface mode the controller is in, three "8-bit mode" nibbles put it in
        // 8-bit mode and the next one switches it to 4-bit.
        debug!("Forcing 4-bit interface");
        self.write_4bits(0x03 << 4)?;
        self.delay.delay_us(4500);
        self.write_4bits(0x03 << 4)?;
        self.delay.delay_us(4500);
        self.write_4bits(0x03 << 4)?;
        self.delay.delay_us(150);
        self.write_4bits(0x02 << 4)?;

        self.function_set(
            false,
            self.display_function & TWO_LINES != 0,
            self.display_function & FONT_5X10 != 0,
        )?;
        self.display_control = DISPLAY_ON;
        self.set_display_control(true, false, false)?;
        self.clear_display()?;
        self.display_mode = ENTRY_INCREMENT;
        self.set_entry_mode(CursorDirection::Right, false)?;
        self.set_cursor(0, 0)?;

        debug!("Display initialized");
        Ok(())
    }

    fn clear_display(&mut self) -> LcdResult<()> {
        self.send_command(CLEAR_DISPLAY)?;
        self.delay.delay_us(2000);
        Ok(())
    }

    fn return_home(&mut self) -> LcdResult<()> {
        self.send_command(RETURN_HOME)?;
        self.delay.delay_us(2000);
        Ok(())
    }

    fn send_command(&mut self, command: u8) -> LcdResult<()> {
        self.send(command, 0)
    }

    fn send_data(&mut self, data: u8) -> LcdResult<()> {
        self.send(data, PIN_RS)
    }
}

impl<B: I2cBus, D: Delay> CharacterDisplay for I2cHD44780Driver<B, D> {
    fn begin(&mut self) -> LcdResult<()> {
        self.init()
    }

    fn clear(&mut self) -> LcdResult<()> {
        self.clear_display()
    }

    fn home(&mut self) -> LcdResult<()> {
        self.return_home()
    }

    fn set_cursor(&mut self, col: u8, row: u8) -> LcdResult<()> {
        let row = row.min(self.rows.saturating_sub(1)) as usize;
        let row = row.min(ROW_OFFSETS.len() - 1);
        // Columns past the visible window are left to the controller
        self.set_ddram_address(ROW_OFFSETS[row].wrapping_add(col))
    }

    fn create_char(&mut self, location: u8, charmap: &[u8; 8]) -> LcdResult<()> {
        let location = location & (CGRAM_SLOTS - 1);
        self.set_cgram_address(location << 3)?;
        for &row in charmap {
            self.send_data(row)?;
        }
        Ok(())
    }

    fn set_backlight(&mut self, on: bool) -> LcdResult<()> {
        self.expander.set_backlight(on);
        self.expander.write(0)
    }

    fn write_byte(&mut self, byte: u8) -> LcdResult<()> {
        self.send_data(byte)
    }
}

impl<B: I2cBus, D: Delay> fmt::Write for I2cHD44780Driver<B, D> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.print(s).map(|_| ()).map_err(|err| {
            warn!("Failed to write {:?}: {}", s, err);
            fmt::Error
        })
    }
}
