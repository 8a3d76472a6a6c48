pub mod hd44780;

use crate::LcdResult;
use log::warn;
use std::fmt::Debug;

/// High-level interface of a character display: lifecycle, cursor placement, custom glyphs,
/// backlight and text output.
///
/// [CharacterDisplay::begin] must be called once before anything else. Nothing here checks
/// that it was.
pub trait CharacterDisplay: Debug {
    /// Brings the display from an unknown state into a known, cleared, ready state.
    fn begin(&mut self) -> LcdResult<()>;

    /// Removes all characters and moves the cursor to the first position.
    fn clear(&mut self) -> LcdResult<()>;

    /// Moves the cursor to the first position without clearing.
    fn home(&mut self) -> LcdResult<()>;

    /// Moves the cursor to column `col` of row `row`, both counted from 0.
    ///
    /// A row past the last one is clamped to the last row. Columns are not checked.
    fn set_cursor(&mut self, col: u8, row: u8) -> LcdResult<()>;

    /// Defines custom glyph `location` (masked to 0-7) from 8 rows of 5 pixels each.
    ///
    /// The glyph is then printed by writing the byte `location`.
    fn create_char(&mut self, location: u8, charmap: &[u8; 8]) -> LcdResult<()>;

    /// Turns the backlight on or off. The setting sticks to every later write.
    fn set_backlight(&mut self, on: bool) -> LcdResult<()>;

    /// Writes one byte of character data at the cursor.
    fn write_byte(&mut self, byte: u8) -> LcdResult<()>;

    /// Prints `s` at the cursor, one byte per character.
    ///
    /// Non-ASCII characters have no fixed place in the character ROM and are printed as `?`.
    /// Returns the number of bytes written.
    fn print(&mut self, s: &str) -> LcdResult<usize> {
        let mut written = 0;
        for c in s.chars() {
            if c.is_ascii() {
                self.write_byte(c as u8)?;
            } else {
                warn!("Non-ASCII character: {}", c);
                self.write_byte(b'?')?;
            }
            written += 1;
        }
        Ok(written)
    }
}
