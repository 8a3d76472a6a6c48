//! HD44780 LCD module.
//!
//! The HD44780 is driven here in 4-bit mode through an I2C GPIO expander. Write-only: the R/W
//! line is held low and the busy flag is never polled, so every instruction is followed by a
//! fixed wait instead.

pub mod driver;
