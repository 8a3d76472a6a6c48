//! Driver for HD44780-family character LCDs wired through a PCF8574 I2C "backpack".
//!
//! The display is driven in 4-bit mode: every instruction or data byte is split into two
//! nibbles, each of which is presented on the expander's upper four pins and latched by pulsing
//! the Enable line. See [lcd::hd44780::driver::I2cHD44780Driver] for the driver itself and
//! [lcd::CharacterDisplay] for the high-level interface.
pub mod delay;
pub mod i2c;
pub mod lcd;

use thiserror::Error;

#[derive(Debug, Error, Eq, PartialEq, Clone)]
pub enum LcdError {
    #[error("I2C bus unavailable: {0}")]
    BusUnavailable(String),
    #[error("I2C transfer failed: {0}")]
    Transfer(String),
    #[error("no I2C transaction in progress")]
    NoTransaction,
    #[error("invalid argument")]
    InvalidArgument,
}

pub type LcdResult<T> = Result<T, LcdError>;
