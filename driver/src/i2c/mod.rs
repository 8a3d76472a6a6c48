//! I2C transport used to reach the GPIO expander.
//!
//! The driver only ever writes, one byte per transaction, so the trait mirrors a
//! begin/write/end transmission rather than a general read/write bus.
mod linux;

#[cfg(test)]
pub mod test_spy;

use crate::LcdResult;
pub use linux::*;
use std::fmt::Debug;

pub trait I2cBus: Debug {
    /// Prepares the bus for talking to the device at `address`.
    ///
    /// Called once by the display driver before its first transaction.
    fn open(&mut self, address: u8) -> LcdResult<()>;

    /// Starts a write transaction addressed to the 7-bit `address`.
    fn begin_transaction(&mut self, address: u8) -> LcdResult<()>;

    /// Queues a byte into the current transaction.
    ///
    /// # Errors
    /// - `LcdError::NoTransaction` if no transaction was begun.
    fn write_byte(&mut self, byte: u8) -> LcdResult<()>;

    /// Finishes the current transaction, putting the queued bytes on the wire.
    fn end_transaction(&mut self) -> LcdResult<()>;

    /// Writes `bytes` to `address` as one complete transaction.
    fn write(&mut self, address: u8, bytes: &[u8]) -> LcdResult<()> {
        self.begin_transaction(address)?;
        for &byte in bytes {
            self.write_byte(byte)?;
        }
        self.end_transaction()
    }
}

impl<B: I2cBus + ?Sized> I2cBus for &mut B {
    fn open(&mut self, address: u8) -> LcdResult<()> {
        (**self).open(address)
    }

    fn begin_transaction(&mut self, address: u8) -> LcdResult<()> {
        (**self).begin_transaction(address)
    }

    fn write_byte(&mut self, byte: u8) -> LcdResult<()> {
        (**self).write_byte(byte)
    }

    fn end_transaction(&mut self) -> LcdResult<()> {
        (**self).end_transaction()
    }
}
