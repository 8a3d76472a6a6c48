//! [I2cBus] implementation on top of the Linux `i2c-dev` interface.
use crate::i2c::I2cBus;
use crate::{LcdError, LcdResult};
use i2cdev::core::I2CDevice;
use i2cdev::linux::{LinuxI2CDevice, LinuxI2CError};
use log::{debug, trace};
use std::fmt::{Debug, Formatter};

impl From<LinuxI2CError> for LcdError {
    fn from(err: LinuxI2CError) -> Self {
        LcdError::Transfer(err.to_string())
    }
}

/// An I2C adapter exposed as `/dev/i2c-<adapter>`.
///
/// Bytes written between [I2cBus::begin_transaction] and [I2cBus::end_transaction] are buffered
/// and sent in a single `write` when the transaction ends.
pub struct LinuxI2cBus {
    adapter: u8,
    device: Option<(u8, LinuxI2CDevice)>,
    transaction: Option<Vec<u8>>,
}

impl LinuxI2cBus {
    /// The adapter wired to the header I2C pins on a Raspberry Pi.
    pub const DEFAULT_ADAPTER: u8 = 1;

    pub fn new(adapter: u8) -> Self {
        LinuxI2cBus {
            adapter,
            device: None,
            transaction: None,
        }
    }

    pub fn adapter(&self) -> u8 {
        self.adapter
    }

    pub fn path(&self) -> String {
        format!("/dev/i2c-{}", self.adapter)
    }
}

impl Default for LinuxI2cBus {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ADAPTER)
    }
}

impl Debug for LinuxI2cBus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.device {
            Some((address, _)) => write!(f, "LinuxI2cBus({} @ {:#04x})", self.path(), address),
            None => write!(f, "LinuxI2cBus({}, closed)", self.path()),
        }
    }
}

impl I2cBus for LinuxI2cBus {
    fn open(&mut self, address: u8) -> LcdResult<()> {
        if matches!(&self.device, Some((open, _)) if *open == address) {
            return Ok(());
        }

        let path = self.path();
        let device = LinuxI2CDevice::new(&path, address as u16)
            .map_err(|err| LcdError::BusUnavailable(format!("{}: {}", path, err)))?;
        debug!("Opened {} for device {:#04x}", path, address);
        self.device = Some((address, device));
        Ok(())
    }

    fn begin_transaction(&mut self, address: u8) -> LcdResult<()> {
        self.open(address)?;
        self.transaction = Some(Vec::with_capacity(1));
        Ok(())
    }

    fn write_byte(&mut self, byte: u8) -> LcdResult<()> {
        self.transaction
            .as_mut()
            .ok_or(LcdError::NoTransaction)?
            .push(byte);
        Ok(())
    }

    fn end_transaction(&mut self) -> LcdResult<()> {
        let bytes = self.transaction.take().ok_or(LcdError::NoTransaction)?;
        let (_, device) = self.device.as_mut().ok_or(LcdError::NoTransaction)?;
        if bytes.is_empty() {
            trace!("Empty transaction, nothing to send");
            return Ok(());
        }
        device.write(&bytes)?;
        Ok(())
    }
}
