//! A bus and delay for use in unit tests, recording everything into one shared log.
use crate::delay::Delay;
use crate::i2c::I2cBus;
use crate::{LcdError, LcdResult};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Event {
    Open(u8),
    /// A finished transaction: device address and the single byte it carried.
    Write(u8, u8),
    DelayUs(u32),
}

#[derive(Debug, Clone, Default)]
pub struct TestSpy {
    log: Rc<RefCell<Vec<Event>>>,
    transaction: Rc<RefCell<Option<(u8, Vec<u8>)>>>,
    failing: Rc<Cell<bool>>,
}

impl TestSpy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.log.borrow().clone()
    }

    /// Bytes of all finished transactions, in order.
    pub fn written(&self) -> Vec<u8> {
        self.log
            .borrow()
            .iter()
            .filter_map(|event| match event {
                Event::Write(_, byte) => Some(*byte),
                _ => None,
            })
            .collect()
    }

    /// Nibble transactions as the controller sees them: the byte present while Enable falls.
    pub fn latched(&self) -> Vec<u8> {
        let written = self.written();
        written
            .windows(2)
            .filter(|pair| pair[0] & 0b0100 != 0 && pair[1] & 0b0100 == 0)
            .map(|pair| pair[1])
            .collect()
    }

    /// Full bytes reassembled from pairs of latched nibbles, with the RS bit of the first one.
    pub fn sent(&self) -> Vec<(u8, bool)> {
        self.latched()
            .chunks(2)
            .filter(|pair| pair.len() == 2)
            .map(|pair| ((pair[0] & 0xF0) | (pair[1] >> 4), pair[0] & 0b0001 != 0))
            .collect()
    }

    /// Makes every following transaction fail to complete, as a missing device would.
    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }
}

impl I2cBus for TestSpy {
    fn open(&mut self, address: u8) -> LcdResult<()> {
        self.log.borrow_mut().push(Event::Open(address));
        Ok(())
    }

    fn begin_transaction(&mut self, address: u8) -> LcdResult<()> {
        *self.transaction.borrow_mut() = Some((address, Vec::new()));
        Ok(())
    }

    fn write_byte(&mut self, byte: u8) -> LcdResult<()> {
        match self.transaction.borrow_mut().as_mut() {
            Some((_, bytes)) => {
                bytes.push(byte);
                Ok(())
            }
            None => Err(LcdError::NoTransaction),
        }
    }

    fn end_transaction(&mut self) -> LcdResult<()> {
        let (address, bytes) = self
            .transaction
            .borrow_mut()
            .take()
            .ok_or(LcdError::NoTransaction)?;
        if self.failing.get() {
            return Err(LcdError::Transfer(format!("no ACK from {:#04x}", address)));
        }
        assert_eq!(bytes.len(), 1, "expander writes carry exactly one byte");
        self.log.borrow_mut().push(Event::Write(address, bytes[0]));
        Ok(())
    }
}

impl Delay for TestSpy {
    fn delay_us(&mut self, us: u32) {
        self.log.borrow_mut().push(Event::DelayUs(us));
    }
}
