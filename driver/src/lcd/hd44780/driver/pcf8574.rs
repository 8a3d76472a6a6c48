use crate::LcdResult;
use crate::i2c::I2cBus;
use log::trace;

/// Expander pin carrying the HD44780 RS (register select) line.
pub const PIN_RS: u8 = 0b00000001;
/// Expander pin carrying the HD44780 R/W line. Always low, the driver never reads.
pub const PIN_RW: u8 = 0b00000010;
/// Expander pin carrying the HD44780 E (enable) line.
pub const PIN_E: u8 = 0b00000100;
/// Expander pin switching the backlight transistor.
pub const PIN_BACKLIGHT: u8 = 0b00001000;

/// PCF8574 I2C GPIO expander wired as an HD44780 backpack.
///
/// Pins P4-P7 carry the data nibble and P0-P2 the control lines. P3 drives the backlight, and
/// since each write sets all eight pins at once the backlight bit is kept here and merged into
/// every byte. Each [Pcf8574Backpack::write] is exactly one I2C transaction.
#[derive(Debug)]
pub struct Pcf8574Backpack<B: I2cBus> {
    bus: B,
    address: u8,
    backlight: u8,
}

impl<B: I2cBus> Pcf8574Backpack<B> {
    /// Address of most PCF8574T backpacks with no address jumpers bridged.
    pub const DEFAULT_ADDRESS: u8 = 0x27;

    pub fn new(bus: B, address: u8) -> Self {
        Pcf8574Backpack {
            bus,
            address,
            backlight: 0,
        }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn set_address(&mut self, address: u8) {
        self.address = address;
    }

    pub fn backlight(&self) -> bool {
        self.backlight != 0
    }

    /// Changes the backlight bit used by subsequent writes. Does not write anything by itself.
    pub fn set_backlight(&mut self, on: bool) {
        self.backlight = if on { PIN_BACKLIGHT } else { 0 };
    }

    /// The byte that goes on the wire for `data`: the requested pins plus the backlight bit.
    pub fn compose(&self, data: u8) -> u8 {
        data | self.backlight
    }

    pub fn open(&mut self) -> LcdResult<()> {
        self.bus.open(self.address)
    }

    /// Sets all expander pins to `data` with the backlight bit merged in.
    pub fn write(&mut self, data: u8) -> LcdResult<()> {
        let byte = self.compose(data);
        trace!("Expander write: {:08b}", byte);
        self.bus.begin_transaction(self.address)?;
        self.bus.write_byte(byte)?;
        self.bus.end_transaction()
    }

    pub fn into_inner(self) -> B {
        self.bus
    }
}
