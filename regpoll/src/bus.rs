//! Register reads over an I2C bus.
//!
//! The poller only needs two SMBus-style operations, "read byte data" and
//! "read word data", so that is all [`RegisterBus`] asks for. [`I2cBus`] provides
//! them on top of any [`embedded_hal`] I2C implementation.
use embedded_hal::i2c::{Error as _, I2c, SevenBitAddress};

use crate::error::TransportError;

/// Byte-level register access on a bus shared by one or more devices.
pub trait RegisterBus {
    /// Read the single byte at `register` on the device at `device`.
    fn read_byte(&mut self, device: u8, register: u8) -> Result<u8, TransportError>;

    /// Read the 16-bit word starting at `register` on the device at `device`.
    ///
    /// Byte order is a property of the bus implementation.
    fn read_word(&mut self, device: u8, register: u8) -> Result<u16, TransportError>;
}

impl<B: RegisterBus + ?Sized> RegisterBus for &mut B {
    fn read_byte(&mut self, device: u8, register: u8) -> Result<u8, TransportError> {
        (**self).read_byte(device, register)
    }

    fn read_word(&mut self, device: u8, register: u8) -> Result<u16, TransportError> {
        (**self).read_word(device, register)
    }
}

/// Order in which the two bytes of a word register arrive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WordOrder {
    /// Most significant byte first. The controller firmware sends words this way.
    #[default]
    BigEndian,
    /// Least significant byte first, as SMBus specifies.
    LittleEndian,
}

impl WordOrder {
    /// Combine two bytes in the order they were received.
    pub fn decode(self, bytes: [u8; 2]) -> u16 {
        match self {
            WordOrder::BigEndian => u16::from_be_bytes(bytes),
            WordOrder::LittleEndian => u16::from_le_bytes(bytes),
        }
    }
}

/// [`RegisterBus`] over an [`embedded_hal::i2c::I2c`] controller.
///
/// Each read is a single write-read: the register address is written, then
/// (after a repeated START) one or two bytes are read back.
#[derive(Debug)]
pub struct I2cBus<T> {
    i2c: T,
    word_order: WordOrder,
}

impl<T: I2c<SevenBitAddress>> I2cBus<T> {
    /// Wrap an I2C controller, decoding words in the given byte order.
    pub fn new(i2c: T, word_order: WordOrder) -> Self {
        Self { i2c, word_order }
    }

    /// Give back the I2C controller.
    pub fn into_inner(self) -> T {
        self.i2c
    }

    fn read_into(
        &mut self,
        device: u8,
        register: u8,
        buf: &mut [u8],
    ) -> Result<(), TransportError> {
        self.i2c
            .write_read(device, &[register], buf)
            .map_err(|e| TransportError::new(e.kind().into(), format!("{e:?}")))
    }
}

impl<T: I2c<SevenBitAddress>> RegisterBus for I2cBus<T> {
    fn read_byte(&mut self, device: u8, register: u8) -> Result<u8, TransportError> {
        let mut buf = [0u8; 1];
        self.read_into(device, register, &mut buf)?;
        Ok(buf[0])
    }

    fn read_word(&mut self, device: u8, register: u8) -> Result<u16, TransportError> {
        let mut buf = [0u8; 2];
        self.read_into(device, register, &mut buf)?;
        Ok(self.word_order.decode(buf))
    }
}
