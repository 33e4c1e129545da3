//! Register reads through the Linux `i2c-dev` interface.
use std::path::PathBuf;

use i2cdev::core::I2CDevice;
use i2cdev::linux::{LinuxI2CDevice, LinuxI2CError};

use crate::bus::{RegisterBus, WordOrder};
use crate::error::{Error, TransportError, TransportErrorKind};

/// An open `/dev/i2c-N` bus.
///
/// Reads use the kernel's SMBus "read byte data" and "read word data" calls.
/// The target address is switched on demand, so one handle can read from any
/// device on the bus.
pub struct LinuxBus {
    device: LinuxI2CDevice,
    target: u8,
    word_order: WordOrder,
}

impl LinuxBus {
    /// Open bus number `bus`, initially addressing `device`.
    ///
    /// # Errors
    ///
    /// [`Error::BusOpen`] if the character device cannot be opened or the
    /// target address cannot be set, commonly because the `i2c-dev` module is
    /// not loaded or the user lacks permission.
    pub fn open(bus: u8, device: u8, word_order: WordOrder) -> Result<Self, Error> {
        let path = bus_path(bus);
        log::debug!("opening {} for device {device:#04X}", path.display());
        match LinuxI2CDevice::new(&path, device.into()) {
            Ok(handle) => Ok(Self {
                device: handle,
                target: device,
                word_order,
            }),
            Err(e) => Err(Error::BusOpen {
                path,
                source: transport_error(e),
            }),
        }
    }

    fn select(&mut self, device: u8) -> Result<(), TransportError> {
        if self.target != device {
            self.device
                .set_slave_address(device.into())
                .map_err(transport_error)?;
            self.target = device;
        }
        Ok(())
    }
}

impl std::fmt::Debug for LinuxBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinuxBus")
            .field("target", &self.target)
            .field("word_order", &self.word_order)
            .finish_non_exhaustive()
    }
}

impl RegisterBus for LinuxBus {
    fn read_byte(&mut self, device: u8, register: u8) -> Result<u8, TransportError> {
        self.select(device)?;
        self.device
            .smbus_read_byte_data(register)
            .map_err(transport_error)
    }

    fn read_word(&mut self, device: u8, register: u8) -> Result<u16, TransportError> {
        self.select(device)?;
        let word = self
            .device
            .smbus_read_word_data(register)
            .map_err(transport_error)?;
        Ok(decode_smbus_word(word, self.word_order))
    }
}

/// Path of the character device for bus number `bus`.
pub fn bus_path(bus: u8) -> PathBuf {
    PathBuf::from(format!("/dev/i2c-{bus}"))
}

/// Reorder a word the kernel assembled from SMBus (LSB-first) order.
fn decode_smbus_word(raw: u16, order: WordOrder) -> u16 {
    order.decode(raw.to_le_bytes())
}

fn transport_error(e: LinuxI2CError) -> TransportError {
    let errno = match &e {
        LinuxI2CError::Errno(errno) => Some(*errno),
        LinuxI2CError::Io(io) => io.raw_os_error(),
    };
    TransportError::new(errno.map_or(TransportErrorKind::Other, errno_kind), e)
}

/// Fault codes as documented for Linux I2C bus drivers.
fn errno_kind(errno: i32) -> TransportErrorKind {
    match errno {
        libc::ENXIO | libc::EREMOTEIO => TransportErrorKind::NoAcknowledge,
        libc::EAGAIN => TransportErrorKind::ArbitrationLoss,
        libc::EPROTO | libc::EBADMSG => TransportErrorKind::Bus,
        _ => TransportErrorKind::Other,
    }
}
