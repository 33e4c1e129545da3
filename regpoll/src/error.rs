use std::path::PathBuf;

use thiserror::Error;

/// Broad category of a failed bus transfer.
///
/// Bus implementations report their own error types; this is the common subset
/// the poller can say something useful about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// The device did not acknowledge its address or the data.
    ///
    /// This is what an absent or unpowered device looks like.
    NoAcknowledge,
    /// Bus error such as a misplaced START or STOP condition.
    Bus,
    /// The bus was lost to another controller.
    ArbitrationLoss,
    /// The controller could not keep up with the transfer.
    Overrun,
    /// Anything else, including timeouts and OS-level failures.
    Other,
}

impl From<embedded_hal::i2c::ErrorKind> for TransportErrorKind {
    fn from(kind: embedded_hal::i2c::ErrorKind) -> Self {
        use embedded_hal::i2c::ErrorKind;
        match kind {
            ErrorKind::NoAcknowledge(_) => TransportErrorKind::NoAcknowledge,
            ErrorKind::Bus => TransportErrorKind::Bus,
            ErrorKind::ArbitrationLoss => TransportErrorKind::ArbitrationLoss,
            ErrorKind::Overrun => TransportErrorKind::Overrun,
            _ => TransportErrorKind::Other,
        }
    }
}

/// A register read could not be completed.
///
/// This is the only failure a [`RegisterBus`] reports. The poller never retries
/// it.
///
/// [`RegisterBus`]: crate::bus::RegisterBus
#[derive(Debug, Error)]
#[error("{kind:?}")]
pub struct TransportError {
    kind: TransportErrorKind,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync + 'static>,
}

impl TransportError {
    /// Wrap a bus implementation's error.
    pub fn new<E>(kind: TransportErrorKind, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    {
        Self {
            kind,
            source: source.into(),
        }
    }

    /// Category of the failure.
    pub fn kind(&self) -> TransportErrorKind {
        self.kind
    }
}

/// Problems when polling registers.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading a register from the device failed.
    ///
    /// The pass in which this happened was abandoned at this register.
    #[error("failed to read {register} (register {address:#04X}) from device {device:#04X}")]
    RegisterRead {
        /// Name of the register from the table.
        register: String,
        /// Register address within the device.
        address: u8,
        /// 7-bit address of the device.
        device: u8,
        /// Underlying bus failure.
        #[source]
        source: TransportError,
    },
    /// Writing the readout to the terminal failed.
    #[error("failed to write register readout")]
    Output(#[from] std::io::Error),
    /// The poller configuration cannot be used.
    #[error("invalid poller configuration: {0}")]
    InvalidConfig(String),
    /// The I2C bus device could not be opened.
    #[error("failed to open I2C bus {}", path.display())]
    BusOpen {
        /// Path of the bus character device.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: TransportError,
    },
}
