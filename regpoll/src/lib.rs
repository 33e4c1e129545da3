#![doc = include_str!("../README.md")]
#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod bus;
mod cancel;
mod error;
mod format;
#[cfg(target_os = "linux")]
pub mod linux;
mod poller;
pub mod register;

pub use bus::{I2cBus, RegisterBus, WordOrder};
pub use cancel::CancelToken;
pub use error::{Error, TransportError, TransportErrorKind};
pub use format::{NAME_WIDTH, ValueFormat, format_line};
pub use poller::{DEFAULT_DEVICE_ADDRESS, DEFAULT_INTERVAL, PollerConfig, RegisterPoller};
pub use register::{Layout, ParseRegisterError, RegisterSpec, Width};
