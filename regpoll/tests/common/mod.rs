//! Stub bus shared by the poller tests.
use std::collections::HashMap;

use regpoll::{CancelToken, RegisterBus, TransportError, TransportErrorKind};

/// Serves register values from a map and records every read.
#[derive(Debug, Default)]
pub struct StubBus {
    pub bytes: HashMap<u8, u8>,
    pub words: HashMap<u8, u16>,
    /// Register address that fails with a NACK.
    pub failing: Option<u8>,
    /// (device, register) of every read attempted, in order.
    pub reads: Vec<(u8, u8)>,
    /// Cancelled after this many reads.
    pub cancel_after: Option<(usize, CancelToken)>,
}

impl StubBus {
    pub fn with_byte(mut self, register: u8, value: u8) -> Self {
        self.bytes.insert(register, value);
        self
    }

    pub fn with_word(mut self, register: u8, value: u16) -> Self {
        self.words.insert(register, value);
        self
    }

    pub fn failing_at(mut self, register: u8) -> Self {
        self.failing = Some(register);
        self
    }

    fn record(&mut self, device: u8, register: u8) -> Result<(), TransportError> {
        self.reads.push((device, register));
        if let Some((after, token)) = &self.cancel_after {
            if self.reads.len() >= *after {
                token.cancel();
            }
        }
        match self.failing {
            Some(failing) if failing == register => Err(TransportError::new(
                TransportErrorKind::NoAcknowledge,
                "device did not acknowledge",
            )),
            _ => Ok(()),
        }
    }
}

impl RegisterBus for StubBus {
    fn read_byte(&mut self, device: u8, register: u8) -> Result<u8, TransportError> {
        self.record(device, register)?;
        Ok(self.bytes.get(&register).copied().unwrap_or_default())
    }

    fn read_word(&mut self, device: u8, register: u8) -> Result<u16, TransportError> {
        self.record(device, register)?;
        Ok(self.words.get(&register).copied().unwrap_or_default())
    }
}

/// Output as text, for comparing against expected readouts.
pub fn text(out: Vec<u8>) -> String {
    String::from_utf8(out).expect("readout is UTF-8")
}
