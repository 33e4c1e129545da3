//! The register polling loop.
use std::io::Write;
use std::time::Duration;

use crossterm::cursor::MoveUp;
use crossterm::queue;

use crate::bus::RegisterBus;
use crate::cancel::CancelToken;
use crate::error::{Error, TransportError};
use crate::format::{ValueFormat, format_line};
use crate::register::{Layout, RegisterSpec, Width};

/// Address the controller answers on when nothing else is configured.
pub const DEFAULT_DEVICE_ADDRESS: u8 = 0x67;
/// Pause between passes.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);
/// Largest valid 7-bit I2C address.
const MAX_SEVEN_BIT_ADDRESS: u8 = 0x7F;

/// What to poll and how to show it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollerConfig {
    /// 7-bit address of the device to read.
    pub device_address: u8,
    /// Time to wait after each pass.
    pub interval: Duration,
    /// How values are printed.
    pub format: ValueFormat,
    /// Registers to read, in display order.
    pub registers: Vec<RegisterSpec>,
}

impl Default for PollerConfig {
    fn default() -> Self {
        let layout = Layout::default();
        Self {
            device_address: DEFAULT_DEVICE_ADDRESS,
            interval: DEFAULT_INTERVAL,
            format: layout.default_format(),
            registers: layout.registers(),
        }
    }
}

impl PollerConfig {
    fn validate(&self) -> Result<(), Error> {
        if self.registers.is_empty() {
            return Err(Error::InvalidConfig("register table is empty".into()));
        }
        if self.device_address > MAX_SEVEN_BIT_ADDRESS {
            return Err(Error::InvalidConfig(format!(
                "device address {:#04X} is not a 7-bit address",
                self.device_address
            )));
        }
        // The cursor has to move back over every line plus the trailing one.
        if u16::try_from(self.registers.len() + 1).is_err() {
            return Err(Error::InvalidConfig(format!(
                "{} registers will not fit on a terminal",
                self.registers.len()
            )));
        }
        Ok(())
    }
}

/// Reads a fixed table of registers and redraws them in place.
///
/// Each pass prints one `NAME: value` line per register, then moves the cursor
/// back up so the next pass overwrites it. On a terminal without ANSI cursor
/// control the passes simply scroll.
///
/// The poller owns the bus for as long as it lives.
#[derive(Debug)]
pub struct RegisterPoller<B, W> {
    bus: B,
    config: PollerConfig,
    out: W,
}

impl<B: RegisterBus, W: Write> RegisterPoller<B, W> {
    /// Create a poller that reads from `bus` and draws to `out`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfig`] if the register table is empty or too long, or the
    /// device address does not fit in 7 bits.
    pub fn new(bus: B, config: PollerConfig, out: W) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self { bus, config, out })
    }

    /// The configuration in use.
    pub fn config(&self) -> &PollerConfig {
        &self.config
    }

    /// Give back the bus and the output.
    pub fn into_inner(self) -> (B, W) {
        (self.bus, self.out)
    }

    /// Read and print every register once, then rewind the cursor.
    ///
    /// # Errors
    ///
    /// The first failed read ends the pass with [`Error::RegisterRead`]; later
    /// registers are not read. Lines already printed are left on screen.
    pub fn poll_once(&mut self) -> Result<(), Error> {
        let device = self.config.device_address;
        for spec in &self.config.registers {
            let value = match read_register(&mut self.bus, device, spec) {
                Ok(value) => value,
                Err(source) => {
                    log::debug!(
                        "reading {} at {:#04X} failed: {source}",
                        spec.name,
                        spec.address
                    );
                    // Keep the read failure even if the terminal is gone too.
                    if let Err(e) = self.out.flush() {
                        log::debug!("flushing partial readout failed: {e}");
                    }
                    return Err(Error::RegisterRead {
                        register: spec.name.clone(),
                        address: spec.address,
                        device,
                        source,
                    });
                }
            };
            log::trace!("{} = {value}", spec.name);
            writeln!(self.out, "{}", format_line(&spec.name, value, self.config.format))?;
        }
        // The newline after the cursor movement lands on the first register line.
        let lines = self.rewind_lines();
        queue!(self.out, MoveUp(lines))?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }

    /// Poll until `cancel` is triggered.
    ///
    /// The token is checked before every pass and wakes the interval wait, so
    /// cancellation takes effect without waiting out the interval. A pass that
    /// is in progress is finished first.
    ///
    /// # Errors
    ///
    /// Returns the first error from [`RegisterPoller::poll_once`]. Returns `Ok`
    /// only once cancelled.
    pub fn run(&mut self, cancel: &CancelToken) -> Result<(), Error> {
        let mut drawn = false;
        while !cancel.is_cancelled() {
            self.poll_once()?;
            drawn = true;
            if cancel.wait_timeout(self.config.interval) {
                break;
            }
        }
        log::debug!("polling cancelled");
        if drawn {
            self.finish()?;
        }
        Ok(())
    }

    /// Move the cursor below the last drawn pass so it stays visible.
    pub fn finish(&mut self) -> Result<(), Error> {
        // The cursor sits on the first register line; step over all of them.
        for _ in &self.config.registers {
            writeln!(self.out)?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn rewind_lines(&self) -> u16 {
        // Checked when the config was validated.
        (self.config.registers.len() + 1) as u16
    }
}

fn read_register<B: RegisterBus>(
    bus: &mut B,
    device: u8,
    spec: &RegisterSpec,
) -> Result<u16, TransportError> {
    let value = match spec.width {
        Width::Byte => bus.read_byte(device, spec.address).map(u16::from)?,
        Width::Word => bus.read_word(device, spec.address)?,
    };
    debug_assert!(value <= spec.width.max_value());
    Ok(value)
}
