use std::time::Duration;

use clap::{Parser, ValueEnum};
use regpoll::{Layout, PollerConfig, RegisterSpec, ValueFormat, WordOrder};

use crate::util;

/// Live readout of I2C device registers
///
/// Reads a table of registers from one device on a Linux I2C bus and redraws
/// their values in place every interval until interrupted with Ctrl-C.
///
/// With no options this polls the gamepad controller at 0x67 on bus 3 using
/// the single-byte register layout. Use --layout to switch to the firmware with
/// 16-bit joystick registers, or give your own table with --register.
///
/// Any failed register read ends the program with an error naming the
/// register. There are no retries.
#[derive(Debug, Parser)]
#[command(version, about)]
pub(crate) struct Cli {
    /// I2C bus number (reads /dev/i2c-N)
    #[arg(short, long, default_value_t = 3)]
    pub(crate) bus: u8,
    /// 7-bit device address in hexadecimal
    #[arg(short, long, default_value = "0x67", value_parser = util::seven_bit_address)]
    pub(crate) address: u8,
    /// Milliseconds between passes
    #[arg(short, long, default_value_t = 100)]
    pub(crate) interval: u64,
    /// Built-in register table to read
    #[arg(short, long, value_enum, default_value_t = LayoutArg::Byte)]
    pub(crate) layout: LayoutArg,
    /// Read this register instead of the layout table; may be repeated.
    ///
    /// Given as NAME:ADDR:WIDTH, where ADDR is decimal or 0x-prefixed hex and
    /// WIDTH is 1 or 2 bytes. Registers are shown in the order given.
    #[arg(short, long = "register", value_name = "NAME:ADDR:WIDTH")]
    pub(crate) registers: Vec<RegisterSpec>,
    /// How to print values [default: decimal for the byte layout and custom
    /// tables, hex for the word layout]
    #[arg(short, long, value_enum)]
    pub(crate) format: Option<FormatArg>,
    /// Byte order of 16-bit registers
    #[arg(short, long, value_enum, default_value_t = WordOrderArg::Big)]
    pub(crate) word_order: WordOrderArg,
    /// Read every register once and exit.
    #[arg(long)]
    pub(crate) once: bool,
}

impl Cli {
    pub(crate) fn poller_config(&self) -> PollerConfig {
        let layout = Layout::from(self.layout);
        let (registers, default_format) = if self.registers.is_empty() {
            (layout.registers(), layout.default_format())
        } else {
            (self.registers.clone(), ValueFormat::Decimal)
        };
        PollerConfig {
            device_address: self.address,
            interval: Duration::from_millis(self.interval),
            format: self.format.map_or(default_format, ValueFormat::from),
            registers,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum LayoutArg {
    /// All registers one byte; joystick axes split into MSB and LSB
    Byte,
    /// Joystick axes as 16-bit words
    Word,
}

impl From<LayoutArg> for Layout {
    fn from(value: LayoutArg) -> Layout {
        match value {
            LayoutArg::Byte => Layout::Byte,
            LayoutArg::Word => Layout::Word,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum FormatArg {
    /// Plain decimal
    Decimal,
    /// Four-digit uppercase hexadecimal
    Hex,
}

impl From<FormatArg> for ValueFormat {
    fn from(value: FormatArg) -> ValueFormat {
        match value {
            FormatArg::Decimal => ValueFormat::Decimal,
            FormatArg::Hex => ValueFormat::Hex,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum WordOrderArg {
    /// Most significant byte first
    Big,
    /// Least significant byte first (SMBus order)
    Little,
}

impl From<WordOrderArg> for WordOrder {
    fn from(value: WordOrderArg) -> WordOrder {
        match value {
            WordOrderArg::Big => WordOrder::BigEndian,
            WordOrderArg::Little => WordOrder::LittleEndian,
        }
    }
}
