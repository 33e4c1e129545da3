//! Register table types and the built-in device layouts.
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Number of bytes read for a register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    /// Single byte, values 0..=255.
    Byte,
    /// 16-bit word, values 0..=65535.
    Word,
}

impl Width {
    /// Width in bytes.
    pub fn bytes(self) -> usize {
        match self {
            Width::Byte => 1,
            Width::Word => 2,
        }
    }

    /// Largest value a register of this width can hold.
    pub fn max_value(self) -> u16 {
        match self {
            Width::Byte => u8::MAX.into(),
            Width::Word => u16::MAX,
        }
    }
}

impl TryFrom<u8> for Width {
    type Error = ParseRegisterError;

    fn try_from(bytes: u8) -> Result<Self, Self::Error> {
        match bytes {
            1 => Ok(Width::Byte),
            2 => Ok(Width::Word),
            other => Err(ParseRegisterError::Width(other.to_string())),
        }
    }
}

/// A named device register shown in the readout.
///
/// Tables of these are ordered: the order is the display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterSpec {
    /// Label printed in front of the value.
    pub name: String,
    /// Register address within the device.
    pub address: u8,
    /// How many bytes to read.
    pub width: Width,
}

impl RegisterSpec {
    /// Create a register spec.
    pub fn new(name: impl Into<String>, address: u8, width: Width) -> Self {
        Self {
            name: name.into(),
            address,
            width,
        }
    }
}

impl fmt::Display for RegisterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:#04X}:{}", self.name, self.address, self.width.bytes())
    }
}

/// Failure to parse a `NAME:ADDR:WIDTH` register description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseRegisterError {
    /// Not three colon-separated fields.
    #[error("expected NAME:ADDR:WIDTH, got {0:?}")]
    Format(String),
    /// The name field was empty.
    #[error("register name is empty")]
    EmptyName,
    /// The address was not a number in 0..=255.
    #[error("invalid register address {0:?}")]
    Address(String),
    /// The width was not 1 or 2.
    #[error("invalid register width {0:?}, expected 1 or 2")]
    Width(String),
}

impl FromStr for RegisterSpec {
    type Err = ParseRegisterError;

    /// Parse `NAME:ADDR:WIDTH`, where the address is decimal or `0x`-prefixed hex.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split(':').collect();
        let [name, address, width] = fields[..] else {
            return Err(ParseRegisterError::Format(s.to_owned()));
        };
        if name.is_empty() {
            return Err(ParseRegisterError::EmptyName);
        }
        let address =
            parse_u8(address).ok_or_else(|| ParseRegisterError::Address(address.to_owned()))?;
        let width = width
            .parse::<u8>()
            .map_err(|_| ParseRegisterError::Width(width.to_owned()))
            .and_then(Width::try_from)?;
        Ok(RegisterSpec::new(name, address, width))
    }
}

fn parse_u8(value: &str) -> Option<u8> {
    match value.get(..2) {
        Some("0x" | "0X") => u8::from_str_radix(&value[2..], 16).ok(),
        _ => value.parse().ok(),
    }
}

/// Register layouts of the two controller firmware revisions.
///
/// Both describe the same gamepad controller. Neither is more correct than the
/// other; pick the one matching the firmware on the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Every register is a single byte; joystick axes are split into MSB/LSB.
    #[default]
    Byte,
    /// Joystick axes are 16-bit words.
    Word,
}

impl Layout {
    /// The register table for this layout, in display order.
    pub fn registers(self) -> Vec<RegisterSpec> {
        use Width::*;
        let table: &[(&str, u8, Width)] = match self {
            Layout::Byte => &[
                ("REG_STATUS", 1, Byte),
                ("REG_JOYS1XMSB", 2, Byte),
                ("REG_JOYS1XLSB", 3, Byte),
                ("REG_JOYS1YMSB", 4, Byte),
                ("REG_JOYS1YLSB", 5, Byte),
                ("REG_BUTTONS1", 10, Byte),
            ],
            Layout::Word => &[
                ("REG_STATUS", 1, Byte),
                ("REG_REQ_DATA", 2, Word),
                ("REG_JOYS1X", 4, Word),
                ("REG_JOYS1Y", 6, Word),
                ("REG_BUTTONS1", 10, Byte),
            ],
        };
        table
            .iter()
            .map(|&(name, address, width)| RegisterSpec::new(name, address, width))
            .collect()
    }

    /// How values in this layout read best.
    ///
    /// Split bytes are easiest to compare in decimal, whole joystick words in hex.
    pub fn default_format(self) -> crate::ValueFormat {
        match self {
            Layout::Byte => crate::ValueFormat::Decimal,
            Layout::Word => crate::ValueFormat::Hex,
        }
    }
}
