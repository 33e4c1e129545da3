//! Rendering of register values as readout lines.

/// Width of the name column. Longer names push the value right.
pub const NAME_WIDTH: usize = 16;

/// How register values are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueFormat {
    /// Plain decimal, e.g. `300`.
    #[default]
    Decimal,
    /// Four-digit, zero-padded, uppercase hexadecimal, e.g. `012C`.
    Hex,
}

impl ValueFormat {
    /// Format a raw register value.
    pub fn format(self, value: u16) -> String {
        match self {
            ValueFormat::Decimal => value.to_string(),
            ValueFormat::Hex => format!("{value:04X}"),
        }
    }
}

/// Build the readout line for one register, without a line terminator.
///
/// ```
/// # use regpoll::{format_line, ValueFormat};
/// assert_eq!(format_line("REG_STATUS", 7, ValueFormat::Decimal), "REG_STATUS      : 7");
/// ```
pub fn format_line(name: &str, value: u16, format: ValueFormat) -> String {
    format!("{name:<NAME_WIDTH$}: {}", format.format(value))
}
