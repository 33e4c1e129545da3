/// Parse a 7-bit I2C address given in hex, with or without a `0x` prefix.
pub(crate) fn seven_bit_address(value: &str) -> Result<u8, String> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    let address =
        u8::from_str_radix(digits, 16).map_err(|e| format!("{value:?} is not hexadecimal: {e}"))?;
    if address > 0x7F {
        return Err(format!("{address:#04X} is not a 7-bit address"));
    }
    Ok(address)
}
