use alloy_primitives::U256;

use crate::error::{ErrorCode, ProtocolResult};

/// Scales a human decimal token quantity to integer base units.
///
/// `"1000"` with 18 decimals becomes `1000 * 10^18`; `"0.5"` becomes
/// `5 * 10^17`. More fractional digits than `decimals` is an error rather than a
/// silent truncation, and the scaled value must fit in 256 bits.
pub fn parse_token_amount(value: &str, decimals: u8) -> ProtocolResult<U256> {
    let trimmed = value.trim();
    let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));

    if whole.is_empty() && fraction.is_empty() {
        return Err(ErrorCode::InvalidAmount(value.to_string()));
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(ErrorCode::InvalidAmount(value.to_string()));
    }

    let decimals = usize::from(decimals);
    if fraction.len() > decimals {
        return Err(ErrorCode::InvalidAmount(format!(
            "{}: more than {} decimal places",
            value, decimals
        )));
    }

    let mut digits = String::with_capacity(whole.len() + decimals);
    digits.push_str(whole);
    digits.push_str(fraction);
    digits.extend(std::iter::repeat('0').take(decimals - fraction.len()));

    let significant = digits.trim_start_matches('0');
    if significant.is_empty() {
        return Ok(U256::ZERO);
    }

    U256::from_str_radix(significant, 10).map_err(|_| ErrorCode::AmountOverflow(value.to_string()))
}

/// Renders base units as a decimal token quantity, dropping trailing zeros.
pub fn format_token_amount(amount: U256, decimals: u8) -> String {
    let decimals = usize::from(decimals);
    let raw = amount.to_string();
    if decimals == 0 {
        return raw;
    }

    let padded = format!("{:0>width$}", raw, width = decimals + 1);
    let (whole, fraction) = padded.split_at(padded.len() - decimals);
    let fraction = fraction.trim_end_matches('0');

    if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, fraction)
    }
}
