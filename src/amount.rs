//! Decimal amount handling
//!
//! Amounts travel as decimal strings and are converted to stroops (the
//! smallest ledger unit, 1/10_000_000) for validation and envelope
//! construction. No floating point.

use crate::error::AidChainError;

pub const STROOPS_PER_UNIT: u64 = 10_000_000;
const DECIMALS: usize = 7;

/// Parse a decimal amount string into stroops.
///
/// Accepts up to 7 fractional digits. Rejects negatives, empty input and
/// anything that is not a plain decimal number.
pub fn parse_stroops(amount: &str) -> Result<u64, AidChainError> {
    let amount = amount.trim();
    if amount.is_empty() {
        return Err(AidChainError::InvalidInput("empty amount".to_string()));
    }

    let (int_part, frac_part) = match amount.split_once('.') {
        Some((i, f)) => (i, f),
        None => (amount, ""),
    };

    if int_part.is_empty() && frac_part.is_empty() {
        return Err(AidChainError::InvalidInput(format!(
            "invalid amount: {}",
            amount
        )));
    }
    if !int_part.chars().all(|c| c.is_ascii_digit())
        || !frac_part.chars().all(|c| c.is_ascii_digit())
    {
        return Err(AidChainError::InvalidInput(format!(
            "invalid amount: {}",
            amount
        )));
    }
    if frac_part.len() > DECIMALS {
        return Err(AidChainError::InvalidInput(format!(
            "amount has more than {} decimal places: {}",
            DECIMALS, amount
        )));
    }

    let int_value: u64 = if int_part.is_empty() {
        0
    } else {
        int_part
            .parse()
            .map_err(|_| AidChainError::InvalidInput(format!("invalid amount: {}", amount)))?
    };

    let mut frac = frac_part.to_string();
    while frac.len() < DECIMALS {
        frac.push('0');
    }
    let frac_value: u64 = if frac.is_empty() { 0 } else { frac.parse().unwrap_or(0) };

    int_value
        .checked_mul(STROOPS_PER_UNIT)
        .and_then(|v| v.checked_add(frac_value))
        .ok_or_else(|| AidChainError::InvalidInput(format!("amount too large: {}", amount)))
}

/// Format stroops back into a decimal string, trimming trailing zeros.
pub fn format_stroops(stroops: u64) -> String {
    let int_part = stroops / STROOPS_PER_UNIT;
    let frac_part = stroops % STROOPS_PER_UNIT;
    if frac_part == 0 {
        return int_part.to_string();
    }
    let frac = format!("{:07}", frac_part);
    format!("{}.{}", int_part, frac.trim_end_matches('0'))
}
