/// In-memory ledger state
///
/// Balances are kept in stroops (1 unit = 10_000_000 stroops) and formatted
/// to the 7-decimal Horizon balance string on the way out.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::types::PaymentRecord;

pub const STROOPS_PER_UNIT: u64 = 10_000_000;

#[derive(Debug, Default)]
pub struct AccountState {
    pub balance_stroops: u64,
    pub sequence: i64,
    /// Payments touching this account, oldest first.
    pub payments: Vec<PaymentRecord>,
}

#[derive(Debug)]
pub struct LedgerState {
    pub accounts: HashMap<String, AccountState>,
    pub base_fee: u32,
    pub next_ledger: u64,
}

impl Default for LedgerState {
    fn default() -> Self {
        Self {
            accounts: HashMap::new(),
            base_fee: 100,
            next_ledger: 1,
        }
    }
}

pub type Ledger = Mutex<LedgerState>;

/// Format stroops as the Horizon balance string, e.g. "100.5000000".
pub fn format_balance(stroops: u64) -> String {
    format!(
        "{}.{:07}",
        stroops / STROOPS_PER_UNIT,
        stroops % STROOPS_PER_UNIT
    )
}

/// Parse a decimal unit amount ("100.5") into stroops. Returns None on
/// malformed input or more than 7 fractional digits.
pub fn parse_balance(input: &str) -> Option<u64> {
    let input = input.trim();
    let (whole, frac) = match input.split_once('.') {
        Some((w, f)) => (w, f),
        None => (input, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if frac.len() > 7 || !frac.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let whole: u64 = if whole.is_empty() {
        0
    } else {
        whole.parse().ok()?
    };
    let mut frac_stroops: u64 = 0;
    if !frac.is_empty() {
        frac_stroops = frac.parse().ok()?;
        for _ in 0..(7 - frac.len()) {
            frac_stroops *= 10;
        }
    }

    whole
        .checked_mul(STROOPS_PER_UNIT)?
        .checked_add(frac_stroops)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_formatting_roundtrips() {
        assert_eq!(format_balance(1_005_000_000), "100.5000000");
        assert_eq!(parse_balance("100.5"), Some(1_005_000_000));
        assert_eq!(parse_balance("100.5000000"), Some(1_005_000_000));
        assert_eq!(parse_balance("0"), Some(0));
        assert_eq!(parse_balance(".5"), Some(5_000_000));
    }

    #[test]
    fn malformed_balances_rejected() {
        assert_eq!(parse_balance(""), None);
        assert_eq!(parse_balance("abc"), None);
        assert_eq!(parse_balance("1.12345678"), None);
        assert_eq!(parse_balance("-5"), None);
    }
}
