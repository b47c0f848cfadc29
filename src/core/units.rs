use crate::utils::error::{DappError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Wei,
    Gwei,
    Ether,
}

impl Unit {
    pub fn decimals(self) -> u32 {
        match self {
            Unit::Wei => 0,
            Unit::Gwei => 9,
            Unit::Ether => 18,
        }
    }
}

/// Decimal amount in `unit` to wei, e.g. `to_wei("10", Unit::Ether)`.
pub fn to_wei(amount: &str, unit: Unit) -> Result<u128> {
    let invalid = |reason: &str| DappError::InvalidAmountError {
        value: amount.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = amount.trim();
    let (whole, fraction) = match trimmed.split_once('.') {
        Some((w, f)) => (w, f),
        None => (trimmed, ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid("empty amount"));
    }
    if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
        return Err(invalid("only decimal digits are allowed"));
    }

    let decimals = unit.decimals();
    if fraction.len() > decimals as usize {
        return Err(invalid("too many decimal places for unit"));
    }

    let scale = 10u128.pow(decimals);
    let whole_value = if whole.is_empty() {
        0
    } else {
        whole.parse::<u128>().map_err(|_| invalid("amount too large"))?
    };
    let fraction_value = if fraction.is_empty() {
        0
    } else {
        let padded = format!("{:0<width$}", fraction, width = decimals as usize);
        padded.parse::<u128>().map_err(|_| invalid("amount too large"))?
    };

    whole_value
        .checked_mul(scale)
        .and_then(|v| v.checked_add(fraction_value))
        .ok_or_else(|| invalid("amount too large"))
}

/// Wei to an ether string without trailing zeros (`1500000000000000000` -> `1.5`).
pub fn from_wei(wei: u128) -> String {
    let scale = 10u128.pow(Unit::Ether.decimals());
    let whole = wei / scale;
    let fraction = wei % scale;
    if fraction == 0 {
        return whole.to_string();
    }

    let digits = format!("{:018}", fraction);
    format!("{}.{}", whole, digits.trim_end_matches('0'))
}
