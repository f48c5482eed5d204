//! Exact 18-decimal scaling and input predicates.
//!
//! On-chain amounts are integers scaled by 10^18. Human text is converted with
//! alloy's decimal helpers so no float ever touches an amount before it is an integer.
//! Floats only appear in display estimates (`to_display_f64`).

use std::str::FromStr;

use alloy::primitives::utils::{format_units, parse_units, ParseUnits};
use alloy::primitives::{Address, U256};

use crate::constants::TOKEN_DECIMALS;
use crate::error::DashboardError;

/// Parses a positive human amount into base units.
pub fn parse_amount(text: &str) -> Result<U256, DashboardError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(DashboardError::InvalidAmount);
    }
    // parse_units drops digits past the token's precision
    if let Some((_, frac)) = text.split_once('.') {
        if frac.len() > TOKEN_DECIMALS as usize {
            return Err(DashboardError::InvalidAmount);
        }
    }
    match parse_units(text, TOKEN_DECIMALS) {
        Ok(ParseUnits::U256(v)) if !v.is_zero() => Ok(v),
        _ => Err(DashboardError::InvalidAmount),
    }
}

/// `text` is a positive amount no larger than `balance` (base units).
pub fn is_valid_amount(text: &str, balance: U256) -> bool {
    matches!(parse_amount(text), Ok(v) if v <= balance)
}

/// Base units to a human decimal string, trailing zeros trimmed ("1.5", "100", "0").
pub fn format_amount(amount: U256) -> String {
    let raw = match format_units(amount, TOKEN_DECIMALS) {
        Ok(s) => s,
        Err(_) => return amount.to_string(),
    };
    if !raw.contains('.') {
        return raw;
    }
    raw.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Base units to a float for display arithmetic (payout and yield estimates).
pub fn to_display_f64(amount: U256) -> f64 {
    format_amount(amount).parse::<f64>().unwrap_or(0.0)
}

/// Parses `0x` + 40 hex chars. Mixed-case input must carry a valid EIP-55 checksum.
pub fn parse_address(text: &str) -> Result<Address, DashboardError> {
    let text = text.trim();
    let hex = text.strip_prefix("0x").ok_or(DashboardError::InvalidAddress)?;
    if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(DashboardError::InvalidAddress);
    }
    let addr = Address::from_str(text).map_err(|_| DashboardError::InvalidAddress)?;

    let has_lower = hex.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = hex.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper && addr.to_checksum(None) != text {
        return Err(DashboardError::InvalidAddress);
    }
    Ok(addr)
}

pub fn is_valid_address(text: &str) -> bool {
    parse_address(text).is_ok()
}
