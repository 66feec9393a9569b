// CLASSIFICATION: COMMUNITY
// Filename: units.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Exact minor/major unit conversion for ledger amounts.

use num_bigint::BigUint;
use num_traits::Zero;

/// Decimal places between the ledger's minor unit and its display unit.
pub const DEFAULT_DECIMALS: u32 = 18;

/// Render `minor` as a plain decimal string in major units, trailing zeros trimmed.
pub fn format_units(minor: &BigUint, decimals: u32) -> String {
    let factor: BigUint = BigUint::from(10u8).pow(decimals);
    let whole = minor / &factor;
    let frac = minor % &factor;
    if frac.is_zero() {
        return whole.to_string();
    }
    let digits = frac.to_string();
    let mut frac_str = "0".repeat(decimals as usize - digits.len());
    frac_str.push_str(&digits);
    format!("{}.{}", whole, frac_str.trim_end_matches('0'))
}
