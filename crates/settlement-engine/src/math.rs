use primitive_types::U256;

use crate::error::{Result, SettlementError};

/// floor(a * b / denominator) with a 256-bit intermediate; the result must fit u64
pub fn mul_div(a: u64, b: u128, denominator: u128) -> Result<u64> {
    if denominator == 0 {
        return Err(SettlementError::Arithmetic("division by zero"));
    }
    let quotient = U256::from(a) * U256::from(b) / U256::from(denominator);
    if quotient > U256::from(u64::MAX) {
        return Err(SettlementError::Arithmetic("quotient exceeds u64"));
    }
    Ok(quotient.low_u64())
}

/// floor(amount * percent / 100)
pub fn percent_of(amount: u64, percent: u64) -> u64 {
    (amount as u128 * percent as u128 / 100) as u64
}
