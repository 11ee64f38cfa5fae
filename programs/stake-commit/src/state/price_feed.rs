use anchor_lang::prelude::*;
use crate::constants::*;
use crate::errors::ErrorCode;

/// Stake token price pushed by the configured oracle
///
/// `price_usd_micros` is the micro-USD value of one whole token,
/// i.e. of `10^unit_decimals` base units.
///
/// PDA Seeds: ["price_feed"]
#[account]
#[derive(Debug, Default)]
pub struct PriceFeed {
    /// Only signer allowed to push prices
    pub oracle: Pubkey,

    pub price_usd_micros: u64,

    pub unit_decimals: u8,

    /// Timestamp of the last push (0 = never)
    pub updated_at: i64,

    /// PDA bump seed
    pub bump: u8,
}

impl PriceFeed {
    /// Account size: 32 + 8 + 1 + 8 + 1 = 50 bytes
    pub const LEN: usize = 32 + 8 + 1 + 8 + 1;

    pub fn is_fresh(&self, now: i64) -> bool {
        self.updated_at > 0 && now.saturating_sub(self.updated_at) <= MAX_PRICE_AGE
    }

    /// Micro-USD value of `amount` base units
    pub fn value_usd_micros(&self, amount: u64) -> Result<u64> {
        require!(self.unit_decimals <= MAX_UNIT_DECIMALS, ErrorCode::InvalidParameter);
        let unit = 10u128.pow(self.unit_decimals as u32);
        let value = (amount as u128)
            .checked_mul(self.price_usd_micros as u128)
            .ok_or(ErrorCode::MathOverflow)?
            / unit;
        Ok(value.min(u64::MAX as u128) as u64)
    }
}
