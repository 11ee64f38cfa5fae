use anchor_lang::prelude::*;
use crate::constants::*;
use crate::errors::ErrorCode;

/// (day, period) identifier of a pool
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PoolKey {
    pub day: u64,
    pub period: u8,
}

/// Days since the Unix epoch
pub fn day_of(timestamp: u64) -> u64 {
    timestamp / SECONDS_PER_DAY
}

/// 12-hour window of the day: 0 for 00:00-11:59 UTC, 1 for 12:00-23:59 UTC
pub fn period_of(timestamp: u64) -> u8 {
    ((timestamp % SECONDS_PER_DAY) / WINDOW_SECONDS) as u8
}

/// Classify a start time into its pool
pub fn classify(timestamp: u64) -> PoolKey {
    PoolKey {
        day: day_of(timestamp),
        period: period_of(timestamp),
    }
}

pub fn validate_period(period: u8) -> Result<()> {
    require!(period < PERIODS_PER_DAY, ErrorCode::InvalidPeriod);
    Ok(())
}

impl PoolKey {
    pub fn day_seed(&self) -> [u8; 8] {
        self.day.to_le_bytes()
    }

    pub fn period_seed(&self) -> [u8; 1] {
        [self.period]
    }
}
