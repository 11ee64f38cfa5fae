use anchor_lang::prelude::*;
use crate::constants::EMPTY_ROOT;
use crate::helpers::window::PoolKey;

/// Aggregate of every lock opened in one 12-hour window
///
/// PDA Seeds: ["pool", day (u64 LE), period (u8)]
#[account]
#[derive(Debug, Default, PartialEq)]
pub struct Pool {
    /// Days since the Unix epoch
    pub day: u64,

    /// Window within the day (0 = AM, 1 = PM)
    pub period: u8,

    /// Sum of all stakes deposited into this pool
    pub total_staked: u64,

    /// Number of locks opened in this pool
    pub participant_count: u32,

    /// Settlement commitment, meaningful once `finalized`
    pub merkle_root: [u8; 32],

    /// Set by the first root publication
    pub finalized: bool,

    /// Timestamp of the latest root publication
    pub published_at: i64,

    /// Claims settled against this pool
    pub claims_settled: u32,

    /// Total paid out of this pool (stakes returned + rewards)
    pub total_paid_out: u64,

    /// PDA bump seed
    pub bump: u8,
}

impl Pool {
    /// Account size calculation:
    /// - day: 8, period: 1, total_staked: 8, participant_count: 4
    /// - merkle_root: 32, finalized: 1, published_at: 8
    /// - claims_settled: 4, total_paid_out: 8, bump: 1
    /// Total: 75 bytes
    pub const LEN: usize = 8 + 1 + 8 + 4 + 32 + 1 + 8 + 4 + 8 + 1;

    pub fn key(&self) -> PoolKey {
        PoolKey { day: self.day, period: self.period }
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// True when the published root commits to no rewards at all
    pub fn has_empty_root(&self) -> bool {
        self.merkle_root == EMPTY_ROOT
    }
}
