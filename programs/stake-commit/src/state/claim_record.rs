use anchor_lang::prelude::*;

/// Write-once claim flag for one (participant, day, period)
///
/// Created on the first claim attempt; `claimed` only ever goes false -> true.
///
/// PDA Seeds: ["claim", owner, day (u64 LE), period (u8)]
#[account]
#[derive(Debug, Default, PartialEq)]
pub struct ClaimRecord {
    pub owner: Pubkey,

    pub day: u64,

    pub period: u8,

    pub claimed: bool,

    /// Amount paid out by the claim
    pub payout: u64,

    /// Timestamp of the claim
    pub claimed_at: i64,

    /// PDA bump seed
    pub bump: u8,
}

impl ClaimRecord {
    /// Account size: 32 + 8 + 1 + 1 + 8 + 8 + 1 = 59 bytes
    pub const LEN: usize = 32 + 8 + 1 + 1 + 8 + 8 + 1;

    pub fn is_claimed(&self) -> bool {
        self.claimed
    }
}
