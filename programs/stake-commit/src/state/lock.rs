use anchor_lang::prelude::*;
use crate::helpers::window::PoolKey;

/// Lock lifecycle: Inactive -> Active (deposit) -> Completed (claim)
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LockStatus {
    #[default]
    Inactive,
    Active,
    Completed,
}

/// One participant's stake commitment in one pool
///
/// PDA Seeds: ["lock", owner, day (u64 LE), period (u8)]
#[account]
#[derive(Debug, Default, PartialEq)]
pub struct Lock {
    /// Participant who deposited
    pub owner: Pubkey,

    pub day: u64,

    pub period: u8,

    pub stake_amount: u64,

    /// Declared start of the commitment (unix seconds)
    pub start_time: u64,

    /// Declared length of the commitment (seconds)
    pub duration: u64,

    /// start_time + duration
    pub end_time: u64,

    pub status: LockStatus,

    /// PDA bump seed
    pub bump: u8,
}

impl Lock {
    /// Account size: 32 + 8 + 1 + 8 + 8 + 8 + 8 + 1 + 1 = 75 bytes
    pub const LEN: usize = 32 + 8 + 1 + 8 + 8 + 8 + 8 + 1 + 1;

    pub fn pool_key(&self) -> PoolKey {
        PoolKey { day: self.day, period: self.period }
    }

    pub fn end_time(&self) -> u64 {
        self.end_time
    }

    pub fn is_active(&self) -> bool {
        self.status == LockStatus::Active
    }
}
