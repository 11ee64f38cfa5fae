use anchor_lang::prelude::*;

// ══════════════════════════════════════════════════════════════════════════════
// ADMIN EVENTS
// ══════════════════════════════════════════════════════════════════════════════

/// Emitted when the program configuration is created
#[event]
pub struct ProgramInitialized {
    pub admin: Pubkey,
    pub stake_mint: Pubkey,
    pub vault: Pubkey,
    pub oracle: Pubkey,
    pub min_stake_usd_micros: u64,
    pub timestamp: i64,
}

/// Emitted when the trusted signer key is rotated
#[event]
pub struct AuthorityKeyUpdated {
    pub admin: Pubkey,
    pub old_key: [u8; 64],
    pub new_key: [u8; 64],
    pub timestamp: i64,
}

/// Emitted when the oracle pushes a new stake token price
#[event]
pub struct PriceUpdated {
    pub oracle: Pubkey,
    pub price_usd_micros: u64,
    pub unit_decimals: u8,
    pub timestamp: i64,
}

// ══════════════════════════════════════════════════════════════════════════════
// POOL LIFECYCLE EVENTS
// ══════════════════════════════════════════════════════════════════════════════

/// Emitted when a participant opens a lock
#[event]
pub struct LockDeposited {
    pub owner: Pubkey,
    pub day: u64,
    pub period: u8,
    pub stake_amount: u64,
    pub start_time: u64,
    pub end_time: u64,
    pub pool_total_staked: u64,
    pub pool_participants: u32,
}

/// Emitted when the settlement root for a pool is published (or replaced)
#[event]
pub struct RootPublished {
    pub day: u64,
    pub period: u8,
    pub merkle_root: [u8; 32],
    pub replaced: bool,
    pub timestamp: i64,
}

/// Emitted when a lock is settled by its owner
#[event]
pub struct RewardClaimed {
    pub owner: Pubkey,
    pub day: u64,
    pub period: u8,
    pub completed: bool,
    pub stake_returned: u64,
    pub reward_amount: u64,
    pub payout: u64,
    pub timestamp: i64,
}
