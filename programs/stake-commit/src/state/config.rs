use anchor_lang::prelude::*;
use crate::errors::ErrorCode;

/// Program-wide configuration
///
/// Holds the admin role, the trusted signer's public key and the token plumbing.
/// Passed explicitly to every verifier operation.
///
/// PDA Seeds: ["config"]
#[account]
#[derive(Debug)]
pub struct ProgramConfig {
    /// Admin allowed to publish roots and rotate the authority key
    pub admin: Pubkey,

    /// Trusted signer public key: uncompressed secp256k1 point, x || y
    pub authority_key: [u8; 64],

    /// Mint of the staked token
    pub stake_mint: Pubkey,

    /// Token account holding all stakes, owned by the vault authority PDA
    pub vault: Pubkey,

    /// Price feed consulted for the minimum-stake check
    pub price_feed: Pubkey,

    /// Minimum stake value in micro-USD (0 disables the check)
    pub min_stake_usd_micros: u64,

    /// Set for the duration of a claim
    pub reentrancy_locked: bool,

    /// PDA bump for the vault authority
    pub vault_authority_bump: u8,

    /// PDA bump seed
    pub bump: u8,

    /// Lifetime total staked
    pub total_deposited: u64,

    /// Lifetime total paid out by claims
    pub total_paid_out: u64,

    /// Number of settled claims
    pub claims_settled: u64,

    /// Timestamp when the program was initialized
    pub initialized_at: i64,
}

impl ProgramConfig {
    /// Account size calculation:
    /// - 4 Pubkeys: 32 * 4 = 128 bytes (admin, stake_mint, vault, price_feed)
    /// - authority_key: 64 bytes
    /// - 5 u64/i64: 8 * 5 = 40 bytes (min_stake_usd_micros, total_deposited,
    ///   total_paid_out, claims_settled, initialized_at)
    /// - 3 u8/bool: 3 bytes (reentrancy_locked, vault_authority_bump, bump)
    /// Total: 128 + 64 + 40 + 3 = 235 bytes
    pub const LEN: usize = 32 * 4 + 64 + 8 * 5 + 3;

    pub fn authority_key(&self) -> &[u8; 64] {
        &self.authority_key
    }

    /// Take the claim guard; fails if a claim is already in flight
    ///
    /// The flag lives in the deserialized account for one handler and is
    /// written back on exit, so it is not a lock across invocations. On-ledger
    /// re-entry is stopped by the runtime, which rejects a CPI back into the
    /// calling program. The flag guards callers of `process_claim` that share
    /// one config, such as off-line replay.
    pub fn enter_claim(&mut self) -> Result<()> {
        require!(!self.reentrancy_locked, ErrorCode::ReentrantCall);
        self.reentrancy_locked = true;
        Ok(())
    }

    pub fn exit_claim(&mut self) {
        self.reentrancy_locked = false;
    }
}
