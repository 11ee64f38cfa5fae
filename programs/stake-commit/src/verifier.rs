//! Ledger-independent state machine behind every instruction.
//!
//! Each `process_*` function checks all of its preconditions, performs the
//! external transfer (if any), and only then writes state. A failure at any
//! point returns before the first write, so the host transaction never sees a
//! half-applied operation.

use anchor_lang::prelude::*;
use crate::constants::*;
use crate::errors::ErrorCode;
use crate::helpers::attestation::{verify_attestation, AuthoritySignature};
use crate::helpers::commitment::{leaf_hash, verify_proof, Hash32};
use crate::helpers::window::{classify, validate_period, PoolKey};
use crate::state::*;

/// Services the host ledger provides to the verifier
pub trait LedgerCapabilities {
    /// Move `amount` stake tokens from `from` to `to`
    fn transfer(&mut self, from: &Pubkey, to: &Pubkey, amount: u64) -> Result<()>;

    /// Micro-USD value of `amount` stake tokens
    fn price_of(&self, amount: u64) -> Result<u64>;
}

/// Participant-supplied claim arguments
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClaimRequest {
    pub start_time: u64,
    pub duration: u64,
    pub completion_status: bool,
    pub signature: AuthoritySignature,
    pub reward_amount: u64,
    pub merkle_proof: Vec<Hash32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClaimOutcome {
    pub pool: PoolKey,
    pub stake_returned: u64,
    pub reward_amount: u64,
    pub payout: u64,
}

fn ledger_time(now: i64) -> u64 {
    now.max(0) as u64
}

/// Stake, duration and start-time rules for a new lock
pub fn validate_lock_params(start_time: u64, duration: u64, stake_amount: u64, now: i64) -> Result<()> {
    require!(stake_amount > 0, ErrorCode::InvalidStakeAmount);
    require!(
        (MIN_DURATION..=MAX_DURATION).contains(&duration),
        ErrorCode::InvalidDuration
    );
    require!(start_time > ledger_time(now), ErrorCode::StartTimeNotInFuture);
    Ok(())
}

/// Open an Active lock and move the stake into the vault
#[allow(clippy::too_many_arguments)]
pub fn process_deposit<C: LedgerCapabilities>(
    config: &mut ProgramConfig,
    pool: &mut Pool,
    lock: &mut Lock,
    owner: &Pubkey,
    now: i64,
    start_time: u64,
    duration: u64,
    stake_amount: u64,
    caps: &mut C,
) -> Result<PoolKey> {
    validate_lock_params(start_time, duration, stake_amount, now)?;
    require!(lock.status == LockStatus::Inactive, ErrorCode::LockAlreadyActive);

    if config.min_stake_usd_micros > 0 {
        let value = caps.price_of(stake_amount)?;
        require!(value >= config.min_stake_usd_micros, ErrorCode::StakeBelowMinimum);
    }

    let key = classify(start_time);
    if pool.participant_count > 0 {
        require!(pool.key() == key, ErrorCode::InvalidParameter);
    }
    let end_time = start_time.checked_add(duration).ok_or(ErrorCode::MathOverflow)?;
    let pool_total = pool.total_staked.checked_add(stake_amount).ok_or(ErrorCode::MathOverflow)?;
    let pool_count = pool.participant_count.checked_add(1).ok_or(ErrorCode::MathOverflow)?;
    let lifetime_total = config.total_deposited.checked_add(stake_amount).ok_or(ErrorCode::MathOverflow)?;

    caps.transfer(owner, &config.vault, stake_amount)?;

    pool.day = key.day;
    pool.period = key.period;
    pool.total_staked = pool_total;
    pool.participant_count = pool_count;

    lock.owner = *owner;
    lock.day = key.day;
    lock.period = key.period;
    lock.stake_amount = stake_amount;
    lock.start_time = start_time;
    lock.duration = duration;
    lock.end_time = end_time;
    lock.status = LockStatus::Active;

    config.total_deposited = lifetime_total;

    Ok(key)
}

/// Publish (or replace) the settlement root of a pool. Returns true when an
/// earlier root was overwritten.
pub fn process_publish_root(
    config: &ProgramConfig,
    caller: &Pubkey,
    pool: &mut Pool,
    key: PoolKey,
    root: Hash32,
    now: i64,
) -> Result<bool> {
    require_keys_eq!(*caller, config.admin, ErrorCode::UnauthorizedAccess);
    validate_period(key.period)?;
    require!(pool.key() == key, ErrorCode::InvalidParameter);

    let replaced = pool.finalized;
    pool.merkle_root = root;
    pool.finalized = true;
    pool.published_at = now;
    Ok(replaced)
}

/// Rotate the trusted signer key. Returns the previous key.
pub fn process_set_authority_key(
    config: &mut ProgramConfig,
    caller: &Pubkey,
    new_key: [u8; 64],
) -> Result<[u8; 64]> {
    require_keys_eq!(*caller, config.admin, ErrorCode::UnauthorizedAccess);
    require!(new_key != [0u8; 64], ErrorCode::InvalidParameter);

    let old_key = config.authority_key;
    config.authority_key = new_key;
    Ok(old_key)
}

/// Settle a lock: verify the attestation and reward commitment, pay out,
/// mark the lock Completed and the claim flag set.
#[allow(clippy::too_many_arguments)]
pub fn process_claim<C: LedgerCapabilities>(
    config: &mut ProgramConfig,
    pool: &mut Pool,
    lock: &mut Lock,
    claim_record: &mut ClaimRecord,
    caller: &Pubkey,
    now: i64,
    request: &ClaimRequest,
    caps: &mut C,
) -> Result<ClaimOutcome> {
    config.enter_claim()?;
    let outcome = settle_claim(config, pool, lock, claim_record, caller, now, request, caps);
    config.exit_claim();
    outcome
}

#[allow(clippy::too_many_arguments)]
fn settle_claim<C: LedgerCapabilities>(
    config: &mut ProgramConfig,
    pool: &mut Pool,
    lock: &mut Lock,
    claim_record: &mut ClaimRecord,
    caller: &Pubkey,
    now: i64,
    request: &ClaimRequest,
    caps: &mut C,
) -> Result<ClaimOutcome> {
    // 1. Ownership
    require_keys_eq!(lock.owner, *caller, ErrorCode::NotLockOwner);

    // 2. Lock period over
    require!(ledger_time(now) >= lock.end_time, ErrorCode::LockNotEnded);

    // 3. Status
    match lock.status {
        LockStatus::Active => {}
        LockStatus::Completed => return err!(ErrorCode::AlreadyClaimed),
        LockStatus::Inactive => return err!(ErrorCode::LockNotActive),
    }

    // 4. Root published
    require!(pool.key() == lock.pool_key(), ErrorCode::LockMismatch);
    require!(pool.is_finalized(), ErrorCode::PoolNotFinalized);

    // 5. Claim flag
    require!(!claim_record.is_claimed(), ErrorCode::AlreadyClaimed);

    require!(
        request.start_time == lock.start_time && request.duration == lock.duration,
        ErrorCode::LockMismatch
    );
    require!(request.merkle_proof.len() <= MAX_PROOF_DEPTH, ErrorCode::ProofTooLong);

    // 6. Attestation
    verify_attestation(
        config.authority_key(),
        caller,
        request.start_time,
        request.duration,
        request.completion_status,
        &request.signature,
    )?;

    // 7. Reward commitment
    if request.completion_status {
        if pool.has_empty_root() {
            require!(
                request.reward_amount == 0 && request.merkle_proof.is_empty(),
                ErrorCode::InvalidMerkleProof
            );
        } else {
            let leaf = leaf_hash(caller, request.reward_amount);
            require!(
                verify_proof(&leaf, &request.merkle_proof, &pool.merkle_root),
                ErrorCode::InvalidMerkleProof
            );
        }
    } else {
        require!(request.reward_amount == 0, ErrorCode::NonZeroRewardForFailedLock);
    }

    let stake_returned = if request.completion_status { lock.stake_amount } else { 0 };
    let payout = stake_returned
        .checked_add(request.reward_amount)
        .ok_or(ErrorCode::MathOverflow)?;

    let pool_paid = pool.total_paid_out.checked_add(payout).ok_or(ErrorCode::MathOverflow)?;
    let pool_claims = pool.claims_settled.checked_add(1).ok_or(ErrorCode::MathOverflow)?;
    let config_paid = config.total_paid_out.checked_add(payout).ok_or(ErrorCode::MathOverflow)?;
    let config_claims = config.claims_settled.checked_add(1).ok_or(ErrorCode::MathOverflow)?;

    if payout > 0 {
        caps.transfer(&config.vault, caller, payout)?;
    }

    claim_record.owner = *caller;
    claim_record.day = lock.day;
    claim_record.period = lock.period;
    claim_record.claimed = true;
    claim_record.payout = payout;
    claim_record.claimed_at = now;

    lock.status = LockStatus::Completed;

    pool.total_paid_out = pool_paid;
    pool.claims_settled = pool_claims;
    config.total_paid_out = config_paid;
    config.claims_settled = config_claims;

    Ok(ClaimOutcome {
        pool: lock.pool_key(),
        stake_returned,
        reward_amount: request.reward_amount,
        payout,
    })
}
