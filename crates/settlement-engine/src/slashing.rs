//! Participant validation, stake returns, slashing and weights.

use std::collections::HashSet;
use std::str::FromStr;

use anchor_lang::prelude::Pubkey;
use stake_commit::helpers::window::{classify, PoolKey};
use stake_commit::{MAX_DURATION, MIN_DURATION};
use tracing::debug;

use crate::error::{Result, SettlementError};
use crate::types::UserInput;

/// A validated participant record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Participant {
    pub address: Pubkey,
    pub stake_amount: u64,
    pub start_time: u64,
    pub duration: u64,
    pub completed: bool,
}

impl Participant {
    pub fn pool_key(&self) -> PoolKey {
        classify(self.start_time)
    }
}

/// Validate the whole batch, stopping at the first bad record.
///
/// All participants must share one pool: the pool of the first record.
pub fn validate(users: &[UserInput]) -> Result<(PoolKey, Vec<Participant>)> {
    let first = users
        .first()
        .ok_or_else(|| SettlementError::Input("batch has no participants".into()))?;
    let pool = classify(first.start_time);

    let mut seen = HashSet::with_capacity(users.len());
    let mut participants = Vec::with_capacity(users.len());

    for (index, user) in users.iter().enumerate() {
        if user.address.trim().is_empty() {
            return Err(SettlementError::validation(index, &user.address, "empty address"));
        }
        let address = Pubkey::from_str(user.address.trim())
            .map_err(|_| SettlementError::validation(index, &user.address, "address is not a valid public key"))?;
        if user.stake_amount == 0 {
            return Err(SettlementError::validation(index, &user.address, "stake_amount must be positive"));
        }
        if user.start_time == 0 {
            return Err(SettlementError::validation(index, &user.address, "start_time must be positive"));
        }
        if !(MIN_DURATION..=MAX_DURATION).contains(&user.duration) {
            return Err(SettlementError::validation(
                index,
                &user.address,
                format!("duration must be within {MIN_DURATION}..={MAX_DURATION}"),
            ));
        }
        if !seen.insert(address) {
            return Err(SettlementError::validation(index, &user.address, "duplicate address"));
        }

        let participant = Participant {
            address,
            stake_amount: user.stake_amount,
            start_time: user.start_time,
            duration: user.duration,
            completed: user.completion_status,
        };
        let key = participant.pool_key();
        if key != pool {
            return Err(SettlementError::validation(
                index,
                &user.address,
                format!(
                    "start_time belongs to pool {}/{}, batch is pool {}/{}",
                    key.day, key.period, pool.day, pool.period
                ),
            ));
        }

        debug!(index, address = %address, stake = user.stake_amount, completed = user.completion_status, "participant validated");
        participants.push(participant);
    }

    Ok((pool, participants))
}

pub fn stake_return(stake: u64, completed: bool) -> u64 {
    if completed {
        stake
    } else {
        0
    }
}

/// Sum of forfeited stakes
pub fn total_slashed(participants: &[Participant]) -> Result<u64> {
    participants.iter().try_fold(0u64, |acc, p| {
        let slashed = p.stake_amount - stake_return(p.stake_amount, p.completed);
        acc.checked_add(slashed)
            .ok_or(SettlementError::Arithmetic("total slashed overflows u64"))
    })
}

/// stake * duration; u64 x u64 always fits u128
pub fn weight(stake: u64, duration: u64) -> u128 {
    stake as u128 * duration as u128
}
