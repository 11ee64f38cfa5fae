//! Protocol fee split and proportional winner rewards.

use anchor_lang::prelude::Pubkey;
use stake_commit::PROTOCOL_FEE_PERCENT;
use tracing::warn;

use crate::error::{Result, SettlementError};
use crate::math::{mul_div, percent_of};
use crate::slashing::{weight, Participant};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Allocation {
    pub total_slashed: u64,
    pub protocol_fee: u64,
    pub winners_pool: u64,
    pub total_weight: u128,
    /// (winner, reward) in participant order; empty for the zero outcome
    pub rewards: Vec<(Pubkey, u64)>,
    /// winners_pool minus the sum of rewards
    pub rounding_dust: u64,
}

impl Allocation {
    /// No winners, nothing slashed, or degenerate weights
    fn zero(total_slashed: u64) -> Self {
        Self {
            total_slashed,
            ..Self::default()
        }
    }

    pub fn reward_of(&self, address: &Pubkey) -> Option<u64> {
        self.rewards
            .iter()
            .find(|(winner, _)| winner == address)
            .map(|(_, reward)| *reward)
    }

    pub fn distributed(&self) -> u64 {
        self.winners_pool - self.rounding_dust
    }
}

pub fn allocate(participants: &[Participant], total_slashed: u64) -> Result<Allocation> {
    let winners: Vec<&Participant> = participants.iter().filter(|p| p.completed).collect();

    if winners.is_empty() || total_slashed == 0 {
        warn!(winners = winners.len(), total_slashed, "no rewards to distribute");
        return Ok(Allocation::zero(total_slashed));
    }

    let protocol_fee = percent_of(total_slashed, PROTOCOL_FEE_PERCENT);
    let winners_pool = total_slashed - protocol_fee;

    let total_weight = winners.iter().try_fold(0u128, |acc, p| {
        acc.checked_add(weight(p.stake_amount, p.duration))
            .ok_or(SettlementError::Arithmetic("total weight overflows u128"))
    })?;
    if total_weight == 0 {
        warn!("winning weights are all zero");
        return Ok(Allocation::zero(total_slashed));
    }

    let mut rewards = Vec::with_capacity(winners.len());
    let mut distributed = 0u64;
    for winner in winners {
        let reward = mul_div(winners_pool, weight(winner.stake_amount, winner.duration), total_weight)?;
        distributed = distributed
            .checked_add(reward)
            .ok_or(SettlementError::Arithmetic("distributed rewards overflow u64"))?;
        rewards.push((winner.address, reward));
    }

    let rounding_dust = winners_pool
        .checked_sub(distributed)
        .ok_or(SettlementError::Arithmetic("rewards exceed winners pool"))?;

    Ok(Allocation {
        total_slashed,
        protocol_fee,
        winners_pool,
        total_weight,
        rewards,
        rounding_dust,
    })
}
