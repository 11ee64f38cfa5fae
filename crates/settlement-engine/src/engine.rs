//! One-shot settlement of a single pool.

use std::str::FromStr;

use anchor_lang::prelude::Pubkey;
use stake_commit::helpers::attestation::verify_attestation;
use stake_commit::helpers::commitment::{leaf_hash, verify_proof};
use tracing::{debug, info, warn};

use crate::allocator::{allocate, Allocation};
use crate::error::{Result, SettlementError};
use crate::merkle::MerkleCommitment;
use crate::signer::{Attestation, AttestationSigner};
use crate::slashing::{stake_return, total_slashed, validate, weight, Participant};
use crate::types::*;

/// Settle one pool: validate, slash, allocate, commit and sign.
///
/// Deterministic: the same set of participants yields the same root, proofs
/// and amounts whatever their order in `input.users`.
pub fn settle(input: &SettlementInput) -> Result<SettlementReport> {
    Pubkey::from_str(input.pool_info.contract_address.trim()).map_err(|_| {
        SettlementError::Input(format!(
            "contract_address {:?} is not a valid public key",
            input.pool_info.contract_address
        ))
    })?;
    let signer = AttestationSigner::from_hex(&input.pool_info.verifier_private_key)?;

    let (pool, participants) = validate(&input.users)?;
    let slashed = total_slashed(&participants)?;
    let allocation = allocate(&participants, slashed)?;
    let commitment = MerkleCommitment::build(&allocation.rewards);

    info!(
        day = pool.day,
        period = pool.period,
        participants = participants.len(),
        winners = allocation.rewards.len(),
        total_slashed = slashed,
        protocol_fee = allocation.protocol_fee,
        winners_pool = allocation.winners_pool,
        rounding_dust = allocation.rounding_dust,
        root = %to_hex(&commitment.root),
        "pool settled"
    );
    if commitment.is_empty() {
        warn!(day = pool.day, period = pool.period, "empty reward set, publishing sentinel root");
    }

    let user_results = participants
        .iter()
        .map(|p| user_result(p, &allocation, &commitment, &signer))
        .collect::<Result<Vec<_>>>()?;

    // Everything slashed that no winner receives stays in the vault
    let protocol_take = slashed
        .checked_sub(allocation.distributed())
        .ok_or(SettlementError::Arithmetic("rewards exceed total slashed"))?;

    Ok(SettlementReport {
        pool_info: PoolInfoOutput {
            day: pool.day,
            period: pool.period,
            contract_address: input.pool_info.contract_address.trim().to_string(),
            merkle_root: to_hex(&commitment.root),
            total_slashed_amount: slashed,
        },
        protocol_fees: allocation.protocol_fee,
        rewards_for_winners: allocation.winners_pool,
        rounding_dust: allocation.rounding_dust,
        protocol_take,
        winner_count: allocation.rewards.len(),
        total_weight: allocation.total_weight.to_string(),
        user_results,
    })
}

fn user_result(
    participant: &Participant,
    allocation: &Allocation,
    commitment: &MerkleCommitment,
    signer: &AttestationSigner,
) -> Result<UserResult> {
    let address = participant.address;
    let stake_returned = stake_return(participant.stake_amount, participant.completed);
    let reward = allocation.reward_of(&address).unwrap_or(0);
    let total_payout = stake_returned
        .checked_add(reward)
        .ok_or(SettlementError::Arithmetic("payout overflows u64"))?;
    let proof = commitment.proof_of(&address).unwrap_or(&[]);
    let attestation = signer.attest(&address, participant.start_time, participant.duration, participant.completed);
    let claim_ready = claim_would_verify(participant, reward, proof, commitment, &attestation);

    if !claim_ready {
        return Err(SettlementError::Crypto(format!("self-check failed for {address}")));
    }

    let user_weight = if participant.completed {
        weight(participant.stake_amount, participant.duration)
    } else {
        0
    };

    debug!(
        address = %address,
        completed = participant.completed,
        reward,
        payout = total_payout,
        proof_len = proof.len(),
        "participant settled"
    );

    Ok(UserResult {
        address: address.to_string(),
        start_time: participant.start_time,
        duration: participant.duration,
        stake_amount: participant.stake_amount,
        completion_status: participant.completed,
        stake_return_amount: stake_returned,
        reward_amount: reward,
        total_payout,
        weight: user_weight.to_string(),
        signature: SignatureOutput {
            r: to_hex(&attestation.signature.r),
            s: to_hex(&attestation.signature.s),
            v: attestation.signature.recovery_id,
            message_hash: to_hex(&attestation.message_hash),
            public_key: to_hex(&attestation.public_key),
        },
        merkle_proof: proof.iter().map(|node| to_hex(node)).collect(),
        is_winner: commitment.proof_of(&address).is_some(),
        claim_ready,
    })
}

/// Run the on-ledger signature and commitment checks against this output
fn claim_would_verify(
    participant: &Participant,
    reward: u64,
    proof: &[[u8; 32]],
    commitment: &MerkleCommitment,
    attestation: &Attestation,
) -> bool {
    let signed = verify_attestation(
        &attestation.public_key,
        &participant.address,
        participant.start_time,
        participant.duration,
        participant.completed,
        &attestation.signature,
    )
    .is_ok();

    let committed = match (participant.completed, commitment.is_empty()) {
        (false, _) => reward == 0,
        (true, true) => reward == 0 && proof.is_empty(),
        (true, false) => verify_proof(&leaf_hash(&participant.address, reward), proof, &commitment.root),
    };

    signed && committed
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";
    const START: u64 = 1_700_000_000;

    fn input(users: Vec<UserInput>) -> SettlementInput {
        SettlementInput {
            pool_info: PoolInfoInput {
                contract_address: stake_commit::ID.to_string(),
                verifier_private_key: KEY.into(),
            },
            users,
        }
    }

    fn user(address: &Pubkey, stake: u64, duration: u64, completed: bool) -> UserInput {
        UserInput {
            address: address.to_string(),
            stake_amount: stake,
            completion_status: completed,
            start_time: START,
            duration,
        }
    }

    #[test]
    fn two_participant_example() {
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        let report = settle(&input(vec![user(&a, 100, 3_600, true), user(&b, 50, 1_800, false)])).unwrap();

        assert_eq!(report.pool_info.total_slashed_amount, 50);
        assert_eq!(report.protocol_fees, 5);
        assert_eq!(report.rewards_for_winners, 45);
        assert_eq!(report.pool_info.merkle_root, to_hex(&leaf_hash(&a, 45)));
        assert_eq!(report.pool_info.day, 19_675);
        assert_eq!(report.pool_info.period, 1);

        let winner = &report.user_results[0];
        assert_eq!(winner.weight, "360000");
        assert_eq!(winner.reward_amount, 45);
        assert_eq!(winner.total_payout, 145);
        assert!(winner.merkle_proof.is_empty());
        assert!(winner.is_winner && winner.claim_ready);

        let loser = &report.user_results[1];
        assert_eq!(loser.stake_return_amount, 0);
        assert_eq!(loser.total_payout, 0);
        assert_eq!(loser.weight, "0");
        assert!(!loser.is_winner && loser.claim_ready);
    }

    #[test]
    fn fee_and_pool_are_exact_complement() {
        let users: Vec<UserInput> = (0..9)
            .map(|i| user(&Pubkey::new_unique(), 1_000 + i * 37, 1_800 + i * 600, i % 3 != 0))
            .collect();
        let report = settle(&input(users)).unwrap();

        assert_eq!(report.protocol_fees + report.rewards_for_winners, report.pool_info.total_slashed_amount);
        let distributed: u64 = report.user_results.iter().map(|u| u.reward_amount).sum();
        assert_eq!(distributed + report.rounding_dust, report.rewards_for_winners);
        assert!(report.rounding_dust < report.winner_count as u64);
        assert_eq!(report.protocol_take, report.protocol_fees + report.rounding_dust);
        assert_eq!(report.protocol_take, report.pool_info.total_slashed_amount - distributed);
    }

    #[test]
    fn all_completed_yields_sentinel_root() {
        let report = settle(&input(vec![
            user(&Pubkey::new_unique(), 10, 3_600, true),
            user(&Pubkey::new_unique(), 20, 3_600, true),
        ]))
        .unwrap();

        assert_eq!(report.pool_info.merkle_root, to_hex(&[0u8; 32]));
        assert_eq!(report.protocol_fees, 0);
        assert_eq!(report.winner_count, 0);
        assert!(report.user_results.iter().all(|u| u.total_payout == u.stake_amount && u.claim_ready));
    }

    #[test]
    fn all_failed_keeps_everything_in_vault() {
        let report = settle(&input(vec![
            user(&Pubkey::new_unique(), 10, 3_600, false),
            user(&Pubkey::new_unique(), 20, 3_600, false),
        ]))
        .unwrap();

        assert_eq!(report.pool_info.total_slashed_amount, 30);
        assert_eq!(report.protocol_fees, 0);
        assert_eq!(report.rewards_for_winners, 0);
        assert_eq!(report.protocol_take, 30);
        assert!(report.user_results.iter().all(|u| u.total_payout == 0));
    }

    #[test]
    fn reordering_keeps_root_and_proofs() {
        let users: Vec<UserInput> = (0..6)
            .map(|i| user(&Pubkey::new_unique(), 500 + i * 13, 3_600 + i * 60, i != 2))
            .collect();
        let mut reversed = users.clone();
        reversed.reverse();

        let forward = settle(&input(users)).unwrap();
        let backward = settle(&input(reversed)).unwrap();

        assert_eq!(forward.pool_info, backward.pool_info);
        assert_eq!(forward.protocol_fees, backward.protocol_fees);
        assert_eq!(forward.rewards_for_winners, backward.rewards_for_winners);
        for result in &forward.user_results {
            let twin = backward.user_results.iter().find(|u| u.address == result.address).unwrap();
            assert_eq!(result, twin);
        }
    }

    #[test]
    fn invalid_record_aborts_batch() {
        let mut bad = user(&Pubkey::new_unique(), 10, 3_600, true);
        bad.stake_amount = 0;
        let err = settle(&input(vec![user(&Pubkey::new_unique(), 10, 3_600, false), bad])).unwrap_err();
        assert!(matches!(err, SettlementError::Validation { index: 1, .. }));
    }

    #[test]
    fn invalid_pool_info_rejected() {
        let mut bad_key = input(vec![user(&Pubkey::new_unique(), 10, 3_600, true)]);
        bad_key.pool_info.verifier_private_key = "xyz".into();
        assert!(matches!(settle(&bad_key), Err(SettlementError::Input(_))));

        let mut bad_contract = input(vec![user(&Pubkey::new_unique(), 10, 3_600, true)]);
        bad_contract.pool_info.contract_address = "0x".into();
        assert!(matches!(settle(&bad_contract), Err(SettlementError::Input(_))));
    }
}
