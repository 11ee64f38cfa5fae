// ============================================================================
// FORMAL PROPERTIES & INVARIANT TESTS
// ============================================================================
//
// Run with: cargo test --lib formal_verification
//
// This module checks:
// 1. Settlement invariants over multi-participant pools
// 2. Claim state machine monotonicity
// 3. Edge-case sweeps over window classification and proofs
// ============================================================================

#[cfg(test)]
mod formal_tests {
    use anchor_lang::prelude::*;
    use crate::constants::*;
    use crate::helpers::commitment::*;
    use crate::helpers::window::*;
    use crate::state::*;
    use crate::tests::fixtures::*;
    use crate::verifier::*;
    use crate::ErrorCode;

    /// Pairwise tree over `leaves` in the given order, odd node paired with itself.
    /// Returns the root and one proof per leaf.
    fn build_tree(leaves: &[Hash32]) -> (Hash32, Vec<Vec<Hash32>>) {
        let mut proofs: Vec<Vec<Hash32>> = vec![Vec::new(); leaves.len()];
        let mut positions: Vec<usize> = (0..leaves.len()).collect();
        let mut level = leaves.to_vec();

        while level.len() > 1 {
            let mut next = Vec::with_capacity(level.len().div_ceil(2));
            for pair in level.chunks(2) {
                let right = if pair.len() == 2 { pair[1] } else { pair[0] };
                next.push(hash_pair(&pair[0], &right));
            }
            for (leaf, pos) in positions.iter_mut().enumerate() {
                let sibling = if *pos % 2 == 0 {
                    level.get(*pos + 1).copied().unwrap_or(level[*pos])
                } else {
                    level[*pos - 1]
                };
                proofs[leaf].push(sibling);
                *pos /= 2;
            }
            level = next;
        }

        (level.first().copied().unwrap_or(EMPTY_ROOT), proofs)
    }

    struct Participant {
        key: Pubkey,
        lock: Lock,
        claim_record: ClaimRecord,
        completed: bool,
        reward: u64,
    }

    /// Five equal stakes, three winners sharing 90% of the two slashed stakes
    fn settled_pool() -> (ProgramConfig, Pool, FakeLedger, TestAuthority, Vec<Participant>, Hash32, Vec<Vec<Hash32>>) {
        let authority = TestAuthority::new(21);
        let admin = Pubkey::new_unique();
        let mut config = config_for(admin, &authority);
        let mut pool = Pool::default();
        let mut ledger = FakeLedger::default();

        let outcomes = [(true, 600_000u64), (false, 0), (true, 600_000), (false, 0), (true, 600_000)];
        let mut participants = Vec::new();
        for (completed, reward) in outcomes {
            let key = Pubkey::new_unique();
            ledger.balances.insert(key, STAKE);
            let mut lock = Lock::default();
            process_deposit(&mut config, &mut pool, &mut lock, &key, DEPOSIT_TIME, START, DURATION, STAKE, &mut ledger)
                .unwrap();
            participants.push(Participant { key, lock, claim_record: ClaimRecord::default(), completed, reward });
        }

        let winners: Vec<Hash32> = participants
            .iter()
            .filter(|p| p.completed)
            .map(|p| leaf_hash(&p.key, p.reward))
            .collect();
        let (root, proofs) = build_tree(&winners);
        process_publish_root(&config, &admin, &mut pool, classify(START), root, AFTER_END).unwrap();

        (config, pool, ledger, authority, participants, root, proofs)
    }

    fn request_for(authority: &TestAuthority, p: &Participant, proof: Vec<Hash32>) -> ClaimRequest {
        ClaimRequest {
            start_time: START,
            duration: DURATION,
            completion_status: p.completed,
            signature: authority.sign(&p.key, START, DURATION, p.completed),
            reward_amount: p.reward,
            merkle_proof: proof,
        }
    }

    // ========================================================================
    // SECTION 1: SETTLEMENT INVARIANTS
    // ========================================================================

    mod invariants {
        use super::*;

        /// INV-1: Vault Conservation
        /// paid_out = winner stakes + rewards <= total deposited; the remainder is the protocol take
        #[test]
        fn inv1_vault_conservation() {
            let (mut config, mut pool, mut ledger, authority, mut participants, _, proofs) = settled_pool();
            let mut winner_index = 0;

            for p in participants.iter_mut() {
                let proof = if p.completed {
                    winner_index += 1;
                    proofs[winner_index - 1].clone()
                } else {
                    vec![]
                };
                let request = request_for(&authority, p, proof);
                process_claim(&mut config, &mut pool, &mut p.lock, &mut p.claim_record, &p.key, AFTER_END, &request, &mut ledger)
                    .unwrap();
            }

            let expected_paid = 3 * STAKE + 1_800_000;
            assert_eq!(pool.total_paid_out, expected_paid);
            assert_eq!(config.total_paid_out, expected_paid);
            assert!(pool.total_paid_out <= pool.total_staked);
            assert_eq!(ledger.balance(&config.vault), 5 * STAKE - expected_paid);
            // Protocol keeps 10% of the slashed stakes
            assert_eq!(ledger.balance(&config.vault), 2 * STAKE * PROTOCOL_FEE_PERCENT / 100);
            assert_eq!(pool.claims_settled, 5);
        }

        /// INV-2: Losers Forfeit Stake
        /// A failed participant never receives tokens
        #[test]
        fn inv2_losers_receive_nothing() {
            let (mut config, mut pool, mut ledger, authority, mut participants, _, _) = settled_pool();
            let loser = &mut participants[1];
            let request = request_for(&authority, loser, vec![]);
            let outcome = process_claim(
                &mut config, &mut pool, &mut loser.lock, &mut loser.claim_record, &loser.key, AFTER_END, &request, &mut ledger,
            )
            .unwrap();

            assert_eq!(outcome.payout, 0);
            assert_eq!(ledger.balance(&loser.key), 0);
        }

        /// INV-3: Proof Binding
        /// Every winner's proof verifies for its own reward only
        #[test]
        fn inv3_proof_binding() {
            let (_, _, _, _, participants, root, proofs) = settled_pool();
            let winners: Vec<&Participant> = participants.iter().filter(|p| p.completed).collect();

            for (i, winner) in winners.iter().enumerate() {
                assert!(verify_proof(&leaf_hash(&winner.key, winner.reward), &proofs[i], &root));
                assert!(!verify_proof(&leaf_hash(&winner.key, winner.reward + 1), &proofs[i], &root));
                for (j, other) in winners.iter().enumerate() {
                    if i != j {
                        assert!(!verify_proof(&leaf_hash(&other.key, other.reward), &proofs[i], &root));
                    }
                }
            }
        }

        /// INV-4: No Loser Leaf
        /// A failed participant cannot prove a reward against the root
        #[test]
        fn inv4_loser_has_no_leaf() {
            let (_, _, _, _, participants, root, proofs) = settled_pool();
            for loser in participants.iter().filter(|p| !p.completed) {
                for proof in &proofs {
                    assert!(!verify_proof(&leaf_hash(&loser.key, 600_000), proof, &root));
                    assert!(!verify_proof(&leaf_hash(&loser.key, 0), proof, &root));
                }
            }
        }
    }

    // ========================================================================
    // SECTION 2: STATE MACHINE
    // ========================================================================

    mod state_machine {
        use super::*;

        /// SM-1: Claim Flag Is Write-Once
        /// Failed attempts never set it; success sets it; retries never clear it
        #[test]
        fn sm1_claim_flag_write_once() {
            let mut s = Scenario::deposited();
            s.publish(leaf_hash(&s.owner, 45));

            let bad = s.request(true, 46, vec![]);
            assert!(s.claim(AFTER_END, &bad).is_err());
            assert!(!s.claim_record.is_claimed());

            let good = s.request(true, 45, vec![]);
            s.claim(AFTER_END, &good).unwrap();
            assert!(s.claim_record.is_claimed());

            for attempt in [&bad, &good] {
                assert!(s.claim(AFTER_END + 10, attempt).is_err());
                assert!(s.claim_record.is_claimed());
            }
            assert_eq!(s.pool.claims_settled, 1);
        }

        /// SM-2: Lock Status Is Monotonic
        /// Inactive -> Active -> Completed, never backwards
        #[test]
        fn sm2_lock_status_monotonic() {
            let mut s = Scenario::fresh();
            assert_eq!(s.lock.status, LockStatus::Inactive);

            s.deposit(DEPOSIT_TIME, START, DURATION, STAKE).unwrap();
            assert_eq!(s.lock.status, LockStatus::Active);
            assert_error(s.deposit(DEPOSIT_TIME, START, DURATION, STAKE), ErrorCode::LockAlreadyActive);

            s.publish(leaf_hash(&s.owner, 0));
            let request = s.request(true, 0, vec![]);
            s.claim(AFTER_END, &request).unwrap();
            assert_eq!(s.lock.status, LockStatus::Completed);

            assert_error(s.deposit(DEPOSIT_TIME, START, DURATION, STAKE), ErrorCode::LockAlreadyActive);
            assert_eq!(s.lock.status, LockStatus::Completed);
        }

        /// SM-3: Republished Root Governs Later Claims
        #[test]
        fn sm3_republished_root_governs() {
            let mut s = Scenario::deposited();
            s.publish(leaf_hash(&s.owner, 45));
            s.publish(leaf_hash(&s.owner, 90));

            let stale = s.request(true, 45, vec![]);
            assert_error(s.claim(AFTER_END, &stale), ErrorCode::InvalidMerkleProof);
            let current = s.request(true, 90, vec![]);
            assert_eq!(s.claim(AFTER_END, &current).unwrap().reward_amount, 90);
        }
    }

    // ========================================================================
    // SECTION 3: EDGE-CASE SWEEPS
    // ========================================================================

    mod fuzzing {
        use super::*;

        /// FUZZ-1: Every timestamp falls inside exactly the window it classifies to
        #[test]
        fn fuzz1_window_classification() {
            let mut t = 0u64;
            while t < 10 * SECONDS_PER_DAY {
                let key = classify(t);
                let window_start = key.day * SECONDS_PER_DAY + key.period as u64 * WINDOW_SECONDS;
                assert!(key.period < PERIODS_PER_DAY);
                assert!(window_start <= t);
                assert!(t < window_start + WINDOW_SECONDS);
                t += 977;
            }
        }

        /// FUZZ-2: Tree sizes 1..=17 produce verifiable proofs within the depth cap
        #[test]
        fn fuzz2_tree_sizes() {
            for n in 1..=17u64 {
                let keys: Vec<Pubkey> = (0..n).map(|_| Pubkey::new_unique()).collect();
                let leaves: Vec<Hash32> = keys.iter().enumerate().map(|(i, k)| leaf_hash(k, i as u64 * 7)).collect();
                let (root, proofs) = build_tree(&leaves);
                for (leaf, proof) in leaves.iter().zip(&proofs) {
                    assert!(proof.len() <= MAX_PROOF_DEPTH);
                    assert!(verify_proof(leaf, proof, &root));
                }
            }
        }

        /// FUZZ-3: Duration bounds are inclusive
        #[test]
        fn fuzz3_duration_bounds() {
            for duration in [MIN_DURATION - 1, MIN_DURATION, MIN_DURATION + 1, MAX_DURATION - 1, MAX_DURATION, MAX_DURATION + 1] {
                let valid = (MIN_DURATION..=MAX_DURATION).contains(&duration);
                assert_eq!(validate_lock_params(START, duration, STAKE, DEPOSIT_TIME).is_ok(), valid);
            }
        }

        /// FUZZ-4: Price valuation never overflows across decimals and extremes
        #[test]
        fn fuzz4_price_valuation() {
            for decimals in 0..=MAX_UNIT_DECIMALS {
                let feed = PriceFeed { price_usd_micros: u64::MAX, unit_decimals: decimals, updated_at: 1, ..PriceFeed::default() };
                assert!(feed.value_usd_micros(u64::MAX).is_ok());
                assert_eq!(feed.value_usd_micros(0).unwrap(), 0);
            }
        }
    }
}
