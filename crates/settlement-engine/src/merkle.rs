//! Merkle commitment over (winner, reward) leaves.
//!
//! Leaves are sorted by hash before the tree is built, so the root and every
//! proof depend only on the set of (address, reward) pairs and never on input
//! order. Parents use the sorted-pair rule from `stake_commit::helpers::commitment`;
//! an odd node at the end of a layer is paired with itself.

use std::collections::BTreeMap;

use anchor_lang::prelude::Pubkey;
use stake_commit::helpers::commitment::{hash_pair, leaf_hash, Hash32};
use stake_commit::EMPTY_ROOT;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleCommitment {
    pub root: Hash32,
    pub proofs: BTreeMap<Pubkey, Vec<Hash32>>,
}

impl MerkleCommitment {
    pub fn build(rewards: &[(Pubkey, u64)]) -> Self {
        if rewards.is_empty() {
            return Self {
                root: EMPTY_ROOT,
                proofs: BTreeMap::new(),
            };
        }

        let mut leaves: Vec<(Hash32, Pubkey)> = rewards
            .iter()
            .map(|(address, reward)| (leaf_hash(address, *reward), *address))
            .collect();
        leaves.sort();

        let mut proofs: Vec<Vec<Hash32>> = vec![Vec::new(); leaves.len()];
        let mut positions: Vec<usize> = (0..leaves.len()).collect();
        let mut layer: Vec<Hash32> = leaves.iter().map(|(leaf, _)| *leaf).collect();

        while layer.len() > 1 {
            for (proof, position) in proofs.iter_mut().zip(positions.iter_mut()) {
                proof.push(sibling(&layer, *position));
                *position /= 2;
            }
            layer = layer
                .chunks(2)
                .map(|pair| hash_pair(&pair[0], pair.get(1).unwrap_or(&pair[0])))
                .collect();
        }

        Self {
            root: layer[0],
            proofs: leaves
                .into_iter()
                .map(|(_, address)| address)
                .zip(proofs)
                .collect(),
        }
    }

    pub fn proof_of(&self, address: &Pubkey) -> Option<&[Hash32]> {
        self.proofs.get(address).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.proofs.is_empty()
    }
}

fn sibling(layer: &[Hash32], position: usize) -> Hash32 {
    if position % 2 == 0 {
        *layer.get(position + 1).unwrap_or(&layer[position])
    } else {
        layer[position - 1]
    }
}
