//! Hash domain shared by the settlement engine and the claim verifier.
//!
//! Every value is hashed as a sequence of 32-byte big-endian words:
//! an address is its raw 32 bytes, integers are left-padded, booleans are 0/1.
//! The off-line engine links this module directly so the two sides cannot
//! drift apart.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::keccak;

pub type Hash32 = [u8; 32];

pub fn word_u64(value: u64) -> Hash32 {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}

pub fn word_u128(value: u128) -> Hash32 {
    let mut word = [0u8; 32];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

pub fn word_bool(value: bool) -> Hash32 {
    word_u64(value as u64)
}

/// Low and high 128-bit limbs of a reward widened to 256 bits
pub fn reward_limbs(reward: u64) -> (u128, u128) {
    (reward as u128, 0)
}

/// leaf = H(address, reward_low128, reward_high128)
pub fn leaf_hash(address: &Pubkey, reward: u64) -> Hash32 {
    let (low, high) = reward_limbs(reward);
    keccak::hashv(&[address.as_ref(), &word_u128(low)[..], &word_u128(high)[..]]).to_bytes()
}

/// Parent node: children hashed in ascending numeric order
pub fn hash_pair(a: &Hash32, b: &Hash32) -> Hash32 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    keccak::hashv(&[&lo[..], &hi[..]]).to_bytes()
}

/// Climb from `leaf` through `proof`; true iff the result equals `root`
pub fn verify_proof(leaf: &Hash32, proof: &[Hash32], root: &Hash32) -> bool {
    let computed = proof
        .iter()
        .fold(*leaf, |node, sibling| hash_pair(&node, sibling));
    computed == *root
}

/// message_hash = H(address, start_time, duration, completed)
pub fn message_hash(address: &Pubkey, start_time: u64, duration: u64, completed: bool) -> Hash32 {
    keccak::hashv(&[
        address.as_ref(),
        &word_u64(start_time)[..],
        &word_u64(duration)[..],
        &word_bool(completed)[..],
    ])
    .to_bytes()
}
