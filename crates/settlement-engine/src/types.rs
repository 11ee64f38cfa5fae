//! Batch input and report documents.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SettlementInput {
    pub pool_info: PoolInfoInput,
    pub users: Vec<UserInput>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PoolInfoInput {
    /// Program id the report is settled for (base58)
    pub contract_address: String,
    /// Authority secp256k1 secret key, 32 bytes hex (optional 0x prefix)
    pub verifier_private_key: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserInput {
    /// Participant wallet (base58)
    pub address: String,
    pub stake_amount: u64,
    pub completion_status: bool,
    pub start_time: u64,
    pub duration: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SettlementReport {
    pub pool_info: PoolInfoOutput,
    pub protocol_fees: u64,
    pub rewards_for_winners: u64,
    /// Floor-division residue left undistributed in the vault
    pub rounding_dust: u64,
    /// total_slashed minus distributed rewards: everything left in the vault
    /// after all claims (protocol_fees + rounding_dust when rewards exist)
    pub protocol_take: u64,
    pub winner_count: usize,
    /// Sum of winner weights, decimal (u128)
    pub total_weight: String,
    pub user_results: Vec<UserResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PoolInfoOutput {
    pub day: u64,
    pub period: u8,
    pub contract_address: String,
    pub merkle_root: String,
    pub total_slashed_amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserResult {
    pub address: String,
    pub start_time: u64,
    pub duration: u64,
    pub stake_amount: u64,
    pub completion_status: bool,
    pub stake_return_amount: u64,
    pub reward_amount: u64,
    pub total_payout: u64,
    /// stake * duration, decimal (u128); zero for failed participants
    pub weight: String,
    pub signature: SignatureOutput,
    pub merkle_proof: Vec<String>,
    pub is_winner: bool,
    pub claim_ready: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SignatureOutput {
    pub r: String,
    pub s: String,
    pub v: u8,
    pub message_hash: String,
    pub public_key: String,
}

/// 0x-prefixed lowercase hex
pub fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Decode hex with or without a 0x prefix into exactly `N` bytes
pub fn from_hex<const N: usize>(value: &str) -> Option<[u8; N]> {
    let digits = value.strip_prefix("0x").unwrap_or(value);
    let bytes = hex::decode(digits).ok()?;
    bytes.try_into().ok()
}
