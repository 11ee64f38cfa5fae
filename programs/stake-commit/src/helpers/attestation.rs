use anchor_lang::prelude::*;
use anchor_lang::solana_program::secp256k1_recover::secp256k1_recover;
use crate::errors::ErrorCode;
use crate::helpers::commitment::{message_hash, Hash32};

/// secp256k1 ECDSA signature over a message hash, with recovery id
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthoritySignature {
    pub r: [u8; 32],
    pub s: [u8; 32],
    /// Recovery id (0..=3)
    pub recovery_id: u8,
}

impl AuthoritySignature {
    /// Compact r || s encoding expected by the recover syscall
    pub fn to_bytes(&self) -> [u8; 64] {
        let mut bytes = [0u8; 64];
        bytes[..32].copy_from_slice(&self.r);
        bytes[32..].copy_from_slice(&self.s);
        bytes
    }
}

/// Recover the uncompressed (x || y) public key that produced `signature`
pub fn recover_signer(hash: &Hash32, signature: &AuthoritySignature) -> Result<[u8; 64]> {
    let recovered = secp256k1_recover(hash, signature.recovery_id, &signature.to_bytes())
        .map_err(|_| ErrorCode::InvalidSignature)?;
    Ok(recovered.to_bytes())
}

/// Recompute the attestation hash from the claimed outcome and check that
/// the trusted authority signed it. Returns the message hash on success.
pub fn verify_attestation(
    authority_key: &[u8; 64],
    address: &Pubkey,
    start_time: u64,
    duration: u64,
    completed: bool,
    signature: &AuthoritySignature,
) -> Result<Hash32> {
    let hash = message_hash(address, start_time, duration, completed);
    let signer = recover_signer(&hash, signature)?;
    require!(signer == *authority_key, ErrorCode::InvalidSignature);

    #[cfg(feature = "verbose")]
    msg!("Attestation verified for {}", address);

    Ok(hash)
}
