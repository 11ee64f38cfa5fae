use anchor_lang::prelude::Pubkey;
use libsecp256k1::{Message, PublicKey, SecretKey};
use stake_commit::helpers::commitment::{message_hash, Hash32};
use stake_commit::AuthoritySignature;

use crate::error::{Result, SettlementError};
use crate::types::from_hex;

/// Signed outcome for one participant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attestation {
    pub message_hash: Hash32,
    pub signature: AuthoritySignature,
    pub public_key: [u8; 64],
}

/// Holds the authority secret key and signs participant outcomes
pub struct AttestationSigner {
    secret: SecretKey,
    public_key: [u8; 64],
}

impl AttestationSigner {
    pub fn from_secret_bytes(bytes: &[u8; 32]) -> Result<Self> {
        let secret = SecretKey::parse(bytes)
            .map_err(|e| SettlementError::Crypto(format!("invalid verifier private key: {e:?}")))?;
        let serialized = PublicKey::from_secret_key(&secret).serialize();
        let mut public_key = [0u8; 64];
        public_key.copy_from_slice(&serialized[1..]);
        Ok(Self { secret, public_key })
    }

    pub fn from_hex(value: &str) -> Result<Self> {
        let bytes = from_hex::<32>(value.trim())
            .ok_or_else(|| SettlementError::Input("verifier_private_key must be 32 bytes of hex".into()))?;
        Self::from_secret_bytes(&bytes)
    }

    /// Uncompressed public key, x || y
    pub fn public_key(&self) -> &[u8; 64] {
        &self.public_key
    }

    pub fn attest(&self, address: &Pubkey, start_time: u64, duration: u64, completed: bool) -> Attestation {
        let hash = message_hash(address, start_time, duration, completed);
        let (signature, recovery_id) = libsecp256k1::sign(&Message::parse(&hash), &self.secret);
        let bytes = signature.serialize();

        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);

        Attestation {
            message_hash: hash,
            signature: AuthoritySignature {
                r,
                s,
                recovery_id: recovery_id.serialize(),
            },
            public_key: self.public_key,
        }
    }
}
