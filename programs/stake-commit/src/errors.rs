use anchor_lang::prelude::*;

/// Stake Commit Error Codes
///
/// Grouped by failure class. Every on-ledger failure aborts the whole
/// transaction, so no variant implies a partial state change.
#[error_code]
pub enum ErrorCode {
    // Validation errors
    #[msg("Stake amount must be positive")]
    InvalidStakeAmount,

    #[msg("Duration outside allowed range")]
    InvalidDuration,

    #[msg("Start time must be in the future")]
    StartTimeNotInFuture,

    #[msg("Period out of range")]
    InvalidPeriod,

    #[msg("Stake value below minimum")]
    StakeBelowMinimum,

    #[msg("Invalid parameter")]
    InvalidParameter,

    #[msg("Merkle proof too long")]
    ProofTooLong,

    // Arithmetic errors
    #[msg("Arithmetic overflow")]
    MathOverflow,

    // Crypto errors
    #[msg("Attestation signature invalid")]
    InvalidSignature,

    #[msg("Merkle proof invalid")]
    InvalidMerkleProof,

    #[msg("Non-completed claim must carry zero reward")]
    NonZeroRewardForFailedLock,

    // State errors
    #[msg("Caller does not own this lock")]
    NotLockOwner,

    #[msg("Lock period has not ended")]
    LockNotEnded,

    #[msg("Lock not active")]
    LockNotActive,

    #[msg("Lock already active in this pool")]
    LockAlreadyActive,

    #[msg("Claim parameters do not match the lock")]
    LockMismatch,

    #[msg("Pool not finalized - root not published")]
    PoolNotFinalized,

    #[msg("Already claimed")]
    AlreadyClaimed,

    #[msg("Re-entrant call rejected")]
    ReentrantCall,

    #[msg("Price feed stale")]
    StalePrice,

    // Transfer errors
    #[msg("Token transfer failed")]
    TransferFailed,

    // Access control
    #[msg("Unauthorized")]
    UnauthorizedAccess,

    #[msg("Mint mismatch")]
    MintMismatch,
}
