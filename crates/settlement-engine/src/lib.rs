//! Off-line settlement engine for stake-commit pools.
//!
//! Reads one pool's participant batch, slashes failed stakes, splits the
//! slashed amount into a protocol fee and proportional winner rewards, commits
//! the rewards to a Merkle root and signs every participant's outcome with the
//! authority key. All hashing comes from `stake_commit::helpers`, the same code
//! the on-ledger verifier runs.

pub mod allocator;
pub mod engine;
pub mod error;
pub mod math;
pub mod merkle;
pub mod signer;
pub mod slashing;
pub mod types;

pub use engine::settle;
pub use error::{Result, SettlementError};
pub use types::{SettlementInput, SettlementReport};

/// Parse a JSON batch, settle it and render the report
pub fn settle_json(input: &str, pretty: bool) -> Result<String> {
    let batch: SettlementInput = serde_json::from_str(input)?;
    let report = settle(&batch)?;
    let rendered = if pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    Ok(rendered)
}
