// ══════════════════════════════════════════════════════════════════════════════
// PDA SEEDS
// ══════════════════════════════════════════════════════════════════════════════

pub const CONFIG_SEED: &[u8] = b"config";
pub const VAULT_AUTHORITY_SEED: &[u8] = b"vault";
pub const PRICE_FEED_SEED: &[u8] = b"price_feed";
pub const POOL_SEED: &[u8] = b"pool";
pub const LOCK_SEED: &[u8] = b"lock";
pub const CLAIM_SEED: &[u8] = b"claim";

// ══════════════════════════════════════════════════════════════════════════════
// TIME WINDOWS
// ══════════════════════════════════════════════════════════════════════════════

pub const SECONDS_PER_DAY: u64 = 86_400;

/// Pool window length: two 12-hour windows per UTC day (AM = 0, PM = 1)
pub const WINDOW_SECONDS: u64 = 43_200;

pub const PERIODS_PER_DAY: u8 = (SECONDS_PER_DAY / WINDOW_SECONDS) as u8;

// ══════════════════════════════════════════════════════════════════════════════
// LOCK LIMITS
// ══════════════════════════════════════════════════════════════════════════════

/// Shortest commitment a participant may declare (30 minutes)
pub const MIN_DURATION: u64 = 1_800;

/// Longest commitment a participant may declare (30 days)
pub const MAX_DURATION: u64 = 30 * SECONDS_PER_DAY;

// ══════════════════════════════════════════════════════════════════════════════
// SETTLEMENT
// ══════════════════════════════════════════════════════════════════════════════

/// Share of the slashed pool kept by the protocol, in percent
pub const PROTOCOL_FEE_PERCENT: u64 = 10;

/// Proof length cap: a 2^32-leaf tree is far beyond any single pool
pub const MAX_PROOF_DEPTH: usize = 32;

/// Root value of a tree with no leaves
pub const EMPTY_ROOT: [u8; 32] = [0u8; 32];

// ══════════════════════════════════════════════════════════════════════════════
// PRICE FEED
// ══════════════════════════════════════════════════════════════════════════════

/// Oracle prices older than this (seconds) are refused at deposit time
pub const MAX_PRICE_AGE: i64 = 3_600;

/// Largest decimals exponent accepted for a price unit (10^18 fits u128 math)
pub const MAX_UNIT_DECIMALS: u8 = 18;
