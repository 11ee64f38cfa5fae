use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};
use crate::constants::*;
use crate::errors::ErrorCode;
use crate::helpers::window::classify;
use crate::state::*;

// ACCOUNTS - Instruction account validation structs

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(init, payer = admin, space = 8 + ProgramConfig::LEN, seeds = [CONFIG_SEED], bump)]
    pub config: Box<Account<'info, ProgramConfig>>,
    /// CHECK: PDA - signs vault payouts
    #[account(seeds = [VAULT_AUTHORITY_SEED], bump)]
    pub vault_authority: AccountInfo<'info>,
    #[account(
        init,
        payer = admin,
        associated_token::mint = stake_mint,
        associated_token::authority = vault_authority,
        associated_token::token_program = token_program
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,
    #[account(init, payer = admin, space = 8 + PriceFeed::LEN, seeds = [PRICE_FEED_SEED], bump)]
    pub price_feed: Box<Account<'info, PriceFeed>>,
    pub stake_mint: Box<InterfaceAccount<'info, Mint>>,
    /// CHECK: Oracle identity - only recorded, must sign update_price
    pub oracle: UncheckedAccount<'info>,
    #[account(mut)]
    pub admin: Signer<'info>,
    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

/// AdminControl - admin-only configuration changes
/// The admin check itself lives in the verifier so every path reports the same error.
#[derive(Accounts)]
pub struct AdminControl<'info> {
    #[account(mut, seeds = [CONFIG_SEED], bump = config.bump)]
    pub config: Box<Account<'info, ProgramConfig>>,
    pub admin: Signer<'info>,
}

#[derive(Accounts)]
pub struct UpdatePrice<'info> {
    #[account(seeds = [CONFIG_SEED], bump = config.bump)]
    pub config: Box<Account<'info, ProgramConfig>>,
    #[account(
        mut,
        seeds = [PRICE_FEED_SEED],
        bump = price_feed.bump,
        address = config.price_feed @ ErrorCode::InvalidParameter
    )]
    pub price_feed: Box<Account<'info, PriceFeed>>,
    #[account(constraint = oracle.key() == price_feed.oracle @ ErrorCode::UnauthorizedAccess)]
    pub oracle: Signer<'info>,
}

/// Deposit - open a lock in the pool derived from `start_time`
///
/// Pool and lock are created on first use. A lock that already left the
/// Inactive state is rejected by the verifier.
#[derive(Accounts)]
#[instruction(start_time: u64)]
pub struct Deposit<'info> {
    #[account(mut, seeds = [CONFIG_SEED], bump = config.bump)]
    pub config: Box<Account<'info, ProgramConfig>>,
    #[account(
        init_if_needed,
        payer = owner,
        space = 8 + Pool::LEN,
        seeds = [POOL_SEED, &classify(start_time).day_seed(), &classify(start_time).period_seed()],
        bump
    )]
    pub pool: Box<Account<'info, Pool>>,
    #[account(
        init_if_needed,
        payer = owner,
        space = 8 + Lock::LEN,
        seeds = [LOCK_SEED, owner.key().as_ref(), &classify(start_time).day_seed(), &classify(start_time).period_seed()],
        bump
    )]
    pub lock: Box<Account<'info, Lock>>,
    #[account(address = config.price_feed @ ErrorCode::InvalidParameter)]
    pub price_feed: Box<Account<'info, PriceFeed>>,
    #[account(address = config.stake_mint @ ErrorCode::MintMismatch)]
    pub stake_mint: Box<InterfaceAccount<'info, Mint>>,
    #[account(mut, address = config.vault @ ErrorCode::InvalidParameter)]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,
    /// CHECK: Vault authority PDA
    #[account(seeds = [VAULT_AUTHORITY_SEED], bump = config.vault_authority_bump)]
    pub vault_authority: AccountInfo<'info>,
    #[account(
        mut,
        constraint = owner_token_account.mint == stake_mint.key() @ ErrorCode::MintMismatch,
        constraint = owner_token_account.owner == owner.key() @ ErrorCode::NotLockOwner
    )]
    pub owner_token_account: Box<InterfaceAccount<'info, TokenAccount>>,
    #[account(mut)]
    pub owner: Signer<'info>,
    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(day: u64, period: u8)]
pub struct PublishRoot<'info> {
    #[account(seeds = [CONFIG_SEED], bump = config.bump)]
    pub config: Box<Account<'info, ProgramConfig>>,
    #[account(mut, seeds = [POOL_SEED, &day.to_le_bytes(), &[period]], bump = pool.bump)]
    pub pool: Box<Account<'info, Pool>>,
    pub admin: Signer<'info>,
}

/// Claim - settle the caller's lock for the pool derived from `start_time`
///
/// The lock PDA is derived from the signer, so only its owner can reach it.
/// The claim record is created on first attempt and carries the claim flag.
#[derive(Accounts)]
#[instruction(start_time: u64)]
pub struct Claim<'info> {
    #[account(mut, seeds = [CONFIG_SEED], bump = config.bump)]
    pub config: Box<Account<'info, ProgramConfig>>,
    #[account(
        mut,
        seeds = [POOL_SEED, &classify(start_time).day_seed(), &classify(start_time).period_seed()],
        bump = pool.bump
    )]
    pub pool: Box<Account<'info, Pool>>,
    #[account(
        mut,
        seeds = [LOCK_SEED, owner.key().as_ref(), &classify(start_time).day_seed(), &classify(start_time).period_seed()],
        bump = lock.bump
    )]
    pub lock: Box<Account<'info, Lock>>,
    #[account(
        init_if_needed,
        payer = owner,
        space = 8 + ClaimRecord::LEN,
        seeds = [CLAIM_SEED, owner.key().as_ref(), &classify(start_time).day_seed(), &classify(start_time).period_seed()],
        bump
    )]
    pub claim_record: Box<Account<'info, ClaimRecord>>,
    #[account(address = config.stake_mint @ ErrorCode::MintMismatch)]
    pub stake_mint: Box<InterfaceAccount<'info, Mint>>,
    #[account(mut, address = config.vault @ ErrorCode::InvalidParameter)]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,
    /// CHECK: Vault authority PDA - signs the payout
    #[account(seeds = [VAULT_AUTHORITY_SEED], bump = config.vault_authority_bump)]
    pub vault_authority: AccountInfo<'info>,
    #[account(
        mut,
        constraint = owner_token_account.mint == stake_mint.key() @ ErrorCode::MintMismatch,
        constraint = owner_token_account.owner == owner.key() @ ErrorCode::NotLockOwner
    )]
    pub owner_token_account: Box<InterfaceAccount<'info, TokenAccount>>,
    #[account(mut)]
    pub owner: Signer<'info>,
    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}
