use anchor_lang::prelude::*;

pub mod constants;
pub mod contexts;
pub mod errors;
pub mod events;
pub mod helpers;
pub mod state;
pub mod verifier;

mod formal_verification;

pub use constants::*;
pub use contexts::*;
pub use errors::ErrorCode;
pub use events::*;
pub use helpers::attestation::AuthoritySignature;
pub use helpers::window::PoolKey;
pub use state::*;

use helpers::cpi::VaultCapabilities;
use verifier::ClaimRequest;

declare_id!("94eSWF1hiiSmpg9Jme8HNkCnKPQkXBdzz1as3Jbgtndz");

#[program]
pub mod stake_commit {
    use super::*;

    pub fn initialize(
        ctx: Context<Initialize>,
        authority_key: [u8; 64],
        min_stake_usd_micros: u64,
    ) -> Result<()> {
        require!(authority_key != [0u8; 64], ErrorCode::InvalidParameter);

        let clock = Clock::get()?;
        let config = &mut ctx.accounts.config;

        config.admin = ctx.accounts.admin.key();
        config.authority_key = authority_key;
        config.stake_mint = ctx.accounts.stake_mint.key();
        config.vault = ctx.accounts.vault.key();
        config.price_feed = ctx.accounts.price_feed.key();
        config.min_stake_usd_micros = min_stake_usd_micros;
        config.reentrancy_locked = false;
        config.vault_authority_bump = ctx.bumps.vault_authority;
        config.bump = ctx.bumps.config;
        config.total_deposited = 0;
        config.total_paid_out = 0;
        config.claims_settled = 0;
        config.initialized_at = clock.unix_timestamp;

        let feed = &mut ctx.accounts.price_feed;
        feed.oracle = ctx.accounts.oracle.key();
        feed.price_usd_micros = 0;
        feed.unit_decimals = ctx.accounts.stake_mint.decimals;
        feed.updated_at = 0;
        feed.bump = ctx.bumps.price_feed;

        emit!(ProgramInitialized {
            admin: config.admin,
            stake_mint: config.stake_mint,
            vault: config.vault,
            oracle: feed.oracle,
            min_stake_usd_micros,
            timestamp: clock.unix_timestamp,
        });

        Ok(())
    }

    // Rotate the trusted signer key (admin only)
    pub fn set_authority_key(ctx: Context<AdminControl>, new_key: [u8; 64]) -> Result<()> {
        let admin = ctx.accounts.admin.key();
        let old_key = verifier::process_set_authority_key(&mut ctx.accounts.config, &admin, new_key)?;

        msg!("Authority key rotated by {}", admin);

        emit!(AuthorityKeyUpdated {
            admin,
            old_key,
            new_key,
            timestamp: Clock::get()?.unix_timestamp,
        });

        Ok(())
    }

    // Push a new stake token price (oracle only, enforced by account constraint)
    pub fn update_price(ctx: Context<UpdatePrice>, price_usd_micros: u64, unit_decimals: u8) -> Result<()> {
        require!(price_usd_micros > 0, ErrorCode::InvalidParameter);
        require!(unit_decimals <= MAX_UNIT_DECIMALS, ErrorCode::InvalidParameter);

        let clock = Clock::get()?;
        let feed = &mut ctx.accounts.price_feed;
        feed.price_usd_micros = price_usd_micros;
        feed.unit_decimals = unit_decimals;
        feed.updated_at = clock.unix_timestamp;

        emit!(PriceUpdated {
            oracle: feed.oracle,
            price_usd_micros,
            unit_decimals,
            timestamp: clock.unix_timestamp,
        });

        Ok(())
    }

    pub fn deposit(ctx: Context<Deposit>, start_time: u64, duration: u64, stake_amount: u64) -> Result<()> {
        let clock = Clock::get()?;
        let owner = ctx.accounts.owner.key();

        let mut caps = VaultCapabilities {
            token_program: ctx.accounts.token_program.to_account_info(),
            mint: ctx.accounts.stake_mint.to_account_info(),
            decimals: ctx.accounts.stake_mint.decimals,
            vault: ctx.accounts.vault.to_account_info(),
            vault_authority: ctx.accounts.vault_authority.to_account_info(),
            vault_authority_bump: ctx.accounts.config.vault_authority_bump,
            owner: ctx.accounts.owner.to_account_info(),
            owner_token_account: ctx.accounts.owner_token_account.to_account_info(),
            price_feed: Some(&**ctx.accounts.price_feed),
            now: clock.unix_timestamp,
        };

        let key = verifier::process_deposit(
            &mut ctx.accounts.config,
            &mut ctx.accounts.pool,
            &mut ctx.accounts.lock,
            &owner,
            clock.unix_timestamp,
            start_time,
            duration,
            stake_amount,
            &mut caps,
        )?;

        ctx.accounts.pool.bump = ctx.bumps.pool;
        ctx.accounts.lock.bump = ctx.bumps.lock;

        let pool = &ctx.accounts.pool;
        let lock = &ctx.accounts.lock;

        msg!("Lock opened: {} staked {} in pool {}/{} until {}",
            owner, stake_amount, key.day, key.period, lock.end_time);

        emit!(LockDeposited {
            owner,
            day: key.day,
            period: key.period,
            stake_amount,
            start_time,
            end_time: lock.end_time,
            pool_total_staked: pool.total_staked,
            pool_participants: pool.participant_count,
        });

        Ok(())
    }

    pub fn publish_root(ctx: Context<PublishRoot>, day: u64, period: u8, root: [u8; 32]) -> Result<()> {
        let clock = Clock::get()?;
        let admin = ctx.accounts.admin.key();

        let replaced = verifier::process_publish_root(
            &ctx.accounts.config,
            &admin,
            &mut ctx.accounts.pool,
            PoolKey { day, period },
            root,
            clock.unix_timestamp,
        )?;

        if replaced {
            msg!("Root for pool {}/{} replaced", day, period);
        } else {
            msg!("Root for pool {}/{} published", day, period);
        }

        emit!(RootPublished {
            day,
            period,
            merkle_root: root,
            replaced,
            timestamp: clock.unix_timestamp,
        });

        Ok(())
    }

    pub fn claim(
        ctx: Context<Claim>,
        start_time: u64,
        duration: u64,
        completion_status: bool,
        signature: AuthoritySignature,
        reward_amount: u64,
        merkle_proof: Vec<[u8; 32]>,
    ) -> Result<()> {
        let clock = Clock::get()?;
        let owner = ctx.accounts.owner.key();

        let request = ClaimRequest {
            start_time,
            duration,
            completion_status,
            signature,
            reward_amount,
            merkle_proof,
        };

        let mut caps = VaultCapabilities {
            token_program: ctx.accounts.token_program.to_account_info(),
            mint: ctx.accounts.stake_mint.to_account_info(),
            decimals: ctx.accounts.stake_mint.decimals,
            vault: ctx.accounts.vault.to_account_info(),
            vault_authority: ctx.accounts.vault_authority.to_account_info(),
            vault_authority_bump: ctx.accounts.config.vault_authority_bump,
            owner: ctx.accounts.owner.to_account_info(),
            owner_token_account: ctx.accounts.owner_token_account.to_account_info(),
            price_feed: None,
            now: clock.unix_timestamp,
        };

        let outcome = verifier::process_claim(
            &mut ctx.accounts.config,
            &mut ctx.accounts.pool,
            &mut ctx.accounts.lock,
            &mut ctx.accounts.claim_record,
            &owner,
            clock.unix_timestamp,
            &request,
            &mut caps,
        )?;

        ctx.accounts.claim_record.bump = ctx.bumps.claim_record;

        msg!("Claim settled: {} pool {}/{} payout {} (stake {}, reward {})",
            owner, outcome.pool.day, outcome.pool.period,
            outcome.payout, outcome.stake_returned, outcome.reward_amount);

        #[cfg(feature = "verbose")]
        msg!("Pool {}/{} claims settled: {}", outcome.pool.day, outcome.pool.period,
            ctx.accounts.pool.claims_settled);

        emit!(RewardClaimed {
            owner,
            day: outcome.pool.day,
            period: outcome.pool.period,
            completed: completion_status,
            stake_returned: outcome.stake_returned,
            reward_amount: outcome.reward_amount,
            payout: outcome.payout,
            timestamp: clock.unix_timestamp,
        });

        Ok(())
    }
}
