use anchor_lang::prelude::*;
use anchor_spl::token_interface::{self as token_interface, TransferChecked};
use crate::constants::*;
use crate::errors::ErrorCode;
use crate::state::PriceFeed;
use crate::verifier::LedgerCapabilities;

/// Token-interface CPI and price feed wired into the verifier
///
/// Supports exactly two movements: owner -> vault (deposit) signed by the
/// owner, and vault -> owner (payout) signed by the vault authority PDA.
pub struct VaultCapabilities<'a, 'info> {
    pub token_program: AccountInfo<'info>,
    pub mint: AccountInfo<'info>,
    pub decimals: u8,
    pub vault: AccountInfo<'info>,
    pub vault_authority: AccountInfo<'info>,
    pub vault_authority_bump: u8,
    pub owner: AccountInfo<'info>,
    pub owner_token_account: AccountInfo<'info>,
    pub price_feed: Option<&'a PriceFeed>,
    pub now: i64,
}

impl<'a, 'info> VaultCapabilities<'a, 'info> {
    #[inline(never)]
    fn pay_in(&self, amount: u64) -> Result<()> {
        token_interface::transfer_checked(
            CpiContext::new(
                self.token_program.clone(),
                TransferChecked {
                    from: self.owner_token_account.clone(),
                    mint: self.mint.clone(),
                    to: self.vault.clone(),
                    authority: self.owner.clone(),
                },
            ),
            amount,
            self.decimals,
        )
    }

    #[inline(never)]
    fn pay_out(&self, amount: u64) -> Result<()> {
        let bump = [self.vault_authority_bump];
        let seeds: &[&[u8]] = &[VAULT_AUTHORITY_SEED, &bump];

        token_interface::transfer_checked(
            CpiContext::new_with_signer(
                self.token_program.clone(),
                TransferChecked {
                    from: self.vault.clone(),
                    mint: self.mint.clone(),
                    to: self.owner_token_account.clone(),
                    authority: self.vault_authority.clone(),
                },
                &[seeds],
            ),
            amount,
            self.decimals,
        )
    }
}

impl<'a, 'info> LedgerCapabilities for VaultCapabilities<'a, 'info> {
    fn transfer(&mut self, from: &Pubkey, to: &Pubkey, amount: u64) -> Result<()> {
        let result = if *from == self.owner.key() && *to == self.vault.key() {
            self.pay_in(amount)
        } else if *from == self.vault.key() && *to == self.owner.key() {
            self.pay_out(amount)
        } else {
            return err!(ErrorCode::TransferFailed);
        };

        result.map_err(|e| {
            msg!("Transfer of {} failed: {:?}", amount, e);
            error!(ErrorCode::TransferFailed)
        })
    }

    fn price_of(&self, amount: u64) -> Result<u64> {
        let feed = self.price_feed.ok_or(ErrorCode::StalePrice)?;
        require!(feed.is_fresh(self.now), ErrorCode::StalePrice);
        feed.value_usd_micros(amount)
    }
}
