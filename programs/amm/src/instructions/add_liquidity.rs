//! Liquidity Deposits
//!
//! The depositor names the quote amount; the base side follows from the
//! pool ratio (or, for the first deposit, is taken as given).

use anchor_lang::prelude::*;

use crate::errors::AmmError;
use crate::events::{AddLiquidityEvent, CommonFields};
use crate::instructions::AddOrRemoveLiquidity;
use crate::utils::{token_mint, token_transfer};

impl<'info> AddOrRemoveLiquidity<'info> {
    /// Deposits into the pool and returns the LP tokens minted.
    pub fn add_liquidity(
        &mut self,
        quote_amount: u64,
        max_base_amount: u64,
        min_lp_tokens: u64,
    ) -> Result<u64> {
        let clock = Clock::get()?;

        // accrue the pre-deposit price first
        self.amm.update_twap(clock.slot)?;

        let deposit = self.amm.add_liquidity(
            quote_amount,
            max_base_amount,
            min_lp_tokens,
        )?;

        require_gte!(
            self.user_base_account.amount,
            deposit.base_amount,
            AmmError::InsufficientBalance
        );
        require_gte!(
            self.user_quote_account.amount,
            deposit.quote_amount,
            AmmError::InsufficientBalance
        );

        token_transfer(
            deposit.base_amount,
            self.base_mint.decimals,
            self.token_program.to_account_info(),
            self.user_base_account.to_account_info(),
            self.base_mint.to_account_info(),
            self.vault_ata_base.to_account_info(),
            self.user.to_account_info(),
            &[],
        )?;
        token_transfer(
            deposit.quote_amount,
            self.quote_mint.decimals,
            self.token_program.to_account_info(),
            self.user_quote_account.to_account_info(),
            self.quote_mint.to_account_info(),
            self.vault_ata_quote.to_account_info(),
            self.user.to_account_info(),
            &[],
        )?;

        let seeds = self.amm.seeds();
        token_mint(
            deposit.lp_tokens,
            self.token_program.to_account_info(),
            self.lp_mint.to_account_info(),
            self.user_lp_account.to_account_info(),
            self.amm.to_account_info(),
            &[&seeds[..]],
        )?;

        msg!(
            "Added liquidity: {} base, {} quote, {} LP",
            deposit.base_amount,
            deposit.quote_amount,
            deposit.lp_tokens
        );

        emit!(AddLiquidityEvent {
            common: CommonFields::new(&clock, self.amm.key(), &self.amm),
            user: self.user.key(),
            quote_amount: deposit.quote_amount,
            base_amount: deposit.base_amount,
            lp_tokens_minted: deposit.lp_tokens,
        });

        Ok(deposit.lp_tokens)
    }
}
