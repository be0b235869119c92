//! Liquidity Withdrawals

use anchor_lang::prelude::*;

use crate::errors::AmmError;
use crate::events::{CommonFields, RemoveLiquidityEvent};
use crate::instructions::AddOrRemoveLiquidity;
use crate::state::LiquidityWithdrawal;
use crate::utils::{token_burn, token_transfer};

impl<'info> AddOrRemoveLiquidity<'info> {
    /// Burns LP tokens for their pro-rata share of both reserves.
    pub fn remove_liquidity(
        &mut self,
        lp_tokens_to_burn: u64,
        min_base_amount: u64,
        min_quote_amount: u64,
    ) -> Result<LiquidityWithdrawal> {
        require_gte!(
            self.user_lp_account.amount,
            lp_tokens_to_burn,
            AmmError::InsufficientBalance
        );

        let clock = Clock::get()?;
        self.amm.update_twap(clock.slot)?;

        let withdrawal = self.amm.remove_liquidity(
            lp_tokens_to_burn,
            min_base_amount,
            min_quote_amount,
        )?;

        token_burn(
            lp_tokens_to_burn,
            self.token_program.to_account_info(),
            self.lp_mint.to_account_info(),
            self.user_lp_account.to_account_info(),
            self.user.to_account_info(),
        )?;

        let seeds = self.amm.seeds();
        token_transfer(
            withdrawal.base_amount,
            self.base_mint.decimals,
            self.token_program.to_account_info(),
            self.vault_ata_base.to_account_info(),
            self.base_mint.to_account_info(),
            self.user_base_account.to_account_info(),
            self.amm.to_account_info(),
            &[&seeds[..]],
        )?;
        token_transfer(
            withdrawal.quote_amount,
            self.quote_mint.decimals,
            self.token_program.to_account_info(),
            self.vault_ata_quote.to_account_info(),
            self.quote_mint.to_account_info(),
            self.user_quote_account.to_account_info(),
            self.amm.to_account_info(),
            &[&seeds[..]],
        )?;

        msg!(
            "Removed liquidity: {} LP for {} base, {} quote",
            lp_tokens_to_burn,
            withdrawal.base_amount,
            withdrawal.quote_amount
        );

        emit!(RemoveLiquidityEvent {
            common: CommonFields::new(&clock, self.amm.key(), &self.amm),
            user: self.user.key(),
            lp_tokens_burned: lp_tokens_to_burn,
            base_amount: withdrawal.base_amount,
            quote_amount: withdrawal.quote_amount,
        });

        Ok(withdrawal)
    }
}
