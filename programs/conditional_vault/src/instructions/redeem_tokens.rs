//! Redemption
//!
//! After resolution, burns the user's whole balance of every outcome and
//! pays out its payout-weighted value in underlying.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{burn, transfer_checked, Burn, TransferChecked};

use crate::errors::VaultError;
use crate::events::{CommonFields, RedeemTokensEvent};
use crate::instructions::InteractWithVault;

impl<'info> InteractWithVault<'info> {
    /// Returns the underlying paid out.
    pub fn redeem_tokens(&mut self, remaining_accounts: &'info [AccountInfo<'info>]) -> Result<u64> {
        require!(
            self.question.is_resolved(),
            VaultError::CantRedeemConditionalTokens
        );

        let mut conditional = self.conditional_token_accounts(remaining_accounts)?;

        let movement = self
            .vault
            .plan_redeem(&self.question, &conditional.user_balances())?;
        let redeemable = movement.underlying;

        for ((mint, user_token_account), burned) in conditional
            .mints
            .iter()
            .zip(conditional.user_token_accounts.iter())
            .zip(movement.conditional)
        {
            burn(
                CpiContext::new(
                    self.token_program.to_account_info(),
                    Burn {
                        mint: mint.to_account_info(),
                        from: user_token_account.to_account_info(),
                        authority: self.authority.to_account_info(),
                    },
                ),
                burned,
            )?;
        }

        let seeds = self.vault.seeds();
        transfer_checked(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.vault_underlying_token_account.to_account_info(),
                    mint: self.underlying_token_mint.to_account_info(),
                    to: self.user_underlying_token_account.to_account_info(),
                    authority: self.vault.to_account_info(),
                },
                &[&seeds[..]],
            ),
            redeemable,
            self.underlying_token_mint.decimals,
        )?;

        self.vault.bump_seq_num()?;
        self.reload_and_check_invariant(&mut conditional)?;

        msg!("Redeemed {} underlying", redeemable);

        emit!(RedeemTokensEvent {
            common: CommonFields::new(&Clock::get()?),
            user: self.authority.key(),
            vault: self.vault.key(),
            amount: redeemable,
            post_user_underlying_balance: self.user_underlying_token_account.amount,
            post_vault_underlying_balance: self.vault_underlying_token_account.amount,
            post_conditional_token_supplies: conditional.supplies(),
            seq_num: self.vault.seq_num,
        });

        Ok(redeemable)
    }
}
