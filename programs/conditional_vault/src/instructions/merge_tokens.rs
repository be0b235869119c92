//! Merging
//!
//! Burns `amount` of every conditional token and releases `amount`
//! underlying. One of each outcome is always worth exactly one underlying,
//! so merging is allowed before and after resolution.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{burn, transfer_checked, Burn, TransferChecked};

use crate::events::{CommonFields, MergeTokensEvent};
use crate::instructions::InteractWithVault;

impl<'info> InteractWithVault<'info> {
    pub fn merge_tokens(
        &mut self,
        remaining_accounts: &'info [AccountInfo<'info>],
        amount: u64,
    ) -> Result<()> {
        let mut conditional = self.conditional_token_accounts(remaining_accounts)?;

        let movement = self
            .vault
            .plan_merge(&conditional.user_balances(), amount)?;

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
            movement.underlying,
            self.underlying_token_mint.decimals,
        )?;

        self.vault.bump_seq_num()?;
        self.reload_and_check_invariant(&mut conditional)?;

        msg!("Merged {} from {} outcomes", amount, conditional.mints.len());

        emit!(MergeTokensEvent {
            common: CommonFields::new(&Clock::get()?),
            user: self.authority.key(),
            vault: self.vault.key(),
            amount,
            post_user_underlying_balance: self.user_underlying_token_account.amount,
            post_vault_underlying_balance: self.vault_underlying_token_account.amount,
            post_user_conditional_token_balances: conditional.user_balances(),
            post_conditional_token_supplies: conditional.supplies(),
            seq_num: self.vault.seq_num,
        });

        Ok(())
    }
}
