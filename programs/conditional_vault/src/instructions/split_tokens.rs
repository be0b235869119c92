//! Splitting
//!
//! Locks `amount` underlying in the vault and mints `amount` of every
//! conditional token to the user.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{mint_to, transfer_checked, MintTo, TransferChecked};

use crate::events::{CommonFields, SplitTokensEvent};
use crate::instructions::InteractWithVault;

impl<'info> InteractWithVault<'info> {
    pub fn split_tokens(
        &mut self,
        remaining_accounts: &'info [AccountInfo<'info>],
        amount: u64,
    ) -> Result<()> {
        let mut conditional = self.conditional_token_accounts(remaining_accounts)?;

        let movement = self
            .vault
            .plan_split(self.user_underlying_token_account.amount, amount)?;

        transfer_checked(
            CpiContext::new(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.user_underlying_token_account.to_account_info(),
                    mint: self.underlying_token_mint.to_account_info(),
                    to: self.vault_underlying_token_account.to_account_info(),
                    authority: self.authority.to_account_info(),
                },
            ),
            movement.underlying,
            self.underlying_token_mint.decimals,
        )?;

        let seeds = self.vault.seeds();
        let signer_seeds = &[&seeds[..]];

        for ((mint, user_token_account), minted) in conditional
            .mints
            .iter()
            .zip(conditional.user_token_accounts.iter())
            .zip(movement.conditional)
        {
            mint_to(
                CpiContext::new_with_signer(
                    self.token_program.to_account_info(),
                    MintTo {
                        mint: mint.to_account_info(),
                        to: user_token_account.to_account_info(),
                        authority: self.vault.to_account_info(),
                    },
                    signer_seeds,
                ),
                minted,
            )?;
        }

        self.vault.bump_seq_num()?;
        self.reload_and_check_invariant(&mut conditional)?;

        msg!("Split {} into {} outcomes", amount, conditional.mints.len());

        emit!(SplitTokensEvent {
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
