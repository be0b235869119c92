//! Accounts shared by `split_tokens`, `merge_tokens` and `redeem_tokens`.
//!
//! The per-outcome accounts don't fit a fixed struct, so they come in as
//! remaining accounts: `2 * num_outcomes` entries of (conditional mint,
//! user token account) pairs, in outcome order.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::errors::VaultError;
use crate::state::{ConditionalVault, Question};

#[derive(Accounts)]
pub struct InteractWithVault<'info> {
    pub question: Box<Account<'info, Question>>,

    #[account(
        mut,
        has_one = question,
        has_one = underlying_token_mint,
    )]
    pub vault: Box<Account<'info, ConditionalVault>>,

    pub underlying_token_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        constraint = vault_underlying_token_account.key() == vault.underlying_token_account
            @ VaultError::InvalidVaultUnderlyingTokenAccount,
    )]
    pub vault_underlying_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    pub authority: Signer<'info>,

    #[account(
        mut,
        token::mint = underlying_token_mint,
        token::authority = authority,
        token::token_program = token_program,
    )]
    pub user_underlying_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}

/// Validated per-outcome accounts, index `i` belonging to outcome `i`.
pub struct ConditionalTokenAccounts<'info> {
    pub mints: Vec<InterfaceAccount<'info, Mint>>,
    pub user_token_accounts: Vec<InterfaceAccount<'info, TokenAccount>>,
}

impl<'info> ConditionalTokenAccounts<'info> {
    pub fn supplies(&self) -> Vec<u64> {
        self.mints.iter().map(|mint| mint.supply).collect()
    }

    pub fn user_balances(&self) -> Vec<u64> {
        self.user_token_accounts
            .iter()
            .map(|account| account.amount)
            .collect()
    }

    fn reload(&mut self) -> Result<()> {
        for mint in self.mints.iter_mut() {
            mint.reload()?;
        }
        for account in self.user_token_accounts.iter_mut() {
            account.reload()?;
        }
        Ok(())
    }
}

impl<'info> InteractWithVault<'info> {
    /// Loads the remaining accounts and checks each pair against the
    /// vault's mints and the signer.
    pub fn conditional_token_accounts(
        &self,
        remaining_accounts: &'info [AccountInfo<'info>],
    ) -> Result<ConditionalTokenAccounts<'info>> {
        self.vault.check_remaining_accounts_len(remaining_accounts.len())?;

        let num_outcomes = self.vault.num_outcomes();
        let mut mints = Vec::with_capacity(num_outcomes);
        let mut user_token_accounts = Vec::with_capacity(num_outcomes);

        for (outcome_index, pair) in remaining_accounts.chunks_exact(2).enumerate() {
            let mint = InterfaceAccount::<Mint>::try_from(&pair[0])?;
            let user_token_account = InterfaceAccount::<TokenAccount>::try_from(&pair[1])?;

            self.vault.check_conditional_token_account(
                outcome_index,
                &mint.key(),
                &user_token_account.mint,
                &user_token_account.owner,
                &self.authority.key(),
            )?;

            mints.push(mint);
            user_token_accounts.push(user_token_account);
        }

        Ok(ConditionalTokenAccounts {
            mints,
            user_token_accounts,
        })
    }

    /// Re-reads every account the CPIs touched and checks the vault is
    /// still solvent.
    pub fn reload_and_check_invariant(
        &mut self,
        conditional: &mut ConditionalTokenAccounts<'info>,
    ) -> Result<()> {
        conditional.reload()?;
        self.vault_underlying_token_account.reload()?;
        self.user_underlying_token_account.reload()?;

        self.vault.invariant(
            &self.question,
            &conditional.supplies(),
            self.vault_underlying_token_account.amount,
        )
    }
}
