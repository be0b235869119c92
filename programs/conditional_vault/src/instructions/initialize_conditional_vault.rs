//! Vault Creation
//!
//! Binds an underlying mint to a question and creates one conditional
//! token mint per outcome. The mints are passed as remaining accounts, in
//! outcome order, at their PDA addresses:
//!
//! ```text
//! ["conditional_token", vault, [outcome_index]]
//! ```

use anchor_lang::prelude::*;
use anchor_lang::system_program::{create_account, CreateAccount};
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{initialize_mint2, InitializeMint2, Mint, TokenAccount, TokenInterface},
};

use crate::errors::VaultError;
use crate::events::{CommonFields, InitializeConditionalVaultEvent};
use crate::state::{ConditionalVault, Question};

/// Size of a mint account without extensions.
const MINT_SPACE: usize = anchor_spl::token::Mint::LEN;

#[derive(Accounts)]
#[instruction(num_outcomes: u8)]
pub struct InitializeConditionalVault<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    pub question: Box<Account<'info, Question>>,

    pub underlying_token_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        init,
        payer = payer,
        space = ConditionalVault::space(num_outcomes),
        seeds = [
            ConditionalVault::SEED,
            question.key().as_ref(),
            underlying_token_mint.key().as_ref(),
        ],
        bump,
    )]
    pub vault: Box<Account<'info, ConditionalVault>>,

    #[account(
        init_if_needed,
        payer = payer,
        associated_token::mint = underlying_token_mint,
        associated_token::authority = vault,
        associated_token::token_program = token_program,
    )]
    pub vault_underlying_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> InitializeConditionalVault<'info> {
    pub fn initialize_conditional_vault(
        &mut self,
        remaining_accounts: &[AccountInfo<'info>],
        num_outcomes: u8,
        bumps: &InitializeConditionalVaultBumps,
    ) -> Result<()> {
        require_eq!(
            self.question.num_outcomes(),
            num_outcomes as usize,
            VaultError::QuestionMismatch
        );
        require_eq!(
            remaining_accounts.len(),
            num_outcomes as usize,
            VaultError::QuestionMismatch
        );

        let vault_key = self.vault.key();
        let decimals = self.underlying_token_mint.decimals;
        let lamports = Rent::get()?.minimum_balance(MINT_SPACE);

        let mut conditional_token_mints = Vec::with_capacity(num_outcomes as usize);

        for (outcome_index, mint) in (0..num_outcomes).zip(remaining_accounts) {
            let index_seed = [outcome_index];
            let (expected_mint, mint_bump) = Pubkey::find_program_address(
                &[
                    ConditionalVault::CONDITIONAL_TOKEN_SEED,
                    vault_key.as_ref(),
                    &index_seed,
                ],
                &crate::ID,
            );
            require_keys_eq!(
                mint.key(),
                expected_mint,
                VaultError::InvalidConditionalTokenMint
            );

            let bump_seed = [mint_bump];
            let mint_seeds: &[&[u8]] = &[
                ConditionalVault::CONDITIONAL_TOKEN_SEED,
                vault_key.as_ref(),
                &index_seed,
                &bump_seed,
            ];

            create_account(
                CpiContext::new_with_signer(
                    self.system_program.to_account_info(),
                    CreateAccount {
                        from: self.payer.to_account_info(),
                        to: mint.clone(),
                    },
                    &[mint_seeds],
                ),
                lamports,
                MINT_SPACE as u64,
                &self.token_program.key(),
            )?;

            initialize_mint2(
                CpiContext::new(
                    self.token_program.to_account_info(),
                    InitializeMint2 { mint: mint.clone() },
                ),
                decimals,
                &vault_key,
                None,
            )?;

            conditional_token_mints.push(mint.key());
        }

        self.vault.set_inner(ConditionalVault {
            question: self.question.key(),
            underlying_token_mint: self.underlying_token_mint.key(),
            underlying_token_account: self.vault_underlying_token_account.key(),
            conditional_token_mints,
            pda_bump: bumps.vault,
            decimals,
            seq_num: 0,
        });

        msg!("Vault created: {}", vault_key);
        msg!("Question: {} Outcomes: {}", self.question.key(), num_outcomes);

        emit!(InitializeConditionalVaultEvent {
            common: CommonFields::new(&Clock::get()?),
            vault: vault_key,
            question: self.question.key(),
            underlying_token_mint: self.underlying_token_mint.key(),
            vault_underlying_token_account: self.vault_underlying_token_account.key(),
            conditional_token_mints: self.vault.conditional_token_mints.clone(),
            pda_bump: bumps.vault,
            seq_num: self.vault.seq_num,
        });

        Ok(())
    }
}
