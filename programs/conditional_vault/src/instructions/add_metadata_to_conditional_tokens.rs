//! Conditional Token Metadata
//!
//! Attaches a Metaplex metadata account to one outcome's mint so wallets
//! can display it. Display only; nothing in the vault reads it back.

use anchor_lang::prelude::*;
use anchor_spl::{
    metadata::{
        create_metadata_accounts_v3, mpl_token_metadata::types::DataV2,
        CreateMetadataAccountsV3, Metadata,
    },
    token_interface::Mint,
};

use crate::errors::VaultError;
use crate::events::{AddMetadataToConditionalTokensEvent, CommonFields};
use crate::state::ConditionalVault;

#[derive(Accounts)]
pub struct AddMetadataToConditionalTokens<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    pub vault: Box<Account<'info, ConditionalVault>>,

    #[account(mut)]
    pub conditional_token_mint: Box<InterfaceAccount<'info, Mint>>,

    /// CHECK: address is checked here, contents via cpi into token metadata
    #[account(
        mut,
        seeds = [
            b"metadata",
            token_metadata_program.key().as_ref(),
            conditional_token_mint.key().as_ref(),
        ],
        bump,
        seeds::program = token_metadata_program.key(),
    )]
    pub conditional_token_metadata: UncheckedAccount<'info>,

    pub token_metadata_program: Program<'info, Metadata>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

impl<'info> AddMetadataToConditionalTokens<'info> {
    pub fn add_metadata_to_conditional_tokens(
        &mut self,
        outcome_index: u8,
        name: String,
        symbol: String,
        uri: String,
    ) -> Result<()> {
        let expected_mint = self
            .vault
            .conditional_token_mints
            .get(outcome_index as usize)
            .ok_or(VaultError::InvalidOutcomeIndex)?;
        require_keys_eq!(
            self.conditional_token_mint.key(),
            *expected_mint,
            VaultError::InvalidConditionalTokenMint
        );
        require!(
            self.conditional_token_metadata.data_is_empty(),
            VaultError::MetadataAlreadyInitialized
        );

        let seeds = self.vault.seeds();

        create_metadata_accounts_v3(
            CpiContext::new_with_signer(
                self.token_metadata_program.to_account_info(),
                CreateMetadataAccountsV3 {
                    metadata: self.conditional_token_metadata.to_account_info(),
                    mint: self.conditional_token_mint.to_account_info(),
                    mint_authority: self.vault.to_account_info(),
                    payer: self.payer.to_account_info(),
                    update_authority: self.vault.to_account_info(),
                    system_program: self.system_program.to_account_info(),
                    rent: self.rent.to_account_info(),
                },
                &[&seeds[..]],
            ),
            DataV2 {
                name: name.clone(),
                symbol: symbol.clone(),
                uri: uri.clone(),
                seller_fee_basis_points: 0,
                creators: None,
                collection: None,
                uses: None,
            },
            false,
            true,
            None,
        )?;

        msg!("Metadata added to outcome {} mint {}", outcome_index, expected_mint);

        emit!(AddMetadataToConditionalTokensEvent {
            common: CommonFields::new(&Clock::get()?),
            vault: self.vault.key(),
            outcome_index,
            conditional_token_mint: self.conditional_token_mint.key(),
            conditional_token_metadata: self.conditional_token_metadata.key(),
            name,
            symbol,
            uri,
        });

        Ok(())
    }
}
