//! # Conditional Vault
//!
//! Questions and the vaults that turn an underlying token into
//! outcome-contingent tokens.
//!
//! ## How it works
//!
//! - A question has an oracle and N outcomes. The oracle resolves it once,
//!   giving each outcome a payout weight.
//! - A vault escrows one underlying mint for one question. Splitting 1
//!   underlying mints 1 of each of the N conditional tokens; merging does
//!   the reverse.
//! - After resolution, each conditional token redeems for its share of the
//!   underlying: `numerator[i] / denominator`.

use anchor_lang::prelude::*;

pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;

pub use instructions::*;
pub use state::*;

declare_id!("4NKgYiDQdohpNf1n9qVh394jDbsUpLNDuSCbwPzk5pA7");

#[program]
pub mod conditional_vault {
    use super::*;

    /// Create a question with `num_outcomes` outcomes
    pub fn initialize_question(
        ctx: Context<InitializeQuestion>,
        question_id: [u8; 32],
        oracle: Pubkey,
        num_outcomes: u8,
    ) -> Result<()> {
        ctx.accounts
            .initialize_question(question_id, oracle, num_outcomes)
    }

    /// Set the payout weights (oracle only, once)
    pub fn resolve_question(
        ctx: Context<ResolveQuestion>,
        payout_numerators: Vec<u32>,
    ) -> Result<()> {
        ctx.accounts.resolve_question(payout_numerators)
    }

    /// Create a vault and its conditional token mints.
    /// Remaining accounts: one mint PDA per outcome.
    pub fn initialize_conditional_vault<'c: 'info, 'info>(
        ctx: Context<'_, '_, 'c, 'info, InitializeConditionalVault<'info>>,
        num_outcomes: u8,
    ) -> Result<()> {
        ctx.accounts
            .initialize_conditional_vault(ctx.remaining_accounts, num_outcomes, &ctx.bumps)
    }

    /// Underlying in, one of every conditional token out.
    /// Remaining accounts: (mint, user token account) per outcome.
    pub fn split_tokens<'c: 'info, 'info>(
        ctx: Context<'_, '_, 'c, 'info, InteractWithVault<'info>>,
        amount: u64,
    ) -> Result<()> {
        ctx.accounts.split_tokens(ctx.remaining_accounts, amount)
    }

    /// One of every conditional token in, underlying out
    pub fn merge_tokens<'c: 'info, 'info>(
        ctx: Context<'_, '_, 'c, 'info, InteractWithVault<'info>>,
        amount: u64,
    ) -> Result<()> {
        ctx.accounts.merge_tokens(ctx.remaining_accounts, amount)
    }

    /// Burn all conditional tokens for their resolved value
    pub fn redeem_tokens<'c: 'info, 'info>(
        ctx: Context<'_, '_, 'c, 'info, InteractWithVault<'info>>,
    ) -> Result<u64> {
        ctx.accounts.redeem_tokens(ctx.remaining_accounts)
    }

    /// Attach display metadata to one outcome's mint
    pub fn add_metadata_to_conditional_tokens(
        ctx: Context<AddMetadataToConditionalTokens>,
        outcome_index: u8,
        name: String,
        symbol: String,
        uri: String,
    ) -> Result<()> {
        ctx.accounts
            .add_metadata_to_conditional_tokens(outcome_index, name, symbol, uri)
    }
}
