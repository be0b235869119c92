//! Swaps
//!
//! `Buy` pays quote for base, `Sell` pays base for quote. The whole input,
//! fee included, stays in the pool.

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

use crate::errors::AmmError;
use crate::events::{CommonFields, SwapEvent};
use crate::state::{Amm, SwapType};
use crate::utils::token_transfer;

#[derive(Accounts)]
pub struct Swap<'info> {
    /// Trader
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        has_one = base_mint,
        has_one = quote_mint,
    )]
    pub amm: Box<Account<'info, Amm>>,

    pub base_mint: Box<InterfaceAccount<'info, Mint>>,

    pub quote_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        init_if_needed,
        payer = user,
        associated_token::mint = base_mint,
        associated_token::authority = user,
        associated_token::token_program = token_program,
    )]
    pub user_base_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        init_if_needed,
        payer = user,
        associated_token::mint = quote_mint,
        associated_token::authority = user,
        associated_token::token_program = token_program,
    )]
    pub user_quote_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        associated_token::mint = base_mint,
        associated_token::authority = amm,
        associated_token::token_program = token_program,
    )]
    pub vault_ata_base: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        associated_token::mint = quote_mint,
        associated_token::authority = amm,
        associated_token::token_program = token_program,
    )]
    pub vault_ata_quote: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> Swap<'info> {
    /// Swaps `input_amount` and returns the amount paid out.
    pub fn swap(
        &mut self,
        swap_type: SwapType,
        input_amount: u64,
        output_amount_min: u64,
    ) -> Result<u64> {
        require!(input_amount > 0, AmmError::ZeroSwapAmount);

        let user_input_balance = match swap_type {
            SwapType::Buy => self.user_quote_account.amount,
            SwapType::Sell => self.user_base_account.amount,
        };
        require_gte!(user_input_balance, input_amount, AmmError::InsufficientBalance);

        let clock = Clock::get()?;

        // the oracle must see the price from before this trade
        self.amm.update_twap(clock.slot)?;

        let output_amount = self.amm.swap(input_amount, swap_type)?;
        require_gte!(output_amount, output_amount_min, AmmError::SlippageExceeded);

        let (user_from, input_mint, vault_to, vault_from, output_mint, user_to) = match swap_type {
            SwapType::Buy => (
                &self.user_quote_account,
                &self.quote_mint,
                &self.vault_ata_quote,
                &self.vault_ata_base,
                &self.base_mint,
                &self.user_base_account,
            ),
            SwapType::Sell => (
                &self.user_base_account,
                &self.base_mint,
                &self.vault_ata_base,
                &self.vault_ata_quote,
                &self.quote_mint,
                &self.user_quote_account,
            ),
        };

        token_transfer(
            input_amount,
            input_mint.decimals,
            self.token_program.to_account_info(),
            user_from.to_account_info(),
            input_mint.to_account_info(),
            vault_to.to_account_info(),
            self.user.to_account_info(),
            &[],
        )?;

        let seeds = self.amm.seeds();
        token_transfer(
            output_amount,
            output_mint.decimals,
            self.token_program.to_account_info(),
            vault_from.to_account_info(),
            output_mint.to_account_info(),
            user_to.to_account_info(),
            self.amm.to_account_info(),
            &[&seeds[..]],
        )?;

        msg!(
            "Swap {:?}: {} in, {} out",
            swap_type,
            input_amount,
            output_amount
        );

        emit!(SwapEvent {
            common: CommonFields::new(&clock, self.amm.key(), &self.amm),
            user: self.user.key(),
            swap_type,
            input_amount,
            output_amount,
        });

        Ok(output_amount)
    }
}
