//! Pool Creation
//!
//! Opens a constant-product pool for an ordered (base, quote) mint pair.
//! The pool starts empty; the first `add_liquidity` sets its price.

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

use crate::errors::AmmError;
use crate::events::{CommonFields, CreateAmmEvent};
use crate::state::{Amm, AmmConfig, TwapOracle};

#[derive(Accounts)]
pub struct CreateAmm<'info> {
    /// Pays for the pool, its LP mint and its vaults
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        seeds = [AmmConfig::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, AmmConfig>,

    pub base_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        constraint = quote_mint.key() != base_mint.key() @ AmmError::SameMint,
    )]
    pub quote_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        init,
        payer = user,
        space = 8 + Amm::INIT_SPACE,
        seeds = [Amm::SEED, base_mint.key().as_ref(), quote_mint.key().as_ref()],
        bump,
    )]
    pub amm: Box<Account<'info, Amm>>,

    #[account(
        init,
        payer = user,
        seeds = [Amm::LP_MINT_SEED, amm.key().as_ref()],
        bump,
        mint::authority = amm,
        mint::decimals = Amm::LP_MINT_DECIMALS,
        mint::token_program = token_program,
    )]
    pub lp_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Pool's base reserve
    #[account(
        init_if_needed,
        payer = user,
        associated_token::mint = base_mint,
        associated_token::authority = amm,
        associated_token::token_program = token_program,
    )]
    pub vault_ata_base: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Pool's quote reserve
    #[account(
        init_if_needed,
        payer = user,
        associated_token::mint = quote_mint,
        associated_token::authority = amm,
        associated_token::token_program = token_program,
    )]
    pub vault_ata_quote: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> CreateAmm<'info> {
    pub fn create_amm(
        &mut self,
        twap_initial_observation: u128,
        twap_max_observation_change_per_update: u128,
        bumps: &CreateAmmBumps,
    ) -> Result<()> {
        let clock = Clock::get()?;

        self.amm.set_inner(Amm {
            bump: bumps.amm,
            created_at_slot: clock.slot,
            lp_mint: self.lp_mint.key(),
            base_mint: self.base_mint.key(),
            quote_mint: self.quote_mint.key(),
            base_mint_decimals: self.base_mint.decimals,
            quote_mint_decimals: self.quote_mint.decimals,
            base_amount: 0,
            quote_amount: 0,
            swap_fee_per_mille: self.config.swap_fee_per_mille,
            seq_num: 0,
            oracle: TwapOracle::new(
                clock.slot,
                twap_initial_observation,
                twap_max_observation_change_per_update,
            )?,
            lp_supply: 0,
        });

        msg!("AMM created: {}", self.amm.key());
        msg!("Base: {} Quote: {}", self.base_mint.key(), self.quote_mint.key());

        emit!(CreateAmmEvent {
            common: CommonFields::new(&clock, self.amm.key(), &self.amm),
            user: self.user.key(),
            lp_mint: self.lp_mint.key(),
            base_mint: self.base_mint.key(),
            quote_mint: self.quote_mint.key(),
            swap_fee_per_mille: self.amm.swap_fee_per_mille,
            twap_initial_observation,
            twap_max_observation_change_per_update,
        });

        Ok(())
    }
}
