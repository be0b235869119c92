//! # Conditional Token AMM
//!
//! A constant-product market maker for trading conditional tokens against
//! each other or against a quote asset.
//!
//! ## Overview
//!
//! Each pool is keyed by an ordered (base, quote) mint pair and keeps its
//! reserves in associated token accounts it owns. Liquidity providers get
//! LP tokens for a pro-rata claim on both reserves.
//!
//! ## Oracle
//!
//! Every pool embeds a TWAP oracle. Each swap, liquidity change or crank
//! weights the previous observation by the slots it was in force, then
//! moves the observation toward the current price by a bounded step.
//! Moving the average therefore means holding a price for many slots.

use anchor_lang::prelude::*;

pub mod errors;
pub mod events;
pub mod instructions;
pub mod math;
pub mod state;
pub mod utils;

pub use instructions::*;
pub use state::*;

declare_id!("AsiCN74ZQ1rYiP94AjrBHNjzdw5yBxtYrvwyhV13iQHo");

#[program]
pub mod amm {
    use super::*;

    /// Create the global config (once)
    pub fn initialize_config(
        ctx: Context<InitializeConfig>,
        swap_fee_per_mille: Option<u16>,
    ) -> Result<()> {
        ctx.accounts.initialize_config(swap_fee_per_mille, &ctx.bumps)
    }

    /// Change the fee for future pools or hand over the admin role
    pub fn update_config(
        ctx: Context<UpdateConfig>,
        swap_fee_per_mille: Option<u16>,
        new_admin: Option<Pubkey>,
    ) -> Result<()> {
        ctx.accounts.update_config(swap_fee_per_mille, new_admin)
    }

    /// Open a pool for a base/quote pair
    pub fn create_amm(
        ctx: Context<CreateAmm>,
        twap_initial_observation: u128,
        twap_max_observation_change_per_update: u128,
    ) -> Result<()> {
        ctx.accounts.create_amm(
            twap_initial_observation,
            twap_max_observation_change_per_update,
            &ctx.bumps,
        )
    }

    /// Deposit both sides and receive LP tokens
    pub fn add_liquidity(
        ctx: Context<AddOrRemoveLiquidity>,
        quote_amount: u64,
        max_base_amount: u64,
        min_lp_tokens: u64,
    ) -> Result<u64> {
        ctx.accounts
            .add_liquidity(quote_amount, max_base_amount, min_lp_tokens)
    }

    /// Burn LP tokens for a share of both reserves
    pub fn remove_liquidity(
        ctx: Context<AddOrRemoveLiquidity>,
        lp_tokens_to_burn: u64,
        min_base_amount: u64,
        min_quote_amount: u64,
    ) -> Result<LiquidityWithdrawal> {
        ctx.accounts
            .remove_liquidity(lp_tokens_to_burn, min_base_amount, min_quote_amount)
    }

    /// Buy base with quote, or sell base for quote
    pub fn swap(
        ctx: Context<Swap>,
        swap_type: SwapType,
        input_amount: u64,
        output_amount_min: u64,
    ) -> Result<u64> {
        ctx.accounts.swap(swap_type, input_amount, output_amount_min)
    }

    /// Record a TWAP observation without trading
    pub fn crank_that_twap(ctx: Context<CrankThatTwap>) -> Result<()> {
        ctx.accounts.crank_that_twap()
    }

    /// Read the TWAP since pool creation
    pub fn get_twap(ctx: Context<GetTwap>) -> Result<u128> {
        ctx.accounts.get_twap()
    }
}
