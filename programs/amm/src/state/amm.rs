//! Constant-Product Pool State
//!
//! The pool keeps its own view of the reserves (`base_amount`,
//! `quote_amount`) rather than reading the vault token accounts, so tokens
//! sent to the vaults outside of an instruction never move the price.

use anchor_lang::prelude::*;

use crate::errors::AmmError;
use crate::math::ConstantProduct;
use crate::state::TwapOracle;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwapType {
    /// Swap quote tokens into base tokens
    Buy,
    /// Swap base tokens into quote tokens
    Sell,
}

/// Amounts moved by an `add_liquidity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiquidityDeposit {
    pub base_amount: u64,
    pub quote_amount: u64,
    pub lp_tokens: u64,
}

/// Amounts released by a `remove_liquidity`.
#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiquidityWithdrawal {
    pub base_amount: u64,
    pub quote_amount: u64,
}

/// Pool account
///
/// Seeds: ["amm__", base_mint, quote_mint]
#[account]
#[derive(InitSpace, Default, Debug)]
pub struct Amm {
    pub bump: u8,

    pub created_at_slot: u64,

    pub lp_mint: Pubkey,
    pub base_mint: Pubkey,
    pub quote_mint: Pubkey,

    pub base_mint_decimals: u8,
    pub quote_mint_decimals: u8,

    pub base_amount: u64,
    pub quote_amount: u64,

    /// LP tokens issued minus LP tokens redeemed through the pool. Tokens
    /// burned directly at the token program stay counted, so their share of
    /// the reserves is never reassigned to a later depositor.
    pub lp_supply: u64,

    /// Swap fee snapshotted from the config at creation, per mille of input.
    pub swap_fee_per_mille: u16,

    /// Bumped on every state change so clients can detect races.
    pub seq_num: u64,

    pub oracle: TwapOracle,
}

impl Amm {
    pub const SEED: &'static [u8] = b"amm__";
    pub const LP_MINT_SEED: &'static [u8] = b"amm_lp_mint";
    pub const LP_MINT_DECIMALS: u8 = 9;

    /// Signer seeds for CPIs where the pool is the authority.
    pub fn seeds(&self) -> [&[u8]; 4] {
        [
            Self::SEED,
            self.base_mint.as_ref(),
            self.quote_mint.as_ref(),
            std::slice::from_ref(&self.bump),
        ]
    }

    pub fn k(&self) -> u128 {
        self.base_amount as u128 * self.quote_amount as u128
    }

    pub fn update_twap(&mut self, slot: u64) -> Result<bool> {
        self.oracle.update(slot, self.base_amount, self.quote_amount)
    }

    /// Time-weighted average price since pool creation, scaled by `PRICE_SCALE`.
    pub fn twap(&self) -> Result<u128> {
        self.oracle.twap(self.created_at_slot)
    }

    /// Does the internal accounting to swap `input_amount` and returns the
    /// amount to transfer out to the user.
    pub fn swap(&mut self, input_amount: u64, swap_type: SwapType) -> Result<u64> {
        let k = self.k();

        let (input_reserve, output_reserve) = match swap_type {
            SwapType::Buy => (self.quote_amount, self.base_amount),
            SwapType::Sell => (self.base_amount, self.quote_amount),
        };

        let output_amount = ConstantProduct::swap_output(
            input_amount,
            input_reserve,
            output_reserve,
            self.swap_fee_per_mille,
        )?;

        match swap_type {
            SwapType::Buy => {
                self.quote_amount = self
                    .quote_amount
                    .checked_add(input_amount)
                    .ok_or(AmmError::ArithmeticOverflow)?;
                self.base_amount = self
                    .base_amount
                    .checked_sub(output_amount)
                    .ok_or(AmmError::ArithmeticUnderflow)?;
            }
            SwapType::Sell => {
                self.base_amount = self
                    .base_amount
                    .checked_add(input_amount)
                    .ok_or(AmmError::ArithmeticOverflow)?;
                self.quote_amount = self
                    .quote_amount
                    .checked_sub(output_amount)
                    .ok_or(AmmError::ArithmeticUnderflow)?;
            }
        }

        require!(self.k() >= k, AmmError::ConstantProductInvariantFailed);

        self.bump_seq_num()?;

        Ok(output_amount)
    }

    /// Prices a deposit of `quote_amount` and books it into the reserves.
    ///
    /// The first deposit into an empty pool sets the ratio: the reserves
    /// become exactly `(max_base_amount, quote_amount)` and the LP supply
    /// starts at `quote_amount`. Later deposits pay the base amount implied
    /// by the current ratio, rounded up.
    pub fn add_liquidity(
        &mut self,
        quote_amount: u64,
        max_base_amount: u64,
        min_lp_tokens: u64,
    ) -> Result<LiquidityDeposit> {
        let lp_supply = self.lp_supply;

        let (base_amount, lp_tokens) = if lp_supply == 0 {
            require!(
                quote_amount > 0 && max_base_amount > 0,
                AmmError::ZeroLiquidityAdd
            );
            require!(
                self.base_amount == 0 && self.quote_amount == 0,
                AmmError::InsufficientLiquidity
            );

            (max_base_amount, quote_amount)
        } else {
            require!(quote_amount > 0, AmmError::ZeroLiquidityAdd);

            let base_amount = ConstantProduct::required_base_amount(
                quote_amount,
                self.base_amount,
                self.quote_amount,
            )?;
            require!(base_amount <= max_base_amount, AmmError::SlippageExceeded);

            let lp_tokens =
                ConstantProduct::lp_tokens_for_quote(quote_amount, self.quote_amount, lp_supply)?;

            (base_amount, lp_tokens)
        };

        require!(lp_tokens >= min_lp_tokens, AmmError::SlippageExceeded);

        self.base_amount = self
            .base_amount
            .checked_add(base_amount)
            .ok_or(AmmError::ArithmeticOverflow)?;
        self.quote_amount = self
            .quote_amount
            .checked_add(quote_amount)
            .ok_or(AmmError::ArithmeticOverflow)?;
        self.lp_supply = lp_supply
            .checked_add(lp_tokens)
            .ok_or(AmmError::ArithmeticOverflow)?;

        self.bump_seq_num()?;

        Ok(LiquidityDeposit {
            base_amount,
            quote_amount,
            lp_tokens,
        })
    }

    /// Releases the pro-rata reserves owned by `lp_tokens_to_burn`.
    pub fn remove_liquidity(
        &mut self,
        lp_tokens_to_burn: u64,
        min_base_amount: u64,
        min_quote_amount: u64,
    ) -> Result<LiquidityWithdrawal> {
        require!(lp_tokens_to_burn > 0, AmmError::ZeroLiquidityRemove);

        let lp_supply = self.lp_supply;

        let base_amount =
            ConstantProduct::reserve_share(lp_tokens_to_burn, self.base_amount, lp_supply)?;
        let quote_amount =
            ConstantProduct::reserve_share(lp_tokens_to_burn, self.quote_amount, lp_supply)?;

        require!(
            base_amount >= min_base_amount && quote_amount >= min_quote_amount,
            AmmError::SlippageExceeded
        );

        self.base_amount = self
            .base_amount
            .checked_sub(base_amount)
            .ok_or(AmmError::ArithmeticUnderflow)?;
        self.quote_amount = self
            .quote_amount
            .checked_sub(quote_amount)
            .ok_or(AmmError::ArithmeticUnderflow)?;
        self.lp_supply = lp_supply
            .checked_sub(lp_tokens_to_burn)
            .ok_or(AmmError::ArithmeticUnderflow)?;

        self.bump_seq_num()?;

        Ok(LiquidityWithdrawal {
            base_amount,
            quote_amount,
        })
    }

    fn bump_seq_num(&mut self) -> Result<()> {
        self.seq_num = self
            .seq_num
            .checked_add(1)
            .ok_or(AmmError::ArithmeticOverflow)?;
        Ok(())
    }
}
