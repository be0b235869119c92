//! # Constant-Product Curve
//!
//! Pools hold a base and a quote reserve and keep
//!
//! ```text
//!     base_reserve * quote_reserve = k
//! ```
//!
//! non-decreasing across every swap. The fee is taken out of the input
//! before it is priced against the curve and stays in the pool, so `k`
//! strictly grows on any non-trivial trade:
//!
//! ```text
//! input_with_fee = input * (1000 - fee_per_mille)
//! output         = input_with_fee * output_reserve
//!                  / (input_reserve * 1000 + input_with_fee)
//! ```
//!
//! All functions here are pure and work on `u128` intermediates. Overflow
//! is always reported, never wrapped.

use anchor_lang::prelude::*;

use crate::errors::AmmError;

/// Fees are expressed in parts per thousand of the input amount.
pub const FEE_DENOMINATOR: u128 = 1_000;

/// Result of [`ConstantProduct::optimal_swap_for_merge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeSwap {
    /// Base tokens to sell into the pool.
    pub swap_amount: u64,
    /// Base tokens the user keeps after the swap.
    pub base_after_swap: u64,
    /// Quote tokens the swap is expected to return.
    pub expected_quote: u64,
}

impl MergeSwap {
    /// Number of (base, quote) pairs that can be merged after the swap.
    pub fn mergeable(&self) -> u64 {
        self.base_after_swap.min(self.expected_quote)
    }
}

/// Constant-product pricing for the AMM.
pub struct ConstantProduct;

impl ConstantProduct {
    /// Output amount of a swap of `input_amount` against the given reserves.
    ///
    /// # Example
    /// ```ignore
    /// // 10 base / 1000 quote (9 and 6 decimals), buy with 100 quote at 1%
    /// let out = ConstantProduct::swap_output(100_000_000, 1_000_000_000, 10_000_000_000, 10)?;
    /// assert_eq!(out, 900_818_926);
    /// ```
    pub fn swap_output(
        input_amount: u64,
        input_reserve: u64,
        output_reserve: u64,
        fee_per_mille: u16,
    ) -> Result<u64> {
        require!(input_amount > 0, AmmError::ZeroSwapAmount);
        require!(
            input_reserve > 0 && output_reserve > 0,
            AmmError::InsufficientLiquidity
        );
        require!(
            (fee_per_mille as u128) < FEE_DENOMINATOR,
            AmmError::InvalidFee
        );

        let input_amount_with_fee = (input_amount as u128)
            .checked_mul(FEE_DENOMINATOR - fee_per_mille as u128)
            .ok_or(AmmError::ArithmeticOverflow)?;

        let numerator = input_amount_with_fee
            .checked_mul(output_reserve as u128)
            .ok_or(AmmError::ArithmeticOverflow)?;

        let denominator = (input_reserve as u128)
            .checked_mul(FEE_DENOMINATOR)
            .ok_or(AmmError::ArithmeticOverflow)?
            .checked_add(input_amount_with_fee)
            .ok_or(AmmError::ArithmeticOverflow)?;

        let output_amount = numerator / denominator;

        u64::try_from(output_amount).map_err(|_| error!(AmmError::ArithmeticOverflow))
    }

    /// Base tokens required to accompany `quote_amount` at the current
    /// reserve ratio, rounded up so the pool never loses on rounding.
    pub fn required_base_amount(
        quote_amount: u64,
        base_reserve: u64,
        quote_reserve: u64,
    ) -> Result<u64> {
        require!(quote_reserve > 0, AmmError::InsufficientLiquidity);

        let numerator = (quote_amount as u128)
            .checked_mul(base_reserve as u128)
            .ok_or(AmmError::ArithmeticOverflow)?;
        let base_amount = numerator.div_ceil(quote_reserve as u128);

        u64::try_from(base_amount).map_err(|_| error!(AmmError::ArithmeticOverflow))
    }

    /// LP tokens minted for depositing `quote_amount` into a live pool.
    pub fn lp_tokens_for_quote(quote_amount: u64, quote_reserve: u64, lp_supply: u64) -> Result<u64> {
        require!(quote_reserve > 0, AmmError::InsufficientLiquidity);

        let lp_tokens = (quote_amount as u128)
            .checked_mul(lp_supply as u128)
            .ok_or(AmmError::ArithmeticOverflow)?
            / quote_reserve as u128;

        u64::try_from(lp_tokens).map_err(|_| error!(AmmError::ArithmeticOverflow))
    }

    /// Pro-rata share of one reserve owned by `lp_tokens` out of `lp_supply`.
    pub fn reserve_share(lp_tokens: u64, reserve: u64, lp_supply: u64) -> Result<u64> {
        require!(lp_supply > 0, AmmError::InsufficientLiquidity);
        require!(lp_tokens <= lp_supply, AmmError::InsufficientBalance);

        let share = (lp_tokens as u128)
            .checked_mul(reserve as u128)
            .ok_or(AmmError::ArithmeticOverflow)?
            / lp_supply as u128;

        u64::try_from(share).map_err(|_| error!(AmmError::ArithmeticOverflow))
    }

    /// Finds how many of `user_base_tokens` to sell so that the base left
    /// over and the quote received are as close to equal as possible, which
    /// maximises the pairs that can be merged afterwards.
    ///
    /// `received(s) - (user - s)` is strictly increasing in the sell amount
    /// `s`, so its absolute value is unimodal and a ternary search over the
    /// integers converges on the minimum.
    pub fn optimal_swap_for_merge(
        user_base_tokens: u64,
        base_reserve: u64,
        quote_reserve: u64,
        fee_per_mille: u16,
    ) -> Result<MergeSwap> {
        require!(
            base_reserve > 0 && quote_reserve > 0,
            AmmError::InsufficientLiquidity
        );

        let gap = |sell: u64| -> Result<u128> {
            let received = Self::sell_output(sell, base_reserve, quote_reserve, fee_per_mille)?;
            let kept = user_base_tokens - sell;
            Ok((received as i128 - kept as i128).unsigned_abs())
        };

        let mut lo = 0u64;
        let mut hi = user_base_tokens;

        while hi - lo > 2 {
            let third = (hi - lo) / 3;
            let left = lo + third;
            let right = hi - third;

            if gap(left)? <= gap(right)? {
                hi = right;
            } else {
                lo = left;
            }
        }

        let mut best = lo;
        let mut best_gap = gap(lo)?;
        for candidate in lo + 1..=hi {
            let candidate_gap = gap(candidate)?;
            if candidate_gap < best_gap {
                best = candidate;
                best_gap = candidate_gap;
            }
        }

        Ok(MergeSwap {
            swap_amount: best,
            base_after_swap: user_base_tokens - best,
            expected_quote: Self::sell_output(best, base_reserve, quote_reserve, fee_per_mille)?,
        })
    }

    fn sell_output(sell: u64, base_reserve: u64, quote_reserve: u64, fee_per_mille: u16) -> Result<u64> {
        if sell == 0 {
            return Ok(0);
        }
        Self::swap_output(sell, base_reserve, quote_reserve, fee_per_mille)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_output_matches_reference_trade() {
        // 10 base at 9 decimals, 1000 quote at 6 decimals, buy with 100 quote
        let out = ConstantProduct::swap_output(100_000_000, 1_000_000_000, 10_000_000_000, 10).unwrap();
        assert_eq!(out, 900_818_926);
    }

    #[test]
    fn test_swap_output_small_pool() {
        // 3 base / 8 quote: selling 1 base would give 2 without the fee
        assert_eq!(ConstantProduct::swap_output(1, 3, 8, 10).unwrap(), 1);
        assert_eq!(ConstantProduct::swap_output(8, 7, 3, 10).unwrap(), 1);
    }

    #[test]
    fn test_swap_output_rejects_bad_input() {
        assert_eq!(
            ConstantProduct::swap_output(0, 100, 100, 10).unwrap_err(),
            AmmError::ZeroSwapAmount.into()
        );
        assert_eq!(
            ConstantProduct::swap_output(1, 0, 100, 10).unwrap_err(),
            AmmError::InsufficientLiquidity.into()
        );
        assert_eq!(
            ConstantProduct::swap_output(1, 100, 0, 10).unwrap_err(),
            AmmError::InsufficientLiquidity.into()
        );
        assert_eq!(
            ConstantProduct::swap_output(1, 100, 100, 1000).unwrap_err(),
            AmmError::InvalidFee.into()
        );
    }

    #[test]
    fn test_swap_output_overflow_is_reported() {
        let res = ConstantProduct::swap_output(u64::MAX, u64::MAX, u64::MAX, 0);
        assert_eq!(res.unwrap_err(), AmmError::ArithmeticOverflow.into());
    }

    #[test]
    fn test_zero_fee_is_plain_constant_product() {
        // 100 * 100, put in 100 -> 200 * 50
        assert_eq!(ConstantProduct::swap_output(100, 100, 100, 0).unwrap(), 50);
    }

    #[test]
    fn test_required_base_amount_rounds_up() {
        assert_eq!(ConstantProduct::required_base_amount(10, 3, 10).unwrap(), 3);
        assert_eq!(ConstantProduct::required_base_amount(10, 10, 3).unwrap(), 34);
        assert_eq!(ConstantProduct::required_base_amount(0, 10, 3).unwrap(), 0);
    }

    #[test]
    fn test_lp_tokens_round_down() {
        assert_eq!(ConstantProduct::lp_tokens_for_quote(10, 3, 7).unwrap(), 23);
        assert_eq!(ConstantProduct::lp_tokens_for_quote(1, 1_000, 999).unwrap(), 0);
    }

    #[test]
    fn test_reserve_share() {
        assert_eq!(ConstantProduct::reserve_share(50, 1_001, 100).unwrap(), 500);
        assert_eq!(ConstantProduct::reserve_share(100, 1_001, 100).unwrap(), 1_001);
        assert_eq!(
            ConstantProduct::reserve_share(101, 1_001, 100).unwrap_err(),
            AmmError::InsufficientBalance.into()
        );
    }

    #[test]
    fn test_optimal_swap_for_merge_balances_pair() {
        let base_reserve = 1_000_000_000;
        let quote_reserve = 1_000_000_000;
        let user = 10_000_000;

        let merge = ConstantProduct::optimal_swap_for_merge(user, base_reserve, quote_reserve, 10).unwrap();

        assert_eq!(merge.swap_amount + merge.base_after_swap, user);
        // at a 1:1 price the user sells roughly half
        assert!(merge.swap_amount > 4_900_000 && merge.swap_amount < 5_100_000);

        let diff = (merge.base_after_swap as i128 - merge.expected_quote as i128).abs();
        // neighbours are never strictly better
        for neighbour in [merge.swap_amount - 1, merge.swap_amount + 1] {
            let out = ConstantProduct::swap_output(neighbour, base_reserve, quote_reserve, 10).unwrap();
            let neighbour_diff = (out as i128 - (user - neighbour) as i128).abs();
            assert!(diff <= neighbour_diff);
        }
    }

    #[test]
    fn test_optimal_swap_for_merge_with_nothing_to_sell() {
        let merge = ConstantProduct::optimal_swap_for_merge(0, 100, 100, 10).unwrap();
        assert_eq!(merge, MergeSwap { swap_amount: 0, base_after_swap: 0, expected_quote: 0 });
        assert_eq!(merge.mergeable(), 0);
    }
}
