//! Conversions between human-facing numbers and on-chain integers.
//!
//! Floating point is only accepted at the edges (config, display). Anything
//! that feeds settlement is computed on checked `u128`s.

use anchor_lang::prelude::*;

use crate::errors::AmmError;

/// Fixed-point scale of every AMM price and TWAP observation.
pub const PRICE_SCALE: u128 = 1_000_000_000_000;

/// Largest price an observation may take: 1e14 quote units per base unit.
///
/// Headroom: the aggregator sums `observation * slots` in a u128, so a pool
/// pinned at `MAX_PRICE` overflows after `u128::MAX / MAX_PRICE` ≈ 3.4e12
/// slots, about 43,000 years at 400ms slots.
pub const MAX_PRICE: u128 = 100_000_000_000_000 * PRICE_SCALE;

/// Basis points in one whole.
pub const BPS_SCALE: u128 = 10_000;

pub struct PriceMath;

impl PriceMath {
    /// Converts a human amount (e.g. `1.5` USDC) into base units, truncating
    /// any digits finer than `decimals`.
    pub fn scale_to_chain(human_amount: f64, decimals: u8) -> Result<u64> {
        require!(
            human_amount.is_finite() && human_amount >= 0.0,
            AmmError::InvalidAmount
        );
        if human_amount == 0.0 {
            return Ok(0);
        }

        // `Display` for f64 never uses exponent notation, so the digits can
        // be taken apart as written
        let repr = human_amount.to_string();
        let (integer_part, fractional_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

        let digits: u128 = format!("{integer_part}{fractional_part}")
            .parse()
            .map_err(|_| error!(AmmError::ArithmeticOverflow))?;
        let fractional_len =
            u32::try_from(fractional_part.len()).map_err(|_| error!(AmmError::ArithmeticOverflow))?;

        let scaled = digits
            .checked_mul(Self::ten_pow(decimals as u32)?)
            .ok_or(AmmError::ArithmeticOverflow)?
            / Self::ten_pow(fractional_len)?;

        u64::try_from(scaled).map_err(|_| error!(AmmError::ArithmeticOverflow))
    }

    /// Display-only inverse of [`Self::scale_to_chain`].
    pub fn chain_to_human(chain_amount: u64, decimals: u8) -> f64 {
        chain_amount as f64 / 10f64.powi(decimals as i32)
    }

    /// Turns a human price (quote per base) into the scaled integer the AMM
    /// and its oracle compare against, correcting for the decimals delta.
    pub fn scale_price(price: f64, base_decimals: u8, quote_decimals: u8) -> Result<u128> {
        require!(price.is_finite() && price >= 0.0, AmmError::InvalidAmount);

        let price_scaled = price * PRICE_SCALE as f64;
        require!(price_scaled < u128::MAX as f64, AmmError::ArithmeticOverflow);
        let price_scaled = price_scaled as u128;

        if quote_decimals > base_decimals {
            let scalar = Self::ten_pow((quote_decimals - base_decimals) as u32)?;
            price_scaled
                .checked_mul(scalar)
                .ok_or_else(|| error!(AmmError::ArithmeticOverflow))
        } else {
            let scalar = Self::ten_pow((base_decimals - quote_decimals) as u32)?;
            Ok(price_scaled / scalar)
        }
    }

    /// Display-only inverse of [`Self::scale_price`].
    pub fn human_price(scaled_price: u128, base_decimals: u8, quote_decimals: u8) -> f64 {
        let decimals_delta = base_decimals as i32 - quote_decimals as i32;
        scaled_price as f64 * 10f64.powi(decimals_delta) / PRICE_SCALE as f64
    }

    /// Instantaneous price implied by the reserves, in [`PRICE_SCALE`] units.
    pub fn amm_price_from_reserves(base_reserve: u64, quote_reserve: u64) -> Result<u128> {
        require!(base_reserve > 0, AmmError::InsufficientLiquidity);

        Ok((quote_reserve as u128)
            .checked_mul(PRICE_SCALE)
            .ok_or(AmmError::ArithmeticOverflow)?
            / base_reserve as u128)
    }

    /// Upper bound for an input: `amount * (10000 + bps) / 10000`.
    pub fn add_slippage(amount: u64, slippage_bps: u64) -> Result<u64> {
        let factor = BPS_SCALE
            .checked_add(slippage_bps as u128)
            .ok_or(AmmError::ArithmeticOverflow)?;
        Self::apply_bps(amount, factor)
    }

    /// Lower bound for an output: `amount * (10000 - bps) / 10000`.
    pub fn subtract_slippage(amount: u64, slippage_bps: u64) -> Result<u64> {
        let factor = BPS_SCALE
            .checked_sub(slippage_bps as u128)
            .ok_or(AmmError::ArithmeticUnderflow)?;
        Self::apply_bps(amount, factor)
    }

    fn apply_bps(amount: u64, factor: u128) -> Result<u64> {
        let scaled = (amount as u128)
            .checked_mul(factor)
            .ok_or(AmmError::ArithmeticOverflow)?
            / BPS_SCALE;
        u64::try_from(scaled).map_err(|_| error!(AmmError::ArithmeticOverflow))
    }

    fn ten_pow(exp: u32) -> Result<u128> {
        10u128
            .checked_pow(exp)
            .ok_or_else(|| error!(AmmError::ArithmeticOverflow))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_to_chain() {
        assert_eq!(PriceMath::scale_to_chain(1.5, 6).unwrap(), 1_500_000);
        assert_eq!(PriceMath::scale_to_chain(1000.0, 6).unwrap(), 1_000_000_000);
        assert_eq!(PriceMath::scale_to_chain(0.0, 9).unwrap(), 0);
        assert_eq!(PriceMath::scale_to_chain(0.000_000_1, 9).unwrap(), 100);
    }

    #[test]
    fn test_scale_to_chain_truncates() {
        // 7th decimal is dropped, never rounded up
        assert_eq!(PriceMath::scale_to_chain(1.234_567_9, 6).unwrap(), 1_234_567);
        assert_eq!(PriceMath::scale_to_chain(0.999_999_9, 6).unwrap(), 999_999);
    }

    #[test]
    fn test_scale_to_chain_rejects_invalid() {
        for bad in [-1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(
                PriceMath::scale_to_chain(bad, 6).unwrap_err(),
                AmmError::InvalidAmount.into()
            );
        }
        assert_eq!(
            PriceMath::scale_to_chain(1e30, 9).unwrap_err(),
            AmmError::ArithmeticOverflow.into()
        );
    }

    #[test]
    fn test_chain_to_human() {
        assert_eq!(PriceMath::chain_to_human(1_500_000, 6), 1.5);
        assert_eq!(PriceMath::chain_to_human(0, 9), 0.0);
    }

    #[test]
    fn test_scale_price_decimal_delta() {
        // base 9 decimals, quote 6 decimals: price of 100 quote per base
        assert_eq!(PriceMath::scale_price(100.0, 9, 6).unwrap(), 100_000_000_000);
        // base 6, quote 9
        assert_eq!(
            PriceMath::scale_price(100.0, 6, 9).unwrap(),
            100_000_000_000_000_000
        );
        assert_eq!(PriceMath::scale_price(1.0, 6, 6).unwrap(), PRICE_SCALE);
        assert_eq!(
            PriceMath::scale_price(-1.0, 6, 6).unwrap_err(),
            AmmError::InvalidAmount.into()
        );
    }

    #[test]
    fn test_scale_price_agrees_with_reserves() {
        // 10 base (9 decimals) and 1000 quote (6 decimals) price at 100
        let from_reserves = PriceMath::amm_price_from_reserves(10_000_000_000, 1_000_000_000).unwrap();
        assert_eq!(from_reserves, PriceMath::scale_price(100.0, 9, 6).unwrap());
        assert_eq!(PriceMath::human_price(from_reserves, 9, 6), 100.0);
    }

    #[test]
    fn test_amm_price_needs_base_reserve() {
        assert_eq!(
            PriceMath::amm_price_from_reserves(0, 100).unwrap_err(),
            AmmError::InsufficientLiquidity.into()
        );
    }

    #[test]
    fn test_slippage() {
        assert_eq!(PriceMath::add_slippage(10_000, 50).unwrap(), 10_050);
        assert_eq!(PriceMath::subtract_slippage(10_000, 50).unwrap(), 9_950);
        // rounds toward zero
        assert_eq!(PriceMath::subtract_slippage(999, 1).unwrap(), 998);
        assert_eq!(PriceMath::add_slippage(999, 1).unwrap(), 999);
        assert_eq!(
            PriceMath::subtract_slippage(100, 10_001).unwrap_err(),
            AmmError::ArithmeticUnderflow.into()
        );
        assert_eq!(
            PriceMath::add_slippage(u64::MAX, 10_000).unwrap_err(),
            AmmError::ArithmeticOverflow.into()
        );
    }
}
