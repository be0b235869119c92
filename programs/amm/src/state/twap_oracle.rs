//! Slot-weighted TWAP oracle embedded in every pool.
//!
//! ## Accumulation
//!
//! ```text
//! aggregator += last_observation * (slot - last_updated_slot)
//! twap        = aggregator / (last_updated_slot - created_at_slot)
//! ```
//!
//! The observation that gets weighted is the one that was in force for the
//! elapsed slots. Only after accruing it does the oracle move the
//! observation toward the reserve-implied price, and by no more than
//! `max_observation_change_per_update`. A manipulator has to hold a bad
//! price for many slots to drag the average anywhere.

use anchor_lang::prelude::*;

use crate::errors::AmmError;
use crate::math::{PriceMath, MAX_PRICE};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct TwapOracle {
    pub last_updated_slot: u64,
    /// Reserve-implied price seen on the most recent update, unclamped.
    pub last_price: u128,
    /// Clamped price currently being accrued, scaled by `PRICE_SCALE`.
    pub last_observation: u128,
    /// Running sum of `observation * slots`.
    pub aggregator: u128,
    /// The most an observation may move per update.
    pub max_observation_change_per_update: u128,
    pub initial_observation: u128,
}

impl TwapOracle {
    /// Both the seed observation and the per-update step are capped at
    /// `MAX_PRICE`; a larger seed would overflow the aggregator within a
    /// few slots and leave the pool unusable.
    pub fn new(
        current_slot: u64,
        initial_observation: u128,
        max_observation_change_per_update: u128,
    ) -> Result<Self> {
        require!(initial_observation <= MAX_PRICE, AmmError::InvalidTwapParameters);
        require!(
            max_observation_change_per_update <= MAX_PRICE,
            AmmError::InvalidTwapParameters
        );

        Ok(Self {
            last_updated_slot: current_slot,
            last_price: initial_observation,
            last_observation: initial_observation,
            aggregator: 0,
            max_observation_change_per_update,
            initial_observation,
        })
    }

    /// Records an observation at `slot` for a pool holding the given
    /// reserves. Returns whether the aggregator moved, which only happens
    /// once per slot.
    pub fn update(&mut self, slot: u64, base_reserve: u64, quote_reserve: u64) -> Result<bool> {
        // an empty pool has no price of its own, so keep accruing the last one
        let price = if base_reserve > 0 && quote_reserve > 0 {
            PriceMath::amm_price_from_reserves(base_reserve, quote_reserve)?
        } else {
            self.last_observation
        };
        self.last_price = price;

        if slot <= self.last_updated_slot {
            return Ok(false);
        }

        let slots_elapsed = (slot - self.last_updated_slot) as u128;
        let weighted_observation = self
            .last_observation
            .checked_mul(slots_elapsed)
            .ok_or(AmmError::ArithmeticOverflow)?;

        self.aggregator = self
            .aggregator
            .checked_add(weighted_observation)
            .ok_or(AmmError::ArithmeticOverflow)?;
        self.last_observation = self.clamp(price);
        self.last_updated_slot = slot;

        Ok(true)
    }

    /// Time-weighted average price between `created_at_slot` and the last
    /// update.
    pub fn twap(&self, created_at_slot: u64) -> Result<u128> {
        let slots_passed = self
            .last_updated_slot
            .checked_sub(created_at_slot)
            .ok_or(AmmError::ArithmeticUnderflow)?;

        require!(slots_passed > 0, AmmError::NoSlotsPassed);

        Ok(self.aggregator / slots_passed as u128)
    }

    fn clamp(&self, price: u128) -> u128 {
        let last = self.last_observation;
        let max_change = self.max_observation_change_per_update;

        if price > last {
            let ceiling = last.saturating_add(max_change).min(MAX_PRICE);
            price.min(ceiling)
        } else {
            let floor = last.saturating_sub(max_change);
            price.max(floor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::PRICE_SCALE;

    const ONE: u128 = PRICE_SCALE;
    const TENTH: u128 = PRICE_SCALE / 10;

    #[test]
    fn test_new_oracle_has_no_twap() {
        let oracle = TwapOracle::new(100, ONE, TENTH).unwrap();
        assert_eq!(oracle.aggregator, 0);
        assert_eq!(oracle.last_updated_slot, 100);
        assert_eq!(oracle.twap(100).unwrap_err(), AmmError::NoSlotsPassed.into());
    }

    #[test]
    fn test_same_slot_update_does_not_accrue() {
        let mut oracle = TwapOracle::new(100, ONE, TENTH).unwrap();

        assert!(!oracle.update(100, 1_000, 5_000).unwrap());
        assert_eq!(oracle.aggregator, 0);
        assert_eq!(oracle.last_observation, ONE);
        assert_eq!(oracle.last_price, 5 * ONE);
    }

    #[test]
    fn test_update_weights_previous_observation_and_clamps_up() {
        let mut oracle = TwapOracle::new(100, ONE, TENTH).unwrap();

        // reserves price at 2.0, observation may only climb by 0.1
        assert!(oracle.update(110, 1_000_000_000, 2_000_000_000).unwrap());
        assert_eq!(oracle.aggregator, ONE * 10);
        assert_eq!(oracle.last_observation, ONE + TENTH);
        assert_eq!(oracle.last_updated_slot, 110);
        assert_eq!(oracle.twap(100).unwrap(), ONE);

        assert!(oracle.update(120, 1_000_000_000, 2_000_000_000).unwrap());
        assert_eq!(oracle.aggregator, ONE * 10 + (ONE + TENTH) * 10);
        assert_eq!(oracle.last_observation, ONE + 2 * TENTH);
        assert_eq!(oracle.twap(100).unwrap(), ONE + TENTH / 2);
    }

    #[test]
    fn test_update_clamps_down() {
        let mut oracle = TwapOracle::new(0, ONE, TENTH).unwrap();

        oracle.update(1, 2, 1).unwrap();
        assert_eq!(oracle.last_price, ONE / 2);
        assert_eq!(oracle.last_observation, ONE - TENTH);
    }

    #[test]
    fn test_small_moves_are_taken_as_is() {
        let mut oracle = TwapOracle::new(0, ONE, TENTH).unwrap();

        // 1.05 is inside the band
        oracle.update(1, 100, 105).unwrap();
        assert_eq!(oracle.last_observation, ONE + TENTH / 2);
    }

    #[test]
    fn test_floor_saturates_at_zero() {
        let mut oracle = TwapOracle::new(0, TENTH, ONE).unwrap();

        oracle.update(1, 1_000_000, 1).unwrap();
        assert_eq!(oracle.last_observation, ONE / 1_000_000);
    }

    #[test]
    fn test_empty_pool_keeps_observation() {
        let mut oracle = TwapOracle::new(0, ONE, TENTH).unwrap();

        oracle.update(50, 0, 0).unwrap();
        assert_eq!(oracle.last_observation, ONE);
        assert_eq!(oracle.aggregator, ONE * 50);
        assert_eq!(oracle.twap(0).unwrap(), ONE);
    }

    #[test]
    fn test_aggregator_overflow_is_reported() {
        let mut oracle = TwapOracle::new(0, ONE, TENTH).unwrap();
        oracle.aggregator = u128::MAX - 1;

        assert_eq!(
            oracle.update(1, 100, 100).unwrap_err(),
            AmmError::ArithmeticOverflow.into()
        );
    }

    #[test]
    fn test_twap_before_creation_slot_underflows() {
        let oracle = TwapOracle::new(10, ONE, TENTH).unwrap();
        assert_eq!(oracle.twap(11).unwrap_err(), AmmError::ArithmeticUnderflow.into());
    }

    #[test]
    fn test_new_rejects_out_of_range_parameters() {
        assert_eq!(
            TwapOracle::new(0, u128::MAX, 0).unwrap_err(),
            AmmError::InvalidTwapParameters.into()
        );
        assert_eq!(
            TwapOracle::new(0, MAX_PRICE + 1, TENTH).unwrap_err(),
            AmmError::InvalidTwapParameters.into()
        );
        assert_eq!(
            TwapOracle::new(0, ONE, MAX_PRICE + 1).unwrap_err(),
            AmmError::InvalidTwapParameters.into()
        );
        assert!(TwapOracle::new(0, MAX_PRICE, MAX_PRICE).is_ok());
    }

    #[test]
    fn test_max_price_pool_keeps_updating() {
        // a pool pinned at the highest price with no room to move
        let mut oracle = TwapOracle::new(0, MAX_PRICE, 0).unwrap();

        oracle.update(1, 1, u64::MAX).unwrap();
        oracle.update(10_000, 1_000, 1_000).unwrap();
        oracle.update(100_000_000, 1_000, 1_000).unwrap();

        assert_eq!(oracle.last_observation, MAX_PRICE);
        assert_eq!(oracle.twap(0).unwrap(), MAX_PRICE);
    }
}
