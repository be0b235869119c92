//! Global AMM Configuration
//!
//! Settings shared by every pool the program creates.

use anchor_lang::prelude::*;

use crate::errors::AmmError;

/// Global configuration account (singleton PDA)
///
/// Seeds: ["amm_config"]
#[account]
#[derive(InitSpace)]
pub struct AmmConfig {
    /// Allowed to change the config
    pub admin: Pubkey,

    /// Swap fee handed to newly created pools, per mille of the input
    /// (10 = 1%, i.e. the input is multiplied by 990/1000)
    pub swap_fee_per_mille: u16,

    /// PDA bump seed
    pub bump: u8,
}

impl AmmConfig {
    pub const SEED: &'static [u8] = b"amm_config";
    pub const DEFAULT_SWAP_FEE_PER_MILLE: u16 = 10;
    pub const MAX_SWAP_FEE_PER_MILLE: u16 = 100;

    pub fn validate_fee(swap_fee_per_mille: u16) -> Result<()> {
        require!(
            swap_fee_per_mille <= Self::MAX_SWAP_FEE_PER_MILLE,
            AmmError::InvalidFee
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_bounds() {
        assert!(AmmConfig::validate_fee(0).is_ok());
        assert!(AmmConfig::validate_fee(AmmConfig::DEFAULT_SWAP_FEE_PER_MILLE).is_ok());
        assert!(AmmConfig::validate_fee(AmmConfig::MAX_SWAP_FEE_PER_MILLE).is_ok());
        assert_eq!(
            AmmConfig::validate_fee(AmmConfig::MAX_SWAP_FEE_PER_MILLE + 1).unwrap_err(),
            AmmError::InvalidFee.into()
        );
    }
}
