//! Read-only TWAP query, returned through the transaction's return data.

use anchor_lang::prelude::*;

use crate::state::Amm;

#[derive(Accounts)]
pub struct GetTwap<'info> {
    pub amm: Account<'info, Amm>,
}

impl<'info> GetTwap<'info> {
    pub fn get_twap(&self) -> Result<u128> {
        let twap = self.amm.twap()?;
        msg!("TWAP: {}", twap);
        Ok(twap)
    }
}
