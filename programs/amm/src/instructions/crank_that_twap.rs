//! Oracle Crank
//!
//! Anyone may crank. It records an observation without touching reserves,
//! which keeps the TWAP current through quiet periods.

use anchor_lang::prelude::*;

use crate::events::{CommonFields, CrankThatTwapEvent};
use crate::state::Amm;

#[derive(Accounts)]
pub struct CrankThatTwap<'info> {
    #[account(mut)]
    pub amm: Account<'info, Amm>,
}

impl<'info> CrankThatTwap<'info> {
    pub fn crank_that_twap(&mut self) -> Result<()> {
        let clock = Clock::get()?;

        let observed = self.amm.update_twap(clock.slot)?;

        emit!(CrankThatTwapEvent {
            common: CommonFields::new(&clock, self.amm.key(), &self.amm),
            observed,
        });

        Ok(())
    }
}
