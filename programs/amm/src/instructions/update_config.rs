//! Config Updates
//!
//! Fee changes only reach pools created afterwards; existing pools keep
//! the fee they were created with.

use anchor_lang::prelude::*;

use crate::errors::AmmError;
use crate::events::ConfigUpdatedEvent;
use crate::state::AmmConfig;

#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    #[account(
        constraint = admin.key() == config.admin @ AmmError::Unauthorized,
    )]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [AmmConfig::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, AmmConfig>,
}

impl<'info> UpdateConfig<'info> {
    pub fn update_config(
        &mut self,
        swap_fee_per_mille: Option<u16>,
        new_admin: Option<Pubkey>,
    ) -> Result<()> {
        if let Some(fee) = swap_fee_per_mille {
            AmmConfig::validate_fee(fee)?;
            self.config.swap_fee_per_mille = fee;
            msg!("Swap fee set to {} per mille", fee);
        }

        if let Some(admin) = new_admin {
            self.config.admin = admin;
            msg!("Admin handed over to {}", admin);
        }

        emit!(ConfigUpdatedEvent {
            admin: self.config.admin,
            swap_fee_per_mille: self.config.swap_fee_per_mille,
        });

        Ok(())
    }
}
