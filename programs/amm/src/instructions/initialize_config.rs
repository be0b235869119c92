//! Config Initialization
//!
//! Creates the singleton that holds the admin and the fee handed to new
//! pools. Called once after deployment.

use anchor_lang::prelude::*;

use crate::events::ConfigInitializedEvent;
use crate::state::AmmConfig;

#[derive(Accounts)]
pub struct InitializeConfig<'info> {
    /// Becomes the config admin
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        init,
        payer = admin,
        space = 8 + AmmConfig::INIT_SPACE,
        seeds = [AmmConfig::SEED],
        bump,
    )]
    pub config: Account<'info, AmmConfig>,

    pub system_program: Program<'info, System>,
}

impl<'info> InitializeConfig<'info> {
    pub fn initialize_config(
        &mut self,
        swap_fee_per_mille: Option<u16>,
        bumps: &InitializeConfigBumps,
    ) -> Result<()> {
        let swap_fee_per_mille =
            swap_fee_per_mille.unwrap_or(AmmConfig::DEFAULT_SWAP_FEE_PER_MILLE);
        AmmConfig::validate_fee(swap_fee_per_mille)?;

        self.config.set_inner(AmmConfig {
            admin: self.admin.key(),
            swap_fee_per_mille,
            bump: bumps.config,
        });

        msg!("AMM config initialized");
        msg!("Admin: {}", self.admin.key());
        msg!("Swap fee: {} per mille", swap_fee_per_mille);

        emit!(ConfigInitializedEvent {
            admin: self.admin.key(),
            swap_fee_per_mille,
        });

        Ok(())
    }
}
