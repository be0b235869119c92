//! Token CPI helpers.
//!
//! Zero amounts are skipped rather than sent to the token program.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{self, Burn, MintTo, TransferChecked};

#[allow(clippy::too_many_arguments)]
pub fn token_transfer<'info>(
    amount: u64,
    decimals: u8,
    token_program: AccountInfo<'info>,
    from: AccountInfo<'info>,
    mint: AccountInfo<'info>,
    to: AccountInfo<'info>,
    authority: AccountInfo<'info>,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }

    token_interface::transfer_checked(
        CpiContext::new_with_signer(
            token_program,
            TransferChecked {
                from,
                mint,
                to,
                authority,
            },
            signer_seeds,
        ),
        amount,
        decimals,
    )
}

pub fn token_mint<'info>(
    amount: u64,
    token_program: AccountInfo<'info>,
    mint: AccountInfo<'info>,
    to: AccountInfo<'info>,
    authority: AccountInfo<'info>,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }

    token_interface::mint_to(
        CpiContext::new_with_signer(
            token_program,
            MintTo {
                mint,
                to,
                authority,
            },
            signer_seeds,
        ),
        amount,
    )
}

pub fn token_burn<'info>(
    amount: u64,
    token_program: AccountInfo<'info>,
    mint: AccountInfo<'info>,
    from: AccountInfo<'info>,
    authority: AccountInfo<'info>,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }

    token_interface::burn(
        CpiContext::new(
            token_program,
            Burn {
                mint,
                from,
                authority,
            },
        ),
        amount,
    )
}
