//! Question Resolution
//!
//! The oracle assigns each outcome a payout weight, exactly once.

use anchor_lang::prelude::*;

use crate::errors::VaultError;
use crate::events::{CommonFields, ResolveQuestionEvent};
use crate::state::Question;

#[derive(Accounts)]
pub struct ResolveQuestion<'info> {
    #[account(
        mut,
        has_one = oracle @ VaultError::Unauthorized,
    )]
    pub question: Account<'info, Question>,

    pub oracle: Signer<'info>,
}

impl<'info> ResolveQuestion<'info> {
    pub fn resolve_question(&mut self, payout_numerators: Vec<u32>) -> Result<()> {
        self.question.resolve(payout_numerators)?;

        msg!("Question resolved: {}", self.question.key());
        msg!(
            "Payouts: {:?} / {}",
            self.question.payout_numerators,
            self.question.payout_denominator
        );

        emit!(ResolveQuestionEvent {
            common: CommonFields::new(&Clock::get()?),
            question: self.question.key(),
            payout_numerators: self.question.payout_numerators.clone(),
            payout_denominator: self.question.payout_denominator,
        });

        Ok(())
    }
}
