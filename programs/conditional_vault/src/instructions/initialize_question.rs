//! Question Creation
//!
//! Questions live at an address derived from (question_id, oracle,
//! num_outcomes), so the same triple can only be created once.

use anchor_lang::prelude::*;

use crate::events::{CommonFields, InitializeQuestionEvent};
use crate::state::Question;

#[derive(Accounts)]
#[instruction(question_id: [u8; 32], oracle: Pubkey, num_outcomes: u8)]
pub struct InitializeQuestion<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        init,
        payer = payer,
        space = Question::space(num_outcomes),
        seeds = [
            Question::SEED,
            question_id.as_ref(),
            oracle.as_ref(),
            &[num_outcomes],
        ],
        bump,
    )]
    pub question: Account<'info, Question>,

    pub system_program: Program<'info, System>,
}

impl<'info> InitializeQuestion<'info> {
    pub fn initialize_question(
        &mut self,
        question_id: [u8; 32],
        oracle: Pubkey,
        num_outcomes: u8,
    ) -> Result<()> {
        self.question
            .set_inner(Question::new(question_id, oracle, num_outcomes)?);

        msg!("Question created: {}", self.question.key());
        msg!("Oracle: {} Outcomes: {}", oracle, num_outcomes);

        emit!(InitializeQuestionEvent {
            common: CommonFields::new(&Clock::get()?),
            question: self.question.key(),
            question_id,
            oracle,
            num_outcomes,
        });

        Ok(())
    }
}
