//! Question State
//!
//! A question is a statement about a future event with two or more
//! outcomes. Its oracle resolves it once by assigning each outcome a
//! payout weight:
//!
//! - binary pass/fail: `[1, 0]` or `[0, 1]`
//! - categorical over N candidates: a 1 for the winner, 0 elsewhere
//! - scalar, e.g. "how effective was the grant": `[40, 60]` pays 40% to the
//!   first outcome and 60% to the second
//!
//! Outcome `i` redeems for `payout_numerators[i] / payout_denominator`
//! underlying tokens per conditional token.

use anchor_lang::prelude::*;

use crate::errors::VaultError;

/// Question account
///
/// Seeds: ["question", question_id, oracle, [num_outcomes]]
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct Question {
    /// Caller-chosen identifier, usually a hash of the question text
    pub question_id: [u8; 32],

    /// The only account that can resolve this question
    pub oracle: Pubkey,

    /// One weight per outcome, all zero until resolution
    pub payout_numerators: Vec<u32>,

    /// Sum of the numerators once resolved, zero before
    pub payout_denominator: u32,
}

impl Question {
    pub const SEED: &'static [u8] = b"question";
    pub const MIN_OUTCOMES: u8 = 2;

    /// Account size for a question with `num_outcomes` outcomes.
    pub fn space(num_outcomes: u8) -> usize {
        8 + 32 + 32 + 4 + 4 * num_outcomes as usize + 4
    }

    pub fn new(question_id: [u8; 32], oracle: Pubkey, num_outcomes: u8) -> Result<Self> {
        require_gte!(
            num_outcomes,
            Self::MIN_OUTCOMES,
            VaultError::InsufficientNumOutcomes
        );

        Ok(Self {
            question_id,
            oracle,
            payout_numerators: vec![0; num_outcomes as usize],
            payout_denominator: 0,
        })
    }

    pub fn num_outcomes(&self) -> usize {
        self.payout_numerators.len()
    }

    pub fn is_resolved(&self) -> bool {
        self.payout_denominator != 0
    }

    /// Sets the payouts. Only ever succeeds once.
    pub fn resolve(&mut self, payout_numerators: Vec<u32>) -> Result<()> {
        require!(!self.is_resolved(), VaultError::AlreadyResolved);
        require_eq!(
            payout_numerators.len(),
            self.num_outcomes(),
            VaultError::InvalidPayouts
        );

        let payout_denominator = payout_numerators
            .iter()
            .try_fold(0u32, |sum, numerator| sum.checked_add(*numerator))
            .ok_or(VaultError::ArithmeticOverflow)?;
        require!(payout_denominator > 0, VaultError::InvalidPayouts);

        self.payout_numerators = payout_numerators;
        self.payout_denominator = payout_denominator;

        Ok(())
    }

    /// Underlying owed for conditional token `balances` (one per outcome, in
    /// outcome order). A single floor division over the weighted sum, so
    /// rounding dust stays in the vault.
    pub fn redeemable_amount(&self, balances: &[u64]) -> Result<u64> {
        require!(self.is_resolved(), VaultError::CantRedeemConditionalTokens);
        require_eq!(
            balances.len(),
            self.num_outcomes(),
            VaultError::QuestionMismatch
        );

        let weighted = self.weighted_sum(balances)?;

        u64::try_from(weighted / self.payout_denominator as u128)
            .map_err(|_| error!(VaultError::ArithmeticOverflow))
    }

    /// `sum(amounts[i] * payout_numerators[i])`
    pub(crate) fn weighted_sum(&self, amounts: &[u64]) -> Result<u128> {
        amounts
            .iter()
            .zip(&self.payout_numerators)
            .try_fold(0u128, |sum, (amount, numerator)| {
                (*amount as u128)
                    .checked_mul(*numerator as u128)
                    .and_then(|weighted| sum.checked_add(weighted))
            })
            .ok_or_else(|| error!(VaultError::ArithmeticOverflow))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(num_outcomes: u8) -> Question {
        Question::new([7; 32], Pubkey::new_unique(), num_outcomes).unwrap()
    }

    #[test]
    fn test_new_question_is_unresolved() {
        let q = question(3);

        assert_eq!(q.num_outcomes(), 3);
        assert_eq!(q.payout_numerators, vec![0, 0, 0]);
        assert!(!q.is_resolved());
    }

    #[test]
    fn test_needs_two_outcomes() {
        for n in [0, 1] {
            assert_eq!(
                Question::new([0; 32], Pubkey::new_unique(), n).unwrap_err(),
                VaultError::InsufficientNumOutcomes.into()
            );
        }
    }

    #[test]
    fn test_resolve_sets_denominator() {
        let mut q = question(2);
        q.resolve(vec![6, 4]).unwrap();

        assert!(q.is_resolved());
        assert_eq!(q.payout_numerators, vec![6, 4]);
        assert_eq!(q.payout_denominator, 10);
    }

    #[test]
    fn test_resolve_is_one_shot() {
        let mut q = question(2);
        q.resolve(vec![1, 0]).unwrap();

        assert_eq!(
            q.resolve(vec![0, 1]).unwrap_err(),
            VaultError::AlreadyResolved.into()
        );
        assert_eq!(q.payout_numerators, vec![1, 0]);
        assert_eq!(q.payout_denominator, 1);
    }

    #[test]
    fn test_resolve_rejects_bad_payouts() {
        let mut q = question(2);

        assert_eq!(
            q.resolve(vec![1, 0, 0]).unwrap_err(),
            VaultError::InvalidPayouts.into()
        );
        assert_eq!(
            q.resolve(vec![1]).unwrap_err(),
            VaultError::InvalidPayouts.into()
        );
        assert_eq!(
            q.resolve(vec![0, 0]).unwrap_err(),
            VaultError::InvalidPayouts.into()
        );
        assert_eq!(
            q.resolve(vec![u32::MAX, 1]).unwrap_err(),
            VaultError::ArithmeticOverflow.into()
        );
        assert!(!q.is_resolved());
    }

    #[test]
    fn test_binary_redemption() {
        let mut q = question(2);

        assert_eq!(
            q.redeemable_amount(&[100, 100]).unwrap_err(),
            VaultError::CantRedeemConditionalTokens.into()
        );

        q.resolve(vec![1, 0]).unwrap();
        assert_eq!(q.redeemable_amount(&[100, 100]).unwrap(), 100);
        assert_eq!(q.redeemable_amount(&[0, 100]).unwrap(), 0);
        assert_eq!(q.redeemable_amount(&[0, 0]).unwrap(), 0);
    }

    #[test]
    fn test_scalar_redemption() {
        let mut q = question(2);
        q.resolve(vec![6, 4]).unwrap();

        assert_eq!(q.redeemable_amount(&[30, 0]).unwrap(), 18);
        assert_eq!(q.redeemable_amount(&[0, 140]).unwrap(), 56);
        // one floor over the weighted sum: (3*6 + 3*4) / 10
        assert_eq!(q.redeemable_amount(&[3, 3]).unwrap(), 3);
        assert_eq!(q.redeemable_amount(&[1, 1]).unwrap(), 1);
        assert_eq!(q.redeemable_amount(&[1, 0]).unwrap(), 0);
    }

    #[test]
    fn test_redemption_needs_every_outcome() {
        let mut q = question(3);
        q.resolve(vec![1, 1, 1]).unwrap();

        assert_eq!(
            q.redeemable_amount(&[3, 3]).unwrap_err(),
            VaultError::QuestionMismatch.into()
        );
        assert_eq!(q.redeemable_amount(&[3, 3, 3]).unwrap(), 3);
    }

    #[test]
    fn test_space_fits_serialized_question() {
        let mut q = question(5);
        q.resolve(vec![1, 2, 3, 4, 5]).unwrap();

        let mut serialized = Vec::new();
        q.try_serialize(&mut serialized).unwrap();

        assert_eq!(Question::space(5), serialized.len());
    }
}
