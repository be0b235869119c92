//! Conditional Vault State
//!
//! A vault escrows one underlying mint against one question and is the
//! mint authority of one conditional token per outcome. Splitting and
//! merging always touch every outcome by the same amount, so before
//! resolution every conditional supply equals the custody balance.

use anchor_lang::prelude::*;

use crate::errors::VaultError;
use crate::state::Question;

/// Token amounts a split, merge or redeem moves, worked out before any CPI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultMovement {
    /// Underlying moved into (split) or out of (merge, redeem) custody
    pub underlying: u64,
    /// Conditional tokens minted (split) or burned (merge, redeem), per outcome
    pub conditional: Vec<u64>,
}

/// Vault account
///
/// Seeds: ["conditional_vault", question, underlying_token_mint]
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct ConditionalVault {
    pub question: Pubkey,

    pub underlying_token_mint: Pubkey,

    /// Vault-owned account holding the escrowed underlying
    pub underlying_token_account: Pubkey,

    /// One mint per outcome, in outcome order.
    /// Seeds: ["conditional_token", vault, [outcome_index]]
    pub conditional_token_mints: Vec<Pubkey>,

    pub pda_bump: u8,

    /// Copied from the underlying mint
    pub decimals: u8,

    /// Bumped on every split, merge and redeem
    pub seq_num: u64,
}

impl ConditionalVault {
    pub const SEED: &'static [u8] = b"conditional_vault";
    pub const CONDITIONAL_TOKEN_SEED: &'static [u8] = b"conditional_token";

    pub fn space(num_outcomes: u8) -> usize {
        8 + 32 + 32 + 32 + 4 + 32 * num_outcomes as usize + 1 + 1 + 8
    }

    /// Signer seeds for CPIs where the vault is the authority.
    pub fn seeds(&self) -> [&[u8]; 4] {
        [
            Self::SEED,
            self.question.as_ref(),
            self.underlying_token_mint.as_ref(),
            std::slice::from_ref(&self.pda_bump),
        ]
    }

    /// Checks the vault can cover everything its conditional tokens could
    /// claim. Run after every mint or burn of conditional tokens.
    ///
    /// Unresolved, any single outcome may end up worth everything, so the
    /// custody must cover the largest supply. Resolved, it must cover the
    /// payout-weighted supplies.
    ///
    /// `conditional_token_supplies` is in the same order as
    /// `conditional_token_mints`.
    pub fn invariant(
        &self,
        question: &Question,
        conditional_token_supplies: &[u64],
        vault_underlying_balance: u64,
    ) -> Result<()> {
        require_eq!(
            conditional_token_supplies.len(),
            self.conditional_token_mints.len(),
            VaultError::QuestionMismatch
        );

        let max_possible_liability = if question.is_resolved() {
            question.redeemable_amount(conditional_token_supplies)?
        } else {
            conditional_token_supplies
                .iter()
                .copied()
                .max()
                .unwrap_or_default()
        };

        require_gte!(
            vault_underlying_balance,
            max_possible_liability,
            VaultError::VaultInvariantViolated
        );

        Ok(())
    }

    pub fn num_outcomes(&self) -> usize {
        self.conditional_token_mints.len()
    }

    /// Split, merge and redeem take one (mint, user token account) pair per
    /// outcome.
    pub fn check_remaining_accounts_len(&self, len: usize) -> Result<()> {
        require_eq!(len, self.num_outcomes() * 2, VaultError::QuestionMismatch);
        Ok(())
    }

    /// Checks the pair passed for `outcome_index`: the mint must be the
    /// vault's mint for that outcome and the token account must hold it and
    /// belong to `authority`.
    pub fn check_conditional_token_account(
        &self,
        outcome_index: usize,
        mint: &Pubkey,
        token_account_mint: &Pubkey,
        token_account_owner: &Pubkey,
        authority: &Pubkey,
    ) -> Result<()> {
        let expected_mint = self
            .conditional_token_mints
            .get(outcome_index)
            .ok_or(VaultError::InvalidOutcomeIndex)?;

        require_keys_eq!(*mint, *expected_mint, VaultError::InvalidConditionalTokenMint);
        require_keys_eq!(
            *token_account_mint,
            *mint,
            VaultError::InvalidConditionalTokenAccount
        );
        require_keys_eq!(
            *token_account_owner,
            *authority,
            VaultError::InvalidConditionalTokenAccount
        );

        Ok(())
    }

    /// `amount` underlying in, `amount` of every conditional token out.
    pub fn plan_split(&self, user_underlying_balance: u64, amount: u64) -> Result<VaultMovement> {
        require_gte!(
            user_underlying_balance,
            amount,
            VaultError::InsufficientUnderlyingBalance
        );

        Ok(VaultMovement {
            underlying: amount,
            conditional: vec![amount; self.num_outcomes()],
        })
    }

    /// `amount` of every conditional token in, `amount` underlying out.
    pub fn plan_merge(&self, user_conditional_balances: &[u64], amount: u64) -> Result<VaultMovement> {
        require_eq!(
            user_conditional_balances.len(),
            self.num_outcomes(),
            VaultError::QuestionMismatch
        );
        for balance in user_conditional_balances {
            require_gte!(*balance, amount, VaultError::InsufficientConditionalBalance);
        }

        Ok(VaultMovement {
            underlying: amount,
            conditional: vec![amount; self.num_outcomes()],
        })
    }

    /// Burns the user's whole balance of every outcome for its resolved value.
    pub fn plan_redeem(
        &self,
        question: &Question,
        user_conditional_balances: &[u64],
    ) -> Result<VaultMovement> {
        require!(question.is_resolved(), VaultError::CantRedeemConditionalTokens);
        require_eq!(
            user_conditional_balances.len(),
            self.num_outcomes(),
            VaultError::QuestionMismatch
        );

        Ok(VaultMovement {
            underlying: question.redeemable_amount(user_conditional_balances)?,
            conditional: user_conditional_balances.to_vec(),
        })
    }

    pub fn bump_seq_num(&mut self) -> Result<()> {
        self.seq_num = self
            .seq_num
            .checked_add(1)
            .ok_or(VaultError::ArithmeticOverflow)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(num_outcomes: u8) -> (Question, ConditionalVault) {
        let question = Question::new([1; 32], Pubkey::new_unique(), num_outcomes).unwrap();
        let vault = ConditionalVault {
            question: Pubkey::new_unique(),
            underlying_token_mint: Pubkey::new_unique(),
            underlying_token_account: Pubkey::new_unique(),
            conditional_token_mints: (0..num_outcomes).map(|_| Pubkey::new_unique()).collect(),
            pda_bump: 255,
            decimals: 6,
            seq_num: 0,
        };
        (question, vault)
    }

    #[test]
    fn test_unresolved_invariant_tracks_largest_supply() {
        let (question, vault) = setup(3);

        assert!(vault.invariant(&question, &[100, 100, 100], 100).is_ok());
        assert!(vault.invariant(&question, &[0, 0, 0], 0).is_ok());
        assert!(vault.invariant(&question, &[40, 100, 70], 100).is_ok());
        assert_eq!(
            vault.invariant(&question, &[100, 101, 100], 100).unwrap_err(),
            VaultError::VaultInvariantViolated.into()
        );
    }

    #[test]
    fn test_resolved_invariant_uses_payouts() {
        let (mut question, vault) = setup(2);
        question.resolve(vec![6, 4]).unwrap();

        // 30 * 0.6 + 140 * 0.4 = 74
        assert!(vault.invariant(&question, &[30, 140], 74).is_ok());
        assert_eq!(
            vault.invariant(&question, &[30, 140], 73).unwrap_err(),
            VaultError::VaultInvariantViolated.into()
        );
    }

    #[test]
    fn test_invariant_needs_every_supply() {
        let (question, vault) = setup(2);

        assert_eq!(
            vault.invariant(&question, &[1], 10).unwrap_err(),
            VaultError::QuestionMismatch.into()
        );
    }

    #[test]
    fn test_seeds() {
        let (_, vault) = setup(2);
        let seeds = vault.seeds();

        assert_eq!(seeds[0], b"conditional_vault");
        assert_eq!(seeds[1], vault.question.as_ref());
        assert_eq!(seeds[3], &[255]);
    }

    #[test]
    fn test_space_fits_serialized_vault() {
        let (_, vault) = setup(4);
        let mut serialized = Vec::new();
        vault.try_serialize(&mut serialized).unwrap();

        // includes the discriminator
        assert_eq!(ConditionalVault::space(4), serialized.len());
    }

    #[test]
    fn test_remaining_accounts_len() {
        let (_, vault) = setup(3);

        assert!(vault.check_remaining_accounts_len(6).is_ok());
        assert_eq!(
            vault.check_remaining_accounts_len(5).unwrap_err(),
            VaultError::QuestionMismatch.into()
        );
        assert_eq!(
            vault.check_remaining_accounts_len(3).unwrap_err(),
            VaultError::QuestionMismatch.into()
        );
    }

    #[test]
    fn test_conditional_token_account_checks() {
        let (_, vault) = setup(2);
        let user = Pubkey::new_unique();
        let stranger = Pubkey::new_unique();
        let mint_0 = vault.conditional_token_mints[0];
        let mint_1 = vault.conditional_token_mints[1];

        assert!(vault
            .check_conditional_token_account(1, &mint_1, &mint_1, &user, &user)
            .is_ok());

        // mints passed out of outcome order
        assert_eq!(
            vault
                .check_conditional_token_account(0, &mint_1, &mint_1, &user, &user)
                .unwrap_err(),
            VaultError::InvalidConditionalTokenMint.into()
        );
        // token account for another outcome
        assert_eq!(
            vault
                .check_conditional_token_account(0, &mint_0, &mint_1, &user, &user)
                .unwrap_err(),
            VaultError::InvalidConditionalTokenAccount.into()
        );
        // someone else's token account
        assert_eq!(
            vault
                .check_conditional_token_account(0, &mint_0, &mint_0, &stranger, &user)
                .unwrap_err(),
            VaultError::InvalidConditionalTokenAccount.into()
        );
        assert_eq!(
            vault
                .check_conditional_token_account(2, &mint_0, &mint_0, &user, &user)
                .unwrap_err(),
            VaultError::InvalidOutcomeIndex.into()
        );
    }

    #[test]
    fn test_plan_split() {
        let (_, vault) = setup(3);

        assert_eq!(
            vault.plan_split(100, 40).unwrap(),
            VaultMovement {
                underlying: 40,
                conditional: vec![40, 40, 40],
            }
        );
        assert!(vault.plan_split(100, 100).is_ok());
        assert_eq!(
            vault.plan_split(100, 101).unwrap_err(),
            VaultError::InsufficientUnderlyingBalance.into()
        );
    }

    #[test]
    fn test_plan_merge() {
        let (_, vault) = setup(3);

        assert_eq!(
            vault.plan_merge(&[50, 30, 70], 30).unwrap(),
            VaultMovement {
                underlying: 30,
                conditional: vec![30, 30, 30],
            }
        );
        assert_eq!(
            vault.plan_merge(&[50, 30, 70], 31).unwrap_err(),
            VaultError::InsufficientConditionalBalance.into()
        );
        assert_eq!(
            vault.plan_merge(&[50, 30], 10).unwrap_err(),
            VaultError::QuestionMismatch.into()
        );
        assert_eq!(
            vault.plan_merge(&[0, 0, 0], 0).unwrap(),
            VaultMovement {
                underlying: 0,
                conditional: vec![0, 0, 0],
            }
        );
    }

    #[test]
    fn test_plan_redeem_burns_full_balances() {
        let (mut question, vault) = setup(2);

        assert_eq!(
            vault.plan_redeem(&question, &[30, 140]).unwrap_err(),
            VaultError::CantRedeemConditionalTokens.into()
        );

        question.resolve(vec![6, 4]).unwrap();

        assert_eq!(
            vault.plan_redeem(&question, &[30, 140]).unwrap(),
            VaultMovement {
                underlying: 74,
                conditional: vec![30, 140],
            }
        );
        assert_eq!(
            vault.plan_redeem(&question, &[30]).unwrap_err(),
            VaultError::QuestionMismatch.into()
        );
    }
}
