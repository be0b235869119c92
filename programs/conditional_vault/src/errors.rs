use anchor_lang::prelude::*;

#[error_code]
pub enum VaultError {
    #[msg("Questions need 2 or more outcomes")]
    InsufficientNumOutcomes,
    #[msg("Only the question's oracle can resolve it")]
    Unauthorized,
    #[msg("This question has already been resolved")]
    AlreadyResolved,
    #[msg("Payout numerators must match the number of outcomes and can't all be zero")]
    InvalidPayouts,
    #[msg("The number of outcomes doesn't match the question")]
    QuestionMismatch,
    #[msg("Insufficient underlying token balance to mint this amount of conditional tokens")]
    InsufficientUnderlyingBalance,
    #[msg("Insufficient conditional token balance to merge this amount")]
    InsufficientConditionalBalance,
    #[msg("The question must be resolved before conditional tokens can be redeemed")]
    CantRedeemConditionalTokens,
    #[msg("This conditional token mint is not one of this vault's conditional token mints")]
    InvalidConditionalTokenMint,
    #[msg("Conditional token account must belong to the signer and hold the matching mint")]
    InvalidConditionalTokenAccount,
    #[msg("This `vault_underlying_token_account` is not this vault's `underlying_token_account`")]
    InvalidVaultUnderlyingTokenAccount,
    #[msg("Outcome index is out of range for this vault")]
    InvalidOutcomeIndex,
    #[msg("This conditional token already has metadata")]
    MetadataAlreadyInitialized,
    #[msg("Vault holds less underlying than its conditional tokens can claim")]
    VaultInvariantViolated,
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
    #[msg("Arithmetic underflow")]
    ArithmeticUnderflow,
}
