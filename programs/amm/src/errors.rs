use anchor_lang::prelude::*;

#[error_code]
pub enum AmmError {
    #[msg("You can't create an AMM pool where the token mints are the same")]
    SameMint,
    #[msg("Swap fee exceeds the maximum allowed per-mille fee")]
    InvalidFee,
    #[msg("Only the config admin can do this")]
    Unauthorized,
    #[msg("Cannot add liquidity with 0 tokens on either side")]
    ZeroLiquidityAdd,
    #[msg("Must remove a non-zero amount of liquidity")]
    ZeroLiquidityRemove,
    #[msg("Users must swap a non-zero amount")]
    ZeroSwapAmount,
    #[msg("Can't swap through a pool without token reserves on either side")]
    InsufficientLiquidity,
    #[msg("The user had insufficient balance to do this")]
    InsufficientBalance,
    #[msg("Slippage tolerance exceeded")]
    SlippageExceeded,
    #[msg("K should always be increasing")]
    ConstantProductInvariantFailed,
    #[msg("Can't get a TWAP before some observations have been stored")]
    NoSlotsPassed,
    #[msg("TWAP initial observation and max change must not exceed the max price")]
    InvalidTwapParameters,
    #[msg("Amount must be finite and non-negative")]
    InvalidAmount,
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
    #[msg("Arithmetic underflow")]
    ArithmeticUnderflow,
}
