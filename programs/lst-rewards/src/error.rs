use anchor_lang::prelude::*;

#[error_code]
pub enum LedgerError {
    // Ledger State Errors
    #[msg("Program is paused")]
    Paused,

    #[msg("Program must be paused for this operation")]
    NotPaused,

    // Amount / Parameter Errors
    #[msg("Invalid amount: must be greater than zero")]
    InvalidAmount,

    #[msg("Reward duration must be greater than zero")]
    InvalidDuration,

    #[msg("Computed reward rate is zero")]
    ZeroRewardRate,

    #[msg("Reward vault balance does not cover the notified amount")]
    InsufficientRewardBalance,

    #[msg("Penalty basis points exceed 100%")]
    PenaltyTooHigh,

    #[msg("Deviation threshold basis points exceed 100%")]
    ThresholdTooHigh,

    #[msg("Batch exceeds maximum size")]
    BatchTooLarge,

    // Authorization Errors
    #[msg("Unauthorized: capability check failed")]
    Unauthorized,

    #[msg("Invalid authority")]
    InvalidAuthority,

    // Price Resolution Errors
    #[msg("All price sources are unavailable")]
    AllOraclesDown,

    #[msg("Fetched price deviates too far from the prior cached price")]
    PriceDeviationExceeded,

    #[msg("Day index does not match the current clock")]
    WrongDayIndex,

    // Account Validation Errors
    #[msg("Account must be writable")]
    AccountNotWritable,

    #[msg("Invalid reward mint")]
    InvalidRewardMint,

    #[msg("Invalid token account owner")]
    InvalidTokenAccountOwner,

    // Math Errors
    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Math underflow")]
    MathUnderflow,

    #[msg("Division by zero")]
    DivisionByZero,
}
