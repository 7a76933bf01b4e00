use anchor_lang::prelude::*;

/// Custom error codes for the Verdict Markets program.
///
/// Error codes are offset from 6000 (Anchor convention).
#[error_code]
pub enum VerdictError {
    /// Pair name exceeds maximum length (64 bytes).
    #[msg("Pair name too long (max 64 bytes)")]
    PairNameTooLong,

    /// Ancillary data exceeds maximum length (512 bytes).
    #[msg("Ancillary data too long (max 512 bytes)")]
    AncillaryDataTooLong,

    /// Fee exceeds the 1000 bps (10%) cap.
    #[msg("Fee exceeds maximum of 1000 bps")]
    FeeTooHigh,

    /// Treasury cannot be the default pubkey.
    #[msg("Treasury cannot be the default address")]
    InvalidTreasury,

    /// Oracle cannot be the default pubkey.
    #[msg("Oracle cannot be the default address")]
    InvalidOracle,

    /// Oracle liveness must be greater than zero.
    #[msg("Liveness must be > 0")]
    InvalidLiveness,

    /// Betting duration must be greater than zero.
    #[msg("Betting duration must be > 0")]
    InvalidDuration,

    /// Market has already been initialized.
    #[msg("Market already initialized")]
    AlreadyInitialized,

    /// Market has not been initialized yet.
    #[msg("Market not initialized")]
    NotInitialized,

    /// Market is paused; no bets accepted.
    #[msg("Market is paused")]
    MarketPaused,

    /// The betting window has closed; no more bets accepted.
    #[msg("Betting window has closed")]
    BettingClosed,

    /// Bet amount must be greater than zero.
    #[msg("Bet amount must be > 0")]
    ZeroBetAmount,

    /// No price request is outstanding for this market.
    #[msg("No price request outstanding")]
    PriceNotRequested,

    /// The oracle already delivered a final price.
    #[msg("Market already settled")]
    AlreadySettled,

    /// The oracle has not delivered a final price yet.
    #[msg("Market not settled")]
    NotSettled,

    /// Callback identifiers do not match the outstanding request.
    #[msg("Callback does not match the outstanding price request")]
    RequestMismatch,

    /// Dispute refund does not match the escrowed proposer reward.
    #[msg("Refund does not match the escrowed reward")]
    RefundMismatch,

    /// Only the designated oracle authority can deliver callbacks.
    #[msg("Unauthorized: not the oracle authority")]
    UnauthorizedOracle,

    /// Only the market authority can perform this action.
    #[msg("Unauthorized: not the market authority")]
    Unauthorized,

    /// The claimant holds no stake on the winning side.
    #[msg("No stake on the winning side")]
    NoWinningStake,

    /// Position has already been claimed.
    #[msg("Position already claimed")]
    AlreadyClaimed,

    /// User has no position in this market.
    #[msg("No position found")]
    NoPosition,

    /// Overflow in arithmetic operation.
    #[msg("Arithmetic overflow")]
    Overflow,

    /// The collateral mint can never be rescued.
    #[msg("Cannot rescue the collateral mint")]
    CannotRescueCollateral,

    /// Rescue accounts must share the rescued mint.
    #[msg("Rescue accounts must match the rescued mint")]
    InvalidRescueAccount,
}
