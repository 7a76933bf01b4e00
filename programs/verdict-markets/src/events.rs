use anchor_lang::prelude::*;

use crate::state::BetSide;

/// A market account was created and funded with its oracle reward.
#[event]
pub struct MarketCreated {
    pub market: Pubkey,
    pub market_id: u64,
    pub authority: Pubkey,
    pub oracle: Pubkey,
    pub treasury: Pubkey,
    pub collateral_mint: Pubkey,
    pub pair_name: String,
    pub fee_bps: u16,
}

/// The betting window opened and the first price request went out.
#[event]
pub struct MarketInitialized {
    pub market: Pubkey,
    pub betting_window_end: i64,
}

/// A price request for the oracle. Emitted once at initialization and
/// again for every accepted dispute; the latest `request_timestamp` is the
/// round the oracle must answer.
#[event]
pub struct PriceRequested {
    pub market: Pubkey,
    pub identifier: [u8; 32],
    pub request_timestamp: i64,
    pub ancillary_data: Vec<u8>,
    pub reward: u64,
    pub bond: u64,
    pub liveness: i64,
    pub event_based: bool,
    pub callback_on_settle: bool,
    pub callback_on_dispute: bool,
}

/// A bet was escrowed; the fee leg has already moved to the treasury.
#[event]
pub struct BetPlaced {
    pub market: Pubkey,
    pub user: Pubkey,
    pub side: BetSide,
    pub gross_amount: u64,
    pub fee: u64,
    pub net_amount: u64,
    pub total_yes: u64,
    pub total_no: u64,
}

/// The oracle delivered a final price for the current round.
#[event]
pub struct MarketSettled {
    pub market: Pubkey,
    pub request_timestamp: i64,
    pub raw_price: i128,
    pub settlement_price: u64,
}

/// A proposal was disputed: the reward came back into escrow and a fresh
/// round opened under a new `request_timestamp`.
#[event]
pub struct RoundDisputed {
    pub market: Pubkey,
    pub disputed_timestamp: i64,
    pub new_timestamp: i64,
    pub refund: u64,
    pub dispute_count: u64,
}

/// A participant collected their payout (zero for losing claims on record).
#[event]
pub struct WinningsClaimed {
    pub market: Pubkey,
    pub user: Pubkey,
    pub payout: u64,
}

/// The winning side held no stake: the losing pool moved to the treasury.
#[event]
pub struct LosingPoolSwept {
    pub market: Pubkey,
    pub amount: u64,
}

/// A stray token balance was recovered by the market authority.
#[event]
pub struct TokenRescued {
    pub market: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
    pub destination: Pubkey,
}

/// Admin updated the protocol fee.
#[event]
pub struct FeeUpdated {
    pub market: Pubkey,
    pub fee_bps: u16,
}

/// Admin rotated the treasury.
#[event]
pub struct TreasuryUpdated {
    pub market: Pubkey,
    pub treasury: Pubkey,
}

/// Admin retuned the oracle incentives for markets not yet initialized.
#[event]
pub struct OracleParamsUpdated {
    pub market: Pubkey,
    pub reward: u64,
    pub bond: u64,
    pub liveness: i64,
}

/// Admin paused or resumed betting.
#[event]
pub struct PauseUpdated {
    pub market: Pubkey,
    pub paused: bool,
}
