use anchor_lang::prelude::*;

pub mod errors;
pub mod events;
pub mod instructions;
pub mod ledger;
pub mod oracle;
pub mod state;

use instructions::*;
use state::BetSide;

declare_id!("VrdUU7GSFV4ayqfcAAdqWwcQGELDGUN6Ha3rpDQXBny");

#[program]
pub mod verdict_markets {
    use super::*;

    /// Create a new YES/NO market around an oracle price question.
    ///
    /// Allocates the market, its stake vault and its reward vault. The
    /// market stays dormant until `initialize_market` opens it.
    pub fn create_market(ctx: Context<CreateMarket>, params: CreateMarketParams) -> Result<()> {
        instructions::create_market::handler(ctx, params)
    }

    /// Open the market: escrow the proposer reward, issue the first price
    /// request and start the betting window. Callable exactly once by the
    /// market authority.
    pub fn initialize_market(ctx: Context<InitializeMarket>, betting_duration: i64) -> Result<()> {
        instructions::initialize_market::handler(ctx, betting_duration)
    }

    /// Stake collateral on YES or NO while the betting window is open.
    ///
    /// The fee leg goes straight to the treasury; the net leg is escrowed
    /// in the stake vault and credited to the caller's position.
    pub fn place_bet(ctx: Context<PlaceBet>, side: BetSide, amount: u64) -> Result<()> {
        instructions::place_bet::handler(ctx, side, amount)
    }

    /// Oracle callback: a price finalized.
    ///
    /// Only the designated oracle authority may call this. An answer to a
    /// superseded round is acknowledged without effect; an answer to the
    /// outstanding round settles the market and releases the escrowed
    /// proposer reward.
    pub fn price_settled(
        ctx: Context<PriceSettled>,
        identifier: [u8; 32],
        timestamp: i64,
        ancillary_data: Vec<u8>,
        price: i128,
    ) -> Result<()> {
        instructions::price_settled::handler(ctx, identifier, timestamp, ancillary_data, price)
    }

    /// Oracle callback: a proposal was disputed.
    ///
    /// Verifies the callback matches the outstanding round exactly (refund
    /// included) and re-issues the request under a fresh round.
    pub fn price_disputed(
        ctx: Context<PriceDisputed>,
        identifier: [u8; 32],
        timestamp: i64,
        ancillary_data: Vec<u8>,
        refund: u64,
    ) -> Result<()> {
        instructions::price_disputed::handler(ctx, identifier, timestamp, ancillary_data, refund)
    }

    /// Collect a payout after settlement. Callable once per position.
    ///
    /// TIE refunds both stakes; a win pays a proportional share of the
    /// combined pool; a winnerless round sweeps the losing pool to the
    /// treasury.
    pub fn claim_winnings(ctx: Context<ClaimWinnings>) -> Result<()> {
        instructions::claim_winnings::handler(ctx)
    }

    /// Update the protocol fee (max 1000 bps).
    pub fn set_fee(ctx: Context<UpdateMarket>, fee_bps: u16) -> Result<()> {
        instructions::admin::set_fee(ctx, fee_bps)
    }

    /// Rotate the treasury address.
    pub fn set_treasury(ctx: Context<UpdateMarket>, treasury: Pubkey) -> Result<()> {
        instructions::admin::set_treasury(ctx, treasury)
    }

    /// Retune the oracle incentives. Rejected once the market initialized.
    pub fn set_oracle_params(
        ctx: Context<UpdateMarket>,
        reward: u64,
        bond: u64,
        liveness: i64,
    ) -> Result<()> {
        instructions::admin::set_oracle_params(ctx, reward, bond, liveness)
    }

    /// Pause or resume betting. Oracle callbacks and claims are unaffected.
    pub fn set_paused(ctx: Context<UpdateMarket>, paused: bool) -> Result<()> {
        instructions::admin::set_paused(ctx, paused)
    }

    /// Recover a stray token balance owned by the market PDA. The
    /// collateral mint can never be rescued.
    pub fn rescue_token(ctx: Context<RescueToken>) -> Result<()> {
        instructions::admin::rescue_token(ctx)
    }
}
