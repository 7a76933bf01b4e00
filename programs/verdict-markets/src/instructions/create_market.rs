use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::errors::VerdictError;
use crate::events::MarketCreated;
use crate::state::*;

/// Parameters for creating a new YES/NO market.
#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct CreateMarketParams {
    /// Caller-chosen market id (PDA seed component).
    pub market_id: u64,

    /// Display label for the price pair (max 64 bytes).
    pub pair_name: String,

    /// Price identifier the oracle resolves.
    pub price_identifier: [u8; 32],

    /// Opaque question payload forwarded to the oracle (max 512 bytes).
    pub ancillary_data: Vec<u8>,

    /// Oracle authority allowed to deliver callbacks.
    pub oracle: Pubkey,

    /// Fee recipient.
    pub treasury: Pubkey,

    /// Protocol fee in basis points (max 1000).
    pub fee_bps: u16,

    /// Reward escrowed for the oracle's proposer at initialization.
    pub proposer_reward: u64,

    /// Bond the oracle requires from its proposer.
    pub proposer_bond: u64,

    /// Oracle liveness window in seconds.
    pub liveness: i64,
}

#[derive(Accounts)]
#[instruction(params: CreateMarketParams)]
pub struct CreateMarket<'info> {
    /// Market operator — pays for account allocation and owns the admin
    /// surface.
    #[account(mut)]
    pub authority: Signer<'info>,

    /// Market PDA — the core account for this market.
    #[account(
        init,
        payer = authority,
        space = Market::SIZE,
        seeds = [
            b"market",
            authority.key().as_ref(),
            &params.market_id.to_le_bytes(),
        ],
        bump,
    )]
    pub market: Account<'info, Market>,

    /// Stake vault — holds all escrowed collateral for this market. The
    /// market PDA is its authority.
    #[account(
        init,
        payer = authority,
        seeds = [b"vault", market.key().as_ref()],
        bump,
        token::mint = collateral_mint,
        token::authority = market,
    )]
    pub vault: Account<'info, TokenAccount>,

    /// Reward vault — escrows the proposer reward between the first price
    /// request and settlement.
    #[account(
        init,
        payer = authority,
        seeds = [b"reward_vault", market.key().as_ref()],
        bump,
        token::mint = collateral_mint,
        token::authority = market,
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    /// The one SPL mint this market escrows.
    pub collateral_mint: Account<'info, Mint>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn handler(ctx: Context<CreateMarket>, params: CreateMarketParams) -> Result<()> {
    // Validate inputs
    require!(
        params.pair_name.len() <= MAX_PAIR_NAME_LEN,
        VerdictError::PairNameTooLong
    );
    require!(
        params.ancillary_data.len() <= MAX_ANCILLARY_DATA_LEN,
        VerdictError::AncillaryDataTooLong
    );
    require!(params.fee_bps <= MAX_FEE_BPS, VerdictError::FeeTooHigh);
    require!(
        params.treasury != Pubkey::default(),
        VerdictError::InvalidTreasury
    );
    require!(
        params.oracle != Pubkey::default(),
        VerdictError::InvalidOracle
    );
    require!(params.liveness > 0, VerdictError::InvalidLiveness);

    // Populate market account
    let market = &mut ctx.accounts.market;

    market.market_id = params.market_id;
    market.authority = ctx.accounts.authority.key();
    market.oracle = params.oracle;
    market.treasury = params.treasury;
    market.collateral_mint = ctx.accounts.collateral_mint.key();
    market.pair_name = params.pair_name;
    market.fee_bps = params.fee_bps;
    market.betting_window_end = 0;
    market.initialized = false;
    market.paused = false;
    market.price_identifier = params.price_identifier;
    market.ancillary_data = params.ancillary_data;
    market.request_timestamp = 0;
    market.price_requested = false;
    market.settled = false;
    market.settlement_price = 0;
    market.total_yes = 0;
    market.total_no = 0;
    market.proposer_reward = params.proposer_reward;
    market.proposer_bond = params.proposer_bond;
    market.liveness = params.liveness;
    market.dispute_count = 0;
    market.claims_count = 0;
    market.vault_bump = ctx.bumps.vault;
    market.reward_vault_bump = ctx.bumps.reward_vault;
    market.bump = ctx.bumps.market;

    emit!(MarketCreated {
        market: market.key(),
        market_id: market.market_id,
        authority: market.authority,
        oracle: market.oracle,
        treasury: market.treasury,
        collateral_mint: market.collateral_mint,
        pair_name: market.pair_name.clone(),
        fee_bps: market.fee_bps,
    });

    msg!(
        "Market #{} created: {} | fee: {} bps",
        market.market_id,
        market.pair_name,
        market.fee_bps,
    );

    Ok(())
}
