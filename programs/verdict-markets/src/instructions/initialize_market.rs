use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::errors::VerdictError;
use crate::events::MarketInitialized;
use crate::ledger;
use crate::oracle;
use crate::state::*;

#[derive(Accounts)]
pub struct InitializeMarket<'info> {
    /// Market operator — funds the proposer reward.
    pub authority: Signer<'info>,

    #[account(
        mut,
        has_one = authority @ VerdictError::Unauthorized,
        seeds = [
            b"market",
            market.authority.as_ref(),
            &market.market_id.to_le_bytes(),
        ],
        bump = market.bump,
    )]
    pub market: Account<'info, Market>,

    /// Reward escrow, funded here with `market.proposer_reward`.
    #[account(
        mut,
        seeds = [b"reward_vault", market.key().as_ref()],
        bump = market.reward_vault_bump,
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    /// Operator's collateral account the reward is pulled from.
    #[account(
        mut,
        constraint = authority_collateral.mint == market.collateral_mint,
        constraint = authority_collateral.owner == authority.key(),
    )]
    pub authority_collateral: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

/// Open the market: set the betting window, escrow the proposer reward and
/// issue the first price request. Callable exactly once.
pub fn handler(ctx: Context<InitializeMarket>, betting_duration: i64) -> Result<()> {
    require!(betting_duration > 0, VerdictError::InvalidDuration);

    let market_key = ctx.accounts.market.key();
    let clock = Clock::get()?;
    let now = clock.unix_timestamp;

    let market = &mut ctx.accounts.market;
    require!(!market.initialized, VerdictError::AlreadyInitialized);

    market.initialized = true;
    market.betting_window_end = now
        .checked_add(betting_duration)
        .ok_or(VerdictError::Overflow)?;

    let reward = market.proposer_reward;
    let request = oracle::issue_request(market, market_key, now);
    let betting_window_end = market.betting_window_end;

    // State is final; escrow the reward last.
    ledger::collect(
        &ctx.accounts.token_program,
        &ctx.accounts.authority_collateral,
        &ctx.accounts.reward_vault,
        &ctx.accounts.authority,
        reward,
    )?;

    emit!(MarketInitialized {
        market: market_key,
        betting_window_end,
    });
    emit!(request);

    msg!(
        "Market initialized | window ends {} | first request at {}",
        betting_window_end,
        now,
    );

    Ok(())
}
