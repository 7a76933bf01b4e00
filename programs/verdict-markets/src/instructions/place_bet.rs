use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::errors::VerdictError;
use crate::events::BetPlaced;
use crate::ledger;
use crate::state::*;

#[derive(Accounts)]
pub struct PlaceBet<'info> {
    /// The participant placing the bet.
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        seeds = [
            b"market",
            market.authority.as_ref(),
            &market.market_id.to_le_bytes(),
        ],
        bump = market.bump,
    )]
    pub market: Account<'info, Market>,

    /// Position PDA — created on first bet, updated on subsequent bets.
    #[account(
        init_if_needed,
        payer = user,
        space = Position::SIZE,
        seeds = [b"position", market.key().as_ref(), user.key().as_ref()],
        bump,
    )]
    pub position: Account<'info, Position>,

    /// Stake vault — receives the net leg.
    #[account(
        mut,
        seeds = [b"vault", market.key().as_ref()],
        bump = market.vault_bump,
    )]
    pub vault: Account<'info, TokenAccount>,

    /// Treasury's collateral account — receives the fee leg immediately.
    #[account(
        mut,
        constraint = treasury_collateral.mint == market.collateral_mint,
        constraint = treasury_collateral.owner == market.treasury,
    )]
    pub treasury_collateral: Account<'info, TokenAccount>,

    /// User's collateral account the stake is pulled from.
    #[account(
        mut,
        constraint = user_collateral.mint == market.collateral_mint,
        constraint = user_collateral.owner == user.key(),
    )]
    pub user_collateral: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<PlaceBet>, side: BetSide, amount: u64) -> Result<()> {
    require!(amount > 0, VerdictError::ZeroBetAmount);

    let clock = Clock::get()?;
    let market = &ctx.accounts.market;
    require!(market.initialized, VerdictError::NotInitialized);
    require!(!market.paused, VerdictError::MarketPaused);
    require!(
        clock.unix_timestamp <= market.betting_window_end,
        VerdictError::BettingClosed
    );

    let market_key = market.key();
    let user_key = ctx.accounts.user.key();

    // Accounting first, transfers last.
    let market = &mut ctx.accounts.market;
    let (fee, net) = market.fee_split(amount)?;
    market.credit_stake(side, net)?;
    let (total_yes, total_no) = (market.total_yes, market.total_no);
    let market_id = market.market_id;

    let position = &mut ctx.accounts.position;
    if position.market == Pubkey::default() {
        // First bet — initialize
        position.market = market_key;
        position.user = user_key;
        position.bump = ctx.bumps.position;
    }
    position.credit(side, net)?;

    // Fee leg straight to the treasury, net leg into escrow.
    ledger::collect(
        &ctx.accounts.token_program,
        &ctx.accounts.user_collateral,
        &ctx.accounts.treasury_collateral,
        &ctx.accounts.user,
        fee,
    )?;
    ledger::collect(
        &ctx.accounts.token_program,
        &ctx.accounts.user_collateral,
        &ctx.accounts.vault,
        &ctx.accounts.user,
        net,
    )?;

    emit!(BetPlaced {
        market: market_key,
        user: user_key,
        side,
        gross_amount: amount,
        fee,
        net_amount: net,
        total_yes,
        total_no,
    });

    msg!(
        "Bet: {} gross ({} fee) on {:?} for market #{}",
        amount,
        fee,
        side as u8,
        market_id,
    );

    Ok(())
}
