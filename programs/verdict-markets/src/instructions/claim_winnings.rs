use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::errors::VerdictError;
use crate::events::{LosingPoolSwept, WinningsClaimed};
use crate::ledger;
use crate::state::*;

#[derive(Accounts)]
pub struct ClaimWinnings<'info> {
    /// The participant collecting their payout.
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

    #[account(
        mut,
        seeds = [b"position", market.key().as_ref(), user.key().as_ref()],
        bump = position.bump,
        constraint = position.user == user.key() @ VerdictError::NoPosition,
        constraint = !position.claimed @ VerdictError::AlreadyClaimed,
    )]
    pub position: Account<'info, Position>,

    /// Stake vault the payout is released from.
    #[account(
        mut,
        seeds = [b"vault", market.key().as_ref()],
        bump = market.vault_bump,
    )]
    pub vault: Account<'info, TokenAccount>,

    /// Treasury's collateral account — receives a winnerless-round sweep.
    #[account(
        mut,
        constraint = treasury_collateral.mint == market.collateral_mint,
        constraint = treasury_collateral.owner == market.treasury,
    )]
    pub treasury_collateral: Account<'info, TokenAccount>,

    /// User's collateral account the payout lands in.
    #[account(
        mut,
        constraint = user_collateral.mint == market.collateral_mint,
        constraint = user_collateral.owner == user.key(),
    )]
    pub user_collateral: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<ClaimWinnings>) -> Result<()> {
    let market_key = ctx.accounts.market.key();
    let user_key = ctx.accounts.user.key();
    let authority_key = ctx.accounts.market.authority;
    let market_id_bytes = ctx.accounts.market.market_id.to_le_bytes();
    let bump = ctx.accounts.market.bump;

    let position = &mut ctx.accounts.position;
    let yes_stake = position.yes_amount;
    let no_stake = position.no_amount;

    let market = &mut ctx.accounts.market;
    let claim = market.settle_claim(yes_stake, no_stake)?;

    // Mark claimed and zero the stakes on every successful path, zero
    // payout included, before any collateral moves.
    position.claimed = true;
    position.yes_amount = 0;
    position.no_amount = 0;
    market.claims_count = market
        .claims_count
        .checked_add(1)
        .ok_or(VerdictError::Overflow)?;

    let seeds: &[&[u8]] = &[
        b"market",
        authority_key.as_ref(),
        market_id_bytes.as_ref(),
        &[bump],
    ];
    ledger::release(
        &ctx.accounts.token_program,
        &ctx.accounts.vault,
        &ctx.accounts.user_collateral,
        ctx.accounts.market.to_account_info(),
        &[seeds],
        claim.payout,
    )?;
    ledger::release(
        &ctx.accounts.token_program,
        &ctx.accounts.vault,
        &ctx.accounts.treasury_collateral,
        ctx.accounts.market.to_account_info(),
        &[seeds],
        claim.sweep,
    )?;

    emit!(WinningsClaimed {
        market: market_key,
        user: user_key,
        payout: claim.payout,
    });
    if claim.sweep > 0 {
        emit!(LosingPoolSwept {
            market: market_key,
            amount: claim.sweep,
        });
    }

    msg!("Claim: {} paid out, {} swept", claim.payout, claim.sweep);

    Ok(())
}
