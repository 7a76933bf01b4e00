use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::errors::VerdictError;
use crate::events::{FeeUpdated, OracleParamsUpdated, PauseUpdated, TokenRescued, TreasuryUpdated};
use crate::ledger;
use crate::state::*;

/// Shared account set for the authority-only setters.
#[derive(Accounts)]
pub struct UpdateMarket<'info> {
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
}

pub fn set_fee(ctx: Context<UpdateMarket>, fee_bps: u16) -> Result<()> {
    require!(fee_bps <= MAX_FEE_BPS, VerdictError::FeeTooHigh);

    let market = &mut ctx.accounts.market;
    market.fee_bps = fee_bps;

    emit!(FeeUpdated {
        market: market.key(),
        fee_bps,
    });
    msg!("Fee set to {} bps", fee_bps);

    Ok(())
}

pub fn set_treasury(ctx: Context<UpdateMarket>, treasury: Pubkey) -> Result<()> {
    require!(treasury != Pubkey::default(), VerdictError::InvalidTreasury);

    let market = &mut ctx.accounts.market;
    market.treasury = treasury;

    emit!(TreasuryUpdated {
        market: market.key(),
        treasury,
    });
    msg!("Treasury rotated to {}", treasury);

    Ok(())
}

pub fn set_oracle_params(
    ctx: Context<UpdateMarket>,
    reward: u64,
    bond: u64,
    liveness: i64,
) -> Result<()> {
    require!(liveness > 0, VerdictError::InvalidLiveness);

    let market = &mut ctx.accounts.market;
    // Frozen once the first request is out; the escrowed reward must match
    // the advertised one.
    require!(!market.initialized, VerdictError::AlreadyInitialized);

    market.proposer_reward = reward;
    market.proposer_bond = bond;
    market.liveness = liveness;

    emit!(OracleParamsUpdated {
        market: market.key(),
        reward,
        bond,
        liveness,
    });
    msg!(
        "Oracle params: reward {} | bond {} | liveness {}s",
        reward,
        bond,
        liveness,
    );

    Ok(())
}

pub fn set_paused(ctx: Context<UpdateMarket>, paused: bool) -> Result<()> {
    let market = &mut ctx.accounts.market;
    market.paused = paused;

    emit!(PauseUpdated {
        market: market.key(),
        paused,
    });
    msg!("Paused: {}", paused);

    Ok(())
}

#[derive(Accounts)]
pub struct RescueToken<'info> {
    pub authority: Signer<'info>,

    #[account(
        has_one = authority @ VerdictError::Unauthorized,
        seeds = [
            b"market",
            market.authority.as_ref(),
            &market.market_id.to_le_bytes(),
        ],
        bump = market.bump,
    )]
    pub market: Account<'info, Market>,

    /// Mint being rescued; never the market's collateral.
    pub rescued_mint: Account<'info, Mint>,

    /// Stray token account owned by the market PDA.
    #[account(
        mut,
        constraint = stray_account.owner == market.key(),
        constraint = stray_account.mint == rescued_mint.key() @ VerdictError::InvalidRescueAccount,
    )]
    pub stray_account: Account<'info, TokenAccount>,

    /// Where the rescued balance goes.
    #[account(
        mut,
        constraint = destination.mint == rescued_mint.key() @ VerdictError::InvalidRescueAccount,
    )]
    pub destination: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

/// Recover tokens mistakenly sent to an account the market PDA owns. The
/// collateral mint is untouchable, which keeps the stake and reward vaults
/// out of reach.
pub fn rescue_token(ctx: Context<RescueToken>) -> Result<()> {
    require!(
        ctx.accounts.rescued_mint.key() != ctx.accounts.market.collateral_mint,
        VerdictError::CannotRescueCollateral
    );

    let market = &ctx.accounts.market;
    let market_key = market.key();
    let authority_key = market.authority;
    let market_id_bytes = market.market_id.to_le_bytes();
    let bump = market.bump;
    let amount = ctx.accounts.stray_account.amount;

    let seeds: &[&[u8]] = &[
        b"market",
        authority_key.as_ref(),
        market_id_bytes.as_ref(),
        &[bump],
    ];
    ledger::release(
        &ctx.accounts.token_program,
        &ctx.accounts.stray_account,
        &ctx.accounts.destination,
        ctx.accounts.market.to_account_info(),
        &[seeds],
        amount,
    )?;

    emit!(TokenRescued {
        market: market_key,
        mint: ctx.accounts.rescued_mint.key(),
        amount,
        destination: ctx.accounts.destination.key(),
    });
    msg!("Rescued {} units of {}", amount, ctx.accounts.rescued_mint.key());

    Ok(())
}
