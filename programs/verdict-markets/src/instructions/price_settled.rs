use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::errors::VerdictError;
use crate::events::MarketSettled;
use crate::ledger;
use crate::oracle::{self, RoundMatch};
use crate::state::*;

#[derive(Accounts)]
pub struct PriceSettled<'info> {
    /// The oracle authority delivering the final price.
    #[account(
        constraint = oracle_authority.key() == market.oracle @ VerdictError::UnauthorizedOracle,
    )]
    pub oracle_authority: Signer<'info>,

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

    /// Reward escrow, drained to the oracle side once the answer is final.
    #[account(
        mut,
        seeds = [b"reward_vault", market.key().as_ref()],
        bump = market.reward_vault_bump,
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    /// Collateral account the proposer reward is paid to.
    #[account(
        mut,
        constraint = oracle_collateral.mint == market.collateral_mint,
        constraint = oracle_collateral.owner == oracle_authority.key(),
    )]
    pub oracle_collateral: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(
    ctx: Context<PriceSettled>,
    identifier: [u8; 32],
    timestamp: i64,
    ancillary_data: Vec<u8>,
    price: i128,
) -> Result<()> {
    let market = &ctx.accounts.market;
    match oracle::check_settle_callback(market, &identifier, timestamp, &ancillary_data)? {
        RoundMatch::Superseded => {
            // A dispute replaced this round; the answer no longer binds.
            msg!(
                "Settle for superseded round {} ignored (current round {})",
                timestamp,
                market.request_timestamp,
            );
            return Ok(());
        }
        RoundMatch::Current => {}
    }

    let market_key = market.key();
    let authority_key = market.authority;
    let market_id_bytes = market.market_id.to_le_bytes();
    let bump = market.bump;
    let reward = market.proposer_reward;

    let market = &mut ctx.accounts.market;
    market.record_settlement(price);
    let settlement_price = market.settlement_price;

    // Answer recorded; release the escrowed reward last.
    let seeds: &[&[u8]] = &[
        b"market",
        authority_key.as_ref(),
        market_id_bytes.as_ref(),
        &[bump],
    ];
    ledger::release(
        &ctx.accounts.token_program,
        &ctx.accounts.reward_vault,
        &ctx.accounts.oracle_collateral,
        ctx.accounts.market.to_account_info(),
        &[seeds],
        reward,
    )?;

    emit!(MarketSettled {
        market: market_key,
        request_timestamp: timestamp,
        raw_price: price,
        settlement_price,
    });

    msg!(
        "Market #{} settled at {} (raw price {})",
        ctx.accounts.market.market_id,
        settlement_price,
        price,
    );

    Ok(())
}
