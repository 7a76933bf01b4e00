use anchor_lang::prelude::*;

use crate::errors::VerdictError;
use crate::events::RoundDisputed;
use crate::oracle;
use crate::state::*;

#[derive(Accounts)]
pub struct PriceDisputed<'info> {
    /// The oracle authority reporting the dispute.
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
}

pub fn handler(
    ctx: Context<PriceDisputed>,
    identifier: [u8; 32],
    timestamp: i64,
    ancillary_data: Vec<u8>,
    refund: u64,
) -> Result<()> {
    let market = &ctx.accounts.market;
    oracle::check_dispute_callback(market, &identifier, timestamp, &ancillary_data, refund)?;

    let market_key = market.key();
    let clock = Clock::get()?;
    let now = clock.unix_timestamp;

    let market = &mut ctx.accounts.market;
    market.dispute_count = market
        .dispute_count
        .checked_add(1)
        .ok_or(VerdictError::Overflow)?;
    let dispute_count = market.dispute_count;

    // Open the next round under the current time. Rounds are uncapped and
    // the reward stays escrowed across them.
    let request = oracle::issue_request(market, market_key, now);

    emit!(RoundDisputed {
        market: market_key,
        disputed_timestamp: timestamp,
        new_timestamp: now,
        refund,
        dispute_count,
    });
    emit!(request);

    msg!(
        "Dispute #{}: round {} superseded by {}",
        dispute_count,
        timestamp,
        now,
    );

    Ok(())
}
