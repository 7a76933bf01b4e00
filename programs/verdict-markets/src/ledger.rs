//! Collateral movement between users, the market vaults and the treasury.
//!
//! Every handler mutates market and position state first and only then
//! calls into here, so a failed transfer aborts the whole instruction and
//! a successful one can never observe half-updated accounting.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

/// Pull collateral from a user-owned token account. Zero amounts are
/// accepted and move nothing.
pub fn collect<'info>(
    token_program: &Program<'info, Token>,
    from: &Account<'info, TokenAccount>,
    to: &Account<'info, TokenAccount>,
    owner: &Signer<'info>,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    token::transfer(
        CpiContext::new(
            token_program.to_account_info(),
            Transfer {
                from: from.to_account_info(),
                to: to.to_account_info(),
                authority: owner.to_account_info(),
            },
        ),
        amount,
    )
}

/// Push collateral out of a market-owned vault, signed by the market PDA.
/// Zero amounts are accepted and move nothing.
pub fn release<'info>(
    token_program: &Program<'info, Token>,
    from: &Account<'info, TokenAccount>,
    to: &Account<'info, TokenAccount>,
    market_authority: AccountInfo<'info>,
    signer_seeds: &[&[&[u8]]],
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    token::transfer(
        CpiContext::new_with_signer(
            token_program.to_account_info(),
            Transfer {
                from: from.to_account_info(),
                to: to.to_account_info(),
                authority: market_authority,
            },
            signer_seeds,
        ),
        amount,
    )
}
