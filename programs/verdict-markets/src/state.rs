use anchor_lang::prelude::*;

use crate::errors::VerdictError;

/// Fixed-point unit for oracle prices. A settled price of `PRICE_SCALE`
/// means YES, `PRICE_SCALE / 2` means TIE, anything else maps to NO.
pub const PRICE_SCALE: u64 = 1_000_000_000_000_000_000;

/// Half-scale settlement price: the TIE outcome.
pub const TIE_PRICE: u64 = PRICE_SCALE / 2;

/// Hard cap on the protocol fee (basis points). 1000 = 10%.
pub const MAX_FEE_BPS: u16 = 1_000;

/// Basis-point denominator.
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Maximum display label length ("BTC-USD", etc.).
pub const MAX_PAIR_NAME_LEN: usize = 64;

/// Maximum ancillary-data length carried per oracle question.
pub const MAX_ANCILLARY_DATA_LEN: usize = 512;

/// ─── Market Account ───────────────────────────────────────────────
///
/// PDA: seeds = [b"market", authority.key, market_id.to_le_bytes()]
///
/// Stores all state for a single YES/NO market: configuration, the
/// outstanding oracle round, pool totals and the settled price.
#[account]
#[derive(Default)]
pub struct Market {
    /// Unique numeric identifier (PDA seed component).
    pub market_id: u64,

    /// Operator key. Owns the admin surface.
    pub authority: Pubkey,

    /// Designated oracle authority; sole legal signer of the settle and
    /// dispute callbacks.
    pub oracle: Pubkey,

    /// Fee recipient. Never the default pubkey once set.
    pub treasury: Pubkey,

    /// The one SPL mint this market custodies.
    pub collateral_mint: Pubkey,

    /// Display label for the price pair (max 64 bytes).
    pub pair_name: String,

    /// Protocol fee in basis points, capped at `MAX_FEE_BPS`.
    pub fee_bps: u16,

    /// Unix timestamp after which bets are rejected.
    pub betting_window_end: i64,

    /// Set exactly once by `initialize_market`.
    pub initialized: bool,

    /// Admin switch; bets are rejected while true.
    pub paused: bool,

    // ─── Oracle question ───
    /// Price identifier the oracle resolves; every inbound callback must
    /// match it bit-for-bit.
    pub price_identifier: [u8; 32],

    /// Opaque question payload (max 512 bytes); every inbound callback
    /// must match it bit-for-bit.
    pub ancillary_data: Vec<u8>,

    /// Round id of the outstanding price request. Bumped to the current
    /// time on every accepted dispute, superseding earlier rounds.
    pub request_timestamp: i64,

    /// A price request is outstanding.
    pub price_requested: bool,

    /// The oracle delivered a final price for the current round.
    pub settled: bool,

    /// Ternary settled price: 0 (NO), `TIE_PRICE`, or `PRICE_SCALE` (YES).
    /// Only meaningful while `settled` is true.
    pub settlement_price: u64,

    // ─── Pool accounting ───
    /// Aggregate net-of-fee collateral staked on YES. Decremented only by
    /// the claim-time sweep of a winnerless round.
    pub total_yes: u64,

    /// Aggregate net-of-fee collateral staked on NO.
    pub total_no: u64,

    // ─── Oracle incentives ───
    /// Reward escrowed for whoever proposes the oracle's answer.
    pub proposer_reward: u64,

    /// Bond the oracle requires from its proposer.
    pub proposer_bond: u64,

    /// Liveness window (seconds) during which a proposal can be disputed.
    pub liveness: i64,

    // ─── Lifecycle counters ───
    /// Accepted disputes (rounds beyond the first).
    pub dispute_count: u64,

    /// Completed claims.
    pub claims_count: u64,

    /// Stake vault bump seed.
    pub vault_bump: u8,

    /// Reward vault bump seed.
    pub reward_vault_bump: u8,

    /// Market PDA bump seed.
    pub bump: u8,

    /// Reserved space for future upgrades.
    pub _reserved: [u8; 32],
}

impl Market {
    /// Account size for Anchor allocation.
    pub const SIZE: usize = 8  // discriminator
        + 8                              // market_id
        + 32                             // authority
        + 32                             // oracle
        + 32                             // treasury
        + 32                             // collateral_mint
        + (4 + MAX_PAIR_NAME_LEN)        // pair_name (String: 4-byte len + max chars)
        + 2                              // fee_bps
        + 8                              // betting_window_end
        + 1                              // initialized
        + 1                              // paused
        + 32                             // price_identifier
        + (4 + MAX_ANCILLARY_DATA_LEN)   // ancillary_data (Vec: 4-byte len + max bytes)
        + 8                              // request_timestamp
        + 1                              // price_requested
        + 1                              // settled
        + 8                              // settlement_price
        + 8                              // total_yes
        + 8                              // total_no
        + 8                              // proposer_reward
        + 8                              // proposer_bond
        + 8                              // liveness
        + 8                              // dispute_count
        + 8                              // claims_count
        + 1                              // vault_bump
        + 1                              // reward_vault_bump
        + 1                              // bump
        + 32;                            // reserved

    /// Split a gross bet into (fee, net).
    ///
    /// Floor division: the fee leg rounds to zero for dust amounts, and no
    /// minimum is imposed on the net leg.
    pub fn fee_split(&self, amount: u64) -> Result<(u64, u64)> {
        let fee = (amount as u128)
            .checked_mul(self.fee_bps as u128)
            .ok_or(VerdictError::Overflow)?
            / BPS_DENOMINATOR as u128;
        let fee = u64::try_from(fee).map_err(|_| error!(VerdictError::Overflow))?;
        let net = amount.checked_sub(fee).ok_or(VerdictError::Overflow)?;
        Ok((fee, net))
    }

    /// Add a net stake to the chosen pool total.
    pub fn credit_stake(&mut self, side: BetSide, net: u64) -> Result<()> {
        match side {
            BetSide::Yes => {
                self.total_yes = self
                    .total_yes
                    .checked_add(net)
                    .ok_or(VerdictError::Overflow)?;
            }
            BetSide::No => {
                self.total_no = self
                    .total_no
                    .checked_add(net)
                    .ok_or(VerdictError::Overflow)?;
            }
        }
        Ok(())
    }

    /// True when an inbound oracle callback identifies this market's
    /// question.
    pub fn question_matches(&self, identifier: &[u8; 32], ancillary_data: &[u8]) -> bool {
        self.price_identifier == *identifier && self.ancillary_data.as_slice() == ancillary_data
    }

    /// Store the oracle's answer for the current round.
    pub fn record_settlement(&mut self, raw_price: i128) {
        self.settlement_price = normalize_price(raw_price);
        self.settled = true;
    }

    /// The resolved outcome, once the market settled.
    pub fn outcome(&self) -> Option<SettlementOutcome> {
        if !self.settled {
            return None;
        }
        Some(if self.settlement_price >= PRICE_SCALE {
            SettlementOutcome::Yes
        } else if self.settlement_price == TIE_PRICE {
            SettlementOutcome::Tie
        } else {
            SettlementOutcome::No
        })
    }

    /// Settle one participant's claim against the final pools.
    ///
    /// Returns the collateral owed to the claimant plus any one-time sweep
    /// of the losing pool to the treasury. The swept pool is zeroed here so
    /// a second sweep moves nothing; the caller marks the position claimed
    /// and zeroes its stakes.
    ///
    /// - TIE refunds both of the claimant's stakes in full.
    /// - A winning side with a nonzero pool pays
    ///   floor(stake × (total_yes + total_no) / winning_pool) and requires
    ///   the claimant to hold a stake on that side.
    /// - A winning side with a zero pool pays nothing and sweeps the losing
    ///   pool; no stake is required to trigger it.
    pub fn settle_claim(&mut self, yes_stake: u64, no_stake: u64) -> Result<ClaimOutcome> {
        let outcome = self.outcome().ok_or(VerdictError::NotSettled)?;
        match outcome {
            SettlementOutcome::Tie => Ok(ClaimOutcome {
                payout: yes_stake
                    .checked_add(no_stake)
                    .ok_or(VerdictError::Overflow)?,
                sweep: 0,
            }),
            SettlementOutcome::Yes => {
                if self.total_yes == 0 {
                    let sweep = self.total_no;
                    self.total_no = 0;
                    return Ok(ClaimOutcome { payout: 0, sweep });
                }
                require!(yes_stake > 0, VerdictError::NoWinningStake);
                let pot = self
                    .total_yes
                    .checked_add(self.total_no)
                    .ok_or(VerdictError::Overflow)?;
                Ok(ClaimOutcome {
                    payout: proportional_share(yes_stake, self.total_yes, pot)?,
                    sweep: 0,
                })
            }
            SettlementOutcome::No => {
                if self.total_no == 0 {
                    let sweep = self.total_yes;
                    self.total_yes = 0;
                    return Ok(ClaimOutcome { payout: 0, sweep });
                }
                require!(no_stake > 0, VerdictError::NoWinningStake);
                let pot = self
                    .total_yes
                    .checked_add(self.total_no)
                    .ok_or(VerdictError::Overflow)?;
                Ok(ClaimOutcome {
                    payout: proportional_share(no_stake, self.total_no, pot)?,
                    sweep: 0,
                })
            }
        }
    }
}

/// Map a raw oracle price onto the ternary settlement encoding:
/// anything at or above full scale is YES, exactly half scale is TIE,
/// everything else (including negative prices) is NO.
pub fn normalize_price(raw: i128) -> u64 {
    if raw >= PRICE_SCALE as i128 {
        PRICE_SCALE
    } else if raw == TIE_PRICE as i128 {
        TIE_PRICE
    } else {
        0
    }
}

/// floor(stake × pot / winner_pool), widened through u128.
fn proportional_share(stake: u64, winner_pool: u64, pot: u64) -> Result<u64> {
    let share = (stake as u128)
        .checked_mul(pot as u128)
        .ok_or(VerdictError::Overflow)?
        / winner_pool as u128;
    u64::try_from(share).map_err(|_| error!(VerdictError::Overflow))
}

/// ─── Claim Outcome ────────────────────────────────────────────────
///
/// Result of settling one claim: what the claimant receives and what, if
/// anything, moves to the treasury because the winning side holds no stake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimOutcome {
    /// Collateral owed to the claimant.
    pub payout: u64,

    /// One-time transfer of a winnerless pool to the treasury.
    pub sweep: u64,
}

/// ─── Bet Side ─────────────────────────────────────────────────────
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq)]
pub enum BetSide {
    Yes,
    No,
}

/// ─── Settlement Outcome ───────────────────────────────────────────
///
/// Decoded form of `Market::settlement_price`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlementOutcome {
    No,
    Tie,
    Yes,
}

/// ─── Position Account ─────────────────────────────────────────────
///
/// PDA: seeds = [b"position", market.key, user.key]
///
/// A participant's accumulated net-of-fee stakes in one market, created
/// lazily on the first bet. Both sides may be held at once.
#[account]
#[derive(Default)]
pub struct Position {
    /// The market this position belongs to.
    pub market: Pubkey,

    /// The participant who owns this position.
    pub user: Pubkey,

    /// Net collateral staked on YES.
    pub yes_amount: u64,

    /// Net collateral staked on NO.
    pub no_amount: u64,

    /// Set exactly once by `claim_winnings`; both stakes are zeroed in the
    /// same instruction.
    pub claimed: bool,

    /// Bump seed.
    pub bump: u8,

    /// Reserved.
    pub _reserved: [u8; 32],
}

impl Position {
    pub const SIZE: usize = 8  // discriminator
        + 32                    // market
        + 32                    // user
        + 8                     // yes_amount
        + 8                     // no_amount
        + 1                     // claimed
        + 1                     // bump
        + 32;                   // reserved

    /// Add a net stake to the chosen side.
    pub fn credit(&mut self, side: BetSide, net: u64) -> Result<()> {
        match side {
            BetSide::Yes => {
                self.yes_amount = self
                    .yes_amount
                    .checked_add(net)
                    .ok_or(VerdictError::Overflow)?;
            }
            BetSide::No => {
                self.no_amount = self
                    .no_amount
                    .checked_add(net)
                    .ok_or(VerdictError::Overflow)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn market_with_fee(fee_bps: u16) -> Market {
        Market {
            fee_bps,
            ..Market::default()
        }
    }

    fn settled_market(raw_price: i128, total_yes: u64, total_no: u64) -> Market {
        let mut market = Market {
            total_yes,
            total_no,
            ..Market::default()
        };
        market.record_settlement(raw_price);
        market
    }

    #[test]
    fn fee_split_takes_the_floor() {
        let market = market_with_fee(100); // 1%
        assert_eq!(market.fee_split(10_000).unwrap(), (100, 9_900));
        assert_eq!(market.fee_split(999).unwrap(), (9, 990));
    }

    #[test]
    fn fee_split_rounds_dust_fees_to_zero() {
        let market = market_with_fee(MAX_FEE_BPS); // 10%
        assert_eq!(market.fee_split(1).unwrap(), (0, 1));
        assert_eq!(market.fee_split(9).unwrap(), (0, 9));
        assert_eq!(market.fee_split(10).unwrap(), (1, 9));
    }

    #[test]
    fn fee_split_has_no_minimum_net() {
        // The setters cap fee_bps at MAX_FEE_BPS; the math layer itself
        // accepts a fee that consumes the whole amount.
        let market = market_with_fee(BPS_DENOMINATOR as u16);
        assert_eq!(market.fee_split(1).unwrap(), (1, 0));
    }

    #[test]
    fn price_normalization_is_ternary() {
        assert_eq!(normalize_price(PRICE_SCALE as i128), PRICE_SCALE);
        assert_eq!(normalize_price(2 * PRICE_SCALE as i128), PRICE_SCALE);
        assert_eq!(normalize_price(TIE_PRICE as i128), TIE_PRICE);
        assert_eq!(normalize_price(TIE_PRICE as i128 + 1), 0);
        assert_eq!(normalize_price(PRICE_SCALE as i128 - 1), 0);
        assert_eq!(normalize_price(0), 0);
        assert_eq!(normalize_price(-1), 0);
    }

    #[test]
    fn recording_a_settlement_normalizes_the_raw_price() {
        let mut market = Market::default();
        assert_eq!(market.outcome(), None);
        market.record_settlement(3 * PRICE_SCALE as i128);
        assert_eq!(market.outcome(), Some(SettlementOutcome::Yes));
        assert_eq!(market.settlement_price, PRICE_SCALE);
    }

    #[test]
    fn pool_totals_track_position_sums() {
        let mut market = Market::default();
        let mut alice = Position::default();
        let mut bob = Position::default();

        alice.credit(BetSide::Yes, 70).unwrap();
        market.credit_stake(BetSide::Yes, 70).unwrap();
        alice.credit(BetSide::No, 5).unwrap();
        market.credit_stake(BetSide::No, 5).unwrap();
        bob.credit(BetSide::Yes, 30).unwrap();
        market.credit_stake(BetSide::Yes, 30).unwrap();
        bob.credit(BetSide::No, 45).unwrap();
        market.credit_stake(BetSide::No, 45).unwrap();

        assert_eq!(market.total_yes, alice.yes_amount + bob.yes_amount);
        assert_eq!(market.total_no, alice.no_amount + bob.no_amount);
    }

    #[test]
    fn claim_before_settlement_is_rejected() {
        let mut market = Market {
            total_yes: 10,
            total_no: 10,
            ..Market::default()
        };
        assert!(market.settle_claim(10, 0).is_err());
    }

    #[test]
    fn tie_refunds_both_sides_in_full() {
        let mut market = settled_market(TIE_PRICE as i128, 100, 50);
        assert_eq!(
            market.settle_claim(60, 40).unwrap(),
            ClaimOutcome {
                payout: 100,
                sweep: 0
            }
        );
        assert_eq!(
            market.settle_claim(0, 50).unwrap(),
            ClaimOutcome {
                payout: 50,
                sweep: 0
            }
        );
        assert_eq!(market.settle_claim(0, 0).unwrap().payout, 0);
        // no redistribution on a tie
        assert_eq!((market.total_yes, market.total_no), (100, 50));
    }

    #[test]
    fn sole_yes_winner_takes_the_whole_pot() {
        // Alice stakes 100 on YES, Bob 50 on NO, the price settles at full
        // scale: Alice's share is 100 × 150 / 100 = 150.
        let mut market = settled_market(PRICE_SCALE as i128, 100, 50);
        assert_eq!(
            market.settle_claim(100, 0).unwrap(),
            ClaimOutcome {
                payout: 150,
                sweep: 0
            }
        );
        // Bob holds no YES stake: rejected outright.
        assert!(market.settle_claim(0, 50).is_err());
        // proportional claims never reduce the recorded pools
        assert_eq!((market.total_yes, market.total_no), (100, 50));
    }

    #[test]
    fn proportional_payouts_floor_and_never_exceed_the_pot() {
        let mut market = settled_market(PRICE_SCALE as i128, 3, 10);
        let a = market.settle_claim(1, 0).unwrap().payout; // floor(13/3) = 4
        let b = market.settle_claim(2, 0).unwrap().payout; // floor(26/3) = 8
        assert_eq!((a, b), (4, 8));
        assert!(a + b <= 13);
    }

    #[test]
    fn rounding_dust_stays_behind() {
        // Seven winners of 1 unit each against a NO pool of 10: pot = 17,
        // each payout floor(17/7) = 2, so 3 units of dust are never paid.
        let mut market = settled_market(PRICE_SCALE as i128, 7, 10);
        let mut paid = 0u64;
        for _ in 0..7 {
            paid += market.settle_claim(1, 0).unwrap().payout;
        }
        assert_eq!(paid, 14);
    }

    #[test]
    fn no_outcome_mirrors_yes_accounting() {
        let mut market = settled_market(0, 80, 20);
        assert_eq!(market.settle_claim(0, 20).unwrap().payout, 100);
        assert!(market.settle_claim(80, 0).is_err());
    }

    #[test]
    fn winnerless_round_sweeps_the_losing_pool_once() {
        let mut market = settled_market(PRICE_SCALE as i128, 0, 75);
        assert_eq!(
            market.settle_claim(0, 75).unwrap(),
            ClaimOutcome {
                payout: 0,
                sweep: 75
            }
        );
        assert_eq!(market.total_no, 0);
        // the pool was zeroed: a second claim sweeps nothing
        assert_eq!(
            market.settle_claim(0, 0).unwrap(),
            ClaimOutcome { payout: 0, sweep: 0 }
        );
    }

    #[test]
    fn winnerless_no_outcome_sweeps_symmetrically() {
        let mut market = settled_market(0, 40, 0);
        assert_eq!(
            market.settle_claim(40, 0).unwrap(),
            ClaimOutcome {
                payout: 0,
                sweep: 40
            }
        );
        assert_eq!(market.total_yes, 0);
    }

    #[test]
    fn zeroed_stakes_cannot_claim_twice() {
        let mut market = settled_market(PRICE_SCALE as i128, 100, 50);
        market.settle_claim(100, 0).unwrap();
        // claim_winnings zeroes the stakes after paying; a replay shows up
        // here as a zero-stake claim on the winning side
        assert!(market.settle_claim(0, 0).is_err());

        let mut tie = settled_market(TIE_PRICE as i128, 100, 50);
        tie.settle_claim(60, 40).unwrap();
        assert_eq!(tie.settle_claim(0, 0).unwrap().payout, 0);
    }
}
