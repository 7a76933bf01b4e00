//! Price-request round tracking for the asynchronous oracle.
//!
//! The market asks its question by emitting a [`PriceRequested`] event and
//! the oracle authority answers through the `price_settled` and
//! `price_disputed` instructions. Rounds are identified by the trio
//! (identifier, request timestamp, ancillary data); a dispute opens a new
//! round under the current timestamp, and any answer to a superseded round
//! is acknowledged without effect.

use anchor_lang::prelude::*;

use crate::errors::VerdictError;
use crate::events::PriceRequested;
use crate::state::Market;

/// How an inbound settle callback relates to the outstanding round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundMatch {
    /// The callback answers the outstanding round.
    Current,

    /// The callback answers a round that a dispute has since replaced.
    /// Accepted and dropped.
    Superseded,
}

/// Open a request round at `now` and build the event that asks the oracle
/// to answer it.
pub fn issue_request(market: &mut Market, market_key: Pubkey, now: i64) -> PriceRequested {
    market.request_timestamp = now;
    market.price_requested = true;
    PriceRequested {
        market: market_key,
        identifier: market.price_identifier,
        request_timestamp: now,
        ancillary_data: market.ancillary_data.clone(),
        reward: market.proposer_reward,
        bond: market.proposer_bond,
        liveness: market.liveness,
        event_based: true,
        callback_on_settle: true,
        callback_on_dispute: true,
    }
}

/// Validate a settle callback against the outstanding round.
///
/// A callback for the wrong question is an error; a callback for a
/// superseded round of the right question is not, it simply no longer
/// binds.
pub fn check_settle_callback(
    market: &Market,
    identifier: &[u8; 32],
    timestamp: i64,
    ancillary_data: &[u8],
) -> Result<RoundMatch> {
    require!(market.price_requested, VerdictError::PriceNotRequested);
    require!(!market.settled, VerdictError::AlreadySettled);
    require!(
        market.question_matches(identifier, ancillary_data),
        VerdictError::RequestMismatch
    );
    if timestamp != market.request_timestamp {
        return Ok(RoundMatch::Superseded);
    }
    Ok(RoundMatch::Current)
}

/// Validate a dispute callback against the outstanding round.
///
/// Disputes bind to exactly one round, so unlike settles a timestamp
/// mismatch is an error here. The refund reported by the oracle must equal
/// the reward this market escrowed.
pub fn check_dispute_callback(
    market: &Market,
    identifier: &[u8; 32],
    timestamp: i64,
    ancillary_data: &[u8],
    refund: u64,
) -> Result<()> {
    require!(market.price_requested, VerdictError::PriceNotRequested);
    require!(!market.settled, VerdictError::AlreadySettled);
    require!(
        market.question_matches(identifier, ancillary_data),
        VerdictError::RequestMismatch
    );
    require!(
        timestamp == market.request_timestamp,
        VerdictError::RequestMismatch
    );
    require!(refund == market.proposer_reward, VerdictError::RefundMismatch);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{BetSide, PRICE_SCALE};

    const IDENTIFIER: [u8; 32] = [7; 32];
    const ROUND: i64 = 1_700_000_000;

    fn requested_market() -> Market {
        let mut market = Market {
            price_identifier: IDENTIFIER,
            ancillary_data: b"q: does the pair close above target?".to_vec(),
            proposer_reward: 25,
            proposer_bond: 500,
            liveness: 7_200,
            ..Market::default()
        };
        issue_request(&mut market, Pubkey::new_unique(), ROUND);
        market
    }

    #[test]
    fn issuing_a_request_opens_the_round() {
        let mut market = Market {
            price_identifier: IDENTIFIER,
            ancillary_data: b"q".to_vec(),
            proposer_reward: 25,
            proposer_bond: 500,
            liveness: 7_200,
            ..Market::default()
        };
        let request = issue_request(&mut market, Pubkey::new_unique(), ROUND);

        assert!(market.price_requested);
        assert_eq!(market.request_timestamp, ROUND);
        assert_eq!(request.request_timestamp, ROUND);
        assert_eq!(request.identifier, IDENTIFIER);
        assert_eq!(request.reward, 25);
        assert!(request.event_based);
        assert!(request.callback_on_settle && request.callback_on_dispute);
    }

    #[test]
    fn settle_requires_an_outstanding_request() {
        let market = Market::default();
        assert!(check_settle_callback(&market, &IDENTIFIER, ROUND, b"").is_err());
    }

    #[test]
    fn settle_rejects_a_second_answer() {
        let mut market = requested_market();
        market.record_settlement(0);
        let data = market.ancillary_data.clone();
        assert!(check_settle_callback(&market, &IDENTIFIER, ROUND, &data).is_err());
    }

    #[test]
    fn settle_rejects_the_wrong_question() {
        let market = requested_market();
        let data = market.ancillary_data.clone();
        assert!(check_settle_callback(&market, &[8; 32], ROUND, &data).is_err());
        assert!(check_settle_callback(&market, &IDENTIFIER, ROUND, b"other question").is_err());
    }

    #[test]
    fn settle_for_a_superseded_round_does_not_bind() {
        let market = requested_market();
        let data = market.ancillary_data.clone();
        assert_eq!(
            check_settle_callback(&market, &IDENTIFIER, ROUND - 1, &data).unwrap(),
            RoundMatch::Superseded
        );
        assert_eq!(
            check_settle_callback(&market, &IDENTIFIER, ROUND, &data).unwrap(),
            RoundMatch::Current
        );
    }

    #[test]
    fn dispute_binds_to_exactly_one_round() {
        let market = requested_market();
        let data = market.ancillary_data.clone();
        assert!(check_dispute_callback(&market, &IDENTIFIER, ROUND - 1, &data, 25).is_err());
        assert!(check_dispute_callback(&market, &IDENTIFIER, ROUND, &data, 25).is_ok());
    }

    #[test]
    fn dispute_rejects_the_wrong_question() {
        let market = requested_market();
        let data = market.ancillary_data.clone();
        assert!(check_dispute_callback(&market, &[8; 32], ROUND, &data, 25).is_err());
        assert!(check_dispute_callback(&market, &IDENTIFIER, ROUND, b"other", 25).is_err());
    }

    #[test]
    fn dispute_checks_the_refund() {
        let market = requested_market();
        let data = market.ancillary_data.clone();
        assert!(check_dispute_callback(&market, &IDENTIFIER, ROUND, &data, 24).is_err());
        assert!(check_dispute_callback(&market, &IDENTIFIER, ROUND, &data, 0).is_err());
    }

    #[test]
    fn dispute_after_settlement_is_rejected() {
        let mut market = requested_market();
        market.record_settlement(0);
        let data = market.ancillary_data.clone();
        assert!(check_dispute_callback(&market, &IDENTIFIER, ROUND, &data, 25).is_err());
    }

    #[test]
    fn disputed_market_settles_on_the_second_round() {
        let mut market = requested_market();
        let key = Pubkey::new_unique();
        let data = market.ancillary_data.clone();

        market.credit_stake(BetSide::Yes, 100).unwrap();
        market.credit_stake(BetSide::No, 50).unwrap();

        // round one is disputed and replaced
        check_dispute_callback(&market, &IDENTIFIER, ROUND, &data, 25).unwrap();
        issue_request(&mut market, key, ROUND + 600);

        // the old round's late answer is dropped, the new one binds
        assert_eq!(
            check_settle_callback(&market, &IDENTIFIER, ROUND, &data).unwrap(),
            RoundMatch::Superseded
        );
        assert_eq!(
            check_settle_callback(&market, &IDENTIFIER, ROUND + 600, &data).unwrap(),
            RoundMatch::Current
        );
        market.record_settlement(PRICE_SCALE as i128);

        assert_eq!(market.settle_claim(100, 0).unwrap().payout, 150);
        assert!(market.settle_claim(0, 50).is_err());
    }

    #[test]
    fn a_new_round_supersedes_the_old_one() {
        let mut market = requested_market();
        let key = Pubkey::new_unique();
        let data = market.ancillary_data.clone();

        issue_request(&mut market, key, ROUND + 90);
        assert_eq!(
            check_settle_callback(&market, &IDENTIFIER, ROUND, &data).unwrap(),
            RoundMatch::Superseded
        );
        assert_eq!(
            check_settle_callback(&market, &IDENTIFIER, ROUND + 90, &data).unwrap(),
            RoundMatch::Current
        );
        // a dispute within the same second reuses the round id
        issue_request(&mut market, key, ROUND + 90);
        assert_eq!(
            check_settle_callback(&market, &IDENTIFIER, ROUND + 90, &data).unwrap(),
            RoundMatch::Current
        );
    }
}
