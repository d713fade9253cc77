//! P&L computation for FX operations

use super::types::Direction;
use crate::dof::ResolvedRate;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Converted amounts and signed result of an operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PnlBreakdown {
    pub mxn_base: Decimal,
    pub mxn_comparison: Decimal,
    pub pnl_mxn: Decimal,
    pub pnl_pct: Decimal,
}

/// Round half-up at `dp` decimal places
fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Compute the P&L of an operation.
///
/// Both MXN amounts are rounded to cents before the difference is taken, so
/// the signed result matches what actually lands in the books. The
/// percentage is relative to the base amount, zero when the base amount is
/// zero.
pub fn compute_pnl(
    direction: Direction,
    usd_amount: Decimal,
    base: &ResolvedRate,
    comparison: &ResolvedRate,
) -> PnlBreakdown {
    let mxn_base = round_half_up(usd_amount * base.value, 2);
    let mxn_comparison = round_half_up(usd_amount * comparison.value, 2);

    let pnl_mxn = match direction {
        // Receiving USD gains when the comparison rate is higher
        Direction::ReceiveUsd => round_half_up(mxn_comparison - mxn_base, 2),
        // Paying USD gains when the comparison rate is lower
        Direction::PayUsd => round_half_up(mxn_base - mxn_comparison, 2),
    };

    let pnl_pct = if mxn_base.is_zero() {
        Decimal::ZERO
    } else {
        round_half_up(pnl_mxn / mxn_base * dec!(100), 3)
    };

    PnlBreakdown {
        mxn_base,
        mxn_comparison,
        pnl_mxn,
        pnl_pct,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receive_usd_gains_on_higher_comparison() {
        let pnl = compute_pnl(
            Direction::ReceiveUsd,
            dec!(800),
            &ResolvedRate::manual(dec!(18.20)),
            &ResolvedRate::manual(dec!(18.33)),
        );

        assert_eq!(pnl.mxn_base, dec!(14560.00));
        assert_eq!(pnl.mxn_comparison, dec!(14664.00));
        assert_eq!(pnl.pnl_mxn, dec!(104.00));
        assert_eq!(pnl.pnl_pct, dec!(0.714));
    }

    #[test]
    fn test_pay_usd_gains_on_lower_comparison() {
        let pnl = compute_pnl(
            Direction::PayUsd,
            dec!(1000),
            &ResolvedRate::manual(dec!(18.50)),
            &ResolvedRate::manual(dec!(18.20)),
        );

        assert_eq!(pnl.pnl_mxn, dec!(300.00));
        assert!(pnl.pnl_pct > Decimal::ZERO);
    }

    #[test]
    fn test_receive_usd_loses_on_lower_comparison() {
        let pnl = compute_pnl(
            Direction::ReceiveUsd,
            dec!(1000),
            &ResolvedRate::manual(dec!(18.50)),
            &ResolvedRate::manual(dec!(18.20)),
        );

        assert_eq!(pnl.pnl_mxn, dec!(-300.00));
        assert!(pnl.pnl_pct < Decimal::ZERO);
    }

    #[test]
    fn test_amounts_round_before_difference() {
        // 123.45 * 18.1234 = 2237.333730 -> 2237.33
        // 123.45 * 18.1239 = 2237.395455 -> 2237.40 (not .39)
        let pnl = compute_pnl(
            Direction::ReceiveUsd,
            dec!(123.45),
            &ResolvedRate::manual(dec!(18.1234)),
            &ResolvedRate::manual(dec!(18.1239)),
        );

        assert_eq!(pnl.mxn_base, dec!(2237.33));
        assert_eq!(pnl.mxn_comparison, dec!(2237.40));
        assert_eq!(pnl.pnl_mxn, dec!(0.07));
    }

    #[test]
    fn test_zero_usd_amount_has_zero_percent() {
        let pnl = compute_pnl(
            Direction::ReceiveUsd,
            dec!(0),
            &ResolvedRate::manual(dec!(18.20)),
            &ResolvedRate::manual(dec!(18.33)),
        );

        assert_eq!(pnl.pnl_mxn, dec!(0));
        assert_eq!(pnl.pnl_pct, dec!(0));
    }

    #[test]
    fn test_percent_rounds_to_three_places() {
        // 104 / 14560 * 100 = 0.714285... -> 0.714
        let pnl = compute_pnl(
            Direction::ReceiveUsd,
            dec!(800),
            &ResolvedRate::manual(dec!(18.20)),
            &ResolvedRate::manual(dec!(18.33)),
        );
        assert_eq!(pnl.pnl_pct, dec!(0.714));
    }
}
