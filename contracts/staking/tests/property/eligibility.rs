//! Properties of the eligibility and loyalty formulas.
//!
//! Invariants tested:
//! - Eligibility is non-decreasing in the unstaking period and never exceeds
//!   the locked amount
//! - The maximum period makes the whole locked amount eligible
//! - Moving principal into the queue never raises eligibility
//! - Loyalty accrual is additive over epochs, up to flooring

use proptest::prelude::*;
use staking::rewards::{accrue_over, annual_secondary, eligibility, withdrawal_eligibility};

use crate::support::{config, DAY};

proptest! {
    #[test]
    fn prop_eligibility_monotone_and_bounded(
        locked in 0i128..=1_000_000_000_000_000,
        a in 14u32..=365,
        b in 14u32..=365,
    ) {
        let cfg = config();
        let (short, long) = if a <= b { (a, b) } else { (b, a) };
        let e_short = eligibility(locked, short, &cfg).unwrap();
        let e_long = eligibility(locked, long, &cfg).unwrap();

        prop_assert!(e_short <= e_long);
        prop_assert!(e_long <= locked);
        prop_assert!(e_short >= locked * 74 / 100);
    }

    #[test]
    fn prop_max_period_is_fully_eligible(locked in 0i128..=1_000_000_000_000_000) {
        let cfg = config();
        prop_assert_eq!(eligibility(locked, cfg.max_unstaking_period, &cfg).unwrap(), locked);
    }

    #[test]
    fn prop_partial_unstake_never_gains_eligibility(
        locked in 1i128..=1_000_000_000_000,
        pct in 1i128..=100,
        period in 14u32..=365,
    ) {
        let cfg = config();
        let amount = (locked * pct / 100).max(1);
        let before = eligibility(locked, period, &cfg).unwrap();
        let after = eligibility(locked - amount, period, &cfg).unwrap()
            + withdrawal_eligibility(amount, period, &cfg).unwrap();
        prop_assert!(after <= before);
    }

    #[test]
    fn prop_accrual_splits_over_epochs(
        eligible in 0i128..=1_000_000_000_000,
        first in 0u64..=400,
        second in 0u64..=400,
    ) {
        let cfg = config();
        let annual = annual_secondary(eligible, eligible, &cfg).unwrap();
        let whole = accrue_over(annual, (first + second) * DAY).unwrap();
        let split = accrue_over(annual, first * DAY).unwrap()
            + accrue_over(annual, second * DAY).unwrap();

        prop_assert!(split <= whole);
        prop_assert!(whole - split <= 1);
    }
}
