//! Properties of primary reward distribution.
//!
//! Invariants tested:
//! - Pending primary rewards never exceed what was distributed
//! - Two stakers at the maximum period split a distribution by stake, up to
//!   one unit of flooring each
//! - Distributing into an empty pool refunds the distributor in full

use proptest::prelude::*;

use crate::support::deploy;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_split_is_proportional(
        a in 1i128..=1_000_000_000,
        b in 1i128..=1_000_000_000,
        amount in 1i128..=1_000_000_000,
    ) {
        let d = deploy();
        let alice = d.funded_staker(a);
        let bob = d.funded_staker(b);
        d.client.stake(&alice, &a, &365);
        d.client.stake(&bob, &b, &365);

        d.distribute(amount);

        let pa = d.client.get_pending_rewards(&alice).primary;
        let pb = d.client.get_pending_rewards(&bob).primary;
        prop_assert!(pa + pb <= amount);
        prop_assert!(amount - (pa + pb) <= 2);
        prop_assert!((pa - amount * a / (a + b)).abs() <= 1);
    }

    #[test]
    fn prop_empty_pool_refunds(amount in 1i128..=1_000_000_000_000) {
        let d = deploy();
        d.distribute(amount);

        prop_assert_eq!(d.balance(&d.distributor), amount);
        prop_assert_eq!(d.client.get_pool_info().global_reward_index, 0);
    }
}
