//! State machine properties of the staker ledger.
//!
//! Random sequences of staker operations, distributions and time jumps are
//! applied to a live deployment. Failed calls are fine; after every step:
//! - the pool's eligible total equals the sum over every staker's ledger
//! - the contract holds enough stake token for all locked principal plus
//!   every pending primary reward
//! - each staker respects the bucket and withdrawal limits

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use soroban_sdk::Address;

use crate::support::{config, deploy, Deployment};

const PERIODS: [u32; 5] = [14, 30, 90, 200, 365];
const STAKERS: usize = 3;

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    #[proptest(weight = 3)]
    Stake {
        #[proptest(strategy = "0..STAKERS")]
        who: usize,
        #[proptest(strategy = "1i128..=100_000")]
        amount: i128,
        #[proptest(strategy = "0..PERIODS.len()")]
        period: usize,
    },
    #[proptest(weight = 2)]
    Unstake {
        #[proptest(strategy = "0..STAKERS")]
        who: usize,
        #[proptest(strategy = "0usize..5")]
        bucket: usize,
        #[proptest(strategy = "1i128..=100")]
        pct: i128,
    },
    Cancel {
        #[proptest(strategy = "0..STAKERS")]
        who: usize,
        #[proptest(strategy = "0usize..8")]
        entry: usize,
    },
    Withdraw {
        #[proptest(strategy = "0..STAKERS")]
        who: usize,
    },
    Compound {
        #[proptest(strategy = "0..STAKERS")]
        who: usize,
        #[proptest(strategy = "0usize..5")]
        bucket: usize,
    },
    Claim {
        #[proptest(strategy = "0..STAKERS")]
        who: usize,
        primary: bool,
        secondary: bool,
    },
    Increase {
        #[proptest(strategy = "0..STAKERS")]
        who: usize,
        #[proptest(strategy = "0usize..5")]
        bucket: usize,
        #[proptest(strategy = "0..PERIODS.len()")]
        period: usize,
    },
    #[proptest(weight = 2)]
    Distribute {
        #[proptest(strategy = "1i128..=50_000")]
        amount: i128,
    },
    #[proptest(weight = 2)]
    Advance {
        #[proptest(strategy = "0u64..40")]
        epochs: u64,
    },
}

fn apply(d: &Deployment, stakers: &[Address], op: &Op) {
    let c = &d.client;
    match *op {
        Op::Stake { who, amount, period } => {
            let _ = c.try_stake(&stakers[who], &amount, &PERIODS[period]);
        }
        Op::Unstake { who, bucket, pct } => {
            let info = c.get_staker_info(&stakers[who]);
            if let Some(b) = info.unstaking_periods.get(bucket as u32) {
                let amount = (b.locked_amount * pct / 100).max(1);
                let _ = c.try_unstake(&stakers[who], &amount, &b.unstaking_period);
            }
        }
        Op::Cancel { who, entry } => {
            let info = c.get_staker_info(&stakers[who]);
            if let Some(w) = info.withdrawals.get(entry as u32) {
                let _ = c.try_cancel_unstaking(&stakers[who], &w.locked_amount, &w.unstaking_period);
            }
        }
        Op::Withdraw { who } => {
            let _ = c.try_withdraw(&stakers[who]);
        }
        Op::Compound { who, bucket } => {
            let info = c.get_staker_info(&stakers[who]);
            if let Some(b) = info.unstaking_periods.get(bucket as u32) {
                let _ = c.try_compound(&stakers[who], &b.unstaking_period);
            }
        }
        Op::Claim { who, primary, secondary } => {
            let _ = c.try_claim_rewards(&stakers[who], &primary, &secondary);
        }
        Op::Increase { who, bucket, period } => {
            let info = c.get_staker_info(&stakers[who]);
            if let Some(b) = info.unstaking_periods.get(bucket as u32) {
                let _ = c.try_increase_unstaking_period(
                    &stakers[who],
                    &b.unstaking_period,
                    &PERIODS[period],
                );
            }
        }
        Op::Distribute { amount } => d.distribute(amount),
        Op::Advance { epochs } => d.advance_epochs(epochs),
    }
}

fn check_invariants(d: &Deployment, stakers: &[Address]) -> Result<(), TestCaseError> {
    let cfg = config();
    let pool = d.client.get_pool_info();
    let mut eligible = 0i128;
    let mut pending_primary = 0i128;

    for staker in stakers {
        let account = d.client.get_staker_info(staker);
        eligible += account.total_eligible().unwrap();
        pending_primary += account.pending_primary_reward;

        prop_assert!(account.unstaking_periods.len() <= cfg.max_periods_per_staker);
        for bucket in account.unstaking_periods.iter() {
            prop_assert!(bucket.reward_eligible_amount <= bucket.locked_amount);
            prop_assert!(
                account.withdrawals_for(bucket.unstaking_period) <= cfg.max_withdrawals_per_period
            );
        }
    }

    prop_assert_eq!(pool.total_eligible_amount, eligible);
    prop_assert!(d.balance(&d.contract_id) >= pool.total_locked_amount + pending_primary);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_ledger_stays_consistent(ops in prop::collection::vec(any::<Op>(), 1..40)) {
        let d = deploy();
        let stakers: Vec<Address> = (0..STAKERS).map(|_| d.funded_staker(10_000_000)).collect();

        for op in &ops {
            apply(&d, &stakers, op);
            check_invariants(&d, &stakers)?;
        }
    }

    /// Unstake followed by cancel in the same epoch restores the bucket.
    #[test]
    fn prop_cancel_undoes_unstake(
        locked in 1i128..=10_000_000,
        pct in 1i128..=100,
        period in 0..PERIODS.len(),
    ) {
        let d = deploy();
        let staker = d.funded_staker(locked);
        let period = PERIODS[period];
        d.client.stake(&staker, &locked, &period);
        let before = d.client.get_staker_info(&staker);

        let amount = (locked * pct / 100).max(1);
        d.client.unstake(&staker, &amount, &period);
        d.client.cancel_unstaking(&staker, &amount, &period);

        prop_assert_eq!(d.client.get_staker_info(&staker), before);
    }
}
