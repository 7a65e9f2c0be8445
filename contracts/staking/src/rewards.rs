//! Reward engine.
//!
//! Pure functions over a [`StakerAccount`]: eligibility scaling by commitment
//! length, primary index propagation and loyalty accrual. Nothing here touches
//! storage or reads a clock; the caller passes the epoch it runs in.
//!
//! ```text
//! fraction   = base + (1 - base) * (period - min) / (max - min)
//! eligible   = locked * fraction
//! pending   += eligible_total * (global_index - account_index) / SCALE
//! annual     = E * rate + max(0, E - L * base) * rate * multiplier
//! accrual    = annual * seconds / SECONDS_PER_YEAR
//! ```
//!
//! `seconds` spans whole epochs only, each at the length it ran with.

use crate::epoch::EpochSnapshot;
use crate::errors::ContractError;
use crate::fixed_point::{
    apply_fraction, checked_add, checked_sub, fraction_of, mul_div, to_fraction, SCALE,
};
use crate::ledger::StakerAccount;
use crate::pool::{PoolState, StakingConfig};

pub const SECONDS_PER_YEAR: u64 = 31_536_000;

/// Reward-eligible share of `locked` committed for `period` epochs.
///
/// Periods outside the configured range are clamped, so buckets created under
/// an older configuration still score within `[base, 1.0]`.
pub fn eligibility(locked: i128, period: u32, cfg: &StakingConfig) -> Result<i128, ContractError> {
    let span = cfg
        .max_unstaking_period
        .saturating_sub(cfg.min_unstaking_period);
    if span == 0 {
        return apply_fraction(locked, SCALE);
    }
    let over_min = period.saturating_sub(cfg.min_unstaking_period).min(span);
    let bonus = fraction_of(
        checked_sub(SCALE, cfg.base_eligibility_fraction)?,
        over_min as i128,
        span as i128,
    )?;
    let fraction = checked_add(cfg.base_eligibility_fraction, bonus)?;
    apply_fraction(locked, fraction)
}

/// Eligibility kept by principal moved into the withdrawal queue.
pub fn withdrawal_eligibility(
    amount: i128,
    period: u32,
    cfg: &StakingConfig,
) -> Result<i128, ContractError> {
    apply_fraction(
        eligibility(amount, period, cfg)?,
        cfg.withdrawal_eligible_fraction,
    )
}

/// Yearly loyalty accrual of an item with `eligible` out of `locked`.
pub fn annual_secondary(
    eligible: i128,
    locked: i128,
    cfg: &StakingConfig,
) -> Result<i128, ContractError> {
    let base = apply_fraction(eligible, cfg.secondary_base_rate)?;
    let threshold = apply_fraction(locked, cfg.base_eligibility_fraction)?;
    if eligible <= threshold {
        return Ok(base);
    }
    let over_base = apply_fraction(eligible - threshold, cfg.secondary_base_rate)?;
    let bonus = over_base
        .checked_mul(cfg.secondary_bonus_multiplier as i128)
        .ok_or(ContractError::Overflow)?;
    checked_add(base, bonus)
}

/// Accrual of `annual` over `seconds`.
pub fn accrue_over(annual: i128, seconds: u64) -> Result<i128, ContractError> {
    if seconds == 0 || annual == 0 {
        return Ok(0);
    }
    fraction_of(annual, seconds as i128, SECONDS_PER_YEAR as i128)
}

/// Brings `account` up to the pool's index and to `at.current_epoch`.
///
/// Primary reward uses the eligible total held before this call changes it.
/// Idempotent: a second call with the same inputs changes nothing.
pub fn sync_account(
    account: &mut StakerAccount,
    pool: &PoolState,
    cfg: &StakingConfig,
    at: &EpochSnapshot,
) -> Result<(), ContractError> {
    let eligible = account.total_eligible()?;
    let index_delta = checked_sub(pool.global_reward_index, account.primary_reward_index)?;
    let primary = mul_div(eligible, index_delta, SCALE)?;
    account.pending_primary_reward = checked_add(account.pending_primary_reward, primary)?;
    account.primary_reward_index = pool.global_reward_index;

    let cursor = &pool.epoch_cursor;
    let mut secondary = 0i128;

    for i in 0..account.unstaking_periods.len() {
        let Some(mut bucket) = account.unstaking_periods.get(i) else {
            continue;
        };
        if at.current_epoch <= bucket.last_secondary_epoch {
            continue;
        }
        let seconds = cursor.seconds_between(bucket.last_secondary_epoch, at.current_epoch)?;
        let annual = annual_secondary(bucket.reward_eligible_amount, bucket.locked_amount, cfg)?;
        secondary = checked_add(secondary, accrue_over(annual, seconds)?)?;
        bucket.last_secondary_epoch = at.current_epoch;
        account.unstaking_periods.set(i, bucket);
    }

    for i in 0..account.withdrawals.len() {
        let Some(mut withdrawal) = account.withdrawals.get(i) else {
            continue;
        };
        let until = at.current_epoch.min(withdrawal.secondary_stop_epoch);
        if until <= withdrawal.last_secondary_epoch {
            continue;
        }
        let seconds = cursor.seconds_between(withdrawal.last_secondary_epoch, until)?;
        let annual = apply_fraction(
            annual_secondary(
                withdrawal.reward_eligible_amount,
                withdrawal.locked_amount,
                cfg,
            )?,
            cfg.withdrawal_secondary_fraction,
        )?;
        secondary = checked_add(secondary, accrue_over(annual, seconds)?)?;
        withdrawal.last_secondary_epoch = until;
        account.withdrawals.set(i, withdrawal);
    }

    account.pending_secondary_reward = checked_add(account.pending_secondary_reward, secondary)?;
    Ok(())
}

/// Index increment for distributing `amount` over `total_eligible`.
pub fn index_increment(amount: i128, total_eligible: i128) -> Result<i128, ContractError> {
    to_fraction(amount, total_eligible)
}
