//! Ledger state transitions.
//!
//! Each function mutates one already-synced [`StakerAccount`] and either fully
//! applies or returns an error before writing anything to it. Token movement,
//! storage and pool totals are the caller's job.

use crate::epoch::EpochSnapshot;
use crate::errors::ContractError;
use crate::fixed_point::{checked_add, checked_sub};
use crate::ledger::{StakerAccount, UnstakingPeriod, Withdrawal};
use crate::pool::StakingConfig;
use crate::rewards::{eligibility, withdrawal_eligibility};

/// Adds `amount` to the bucket at `period`, opening it if needed.
///
/// Returns the bucket's locked amount afterwards.
pub fn stake(
    account: &mut StakerAccount,
    amount: i128,
    period: u32,
    cfg: &StakingConfig,
    at: &EpochSnapshot,
    bypass_limit: bool,
) -> Result<i128, ContractError> {
    if amount <= 0 || amount < cfg.min_stake_amount {
        return Err(ContractError::InvalidAmount);
    }
    cfg.check_unstaking_period(period)?;

    let mut bucket = match account.period(period) {
        Some(bucket) => bucket,
        None => {
            if !bypass_limit && account.unstaking_periods.len() >= cfg.max_periods_per_staker {
                return Err(ContractError::UnstakingPeriodsLimitReached);
            }
            UnstakingPeriod {
                unstaking_period: period,
                locked_amount: 0,
                reward_eligible_amount: 0,
                last_secondary_epoch: at.current_epoch,
            }
        }
    };
    bucket.locked_amount = checked_add(bucket.locked_amount, amount)?;
    bucket.reward_eligible_amount = eligibility(bucket.locked_amount, period, cfg)?;
    let locked_after = bucket.locked_amount;
    account.put_period(bucket);
    Ok(locked_after)
}

/// Moves `amount` from the bucket at `period` into a new withdrawal entry.
pub fn unstake(
    account: &mut StakerAccount,
    amount: i128,
    period: u32,
    cfg: &StakingConfig,
    at: &EpochSnapshot,
) -> Result<Withdrawal, ContractError> {
    let mut bucket = account
        .period(period)
        .ok_or(ContractError::UnstakingPeriodNotFound)?;
    if amount <= 0 {
        return Err(ContractError::InvalidAmount);
    }
    if amount > bucket.locked_amount {
        return Err(ContractError::AmountExceedsLocked);
    }
    if account.withdrawals_for(period) >= cfg.max_withdrawals_per_period {
        return Err(ContractError::WithdrawalsLimitReached);
    }

    let release_epoch = at
        .current_epoch
        .checked_add(period as u64)
        .ok_or(ContractError::Overflow)?;
    let withdrawal = Withdrawal {
        locked_amount: amount,
        reward_eligible_amount: withdrawal_eligibility(amount, period, cfg)?,
        unstaking_period: period,
        release_epoch,
        secondary_stop_epoch: release_epoch,
        last_secondary_epoch: at.current_epoch,
    };

    bucket.locked_amount = checked_sub(bucket.locked_amount, amount)?;
    bucket.reward_eligible_amount = eligibility(bucket.locked_amount, period, cfg)?;
    account.put_period(bucket);
    account.withdrawals.push_back(withdrawal.clone());
    Ok(withdrawal)
}

/// Returns the oldest pending withdrawal matching `(amount, period)` to its bucket.
pub fn cancel_unstaking(
    account: &mut StakerAccount,
    amount: i128,
    period: u32,
    cfg: &StakingConfig,
    at: &EpochSnapshot,
) -> Result<(), ContractError> {
    let mut matured_match = false;
    let mut found = None;
    for (i, w) in account.withdrawals.iter().enumerate() {
        if w.locked_amount != amount || w.unstaking_period != period {
            continue;
        }
        if w.is_released(at.current_epoch) {
            matured_match = true;
        } else {
            found = Some(i as u32);
            break;
        }
    }
    let index = match found {
        Some(i) => i,
        None if matured_match => return Err(ContractError::WithdrawalAlreadyReleased),
        None => return Err(ContractError::WithdrawalNotFound),
    };
    account.withdrawals.remove(index);

    let mut bucket = account.period(period).unwrap_or(UnstakingPeriod {
        unstaking_period: period,
        locked_amount: 0,
        reward_eligible_amount: 0,
        last_secondary_epoch: at.current_epoch,
    });
    bucket.locked_amount = checked_add(bucket.locked_amount, amount)?;
    bucket.reward_eligible_amount = eligibility(bucket.locked_amount, period, cfg)?;
    account.put_period(bucket);
    Ok(())
}

/// Removes every matured withdrawal. Returns the principal released and the
/// number of entries.
pub fn withdraw(
    account: &mut StakerAccount,
    at: &EpochSnapshot,
) -> Result<(i128, u32), ContractError> {
    let released = account.take_released(at.current_epoch);
    if released.is_empty() {
        return Err(ContractError::NothingToWithdraw);
    }
    let mut amount = 0i128;
    for w in released.iter() {
        amount = checked_add(amount, w.locked_amount)?;
    }
    account.prune_empty_periods();
    Ok((amount, released.len()))
}

/// Folds the pending primary reward into the bucket at `period`.
pub fn compound(
    account: &mut StakerAccount,
    period: u32,
    cfg: &StakingConfig,
) -> Result<i128, ContractError> {
    let amount = account.pending_primary_reward;
    if amount <= 0 {
        return Err(ContractError::NothingToCompound);
    }
    let mut bucket = account
        .period(period)
        .ok_or(ContractError::UnstakingPeriodNotFound)?;
    bucket.locked_amount = checked_add(bucket.locked_amount, amount)?;
    bucket.reward_eligible_amount = eligibility(bucket.locked_amount, period, cfg)?;
    account.put_period(bucket);
    account.pending_primary_reward = 0;
    Ok(amount)
}

/// Moves everything locked at `old_period` into the bucket at `new_period`.
///
/// Returns the amount moved.
pub fn increase_unstaking_period(
    account: &mut StakerAccount,
    old_period: u32,
    new_period: u32,
    cfg: &StakingConfig,
    at: &EpochSnapshot,
) -> Result<i128, ContractError> {
    if new_period <= old_period {
        return Err(ContractError::PeriodNotIncreased);
    }
    cfg.check_unstaking_period(new_period)?;
    let mut source = account
        .period(old_period)
        .filter(|b| b.locked_amount > 0)
        .ok_or(ContractError::UnstakingPeriodNotFound)?;

    let target = account.period(new_period);
    if target.is_none() {
        // the source only disappears when nothing in the queue points at it
        let source_kept = account.withdrawals_for(old_period) > 0;
        let after = account.unstaking_periods.len() + u32::from(source_kept);
        if after > cfg.max_periods_per_staker {
            return Err(ContractError::UnstakingPeriodsLimitReached);
        }
    }
    let mut target = target.unwrap_or(UnstakingPeriod {
        unstaking_period: new_period,
        locked_amount: 0,
        reward_eligible_amount: 0,
        last_secondary_epoch: at.current_epoch,
    });

    let moved = source.locked_amount;
    source.locked_amount = 0;
    source.reward_eligible_amount = 0;
    target.locked_amount = checked_add(target.locked_amount, moved)?;
    target.reward_eligible_amount = eligibility(target.locked_amount, new_period, cfg)?;

    account.put_period(source);
    account.put_period(target);
    account.prune_empty_periods();
    Ok(moved)
}
