//! Per-staker ledger.
//!
//! Each staker owns one [`StakerAccount`] in persistent storage, keyed by
//! address. The account holds its commitment buckets (ordered by unstaking
//! period, one per period) and its withdrawal queue (insertion order). Items
//! are addressed by period or by queue index, never by reference.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

use crate::errors::ContractError;
use crate::fixed_point::checked_add;

const STAKER: Symbol = symbol_short!("STAKER");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

/// Active commitment at one unstaking period.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakingPeriod {
    pub unstaking_period: u32,
    pub locked_amount: i128,
    pub reward_eligible_amount: i128,
    pub last_secondary_epoch: u64,
}

/// Queued exit drawn from a bucket.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Withdrawal {
    pub locked_amount: i128,
    pub reward_eligible_amount: i128,
    pub unstaking_period: u32,
    pub release_epoch: u64,
    pub secondary_stop_epoch: u64,
    pub last_secondary_epoch: u64,
}

impl Withdrawal {
    pub fn is_released(&self, current_epoch: u64) -> bool {
        current_epoch >= self.release_epoch
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakerAccount {
    pub primary_reward_index: i128,
    pub pending_primary_reward: i128,
    pub pending_secondary_reward: i128,
    pub unstaking_periods: Vec<UnstakingPeriod>,
    pub withdrawals: Vec<Withdrawal>,
}

impl StakerAccount {
    pub fn empty(env: &Env) -> Self {
        StakerAccount {
            primary_reward_index: 0,
            pending_primary_reward: 0,
            pending_secondary_reward: 0,
            unstaking_periods: Vec::new(env),
            withdrawals: Vec::new(env),
        }
    }

    /// Sum of eligible amounts over buckets and queued withdrawals.
    pub fn total_eligible(&self) -> Result<i128, ContractError> {
        let mut total = 0i128;
        for bucket in self.unstaking_periods.iter() {
            total = checked_add(total, bucket.reward_eligible_amount)?;
        }
        for withdrawal in self.withdrawals.iter() {
            total = checked_add(total, withdrawal.reward_eligible_amount)?;
        }
        Ok(total)
    }

    pub fn find_period(&self, period: u32) -> Option<u32> {
        self.unstaking_periods
            .iter()
            .position(|b| b.unstaking_period == period)
            .map(|i| i as u32)
    }

    pub fn period(&self, period: u32) -> Option<UnstakingPeriod> {
        self.find_period(period)
            .and_then(|i| self.unstaking_periods.get(i))
    }

    /// Inserts `bucket` keeping the ascending period order.
    pub fn insert_period(&mut self, bucket: UnstakingPeriod) {
        let at = self
            .unstaking_periods
            .iter()
            .position(|b| b.unstaking_period > bucket.unstaking_period)
            .map(|i| i as u32)
            .unwrap_or(self.unstaking_periods.len());
        self.unstaking_periods.insert(at, bucket);
    }

    /// Replaces the bucket with the same period, inserting it if absent.
    pub fn put_period(&mut self, bucket: UnstakingPeriod) {
        match self.find_period(bucket.unstaking_period) {
            Some(i) => self.unstaking_periods.set(i, bucket),
            None => self.insert_period(bucket),
        }
    }

    pub fn withdrawals_for(&self, period: u32) -> u32 {
        self.withdrawals
            .iter()
            .filter(|w| w.unstaking_period == period)
            .count() as u32
    }

    /// Drops buckets with nothing locked that no queued withdrawal points at.
    pub fn prune_empty_periods(&mut self) {
        let mut kept = Vec::new(self.unstaking_periods.env());
        for bucket in self.unstaking_periods.iter() {
            if bucket.locked_amount > 0 || self.withdrawals_for(bucket.unstaking_period) > 0 {
                kept.push_back(bucket);
            }
        }
        self.unstaking_periods = kept;
    }

    /// Removes and returns every withdrawal released at `current_epoch`.
    pub fn take_released(&mut self, current_epoch: u64) -> Vec<Withdrawal> {
        let env = self.withdrawals.env().clone();
        let mut released = Vec::new(&env);
        let mut pending = Vec::new(&env);
        for withdrawal in self.withdrawals.iter() {
            if withdrawal.is_released(current_epoch) {
                released.push_back(withdrawal);
            } else {
                pending.push_back(withdrawal);
            }
        }
        self.withdrawals = pending;
        released
    }
}

fn staker_key(staker: &Address) -> (Symbol, Address) {
    (STAKER, staker.clone())
}

/// Loads the account of `staker`, or a zero-valued one if it never staked.
pub fn load_account(env: &Env, staker: &Address) -> StakerAccount {
    let key = staker_key(staker);
    match env.storage().persistent().get(&key) {
        Some(account) => {
            env.storage()
                .persistent()
                .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
            account
        }
        None => StakerAccount::empty(env),
    }
}

pub fn store_account(env: &Env, staker: &Address, account: &StakerAccount) {
    let key = staker_key(staker);
    env.storage().persistent().set(&key, account);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
