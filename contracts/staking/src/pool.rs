//! Process-wide pool state and the staking configuration.
//!
//! Both live in instance storage: a single [`StakingConfig`] written by admin
//! setters, and a single [`PoolState`] updated as an aggregate side effect of
//! every staker operation and distribution.

use soroban_sdk::{contracttype, symbol_short, Env, Symbol};

use crate::epoch::EpochCursor;
use crate::errors::ContractError;
use crate::fixed_point::SCALE;

const CONFIG: Symbol = symbol_short!("CONFIG");
const POOL: Symbol = symbol_short!("POOL");

/// Tunable parameters of the engine.
///
/// Fractions and rates are 18-decimal fixed point (`SCALE == 1.0`).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakingConfig {
    /// Smallest principal accepted by a single stake.
    pub min_stake_amount: i128,
    /// Shortest commitment, in epochs.
    pub min_unstaking_period: u32,
    /// Longest commitment, in epochs.
    pub max_unstaking_period: u32,
    /// Distinct commitment buckets a staker may hold (protocol members bypass).
    pub max_periods_per_staker: u32,
    /// Queued withdrawals allowed per (staker, commitment length).
    pub max_withdrawals_per_period: u32,
    /// Eligible fraction of principal at the shortest commitment.
    pub base_eligibility_fraction: i128,
    /// Fraction of eligibility a withdrawal keeps while it matures.
    pub withdrawal_eligible_fraction: i128,
    /// Fraction of the bucket loyalty rate paid to a maturing withdrawal.
    pub withdrawal_secondary_fraction: i128,
    /// Annual loyalty accrual per unit of eligible amount.
    pub secondary_base_rate: i128,
    /// Multiplier of the base rate for eligibility above the base fraction.
    pub secondary_bonus_multiplier: u32,
}

impl StakingConfig {
    pub fn validate(&self) -> Result<(), ContractError> {
        let is_fraction = |f: i128| (0..=SCALE).contains(&f);

        if self.min_stake_amount <= 0
            || self.min_unstaking_period == 0
            || self.min_unstaking_period >= self.max_unstaking_period
            || self.max_periods_per_staker == 0
            || self.max_withdrawals_per_period == 0
            || !is_fraction(self.base_eligibility_fraction)
            || !is_fraction(self.withdrawal_eligible_fraction)
            || !is_fraction(self.withdrawal_secondary_fraction)
            || self.secondary_base_rate < 0
        {
            return Err(ContractError::InvalidConfig);
        }
        Ok(())
    }

    /// Rejects commitment lengths outside `[min, max]`.
    pub fn check_unstaking_period(&self, period: u32) -> Result<(), ContractError> {
        if period < self.min_unstaking_period || period > self.max_unstaking_period {
            return Err(ContractError::InvalidUnstakingPeriod);
        }
        Ok(())
    }
}

/// Aggregate ledger totals shared by all stakers.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolState {
    /// Sum of every bucket's and withdrawal's reward-eligible amount.
    pub total_eligible_amount: i128,
    /// Cumulative primary reward per unit of eligible amount, 18 decimals.
    pub global_reward_index: i128,
    /// Principal held for stakers, active and queued.
    pub total_locked_amount: i128,
    /// Primary reward accepted by distributions since genesis.
    pub total_distributed: i128,
    pub epoch_cursor: EpochCursor,
}

impl PoolState {
    pub fn genesis(env: &Env, epoch_length: u64) -> Self {
        PoolState {
            total_eligible_amount: 0,
            global_reward_index: 0,
            total_locked_amount: 0,
            total_distributed: 0,
            epoch_cursor: EpochCursor::genesis(env, epoch_length),
        }
    }
}

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&CONFIG)
}

pub fn load_config(env: &Env) -> Result<StakingConfig, ContractError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(ContractError::NotInitialized)
}

pub fn store_config(env: &Env, config: &StakingConfig) {
    env.storage().instance().set(&CONFIG, config);
}

pub fn load_state(env: &Env) -> Result<PoolState, ContractError> {
    env.storage()
        .instance()
        .get(&POOL)
        .ok_or(ContractError::NotInitialized)
}

pub fn store_state(env: &Env, state: &PoolState) {
    env.storage().instance().set(&POOL, state);
}

#[cfg(test)]
pub(crate) fn test_config() -> StakingConfig {
    StakingConfig {
        min_stake_amount: 1,
        min_unstaking_period: 14,
        max_unstaking_period: 365,
        max_periods_per_staker: 5,
        max_withdrawals_per_period: 6,
        base_eligibility_fraction: 740_000_000_000_000_000,
        withdrawal_eligible_fraction: 900_000_000_000_000_000,
        withdrawal_secondary_fraction: 500_000_000_000_000_000,
        secondary_base_rate: 300_000_000_000_000_000,
        secondary_bonus_multiplier: 10,
    }
}
