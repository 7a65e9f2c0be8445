#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

use crate::pool::StakingConfig;

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub distributor: Address,
    pub epoch_manager: Address,
    pub stake_token: Address,
    pub loyalty_token: Address,
    pub timestamp: u64,
}

/// Fired when principal enters a bucket, directly or through a protocol member.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub staker: Address,
    pub funder: Address,
    pub amount: i128,
    pub unstaking_period: u32,
    pub locked_after: i128,
    pub epoch: u64,
    pub timestamp: u64,
}

/// Fired when principal moves from a bucket into the withdrawal queue.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakedEvent {
    pub staker: Address,
    pub amount: i128,
    pub unstaking_period: u32,
    pub release_epoch: u64,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakingCancelledEvent {
    pub staker: Address,
    pub amount: i128,
    pub unstaking_period: u32,
    pub timestamp: u64,
}

/// Fired when matured withdrawals are paid out.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawnEvent {
    pub staker: Address,
    pub amount: i128,
    pub released_count: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompoundedEvent {
    pub staker: Address,
    pub amount: i128,
    pub unstaking_period: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsClaimedEvent {
    pub staker: Address,
    pub primary: i128,
    pub secondary: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PeriodIncreasedEvent {
    pub staker: Address,
    pub old_period: u32,
    pub new_period: u32,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when a distribution raises the global reward index.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DistributionEvent {
    pub distributor: Address,
    pub amount: i128,
    pub global_reward_index: i128,
    pub total_eligible_amount: i128,
    pub timestamp: u64,
}

/// Fired when a distribution finds no eligible stake and is sent back.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DistributionRefundedEvent {
    pub distributor: Address,
    pub amount: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigUpdatedEvent {
    pub caller: Address,
    pub config: StakingConfig,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DistributorSetEvent {
    pub previous: Address,
    pub distributor: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProtocolMemberEvent {
    pub member: Address,
    pub caller: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauseEvent {
    pub caller: Address,
    pub timestamp: u64,
}

/// Fired when an admin transfer is proposed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferProposedEvent {
    pub current_admin: Address,
    pub proposed_admin: Address,
    pub timestamp: u64,
}

/// Fired when an admin transfer is accepted.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferAcceptedEvent {
    pub old_admin: Address,
    pub new_admin: Address,
    pub timestamp: u64,
}

/// Fired when a pending admin transfer is cancelled.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferCancelledEvent {
    pub admin: Address,
    pub cancelled_proposed: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    admin: Address,
    distributor: Address,
    epoch_manager: Address,
    stake_token: Address,
    loyalty_token: Address,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            distributor,
            epoch_manager,
            stake_token,
            loyalty_token,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_staked(
    env: &Env,
    staker: Address,
    funder: Address,
    amount: i128,
    unstaking_period: u32,
    locked_after: i128,
    epoch: u64,
) {
    env.events().publish(
        (symbol_short!("STAKED"), staker.clone()),
        StakedEvent {
            staker,
            funder,
            amount,
            unstaking_period,
            locked_after,
            epoch,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_unstaked(
    env: &Env,
    staker: Address,
    amount: i128,
    unstaking_period: u32,
    release_epoch: u64,
) {
    env.events().publish(
        (symbol_short!("UNSTAKED"), staker.clone()),
        UnstakedEvent {
            staker,
            amount,
            unstaking_period,
            release_epoch,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_unstaking_cancelled(env: &Env, staker: Address, amount: i128, unstaking_period: u32) {
    env.events().publish(
        (symbol_short!("UNSTK_CNL"), staker.clone()),
        UnstakingCancelledEvent {
            staker,
            amount,
            unstaking_period,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdrawn(env: &Env, staker: Address, amount: i128, released_count: u32) {
    env.events().publish(
        (symbol_short!("WITHDRAWN"), staker.clone()),
        WithdrawnEvent {
            staker,
            amount,
            released_count,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_compounded(env: &Env, staker: Address, amount: i128, unstaking_period: u32) {
    env.events().publish(
        (symbol_short!("COMPOUND"), staker.clone()),
        CompoundedEvent {
            staker,
            amount,
            unstaking_period,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_rewards_claimed(env: &Env, staker: Address, primary: i128, secondary: i128) {
    env.events().publish(
        (symbol_short!("CLMD"), staker.clone()),
        RewardsClaimedEvent {
            staker,
            primary,
            secondary,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_period_increased(
    env: &Env,
    staker: Address,
    old_period: u32,
    new_period: u32,
    amount: i128,
) {
    env.events().publish(
        (symbol_short!("PERIOD_UP"), staker.clone()),
        PeriodIncreasedEvent {
            staker,
            old_period,
            new_period,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_distribution(
    env: &Env,
    distributor: Address,
    amount: i128,
    global_reward_index: i128,
    total_eligible_amount: i128,
) {
    env.events().publish(
        (symbol_short!("DISTRIB"),),
        DistributionEvent {
            distributor,
            amount,
            global_reward_index,
            total_eligible_amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_distribution_refunded(env: &Env, distributor: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("DIST_RFND"),),
        DistributionRefundedEvent {
            distributor,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_config_updated(env: &Env, caller: Address, config: StakingConfig) {
    env.events().publish(
        (symbol_short!("CFG_UPD"),),
        ConfigUpdatedEvent {
            caller,
            config,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_distributor_set(env: &Env, previous: Address, distributor: Address) {
    env.events().publish(
        (symbol_short!("DISTR_SET"),),
        DistributorSetEvent {
            previous,
            distributor,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_protocol_member_added(env: &Env, member: Address, caller: Address) {
    env.events().publish(
        (symbol_short!("PM_ADD"), member.clone()),
        ProtocolMemberEvent {
            member,
            caller,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_protocol_member_removed(env: &Env, member: Address, caller: Address) {
    env.events().publish(
        (symbol_short!("PM_RM"), member.clone()),
        ProtocolMemberEvent {
            member,
            caller,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_paused(env: &Env, caller: Address) {
    env.events().publish(
        (symbol_short!("PAUSED"),),
        PauseEvent {
            caller,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_unpaused(env: &Env, caller: Address) {
    env.events().publish(
        (symbol_short!("UNPAUSED"),),
        PauseEvent {
            caller,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_proposed(env: &Env, current_admin: Address, proposed_admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_PROP"), current_admin.clone()),
        AdminTransferProposedEvent {
            current_admin,
            proposed_admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_accepted(env: &Env, old_admin: Address, new_admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_ACPT"), new_admin.clone()),
        AdminTransferAcceptedEvent {
            old_admin,
            new_admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_cancelled(env: &Env, admin: Address, cancelled_proposed: Address) {
    env.events().publish(
        (symbol_short!("ADM_CNCL"), admin.clone()),
        AdminTransferCancelledEvent {
            admin,
            cancelled_proposed,
            timestamp: env.ledger().timestamp(),
        },
    );
}
