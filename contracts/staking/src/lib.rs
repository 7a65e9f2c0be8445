#![no_std]

pub mod epoch;
pub mod errors;
pub mod events;
pub mod fixed_point;
pub mod ledger;
pub mod lifecycle;
pub mod pool;
pub mod rewards;

use common::admin_tiers::{self, AdminTier};
use common::whitelist;
use soroban_sdk::{
    contract, contractclient, contractimpl, contracttype, symbol_short, token, Address, Env,
    Symbol, Vec,
};

pub use epoch::EpochSnapshot;
pub use errors::{ContractError, ErrorCategory};
pub use ledger::{StakerAccount, UnstakingPeriod, Withdrawal};
pub use pool::{PoolState, StakingConfig};

// ── Storage key constants ────────────────────────────────────────────────────

const PENDING_ADMIN: Symbol = symbol_short!("PEND_ADM");
const STAKE_TOKEN: Symbol = symbol_short!("STK_TOK");
const LOYALTY_TOKEN: Symbol = symbol_short!("LYL_TOK");
const EPOCH_MANAGER: Symbol = symbol_short!("EPOCH_MGR");
const DISTRIBUTOR: Symbol = symbol_short!("DISTRIB");
const PAUSED: Symbol = symbol_short!("PAUSED");

// Whitelist of addresses allowed to stake on behalf of others.
const PROTOCOL_MEMBERS: Symbol = symbol_short!("PROTO");

const INSTANCE_TTL_THRESHOLD: u32 = 5184000;
const INSTANCE_TTL_EXTEND_TO: u32 = 10368000;

// ── Collaborators ────────────────────────────────────────────────────────────

/// Mint side of the loyalty token.
#[contractclient(name = "LoyaltyMintClient")]
pub trait LoyaltyMint {
    fn mint(env: Env, minter: Address, to: Address, amount: i128);
}

// ── Public-facing types (re-exported for test consumers) ─────────────────────

/// Primary and secondary reward amounts, pending or just paid.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardBalances {
    pub primary: i128,
    pub secondary: i128,
}

// State one lifecycle call works on: loaded, advanced to the current epoch and
// synced before anything is mutated.
struct Session {
    config: StakingConfig,
    pool: PoolState,
    at: EpochSnapshot,
    account: StakerAccount,
    eligible_before: i128,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingContract;

#[contractimpl]
impl StakingContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract.
    ///
    /// * `distributor`      – the only address allowed to call `handle_distribution`.
    /// * `epoch_manager`    – contract reporting the epoch length in seconds.
    /// * `stake_token`      – token staked and paid out as primary reward.
    /// * `loyalty_token`    – token minted as secondary reward; this contract
    ///   must be on its mint whitelist.
    /// * `protocol_members` – initial set allowed to stake on behalf of others.
    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
        env: Env,
        admin: Address,
        distributor: Address,
        epoch_manager: Address,
        stake_token: Address,
        loyalty_token: Address,
        protocol_members: Vec<Address>,
        config: StakingConfig,
    ) -> Result<(), ContractError> {
        if pool::has_config(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        config.validate()?;
        if stake_token == loyalty_token {
            return Err(ContractError::InvalidConfig);
        }

        let epoch_length = epoch::EpochClockClient::new(&env, &epoch_manager).get_epoch();
        if epoch_length == 0 {
            return Err(ContractError::InvalidEpochLength);
        }

        pool::store_config(&env, &config);
        pool::store_state(&env, &PoolState::genesis(&env, epoch_length));
        env.storage().instance().set(&DISTRIBUTOR, &distributor);
        env.storage().instance().set(&EPOCH_MANAGER, &epoch_manager);
        env.storage().instance().set(&STAKE_TOKEN, &stake_token);
        env.storage().instance().set(&LOYALTY_TOKEN, &loyalty_token);
        env.storage().instance().set(&PAUSED, &false);

        for member in protocol_members.iter() {
            whitelist::add_to_whitelist(&env, &PROTOCOL_MEMBERS, &member);
        }

        // Bootstrap the initializing admin as SuperAdmin in the tier system
        admin_tiers::set_super_admin(&env, &admin);

        events::publish_initialized(
            &env,
            admin,
            distributor,
            epoch_manager,
            stake_token,
            loyalty_token,
        );

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Lock `amount` for `unstaking_period` epochs.
    pub fn stake(
        env: Env,
        staker: Address,
        amount: i128,
        unstaking_period: u32,
    ) -> Result<(), ContractError> {
        Self::require_active(&env)?;
        staker.require_auth();
        Self::stake_for(&env, &staker, &staker, amount, unstaking_period, false)
    }

    /// Stake on behalf of `staker`, funded by `member`.
    ///
    /// The bucket-count limit does not apply to the beneficiary.
    pub fn protocol_member_stake(
        env: Env,
        member: Address,
        staker: Address,
        amount: i128,
        unstaking_period: u32,
    ) -> Result<(), ContractError> {
        Self::require_active(&env)?;
        member.require_auth();
        if !whitelist::is_whitelisted(&env, &PROTOCOL_MEMBERS, &member) {
            return Err(ContractError::NotProtocolMember);
        }
        Self::stake_for(&env, &member, &staker, amount, unstaking_period, true)
    }

    // ── Unstaking ───────────────────────────────────────────────────────────

    /// Queue `amount` from the bucket at `unstaking_period` for withdrawal.
    ///
    /// Returns the epoch at which it can be withdrawn.
    pub fn unstake(
        env: Env,
        staker: Address,
        amount: i128,
        unstaking_period: u32,
    ) -> Result<u64, ContractError> {
        Self::require_active(&env)?;
        staker.require_auth();

        let mut session = Self::open_session(&env, &staker)?;
        let withdrawal = lifecycle::unstake(
            &mut session.account,
            amount,
            unstaking_period,
            &session.config,
            &session.at,
        )?;
        Self::commit(&env, &staker, session)?;

        events::publish_unstaked(&env, staker, amount, unstaking_period, withdrawal.release_epoch);

        Ok(withdrawal.release_epoch)
    }

    /// Undo a pending withdrawal of exactly `amount` from `unstaking_period`.
    pub fn cancel_unstaking(
        env: Env,
        staker: Address,
        amount: i128,
        unstaking_period: u32,
    ) -> Result<(), ContractError> {
        Self::require_active(&env)?;
        staker.require_auth();

        let mut session = Self::open_session(&env, &staker)?;
        lifecycle::cancel_unstaking(
            &mut session.account,
            amount,
            unstaking_period,
            &session.config,
            &session.at,
        )?;
        Self::commit(&env, &staker, session)?;

        events::publish_unstaking_cancelled(&env, staker, amount, unstaking_period);

        Ok(())
    }

    /// Pay out every matured withdrawal. Returns the principal released.
    pub fn withdraw(env: Env, staker: Address) -> Result<i128, ContractError> {
        Self::require_active(&env)?;
        staker.require_auth();

        let mut session = Self::open_session(&env, &staker)?;
        let (amount, count) = lifecycle::withdraw(&mut session.account, &session.at)?;
        session.pool.total_locked_amount =
            fixed_point::checked_sub(session.pool.total_locked_amount, amount)?;
        Self::commit(&env, &staker, session)?;

        token::Client::new(&env, &Self::stake_token(&env)?).transfer(
            &env.current_contract_address(),
            &staker,
            &amount,
        );

        events::publish_withdrawn(&env, staker, amount, count);

        Ok(amount)
    }

    // ── Rewards ─────────────────────────────────────────────────────────────

    /// Restake the pending primary reward into the bucket at `unstaking_period`.
    pub fn compound(env: Env, staker: Address, unstaking_period: u32) -> Result<i128, ContractError> {
        Self::require_active(&env)?;
        staker.require_auth();

        let mut session = Self::open_session(&env, &staker)?;
        let amount = lifecycle::compound(&mut session.account, unstaking_period, &session.config)?;
        session.pool.total_locked_amount =
            fixed_point::checked_add(session.pool.total_locked_amount, amount)?;
        Self::commit(&env, &staker, session)?;

        events::publish_compounded(&env, staker, amount, unstaking_period);

        Ok(amount)
    }

    /// Pay out the selected reward streams.
    ///
    /// Primary reward is transferred in the stake token; secondary reward is
    /// minted in the loyalty token.
    pub fn claim_rewards(
        env: Env,
        staker: Address,
        claim_primary: bool,
        claim_secondary: bool,
    ) -> Result<RewardBalances, ContractError> {
        Self::require_active(&env)?;
        staker.require_auth();

        if !claim_primary && !claim_secondary {
            return Err(ContractError::NothingRequested);
        }

        let mut session = Self::open_session(&env, &staker)?;
        let primary = if claim_primary {
            session.account.pending_primary_reward
        } else {
            0
        };
        let secondary = if claim_secondary {
            session.account.pending_secondary_reward
        } else {
            0
        };
        if (claim_primary && primary <= 0) || (claim_secondary && secondary <= 0) {
            return Err(ContractError::NothingToClaim);
        }
        if claim_primary {
            session.account.pending_primary_reward = 0;
        }
        if claim_secondary {
            session.account.pending_secondary_reward = 0;
        }
        Self::commit(&env, &staker, session)?;

        if primary > 0 {
            token::Client::new(&env, &Self::stake_token(&env)?).transfer(
                &env.current_contract_address(),
                &staker,
                &primary,
            );
        }
        if secondary > 0 {
            let loyalty: Address = env
                .storage()
                .instance()
                .get(&LOYALTY_TOKEN)
                .ok_or(ContractError::NotInitialized)?;
            LoyaltyMintClient::new(&env, &loyalty).mint(
                &env.current_contract_address(),
                &staker,
                &secondary,
            );
        }

        events::publish_rewards_claimed(&env, staker, primary, secondary);

        Ok(RewardBalances { primary, secondary })
    }

    /// Move the whole bucket at `old_period` to the longer `new_period`.
    pub fn increase_unstaking_period(
        env: Env,
        staker: Address,
        old_period: u32,
        new_period: u32,
    ) -> Result<(), ContractError> {
        Self::require_active(&env)?;
        staker.require_auth();

        let mut session = Self::open_session(&env, &staker)?;
        let moved = lifecycle::increase_unstaking_period(
            &mut session.account,
            old_period,
            new_period,
            &session.config,
            &session.at,
        )?;
        Self::commit(&env, &staker, session)?;

        events::publish_period_increased(&env, staker, old_period, new_period, moved);

        Ok(())
    }

    // ── Distribution ────────────────────────────────────────────────────────

    /// Account for `amount` primary reward already transferred to this contract.
    ///
    /// With no eligible stake the amount is sent back to the distributor and
    /// the index is left untouched. Works while paused.
    pub fn handle_distribution(
        env: Env,
        distributor: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        distributor.require_auth();
        if distributor != Self::get_distributor(env.clone())? {
            return Err(ContractError::Unauthorized);
        }
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        let mut state = pool::load_state(&env)?;
        if state.total_eligible_amount == 0 {
            token::Client::new(&env, &Self::stake_token(&env)?).transfer(
                &env.current_contract_address(),
                &distributor,
                &amount,
            );
            events::publish_distribution_refunded(&env, distributor, amount);
            return Ok(());
        }

        let increment = rewards::index_increment(amount, state.total_eligible_amount)?;
        state.global_reward_index = fixed_point::checked_add(state.global_reward_index, increment)?;
        state.total_distributed = fixed_point::checked_add(state.total_distributed, amount)?;
        pool::store_state(&env, &state);

        events::publish_distribution(
            &env,
            distributor,
            amount,
            state.global_reward_index,
            state.total_eligible_amount,
        );

        Ok(())
    }

    /// Distributors probe this before registering the contract as a handler.
    pub fn supports_distributions(_env: Env) -> bool {
        true
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// The staker's ledger as the next write would see it.
    pub fn get_staker_info(env: Env, staker: Address) -> Result<StakerAccount, ContractError> {
        Ok(Self::synced_view(&env, &staker)?.account)
    }

    pub fn get_pending_rewards(env: Env, staker: Address) -> Result<RewardBalances, ContractError> {
        let account = Self::synced_view(&env, &staker)?.account;
        Ok(RewardBalances {
            primary: account.pending_primary_reward,
            secondary: account.pending_secondary_reward,
        })
    }

    pub fn get_pool_info(env: Env) -> Result<PoolState, ContractError> {
        pool::load_state(&env)
    }

    pub fn get_config(env: Env) -> Result<StakingConfig, ContractError> {
        pool::load_config(&env)
    }

    /// Epoch number at the current ledger time.
    pub fn get_current_epoch(env: Env) -> Result<u64, ContractError> {
        let mut state = pool::load_state(&env)?;
        let clock = Self::epoch_manager(&env)?;
        Ok(epoch::advance(&env, &clock, &mut state.epoch_cursor)?.current_epoch)
    }

    pub fn is_protocol_member(env: Env, member: Address) -> bool {
        whitelist::is_whitelisted(&env, &PROTOCOL_MEMBERS, &member)
    }

    pub fn protocol_members(env: Env) -> Vec<Address> {
        whitelist::whitelisted(&env, &PROTOCOL_MEMBERS)
    }

    pub fn get_distributor(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&DISTRIBUTOR)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn get_stake_token(env: Env) -> Result<Address, ContractError> {
        Self::stake_token(&env)
    }

    pub fn get_loyalty_token(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&LOYALTY_TOKEN)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn get_epoch_manager(env: Env) -> Result<Address, ContractError> {
        Self::epoch_manager(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        pool::has_config(&env)
    }

    pub fn is_paused(env: Env) -> bool {
        env.storage().instance().get(&PAUSED).unwrap_or(false)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        admin_tiers::get_super_admin(&env).ok_or(ContractError::NotInitialized)
    }

    // ── Configuration ────────────────────────────────────────────────────────

    /// Replace the whole configuration. Applies to future computations only.
    ///
    /// Requires at least `ContractAdmin` tier.
    pub fn set_config(env: Env, caller: Address, config: StakingConfig) -> Result<(), ContractError> {
        Self::update_config(&env, &caller, |cfg| *cfg = config)
    }

    pub fn set_min_stake_amount(env: Env, caller: Address, amount: i128) -> Result<(), ContractError> {
        Self::update_config(&env, &caller, |cfg| cfg.min_stake_amount = amount)
    }

    pub fn set_min_unstaking_period(env: Env, caller: Address, period: u32) -> Result<(), ContractError> {
        Self::update_config(&env, &caller, |cfg| cfg.min_unstaking_period = period)
    }

    pub fn set_max_unstaking_period(env: Env, caller: Address, period: u32) -> Result<(), ContractError> {
        Self::update_config(&env, &caller, |cfg| cfg.max_unstaking_period = period)
    }

    pub fn set_max_periods_per_staker(env: Env, caller: Address, limit: u32) -> Result<(), ContractError> {
        Self::update_config(&env, &caller, |cfg| cfg.max_periods_per_staker = limit)
    }

    pub fn set_max_withdrawals_per_period(
        env: Env,
        caller: Address,
        limit: u32,
    ) -> Result<(), ContractError> {
        Self::update_config(&env, &caller, |cfg| cfg.max_withdrawals_per_period = limit)
    }

    pub fn set_base_eligibility(env: Env, caller: Address, fraction: i128) -> Result<(), ContractError> {
        Self::update_config(&env, &caller, |cfg| cfg.base_eligibility_fraction = fraction)
    }

    pub fn set_withdrawal_eligibility(
        env: Env,
        caller: Address,
        fraction: i128,
    ) -> Result<(), ContractError> {
        Self::update_config(&env, &caller, |cfg| cfg.withdrawal_eligible_fraction = fraction)
    }

    pub fn set_withdrawal_secondary(
        env: Env,
        caller: Address,
        fraction: i128,
    ) -> Result<(), ContractError> {
        Self::update_config(&env, &caller, |cfg| cfg.withdrawal_secondary_fraction = fraction)
    }

    pub fn set_secondary_base_rate(env: Env, caller: Address, rate: i128) -> Result<(), ContractError> {
        Self::update_config(&env, &caller, |cfg| cfg.secondary_base_rate = rate)
    }

    pub fn set_secondary_multiplier(
        env: Env,
        caller: Address,
        multiplier: u32,
    ) -> Result<(), ContractError> {
        Self::update_config(&env, &caller, |cfg| cfg.secondary_bonus_multiplier = multiplier)
    }

    /// Requires at least `ContractAdmin` tier.
    pub fn set_distributor(
        env: Env,
        caller: Address,
        distributor: Address,
    ) -> Result<(), ContractError> {
        Self::require_admin_tier(&env, &caller, &AdminTier::ContractAdmin)?;
        let previous = Self::get_distributor(env.clone())?;
        env.storage().instance().set(&DISTRIBUTOR, &distributor);

        events::publish_distributor_set(&env, previous, distributor);

        Ok(())
    }

    /// Requires at least `ContractAdmin` tier.
    pub fn add_protocol_member(
        env: Env,
        caller: Address,
        member: Address,
    ) -> Result<(), ContractError> {
        Self::require_admin_tier(&env, &caller, &AdminTier::ContractAdmin)?;
        if !whitelist::add_to_whitelist(&env, &PROTOCOL_MEMBERS, &member) {
            return Err(ContractError::ProtocolMemberExists);
        }

        events::publish_protocol_member_added(&env, member, caller);

        Ok(())
    }

    /// Requires at least `ContractAdmin` tier.
    pub fn remove_protocol_member(
        env: Env,
        caller: Address,
        member: Address,
    ) -> Result<(), ContractError> {
        Self::require_admin_tier(&env, &caller, &AdminTier::ContractAdmin)?;
        if !whitelist::remove_from_whitelist(&env, &PROTOCOL_MEMBERS, &member) {
            return Err(ContractError::ProtocolMemberNotFound);
        }

        events::publish_protocol_member_removed(&env, member, caller);

        Ok(())
    }

    // ── Pause ────────────────────────────────────────────────────────────────

    /// Block every staker operation. Views, admin calls and distributions
    /// stay available.
    ///
    /// Requires at least `OperatorAdmin` tier.
    pub fn pause(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_admin_tier(&env, &caller, &AdminTier::OperatorAdmin)?;
        env.storage().instance().set(&PAUSED, &true);
        events::publish_paused(&env, caller);
        Ok(())
    }

    /// Requires at least `OperatorAdmin` tier.
    pub fn unpause(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_admin_tier(&env, &caller, &AdminTier::OperatorAdmin)?;
        env.storage().instance().set(&PAUSED, &false);
        events::publish_unpaused(&env, caller);
        Ok(())
    }

    // ── Admin transfer (two-step) ──────────────────────────────────────────

    /// Propose a new admin address. Only the current admin can call this.
    /// The new admin must call `accept_admin` to complete the transfer.
    pub fn propose_admin(
        env: Env,
        current_admin: Address,
        new_admin: Address,
    ) -> Result<(), ContractError> {
        Self::require_owner(&env, &current_admin)?;

        env.storage().instance().set(&PENDING_ADMIN, &new_admin);

        events::publish_admin_transfer_proposed(&env, current_admin, new_admin);

        Ok(())
    }

    /// Accept the pending admin transfer. Only the proposed new admin can call this.
    pub fn accept_admin(env: Env, new_admin: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        new_admin.require_auth();

        let pending: Address = env
            .storage()
            .instance()
            .get(&PENDING_ADMIN)
            .ok_or(ContractError::NoPendingAdmin)?;

        if new_admin != pending {
            return Err(ContractError::Unauthorized);
        }

        let old_admin = Self::get_admin(env.clone())?;
        admin_tiers::transfer_super_admin(&env, &new_admin);
        env.storage().instance().remove(&PENDING_ADMIN);

        events::publish_admin_transfer_accepted(&env, old_admin, new_admin);

        Ok(())
    }

    /// Cancel a pending admin transfer. Only the current admin can call this.
    pub fn cancel_admin_transfer(env: Env, current_admin: Address) -> Result<(), ContractError> {
        Self::require_owner(&env, &current_admin)?;

        let pending: Address = env
            .storage()
            .instance()
            .get(&PENDING_ADMIN)
            .ok_or(ContractError::NoPendingAdmin)?;

        env.storage().instance().remove(&PENDING_ADMIN);

        events::publish_admin_transfer_cancelled(&env, current_admin, pending);

        Ok(())
    }

    /// Get the pending admin address, if any.
    pub fn get_pending_admin(env: Env) -> Option<Address> {
        env.storage().instance().get(&PENDING_ADMIN)
    }

    // ── Admin tier management ────────────────────────────────────────────────

    /// Promotes or assigns a target address to the specified admin tier.
    ///
    /// Only a `SuperAdmin` may call this.
    pub fn promote_admin(
        env: Env,
        caller: Address,
        target: Address,
        tier: AdminTier,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        if !admin_tiers::promote_admin(&env, &caller, &target, tier) {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    /// Removes the admin tier from the target address entirely.
    ///
    /// Only a `SuperAdmin` may call this; the owner cannot be demoted.
    pub fn demote_admin(env: Env, caller: Address, target: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        if !admin_tiers::demote_admin(&env, &caller, &target) {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    /// Returns the admin tier of the given address, if any.
    pub fn get_admin_tier(env: Env, admin: Address) -> Option<AdminTier> {
        admin_tiers::get_admin_tier(&env, &admin)
    }

    pub fn list_admins(env: Env) -> Vec<Address> {
        admin_tiers::list_admins(&env)
    }
}

// ── Internal helpers ─────────────────────────────────────────────────────────

impl StakingContract {
    /// Guard: revert if the contract is not yet initialized.
    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !pool::has_config(env) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    /// Guard for staker operations: initialized and not paused.
    fn require_active(env: &Env) -> Result<(), ContractError> {
        Self::require_initialized(env)?;
        if env.storage().instance().get(&PAUSED).unwrap_or(false) {
            return Err(ContractError::Paused);
        }
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND_TO);
        Ok(())
    }

    fn require_owner(env: &Env, caller: &Address) -> Result<(), ContractError> {
        Self::require_initialized(env)?;
        caller.require_auth();
        if admin_tiers::get_super_admin(env).as_ref() != Some(caller) {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    /// Guard: revert if `caller` does not hold at least `min_tier`.
    fn require_admin_tier(
        env: &Env,
        caller: &Address,
        min_tier: &AdminTier,
    ) -> Result<(), ContractError> {
        Self::require_initialized(env)?;
        caller.require_auth();
        if !admin_tiers::require_tier(env, caller, min_tier) {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    fn update_config<F>(env: &Env, caller: &Address, apply: F) -> Result<(), ContractError>
    where
        F: FnOnce(&mut StakingConfig),
    {
        Self::require_admin_tier(env, caller, &AdminTier::ContractAdmin)?;
        let mut config = pool::load_config(env)?;
        apply(&mut config);
        config.validate()?;
        pool::store_config(env, &config);

        events::publish_config_updated(env, caller.clone(), config);

        Ok(())
    }

    fn stake_token(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&STAKE_TOKEN)
            .ok_or(ContractError::NotInitialized)
    }

    fn epoch_manager(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&EPOCH_MANAGER)
            .ok_or(ContractError::NotInitialized)
    }

    /// Loads everything a staker operation needs and syncs the account.
    fn open_session(env: &Env, staker: &Address) -> Result<Session, ContractError> {
        let config = pool::load_config(env)?;
        let mut pool = pool::load_state(env)?;
        let clock = Self::epoch_manager(env)?;
        let at = epoch::advance(env, &clock, &mut pool.epoch_cursor)?;

        let mut account = ledger::load_account(env, staker);
        rewards::sync_account(&mut account, &pool, &config, &at)?;
        let eligible_before = account.total_eligible()?;

        Ok(Session {
            config,
            pool,
            at,
            account,
            eligible_before,
        })
    }

    /// Folds the account's eligibility change into the pool and persists both.
    fn commit(env: &Env, staker: &Address, session: Session) -> Result<(), ContractError> {
        let Session {
            mut pool,
            account,
            eligible_before,
            ..
        } = session;
        let eligible_after = account.total_eligible()?;
        pool.total_eligible_amount = fixed_point::checked_add(
            fixed_point::checked_sub(pool.total_eligible_amount, eligible_before)?,
            eligible_after,
        )?;
        ledger::store_account(env, staker, &account);
        pool::store_state(env, &pool);
        Ok(())
    }

    /// Synced copy of a staker's ledger; nothing is written.
    fn synced_view(env: &Env, staker: &Address) -> Result<Session, ContractError> {
        Self::require_initialized(env)?;
        Self::open_session(env, staker)
    }

    fn stake_for(
        env: &Env,
        funder: &Address,
        staker: &Address,
        amount: i128,
        unstaking_period: u32,
        bypass_limit: bool,
    ) -> Result<(), ContractError> {
        let mut session = Self::open_session(env, staker)?;
        let locked_after = lifecycle::stake(
            &mut session.account,
            amount,
            unstaking_period,
            &session.config,
            &session.at,
            bypass_limit,
        )?;
        session.pool.total_locked_amount =
            fixed_point::checked_add(session.pool.total_locked_amount, amount)?;
        let epoch = session.at.current_epoch;
        Self::commit(env, staker, session)?;

        token::Client::new(env, &Self::stake_token(env)?).transfer(
            funder,
            &env.current_contract_address(),
            &amount,
        );

        events::publish_staked(
            env,
            staker.clone(),
            funder.clone(),
            amount,
            unstaking_period,
            locked_after,
            epoch,
        );

        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_admin;
