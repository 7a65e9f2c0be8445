#![no_std]
#![allow(deprecated)] // events().publish migration tracked separately

//! Loyalty reward token.
//!
//! A non-transferable balance ledger: only whitelisted minters (the staking
//! contract) can create tokens, holders can burn their own balance, and every
//! peer-to-peer transfer is rejected.

use common::whitelist;
use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, symbol_short, Address, Env, String,
    Symbol, Vec,
};

const OWNER: Symbol = symbol_short!("OWNER");
const NAME: Symbol = symbol_short!("NAME");
const SYMBOL: Symbol = symbol_short!("SYMBOL");
const DECIMALS: Symbol = symbol_short!("DECIMALS");
const TOTAL_SUPPLY: Symbol = symbol_short!("TOT_SUP");
const MINTERS: Symbol = symbol_short!("MINTERS");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
enum DataKey {
    Balance(Address),
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    AccessDenied = 10,
    InvalidAmount = 30,
    Overflow = 31,
    NotWhitelisted = 100,
    TransferDisabled = 101,
    InsufficientBalance = 102,
    AlreadyWhitelisted = 103,
}

#[contract]
pub struct LoyaltyTokenContract;

#[contractimpl]
impl LoyaltyTokenContract {
    pub fn initialize(
        env: Env,
        owner: Address,
        decimals: u32,
        name: String,
        symbol: String,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&OWNER) {
            return Err(ContractError::AlreadyInitialized);
        }
        env.storage().instance().set(&OWNER, &owner);
        env.storage().instance().set(&DECIMALS, &decimals);
        env.storage().instance().set(&NAME, &name);
        env.storage().instance().set(&SYMBOL, &symbol);
        env.storage().instance().set(&TOTAL_SUPPLY, &0i128);
        Ok(())
    }

    // ── Minter whitelist ────────────────────────────────────────────────────

    pub fn whitelist_address(env: Env, owner: Address, minter: Address) -> Result<(), ContractError> {
        Self::require_owner(&env, &owner)?;
        if !whitelist::add_to_whitelist(&env, &MINTERS, &minter) {
            return Err(ContractError::AlreadyWhitelisted);
        }
        Ok(())
    }

    pub fn remove_whitelisted(env: Env, owner: Address, minter: Address) -> Result<(), ContractError> {
        Self::require_owner(&env, &owner)?;
        if !whitelist::remove_from_whitelist(&env, &MINTERS, &minter) {
            return Err(ContractError::NotWhitelisted);
        }
        Ok(())
    }

    pub fn is_whitelisted(env: Env, minter: Address) -> bool {
        whitelist::is_whitelisted(&env, &MINTERS, &minter)
    }

    pub fn minters(env: Env) -> Vec<Address> {
        whitelist::whitelisted(&env, &MINTERS)
    }

    // ── Supply ──────────────────────────────────────────────────────────────

    /// Mint `amount` to `to`. `minter` must be whitelisted.
    pub fn mint(env: Env, minter: Address, to: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        minter.require_auth();
        if !whitelist::is_whitelisted(&env, &MINTERS, &minter) {
            return Err(ContractError::NotWhitelisted);
        }
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        let balance = Self::balance(env.clone(), to.clone())
            .checked_add(amount)
            .ok_or(ContractError::Overflow)?;
        let supply = Self::total_supply(env.clone())
            .checked_add(amount)
            .ok_or(ContractError::Overflow)?;
        Self::write_balance(&env, &to, balance);
        env.storage().instance().set(&TOTAL_SUPPLY, &supply);

        env.events()
            .publish((symbol_short!("MINT"), minter, to), amount);
        Ok(())
    }

    /// Burn `amount` from the caller's own balance.
    pub fn burn(env: Env, from: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        from.require_auth();
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        let balance = Self::balance(env.clone(), from.clone());
        if balance < amount {
            return Err(ContractError::InsufficientBalance);
        }

        Self::write_balance(&env, &from, balance - amount);
        let supply = Self::total_supply(env.clone());
        env.storage()
            .instance()
            .set(&TOTAL_SUPPLY, &supply.saturating_sub(amount));

        env.events().publish((symbol_short!("BURN"), from), amount);
        Ok(())
    }

    pub fn transfer(_env: Env, _from: Address, _to: Address, _amount: i128) -> Result<(), ContractError> {
        Err(ContractError::TransferDisabled)
    }

    pub fn transfer_from(
        _env: Env,
        _spender: Address,
        _from: Address,
        _to: Address,
        _amount: i128,
    ) -> Result<(), ContractError> {
        Err(ContractError::TransferDisabled)
    }

    // ── Views ───────────────────────────────────────────────────────────────

    pub fn balance(env: Env, id: Address) -> i128 {
        let key = DataKey::Balance(id);
        let balance = env.storage().persistent().get(&key).unwrap_or(0);
        if balance > 0 {
            env.storage()
                .persistent()
                .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
        }
        balance
    }

    pub fn total_supply(env: Env) -> i128 {
        env.storage().instance().get(&TOTAL_SUPPLY).unwrap_or(0)
    }

    pub fn decimals(env: Env) -> u32 {
        env.storage().instance().get(&DECIMALS).unwrap_or(7)
    }

    pub fn name(env: Env) -> String {
        env.storage()
            .instance()
            .get(&NAME)
            .unwrap_or(String::from_str(&env, ""))
    }

    pub fn symbol(env: Env) -> String {
        env.storage()
            .instance()
            .get(&SYMBOL)
            .unwrap_or(String::from_str(&env, ""))
    }

    pub fn set_name(env: Env, owner: Address, name: String) -> Result<(), ContractError> {
        Self::require_owner(&env, &owner)?;
        env.storage().instance().set(&NAME, &name);
        Ok(())
    }

    pub fn set_symbol(env: Env, owner: Address, symbol: String) -> Result<(), ContractError> {
        Self::require_owner(&env, &owner)?;
        env.storage().instance().set(&SYMBOL, &symbol);
        Ok(())
    }

    // ── Internal helpers ────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&OWNER) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    fn require_owner(env: &Env, caller: &Address) -> Result<(), ContractError> {
        caller.require_auth();
        let owner: Address = env
            .storage()
            .instance()
            .get(&OWNER)
            .ok_or(ContractError::NotInitialized)?;
        if owner != *caller {
            return Err(ContractError::AccessDenied);
        }
        Ok(())
    }

    fn write_balance(env: &Env, id: &Address, amount: i128) {
        let key = DataKey::Balance(id.clone());
        env.storage().persistent().set(&key, &amount);
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
}
