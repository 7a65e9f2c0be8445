#![no_std]
#![allow(deprecated)] // events().publish migration tracked separately

//! Epoch clock shared by the staking suite.
//!
//! Holds the length of one epoch in seconds. Consumers turn ledger time into
//! epoch numbers themselves; this contract only answers "how long is an epoch".

use common::CommonError;
use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, Symbol};

const OWNER: Symbol = symbol_short!("OWNER");
const EPOCH: Symbol = symbol_short!("EPOCH");

/// Epoch length used until the owner sets another one.
pub const DEFAULT_EPOCH_SECONDS: u64 = 86_400;

#[contract]
pub struct EpochManagerContract;

#[contractimpl]
impl EpochManagerContract {
    pub fn initialize(env: Env, owner: Address) -> Result<(), CommonError> {
        if env.storage().instance().has(&OWNER) {
            return Err(CommonError::AlreadyInitialized);
        }
        env.storage().instance().set(&OWNER, &owner);
        env.storage().instance().set(&EPOCH, &DEFAULT_EPOCH_SECONDS);
        Ok(())
    }

    /// Current epoch length in seconds.
    pub fn get_epoch(env: Env) -> u64 {
        env.storage()
            .instance()
            .get(&EPOCH)
            .unwrap_or(DEFAULT_EPOCH_SECONDS)
    }

    /// Change the epoch length. Only future epoch boundaries are affected.
    pub fn set_epoch(env: Env, owner: Address, seconds: u64) -> Result<(), CommonError> {
        owner.require_auth();
        let stored: Address = env
            .storage()
            .instance()
            .get(&OWNER)
            .ok_or(CommonError::NotInitialized)?;
        if stored != owner {
            return Err(CommonError::AccessDenied);
        }
        if seconds == 0 {
            return Err(CommonError::InvalidInput);
        }

        let previous = Self::get_epoch(env.clone());
        env.storage().instance().set(&EPOCH, &seconds);
        env.events()
            .publish((symbol_short!("EPOCH_SET"),), (previous, seconds));
        Ok(())
    }

    pub fn get_owner(env: Env) -> Result<Address, CommonError> {
        env.storage()
            .instance()
            .get(&OWNER)
            .ok_or(CommonError::NotInitialized)
    }
}
