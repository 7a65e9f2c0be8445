//! Named on-chain address sets.
//!
//! A contract may keep several independent whitelists, each identified by a
//! short symbol (`PROTO` for protocol members allowed to stake on behalf of
//! others, `MINTERS` for accounts allowed to mint the loyalty token, ...).
//! Membership is a persistent flag per `(list, address)`; the member roster is
//! kept next to it so the set can be enumerated by views.

use soroban_sdk::{contracttype, Address, Env, Symbol, Vec};

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
enum WhitelistKey {
    Member(Symbol, Address),
    Roster(Symbol),
}

/// Returns `true` when `addr` belongs to `list`.
pub fn is_whitelisted(env: &Env, list: &Symbol, addr: &Address) -> bool {
    let key = WhitelistKey::Member(list.clone(), addr.clone());
    let member = env.storage().persistent().get(&key).unwrap_or(false);
    if member {
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    member
}

/// Adds `addr` to `list`. Returns `false` if it was already a member.
pub fn add_to_whitelist(env: &Env, list: &Symbol, addr: &Address) -> bool {
    if is_whitelisted(env, list, addr) {
        return false;
    }
    let key = WhitelistKey::Member(list.clone(), addr.clone());
    env.storage().persistent().set(&key, &true);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);

    let mut roster = whitelisted(env, list);
    roster.push_back(addr.clone());
    env.storage()
        .persistent()
        .set(&WhitelistKey::Roster(list.clone()), &roster);
    true
}

/// Removes `addr` from `list`. Returns `false` if it was not a member.
pub fn remove_from_whitelist(env: &Env, list: &Symbol, addr: &Address) -> bool {
    if !is_whitelisted(env, list, addr) {
        return false;
    }
    env.storage()
        .persistent()
        .remove(&WhitelistKey::Member(list.clone(), addr.clone()));

    let mut roster = whitelisted(env, list);
    if let Some(idx) = roster.first_index_of(addr) {
        roster.remove(idx);
    }
    env.storage()
        .persistent()
        .set(&WhitelistKey::Roster(list.clone()), &roster);
    true
}

/// Returns the members of `list` in insertion order.
pub fn whitelisted(env: &Env, list: &Symbol) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&WhitelistKey::Roster(list.clone()))
        .unwrap_or(Vec::new(env))
}
