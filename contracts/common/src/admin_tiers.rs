use soroban_sdk::{contracttype, Address, Env, Vec};

// ── Storage Keys ─────────────────────────────────────────────────────────────

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
enum AdminKey {
    Tier(Address),
    SuperAdmin,
    Roster,
}

// ── Admin Tier Enum ──────────────────────────────────────────────────────────

/// Three-tier admin hierarchy guarding the staking suite.
///
/// - `SuperAdmin`    – Owns the contract: transfers ownership and
///                     promotes/demotes other admins.
/// - `ContractAdmin` – Tunes staking parameters, the distributor and the
///                     protocol-member set.
/// - `OperatorAdmin` – Can only pause and unpause staker operations.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum AdminTier {
    OperatorAdmin = 1,
    ContractAdmin = 2,
    SuperAdmin = 3,
}

impl AdminTier {
    /// Returns true if this tier is at least as high as `min_tier`.
    pub fn has_at_least(&self, min_tier: &AdminTier) -> bool {
        (*self as u32) >= (*min_tier as u32)
    }
}

fn extend_ttl(env: &Env, key: &AdminKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Core Functions ───────────────────────────────────────────────────────────

/// Assigns an admin tier to the given address and adds it to the roster.
/// Callers must verify authorization beforehand.
pub fn set_admin_tier(env: &Env, admin: &Address, tier: AdminTier) {
    let key = AdminKey::Tier(admin.clone());
    env.storage().persistent().set(&key, &tier);
    extend_ttl(env, &key);

    let mut roster = list_admins(env);
    if !roster.contains(admin) {
        roster.push_back(admin.clone());
        env.storage().persistent().set(&AdminKey::Roster, &roster);
    }
}

/// Retrieves the admin tier of a given address, if any.
pub fn get_admin_tier(env: &Env, admin: &Address) -> Option<AdminTier> {
    let key = AdminKey::Tier(admin.clone());
    let tier: Option<AdminTier> = env.storage().persistent().get(&key);
    if tier.is_some() {
        extend_ttl(env, &key);
    }
    tier
}

/// Removes the admin tier from a given address and drops it from the roster.
pub fn remove_admin_tier(env: &Env, admin: &Address) {
    env.storage()
        .persistent()
        .remove(&AdminKey::Tier(admin.clone()));

    let roster = list_admins(env);
    if let Some(idx) = roster.first_index_of(admin) {
        let mut roster = roster;
        roster.remove(idx);
        env.storage().persistent().set(&AdminKey::Roster, &roster);
    }
}

/// Returns `true` when `caller` holds at least `min_tier`.
pub fn require_tier(env: &Env, caller: &Address, min_tier: &AdminTier) -> bool {
    match get_admin_tier(env, caller) {
        Some(tier) => tier.has_at_least(min_tier),
        None => false,
    }
}

// ── SuperAdmin Registry ──────────────────────────────────────────────────────

/// Records the owner during initialization and grants it `SuperAdmin`.
pub fn set_super_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&AdminKey::SuperAdmin, admin);
    set_admin_tier(env, admin, AdminTier::SuperAdmin);
}

/// Returns the owner address, if set.
pub fn get_super_admin(env: &Env) -> Option<Address> {
    env.storage().instance().get(&AdminKey::SuperAdmin)
}

/// Hands ownership to `new_owner`: the previous owner loses every tier.
pub fn transfer_super_admin(env: &Env, new_owner: &Address) {
    if let Some(previous) = get_super_admin(env) {
        remove_admin_tier(env, &previous);
    }
    set_super_admin(env, new_owner);
}

// ── Promote / Demote ─────────────────────────────────────────────────────────

/// Promotes or assigns an admin to the specified tier.
///
/// Returns `false` if `caller` is not a `SuperAdmin`.
pub fn promote_admin(env: &Env, caller: &Address, target: &Address, tier: AdminTier) -> bool {
    if !require_tier(env, caller, &AdminTier::SuperAdmin) {
        return false;
    }
    set_admin_tier(env, target, tier);
    true
}

/// Removes an admin's tier entirely. The owner cannot be demoted.
///
/// Returns `false` if `caller` is not a `SuperAdmin` or `target` is the owner.
pub fn demote_admin(env: &Env, caller: &Address, target: &Address) -> bool {
    if !require_tier(env, caller, &AdminTier::SuperAdmin) {
        return false;
    }
    if get_super_admin(env).as_ref() == Some(target) {
        return false;
    }
    remove_admin_tier(env, target);
    true
}

/// Returns every address currently holding a tier.
pub fn list_admins(env: &Env) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&AdminKey::Roster)
        .unwrap_or(Vec::new(env))
}
