extern crate std;

use common::admin_tiers::AdminTier;
use soroban_sdk::{testutils::Address as _, Address};

use crate::test::setup;
use crate::ContractError;

// ── SuperAdmin bootstrapped on initialize ────────────────────────────────────

#[test]
fn test_admin_is_super_admin_after_init() {
    let h = setup();
    assert_eq!(h.client.get_admin_tier(&h.admin), Some(AdminTier::SuperAdmin));
    assert_eq!(h.client.list_admins().len(), 1);
}

// ── SuperAdmin can promote and demote ────────────────────────────────────────

#[test]
fn test_super_admin_promotes_every_tier() {
    let h = setup();
    for tier in [
        AdminTier::OperatorAdmin,
        AdminTier::ContractAdmin,
        AdminTier::SuperAdmin,
    ] {
        let target = Address::generate(&h.env);
        h.client.promote_admin(&h.admin, &target, &tier);
        assert_eq!(h.client.get_admin_tier(&target), Some(tier));
    }
}

#[test]
fn test_super_admin_demotes_admin() {
    let h = setup();
    let target = Address::generate(&h.env);

    h.client.promote_admin(&h.admin, &target, &AdminTier::ContractAdmin);
    h.client.demote_admin(&h.admin, &target);
    assert_eq!(h.client.get_admin_tier(&target), None);
}

#[test]
fn test_owner_cannot_be_demoted() {
    let h = setup();
    let other_super = Address::generate(&h.env);
    h.client.promote_admin(&h.admin, &other_super, &AdminTier::SuperAdmin);

    let result = h.client.try_demote_admin(&other_super, &h.admin);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

// ── Lower tiers cannot promote/demote ────────────────────────────────────────

#[test]
fn test_contract_admin_cannot_promote() {
    let h = setup();
    let contract_admin = Address::generate(&h.env);
    let target = Address::generate(&h.env);

    h.client.promote_admin(&h.admin, &contract_admin, &AdminTier::ContractAdmin);

    let result = h
        .client
        .try_promote_admin(&contract_admin, &target, &AdminTier::OperatorAdmin);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

#[test]
fn test_operator_admin_cannot_demote() {
    let h = setup();
    let operator = Address::generate(&h.env);
    let target = Address::generate(&h.env);

    h.client.promote_admin(&h.admin, &operator, &AdminTier::OperatorAdmin);
    h.client.promote_admin(&h.admin, &target, &AdminTier::OperatorAdmin);

    let result = h.client.try_demote_admin(&operator, &target);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

// ── ContractAdmin tunes the engine ───────────────────────────────────────────

#[test]
fn test_contract_admin_can_set_config_fields() {
    let h = setup();
    let contract_admin = Address::generate(&h.env);
    h.client.promote_admin(&h.admin, &contract_admin, &AdminTier::ContractAdmin);

    h.client.set_max_periods_per_staker(&contract_admin, &8);
    h.client.set_max_withdrawals_per_period(&contract_admin, &3);
    h.client.set_base_eligibility(&contract_admin, &500_000_000_000_000_000);
    h.client.set_secondary_multiplier(&contract_admin, &4);

    let cfg = h.client.get_config();
    assert_eq!(cfg.max_periods_per_staker, 8);
    assert_eq!(cfg.max_withdrawals_per_period, 3);
    assert_eq!(cfg.base_eligibility_fraction, 500_000_000_000_000_000);
    assert_eq!(cfg.secondary_bonus_multiplier, 4);
}

#[test]
fn test_setters_validate() {
    let h = setup();

    assert_eq!(
        h.client
            .try_set_max_unstaking_period(&h.admin, &10)
            .unwrap_err()
            .unwrap(),
        ContractError::InvalidConfig
    );
    assert_eq!(
        h.client
            .try_set_withdrawal_secondary(&h.admin, &(2 * 1_000_000_000_000_000_000))
            .unwrap_err()
            .unwrap(),
        ContractError::InvalidConfig
    );
    assert_eq!(
        h.client
            .try_set_min_stake_amount(&h.admin, &0)
            .unwrap_err()
            .unwrap(),
        ContractError::InvalidConfig
    );
}

#[test]
fn test_config_changes_apply_prospectively() {
    let h = setup();
    let staker = h.funded_staker(2_000);
    h.client.stake(&staker, &1_000, &14);

    h.client.set_base_eligibility(&h.admin, &500_000_000_000_000_000);

    // the existing bucket keeps its eligible amount until it is touched
    let bucket = h.client.get_staker_info(&staker).unstaking_periods.get(0).unwrap();
    assert_eq!(bucket.reward_eligible_amount, 740);

    h.client.stake(&staker, &1_000, &14);
    let bucket = h.client.get_staker_info(&staker).unstaking_periods.get(0).unwrap();
    assert_eq!(bucket.reward_eligible_amount, 1_000);
    h.assert_conserved(&[staker]);
}

#[test]
fn test_protocol_member_management() {
    let h = setup();
    let member = Address::generate(&h.env);

    h.client.add_protocol_member(&h.admin, &member);
    assert!(h.client.is_protocol_member(&member));
    assert_eq!(
        h.client
            .try_add_protocol_member(&h.admin, &member)
            .unwrap_err()
            .unwrap(),
        ContractError::ProtocolMemberExists
    );

    h.client.remove_protocol_member(&h.admin, &member);
    assert!(!h.client.is_protocol_member(&member));
    assert_eq!(
        h.client
            .try_remove_protocol_member(&h.admin, &member)
            .unwrap_err()
            .unwrap(),
        ContractError::ProtocolMemberNotFound
    );
}

#[test]
fn test_set_distributor_moves_distribution_rights() {
    let h = setup();
    let next = Address::generate(&h.env);

    h.client.set_distributor(&h.admin, &next);
    assert_eq!(h.client.get_distributor(), next);
    assert_eq!(
        h.client
            .try_handle_distribution(&h.distributor, &10)
            .unwrap_err()
            .unwrap(),
        ContractError::Unauthorized
    );
}

// ── OperatorAdmin can only pause ─────────────────────────────────────────────

#[test]
fn test_operator_admin_can_pause() {
    let h = setup();
    let operator = Address::generate(&h.env);
    h.client.promote_admin(&h.admin, &operator, &AdminTier::OperatorAdmin);

    h.client.pause(&operator);
    assert!(h.client.is_paused());
    h.client.unpause(&operator);
    assert!(!h.client.is_paused());
}

#[test]
fn test_operator_admin_cannot_tune_config() {
    let h = setup();
    let operator = Address::generate(&h.env);
    h.client.promote_admin(&h.admin, &operator, &AdminTier::OperatorAdmin);

    let result = h.client.try_set_secondary_base_rate(&operator, &1);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    let result = h.client.try_add_protocol_member(&operator, &operator);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

// ── Non-admin cannot call any admin function ─────────────────────────────────

#[test]
fn test_non_admin_is_rejected() {
    let h = setup();
    let intruder = Address::generate(&h.env);

    assert_eq!(
        h.client.try_pause(&intruder).unwrap_err().unwrap(),
        ContractError::Unauthorized
    );
    assert_eq!(
        h.client
            .try_set_config(&intruder, &h.client.get_config())
            .unwrap_err()
            .unwrap(),
        ContractError::Unauthorized
    );
    assert_eq!(h.client.get_admin_tier(&intruder), None);
}

// ── Two-step ownership transfer ──────────────────────────────────────────────

#[test]
fn test_admin_transfer_two_step() {
    let h = setup();
    let next = Address::generate(&h.env);

    h.client.propose_admin(&h.admin, &next);
    assert_eq!(h.client.get_pending_admin(), Some(next.clone()));
    // nothing changes until accepted
    assert_eq!(h.client.get_admin(), h.admin);

    h.client.accept_admin(&next);
    assert_eq!(h.client.get_admin(), next);
    assert_eq!(h.client.get_pending_admin(), None);
    assert_eq!(h.client.get_admin_tier(&next), Some(AdminTier::SuperAdmin));
    assert_eq!(h.client.get_admin_tier(&h.admin), None);
}

#[test]
fn test_only_proposed_admin_can_accept() {
    let h = setup();
    let next = Address::generate(&h.env);
    let intruder = Address::generate(&h.env);

    assert_eq!(
        h.client.try_accept_admin(&next).unwrap_err().unwrap(),
        ContractError::NoPendingAdmin
    );
    h.client.propose_admin(&h.admin, &next);
    assert_eq!(
        h.client.try_accept_admin(&intruder).unwrap_err().unwrap(),
        ContractError::Unauthorized
    );
}

#[test]
fn test_cancel_admin_transfer() {
    let h = setup();
    let next = Address::generate(&h.env);

    h.client.propose_admin(&h.admin, &next);
    h.client.cancel_admin_transfer(&h.admin);
    assert_eq!(h.client.get_pending_admin(), None);
    assert_eq!(
        h.client.try_cancel_admin_transfer(&h.admin).unwrap_err().unwrap(),
        ContractError::NoPendingAdmin
    );
}
