#![no_main]

use arbitrary::Arbitrary;
use epoch_manager::{EpochManagerContract, EpochManagerContractClient};
use libfuzzer_sys::fuzz_target;
use loyalty_token::{LoyaltyTokenContract, LoyaltyTokenContractClient};
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::StellarAssetClient,
    vec, Address, Env, String,
};
use staking::{StakingConfig, StakingContract, StakingContractClient};

const DAY: u64 = 86_400;

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Stake { amount: u32, period: u16 },
    Unstake { amount: u32, period: u16 },
    Cancel { amount: u32, period: u16 },
    Withdraw,
    Compound { period: u16 },
    Claim { primary: bool, secondary: bool },
    Increase { old_period: u16, new_period: u16 },
    Distribute { amount: u32 },
    Advance { epochs: u8 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let stake_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let sac = StellarAssetClient::new(&env, &stake_token);

    let epochs_id = env.register(EpochManagerContract, ());
    EpochManagerContractClient::new(&env, &epochs_id).initialize(&Address::generate(&env));

    let loyalty_owner = Address::generate(&env);
    let loyalty_id = env.register(LoyaltyTokenContract, ());
    let loyalty = LoyaltyTokenContractClient::new(&env, &loyalty_id);
    loyalty.initialize(
        &loyalty_owner,
        &7,
        &String::from_str(&env, "Loyalty"),
        &String::from_str(&env, "LOYAL"),
    );

    let contract_id = env.register(StakingContract, ());
    let client = StakingContractClient::new(&env, &contract_id);
    loyalty.whitelist_address(&loyalty_owner, &contract_id);

    let distributor = Address::generate(&env);
    client.initialize(
        &Address::generate(&env),
        &distributor,
        &epochs_id,
        &stake_token,
        &loyalty_id,
        &vec![&env],
        &StakingConfig {
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
        },
    );

    let mut users = Vec::new();
    for _ in 0..4 {
        let user = Address::generate(&env);
        sac.mint(&user, &(u32::MAX as i128 * 64));
        users.push(user);
    }

    for (i, action) in actions.into_iter().enumerate() {
        let caller = &users[i % users.len()];
        match action {
            FuzzAction::Stake { amount, period } => {
                let _ = client.try_stake(caller, &(amount as i128), &(period as u32));
            }
            FuzzAction::Unstake { amount, period } => {
                let _ = client.try_unstake(caller, &(amount as i128), &(period as u32));
            }
            FuzzAction::Cancel { amount, period } => {
                let _ = client.try_cancel_unstaking(caller, &(amount as i128), &(period as u32));
            }
            FuzzAction::Withdraw => {
                let _ = client.try_withdraw(caller);
            }
            FuzzAction::Compound { period } => {
                let _ = client.try_compound(caller, &(period as u32));
            }
            FuzzAction::Claim { primary, secondary } => {
                let _ = client.try_claim_rewards(caller, &primary, &secondary);
            }
            FuzzAction::Increase { old_period, new_period } => {
                let _ = client.try_increase_unstaking_period(
                    caller,
                    &(old_period as u32),
                    &(new_period as u32),
                );
            }
            FuzzAction::Distribute { amount } => {
                if amount > 0 {
                    sac.mint(&contract_id, &(amount as i128));
                    let _ = client.try_handle_distribution(&distributor, &(amount as i128));
                }
            }
            FuzzAction::Advance { epochs } => {
                let now = env.ledger().timestamp();
                env.ledger().set_timestamp(now + epochs as u64 * DAY);
            }
        }

        // the pool total must match the ledgers after every call
        let mut eligible = 0i128;
        for user in &users {
            eligible += client.get_staker_info(user).total_eligible().unwrap();
        }
        assert_eq!(client.get_pool_info().total_eligible_amount, eligible);
    }
});
