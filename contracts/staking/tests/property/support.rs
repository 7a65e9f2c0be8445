//! Shared deployment for the property suites.

use epoch_manager::{EpochManagerContract, EpochManagerContractClient};
use loyalty_token::{LoyaltyTokenContract, LoyaltyTokenContractClient};
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::{Client as TokenClient, StellarAssetClient};
use soroban_sdk::{vec, Address, Env, String};
use staking::{StakingConfig, StakingContract, StakingContractClient};

pub const DAY: u64 = 86_400;

pub fn config() -> StakingConfig {
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

pub struct Deployment {
    pub env: Env,
    pub client: StakingContractClient<'static>,
    pub contract_id: Address,
    pub distributor: Address,
    pub stake_token: Address,
}

pub fn deploy() -> Deployment {
    let env = Env::default();
    env.mock_all_auths();

    let stake_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

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
        &config(),
    );

    Deployment {
        env,
        client,
        contract_id,
        distributor,
        stake_token,
    }
}

impl Deployment {
    pub fn funded_staker(&self, amount: i128) -> Address {
        let staker = Address::generate(&self.env);
        StellarAssetClient::new(&self.env, &self.stake_token).mint(&staker, &amount);
        staker
    }

    pub fn distribute(&self, amount: i128) {
        StellarAssetClient::new(&self.env, &self.stake_token).mint(&self.contract_id, &amount);
        self.client.handle_distribution(&self.distributor, &amount);
    }

    pub fn balance(&self, of: &Address) -> i128 {
        TokenClient::new(&self.env, &self.stake_token).balance(of)
    }

    pub fn advance_epochs(&self, epochs: u64) {
        let now = self.env.ledger().timestamp();
        self.env.ledger().set_timestamp(now + epochs * DAY);
    }
}
