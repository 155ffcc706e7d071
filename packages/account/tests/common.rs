#![allow(dead_code)]

use belugaswap_account::{MarginAccount, MarginCall};
use belugaswap_margin::{EngineConfig, LendingVenue, MarginError, TradeResult};
use belugaswap_path::{HopAction, PathBuilder, TradeFlag};
use belugaswap_resolver::{PoolFamily, VenueTable};
use belugaswap_sim::SimHost;
use soroban_sdk::{
    contract, contractimpl, contracttype, testutils::Address as _, Address, Bytes, Env,
};

// Test constants
pub const UNIT: i128 = 10_000_000; // 7 decimals
pub const DEPTH: i128 = 1_000_000 * UNIT;
pub const EDGE_BPS: i128 = 10_040;
pub const FEE_MEDIUM: u32 = 30;

pub const CLMM_ID: u32 = 0;
pub const PAIR_ID: u32 = 1;

#[contracttype]
enum AccountKey {
    Owner,
}

/// On-chain identity of the margin account; calls run in its frame
#[contract]
pub struct AccountContract;

#[contractimpl]
impl AccountContract {
    pub fn __constructor(env: Env, owner: Address) {
        env.storage().instance().set(&AccountKey::Owner, &owner);
    }

    pub fn owner(env: Env) -> Address {
        env.storage().instance().get(&AccountKey::Owner).unwrap()
    }
}

pub struct Setup {
    pub env: Env,
    pub sim: SimHost,
    pub account: MarginAccount,
    pub owner: Address,
    pub engine_module: Address,
    pub config: EngineConfig,
    pub tokens: Vec<Address>,
}

pub fn protocol_for(i: usize) -> u32 {
    if i % 2 == 0 {
        CLMM_ID
    } else {
        PAIR_ID
    }
}

/// Margin account over a chain of `token_count` tokens, each linked to the
/// next by a pool of alternating family
pub fn setup(token_count: usize) -> Setup {
    let env = Env::default();
    env.mock_all_auths();
    let mut sim = SimHost::new(&env);
    let clmm_factory = Address::generate(&env);
    let pair_factory = Address::generate(&env);

    let tokens: Vec<Address> = (0..token_count).map(|_| Address::generate(&env)).collect();
    for i in 0..token_count - 1 {
        let (family, factory) = match protocol_for(i) {
            CLMM_ID => (PoolFamily::Concentrated, &clmm_factory),
            _ => (PoolFamily::ConstantProduct, &pair_factory),
        };
        sim.create_pool(
            family,
            factory,
            &tokens[i],
            DEPTH,
            &tokens[i + 1],
            DEPTH * EDGE_BPS / 10_000,
            FEE_MEDIUM,
        )
        .unwrap();
    }
    for token in tokens.iter() {
        sim.fund_lending(token, 10_000 * UNIT);
    }

    let venues = VenueTable::new(&env)
        .with_venue(CLMM_ID, PoolFamily::Concentrated, &clmm_factory)
        .unwrap()
        .with_venue(PAIR_ID, PoolFamily::ConstantProduct, &pair_factory)
        .unwrap();
    let config = EngineConfig::new(venues);

    let owner = Address::generate(&env);
    let engine_module = Address::generate(&env);
    let address = env.register(AccountContract, (owner.clone(),));
    let account =
        MarginAccount::new(&env, &address, &owner, &engine_module, config.clone()).unwrap();

    Setup {
        env,
        sim,
        account,
        owner,
        engine_module,
        config,
        tokens,
    }
}

impl Setup {
    /// Dispatch `call` from inside the account contract
    pub fn invoke(&mut self, caller: &Address, call: &MarginCall) -> Result<TradeResult, MarginError> {
        let env = self.env.clone();
        let address = self.account.address().clone();
        env.as_contract(&address, || self.account.invoke(&mut self.sim, caller, call))
    }

    /// Run a registry edit from inside the account contract
    pub fn edit<T>(&mut self, f: impl FnOnce(&Env, &mut MarginAccount) -> T) -> T {
        let env = self.env.clone();
        let address = self.account.address().clone();
        env.as_contract(&address, || f(&env, &mut self.account))
    }

    pub fn route(&self, indices: &[usize], flag: TradeFlag) -> Bytes {
        let mut builder = PathBuilder::new(&self.env, &self.tokens[indices[0]]);
        for (n, pair) in indices.windows(2).enumerate() {
            let action = if n == 0 { flag.funding() } else { HopAction::Swap };
            builder = builder.hop(
                FEE_MEDIUM,
                protocol_for(pair[0].min(pair[1])),
                action,
                &self.tokens[pair[1]],
            );
        }
        builder.finish(flag).unwrap()
    }

    pub fn collateral(&self, i: usize) -> i128 {
        self.sim
            .collateral_balance(self.account.address(), &self.tokens[i])
    }

    pub fn debt(&self, i: usize) -> i128 {
        self.sim.debt_balance(self.account.address(), &self.tokens[i])
    }

    pub fn seed_collateral(&mut self, i: usize, amount: i128) {
        let account = self.account.address().clone();
        self.sim.seed_collateral(&account, &self.tokens[i], amount);
    }

    pub fn seed_debt(&mut self, i: usize, amount: i128) {
        let account = self.account.address().clone();
        self.sim.seed_debt(&account, &self.tokens[i], amount);
    }

    /// Collateral and debt of every token
    pub fn position(&self) -> Vec<(i128, i128)> {
        (0..self.tokens.len())
            .map(|i| (self.collateral(i), self.debt(i)))
            .collect()
    }
}
