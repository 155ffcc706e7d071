#![allow(dead_code)]

use belugaswap_margin::{EngineConfig, MarginEngine, PositionContext, TokenLedger};
use belugaswap_path::{HopAction, PathBuilder, TradeFlag};
use belugaswap_resolver::{resolve, PoolFamily, VenueTable};
use belugaswap_sim::SimHost;
use soroban_sdk::{testutils::Address as _, Address, Bytes, Env};

// Test constants
pub const UNIT: i128 = 10_000_000; // 7 decimals
pub const DEPTH: i128 = 1_000_000 * UNIT;
pub const EDGE_BPS: i128 = 10_040; // each pool pays 1.004 of the next token per token
pub const FEE_MEDIUM: u32 = 30;

pub const CLMM_ID: u32 = 0;
pub const PAIR_ID: u32 = 1;

pub struct Setup {
    pub env: Env,
    pub sim: SimHost,
    pub engine: MarginEngine,
    pub ctx: PositionContext,
    pub tokens: Vec<Address>,
    pub clmm_factory: Address,
    pub pair_factory: Address,
}

/// Pool family linking token `i` to token `i + 1`; alternates so every
/// route of two or more hops mixes both families
pub fn protocol_for(i: usize) -> u32 {
    if i % 2 == 0 {
        CLMM_ID
    } else {
        PAIR_ID
    }
}

/// `token_count` tokens chained by pools that each price the later token
/// slightly above par
pub fn setup(token_count: usize) -> Setup {
    let env = Env::default();
    let mut sim = SimHost::new(&env);
    let clmm_factory = Address::generate(&env);
    let pair_factory = Address::generate(&env);

    let tokens: Vec<Address> = (0..token_count).map(|_| Address::generate(&env)).collect();
    for i in 0..token_count.saturating_sub(1) {
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
    let engine = MarginEngine::new(EngineConfig::new(venues));

    let ctx = PositionContext {
        account: Address::generate(&env),
        owner: Address::generate(&env),
    };

    Setup {
        env,
        sim,
        engine,
        ctx,
        tokens,
        clmm_factory,
        pair_factory,
    }
}

impl Setup {
    /// Encode a route through `indices` (positions in `tokens`), funding
    /// the first hop as `flag` requires
    pub fn route(&self, indices: &[usize], flag: TradeFlag, amounts: Option<(i128, i128)>) -> Bytes {
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
        if let Some((amount, bound)) = amounts {
            builder = builder.with_amounts(amount, bound);
        }
        builder.finish(flag).unwrap()
    }

    pub fn pool_between(&self, i: usize, j: usize) -> Address {
        let factory = match protocol_for(i.min(j)) {
            CLMM_ID => &self.clmm_factory,
            _ => &self.pair_factory,
        };
        resolve(&self.env, factory, &self.tokens[i], &self.tokens[j], FEE_MEDIUM).unwrap()
    }

    /// Owner wallet funded with `amount` of token `i` and approved to the account
    pub fn fund_owner(&mut self, i: usize, amount: i128) {
        let token = self.tokens[i].clone();
        let owner = self.ctx.owner.clone();
        let account = self.ctx.account.clone();
        self.sim.mint(&token, &owner, amount);
        self.sim.approve(&token, &owner, &account, amount);
    }

    pub fn owner_balance(&self, i: usize) -> i128 {
        self.sim.balance(&self.tokens[i], &self.ctx.owner)
    }

    pub fn account_balance(&self, i: usize) -> i128 {
        self.sim.balance(&self.tokens[i], &self.ctx.account)
    }

    /// Every balance, collateral and debt figure the tests touch
    pub fn snapshot(&self) -> Vec<i128> {
        use belugaswap_margin::LendingVenue;

        let mut out = Vec::new();
        for token in self.tokens.iter() {
            out.push(self.sim.balance(token, &self.ctx.owner));
            out.push(self.sim.balance(token, &self.ctx.account));
            out.push(self.sim.balance(token, self.sim.lending_reserve()));
            out.push(self.sim.collateral_balance(&self.ctx.account, token));
            out.push(self.sim.debt_balance(&self.ctx.account, token));
        }
        for i in 0..self.tokens.len().saturating_sub(1) {
            let pool = self.pool_between(i, i + 1);
            out.push(self.sim.balance(&self.tokens[i], &pool));
            out.push(self.sim.balance(&self.tokens[i + 1], &pool));
        }
        out
    }
}
