use belugaswap_resolver::{PoolFamily, VenueTable};
use soroban_sdk::{testutils::Address as _, Address, Env};

pub const FEE_MEDIUM: u32 = 30;

pub const CLMM_ID: u32 = 0;
pub const PAIR_ID: u32 = 1;

/// Two venues on distinct factories
pub fn setup_table(env: &Env) -> (VenueTable, Address, Address) {
    let clmm_factory = Address::generate(env);
    let pair_factory = Address::generate(env);
    let table = VenueTable::new(env)
        .with_venue(CLMM_ID, PoolFamily::Concentrated, &clmm_factory)
        .unwrap()
        .with_venue(PAIR_ID, PoolFamily::ConstantProduct, &pair_factory)
        .unwrap();
    (table, clmm_factory, pair_factory)
}
