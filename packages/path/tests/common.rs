use soroban_sdk::{testutils::Address as _, Address, Env, Vec};

pub const FEE_LOW: u32 = 5;
pub const FEE_MEDIUM: u32 = 30;
pub const FEE_HIGH: u32 = 100;

pub fn tokens(env: &Env, count: u32) -> Vec<Address> {
    let mut out = Vec::new(env);
    for _ in 0..count {
        out.push_back(Address::generate(env));
    }
    out
}
