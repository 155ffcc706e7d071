mod common;

use belugaswap_account::{MarginCall, ModuleRegistry, SELECTORS};
use belugaswap_margin::MarginError;
use belugaswap_path::{with_header, TradeFlag};
use soroban_sdk::{testutils::Address as _, Address, Env, Symbol};

use common::*;

// ============================================================
// REGISTRY
// ============================================================

#[test]
fn test_registry_add_replace_remove() {
    let env = Env::default();
    let mut registry = ModuleRegistry::new(&env);
    let selector = Symbol::new(&env, "swap_exact_in");
    let first = Address::generate(&env);
    let second = Address::generate(&env);

    registry.add(&selector, &first).unwrap();
    assert_eq!(registry.add(&selector, &second), Err(MarginError::SelectorExists));
    assert_eq!(registry.module_for(&selector), Ok(first.clone()));

    assert_eq!(registry.replace(&selector, &second), Ok(first.clone()));
    assert_eq!(registry.module_for(&selector), Ok(second.clone()));

    assert_eq!(registry.remove(&selector), Ok(second));
    assert!(registry.is_empty());
    assert_eq!(registry.remove(&selector), Err(MarginError::SelectorNotFound));
    assert_eq!(
        registry.replace(&selector, &first),
        Err(MarginError::SelectorNotFound)
    );
}

#[test]
fn test_new_account_routes_every_selector_to_engine() {
    let s = setup(2);

    assert_eq!(s.account.registry().len(), SELECTORS.len() as u32);
    for name in SELECTORS {
        let selector = Symbol::new(&s.env, name);
        assert_eq!(s.account.registry().module_for(&selector), Ok(s.engine_module.clone()));
    }
}

#[test]
fn test_call_selector_names_operation() {
    let env = Env::default();
    let path = soroban_sdk::Bytes::new(&env);

    assert_eq!(
        MarginCall::DebtSwapAllOut(path.clone(), 0).selector(&env),
        Symbol::new(&env, "debt_swap_all_out")
    );
    assert_eq!(
        MarginCall::CollateralSwapExactOut(path, 0, 0).selector(&env),
        Symbol::new(&env, "collateral_swap_exact_out")
    );
}

// ============================================================
// ACCOUNT
// ============================================================

#[test]
fn test_registry_edits_are_owner_only() {
    let mut s = setup(2);
    let stranger = Address::generate(&s.env);
    let selector = Symbol::new(&s.env, "swap_exact_in");
    let module = Address::generate(&s.env);
    let config = s.config.clone();

    s.edit(|env, account| {
        assert_eq!(
            account.replace_module(env, &stranger, &selector, &module),
            Err(MarginError::Unauthorized)
        );
        assert_eq!(
            account.remove_module(env, &stranger, &selector),
            Err(MarginError::Unauthorized)
        );
        assert_eq!(
            account.add_module(env, &stranger, &Symbol::new(env, "extra"), &module),
            Err(MarginError::Unauthorized)
        );
        assert_eq!(
            account.install_handler(env, &stranger, &module, config),
            Err(MarginError::Unauthorized)
        );
    });

    assert_eq!(s.account.registry().module_for(&selector), Ok(s.engine_module.clone()));
    assert!(s.account.handler(&module).is_none());
}

#[test]
fn test_removed_selector_stops_dispatch() {
    let mut s = setup(2);
    let owner = s.owner.clone();
    let selector = Symbol::new(&s.env, "open_position_exact_in");
    s.edit(|env, account| account.remove_module(env, &owner, &selector))
        .unwrap();
    let path = s.route(&[0, 1], TradeFlag::OpenExactIn);

    let result = s.invoke(&owner, &MarginCall::OpenPositionExactIn(path, UNIT, 0));

    assert_eq!(result, Err(MarginError::ModuleNotRegistered));
}

#[test]
fn test_selector_on_module_without_handler_rejected() {
    let mut s = setup(2);
    let owner = s.owner.clone();
    let selector = Symbol::new(&s.env, "collateral_swap_all_in");
    let other = Address::generate(&s.env);
    s.edit(|env, account| account.replace_module(env, &owner, &selector, &other))
        .unwrap();
    let path = s.route(&[0, 1], TradeFlag::CollateralSwapAllIn);

    let result = s.invoke(&owner, &MarginCall::CollateralSwapAllIn(path, 0));

    assert_eq!(result, Err(MarginError::ModuleNotRegistered));
    assert_eq!(s.account.registry().module_for(&selector), Ok(other));
}

#[test]
fn test_dispatch_follows_registered_module() {
    let mut s = setup(3);
    let (owner, token) = (s.owner.clone(), s.tokens[0].clone());
    let address = s.account.address().clone();
    s.sim.mint(&token, &owner, 100 * UNIT);
    s.sim.approve(&token, &owner, &address, 100 * UNIT);
    let body = s.route(&[0, 1, 2], TradeFlag::SwapExactIn);
    let call = MarginCall::SwapExactIn(with_header(&s.env, &body, 10 * UNIT, 0));

    // a handler limited to single-hop routes
    let single_hop = Address::generate(&s.env);
    let mut narrow = s.config.clone();
    narrow.max_hops = 1;
    let selector = Symbol::new(&s.env, "swap_exact_in");
    let engine_module = s.engine_module.clone();
    s.edit(|env, account| {
        account.install_handler(env, &owner, &single_hop, narrow)?;
        account.replace_module(env, &owner, &selector, &single_hop)
    })
    .unwrap();

    assert_eq!(s.invoke(&owner, &call), Err(MarginError::PathTooLong));

    s.edit(|env, account| account.replace_module(env, &owner, &selector, &engine_module))
        .unwrap();
    let result = s.invoke(&owner, &call).unwrap();

    assert_eq!(result.amount_in, 10 * UNIT);
    assert!(result.amount_out > 0);
}
