mod common;

use belugaswap_account::MarginCall;
use belugaswap_margin::MarginError;
use belugaswap_path::TradeFlag;
use soroban_sdk::{testutils::Address as _, Address};

use common::*;

#[test]
fn test_open_position_four_hops() {
    let mut s = setup(5);
    s.seed_collateral(4, 100 * UNIT);
    let path = s.route(&[0, 1, 2, 3, 4], TradeFlag::OpenExactIn);
    let owner = s.owner.clone();

    let result = s
        .invoke(&owner, &MarginCall::OpenPositionExactIn(path, 50 * UNIT, 495 * UNIT / 10))
        .unwrap();

    assert_eq!(result.amount_in, 50 * UNIT);
    assert!(result.amount_out >= 495 * UNIT / 10);
    assert_eq!(s.debt(0), 50 * UNIT);
    assert_eq!(s.collateral(4), 100 * UNIT + result.amount_out);
}

#[test]
fn test_trim_position_reversed_exact_out() {
    let mut s = setup(5);
    s.seed_collateral(4, 200 * UNIT);
    s.seed_debt(0, 80 * UNIT);
    let path = s.route(&[4, 3, 2, 1, 0], TradeFlag::TrimExactOut);
    let owner = s.owner.clone();

    let result = s
        .invoke(&owner, &MarginCall::TrimPositionExactOut(path, 50 * UNIT, 525 * UNIT / 10))
        .unwrap();

    assert_eq!(result.amount_out, 50 * UNIT);
    assert!(result.amount_in <= 525 * UNIT / 10);
    assert_eq!(s.debt(0), 30 * UNIT);
    assert_eq!(s.collateral(4), 200 * UNIT - result.amount_in);
}

#[test]
fn test_collateral_swap_all_in() {
    let mut s = setup(3);
    s.seed_collateral(0, 100 * UNIT);
    let path = s.route(&[0, 1, 2], TradeFlag::CollateralSwapAllIn);
    let owner = s.owner.clone();

    s.invoke(&owner, &MarginCall::CollateralSwapAllIn(path, 99 * UNIT))
        .unwrap();

    assert_eq!(s.collateral(0), 0);
    assert!(s.collateral(2) >= 97 * UNIT);
}

#[test]
fn test_non_owner_rejected_whatever_the_path() {
    let mut s = setup(3);
    s.seed_collateral(2, 100 * UNIT);
    let stranger = Address::generate(&s.env);
    let valid = s.route(&[0, 1, 2], TradeFlag::OpenExactIn);
    let calls = [
        MarginCall::OpenPositionExactIn(valid.clone(), 10 * UNIT, 0),
        MarginCall::TrimPositionAllIn(valid, 0),
        MarginCall::SwapExactIn(soroban_sdk::Bytes::new(&s.env)),
    ];
    let before = s.position();

    for call in calls.iter() {
        let result = s.invoke(&stranger, call);
        assert_eq!(result, Err(MarginError::Unauthorized));
    }
    assert_eq!(s.position(), before);
}

#[test]
#[should_panic(expected = "Error(Auth, InvalidAction)")]
fn test_owner_address_without_signature_rejected() {
    let mut s = setup(3);
    s.seed_collateral(2, 100 * UNIT);
    let path = s.route(&[0, 1, 2], TradeFlag::OpenExactIn);
    let owner = s.owner.clone();
    // enforce real signatures; nobody has signed
    s.env.set_auths(&[]);

    let _ = s.invoke(&owner, &MarginCall::OpenPositionExactIn(path, 10 * UNIT, 0));
}

#[test]
fn test_engine_errors_pass_through() {
    let mut s = setup(3);
    let path = s.route(&[0, 1, 2], TradeFlag::OpenExactIn);
    let owner = s.owner.clone();

    // open without any collateral leaves the position unhealthy
    let result = s.invoke(&owner, &MarginCall::OpenPositionExactIn(path, 10 * UNIT, 0));

    assert_eq!(result, Err(MarginError::PositionUnhealthy));
    assert_eq!(s.debt(0), 0);
}
