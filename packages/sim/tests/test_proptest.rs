// Property-Based Testing with Proptest
// Run with: cargo test -p belugaswap-sim --test test_proptest

mod common;

use belugaswap_margin::MarginError;
use belugaswap_path::TradeFlag;
use proptest::prelude::*;

use common::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Property: an exact-out trade spends at most its bound, or changes nothing
    #[test]
    fn prop_exact_out_within_bound(
        amount_out in 1i128..=200,
        max_in in 0i128..=400,
    ) {
        let mut s = setup(4);
        s.fund_owner(0, 1_000 * UNIT);
        let before = s.snapshot();
        let path = s.route(
            &[0, 1, 2, 3],
            TradeFlag::SwapExactOut,
            Some((amount_out * UNIT, max_in * UNIT)),
        );

        match s.engine.swap_exact_out(&mut s.sim, &s.ctx, &path) {
            Ok(result) => {
                prop_assert!(result.amount_in <= max_in * UNIT);
                prop_assert_eq!(result.amount_out, amount_out * UNIT);
                prop_assert_eq!(s.owner_balance(3), amount_out * UNIT);
                prop_assert_eq!(s.owner_balance(0), 1_000 * UNIT - result.amount_in);
            }
            Err(err) => {
                prop_assert_eq!(err, MarginError::TooMuchRequested);
                prop_assert_eq!(s.snapshot(), before);
            }
        }
        prop_assert!(s.engine.is_idle());
    }

    /// Property: an exact-in trade never pays out less than its bound
    #[test]
    fn prop_exact_in_meets_minimum(
        amount_in in 1i128..=200,
        min_out in 0i128..=400,
    ) {
        let mut s = setup(3);
        s.fund_owner(0, 1_000 * UNIT);
        let before = s.snapshot();
        let path = s.route(
            &[0, 1, 2],
            TradeFlag::SwapExactIn,
            Some((amount_in * UNIT, min_out * UNIT)),
        );

        match s.engine.swap_exact_in(&mut s.sim, &s.ctx, &path) {
            Ok(result) => {
                prop_assert!(result.amount_out >= min_out * UNIT);
                prop_assert_eq!(s.owner_balance(2), result.amount_out);
            }
            Err(err) => {
                prop_assert_eq!(err, MarginError::TooLittleReceived);
                prop_assert_eq!(s.snapshot(), before);
            }
        }
    }
}
