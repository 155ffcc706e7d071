use belugaswap_margin::{AmountAccountant, MarginError, TradeResult};
use belugaswap_path::TradeMode;

// ============================================================
// EXACT INPUT
// ============================================================

#[test]
fn test_exact_in_accepts_output_at_minimum() {
    let mut acc = AmountAccountant::exact_in(500_000_000, 495_000_000).unwrap();
    assert_eq!(acc.mode(), TradeMode::ExactIn);
    assert!(!acc.is_settled());

    acc.check_min_out(495_000_000).unwrap();

    assert!(acc.is_settled());
    assert_eq!(
        acc.result(),
        TradeResult { amount_in: 500_000_000, amount_out: 495_000_000 }
    );
}

#[test]
fn test_exact_in_rejects_output_below_minimum() {
    let mut acc = AmountAccountant::exact_in(500_000_000, 495_000_000).unwrap();

    assert_eq!(acc.check_min_out(494_999_999), Err(MarginError::TooLittleReceived));
    assert_eq!(acc.amount_out(), 0);
}

#[test]
fn test_exact_in_cannot_check_max_in() {
    let mut acc = AmountAccountant::exact_in(10, 0).unwrap();
    assert_eq!(acc.check_max_in(10), Err(MarginError::InvalidAmount));
}

// ============================================================
// EXACT OUTPUT
// ============================================================

#[test]
fn test_exact_out_accepts_input_at_maximum() {
    let mut acc = AmountAccountant::exact_out(500_000_000, 525_000_000).unwrap();
    assert_eq!(acc.amount_out(), 500_000_000);
    assert_eq!(acc.amount_in(), 0);

    acc.check_max_in(525_000_000).unwrap();

    assert_eq!(acc.amount_in(), 525_000_000);
    assert!(acc.is_settled());
}

#[test]
fn test_exact_out_rejects_input_above_maximum() {
    let mut acc = AmountAccountant::exact_out(500_000_000, 525_000_000).unwrap();

    assert_eq!(acc.check_max_in(525_000_001), Err(MarginError::TooMuchRequested));
    assert_eq!(acc.amount_in(), 0);
}

#[test]
fn test_exact_out_rejects_non_positive_input() {
    let mut acc = AmountAccountant::exact_out(1, 1).unwrap();
    assert_eq!(acc.check_max_in(0), Err(MarginError::InvalidDelta));
}

// ============================================================
// AMOUNTS
// ============================================================

#[test]
fn test_invalid_amounts_rejected() {
    assert_eq!(
        AmountAccountant::exact_in(0, 0).err(),
        Some(MarginError::InvalidAmount)
    );
    assert_eq!(
        AmountAccountant::exact_out(-5, 10).err(),
        Some(MarginError::InvalidAmount)
    );
    assert_eq!(
        AmountAccountant::new(TradeMode::ExactIn, 10, -1).err(),
        Some(MarginError::InvalidAmount)
    );
}
