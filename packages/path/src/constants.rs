// Wire layout of an encoded swap path
//
//   [amount(16) bound(16)]?                              header (optional)
//   [token(32) fee(3) protocol_id(1) action(1)] * (n-1)  hops
//   [token(32) flag(1)]                                  tail

// ============================================================
// FIELD WIDTHS
// ============================================================

/// Token field: 32-byte contract id
pub const ADDR_SIZE: u32 = 32;

/// Fee tier in bps, 24-bit big-endian
pub const FEE_SIZE: u32 = 3;

/// Pool family / venue discriminator
pub const PROTOCOL_ID_SIZE: u32 = 1;

/// Per-hop settlement action
pub const ACTION_SIZE: u32 = 1;

/// Terminal trade flag
pub const FLAG_SIZE: u32 = 1;

/// One i128 amount, big-endian
pub const AMOUNT_SIZE: u32 = 16;

// ============================================================
// STRIDES
// ============================================================

pub const HOP_STRIDE: u32 = ADDR_SIZE + FEE_SIZE + PROTOCOL_ID_SIZE + ACTION_SIZE;

pub const TAIL_SIZE: u32 = ADDR_SIZE + FLAG_SIZE;

pub const HEADER_SIZE: u32 = AMOUNT_SIZE * 2;

/// Largest fee representable in the 3-byte field
pub const MAX_FEE: u32 = 0x00FF_FFFF;

// ============================================================
// ADDRESS XDR
// ============================================================

/// XDR prefix of a contract `ScVal::Address`:
/// SCV_ADDRESS (18) followed by SC_ADDRESS_TYPE_CONTRACT (1)
pub const CONTRACT_ADDRESS_XDR_PREFIX: [u8; 8] = [0, 0, 0, 18, 0, 0, 0, 1];

pub const ADDRESS_XDR_SIZE: u32 = 8 + ADDR_SIZE;
