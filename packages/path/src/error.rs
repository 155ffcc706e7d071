//! Path codec errors

use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum PathError {
    // Layout (100-109)
    /// Length is not header + (n-1) * hop stride + tail
    InvalidLength = 100,
    /// Parallel input arrays disagree in length
    LengthMismatch = 101,
    /// No tokens were supplied
    NoTokens = 102,
    /// Hop index past the last hop
    HopOutOfRange = 103,

    // Field values (110-119)
    /// Trailing flag byte is not a known trade flag
    UnknownFlag = 110,
    /// Hop action byte is not a known action
    UnknownAction = 111,
    /// Fee does not fit the 3-byte field
    FeeOutOfRange = 112,
    /// Protocol id does not fit the 1-byte field
    IdOutOfRange = 113,

    // Addresses (120-129)
    /// Only contract addresses can be encoded
    UnsupportedAddress = 120,
    /// Token bytes do not form a valid address
    InvalidToken = 121,
}
