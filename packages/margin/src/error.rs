// Margin engine error module for BelugaSwap

use belugaswap_path::PathError;
use belugaswap_resolver::ResolveError;
use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum MarginError {
    // Path errors (100-199)
    MalformedPath = 100,
    EmptyPath = 101,
    PathTooLong = 102,
    UnknownProtocol = 103,
    ActionMismatch = 104,
    IdenticalTokens = 105,
    FlagMismatch = 106,
    MissingAmounts = 107,
    UnknownFlag = 108,
    UnknownAction = 109,
    InvalidToken = 110,

    // Slippage errors (200-299)
    TooLittleReceived = 200,
    TooMuchRequested = 201,
    InvalidAmount = 202,
    OutputMismatch = 203,

    // Callback errors (300-399)
    UnexpectedCallback = 300,
    InvalidCallbackCaller = 301,
    InvalidDelta = 302,
    CallbackNotReceived = 303,
    ForeignAccount = 304,

    // Authorization errors (400-499)
    Unauthorized = 400,
    TradeInProgress = 401,
    SelectorExists = 410,
    SelectorNotFound = 411,
    ModuleNotRegistered = 412,

    // Collaborator errors (500-599)
    InsufficientBalance = 500,
    InsufficientAllowance = 501,
    InsufficientCollateral = 502,
    PositionUnhealthy = 503,
    PoolNotFound = 504,
    PoolLocked = 505,
    InsufficientLiquidity = 506,
    InsufficientInput = 507,
    InvariantViolated = 508,
    PriceLimitReached = 509,

    // Arithmetic errors (600-699)
    Overflow = 600,
}

impl From<PathError> for MarginError {
    fn from(err: PathError) -> Self {
        match err {
            PathError::UnknownFlag => MarginError::UnknownFlag,
            PathError::UnknownAction => MarginError::UnknownAction,
            PathError::UnsupportedAddress | PathError::InvalidToken => MarginError::InvalidToken,
            PathError::InvalidLength
            | PathError::LengthMismatch
            | PathError::NoTokens
            | PathError::HopOutOfRange
            | PathError::FeeOutOfRange
            | PathError::IdOutOfRange => MarginError::MalformedPath,
        }
    }
}

impl From<ResolveError> for MarginError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::IdenticalTokens => MarginError::IdenticalTokens,
            ResolveError::UnknownProtocol | ResolveError::DuplicateProtocol => {
                MarginError::UnknownProtocol
            }
        }
    }
}
