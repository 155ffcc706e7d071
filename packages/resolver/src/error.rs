//! Resolver errors

use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ResolveError {
    // Venue table (200-209)
    UnknownProtocol = 200,
    DuplicateProtocol = 201,

    // Pair (210-219)
    IdenticalTokens = 210,
}
