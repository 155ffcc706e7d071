use belugaswap_resolver::VenueTable;
use soroban_sdk::contracttype;

use crate::constants::MAX_HOPS;

/// Engine configuration
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EngineConfig {
    pub venues: VenueTable,
    pub max_hops: u32,
}

impl EngineConfig {
    pub fn new(venues: VenueTable) -> Self {
        Self {
            venues,
            max_hops: MAX_HOPS,
        }
    }
}
