//! Venue configuration

use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::error::ResolveError;

// ============================================================
// POOL FAMILY
// ============================================================

/// Swap primitive a venue's pools expose
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum PoolFamily {
    /// Concentrated liquidity, signed amount + sqrt price limit, delta callback
    Concentrated = 0,
    /// Constant product pair, optimistic output then flash callback
    ConstantProduct = 1,
}

// ============================================================
// VENUES
// ============================================================

/// One pool deployer selectable by a hop's protocol id
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Venue {
    pub protocol_id: u32,
    pub family: PoolFamily,
    pub factory: Address,
}

/// Configured venues, keyed by protocol id
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VenueTable {
    pub venues: Vec<Venue>,
}

impl VenueTable {
    pub fn new(env: &Env) -> Self {
        Self {
            venues: Vec::new(env),
        }
    }

    /// Register a venue; protocol ids are unique
    pub fn with_venue(
        mut self,
        protocol_id: u32,
        family: PoolFamily,
        factory: &Address,
    ) -> Result<Self, ResolveError> {
        if self.get(protocol_id).is_ok() {
            return Err(ResolveError::DuplicateProtocol);
        }
        self.venues.push_back(Venue {
            protocol_id,
            family,
            factory: factory.clone(),
        });
        Ok(self)
    }

    pub fn get(&self, protocol_id: u32) -> Result<Venue, ResolveError> {
        self.venues
            .iter()
            .find(|venue| venue.protocol_id == protocol_id)
            .ok_or(ResolveError::UnknownProtocol)
    }

    /// Pool address and family for one hop
    pub fn resolve(
        &self,
        env: &Env,
        token_a: &Address,
        token_b: &Address,
        fee_bps: u32,
        protocol_id: u32,
    ) -> Result<(Address, PoolFamily), ResolveError> {
        let venue = self.get(protocol_id)?;
        let pool = crate::resolve(env, &venue.factory, token_a, token_b, fee_bps)?;
        Ok((pool, venue.family))
    }
}
