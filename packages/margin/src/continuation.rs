//! Callback payloads

use belugaswap_path::TradeMode;
use soroban_sdk::{contracttype, xdr::FromXdr, xdr::ToXdr, Address, Bytes, BytesN, Env};

use crate::error::MarginError;

/// What a pool echoes back to resume the walk.
///
/// Serialized to XDR and handed to the pool as opaque data. The engine keeps
/// the hash of the exact bytes it issued and only decodes payloads whose
/// hash matches, so nothing here is taken from the caller unchecked.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Continuation {
    pub account: Address,
    /// Encoded route without its amount header
    pub path: Bytes,
    /// Index of the hop whose pool is calling back
    pub hop: u32,
    pub mode: TradeMode,
    /// Input the engine quoted for this hop; zero when the pool reports it
    pub amount_owed: i128,
}

impl Continuation {
    pub fn to_payload(&self, env: &Env) -> Bytes {
        self.clone().to_xdr(env)
    }

    /// Decode a payload already matched against [`payload_hash`]
    pub fn from_payload(env: &Env, data: &Bytes) -> Result<Self, MarginError> {
        Continuation::from_xdr(env, data).map_err(|_| MarginError::UnexpectedCallback)
    }
}

pub fn payload_hash(env: &Env, data: &Bytes) -> BytesN<32> {
    env.crypto().sha256(data).into()
}
