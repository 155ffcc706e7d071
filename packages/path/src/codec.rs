use soroban_sdk::{xdr::FromXdr, xdr::ToXdr, Address, Bytes, Env, Vec};

use crate::constants::*;
use crate::error::PathError;
use crate::types::{Amounts, HopAction, Path, TradeFlag};
use crate::view::PathView;

// ============================================================
// FIELD CODECS
// ============================================================

/// Append the 32-byte contract id of `token`
pub fn write_token(env: &Env, out: &mut Bytes, token: &Address) -> Result<(), PathError> {
    let xdr = token.clone().to_xdr(env);
    if xdr.len() != ADDRESS_XDR_SIZE {
        return Err(PathError::UnsupportedAddress);
    }
    if xdr.slice(0..8) != Bytes::from_array(env, &CONTRACT_ADDRESS_XDR_PREFIX) {
        return Err(PathError::UnsupportedAddress);
    }
    out.append(&xdr.slice(8..ADDRESS_XDR_SIZE));
    Ok(())
}

/// Read a token written by [`write_token`] at `offset`
pub fn read_token(env: &Env, bytes: &Bytes, offset: u32) -> Result<Address, PathError> {
    let mut xdr = Bytes::from_array(env, &CONTRACT_ADDRESS_XDR_PREFIX);
    xdr.append(&bytes.slice(offset..offset + ADDR_SIZE));
    Address::from_xdr(env, &xdr).map_err(|_| PathError::InvalidToken)
}

pub fn write_fee(out: &mut Bytes, fee_bps: u32) -> Result<(), PathError> {
    if fee_bps > MAX_FEE {
        return Err(PathError::FeeOutOfRange);
    }
    let be = fee_bps.to_be_bytes();
    out.extend_from_slice(&be[1..]);
    Ok(())
}

pub fn read_fee(bytes: &Bytes, offset: u32) -> u32 {
    let mut be = [0u8; 4];
    bytes
        .slice(offset..offset + FEE_SIZE)
        .copy_into_slice(&mut be[1..]);
    u32::from_be_bytes(be)
}

pub fn write_amount(out: &mut Bytes, amount: i128) {
    out.extend_from_array(&amount.to_be_bytes());
}

pub fn read_amount(bytes: &Bytes, offset: u32) -> i128 {
    let mut be = [0u8; 16];
    bytes
        .slice(offset..offset + AMOUNT_SIZE)
        .copy_into_slice(&mut be);
    i128::from_be_bytes(be)
}

fn write_byte(out: &mut Bytes, value: u32) -> Result<(), PathError> {
    if value > u8::MAX as u32 {
        return Err(PathError::IdOutOfRange);
    }
    out.push_back(value as u8);
    Ok(())
}

// ============================================================
// ENCODE
// ============================================================

/// Encode a route from parallel arrays.
///
/// `tokens` holds every asset along the route; hop `i` trades
/// `tokens[i] -> tokens[i + 1]` with `fees[i]`, `protocol_ids[i]` and
/// `actions[i]`.
pub fn encode(
    env: &Env,
    tokens: &Vec<Address>,
    fees: &Vec<u32>,
    protocol_ids: &Vec<u32>,
    actions: &Vec<HopAction>,
    flag: TradeFlag,
    amounts: Option<Amounts>,
) -> Result<Bytes, PathError> {
    if tokens.is_empty() {
        return Err(PathError::NoTokens);
    }
    let hops = tokens.len() - 1;
    if fees.len() != hops || protocol_ids.len() != hops || actions.len() != hops {
        return Err(PathError::LengthMismatch);
    }

    let mut out = Bytes::new(env);
    if let Some(amounts) = amounts {
        write_amount(&mut out, amounts.amount);
        write_amount(&mut out, amounts.bound);
    }

    for i in 0..hops {
        write_token(env, &mut out, &tokens.get_unchecked(i))?;
        write_fee(&mut out, fees.get_unchecked(i))?;
        write_byte(&mut out, protocol_ids.get_unchecked(i))?;
        out.push_back(actions.get_unchecked(i).code());
    }

    write_token(env, &mut out, &tokens.get_unchecked(hops))?;
    out.push_back(flag.code());

    Ok(out)
}

/// Encode a decoded [`Path`] back into its wire form
pub fn encode_path(env: &Env, path: &Path) -> Result<Bytes, PathError> {
    let mut builder = PathBuilder::new(env, &path.token_in);
    for hop in path.hops.iter() {
        builder = builder.hop(hop.fee_bps, hop.protocol_id, hop.action, &hop.token_out);
    }
    if let Some(amounts) = path.amounts {
        builder = builder.with_amounts(amounts.amount, amounts.bound);
    }
    builder.finish(path.flag)
}

// ============================================================
// BUILDER
// ============================================================

/// Fluent route encoder.
///
/// ```ignore
/// let path = PathBuilder::new(&env, &usdc)
///     .hop(30, 0, HopAction::Borrow, &xlm)
///     .hop(30, 1, HopAction::Swap, &eth)
///     .with_amounts(amount_in, min_out)
///     .finish(TradeFlag::OpenExactIn)?;
/// ```
pub struct PathBuilder {
    env: Env,
    body: Bytes,
    amounts: Option<Amounts>,
    error: Option<PathError>,
}

impl PathBuilder {
    pub fn new(env: &Env, token: &Address) -> Self {
        let mut body = Bytes::new(env);
        let error = write_token(env, &mut body, token).err();
        Self {
            env: env.clone(),
            body,
            amounts: None,
            error,
        }
    }

    pub fn hop(mut self, fee_bps: u32, protocol_id: u32, action: HopAction, token_out: &Address) -> Self {
        if self.error.is_none() {
            self.error = self.push_hop(fee_bps, protocol_id, action, token_out).err();
        }
        self
    }

    fn push_hop(
        &mut self,
        fee_bps: u32,
        protocol_id: u32,
        action: HopAction,
        token_out: &Address,
    ) -> Result<(), PathError> {
        write_fee(&mut self.body, fee_bps)?;
        write_byte(&mut self.body, protocol_id)?;
        self.body.push_back(action.code());
        write_token(&self.env, &mut self.body, token_out)
    }

    pub fn with_amounts(mut self, amount: i128, bound: i128) -> Self {
        self.amounts = Some(Amounts { amount, bound });
        self
    }

    pub fn finish(self, flag: TradeFlag) -> Result<Bytes, PathError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        let mut out = Bytes::new(&self.env);
        if let Some(amounts) = self.amounts {
            write_amount(&mut out, amounts.amount);
            write_amount(&mut out, amounts.bound);
        }
        out.append(&self.body);
        out.push_back(flag.code());
        Ok(out)
    }
}

// ============================================================
// DECODE
// ============================================================

/// Decode a wire path in one forward pass
pub fn decode(env: &Env, raw: &Bytes, with_header: bool) -> Result<Path, PathError> {
    let view = PathView::parse(env, raw, with_header)?;
    let mut hops = Vec::new(env);
    for hop in view.hops() {
        hops.push_back(hop?);
    }
    Ok(Path {
        amounts: view.amounts(),
        token_in: view.first_token()?,
        hops,
        flag: view.flag(),
    })
}

/// Prefix `body` with an amount header
pub fn with_header(env: &Env, body: &Bytes, amount: i128, bound: i128) -> Bytes {
    let mut out = Bytes::new(env);
    write_amount(&mut out, amount);
    write_amount(&mut out, bound);
    out.append(body);
    out
}
