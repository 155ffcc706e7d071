use core::fmt;

use soroban_sdk::{Address, Bytes, Env};

use crate::codec::{read_amount, read_fee, read_token};
use crate::constants::*;
use crate::error::PathError;
use crate::types::{Amounts, Hop, HopAction, TradeFlag};

/// Length-checked view over an encoded path.
///
/// The header (if any) is split off at parse time; [`PathView::body`]
/// is what travels inside callback payloads.
#[derive(Clone)]
pub struct PathView {
    env: Env,
    body: Bytes,
    amounts: Option<Amounts>,
    hop_count: u32,
    flag: TradeFlag,
}

impl fmt::Debug for PathView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathView")
            .field("body", &self.body)
            .field("amounts", &self.amounts)
            .field("hop_count", &self.hop_count)
            .field("flag", &self.flag)
            .finish()
    }
}

/// Number of hops encoded in a body of `len` bytes, if the length is valid
pub fn hop_count_for(len: u32) -> Option<u32> {
    if len < TAIL_SIZE {
        return None;
    }
    let hops = len - TAIL_SIZE;
    if hops % HOP_STRIDE != 0 {
        return None;
    }
    Some(hops / HOP_STRIDE)
}

impl PathView {
    pub fn parse(env: &Env, raw: &Bytes, with_header: bool) -> Result<Self, PathError> {
        let (amounts, body) = if with_header {
            if raw.len() < HEADER_SIZE {
                return Err(PathError::InvalidLength);
            }
            let amounts = Amounts {
                amount: read_amount(raw, 0),
                bound: read_amount(raw, AMOUNT_SIZE),
            };
            (Some(amounts), raw.slice(HEADER_SIZE..))
        } else {
            (None, raw.clone())
        };

        let hop_count = hop_count_for(body.len()).ok_or(PathError::InvalidLength)?;
        let flag_byte = body.get(body.len() - FLAG_SIZE).ok_or(PathError::InvalidLength)?;
        let flag = TradeFlag::from_code(flag_byte)?;

        Ok(Self {
            env: env.clone(),
            body,
            amounts,
            hop_count,
            flag,
        })
    }

    pub fn hop_count(&self) -> u32 {
        self.hop_count
    }

    pub fn flag(&self) -> TradeFlag {
        self.flag
    }

    pub fn amounts(&self) -> Option<Amounts> {
        self.amounts
    }

    /// Encoded hops and tail, without the amount header
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn first_token(&self) -> Result<Address, PathError> {
        read_token(&self.env, &self.body, 0)
    }

    pub fn last_token(&self) -> Result<Address, PathError> {
        read_token(&self.env, &self.body, self.hop_count * HOP_STRIDE)
    }

    /// Random access to hop `index`; fixed strides make this O(1)
    pub fn hop(&self, index: u32) -> Result<Hop, PathError> {
        if index >= self.hop_count {
            return Err(PathError::HopOutOfRange);
        }
        let offset = index * HOP_STRIDE;
        let fee_at = offset + ADDR_SIZE;
        let id_at = fee_at + FEE_SIZE;
        let action_at = id_at + PROTOCOL_ID_SIZE;

        let protocol_id = self.body.get(id_at).ok_or(PathError::InvalidLength)?;
        let action = self.body.get(action_at).ok_or(PathError::InvalidLength)?;

        Ok(Hop {
            token_in: read_token(&self.env, &self.body, offset)?,
            token_out: read_token(&self.env, &self.body, offset + HOP_STRIDE)?,
            fee_bps: read_fee(&self.body, fee_at),
            protocol_id: protocol_id as u32,
            action: HopAction::from_code(action)?,
        })
    }

    /// Cursor over every hop; walks forward with `next`, backward with `next_back`
    pub fn hops(&self) -> HopIter<'_> {
        HopIter {
            view: self,
            front: 0,
            back: self.hop_count,
        }
    }
}

// ============================================================
// CURSOR
// ============================================================

pub struct HopIter<'a> {
    view: &'a PathView,
    front: u32,
    back: u32,
}

impl Iterator for HopIter<'_> {
    type Item = Result<Hop, PathError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let hop = self.view.hop(self.front);
        self.front += 1;
        Some(hop)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.back - self.front) as usize;
        (left, Some(left))
    }
}

impl DoubleEndedIterator for HopIter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.view.hop(self.back))
    }
}

impl ExactSizeIterator for HopIter<'_> {}
