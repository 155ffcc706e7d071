use belugaswap_margin::{MarginError, TokenLedger};
use soroban_sdk::Address;

use crate::host::SimHost;

impl SimHost {
    fn debit(&mut self, token: &Address, from: &Address, amount: i128) -> Result<(), MarginError> {
        let key = (token.clone(), from.clone());
        let balance = self.state.balances.get(&key).copied().unwrap_or(0);
        if balance < amount {
            return Err(MarginError::InsufficientBalance);
        }
        self.state.balances.insert(key, balance - amount);
        Ok(())
    }

    fn credit(&mut self, token: &Address, to: &Address, amount: i128) -> Result<(), MarginError> {
        let entry = self
            .state
            .balances
            .entry((token.clone(), to.clone()))
            .or_insert(0);
        *entry = entry.checked_add(amount).ok_or(MarginError::Overflow)?;
        Ok(())
    }
}

impl TokenLedger for SimHost {
    fn balance(&self, token: &Address, owner: &Address) -> i128 {
        self.state
            .balances
            .get(&(token.clone(), owner.clone()))
            .copied()
            .unwrap_or(0)
    }

    fn transfer(
        &mut self,
        token: &Address,
        from: &Address,
        to: &Address,
        amount: i128,
    ) -> Result<(), MarginError> {
        if amount < 0 {
            return Err(MarginError::InvalidAmount);
        }
        if amount == 0 {
            return Ok(());
        }
        self.debit(token, from, amount)?;
        self.credit(token, to, amount)
    }

    fn transfer_from(
        &mut self,
        token: &Address,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: i128,
    ) -> Result<(), MarginError> {
        let allowance = self.allowance(token, from, spender);
        if allowance < amount {
            return Err(MarginError::InsufficientAllowance);
        }
        self.approve(token, from, spender, allowance - amount);
        self.transfer(token, from, to, amount)
    }
}
