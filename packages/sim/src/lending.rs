use belugaswap_margin::{LendingVenue, MarginError, TokenLedger};
use soroban_sdk::Address;

use crate::host::SimHost;

impl SimHost {
    /// Collateral value times loan-to-value must cover total debt; every
    /// asset is valued 1:1
    fn check_health(&self, account: &Address) -> Result<(), MarginError> {
        let collateral: i128 = self
            .state
            .collateral
            .iter()
            .filter(|((owner, _), _)| owner == account)
            .map(|(_, amount)| *amount)
            .sum();
        let debt: i128 = self
            .state
            .debt
            .iter()
            .filter(|((owner, _), _)| owner == account)
            .map(|(_, amount)| *amount)
            .sum();

        let borrowable = collateral
            .checked_mul(self.ltv_bps)
            .ok_or(MarginError::Overflow)?
            / 10_000;
        if debt > borrowable {
            return Err(MarginError::PositionUnhealthy);
        }
        Ok(())
    }

    fn adjust(
        map: &mut std::collections::BTreeMap<(Address, Address), i128>,
        account: &Address,
        asset: &Address,
        delta: i128,
    ) -> Result<(), MarginError> {
        let entry = map.entry((account.clone(), asset.clone())).or_insert(0);
        *entry = entry.checked_add(delta).ok_or(MarginError::Overflow)?;
        Ok(())
    }
}

impl LendingVenue for SimHost {
    fn collateral_balance(&self, account: &Address, asset: &Address) -> i128 {
        self.state
            .collateral
            .get(&(account.clone(), asset.clone()))
            .copied()
            .unwrap_or(0)
    }

    fn debt_balance(&self, account: &Address, asset: &Address) -> i128 {
        self.state
            .debt
            .get(&(account.clone(), asset.clone()))
            .copied()
            .unwrap_or(0)
    }

    fn borrow(&mut self, account: &Address, asset: &Address, amount: i128) -> Result<(), MarginError> {
        if amount <= 0 {
            return Err(MarginError::InvalidAmount);
        }
        let reserve = self.reserve.clone();
        self.transfer(asset, &reserve, account, amount)?;
        Self::adjust(&mut self.state.debt, account, asset, amount)?;
        self.check_health(account)
    }

    fn withdraw(&mut self, account: &Address, asset: &Address, amount: i128) -> Result<(), MarginError> {
        if amount <= 0 {
            return Err(MarginError::InvalidAmount);
        }
        if self.collateral_balance(account, asset) < amount {
            return Err(MarginError::InsufficientCollateral);
        }
        let reserve = self.reserve.clone();
        self.transfer(asset, &reserve, account, amount)?;
        Self::adjust(&mut self.state.collateral, account, asset, -amount)?;
        self.check_health(account)
    }

    fn supply(&mut self, account: &Address, asset: &Address, amount: i128) -> Result<(), MarginError> {
        if amount <= 0 {
            return Err(MarginError::InvalidAmount);
        }
        let reserve = self.reserve.clone();
        self.transfer(asset, account, &reserve, amount)?;
        Self::adjust(&mut self.state.collateral, account, asset, amount)
    }

    fn repay(&mut self, account: &Address, asset: &Address, amount: i128) -> Result<(), MarginError> {
        if amount <= 0 || amount > self.debt_balance(account, asset) {
            return Err(MarginError::InvalidAmount);
        }
        let reserve = self.reserve.clone();
        self.transfer(asset, account, &reserve, amount)?;
        Self::adjust(&mut self.state.debt, account, asset, -amount)
    }
}
