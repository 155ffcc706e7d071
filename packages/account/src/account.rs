use belugaswap_margin::{EngineConfig, Host, MarginEngine, MarginError, PositionContext, TradeResult};
use soroban_sdk::{Address, Env, Map, Symbol};

use crate::calls::{MarginCall, SELECTORS};
use crate::events::*;
use crate::registry::ModuleRegistry;

/// A margin position and the dispatch table in front of it.
///
/// Selectors resolve to module addresses through the registry; each module
/// address is backed by an installed engine configuration.
#[derive(Clone, Debug)]
pub struct MarginAccount {
    address: Address,
    owner: Address,
    registry: ModuleRegistry,
    handlers: Map<Address, EngineConfig>,
}

impl MarginAccount {
    /// New account with every margin selector routed to `engine_module`
    pub fn new(
        env: &Env,
        address: &Address,
        owner: &Address,
        engine_module: &Address,
        config: EngineConfig,
    ) -> Result<Self, MarginError> {
        let mut registry = ModuleRegistry::new(env);
        for name in SELECTORS {
            registry.add(&Symbol::new(env, name), engine_module)?;
        }
        let mut handlers = Map::new(env);
        handlers.set(engine_module.clone(), config);
        Ok(Self {
            address: address.clone(),
            owner: owner.clone(),
            registry,
            handlers,
        })
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn owner(&self) -> &Address {
        &self.owner
    }

    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    pub fn handler(&self, module: &Address) -> Option<EngineConfig> {
        self.handlers.get(module.clone())
    }

    fn require_owner(&self, caller: &Address) -> Result<(), MarginError> {
        caller.require_auth();
        if *caller != self.owner {
            return Err(MarginError::Unauthorized);
        }
        Ok(())
    }

    // ========================================================
    // DISPATCH
    // ========================================================

    /// Run `call` for `caller`, who must own the position
    pub fn invoke<H: Host>(
        &self,
        host: &mut H,
        caller: &Address,
        call: &MarginCall,
    ) -> Result<TradeResult, MarginError> {
        self.require_owner(caller)?;

        let selector = call.selector(host.env());
        let module = self
            .registry
            .module_for(&selector)
            .map_err(|_| MarginError::ModuleNotRegistered)?;
        let config = self
            .handlers
            .get(module)
            .ok_or(MarginError::ModuleNotRegistered)?;

        let ctx = PositionContext {
            account: self.address.clone(),
            owner: self.owner.clone(),
        };
        let engine = &mut MarginEngine::new(config);

        match call {
            MarginCall::SwapExactIn(path) => engine.swap_exact_in(host, &ctx, path),
            MarginCall::SwapExactOut(path) => engine.swap_exact_out(host, &ctx, path),
            MarginCall::OpenPositionExactIn(path, amount_in, min_out) => {
                engine.open_position_exact_in(host, &ctx, path, *amount_in, *min_out)
            }
            MarginCall::OpenPositionExactOut(path, amount_out, max_in) => {
                engine.open_position_exact_out(host, &ctx, path, *amount_out, *max_in)
            }
            MarginCall::TrimPositionExactIn(path, amount_in, min_out) => {
                engine.trim_position_exact_in(host, &ctx, path, *amount_in, *min_out)
            }
            MarginCall::TrimPositionExactOut(path, amount_out, max_in) => {
                engine.trim_position_exact_out(host, &ctx, path, *amount_out, *max_in)
            }
            MarginCall::TrimPositionAllIn(path, min_out) => {
                engine.trim_position_all_in(host, &ctx, path, *min_out)
            }
            MarginCall::TrimPositionAllOut(path, max_in) => {
                engine.trim_position_all_out(host, &ctx, path, *max_in)
            }
            MarginCall::CollateralSwapExactIn(path, amount_in, min_out) => {
                engine.collateral_swap_exact_in(host, &ctx, path, *amount_in, *min_out)
            }
            MarginCall::CollateralSwapExactOut(path, amount_out, max_in) => {
                engine.collateral_swap_exact_out(host, &ctx, path, *amount_out, *max_in)
            }
            MarginCall::CollateralSwapAllIn(path, min_out) => {
                engine.collateral_swap_all_in(host, &ctx, path, *min_out)
            }
            MarginCall::DebtSwapExactIn(path, amount_in, min_out) => {
                engine.debt_swap_exact_in(host, &ctx, path, *amount_in, *min_out)
            }
            MarginCall::DebtSwapExactOut(path, amount_out, max_in) => {
                engine.debt_swap_exact_out(host, &ctx, path, *amount_out, *max_in)
            }
            MarginCall::DebtSwapAllOut(path, max_in) => {
                engine.debt_swap_all_out(host, &ctx, path, *max_in)
            }
        }
    }

    // ========================================================
    // MODULE REGISTRY (owner only)
    // ========================================================

    /// Back `module` with an engine configuration, replacing any earlier one
    pub fn install_handler(
        &mut self,
        env: &Env,
        caller: &Address,
        module: &Address,
        config: EngineConfig,
    ) -> Result<(), MarginError> {
        self.require_owner(caller)?;
        self.handlers.set(module.clone(), config);
        emit_handler_installed(env, &self.address, module);
        Ok(())
    }

    pub fn add_module(
        &mut self,
        env: &Env,
        caller: &Address,
        selector: &Symbol,
        module: &Address,
    ) -> Result<(), MarginError> {
        self.require_owner(caller)?;
        self.registry.add(selector, module)?;
        emit_module_added(env, &self.address, selector, module);
        Ok(())
    }

    pub fn replace_module(
        &mut self,
        env: &Env,
        caller: &Address,
        selector: &Symbol,
        module: &Address,
    ) -> Result<(), MarginError> {
        self.require_owner(caller)?;
        let previous = self.registry.replace(selector, module)?;
        emit_module_replaced(env, &self.address, selector, &previous, module);
        Ok(())
    }

    pub fn remove_module(
        &mut self,
        env: &Env,
        caller: &Address,
        selector: &Symbol,
    ) -> Result<(), MarginError> {
        self.require_owner(caller)?;
        let previous = self.registry.remove(selector)?;
        emit_module_removed(env, &self.address, selector, &previous);
        Ok(())
    }
}
