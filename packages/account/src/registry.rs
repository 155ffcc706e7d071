//! Selector to module table

use belugaswap_margin::MarginError;
use soroban_sdk::{contracttype, Address, Env, Map, Symbol};

/// Maps an operation selector to the module that implements it
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ModuleRegistry {
    pub modules: Map<Symbol, Address>,
}

impl ModuleRegistry {
    pub fn new(env: &Env) -> Self {
        Self {
            modules: Map::new(env),
        }
    }

    pub fn add(&mut self, selector: &Symbol, module: &Address) -> Result<(), MarginError> {
        if self.modules.contains_key(selector.clone()) {
            return Err(MarginError::SelectorExists);
        }
        self.modules.set(selector.clone(), module.clone());
        Ok(())
    }

    /// Point an existing selector at another module; returns the old one
    pub fn replace(&mut self, selector: &Symbol, module: &Address) -> Result<Address, MarginError> {
        let previous = self.module_for(selector)?;
        self.modules.set(selector.clone(), module.clone());
        Ok(previous)
    }

    pub fn remove(&mut self, selector: &Symbol) -> Result<Address, MarginError> {
        let previous = self.module_for(selector)?;
        self.modules.remove(selector.clone());
        Ok(previous)
    }

    pub fn module_for(&self, selector: &Symbol) -> Result<Address, MarginError> {
        self.modules
            .get(selector.clone())
            .ok_or(MarginError::SelectorNotFound)
    }

    pub fn len(&self) -> u32 {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
