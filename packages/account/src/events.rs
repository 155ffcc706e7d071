//! Account events

use soroban_sdk::{Address, Env, Symbol};

pub fn emit_module_added(env: &Env, account: &Address, selector: &Symbol, module: &Address) {
    env.events().publish(
        (Symbol::new(env, "ModuleAdded"),),
        (account.clone(), selector.clone(), module.clone()),
    );
}

pub fn emit_module_replaced(
    env: &Env,
    account: &Address,
    selector: &Symbol,
    previous: &Address,
    module: &Address,
) {
    env.events().publish(
        (Symbol::new(env, "ModuleReplaced"),),
        (account.clone(), selector.clone(), previous.clone(), module.clone()),
    );
}

pub fn emit_module_removed(env: &Env, account: &Address, selector: &Symbol, previous: &Address) {
    env.events().publish(
        (Symbol::new(env, "ModuleRemoved"),),
        (account.clone(), selector.clone(), previous.clone()),
    );
}

pub fn emit_handler_installed(env: &Env, account: &Address, module: &Address) {
    env.events().publish(
        (Symbol::new(env, "HandlerInstalled"),),
        (account.clone(), module.clone()),
    );
}
