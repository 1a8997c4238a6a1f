use soroban_sdk::{log, symbol_short, Address, Env};

use crate::access;
use crate::error::Error;
use crate::storage::AccessKey;

pub fn is_paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&AccessKey::Paused)
        .unwrap_or(false)
}

pub fn require_not_paused(env: &Env) -> Result<(), Error> {
    if is_paused(env) {
        return Err(Error::OperationPaused);
    }
    Ok(())
}

/// Owner-only toggle. Setting the current state again is accepted and
/// re-emits the event.
pub fn set_paused(env: &Env, caller: &Address, paused: bool) -> Result<(), Error> {
    access::require_owner(env, caller)?;

    env.storage().instance().set(&AccessKey::Paused, &paused);

    let timestamp = env.ledger().timestamp();
    log!(env, "pause state changed", caller.clone(), paused);
    env.events()
        .publish((symbol_short!("paused"), caller.clone()), (paused, timestamp));
    Ok(())
}
