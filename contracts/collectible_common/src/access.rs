//! Owner and minter roles.
//!
//! Role checks compare the claimed caller against stored state first and
//! only then ask the host for the caller's signature, so a wrong caller is
//! reported as `Unauthorized` rather than as an auth failure.

use soroban_sdk::{symbol_short, Address, Env};

use crate::error::Error;
use crate::storage::AccessKey;

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&AccessKey::Owner)
}

pub fn require_initialized(env: &Env) -> Result<(), Error> {
    if !is_initialized(env) {
        return Err(Error::NotInitialized);
    }
    Ok(())
}

/// Record the owner. Fails if an owner is already set.
pub fn init_owner(env: &Env, owner: &Address) -> Result<(), Error> {
    if is_initialized(env) {
        return Err(Error::AlreadyInitialized);
    }
    env.storage().instance().set(&AccessKey::Owner, owner);
    env.storage().instance().set(&AccessKey::Paused, &false);
    Ok(())
}

pub fn owner(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&AccessKey::Owner)
        .ok_or(Error::NotInitialized)
}

pub fn is_owner(env: &Env, account: &Address) -> bool {
    match owner(env) {
        Ok(owner) => owner == *account,
        Err(_) => false,
    }
}

pub fn require_owner(env: &Env, caller: &Address) -> Result<(), Error> {
    let owner = owner(env)?;
    if *caller != owner {
        return Err(Error::Unauthorized);
    }
    caller.require_auth();
    Ok(())
}

/// The owner may always mint; everyone else needs the minter role.
pub fn is_minter(env: &Env, account: &Address) -> bool {
    is_owner(env, account) || has_minter_role(env, account)
}

fn has_minter_role(env: &Env, account: &Address) -> bool {
    env.storage()
        .instance()
        .get(&AccessKey::Minter(account.clone()))
        .unwrap_or(false)
}

pub fn require_minter(env: &Env, caller: &Address) -> Result<(), Error> {
    require_initialized(env)?;
    if !is_minter(env, caller) {
        return Err(Error::Unauthorized);
    }
    caller.require_auth();
    Ok(())
}

pub fn add_minter(env: &Env, caller: &Address, target: &Address) -> Result<(), Error> {
    set_minter(env, caller, target, true)
}

pub fn remove_minter(env: &Env, caller: &Address, target: &Address) -> Result<(), Error> {
    set_minter(env, caller, target, false)
}

fn set_minter(env: &Env, caller: &Address, target: &Address, enabled: bool) -> Result<(), Error> {
    require_owner(env, caller)?;

    let key = AccessKey::Minter(target.clone());
    if enabled {
        env.storage().instance().set(&key, &true);
    } else {
        env.storage().instance().remove(&key);
    }

    env.events().publish(
        (symbol_short!("role"), caller.clone(), target.clone()),
        (symbol_short!("minter"), enabled),
    );
    Ok(())
}
