//! Call guard for state-mutating entry points.
//!
//! The host already refuses to re-enter a contract, but payment and custody
//! transfers call out to contracts we do not control, so every mutating
//! entry point also holds an explicit lock for the duration of the call.
//! A failed call rolls back its storage writes, the lock included.

use soroban_sdk::Env;

use crate::error::Error;
use crate::storage::AccessKey;

pub fn is_locked(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&AccessKey::Locked)
        .unwrap_or(false)
}

pub fn enter(env: &Env) -> Result<(), Error> {
    if is_locked(env) {
        return Err(Error::Reentrant);
    }
    env.storage().instance().set(&AccessKey::Locked, &true);
    Ok(())
}

pub fn exit(env: &Env) {
    env.storage().instance().remove(&AccessKey::Locked);
}

/// Run `body` while holding the lock.
pub fn non_reentrant<T, F>(env: &Env, body: F) -> Result<T, Error>
where
    F: FnOnce() -> Result<T, Error>,
{
    enter(env)?;
    let result = body();
    exit(env);
    result
}
