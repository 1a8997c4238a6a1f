use soroban_sdk::{contracttype, Address, Env, IntoVal, Val};

/// Storage keys owned by the shared access, pause and guard helpers.
///
/// Contracts keep their own `DataKey` enums next to these; variant names
/// must not overlap.
#[derive(Clone)]
#[contracttype]
pub enum AccessKey {
    /// Contract owner, set once at initialization
    Owner,
    /// Minter flag for an address
    Minter(Address),
    /// Emergency pause flag
    Paused,
    /// Set while a state-mutating call is in progress
    Locked,
}

/// Ledgers close roughly every 5 seconds.
pub const DAY_IN_LEDGERS: u32 = 17_280;

pub const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

pub const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub const PERSISTENT_LIFETIME_THRESHOLD: u32 = PERSISTENT_BUMP_AMOUNT - DAY_IN_LEDGERS;

/// Keep the contract instance (and everything in instance storage) alive.
pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

/// Keep a persistent entry alive. The entry must exist.
pub fn extend_persistent<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}
