use soroban_sdk::{contractclient, Address, Env, String};

/// The collectible token contract as seen by the sale engine and the
/// staking ledger.
#[contractclient(name = "TokenLedgerClient")]
pub trait TokenLedger {
    /// Mint one token to `to`, tagged with `metadata`. Returns the new id.
    fn mint(env: Env, minter: Address, to: Address, metadata: String) -> u64;

    fn owner_of(env: Env, token_id: u64) -> Address;

    fn transfer_from(env: Env, spender: Address, from: Address, to: Address, token_id: u64);

    fn is_minter(env: Env, account: Address) -> bool;

    fn is_approved_for_all(env: Env, owner: Address, operator: Address) -> bool;
}
