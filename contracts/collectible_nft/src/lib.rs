#![no_std]

mod events;
mod storage;

use collectible_common::storage::{extend_instance, extend_persistent};
use collectible_common::{access, Error};
use soroban_sdk::{contract, contractimpl, Address, Env, String};
use storage::DataKey;

/// Collectible Token Contract
///
/// Non-fungible tokens with sequential ids, each tagged with the metadata
/// reference it was minted under.
///
/// Key features:
/// - Owner and registered minters can mint
/// - Ids are assigned from a global counter starting at 0
/// - Holders can approve operators (e.g. a staking contract) to move tokens
#[contract]
pub struct CollectibleNft;

#[contractimpl]
impl CollectibleNft {
    /// Constructor: delegates to initialize().
    pub fn __constructor(env: Env, owner: Address, name: String, symbol: String, base_uri: String) {
        Self::initialize(env, owner, name, symbol, base_uri).expect("initialization failed");
    }

    /// Initialize the collection.
    ///
    /// # Arguments
    /// * `owner` - Address that manages minters
    /// * `name` - Collection name
    /// * `symbol` - Collection symbol
    /// * `base_uri` - Base URI that token metadata tags are resolved against
    pub fn initialize(
        env: Env,
        owner: Address,
        name: String,
        symbol: String,
        base_uri: String,
    ) -> Result<(), Error> {
        if access::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }

        owner.require_auth();

        access::init_owner(&env, &owner)?;
        env.storage().instance().set(&DataKey::Name, &name);
        env.storage().instance().set(&DataKey::Symbol, &symbol);
        env.storage().instance().set(&DataKey::BaseUri, &base_uri);
        env.storage().instance().set(&DataKey::NextTokenId, &0u64);
        extend_instance(&env);

        Ok(())
    }

    /// Mint one token to `to` (owner or minter only).
    ///
    /// # Arguments
    /// * `minter` - Owner or a registered minter (must authorize)
    /// * `to` - Recipient of the new token
    /// * `metadata` - Metadata tag stored with the token
    ///
    /// # Returns
    /// The new token id
    pub fn mint(env: Env, minter: Address, to: Address, metadata: String) -> Result<u64, Error> {
        access::require_minter(&env, &minter)?;

        let token_id: u64 = env
            .storage()
            .instance()
            .get(&DataKey::NextTokenId)
            .ok_or(Error::StorageCorrupted)?;
        let next_id = token_id.checked_add(1).ok_or(Error::ArithmeticOverflow)?;

        let owner_key = DataKey::TokenOwner(token_id);
        env.storage().persistent().set(&owner_key, &to);
        extend_persistent(&env, &owner_key);

        let metadata_key = DataKey::TokenMetadata(token_id);
        env.storage().persistent().set(&metadata_key, &metadata);
        extend_persistent(&env, &metadata_key);

        Self::increase_balance(&env, &to)?;

        env.storage().instance().set(&DataKey::NextTokenId, &next_id);
        extend_instance(&env);

        events::mint(&env, &to, token_id);
        Ok(token_id)
    }

    /// Transfer a token held by `from`.
    pub fn transfer(env: Env, from: Address, to: Address, token_id: u64) -> Result<(), Error> {
        from.require_auth();
        Self::move_token(&env, &from, &to, token_id)
    }

    /// Transfer a token on behalf of `from`.
    ///
    /// `spender` must be `from` itself or an operator approved by `from`.
    pub fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        token_id: u64,
    ) -> Result<(), Error> {
        spender.require_auth();

        if spender != from && !Self::is_approved_for_all(env.clone(), from.clone(), spender.clone()) {
            return Err(Error::NotApproved);
        }

        Self::move_token(&env, &from, &to, token_id)
    }

    /// Allow or revoke `operator` moving every token of `owner`.
    pub fn approve_for_all(env: Env, owner: Address, operator: Address, approved: bool) {
        owner.require_auth();

        let key = DataKey::OperatorApproval(owner.clone(), operator.clone());
        if approved {
            env.storage().persistent().set(&key, &true);
            extend_persistent(&env, &key);
        } else {
            env.storage().persistent().remove(&key);
        }

        events::approve_for_all(&env, &owner, &operator, approved);
    }

    pub fn is_approved_for_all(env: Env, owner: Address, operator: Address) -> bool {
        env.storage()
            .persistent()
            .get(&DataKey::OperatorApproval(owner, operator))
            .unwrap_or(false)
    }

    /// Get the owner of a token.
    pub fn owner_of(env: Env, token_id: u64) -> Result<Address, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::TokenOwner(token_id))
            .ok_or(Error::NonExistentToken)
    }

    /// Get the metadata tag a token was minted with.
    pub fn token_metadata(env: Env, token_id: u64) -> Result<String, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::TokenMetadata(token_id))
            .ok_or(Error::NonExistentToken)
    }

    /// Number of tokens held by `owner`.
    pub fn balance(env: Env, owner: Address) -> u32 {
        env.storage()
            .persistent()
            .get(&DataKey::Balance(owner))
            .unwrap_or(0)
    }

    /// Number of tokens minted so far.
    pub fn total_supply(env: Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::NextTokenId)
            .unwrap_or(0)
    }

    /// Grant the minter role (owner only).
    pub fn add_minter(env: Env, owner: Address, minter: Address) -> Result<(), Error> {
        access::add_minter(&env, &owner, &minter)?;
        extend_instance(&env);
        Ok(())
    }

    /// Revoke the minter role (owner only).
    pub fn remove_minter(env: Env, owner: Address, minter: Address) -> Result<(), Error> {
        access::remove_minter(&env, &owner, &minter)?;
        extend_instance(&env);
        Ok(())
    }

    pub fn is_minter(env: Env, account: Address) -> bool {
        access::is_minter(&env, &account)
    }

    pub fn owner(env: Env) -> Result<Address, Error> {
        access::owner(&env)
    }

    pub fn name(env: Env) -> Result<String, Error> {
        Self::read_string(&env, DataKey::Name)
    }

    pub fn symbol(env: Env) -> Result<String, Error> {
        Self::read_string(&env, DataKey::Symbol)
    }

    pub fn base_uri(env: Env) -> Result<String, Error> {
        Self::read_string(&env, DataKey::BaseUri)
    }

    // --- Internal helpers ---

    fn read_string(env: &Env, key: DataKey) -> Result<String, Error> {
        access::require_initialized(env)?;
        env.storage()
            .instance()
            .get(&key)
            .ok_or(Error::StorageCorrupted)
    }

    fn move_token(env: &Env, from: &Address, to: &Address, token_id: u64) -> Result<(), Error> {
        let owner_key = DataKey::TokenOwner(token_id);
        let current_owner: Address = env
            .storage()
            .persistent()
            .get(&owner_key)
            .ok_or(Error::NonExistentToken)?;
        if current_owner != *from {
            return Err(Error::NotOwner);
        }

        Self::decrease_balance(env, from)?;
        Self::increase_balance(env, to)?;

        env.storage().persistent().set(&owner_key, to);
        extend_persistent(env, &owner_key);

        events::transfer(env, from, to, token_id);
        Ok(())
    }

    fn increase_balance(env: &Env, account: &Address) -> Result<(), Error> {
        let key = DataKey::Balance(account.clone());
        let balance: u32 = env.storage().persistent().get(&key).unwrap_or(0);
        let balance = balance.checked_add(1).ok_or(Error::ArithmeticOverflow)?;
        env.storage().persistent().set(&key, &balance);
        extend_persistent(env, &key);
        Ok(())
    }

    fn decrease_balance(env: &Env, account: &Address) -> Result<(), Error> {
        let key = DataKey::Balance(account.clone());
        let balance: u32 = env.storage().persistent().get(&key).unwrap_or(0);
        let balance = balance.checked_sub(1).ok_or(Error::StorageCorrupted)?;
        env.storage().persistent().set(&key, &balance);
        extend_persistent(env, &key);
        Ok(())
    }
}
