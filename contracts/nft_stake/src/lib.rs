#![no_std]

mod events;
mod storage;

use collectible_common::storage::{extend_instance, extend_persistent};
use collectible_common::{access, guard, pause, Error, TokenLedgerClient};
use soroban_sdk::{contract, contractimpl, log, token, Address, Env, Vec};
use storage::DataKey;

/// Collectible Staking Contract
///
/// Takes custody of collectible tokens on behalf of their owners and keeps
/// an ordered set of staked ids per owner.
///
/// Key features:
/// - Only the current holder can stake a token; only the staker can unstake it
/// - Multi-id calls are all-or-nothing: every id is validated before any
///   custody moves
/// - Owner can pause staking, repoint the token contract while nothing is
///   staked, and sweep native asset sent to the contract
#[contract]
pub struct NftStake;

#[contractimpl]
impl NftStake {
    /// Constructor: delegates to initialize().
    pub fn __constructor(env: Env, owner: Address, nft_contract: Address, native_token: Address) {
        Self::initialize(env, owner, nft_contract, native_token).expect("initialization failed");
    }

    /// Initialize the staking ledger.
    ///
    /// # Arguments
    /// * `owner` - Address that administers the ledger
    /// * `nft_contract` - Token contract whose tokens are staked
    /// * `native_token` - Native asset contract swept by `withdraw`
    pub fn initialize(
        env: Env,
        owner: Address,
        nft_contract: Address,
        native_token: Address,
    ) -> Result<(), Error> {
        if access::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }

        owner.require_auth();

        access::init_owner(&env, &owner)?;
        env.storage()
            .instance()
            .set(&DataKey::NftContract, &nft_contract);
        env.storage()
            .instance()
            .set(&DataKey::NativeToken, &native_token);
        env.storage().instance().set(&DataKey::TotalStaked, &0u32);
        extend_instance(&env);

        Ok(())
    }

    /// Stake tokens.
    ///
    /// The ledger must be an approved operator of `owner` on the token
    /// contract.
    ///
    /// # Arguments
    /// * `owner` - Current holder of every token (must authorize)
    /// * `token_ids` - Ids to stake, processed in order
    pub fn stake(env: Env, owner: Address, token_ids: Vec<u64>) -> Result<(), Error> {
        access::require_initialized(&env)?;
        pause::require_not_paused(&env)?;

        if token_ids.is_empty() {
            return Err(Error::EmptyTokenList);
        }

        owner.require_auth();

        guard::non_reentrant(&env, || Self::execute_stake(&env, &owner, &token_ids))
    }

    /// Unstake tokens, returning custody to `owner`.
    ///
    /// # Arguments
    /// * `owner` - Address that staked every token (must authorize)
    /// * `token_ids` - Ids to unstake, processed in order
    pub fn unstake(env: Env, owner: Address, token_ids: Vec<u64>) -> Result<(), Error> {
        access::require_initialized(&env)?;
        pause::require_not_paused(&env)?;

        if token_ids.is_empty() {
            return Err(Error::EmptyTokenList);
        }

        owner.require_auth();

        guard::non_reentrant(&env, || Self::execute_unstake(&env, &owner, &token_ids))
    }

    /// Unstake everything `owner` has staked.
    ///
    /// # Returns
    /// Number of tokens returned; 0 when nothing was staked
    pub fn unstake_all(env: Env, owner: Address) -> Result<u32, Error> {
        access::require_initialized(&env)?;
        pause::require_not_paused(&env)?;

        owner.require_auth();

        guard::non_reentrant(&env, || {
            let staked = Self::get_user_staked_tokens(env.clone(), owner.clone());
            if staked.is_empty() {
                return Ok(0);
            }
            Self::execute_unstake(&env, &owner, &staked)?;
            Ok(staked.len())
        })
    }

    /// Token ids staked by `owner`, in staking order.
    pub fn get_user_staked_tokens(env: Env, owner: Address) -> Vec<u64> {
        env.storage()
            .persistent()
            .get(&DataKey::Staked(owner))
            .unwrap_or_else(|| Vec::new(&env))
    }

    /// Address that staked `token_id`, if it is staked.
    pub fn staker_of(env: Env, token_id: u64) -> Option<Address> {
        env.storage().persistent().get(&DataKey::StakedBy(token_id))
    }

    /// Number of tokens currently in custody.
    pub fn total_staked(env: Env) -> u32 {
        env.storage()
            .instance()
            .get(&DataKey::TotalStaked)
            .unwrap_or(0)
    }

    /// Point the ledger at another token contract (owner only).
    ///
    /// Refused with `StakesOutstanding` while any token is staked, so no
    /// custody record ever refers to a contract the ledger no longer uses.
    pub fn set_nft_contract(env: Env, owner: Address, nft_contract: Address) -> Result<(), Error> {
        access::require_owner(&env, &owner)?;

        if Self::total_staked(env.clone()) > 0 {
            return Err(Error::StakesOutstanding);
        }

        env.storage()
            .instance()
            .set(&DataKey::NftContract, &nft_contract);
        extend_instance(&env);

        events::nft_contract_set(&env, &owner, &nft_contract);
        Ok(())
    }

    pub fn get_nft_contract(env: Env) -> Result<Address, Error> {
        Self::read_address(&env, DataKey::NftContract)
    }

    pub fn get_native_token(env: Env) -> Result<Address, Error> {
        Self::read_address(&env, DataKey::NativeToken)
    }

    /// Send native asset held by the ledger to the owner (owner only).
    ///
    /// # Arguments
    /// * `amount` - Amount to withdraw in stroops
    pub fn withdraw(env: Env, owner: Address, amount: i128) -> Result<(), Error> {
        access::require_owner(&env, &owner)?;

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        guard::non_reentrant(&env, || {
            let native_token = Self::read_address(&env, DataKey::NativeToken)?;
            let token_client = token::Client::new(&env, &native_token);
            let contract = env.current_contract_address();

            if token_client.balance(&contract) < amount {
                return Err(Error::InsufficientBalance);
            }

            token_client.transfer(&contract, &owner, &amount);

            log!(&env, "withdraw", owner.clone(), amount);
            events::withdraw(&env, &owner, amount);
            Ok(())
        })
    }

    pub fn pause(env: Env, owner: Address) -> Result<(), Error> {
        pause::set_paused(&env, &owner, true)
    }

    pub fn unpause(env: Env, owner: Address) -> Result<(), Error> {
        pause::set_paused(&env, &owner, false)
    }

    pub fn is_paused(env: Env) -> bool {
        pause::is_paused(&env)
    }

    pub fn owner(env: Env) -> Result<Address, Error> {
        access::owner(&env)
    }

    // --- Internal helpers ---

    fn read_address(env: &Env, key: DataKey) -> Result<Address, Error> {
        access::require_initialized(env)?;
        env.storage()
            .instance()
            .get(&key)
            .ok_or(Error::StorageCorrupted)
    }

    fn execute_stake(env: &Env, owner: &Address, token_ids: &Vec<u64>) -> Result<(), Error> {
        let nft_contract = Self::read_address(env, DataKey::NftContract)?;
        let ledger = TokenLedgerClient::new(env, &nft_contract);
        let custodian = env.current_contract_address();

        // Validate every id before moving anything
        let mut batch: Vec<u64> = Vec::new(env);
        for token_id in token_ids.iter() {
            if env.storage().persistent().has(&DataKey::StakedBy(token_id)) || batch.contains(token_id) {
                return Err(Error::AlreadyStaked);
            }
            match ledger.try_owner_of(&token_id) {
                Ok(Ok(holder)) if holder == *owner => {}
                _ => return Err(Error::NotOwner),
            }
            batch.push_back(token_id);
        }

        if !ledger.is_approved_for_all(owner, &custodian) {
            return Err(Error::NotApproved);
        }

        let total = Self::total_staked(env.clone())
            .checked_add(batch.len())
            .ok_or(Error::ArithmeticOverflow)?;

        let mut staked = Self::get_user_staked_tokens(env.clone(), owner.clone());
        for token_id in batch.iter() {
            ledger.transfer_from(&custodian, owner, &custodian, &token_id);

            staked.push_back(token_id);
            let staked_by_key = DataKey::StakedBy(token_id);
            env.storage().persistent().set(&staked_by_key, owner);
            extend_persistent(env, &staked_by_key);
        }

        let staked_key = DataKey::Staked(owner.clone());
        env.storage().persistent().set(&staked_key, &staked);
        extend_persistent(env, &staked_key);
        env.storage().instance().set(&DataKey::TotalStaked, &total);
        extend_instance(env);

        let timestamp = env.ledger().timestamp();
        log!(env, "staked", owner.clone(), batch.len());
        for token_id in batch.iter() {
            events::stake(env, owner, token_id, timestamp);
        }
        Ok(())
    }

    fn execute_unstake(env: &Env, owner: &Address, token_ids: &Vec<u64>) -> Result<(), Error> {
        // Validate against a working copy so a repeated id fails the call
        let mut staked = Self::get_user_staked_tokens(env.clone(), owner.clone());
        for token_id in token_ids.iter() {
            match staked.first_index_of(token_id) {
                Some(index) => {
                    staked.remove(index);
                }
                None => return Err(Error::NotStaked),
            }
        }

        let total = Self::total_staked(env.clone())
            .checked_sub(token_ids.len())
            .ok_or(Error::StorageCorrupted)?;

        let nft_contract = Self::read_address(env, DataKey::NftContract)?;
        let ledger = TokenLedgerClient::new(env, &nft_contract);
        let custodian = env.current_contract_address();

        for token_id in token_ids.iter() {
            ledger.transfer_from(&custodian, &custodian, owner, &token_id);
            env.storage().persistent().remove(&DataKey::StakedBy(token_id));
        }

        let staked_key = DataKey::Staked(owner.clone());
        env.storage().persistent().set(&staked_key, &staked);
        extend_persistent(env, &staked_key);
        env.storage().instance().set(&DataKey::TotalStaked, &total);
        extend_instance(env);

        let timestamp = env.ledger().timestamp();
        log!(env, "unstaked", owner.clone(), token_ids.len());
        for token_id in token_ids.iter() {
            events::unstake(env, owner, token_id, timestamp);
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    extern crate std;

    use super::*;
    use collectible_nft::{CollectibleNft, CollectibleNftClient};
    use soroban_sdk::{
        symbol_short,
        testutils::{Address as _, Events, Ledger},
        token::{StellarAssetClient, TokenClient},
        vec, Env, String, Symbol, TryFromVal, Val,
    };

    struct TestContext<'a> {
        env: Env,
        stake_id: Address,
        stake: NftStakeClient<'a>,
        nft: CollectibleNftClient<'a>,
        native: TokenClient<'a>,
        native_admin: StellarAssetClient<'a>,
        owner: Address,
        user1: Address,
        user2: Address,
    }

    /// Deploy token ledger and staking contract, mint tokens 0 and 1 to
    /// user1 and token 2 to user2, and approve the staking contract for both.
    fn setup_test<'a>() -> TestContext<'a> {
        let env = Env::default();
        env.mock_all_auths();

        let owner = Address::generate(&env);
        let user1 = Address::generate(&env);
        let user2 = Address::generate(&env);

        let native_admin = Address::generate(&env);
        let native_contract = env.register_stellar_asset_contract_v2(native_admin);
        let native_address = native_contract.address();

        let nft_id = env.register(
            CollectibleNft,
            (
                owner.clone(),
                String::from_str(&env, "MultipassNFT"),
                String::from_str(&env, "MPASS"),
                String::from_str(&env, "ipfs://multipass/"),
            ),
        );
        let nft = CollectibleNftClient::new(&env, &nft_id);

        let stake_id = env.register(
            NftStake,
            (owner.clone(), nft_id.clone(), native_address.clone()),
        );

        let tag = String::from_str(&env, "mtp");
        nft.mint(&owner, &user1, &tag);
        nft.mint(&owner, &user1, &tag);
        nft.mint(&owner, &user2, &tag);

        nft.approve_for_all(&user1, &stake_id, &true);
        nft.approve_for_all(&user2, &stake_id, &true);

        TestContext {
            stake: NftStakeClient::new(&env, &stake_id),
            nft,
            native: TokenClient::new(&env, &native_address),
            native_admin: StellarAssetClient::new(&env, &native_address),
            stake_id,
            owner,
            user1,
            user2,
            env,
        }
    }

    /// Events published by `contract` whose first topic is `name`, oldest first.
    fn events_named(env: &Env, contract: &Address, name: Symbol) -> std::vec::Vec<(Address, u64, u64)> {
        let mut found = std::vec::Vec::new();
        for (address, topics, data) in env.events().all().iter() {
            if address != *contract {
                continue;
            }
            let topic = Symbol::try_from_val(env, &topics.get(0).unwrap()).unwrap();
            if topic != name {
                continue;
            }
            let who = Address::try_from_val(env, &topics.get(1).unwrap()).unwrap();
            let (token_id, timestamp) = <(u64, u64)>::try_from_val(env, &data).unwrap();
            found.push((who, token_id, timestamp));
        }
        found
    }

    fn last_event(env: &Env, contract: &Address) -> (Vec<Val>, Val) {
        let mut last = None;
        for (address, topics, data) in env.events().all().iter() {
            if address == *contract {
                last = Some((topics, data));
            }
        }
        last.expect("contract published no event")
    }

    #[test]
    fn test_initialize() {
        let ctx = setup_test();

        assert_eq!(ctx.stake.get_nft_contract(), ctx.nft.address);
        assert_eq!(ctx.stake.get_native_token(), ctx.native.address);
        assert_eq!(ctx.stake.owner(), ctx.owner);
        assert_eq!(ctx.stake.total_staked(), 0);
        assert!(!ctx.stake.is_paused());
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #1)")] // AlreadyInitialized = 1
    fn test_double_initialize() {
        let ctx = setup_test();
        ctx.stake
            .initialize(&ctx.owner, &ctx.nft.address, &ctx.native.address);
    }

    // --- Staking ---

    #[test]
    fn test_stake() {
        let ctx = setup_test();
        let env = &ctx.env;

        ctx.stake.stake(&ctx.user1, &vec![env, 0u64, 1u64]);

        let staked = ctx.stake.get_user_staked_tokens(&ctx.user1);
        assert_eq!(staked, vec![env, 0u64, 1u64]);
        assert_eq!(ctx.stake.total_staked(), 2);
        assert_eq!(ctx.stake.staker_of(&0), Some(ctx.user1.clone()));
        assert_eq!(ctx.stake.staker_of(&2), None);
    }

    #[test]
    fn test_stake_transfers_custody() {
        let ctx = setup_test();
        let env = &ctx.env;

        ctx.stake.stake(&ctx.user1, &vec![env, 0u64]);

        assert_eq!(ctx.nft.owner_of(&0), ctx.stake_id);
        assert_eq!(ctx.nft.owner_of(&1), ctx.user1);
    }

    #[test]
    fn test_stake_emits_event_per_token() {
        let ctx = setup_test();
        let env = &ctx.env;
        env.ledger().set_timestamp(1_700_000_000);

        ctx.stake.stake(&ctx.user1, &vec![env, 1u64, 0u64]);

        let events = events_named(env, &ctx.stake_id, symbol_short!("stake"));
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], (ctx.user1.clone(), 1, 1_700_000_000));
        assert_eq!(events[1], (ctx.user1.clone(), 0, 1_700_000_000));
    }

    #[test]
    fn test_stake_keeps_insertion_order() {
        let ctx = setup_test();
        let env = &ctx.env;

        ctx.stake.stake(&ctx.user1, &vec![env, 1u64]);
        ctx.stake.stake(&ctx.user1, &vec![env, 0u64]);

        assert_eq!(
            ctx.stake.get_user_staked_tokens(&ctx.user1),
            vec![env, 1u64, 0u64]
        );
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #13)")] // NotOwner = 13
    fn test_stake_foreign_token_fails() {
        let ctx = setup_test();
        let env = &ctx.env;

        ctx.stake.stake(&ctx.user2, &vec![env, 0u64]);
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #13)")] // NotOwner = 13
    fn test_stake_unminted_token_fails() {
        let ctx = setup_test();
        let env = &ctx.env;

        ctx.stake.stake(&ctx.user1, &vec![env, 99u64]);
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #14)")] // AlreadyStaked = 14
    fn test_stake_twice_fails() {
        let ctx = setup_test();
        let env = &ctx.env;

        ctx.stake.stake(&ctx.user1, &vec![env, 0u64]);
        ctx.stake.stake(&ctx.user1, &vec![env, 0u64]);
    }

    #[test]
    fn test_stake_repeated_id_in_one_call_fails() {
        let ctx = setup_test();
        let env = &ctx.env;

        let result = ctx.stake.try_stake(&ctx.user1, &vec![env, 0u64, 0u64]);
        assert_eq!(result, Err(Ok(Error::AlreadyStaked)));

        assert_eq!(ctx.nft.owner_of(&0), ctx.user1);
        assert_eq!(ctx.stake.total_staked(), 0);
    }

    #[test]
    fn test_stake_is_all_or_nothing() {
        let ctx = setup_test();
        let env = &ctx.env;

        // Token 2 belongs to user2, so token 0 must not move either
        let result = ctx.stake.try_stake(&ctx.user1, &vec![env, 0u64, 2u64]);
        assert_eq!(result, Err(Ok(Error::NotOwner)));

        assert_eq!(ctx.nft.owner_of(&0), ctx.user1);
        assert_eq!(ctx.nft.owner_of(&2), ctx.user2);
        assert!(ctx.stake.get_user_staked_tokens(&ctx.user1).is_empty());
        assert_eq!(ctx.stake.staker_of(&0), None);
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #16)")] // EmptyTokenList = 16
    fn test_stake_empty_list_fails() {
        let ctx = setup_test();
        ctx.stake.stake(&ctx.user1, &Vec::new(&ctx.env));
    }

    #[test]
    fn test_stake_without_approval_fails() {
        let ctx = setup_test();
        let env = &ctx.env;

        ctx.nft.approve_for_all(&ctx.user1, &ctx.stake_id, &false);

        let result = ctx.stake.try_stake(&ctx.user1, &vec![env, 0u64]);
        assert_eq!(result, Err(Ok(Error::NotApproved)));
        assert_eq!(ctx.nft.owner_of(&0), ctx.user1);
    }

    #[test]
    fn test_stake_foreign_token_without_approval_is_not_owner() {
        let ctx = setup_test();
        let env = &ctx.env;
        let stranger = Address::generate(env);

        let result = ctx.stake.try_stake(&stranger, &vec![env, 0u64]);
        assert_eq!(result, Err(Ok(Error::NotOwner)));
        assert_eq!(ctx.nft.owner_of(&0), ctx.user1);
        assert_eq!(ctx.stake.staker_of(&0), None);
    }

    // --- Unstaking ---

    #[test]
    fn test_unstake_specific_token() {
        let ctx = setup_test();
        let env = &ctx.env;

        ctx.stake.stake(&ctx.user1, &vec![env, 0u64, 1u64]);
        ctx.stake.unstake(&ctx.user1, &vec![env, 0u64]);

        assert_eq!(ctx.stake.get_user_staked_tokens(&ctx.user1), vec![env, 1u64]);
        assert_eq!(ctx.nft.owner_of(&0), ctx.user1);
        assert_eq!(ctx.nft.owner_of(&1), ctx.stake_id);
        assert_eq!(ctx.stake.total_staked(), 1);
        assert_eq!(ctx.stake.staker_of(&0), None);
    }

    #[test]
    fn test_stake_unstake_restores_owner() {
        let ctx = setup_test();
        let env = &ctx.env;

        let before = ctx.nft.owner_of(&2);
        ctx.stake.stake(&ctx.user2, &vec![env, 2u64]);
        ctx.stake.unstake(&ctx.user2, &vec![env, 2u64]);
        assert_eq!(ctx.nft.owner_of(&2), before);

        // And the token can be staked again
        ctx.stake.stake(&ctx.user2, &vec![env, 2u64]);
        assert_eq!(ctx.nft.owner_of(&2), ctx.stake_id);
    }

    #[test]
    fn test_unstake_all() {
        let ctx = setup_test();
        let env = &ctx.env;

        ctx.stake.stake(&ctx.user1, &vec![env, 0u64, 1u64]);
        ctx.stake.stake(&ctx.user2, &vec![env, 2u64]);

        assert_eq!(ctx.stake.unstake_all(&ctx.user1), 2);

        assert!(ctx.stake.get_user_staked_tokens(&ctx.user1).is_empty());
        assert_eq!(ctx.nft.owner_of(&0), ctx.user1);
        assert_eq!(ctx.nft.owner_of(&1), ctx.user1);
        assert_eq!(ctx.stake.total_staked(), 1);

        // user2 is unaffected
        assert_eq!(ctx.nft.owner_of(&2), ctx.stake_id);

        // Second call is a no-op
        assert_eq!(ctx.stake.unstake_all(&ctx.user1), 0);
        assert_eq!(ctx.stake.total_staked(), 1);
    }

    #[test]
    fn test_unstake_all_with_nothing_staked() {
        let ctx = setup_test();
        assert_eq!(ctx.stake.unstake_all(&ctx.user1), 0);
    }

    #[test]
    fn test_unstake_emits_event() {
        let ctx = setup_test();
        let env = &ctx.env;

        ctx.stake.stake(&ctx.user1, &vec![env, 0u64, 1u64]);
        env.ledger().set_timestamp(1_700_000_100);
        ctx.stake.unstake(&ctx.user1, &vec![env, 0u64]);

        let events = events_named(env, &ctx.stake_id, symbol_short!("unstake"));
        assert_eq!(events.last(), Some(&(ctx.user1.clone(), 0, 1_700_000_100)));
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #15)")] // NotStaked = 15
    fn test_unstake_unstaked_token_fails() {
        let ctx = setup_test();
        let env = &ctx.env;

        ctx.stake.unstake(&ctx.user1, &vec![env, 0u64]);
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #15)")] // NotStaked = 15
    fn test_unstake_someone_elses_token_fails() {
        let ctx = setup_test();
        let env = &ctx.env;

        ctx.stake.stake(&ctx.user1, &vec![env, 0u64]);
        ctx.stake.unstake(&ctx.user2, &vec![env, 0u64]);
    }

    #[test]
    fn test_unstake_is_all_or_nothing() {
        let ctx = setup_test();
        let env = &ctx.env;

        ctx.stake.stake(&ctx.user1, &vec![env, 0u64, 1u64]);

        let result = ctx.stake.try_unstake(&ctx.user1, &vec![env, 0u64, 2u64]);
        assert_eq!(result, Err(Ok(Error::NotStaked)));

        let result = ctx.stake.try_unstake(&ctx.user1, &vec![env, 1u64, 1u64]);
        assert_eq!(result, Err(Ok(Error::NotStaked)));

        assert_eq!(
            ctx.stake.get_user_staked_tokens(&ctx.user1),
            vec![env, 0u64, 1u64]
        );
        assert_eq!(ctx.nft.owner_of(&0), ctx.stake_id);
        assert_eq!(ctx.nft.owner_of(&1), ctx.stake_id);
        assert_eq!(ctx.stake.total_staked(), 2);
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #16)")] // EmptyTokenList = 16
    fn test_unstake_empty_list_fails() {
        let ctx = setup_test();
        ctx.stake.unstake(&ctx.user1, &Vec::new(&ctx.env));
    }

    // --- Pause ---

    #[test]
    #[should_panic(expected = "Error(Contract, #3)")] // Unauthorized = 3
    fn test_non_owner_cannot_pause() {
        let ctx = setup_test();
        ctx.stake.pause(&ctx.user1);
    }

    #[test]
    fn test_owner_can_pause() {
        let ctx = setup_test();

        ctx.stake.pause(&ctx.owner);
        assert!(ctx.stake.is_paused());
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #4)")] // OperationPaused = 4
    fn test_stake_while_paused_fails() {
        let ctx = setup_test();
        let env = &ctx.env;

        ctx.stake.pause(&ctx.owner);
        ctx.stake.stake(&ctx.user1, &vec![env, 0u64]);
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #4)")] // OperationPaused = 4
    fn test_unstake_while_paused_fails() {
        let ctx = setup_test();
        let env = &ctx.env;

        ctx.stake.stake(&ctx.user1, &vec![env, 0u64]);
        ctx.stake.pause(&ctx.owner);
        ctx.stake.unstake(&ctx.user1, &vec![env, 0u64]);
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #4)")] // OperationPaused = 4
    fn test_unstake_all_while_paused_fails() {
        let ctx = setup_test();

        ctx.stake.pause(&ctx.owner);
        ctx.stake.unstake_all(&ctx.user1);
    }

    #[test]
    fn test_unpause_restores_staking() {
        let ctx = setup_test();
        let env = &ctx.env;

        ctx.stake.pause(&ctx.owner);
        ctx.stake.unpause(&ctx.owner);
        assert!(!ctx.stake.is_paused());

        ctx.stake.stake(&ctx.user1, &vec![env, 0u64]);
        assert_eq!(ctx.nft.owner_of(&0), ctx.stake_id);
    }

    #[test]
    fn test_pause_emits_event() {
        let ctx = setup_test();
        let env = &ctx.env;
        env.ledger().set_timestamp(42);

        ctx.stake.pause(&ctx.owner);

        let (topics, data) = last_event(env, &ctx.stake_id);
        let name = Symbol::try_from_val(env, &topics.get(0).unwrap()).unwrap();
        let actor = Address::try_from_val(env, &topics.get(1).unwrap()).unwrap();
        let (paused, timestamp) = <(bool, u64)>::try_from_val(env, &data).unwrap();

        assert_eq!(name, symbol_short!("paused"));
        assert_eq!(actor, ctx.owner);
        assert!(paused);
        assert_eq!(timestamp, 42);
    }

    // --- Administration ---

    #[test]
    fn test_owner_can_set_nft_contract() {
        let ctx = setup_test();
        let new_nft = Address::generate(&ctx.env);

        let result = ctx.stake.try_set_nft_contract(&ctx.user1, &new_nft);
        assert_eq!(result, Err(Ok(Error::Unauthorized)));
        assert_eq!(ctx.stake.get_nft_contract(), ctx.nft.address);

        ctx.stake.set_nft_contract(&ctx.owner, &new_nft);
        assert_eq!(ctx.stake.get_nft_contract(), new_nft);
    }

    #[test]
    fn test_set_nft_contract_refused_while_staked() {
        let ctx = setup_test();
        let env = &ctx.env;
        let new_nft = Address::generate(env);

        ctx.stake.stake(&ctx.user1, &vec![env, 0u64]);

        let result = ctx.stake.try_set_nft_contract(&ctx.owner, &new_nft);
        assert_eq!(result, Err(Ok(Error::StakesOutstanding)));

        ctx.stake.unstake_all(&ctx.user1);
        ctx.stake.set_nft_contract(&ctx.owner, &new_nft);
        assert_eq!(ctx.stake.get_nft_contract(), new_nft);
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #3)")] // Unauthorized = 3
    fn test_non_owner_cannot_withdraw() {
        let ctx = setup_test();
        ctx.stake.withdraw(&ctx.user1, &100);
    }

    #[test]
    fn test_owner_withdraws_native_balance() {
        let ctx = setup_test();

        ctx.native_admin.mint(&ctx.stake_id, &500);
        ctx.stake.withdraw(&ctx.owner, &200);

        assert_eq!(ctx.native.balance(&ctx.owner), 200);
        assert_eq!(ctx.native.balance(&ctx.stake_id), 300);
    }

    #[test]
    fn test_withdraw_above_balance_fails() {
        let ctx = setup_test();

        ctx.native_admin.mint(&ctx.stake_id, &500);

        let result = ctx.stake.try_withdraw(&ctx.owner, &501);
        assert_eq!(result, Err(Ok(Error::InsufficientBalance)));

        let result = ctx.stake.try_withdraw(&ctx.owner, &0);
        assert_eq!(result, Err(Ok(Error::InvalidAmount)));

        assert_eq!(ctx.native.balance(&ctx.stake_id), 500);
    }
}
