#![no_std]

mod events;
mod pricing;
mod storage;

use collectible_common::storage::{extend_instance, extend_persistent};
use collectible_common::{access, guard, pause, Error, TokenLedgerClient};
use soroban_sdk::{contract, contractimpl, log, token, Address, Env, String, Vec};
use storage::{DataKey, DiscountRecord, DEFAULT_UNIT_PRICE, MAX_CODES_PAGE, PRICE_DECIMALS};

/// Collectible Sale Contract
///
/// Sells collectible tokens for a payment token at a fixed unit price,
/// optionally discounted by a registered discount code.
///
/// Key features:
/// - Unknown codes fall back to a zero-discount record instead of failing
/// - Payment and minting happen in one all-or-nothing invocation
/// - Every code tracks purchases, tokens minted and net revenue
/// - Owner can pause sales
#[contract]
pub struct NftSale;

#[contractimpl]
impl NftSale {
    /// Constructor: delegates to initialize().
    pub fn __constructor(
        env: Env,
        owner: Address,
        nft_contract: Address,
        payment_token: Address,
        receiver_wallet: Address,
        fallback_code: String,
        fallback_metadata: String,
    ) {
        Self::initialize(
            env,
            owner,
            nft_contract,
            payment_token,
            receiver_wallet,
            fallback_code,
            fallback_metadata,
        )
        .expect("initialization failed");
    }

    /// Initialize the sale.
    ///
    /// # Arguments
    /// * `owner` - Address that administers the sale
    /// * `nft_contract` - Token contract; the sale must hold its minter role
    /// * `payment_token` - Token contract buyers pay with
    /// * `receiver_wallet` - Address credited with every payment
    /// * `fallback_code` - Zero-discount code used for unregistered codes
    /// * `fallback_metadata` - Metadata tag of the fallback code
    pub fn initialize(
        env: Env,
        owner: Address,
        nft_contract: Address,
        payment_token: Address,
        receiver_wallet: Address,
        fallback_code: String,
        fallback_metadata: String,
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
            .set(&DataKey::PaymentToken, &payment_token);
        env.storage()
            .instance()
            .set(&DataKey::ReceiverWallet, &receiver_wallet);
        env.storage()
            .instance()
            .set(&DataKey::UnitPrice, &DEFAULT_UNIT_PRICE);
        env.storage()
            .instance()
            .set(&DataKey::FallbackCode, &fallback_code);
        extend_instance(&env);

        Self::register_code(&env, &fallback_code, 0, &fallback_metadata)?;

        Ok(())
    }

    /// Buy collectible tokens.
    ///
    /// # Arguments
    /// * `buyer` - Buyer paying and receiving the tokens (must authorize and
    ///             have approved the sale contract on the payment token)
    /// * `amount` - Number of tokens to mint
    /// * `code` - Discount code; unregistered codes buy at full price under
    ///            the fallback code
    ///
    /// # Returns
    /// Ids of the minted tokens
    pub fn buy_nft(env: Env, buyer: Address, amount: u32, code: String) -> Result<Vec<u64>, Error> {
        access::require_initialized(&env)?;
        pause::require_not_paused(&env)?;

        if amount == 0 {
            return Err(Error::InvalidAmount);
        }

        buyer.require_auth();

        guard::non_reentrant(&env, || Self::execute_purchase(&env, &buyer, amount, &code))
    }

    /// Net price of `amount` tokens under `code`, without buying.
    pub fn quote(env: Env, amount: u32, code: String) -> Result<i128, Error> {
        access::require_initialized(&env)?;

        let record = Self::resolve(&env, &code)?;
        let unit_price = Self::price(env)?;
        pricing::net_price(unit_price, amount, record.discount_percent)
    }

    /// Register a discount code (owner only).
    ///
    /// Codes are case-sensitive and immutable; registering an existing code
    /// fails with `DuplicateCode`.
    ///
    /// # Arguments
    /// * `discount_percent` - Percent off, 0..=99
    /// * `metadata` - Metadata tag for tokens minted under this code
    pub fn add_discount_code(
        env: Env,
        owner: Address,
        code: String,
        discount_percent: u32,
        metadata: String,
    ) -> Result<(), Error> {
        access::require_owner(&env, &owner)?;

        Self::register_code(&env, &code, discount_percent, &metadata)?;
        extend_instance(&env);

        events::discount_added(&env, &owner, &code, discount_percent, &metadata);
        Ok(())
    }

    /// Get the record of a registered code.
    pub fn get_discount(env: Env, code: String) -> Result<DiscountRecord, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::Discount(code))
            .ok_or(Error::UnknownCode)
    }

    /// Number of registered codes, fallback included.
    pub fn discount_code_count(env: Env) -> u32 {
        env.storage()
            .instance()
            .get(&DataKey::DiscountCodeCount)
            .unwrap_or(0)
    }

    /// Registered codes in registration order, fallback first.
    ///
    /// Codes are stored one entry each; this returns at most
    /// `min(limit, MAX_CODES_PAGE)` of them starting at index `start`.
    pub fn list_discount_codes(env: Env, start: u32, limit: u32) -> Vec<String> {
        let count = Self::discount_code_count(env.clone());
        let end = start
            .saturating_add(limit.min(MAX_CODES_PAGE))
            .min(count);

        let mut codes = Vec::new(&env);
        for index in start..end {
            if let Some(code) = env
                .storage()
                .persistent()
                .get(&DataKey::DiscountCodeAt(index))
            {
                codes.push_back(code);
            }
        }
        codes
    }

    /// Update the unit price (owner only).
    pub fn set_price(env: Env, owner: Address, new_price: i128) -> Result<(), Error> {
        access::require_owner(&env, &owner)?;

        if new_price <= 0 {
            return Err(Error::InvalidPrice);
        }

        env.storage().instance().set(&DataKey::UnitPrice, &new_price);
        extend_instance(&env);

        events::price_set(&env, &owner, new_price);
        Ok(())
    }

    /// Get the unit price in payment base units.
    pub fn price(env: Env) -> Result<i128, Error> {
        Self::read_instance(&env, DataKey::UnitPrice)
    }

    /// Decimals of the payment base unit the price is expressed in.
    pub fn price_decimals(_env: Env) -> u32 {
        PRICE_DECIMALS
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

    pub fn get_nft_contract(env: Env) -> Result<Address, Error> {
        Self::read_instance(&env, DataKey::NftContract)
    }

    pub fn get_payment_token(env: Env) -> Result<Address, Error> {
        Self::read_instance(&env, DataKey::PaymentToken)
    }

    pub fn get_receiver_wallet(env: Env) -> Result<Address, Error> {
        Self::read_instance(&env, DataKey::ReceiverWallet)
    }

    pub fn get_fallback_code(env: Env) -> Result<String, Error> {
        Self::read_instance(&env, DataKey::FallbackCode)
    }

    // --- Internal helpers ---

    fn read_instance<V>(env: &Env, key: DataKey) -> Result<V, Error>
    where
        V: soroban_sdk::TryFromVal<Env, soroban_sdk::Val>,
    {
        access::require_initialized(env)?;
        env.storage()
            .instance()
            .get(&key)
            .ok_or(Error::StorageCorrupted)
    }

    fn execute_purchase(env: &Env, buyer: &Address, amount: u32, code: &String) -> Result<Vec<u64>, Error> {
        let mut record = Self::resolve(env, code)?;
        let unit_price: i128 = Self::read_instance(env, DataKey::UnitPrice)?;
        let net_price = pricing::net_price(unit_price, amount, record.discount_percent)?;

        // Counters are computed up front so an overflow aborts before any
        // payment or mint happens.
        record.used = record.used.checked_add(1).ok_or(Error::ArithmeticOverflow)?;
        record.nft_amount = record
            .nft_amount
            .checked_add(amount as u64)
            .ok_or(Error::ArithmeticOverflow)?;
        record.usd_amount = record
            .usd_amount
            .checked_add(net_price)
            .ok_or(Error::ArithmeticOverflow)?;

        let payment_token: Address = Self::read_instance(env, DataKey::PaymentToken)?;
        let receiver_wallet: Address = Self::read_instance(env, DataKey::ReceiverWallet)?;
        let nft_contract: Address = Self::read_instance(env, DataKey::NftContract)?;
        let sale = env.current_contract_address();

        let token_client = token::Client::new(env, &payment_token);
        if token_client.balance(buyer) < net_price
            || token_client.allowance(buyer, &sale) < net_price
        {
            return Err(Error::PaymentFailed);
        }
        if net_price > 0
            && !matches!(
                token_client.try_transfer_from(&sale, buyer, &receiver_wallet, &net_price),
                Ok(Ok(()))
            )
        {
            return Err(Error::PaymentFailed);
        }

        let ledger = TokenLedgerClient::new(env, &nft_contract);
        let mut minted = Vec::new(env);
        for _ in 0..amount {
            let token_id = ledger.mint(&sale, buyer, &record.metadata);
            minted.push_back(token_id);
        }

        let record_key = DataKey::Discount(record.code.clone());
        env.storage().persistent().set(&record_key, &record);
        extend_persistent(env, &record_key);
        extend_instance(env);

        log!(env, "purchase", buyer.clone(), amount, net_price, record.code.clone());
        events::purchase(env, buyer, amount, net_price, code);

        Ok(minted)
    }

    /// Registered record for `code`, or the fallback record.
    fn resolve(env: &Env, code: &String) -> Result<DiscountRecord, Error> {
        if let Some(record) = env
            .storage()
            .persistent()
            .get(&DataKey::Discount(code.clone()))
        {
            return Ok(record);
        }

        let fallback_code: String = Self::read_instance(env, DataKey::FallbackCode)?;
        env.storage()
            .persistent()
            .get(&DataKey::Discount(fallback_code))
            .ok_or(Error::StorageCorrupted)
    }

    fn register_code(env: &Env, code: &String, discount_percent: u32, metadata: &String) -> Result<(), Error> {
        if code.len() == 0 || discount_percent >= storage::PERCENT_DENOMINATOR {
            return Err(Error::InvalidDiscount);
        }

        let key = DataKey::Discount(code.clone());
        if env.storage().persistent().has(&key) {
            return Err(Error::DuplicateCode);
        }

        let record = DiscountRecord {
            code: code.clone(),
            discount_percent,
            metadata: metadata.clone(),
            used: 0,
            nft_amount: 0,
            usd_amount: 0,
        };
        env.storage().persistent().set(&key, &record);
        extend_persistent(env, &key);

        let index = Self::discount_code_count(env.clone());
        let index_key = DataKey::DiscountCodeAt(index);
        env.storage().persistent().set(&index_key, code);
        extend_persistent(env, &index_key);
        let count = index.checked_add(1).ok_or(Error::ArithmeticOverflow)?;
        env.storage().instance().set(&DataKey::DiscountCodeCount, &count);

        Ok(())
    }
}
