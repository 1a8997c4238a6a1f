use soroban_sdk::{contracttype, Address, String};

/// Storage keys for the sale contract.
#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    /// Token contract the sale mints through
    NftContract,
    /// Payment token contract (e.g., USDT SAC)
    PaymentToken,
    /// Address credited with every payment
    ReceiverWallet,
    /// Price of one token in payment base units
    UnitPrice,
    /// Code substituted for unregistered codes
    FallbackCode,
    /// Discount record by code
    Discount(String),
    /// Number of registered codes
    DiscountCodeCount,
    /// Registered code by registration index
    DiscountCodeAt(u32),
}

/// Pricing and usage record of one discount code.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct DiscountRecord {
    pub code: String,
    /// Percent taken off the total, 0..=99
    pub discount_percent: u32,
    /// Metadata tag given to tokens minted under this code
    pub metadata: String,
    /// Successful purchases
    pub used: u64,
    /// Tokens minted
    pub nft_amount: u64,
    /// Net payment collected
    pub usd_amount: i128,
}

/// Payment token decimals assumed by the price constants.
pub const PRICE_DECIMALS: u32 = 6;

/// One whole payment token in base units (10^PRICE_DECIMALS).
pub const PRICE_UNIT: i128 = 1_000_000;

/// Unit price set at initialization: 200 payment tokens.
pub const DEFAULT_UNIT_PRICE: i128 = 200 * PRICE_UNIT;

/// Discounts are whole percents.
pub const PERCENT_DENOMINATOR: u32 = 100;

/// Upper bound on codes returned by one `list_discount_codes` page.
pub const MAX_CODES_PAGE: u32 = 50;
