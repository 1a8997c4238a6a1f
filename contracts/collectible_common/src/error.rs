use soroban_sdk::contracterror;

/// Errors shared by the token ledger, sale and staking contracts.
///
/// Codes are stable across all three contracts so clients can decode a
/// failure without knowing which contract raised it.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    /// Contract already initialized
    AlreadyInitialized = 1,
    /// Contract not initialized
    NotInitialized = 2,
    /// Caller does not hold the required role
    Unauthorized = 3,
    /// Contract is paused
    OperationPaused = 4,
    /// A state-mutating call is already in progress
    Reentrant = 5,
    /// Discount percent must be below 100 and the code non-empty
    InvalidDiscount = 6,
    /// Discount code already registered
    DuplicateCode = 7,
    /// Discount code not registered
    UnknownCode = 8,
    /// Amount must be positive
    InvalidAmount = 9,
    /// Price must be positive
    InvalidPrice = 10,
    /// Buyer balance or allowance does not cover the price
    PaymentFailed = 11,
    /// Arithmetic overflow
    ArithmeticOverflow = 12,
    /// Caller is not the owner of the token
    NotOwner = 13,
    /// Token is already staked
    AlreadyStaked = 14,
    /// Token is not staked by the caller
    NotStaked = 15,
    /// Token id list must not be empty
    EmptyTokenList = 16,
    /// Requested amount exceeds the held balance
    InsufficientBalance = 17,
    /// Tokens are still staked against the current token contract
    StakesOutstanding = 18,
    /// Token id was never minted
    NonExistentToken = 19,
    /// Spender is neither the owner nor an approved operator
    NotApproved = 20,
    /// Critical storage data missing (contract state corrupted)
    StorageCorrupted = 21,
}
