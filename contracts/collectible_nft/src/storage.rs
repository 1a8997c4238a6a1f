use soroban_sdk::{contracttype, Address};

/// Storage keys for the token contract.
#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    /// Collection name
    Name,
    /// Collection symbol
    Symbol,
    /// Base URI for token metadata
    BaseUri,
    /// Next token id to assign (also the total supply)
    NextTokenId,
    /// Owner of a token id
    TokenOwner(u64),
    /// Metadata tag a token was minted with
    TokenMetadata(u64),
    /// Number of tokens held by an address
    Balance(Address),
    /// Operator approval: OperatorApproval(owner, operator)
    OperatorApproval(Address, Address),
}
