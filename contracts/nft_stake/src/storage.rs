use soroban_sdk::{contracttype, Address};

/// Storage keys for the staking contract.
#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    /// Token contract whose tokens are custodied
    NftContract,
    /// Native asset contract swept by withdraw
    NativeToken,
    /// Token ids staked by an owner, in staking order
    Staked(Address),
    /// Owner that staked a token id
    StakedBy(u64),
    /// Number of token ids currently in custody
    TotalStaked,
}
