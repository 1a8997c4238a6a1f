use soroban_sdk::{symbol_short, Address, Env};

pub fn stake(env: &Env, owner: &Address, token_id: u64, timestamp: u64) {
    env.events()
        .publish((symbol_short!("stake"), owner.clone()), (token_id, timestamp));
}

pub fn unstake(env: &Env, owner: &Address, token_id: u64, timestamp: u64) {
    env.events()
        .publish((symbol_short!("unstake"), owner.clone()), (token_id, timestamp));
}

pub fn nft_contract_set(env: &Env, owner: &Address, nft_contract: &Address) {
    env.events()
        .publish((symbol_short!("nft_set"), owner.clone()), nft_contract.clone());
}

pub fn withdraw(env: &Env, owner: &Address, amount: i128) {
    env.events()
        .publish((symbol_short!("withdraw"), owner.clone()), amount);
}
