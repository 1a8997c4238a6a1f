use soroban_sdk::{symbol_short, Address, Env};

pub fn mint(env: &Env, to: &Address, token_id: u64) {
    env.events()
        .publish((symbol_short!("mint"), to.clone()), token_id);
}

pub fn transfer(env: &Env, from: &Address, to: &Address, token_id: u64) {
    env.events().publish(
        (symbol_short!("transfer"), from.clone(), to.clone()),
        token_id,
    );
}

pub fn approve_for_all(env: &Env, owner: &Address, operator: &Address, approved: bool) {
    env.events().publish(
        (symbol_short!("approve"), owner.clone()),
        (operator.clone(), approved),
    );
}
