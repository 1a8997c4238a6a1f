use soroban_sdk::{symbol_short, Address, Env, String};

/// Emitted once per successful purchase with the code exactly as supplied.
pub fn purchase(env: &Env, buyer: &Address, amount: u32, net_price: i128, code: &String) {
    env.events().publish(
        (symbol_short!("purchase"), buyer.clone()),
        (amount, net_price, code.clone()),
    );
}

pub fn price_set(env: &Env, owner: &Address, new_price: i128) {
    env.events()
        .publish((symbol_short!("price"), owner.clone()), new_price);
}

pub fn discount_added(env: &Env, owner: &Address, code: &String, discount_percent: u32, metadata: &String) {
    env.events().publish(
        (symbol_short!("discount"), owner.clone()),
        (code.clone(), discount_percent, metadata.clone()),
    );
}
