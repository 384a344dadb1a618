use soroban_sdk::{contracttype, symbol_short, Address, Env};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Funded {
    pub contributor: Address,
    pub amount: i128,
    pub total_balance: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Withdrawn {
    pub owner: Address,
    pub amount: i128,
    pub contributors: u32,
}

pub fn emit_funded(env: &Env, contributor: Address, amount: i128, total_balance: i128) {
    let topics = (symbol_short!("funded"), contributor.clone());
    let data = Funded {
        contributor,
        amount,
        total_balance,
    };
    env.events().publish(topics, data);
}

pub fn emit_withdrawn(env: &Env, owner: Address, amount: i128, contributors: u32) {
    let topics = (symbol_short!("withdrawn"), owner.clone());
    let data = Withdrawn {
        owner,
        amount,
        contributors,
    };
    env.events().publish(topics, data);
}
