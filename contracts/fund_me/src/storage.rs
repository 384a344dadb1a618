//! # Storage
//!
//! Typed helpers over the two Soroban storage tiers used by FundMe.
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key                | Type          | Description                          |
//! |--------------------|---------------|--------------------------------------|
//! | `Owner`            | `Address`     | Sole identity allowed to withdraw    |
//! | `PriceFeed`        | `Address`     | SEP-40 price feed contract           |
//! | `NativeToken`      | `Address`     | Asset contract being collected       |
//! | `TotalBalance`     | `i128`        | Sum of every contributor balance     |
//! | `ContributorCount` | `u32`         | Length of the contributor sequence   |
//! | `Phase`            | `LedgerPhase` | Withdrawal reentrancy guard          |
//! | `Round`            | `u32`         | Current funding round                |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                       | Type      | Description                          |
//! |---------------------------|-----------|--------------------------------------|
//! | `Balance(round, addr)`    | `i128`    | Amount funded by `addr` in `round`   |
//! | `Contributor(round, i)`   | `Address` | `i`-th distinct contributor of `round`|
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.
//!
//! ## Rounds
//!
//! Every per-contributor entry is keyed by the round it was written in, and
//! only the current round is ever read. A withdrawal starts a new round by
//! bumping `Round` and resetting the counters, which empties the ledger with a
//! constant number of writes however many contributors funded it. Entries of
//! past rounds are never read again and lapse with their TTL.

use soroban_sdk::{contracttype, Address, Env};

use crate::types::LedgerPhase;

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Owner,
    PriceFeed,
    NativeToken,
    TotalBalance,
    ContributorCount,
    Phase,
    Round,
    /// Per-contributor funded amount in a round (Persistent).
    Balance(u32, Address),
    /// Contributor at a sequence position in a round (Persistent).
    Contributor(u32, u32),
}

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

// ── Configuration (written once by the constructor) ──────────────────

/// Persist the deployment configuration and an empty, `Active` ledger.
pub fn init_config(env: &Env, owner: &Address, price_feed: &Address, native_token: &Address) {
    let instance = env.storage().instance();
    instance.set(&DataKey::Owner, owner);
    instance.set(&DataKey::PriceFeed, price_feed);
    instance.set(&DataKey::NativeToken, native_token);
    instance.set(&DataKey::TotalBalance, &0i128);
    instance.set(&DataKey::ContributorCount, &0u32);
    instance.set(&DataKey::Phase, &LedgerPhase::Active);
    instance.set(&DataKey::Round, &0u32);
    bump_instance(env);
}

fn read_address(env: &Env, key: &DataKey) -> Address {
    bump_instance(env);
    // Written by the constructor before any entry point can run.
    env.storage()
        .instance()
        .get(key)
        .expect("contract not constructed")
}

pub fn get_owner(env: &Env) -> Address {
    read_address(env, &DataKey::Owner)
}

pub fn get_price_feed(env: &Env) -> Address {
    read_address(env, &DataKey::PriceFeed)
}

pub fn get_native_token(env: &Env) -> Address {
    read_address(env, &DataKey::NativeToken)
}

// ── Ledger totals ────────────────────────────────────────────────────

pub fn get_total_balance(env: &Env) -> i128 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::TotalBalance)
        .unwrap_or(0)
}

pub fn set_total_balance(env: &Env, total: i128) {
    env.storage().instance().set(&DataKey::TotalBalance, &total);
}

pub fn get_contributor_count(env: &Env) -> u32 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::ContributorCount)
        .unwrap_or(0)
}

fn set_contributor_count(env: &Env, count: u32) {
    env.storage()
        .instance()
        .set(&DataKey::ContributorCount, &count);
}

pub fn get_phase(env: &Env) -> LedgerPhase {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Phase)
        .unwrap_or(LedgerPhase::Active)
}

pub fn set_phase(env: &Env, phase: LedgerPhase) {
    env.storage().instance().set(&DataKey::Phase, &phase);
}

pub fn get_round(env: &Env) -> u32 {
    bump_instance(env);
    env.storage().instance().get(&DataKey::Round).unwrap_or(0)
}

// ── Contributor entries ──────────────────────────────────────────────

/// Balance funded by `contributor` this round, or `None` if it has no entry.
pub fn load_balance(env: &Env, contributor: &Address) -> Option<i128> {
    let key = DataKey::Balance(get_round(env), contributor.clone());
    let balance = env.storage().persistent().get(&key);
    if balance.is_some() {
        bump_persistent(env, &key);
    }
    balance
}

pub fn save_balance(env: &Env, contributor: &Address, balance: i128) {
    let key = DataKey::Balance(get_round(env), contributor.clone());
    env.storage().persistent().set(&key, &balance);
    bump_persistent(env, &key);
}

pub fn load_contributor(env: &Env, index: u32) -> Option<Address> {
    let key = DataKey::Contributor(get_round(env), index);
    let contributor = env.storage().persistent().get(&key);
    if contributor.is_some() {
        bump_persistent(env, &key);
    }
    contributor
}

/// Append `contributor` at the end of this round's sequence. Returns its index.
pub fn push_contributor(env: &Env, contributor: &Address) -> u32 {
    let index = get_contributor_count(env);
    let key = DataKey::Contributor(get_round(env), index);
    env.storage().persistent().set(&key, contributor);
    bump_persistent(env, &key);
    set_contributor_count(env, index + 1);
    index
}

/// Close the current round: switch to `next_round` and empty the ledger.
/// Returns how many contributors the closed round had.
pub fn start_round(env: &Env, next_round: u32) -> u32 {
    let count = get_contributor_count(env);
    let instance = env.storage().instance();
    instance.set(&DataKey::Round, &next_round);
    instance.set(&DataKey::ContributorCount, &0u32);
    instance.set(&DataKey::TotalBalance, &0i128);
    count
}
