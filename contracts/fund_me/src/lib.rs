//! # FundMe Contract
//!
//! A contribution ledger for a single beneficiary. Anyone may fund it with the
//! native asset as long as the contribution is worth at least
//! [`MINIMUM_REFERENCE_VALUE`] according to a SEP-40 price feed; only the owner
//! fixed at deployment may withdraw, and a withdrawal always takes the whole
//! balance and resets the ledger.
//!
//! | Phase        | Entry Point(s)                                       |
//! |--------------|------------------------------------------------------|
//! | Deployment   | `__constructor(owner, price_feed, native_token)`     |
//! | Funding      | [`FundMe::fund`]                                     |
//! | Withdrawal   | [`FundMe::withdraw`]                                 |
//! | Queries      | `get_balance`, `get_contributor`, `get_owner`, ...   |
//!
//! ## Architecture
//!
//! Ownership checks live in [`owner`], ledger transitions in [`ledger`],
//! valuation in [`price_feed`] and storage access in `storage`. This file
//! contains only the public entry points.

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, Address, Env};

pub mod events;
pub mod ledger;
pub mod owner;
pub mod price_feed;
mod storage;
mod types;

#[cfg(test)]
mod mocks;

pub use price_feed::{
    PriceConverter, PriceFeedClient, MINIMUM_REFERENCE_VALUE, NATIVE_DECIMALS, REFERENCE_DECIMALS,
};
pub use types::{Asset, LedgerPhase, PriceData};

use price_feed::OracleAdapter;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    InsufficientContribution = 1,
    NotOwner = 2,
    OracleUnavailable = 3,
    TransferFailed = 4,
    IndexOutOfRange = 5,
    Overflow = 6,
    WithdrawalInProgress = 7,
}

#[contract]
pub struct FundMe;

#[contractimpl]
impl FundMe {
    // ─────────────────────────────────────────────────────────
    // Deployment
    // ─────────────────────────────────────────────────────────

    /// Deploy the ledger.
    ///
    /// - `owner` becomes the only address able to withdraw; it cannot change.
    /// - `price_feed` is the SEP-40 oracle used to value contributions.
    /// - `native_token` is the asset contract contributions are paid in.
    pub fn __constructor(env: Env, owner: Address, price_feed: Address, native_token: Address) {
        owner::init_owner(&env, &owner, &price_feed, &native_token);
    }

    // ─────────────────────────────────────────────────────────
    // State-changing entry points
    // ─────────────────────────────────────────────────────────

    /// Contribute `amount` of the native asset.
    ///
    /// - `contributor` must authorize the call and the transfer.
    /// - Fails with `InsufficientContribution` if `amount` is worth less than
    ///   [`MINIMUM_REFERENCE_VALUE`], and with `OracleUnavailable` if the
    ///   price feed cannot value it.
    ///
    /// Returns the contributor's balance after the contribution.
    pub fn fund(env: Env, contributor: Address, amount: i128) -> Result<i128, Error> {
        contributor.require_auth();
        let adapter = OracleAdapter::new(
            &env,
            &storage::get_price_feed(&env),
            &storage::get_native_token(&env),
        );
        ledger::fund(&env, &adapter, &contributor, amount)
    }

    /// Pay the entire balance to the owner and reset the ledger.
    ///
    /// - `caller` must authorize and be the owner, else `NotOwner`.
    /// - If the payout is rejected the call fails with `TransferFailed` and
    ///   the ledger is left untouched.
    ///
    /// Returns the amount paid out.
    pub fn withdraw(env: Env, caller: Address) -> Result<i128, Error> {
        caller.require_auth();
        let owner = owner::require_owner(&env, &caller)?;
        ledger::withdraw(&env, &owner)
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    /// Amount funded by `contributor` since the last withdrawal.
    pub fn get_balance(env: Env, contributor: Address) -> i128 {
        ledger::balance_of(&env, &contributor)
    }

    /// Contributor at `index` in funding order, or `IndexOutOfRange`.
    pub fn get_contributor(env: Env, index: u32) -> Result<Address, Error> {
        ledger::contributor_at(&env, index)
    }

    pub fn get_contributor_count(env: Env) -> u32 {
        storage::get_contributor_count(&env)
    }

    pub fn get_owner(env: Env) -> Address {
        owner::owner(&env)
    }

    pub fn get_total_balance(env: Env) -> i128 {
        storage::get_total_balance(&env)
    }

    pub fn get_price_feed(env: Env) -> Address {
        storage::get_price_feed(&env)
    }

    pub fn get_native_token(env: Env) -> Address {
        storage::get_native_token(&env)
    }

    /// Minimum contribution value, in reference units with
    /// [`REFERENCE_DECIMALS`] decimals.
    pub fn minimum_reference_value(_env: Env) -> i128 {
        MINIMUM_REFERENCE_VALUE
    }
}
