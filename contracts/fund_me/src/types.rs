//! # Types
//!
//! Shared data structures used across the FundMe modules.
//!
//! ## Ledger phase
//!
//! [`LedgerPhase`] is the explicit reentrancy guard for withdrawals:
//!
//! ```text
//! Active ──► Withdrawing ──► Active
//! ```
//!
//! `Withdrawing` is only ever stored while the outbound transfer of a
//! withdrawal is in flight. A withdrawal that fails returns an error, so the
//! host discards the `Withdrawing` write together with every other write of
//! that invocation. Between invocations the ledger is always `Active`.

use soroban_sdk::{contracttype, Address, Symbol};

/// Macro-state of the contribution ledger.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LedgerPhase {
    /// Accepting contributions and withdrawals.
    Active,
    /// A withdrawal has cleared the ledger and is paying out the owner.
    Withdrawing,
}

/// Asset identifier understood by SEP-40 price feeds.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Asset {
    /// Stellar asset contract address.
    Stellar(Address),
    /// Any other asset, identified by ticker.
    Other(Symbol),
}

/// Latest price published by a SEP-40 feed.
///
/// `price` is a fixed-point number with the feed's own `decimals()` precision.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PriceData {
    pub price: i128,
    pub timestamp: u64,
}
