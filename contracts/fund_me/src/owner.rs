//! # Ownership
//!
//! FundMe has exactly one privileged identity, the owner, fixed by the
//! constructor. There is no transfer path: the stored address never changes
//! for the lifetime of the contract.
//!
//! The owner is the only address allowed to withdraw. Everything else is
//! either permissionless (`fund`, signed by the contributor) or read-only.

use soroban_sdk::{log, Address, Env};

use crate::storage;
use crate::Error;

/// Record `owner` at construction time. The constructor runs exactly once,
/// so nothing ever overwrites it.
pub fn init_owner(env: &Env, owner: &Address, price_feed: &Address, native_token: &Address) {
    storage::init_config(env, owner, price_feed, native_token);
}

/// Return the owner address.
pub fn owner(env: &Env) -> Address {
    storage::get_owner(env)
}

/// Fail with [`Error::NotOwner`] unless `caller` is the owner.
///
/// `caller` must already have been authenticated via `require_auth`.
pub fn require_owner(env: &Env, caller: &Address) -> Result<Address, Error> {
    let owner = owner(env);
    if *caller != owner {
        log!(env, "withdraw rejected: caller is not the owner");
        return Err(Error::NotOwner);
    }
    Ok(owner)
}
