//! # Contribution ledger
//!
//! State transitions of the ledger. Entry points in `lib.rs` authenticate the
//! caller and delegate here.
//!
//! ## Atomicity
//!
//! Every failure is returned as an `Err`, which makes the host discard all
//! storage writes of the invocation. A rejected `fund` or a `withdraw` whose
//! payout bounces therefore leaves the ledger exactly as it was.
//!
//! ## Withdrawal ordering
//!
//! `withdraw` follows checks-effects-interactions: the ledger is emptied and
//! the phase set to [`LedgerPhase::Withdrawing`] before the token transfer,
//! which is the only point where foreign code runs. Any call back into the
//! ledger from there sees an empty, withdrawing ledger and is refused.

use soroban_sdk::{log, token, Address, Env};

use crate::events;
use crate::price_feed::{PriceConverter, MINIMUM_REFERENCE_VALUE};
use crate::storage;
use crate::types::LedgerPhase;
use crate::Error;

fn require_active(env: &Env) -> Result<(), Error> {
    match storage::get_phase(env) {
        LedgerPhase::Active => Ok(()),
        LedgerPhase::Withdrawing => {
            log!(env, "ledger is withdrawing; call refused");
            Err(Error::WithdrawalInProgress)
        }
    }
}

/// Move `amount` of the native token, surfacing a bounced transfer as
/// [`Error::TransferFailed`].
fn transfer_native(env: &Env, from: &Address, to: &Address, amount: i128) -> Result<(), Error> {
    let token = token::Client::new(env, &storage::get_native_token(env));
    match token.try_transfer(from, to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => {
            log!(env, "native transfer of {} failed", amount);
            Err(Error::TransferFailed)
        }
    }
}

/// Record a contribution of `amount` from `contributor`.
///
/// Returns the contributor's new balance.
pub fn fund(
    env: &Env,
    converter: &impl PriceConverter,
    contributor: &Address,
    amount: i128,
) -> Result<i128, Error> {
    require_active(env)?;

    if amount <= 0 {
        log!(env, "fund rejected: non-positive amount {}", amount);
        return Err(Error::InsufficientContribution);
    }

    let value = converter.convert(amount)?;
    if value < MINIMUM_REFERENCE_VALUE {
        log!(env, "fund rejected: value {} below minimum", value);
        return Err(Error::InsufficientContribution);
    }

    let previous = storage::load_balance(env, contributor);
    let balance = previous
        .unwrap_or(0)
        .checked_add(amount)
        .ok_or(Error::Overflow)?;
    let total = storage::get_total_balance(env)
        .checked_add(amount)
        .ok_or(Error::Overflow)?;

    transfer_native(env, contributor, &env.current_contract_address(), amount)?;

    if previous.is_none() {
        storage::push_contributor(env, contributor);
    }
    storage::save_balance(env, contributor, balance);
    storage::set_total_balance(env, total);

    events::emit_funded(env, contributor.clone(), amount, total);
    Ok(balance)
}

/// Pay the whole ledger out to `owner` and reset it.
///
/// Returns the amount paid out.
pub fn withdraw(env: &Env, owner: &Address) -> Result<i128, Error> {
    require_active(env)?;

    let amount = storage::get_total_balance(env);
    let next_round = storage::get_round(env)
        .checked_add(1)
        .ok_or(Error::Overflow)?;

    // Effects: the ledger is empty before any foreign code runs.
    storage::set_phase(env, LedgerPhase::Withdrawing);
    let cleared = storage::start_round(env, next_round);

    // Interaction.
    if amount > 0 {
        transfer_native(env, &env.current_contract_address(), owner, amount)?;
    }

    storage::set_phase(env, LedgerPhase::Active);
    events::emit_withdrawn(env, owner.clone(), amount, cleared);
    Ok(amount)
}

/// Balance funded by `contributor` since the last withdrawal.
pub fn balance_of(env: &Env, contributor: &Address) -> i128 {
    storage::load_balance(env, contributor).unwrap_or(0)
}

/// Contributor at position `index` of the funding sequence.
pub fn contributor_at(env: &Env, index: u32) -> Result<Address, Error> {
    if index >= storage::get_contributor_count(env) {
        return Err(Error::IndexOutOfRange);
    }
    storage::load_contributor(env, index).ok_or(Error::IndexOutOfRange)
}
