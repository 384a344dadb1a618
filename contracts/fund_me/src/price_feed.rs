//! # Price feed adapter
//!
//! Converts an amount of the native asset into its value in the reference
//! currency, using the latest price published by a SEP-40 price feed.
//!
//! All values are fixed-point `i128`s:
//!
//! | Quantity          | Decimals                     |
//! |-------------------|------------------------------|
//! | native amount     | [`NATIVE_DECIMALS`] (stroops)|
//! | feed price        | `feed.decimals()`            |
//! | reference value   | [`REFERENCE_DECIMALS`]       |
//!
//! so `value = amount * price * 10^(REFERENCE - (feed + NATIVE))`. The product
//! is formed before any division so precision is only lost once, at the end.

use soroban_sdk::{contractclient, log, Address, Env};

use crate::types::{Asset, PriceData};
use crate::Error;

/// Decimals of the reference currency (e.g. USD with 18 decimals).
pub const REFERENCE_DECIMALS: u32 = 18;

/// Decimals of the native asset (1 XLM = 10^7 stroops).
pub const NATIVE_DECIMALS: u32 = 7;

/// Smallest accepted contribution, in reference units: 50.
pub const MINIMUM_REFERENCE_VALUE: i128 = 50 * 10i128.pow(REFERENCE_DECIMALS);

/// Subset of the SEP-40 oracle interface the adapter relies on.
#[contractclient(name = "PriceFeedClient")]
pub trait PriceFeed {
    fn lastprice(env: Env, asset: Asset) -> Option<PriceData>;
    fn decimals(env: Env) -> u32;
}

/// Anything that can value a native amount in the reference currency.
pub trait PriceConverter {
    fn convert(&self, amount: i128) -> Result<i128, Error>;
}

/// [`PriceConverter`] backed by an on-chain price feed.
pub struct OracleAdapter<'a> {
    env: &'a Env,
    feed: PriceFeedClient<'a>,
    asset: Asset,
}

impl<'a> OracleAdapter<'a> {
    pub fn new(env: &'a Env, feed: &Address, native_token: &Address) -> Self {
        Self {
            env,
            feed: PriceFeedClient::new(env, feed),
            asset: Asset::Stellar(native_token.clone()),
        }
    }

    fn latest_price(&self) -> Result<i128, Error> {
        match self.feed.try_lastprice(&self.asset) {
            Ok(Ok(Some(data))) if data.price > 0 => Ok(data.price),
            Ok(Ok(Some(data))) => {
                log!(self.env, "price feed returned non-positive price {}", data.price);
                Err(Error::OracleUnavailable)
            }
            Ok(Ok(None)) => {
                log!(self.env, "price feed has no price for native asset");
                Err(Error::OracleUnavailable)
            }
            _ => {
                log!(self.env, "price feed call failed");
                Err(Error::OracleUnavailable)
            }
        }
    }

    fn feed_decimals(&self) -> Result<u32, Error> {
        match self.feed.try_decimals() {
            Ok(Ok(decimals)) => Ok(decimals),
            _ => {
                log!(self.env, "price feed decimals unavailable");
                Err(Error::OracleUnavailable)
            }
        }
    }
}

impl PriceConverter for OracleAdapter<'_> {
    fn convert(&self, amount: i128) -> Result<i128, Error> {
        let price = self.latest_price()?;
        let decimals = self.feed_decimals()?;
        Ok(to_reference_value(amount, price, decimals))
    }
}

/// Value `amount` (native units) at `price` (with `price_decimals`) in
/// reference units.
///
/// Saturates instead of overflowing: a product past `i128::MAX` is worth far
/// more than any minimum, so the saturated value is still a valid lower bound.
pub fn to_reference_value(amount: i128, price: i128, price_decimals: u32) -> i128 {
    let product = amount.saturating_mul(price);
    let source_decimals = price_decimals.saturating_add(NATIVE_DECIMALS);

    if source_decimals <= REFERENCE_DECIMALS {
        // At most 10^18, always representable.
        let factor = 10i128.pow(REFERENCE_DECIMALS - source_decimals);
        product.saturating_mul(factor)
    } else {
        // Feeds with more precision than the reference currency. A divisor
        // past i128 only comes from absurd decimals, which values at zero.
        match 10i128.checked_pow(source_decimals - REFERENCE_DECIMALS) {
            Some(divisor) => product / divisor,
            None => 0,
        }
    }
}
