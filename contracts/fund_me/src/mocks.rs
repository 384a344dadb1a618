//! Test doubles for the price feed and the native token, plus the shared
//! ledger fixture used by every test module.

extern crate std;

use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, panic_with_error,
    testutils::Address as _, token, Address, Env,
};

use crate::types::{Asset, PriceData};
use crate::{FundMe, FundMeClient};

/// One native unit (1 XLM) in stroops.
pub const XLM: i128 = 10_000_000;
/// $2000 with 8 decimals, the usual aggregator fixture.
pub const XLM_PRICE: i128 = 2_000 * 100_000_000;
pub const FEED_DECIMALS: u32 = 8;
/// 0.025 XLM, worth exactly $50 at [`XLM_PRICE`].
pub const MIN_FUND: i128 = 250_000;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum MockError {
    FeedOffline = 100,
    Rejected = 101,
    InsufficientBalance = 102,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
enum MockKey {
    Price,
    Decimals,
    Offline,
    Balance(Address),
    Rejecting(Address),
}

// ── Price feed ───────────────────────────────────────────────────────

#[contract]
pub struct MockPriceFeed;

#[contractimpl]
impl MockPriceFeed {
    pub fn set_price(env: Env, price: i128) {
        let data = PriceData {
            price,
            timestamp: env.ledger().timestamp(),
        };
        env.storage().instance().set(&MockKey::Price, &data);
    }

    pub fn clear_price(env: Env) {
        env.storage().instance().remove(&MockKey::Price);
    }

    pub fn set_decimals(env: Env, decimals: u32) {
        env.storage().instance().set(&MockKey::Decimals, &decimals);
    }

    pub fn set_offline(env: Env, offline: bool) {
        env.storage().instance().set(&MockKey::Offline, &offline);
    }

    pub fn lastprice(env: Env, _asset: Asset) -> Option<PriceData> {
        if env
            .storage()
            .instance()
            .get(&MockKey::Offline)
            .unwrap_or(false)
        {
            panic_with_error!(&env, MockError::FeedOffline);
        }
        env.storage().instance().get(&MockKey::Price)
    }

    pub fn decimals(env: Env) -> u32 {
        env.storage()
            .instance()
            .get(&MockKey::Decimals)
            .unwrap_or(FEED_DECIMALS)
    }
}

// ── Token that can refuse incoming transfers ─────────────────────────

#[contract]
pub struct MockToken;

#[contractimpl]
impl MockToken {
    pub fn mint(env: Env, to: Address, amount: i128) {
        let balance = Self::balance(env.clone(), to.clone());
        env.storage()
            .persistent()
            .set(&MockKey::Balance(to), &(balance + amount));
    }

    pub fn set_rejecting(env: Env, account: Address, rejecting: bool) {
        env.storage()
            .persistent()
            .set(&MockKey::Rejecting(account), &rejecting);
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        env.storage()
            .persistent()
            .get(&MockKey::Balance(id))
            .unwrap_or(0)
    }

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) {
        from.require_auth();
        let rejecting: bool = env
            .storage()
            .persistent()
            .get(&MockKey::Rejecting(to.clone()))
            .unwrap_or(false);
        if rejecting {
            panic_with_error!(&env, MockError::Rejected);
        }
        let from_balance = Self::balance(env.clone(), from.clone());
        if from_balance < amount {
            panic_with_error!(&env, MockError::InsufficientBalance);
        }
        let to_balance = Self::balance(env.clone(), to.clone());
        let storage = env.storage().persistent();
        storage.set(&MockKey::Balance(from), &(from_balance - amount));
        storage.set(&MockKey::Balance(to), &(to_balance + amount));
    }
}

// ── Ledger fixture ───────────────────────────────────────────────────

pub struct TestLedger {
    pub env: Env,
    pub client: FundMeClient<'static>,
    pub owner: Address,
    pub feed: MockPriceFeedClient<'static>,
    pub token: token::Client<'static>,
    mock_token: Option<MockTokenClient<'static>>,
}

impl TestLedger {
    /// Ledger collecting a Stellar asset contract, valued by a $2000 feed.
    pub fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();
        let issuer = Address::generate(&env);
        let sac = env.register_stellar_asset_contract_v2(issuer);
        Self::deploy(env, sac.address(), None)
    }

    /// Ledger collecting a [`MockToken`], so payouts can be made to bounce.
    pub fn with_mock_token() -> Self {
        let env = Env::default();
        env.mock_all_auths();
        let token_id = env.register(MockToken, ());
        let mock = MockTokenClient::new(&env, &token_id);
        Self::deploy(env, token_id, Some(mock))
    }

    fn deploy(env: Env, token_id: Address, mock_token: Option<MockTokenClient<'static>>) -> Self {
        let feed_id = env.register(MockPriceFeed, ());
        let feed = MockPriceFeedClient::new(&env, &feed_id);
        feed.set_price(&XLM_PRICE);
        feed.set_decimals(&FEED_DECIMALS);

        let owner = Address::generate(&env);
        let contract_id = env.register(FundMe, (owner.clone(), feed_id, token_id.clone()));
        let client = FundMeClient::new(&env, &contract_id);
        let token = token::Client::new(&env, &token_id);

        Self {
            env,
            client,
            owner,
            feed,
            token,
            mock_token,
        }
    }

    pub fn mint(&self, to: &Address, amount: i128) {
        match &self.mock_token {
            Some(mock) => mock.mint(to, &amount),
            None => token::StellarAssetClient::new(&self.env, &self.token.address).mint(to, &amount),
        }
    }

    /// Make the mock token refuse transfers into `account`.
    pub fn reject_transfers_to(&self, account: &Address) {
        match &self.mock_token {
            Some(mock) => mock.set_rejecting(account, &true),
            None => panic!("reject_transfers_to needs TestLedger::with_mock_token"),
        }
    }

    /// Generate a contributor holding exactly `amount`.
    pub fn contributor_with(&self, amount: i128) -> Address {
        let contributor = Address::generate(&self.env);
        self.mint(&contributor, amount);
        contributor
    }

    /// Generate a contributor and fund the ledger with `amount` from it.
    pub fn fund_new(&self, amount: i128) -> Address {
        let contributor = self.contributor_with(amount);
        self.client.fund(&contributor, &amount);
        contributor
    }

    pub fn custody(&self) -> i128 {
        self.token.balance(&self.client.address)
    }
}
