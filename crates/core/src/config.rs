use serde::{Deserialize, Serialize};

/// How long a cached quote payload stays fresh (24 hours).
pub const CACHE_TTL_MS: i64 = 24 * 60 * 60 * 1000;

/// Pause between consecutive US API calls. Finnhub's free tier allows
/// 60 calls/min and each symbol costs two calls, so 1100 ms keeps a
/// full portfolio refresh comfortably under the limit.
pub const RATE_LIMIT_DELAY_MS: u64 = 1100;

/// The trading venue a quote belongs to.
/// Determines the API, the currency, and which holdings table applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Market {
    /// B3 (Brazil) — quotes via brapi.dev, priced in BRL
    Brazil,
    /// United States — quotes via Finnhub, priced in USD
    Us,
}

impl std::fmt::Display for Market {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Market::Brazil => write!(f, "Brazil"),
            Market::Us => write!(f, "US"),
        }
    }
}

impl Market {
    /// The static API/cache configuration for this market.
    pub fn config(&self) -> &'static MarketConfig {
        match self {
            Market::Brazil => &BRAZIL_CONFIG,
            Market::Us => &US_CONFIG,
        }
    }

    /// ISO currency code quotes are denominated in.
    pub fn currency(&self) -> &'static str {
        match self {
            Market::Brazil => "BRL",
            Market::Us => "USD",
        }
    }
}

/// Per-market API endpoint and cache/credential wiring. One per market,
/// immutable at runtime.
#[derive(Debug, Clone)]
pub struct MarketConfig {
    /// API base URL (no trailing slash).
    pub base_url: &'static str,
    /// Key the bearer token is persisted under.
    pub storage_key: &'static str,
    /// Message shown when asking the user for a token.
    pub token_prompt: &'static str,
    /// Message shown when replacing an already-stored token.
    pub update_token_prompt: &'static str,
    /// Key cached quote payloads are persisted under.
    pub cache_key: &'static str,
    /// Maximum cache age in milliseconds.
    pub cache_ttl_ms: i64,
}

pub static BRAZIL_CONFIG: MarketConfig = MarketConfig {
    base_url: "https://brapi.dev/api/quote",
    storage_key: "brapi_token",
    token_prompt: "Enter your Brapi.dev API Token:",
    update_token_prompt: "Enter new Brapi.dev Token:",
    cache_key: "brapi_stocks_cache",
    cache_ttl_ms: CACHE_TTL_MS,
};

pub static US_CONFIG: MarketConfig = MarketConfig {
    base_url: "https://finnhub.io/api/v1",
    storage_key: "finnhub_token",
    token_prompt: "Enter your Finnhub API Token:",
    update_token_prompt: "Enter new Finnhub API Token:",
    cache_key: "finnhub_stocks_cache",
    cache_ttl_ms: CACHE_TTL_MS,
};

/// One position: ticker symbol and how many units are owned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Holding {
    pub ticker: &'static str,
    pub units: u32,
}

const fn holding(ticker: &'static str, units: u32) -> Holding {
    Holding { ticker, units }
}

/// B3 holdings. Slice order is the iteration order of the refresh
/// pipeline, so it is part of the observable behavior.
pub static BRAZIL_HOLDINGS: &[Holding] = &[
    holding("TIMS3", 130),
    holding("MULT3", 101),
    holding("RADL3", 133),
    holding("BBDC3", 202),
    holding("ODPV3", 337),
    holding("CPFE3", 80),
    holding("EGIE3", 120),
    holding("WEGE3", 82),
    holding("FLRY3", 266),
    holding("BBAS3", 190),
    holding("ITUB3", 108),
    holding("PRIO3", 123),
    holding("TOTS3", 127),
    holding("SAPR3", 500),
    holding("PSSA3", 135),
];

/// US holdings.
pub static US_HOLDINGS: &[Holding] = &[
    holding("PAYX", 2),
    holding("ROL", 4),
    holding("FAST", 10),
    holding("ROST", 3),
    holding("JPM", 2),
    holding("GOOG", 0),
    holding("JNJ", 3),
    holding("AME", 3),
    holding("MSFT", 4),
    holding("TSM", 4),
];

/// The per-market holdings tables the refresh pipeline iterates.
///
/// Defaults to the compiled-in tables; tests inject smaller ones.
#[derive(Debug, Clone)]
pub struct Portfolios {
    pub brazil: Vec<Holding>,
    pub us: Vec<Holding>,
}

impl Default for Portfolios {
    fn default() -> Self {
        Self {
            brazil: BRAZIL_HOLDINGS.to_vec(),
            us: US_HOLDINGS.to_vec(),
        }
    }
}

impl Portfolios {
    /// The holdings table for a market, in pipeline iteration order.
    pub fn for_market(&self, market: Market) -> &[Holding] {
        match market {
            Market::Brazil => &self.brazil,
            Market::Us => &self.us,
        }
    }
}

/// Look up the owned unit count for a ticker. Unknown tickers own 0 units.
pub fn units_for(holdings: &[Holding], ticker: &str) -> u32 {
    holdings
        .iter()
        .find(|h| h.ticker == ticker)
        .map(|h| h.units)
        .unwrap_or(0)
}
