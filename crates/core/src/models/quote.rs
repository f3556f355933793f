use serde::{Deserialize, Serialize};

/// Envelope returned by the brapi.dev batched quote endpoint.
/// A response without `results` is treated as invalid by the pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct BrapiResponse {
    pub results: Option<Vec<BrapiQuote>>,
}

/// One raw quote record from brapi.dev. Every field except the symbol is
/// optional: the transformer fills gaps with zeros rather than failing.
///
/// The raw records (not transformed rows) are what the Brazil path writes
/// to cache, so this type round-trips through serde.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrapiQuote {
    pub symbol: String,
    #[serde(default)]
    pub regular_market_price: Option<f64>,
    #[serde(default)]
    pub price_earnings: Option<f64>,
    #[serde(default)]
    pub earnings_per_share: Option<f64>,
    #[serde(default)]
    pub default_key_statistics: Option<BrapiKeyStatistics>,
}

/// The `defaultKeyStatistics` module requested alongside fundamentals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrapiKeyStatistics {
    #[serde(default)]
    pub price_to_book: Option<f64>,
}
