//! URL builders for the two quote providers.
//!
//! Both APIs authenticate with a `token` query parameter, which is why
//! `CoreError`'s reqwest conversion redacts query strings.

use crate::config::MarketConfig;

/// brapi.dev batched quote URL: all tickers comma-joined in the path,
/// with fundamentals and the key-statistics module requested.
pub fn brazil_quote_url(config: &MarketConfig, tickers: &str, token: &str) -> String {
    format!(
        "{}/{tickers}?token={token}&fundamental=true&modules=balanceSheetHistory,defaultKeyStatistics",
        config.base_url
    )
}

/// Finnhub quote URL for one symbol.
pub fn us_quote_url(config: &MarketConfig, symbol: &str, token: &str) -> String {
    format!("{}/quote?symbol={symbol}&token={token}", config.base_url)
}

/// Finnhub fundamentals URL for one symbol.
pub fn us_metric_url(config: &MarketConfig, symbol: &str, token: &str) -> String {
    format!(
        "{}/stock/metric?symbol={symbol}&metric=all&token={token}",
        config.base_url
    )
}
