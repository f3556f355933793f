//! Pure transforms from raw API payloads to normalized [`StockRow`]s.
//!
//! Both transforms are total over their inputs: missing or malformed
//! fields become zeros. The single validation gate in the system is the
//! US quote's price field — without it the row is dropped.

use serde_json::Value;

use crate::config::{units_for, Holding};
use crate::models::quote::BrapiQuote;
use crate::models::stock::StockRow;

/// Lenient numeric coercion: accepts JSON numbers and numeric strings
/// (Finnhub occasionally returns prices as strings). Anything else is 0.
fn as_number(value: &Value) -> f64 {
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
        .unwrap_or(0.0)
}

/// Transform one raw brapi.dev record into a view row. Never fails;
/// unknown tickers get 0 units and absent fields become zeros.
pub fn brazil_row(quote: &BrapiQuote, holdings: &[Holding]) -> StockRow {
    let units = units_for(holdings, &quote.symbol);
    let price = quote.regular_market_price.unwrap_or(0.0);
    StockRow::new(quote.symbol.clone(), price, units).with_fundamentals(
        quote.price_earnings.unwrap_or(0.0),
        quote.earnings_per_share.unwrap_or(0.0),
        quote
            .default_key_statistics
            .as_ref()
            .and_then(|s| s.price_to_book)
            .unwrap_or(0.0),
    )
}

/// Transform a Finnhub quote plus optional fundamentals into a view row.
///
/// Returns `None` when the quote payload has no `c` (current price)
/// field: such a row is unusable and gets dropped. A valid quote with
/// unusable fundamentals still yields a row with zeroed ratios — partial
/// data beats dropping the symbol.
pub fn us_row(
    symbol: &str,
    quote: &Value,
    metrics: Option<&Value>,
    holdings: &[Holding],
) -> Option<StockRow> {
    let price_field = quote.get("c")?;
    if price_field.is_null() {
        return None;
    }

    let units = units_for(holdings, symbol);
    let price = as_number(price_field);

    let metric = metrics.and_then(|m| m.get("metric"));
    let ratio = |name: &str| metric.and_then(|m| m.get(name)).map(as_number).unwrap_or(0.0);

    Some(
        StockRow::new(symbol, price, units).with_fundamentals(
            ratio("peNormalizedAnnual"),
            ratio("epsNormalizedAnnual"),
            ratio("pbAnnual"),
        ),
    )
}
