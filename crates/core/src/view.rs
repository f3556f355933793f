//! Sorting, aggregation, and the pure table view model.
//!
//! Rendering is a pure function from (rows, sort key, direction, market)
//! to a [`TableView`]; terminal/file bindings live outside the core.

use serde::Serialize;

use crate::config::Market;
use crate::models::stock::{SortDir, SortField, StockRow};

/// Sort rows by a numeric field. The sort is stable, so exact ties keep
/// their input order; tickers are distinct so ties carry no ambiguity.
pub fn sort_stocks(stocks: &[StockRow], sort_by: SortField, sort_dir: SortDir) -> Vec<StockRow> {
    let mut sorted = stocks.to_vec();
    sorted.sort_by(|a, b| {
        let delta = (sort_by.value(a) - sort_by.value(b)) * sort_dir.sign();
        delta.partial_cmp(&0.0).unwrap_or(std::cmp::Ordering::Equal)
    });
    sorted
}

/// Sum of position values over the full (unsorted) row set.
pub fn grand_total(stocks: &[StockRow]) -> f64 {
    stocks.iter().map(|s| s.total).sum()
}

/// One display-ready table row. Numeric cells are pre-formatted strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderRow {
    /// 1-based position after sorting.
    pub position: usize,
    pub ticker: String,
    pub units: u32,
    pub price: String,
    pub total: String,
    pub p_l: String,
    pub lpa: String,
    pub p_vpa: String,
}

/// The rendered table: sorted rows plus the aggregate summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub market: Market,
    pub rows: Vec<RenderRow>,
    /// Formatted sum of `total` across all rows, independent of sort.
    pub summary_total: String,
    pub ticker_count: usize,
}

/// Build the table view model. Rows are sorted for display; the summary
/// is computed over the unsorted input so it never depends on sort state.
pub fn render_table(
    stocks: &[StockRow],
    sort_by: SortField,
    sort_dir: SortDir,
    market: Market,
) -> TableView {
    let rows = sort_stocks(stocks, sort_by, sort_dir)
        .into_iter()
        .enumerate()
        .map(|(idx, s)| RenderRow {
            position: idx + 1,
            ticker: s.ticker.clone(),
            units: s.units,
            price: format_currency(s.price, market),
            total: format_currency(s.total, market),
            p_l: format_num(s.p_l),
            lpa: format_num(s.lpa),
            p_vpa: format_num(s.p_vpa),
        })
        .collect();

    TableView {
        market,
        rows,
        summary_total: format_currency(grand_total(stocks), market),
        ticker_count: stocks.len(),
    }
}

/// Format a value in the market's currency with locale conventions:
/// `R$ 1.234,56` for Brazil, `$1,234.56` for the US.
pub fn format_currency(value: f64, market: Market) -> String {
    let negative = value < 0.0;
    let cents = format!("{:.2}", value.abs());
    let (int_part, frac_part) = cents.split_once('.').unwrap_or((&cents, "00"));
    let (group_sep, decimal_sep, symbol, space) = match market {
        Market::Brazil => ('.', ',', "R$", " "),
        Market::Us => (',', '.', "$", ""),
    };
    let grouped = group_digits(int_part, group_sep);
    let sign = if negative { "-" } else { "" };
    format!("{sign}{symbol}{space}{grouped}{decimal_sep}{frac_part}")
}

/// Fixed two-decimal formatting for the ratio columns.
pub fn format_num(value: f64) -> String {
    format!("{value:.2}")
}

fn group_digits(digits: &str, sep: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(sep);
        }
        grouped.push(c);
    }
    grouped
}
