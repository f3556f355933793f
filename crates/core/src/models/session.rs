use crate::config::Market;

use super::stock::{SortDir, SortField, StockRow};

/// In-memory view state: the current market, its rows, and the sort order.
///
/// Mutated only through the explicit transition methods below. The
/// `generation` counter guards against a stale in-flight refresh
/// overwriting newer state: every refresh captures the generation it
/// started under, and `apply_rows` discards results whose generation has
/// been superseded by a market switch or a later refresh.
#[derive(Debug, Clone)]
pub struct SessionState {
    market: Market,
    stocks: Vec<StockRow>,
    sort_by: SortField,
    sort_dir: SortDir,
    generation: u64,
}

impl SessionState {
    pub fn new(market: Market) -> Self {
        Self {
            market,
            stocks: Vec::new(),
            sort_by: SortField::Total,
            sort_dir: SortDir::Asc,
            generation: 0,
        }
    }

    pub fn market(&self) -> Market {
        self.market
    }

    pub fn stocks(&self) -> &[StockRow] {
        &self.stocks
    }

    pub fn sort_by(&self) -> SortField {
        self.sort_by
    }

    pub fn sort_dir(&self) -> SortDir {
        self.sort_dir
    }

    /// Switch to another market: full reset, not an incremental diff.
    /// Rows are cleared immediately so the view never shows one market's
    /// rows under another market's header during the async gap, and the
    /// generation is bumped so any in-flight refresh result is discarded.
    pub fn switch_market(&mut self, market: Market) {
        self.market = market;
        self.stocks.clear();
        self.sort_by = SortField::Total;
        self.sort_dir = SortDir::Asc;
        self.generation += 1;
    }

    /// Column-header toggle: same column flips direction, a new column
    /// starts ascending.
    pub fn toggle_sort(&mut self, field: SortField) {
        if self.sort_by == field {
            self.sort_dir = self.sort_dir.flip();
        } else {
            self.sort_by = field;
            self.sort_dir = SortDir::Asc;
        }
    }

    /// Stamp the start of a refresh. The returned generation must be
    /// passed back to `apply_rows`; starting a new refresh supersedes any
    /// older in-flight one.
    pub fn begin_refresh(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Install refreshed rows, unless the refresh has been superseded.
    /// Returns whether the rows were applied.
    pub fn apply_rows(&mut self, generation: u64, rows: Vec<StockRow>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.stocks = rows;
        true
    }
}
