pub mod auth;
pub mod config;
pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;
pub mod transform;
pub mod view;

use config::Market;
use errors::CoreError;
use models::session::SessionState;
use models::stock::{SortDir, SortField, StockRow};
use services::refresh_service::{RefreshOutcome, RefreshService};
use view::TableView;

/// How a call to [`PortfolioTracker::refresh`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshStatus {
    /// New rows were fetched (or served from cache) and installed.
    Updated,
    /// No API token was available; nothing changed, nothing to report.
    NoCredentials,
    /// A market switch or newer refresh superseded this one mid-flight;
    /// its results were discarded.
    Superseded,
}

/// Main entry point for the Portfolio Tracker core library.
///
/// Owns the session state (current market, rows, sort order) and the
/// refresh pipeline. UI adapters call `refresh`/`switch_market`/
/// `toggle_sort` and re-render from `render()`.
#[must_use]
pub struct PortfolioTracker {
    session: SessionState,
    refresher: RefreshService,
}

impl std::fmt::Debug for PortfolioTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioTracker")
            .field("market", &self.session.market())
            .field("stocks", &self.session.stocks().len())
            .field("sort_by", &self.session.sort_by())
            .finish()
    }
}

impl PortfolioTracker {
    pub fn new(refresher: RefreshService, market: Market) -> Self {
        Self {
            session: SessionState::new(market),
            refresher,
        }
    }

    // ── State accessors ─────────────────────────────────────────────

    pub fn market(&self) -> Market {
        self.session.market()
    }

    pub fn stocks(&self) -> &[StockRow] {
        self.session.stocks()
    }

    pub fn sort_by(&self) -> SortField {
        self.session.sort_by()
    }

    pub fn sort_dir(&self) -> SortDir {
        self.session.sort_dir()
    }

    // ── Transitions ─────────────────────────────────────────────────

    /// Switch markets: clears rows, resets the sort to `(total, asc)`,
    /// and invalidates any in-flight refresh. The caller should trigger
    /// a new `refresh()` afterwards.
    pub fn switch_market(&mut self, market: Market) {
        self.session.switch_market(market);
    }

    /// Activate a column header: same column flips direction, a new
    /// column starts ascending.
    pub fn toggle_sort(&mut self, field: SortField) {
        self.session.toggle_sort(field);
    }

    /// Run the refresh pipeline for the current market and install the
    /// resulting rows.
    ///
    /// On error the current rows are left untouched, from the last
    /// successful refresh. Results that arrive after this refresh has
    /// been superseded are discarded.
    pub async fn refresh(&mut self) -> Result<RefreshStatus, CoreError> {
        let generation = self.session.begin_refresh();
        let market = self.session.market();
        match self.refresher.refresh(market).await? {
            RefreshOutcome::Updated(rows) => {
                if self.session.apply_rows(generation, rows) {
                    Ok(RefreshStatus::Updated)
                } else {
                    Ok(RefreshStatus::Superseded)
                }
            }
            RefreshOutcome::NoCredentials => Ok(RefreshStatus::NoCredentials),
        }
    }

    // ── View ────────────────────────────────────────────────────────

    /// Build the display-ready table for the current state.
    pub fn render(&self) -> TableView {
        view::render_table(
            self.session.stocks(),
            self.session.sort_by(),
            self.session.sort_dir(),
            self.session.market(),
        )
    }
}
