use serde::{Deserialize, Serialize};

/// The normalized, display-ready representation of one ticker.
///
/// `total` is always recomputed as `price * units` by the transformer,
/// never trusted from an API payload or cache entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRow {
    /// Ticker symbol (e.g., "TIMS3", "MSFT")
    pub ticker: String,
    /// Current price per unit, in the market's currency
    pub price: f64,
    /// Units owned
    pub units: u32,
    /// Position value: `price * units`
    pub total: f64,
    /// Price/earnings ratio (P/L in B3 parlance)
    pub p_l: f64,
    /// Earnings per share (LPA)
    pub lpa: f64,
    /// Price/book ratio (P/VPA)
    pub p_vpa: f64,
}

impl StockRow {
    pub fn new(ticker: impl Into<String>, price: f64, units: u32) -> Self {
        Self {
            ticker: ticker.into(),
            price,
            units,
            total: price * f64::from(units),
            p_l: 0.0,
            lpa: 0.0,
            p_vpa: 0.0,
        }
    }

    /// Attach fundamentals (P/E, EPS, P/B) to a row.
    pub fn with_fundamentals(mut self, p_l: f64, lpa: f64, p_vpa: f64) -> Self {
        self.p_l = p_l;
        self.lpa = lpa;
        self.p_vpa = p_vpa;
        self
    }
}

/// The numeric columns the table can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortField {
    Total,
    Price,
    Units,
    Pl,
    Lpa,
    Pvpa,
}

impl SortField {
    /// Extract this field's value from a row.
    pub fn value(&self, row: &StockRow) -> f64 {
        match self {
            SortField::Total => row.total,
            SortField::Price => row.price,
            SortField::Units => f64::from(row.units),
            SortField::Pl => row.p_l,
            SortField::Lpa => row.lpa,
            SortField::Pvpa => row.p_vpa,
        }
    }
}

impl std::fmt::Display for SortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortField::Total => write!(f, "total"),
            SortField::Price => write!(f, "price"),
            SortField::Units => write!(f, "units"),
            SortField::Pl => write!(f, "p_l"),
            SortField::Lpa => write!(f, "lpa"),
            SortField::Pvpa => write!(f, "p_vpa"),
        }
    }
}

/// Sort direction. `flip()` is the toggle used when a column header is
/// activated twice in a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    pub fn flip(&self) -> Self {
        match self {
            SortDir::Asc => SortDir::Desc,
            SortDir::Desc => SortDir::Asc,
        }
    }

    /// Comparator sign multiplier.
    pub fn sign(&self) -> f64 {
        match self {
            SortDir::Asc => 1.0,
            SortDir::Desc => -1.0,
        }
    }
}
