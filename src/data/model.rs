use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// TradeSide – buy or sell, derived from the raw `is_purchased` flag
// ---------------------------------------------------------------------------

/// Whether the insider bought or sold. There is no third state: a raw
/// record that cannot be classified is rejected at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeSide {
    Buy,
    Sell,
}

impl From<bool> for TradeSide {
    fn from(is_purchased: bool) -> Self {
        if is_purchased {
            TradeSide::Buy
        } else {
            TradeSide::Sell
        }
    }
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeSide::Buy => write!(f, "Buy"),
            TradeSide::Sell => write!(f, "Sell"),
        }
    }
}

// ---------------------------------------------------------------------------
// RawFiling – the wire shape of one record in a daily JSON file
// ---------------------------------------------------------------------------

/// One entry of a daily filings array, exactly as found on disk. Every
/// field is optional at this layer; validation happens in
/// [`FilingRecord::from_raw`]. Unknown keys are ignored.
#[derive(Debug, Deserialize)]
pub struct RawFiling {
    pub issuer: Option<String>,
    pub symbol: Option<String>,
    pub owner: Option<String>,
    pub shares: Option<f64>,
    pub price: Option<f64>,
    pub is_purchased: Option<bool>,
    pub timestamp: Option<String>,
    pub title: Option<String>,
    pub transaction_code: Option<String>,
    pub source_url: Option<String>,
}

// ---------------------------------------------------------------------------
// FilingRecord – one validated insider-transaction event
// ---------------------------------------------------------------------------

/// A single insider transaction. Immutable after load; never written back.
#[derive(Debug, Clone)]
pub struct FilingRecord {
    pub issuer: String,
    pub symbol: Option<String>,
    pub owner: Option<String>,
    pub shares: f64,
    pub price: f64,
    pub side: TradeSide,
    /// `None` when the source value was absent or unparseable. Such rows
    /// are excluded from date-range filtering and min/max computation.
    pub timestamp: Option<NaiveDateTime>,
    pub title: String,
    pub transaction_code: String,
    pub source_url: String,
    /// `YYYY_MM_DD` tag of the daily file this record came from.
    pub file_date: String,
}

impl FilingRecord {
    /// Validate a raw record. Returns `None` when the record cannot be
    /// classified as a buy or a sell (`is_purchased` missing); every other
    /// missing field degrades to an empty or null value.
    pub fn from_raw(raw: RawFiling, file_date: &str) -> Option<Self> {
        let side = TradeSide::from(raw.is_purchased?);
        Some(FilingRecord {
            issuer: raw.issuer.unwrap_or_default(),
            symbol: raw.symbol,
            owner: raw.owner,
            shares: raw.shares.unwrap_or(0.0),
            price: raw.price.unwrap_or(0.0),
            side,
            timestamp: raw.timestamp.as_deref().and_then(parse_timestamp),
            title: raw.title.unwrap_or_default(),
            transaction_code: raw.transaction_code.unwrap_or_default(),
            source_url: raw.source_url.unwrap_or_default(),
            file_date: file_date.to_string(),
        })
    }

    /// Calendar date of the transaction, when the timestamp parsed.
    pub fn date(&self) -> Option<NaiveDate> {
        self.timestamp.map(|t| t.date())
    }
}

/// Parse the `timestamp` field leniently. The feed is ISO-8601-ish but not
/// uniform; a value matching none of the accepted shapes becomes `None`.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

// ---------------------------------------------------------------------------
// Dataset – the complete merged table for the session
// ---------------------------------------------------------------------------

/// Display column labels, in table order.
pub const DISPLAY_COLUMNS: [&str; 10] = [
    "Issuer",
    "Symbol",
    "Owner",
    "Shares",
    "Price",
    "Buy/Sell",
    "Timestamp",
    "Title",
    "Transaction Code",
    "URL",
];

/// The full merged table of filings, with indices computed once at build
/// time. Filtering returns row indices into `records` and never mutates it.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All filings (rows), in load order.
    pub records: Vec<FilingRecord>,
    /// Distinct non-null ticker symbols, sorted. Feeds the symbol filter.
    pub symbols: BTreeSet<String>,
    /// Observed [min, max] dates over the parseable timestamps only.
    /// `None` when no record has a parseable timestamp.
    pub date_span: Option<(NaiveDate, NaiveDate)>,
}

impl Dataset {
    /// Build the symbol and date indices from the loaded records.
    pub fn from_records(records: Vec<FilingRecord>) -> Self {
        let symbols: BTreeSet<String> =
            records.iter().filter_map(|r| r.symbol.clone()).collect();

        let mut date_span: Option<(NaiveDate, NaiveDate)> = None;
        for date in records.iter().filter_map(FilingRecord::date) {
            date_span = Some(match date_span {
                Some((lo, hi)) => (lo.min(date), hi.max(date)),
                None => (date, date),
            });
        }

        Dataset {
            records,
            symbols,
            date_span,
        }
    }

    /// Number of filings.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Display formatting
// ---------------------------------------------------------------------------

/// Format a numeric cell as two-decimal, thousands-grouped text. Display
/// only: filtering always runs on the underlying numeric values.
pub fn format_grouped(value: f64) -> String {
    let text = format!("{value:.2}");
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut out = String::from(sign);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.push('.');
    out.push_str(frac_part);
    out
}
