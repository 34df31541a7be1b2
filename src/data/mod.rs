/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  data/daily_filings_YYYY_MM_DD.json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  discover + parse daily files → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<FilingRecord>, symbol + date indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply FilterCriteria → visible row indices
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
