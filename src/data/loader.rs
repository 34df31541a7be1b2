use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{Dataset, FilingRecord, RawFiling};

// ---------------------------------------------------------------------------
// Daily file naming
// ---------------------------------------------------------------------------

/// One feed dump per calendar day: `daily_filings_YYYY_MM_DD.json`.
const FILE_PREFIX: &str = "daily_filings_";
const FILE_SUFFIX: &str = ".json";
pub const FILE_DATE_FORMAT: &str = "%Y_%m_%d";

// ---------------------------------------------------------------------------
// LoadError – terminal conditions for a session load
// ---------------------------------------------------------------------------

/// Conditions that end a session load with no dataset. Per-file and
/// per-record problems are logged and skipped instead of surfacing here.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read data directory {dir}: {source}")]
    ReadDir {
        dir: PathBuf,
        source: std::io::Error,
    },
    #[error("no filings found in {dir}")]
    NoFilings { dir: PathBuf },
    #[error("no filings for {date} in {dir}")]
    NoFilingsForDay { dir: PathBuf, date: NaiveDate },
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load and merge every daily filing file found in `dir`.
///
/// Unreadable or malformed files are skipped with a warning and loading
/// continues; an empty aggregate is terminal.
pub fn load_dir(dir: &Path) -> Result<Dataset, LoadError> {
    let mut records = Vec::new();

    for (path, date_tag) in discover_daily_files(dir)? {
        match read_filing_file(&path) {
            Ok(items) => collect_records(items, &date_tag, &path, &mut records),
            Err(e) => log::warn!("failed to read {}: {e:#}", path.display()),
        }
    }

    if records.is_empty() {
        return Err(LoadError::NoFilings {
            dir: dir.to_path_buf(),
        });
    }
    log::info!("loaded {} filings from {}", records.len(), dir.display());
    Ok(Dataset::from_records(records))
}

/// Load only the file for the given day.
///
/// A missing, unreadable, or empty daily file is the session's no-data
/// condition, reported as an error rather than an empty table.
pub fn load_day(dir: &Path, date: NaiveDate) -> Result<Dataset, LoadError> {
    let date_tag = date.format(FILE_DATE_FORMAT).to_string();
    let path = dir.join(format!("{FILE_PREFIX}{date_tag}{FILE_SUFFIX}"));

    let mut records = Vec::new();
    match read_filing_file(&path) {
        Ok(items) => collect_records(items, &date_tag, &path, &mut records),
        Err(e) => log::warn!("failed to read {}: {e:#}", path.display()),
    }

    if records.is_empty() {
        return Err(LoadError::NoFilingsForDay {
            dir: dir.to_path_buf(),
            date,
        });
    }
    log::info!("loaded {} filings for {date}", records.len());
    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Discovery and parsing
// ---------------------------------------------------------------------------

/// Candidate daily files in `dir` as `(path, date_tag)`, sorted by file
/// name. Only names of the form `daily_filings_YYYY_MM_DD.json` with a
/// valid date qualify; everything else is ignored.
fn discover_daily_files(dir: &Path) -> Result<Vec<(PathBuf, String)>, LoadError> {
    let entries = fs::read_dir(dir).map_err(|source| LoadError::ReadDir {
        dir: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries.flatten() {
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if let Some(date_tag) = daily_file_date(name) {
            files.push((entry.path(), date_tag.to_string()));
        }
    }
    files.sort();
    Ok(files)
}

/// Extract the embedded date tag from a daily file name, if it matches.
fn daily_file_date(name: &str) -> Option<&str> {
    let tag = name.strip_prefix(FILE_PREFIX)?.strip_suffix(FILE_SUFFIX)?;
    NaiveDate::parse_from_str(tag, FILE_DATE_FORMAT).ok()?;
    Some(tag)
}

/// Parse one daily file into its raw JSON records. A payload that parses
/// but is not a JSON array yields no records.
fn read_filing_file(path: &Path) -> Result<Vec<JsonValue>> {
    let text = fs::read_to_string(path).context("reading file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;
    match root {
        JsonValue::Array(items) => Ok(items),
        _ => Ok(Vec::new()),
    }
}

/// Validate raw records from one file, tagging each with the file's date.
/// Records that cannot be classified as a buy or a sell are dropped.
fn collect_records(
    items: Vec<JsonValue>,
    date_tag: &str,
    path: &Path,
    out: &mut Vec<FilingRecord>,
) {
    for (index, item) in items.into_iter().enumerate() {
        let raw: RawFiling = match serde_json::from_value(item) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("{}: record {index}: {e}", path.display());
                continue;
            }
        };
        match FilingRecord::from_raw(raw, date_tag) {
            Some(record) => out.push(record),
            None => log::warn!(
                "{}: record {index}: missing is_purchased, dropped",
                path.display()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const ALICE: &str = r#"{"issuer":"Apple Inc.","symbol":"AAPL","owner":"Alice","shares":100.0,"price":12.5,"is_purchased":true,"timestamp":"2024-01-01T09:30:00","title":"CEO","transaction_code":"P","source_url":"https://example.com/a"}"#;
    const BOB: &str = r#"{"issuer":"Microsoft Corp","symbol":"MSFT","owner":"Bob","shares":50.0,"price":300.0,"is_purchased":false,"timestamp":"2024-01-02T14:00:00","title":"CFO","transaction_code":"S","source_url":"https://example.com/b"}"#;

    fn write(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn aggregates_all_daily_files_with_date_tags() {
        let dir = tempdir().unwrap();
        write(dir.path(), "daily_filings_2024_01_02.json", &format!("[{BOB}]"));
        write(dir.path(), "daily_filings_2024_01_01.json", &format!("[{ALICE}]"));

        let ds = load_dir(dir.path()).unwrap();
        assert_eq!(ds.len(), 2);
        // Files are processed in name (= date) order.
        assert_eq!(ds.records[0].file_date, "2024_01_01");
        assert_eq!(ds.records[0].owner.as_deref(), Some("Alice"));
        assert_eq!(ds.records[1].file_date, "2024_01_02");
        assert_eq!(ds.records[1].owner.as_deref(), Some("Bob"));
    }

    #[test]
    fn malformed_file_is_skipped_and_loading_continues() {
        let dir = tempdir().unwrap();
        write(dir.path(), "daily_filings_2024_01_01.json", &format!("[{ALICE}]"));
        write(dir.path(), "daily_filings_2024_01_02.json", "{ not json at all");
        write(dir.path(), "daily_filings_2024_01_03.json", &format!("[{BOB}]"));

        let ds = load_dir(dir.path()).unwrap();
        assert_eq!(ds.len(), 2);
    }

    #[test]
    fn non_list_payload_is_skipped() {
        let dir = tempdir().unwrap();
        write(dir.path(), "daily_filings_2024_01_01.json", r#"{"status":"ok"}"#);
        write(dir.path(), "daily_filings_2024_01_02.json", &format!("[{ALICE}]"));

        let ds = load_dir(dir.path()).unwrap();
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn unrelated_file_names_are_ignored() {
        let dir = tempdir().unwrap();
        write(dir.path(), "holdings.json", &format!("[{ALICE}]"));
        write(dir.path(), "daily_filings_latest.json", &format!("[{ALICE}]"));
        write(dir.path(), "daily_filings_2024_13_40.json", &format!("[{ALICE}]"));
        write(dir.path(), "daily_filings_2024_01_01.txt", &format!("[{ALICE}]"));

        assert!(matches!(
            load_dir(dir.path()),
            Err(LoadError::NoFilings { .. })
        ));
    }

    #[test]
    fn record_missing_classification_is_dropped() {
        let dir = tempdir().unwrap();
        let unclassified = r#"{"issuer":"Tesla Inc","symbol":"TSLA","owner":"Dana"}"#;
        write(
            dir.path(),
            "daily_filings_2024_01_01.json",
            &format!("[{ALICE},{unclassified}]"),
        );

        let ds = load_dir(dir.path()).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].owner.as_deref(), Some("Alice"));
    }

    #[test]
    fn empty_aggregate_is_terminal() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            load_dir(dir.path()),
            Err(LoadError::NoFilings { .. })
        ));
    }

    #[test]
    fn unreadable_directory_is_terminal() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing");
        assert!(matches!(
            load_dir(&missing),
            Err(LoadError::ReadDir { .. })
        ));
    }

    #[test]
    fn single_day_loads_only_its_file() {
        let dir = tempdir().unwrap();
        write(dir.path(), "daily_filings_2024_01_01.json", &format!("[{ALICE}]"));
        write(dir.path(), "daily_filings_2024_01_02.json", &format!("[{BOB}]"));

        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let ds = load_day(dir.path(), date).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].file_date, "2024_01_02");
    }

    #[test]
    fn single_day_missing_or_empty_is_no_data() {
        let dir = tempdir().unwrap();
        write(dir.path(), "daily_filings_2024_01_01.json", "[]");

        for day in [1, 2] {
            let date = NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
            assert!(matches!(
                load_day(dir.path(), date),
                Err(LoadError::NoFilingsForDay { .. })
            ));
        }
    }
}
