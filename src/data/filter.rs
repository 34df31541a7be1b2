use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::model::{Dataset, FilingRecord, TradeSide};

// ---------------------------------------------------------------------------
// FilterCriteria – the current user-selected predicate set
// ---------------------------------------------------------------------------

/// The user-selected predicates. Each field's default means "no
/// restriction"; a predicate at its default never excludes a row.
/// Rebuilt from the widgets on every interaction, never persisted.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    /// Selected ticker symbols; empty = all symbols.
    pub symbols: BTreeSet<String>,
    /// Case-insensitive owner-name substring; empty = all owners.
    pub owner_contains: String,
    /// `None` = "All"; otherwise only rows with the given side.
    pub side: Option<TradeSide>,
    /// Inclusive [start, end] bounds on the transaction date. `None`
    /// while no complete range has been chosen.
    pub date_range: Option<(NaiveDate, NaiveDate)>,
}

impl FilterCriteria {
    /// Whether a record passes every active predicate.
    ///
    /// Rows with a missing owner never match a non-empty owner filter, and
    /// rows with an unparseable timestamp never match an active date range.
    pub fn matches(&self, record: &FilingRecord) -> bool {
        if !self.symbols.is_empty() {
            match &record.symbol {
                Some(symbol) if self.symbols.contains(symbol) => {}
                _ => return false,
            }
        }

        if !self.owner_contains.is_empty() {
            let needle = self.owner_contains.to_lowercase();
            match &record.owner {
                Some(owner) if owner.to_lowercase().contains(&needle) => {}
                _ => return false,
            }
        }

        if let Some(side) = self.side {
            if record.side != side {
                return false;
            }
        }

        if let Some((start, end)) = self.date_range {
            match record.date() {
                Some(date) if start <= date && date <= end => {}
                _ => return false,
            }
        }

        true
    }
}

/// Indices of records passing all active filters, in dataset order.
///
/// One pass over the immutable base dataset: every active predicate is
/// applied together, so no filter step can discard another's effect.
pub fn filtered_indices(dataset: &Dataset, criteria: &FilterCriteria) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, record)| criteria.matches(record))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(symbol: &str, owner: &str, side: TradeSide, day: u32) -> FilingRecord {
        FilingRecord {
            issuer: format!("{symbol} Corp"),
            symbol: Some(symbol.to_string()),
            owner: Some(owner.to_string()),
            shares: 100.0,
            price: 10.0,
            side,
            timestamp: NaiveDate::from_ymd_opt(2024, 1, day)
                .and_then(|d| d.and_hms_opt(9, 30, 0)),
            title: String::new(),
            transaction_code: String::new(),
            source_url: String::new(),
            file_date: "2024_01_01".to_string(),
        }
    }

    /// The three-row dataset used throughout: (AAPL, Alice, Buy, Jan 1),
    /// (MSFT, Bob, Sell, Jan 2), (AAPL, Carol, Buy, Jan 3).
    fn sample() -> Dataset {
        Dataset::from_records(vec![
            record("AAPL", "Alice", TradeSide::Buy, 1),
            record("MSFT", "Bob", TradeSide::Sell, 2),
            record("AAPL", "Carol", TradeSide::Buy, 3),
        ])
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn symbols(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn unset_criteria_keep_every_row() {
        let ds = sample();
        assert_eq!(filtered_indices(&ds, &FilterCriteria::default()), vec![0, 1, 2]);
    }

    #[test]
    fn symbol_membership() {
        let ds = sample();
        let criteria = FilterCriteria {
            symbols: symbols(&["AAPL"]),
            ..Default::default()
        };
        assert_eq!(filtered_indices(&ds, &criteria), vec![0, 2]);
    }

    #[test]
    fn owner_substring_is_case_insensitive() {
        let ds = sample();
        for needle in ["ob", "OB", "bOb"] {
            let criteria = FilterCriteria {
                owner_contains: needle.to_string(),
                ..Default::default()
            };
            assert_eq!(filtered_indices(&ds, &criteria), vec![1], "needle {needle}");
        }
    }

    #[test]
    fn missing_owner_never_matches_a_nonempty_filter() {
        let mut anonymous = record("AAPL", "", TradeSide::Buy, 1);
        anonymous.owner = None;
        let ds = Dataset::from_records(vec![anonymous]);

        let criteria = FilterCriteria {
            owner_contains: "a".to_string(),
            ..Default::default()
        };
        assert!(filtered_indices(&ds, &criteria).is_empty());
        // The unset filter still keeps the row.
        assert_eq!(filtered_indices(&ds, &FilterCriteria::default()), vec![0]);
    }

    #[test]
    fn transaction_type_match() {
        let ds = sample();
        let criteria = FilterCriteria {
            side: Some(TradeSide::Sell),
            ..Default::default()
        };
        assert_eq!(filtered_indices(&ds, &criteria), vec![1]);
    }

    #[test]
    fn date_range_is_inclusive() {
        let ds = sample();
        let criteria = FilterCriteria {
            date_range: Some((day(1), day(2))),
            ..Default::default()
        };
        assert_eq!(filtered_indices(&ds, &criteria), vec![0, 1]);
    }

    #[test]
    fn single_day_range_hits_exactly_that_day() {
        let ds = sample();
        let criteria = FilterCriteria {
            date_range: Some((day(2), day(2))),
            ..Default::default()
        };
        assert_eq!(filtered_indices(&ds, &criteria), vec![1]);
    }

    #[test]
    fn range_outside_the_data_is_empty() {
        let ds = sample();
        for range in [(day(4), day(5)), (day(20), day(25))] {
            let criteria = FilterCriteria {
                date_range: Some(range),
                ..Default::default()
            };
            assert!(filtered_indices(&ds, &criteria).is_empty());
        }
    }

    #[test]
    fn null_timestamp_is_excluded_under_an_active_range() {
        let mut undated = record("AAPL", "Alice", TradeSide::Buy, 1);
        undated.timestamp = None;
        let ds = Dataset::from_records(vec![undated]);

        let criteria = FilterCriteria {
            date_range: Some((day(1), day(31))),
            ..Default::default()
        };
        assert!(filtered_indices(&ds, &criteria).is_empty());
        assert_eq!(filtered_indices(&ds, &FilterCriteria::default()), vec![0]);
    }

    #[test]
    fn combined_symbol_and_type() {
        let ds = sample();
        let criteria = FilterCriteria {
            symbols: symbols(&["AAPL"]),
            side: Some(TradeSide::Buy),
            ..Default::default()
        };
        assert_eq!(filtered_indices(&ds, &criteria), vec![0, 2]);
    }

    #[test]
    fn conjunction_equals_intersection_of_single_predicates() {
        let ds = sample();

        let by_symbol = FilterCriteria {
            symbols: symbols(&["AAPL", "MSFT"]),
            ..Default::default()
        };
        let by_range = FilterCriteria {
            date_range: Some((day(2), day(3))),
            ..Default::default()
        };
        let combined = FilterCriteria {
            symbols: by_symbol.symbols.clone(),
            date_range: by_range.date_range,
            ..Default::default()
        };

        let a: BTreeSet<usize> = filtered_indices(&ds, &by_symbol).into_iter().collect();
        let b: BTreeSet<usize> = filtered_indices(&ds, &by_range).into_iter().collect();
        let both: Vec<usize> = filtered_indices(&ds, &combined);
        let intersection: Vec<usize> = a.intersection(&b).copied().collect();
        assert_eq!(both, intersection);
    }

    #[test]
    fn filtering_is_a_stable_subset_and_idempotent() {
        let ds = sample();
        let criteria = FilterCriteria {
            symbols: symbols(&["AAPL"]),
            ..Default::default()
        };

        let first = filtered_indices(&ds, &criteria);
        assert!(first.iter().all(|&i| i < ds.len()));
        assert!(first.windows(2).all(|w| w[0] < w[1]));

        // Re-filtering the narrowed rows with the same criteria drops nothing.
        let narrowed = Dataset::from_records(
            first.iter().map(|&i| ds.records[i].clone()).collect(),
        );
        let second = filtered_indices(&narrowed, &criteria);
        assert_eq!(second.len(), first.len());
    }
}
