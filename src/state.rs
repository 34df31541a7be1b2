use std::path::PathBuf;

use chrono::{Local, NaiveDate};

use crate::data::filter::{FilterCriteria, filtered_indices};
use crate::data::loader;
use crate::data::model::{Dataset, TradeSide};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which daily files a session load pulls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// Aggregate every daily file found in the data directory.
    AllDays,
    /// Only today's file.
    TodayOnly,
}

/// The full UI state, independent of rendering. Owns the session's
/// immutable dataset; there is no module-level or shared state.
pub struct AppState {
    /// Data directory of the current session.
    pub data_dir: PathBuf,
    /// Loaded dataset (None until a load succeeds).
    pub dataset: Option<Dataset>,
    /// Aggregate all days, or just today.
    pub load_mode: LoadMode,
    /// Current filter selections, rebuilt from the widgets.
    pub criteria: FilterCriteria,
    /// Date-range picker state. The range reaches the criteria only when
    /// enabled and both endpoints exist.
    pub date_filter_enabled: bool,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Indices of records passing the current filters (cached).
    pub visible_indices: Vec<usize>,
    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Create a session rooted at `data_dir` and attempt the initial load.
    pub fn new(data_dir: PathBuf) -> Self {
        let mut state = Self {
            data_dir,
            dataset: None,
            load_mode: LoadMode::AllDays,
            criteria: FilterCriteria::default(),
            date_filter_enabled: false,
            start_date: None,
            end_date: None,
            visible_indices: Vec::new(),
            status_message: None,
        };
        state.reload();
        state
    }

    /// (Re)load the dataset from the data directory in the current mode.
    /// Failure leaves the session in the visible no-data state.
    pub fn reload(&mut self) {
        let result = match self.load_mode {
            LoadMode::AllDays => loader::load_dir(&self.data_dir),
            LoadMode::TodayOnly => loader::load_day(&self.data_dir, Local::now().date_naive()),
        };
        match result {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                log::error!("{e}");
                self.dataset = None;
                self.visible_indices.clear();
                self.status_message = Some(e.to_string());
            }
        }
    }

    /// Ingest a newly loaded dataset and reset the filters.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.criteria = FilterCriteria::default();
        self.date_filter_enabled = false;
        self.start_date = dataset.date_span.map(|(lo, _)| lo);
        self.end_date = dataset.date_span.map(|(_, hi)| hi);
        self.visible_indices = (0..dataset.len()).collect();
        self.dataset = Some(dataset);
        self.status_message = None;
    }

    /// Recompute the visible rows after any filter change.
    pub fn refilter(&mut self) {
        self.criteria.date_range = self.active_date_range();
        match &self.dataset {
            Some(ds) => self.visible_indices = filtered_indices(ds, &self.criteria),
            None => self.visible_indices.clear(),
        }
    }

    /// The inclusive date range currently in force. An incomplete
    /// selection counts as "no filter active yet".
    fn active_date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        if !self.date_filter_enabled {
            return None;
        }
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }

    /// Toggle a single symbol in the symbol filter.
    pub fn toggle_symbol(&mut self, symbol: &str) {
        if !self.criteria.symbols.remove(symbol) {
            self.criteria.symbols.insert(symbol.to_string());
        }
        self.refilter();
    }

    /// Select every symbol the dataset contains.
    pub fn select_all_symbols(&mut self) {
        if let Some(ds) = &self.dataset {
            self.criteria.symbols = ds.symbols.clone();
            self.refilter();
        }
    }

    /// Clear the symbol filter (back to "no restriction").
    pub fn clear_symbols(&mut self) {
        self.criteria.symbols.clear();
        self.refilter();
    }

    /// Set the transaction-type selector (`None` = All).
    pub fn set_side(&mut self, side: Option<TradeSide>) {
        self.criteria.side = side;
        self.refilter();
    }

    /// Switch between all-days aggregation and today-only, reloading.
    pub fn toggle_load_mode(&mut self) {
        self.load_mode = match self.load_mode {
            LoadMode::AllDays => LoadMode::TodayOnly,
            LoadMode::TodayOnly => LoadMode::AllDays,
        };
        self.reload();
    }

    /// Point the session at a different data directory and reload.
    pub fn open_data_dir(&mut self, dir: PathBuf) {
        self.data_dir = dir;
        self.reload();
    }
}
