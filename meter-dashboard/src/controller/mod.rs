//! Dashboard controller: an explicit state struct driven by a single
//! reducer-style [`update`] function. Side effects (the two backend calls)
//! are returned as [`Effect`] values and executed by the runtime; their
//! results come back in as [`Event`]s.

pub mod window;

use meter_client::api::ExceptionQuery;
use meter_client::domain::{BillingDateEntry, MeterRecord};
use time::Date;

/// Seconds between silent re-queries of the selected billing date.
pub const REFRESH_INTERVAL_SECS: u16 = 60;

/// How many ticks a transient footer notice stays visible.
const NOTICE_TICKS: u16 = 2;

/// The two user-visible failure kinds. Both are non-fatal; auto-refresh
/// query failures never reach the user at all.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("failed to fetch billing dates: {0}")]
    DateList(String),
    #[error("meter status query failed: {0}")]
    DataQuery(String),
}

/// The currently selected billing cycle and its expected meter total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub billing_date: String,
    pub expected_total: u64,
}

/// Presentation order for the record table. Sorting never mutates the
/// fetched record set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    #[default]
    Arrival,
    ExceptionsFirst,
    MeterId,
}

impl SortMode {
    pub fn next(self) -> Self {
        match self {
            Self::Arrival => Self::ExceptionsFirst,
            Self::ExceptionsFirst => Self::MeterId,
            Self::MeterId => Self::Arrival,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Arrival => "arrival",
            Self::ExceptionsFirst => "exceptions",
            Self::MeterId => "meter id",
        }
    }
}

#[derive(Debug, Clone)]
pub enum Event {
    /// 1-second timer tick.
    Tick,
    /// Billing-date list arrived, or the fetch failed.
    DatesFetched(Result<Vec<BillingDateEntry>, String>),
    /// Meter records arrived (or the query failed) for the query issued
    /// with sequence number `seq`.
    RecordsFetched {
        seq: u64,
        auto: bool,
        result: Result<Vec<MeterRecord>, String>,
    },
    /// Move the sidebar cursor.
    CursorUp,
    CursorDown,
    /// Select the billing date under the cursor.
    Activate,
    /// Re-fetch the billing-date list.
    ReloadDates,
    /// Cycle the table sort order.
    CycleSort,
    /// Show a transient footer notice (copy/export feedback).
    Notice(String),
}

/// Side effects requested by the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchDates,
    QueryRecords {
        seq: u64,
        auto: bool,
        query: ExceptionQuery,
    },
}

#[derive(Debug)]
pub struct DashboardState {
    pub billing_dates: Vec<BillingDateEntry>,
    pub selection: Option<Selection>,
    pub records: Vec<MeterRecord>,
    /// Seconds until the next silent refresh; always in `[0, 60]`.
    pub countdown: u16,
    pub loading_dates: bool,
    pub loading: bool,
    pub error: Option<FetchError>,
    pub sort: SortMode,
    pub cursor: usize,
    pub notice: Option<String>,
    pub today: Date,
    pub backend_addr: String,
    notice_ticks: u16,
    /// Sequence number of the most recently issued record query. Responses
    /// carrying any other sequence are stale and dropped.
    query_seq: u64,
}

impl DashboardState {
    pub fn new(today: Date, backend_addr: String) -> Self {
        Self {
            billing_dates: Vec::new(),
            selection: None,
            records: Vec::new(),
            countdown: REFRESH_INTERVAL_SECS,
            loading_dates: true,
            loading: false,
            error: None,
            sort: SortMode::default(),
            cursor: 0,
            notice: None,
            today,
            backend_addr,
            notice_ticks: 0,
            query_seq: 0,
        }
    }

    /// Records in presentation order. Stable sorts, so arrival order is
    /// preserved within equal keys.
    pub fn visible_records(&self) -> Vec<&MeterRecord> {
        let mut rows: Vec<&MeterRecord> = self.records.iter().collect();
        match self.sort {
            SortMode::Arrival => {}
            SortMode::ExceptionsFirst => rows.sort_by_key(|r| r.is_found()),
            SortMode::MeterId => rows.sort_by(|a, b| a.meter_id.cmp(&b.meter_id)),
        }
        rows
    }

    pub fn summary(&self) -> Option<crate::stats::BillingSummary> {
        self.selection
            .as_ref()
            .map(|s| crate::stats::BillingSummary::derive(s.expected_total, &self.records))
    }
}

/// Advance the state machine by one event. `today` is the local calendar
/// date at the time the event is handled; auto-selection and clickability
/// derive "tomorrow" from it.
pub fn update(state: &mut DashboardState, event: Event, today: Date) -> Vec<Effect> {
    state.today = today;

    match event {
        Event::Tick => {
            if state.notice_ticks > 0 {
                state.notice_ticks -= 1;
                if state.notice_ticks == 0 {
                    state.notice = None;
                }
            }
            if state.countdown > 0 {
                state.countdown -= 1;
            }
            if state.countdown == 0 {
                state.countdown = REFRESH_INTERVAL_SECS;
                if let Some(selection) = state.selection.clone() {
                    // Expected total is re-resolved from the current list;
                    // the entry may have been refreshed since selection.
                    let total = state
                        .billing_dates
                        .iter()
                        .find(|b| b.billing_date == selection.billing_date)
                        .map(|b| b.unique_meters)
                        .unwrap_or(0);
                    return select_date(state, selection.billing_date, total, true);
                }
            }
            Vec::new()
        }

        Event::DatesFetched(result) => {
            state.loading_dates = false;
            match result {
                Ok(dates) => {
                    state.billing_dates = dates;
                    if matches!(state.error, Some(FetchError::DateList(_))) {
                        state.error = None;
                    }
                    if state.cursor >= state.billing_dates.len() {
                        state.cursor = state.billing_dates.len().saturating_sub(1);
                    }
                    if state.selection.is_none() {
                        return auto_select_tomorrow(state, today);
                    }
                    Vec::new()
                }
                Err(message) => {
                    state.error = Some(FetchError::DateList(message));
                    Vec::new()
                }
            }
        }

        Event::RecordsFetched { seq, auto, result } => {
            if seq != state.query_seq {
                // Superseded by a newer query; a stale response must not
                // overwrite the latest request's outcome.
                return Vec::new();
            }
            state.loading = false;
            match result {
                Ok(records) => {
                    state.records = records;
                    if matches!(state.error, Some(FetchError::DataQuery(_))) {
                        state.error = None;
                    }
                }
                Err(message) => {
                    if !auto {
                        state.error = Some(FetchError::DataQuery(message));
                    }
                    // Auto-refresh failures keep showing stale data.
                }
            }
            Vec::new()
        }

        Event::CursorUp => {
            state.cursor = state.cursor.saturating_sub(1);
            Vec::new()
        }

        Event::CursorDown => {
            if state.cursor + 1 < state.billing_dates.len() {
                state.cursor += 1;
            }
            Vec::new()
        }

        Event::Activate => {
            let Some(entry) = state.billing_dates.get(state.cursor) else {
                return Vec::new();
            };
            if !window::is_selectable(&entry.billing_date, today) {
                return Vec::new();
            }
            let billing_date = entry.billing_date.clone();
            let total = entry.unique_meters;
            select_date(state, billing_date, total, false)
        }

        Event::ReloadDates => {
            state.loading_dates = true;
            state.countdown = REFRESH_INTERVAL_SECS;
            vec![Effect::FetchDates]
        }

        Event::CycleSort => {
            state.sort = state.sort.next();
            Vec::new()
        }

        Event::Notice(message) => {
            state.notice = Some(message);
            state.notice_ticks = NOTICE_TICKS;
            Vec::new()
        }
    }
}

/// Select a billing date and issue its record query. A manual selection
/// clears the stale table and restarts the countdown; an auto-refresh keeps
/// both so the view never flickers.
fn select_date(
    state: &mut DashboardState,
    billing_date: String,
    expected_total: u64,
    auto: bool,
) -> Vec<Effect> {
    if !auto {
        state.records.clear();
        state.countdown = REFRESH_INTERVAL_SECS;
    }
    state.loading = true;
    state.selection = Some(Selection {
        billing_date: billing_date.clone(),
        expected_total,
    });

    let query = match window::query_window(&billing_date) {
        Ok(w) => ExceptionQuery {
            billing_date,
            start_target: w.start_target,
            end_target: w.end_target,
        },
        Err(e) => {
            state.loading = false;
            if !auto {
                state.error = Some(FetchError::DataQuery(e.to_string()));
            }
            return Vec::new();
        }
    };

    state.query_seq += 1;
    vec![Effect::QueryRecords {
        seq: state.query_seq,
        auto,
        query,
    }]
}

fn auto_select_tomorrow(state: &mut DashboardState, today: Date) -> Vec<Effect> {
    let Some(tomorrow) = window::tomorrow_compact(today) else {
        return Vec::new();
    };
    let Some(position) = state
        .billing_dates
        .iter()
        .position(|b| b.billing_date == tomorrow)
    else {
        return Vec::new();
    };
    state.cursor = position;
    let entry = &state.billing_dates[position];
    let billing_date = entry.billing_date.clone();
    let total = entry.unique_meters;
    // The original selection semantics apply: auto-selection behaves like a
    // manual click on the matching entry.
    select_date(state, billing_date, total, false)
}
