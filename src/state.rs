use crate::config::Config;
use crate::models::{DateKey, Status};
use crate::selection::SelectionContext;
use crate::stats::{MonthStatistics, compute_statistics_with_quota};
use crate::store::StatusStore;
use crate::view::CalendarView;
use chrono::{Datelike, Local};
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

/// Everything one browser tab's events act on. Requests take the lock for
/// their whole read-modify-write so events never interleave.
#[derive(Debug)]
pub struct Session {
    pub store: StatusStore,
    pub selection: SelectionContext,
    pub view: CalendarView,
    pub quota_percent: u8,
}

impl Session {
    pub fn new(store: StatusStore, quota_percent: u8) -> Self {
        let today = Local::now().date_naive();
        let mut session = Self {
            store,
            selection: SelectionContext::new(),
            view: CalendarView::new(today.year(), today.month()),
            quota_percent,
        };
        session.rehydrate();
        session
    }

    /// Switches the displayed month and re-syncs it from the store.
    pub fn navigate(&mut self, year: i32, month: u32) -> MonthStatistics {
        self.view = CalendarView::new(year, month);
        self.rehydrate()
    }

    pub fn rehydrate(&mut self) -> MonthStatistics {
        self.view.hydrate(&self.store, self.quota_percent)
    }

    /// Installs an already persisted store after a single-date change and
    /// refreshes that date's cell plus the summary.
    pub fn commit(
        &mut self,
        store: StatusStore,
        date: DateKey,
        status: Option<Status>,
    ) -> MonthStatistics {
        self.store = store;
        self.view.sync_day(date, status);
        self.selection.close_dialog();
        let (year, month) = (self.view.year, self.view.month);
        let stats = compute_statistics_with_quota(&self.store, year, month, self.quota_percent);
        self.view.sync_summary(&stats);
        stats
    }
}

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub session: Arc<Mutex<Session>>,
}

impl AppState {
    pub fn new(config: &Config, store: StatusStore) -> Self {
        Self {
            data_path: config.data_path.clone(),
            session: Arc::new(Mutex::new(Session::new(store, config.office_quota_percent))),
        }
    }
}
