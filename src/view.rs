//! Presentation state of the displayed month. Only this module decides
//! which css classes and labels a day cell or summary card carries; the
//! page script applies them verbatim.

use crate::dates::{days_in_month, is_weekend, month_name, start_weekday_offset};
use crate::models::{DateKey, Status};
use crate::stats::{Completeness, Compliance, MonthStatistics, compute_statistics_with_quota};
use crate::store::StatusStore;
use serde::Serialize;

const STATUS_CLASS_PREFIX: &str = "status-";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub date: DateKey,
    pub day: u32,
    pub classes: Vec<String>,
    pub label: String,
}

impl DayCell {
    fn new(date: DateKey, weekend: bool) -> Self {
        let mut classes = vec!["day".to_string()];
        if weekend {
            classes.push("weekend".to_string());
        }
        Self {
            date,
            day: date.day(),
            classes,
            label: String::new(),
        }
    }

    fn apply(&mut self, status: Option<Status>) {
        self.classes.retain(|class| !class.starts_with(STATUS_CLASS_PREFIX));
        match status {
            Some(status) => {
                self.classes.push(format!("{STATUS_CLASS_PREFIX}{}", status.as_str()));
                self.label = status.label();
            }
            None => self.label.clear(),
        }
    }

    pub fn class_attr(&self) -> String {
        self.classes.join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatCard {
    pub value: String,
    pub classes: Vec<String>,
}

impl StatCard {
    fn new() -> Self {
        Self {
            value: "0".to_string(),
            classes: vec!["stat-card".to_string()],
        }
    }

    fn restyle(&mut self, value: String, indicator: Option<&str>) {
        self.value = value;
        self.classes.retain(|class| !class.starts_with(STATUS_CLASS_PREFIX));
        if let Some(indicator) = indicator {
            self.classes.push(format!("{STATUS_CLASS_PREFIX}{indicator}"));
        }
    }

    pub fn class_attr(&self) -> String {
        self.classes.join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryView {
    pub working: StatCard,
    pub required: StatCard,
    pub office: StatCard,
    pub balance: StatCard,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarView {
    pub year: i32,
    pub month: u32,
    pub month_name: &'static str,
    pub leading_blanks: u32,
    pub cells: Vec<DayCell>,
    pub summary: SummaryView,
}

impl CalendarView {
    /// Unstyled grid for a month.
    pub fn new(year: i32, month: u32) -> Self {
        let cells = (1..=days_in_month(year, month))
            .filter_map(|day| {
                DateKey::from_ymd(year, month, day)
                    .map(|date| DayCell::new(date, is_weekend(year, month, day)))
            })
            .collect();

        Self {
            year,
            month,
            month_name: month_name(month),
            leading_blanks: start_weekday_offset(year, month),
            cells,
            summary: SummaryView {
                working: StatCard::new(),
                required: StatCard::new(),
                office: StatCard::new(),
                balance: StatCard::new(),
            },
        }
    }

    /// Full re-hydration after navigation or import: every visible day is
    /// synced, then statistics run once.
    pub fn hydrate(&mut self, store: &StatusStore, quota_percent: u8) -> MonthStatistics {
        let dates: Vec<DateKey> = self.cells.iter().map(|cell| cell.date).collect();
        for date in dates {
            self.sync_day(date, store.get(date));
        }
        let stats = compute_statistics_with_quota(store, self.year, self.month, quota_percent);
        self.sync_summary(&stats);
        stats
    }

    /// Restyles one cell. Dates outside the displayed month are ignored.
    pub fn sync_day(&mut self, date: DateKey, status: Option<Status>) -> Option<&DayCell> {
        let cell = self.cells.iter_mut().find(|cell| cell.date == date)?;
        cell.apply(status);
        Some(&*cell)
    }

    pub fn sync_summary(&mut self, stats: &MonthStatistics) {
        let compliance = match stats.compliance() {
            Compliance::Compliant => Some("green"),
            Compliance::Violation => Some("red"),
            Compliance::Neutral => None,
        };
        let completeness = match stats.completeness() {
            Completeness::Incomplete => Some("yellow"),
            Completeness::Complete => None,
        };

        let summary = &mut self.summary;
        summary
            .working
            .restyle(stats.working_days.to_string(), completeness);
        summary
            .required
            .restyle(stats.office_required.to_string(), None);
        summary
            .office
            .restyle(stats.office_count.to_string(), compliance);
        summary
            .balance
            .restyle(format!("{}%", stats.balance_percent), compliance);
    }

    pub fn cell(&self, date: DateKey) -> Option<&DayCell> {
        self.cells.iter().find(|cell| cell.date == date)
    }
}
