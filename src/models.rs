use crate::dates::format_date_display;
use crate::errors::DateKeyError;
use crate::selection::{Dialog, SelectionContext};
use crate::stats::{Completeness, Compliance, MonthStatistics};
use crate::view::{DayCell, SummaryView};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Attendance decision for a single day. A day without an entry in the
/// store is "unset"; there is deliberately no variant for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Office,
    Wfh,
    Holiday,
    Absent,
    PublicHoliday,
}

impl Status {
    pub const ALL: [Status; 5] = [
        Status::Office,
        Status::Wfh,
        Status::Holiday,
        Status::Absent,
        Status::PublicHoliday,
    ];

    /// Wire name, also used as the css suffix (`status-<slug>`).
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Office => "office",
            Status::Wfh => "wfh",
            Status::Holiday => "holiday",
            Status::Absent => "absent",
            Status::PublicHoliday => "public-holiday",
        }
    }

    pub fn parse(value: &str) -> Option<Status> {
        Status::ALL.into_iter().find(|status| status.as_str() == value)
    }

    /// Days that do not count towards the working days of a month.
    pub fn is_exempt(self) -> bool {
        matches!(self, Status::Holiday | Status::Absent | Status::PublicHoliday)
    }

    pub fn label(self) -> String {
        self.as_str().replace('-', " ")
    }
}

/// A local calendar date in canonical `YYYY-MM-DD` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> u32 {
        self.0.month()
    }

    pub fn day(self) -> u32 {
        self.0.day()
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for DateKey {
    type Err = DateKeyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map_err(|_| DateKeyError::Invalid(value.to_string()))?;
        let key = DateKey(date);
        // chrono accepts unpadded fields; only the canonical spelling is a key
        if key.to_string() != value {
            return Err(DateKeyError::NotCanonical(value.to_string()));
        }
        Ok(key)
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub date: DateKey,
    pub status: Option<Status>,
}

#[derive(Debug, Deserialize)]
pub struct HoverRequest {
    pub date: Option<DateKey>,
}

#[derive(Debug, Deserialize)]
pub struct DialogRequest {
    pub date: DateKey,
}

#[derive(Debug, Deserialize)]
pub struct KeyRequest {
    pub key: String,
}

#[derive(Debug, Serialize)]
pub struct DialogResponse {
    pub status_dialog: Dialog,
    pub date_display: Option<String>,
    pub help_open: bool,
}

impl DialogResponse {
    pub fn from_selection(selection: &SelectionContext) -> Self {
        let status_dialog = selection.dialog();
        Self {
            status_dialog,
            date_display: status_dialog.sticky_date().map(format_date_display),
            help_open: selection.help_open(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyOutcome {
    Assigned,
    Ignored,
    NoTarget,
    Dismissed,
}

/// What the page needs after an event: the restyled cell (absent when the
/// date is not on screen) and the refreshed summary.
#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub outcome: KeyOutcome,
    pub date: Option<DateKey>,
    pub status: Option<Status>,
    pub cell: Option<DayCell>,
    pub summary: SummaryView,
    pub statistics: MonthStatistics,
    pub dialog: DialogResponse,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub statistics: MonthStatistics,
    pub office_indicator: Compliance,
    pub balance_indicator: Compliance,
    pub working_indicator: Completeness,
}

impl From<MonthStatistics> for StatsResponse {
    fn from(statistics: MonthStatistics) -> Self {
        Self {
            office_indicator: statistics.compliance(),
            balance_indicator: statistics.compliance(),
            working_indicator: statistics.completeness(),
            statistics,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub message: String,
    pub imported: usize,
    pub cells: Vec<DayCell>,
    pub summary: SummaryView,
    pub statistics: MonthStatistics,
}
