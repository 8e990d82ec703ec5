use crate::dates::{days_in_month, is_weekend};
use crate::models::{DateKey, Status};
use crate::store::StatusStore;
use serde::Serialize;

pub const DEFAULT_QUOTA_PERCENT: u8 = 60;

/// Compliance figures for one month, always recomputed from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthStatistics {
    pub year: i32,
    pub month: u32,
    pub weekday_count: u32,
    pub office_count: u32,
    pub wfh_count: u32,
    pub skip_count: u32,
    pub working_days: u32,
    pub office_required: u32,
    pub balance_percent: u32,
    pub all_weekdays_marked: bool,
}

/// Office and balance card state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Compliance {
    Compliant,
    Violation,
    Neutral,
}

/// Working days card state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Completeness {
    Complete,
    Incomplete,
}

impl MonthStatistics {
    pub fn compliance(&self) -> Compliance {
        if self.working_days == 0 {
            Compliance::Neutral
        } else if self.office_count >= self.office_required {
            Compliance::Compliant
        } else {
            Compliance::Violation
        }
    }

    pub fn completeness(&self) -> Completeness {
        if !self.all_weekdays_marked && self.weekday_count > 0 {
            Completeness::Incomplete
        } else {
            Completeness::Complete
        }
    }
}

pub fn compute_statistics(store: &StatusStore, year: i32, month: u32) -> MonthStatistics {
    compute_statistics_with_quota(store, year, month, DEFAULT_QUOTA_PERCENT)
}

pub fn compute_statistics_with_quota(
    store: &StatusStore,
    year: i32,
    month: u32,
    quota_percent: u8,
) -> MonthStatistics {
    let mut weekday_count = 0u32;
    let mut office_count = 0u32;
    let mut wfh_count = 0u32;
    let mut skip_count = 0u32;
    let mut all_weekdays_marked = true;

    for day in 1..=days_in_month(year, month) {
        if is_weekend(year, month, day) {
            continue;
        }
        weekday_count += 1;

        let status = DateKey::from_ymd(year, month, day).and_then(|date| store.get(date));
        match status {
            Some(status) if status.is_exempt() => skip_count += 1,
            Some(Status::Office) => office_count += 1,
            Some(_) => wfh_count += 1,
            None => all_weekdays_marked = false,
        }
    }

    let working_days = weekday_count - skip_count;
    MonthStatistics {
        year,
        month,
        weekday_count,
        office_count,
        wfh_count,
        skip_count,
        working_days,
        office_required: round_ratio(working_days * u32::from(quota_percent), 100),
        balance_percent: if working_days == 0 {
            0
        } else {
            round_ratio(office_count * 100, working_days)
        },
        all_weekdays_marked,
    }
}

/// `numerator / denominator` rounded half up, in integers.
fn round_ratio(numerator: u32, denominator: u32) -> u32 {
    (2 * numerator + denominator) / (2 * denominator)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(value: &str) -> DateKey {
        value.parse().unwrap()
    }

    fn june_weekdays() -> Vec<DateKey> {
        (1..=30)
            .filter(|day| !is_weekend(2024, 6, *day))
            .filter_map(|day| DateKey::from_ymd(2024, 6, day))
            .collect()
    }

    #[test]
    fn fresh_month_has_nothing_marked() {
        let stats = compute_statistics(&StatusStore::new(), 2024, 6);
        assert_eq!(stats.weekday_count, 20);
        assert_eq!(stats.working_days, 20);
        assert_eq!(stats.office_count, 0);
        assert_eq!(stats.office_required, 12);
        assert_eq!(stats.balance_percent, 0);
        assert!(!stats.all_weekdays_marked);
        assert_eq!(stats.compliance(), Compliance::Violation);
        assert_eq!(stats.completeness(), Completeness::Incomplete);
    }

    #[test]
    fn weekend_statuses_do_not_count() {
        let mut store = StatusStore::new();
        store.set_status(key("2024-06-01"), Some(Status::Office));
        store.set_status(key("2024-06-02"), Some(Status::Holiday));
        store.set_status(key("2024-06-03"), Some(Status::Holiday));

        let stats = compute_statistics(&store, 2024, 6);
        assert_eq!(stats.weekday_count, 20);
        assert_eq!(stats.office_count, 0);
        assert_eq!(stats.skip_count, 1);
        assert_eq!(stats.working_days, 19);
    }

    #[test]
    fn weekday_count_follows_calendar() {
        // February 2024: 29 days, 8 weekend days
        assert_eq!(compute_statistics(&StatusStore::new(), 2024, 2).weekday_count, 21);
        // September 2024: 30 days, 9 weekend days
        assert_eq!(compute_statistics(&StatusStore::new(), 2024, 9).weekday_count, 21);
    }

    #[test]
    fn quota_rounding() {
        assert_eq!(round_ratio(10 * 60, 100), 6);
        assert_eq!(round_ratio(7 * 60, 100), 4);
        assert_eq!(round_ratio(19 * 60, 100), 11);
        assert_eq!(round_ratio(100, 8), 13);
    }

    #[test]
    fn seven_working_days_need_four() {
        let mut store = StatusStore::new();
        for (index, date) in june_weekdays().into_iter().enumerate() {
            let status = if index < 13 { Status::Absent } else { Status::Office };
            store.set_status(date, Some(status));
        }
        let stats = compute_statistics(&store, 2024, 6);
        assert_eq!(stats.working_days, 7);
        assert_eq!(stats.office_required, 4);
        assert_eq!(stats.balance_percent, 100);
        assert!(stats.all_weekdays_marked);
        assert_eq!(stats.compliance(), Compliance::Compliant);
        assert_eq!(stats.completeness(), Completeness::Complete);
    }

    #[test]
    fn all_exempt_month_guards_division() {
        let mut store = StatusStore::new();
        let exempt = [Status::Holiday, Status::Absent, Status::PublicHoliday];
        for (index, date) in june_weekdays().into_iter().enumerate() {
            store.set_status(date, Some(exempt[index % 3]));
        }
        let stats = compute_statistics(&store, 2024, 6);
        assert_eq!(stats.working_days, 0);
        assert_eq!(stats.office_required, 0);
        assert_eq!(stats.balance_percent, 0);
        assert_eq!(stats.compliance(), Compliance::Neutral);
    }

    #[test]
    fn wfh_counts_as_working_but_not_office() {
        let mut store = StatusStore::new();
        for (index, date) in june_weekdays().into_iter().enumerate() {
            let status = if index % 2 == 0 { Status::Office } else { Status::Wfh };
            store.set_status(date, Some(status));
        }
        let stats = compute_statistics(&store, 2024, 6);
        assert_eq!(stats.office_count, 10);
        assert_eq!(stats.wfh_count, 10);
        assert_eq!(stats.working_days, 20);
        assert_eq!(stats.balance_percent, 50);
        assert_eq!(stats.compliance(), Compliance::Violation);
    }

    #[test]
    fn custom_quota() {
        let stats = compute_statistics_with_quota(&StatusStore::new(), 2024, 6, 40);
        assert_eq!(stats.office_required, 8);
    }

    #[test]
    fn other_months_are_ignored() {
        let mut store = StatusStore::new();
        store.set_status(key("2024-05-31"), Some(Status::Office));
        store.set_status(key("2024-07-01"), Some(Status::Office));
        assert_eq!(compute_statistics(&store, 2024, 6).office_count, 0);
    }
}
