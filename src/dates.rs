//! Calendar arithmetic for month views.
//!
//! Months are 1-based (January = 1) everywhere in this module. The HTTP
//! calendar route takes 0-based months and converts through
//! [`normalize_month`].

use crate::models::DateKey;
use chrono::{Datelike, Duration, NaiveDate, Weekday};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Number of days in `month`, or 0 when the month is outside chrono's range.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    if !(1..=12).contains(&month) {
        return 0;
    }
    // last day = first of the following month minus one day
    let next = if month == 12 {
        year.checked_add(1)
            .and_then(|next_year| NaiveDate::from_ymd_opt(next_year, 1, 1))
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next.and_then(|first| first.checked_sub_signed(Duration::days(1)))
        .filter(|last| last.month() == month)
        .map(|last| last.day())
        .unwrap_or(0)
}

pub fn is_weekend(year: i32, month: u32, day: u32) -> bool {
    NaiveDate::from_ymd_opt(year, month, day)
        .map(|date| matches!(date.weekday(), Weekday::Sat | Weekday::Sun))
        .unwrap_or(false)
}

/// Grid column of the first day of the month, Monday = 0 .. Sunday = 6.
pub fn start_weekday_offset(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|first| first.weekday().num_days_from_monday())
        .unwrap_or(0)
}

pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES
        .get(month.wrapping_sub(1) as usize)
        .copied()
        .unwrap_or("")
}

/// Turns a 0-based month that may have over- or underflowed (prev/next
/// navigation) into a `(year, 1-based month)` pair.
pub fn normalize_month(year: i32, month0: i32) -> (i32, u32) {
    let year = year.saturating_add(month0.div_euclid(12));
    let month = month0.rem_euclid(12) as u32 + 1;
    (year, month)
}

/// The month shown `delta` months away from `(year, month)`.
pub fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    normalize_month(year, month as i32 - 1 + delta)
}

/// `3 Jun 2024` style text for the status dialog header.
pub fn format_date_display(date: DateKey) -> String {
    let short = &month_name(date.month())[..3];
    format!("{} {} {}", date.day(), short, date.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2024, 6), 30);
        assert_eq!(days_in_month(2024, 12), 31);
        assert_eq!(days_in_month(2024, 13), 0);
    }

    #[test]
    fn weekend_detection() {
        // 2024-06-01 is a Saturday
        assert!(is_weekend(2024, 6, 1));
        assert!(is_weekend(2024, 6, 2));
        assert!(!is_weekend(2024, 6, 3));
        assert!(!is_weekend(2024, 6, 7));
        assert!(!is_weekend(2024, 6, 31));
    }

    #[test]
    fn start_offset_uses_monday_first_columns() {
        assert_eq!(start_weekday_offset(2024, 6), 5);
        assert_eq!(start_weekday_offset(2024, 7), 0);
        assert_eq!(start_weekday_offset(2024, 9), 6);
    }

    #[test]
    fn normalize_wraps_years() {
        assert_eq!(normalize_month(2024, 5), (2024, 6));
        assert_eq!(normalize_month(2024, 12), (2025, 1));
        assert_eq!(normalize_month(2024, -1), (2023, 12));
        assert_eq!(shift_month(2024, 1, -1), (2023, 12));
        assert_eq!(shift_month(2024, 12, 1), (2025, 1));
    }

    #[test]
    fn display_format() {
        let date = DateKey::from_ymd(2024, 6, 3).unwrap();
        assert_eq!(format_date_display(date), "3 Jun 2024");
        assert_eq!(month_name(9), "September");
        assert_eq!(month_name(0), "");
    }
}
