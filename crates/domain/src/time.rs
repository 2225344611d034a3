//! Clock-string parsing for condition evaluation.
//!
//! Program documents carry times as `HH:MM` (optionally `HH:MM:SS`) and
//! dates as `YYYY-MM-DD`. Parsing is deliberately forgiving: a time that
//! does not parse degrades to midnight instead of failing the rule.

use std::cmp::Ordering;

use chrono::{NaiveDate, NaiveTime};

/// Parse an `HH:MM` or `HH:MM:SS` clock string.
///
/// Unparsable input falls back to midnight (`00:00`) — a schedule with a
/// typo keeps running rather than aborting the cycle.
#[must_use]
pub fn parse_time_of_day(raw: &str) -> NaiveTime {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .unwrap_or(NaiveTime::MIN)
}

/// Parse a `YYYY-MM-DD` calendar date.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Half-open membership test for a daily window.
///
/// When `start > end` the window spans midnight (`now >= start || now < end`).
/// A zero-width window (`start == end`) contains nothing.
#[must_use]
pub fn in_daily_window(now: NaiveTime, start: NaiveTime, end: NaiveTime) -> bool {
    match start.cmp(&end) {
        Ordering::Less => start <= now && now < end,
        Ordering::Greater => now >= start || now < end,
        Ordering::Equal => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(raw: &str) -> NaiveTime {
        parse_time_of_day(raw)
    }

    #[test]
    fn should_parse_hour_minute_strings() {
        assert_eq!(t("07:30"), NaiveTime::from_hms_opt(7, 30, 0).unwrap());
        assert_eq!(t("23:59"), NaiveTime::from_hms_opt(23, 59, 0).unwrap());
    }

    #[test]
    fn should_parse_hour_minute_second_strings() {
        assert_eq!(t("07:30:15"), NaiveTime::from_hms_opt(7, 30, 15).unwrap());
    }

    #[test]
    fn should_fall_back_to_midnight_for_unparsable_times() {
        assert_eq!(t("sunrise"), NaiveTime::MIN);
        assert_eq!(t("25:99"), NaiveTime::MIN);
        assert_eq!(t(""), NaiveTime::MIN);
    }

    #[test]
    fn should_parse_iso_dates() {
        assert_eq!(
            parse_date("2024-09-15"),
            NaiveDate::from_ymd_opt(2024, 9, 15)
        );
    }

    #[test]
    fn should_reject_non_iso_dates() {
        assert_eq!(parse_date("15/09/2024"), None);
        assert_eq!(parse_date("someday"), None);
    }

    #[test]
    fn should_contain_times_inside_same_day_window() {
        assert!(in_daily_window(t("12:00"), t("07:00"), t("19:00")));
        assert!(in_daily_window(t("07:00"), t("07:00"), t("19:00")));
    }

    #[test]
    fn should_exclude_window_end() {
        assert!(!in_daily_window(t("19:00"), t("07:00"), t("19:00")));
    }

    #[test]
    fn should_span_midnight_when_start_is_after_end() {
        assert!(in_daily_window(t("23:00"), t("19:00"), t("07:00")));
        assert!(in_daily_window(t("03:00"), t("19:00"), t("07:00")));
        assert!(!in_daily_window(t("12:00"), t("19:00"), t("07:00")));
    }

    #[test]
    fn should_treat_zero_width_window_as_empty() {
        assert!(!in_daily_window(t("12:00"), t("12:00"), t("12:00")));
        assert!(!in_daily_window(t("00:00"), t("00:00"), t("00:00")));
    }
}
