//! Query windows sent to the portal

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// Sampling interval requested from the portal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Interval {
    /// 10-minute power samples
    TenMinutes,
    /// One yield value per day
    Day,
}

impl Interval {
    /// Name used in the portal's `interval` query parameter
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TenMinutes => "TEN_MINUTES",
            Self::Day => "DAY",
        }
    }
}

/// Inclusive time range plus sampling interval for one portal query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryWindow {
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
    pub interval: Interval,
}

impl QueryWindow {
    /// The calendar day containing `now`, from midnight to the last millisecond
    pub fn today(now: NaiveDateTime, interval: Interval) -> Self {
        let day = now.date();
        Self {
            from: start_of_day(day),
            to: end_of_day(day),
            interval,
        }
    }

    /// `days` whole days back from `now` up to the end of today
    pub fn rolling(now: NaiveDateTime, days: u32) -> Self {
        let start = now.date() - TimeDelta::days(i64::from(days));
        Self {
            from: start_of_day(start),
            to: end_of_day(now.date()),
            interval: Interval::Day,
        }
    }

    /// First calendar day covered by the window
    pub fn start_date(&self) -> NaiveDate {
        self.from.date()
    }

    /// Last calendar day covered by the window
    pub fn end_date(&self) -> NaiveDate {
        self.to.date()
    }
}

fn start_of_day(day: NaiveDate) -> NaiveDateTime {
    day.and_time(NaiveTime::MIN)
}

fn end_of_day(day: NaiveDate) -> NaiveDateTime {
    // 23:59:59.999 always exists
    let last = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
    day.and_time(last)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, min, 0))
            .unwrap()
    }

    #[test]
    fn test_today_spans_whole_day() {
        let window = QueryWindow::today(at(2024, 12, 14, 13, 37), Interval::TenMinutes);

        assert_eq!(window.from, at(2024, 12, 14, 0, 0));
        assert_eq!(window.to.date(), window.from.date());
        assert_eq!(window.to.hour(), 23);
        assert_eq!(window.to.nanosecond(), 999_000_000);
        assert_eq!(window.interval.as_str(), "TEN_MINUTES");
    }

    #[test]
    fn test_rolling_window_starts_days_back() {
        let window = QueryWindow::rolling(at(2024, 12, 14, 8, 0), 30);

        assert_eq!(window.start_date(), NaiveDate::from_ymd_opt(2024, 11, 14).unwrap());
        assert_eq!(window.end_date(), NaiveDate::from_ymd_opt(2024, 12, 14).unwrap());
        assert_eq!(window.interval, Interval::Day);
    }
}
