//! Calendar-day keys.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar day in the user's effective timezone.
///
/// Two textual forms exist: the unpadded `Y-M-D` storage form used in
/// synced counter keys, and the `YYYYMMDD` form Beeminder expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Daystamp(NaiveDate);

impl Daystamp {
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Day that `now` belongs to when days start at `rollover_hour`.
    ///
    /// Local times before the rollover hour count as the previous day.
    pub fn at<Tz: TimeZone>(now: &DateTime<Tz>, rollover_hour: u32) -> Self {
        let local = now.naive_local();
        let date = local.date();
        if local.hour() < rollover_hour {
            Self(date.pred_opt().unwrap_or(date))
        } else {
            Self(date)
        }
    }

    pub const fn date(&self) -> NaiveDate {
        self.0
    }

    /// Unpadded `Y-M-D`, e.g. `2026-3-7`.
    pub fn storage_form(&self) -> String {
        format!("{}-{}-{}", self.0.year(), self.0.month(), self.0.day())
    }

    /// `YYYYMMDD`, e.g. `20260307`.
    pub fn api_form(&self) -> String {
        self.0.format("%Y%m%d").to_string()
    }

    /// Parse the `YYYYMMDD` form.
    pub fn parse_api(s: &str) -> Option<Self> {
        NaiveDate::parse_from_str(s, "%Y%m%d").ok().map(Self)
    }
}

impl fmt::Display for Daystamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.api_form())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(y, m, d, h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_midnight_boundary() {
        let day = Daystamp::at(&at(2026, 3, 7, 0, 0), 0);
        assert_eq!(day.storage_form(), "2026-3-7");
        assert_eq!(day.api_form(), "20260307");
    }

    #[test]
    fn test_early_morning_rolls_back() {
        assert_eq!(Daystamp::at(&at(2026, 3, 7, 2, 59), 3).storage_form(), "2026-3-6");
        assert_eq!(Daystamp::at(&at(2026, 3, 7, 3, 0), 3).storage_form(), "2026-3-7");
    }

    #[test]
    fn test_rollback_across_month() {
        assert_eq!(Daystamp::at(&at(2026, 3, 1, 1, 0), 3).api_form(), "20260228");
    }

    #[test]
    fn test_offset_is_respected() {
        let tz = FixedOffset::east_opt(-5 * 3600).unwrap();
        let utc = chrono::Utc.with_ymd_and_hms(2026, 3, 7, 2, 0, 0).unwrap();
        let local = utc.with_timezone(&tz);
        assert_eq!(Daystamp::at(&local, 0).storage_form(), "2026-3-6");
    }

    #[test]
    fn test_parse_api() {
        let day = Daystamp::parse_api("20261015").unwrap();
        assert_eq!(day.storage_form(), "2026-10-15");
        assert!(Daystamp::parse_api("2026-10-15").is_none());
    }

    #[test]
    fn test_monotonic_within_day() {
        let mut last = Daystamp::at(&at(2026, 3, 6, 12, 0), 3);
        for hour in 13..24 {
            let next = Daystamp::at(&at(2026, 3, 6, hour, 0), 3);
            assert!(next >= last);
            last = next;
        }
        for hour in 0..6 {
            let next = Daystamp::at(&at(2026, 3, 7, hour, 0), 3);
            assert!(next >= last);
            last = next;
        }
    }
}
