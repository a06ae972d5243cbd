//! Daystamp clock.

use std::sync::Arc;

use crate::domain::models::Daystamp;
use crate::domain::ports::Clock;

/// Maps wall-clock time to the current [`Daystamp`].
#[derive(Clone)]
pub struct DaystampClock {
    clock: Arc<dyn Clock>,
    rollover_hour: u32,
}

impl DaystampClock {
    /// `rollover_hour` is clamped to 0..=23.
    pub fn new(clock: Arc<dyn Clock>, rollover_hour: u32) -> Self {
        Self {
            clock,
            rollover_hour: rollover_hour.min(23),
        }
    }

    pub fn today(&self) -> Daystamp {
        Daystamp::at(&self.clock.now(), self.rollover_hour)
    }

    /// Underlying wall clock.
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::FixedClock;
    use chrono::{FixedOffset, NaiveDate, TimeZone};

    fn clock_at(h: u32, offset_hours: i32) -> Arc<dyn Clock> {
        let offset = FixedOffset::east_opt(offset_hours * 3600).unwrap();
        Arc::new(FixedClock(
            offset.with_ymd_and_hms(2026, 3, 7, h, 30, 0).unwrap(),
        ))
    }

    #[test]
    fn test_midnight_boundary() {
        let day = DaystampClock::new(clock_at(0, 0), 0).today();
        assert_eq!(day.date(), NaiveDate::from_ymd_opt(2026, 3, 7).unwrap());
    }

    #[test]
    fn test_early_morning_is_yesterday_with_rollover() {
        let days = DaystampClock::new(clock_at(2, -5), 3);
        assert_eq!(days.today().storage_form(), "2026-3-6");
        assert_eq!(days.today(), days.today(), "stable within a day");

        let days = DaystampClock::new(clock_at(3, -5), 3);
        assert_eq!(days.today().storage_form(), "2026-3-7");
    }
}
