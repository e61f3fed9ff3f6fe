use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta};

use crate::sampler::Sampler;

/// Number of weeks an order may fall into, counted from the epoch.
pub const WEEKS: u32 = 66;
/// (month, day) pairs with extra drinks per order.
pub const PEAK_DATES: [(u32, u32); 3] = [(2, 14), (8, 30), (10, 31)];
const OPENING_HOUR: i64 = 11;
const WEEKDAY_WINDOW_MINUTES: i64 = 11 * 60;
const WEEKEND_WINDOW_MINUTES: i64 = 11 * 60 + 30;

/// Business-hours interval for one sampled day, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Samples order timestamps inside store hours.
///
/// Week days are offsets inside a week aligned on the epoch, not calendar
/// weekdays: offsets 5 and 6 get the longer weekend window.
#[derive(Debug, Clone)]
pub struct TimestampSampler {
    epoch: NaiveDateTime,
}

impl Default for TimestampSampler {
    fn default() -> Self {
        let epoch = NaiveDate::from_ymd_opt(2025, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap_or_default();
        Self { epoch }
    }
}

impl TimestampSampler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn epoch(&self) -> NaiveDateTime {
        self.epoch
    }

    pub fn window(&self, week_number: u32, week_day: u32) -> BusinessWindow {
        let start = self.epoch
            + TimeDelta::weeks(i64::from(week_number))
            + TimeDelta::days(i64::from(week_day))
            + TimeDelta::hours(OPENING_HOUR);
        let minutes = if week_day > 4 {
            WEEKEND_WINDOW_MINUTES
        } else {
            WEEKDAY_WINDOW_MINUTES
        };
        BusinessWindow {
            start,
            end: start + TimeDelta::minutes(minutes),
        }
    }

    pub fn sample<S: Sampler>(&self, sampler: &mut S) -> NaiveDateTime {
        let week_day = sampler.int_in(0, 6);
        let week_number = sampler.int_in(0, WEEKS - 1);
        let window = self.window(week_number, week_day);
        sampler.timestamp_between(window.start, window.end)
    }
}

pub fn is_peak_date(timestamp: NaiveDateTime) -> bool {
    PEAK_DATES.contains(&(timestamp.month(), timestamp.day()))
}
