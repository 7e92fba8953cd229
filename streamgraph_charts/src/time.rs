// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Calendar tick generation and formatting helpers.
//!
//! Time is a numeric value in **UTC seconds since the Unix epoch**. Tick generation picks the
//! calendar interval whose duration best matches `span / count` (seconds through years) and
//! returns every interval boundary inside the domain. Labels use a multi-scale format: the
//! coarsest calendar unit a tick lands on decides how it prints (`2024`, `February`,
//! `Jan 07`, `Tue 02`, `06 PM`, ...).

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};

use crate::scale::nice_step;

const MINUTE: f64 = 60.0;
const HOUR: f64 = 60.0 * MINUTE;
const DAY: f64 = 24.0 * HOUR;
const WEEK: f64 = 7.0 * DAY;
const MONTH: f64 = 30.0 * DAY;
const YEAR: f64 = 365.0 * DAY;

const MONTH_ABBREV: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A calendar tick interval: a unit plus a step in that unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeInterval {
    /// Every `n` seconds.
    Second(u32),
    /// Every `n` minutes.
    Minute(u32),
    /// Every `n` hours.
    Hour(u32),
    /// Every `n`-th day of the month, counting from the 1st.
    Day(u32),
    /// Every Sunday.
    Week,
    /// Every `n`-th month of the year, counting from January.
    Month(u32),
    /// Every year divisible by `n`.
    Year(u32),
}

impl TimeInterval {
    /// Approximate duration in seconds (months are 30 days, years 365).
    pub fn approx_seconds(self) -> f64 {
        match self {
            Self::Second(n) => f64::from(n),
            Self::Minute(n) => f64::from(n) * MINUTE,
            Self::Hour(n) => f64::from(n) * HOUR,
            Self::Day(n) => f64::from(n) * DAY,
            Self::Week => WEEK,
            Self::Month(n) => f64::from(n) * MONTH,
            Self::Year(n) => f64::from(n) * YEAR,
        }
    }

    fn floor(self, t: NaiveDateTime) -> NaiveDateTime {
        let date = t.date();
        match self {
            Self::Second(_) => t.with_nanosecond(0).unwrap_or(t),
            Self::Minute(_) => date.and_hms_opt(t.hour(), t.minute(), 0).unwrap_or(t),
            Self::Hour(_) => date.and_hms_opt(t.hour(), 0, 0).unwrap_or(t),
            Self::Day(_) => date.and_time(NaiveTime::MIN),
            Self::Week => {
                let back = i64::from(date.weekday().num_days_from_sunday());
                (date - TimeDelta::days(back)).and_time(NaiveTime::MIN)
            }
            Self::Month(_) => date.with_day(1).unwrap_or(date).and_time(NaiveTime::MIN),
            Self::Year(_) => NaiveDate::from_ymd_opt(date.year(), 1, 1)
                .unwrap_or(date)
                .and_time(NaiveTime::MIN),
        }
    }

    fn advance(self, t: NaiveDateTime) -> Option<NaiveDateTime> {
        match self {
            Self::Second(_) => t.checked_add_signed(TimeDelta::seconds(1)),
            Self::Minute(_) => t.checked_add_signed(TimeDelta::minutes(1)),
            Self::Hour(_) => t.checked_add_signed(TimeDelta::hours(1)),
            Self::Day(_) => t.checked_add_signed(TimeDelta::days(1)),
            Self::Week => t.checked_add_signed(TimeDelta::weeks(1)),
            Self::Month(_) => t.checked_add_months(Months::new(1)),
            Self::Year(_) => t.checked_add_months(Months::new(12)),
        }
    }

    fn accepts(self, t: NaiveDateTime) -> bool {
        match self {
            Self::Second(n) => t.second() % n.max(1) == 0,
            Self::Minute(n) => t.minute() % n.max(1) == 0,
            Self::Hour(n) => t.hour() % n.max(1) == 0,
            Self::Day(n) => t.day0() % n.max(1) == 0,
            Self::Week => true,
            Self::Month(n) => t.month0() % n.max(1) == 0,
            Self::Year(n) => t.year().rem_euclid(i32::try_from(n.max(1)).unwrap_or(1)) == 0,
        }
    }
}

/// Candidate intervals, finest first.
const INTERVALS: [TimeInterval; 17] = [
    TimeInterval::Second(1),
    TimeInterval::Second(5),
    TimeInterval::Second(15),
    TimeInterval::Second(30),
    TimeInterval::Minute(1),
    TimeInterval::Minute(5),
    TimeInterval::Minute(15),
    TimeInterval::Minute(30),
    TimeInterval::Hour(1),
    TimeInterval::Hour(3),
    TimeInterval::Hour(6),
    TimeInterval::Hour(12),
    TimeInterval::Day(1),
    TimeInterval::Day(2),
    TimeInterval::Week,
    TimeInterval::Month(1),
    TimeInterval::Month(3),
];

/// Picks the interval whose duration is closest (by ratio) to `span / count`.
fn choose_interval(span: f64, count: usize) -> TimeInterval {
    let target = span / count.max(1) as f64;
    let i = INTERVALS.partition_point(|iv| iv.approx_seconds() <= target);
    if i == 0 {
        return INTERVALS[0];
    }
    if i == INTERVALS.len() {
        let years = nice_step(target / YEAR).max(1.0).min(f64::from(u32::MAX));
        #[allow(
            clippy::cast_possible_truncation,
            reason = "clamped to [1, u32::MAX] and integral for spans of a year or more"
        )]
        let years = years.round() as u32;
        return TimeInterval::Year(years);
    }
    let below = INTERVALS[i - 1];
    let above = INTERVALS[i];
    if target / below.approx_seconds() < above.approx_seconds() / target {
        below
    } else {
        above
    }
}

/// Converts a calendar date to UTC midnight seconds since the Unix epoch.
pub fn date_to_seconds(date: NaiveDate) -> f64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp() as f64
}

fn seconds_to_datetime(t: f64) -> Option<NaiveDateTime> {
    if !t.is_finite() {
        return None;
    }
    let secs = t.floor().clamp(i64::MIN as f64, i64::MAX as f64);
    #[allow(clippy::cast_possible_truncation, reason = "clamped to the i64 range")]
    let secs = secs as i64;
    DateTime::from_timestamp(secs, 0).map(|dt| dt.naive_utc())
}

/// Returns calendar-aligned ticks inside `[min, max]` for roughly `count` ticks.
///
/// The interval used is returned alongside, or `None` when no ticks could be produced.
pub fn time_ticks(mut min: f64, mut max: f64, count: usize) -> (Vec<f64>, Option<TimeInterval>) {
    if count == 0 || !min.is_finite() || !max.is_finite() {
        return (Vec::new(), None);
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }
    if min == max {
        return (vec![min], None);
    }

    let interval = choose_interval(max - min, count);
    let (Some(start), Some(stop)) = (seconds_to_datetime(min), seconds_to_datetime(max)) else {
        return (Vec::new(), None);
    };

    let mut t = interval.floor(start);
    if t < start {
        match interval.advance(t) {
            Some(next) => t = next,
            None => return (Vec::new(), Some(interval)),
        }
    }

    let mut out = Vec::new();
    let mut guard = 0_u32;
    while t <= stop && guard < 100_000 {
        if interval.accepts(t) {
            out.push(t.and_utc().timestamp() as f64);
        }
        match interval.advance(t) {
            Some(next) => t = next,
            None => break,
        }
        guard += 1;
    }
    (out, Some(interval))
}

/// Formats a tick at `t` seconds using the coarsest calendar unit it lands on.
pub fn format_time_tick(t: f64) -> String {
    let Some(dt) = seconds_to_datetime(t) else {
        return format!("{t}");
    };
    let date = dt.date();
    if dt.second() != 0 {
        dt.format(":%S").to_string()
    } else if dt.minute() != 0 {
        dt.format("%I:%M").to_string()
    } else if dt.hour() != 0 {
        dt.format("%I %p").to_string()
    } else if date.day() != 1 {
        if date.weekday().num_days_from_sunday() != 0 {
            dt.format("%a %d").to_string()
        } else {
            dt.format("%b %d").to_string()
        }
    } else if date.month() != 1 {
        dt.format("%B").to_string()
    } else {
        dt.format("%Y").to_string()
    }
}

/// Returns the three-letter English month abbreviation of a date (`Jan`, `Feb`, ...).
pub fn format_month_abbrev(date: NaiveDate) -> &'static str {
    MONTH_ABBREV[date.month0() as usize % 12]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn one_month_span_ticks_on_sundays() {
        let (ticks, interval) = time_ticks(
            date_to_seconds(ymd(2024, 1, 1)),
            date_to_seconds(ymd(2024, 2, 1)),
            6,
        );
        assert_eq!(interval, Some(TimeInterval::Week));
        let labels: Vec<_> = ticks.iter().map(|&t| format_time_tick(t)).collect();
        assert_eq!(labels, vec!["Jan 07", "Jan 14", "Jan 21", "Jan 28"]);
    }

    #[test]
    fn one_year_span_ticks_on_months() {
        let (ticks, interval) = time_ticks(
            date_to_seconds(ymd(2024, 1, 1)),
            date_to_seconds(ymd(2024, 12, 1)),
            6,
        );
        assert_eq!(interval, Some(TimeInterval::Month(3)));
        let labels: Vec<_> = ticks.iter().map(|&t| format_time_tick(t)).collect();
        assert_eq!(labels, vec!["2024", "April", "July", "October"]);
    }

    #[test]
    fn multi_year_span_ticks_on_years() {
        let (ticks, interval) = time_ticks(
            date_to_seconds(ymd(2000, 6, 1)),
            date_to_seconds(ymd(2030, 6, 1)),
            6,
        );
        assert_eq!(interval, Some(TimeInterval::Year(5)));
        assert_eq!(ticks.len(), 6);
        assert_eq!(format_time_tick(ticks[0]), "2005");
    }

    #[test]
    fn day_ticks_use_weekday_format() {
        assert_eq!(format_time_tick(date_to_seconds(ymd(2024, 1, 2))), "Tue 02");
        assert_eq!(format_time_tick(date_to_seconds(ymd(2024, 3, 1))), "March");
    }

    #[test]
    fn month_abbreviations() {
        assert_eq!(format_month_abbrev(ymd(2024, 1, 15)), "Jan");
        assert_eq!(format_month_abbrev(ymd(2024, 12, 1)), "Dec");
    }

    #[test]
    fn degenerate_domain_yields_single_tick() {
        let t = date_to_seconds(ymd(2024, 1, 1));
        let (ticks, interval) = time_ticks(t, t, 6);
        assert_eq!(ticks, vec![t]);
        assert_eq!(interval, None);
    }
}
