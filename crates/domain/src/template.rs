// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Weekly work-time templates.
//!
//! A template is a reusable weekly pattern of work-time slots plus a set
//! of designated rest days. Schedules instantiate a template over a
//! concrete date range.

use crate::error::DomainError;
use crate::types::Weekday;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// A wall-clock time of day entered as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// Creates a time of day from components.
    ///
    /// # Errors
    ///
    /// Returns an error if the hour or minute is out of range.
    pub fn new(hour: u8, minute: u8) -> Result<Self, DomainError> {
        if hour > 23 || minute > 59 {
            return Err(DomainError::InvalidTimeOfDay(format!("{hour}:{minute}")));
        }
        Ok(Self { hour, minute })
    }

    /// Returns the hour component.
    #[must_use]
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    /// Returns the minute component.
    #[must_use]
    pub const fn minute(&self) -> u8 {
        self.minute
    }

    /// Returns the minutes elapsed since midnight.
    #[must_use]
    pub fn minutes_from_midnight(&self) -> i64 {
        i64::from(self.hour) * 60 + i64::from(self.minute)
    }

    /// Converts to a chrono time, if representable.
    #[must_use]
    pub fn as_naive_time(&self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(u32::from(self.hour), u32::from(self.minute), 0)
    }
}

impl FromStr for TimeOfDay {
    type Err = DomainError;

    /// Parses an `HH:MM` string.
    ///
    /// A missing `:` separator or non-numeric component is a validation
    /// failure surfaced to the caller.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((hour_part, minute_part)) = s.split_once(':') else {
            return Err(DomainError::InvalidTimeOfDay(s.to_string()));
        };

        let hour: u8 = hour_part
            .parse()
            .map_err(|_| DomainError::InvalidTimeOfDay(s.to_string()))?;
        let minute: u8 = minute_part
            .parse()
            .map_err(|_| DomainError::InvalidTimeOfDay(s.to_string()))?;

        Self::new(hour, minute)
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Returns the clock-time delta from `from` to `to` in seconds,
/// wrapped into `0..86400`.
///
/// A `to` earlier on the clock than `from` wraps past midnight, so a
/// `22:00`–`06:00` slot spans eight hours.
#[must_use]
pub fn clock_delta_seconds(from: TimeOfDay, to: TimeOfDay) -> i64 {
    let delta_minutes = (to.minutes_from_midnight() - from.minutes_from_midnight())
        .rem_euclid(SECONDS_PER_DAY / 60);
    delta_minutes * 60
}

/// One work-time slot within a weekly template.
///
/// Multiple slots on the same day represent split shifts; the second
/// and later slots of a day are treated as continuations when a
/// schedule is expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkTimeSlot {
    /// The weekday this slot falls on.
    pub day_of_week: Weekday,
    /// Wall-clock shift start.
    pub from_time: TimeOfDay,
    /// Wall-clock shift end.
    pub to_time: TimeOfDay,
}

impl WorkTimeSlot {
    /// Creates a new slot.
    #[must_use]
    pub const fn new(day_of_week: Weekday, from_time: TimeOfDay, to_time: TimeOfDay) -> Self {
        Self {
            day_of_week,
            from_time,
            to_time,
        }
    }

    /// Returns the slot duration in seconds, wrapping past midnight.
    #[must_use]
    pub fn duration_seconds(&self) -> i64 {
        clock_delta_seconds(self.from_time, self.to_time)
    }
}

/// A reusable weekly work-time template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleTemplate {
    /// Canonical identifier assigned by the store.
    pub template_id: i64,
    /// Display name.
    pub name: String,
    /// Explicitly designated rest days.
    pub rest_days: BTreeSet<Weekday>,
    /// Work-time slots in (day, start) order.
    pub worktimes: Vec<WorkTimeSlot>,
}

impl ScheduleTemplate {
    /// Creates a new template without a persisted identifier.
    #[must_use]
    pub const fn new(
        name: String,
        rest_days: BTreeSet<Weekday>,
        worktimes: Vec<WorkTimeSlot>,
    ) -> Self {
        Self {
            template_id: 0,
            name,
            rest_days,
            worktimes,
        }
    }

    /// Returns the template's rest days.
    ///
    /// If rest days were explicitly designated those are returned;
    /// otherwise the complement of the scheduled weekdays is inferred.
    /// A template with no work times at all yields an empty set rather
    /// than reporting every day as a rest day.
    #[must_use]
    pub fn effective_rest_days(&self) -> BTreeSet<Weekday> {
        if !self.rest_days.is_empty() {
            return self.rest_days.clone();
        }

        let scheduled: BTreeSet<Weekday> =
            self.worktimes.iter().map(|slot| slot.day_of_week).collect();
        let inferred: BTreeSet<Weekday> = Weekday::ALL
            .into_iter()
            .filter(|day| !scheduled.contains(day))
            .collect();

        if inferred.len() == 7 {
            BTreeSet::new()
        } else {
            inferred
        }
    }

    /// Returns the number of working hours on the given weekday.
    #[must_use]
    pub fn hours_on_weekday(&self, day: Weekday) -> f64 {
        let total_seconds: i64 = self
            .worktimes
            .iter()
            .filter(|slot| slot.day_of_week == day)
            .map(WorkTimeSlot::duration_seconds)
            .sum();

        // Truncate to whole minutes before converting, matching the
        // minute-granular comparisons used everywhere else.
        #[allow(clippy::cast_precision_loss)]
        let minutes = (total_seconds / 60) as f64;
        minutes / 60.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn slot(day: Weekday, from: &str, to: &str) -> WorkTimeSlot {
        WorkTimeSlot::new(day, from.parse().unwrap(), to.parse().unwrap())
    }

    #[test]
    fn test_parse_valid_time() {
        let t: TimeOfDay = "08:30".parse().unwrap();
        assert_eq!(t.hour(), 8);
        assert_eq!(t.minute(), 30);
        assert_eq!(t.to_string(), "08:30");
    }

    #[test]
    fn test_parse_missing_separator() {
        let result = "0830".parse::<TimeOfDay>();
        assert_eq!(
            result,
            Err(DomainError::InvalidTimeOfDay("0830".to_string()))
        );
    }

    #[test]
    fn test_parse_non_numeric() {
        assert!("ab:30".parse::<TimeOfDay>().is_err());
        assert!("08:xx".parse::<TimeOfDay>().is_err());
    }

    #[test]
    fn test_parse_out_of_range() {
        assert!("24:00".parse::<TimeOfDay>().is_err());
        assert!("08:60".parse::<TimeOfDay>().is_err());
    }

    #[test]
    fn test_clock_delta_same_day() {
        let from: TimeOfDay = "08:00".parse().unwrap();
        let to: TimeOfDay = "17:00".parse().unwrap();
        assert_eq!(clock_delta_seconds(from, to), 9 * 3600);
    }

    #[test]
    fn test_clock_delta_wraps_midnight() {
        let from: TimeOfDay = "22:00".parse().unwrap();
        let to: TimeOfDay = "06:00".parse().unwrap();
        assert_eq!(clock_delta_seconds(from, to), 8 * 3600);
    }

    #[test]
    fn test_explicit_rest_days_win() {
        let rest: BTreeSet<Weekday> = [Weekday::Friday].into_iter().collect();
        let template = ScheduleTemplate::new(
            "Standard".to_string(),
            rest.clone(),
            vec![slot(Weekday::Monday, "08:00", "17:00")],
        );
        assert_eq!(template.effective_rest_days(), rest);
    }

    #[test]
    fn test_inferred_rest_days() {
        let template = ScheduleTemplate::new(
            "Mon-Fri".to_string(),
            BTreeSet::new(),
            Weekday::ALL[..5]
                .iter()
                .map(|day| slot(*day, "09:00", "17:00"))
                .collect(),
        );
        let expected: BTreeSet<Weekday> =
            [Weekday::Saturday, Weekday::Sunday].into_iter().collect();
        assert_eq!(template.effective_rest_days(), expected);
    }

    #[test]
    fn test_empty_template_infers_no_rest_days() {
        let template = ScheduleTemplate::new("Empty".to_string(), BTreeSet::new(), Vec::new());
        assert!(template.effective_rest_days().is_empty());
    }

    #[test]
    fn test_hours_on_weekday_split_shift() {
        let template = ScheduleTemplate::new(
            "Split".to_string(),
            BTreeSet::new(),
            vec![
                slot(Weekday::Monday, "08:00", "12:00"),
                slot(Weekday::Monday, "13:00", "17:00"),
                slot(Weekday::Tuesday, "09:00", "17:30"),
            ],
        );
        assert!((template.hours_on_weekday(Weekday::Monday) - 8.0).abs() < f64::EPSILON);
        assert!((template.hours_on_weekday(Weekday::Tuesday) - 8.5).abs() < f64::EPSILON);
        assert!(template.hours_on_weekday(Weekday::Sunday).abs() < f64::EPSILON);
    }
}
