// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Schedules and their dated shift details.

use crate::types::{DetailState, ScheduleState, Weekday};
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The number of rotating rest-day week slots a schedule carries.
pub const REST_DAY_WEEKS: usize = 5;

/// One employee's instantiation of a template over a date range.
///
/// A schedule must start on a Monday. Its details are owned
/// exclusively by it and are regenerated whenever the template or the
/// date range changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Canonical identifier assigned by the store.
    pub schedule_id: i64,
    /// Display name, derived from the employee and start week.
    pub name: String,
    /// The employee this schedule belongs to.
    pub employee_id: i64,
    /// The template to expand. A schedule without one is skipped by
    /// the expansion engine.
    pub template_id: Option<i64>,
    /// First day covered (a Monday).
    pub date_start: NaiveDate,
    /// Last day covered, inclusive.
    pub date_end: NaiveDate,
    /// Lifecycle state.
    pub state: ScheduleState,
    /// Per-week rest-day overrides, week 1 through week 5.
    pub rest_day_weeks: [Option<BTreeSet<Weekday>>; REST_DAY_WEEKS],
}

impl Schedule {
    /// Creates a new draft schedule without a persisted identifier.
    #[must_use]
    pub const fn new(
        name: String,
        employee_id: i64,
        template_id: Option<i64>,
        date_start: NaiveDate,
        date_end: NaiveDate,
    ) -> Self {
        Self {
            schedule_id: 0,
            name,
            employee_id,
            template_id,
            date_start,
            date_end,
            state: ScheduleState::Draft,
            rest_day_weeks: [None, None, None, None, None],
        }
    }

    /// Returns the 0-based week slot index for a week start date, if
    /// the date is one of this schedule's five tracked week starts.
    #[must_use]
    pub fn week_index_of(&self, week_start: NaiveDate) -> Option<usize> {
        (0..REST_DAY_WEEKS).find(|week| {
            #[allow(clippy::cast_possible_wrap)]
            let offset = Duration::days(7 * *week as i64);
            self.date_start + offset == week_start
        })
    }

    /// Returns whether the date range overlaps another schedule's.
    #[must_use]
    pub fn overlaps(&self, date_start: NaiveDate, date_end: NaiveDate) -> bool {
        self.date_start <= date_end && date_start <= self.date_end
    }
}

/// Builds the display name for a schedule: employee name, start date
/// and ISO week number.
#[must_use]
pub fn schedule_display_name(employee_name: &str, date_start: NaiveDate) -> String {
    format!(
        "{}: {} Wk {}",
        employee_name,
        date_start.format("%Y-%m-%d"),
        date_start.iso_week().week()
    )
}

/// One concrete dated shift generated from a template slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleDetail {
    /// Canonical identifier assigned by the store.
    pub detail_id: i64,
    /// The owning schedule.
    pub schedule_id: i64,
    /// The weekday of the originating template slot.
    pub day_of_week: Weekday,
    /// The local calendar date the shift belongs to.
    pub day: NaiveDate,
    /// Shift start in UTC.
    pub date_start: DateTime<Utc>,
    /// Shift end in UTC.
    pub date_end: DateTime<Utc>,
    /// Lifecycle state, mirroring the parent's lock flag.
    pub state: DetailState,
}

impl ScheduleDetail {
    /// Creates a new draft detail without a persisted identifier.
    #[must_use]
    pub const fn new(
        schedule_id: i64,
        day_of_week: Weekday,
        day: NaiveDate,
        date_start: DateTime<Utc>,
        date_end: DateTime<Utc>,
    ) -> Self {
        Self {
            detail_id: 0,
            schedule_id,
            day_of_week,
            day,
            date_start,
            date_end,
            state: DetailState::Draft,
        }
    }

    /// Returns whether the interval overlaps another detail's,
    /// boundaries inclusive.
    #[must_use]
    pub fn overlaps(&self, date_start: DateTime<Utc>, date_end: DateTime<Utc>) -> bool {
        self.date_start <= date_end && date_start <= self.date_end
    }
}

/// Derives the lock state a schedule should carry from its details.
///
/// A schedule is locked only while *all* of its details report locked;
/// as soon as one is not, it becomes unlocked. A schedule with no
/// details keeps its current state.
#[must_use]
pub fn derive_schedule_lock_state(details: &[ScheduleDetail]) -> Option<ScheduleState> {
    if details.is_empty() {
        return None;
    }

    if details.iter().all(|detail| detail.state.is_locked()) {
        Some(ScheduleState::Locked)
    } else {
        Some(ScheduleState::Unlocked)
    }
}
