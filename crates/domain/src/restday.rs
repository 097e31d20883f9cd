// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Rest-day resolution.
//!
//! If rest days have been explicitly recorded for a week slot that is
//! what is returned, otherwise a guess is made from the week days that
//! carry no generated shift.

use crate::schedule::{Schedule, ScheduleDetail};
use crate::types::Weekday;
use chrono::{Duration, NaiveDate};
use std::collections::BTreeSet;

/// Resolves the rest days for the week starting at `week_start`.
///
/// The week slot is located as `schedule.date_start + 7k` for
/// `k = 0..5`. An explicit non-empty override for that slot wins;
/// otherwise the complement of the weekdays scheduled within
/// `[week_start, week_start + 7d)` is inferred. A week with no details
/// at all yields an empty set rather than reporting all seven days as
/// rest days.
#[must_use]
pub fn rest_days_for_week(
    schedule: &Schedule,
    details: &[ScheduleDetail],
    week_start: NaiveDate,
) -> BTreeSet<Weekday> {
    if let Some(week_index) = schedule.week_index_of(week_start)
        && let Some(explicit) = &schedule.rest_day_weeks[week_index]
        && !explicit.is_empty()
    {
        return explicit.clone();
    }

    let week_end = week_start + Duration::days(7);
    let scheduled: BTreeSet<Weekday> = details
        .iter()
        .filter(|detail| detail.day >= week_start && detail.day < week_end)
        .map(|detail| detail.day_of_week)
        .collect();

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
