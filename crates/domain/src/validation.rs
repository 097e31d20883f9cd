// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::schedule::{Schedule, ScheduleDetail};
use crate::template::ScheduleTemplate;
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday as ChronoWeekday};

/// Validates that a schedule's start date falls on a Monday.
///
/// # Errors
///
/// Returns `DomainError::ScheduleMustStartMonday` otherwise.
pub fn validate_monday_start(date_start: NaiveDate) -> Result<(), DomainError> {
    if date_start.weekday() == ChronoWeekday::Mon {
        Ok(())
    } else {
        Err(DomainError::ScheduleMustStartMonday {
            date_start,
            weekday: date_start.weekday().to_string(),
        })
    }
}

/// Returns the default end date for a schedule starting on
/// `date_start`: one week, inclusive.
#[must_use]
pub fn default_date_end(date_start: NaiveDate) -> NaiveDate {
    date_start + Duration::days(6)
}

/// Validates that a candidate date range does not overlap any existing
/// schedule of the same employee.
///
/// `exclude_id` skips the schedule being edited so it does not
/// conflict with itself.
///
/// # Errors
///
/// Returns `DomainError::OverlappingSchedules` on conflict.
pub fn validate_no_schedule_overlap(
    employee_id: i64,
    date_start: NaiveDate,
    date_end: NaiveDate,
    existing: &[Schedule],
    exclude_id: Option<i64>,
) -> Result<(), DomainError> {
    let conflict = existing.iter().any(|schedule| {
        schedule.employee_id == employee_id
            && Some(schedule.schedule_id) != exclude_id
            && schedule.overlaps(date_start, date_end)
    });

    if conflict {
        Err(DomainError::OverlappingSchedules {
            employee_id,
            date_start,
            date_end,
        })
    } else {
        Ok(())
    }
}

/// Validates that a candidate detail interval does not overlap any
/// sibling detail within the same schedule.
///
/// # Errors
///
/// Returns `DomainError::OverlappingDetails` on conflict.
pub fn validate_no_detail_overlap(
    schedule_id: i64,
    date_start: DateTime<Utc>,
    date_end: DateTime<Utc>,
    siblings: &[ScheduleDetail],
    exclude_id: Option<i64>,
) -> Result<(), DomainError> {
    let conflict = siblings.iter().any(|detail| {
        detail.schedule_id == schedule_id
            && Some(detail.detail_id) != exclude_id
            && detail.overlaps(date_start, date_end)
    });

    if conflict {
        Err(DomainError::OverlappingDetails {
            schedule_id,
            date_start,
            date_end,
        })
    } else {
        Ok(())
    }
}

/// Validates that a detail interval has positive length.
///
/// Leave trimming must never leave a zero or negative-length shift
/// behind.
///
/// # Errors
///
/// Returns `DomainError::NegativeInterval` if `date_end <= date_start`.
pub fn validate_detail_interval(
    date_start: DateTime<Utc>,
    date_end: DateTime<Utc>,
) -> Result<(), DomainError> {
    if date_end > date_start {
        Ok(())
    } else {
        Err(DomainError::NegativeInterval {
            date_start,
            date_end,
        })
    }
}

/// Validates a template's work-time slots: no two slots on the same
/// day may share an identical start time or an identical end time.
///
/// # Errors
///
/// Returns `DomainError::DuplicateWorktime` on the first duplicate.
pub fn validate_worktime_slots(template: &ScheduleTemplate) -> Result<(), DomainError> {
    for (index, slot) in template.worktimes.iter().enumerate() {
        let duplicate = template.worktimes[..index].iter().any(|earlier| {
            earlier.day_of_week == slot.day_of_week
                && (earlier.from_time == slot.from_time || earlier.to_time == slot.to_time)
        });

        if duplicate {
            return Err(DomainError::DuplicateWorktime {
                template_id: template.template_id,
                weekday: slot.day_of_week.to_string(),
            });
        }
    }

    Ok(())
}
