// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{DateTime, NaiveDate, Utc};

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A template work time was not entered as `HH:MM`.
    InvalidTimeOfDay(String),
    /// A weekday sequence number was outside 0..=6.
    InvalidWeekday(u8),
    /// An alert rule code string was not recognized.
    InvalidAlertCode(String),
    /// A severity string was not recognized.
    InvalidSeverity(String),
    /// A punch action string was not recognized.
    InvalidPunchAction(String),
    /// A leave type string was not recognized.
    InvalidLeaveType(String),
    /// A leave state string was not recognized.
    InvalidLeaveState(String),
    /// A schedule or detail state string was not recognized.
    InvalidLifecycleState(String),
    /// A lifecycle transition is not permitted.
    InvalidStateTransition {
        /// The current state.
        from: String,
        /// The requested state.
        to: String,
        /// Why the transition is refused.
        reason: String,
    },
    /// A schedule's start date does not fall on a Monday.
    ScheduleMustStartMonday {
        /// The invalid start date.
        date_start: NaiveDate,
        /// The actual weekday of the start date.
        weekday: String,
    },
    /// Two schedules for the same employee cover overlapping date ranges.
    OverlappingSchedules {
        /// The employee with conflicting schedules.
        employee_id: i64,
        /// The start of the conflicting range.
        date_start: NaiveDate,
        /// The end of the conflicting range.
        date_end: NaiveDate,
    },
    /// Two details within one schedule cover overlapping intervals.
    OverlappingDetails {
        /// The schedule owning the conflicting details.
        schedule_id: i64,
        /// The start of the conflicting interval.
        date_start: DateTime<Utc>,
        /// The end of the conflicting interval.
        date_end: DateTime<Utc>,
    },
    /// Two work time slots on the same template day share a boundary time.
    DuplicateWorktime {
        /// The template holding the duplicate slots.
        template_id: i64,
        /// The weekday of the duplicate slots.
        weekday: String,
    },
    /// A detail interval would end at or before its start.
    NegativeInterval {
        /// The interval start.
        date_start: DateTime<Utc>,
        /// The interval end.
        date_end: DateTime<Utc>,
    },
    /// A schedule (or one of its details) is not in a deletable state.
    ScheduleNotDeletable {
        /// The schedule refusing deletion.
        schedule_id: i64,
        /// The state blocking deletion.
        state: String,
    },
    /// A locked schedule refused a modification.
    ScheduleLocked {
        /// The schedule refusing the change.
        schedule_id: i64,
    },
    /// A week start date does not match any of a schedule's tracked weeks.
    WeekNotInSchedule {
        /// The schedule that was asked about the week.
        schedule_id: i64,
        /// The unmatched week start date.
        week_start: NaiveDate,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTimeOfDay(value) => {
                write!(f, "The time should be entered as HH:MM, got '{value}'")
            }
            Self::InvalidWeekday(seq) => {
                write!(f, "Weekday sequence must be between 0 and 6, got {seq}")
            }
            Self::InvalidAlertCode(code) => write!(f, "Unknown alert rule code: {code}"),
            Self::InvalidSeverity(value) => write!(f, "Unknown severity: {value}"),
            Self::InvalidPunchAction(value) => write!(f, "Unknown punch action: {value}"),
            Self::InvalidLeaveType(value) => write!(f, "Unknown leave type: {value}"),
            Self::InvalidLeaveState(value) => write!(f, "Unknown leave state: {value}"),
            Self::InvalidLifecycleState(value) => {
                write!(f, "Unknown lifecycle state: {value}")
            }
            Self::InvalidStateTransition { from, to, reason } => {
                write!(f, "Cannot transition from '{from}' to '{to}': {reason}")
            }
            Self::ScheduleMustStartMonday {
                date_start,
                weekday,
            } => {
                write!(
                    f,
                    "The schedule must start on a Monday, but {date_start} is a {weekday}"
                )
            }
            Self::OverlappingSchedules {
                employee_id,
                date_start,
                date_end,
            } => {
                write!(
                    f,
                    "Employee {employee_id} already has a schedule overlapping {date_start} to {date_end}"
                )
            }
            Self::OverlappingDetails {
                schedule_id,
                date_start,
                date_end,
            } => {
                write!(
                    f,
                    "Schedule {schedule_id} already has a detail overlapping {date_start} to {date_end}"
                )
            }
            Self::DuplicateWorktime {
                template_id,
                weekday,
            } => {
                write!(
                    f,
                    "Template {template_id} has two work times sharing a boundary on {weekday}"
                )
            }
            Self::NegativeInterval {
                date_start,
                date_end,
            } => {
                write!(
                    f,
                    "Interval end {date_end} must be after its start {date_start}"
                )
            }
            Self::ScheduleNotDeletable { schedule_id, state } => {
                write!(
                    f,
                    "Schedule {schedule_id} cannot be deleted while in state '{state}'"
                )
            }
            Self::ScheduleLocked { schedule_id } => {
                write!(f, "Schedule {schedule_id} is locked and cannot be modified")
            }
            Self::WeekNotInSchedule {
                schedule_id,
                week_start,
            } => {
                write!(
                    f,
                    "Schedule {schedule_id} has no week starting on {week_start}"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
