// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A day of the week, Monday first.
///
/// The sequence number (Monday = 0) matches the template and detail
/// `dayofweek` encoding and is the value exchanged with callers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    #[default]
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All weekdays in sequence order.
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Returns the sequence number, Monday = 0 through Sunday = 6.
    #[must_use]
    pub const fn sequence(&self) -> u8 {
        match self {
            Self::Monday => 0,
            Self::Tuesday => 1,
            Self::Wednesday => 2,
            Self::Thursday => 3,
            Self::Friday => 4,
            Self::Saturday => 5,
            Self::Sunday => 6,
        }
    }

    /// Builds a weekday from its sequence number.
    ///
    /// # Errors
    ///
    /// Returns an error if the sequence is not in 0..=6.
    pub const fn from_sequence(sequence: u8) -> Result<Self, DomainError> {
        match sequence {
            0 => Ok(Self::Monday),
            1 => Ok(Self::Tuesday),
            2 => Ok(Self::Wednesday),
            3 => Ok(Self::Thursday),
            4 => Ok(Self::Friday),
            5 => Ok(Self::Saturday),
            6 => Ok(Self::Sunday),
            _ => Err(DomainError::InvalidWeekday(sequence)),
        }
    }

    /// Converts from a chrono weekday.
    #[must_use]
    pub const fn from_chrono(weekday: chrono::Weekday) -> Self {
        match weekday {
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
            chrono::Weekday::Sun => Self::Sunday,
        }
    }

    /// Returns the display name of the weekday.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The lifecycle state of a schedule.
///
/// `Locked` and `Unlocked` are driven bottom-up by detail locking: a
/// schedule is locked only while every one of its details is locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleState {
    /// Initial state after creation. Full editing allowed.
    #[default]
    Draft,
    /// Confirmed by a supervisor. Propagates confirmation to details.
    Confirmed,
    /// Every detail reports locked.
    Locked,
    /// At least one detail is not locked.
    Unlocked,
}

impl ScheduleState {
    /// Converts this state to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Confirmed => "confirmed",
            Self::Locked => "locked",
            Self::Unlocked => "unlocked",
        }
    }

    /// Returns whether a schedule in this state may be deleted.
    #[must_use]
    pub const fn is_deletable(&self) -> bool {
        matches!(self, Self::Draft | Self::Unlocked)
    }

    /// Validates a transition from this state to another.
    ///
    /// Valid transitions are `Draft → Confirmed`, `Confirmed → Draft`
    /// (un-confirm), `Confirmed → Locked`, and the child-driven
    /// `Locked ⇄ Unlocked` pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is not permitted.
    pub fn validate_transition(&self, target: Self) -> Result<(), DomainError> {
        let valid = matches!(
            (self, target),
            (Self::Draft, Self::Confirmed)
                | (Self::Confirmed, Self::Draft | Self::Locked)
                | (Self::Locked, Self::Unlocked)
                | (Self::Unlocked, Self::Locked)
        );

        if valid {
            Ok(())
        } else {
            Err(DomainError::InvalidStateTransition {
                from: self.as_str().to_string(),
                to: target.as_str().to_string(),
                reason: "transition not permitted by the schedule lifecycle".to_string(),
            })
        }
    }
}

impl FromStr for ScheduleState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "confirmed" => Ok(Self::Confirmed),
            "locked" => Ok(Self::Locked),
            "unlocked" => Ok(Self::Unlocked),
            _ => Err(DomainError::InvalidLifecycleState(s.to_string())),
        }
    }
}

impl std::fmt::Display for ScheduleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The lifecycle state of a single schedule detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DetailState {
    #[default]
    Draft,
    Confirmed,
    Locked,
    Unlocked,
}

impl DetailState {
    /// Converts this state to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Confirmed => "confirmed",
            Self::Locked => "locked",
            Self::Unlocked => "unlocked",
        }
    }

    /// Returns whether the detail reports locked to its parent schedule.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        matches!(self, Self::Locked)
    }

    /// Returns whether a detail in this state may be deleted.
    #[must_use]
    pub const fn is_deletable(&self) -> bool {
        matches!(self, Self::Draft | Self::Unlocked)
    }
}

impl FromStr for DetailState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "confirmed" => Ok(Self::Confirmed),
            "locked" => Ok(Self::Locked),
            "unlocked" => Ok(Self::Unlocked),
            _ => Err(DomainError::InvalidLifecycleState(s.to_string())),
        }
    }
}

impl std::fmt::Display for DetailState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The direction of an attendance punch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PunchAction {
    SignIn,
    SignOut,
}

impl PunchAction {
    /// Returns the string representation of the action.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SignIn => "sign_in",
            Self::SignOut => "sign_out",
        }
    }
}

impl FromStr for PunchAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sign_in" => Ok(Self::SignIn),
            "sign_out" => Ok(Self::SignOut),
            _ => Err(DomainError::InvalidPunchAction(s.to_string())),
        }
    }
}

/// A recorded attendance punch.
///
/// Punches are consumed read-only by the engine; only alert linkage
/// refers back to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Punch {
    /// Canonical identifier assigned by the store.
    pub punch_id: i64,
    /// The employee who punched.
    pub employee_id: i64,
    /// The punch moment in UTC.
    pub timestamp: DateTime<Utc>,
    /// Whether this is a sign-in or sign-out.
    pub action: PunchAction,
}

impl Punch {
    /// Creates a new punch without a persisted identifier.
    #[must_use]
    pub const fn new(employee_id: i64, timestamp: DateTime<Utc>, action: PunchAction) -> Self {
        Self {
            punch_id: 0,
            employee_id,
            timestamp,
            action,
        }
    }
}

/// The kind of a leave request.
///
/// Only `Remove` (an absence) carves holes out of generated schedules;
/// `Add` allocations never touch schedule details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveType {
    Remove,
    Add,
}

impl FromStr for LeaveType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "remove" => Ok(Self::Remove),
            "add" => Ok(Self::Add),
            _ => Err(DomainError::InvalidLeaveType(s.to_string())),
        }
    }
}

/// The approval state of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LeaveState {
    #[default]
    Draft,
    Confirm,
    /// First-level approval.
    Validate1,
    /// Fully approved.
    Validate,
    Refuse,
}

impl LeaveState {
    /// Returns whether the leave counts as approved.
    ///
    /// Both approval levels count; a singly-approved leave already
    /// blocks attendance.
    #[must_use]
    pub const fn is_validated(&self) -> bool {
        matches!(self, Self::Validate | Self::Validate1)
    }
}

impl FromStr for LeaveState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "confirm" => Ok(Self::Confirm),
            "validate1" => Ok(Self::Validate1),
            "validate" => Ok(Self::Validate),
            "refuse" => Ok(Self::Refuse),
            _ => Err(DomainError::InvalidLeaveState(s.to_string())),
        }
    }
}

/// An employee leave interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leave {
    /// Canonical identifier assigned by the store.
    pub leave_id: i64,
    /// The employee on leave.
    pub employee_id: i64,
    /// Leave interval start in UTC.
    pub date_from: DateTime<Utc>,
    /// Leave interval end in UTC.
    pub date_to: DateTime<Utc>,
    /// Absence or allocation.
    pub leave_type: LeaveType,
    /// Approval state.
    pub state: LeaveState,
}

impl Leave {
    /// Creates a new leave without a persisted identifier.
    #[must_use]
    pub const fn new(
        employee_id: i64,
        date_from: DateTime<Utc>,
        date_to: DateTime<Utc>,
        leave_type: LeaveType,
    ) -> Self {
        Self {
            leave_id: 0,
            employee_id,
            date_from,
            date_to,
            leave_type,
            state: LeaveState::Draft,
        }
    }

    /// Returns whether this leave carves holes out of schedules.
    #[must_use]
    pub const fn carves_schedule(&self) -> bool {
        matches!(self.leave_type, LeaveType::Remove) && self.state.is_validated()
    }
}

/// The severity of an alert rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Converts this severity to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl FromStr for Severity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(DomainError::InvalidSeverity(s.to_string())),
        }
    }
}

/// An employee, as far as scheduling is concerned.
///
/// The surrounding application owns the full employee record; the
/// engine only needs the display name and the template assigned through
/// the employee's contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Canonical identifier assigned by the store.
    pub employee_id: i64,
    /// Display name, used when generating schedule names.
    pub name: String,
    /// The schedule template assigned via the employee's contract.
    pub template_id: Option<i64>,
}

impl Employee {
    /// Creates a new employee without a persisted identifier.
    #[must_use]
    pub const fn new(name: String, template_id: Option<i64>) -> Self {
        Self {
            employee_id: 0,
            name,
            template_id,
        }
    }
}
