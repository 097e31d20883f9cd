// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod alert_rule;
mod attendance;
mod error;
mod restday;
mod schedule;
mod template;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use alert_rule::{Alert, AlertCode, AlertRule, AlertState, RuleMatches, check_rule};
pub use attendance::normalize_punches;
pub use error::DomainError;
pub use restday::rest_days_for_week;
pub use schedule::{Schedule, ScheduleDetail, derive_schedule_lock_state, schedule_display_name};
pub use template::{ScheduleTemplate, TimeOfDay, WorkTimeSlot, clock_delta_seconds};
pub use types::{
    DetailState, Employee, Leave, LeaveState, LeaveType, Punch, PunchAction, ScheduleState,
    Severity, Weekday,
};
pub use validation::{
    default_date_end, validate_detail_interval, validate_monday_start,
    validate_no_detail_overlap, validate_no_schedule_overlap, validate_worktime_slots,
};
