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

mod alerts;
mod context;
mod error;
mod expansion;
mod generate;
mod leave;
mod lifecycle;
mod restday;

#[cfg(test)]
mod tests;

pub use alerts::{
    AffectedDay, check_for_alerts, compute_alerts_by_employee, compute_alerts_range,
    punch_recorded, punch_removed, recompute_alerts,
};
pub use context::EngineContext;
pub use error::EngineError;
pub use expansion::{
    ReconcileOutcome, ScheduleChanges, delete_details, expand_schedule, reconcile,
    regenerate_schedule,
};
pub use generate::{create_mass_schedules, generate_schedules, next_monday};
pub use leave::{apply_leave_refusal, apply_leave_validation};
pub use lifecycle::{
    confirm_schedule, delete_schedule, lock_detail, lock_schedule, unconfirm_schedule,
    unlock_detail,
};
pub use restday::change_rest_day;
