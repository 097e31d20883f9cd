// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bulk schedule generation.
//!
//! A scheduled job creates tentative schedules for every employee from
//! the template assigned through their contract. Employees without a
//! template assignment are skipped, and one employee's failure never
//! stops the batch.

use crate::context::EngineContext;
use crate::error::EngineError;
use crate::expansion::expand_schedule;
use chrono::{Datelike, Duration, NaiveDate};
use roster_domain::{Schedule, schedule_display_name, validate_monday_start};
use roster_store::Store;
use tracing::{debug, warn};

/// Number of weeks a mass-generated schedule covers.
const MASS_SCHEDULE_WEEKS: u32 = 2;

/// Returns the Monday of the week after `today`.
#[must_use]
pub fn next_monday(today: NaiveDate) -> NaiveDate {
    let days_ahead = 7 - i64::from(today.weekday().num_days_from_monday());
    today + Duration::days(days_ahead)
}

/// Creates and expands a schedule per employee over `weeks` weeks
/// starting at `date_start` (a Monday).
///
/// Employees without an assigned template are skipped. A failure for
/// one employee (an overlapping schedule, say) is logged and the batch
/// continues. Returns the created schedule ids.
///
/// # Errors
///
/// Returns an error if `date_start` is not a Monday or an employee
/// lookup fails.
pub fn generate_schedules(
    store: &mut Store,
    employee_ids: &[i64],
    date_start: NaiveDate,
    weeks: u32,
    ctx: &EngineContext,
) -> Result<Vec<i64>, EngineError> {
    validate_monday_start(date_start)?;
    let date_end = date_start + Duration::days(i64::from(weeks) * 7 - 1);

    let mut created = Vec::new();
    for &employee_id in employee_ids {
        let employee = store.employee(employee_id)?.clone();
        let Some(template_id) = employee.template_id else {
            debug!(employee_id, "employee has no schedule template, skipping");
            continue;
        };

        let schedule = Schedule::new(
            schedule_display_name(&employee.name, date_start),
            employee_id,
            Some(template_id),
            date_start,
            date_end,
        );

        let result = store
            .insert_schedule(schedule)
            .map_err(EngineError::from)
            .and_then(|schedule_id| {
                expand_schedule(store, schedule_id, ctx).map(|_| schedule_id)
            });
        match result {
            Ok(schedule_id) => created.push(schedule_id),
            Err(err) => {
                warn!(employee_id, %err, "schedule generation failed for employee, continuing");
            }
        }
    }

    Ok(created)
}

/// Scheduled-job entry point: creates two-week schedules for all
/// employees starting the Monday of next week.
///
/// # Errors
///
/// Returns an error if an employee lookup fails mid-batch.
pub fn create_mass_schedules(
    store: &mut Store,
    ctx: &EngineContext,
) -> Result<Vec<i64>, EngineError> {
    let date_start = next_monday(ctx.today);
    let employee_ids: Vec<i64> = store
        .employees()
        .iter()
        .map(|employee| employee.employee_id)
        .collect();
    generate_schedules(store, &employee_ids, date_start, MASS_SCHEDULE_WEEKS, ctx)
}
