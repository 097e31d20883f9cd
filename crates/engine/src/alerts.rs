// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Alert lifecycle.
//!
//! The invariant maintained here: the alert set for an employee on a
//! past day always reflects that day's current schedule details and
//! punches. Mutations report the employee-days they touched; those
//! days get their alerts wiped and recomputed. Future days are left
//! alone until they become past.

use crate::context::EngineContext;
use crate::error::EngineError;
use chrono::{Duration, NaiveDate};
use roster_domain::{Alert, check_rule, normalize_punches};
use roster_store::Store;
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// One employee-day whose alerts need recomputing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct AffectedDay {
    /// The employee whose data changed.
    pub employee_id: i64,
    /// The local calendar day that changed.
    pub day: NaiveDate,
}

/// Hook for a newly recorded punch: recomputes its employee-day.
///
/// # Errors
///
/// Returns an error if the punch is unknown or recomputation fails.
pub fn punch_recorded(
    store: &mut Store,
    punch_id: i64,
    ctx: &EngineContext,
) -> Result<(), EngineError> {
    let punch = store.punch(punch_id)?;
    let affected = AffectedDay {
        employee_id: punch.employee_id,
        day: ctx.local_date(punch.timestamp),
    };
    recompute_alerts(store, &[affected], ctx)
}

/// Hook for deleting a punch: drops the alerts linked to it, removes
/// it, then recomputes its employee-day.
///
/// # Errors
///
/// Returns an error if the punch is unknown or recomputation fails.
pub fn punch_removed(
    store: &mut Store,
    punch_id: i64,
    ctx: &EngineContext,
) -> Result<(), EngineError> {
    let punch = store.punch(punch_id)?.clone();
    for alert in store.alerts_for_punch(punch_id) {
        store.remove_alert(alert.alert_id)?;
    }
    store.remove_punch(punch_id)?;

    let affected = AffectedDay {
        employee_id: punch.employee_id,
        day: ctx.local_date(punch.timestamp),
    };
    recompute_alerts(store, &[affected], ctx)
}

/// Recomputes the alert set for each affected employee-day.
///
/// Days on or after `ctx.today` are skipped; they are only checked once
/// they become past. Duplicate pairs are deduplicated.
///
/// # Errors
///
/// Returns an error if a day window cannot be resolved or a store
/// operation fails.
pub fn recompute_alerts(
    store: &mut Store,
    affected: &[AffectedDay],
    ctx: &EngineContext,
) -> Result<(), EngineError> {
    let unique: BTreeSet<AffectedDay> = affected.iter().copied().collect();
    for pair in unique {
        if pair.day >= ctx.today {
            debug!(
                employee_id = pair.employee_id,
                day = %pair.day,
                "day is not past yet, skipping alert recomputation"
            );
            continue;
        }

        clear_day_alerts(store, pair.employee_id, pair.day, ctx)?;
        compute_alerts_by_employee(store, pair.employee_id, pair.day, ctx)?;
    }
    Ok(())
}

/// Deletes every alert for an employee within one local day's window.
fn clear_day_alerts(
    store: &mut Store,
    employee_id: i64,
    day: NaiveDate,
    ctx: &EngineContext,
) -> Result<(), EngineError> {
    let (from, to) = ctx.day_window(day)?;
    for alert in store.alerts_in_window(employee_id, from, to) {
        store.remove_alert(alert.alert_id)?;
    }
    Ok(())
}

/// Runs every active rule against one employee-day and persists the
/// violations not already recorded.
///
/// Punches are normalized against the adjacent days so shifts crossing
/// midnight pair up. Returns the number of alerts created; calling this
/// twice without underlying data changes creates none the second time.
///
/// # Errors
///
/// Returns an error if the day window cannot be resolved or an insert
/// fails.
pub fn compute_alerts_by_employee(
    store: &mut Store,
    employee_id: i64,
    day: NaiveDate,
    ctx: &EngineContext,
) -> Result<usize, EngineError> {
    let (from, to) = ctx.day_window(day)?;
    let details = store.details_on_day(employee_id, day);
    let punches = store.punches_in_window(employee_id, from, to);
    let prev_day = store.punches_in_window(employee_id, from - Duration::hours(24), from);
    let next_day = store.punches_in_window(employee_id, to, to + Duration::hours(24));
    let normalized = normalize_punches(&punches, &prev_day, &next_day);

    let leaves = store.carving_leave_windows(
        employee_id,
        from - Duration::hours(24),
        to + Duration::hours(24),
    );

    let mut inserted = 0;
    for rule in store.active_rules() {
        let matches = check_rule(&rule, &details, &normalized, &leaves);

        for (timestamp, punch_id) in matches.punches {
            if !store.alert_exists(rule.rule_id, Some(punch_id), None, timestamp) {
                store.insert_alert(Alert::for_punch(rule.rule_id, timestamp, punch_id))?;
                inserted += 1;
            }
        }
        for (timestamp, detail_id) in matches.schedule_details {
            if !store.alert_exists(rule.rule_id, None, Some(detail_id), timestamp) {
                store.insert_alert(Alert::for_detail(rule.rule_id, timestamp, detail_id))?;
                inserted += 1;
            }
        }
    }

    Ok(inserted)
}

/// Daily sweep: recomputes yesterday's alerts for every employee.
///
/// A failure for one employee is logged and does not stop the sweep.
/// Returns the number of alerts created.
///
/// # Errors
///
/// Returns an error if yesterday's day window cannot be resolved.
pub fn check_for_alerts(store: &mut Store, ctx: &EngineContext) -> Result<usize, EngineError> {
    let yesterday = ctx.today - Duration::days(1);
    let mut created = 0;

    for employee in store.employees() {
        let employee_id = employee.employee_id;
        let result = clear_day_alerts(store, employee_id, yesterday, ctx)
            .and_then(|()| compute_alerts_by_employee(store, employee_id, yesterday, ctx));
        match result {
            Ok(count) => created += count,
            Err(err) => {
                warn!(employee_id, %err, "alert sweep failed for employee, continuing");
            }
        }
    }

    Ok(created)
}

/// Recomputes alerts for a set of employees over a date range.
///
/// The range end is clamped so only past days are processed. Returns
/// the number of alerts created.
///
/// # Errors
///
/// Returns an error if a day window cannot be resolved or a store
/// operation fails.
pub fn compute_alerts_range(
    store: &mut Store,
    employee_ids: &[i64],
    date_start: NaiveDate,
    date_end: NaiveDate,
    ctx: &EngineContext,
) -> Result<usize, EngineError> {
    let last_past_day = ctx.today - Duration::days(1);
    let clamped_end = date_end.min(last_past_day);

    let mut created = 0;
    let mut day = date_start;
    while day <= clamped_end {
        for &employee_id in employee_ids {
            clear_day_alerts(store, employee_id, day, ctx)?;
            created += compute_alerts_by_employee(store, employee_id, day, ctx)?;
        }
        day += Duration::days(1);
    }

    Ok(created)
}
