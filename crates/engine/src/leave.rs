// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Leave integration.
//!
//! Validating an absence carves holes into already-generated shift
//! details; refusing one regenerates the schedules it had carved. Both
//! paths finish by recomputing alerts for the touched days. Callers
//! update the leave's state first and invoke the matching hook after.

use crate::alerts::{AffectedDay, recompute_alerts};
use crate::context::EngineContext;
use crate::error::EngineError;
use crate::expansion::regenerate_schedule;
use chrono::Duration;
use roster_store::Store;
use tracing::debug;

/// Applies a freshly validated absence to existing schedule details.
///
/// For each detail of the employee overlapping the leave interval:
/// full coverage removes the detail; a leave starting inside the shift
/// trims the shift's end to one second before the leave (or removes it
/// when the leave runs to the shift's end); a leave ending inside the
/// shift trims the shift's start to one second after the leave.
///
/// # Errors
///
/// Returns an error if the leave is unknown or a store operation fails.
pub fn apply_leave_validation(
    store: &mut Store,
    leave_id: i64,
    ctx: &EngineContext,
) -> Result<(), EngineError> {
    let leave = store.leave(leave_id)?.clone();
    if !leave.carves_schedule() {
        debug!(leave_id, "leave does not carve schedules, nothing to apply");
        return Ok(());
    }

    let mut affected = Vec::new();
    for schedule in store.schedules_for_employee(leave.employee_id) {
        for mut detail in store.details_for_schedule(schedule.schedule_id) {
            if detail.date_start > leave.date_to || detail.date_end < leave.date_from {
                continue;
            }
            affected.push(AffectedDay {
                employee_id: leave.employee_id,
                day: detail.day,
            });

            if leave.date_from <= detail.date_start && leave.date_to >= detail.date_end {
                remove_detail_with_alerts(store, detail.detail_id)?;
            } else if detail.date_start < leave.date_from {
                // Leave starts inside the shift: keep the leading part,
                // consistent with expansion carving. A leave ending
                // exactly at the shift's end removes it outright.
                let trimmed_end = leave.date_from - Duration::seconds(1);
                if leave.date_to == detail.date_end || trimmed_end <= detail.date_start {
                    remove_detail_with_alerts(store, detail.detail_id)?;
                } else {
                    detail.date_end = trimmed_end;
                    store.update_detail(detail)?;
                }
            } else {
                let trimmed_start = leave.date_to + Duration::seconds(1);
                if trimmed_start < detail.date_end {
                    detail.date_start = trimmed_start;
                    store.update_detail(detail)?;
                } else {
                    remove_detail_with_alerts(store, detail.detail_id)?;
                }
            }
        }
    }

    recompute_alerts(store, &affected, ctx)
}

/// Regenerates every schedule overlapping a refused absence, restoring
/// the shifts it had carved out. Regeneration recomputes alerts for
/// the days it touches.
///
/// # Errors
///
/// Returns an error if the leave is unknown or regeneration fails.
pub fn apply_leave_refusal(
    store: &mut Store,
    leave_id: i64,
    ctx: &EngineContext,
) -> Result<(), EngineError> {
    let leave = store.leave(leave_id)?.clone();
    let from_day = ctx.local_date(leave.date_from);
    let to_day = ctx.local_date(leave.date_to);

    for schedule in store.schedules_overlapping(leave.employee_id, from_day, to_day) {
        regenerate_schedule(store, schedule.schedule_id, ctx)?;
    }
    Ok(())
}

fn remove_detail_with_alerts(store: &mut Store, detail_id: i64) -> Result<(), EngineError> {
    for alert in store.alerts_for_detail(detail_id) {
        store.remove_alert(alert.alert_id)?;
    }
    store.remove_detail(detail_id)?;
    Ok(())
}
