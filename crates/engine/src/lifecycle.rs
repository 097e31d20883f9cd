// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Schedule and detail state transitions.
//!
//! Confirmation flows top-down from the schedule to its details.
//! Locking flows bottom-up: a schedule reports locked only while every
//! detail does, and drops back to unlocked as soon as one does not.

use crate::alerts::{AffectedDay, recompute_alerts};
use crate::context::EngineContext;
use crate::error::EngineError;
use roster_domain::{
    DetailState, DomainError, ScheduleState, derive_schedule_lock_state,
};
use roster_store::Store;
use tracing::debug;

/// Confirms a draft schedule, propagating confirmation to its details.
///
/// # Errors
///
/// Returns an error if the schedule is unknown or not in draft.
pub fn confirm_schedule(store: &mut Store, schedule_id: i64) -> Result<(), EngineError> {
    transition_schedule(store, schedule_id, ScheduleState::Confirmed, DetailState::Confirmed)
}

/// Returns a confirmed schedule to draft, along with its details.
///
/// # Errors
///
/// Returns an error if the schedule is unknown or not confirmed.
pub fn unconfirm_schedule(store: &mut Store, schedule_id: i64) -> Result<(), EngineError> {
    transition_schedule(store, schedule_id, ScheduleState::Draft, DetailState::Draft)
}

/// Locks a confirmed schedule and all of its details.
///
/// # Errors
///
/// Returns an error if the schedule is unknown or cannot transition to
/// locked.
pub fn lock_schedule(store: &mut Store, schedule_id: i64) -> Result<(), EngineError> {
    transition_schedule(store, schedule_id, ScheduleState::Locked, DetailState::Locked)
}

fn transition_schedule(
    store: &mut Store,
    schedule_id: i64,
    schedule_state: ScheduleState,
    detail_state: DetailState,
) -> Result<(), EngineError> {
    let mut schedule = store.schedule(schedule_id)?.clone();
    schedule.state.validate_transition(schedule_state)?;
    schedule.state = schedule_state;
    store.update_schedule(schedule)?;

    for mut detail in store.details_for_schedule(schedule_id) {
        detail.state = detail_state;
        store.update_detail(detail)?;
    }
    Ok(())
}

/// Locks a single detail and re-derives the parent schedule's state.
///
/// # Errors
///
/// Returns an error if the detail is unknown.
pub fn lock_detail(store: &mut Store, detail_id: i64) -> Result<(), EngineError> {
    set_detail_state(store, detail_id, DetailState::Locked)
}

/// Unlocks a single detail and re-derives the parent schedule's state.
///
/// # Errors
///
/// Returns an error if the detail is unknown.
pub fn unlock_detail(store: &mut Store, detail_id: i64) -> Result<(), EngineError> {
    set_detail_state(store, detail_id, DetailState::Unlocked)
}

fn set_detail_state(
    store: &mut Store,
    detail_id: i64,
    state: DetailState,
) -> Result<(), EngineError> {
    let mut detail = store.detail(detail_id)?.clone();
    let schedule_id = detail.schedule_id;
    detail.state = state;
    store.update_detail(detail)?;

    let derived = derive_schedule_lock_state(&store.details_for_schedule(schedule_id));
    if let Some(target) = derived {
        let mut schedule = store.schedule(schedule_id)?.clone();
        if schedule.state != target
            && schedule.state.validate_transition(target).is_ok()
        {
            debug!(schedule_id, state = %target, "detail locking re-derived schedule state");
            schedule.state = target;
            store.update_schedule(schedule)?;
        }
    }
    Ok(())
}

/// Deletes a schedule, its details, and every alert linked to them,
/// then recomputes alerts for the past days the schedule covered.
///
/// # Errors
///
/// Returns an error if the schedule is unknown, or the schedule or any
/// of its details is not in a deletable state.
pub fn delete_schedule(
    store: &mut Store,
    schedule_id: i64,
    ctx: &EngineContext,
) -> Result<(), EngineError> {
    let schedule = store.schedule(schedule_id)?.clone();
    if !schedule.state.is_deletable() {
        return Err(DomainError::ScheduleNotDeletable {
            schedule_id,
            state: schedule.state.to_string(),
        }
        .into());
    }

    let details = store.details_for_schedule(schedule_id);
    if let Some(blocked) = details.iter().find(|detail| !detail.state.is_deletable()) {
        return Err(DomainError::ScheduleNotDeletable {
            schedule_id,
            state: blocked.state.to_string(),
        }
        .into());
    }

    let mut affected = Vec::new();
    for detail in details {
        affected.push(AffectedDay {
            employee_id: schedule.employee_id,
            day: detail.day,
        });
        for alert in store.alerts_for_detail(detail.detail_id) {
            store.remove_alert(alert.alert_id)?;
        }
        store.remove_detail(detail.detail_id)?;
    }
    store.remove_schedule(schedule_id)?;
    recompute_alerts(store, &affected, ctx)
}
