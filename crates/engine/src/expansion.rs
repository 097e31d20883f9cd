// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Schedule expansion.
//!
//! Expansion turns a schedule's template into dated shift details, one
//! week stride at a time. Template wall-clock times are interpreted in
//! the context timezone; details are stored in UTC with the local
//! calendar day alongside.

use crate::alerts::{AffectedDay, recompute_alerts};
use crate::context::EngineContext;
use crate::error::EngineError;
use chrono::{DateTime, Duration, NaiveDate, Timelike, Utc};
use roster_domain::{DomainError, ScheduleDetail, Weekday};
use roster_store::Store;
use std::collections::BTreeSet;
use tracing::debug;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Pending edits to a schedule's expansion inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleChanges {
    /// New template assignment, if changing.
    pub template_id: Option<Option<i64>>,
    /// New start date, if changing.
    pub date_start: Option<NaiveDate>,
    /// New end date, if changing.
    pub date_end: Option<NaiveDate>,
}

impl ScheduleChanges {
    /// Returns whether no expansion input is being changed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.template_id.is_none() && self.date_start.is_none() && self.date_end.is_none()
    }
}

/// The result of reconciling a schedule against pending changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// No expansion input changed; details were left alone.
    Unchanged,
    /// Details were regenerated; holds the new detail ids.
    Regenerated(Vec<i64>),
}

/// Expands a schedule into shift details.
///
/// Skips silently (returning no details) when the schedule has no
/// template. Idempotent when called on a schedule whose details have
/// just been cleared. Also fills any empty rest-day week slots from the
/// template, so later rest-day resolution has an explicit record.
///
/// # Errors
///
/// Returns an error if the schedule is unknown, a wall-clock time
/// cannot be resolved in the context timezone, or a generated detail
/// fails validation.
pub fn expand_schedule(
    store: &mut Store,
    schedule_id: i64,
    ctx: &EngineContext,
) -> Result<Vec<i64>, EngineError> {
    let mut schedule = store.schedule(schedule_id)?.clone();
    let Some(template_id) = schedule.template_id else {
        debug!(schedule_id, "schedule has no template, skipping expansion");
        return Ok(Vec::new());
    };
    let template = store.template(template_id)?.clone();

    let (range_from, _) = ctx.day_window(schedule.date_start)?;
    let (_, range_to) = ctx.day_window(schedule.date_end)?;
    let leaves = store.carving_leave_windows(schedule.employee_id, range_from, range_to);

    let template_rest_days = template.effective_rest_days();
    let mut created = Vec::new();
    let mut week_start = schedule.date_start;

    while week_start <= schedule.date_end {
        if let Some(week_index) = schedule.week_index_of(week_start) {
            let slot_is_empty = schedule.rest_day_weeks[week_index]
                .as_ref()
                .is_none_or(BTreeSet::is_empty);
            if slot_is_empty && !template_rest_days.is_empty() {
                schedule.rest_day_weeks[week_index] = Some(template_rest_days.clone());
            }
        }

        let mut prev: Option<(Weekday, DateTime<Utc>)> = None;
        for slot in &template.worktimes {
            let from_time = slot.from_time.as_naive_time().ok_or_else(|| {
                DomainError::InvalidTimeOfDay(slot.from_time.to_string())
            })?;

            let mut date_start = ctx.to_utc(week_start.and_time(from_time))?;
            if slot.day_of_week != Weekday::Monday {
                date_start += Duration::days(i64::from(slot.day_of_week.sequence()));
            }
            let mut day = ctx.local_date(date_start);

            // A second slot on the same weekday is a continuation (a
            // post-lunch block): anchor it to the previous slot's start
            // by the clock-time delta and keep its calendar day.
            if let Some((prev_day_of_week, prev_start)) = prev
                && prev_day_of_week == slot.day_of_week
            {
                let delta = utc_clock_delta_seconds(prev_start, date_start);
                date_start = prev_start + Duration::seconds(delta);
                day = ctx.local_date(prev_start);
            }

            let mut date_end = date_start + Duration::seconds(slot.duration_seconds());

            // Leave empty holes where there are absences. Only the
            // first overlapping leave interval is applied per shift.
            let mut skip = false;
            for &(leave_from, leave_to) in &leaves {
                if leave_from <= date_start && leave_to >= date_end {
                    skip = true;
                    break;
                } else if date_start < leave_from && leave_from <= date_end {
                    if leave_to == date_end {
                        skip = true;
                    } else {
                        date_end = leave_from - Duration::seconds(1);
                    }
                    break;
                } else if date_start <= leave_to && leave_to < date_end {
                    date_start = leave_to + Duration::seconds(1);
                    break;
                }
            }

            if !skip {
                if date_end > date_start {
                    let detail = ScheduleDetail::new(
                        schedule_id,
                        slot.day_of_week,
                        day,
                        date_start,
                        date_end,
                    );
                    created.push(store.insert_detail(detail)?);
                } else {
                    debug!(
                        schedule_id,
                        %day,
                        "leave trim collapsed a shift to nothing, dropping it"
                    );
                }
            }

            prev = Some((slot.day_of_week, date_start));
        }

        week_start += Duration::days(7);
    }

    store.update_schedule(schedule)?;
    Ok(created)
}

/// Clears a schedule's details together with the alerts linked to
/// them, then recomputes alerts for the past days that lost coverage.
///
/// # Errors
///
/// Returns an error if the schedule is unknown or recomputation fails.
pub fn delete_details(
    store: &mut Store,
    schedule_id: i64,
    ctx: &EngineContext,
) -> Result<(), EngineError> {
    let affected = remove_details(store, schedule_id)?;
    recompute_alerts(store, &affected, ctx)
}

/// Removes every detail of a schedule along with the alerts linked to
/// them, reporting the employee-days that lost a shift.
fn remove_details(store: &mut Store, schedule_id: i64) -> Result<Vec<AffectedDay>, EngineError> {
    let employee_id = store.schedule(schedule_id)?.employee_id;
    let mut affected = Vec::new();
    for detail in store.details_for_schedule(schedule_id) {
        affected.push(AffectedDay {
            employee_id,
            day: detail.day,
        });
        for alert in store.alerts_for_detail(detail.detail_id) {
            store.remove_alert(alert.alert_id)?;
        }
        store.remove_detail(detail.detail_id)?;
    }
    Ok(affected)
}

/// Clears and re-expands a schedule's details, then recomputes alerts
/// for every past day a detail was removed from or created on.
///
/// # Errors
///
/// Returns an error if the schedule is unknown or expansion fails.
pub fn regenerate_schedule(
    store: &mut Store,
    schedule_id: i64,
    ctx: &EngineContext,
) -> Result<Vec<i64>, EngineError> {
    let mut affected = remove_details(store, schedule_id)?;
    let created = expand_schedule(store, schedule_id, ctx)?;

    let employee_id = store.schedule(schedule_id)?.employee_id;
    for &detail_id in &created {
        affected.push(AffectedDay {
            employee_id,
            day: store.detail(detail_id)?.day,
        });
    }
    recompute_alerts(store, &affected, ctx)?;
    Ok(created)
}

/// Applies pending edits to a schedule, regenerating its details when
/// an expansion input (template or date range) changed.
///
/// # Errors
///
/// Returns an error if the schedule is unknown, the new date range
/// violates a schedule invariant, or re-expansion fails. Nothing is
/// written when validation fails.
pub fn reconcile(
    store: &mut Store,
    schedule_id: i64,
    changes: &ScheduleChanges,
    ctx: &EngineContext,
) -> Result<ReconcileOutcome, EngineError> {
    if changes.is_empty() {
        return Ok(ReconcileOutcome::Unchanged);
    }

    let mut schedule = store.schedule(schedule_id)?.clone();
    if let Some(template_id) = changes.template_id {
        schedule.template_id = template_id;
    }
    if let Some(date_start) = changes.date_start {
        schedule.date_start = date_start;
    }
    if let Some(date_end) = changes.date_end {
        schedule.date_end = date_end;
    }
    store.update_schedule(schedule)?;

    let created = regenerate_schedule(store, schedule_id, ctx)?;
    Ok(ReconcileOutcome::Regenerated(created))
}

/// Clock-time delta in seconds from `prev` to `current`, wrapped into
/// `0..86400`. Calendar days are deliberately ignored.
pub(crate) fn utc_clock_delta_seconds(prev: DateTime<Utc>, current: DateTime<Utc>) -> i64 {
    let prev_minutes = i64::from(prev.hour()) * 60 + i64::from(prev.minute());
    let current_minutes = i64::from(current.hour()) * 60 + i64::from(current.minute());
    (current_minutes - prev_minutes).rem_euclid(MINUTES_PER_DAY) * 60
}
