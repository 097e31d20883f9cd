// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Temporary rest-day swaps.
//!
//! A swap trades one week's first rest day for a working day: the new
//! rest day's shifts are dropped, the swapped set is recorded in the
//! week's rest-day slot, and the freed day gets shifts back from the
//! template. The rest of the schedule is left alone.

use crate::alerts::{AffectedDay, recompute_alerts};
use crate::context::EngineContext;
use crate::error::EngineError;
use crate::expansion::utc_clock_delta_seconds;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use roster_domain::{
    DomainError, ScheduleDetail, ScheduleState, Weekday, rest_days_for_week,
};
use roster_store::Store;
use tracing::debug;

/// Swaps a rest day within one week of a schedule.
///
/// `new_rest_day` becomes a rest day for the week starting at
/// `week_start`; the week's first current rest day becomes a working
/// day in exchange, picking up the template's shifts for
/// `new_rest_day` unless the template carries shifts of its own for
/// it. Alerts are recomputed for the past days whose shifts moved.
///
/// # Errors
///
/// Returns an error if the schedule is unknown or locked, or
/// `week_start` is not one of its tracked week starts.
pub fn change_rest_day(
    store: &mut Store,
    schedule_id: i64,
    week_start: NaiveDate,
    new_rest_day: Weekday,
    ctx: &EngineContext,
) -> Result<(), EngineError> {
    let schedule = store.schedule(schedule_id)?.clone();
    if schedule.state == ScheduleState::Locked {
        return Err(DomainError::ScheduleLocked { schedule_id }.into());
    }
    let Some(week_index) = schedule.week_index_of(week_start) else {
        return Err(DomainError::WeekNotInSchedule {
            schedule_id,
            week_start,
        }
        .into());
    };

    let details = store.details_for_schedule(schedule_id);
    let rest_days = rest_days_for_week(&schedule, &details, week_start);
    let old_rest_day = rest_days.iter().next().copied();
    if old_rest_day == Some(new_rest_day) {
        debug!(schedule_id, %week_start, "rest day is unchanged, nothing to swap");
        return Ok(());
    }

    let mut affected = Vec::new();

    // Drop the shifts on the day that becomes a rest day.
    let week_end = week_start + Duration::days(7);
    for detail in details {
        if detail.day < week_start || detail.day >= week_end {
            continue;
        }
        if detail.day_of_week == new_rest_day {
            affected.push(AffectedDay {
                employee_id: schedule.employee_id,
                day: detail.day,
            });
            for alert in store.alerts_for_detail(detail.detail_id) {
                store.remove_alert(alert.alert_id)?;
            }
            store.remove_detail(detail.detail_id)?;
        }
    }

    // Record the swapped set in the week's rest-day slot.
    let mut updated = schedule.clone();
    let mut swapped = rest_days;
    if let Some(old) = old_rest_day {
        swapped.remove(&old);
    }
    swapped.insert(new_rest_day);
    updated.rest_day_weeks[week_index] = Some(swapped);
    store.update_schedule(updated)?;

    // The freed day picks up shifts from the template.
    if let Some(old) = old_rest_day {
        for detail_id in
            create_day_details(store, schedule_id, week_start, old, new_rest_day, ctx)?
        {
            affected.push(AffectedDay {
                employee_id: schedule.employee_id,
                day: store.detail(detail_id)?.day,
            });
        }
    }

    recompute_alerts(store, &affected, ctx)
}

/// Creates details for one day of a week from the template's slots.
///
/// The template's own slots for `day_of_week` are used when it has
/// any; otherwise the slots for `fallback_day` are projected onto the
/// day. Continuation slots are anchored the same way expansion anchors
/// them.
fn create_day_details(
    store: &mut Store,
    schedule_id: i64,
    week_start: NaiveDate,
    day_of_week: Weekday,
    fallback_day: Weekday,
    ctx: &EngineContext,
) -> Result<Vec<i64>, EngineError> {
    let schedule = store.schedule(schedule_id)?.clone();
    let Some(template_id) = schedule.template_id else {
        debug!(schedule_id, "schedule has no template, no shifts to create");
        return Ok(Vec::new());
    };
    let template = store.template(template_id)?.clone();

    let source_day = if template
        .worktimes
        .iter()
        .any(|slot| slot.day_of_week == day_of_week)
    {
        day_of_week
    } else {
        fallback_day
    };

    let day = week_start + Duration::days(i64::from(day_of_week.sequence()));
    let mut created = Vec::new();
    let mut prev: Option<DateTime<Utc>> = None;

    for slot in template
        .worktimes
        .iter()
        .filter(|slot| slot.day_of_week == source_day)
    {
        let from_time = slot
            .from_time
            .as_naive_time()
            .ok_or_else(|| DomainError::InvalidTimeOfDay(slot.from_time.to_string()))?;

        let mut date_start = ctx.to_utc(day.and_time(from_time))?;
        if let Some(prev_start) = prev {
            let delta = utc_clock_delta_seconds(prev_start, date_start);
            date_start = prev_start + Duration::seconds(delta);
        }
        let date_end = date_start + Duration::seconds(slot.duration_seconds());

        let detail = ScheduleDetail::new(schedule_id, day_of_week, day, date_start, date_end);
        created.push(store.insert_detail(detail)?);
        prev = Some(date_start);
    }

    Ok(created)
}
