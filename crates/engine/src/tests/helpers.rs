// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::EngineContext;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use roster_domain::{
    Employee, Punch, PunchAction, Schedule, ScheduleTemplate, Weekday, WorkTimeSlot,
    schedule_display_name,
};
use roster_store::Store;
use std::collections::BTreeSet;

pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub(crate) fn stamp(d: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, d, hour, minute, 0).unwrap()
}

/// A UTC context dated well after the March test schedules.
pub(crate) fn ctx() -> EngineContext {
    EngineContext::utc(date(2026, 3, 20))
}

pub(crate) fn slot(day: Weekday, from: &str, to: &str) -> WorkTimeSlot {
    WorkTimeSlot::new(day, from.parse().unwrap(), to.parse().unwrap())
}

/// Monday through Friday, 08:00-17:00, no explicit rest days.
pub(crate) fn standard_template() -> ScheduleTemplate {
    ScheduleTemplate::new(
        String::from("Standard"),
        BTreeSet::new(),
        Weekday::ALL[..5]
            .iter()
            .map(|day| slot(*day, "08:00", "17:00"))
            .collect(),
    )
}

/// A Monday split shift: 08:00-12:00 and 13:00-17:00.
pub(crate) fn split_template() -> ScheduleTemplate {
    ScheduleTemplate::new(
        String::from("Split"),
        BTreeSet::new(),
        vec![
            slot(Weekday::Monday, "08:00", "12:00"),
            slot(Weekday::Monday, "13:00", "17:00"),
        ],
    )
}

/// Seeds a store with one employee on the given template and a
/// two-week schedule starting Monday 2026-03-02.
pub(crate) fn seeded(template: ScheduleTemplate) -> (Store, i64, i64) {
    let mut store = Store::new();
    let template_id = store.insert_template(template).unwrap();
    let employee_id =
        store.insert_employee(Employee::new(String::from("Jane Doe"), Some(template_id)));
    let schedule_id = store
        .insert_schedule(Schedule::new(
            schedule_display_name("Jane Doe", date(2026, 3, 2)),
            employee_id,
            Some(template_id),
            date(2026, 3, 2),
            date(2026, 3, 15),
        ))
        .unwrap();
    (store, employee_id, schedule_id)
}

pub(crate) fn punch_in(store: &mut Store, employee_id: i64, at: DateTime<Utc>) -> i64 {
    store.insert_punch(Punch::new(employee_id, at, PunchAction::SignIn))
}

pub(crate) fn punch_out(store: &mut Store, employee_id: i64, at: DateTime<Utc>) -> i64 {
    store.insert_punch(Punch::new(employee_id, at, PunchAction::SignOut))
}
