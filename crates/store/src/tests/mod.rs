// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]


use crate::Store;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use roster_domain::{Employee, Punch, PunchAction, Schedule, ScheduleDetail, Weekday};

pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub(crate) fn stamp(d: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, d, hour, 0, 0).unwrap()
}

pub(crate) fn seeded_store() -> (Store, i64, i64) {
    let mut store = Store::new();
    let employee_id = store.insert_employee(Employee::new(String::from("Jane Doe"), None));
    let schedule_id = store
        .insert_schedule(Schedule::new(
            String::from("Jane Doe: 2026-03-02 Wk 10"),
            employee_id,
            None,
            date(2026, 3, 2),
            date(2026, 3, 8),
        ))
        .unwrap();
    (store, employee_id, schedule_id)
}

pub(crate) fn monday_detail(schedule_id: i64) -> ScheduleDetail {
    ScheduleDetail::new(
        schedule_id,
        Weekday::Monday,
        date(2026, 3, 2),
        stamp(2, 8),
        stamp(2, 17),
    )
}

pub(crate) fn sign_in(employee_id: i64, d: u32, hour: u32) -> Punch {
    Punch::new(employee_id, stamp(d, hour), PunchAction::SignIn)
}
