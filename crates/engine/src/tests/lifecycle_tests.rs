// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{ctx, seeded, stamp, standard_template};
use crate::{
    confirm_schedule, delete_schedule, expand_schedule, lock_detail, lock_schedule,
    unconfirm_schedule, unlock_detail,
};
use roster_domain::{Alert, AlertCode, AlertRule, DetailState, ScheduleState};

#[test]
fn test_confirmation_cascades_to_details() {
    let (mut store, _, schedule_id) = seeded(standard_template());
    expand_schedule(&mut store, schedule_id, &ctx()).unwrap();

    confirm_schedule(&mut store, schedule_id).unwrap();
    assert_eq!(
        store.schedule(schedule_id).unwrap().state,
        ScheduleState::Confirmed
    );
    assert!(
        store
            .details_for_schedule(schedule_id)
            .iter()
            .all(|d| d.state == DetailState::Confirmed)
    );

    unconfirm_schedule(&mut store, schedule_id).unwrap();
    assert_eq!(
        store.schedule(schedule_id).unwrap().state,
        ScheduleState::Draft
    );
    assert!(
        store
            .details_for_schedule(schedule_id)
            .iter()
            .all(|d| d.state == DetailState::Draft)
    );
}

#[test]
fn test_invalid_transitions_are_rejected() {
    let (mut store, _, schedule_id) = seeded(standard_template());
    expand_schedule(&mut store, schedule_id, &ctx()).unwrap();

    // A draft schedule cannot be locked outright.
    assert!(lock_schedule(&mut store, schedule_id).is_err());

    confirm_schedule(&mut store, schedule_id).unwrap();
    assert!(confirm_schedule(&mut store, schedule_id).is_err());
}

#[test]
fn test_schedule_lock_state_follows_its_details() {
    let (mut store, _, schedule_id) = seeded(standard_template());
    expand_schedule(&mut store, schedule_id, &ctx()).unwrap();
    confirm_schedule(&mut store, schedule_id).unwrap();

    lock_schedule(&mut store, schedule_id).unwrap();
    assert_eq!(
        store.schedule(schedule_id).unwrap().state,
        ScheduleState::Locked
    );

    // One unlocked detail drops the whole schedule to unlocked.
    let detail_id = store.details_for_schedule(schedule_id)[0].detail_id;
    unlock_detail(&mut store, detail_id).unwrap();
    assert_eq!(
        store.schedule(schedule_id).unwrap().state,
        ScheduleState::Unlocked
    );

    // Re-locking the last stray detail locks the schedule again.
    lock_detail(&mut store, detail_id).unwrap();
    assert_eq!(
        store.schedule(schedule_id).unwrap().state,
        ScheduleState::Locked
    );
}

#[test]
fn test_deletion_requires_a_deletable_state() {
    let (mut store, _, schedule_id) = seeded(standard_template());
    expand_schedule(&mut store, schedule_id, &ctx()).unwrap();
    confirm_schedule(&mut store, schedule_id).unwrap();

    assert!(delete_schedule(&mut store, schedule_id, &ctx()).is_err());
    assert!(store.schedule(schedule_id).is_ok());
}

#[test]
fn test_deletion_removes_details_and_their_alerts() {
    let (mut store, _, schedule_id) = seeded(standard_template());
    expand_schedule(&mut store, schedule_id, &ctx()).unwrap();

    let rule_id = store.insert_rule(AlertRule::new(
        String::from("Missing attendance"),
        AlertCode::MissAtt,
        0,
        0,
    ));
    let detail_id = store.details_for_schedule(schedule_id)[0].detail_id;
    store
        .insert_alert(Alert::for_detail(rule_id, stamp(2, 8, 0), detail_id))
        .unwrap();

    delete_schedule(&mut store, schedule_id, &ctx()).unwrap();
    assert!(store.schedule(schedule_id).is_err());
    assert!(store.details_for_schedule(schedule_id).is_empty());
    assert!(store.alerts_for_detail(detail_id).is_empty());
}
