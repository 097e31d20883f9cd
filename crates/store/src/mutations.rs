// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write-side operations.
//!
//! Every insert validates the record against the domain invariants
//! before it lands in a table. Identifiers are assigned here; callers
//! pass records with a zero id.

use crate::error::StoreError;
use crate::store::Store;
use roster_domain::{
    Alert, AlertRule, Employee, Leave, Punch, Schedule, ScheduleDetail, ScheduleTemplate,
    validate_detail_interval, validate_monday_start, validate_no_detail_overlap,
    validate_no_schedule_overlap, validate_worktime_slots,
};
use tracing::debug;

impl Store {
    /// Inserts an employee and returns its assigned id.
    pub fn insert_employee(&mut self, mut employee: Employee) -> i64 {
        let id = self.allocate_id();
        employee.employee_id = id;
        self.employees.insert(id, employee);
        id
    }

    /// Inserts a template and returns its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if two work-time slots on the same day share a
    /// boundary time.
    pub fn insert_template(&mut self, mut template: ScheduleTemplate) -> Result<i64, StoreError> {
        validate_worktime_slots(&template)?;
        let id = self.allocate_id();
        template.template_id = id;
        self.templates.insert(id, template);
        Ok(id)
    }

    /// Inserts a schedule and returns its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the schedule does not start on a Monday or
    /// overlaps another schedule of the same employee.
    pub fn insert_schedule(&mut self, mut schedule: Schedule) -> Result<i64, StoreError> {
        validate_monday_start(schedule.date_start)?;
        let existing: Vec<Schedule> = self.schedules.values().cloned().collect();
        validate_no_schedule_overlap(
            schedule.employee_id,
            schedule.date_start,
            schedule.date_end,
            &existing,
            None,
        )?;

        let id = self.allocate_id();
        schedule.schedule_id = id;
        self.schedules.insert(id, schedule);
        Ok(id)
    }

    /// Replaces a stored schedule.
    ///
    /// # Errors
    ///
    /// Returns an error if the schedule is unknown or the new date
    /// range violates the Monday-start or overlap invariants.
    pub fn update_schedule(&mut self, schedule: Schedule) -> Result<(), StoreError> {
        let id = schedule.schedule_id;
        if !self.schedules.contains_key(&id) {
            return Err(StoreError::NotFound {
                entity: "schedule",
                id,
            });
        }

        validate_monday_start(schedule.date_start)?;
        let existing: Vec<Schedule> = self.schedules.values().cloned().collect();
        validate_no_schedule_overlap(
            schedule.employee_id,
            schedule.date_start,
            schedule.date_end,
            &existing,
            Some(id),
        )?;

        self.schedules.insert(id, schedule);
        Ok(())
    }

    /// Removes a schedule. Its details and alerts are the caller's
    /// responsibility; deletability is enforced one layer up.
    ///
    /// # Errors
    ///
    /// Returns an error if the schedule is unknown.
    pub fn remove_schedule(&mut self, schedule_id: i64) -> Result<Schedule, StoreError> {
        debug!(schedule_id, "removing schedule");
        self.schedules
            .remove(&schedule_id)
            .ok_or(StoreError::NotFound {
                entity: "schedule",
                id: schedule_id,
            })
    }

    /// Inserts a schedule detail and returns its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the owning schedule is unknown, the interval
    /// is not positive, or the interval overlaps a sibling detail.
    pub fn insert_detail(&mut self, mut detail: ScheduleDetail) -> Result<i64, StoreError> {
        if !self.schedules.contains_key(&detail.schedule_id) {
            return Err(StoreError::NotFound {
                entity: "schedule",
                id: detail.schedule_id,
            });
        }

        validate_detail_interval(detail.date_start, detail.date_end)?;
        let siblings: Vec<ScheduleDetail> = self.details.values().cloned().collect();
        validate_no_detail_overlap(
            detail.schedule_id,
            detail.date_start,
            detail.date_end,
            &siblings,
            None,
        )?;

        let id = self.allocate_id();
        detail.detail_id = id;
        self.details.insert(id, detail);
        Ok(id)
    }

    /// Replaces a stored detail.
    ///
    /// # Errors
    ///
    /// Returns an error if the detail is unknown or the new interval is
    /// invalid.
    pub fn update_detail(&mut self, detail: ScheduleDetail) -> Result<(), StoreError> {
        let id = detail.detail_id;
        if !self.details.contains_key(&id) {
            return Err(StoreError::NotFound {
                entity: "detail",
                id,
            });
        }

        validate_detail_interval(detail.date_start, detail.date_end)?;
        let siblings: Vec<ScheduleDetail> = self.details.values().cloned().collect();
        validate_no_detail_overlap(
            detail.schedule_id,
            detail.date_start,
            detail.date_end,
            &siblings,
            Some(id),
        )?;

        self.details.insert(id, detail);
        Ok(())
    }

    /// Removes a schedule detail.
    ///
    /// # Errors
    ///
    /// Returns an error if the detail is unknown.
    pub fn remove_detail(&mut self, detail_id: i64) -> Result<ScheduleDetail, StoreError> {
        debug!(detail_id, "removing schedule detail");
        self.details
            .remove(&detail_id)
            .ok_or(StoreError::NotFound {
                entity: "detail",
                id: detail_id,
            })
    }

    /// Inserts a punch and returns its assigned id.
    pub fn insert_punch(&mut self, mut punch: Punch) -> i64 {
        let id = self.allocate_id();
        punch.punch_id = id;
        self.punches.insert(id, punch);
        id
    }

    /// Removes a punch. Alerts linked to it are the caller's
    /// responsibility.
    ///
    /// # Errors
    ///
    /// Returns an error if the punch is unknown.
    pub fn remove_punch(&mut self, punch_id: i64) -> Result<Punch, StoreError> {
        debug!(punch_id, "removing punch");
        self.punches.remove(&punch_id).ok_or(StoreError::NotFound {
            entity: "punch",
            id: punch_id,
        })
    }

    /// Inserts a leave and returns its assigned id.
    pub fn insert_leave(&mut self, mut leave: Leave) -> i64 {
        let id = self.allocate_id();
        leave.leave_id = id;
        self.leaves.insert(id, leave);
        id
    }

    /// Replaces a stored leave.
    ///
    /// # Errors
    ///
    /// Returns an error if the leave is unknown.
    pub fn update_leave(&mut self, leave: Leave) -> Result<(), StoreError> {
        let id = leave.leave_id;
        if !self.leaves.contains_key(&id) {
            return Err(StoreError::NotFound {
                entity: "leave",
                id,
            });
        }
        self.leaves.insert(id, leave);
        Ok(())
    }

    /// Inserts an alert rule and returns its assigned id.
    pub fn insert_rule(&mut self, mut rule: AlertRule) -> i64 {
        let id = self.allocate_id();
        rule.rule_id = id;
        self.rules.insert(id, rule);
        id
    }

    /// Inserts an alert and returns its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if an alert with the same rule, trigger record
    /// and timestamp is already stored.
    pub fn insert_alert(&mut self, mut alert: Alert) -> Result<i64, StoreError> {
        if self.alert_exists(alert.rule_id, alert.punch_id, alert.detail_id, alert.timestamp) {
            return Err(StoreError::DuplicateAlert {
                rule_id: alert.rule_id,
                timestamp: alert.timestamp,
            });
        }

        let id = self.allocate_id();
        alert.alert_id = id;
        self.alerts.insert(id, alert);
        Ok(id)
    }

    /// Removes an alert.
    ///
    /// # Errors
    ///
    /// Returns an error if the alert is unknown.
    pub fn remove_alert(&mut self, alert_id: i64) -> Result<Alert, StoreError> {
        debug!(alert_id, "removing alert");
        self.alerts.remove(&alert_id).ok_or(StoreError::NotFound {
            entity: "alert",
            id: alert_id,
        })
    }
}
