// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-side operations.
//!
//! List queries return owned clones sorted the way the engine consumes
//! them, so callers can keep iterating while they mutate the store.

use crate::error::StoreError;
use crate::store::Store;
use chrono::{DateTime, NaiveDate, Utc};
use roster_domain::{
    Alert, AlertRule, Employee, Leave, Punch, Schedule, ScheduleDetail, ScheduleTemplate,
};

impl Store {
    /// Looks up an employee.
    ///
    /// # Errors
    ///
    /// Returns an error if the employee is unknown.
    pub fn employee(&self, employee_id: i64) -> Result<&Employee, StoreError> {
        self.employees
            .get(&employee_id)
            .ok_or(StoreError::NotFound {
                entity: "employee",
                id: employee_id,
            })
    }

    /// Returns all employees in id order.
    #[must_use]
    pub fn employees(&self) -> Vec<Employee> {
        self.employees.values().cloned().collect()
    }

    /// Looks up a template.
    ///
    /// # Errors
    ///
    /// Returns an error if the template is unknown.
    pub fn template(&self, template_id: i64) -> Result<&ScheduleTemplate, StoreError> {
        self.templates
            .get(&template_id)
            .ok_or(StoreError::NotFound {
                entity: "template",
                id: template_id,
            })
    }

    /// Looks up a schedule.
    ///
    /// # Errors
    ///
    /// Returns an error if the schedule is unknown.
    pub fn schedule(&self, schedule_id: i64) -> Result<&Schedule, StoreError> {
        self.schedules
            .get(&schedule_id)
            .ok_or(StoreError::NotFound {
                entity: "schedule",
                id: schedule_id,
            })
    }

    /// Looks up a schedule detail.
    ///
    /// # Errors
    ///
    /// Returns an error if the detail is unknown.
    pub fn detail(&self, detail_id: i64) -> Result<&ScheduleDetail, StoreError> {
        self.details.get(&detail_id).ok_or(StoreError::NotFound {
            entity: "detail",
            id: detail_id,
        })
    }

    /// Looks up a punch.
    ///
    /// # Errors
    ///
    /// Returns an error if the punch is unknown.
    pub fn punch(&self, punch_id: i64) -> Result<&Punch, StoreError> {
        self.punches.get(&punch_id).ok_or(StoreError::NotFound {
            entity: "punch",
            id: punch_id,
        })
    }

    /// Looks up a leave.
    ///
    /// # Errors
    ///
    /// Returns an error if the leave is unknown.
    pub fn leave(&self, leave_id: i64) -> Result<&Leave, StoreError> {
        self.leaves.get(&leave_id).ok_or(StoreError::NotFound {
            entity: "leave",
            id: leave_id,
        })
    }

    /// Returns an employee's schedules ordered by start date.
    #[must_use]
    pub fn schedules_for_employee(&self, employee_id: i64) -> Vec<Schedule> {
        let mut schedules: Vec<Schedule> = self
            .schedules
            .values()
            .filter(|schedule| schedule.employee_id == employee_id)
            .cloned()
            .collect();
        schedules.sort_by_key(|schedule| schedule.date_start);
        schedules
    }

    /// Returns an employee's schedules overlapping a date range,
    /// ordered by start date.
    #[must_use]
    pub fn schedules_overlapping(
        &self,
        employee_id: i64,
        date_start: NaiveDate,
        date_end: NaiveDate,
    ) -> Vec<Schedule> {
        let mut schedules: Vec<Schedule> = self
            .schedules
            .values()
            .filter(|schedule| {
                schedule.employee_id == employee_id && schedule.overlaps(date_start, date_end)
            })
            .cloned()
            .collect();
        schedules.sort_by_key(|schedule| schedule.date_start);
        schedules
    }

    /// Returns the schedule covering an employee-day, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if more than one schedule covers the day; the
    /// overlap invariant should make that impossible, so a hit means
    /// the store was seeded inconsistently.
    pub fn schedule_for_day(
        &self,
        employee_id: i64,
        day: NaiveDate,
    ) -> Result<Option<Schedule>, StoreError> {
        let covering: Vec<&Schedule> = self
            .schedules
            .values()
            .filter(|schedule| {
                schedule.employee_id == employee_id
                    && schedule.date_start <= day
                    && day <= schedule.date_end
            })
            .collect();

        match covering.as_slice() {
            [] => Ok(None),
            [schedule] => Ok(Some((*schedule).clone())),
            _ => Err(StoreError::AmbiguousSchedule {
                employee_id,
                day,
                count: covering.len(),
            }),
        }
    }

    /// Returns a schedule's details ordered by start.
    #[must_use]
    pub fn details_for_schedule(&self, schedule_id: i64) -> Vec<ScheduleDetail> {
        let mut details: Vec<ScheduleDetail> = self
            .details
            .values()
            .filter(|detail| detail.schedule_id == schedule_id)
            .cloned()
            .collect();
        details.sort_by_key(|detail| detail.date_start);
        details
    }

    /// Returns an employee's details for one local calendar day,
    /// ordered by start.
    #[must_use]
    pub fn details_on_day(&self, employee_id: i64, day: NaiveDate) -> Vec<ScheduleDetail> {
        let mut details: Vec<ScheduleDetail> = self
            .details
            .values()
            .filter(|detail| {
                detail.day == day
                    && self
                        .schedules
                        .get(&detail.schedule_id)
                        .is_some_and(|schedule| schedule.employee_id == employee_id)
            })
            .cloned()
            .collect();
        details.sort_by_key(|detail| detail.date_start);
        details
    }

    /// Returns an employee's punches within `[from, to)`, ordered by
    /// timestamp.
    #[must_use]
    pub fn punches_in_window(
        &self,
        employee_id: i64,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Vec<Punch> {
        let mut punches: Vec<Punch> = self
            .punches
            .values()
            .filter(|punch| {
                punch.employee_id == employee_id
                    && punch.timestamp >= from
                    && punch.timestamp < to
            })
            .cloned()
            .collect();
        punches.sort_by_key(|punch| punch.timestamp);
        punches
    }

    /// Returns all active alert rules in id order.
    #[must_use]
    pub fn active_rules(&self) -> Vec<AlertRule> {
        self.rules
            .values()
            .filter(|rule| rule.active)
            .cloned()
            .collect()
    }

    /// Returns whether an identical alert is already stored.
    #[must_use]
    pub fn alert_exists(
        &self,
        rule_id: i64,
        punch_id: Option<i64>,
        detail_id: Option<i64>,
        timestamp: DateTime<Utc>,
    ) -> bool {
        self.alerts.values().any(|alert| {
            alert.rule_id == rule_id
                && alert.punch_id == punch_id
                && alert.detail_id == detail_id
                && alert.timestamp == timestamp
        })
    }

    /// Returns the alerts linked to a punch.
    #[must_use]
    pub fn alerts_for_punch(&self, punch_id: i64) -> Vec<Alert> {
        self.alerts
            .values()
            .filter(|alert| alert.punch_id == Some(punch_id))
            .cloned()
            .collect()
    }

    /// Returns the alerts linked to a schedule detail.
    #[must_use]
    pub fn alerts_for_detail(&self, detail_id: i64) -> Vec<Alert> {
        self.alerts
            .values()
            .filter(|alert| alert.detail_id == Some(detail_id))
            .cloned()
            .collect()
    }

    /// Returns the alerts for an employee whose timestamp falls within
    /// `[from, to)`.
    ///
    /// An alert carries no employee of its own; ownership is resolved
    /// through the linked punch or schedule detail.
    #[must_use]
    pub fn alerts_in_window(
        &self,
        employee_id: i64,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Vec<Alert> {
        self.alerts
            .values()
            .filter(|alert| {
                alert.timestamp >= from
                    && alert.timestamp < to
                    && self.alert_owner(alert) == Some(employee_id)
            })
            .cloned()
            .collect()
    }

    fn alert_owner(&self, alert: &Alert) -> Option<i64> {
        if let Some(punch_id) = alert.punch_id {
            return self.punches.get(&punch_id).map(|punch| punch.employee_id);
        }
        let detail = self.details.get(&alert.detail_id?)?;
        self.schedules
            .get(&detail.schedule_id)
            .map(|schedule| schedule.employee_id)
    }

    /// Returns the intervals of validated absences overlapping
    /// `[from, to]` for an employee.
    #[must_use]
    pub fn carving_leave_windows(
        &self,
        employee_id: i64,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
        let mut windows: Vec<(DateTime<Utc>, DateTime<Utc>)> = self
            .leaves
            .values()
            .filter(|leave| {
                leave.employee_id == employee_id
                    && leave.carves_schedule()
                    && leave.date_from <= to
                    && leave.date_to >= from
            })
            .map(|leave| (leave.date_from, leave.date_to))
            .collect();
        windows.sort();
        windows
    }
}
