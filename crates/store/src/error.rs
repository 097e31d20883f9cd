// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{DateTime, NaiveDate, Utc};
use roster_domain::DomainError;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A domain validation rejected the record.
    #[error(transparent)]
    Domain(#[from] DomainError),
    /// The requested record was not found.
    #[error("{entity} {id} not found")]
    NotFound {
        /// The table the lookup ran against.
        entity: &'static str,
        /// The missing identifier.
        id: i64,
    },
    /// An identical alert is already recorded.
    #[error("Alert for rule {rule_id} at {timestamp} already exists")]
    DuplicateAlert {
        /// The rule that fired.
        rule_id: i64,
        /// The trigger moment.
        timestamp: DateTime<Utc>,
    },
    /// More than one schedule claims the same employee-day.
    #[error("Employee {employee_id} has {count} schedules covering {day}")]
    AmbiguousSchedule {
        /// The employee with conflicting coverage.
        employee_id: i64,
        /// The contested day.
        day: NaiveDate,
        /// How many schedules cover it.
        count: usize,
    },
}
