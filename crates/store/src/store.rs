// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The in-memory record store.
//!
//! Tables are keyed by a monotonically assigned identifier shared
//! across the store, so an id never repeats even across tables. The
//! surrounding application is expected to swap this layer out for its
//! own persistence; everything above it only touches the mutation and
//! query methods.

use roster_domain::{
    Alert, AlertRule, Employee, Leave, Punch, Schedule, ScheduleDetail, ScheduleTemplate,
};
use std::collections::BTreeMap;

/// All scheduling records, held in memory.
#[derive(Debug, Clone, Default)]
pub struct Store {
    pub(crate) employees: BTreeMap<i64, Employee>,
    pub(crate) templates: BTreeMap<i64, ScheduleTemplate>,
    pub(crate) schedules: BTreeMap<i64, Schedule>,
    pub(crate) details: BTreeMap<i64, ScheduleDetail>,
    pub(crate) punches: BTreeMap<i64, Punch>,
    pub(crate) leaves: BTreeMap<i64, Leave>,
    pub(crate) rules: BTreeMap<i64, AlertRule>,
    pub(crate) alerts: BTreeMap<i64, Alert>,
    next_id: i64,
}

impl Store {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out the next record identifier.
    pub(crate) fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}
