// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request context.
//!
//! The acting user's timezone and the current local date are threaded
//! explicitly through every entry point instead of living in ambient
//! state. Wall-clock template times are interpreted in this timezone
//! and stored as UTC.

use crate::error::EngineError;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::warn;

/// The timezone and calendar-date context an engine call runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineContext {
    /// The acting user's timezone.
    pub timezone: Tz,
    /// The current local calendar date.
    pub today: NaiveDate,
}

impl EngineContext {
    /// Creates a context.
    #[must_use]
    pub const fn new(timezone: Tz, today: NaiveDate) -> Self {
        Self { timezone, today }
    }

    /// Creates a UTC context.
    #[must_use]
    pub const fn utc(today: NaiveDate) -> Self {
        Self::new(Tz::UTC, today)
    }

    /// Creates a context from an optional timezone name, falling back
    /// to UTC when the name is absent or unparsable.
    #[must_use]
    pub fn from_name(name: Option<&str>, today: NaiveDate) -> Self {
        let timezone = name.map_or(Tz::UTC, |value| {
            value.parse().unwrap_or_else(|_| {
                warn!(timezone = value, "unknown timezone, falling back to UTC");
                Tz::UTC
            })
        });
        Self::new(timezone, today)
    }

    /// Converts a local wall-clock datetime to UTC.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall-clock time is ambiguous or does not
    /// exist due to a DST transition.
    pub fn to_utc(&self, local: NaiveDateTime) -> Result<DateTime<Utc>, EngineError> {
        self.timezone
            .from_local_datetime(&local)
            .single()
            .map(|resolved| resolved.with_timezone(&Utc))
            .ok_or(EngineError::AmbiguousLocalTime {
                local,
                timezone: self.timezone,
            })
    }

    /// Returns the local calendar date of a UTC instant.
    #[must_use]
    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.timezone).date_naive()
    }

    /// Returns the UTC window `[start, start + 24h)` covering one local
    /// calendar day.
    ///
    /// # Errors
    ///
    /// Returns an error if local midnight cannot be resolved.
    pub fn day_window(&self, day: NaiveDate) -> Result<(DateTime<Utc>, DateTime<Utc>), EngineError> {
        let start = self.to_utc(day.and_time(NaiveTime::MIN))?;
        Ok((start, start + Duration::hours(24)))
    }
}
