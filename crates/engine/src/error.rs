// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::NaiveDateTime;
use chrono_tz::Tz;
use roster_domain::DomainError;
use roster_store::StoreError;
use thiserror::Error;

/// Errors that can occur while running the scheduling engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A domain validation failed.
    #[error(transparent)]
    Domain(#[from] DomainError),
    /// A storage operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// A wall-clock time does not exist, or exists twice, in the
    /// context timezone (DST fold or gap).
    #[error("Local time {local} is ambiguous or missing in {timezone}")]
    AmbiguousLocalTime {
        /// The unresolvable wall-clock time.
        local: NaiveDateTime,
        /// The timezone it was interpreted in.
        timezone: Tz,
    },
}
