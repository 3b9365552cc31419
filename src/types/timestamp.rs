// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Millisecond timestamps as used by the Wyze cloud.

use std::fmt;

use chrono::{DateTime, Utc};

/// A point in time in milliseconds since the Unix epoch.
///
/// Event records carry their time in this unit, and sensors compare against
/// it to decide whether an event is new.
///
/// # Examples
///
/// ```
/// use wyze_sensors::types::Timestamp;
///
/// let ts = Timestamp::from_millis(1_700_000_000_000);
/// assert_eq!(ts.as_millis(), 1_700_000_000_000);
/// assert!(Timestamp::now() > ts);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Creates a timestamp from milliseconds since the epoch.
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Returns the current time in whole seconds, expressed in milliseconds.
    ///
    /// The sub-second part is dropped, so the result always ends in `000`.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now().timestamp() * 1000)
    }

    /// Returns the number of milliseconds since the epoch.
    #[must_use]
    pub const fn as_millis(&self) -> i64 {
        self.0
    }

    /// Returns a timestamp shifted by the given number of milliseconds.
    #[must_use]
    pub const fn offset_millis(&self, millis: i64) -> Self {
        Self(self.0.saturating_add(millis))
    }

    /// Converts to a UTC date-time, if the value is representable.
    #[must_use]
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Timestamp {
    fn from(millis: i64) -> Self {
        Self(millis)
    }
}
