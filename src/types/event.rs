// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event records and event types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Timestamp;
use crate::error::ValueError;

/// Category of occurrence recorded by the cloud.
///
/// Each type is queried through the vendor's numeric event value codes.
/// [`EventType::All`] carries no codes and matches every event.
///
/// # Examples
///
/// ```
/// use wyze_sensors::types::EventType;
///
/// assert_eq!(EventType::Sound.value_codes(), &["2"]);
/// assert!(EventType::All.value_codes().is_empty());
/// assert_eq!("co2".parse::<EventType>().unwrap(), EventType::Co2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Motion detected by a camera or motion sensor.
    #[default]
    Motion,
    /// Sound detected by a camera.
    Sound,
    /// Smoke alarm heard by a camera.
    Smoke,
    /// CO alarm heard by a camera.
    Co2,
    /// Contact sensor opened or closed.
    Triggered,
    /// Any event.
    All,
}

impl EventType {
    /// Returns the vendor event value codes for this type.
    #[must_use]
    pub const fn value_codes(&self) -> &'static [&'static str] {
        match self {
            Self::Motion | Self::Triggered => &["1"],
            Self::Sound => &["2"],
            Self::Smoke => &["4"],
            Self::Co2 => &["5"],
            Self::All => &[],
        }
    }

    /// Returns the lowercase name of this type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Motion => "motion",
            Self::Sound => "sound",
            Self::Smoke => "smoke",
            Self::Co2 => "co2",
            Self::Triggered => "triggered",
            Self::All => "all",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "motion" => Ok(Self::Motion),
            "sound" => Ok(Self::Sound),
            "smoke" => Ok(Self::Smoke),
            "co2" => Ok(Self::Co2),
            "triggered" | "trigger" => Ok(Self::Triggered),
            "all" => Ok(Self::All),
            _ => Err(ValueError::UnknownEventType(s.to_string())),
        }
    }
}

/// A single event record returned by the cloud.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Vendor event identifier.
    #[serde(default)]
    pub event_id: String,
    /// Vendor event value code (type tag).
    #[serde(default)]
    pub event_value: String,
    /// When the event happened.
    pub event_ts: Timestamp,
}

impl Event {
    /// Creates an event with the given type tag and timestamp.
    #[must_use]
    pub fn new(event_value: impl Into<String>, event_ts: Timestamp) -> Self {
        Self {
            event_id: String::new(),
            event_value: event_value.into(),
            event_ts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_type_parse_is_case_insensitive() {
        assert_eq!("SMOKE".parse::<EventType>().unwrap(), EventType::Smoke);
        assert_eq!("Trigger".parse::<EventType>().unwrap(), EventType::Triggered);
    }

    #[test]
    fn event_type_parse_unknown() {
        assert!(matches!(
            "doorbell".parse::<EventType>(),
            Err(ValueError::UnknownEventType(_))
        ));
    }

    #[test]
    fn event_type_default_is_motion() {
        assert_eq!(EventType::default(), EventType::Motion);
    }

    #[test]
    fn event_deserializes_from_cloud_entry() {
        let event: Event = serde_json::from_value(serde_json::json!({
            "event_id": "abc",
            "event_value": "1",
            "event_ts": 1_650_000_000_000_i64,
            "device_mac": "AABB"
        }))
        .unwrap();

        assert_eq!(event.event_id, "abc");
        assert_eq!(event.event_ts, Timestamp::from_millis(1_650_000_000_000));
    }
}
